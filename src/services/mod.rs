pub mod lookup_service;
pub use lookup_service::{LookupError, LookupService};

pub mod lookup_service_impl;
pub use lookup_service_impl::SeaOrmLookupService;
