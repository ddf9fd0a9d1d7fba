pub mod forecast;
pub mod geocode;
pub mod movies;

pub use forecast::ForecastClient;
pub use geocode::GeocodeClient;
pub use movies::MovieClient;
