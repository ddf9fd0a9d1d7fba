pub use super::locations::Entity as Locations;
pub use super::weathers::Entity as Weathers;
