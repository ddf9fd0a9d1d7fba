pub mod location;
pub mod movie;
pub mod weather;

pub use location::LocationRecord;
pub use movie::MovieRecord;
pub use weather::WeatherRecord;
