mod lookup;

pub use lookup::{cmd_location, cmd_movies, cmd_weather};
