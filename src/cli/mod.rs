//! CLI module - Command-line interface for City Explorer
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

pub use commands::{cmd_location, cmd_movies, cmd_weather};

use clap::{Parser, Subcommand};

/// City Explorer - location, forecast and movie lookup proxy
#[derive(Parser)]
#[command(name = "city-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Resolve a place name through the location cache
    #[command(alias = "loc")]
    Location {
        /// Free-text place name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Fetch the daily forecast for a coordinate pair
    Weather {
        #[arg(allow_hyphen_values = true)]
        latitude: String,
        #[arg(allow_hyphen_values = true)]
        longitude: String,
    },

    /// Search movies for the city a place name resolves to
    Movies {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["city-explorer"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn location_joins_words() {
        let cli = Cli::try_parse_from(["city-explorer", "location", "New", "York"]).unwrap();
        match cli.command {
            Some(Commands::Location { query }) => assert_eq!(query.join(" "), "New York"),
            _ => panic!("expected location command"),
        }
    }

    #[test]
    fn weather_accepts_negative_longitude() {
        let cli =
            Cli::try_parse_from(["city-explorer", "weather", "47.6062", "-122.3321"]).unwrap();
        match cli.command {
            Some(Commands::Weather {
                latitude,
                longitude,
            }) => {
                assert_eq!(latitude, "47.6062");
                assert_eq!(longitude, "-122.3321");
            }
            _ => panic!("expected weather command"),
        }
    }
}
