use serde::{Deserialize, Serialize};

/// Error envelope. Successful lookups return the bare record instead.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub error: String,
}

impl ApiResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub data: String,
}

/// `?data[latitude]=..&data[longitude]=..`; kept as text and parsed by the lookup layer.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde(rename = "data[latitude]")]
    pub latitude: String,
    #[serde(rename = "data[longitude]")]
    pub longitude: String,
}

/// Accepts either `?data=<query>` or the nested `?data[search_query]=<query>`
/// that clients send after a location lookup.
#[derive(Debug, Default, Deserialize)]
pub struct MoviesQuery {
    pub data: Option<String>,
    #[serde(rename = "data[search_query]")]
    pub search_query: Option<String>,
}

impl MoviesQuery {
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.data.as_deref().or(self.search_query.as_deref())
    }
}
