use serde::{Deserialize, Serialize};

use crate::domain::Coordinates;

/// A geocoded place, keyed by the exact search text that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRecord {
    #[must_use]
    pub fn new(
        search_query: impl Into<String>,
        formatted_query: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            search_query: search_query.into(),
            formatted_query: formatted_query.into(),
            latitude,
            longitude,
        }
    }

    /// The city part of the formatted address: everything before the first comma.
    ///
    /// ```
    /// # use city_explorer::models::LocationRecord;
    /// let loc = LocationRecord::new("seattle", "Seattle, WA, USA", 47.6, -122.3);
    /// assert_eq!(loc.city(), "Seattle");
    /// ```
    #[must_use]
    pub fn city(&self) -> &str {
        self.formatted_query
            .split_once(',')
            .map_or(self.formatted_query.as_str(), |(city, _)| city)
            .trim()
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.latitude, self.longitude)
    }
}

impl From<crate::entities::locations::Model> for LocationRecord {
    fn from(model: crate::entities::locations::Model) -> Self {
        Self {
            search_query: model.search_query,
            formatted_query: model.formatted_query,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}
