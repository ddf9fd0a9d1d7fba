use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::Coordinates;

/// Forecast body as returned by a Dark Sky-style `/forecast/{key}/{lat},{lng}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    pub daily: DailyBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub data: Vec<DailyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyEntry {
    #[serde(default)]
    pub summary: String,
    pub time: i64,
}

impl Forecast {
    /// Whether the service answered for exactly the coordinates that were asked for.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn echoes(&self, requested: Coordinates) -> bool {
        self.latitude == requested.latitude() && self.longitude == requested.longitude()
    }
}

#[derive(Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ForecastClient {
    pub fn with_shared_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub async fn daily(&self, coordinates: Coordinates) -> Result<Forecast> {
        let url = format!(
            "{}/forecast/{}/{},{}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            coordinates.latitude(),
            coordinates.longitude()
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Forecast API error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }
}
