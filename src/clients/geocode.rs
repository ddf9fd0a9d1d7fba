use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

const ZERO_RESULTS: &str = "ZERO_RESULTS";
const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
    error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeCandidate {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Client for a Google-style geocoding endpoint (`/maps/api/geocode/json`).
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
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

    /// Returns the best candidate for `address`, or `None` when the service
    /// reports zero results.
    pub async fn geocode(&self, address: &str) -> Result<Option<GeocodeCandidate>> {
        let url = format!(
            "{}/maps/api/geocode/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(address),
            urlencoding::encode(&self.api_key)
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Geocoding API error: {} - {}", status, body));
        }

        let body: GeocodeResponse = response.json().await?;
        first_candidate(body)
    }
}

fn first_candidate(body: GeocodeResponse) -> Result<Option<GeocodeCandidate>> {
    match body.status.as_str() {
        ZERO_RESULTS => Ok(None),
        STATUS_OK => Ok(body.results.into_iter().next()),
        other => Err(anyhow::anyhow!(
            "Geocoding API returned {}: {}",
            other,
            body.error_message.unwrap_or_default()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Result<Option<GeocodeCandidate>> {
        first_candidate(serde_json::from_value(json).unwrap())
    }

    #[test]
    fn picks_first_result() {
        let candidate = parse(serde_json::json!({
            "status": "OK",
            "results": [
                {
                    "formatted_address": "Seattle, WA, USA",
                    "geometry": { "location": { "lat": 47.6062, "lng": -122.3321 } }
                },
                {
                    "formatted_address": "Seattle Hill, WA, USA",
                    "geometry": { "location": { "lat": 47.87, "lng": -122.15 } }
                }
            ]
        }))
        .unwrap()
        .unwrap();

        assert_eq!(candidate.formatted_address, "Seattle, WA, USA");
        assert!((candidate.geometry.location.lat - 47.6062).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_results_is_none() {
        let result = parse(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn denied_request_is_error() {
        let err = parse(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }))
        .unwrap_err();
        assert!(err.to_string().contains("REQUEST_DENIED"));
    }
}
