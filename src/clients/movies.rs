use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::models::MovieRecord;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub popularity: f64,
    pub release_date: Option<String>,
}

impl From<TmdbMovie> for MovieRecord {
    fn from(movie: TmdbMovie) -> Self {
        Self {
            title: movie.title,
            overview: movie.overview,
            average_votes: movie.vote_average,
            total_votes: movie.vote_count,
            popularity: movie.popularity,
            released_on: movie.release_date.unwrap_or_default(),
        }
    }
}

/// Client for a TMDB-style movie search endpoint (`/3/search/movie`).
#[derive(Clone)]
pub struct MovieClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MovieClient {
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

    pub async fn search(&self, query: &str) -> Result<Vec<TmdbMovie>> {
        let url = format!(
            "{}/3/search/movie?api_key={}&query={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query)
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Movie API error: {} - {}", status, body));
        }

        let response: SearchResponse = response.json().await?;

        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_missing_fields_to_defaults() {
        let movie: TmdbMovie = serde_json::from_value(serde_json::json!({
            "title": "Sleepless in Seattle",
            "vote_average": 6.6,
            "vote_count": 1600,
            "popularity": 12.5,
            "release_date": null
        }))
        .unwrap();

        let record = MovieRecord::from(movie);
        assert_eq!(record.title, "Sleepless in Seattle");
        assert!(record.overview.is_empty());
        assert_eq!(record.total_votes, 1600);
        assert!(record.released_on.is_empty());
    }
}
