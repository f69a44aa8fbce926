use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{Error, Result};

pub const SEARCH_URL: &str = "https://itunes.apple.com/search";

/// One search hit from the podcast directory.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Podcast {
    pub artist_name: String,
    pub collection_name: String,
    pub feed_url: String,
    pub track_count: u32,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_count: u32,
    pub results: Vec<Podcast>,
}

impl SearchResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for DirectoryClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl DirectoryClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: SEARCH_URL.to_string(),
        }
    }

    /// Builds the query URL. An empty term is rejected here so it never reaches the network.
    pub fn search_url(&self, term: &str, limit: Option<u32>) -> Result<Url> {
        if term.is_empty() {
            return Err(Error::EmptySearchTerm);
        }
        let mut params = vec![
            ("term", term.to_string()),
            ("media", "podcast".to_string()),
            ("entity", "podcast".to_string()),
        ];
        if let Some(limit) = limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        Ok(Url::parse_with_params(&self.endpoint, params)?)
    }

    #[instrument(skip(self))]
    pub async fn search(&self, term: &str, limit: Option<u32>) -> Result<SearchResponse> {
        let url = self.search_url(term, limit)?;
        info!("searching podcast directory: {url}");
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response = SearchResponse::from_slice(&body[..])?;
        debug!(
            result_count = response.result_count,
            returned = response.results.len()
        );
        Ok(response)
    }
}
