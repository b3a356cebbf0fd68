//! pdex-api: HTTP client for the upstream PokeAPI catalog.
//!
//! Two read-only endpoints are consumed: the bounded list (ids derived
//! from each entry's resource URL) and the per-id detail record. All
//! failures map onto [`ApiError`] so callers can branch on cause.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use pdex_core::pokemon::{PokemonDetails, PokemonSummary};
use pdex_core::resource::id_from_resource_url;

/// Environment override for the API base URL.
pub const ENV_API_URL: &str = "PDEX_API_URL";

/// Upstream REST API root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Entities fetched by the list endpoint when no limit is given.
pub const DEFAULT_LIST_LIMIT: u32 = 151;

/// Official-artwork sprite host; the image URL is a pure function of id.
const SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("pdex/", env!("CARGO_PKG_VERSION"));

/// Failure kinds callers can branch on.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Derived artwork image URL for a catalog id.
pub fn image_url(id: u32) -> String {
    format!("{SPRITE_BASE_URL}/{id}.png")
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    name: String,
    url: String,
}

/// Client for the upstream catalog API.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a client against the default (or `PDEX_API_URL`) base.
    pub fn new() -> Result<Self, ApiError> {
        let base = std::env::var(ENV_API_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base)
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(format!("build http client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the bounded catalog list.
    ///
    /// Ids are derived from each entry's resource URL; an entry whose
    /// URL has no numeric trailing segment is a parse error.
    pub async fn list_pokemon(&self, limit: u32) -> Result<Vec<PokemonSummary>, ApiError> {
        let url = format!("{}/pokemon?limit={limit}", self.base_url);
        let response: ListResponse = self.fetch_and_parse(&url).await?;

        let mut list = Vec::with_capacity(response.results.len());
        for entry in response.results {
            let id = id_from_resource_url(&entry.url)
                .ok_or_else(|| ApiError::Parse(format!("no id in resource url {}", entry.url)))?;
            list.push(PokemonSummary {
                id,
                name: entry.name,
                image_url: image_url(id),
            });
        }
        Ok(list)
    }

    /// Fetch one detail record. Unknown ids surface as [`ApiError::NotFound`].
    pub async fn get_details(&self, id: u32) -> Result<PokemonDetails, ApiError> {
        let url = format!("{}/pokemon/{id}", self.base_url);
        self.fetch_and_parse(&url).await
    }

    /// Exact lookup by name or decimal id.
    ///
    /// A miss is `Ok(None)`; other failures propagate.
    pub async fn find_pokemon(&self, query: &str) -> Result<Option<PokemonSummary>, ApiError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        let url = format!("{}/pokemon/{needle}", self.base_url);
        match self.fetch_and_parse::<PokemonDetails>(&url).await {
            Ok(details) => Ok(Some(PokemonSummary {
                id: details.id,
                name: details.name,
                image_url: image_url(details.id),
            })),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// GET + status check + JSON parse. 404 maps to `NotFound`, other
    /// non-success statuses and transport failures to `Network`, a
    /// malformed body to `Parse`.
    async fn fetch_and_parse<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("get {url}: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ApiError::Network(format!(
                "get {url}: HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("read {url}: {e}")))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(format!("decode {url}: {e}")))
    }
}
