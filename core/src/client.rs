//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `PokedexClient` holds only a `base_url` and the degrade policy. Each
//! operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller (a `Transport`) executes the round-trip in between.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{PokemonDetail, PokemonPage, PokemonRecord, PokemonSummary};

/// What a `parse_*` method does with a non-2xx response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DegradePolicy {
    /// Fold the response into an empty result: `[]` for the list,
    /// `None` for a detail. No error reaches the state container.
    #[default]
    Silent,
    /// Return `ApiError::Status` so the container publishes `Error`.
    Surface,
}

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct PokedexClient {
    base_url: String,
    policy: DegradePolicy,
}

impl PokedexClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            policy: DegradePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DegradePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DegradePolicy {
        self.policy
    }

    pub fn build_list_pokemon(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/pokemon", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `name` is sent as a single percent-encoded path segment, so `/`, `?`
    /// and `#` cannot address a different resource.
    pub fn build_get_pokemon(&self, name: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/pokemon/{}", self.base_url, urlencoding::encode(name)),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Names from the first page, in server order.
    pub fn parse_list_pokemon(&self, response: HttpResponse) -> Result<Vec<PokemonSummary>, ApiError> {
        if !self.accept(&response)? {
            return Ok(Vec::new());
        }
        let page: PokemonPage = decode(&response)?;
        Ok(page.results.into_iter().map(PokemonSummary::from).collect())
    }

    pub fn parse_get_pokemon(&self, response: HttpResponse) -> Result<Option<PokemonDetail>, ApiError> {
        if !self.accept(&response)? {
            return Ok(None);
        }
        let record: PokemonRecord = decode(&response)?;
        Ok(Some(record.into()))
    }

    /// `Ok(true)` when the body should be decoded, `Ok(false)` when the
    /// response degrades to an empty result.
    fn accept(&self, response: &HttpResponse) -> Result<bool, ApiError> {
        if response.is_success() {
            return Ok(true);
        }
        match self.policy {
            DegradePolicy::Silent => {
                warn!(status = response.status, "non-success response degraded to empty result");
                Ok(false)
            }
            DegradePolicy::Surface => Err(ApiError::Status {
                status: response.status,
                body: response.body.clone(),
            }),
        }
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    Ok(serde_json::from_str(&response.body)?)
}
