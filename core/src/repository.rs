//! Resource fetchers for the list and detail endpoints.
//!
//! `PokemonSource` is the contract the orchestrators depend on;
//! `PokemonRepository` is the production implementation that pairs the
//! stateless `PokedexClient` with a `Transport`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::PokedexClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{PokemonDetail, PokemonSummary};

#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// First page of the catalog, in server order.
    async fn fetch_all(&self) -> Result<Vec<PokemonSummary>, ApiError>;

    /// One record by name. `Ok(None)` when the server answered non-2xx
    /// under the silent degrade policy.
    async fn fetch_one(&self, name: &str) -> Result<Option<PokemonDetail>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct PokemonRepository<T> {
    client: PokedexClient,
    transport: T,
}

impl<T: Transport> PokemonRepository<T> {
    pub fn new(client: PokedexClient, transport: T) -> Self {
        Self { client, transport }
    }
}

#[async_trait]
impl<T: Transport> PokemonSource for PokemonRepository<T> {
    async fn fetch_all(&self) -> Result<Vec<PokemonSummary>, ApiError> {
        let request = self.client.build_list_pokemon();
        let response = self.transport.execute(request).await?;
        let list = self.client.parse_list_pokemon(response)?;
        debug!(count = list.len(), "fetched pokemon list");
        Ok(list)
    }

    async fn fetch_one(&self, name: &str) -> Result<Option<PokemonDetail>, ApiError> {
        let request = self.client.build_get_pokemon(name);
        let response = self.transport.execute(request).await?;
        let detail = self.client.parse_get_pokemon(response)?;
        if let Some(detail) = &detail {
            if detail.name != name {
                warn!(requested = name, served = %detail.name, "detail name differs from identifier");
            }
        }
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::client::DegradePolicy;
    use crate::http::{HttpRequest, HttpResponse};

    /// Replays one canned result and records the requested paths.
    struct CannedTransport {
        result: Mutex<Option<Result<HttpResponse, ApiError>>>,
        paths: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn new(result: Result<HttpResponse, ApiError>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                paths: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.paths.lock().unwrap().push(request.path);
            self.result
                .lock()
                .unwrap()
                .take()
                .expect("transport called more than once")
        }
    }

    fn repo(result: Result<HttpResponse, ApiError>) -> PokemonRepository<CannedTransport> {
        PokemonRepository::new(PokedexClient::new("http://test"), CannedTransport::new(result))
    }

    #[tokio::test]
    async fn fetch_all_maps_names() {
        let repo = repo(Ok(HttpResponse::new(
            200,
            r#"{"results":[{"name":"bulbasaur"},{"name":"ivysaur"}]}"#,
        )));
        let list = repo.fetch_all().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "ivysaur");
        assert_eq!(*repo.transport.paths.lock().unwrap(), ["http://test/pokemon"]);
    }

    #[tokio::test]
    async fn fetch_all_non_success_is_empty() {
        let repo = repo(Ok(HttpResponse::new(503, "")));
        assert!(repo.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_one_uses_identifier_in_path() {
        let repo = repo(Ok(HttpResponse::new(
            200,
            r#"{"name":"pikachu","height":4,"weight":60,"sprites":{"front_default":null}}"#,
        )));
        let detail = repo.fetch_one("pikachu").await.unwrap().unwrap();
        assert_eq!(detail.name, "pikachu");
        assert_eq!(*repo.transport.paths.lock().unwrap(), ["http://test/pokemon/pikachu"]);
    }

    #[tokio::test]
    async fn fetch_one_non_success_is_none() {
        let repo = repo(Ok(HttpResponse::new(404, "Not Found")));
        assert!(repo.fetch_one("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let repo = repo(Err(ApiError::Network("connection refused".to_string())));
        let err = repo.fetch_one("pikachu").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn surface_policy_propagates_status() {
        let repo = PokemonRepository::new(
            PokedexClient::new("http://test").with_policy(DegradePolicy::Surface),
            CannedTransport::new(Ok(HttpResponse::new(500, "boom"))),
        );
        let err = repo.fetch_all().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }
}
