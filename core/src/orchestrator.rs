//! List and detail orchestrators: the two triggers the presentation layer
//! calls, each driving its own `ResourceState`.
//!
//! `Pokedex` wires both to one shared repository. Construct it once and
//! hand the orchestrators to the screens by reference; there is no global
//! registry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::PokedexClient;
use crate::config::Config;
use crate::repository::{PokemonRepository, PokemonSource};
use crate::state::ResourceState;
use crate::transport::UreqTransport;
use crate::types::{PokemonDetail, PokemonSummary};

const LIST_KEY: &str = "pokemon-list";

/// Drives the list screen. The list is fetched once per instance.
pub struct ListOrchestrator {
    source: Arc<dyn PokemonSource>,
    state: ResourceState<Vec<PokemonSummary>>,
    triggered: AtomicBool,
}

impl ListOrchestrator {
    pub fn new(source: Arc<dyn PokemonSource>, runtime: Handle) -> Self {
        Self {
            source,
            state: ResourceState::new(runtime),
            triggered: AtomicBool::new(false),
        }
    }

    /// Start the list fetch on first mount. Later calls are no-ops and
    /// return `None`.
    pub fn load_list(&self) -> Option<JoinHandle<()>> {
        if self.triggered.swap(true, Ordering::SeqCst) {
            debug!("list already loaded; ignoring trigger");
            return None;
        }
        let source = Arc::clone(&self.source);
        Some(
            self.state
                .start(Some(LIST_KEY.to_string()), move || async move { source.fetch_all().await }),
        )
    }

    pub fn state(&self) -> &ResourceState<Vec<PokemonSummary>> {
        &self.state
    }
}

/// Drives the detail screen, keyed by creature name.
pub struct DetailOrchestrator {
    source: Arc<dyn PokemonSource>,
    state: ResourceState<Option<PokemonDetail>>,
}

impl DetailOrchestrator {
    pub fn new(source: Arc<dyn PokemonSource>, runtime: Handle) -> Self {
        Self {
            source,
            state: ResourceState::new(runtime),
        }
    }

    /// Fetch `name`, superseding any fetch for another name. Returns `None`
    /// when a fetch for the same name is already in flight.
    pub fn load_detail(&self, name: &str) -> Option<JoinHandle<()>> {
        if self.state.in_flight_key().as_deref() == Some(name) {
            debug!(name, "detail fetch already in flight");
            return None;
        }
        let source = Arc::clone(&self.source);
        let requested = name.to_string();
        Some(self.state.start(Some(name.to_string()), move || async move {
            source.fetch_one(&requested).await
        }))
    }

    /// Detail screen unmounted: drop the record and abandon any fetch.
    pub fn clear(&self) {
        self.state.clear();
    }

    pub fn state(&self) -> &ResourceState<Option<PokemonDetail>> {
        &self.state
    }
}

/// Both orchestrators over one repository and transport.
pub struct Pokedex {
    pub list: ListOrchestrator,
    pub detail: DetailOrchestrator,
}

impl Pokedex {
    pub fn new(source: Arc<dyn PokemonSource>, runtime: Handle) -> Self {
        Self {
            list: ListOrchestrator::new(Arc::clone(&source), runtime.clone()),
            detail: DetailOrchestrator::new(source, runtime),
        }
    }

    pub fn from_config(config: &Config, runtime: Handle) -> Self {
        let client = PokedexClient::new(&config.base_url).with_policy(config.degrade_policy);
        let transport = UreqTransport::new(config.timeout);
        Self::new(Arc::new(PokemonRepository::new(client, transport)), runtime)
    }
}
