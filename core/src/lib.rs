//! Remote-resource core for a creature catalog browser.
//!
//! # Overview
//! Fetches the creature list and per-creature details from a REST catalog
//! and projects each fetch into a Loading / Ready / Error state that a
//! presentation layer renders.
//!
//! # Design
//! - `PokedexClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`, and a `Transport` does the I/O in
//!   between. Non-2xx responses degrade to empty results by default.
//! - `PokemonRepository` composes the two behind the `PokemonSource` trait.
//! - `ResourceState` owns one published state, runs fetches off the
//!   caller's thread, and enforces last-request-wins.
//! - `ListOrchestrator` / `DetailOrchestrator` are the two triggers the
//!   screens call; `Pokedex` wires both from a `Config`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod present;
pub mod repository;
pub mod state;
pub mod transport;
pub mod types;

pub use client::{DegradePolicy, PokedexClient};
pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use orchestrator::{DetailOrchestrator, ListOrchestrator, Pokedex};
pub use repository::{PokemonRepository, PokemonSource};
pub use state::{ErrorInfo, ResourceState, Subscription, UiState};
pub use transport::{Transport, UreqTransport};
pub use types::{PokemonDetail, PokemonSummary};
