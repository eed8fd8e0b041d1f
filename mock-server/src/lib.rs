use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub sprites: Sprites,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Catalog contents plus switches that make the server misbehave.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub pokemon: Vec<Pokemon>,
    /// Answer every request with this status and an empty body.
    pub fail_status: Option<u16>,
    /// Answer 200 with a body that is not the expected JSON.
    pub malformed: bool,
    /// Hold the detail response for this long, per name.
    pub delays: HashMap<String, Duration>,
}

impl Catalog {
    pub fn seeded() -> Self {
        let entry = |name: &str, id: u32, height: u32, weight: u32| Pokemon {
            name: name.to_string(),
            height,
            weight,
            sprites: Sprites {
                front_default: Some(format!(
                    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png"
                )),
            },
        };
        Self {
            pokemon: vec![
                entry("bulbasaur", 1, 7, 69),
                entry("ivysaur", 2, 10, 130),
                entry("venusaur", 3, 20, 1000),
                entry("charmander", 4, 6, 85),
                entry("pikachu", 25, 4, 60),
            ],
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::seeded()
        }
    }

    pub fn malformed() -> Self {
        Self {
            malformed: true,
            ..Self::seeded()
        }
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    /// Short-circuit response for the failure switches, if any is set.
    fn forced_response(&self) -> Option<Response> {
        if let Some(status) = self.fail_status {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return Some(status.into_response());
        }
        if self.malformed {
            return Some(
                ([(header::CONTENT_TYPE, "application/json")], "{\"results\":").into_response(),
            );
        }
        None
    }
}

pub type Db = Arc<Catalog>;

pub fn app() -> Router {
    app_with(Catalog::seeded())
}

pub fn app_with(catalog: Catalog) -> Router {
    Router::new()
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/{name}", get(get_pokemon))
        .with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Catalog::seeded()).await
}

pub async fn run_with(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

async fn list_pokemon(State(db): State<Db>) -> Response {
    if let Some(forced) = db.forced_response() {
        return forced;
    }
    info!(count = db.pokemon.len(), "list");
    let results = db
        .pokemon
        .iter()
        .map(|p| NamedResource {
            name: p.name.clone(),
            url: format!("/pokemon/{}/", p.name),
        })
        .collect();
    Json(Page {
        count: db.pokemon.len(),
        next: None,
        previous: None,
        results,
    })
    .into_response()
}

async fn get_pokemon(State(db): State<Db>, Path(name): Path<String>) -> Response {
    if let Some(delay) = db.delays.get(&name) {
        tokio::time::sleep(*delay).await;
    }
    if let Some(forced) = db.forced_response() {
        return forced;
    }
    info!(%name, "detail");
    match db.pokemon.iter().find(|p| p.name == name) {
        Some(pokemon) => Json(pokemon.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
