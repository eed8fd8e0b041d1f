//! Text helpers for whatever renders the published states.
//!
//! The renderer never inspects an error's cause; every `Error` state maps to
//! the same message.

use crate::state::UiState;
use crate::types::{PokemonDetail, PokemonSummary};

pub const GENERIC_ERROR_MESSAGE: &str = "Error loading list. Please try again later.";

/// Skeleton rows shown while the list is loading.
pub const LIST_PLACEHOLDER_ROWS: usize = 20;

/// Catalog names are lowercase; show them with a leading capital.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn detail_lines(detail: &PokemonDetail) -> Vec<String> {
    vec![
        display_name(&detail.name),
        format!("Height: {} decimeters", detail.height),
        format!("Weight: {} hectograms", detail.weight),
    ]
}

/// Rows for the list screen. `None` state renders nothing.
pub fn list_rows(state: Option<&UiState<Vec<PokemonSummary>>>) -> Vec<String> {
    match state {
        None => Vec::new(),
        Some(UiState::Loading) => vec![String::new(); LIST_PLACEHOLDER_ROWS],
        Some(UiState::Ready(list)) => list.iter().map(|p| display_name(&p.name)).collect(),
        Some(UiState::Error(_)) => vec![GENERIC_ERROR_MESSAGE.to_string()],
    }
}

/// Lines for the detail screen. A `Ready(None)` renders nothing.
pub fn detail_view(state: Option<&UiState<Option<PokemonDetail>>>) -> Vec<String> {
    match state {
        None | Some(UiState::Ready(None)) => Vec::new(),
        Some(UiState::Loading) => vec!["is Loading".to_string()],
        Some(UiState::Ready(Some(detail))) => detail_lines(detail),
        Some(UiState::Error(_)) => vec![GENERIC_ERROR_MESSAGE.to_string()],
    }
}
