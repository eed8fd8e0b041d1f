//! Domain types and wire DTOs for the creature catalog.
//!
//! # Design
//! The wire shapes (`PokemonPage`, `PokemonRecord`) mirror the REST payloads
//! and are decoded field-for-field; the domain types (`PokemonSummary`,
//! `PokemonDetail`) are what the state container publishes. The mock-server
//! crate defines its own copies of the wire shapes; integration tests catch
//! schema drift between the two.

use serde::{Deserialize, Serialize};

/// Identity of one entry in the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
}

/// Full record shown on the detail screen.
///
/// `height` is in decimetres and `weight` in hectograms, as served.
/// `sprite_url` is empty when the catalog has no front sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub sprite_url: String,
}

/// Envelope returned by the collection endpoint. Only the first page is
/// ever read; paging links are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonPage {
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

/// Flat record returned by the single-item endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonRecord {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl From<NamedResource> for PokemonSummary {
    fn from(resource: NamedResource) -> Self {
        Self {
            name: resource.name,
        }
    }
}

impl From<PokemonRecord> for PokemonDetail {
    fn from(record: PokemonRecord) -> Self {
        Self {
            name: record.name,
            height: record.height,
            weight: record.weight,
            sprite_url: record.sprites.front_default.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_maps_to_detail() {
        let record: PokemonRecord = serde_json::from_str(
            r#"{"name":"pikachu","height":4,"weight":60,"sprites":{"front_default":"http://x/img.png"}}"#,
        )
        .unwrap();
        assert_eq!(
            PokemonDetail::from(record),
            PokemonDetail {
                name: "pikachu".to_string(),
                height: 4,
                weight: 60,
                sprite_url: "http://x/img.png".to_string(),
            }
        );
    }

    #[test]
    fn null_sprite_becomes_empty_url() {
        let record: PokemonRecord = serde_json::from_str(
            r#"{"name":"missingno","height":10,"weight":100,"sprites":{"front_default":null}}"#,
        )
        .unwrap();
        assert_eq!(PokemonDetail::from(record).sprite_url, "");
    }

    #[test]
    fn page_ignores_paging_fields() {
        let page: PokemonPage = serde_json::from_str(
            r#"{"count":1302,"next":"http://x/?offset=20","previous":null,"results":[{"name":"bulbasaur","url":"http://x/1/"}]}"#,
        )
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].name, "bulbasaur");
    }

    #[test]
    fn record_without_sprites_is_rejected() {
        let result: Result<PokemonRecord, _> =
            serde_json::from_str(r#"{"name":"pikachu","height":4,"weight":60}"#);
        assert!(result.is_err());
    }
}
