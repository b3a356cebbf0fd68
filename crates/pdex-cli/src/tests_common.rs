//! Shared mock backend for CLI unit tests.

use std::collections::HashMap;

use pdex_api::{image_url, ApiError};
use pdex_core::favorites::FavoritesStore;
use pdex_core::pokemon::{NamedResource, PokemonDetails, PokemonSummary, StatEntry, TypeSlot};

use crate::DexBackend;

pub struct MockDexBackend {
    pub pokemon: Vec<PokemonSummary>,
    pub details: HashMap<u32, PokemonDetails>,
    pub list_error: Option<String>,
    favorites_dir: tempfile::TempDir,
}

impl MockDexBackend {
    pub fn new() -> Self {
        Self {
            pokemon: Vec::new(),
            details: HashMap::new(),
            list_error: None,
            favorites_dir: tempfile::tempdir()
                .unwrap_or_else(|err| panic!("create favorites tempdir: {err}")),
        }
    }

    /// A small catalog with matching detail records.
    pub fn with_kanto_starters() -> Self {
        let mut mock = Self::new();
        for (id, name) in [
            (1, "bulbasaur"),
            (4, "charmander"),
            (7, "squirtle"),
            (25, "pikachu"),
        ] {
            mock.pokemon.push(summary(id, name));
            mock.details.insert(id, details(id, name));
        }
        mock
    }

    /// Fresh handle on the same store the commands will open.
    pub fn favorites(&self) -> FavoritesStore {
        FavoritesStore::open(self.favorites_dir.path())
            .unwrap_or_else(|err| panic!("open favorites: {err}"))
    }
}

pub fn summary(id: u32, name: &str) -> PokemonSummary {
    PokemonSummary {
        id,
        name: name.to_string(),
        image_url: image_url(id),
    }
}

pub fn details(id: u32, name: &str) -> PokemonDetails {
    PokemonDetails {
        id,
        name: name.to_string(),
        height: 7,
        weight: 69,
        base_experience: Some(64),
        types: vec![TypeSlot {
            slot: 1,
            kind: NamedResource {
                name: "grass".to_string(),
            },
        }],
        stats: vec![
            StatEntry {
                base_stat: 45,
                stat: NamedResource {
                    name: "hp".to_string(),
                },
            },
            StatEntry {
                base_stat: 49,
                stat: NamedResource {
                    name: "attack".to_string(),
                },
            },
        ],
    }
}

impl DexBackend for MockDexBackend {
    fn list_pokemon(&self, limit: u32) -> Result<Vec<PokemonSummary>, ApiError> {
        if let Some(message) = &self.list_error {
            return Err(ApiError::Network(message.clone()));
        }
        Ok(self.pokemon.iter().take(limit as usize).cloned().collect())
    }

    fn get_details(&self, id: u32) -> Result<PokemonDetails, ApiError> {
        self.details.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    fn find_pokemon(&self, query: &str) -> Result<Option<PokemonSummary>, ApiError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        Ok(self
            .pokemon
            .iter()
            .find(|p| p.name == needle || p.id.to_string() == needle)
            .cloned())
    }

    fn open_favorites(&self) -> Result<FavoritesStore, String> {
        FavoritesStore::open(self.favorites_dir.path())
    }
}
