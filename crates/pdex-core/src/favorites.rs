//! Favorites persistence: a single JSON record rewritten on every mutation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::constants::FAVORITES_FILE;
use crate::pokemon::PokemonSummary;

/// Durable, de-duplicated favorites set rooted at a data directory.
///
/// The whole set is read once at open and rewritten wholesale on every
/// mutation, so the file and the in-memory set never diverge for the
/// lifetime of the store. Insertion order is preserved for display.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    entries: Vec<PokemonSummary>,
}

impl FavoritesStore {
    /// Open the store under `dir`, loading the persisted set.
    ///
    /// A missing record yields an empty set. A record that fails to
    /// parse as a summary array is discarded: the file is removed and
    /// the set starts empty. Corruption never propagates to the caller.
    pub fn open(dir: &Path) -> Result<Self, String> {
        let path = dir.join(FAVORITES_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<Vec<PokemonSummary>>(&data) {
                Ok(entries) => entries,
                Err(_) => {
                    match fs::remove_file(&path) {
                        Ok(()) => {}
                        Err(err) if err.kind() == ErrorKind::NotFound => {}
                        Err(err) => return Err(format!("clear favorites: {err}")),
                    }
                    Vec::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(format!("read favorites: {err}")),
        };
        Ok(Self { path, entries })
    }

    /// Ordered view of the current set.
    pub fn favorites(&self) -> &[PokemonSummary] {
        &self.entries
    }

    /// Membership query, no side effect.
    pub fn is_favorite(&self, id: u32) -> bool {
        self.entries.iter().any(|p| p.id == id)
    }

    /// Insert `pokemon` unless its id is already present. Returns
    /// whether the set changed; a change is flushed before returning,
    /// and a failed flush leaves the in-memory set unchanged.
    pub fn add(&mut self, pokemon: PokemonSummary) -> Result<bool, String> {
        if self.is_favorite(pokemon.id) {
            return Ok(false);
        }
        self.entries.push(pokemon);
        if let Err(err) = self.persist() {
            self.entries.pop();
            return Err(err);
        }
        Ok(true)
    }

    /// Remove the entry with `id` if present. Returns whether the set
    /// changed; removing an absent id does not touch the file.
    pub fn remove(&mut self, id: u32) -> Result<bool, String> {
        let Some(idx) = self.entries.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        let removed = self.entries.remove(idx);
        if let Err(err) = self.persist() {
            self.entries.insert(idx, removed);
            return Err(err);
        }
        Ok(true)
    }

    /// Remove `pokemon` if favorited, add it otherwise. Returns true
    /// when the pokemon is a favorite after the call.
    pub fn toggle(&mut self, pokemon: PokemonSummary) -> Result<bool, String> {
        if self.is_favorite(pokemon.id) {
            self.remove(pokemon.id)?;
            Ok(false)
        } else {
            self.add(pokemon)?;
            Ok(true)
        }
    }

    fn persist(&self) -> Result<(), String> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("create data dir: {e}"))?;
        }
        let data = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| format!("encode favorites: {e}"))?;
        fs::write(&self.path, data.as_bytes()).map_err(|e| format!("write favorites: {e}"))
    }
}
