//! In-memory search over the catalog list.

use crate::pokemon::PokemonSummary;

/// Filter `list` by a free-text query, matched case-insensitively as a
/// substring of the name or of the decimal id. A blank query returns
/// the list unchanged; input order is always preserved.
pub fn filter_pokemon(list: &[PokemonSummary], query: &str) -> Vec<PokemonSummary> {
    if query.trim().is_empty() {
        return list.to_vec();
    }
    let needle = query.to_lowercase();
    list.iter()
        .filter(|p| p.name.to_lowercase().contains(&needle) || p.id.to_string().contains(&needle))
        .cloned()
        .collect()
}
