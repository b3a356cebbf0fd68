//! Tabular rendering for catalog rows.

use std::io::Write;

use tabwriter::TabWriter;

use pdex_core::favorites::FavoritesStore;
use pdex_core::format::{capitalize, format_id};
use pdex_core::pokemon::PokemonSummary;

/// Render summaries as an aligned table. With `favorites` the table
/// carries a FAV marker column; without (the favorites view itself)
/// the column is omitted.
pub(crate) fn render_catalog(
    rows: &[PokemonSummary],
    favorites: Option<&FavoritesStore>,
) -> Result<String, String> {
    let mut tw = TabWriter::new(Vec::new()).padding(2);
    match favorites {
        Some(_) => writeln!(tw, "ID\tNAME\tFAV"),
        None => writeln!(tw, "ID\tNAME"),
    }
    .map_err(|err| err.to_string())?;

    for row in rows {
        match favorites {
            Some(store) => {
                let marker = if store.is_favorite(row.id) { "*" } else { "" };
                writeln!(tw, "{}\t{}\t{}", format_id(row.id), capitalize(&row.name), marker)
            }
            None => writeln!(tw, "{}\t{}", format_id(row.id), capitalize(&row.name)),
        }
        .map_err(|err| err.to_string())?;
    }

    tw.flush().map_err(|err| err.to_string())?;
    let bytes = tw.into_inner().map_err(|err| err.error().to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
