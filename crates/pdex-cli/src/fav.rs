//! pdex fav command: the favorites view and its mutations.

use pdex_core::favorites::FavoritesStore;
use pdex_core::format::{capitalize, format_id};
use pdex_core::pokemon::PokemonSummary;

use crate::table::render_catalog;
use crate::{CommandOutput, DexBackend};

/// Run the fav command from test arguments.
pub fn run_fav_for_test(args: &[&str], backend: &dyn DexBackend) -> CommandOutput {
    let owned: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
    run_fav(&owned, backend)
}

fn run_fav(args: &[String], backend: &dyn DexBackend) -> CommandOutput {
    match execute_fav(args, backend) {
        Ok(output) => output,
        Err((exit_code, message)) => CommandOutput {
            stdout: String::new(),
            stderr: format!("{message}\n"),
            exit_code,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FavAction {
    List,
    Add(u32),
    Remove(u32),
    Toggle(u32),
}

#[derive(Debug)]
struct ParsedFavArgs {
    action: FavAction,
    json: bool,
}

fn parse_fav_args(args: &[String]) -> Result<ParsedFavArgs, (i32, String)> {
    let mut json = false;
    let mut verb: Option<String> = None;
    let mut id_raw: Option<String> = None;

    for token in args {
        match token.as_str() {
            "-h" | "--help" | "help" => return Err((0, HELP_TEXT_FAV.to_string())),
            "--json" => json = true,
            flag if flag.starts_with('-') => {
                return Err((2, format!("unknown flag: {flag}")));
            }
            positional => {
                if verb.is_none() {
                    verb = Some(positional.to_string());
                } else if id_raw.is_none() {
                    id_raw = Some(positional.to_string());
                } else {
                    return Err((2, "fav takes at most two arguments".to_string()));
                }
            }
        }
    }

    let action = match verb.as_deref() {
        None | Some("list") => {
            if id_raw.is_some() {
                return Err((2, "fav list takes no arguments".to_string()));
            }
            FavAction::List
        }
        Some(mutation @ ("add" | "remove" | "toggle")) => {
            let raw = id_raw
                .ok_or_else(|| (2, format!("fav {mutation} requires a pokemon id")))?;
            let id = parse_pokemon_id(&raw)?;
            match mutation {
                "add" => FavAction::Add(id),
                "remove" => FavAction::Remove(id),
                _ => FavAction::Toggle(id),
            }
        }
        Some(other) => {
            return Err((2, format!("unknown fav subcommand \"{other}\"")));
        }
    };

    Ok(ParsedFavArgs { action, json })
}

/// The id must be a positive integer before any fetch is attempted;
/// anything else is a local usage error.
fn parse_pokemon_id(raw: &str) -> Result<u32, (i32, String)> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            (
                2,
                format!("invalid pokemon id \"{raw}\": expected a positive integer"),
            )
        })
}

fn execute_fav(args: &[String], backend: &dyn DexBackend) -> Result<CommandOutput, (i32, String)> {
    let parsed = parse_fav_args(args)?;

    let mut store = backend
        .open_favorites()
        .map_err(|e| (1, format!("favorites: {e}")))?;

    let message = match parsed.action {
        FavAction::List => {
            return render_fav_list(&store, parsed.json);
        }
        FavAction::Add(id) => {
            if store.is_favorite(id) {
                format!("{} is already a favorite", format_id(id))
            } else {
                let summary = resolve_summary(backend, &store, id)?;
                let name = capitalize(&summary.name);
                store.add(summary).map_err(|e| (1, e))?;
                format!("added {name} ({}) to favorites", format_id(id))
            }
        }
        FavAction::Remove(id) => {
            let removed = store.remove(id).map_err(|e| (1, e))?;
            if removed {
                format!("removed {} from favorites", format_id(id))
            } else {
                format!("{} is not a favorite", format_id(id))
            }
        }
        FavAction::Toggle(id) => {
            let summary = resolve_summary(backend, &store, id)?;
            let name = capitalize(&summary.name);
            let now_favorite = store.toggle(summary).map_err(|e| (1, e))?;
            if now_favorite {
                format!("added {name} ({}) to favorites", format_id(id))
            } else {
                format!("removed {} from favorites", format_id(id))
            }
        }
    };

    let stdout = if parsed.json {
        let mut out = String::new();
        for entry in store.favorites() {
            let encoded =
                serde_json::to_string(entry).map_err(|e| (1, format!("encode entry: {e}")))?;
            out.push_str(&encoded);
            out.push('\n');
        }
        out
    } else {
        format!("{message}\n")
    };

    Ok(CommandOutput {
        stdout,
        stderr: String::new(),
        exit_code: 0,
    })
}

/// Use the stored summary when the id is already favorited; otherwise
/// resolve name and artwork through the detail endpoint.
fn resolve_summary(
    backend: &dyn DexBackend,
    store: &FavoritesStore,
    id: u32,
) -> Result<PokemonSummary, (i32, String)> {
    if let Some(stored) = store.favorites().iter().find(|p| p.id == id) {
        return Ok(stored.clone());
    }
    let details = backend
        .get_details(id)
        .map_err(|e| (1, format!("could not load pokemon {}: {e}", format_id(id))))?;
    Ok(PokemonSummary {
        id: details.id,
        name: details.name,
        image_url: pdex_api::image_url(details.id),
    })
}

fn render_fav_list(
    store: &FavoritesStore,
    json: bool,
) -> Result<CommandOutput, (i32, String)> {
    let stdout = if json {
        let mut out = String::new();
        for entry in store.favorites() {
            let encoded =
                serde_json::to_string(entry).map_err(|e| (1, format!("encode entry: {e}")))?;
            out.push_str(&encoded);
            out.push('\n');
        }
        out
    } else if store.favorites().is_empty() {
        "No favorites yet. Use \"pdex fav add <id>\" to keep one.\n".to_string()
    } else {
        render_catalog(store.favorites(), None).map_err(|e| (1, format!("output: {e}")))?
    };

    Ok(CommandOutput {
        stdout,
        stderr: String::new(),
        exit_code: 0,
    })
}

const HELP_TEXT_FAV: &str = "\
Show or change the favorites set

Usage:
  pdex fav [list]          List favorites in insertion order
  pdex fav add <id>        Add a pokemon to the favorites
  pdex fav remove <id>     Remove a pokemon from the favorites
  pdex fav toggle <id>     Add or remove, depending on membership

Flags:
      --json    Output the resulting set as JSON lines
  -h, --help    Help for fav";
