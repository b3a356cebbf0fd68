//! pdex-cli: command-line interface surface for pdex.

use std::sync::OnceLock;

use pdex_api::{ApiError, Client};
use pdex_core::favorites::FavoritesStore;
use pdex_core::pokemon::{PokemonDetails, PokemonSummary};

static VERSION: OnceLock<String> = OnceLock::new();

/// Set the version string for `--version` output.
pub fn set_version(version: &str) {
    let _ = VERSION.set(version.to_string());
}

fn get_version() -> &'static str {
    VERSION.get().map(|s| s.as_str()).unwrap_or("dev")
}

fn help_text() -> String {
    "\
pdex browses the pokemon catalog from the terminal.

Usage:
  pdex [command]

Available Commands:
  fav         Show or change the favorites set
  help        Help about any command
  list        Browse the catalog, with an optional search query
  search      Exact lookup by name or id
  show        Show one pokemon's details

Flags:
  -h, --help      help for pdex
  -v, --version   version for pdex

Use \"pdex [command] --help\" for more information about a command.\n"
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Everything a command needs from the outside world, so commands can
/// run against a mock in tests.
pub trait DexBackend {
    fn list_pokemon(&self, limit: u32) -> Result<Vec<PokemonSummary>, ApiError>;
    fn get_details(&self, id: u32) -> Result<PokemonDetails, ApiError>;
    fn find_pokemon(&self, query: &str) -> Result<Option<PokemonSummary>, ApiError>;
    /// Open the favorites store under the user's data directory.
    fn open_favorites(&self) -> Result<FavoritesStore, String>;
}

pub struct HttpDexBackend;

fn block_on<F: std::future::Future<Output = T>, T>(future: F) -> T {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| panic!("failed to create tokio runtime: {err}"));
    runtime.block_on(future)
}

impl DexBackend for HttpDexBackend {
    fn list_pokemon(&self, limit: u32) -> Result<Vec<PokemonSummary>, ApiError> {
        let client = Client::new()?;
        block_on(client.list_pokemon(limit))
    }

    fn get_details(&self, id: u32) -> Result<PokemonDetails, ApiError> {
        let client = Client::new()?;
        block_on(client.get_details(id))
    }

    fn find_pokemon(&self, query: &str) -> Result<Option<PokemonSummary>, ApiError> {
        let client = Client::new()?;
        block_on(client.find_pokemon(query))
    }

    fn open_favorites(&self) -> Result<FavoritesStore, String> {
        let dir = pdex_core::paths::data_dir()?;
        FavoritesStore::open(&dir)
    }
}

pub mod fav;
pub mod list;
pub mod search;
pub mod show;
mod table;

#[cfg(test)]
pub(crate) mod tests_common;

pub fn run_cli_for_test(args: &[&str], backend: &dyn DexBackend) -> CommandOutput {
    let mut out = CommandOutput {
        stdout: String::new(),
        stderr: String::new(),
        exit_code: 0,
    };

    let Some((cmd, rest)) = args.split_first() else {
        out.stdout = help_text();
        return out;
    };

    match *cmd {
        "--help" | "-h" | "help" => {
            out.stdout = help_text();
            out
        }
        "--version" | "-v" => {
            out.stdout = format!("pdex version {}\n", get_version());
            out
        }
        "fav" | "favorites" => fav::run_fav_for_test(rest, backend),
        "list" => list::run_list_for_test(rest, backend),
        "search" => search::run_search_for_test(rest, backend),
        "show" => show::run_show_for_test(rest, backend),
        _ => {
            out.stderr = format!("Error: unknown command \"{cmd}\" for \"pdex\"\n");
            out.exit_code = 1;
            out
        }
    }
}

pub fn run_cli(args: &[String], backend: &dyn DexBackend) -> CommandOutput {
    let refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    run_cli_for_test(&refs, backend)
}
