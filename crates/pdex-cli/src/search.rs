//! pdex search command: exact lookup through the upstream by-name endpoint.

use pdex_core::format::{capitalize, format_id};

use crate::{CommandOutput, DexBackend};

/// Run the search command from test arguments.
pub fn run_search_for_test(args: &[&str], backend: &dyn DexBackend) -> CommandOutput {
    let owned: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
    run_search(&owned, backend)
}

fn run_search(args: &[String], backend: &dyn DexBackend) -> CommandOutput {
    match execute_search(args, backend) {
        Ok(output) => output,
        Err((exit_code, message)) => CommandOutput {
            stdout: String::new(),
            stderr: format!("{message}\n"),
            exit_code,
        },
    }
}

#[derive(Debug)]
struct ParsedSearchArgs {
    query: String,
    json: bool,
}

fn parse_search_args(args: &[String]) -> Result<ParsedSearchArgs, (i32, String)> {
    let mut query: Option<String> = None;
    let mut json = false;

    for token in args {
        match token.as_str() {
            "-h" | "--help" | "help" => return Err((0, HELP_TEXT_SEARCH.to_string())),
            "--json" => json = true,
            flag if flag.starts_with('-') => {
                return Err((2, format!("unknown flag: {flag}")));
            }
            positional => {
                if query.is_some() {
                    return Err((2, "search takes exactly one query argument".to_string()));
                }
                query = Some(positional.to_string());
            }
        }
    }

    let Some(query) = query else {
        return Err((2, "search requires a name or id".to_string()));
    };
    Ok(ParsedSearchArgs { query, json })
}

fn execute_search(
    args: &[String],
    backend: &dyn DexBackend,
) -> Result<CommandOutput, (i32, String)> {
    let parsed = parse_search_args(args)?;

    let found = backend
        .find_pokemon(&parsed.query)
        .map_err(|e| (1, format!("could not search for \"{}\": {e}", parsed.query)))?;

    let Some(pokemon) = found else {
        return Err((1, format!("no pokemon matched \"{}\"", parsed.query)));
    };

    let stdout = if parsed.json {
        let mut encoded =
            serde_json::to_string(&pokemon).map_err(|e| (1, format!("encode entry: {e}")))?;
        encoded.push('\n');
        encoded
    } else {
        format!(
            "{} {}\n{}\n",
            format_id(pokemon.id),
            capitalize(&pokemon.name),
            pokemon.image_url
        )
    };

    Ok(CommandOutput {
        stdout,
        stderr: String::new(),
        exit_code: 0,
    })
}

const HELP_TEXT_SEARCH: &str = "\
Exact lookup by name or id

Usage:
  pdex search <name|id> [flags]

Arguments:
  name|id  Exact pokemon name (case-insensitive) or decimal id

Flags:
      --json    Output as JSON
  -h, --help    Help for search";
