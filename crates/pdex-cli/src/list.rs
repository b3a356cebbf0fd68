//! pdex list command: the searchable catalog view.

use pdex_api::DEFAULT_LIST_LIMIT;
use pdex_core::filter::filter_pokemon;

use crate::table::render_catalog;
use crate::{CommandOutput, DexBackend};

/// Run the list command from test arguments.
pub fn run_list_for_test(args: &[&str], backend: &dyn DexBackend) -> CommandOutput {
    let owned: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
    run_list(&owned, backend)
}

fn run_list(args: &[String], backend: &dyn DexBackend) -> CommandOutput {
    match execute_list(args, backend) {
        Ok(output) => output,
        Err((exit_code, message)) => CommandOutput {
            stdout: String::new(),
            stderr: format!("{message}\n"),
            exit_code,
        },
    }
}

#[derive(Debug)]
struct ParsedListArgs {
    query: String,
    limit: u32,
    json: bool,
}

fn parse_list_args(args: &[String]) -> Result<ParsedListArgs, (i32, String)> {
    let mut query = String::new();
    let mut query_set = false;
    let mut limit = DEFAULT_LIST_LIMIT;
    let mut json = false;

    let mut idx = 0usize;
    while idx < args.len() {
        let token = &args[idx];
        match token.as_str() {
            "-h" | "--help" | "help" => return Err((0, HELP_TEXT_LIST.to_string())),
            "--json" => json = true,
            "-n" | "--limit" => {
                idx += 1;
                let raw = take_flag_value(args, idx, "--limit")?;
                let parsed = raw
                    .parse::<u32>()
                    .map_err(|_| (2, "limit must be a positive integer".to_string()))?;
                if parsed == 0 {
                    return Err((2, "limit must be >= 1".to_string()));
                }
                limit = parsed;
            }
            flag if flag.starts_with('-') => {
                return Err((2, format!("unknown flag: {flag}")));
            }
            positional => {
                if query_set {
                    return Err((2, "list takes at most one query argument".to_string()));
                }
                query = positional.to_string();
                query_set = true;
            }
        }
        idx += 1;
    }

    Ok(ParsedListArgs { query, limit, json })
}

fn take_flag_value(args: &[String], idx: usize, flag: &str) -> Result<String, (i32, String)> {
    args.get(idx)
        .cloned()
        .ok_or_else(|| (2, format!("missing value for {flag}")))
}

fn execute_list(
    args: &[String],
    backend: &dyn DexBackend,
) -> Result<CommandOutput, (i32, String)> {
    let parsed = parse_list_args(args)?;

    let list = backend
        .list_pokemon(parsed.limit)
        .map_err(|e| (1, format!("could not load the pokemon list: {e}")))?;
    let filtered = filter_pokemon(&list, &parsed.query);
    let query = parsed.query.trim();

    if parsed.json {
        let mut out = String::new();
        for entry in &filtered {
            let encoded =
                serde_json::to_string(entry).map_err(|e| (1, format!("encode entry: {e}")))?;
            out.push_str(&encoded);
            out.push('\n');
        }
        return Ok(CommandOutput {
            stdout: out,
            stderr: String::new(),
            exit_code: 0,
        });
    }

    if filtered.is_empty() && !query.is_empty() {
        return Ok(CommandOutput {
            stdout: format!("No pokemon matched \"{query}\". Try another name or number.\n"),
            stderr: String::new(),
            exit_code: 0,
        });
    }

    let favorites = backend
        .open_favorites()
        .map_err(|e| (1, format!("favorites: {e}")))?;
    let mut out =
        render_catalog(&filtered, Some(&favorites)).map_err(|e| (1, format!("output: {e}")))?;

    out.push('\n');
    if query.is_empty() {
        out.push_str(&format!("{} pokemon\n", filtered.len()));
    } else {
        let noun = if filtered.len() == 1 { "result" } else { "results" };
        out.push_str(&format!("{} {noun} for \"{query}\"\n", filtered.len()));
    }

    Ok(CommandOutput {
        stdout: out,
        stderr: String::new(),
        exit_code: 0,
    })
}

const HELP_TEXT_LIST: &str = "\
Browse the catalog, with an optional search query

Usage:
  pdex list [query] [flags]

Arguments:
  query  Case-insensitive match against name or number (optional)

Flags:
  -n, --limit int   Max entities to fetch (default: 151)
      --json        Output as JSON lines
  -h, --help        Help for list";

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::tests_common::{summary, MockDexBackend};

    #[test]
    fn renders_table_with_count() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_list_for_test(&[], &backend);
        assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
        assert!(out.stdout.contains("ID"), "got: {}", out.stdout);
        assert!(out.stdout.contains("#001"));
        assert!(out.stdout.contains("Bulbasaur"));
        assert!(out.stdout.contains("4 pokemon"));
    }

    #[test]
    fn query_filters_and_reports_result_count() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_list_for_test(&["pika"], &backend);
        assert_eq!(out.exit_code, 0);
        assert!(out.stdout.contains("Pikachu"));
        assert!(!out.stdout.contains("Bulbasaur"));
        assert!(out.stdout.contains("1 result for \"pika\""));
    }

    #[test]
    fn query_matches_id_substring() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_list_for_test(&["2"], &backend);
        assert_eq!(out.exit_code, 0);
        assert!(out.stdout.contains("Pikachu"), "got: {}", out.stdout);
        assert!(!out.stdout.contains("Charmander"));
    }

    #[test]
    fn no_match_is_a_notice_not_an_error() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_list_for_test(&["zzz"], &backend);
        assert_eq!(out.exit_code, 0);
        assert!(out.stdout.contains("No pokemon matched \"zzz\""));
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn favorite_rows_carry_a_marker() {
        let backend = MockDexBackend::with_kanto_starters();
        let mut store = backend.favorites();
        store.add(summary(25, "pikachu")).unwrap();

        let out = run_list_for_test(&[], &backend);
        assert_eq!(out.exit_code, 0);
        let pikachu_row = out
            .stdout
            .lines()
            .find(|l| l.contains("Pikachu"))
            .unwrap();
        assert!(pikachu_row.trim_end().ends_with('*'), "row: {pikachu_row}");
        let bulbasaur_row = out
            .stdout
            .lines()
            .find(|l| l.contains("Bulbasaur"))
            .unwrap();
        assert!(!bulbasaur_row.contains('*'), "row: {bulbasaur_row}");
    }

    #[test]
    fn json_outputs_one_entry_per_line() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_list_for_test(&["--json", "pika"], &backend);
        assert_eq!(out.exit_code, 0);
        let lines: Vec<&str> = out.stdout.lines().collect();
        assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["id"], 25);
        assert_eq!(parsed["name"], "pikachu");
        assert!(parsed["imageUrl"].as_str().unwrap().ends_with("/25.png"));
    }

    #[test]
    fn limit_flag_bounds_the_fetch() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_list_for_test(&["-n", "2"], &backend);
        assert_eq!(out.exit_code, 0);
        assert!(out.stdout.contains("2 pokemon"), "got: {}", out.stdout);
    }

    #[test]
    fn bad_limit_is_a_usage_error() {
        let backend = MockDexBackend::with_kanto_starters();
        for raw in &["abc", "0", "-3"] {
            let out = run_list_for_test(&["--limit", raw], &backend);
            assert_eq!(out.exit_code, 2, "raw={raw}: {}", out.stderr);
        }
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_list_for_test(&["--bogus"], &backend);
        assert_eq!(out.exit_code, 2);
        assert!(out.stderr.contains("unknown flag: --bogus"));
    }

    #[test]
    fn fetch_failure_is_terminal_exit_1() {
        let mut backend = MockDexBackend::with_kanto_starters();
        backend.list_error = Some("connection refused".to_string());
        let out = run_list_for_test(&[], &backend);
        assert_eq!(out.exit_code, 1);
        assert!(out.stderr.contains("could not load the pokemon list"));
        assert!(out.stderr.contains("connection refused"));
    }
}
