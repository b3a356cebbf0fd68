//! pdex show command: the per-pokemon detail view.

use pdex_core::format::{capitalize, format_id};
use pdex_core::pokemon::PokemonDetails;

use crate::{CommandOutput, DexBackend};

const STAT_BAR_WIDTH: usize = 20;
const STAT_BAR_MAX: u32 = 255;

/// Run the show command from test arguments.
pub fn run_show_for_test(args: &[&str], backend: &dyn DexBackend) -> CommandOutput {
    let owned: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
    run_show(&owned, backend)
}

fn run_show(args: &[String], backend: &dyn DexBackend) -> CommandOutput {
    match execute_show(args, backend) {
        Ok(output) => output,
        Err((exit_code, message)) => CommandOutput {
            stdout: String::new(),
            stderr: format!("{message}\n"),
            exit_code,
        },
    }
}

#[derive(Debug)]
struct ParsedShowArgs {
    id: u32,
    json: bool,
}

fn parse_show_args(args: &[String]) -> Result<ParsedShowArgs, (i32, String)> {
    let mut id: Option<u32> = None;
    let mut json = false;

    for token in args {
        match token.as_str() {
            "-h" | "--help" | "help" => return Err((0, HELP_TEXT_SHOW.to_string())),
            "--json" => json = true,
            flag if flag.starts_with('-') => {
                return Err((2, format!("unknown flag: {flag}")));
            }
            positional => {
                if id.is_some() {
                    return Err((2, "show takes exactly one id argument".to_string()));
                }
                id = Some(parse_pokemon_id(positional)?);
            }
        }
    }

    let Some(id) = id else {
        return Err((2, "show requires a pokemon id".to_string()));
    };
    Ok(ParsedShowArgs { id, json })
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

fn execute_show(
    args: &[String],
    backend: &dyn DexBackend,
) -> Result<CommandOutput, (i32, String)> {
    let parsed = parse_show_args(args)?;

    let details = backend.get_details(parsed.id).map_err(|e| {
        (
            1,
            format!("could not load pokemon {}: {e}", format_id(parsed.id)),
        )
    })?;

    let stdout = if parsed.json {
        let mut encoded = serde_json::to_string_pretty(&details)
            .map_err(|e| (1, format!("encode details: {e}")))?;
        encoded.push('\n');
        encoded
    } else {
        render_details(&details)
    };

    Ok(CommandOutput {
        stdout,
        stderr: String::new(),
        exit_code: 0,
    })
}

fn render_details(details: &PokemonDetails) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        format_id(details.id),
        capitalize(&details.name)
    ));

    let base_xp = details
        .base_experience
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "Height: {}  Weight: {}  Base XP: {}\n",
        details.height, details.weight, base_xp
    ));

    let types: Vec<&str> = details.types.iter().map(|t| t.kind.name.as_str()).collect();
    out.push_str(&format!("Types: {}\n", types.join(", ")));

    out.push_str("Stats:\n");
    for entry in &details.stats {
        out.push_str(&format!(
            "  {:<16} {:>3}  {}\n",
            entry.stat.name,
            entry.base_stat,
            stat_bar(entry.base_stat)
        ));
    }
    out
}

/// Proportional 0-255 bar, always at least one cell for a nonzero stat.
fn stat_bar(base: u32) -> String {
    let clamped = base.min(STAT_BAR_MAX) as usize;
    let filled = (clamped * STAT_BAR_WIDTH).div_ceil(STAT_BAR_MAX as usize);
    "#".repeat(filled)
}

const HELP_TEXT_SHOW: &str = "\
Show one pokemon's details

Usage:
  pdex show <id> [flags]

Arguments:
  id  Catalog id (positive integer)

Flags:
      --json    Output the raw detail record as JSON
  -h, --help    Help for show";

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::tests_common::MockDexBackend;

    #[test]
    fn renders_detail_screen() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_show_for_test(&["1"], &backend);
        assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
        assert!(out.stdout.starts_with("#001 Bulbasaur\n"), "got: {}", out.stdout);
        assert!(out.stdout.contains("Height: 7  Weight: 69  Base XP: 64"));
        assert!(out.stdout.contains("Types: grass"));
        assert!(out.stdout.contains("hp"));
        assert!(out.stdout.contains('#'));
    }

    #[test]
    fn missing_id_is_a_usage_error() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_show_for_test(&[], &backend);
        assert_eq!(out.exit_code, 2);
        assert!(out.stderr.contains("show requires a pokemon id"));
    }

    #[test]
    fn malformed_id_is_a_local_usage_error() {
        let backend = MockDexBackend::with_kanto_starters();
        for raw in &["abc", "0", "-5", "1.5"] {
            let out = run_show_for_test(&[raw], &backend);
            assert_eq!(out.exit_code, 2, "raw={raw}: {}", out.stderr);
            assert!(out.stderr.contains("invalid pokemon id"), "raw={raw}");
        }
    }

    #[test]
    fn unknown_id_reports_not_found_exit_1() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_show_for_test(&["999"], &backend);
        assert_eq!(out.exit_code, 1);
        assert!(
            out.stderr.contains("could not load pokemon #999"),
            "got: {}",
            out.stderr
        );
        assert!(out.stderr.contains("not found"));
    }

    #[test]
    fn json_outputs_the_detail_record() {
        let backend = MockDexBackend::with_kanto_starters();
        let out = run_show_for_test(&["25", "--json"], &backend);
        assert_eq!(out.exit_code, 0);
        let parsed: serde_json::Value = serde_json::from_str(&out.stdout).unwrap();
        assert_eq!(parsed["id"], 25);
        assert_eq!(parsed["name"], "pikachu");
    }

    #[test]
    fn stat_bar_is_proportional() {
        assert_eq!(stat_bar(0), "");
        assert_eq!(stat_bar(255), "#".repeat(20));
        assert_eq!(stat_bar(1), "#");
        assert!(stat_bar(128).len() > stat_bar(40).len());
        assert_eq!(stat_bar(1000), "#".repeat(20));
    }
}
