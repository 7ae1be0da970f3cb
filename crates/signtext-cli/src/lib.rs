// signtext-cli: shared utilities for CLI tools.

use std::process;

use signtext_fst::{GraphSpec, StateGraph};

/// Environment variable naming a specification file to load instead of the
/// built-in lexicon.
const SPEC_ENV: &str = "SIGNTEXT_SPEC";

/// Load the automaton the tools run against.
///
/// Search order:
/// 1. `spec_path` argument (if provided)
/// 2. `SIGNTEXT_SPEC` environment variable
/// 3. The built-in sign lexicon
pub fn load_graph(spec_path: Option<&str>) -> Result<StateGraph, String> {
    let path = match spec_path {
        Some(p) => Some(p.to_string()),
        None => std::env::var(SPEC_ENV).ok(),
    };

    match path {
        Some(path) => load_spec_file(&path),
        None => Ok(signtext_asl::graph()),
    }
}

/// Load and build a specification file.
pub fn load_spec_file(path: &str) -> Result<StateGraph, String> {
    let json =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))?;
    let spec = GraphSpec::from_json(&json).map_err(|e| format!("{path}: {e}"))?;
    StateGraph::build(spec).map_err(|e| format!("{path}: {e}"))
}

/// Parse a `--spec=PATH`, `--spec PATH` or `-s PATH` argument from command
/// line args.
///
/// Returns `(spec_path, remaining_args)`.
pub fn parse_spec_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut spec_path = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--spec=") {
            spec_path = Some(val.to_string());
        } else if arg == "--spec" || arg == "-s" {
            if i + 1 < args.len() {
                spec_path = Some(args[i + 1].clone());
                skip_next = true;
            } else {
                eprintln!("error: {} requires a value", arg);
                process::exit(1);
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (spec_path, remaining)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
