// sign-trace: Trace gesture tokens through the automaton.
//
// Reads gesture tokens from stdin (one per line) and prints the transition
// each one takes, for debugging specifications. Output format:
//   q1 --h_2--> q2
//   q2 --h_1--> q1    = "h" (complete)
//   q1 --xyz--> q1    (no match)
//
// Usage:
//   sign-trace [-s SPEC_PATH]
//
// Options:
//   -s, --spec PATH   Specification JSON file (default: built-in lexicon,
//                     or the file named by SIGNTEXT_SPEC)
//   -h, --help        Print help

use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (spec_path, args) = signtext_cli::parse_spec_path(&args);

    if signtext_cli::wants_help(&args) {
        println!("sign-trace: Trace gesture tokens through the automaton.");
        println!();
        println!("Usage: sign-trace [-s SPEC_PATH]");
        println!();
        println!("Reads gesture tokens from stdin (one per line) and prints the");
        println!("transition each one takes.");
        println!();
        println!("Options:");
        println!("  -s, --spec PATH   Specification JSON file (default: built-in");
        println!("                    lexicon, or the file named by SIGNTEXT_SPEC)");
        println!("  -h, --help        Print this help");
        return;
    }

    let graph = signtext_cli::load_graph(spec_path.as_deref())
        .unwrap_or_else(|e| signtext_cli::fatal(&e));
    let mut session = graph.new_session();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let token = line.trim();
        if token.is_empty() {
            continue;
        }

        let before = graph
            .state_name(session.current_state())
            .unwrap_or("?")
            .to_string();
        let result = graph.feed(&mut session, token);
        let after = graph.state_name(result.state).unwrap_or("?");

        let _ = write!(out, "{before} --{token}--> {after}");
        if let Some(word) = &result.word {
            let _ = write!(out, "    = {word:?}");
        }
        if result.completed {
            let _ = write!(out, " (complete)");
        } else if !result.matched {
            let _ = write!(out, "    (no match)");
        }
        let _ = writeln!(out);
    }
}
