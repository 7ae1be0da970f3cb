// sign-translate: Translate gesture tokens from stdin into words.
//
// Reads gesture tokens from stdin (one per line) and prints each word the
// moment its sequence completes. With --sentence, words are buffered and
// printed as a single line at end of input instead.
//
// Usage:
//   sign-translate [-s SPEC_PATH] [OPTIONS]
//
// Options:
//   -s, --spec PATH   Specification JSON file (default: built-in lexicon,
//                     or the file named by SIGNTEXT_SPEC)
//   --sentence         Print one joined sentence at end of input
//   -h, --help         Print help

use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (spec_path, args) = signtext_cli::parse_spec_path(&args);

    if signtext_cli::wants_help(&args) {
        println!("sign-translate: Translate gesture tokens from stdin into words.");
        println!();
        println!("Usage: sign-translate [-s SPEC_PATH] [OPTIONS]");
        println!();
        println!("Reads gesture tokens from stdin (one per line) and prints each");
        println!("word as its sequence completes.");
        println!();
        println!("Options:");
        println!("  -s, --spec PATH   Specification JSON file (default: built-in");
        println!("                    lexicon, or the file named by SIGNTEXT_SPEC)");
        println!("  --sentence         Print one joined sentence at end of input");
        println!("  -h, --help         Print this help");
        return;
    }

    let sentence_mode = args.iter().any(|a| a == "--sentence");

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

        let result = graph.feed(&mut session, token);
        if !sentence_mode {
            if let Some(word) = &result.word {
                let _ = writeln!(out, "{word}");
            }
        }
    }

    if sentence_mode {
        let _ = writeln!(out, "{}", session.drain().join(" "));
    }
}
