// sign-validate: Validate a specification file.
//
// Loads a specification JSON file, builds it, and prints a summary or the
// validation error. Exits 1 if the specification is invalid.
//
// Usage:
//   sign-validate SPEC_PATH
//
// Options:
//   -h, --help   Print help

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if signtext_cli::wants_help(&args) || args.is_empty() {
        println!("sign-validate: Validate a specification file.");
        println!();
        println!("Usage: sign-validate SPEC_PATH");
        println!();
        println!("Builds the specification and prints a summary, or the");
        println!("validation error. Exits 1 if the specification is invalid.");
        if args.is_empty() {
            std::process::exit(1);
        }
        return;
    }

    let path = &args[0];
    let graph = signtext_cli::load_spec_file(path).unwrap_or_else(|e| signtext_cli::fatal(&e));

    println!(
        "{path}: ok ({} states, {} transitions, {} terminal, start {})",
        graph.state_count(),
        graph.transition_count(),
        graph.terminal_count(),
        graph.state_name(graph.start_state()).unwrap_or("?"),
    );
}
