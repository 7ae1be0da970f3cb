// Quick demo: build a two-word automaton inline and trace a token stream
// through it, including a mismatch recovery in the middle.

use signtext_fst::{GraphSpec, StateGraph};

fn main() {
    let mut spec = GraphSpec::new("idle");
    spec.push_final("done");
    spec.push_edge("idle", "h_2", "h1", "");
    spec.push_edge("h1", "h_1", "done", "h");
    spec.push_edge("idle", "hello_2", "he1", "");
    spec.push_edge("he1", "hello_1", "done", "hello");

    let graph = StateGraph::build(spec).expect("inline spec is valid");
    println!("{graph:?}");

    let stream = ["h_2", "h_1", "h_2", "hello_2", "hello_1", "junk"];

    let mut session = graph.new_session();
    for token in stream {
        let before = graph.state_name(session.current_state()).unwrap_or("?");
        let result = graph.feed(&mut session, token);
        let after = graph.state_name(result.state).unwrap_or("?");

        print!("{before:5} --{token:8}--> {after:5}");
        if let Some(word) = &result.word {
            print!("  emits {word:?}");
        }
        if result.completed {
            print!("  (complete, reset)");
        }
        if !result.matched {
            print!("  (no match)");
        }
        println!();
    }

    println!("emitted: {:?}", session.drain());
}
