// The built-in gesture lexicon.
//
// Two-handed signs are captured by the upstream recognizer as a short
// sequence of single-frame gesture tokens; this table maps those sequences
// to words. Several sequences share the ambiguity that one token alone says
// nothing (`sign_1` opens both nothing and "sign"), which is exactly what
// the transducer's prefix states resolve.

use signtext_fst::{GraphSpec, StateGraph};

/// The declarative specification of the built-in lexicon.
///
/// Sequences and outputs:
///
/// | tokens                              | emits      |
/// |-------------------------------------|------------|
/// | `h_2 h_1`                           | `h`        |
/// | `hello_2 hello_1`                   | `hello`    |
/// | `sign_1 sign_2 sign_1`              | `sign`     |
/// | `language_2 language_1`             | `language` |
/// | `that Woman`                        | `she`      |
/// | `that Man`                          | `he`       |
/// | `deaf_2 deaf_1`                     | `deaf`     |
/// | `hear_2 hear_1 hear_2 hear_1`       | `hear`     |
/// | `teacher_1 teacher_2 teacher_1`     | `teacher`  |
pub fn lexicon() -> GraphSpec {
    let mut spec = GraphSpec::new("q1");
    spec.push_final("q3");

    spec.push_edge("q1", "h_2", "q2", "");
    spec.push_edge("q1", "hello_2", "q4", "");
    spec.push_edge("q1", "sign_1", "q5", "");
    spec.push_edge("q1", "language_2", "q7", "");
    spec.push_edge("q1", "that", "q9", "");
    spec.push_edge("q1", "deaf_2", "q10", "");
    spec.push_edge("q1", "hear_2", "q11", "");
    spec.push_edge("q1", "teacher_1", "q14", "");

    spec.push_edge("q2", "h_1", "q3", "h");
    spec.push_edge("q4", "hello_1", "q3", "hello");

    spec.push_edge("q5", "sign_2", "q6", "");
    spec.push_edge("q6", "sign_1", "q3", "sign");

    spec.push_edge("q7", "language_1", "q3", "language");

    spec.push_edge("q9", "Woman", "q3", "she");
    spec.push_edge("q9", "Man", "q3", "he");

    spec.push_edge("q10", "deaf_1", "q3", "deaf");

    spec.push_edge("q11", "hear_1", "q12", "");
    spec.push_edge("q12", "hear_2", "q13", "");
    spec.push_edge("q13", "hear_1", "q3", "hear");

    spec.push_edge("q14", "teacher_2", "q15", "");
    spec.push_edge("q15", "teacher_1", "q3", "teacher");

    spec
}

/// Build the built-in lexicon into a ready-to-drive graph.
pub fn graph() -> StateGraph {
    StateGraph::build(lexicon()).expect("built-in sign lexicon is valid")
}
