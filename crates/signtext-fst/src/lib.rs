//! Gesture-token finite state transducer engine.
//!
//! This crate turns a stream of discrete gesture tokens (opaque strings
//! produced by an upstream recognizer, e.g. `"h_2"`, `"hello_1"`) into
//! emitted words. A [`graph::StateGraph`] is built once from a declarative
//! specification and is immutable afterwards; any number of [`session::Session`]s
//! can then be driven against it concurrently, one per token source.
//!
//! # Architecture
//!
//! - [`spec`] -- Declarative specification format (JSON shape and programmatic construction)
//! - [`graph`] -- Validated, interned, immutable state graph
//! - [`session`] -- Per-run session state and the token driving algorithm

pub mod graph;
pub mod session;
pub mod spec;

pub use graph::{StateGraph, StateId, Transition};
pub use session::{FeedResult, Session};
pub use spec::GraphSpec;

/// Error type for specification validation and loading.
///
/// All variants are construction-time failures: a malformed specification is
/// rejected before any session exists, and is never repaired.
#[derive(Debug, thiserror::Error)]
pub enum InvalidSpecError {
    #[error("failed to parse specification JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("start state `{0}` is not declared in the state table")]
    MissingStartState(String),
    #[error("specification declares no terminal states")]
    NoTerminalState,
    #[error("start state `{0}` must not be terminal")]
    StartIsTerminal(String),
    #[error("state `{state}` is declared more than once")]
    DuplicateState { state: String },
    #[error("state `{state}` declares two transitions for token `{token}`")]
    DuplicateToken { state: String, token: String },
    #[error("transition `{state}` --{token}--> `{target}` references an undeclared state")]
    DanglingReference {
        state: String,
        token: String,
        target: String,
    },
    #[error("state `{state}` has no outgoing transitions and is not terminal")]
    DeadEndState { state: String },
    #[error("terminal state `{state}` must not declare outgoing transitions")]
    TerminalHasTransitions { state: String },
}
