// Per-run session state and the token driving algorithm.
//
// The graph is the machine, the session is the cursor: `StateGraph` methods
// take `(&self, &mut Session)`, so one loaded graph serves any number of
// concurrently driven sessions without locking. A session must only be fed
// tokens from the graph that created it.

use crate::graph::{StateGraph, StateId, Transition};

/// Outcome of feeding one token.
///
/// Every outcome is represented here; feeding never fails. Callers that want
/// strict-sequence behavior build it on top of `matched`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResult {
    /// Whether any transition fired (including after mismatch recovery).
    pub matched: bool,
    /// The word emitted by the fired transition, if it had one.
    pub word: Option<String>,
    /// Whether the fired transition reached a terminal state. The session
    /// has already been reset to the start state when this is `true`.
    pub completed: bool,
    /// The session's state after this step.
    pub state: StateId,
}

/// Mutable per-run state: the current position in the graph and the words
/// emitted so far. Create one per token source with
/// [`StateGraph::new_session`].
#[derive(Debug, Clone)]
pub struct Session {
    start: StateId,
    current: StateId,
    emitted: Vec<String>,
}

impl Session {
    /// The state the session is currently in.
    #[inline]
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Whether the session sits in the start (idle) state.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current == self.start
    }

    /// Return to the start state. Emitted words are kept; idempotent.
    pub fn reset(&mut self) {
        self.current = self.start;
    }

    /// Words emitted so far, oldest first.
    pub fn emitted(&self) -> &[String] {
        &self.emitted
    }

    /// Return all emitted words and clear the log. Does not touch the
    /// current state.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.emitted)
    }
}

impl StateGraph {
    /// Create a fresh session positioned at the start state.
    pub fn new_session(&self) -> Session {
        Session {
            start: self.start_state(),
            current: self.start_state(),
            emitted: Vec::new(),
        }
    }

    /// Feed one gesture token to `session`.
    ///
    /// If the current state has a transition for `token`, it fires: the
    /// session advances, the edge's word (if any) is emitted, and reaching a
    /// terminal state resets the session to the start state with
    /// `completed = true`.
    ///
    /// If no transition matches and the session is not at the start state,
    /// the session resets and the same token is retried once against the
    /// start state, so a token that interrupts one sequence can still open
    /// the next. A token that matches nowhere is dropped for this step
    /// (`matched = false`); it is never an error and is never buffered.
    pub fn feed(&self, session: &mut Session, token: &str) -> FeedResult {
        if let Some(t) = self.transition_for(session.current, token) {
            return self.fire(session, t);
        }
        if session.current != self.start_state() {
            session.current = self.start_state();
            if let Some(t) = self.transition_for(session.current, token) {
                return self.fire(session, t);
            }
        }
        FeedResult {
            matched: false,
            word: None,
            completed: false,
            state: session.current,
        }
    }

    /// Feed a sequence of tokens in order; a plain fold over [`feed`]
    /// with no additional semantics.
    ///
    /// [`feed`]: StateGraph::feed
    pub fn feed_all<S: AsRef<str>>(&self, session: &mut Session, tokens: &[S]) -> Vec<FeedResult> {
        tokens
            .iter()
            .map(|token| self.feed(session, token.as_ref()))
            .collect()
    }

    fn fire(&self, session: &mut Session, transition: &Transition) -> FeedResult {
        session.current = transition.target;
        let word = transition.output.clone();
        if let Some(w) = &word {
            session.emitted.push(w.clone());
        }
        let completed = self.is_terminal(session.current);
        if completed {
            session.current = session.start;
        }
        FeedResult {
            matched: true,
            word,
            completed,
            state: session.current,
        }
    }
}
