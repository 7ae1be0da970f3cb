// Translator: top-level integration point for token-to-text translation.
//
// Owns a graph and one session, so upstream recognizers only have to hand
// over tokens and read back text. Multi-session callers should share a
// `StateGraph` directly and drive their own sessions.

use signtext_fst::{FeedResult, Session, StateGraph};

/// Translates a stream of gesture tokens into words and sentence text.
pub struct Translator {
    graph: StateGraph,
    session: Session,
}

impl Translator {
    /// Create a translator over the given graph.
    pub fn new(graph: StateGraph) -> Self {
        let session = graph.new_session();
        Self { graph, session }
    }

    /// Feed one gesture token; returns the word it completed, if any.
    pub fn feed(&mut self, token: &str) -> Option<String> {
        self.graph.feed(&mut self.session, token).word
    }

    /// Feed one gesture token and return the full per-step report.
    pub fn feed_detailed(&mut self, token: &str) -> FeedResult {
        self.graph.feed(&mut self.session, token)
    }

    /// Feed a sequence of tokens in order.
    pub fn feed_all<S: AsRef<str>>(&mut self, tokens: &[S]) -> Vec<FeedResult> {
        self.graph.feed_all(&mut self.session, tokens)
    }

    /// Words recognized so far, oldest first.
    pub fn words(&self) -> &[String] {
        self.session.emitted()
    }

    /// The recognized words joined into a single line of text.
    pub fn sentence(&self) -> String {
        self.session.emitted().join(" ")
    }

    /// Return all recognized words and clear the log.
    pub fn take_words(&mut self) -> Vec<String> {
        self.session.drain()
    }

    /// Abandon any sequence in progress. Recognized words are kept.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Whether no sequence is currently in progress.
    pub fn is_idle(&self) -> bool {
        self.session.is_idle()
    }

    /// The underlying graph.
    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }
}

impl Default for Translator {
    /// A translator over the built-in sign lexicon.
    fn default() -> Self {
        Self::new(crate::lexicon::graph())
    }
}
