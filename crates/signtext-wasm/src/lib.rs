// WASM bindings for the signtext gesture transducer.
//
// Provides a `WasmTransducer` class exported via wasm-bindgen that wraps a
// `StateGraph` and one `Session`. Feed results are serialized to JavaScript
// values using serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const t = WasmTransducer.asl();          // built-in lexicon
//   const t2 = new WasmTransducer(specJson);  // custom specification
//   t.feed("hello_2");   // => { matched: true, word: null, completed: false, state: "q4" }
//   t.feed("hello_1");   // => { matched: true, word: "hello", completed: true, state: "q1" }
//   t.drain();           // => ["hello"]
//   t.reset();

use serde::Serialize;
use wasm_bindgen::prelude::*;

use signtext_fst::{FeedResult, Session, StateGraph};

/// Serializable representation of a feed result.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsFeedResult {
    matched: bool,
    word: Option<String>,
    completed: bool,
    state: String,
}

impl JsFeedResult {
    fn from_result(graph: &StateGraph, result: FeedResult) -> Self {
        let state = graph
            .state_name(result.state)
            .unwrap_or_default()
            .to_string();
        Self {
            matched: result.matched,
            word: result.word,
            completed: result.completed,
            state,
        }
    }
}

/// Gesture-token transducer for WebAssembly.
///
/// Wraps one automaton and one running session; browser demos create one
/// instance per camera source.
#[wasm_bindgen]
pub struct WasmTransducer {
    graph: StateGraph,
    session: Session,
}

#[wasm_bindgen]
impl WasmTransducer {
    /// Create a transducer from a specification JSON string.
    #[wasm_bindgen(constructor)]
    pub fn new(spec_json: &str) -> Result<WasmTransducer, JsError> {
        let graph = StateGraph::from_json(spec_json).map_err(|e| JsError::new(&e.to_string()))?;
        let session = graph.new_session();
        Ok(WasmTransducer { graph, session })
    }

    /// Create a transducer over the built-in sign lexicon.
    pub fn asl() -> WasmTransducer {
        let graph = signtext_asl::graph();
        let session = graph.new_session();
        WasmTransducer { graph, session }
    }

    /// Feed one gesture token; returns a feed result object.
    pub fn feed(&mut self, token: &str) -> Result<JsValue, JsError> {
        let result = self.graph.feed(&mut self.session, token);
        let js = JsFeedResult::from_result(&self.graph, result);
        serde_wasm_bindgen::to_value(&js).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Feed a sequence of tokens; returns an array of feed result objects.
    #[wasm_bindgen(js_name = feedAll)]
    pub fn feed_all(&mut self, tokens: Vec<String>) -> Result<JsValue, JsError> {
        let results: Vec<JsFeedResult> = self
            .graph
            .feed_all(&mut self.session, &tokens)
            .into_iter()
            .map(|r| JsFeedResult::from_result(&self.graph, r))
            .collect();
        serde_wasm_bindgen::to_value(&results).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Return all emitted words and clear the log.
    pub fn drain(&mut self) -> Vec<String> {
        self.session.drain()
    }

    /// Abandon any sequence in progress. Emitted words are kept.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Name of the session's current state.
    #[wasm_bindgen(js_name = currentState)]
    pub fn current_state(&self) -> String {
        self.graph
            .state_name(self.session.current_state())
            .unwrap_or_default()
            .to_string()
    }

    /// Number of states in the loaded automaton.
    #[wasm_bindgen(js_name = stateCount)]
    pub fn state_count(&self) -> usize {
        self.graph.state_count()
    }
}
