// Validated, interned, immutable state graph.
//
// State names are interned into dense `StateId` indices at build time in
// declaration order; the driving loop in `session` works on ids only and
// never touches name strings.

use hashbrown::HashMap;

use crate::InvalidSpecError;
use crate::spec::GraphSpec;

/// Dense index of a state inside its [`StateGraph`].
///
/// Ids are assigned in declaration order (terminal states that appear only
/// in `finalStates` come last), so ids are stable across builds of the same
/// specification. A `StateId` is only meaningful for the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A directed, token-labelled edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Destination state.
    pub target: StateId,
    /// Word emitted when this edge fires. `None` encodes the silent
    /// (empty-output) edge of the persisted format.
    pub output: Option<String>,
}

struct StateNode {
    name: String,
    terminal: bool,
    edges: HashMap<String, Transition>,
}

/// The full automaton: states, edge tables, start state, terminal flags.
///
/// Built once with [`StateGraph::build`] and immutable afterwards; safe to
/// share read-only across any number of concurrently driven sessions.
pub struct StateGraph {
    states: Vec<StateNode>,
    ids: HashMap<String, StateId>,
    start: StateId,
}

impl std::fmt::Debug for StateGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateGraph")
            .field("state_count", &self.states.len())
            .field("transition_count", &self.transition_count())
            .field("terminal_count", &self.terminal_count())
            .field("start", &self.state_name(self.start))
            .finish()
    }
}

impl StateGraph {
    /// Build a graph from a declarative specification, rejecting malformed
    /// input with the specific [`InvalidSpecError`] variant.
    pub fn build(spec: GraphSpec) -> Result<Self, InvalidSpecError> {
        if spec.final_states.is_empty() {
            return Err(InvalidSpecError::NoTerminalState);
        }
        if spec.states.get(&spec.start_state).is_none() {
            return Err(InvalidSpecError::MissingStartState(spec.start_state.clone()));
        }

        let mut states: Vec<StateNode> =
            Vec::with_capacity(spec.states.len() + spec.final_states.len());
        let mut ids: HashMap<String, StateId> =
            HashMap::with_capacity(spec.states.len() + spec.final_states.len());

        // Declared states first, in declaration order.
        for (name, _) in spec.states.iter() {
            if ids.contains_key(name.as_str()) {
                return Err(InvalidSpecError::DuplicateState {
                    state: name.clone(),
                });
            }
            let id = StateId(states.len() as u32);
            ids.insert(name.clone(), id);
            states.push(StateNode {
                name: name.clone(),
                terminal: false,
                edges: HashMap::new(),
            });
        }

        // Terminal states: mark declared ones, intern the rest. A terminal
        // state that never appears under `states` is the common case (it is
        // only ever a transition target).
        for name in &spec.final_states {
            match ids.get(name.as_str()) {
                Some(&id) => states[id.index()].terminal = true,
                None => {
                    let id = StateId(states.len() as u32);
                    ids.insert(name.clone(), id);
                    states.push(StateNode {
                        name: name.clone(),
                        terminal: true,
                        edges: HashMap::new(),
                    });
                }
            }
        }

        let start = ids[spec.start_state.as_str()];
        if states[start.index()].terminal {
            return Err(InvalidSpecError::StartIsTerminal(spec.start_state.clone()));
        }

        for (name, table) in spec.states.iter() {
            let sid = ids[name.as_str()];
            if states[sid.index()].terminal {
                if !table.is_empty() {
                    return Err(InvalidSpecError::TerminalHasTransitions {
                        state: name.clone(),
                    });
                }
                continue;
            }
            if table.is_empty() {
                return Err(InvalidSpecError::DeadEndState {
                    state: name.clone(),
                });
            }
            for (token, edge) in table.iter() {
                let target = match ids.get(edge.state.as_str()) {
                    Some(&t) => t,
                    None => {
                        return Err(InvalidSpecError::DanglingReference {
                            state: name.clone(),
                            token: token.clone(),
                            target: edge.state.clone(),
                        });
                    }
                };
                let transition = Transition {
                    target,
                    output: if edge.output.is_empty() {
                        None
                    } else {
                        Some(edge.output.clone())
                    },
                };
                if states[sid.index()]
                    .edges
                    .insert(token.clone(), transition)
                    .is_some()
                {
                    return Err(InvalidSpecError::DuplicateToken {
                        state: name.clone(),
                        token: token.clone(),
                    });
                }
            }
        }

        Ok(Self { states, ids, start })
    }

    /// Parse a JSON specification and build the graph in one step.
    pub fn from_json(json: &str) -> Result<Self, InvalidSpecError> {
        Self::build(GraphSpec::from_json(json)?)
    }

    /// The transition out of `state` labelled with `token`, if one exists.
    /// Pure lookup; O(1) expected.
    #[inline]
    pub fn transition_for(&self, state: StateId, token: &str) -> Option<&Transition> {
        self.states.get(state.index())?.edges.get(token)
    }

    /// The start (idle/reset) state.
    #[inline]
    pub fn start_state(&self) -> StateId {
        self.start
    }

    /// Whether `state` is terminal. Ids from another graph that fall out of
    /// range are reported as non-terminal.
    #[inline]
    pub fn is_terminal(&self, state: StateId) -> bool {
        self.states
            .get(state.index())
            .is_some_and(|node| node.terminal)
    }

    /// Name of `state`, if the id belongs to this graph.
    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.states.get(state.index()).map(|node| node.name.as_str())
    }

    /// Id of the state called `name`, if declared.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.ids.get(name).copied()
    }

    /// Number of states (declared plus implicit terminals).
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Total number of transitions across all states.
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|node| node.edges.len()).sum()
    }

    /// Number of terminal states.
    pub fn terminal_count(&self) -> usize {
        self.states.iter().filter(|node| node.terminal).count()
    }

    /// Tokens accepted from `state`, in no particular order.
    pub fn tokens_from(&self, state: StateId) -> impl Iterator<Item = &str> {
        self.states
            .get(state.index())
            .into_iter()
            .flat_map(|node| node.edges.keys().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EdgeTable, GraphSpec};

    fn two_letter_spec() -> GraphSpec {
        let mut spec = GraphSpec::new("q1");
        spec.push_final("q3");
        spec.push_edge("q1", "h_2", "q2", "");
        spec.push_edge("q2", "h_1", "q3", "h");
        spec
    }

    #[test]
    fn build_minimal_graph() {
        let graph = StateGraph::build(two_letter_spec()).unwrap();
        assert_eq!(graph.state_count(), 3);
        assert_eq!(graph.transition_count(), 2);
        assert_eq!(graph.terminal_count(), 1);

        let q1 = graph.state_id("q1").unwrap();
        let q2 = graph.state_id("q2").unwrap();
        let q3 = graph.state_id("q3").unwrap();

        assert_eq!(graph.start_state(), q1);
        assert!(!graph.is_terminal(q1));
        assert!(!graph.is_terminal(q2));
        assert!(graph.is_terminal(q3));

        let t = graph.transition_for(q1, "h_2").unwrap();
        assert_eq!(t.target, q2);
        assert_eq!(t.output, None);

        let t = graph.transition_for(q2, "h_1").unwrap();
        assert_eq!(t.target, q3);
        assert_eq!(t.output.as_deref(), Some("h"));
    }

    #[test]
    fn ids_follow_declaration_order() {
        let graph = StateGraph::build(two_letter_spec()).unwrap();
        assert_eq!(graph.state_id("q1").unwrap().index(), 0);
        assert_eq!(graph.state_id("q2").unwrap().index(), 1);
        // q3 is only ever a target, interned after the declared states
        assert_eq!(graph.state_id("q3").unwrap().index(), 2);
        assert_eq!(graph.state_name(StateId(2)), Some("q3"));
    }

    #[test]
    fn lookup_misses() {
        let graph = StateGraph::build(two_letter_spec()).unwrap();
        let q1 = graph.state_id("q1").unwrap();
        assert!(graph.transition_for(q1, "nope").is_none());
        assert!(graph.transition_for(StateId(99), "h_2").is_none());
        assert!(!graph.is_terminal(StateId(99)));
        assert!(graph.state_name(StateId(99)).is_none());
        assert!(graph.state_id("missing").is_none());
    }

    #[test]
    fn self_loops_are_legal() {
        let mut spec = GraphSpec::new("a");
        spec.push_final("z");
        spec.push_edge("a", "again", "a", "echo");
        spec.push_edge("a", "stop", "z", "done");
        let graph = StateGraph::build(spec).unwrap();
        let a = graph.state_id("a").unwrap();
        assert_eq!(graph.transition_for(a, "again").unwrap().target, a);
    }

    #[test]
    fn reject_missing_start_state() {
        let mut spec = GraphSpec::new("nowhere");
        spec.push_final("z");
        spec.push_edge("a", "go", "z", "");
        let err = StateGraph::build(spec).unwrap_err();
        assert!(matches!(err, InvalidSpecError::MissingStartState(s) if s == "nowhere"));
    }

    #[test]
    fn reject_start_declared_only_as_terminal() {
        // Listed in finalStates but absent from the state table: still not a
        // declared state, so the start-state check fires first.
        let mut spec = GraphSpec::new("z");
        spec.push_final("z");
        spec.push_edge("a", "go", "z", "");
        let err = StateGraph::build(spec).unwrap_err();
        assert!(matches!(err, InvalidSpecError::MissingStartState(_)));
    }

    #[test]
    fn reject_no_terminal_state() {
        let mut spec = GraphSpec::new("a");
        spec.push_edge("a", "go", "a", "");
        let err = StateGraph::build(spec).unwrap_err();
        assert!(matches!(err, InvalidSpecError::NoTerminalState));
    }

    #[test]
    fn reject_terminal_start_state() {
        let mut spec = GraphSpec::new("a");
        spec.push_final("a");
        spec.push_final("z");
        spec.push_edge("a", "go", "z", "");
        let err = StateGraph::build(spec).unwrap_err();
        assert!(matches!(err, InvalidSpecError::StartIsTerminal(s) if s == "a"));
    }

    #[test]
    fn reject_duplicate_state_declaration() {
        let mut spec = GraphSpec::new("a");
        spec.push_final("z");
        spec.push_edge("a", "go", "z", "");
        // Force a second declaration of `a`; push_edge would merge into the
        // first, which is exactly what hand-edited JSON does not do.
        spec.states.states.push(("a".to_string(), EdgeTable::default()));
        let err = StateGraph::build(spec).unwrap_err();
        assert!(matches!(err, InvalidSpecError::DuplicateState { state } if state == "a"));
    }

    #[test]
    fn reject_duplicate_token() {
        let mut spec = GraphSpec::new("a");
        spec.push_final("z");
        spec.push_edge("a", "go", "z", "first");
        spec.push_edge("a", "go", "z", "second");
        let err = StateGraph::build(spec).unwrap_err();
        assert!(
            matches!(err, InvalidSpecError::DuplicateToken { state, token }
                if state == "a" && token == "go")
        );
    }

    #[test]
    fn reject_dangling_reference() {
        let mut spec = GraphSpec::new("a");
        spec.push_final("z");
        spec.push_edge("a", "go", "ghost", "");
        let err = StateGraph::build(spec).unwrap_err();
        assert!(
            matches!(err, InvalidSpecError::DanglingReference { state, token, target }
                if state == "a" && token == "go" && target == "ghost")
        );
    }

    #[test]
    fn reject_dead_end_state() {
        let mut spec = GraphSpec::new("a");
        spec.push_final("z");
        spec.push_edge("a", "go", "b", "");
        spec.push_edge("b", "on", "z", "");
        spec.states.states.push(("stuck".to_string(), EdgeTable::default()));
        let err = StateGraph::build(spec).unwrap_err();
        assert!(matches!(err, InvalidSpecError::DeadEndState { state } if state == "stuck"));
    }

    #[test]
    fn reject_terminal_with_transitions() {
        let mut spec = GraphSpec::new("a");
        spec.push_final("z");
        spec.push_edge("a", "go", "z", "");
        spec.push_edge("z", "more", "a", "");
        let err = StateGraph::build(spec).unwrap_err();
        assert!(
            matches!(err, InvalidSpecError::TerminalHasTransitions { state } if state == "z")
        );
    }

    #[test]
    fn accept_terminal_declared_with_empty_table() {
        let mut spec = GraphSpec::new("a");
        spec.push_final("z");
        spec.push_edge("a", "go", "z", "");
        spec.states.states.push(("z".to_string(), EdgeTable::default()));
        let graph = StateGraph::build(spec).unwrap();
        assert!(graph.is_terminal(graph.state_id("z").unwrap()));
    }

    #[test]
    fn accept_unreferenced_terminal() {
        let mut spec = GraphSpec::new("a");
        spec.push_final("z");
        spec.push_final("island");
        spec.push_edge("a", "go", "z", "");
        let graph = StateGraph::build(spec).unwrap();
        assert!(graph.is_terminal(graph.state_id("island").unwrap()));
    }

    #[test]
    fn build_from_json() {
        let graph = StateGraph::from_json(
            r#"{
                "startState": "q1",
                "finalStates": ["q3"],
                "states": {
                    "q1": { "h_2": { "state": "q2", "output": "" } },
                    "q2": { "h_1": { "state": "q3", "output": "h" } }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(graph.state_count(), 3);
    }

    #[test]
    fn duplicate_json_token_keys_are_rejected() {
        let err = StateGraph::from_json(
            r#"{
                "startState": "a",
                "finalStates": ["z"],
                "states": {
                    "a": {
                        "go": { "state": "z", "output": "x" },
                        "go": { "state": "z", "output": "y" }
                    }
                }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, InvalidSpecError::DuplicateToken { .. }));
    }

    #[test]
    fn tokens_from_lists_edges() {
        let graph = StateGraph::build(two_letter_spec()).unwrap();
        let q1 = graph.state_id("q1").unwrap();
        let mut tokens: Vec<&str> = graph.tokens_from(q1).collect();
        tokens.sort_unstable();
        assert_eq!(tokens, ["h_2"]);
        assert_eq!(graph.tokens_from(StateId(99)).count(), 0);
    }
}
