// Declarative specification format: the persisted JSON shape and a
// programmatic construction API for compiled-in lexicons.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::InvalidSpecError;

/// One outgoing edge of a state: the destination state name and the word
/// emitted when the edge fires (empty string for silent edges).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub state: String,
    pub output: String,
}

/// Ordered `token -> edge` table for one state.
///
/// Serialized as a JSON object. Deserialization keeps every entry in
/// document order instead of collapsing into a map, so a duplicate token key
/// in hand-authored JSON survives long enough for `StateGraph::build` to
/// reject it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeTable {
    pub edges: Vec<(String, EdgeSpec)>,
}

impl EdgeTable {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// First edge declared for `token`, if any.
    pub fn get(&self, token: &str) -> Option<&EdgeSpec> {
        self.edges.iter().find(|(t, _)| t == token).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, EdgeSpec)> {
        self.edges.iter()
    }
}

impl Serialize for EdgeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.edges.len()))?;
        for (token, edge) in &self.edges {
            map.serialize_entry(token, edge)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EdgeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EdgeTableVisitor;

        impl<'de> Visitor<'de> for EdgeTableVisitor {
            type Value = EdgeTable;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map from gesture token to transition")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut edges = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, EdgeSpec>()? {
                    edges.push(entry);
                }
                Ok(EdgeTable { edges })
            }
        }

        deserializer.deserialize_map(EdgeTableVisitor)
    }
}

/// Ordered `state -> edge table` listing, preserving declaration order.
///
/// Declaration order determines `StateId` assignment in the built graph,
/// which keeps ids stable across builds of the same specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTable {
    pub states: Vec<(String, EdgeTable)>,
}

impl StateTable {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// First declaration of `state`, if any.
    pub fn get(&self, state: &str) -> Option<&EdgeTable> {
        self.states.iter().find(|(s, _)| s == state).map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, EdgeTable)> {
        self.states.iter()
    }
}

impl Serialize for StateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.states.len()))?;
        for (state, edges) in &self.states {
            map.serialize_entry(state, edges)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StateTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StateTableVisitor;

        impl<'de> Visitor<'de> for StateTableVisitor {
            type Value = StateTable;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map from state name to its edge table")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut states = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, EdgeTable>()? {
                    states.push(entry);
                }
                Ok(StateTable { states })
            }
        }

        deserializer.deserialize_map(StateTableVisitor)
    }
}

/// Full declarative automaton specification.
///
/// The persisted JSON shape:
///
/// ```json
/// {
///   "startState": "q1",
///   "finalStates": ["q3"],
///   "states": {
///     "q1": { "h_2": { "state": "q2", "output": "" } },
///     "q2": { "h_1": { "state": "q3", "output": "h" } }
///   }
/// }
/// ```
///
/// A state listed in `finalStates` need not appear under `states`; terminal
/// states have no outgoing edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSpec {
    pub start_state: String,
    pub final_states: Vec<String>,
    pub states: StateTable,
}

impl GraphSpec {
    /// Create an empty specification with the given start state.
    pub fn new(start_state: impl Into<String>) -> Self {
        Self {
            start_state: start_state.into(),
            final_states: Vec::new(),
            states: StateTable::default(),
        }
    }

    /// Parse a specification from its JSON encoding.
    pub fn from_json(json: &str) -> Result<Self, InvalidSpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Declare a terminal state.
    pub fn push_final(&mut self, state: impl Into<String>) {
        self.final_states.push(state.into());
    }

    /// Declare an edge `from --token--> to`, emitting `output` when it
    /// fires (pass `""` for a silent edge). Creates the source state entry
    /// on first use; duplicate tokens are kept and rejected at build time.
    pub fn push_edge(
        &mut self,
        from: impl Into<String>,
        token: impl Into<String>,
        to: impl Into<String>,
        output: impl Into<String>,
    ) {
        let from = from.into();
        let edge = EdgeSpec {
            state: to.into(),
            output: output.into(),
        };
        let token = token.into();

        match self.states.states.iter_mut().find(|(s, _)| *s == from) {
            Some((_, table)) => table.edges.push((token, edge)),
            None => self.states.states.push((
                from,
                EdgeTable {
                    edges: vec![(token, edge)],
                },
            )),
        }
    }
}
