//! The runtime keystroke state machine: drives a [`Graph`] one keystroke
//! chunk at a time.

use crate::entry::Entry;
use crate::error::BuildError;
use crate::graph::{EdgeId, Graph, NodeId};
use crate::rule::Rule;
use crate::tiling::build_graph;

/// A single transition attempt's outcome.
///
/// Rejecting a keystroke is not an error: [`Automaton::input`] simply leaves
/// the automaton's state untouched and returns `succeeded: false`.
#[derive(Debug, Clone, Default)]
pub struct InputResult {
    pub succeeded: bool,
    /// Entries that became fully typed as a result of this one input chunk.
    /// Can hold more than one entry when a chain of priming entries all
    /// complete in a single keystroke.
    pub passed_entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct State {
    node: NodeId,
    /// Every edge still reachable from `node` that this input chunk could
    /// advance, each with its progress: `(edge, entry_index, input_index)`.
    available_edges: Vec<(EdgeId, usize, usize)>,
    passed_entries: Vec<Entry>,
}

impl State {
    fn at_node(node: NodeId, graph: &Graph) -> Self {
        let available_edges = graph
            .node(node)
            .next_edges
            .iter()
            .map(|&e| (e, 0, 0))
            .collect();
        Self {
            node,
            available_edges,
            passed_entries: Vec::new(),
        }
    }

    fn inputted(&self, graph: &Graph) -> String {
        let mut skip = 0usize;
        let mut parts = Vec::new();
        for e in &self.passed_entries {
            let chars: Vec<char> = e.input.chars().collect();
            let start = skip.min(chars.len());
            parts.push(chars[start..].iter().collect::<String>());
            skip = e.next.chars().count();
        }
        if let Some(&(edge_id, entry_index, input_index)) = self.available_edges.first() {
            let edge = graph.edge(edge_id);
            let chars: Vec<char> = edge.entries[entry_index].input.chars().collect();
            let start = skip.min(chars.len());
            let end = input_index.min(chars.len());
            parts.push(chars[start..end].iter().collect());
        }
        parts.concat()
    }

    fn outputted(&self) -> String {
        self.passed_entries.iter().map(|e| e.output.as_str()).collect()
    }

    /// Mirrors the original `State.__input`: walk forward through one edge's
    /// entries, consuming `i` against the current entry's remaining input.
    /// `i` longer than the current entry's remaining input never matches —
    /// crossing into the next entry only happens by completing the current
    /// one and recursing with that entry's `next` field as the new `i`.
    fn advance_within_edge(
        i: &[char],
        edge: &crate::graph::Edge,
        entry_index: usize,
        input_index: usize,
        mut finished: Vec<Entry>,
    ) -> (bool, usize, usize, Vec<Entry>) {
        if i.is_empty() || entry_index >= edge.entries.len() {
            let succeeded = !finished.is_empty();
            return (succeeded, entry_index, input_index, finished);
        }
        let entry = &edge.entries[entry_index];
        let entry_chars: Vec<char> = entry.input.chars().collect();
        if input_index > entry_chars.len() {
            return (false, entry_index, input_index, finished);
        }
        let remaining = &entry_chars[input_index..];
        if remaining.starts_with(i) {
            if remaining.len() == i.len() {
                finished.push(entry.clone());
                let next_chars: Vec<char> = entry.next.chars().collect();
                return Self::advance_within_edge(&next_chars, edge, entry_index + 1, 0, finished);
            }
            return (true, entry_index, input_index + i.len(), finished);
        }
        (false, entry_index, input_index, finished)
    }

    fn test(&self, i: &str, graph: &Graph) -> (bool, Vec<Entry>, State) {
        let i_chars: Vec<char> = i.chars().collect();
        let mut new_available_edges = Vec::new();
        let mut finished_entries: Vec<Entry> = Vec::new();

        for &(edge_id, entry_index, input_index) in &self.available_edges {
            let edge = graph.edge(edge_id);
            let (succeeded, new_entry_index, new_input_index, tmp_finished) =
                Self::advance_within_edge(&i_chars, edge, entry_index, input_index, Vec::new());
            if !succeeded {
                continue;
            }
            if new_entry_index == edge.entries.len() {
                let mut passed = self.passed_entries.clone();
                passed.extend(tmp_finished.clone());
                let new_state = State {
                    node: edge.next,
                    available_edges: graph
                        .node(edge.next)
                        .next_edges
                        .iter()
                        .map(|&e| (e, 0, 0))
                        .collect(),
                    passed_entries: passed,
                };
                return (true, tmp_finished, new_state);
            }
            finished_entries = tmp_finished;
            new_available_edges.push((edge_id, new_entry_index, new_input_index));
        }

        if !new_available_edges.is_empty() {
            let mut passed = self.passed_entries.clone();
            passed.extend(finished_entries.clone());
            let new_state = State {
                node: self.node,
                available_edges: new_available_edges,
                passed_entries: passed,
            };
            return (true, finished_entries, new_state);
        }

        (false, Vec::new(), self.clone())
    }
}

/// Drives the keystrokes needed to type one display string, built once via
/// [`Automaton::build`] and then stepped with [`Automaton::input`].
#[derive(Debug, Clone)]
pub struct Automaton {
    graph: Graph,
    text: String,
    state: State,
}

impl Automaton {
    /// Tile `text` over `rule` and build a fresh automaton positioned at the start.
    pub fn build(rule: &Rule, text: &str) -> Result<Self, BuildError> {
        let graph = build_graph(rule, text)?;
        let state = State::at_node(graph.start, &graph);
        Ok(Self {
            graph,
            text: text.to_string(),
            state,
        })
    }

    /// Display characters typed and confirmed so far.
    pub fn outputted(&self) -> String {
        self.state.outputted()
    }

    /// Keystrokes typed and confirmed so far (including in-progress partial
    /// input on the current entry).
    pub fn inputted(&self) -> String {
        self.state.inputted(&self.graph)
    }

    /// True once there's nothing left to type.
    pub fn finished(&self) -> bool {
        self.graph.node(self.state.node).is_terminal()
    }

    /// Evaluate a keystroke chunk without changing state.
    pub fn test(&self, i: &str) -> InputResult {
        let (succeeded, passed_entries, _) = self.state.test(i, &self.graph);
        InputResult {
            succeeded,
            passed_entries,
        }
    }

    /// Feed a keystroke chunk, advancing state on success.
    pub fn input(&mut self, i: &str) -> InputResult {
        let (succeeded, passed_entries, new_state) = self.state.test(i, &self.graph);
        if succeeded {
            self.state = new_state;
        }
        InputResult {
            succeeded,
            passed_entries,
        }
    }

    /// Return to the start of the display string.
    pub fn reset(&mut self) {
        self.state = State::at_node(self.graph.start, &self.graph);
    }

    /// Every single keystroke that would be accepted right now.
    pub fn inputtable(&self) -> Vec<String> {
        let mut out = Vec::new();
        for &(edge_id, entry_index, input_index) in &self.state.available_edges {
            let edge = self.graph.edge(edge_id);
            let entry = &edge.entries[entry_index];
            if let Some(ch) = entry.input.chars().nth(input_index) {
                let s = ch.to_string();
                if !out.contains(&s) {
                    out.push(s);
                }
            }
        }
        out
    }

    /// Display characters typed and confirmed so far. Alias of [`Self::outputted`].
    pub fn head_print_str(&self) -> String {
        self.outputted()
    }

    /// Keystrokes typed and confirmed so far. Alias of [`Self::inputted`].
    pub fn head_input_str(&self) -> String {
        self.inputted()
    }

    /// The display text not yet confirmed.
    pub fn tail_print_str(&self) -> String {
        let outputted_len = self.outputted().chars().count();
        self.text.chars().skip(outputted_len).collect()
    }

    /// One plausible remaining keystroke sequence to finish typing the word.
    ///
    /// Several routes to the end node usually exist; this greedily follows
    /// the first available edge at each node rather than enumerating all of
    /// them.
    pub fn tail_input_str(&self) -> String {
        let mut node = self.state.node;
        let mut skip = 0usize;
        let mut parts = Vec::new();

        if let Some(&(edge_id, entry_index, input_index)) = self.state.available_edges.first() {
            let edge = self.graph.edge(edge_id);
            for (i, entry) in edge.entries[entry_index..].iter().enumerate() {
                let chars: Vec<char> = entry.input.chars().collect();
                let start = if i == 0 {
                    input_index.min(chars.len())
                } else {
                    skip.min(chars.len())
                };
                parts.push(chars[start..].iter().collect::<String>());
                skip = entry.next.chars().count();
            }
            node = edge.next;
        }

        while node != self.graph.end {
            let Some(&edge_id) = self.graph.node(node).next_edges.first() else {
                break;
            };
            let edge = self.graph.edge(edge_id);
            for entry in &edge.entries {
                let chars: Vec<char> = entry.input.chars().collect();
                let start = skip.min(chars.len());
                parts.push(chars[start..].iter().collect::<String>());
                skip = entry.next.chars().count();
            }
            node = edge.next;
        }

        parts.concat()
    }
}

/// Tile `text` over `rule` and return an automaton ready to consume keystrokes.
pub fn build_automaton(rule: &Rule, text: &str) -> Result<Automaton, BuildError> {
    Automaton::build(rule, text)
}
