//! Tiles a display string over a rule set into the index-based inputtable
//! map, then lowers that map into a [`Graph`].

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::error::BuildError;
use crate::graph::{Edge, Graph, Node, NodeId};
use crate::rule::Rule;
use crate::search::{search_parents, EntryNode};

/// For each count of display characters already placed, every candidate
/// entry that could be typed next from there.
type Inputtables = HashMap<usize, HashSet<Rc<EntryNode>>>;

/// Recursively explore every way to tile `text`, working backwards from
/// `tail` (the entries already placed after this point), filling `indexes`.
fn build_index_based_inputtable(
    rule: &Rule,
    text: &str,
    tail: Option<&Rc<EntryNode>>,
    indexes: &mut Inputtables,
) -> Result<(), BuildError> {
    if text.is_empty() {
        return Ok(());
    }

    let parents = search_parents(rule, text, tail)?;
    for p in parents {
        let output_len = rule.view(p.entry).output().chars().count();
        let text_len = text.chars().count();
        let index = text_len - output_len;
        let bucket = indexes.entry(index).or_default();
        let p = Rc::new(p);
        if bucket.contains(&p) {
            // A structurally-identical candidate was already explored at
            // this position; don't re-explore it, but keep checking the
            // others found for this suffix.
            continue;
        }
        bucket.insert(Rc::clone(&p));
        let next_text: String = text.chars().take(index).collect();
        build_index_based_inputtable(rule, &next_text, Some(&p), indexes)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_nodes(
    rule: &Rule,
    text_len: usize,
    indexes: &Inputtables,
    nodes: &mut Vec<Node>,
    edges: &mut Vec<Edge>,
    indexed_nodes: &mut HashMap<usize, NodeId>,
    previous: NodeId,
    end: NodeId,
    index: usize,
) {
    if previous == end {
        return;
    }
    let Some(bucket) = indexes.get(&index) else {
        return;
    };

    for n in bucket {
        let mut build = false;
        let next_index = index + n.total_length(rule);
        let next_node = if next_index == text_len {
            end
        } else if let Some(&existing) = indexed_nodes.get(&next_index) {
            existing
        } else {
            nodes.push(Node::default());
            let id = nodes.len() - 1;
            indexed_nodes.insert(next_index, id);
            build = true;
            id
        };

        let children = n.children();
        for route in n.flatten_dependencies(rule) {
            let entries = route
                .iter()
                .chain(children.iter())
                .map(|pe| rule.view(*pe).to_entry())
                .collect();
            let edge_id = edges.len();
            edges.push(Edge {
                entries,
                previous,
                next: next_node,
            });
            nodes[previous].next_edges.push(edge_id);
        }

        if build {
            build_nodes(
                rule,
                text_len,
                indexes,
                nodes,
                edges,
                indexed_nodes,
                next_node,
                end,
                next_index,
            );
        }
    }
}

/// Build the full keystroke DAG for typing `text` under `rule`.
pub fn build_graph(rule: &Rule, text: &str) -> Result<Graph, BuildError> {
    let mut indexes: Inputtables = HashMap::new();
    build_index_based_inputtable(rule, text, None, &mut indexes).map_err(|e| {
        tracing::debug!(text, "tiling failed: no entry matches a required suffix");
        e
    })?;

    let mut nodes = vec![Node::default(), Node::default()];
    let start: NodeId = 0;
    let end: NodeId = 1;
    let mut edges = Vec::new();
    let mut indexed_nodes = HashMap::new();

    build_nodes(
        rule,
        text.chars().count(),
        &indexes,
        &mut nodes,
        &mut edges,
        &mut indexed_nodes,
        start,
        end,
        0,
    );

    tracing::debug!(
        text,
        node_count = nodes.len(),
        edge_count = edges.len(),
        "built automaton graph"
    );

    Ok(Graph {
        nodes,
        edges,
        start,
        end,
    })
}
