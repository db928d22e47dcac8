//! Renders a built [`Graph`] as Graphviz DOT text.
//!
//! Not behavioral: the returned string is for external tooling to lay out
//! and display, not consumed by anything in this crate.

use crate::graph::{Edge, Graph};

fn node_label(id: usize) -> String {
    format!("n{id}")
}

fn edge_label(e: &Edge) -> String {
    let s = e
        .entries
        .iter()
        .map(|entry| format!("{}/{}/{}", entry.input, entry.output, entry.next))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("\"{}\"", s.replace('"', "\\\""))
}

/// Render `graph` as a `digraph` suitable for `dot -Tsvg`.
pub fn render(graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str("digraph graph_name {\n");
    out.push_str("  graph [\n");
    out.push_str("    ranksep = 1.0\n");
    out.push_str("  ];\n\n");

    out.push_str("  // node define\n");
    for id in 0..graph.nodes.len() {
        out.push_str(&format!("  {};\n", node_label(id)));
    }

    out.push_str("\n  // edge define\n");
    for edge in &graph.edges {
        out.push_str(&format!(
            "  {} -> {} [\n    label = {}\n  ];\n",
            node_label(edge.previous),
            node_label(edge.next),
            edge_label(edge)
        ));
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::rule::{default_direct_inputtable, Rule};
    use crate::tiling::build_graph;

    #[test]
    fn renders_a_digraph_with_node_and_edge_sections() {
        let rule =
            Rule::from_entries(vec![Entry::new("a", "あ", "")], default_direct_inputtable())
                .unwrap();
        let graph = build_graph(&rule, "あ").unwrap();
        let dot = render(&graph);
        assert!(dot.starts_with("digraph graph_name {"));
        assert!(dot.contains("n0"));
        assert!(dot.contains("label ="));
    }
}
