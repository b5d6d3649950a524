//! Mermaid formatter
//!
//! Renders a graph as a Mermaid flowchart wrapped in the `code: mmd` envelope:
//!
//!     code: mmd
//!      graph TD;
//!      1[食材の購入]
//!      1 --> 2{肉が早く炒め終わる}
//!      2 --> |yes| 3[肉に野菜を入れる]
//!      3 --> 5[煮込む]
//!
//! Every line after the envelope marker starts with one space. Nodes without an incoming edge
//! are declared on their own line; every other node is declared by the edges pointing at it,
//! with its shape repeated on each one. Labels are emitted verbatim, no escaping.

use crate::flow::building::{Edge, Element, Graph, Node, Shape};
use std::collections::{HashMap, HashSet};

/// The fixed text around the chart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// First line, not indented
    pub marker: String,
    /// Graph declaration, e.g. `graph TD;`
    pub header: String,
}

impl Default for Envelope {
    fn default() -> Self {
        Envelope {
            marker: "code: mmd".to_string(),
            header: "graph TD;".to_string(),
        }
    }
}

fn shaped(node: &Node) -> String {
    match node.shape {
        Shape::Process => format!("{}[{}]", node.id, node.label),
        Shape::Decision => format!("{}{{{}}}", node.id, node.label),
    }
}

fn edge_line(edge: &Edge, target: &Node) -> String {
    match &edge.label {
        Some(label) => format!("{} --> |{}| {}", edge.from, label, shaped(target)),
        None => format!("{} --> {}", edge.from, shaped(target)),
    }
}

/// Render a graph with the given envelope.
pub fn render(graph: &Graph, envelope: &Envelope) -> String {
    let targets: HashSet<_> = graph.edges().map(|e| &e.to).collect();
    let nodes: HashMap<_, _> = graph.nodes().map(|n| (&n.id, n)).collect();

    let mut output = String::new();
    output.push_str(&envelope.marker);
    output.push('\n');
    output.push(' ');
    output.push_str(&envelope.header);

    for element in graph.elements() {
        let line = match element {
            Element::Node(node) if !targets.contains(&node.id) => shaped(node),
            Element::Node(_) => continue,
            Element::Edge(edge) => match nodes.get(&edge.to) {
                Some(target) => edge_line(edge, target),
                None => format!("{} --> {}", edge.from, edge.to),
            },
        };
        output.push_str("\n ");
        output.push_str(&line);
    }

    output.trim_end().to_string()
}
