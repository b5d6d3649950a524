//! Graph model
//!
//!     The graph is an append-only log of nodes and edges in the order the builder created
//!     them. Keeping one interleaved log (rather than two separate lists) lets the formats
//!     reproduce the discovery order exactly: a node with no incoming edge is declared where
//!     it was discovered, not at the top or bottom of the output.

use super::ids::NodeId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// An ordinary step, drawn as a rectangle
    Process,
    /// A condition, drawn as a diamond
    Decision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub shape: Shape,
}

impl Node {
    pub fn process(id: NodeId, label: impl Into<String>) -> Self {
        Node {
            id,
            label: label.into(),
            shape: Shape::Process,
        }
    }

    pub fn decision(id: NodeId, label: impl Into<String>) -> Self {
        Node {
            id,
            label: label.into(),
            shape: Shape::Decision,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Outcome label, only on edges leaving a condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Outcome a merge edge belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Edge {
            from,
            to,
            label: None,
            guard: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Node(Node),
    Edge(Edge),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    elements: Vec<Element>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_node(&mut self, node: Node) {
        self.elements.push(Element::Node(node));
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.elements.push(Element::Edge(edge));
    }

    /// Nodes and edges in creation order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.elements.iter().filter_map(|e| match e {
            Element::Node(node) => Some(node),
            Element::Edge(_) => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.elements.iter().filter_map(|e| match e {
            Element::Edge(edge) => Some(edge),
            Element::Node(_) => None,
        })
    }

    pub fn incoming<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges().filter(move |e| &e.to == id)
    }

    pub fn outgoing<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges().filter(move |e| &e.from == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

#[derive(Serialize)]
struct GraphView<'a> {
    nodes: Vec<&'a Node>,
    edges: Vec<&'a Edge>,
}

impl Serialize for Graph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphView {
            nodes: self.nodes().collect(),
            edges: self.edges().collect(),
        }
        .serialize(serializer)
    }
}
