//! Fluent assertions over built graphs

use crate::flow::building::{Edge, Graph, Node, Shape};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a graph
pub fn assert_graph(graph: &Graph) -> GraphAssertion<'_> {
    GraphAssertion { graph }
}

fn ids<'a>(nodes: impl Iterator<Item = &'a Node>) -> Vec<String> {
    nodes.map(|n| n.id.to_string()).collect()
}

// ============================================================================
// Graph Assertions
// ============================================================================

pub struct GraphAssertion<'a> {
    graph: &'a Graph,
}

impl<'a> GraphAssertion<'a> {
    pub fn node_count(self, expected: usize) -> Self {
        assert_eq!(
            self.graph.node_count(),
            expected,
            "Expected {} nodes, found {}: {:?}",
            expected,
            self.graph.node_count(),
            ids(self.graph.nodes())
        );
        self
    }

    pub fn edge_count(self, expected: usize) -> Self {
        assert_eq!(
            self.graph.edge_count(),
            expected,
            "Expected {} edges, found {}: {:?}",
            expected,
            self.graph.edge_count(),
            self.edge_pairs()
        );
        self
    }

    /// Assert node ids in creation order
    pub fn node_ids(self, expected: &[&str]) -> Self {
        assert_eq!(ids(self.graph.nodes()), expected, "Node ids differ");
        self
    }

    /// Assert edges as `(from, to)` pairs in creation order
    pub fn edges(self, expected: &[(&str, &str)]) -> Self {
        let expected: Vec<_> = expected
            .iter()
            .map(|(f, t)| (f.to_string(), t.to_string()))
            .collect();
        assert_eq!(self.edge_pairs(), expected, "Edges differ");
        self
    }

    /// Assert which nodes have no incoming edge
    pub fn roots(self, expected: &[&str]) -> Self {
        let roots: Vec<_> = self
            .graph
            .nodes()
            .filter(|n| self.graph.incoming(&n.id).next().is_none())
            .map(|n| n.id.to_string())
            .collect();
        assert_eq!(roots, expected, "Root nodes differ");
        self
    }

    pub fn node<F>(self, id: &str, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> NodeAssertion<'a>,
    {
        let node = self
            .graph
            .nodes()
            .find(|n| n.id.to_string() == id)
            .unwrap_or_else(|| {
                panic!(
                    "Expected node {}, found only {:?}",
                    id,
                    ids(self.graph.nodes())
                )
            });
        assertion(NodeAssertion {
            graph: self.graph,
            node,
        });
        self
    }

    pub fn edge<F>(self, from: &str, to: &str, assertion: F) -> Self
    where
        F: FnOnce(EdgeAssertion<'a>) -> EdgeAssertion<'a>,
    {
        let mut matching = self.find_edges(from, to);
        let edge = matching.next().unwrap_or_else(|| {
            panic!(
                "Expected edge {} --> {}, found only {:?}",
                from,
                to,
                self.edge_pairs()
            )
        });
        assert!(
            matching.next().is_none(),
            "Expected a single edge {} --> {}",
            from,
            to
        );
        assertion(EdgeAssertion { edge });
        self
    }

    pub fn has_edge(self, from: &str, to: &str) -> Self {
        assert!(
            self.find_edges(from, to).next().is_some(),
            "Expected edge {} --> {}, found only {:?}",
            from,
            to,
            self.edge_pairs()
        );
        self
    }

    pub fn no_edge(self, from: &str, to: &str) -> Self {
        assert!(
            self.find_edges(from, to).next().is_none(),
            "Unexpected edge {} --> {}",
            from,
            to
        );
        self
    }

    fn find_edges(&self, from: &str, to: &str) -> std::vec::IntoIter<&'a Edge> {
        let graph: &'a Graph = self.graph;
        graph
            .edges()
            .filter(|e| e.from.to_string() == from && e.to.to_string() == to)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn edge_pairs(&self) -> Vec<(String, String)> {
        self.graph
            .edges()
            .map(|e| (e.from.to_string(), e.to.to_string()))
            .collect()
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    graph: &'a Graph,
    node: &'a Node,
}

impl<'a> NodeAssertion<'a> {
    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.node.label, expected,
            "Node {}: expected label {:?}, found {:?}",
            self.node.id, expected, self.node.label
        );
        self
    }

    pub fn process(self) -> Self {
        self.shape(Shape::Process)
    }

    pub fn decision(self) -> Self {
        self.shape(Shape::Decision)
    }

    fn shape(self, expected: Shape) -> Self {
        assert_eq!(
            self.node.shape, expected,
            "Node {}: expected {:?}, found {:?}",
            self.node.id, expected, self.node.shape
        );
        self
    }

    pub fn incoming_count(self, expected: usize) -> Self {
        let found = self.graph.incoming(&self.node.id).count();
        assert_eq!(
            found, expected,
            "Node {}: expected {} incoming edges, found {}",
            self.node.id, expected, found
        );
        self
    }

    pub fn outgoing_count(self, expected: usize) -> Self {
        let found = self.graph.outgoing(&self.node.id).count();
        assert_eq!(
            found, expected,
            "Node {}: expected {} outgoing edges, found {}",
            self.node.id, expected, found
        );
        self
    }

    /// Assert the sources of incoming edges, in the order the edges were drawn
    pub fn predecessors(self, expected: &[&str]) -> Self {
        let found: Vec<_> = self
            .graph
            .incoming(&self.node.id)
            .map(|e| e.from.to_string())
            .collect();
        assert_eq!(
            found, expected,
            "Node {}: predecessors differ",
            self.node.id
        );
        self
    }

    /// Assert the targets of outgoing edges, in the order the edges were drawn
    pub fn successors(self, expected: &[&str]) -> Self {
        let found: Vec<_> = self
            .graph
            .outgoing(&self.node.id)
            .map(|e| e.to.to_string())
            .collect();
        assert_eq!(found, expected, "Node {}: successors differ", self.node.id);
        self
    }
}

// ============================================================================
// Edge Assertions
// ============================================================================

pub struct EdgeAssertion<'a> {
    edge: &'a Edge,
}

impl<'a> EdgeAssertion<'a> {
    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.edge.label.as_deref(),
            Some(expected),
            "Edge {} --> {}: label differs",
            self.edge.from,
            self.edge.to
        );
        self
    }

    pub fn unlabeled(self) -> Self {
        assert_eq!(
            self.edge.label, None,
            "Edge {} --> {}: expected no label",
            self.edge.from, self.edge.to
        );
        self
    }

    pub fn guard(self, expected: &str) -> Self {
        assert_eq!(
            self.edge.guard.as_deref(),
            Some(expected),
            "Edge {} --> {}: guard differs",
            self.edge.from,
            self.edge.to
        );
        self
    }

    pub fn unguarded(self) -> Self {
        assert_eq!(
            self.edge.guard, None,
            "Edge {} --> {}: expected no guard",
            self.edge.from, self.edge.to
        );
        self
    }
}
