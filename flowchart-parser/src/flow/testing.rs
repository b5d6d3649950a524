//! Testing utilities for graph assertions
//!
//!     Graph tests should not walk [Graph](crate::flow::building::Graph) by hand. Element
//!     vectors and id paths are implementation details; a test that indexes into them breaks
//!     the moment the builder emits things in a slightly different order, even when the
//!     chart is still right.
//!
//!     Instead, tests state what the chart must look like through [assert_graph]: which
//!     nodes exist with which labels and shapes, which edges connect them, and in what order
//!     a node's incoming edges were drawn. Ids are given in their dotted text form, the same
//!     one users see in the rendered output.
//!
//!     Scripts used by more than one test live under `tests/fixtures/` and are loaded with
//!     [fixture], so a change to the script syntax is fixed in one place.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use flowchart_parser::flow::testing::assert_graph;
//!
//!     let graph = FlowLoader::from_string("a\nif b\n yes c\n no d\ne").build().unwrap();
//!
//!     assert_graph(&graph)
//!         .node_count(5)
//!         .node("2", |n| n.label("b").decision().outgoing_count(2))
//!         .edge("2", "3", |e| e.label("yes"))
//!         .node("5", |n| n.predecessors(&["3", "4"]));
//!     ```

mod graph_assertions;

pub use graph_assertions::{assert_graph, EdgeAssertion, GraphAssertion, NodeAssertion};

use std::fs;
use std::path::PathBuf;

/// Path of a script under `tests/fixtures/`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Source of a script under `tests/fixtures/`
///
/// Panics if the fixture is missing; this is only meant for tests.
pub fn fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {}", path.display(), e))
}
