//! Graph building
//!
//!     Turns classified lines into a graph of nodes and edges.
//!
//!     [ids](ids)          structured node ids, dotted only when rendered
//!     [graph](graph)      the append-only node/edge log
//!     [builder](builder)  the state machine that decides ids and edges per line

pub mod builder;
pub mod graph;
pub mod ids;

pub use builder::{GraphBuilder, DEFAULT_JOIN_LABEL};
pub use graph::{Edge, Element, Graph, Node, Shape};
pub use ids::NodeId;
