//! Output formats
//!
//!     mermaid     The flowchart text, wrapped in the `code: mmd` envelope (default)
//!     json        The raw node and edge lists
//!
//! Formatters only serialize; every decision about nodes and edges was made by the builder.

pub mod json;
pub mod mermaid;
pub mod registry;

pub use mermaid::Envelope;
pub use registry::{FormatError, FormatRegistry, Formatter};

use crate::flow::building::Graph;

/// Formatter for the Mermaid flowchart text
#[derive(Debug, Clone)]
pub struct MermaidFormatter {
    envelope: Envelope,
}

impl MermaidFormatter {
    pub fn new(envelope: Envelope) -> Self {
        MermaidFormatter { envelope }
    }
}

impl Formatter for MermaidFormatter {
    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn description(&self) -> &'static str {
        "Mermaid flowchart text inside the envelope (default)"
    }

    fn serialize(&self, graph: &Graph) -> Result<String, FormatError> {
        Ok(mermaid::render(graph, &self.envelope))
    }
}

/// Formatter for the JSON node/edge lists
#[derive(Debug, Clone, Copy)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "Node and edge lists as pretty-printed JSON"
    }

    fn serialize(&self, graph: &Graph) -> Result<String, FormatError> {
        json::render(graph)
    }
}
