//! Output format lookup
//!
//! A [FormatRegistry] holds one [Formatter] per output format, in a fixed order, and is
//! built for a given Mermaid [Envelope] so the mermaid format always renders with the
//! caller's marker and header. `--format` on the command line is a lookup by name.

use super::{Envelope, JsonFormatter, MermaidFormatter};
use crate::flow::building::Graph;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown format '{name}' (available: {available})")]
    UnknownFormat { name: String, available: String },
    #[error("cannot serialize graph: {0}")]
    Serialization(String),
}

/// One output format
pub trait Formatter: Send + Sync {
    fn name(&self) -> &'static str;

    /// One-line summary shown by `--list-formats`
    fn description(&self) -> &'static str;

    fn serialize(&self, graph: &Graph) -> Result<String, FormatError>;
}

/// The output formats available for one rendering setup
pub struct FormatRegistry {
    formatters: Vec<Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Mermaid (first, the default) and JSON, with mermaid wrapped in `envelope`
    pub fn new(envelope: Envelope) -> Self {
        FormatRegistry {
            formatters: vec![
                Box::new(MermaidFormatter::new(envelope)),
                Box::new(JsonFormatter),
            ],
        }
    }

    /// Find a format by name
    pub fn lookup(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formatters
            .iter()
            .find(|f| f.name() == name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::UnknownFormat {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    pub fn serialize(&self, graph: &Graph, name: &str) -> Result<String, FormatError> {
        self.lookup(name)?.serialize(graph)
    }

    /// `(name, description)` of every format, default first
    pub fn formats(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.formatters.iter().map(|f| (f.name(), f.description()))
    }

    fn names(&self) -> Vec<&'static str> {
        self.formats().map(|(name, _)| name).collect()
    }
}
