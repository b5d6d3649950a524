//! Script loading utilities
//!
//! This module provides [FlowLoader], which loads a script from a file or a string and runs
//! the pipeline on it: lexing, then classification and building interleaved line by line,
//! then an output format. It is used by the CLI and by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use flowchart_parser::flow::loader::FlowLoader;
//!
//! let chart = FlowLoader::from_path("curry.flow")?.render()?;
//! let graph = FlowLoader::from_string("a\nb\n").build()?;
//! let json = FlowLoader::from_string("a\nb\n").render_as("json")?;
//! ```

use crate::flow::building::{Graph, GraphBuilder, DEFAULT_JOIN_LABEL};
use crate::flow::error::ConvertError;
use crate::flow::formats::{mermaid, Envelope, FormatError, FormatRegistry};
use crate::flow::lexing::{self, classify_line, ClassifiedLine, Keywords};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error that can occur when loading and converting scripts
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Script loader with pipeline shortcuts
#[derive(Debug, Clone)]
pub struct FlowLoader {
    source: String,
    keywords: Keywords,
    envelope: Envelope,
    join_label: String,
}

impl FlowLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(Self::from_string(source))
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        FlowLoader {
            source: source.into(),
            keywords: Keywords::default(),
            envelope: Envelope::default(),
            join_label: DEFAULT_JOIN_LABEL.to_string(),
        }
    }

    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_join_label(mut self, label: impl Into<String>) -> Self {
        self.join_label = label.into();
        self
    }

    /// Run the pipeline, handing every classified line to `visit` before it is built.
    fn run(&self, mut visit: impl FnMut(&ClassifiedLine)) -> Result<Graph, ConvertError> {
        let lines = lexing::lex(&self.source);
        info!(lines = lines.len(), "converting script");

        let mut builder = GraphBuilder::new().with_join_label(self.join_label.clone());
        for line in &lines {
            classify_line(line, &builder.classify_context(), &self.keywords)
                .and_then(|classified| {
                    debug!(line = classified.number, kind = ?classified.kind, "classified");
                    visit(&classified);
                    builder.process(classified)
                })
                .map_err(|err| {
                    warn!(line = err.line(), "conversion aborted");
                    err
                })?;
        }

        Ok(builder.finish())
    }

    /// Classify every line, in order
    pub fn classify(&self) -> Result<Vec<ClassifiedLine>, ConvertError> {
        let mut classified = Vec::new();
        self.run(|line| classified.push(line.clone()))?;
        Ok(classified)
    }

    /// Build the graph
    pub fn build(&self) -> Result<Graph, ConvertError> {
        self.run(|_| {})
    }

    /// Build and render as Mermaid
    pub fn render(&self) -> Result<String, ConvertError> {
        let graph = self.build()?;
        Ok(mermaid::render(&graph, &self.envelope))
    }

    /// Build and render with a named format.
    ///
    /// The format is checked before the script is converted, so an unknown format is
    /// reported even for a malformed script.
    pub fn render_as(&self, format: &str) -> Result<String, LoaderError> {
        let registry = FormatRegistry::new(self.envelope.clone());
        let formatter = registry.lookup(format)?;
        let graph = self.build()?;
        Ok(formatter.serialize(&graph)?)
    }
}

/// Convert a script to Mermaid text with the default keywords and envelope.
pub fn convert(source: &str) -> Result<String, ConvertError> {
    FlowLoader::from_string(source).render()
}
