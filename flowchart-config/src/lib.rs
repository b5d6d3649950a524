//! Shared configuration loader for the flowchart toolchain.
//!
//! `defaults/flowchart.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`FlowchartConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use flowchart_parser::flow::formats::Envelope;
use flowchart_parser::flow::lexing::Keywords;
use flowchart_parser::FlowLoader;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/flowchart.default.toml");

/// Top-level configuration consumed by flowchart applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowchartConfig {
    pub keywords: KeywordsConfig,
    pub render: RenderConfig,
}

/// Words that give a line its meaning.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsConfig {
    pub condition: String,
    pub outcomes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub format: String,
    pub join_label: String,
    pub mermaid: MermaidConfig,
}

/// The text wrapped around the Mermaid chart body.
#[derive(Debug, Clone, Deserialize)]
pub struct MermaidConfig {
    pub marker: String,
    pub header: String,
}

impl From<&KeywordsConfig> for Keywords {
    fn from(config: &KeywordsConfig) -> Self {
        Keywords {
            condition: config.condition.clone(),
            outcomes: config.outcomes.clone(),
        }
    }
}

impl From<&MermaidConfig> for Envelope {
    fn from(config: &MermaidConfig) -> Self {
        Envelope {
            marker: config.marker.clone(),
            header: config.header.clone(),
        }
    }
}

impl FlowchartConfig {
    /// Configure a loader with these keywords and render settings.
    pub fn apply(&self, loader: FlowLoader) -> FlowLoader {
        loader
            .with_keywords(Keywords::from(&self.keywords))
            .with_envelope(Envelope::from(&self.render.mermaid))
            .with_join_label(self.render.join_label.clone())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags such as `--format`).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<FlowchartConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FlowchartConfig, ConfigError> {
    Loader::new().build()
}
