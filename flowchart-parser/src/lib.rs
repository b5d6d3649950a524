//! # flowchart-parser
//!
//! Converts indentation-driven procedure scripts (recipes, runbooks, checklists) into
//! flowchart definitions.
//!
//! File Layout
//!
//!     src/flow
//!       ├── lexing      Tokenization, line grouping and line classification
//!       ├── building    Graph model and the builder state machine
//!       ├── formats     Output formats (mermaid, json)
//!       ├── loader      Convenience entry points tying the stages together
//!       └── testing     Fluent assertions over built graphs
//!
//!     The stages run in that order and each one only consumes the previous stage's output,
//!     so every stage can be tested in isolation.
//!
//! For most callers [`convert`] is all that is needed:
//!
//!     ```rust,ignore
//!     let chart = flowchart_parser::convert("buy\nif hungry\n yes eat\n no wait\nclean")?;
//!     ```

pub mod flow;

pub use flow::error::ConvertError;
pub use flow::loader::{convert, FlowLoader};
