//! CodeViz - analyze Python source structure and generate Mermaid diagrams
//!
//! Parses one Python source unit with tree-sitter, extracts its classes,
//! top-level functions, and imports, detects inheritance and call
//! relationships, and renders the results as Mermaid diagram text and a
//! natural-language summary. Exposed as a library, a CLI, and a small
//! HTTP API.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod server;

// Re-export main types
pub use analysis::{analyze_source, AnalysisRecord, Analyzer};
pub use config::Config;
pub use error::{Error, Result};
