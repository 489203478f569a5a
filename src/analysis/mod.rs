// Analysis pipeline for a single Python source unit

pub mod extractor;
pub mod names;
pub mod record;
pub mod relationships;

pub use extractor::{extract, Extraction};
pub use record::*;
pub use relationships::{detect, GLOBAL_SCOPE};

use crate::error::Result;
use crate::parser::PythonParser;
use std::path::Path;

/// Runs the full pipeline: parse, extract structure, detect relationships,
/// aggregate. Owns its parser, so create one `Analyzer` per thread; any
/// number of analyses may run in parallel without coordination.
pub struct Analyzer {
    parser: PythonParser,
}

impl Analyzer {
    /// Create a new analyzer
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: PythonParser::new()?,
        })
    }

    /// Analyze one in-memory source unit
    pub fn analyze_source(&mut self, source: &str) -> Result<AnalysisRecord> {
        let module = self.parser.parse_source(source)?;

        // The two walks are independent reads over the same tree.
        let extraction = extractor::extract(&module);
        let relationships = relationships::detect(&module);

        let summary = Summary::from_counts(
            extraction.classes.len(),
            extraction.functions.len(),
            extraction.imports.len(),
        );

        Ok(AnalysisRecord {
            classes: extraction.classes,
            functions: extraction.functions,
            imports: extraction.imports,
            relationships,
            summary,
        })
    }

    /// Analyze a source file on disk
    pub fn analyze_file(&mut self, path: &Path) -> Result<AnalysisRecord> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            crate::error::Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        self.analyze_source(&source)
    }
}

/// Analyze one source unit with a freshly created analyzer
pub fn analyze_source(source: &str) -> Result<AnalysisRecord> {
    Analyzer::new()?.analyze_source(source)
}
