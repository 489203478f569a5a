// Natural-language summary of an analysis record

use crate::analysis::record::AnalysisRecord;
use std::collections::HashSet;

/// At most this many distinct module names are listed in the summary
const MAX_LISTED_MODULES: usize = 5;

/// Score below which a source unit counts as simple
const SIMPLE_BELOW: usize = 5;
/// Score below which a source unit counts as moderate; at or above it is
/// complex
const MODERATE_BELOW: usize = 15;

/// Classify a complexity score into its band
pub fn complexity_band(score: usize) -> &'static str {
    if score < SIMPLE_BELOW {
        "simple"
    } else if score < MODERATE_BELOW {
        "moderate"
    } else {
        "complex"
    }
}

/// Render a short paragraph describing the analyzed source: entity counts,
/// inheritance, key dependencies, and the complexity classification.
pub fn render_summary(record: &AnalysisRecord) -> String {
    let mut sentences = vec![format!(
        "This file contains {} class(es) and {} top-level function(s).",
        record.summary.total_classes, record.summary.total_functions
    )];

    if !record.relationships.inheritance.is_empty() {
        let pairs: Vec<String> = record
            .relationships
            .inheritance
            .iter()
            .map(|edge| format!("{} extends {}", edge.child, edge.parent))
            .collect();
        sentences.push(format!("Inheritance: {}.", pairs.join(", ")));
    }

    if !record.imports.is_empty() {
        let modules = distinct_modules(record);
        if !modules.is_empty() {
            sentences.push(format!("Key dependencies: {}.", modules.join(", ")));
        }
    }

    let score = record.summary.complexity_score;
    sentences.push(format!(
        "Overall complexity: {} (score: {}).",
        complexity_band(score),
        score
    ));

    sentences.join(" ")
}

/// Distinct full module names in first-seen order, capped for readability
fn distinct_modules(record: &AnalysisRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut modules = Vec::new();

    for import in &record.imports {
        let module = import.module();
        if module.is_empty() {
            continue;
        }
        if seen.insert(module.to_string()) {
            modules.push(module.to_string());
        }
        if modules.len() == MAX_LISTED_MODULES {
            break;
        }
    }

    modules
}
