// Mermaid diagram generation
//
// Pure textual projections of the analysis record. Input order is
// preserved and nothing is deduplicated or layouted: a duplicate class or
// edge in the input appears twice in the output.

use crate::analysis::record::{ClassRecord, ImportRecord, InheritanceEdge};
use std::collections::HashSet;

/// Node used in the dependency graph when the source declares no classes
const FALLBACK_NODE: &str = "App";

/// Render a Mermaid `classDiagram`: one block per class listing its methods
/// as zero-argument members, then one relation line per inheritance edge.
pub fn render_class_diagram(classes: &[ClassRecord], inheritance: &[InheritanceEdge]) -> String {
    let mut lines = vec!["classDiagram".to_string()];

    for class in classes {
        lines.push(format!("    class {} {{", class.name));
        for method in &class.methods {
            lines.push(format!("        +{}()", method));
        }
        lines.push("    }".to_string());
    }

    // Parent <|-- Child reads "Child inherits Parent"
    for edge in inheritance {
        lines.push(format!("    {} <|-- {}", edge.parent, edge.child));
    }

    lines.join("\n")
}

/// Render a Mermaid `graph TD` connecting every class to every imported
/// top-level module.
///
/// This is deliberately a complete bipartite projection, not a per-class
/// usage graph. When there are no classes but there are modules, a
/// synthetic `App` node keeps the graph from being vacuous.
pub fn render_dependency_graph(classes: &[ClassRecord], imports: &[ImportRecord]) -> String {
    let mut lines = vec!["graph TD".to_string()];
    let modules = top_level_modules(imports);

    for class in classes {
        for module in &modules {
            lines.push(format!("    {} --> {}[{}]", class.name, module, module));
        }
    }

    if classes.is_empty() {
        for module in &modules {
            lines.push(format!("    {} --> {}[{}]", FALLBACK_NODE, module, module));
        }
    }

    lines.join("\n")
}

/// Distinct top-level module names in first-seen order.
///
/// The top-level name is the first dot-separated segment of the module
/// path; blank segments (empty modules, relative imports written with
/// leading dots) contribute nothing.
pub fn top_level_modules(imports: &[ImportRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut modules = Vec::new();

    for import in imports {
        let top_level = import.module().split('.').next().unwrap_or("");
        if top_level.is_empty() {
            continue;
        }
        if seen.insert(top_level.to_string()) {
            modules.push(top_level.to_string());
        }
    }

    modules
}
