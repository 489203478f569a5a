// Output data model for a single-file analysis
//
// These types are the stable serialized surface consumed by clients; field
// names and the `type` tag on imports must not change.

use serde::{Deserialize, Serialize};

/// A class found in the source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRecord {
    /// Class name; duplicate declarations stay as separate records
    pub name: String,
    /// Method names in declaration order (direct children of the class body)
    pub methods: Vec<String>,
    /// Declared base names as resolved text; may contain the "unknown"
    /// sentinel for bases that are not plain name/attribute paths
    pub bases: Vec<String>,
    /// Source line number
    pub line: usize,
}

/// A top-level function found in the source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionRecord {
    pub name: String,
    /// Parameter names; a leading `self` receiver is dropped
    pub args: Vec<String>,
    pub line: usize,
}

/// One imported module or symbol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ImportRecord {
    /// `import x` / `import x as y`
    #[serde(rename = "import")]
    Direct { module: String, alias: Option<String> },
    /// `from x import y` / `from x import y as z`
    #[serde(rename = "from_import")]
    From {
        module: String,
        name: String,
        alias: Option<String>,
    },
}

impl ImportRecord {
    /// The module path this record refers to, as written in the source
    pub fn module(&self) -> &str {
        match self {
            ImportRecord::Direct { module, .. } => module,
            ImportRecord::From { module, .. } => module,
        }
    }
}

/// A declared-inheritance edge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InheritanceEdge {
    pub child: String,
    pub parent: String,
    pub line: usize,
}

/// A call edge from an enclosing scope to a textually resolved callee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallEdge {
    /// Enclosing class name, or "global" at module scope
    #[serde(rename = "from")]
    pub from_scope: String,
    pub to: String,
    pub line: usize,
}

/// Inheritance and call edges of one source unit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Relationships {
    pub inheritance: Vec<InheritanceEdge>,
    pub calls: Vec<CallEdge>,
}

/// Aggregate counts and the derived complexity score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total_classes: usize,
    pub total_functions: usize,
    pub total_imports: usize,
    pub complexity_score: usize,
}

impl Summary {
    /// Build the summary from entity counts. The complexity score is always
    /// `2 * classes + functions`; methods contribute nothing beyond what the
    /// class count already encodes.
    pub fn from_counts(classes: usize, functions: usize, imports: usize) -> Self {
        Self {
            total_classes: classes,
            total_functions: functions,
            total_imports: imports,
            complexity_score: 2 * classes + functions,
        }
    }
}

/// The complete analysis of one source unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRecord {
    pub classes: Vec<ClassRecord>,
    pub functions: Vec<FunctionRecord>,
    pub imports: Vec<ImportRecord>,
    pub relationships: Relationships,
    pub summary: Summary,
}
