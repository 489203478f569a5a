// Tagged syntax tree for parsed Python source
//
// An owned, serializable subset of the Python syntax: the statement and
// expression shapes the analysis pipeline distinguishes, plus catch-all
// variants that keep nested nodes reachable for traversal. The analysis
// walks never touch tree-sitter types; they match on these variants.

use serde::{Deserialize, Serialize};

/// A parsed source unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub body: Vec<Statement>,
}

impl Module {
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }

    /// Check if the module has any statements
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// A statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Statement {
    ClassDef(ClassDef),
    FunctionDef(FunctionDef),
    Import(Import),
    ImportFrom(ImportFrom),
    /// An assignment; `value` is absent for bare annotations (`x: int`)
    Assign {
        target: Expression,
        value: Option<Expression>,
        line: usize,
    },
    Return {
        value: Option<Expression>,
        line: usize,
    },
    /// An expression statement
    Expr(Expression),
    /// Any other statement (if/for/while/with/try/raise/...): the
    /// expressions it carries directly and the statement blocks nested
    /// under it, kept so the walks stay total over the whole tree.
    Compound {
        exprs: Vec<Expression>,
        body: Vec<Statement>,
        line: usize,
    },
}

/// A class definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassDef {
    pub name: String,
    /// Base-class expressions as written (keyword arguments excluded)
    pub bases: Vec<Expression>,
    pub decorators: Vec<Expression>,
    pub body: Vec<Statement>,
    pub line: usize,
}

/// A function or method definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    /// Named parameters in declaration order (`*args`/`**kwargs` excluded)
    pub params: Vec<String>,
    pub decorators: Vec<Expression>,
    pub body: Vec<Statement>,
    pub line: usize,
}

/// An `import x` statement; one alias per imported module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Import {
    pub names: Vec<ImportAlias>,
    pub line: usize,
}

/// A `from x import y` statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportFrom {
    /// Module path as written, leading dots included for relative imports
    pub module: String,
    pub names: Vec<ImportAlias>,
    pub line: usize,
}

/// One imported name with optional `as` alias
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportAlias {
    pub name: String,
    pub alias: Option<String>,
}

impl ImportAlias {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
        }
    }

    pub fn with_alias(name: &str, alias: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: Some(alias.to_string()),
        }
    }
}

/// An expression
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Expression {
    /// A plain identifier
    Name { id: String, line: usize },
    /// An attribute access (`value.attr`)
    Attribute {
        value: Box<Expression>,
        attr: String,
        line: usize,
    },
    /// A call expression
    Call {
        func: Box<Expression>,
        args: Vec<Expression>,
        line: usize,
    },
    /// Any other expression shape (literal, subscript, operator, ...):
    /// lowered sub-expressions kept so nested calls remain reachable.
    Other {
        children: Vec<Expression>,
        line: usize,
    },
}

impl Expression {
    /// Source line of this expression
    pub fn line(&self) -> usize {
        match self {
            Expression::Name { line, .. }
            | Expression::Attribute { line, .. }
            | Expression::Call { line, .. }
            | Expression::Other { line, .. } => *line,
        }
    }

    pub fn name(id: &str, line: usize) -> Self {
        Expression::Name {
            id: id.to_string(),
            line,
        }
    }

    pub fn attribute(value: Expression, attr: &str, line: usize) -> Self {
        Expression::Attribute {
            value: Box::new(value),
            attr: attr.to_string(),
            line,
        }
    }

    pub fn call(func: Expression, args: Vec<Expression>, line: usize) -> Self {
        Expression::Call {
            func: Box::new(func),
            args,
            line,
        }
    }

    pub fn opaque(children: Vec<Expression>, line: usize) -> Self {
        Expression::Other { children, line }
    }
}
