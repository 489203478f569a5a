// Python front-end using tree-sitter
//
// Parses source text with the tree-sitter Python grammar and lowers the
// concrete tree into the tagged syntax tree in `parser::ast`. Everything
// downstream consumes only the tagged tree.

use crate::error::{Error, Result};
use crate::parser::ast::*;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parser for Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::parser(format!("Failed to set Python language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Parse a Python file
    pub fn parse_file(&mut self, path: &Path) -> Result<Module> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        self.parse_source(&source)
    }

    /// Parse Python source code into a tagged syntax tree
    ///
    /// A source whose parse contains error nodes is rejected here, so the
    /// analysis walks only ever see a grammatically valid tree.
    pub fn parse_source(&mut self, source: &str) -> Result<Module> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parser("Failed to parse source"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(Error::parser("source contains syntax errors"));
        }

        Ok(Module::new(lower_block(&root, source.as_bytes())))
    }
}

/// Lower every statement in a module or block node
fn lower_block(node: &Node, source: &[u8]) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(stmt) = lower_statement(&child, source) {
            statements.push(stmt);
        }
    }
    statements
}

/// Lower a single statement node; unknown shapes yield fewer records,
/// never an error
fn lower_statement(node: &Node, source: &[u8]) -> Option<Statement> {
    match node.kind() {
        "import_statement" => lower_import(node, source),
        "import_from_statement" | "future_import_statement" => lower_import_from(node, source),
        "class_definition" => lower_class(node, source, Vec::new()),
        "function_definition" => lower_function(node, source, Vec::new()),
        "decorated_definition" => lower_decorated(node, source),
        "expression_statement" => lower_expression_statement(node, source),
        "return_statement" => {
            let line = node.start_position().row + 1;
            let mut cursor = node.walk();
            let value = node
                .named_children(&mut cursor)
                .find_map(|child| lower_expression(&child, source));
            Some(Statement::Return { value, line })
        }
        "comment" => None,
        _ => {
            // if/for/while/with/try/raise/... : keep header expressions and
            // nested blocks so both analysis walks reach everything inside
            let line = node.start_position().row + 1;
            let mut exprs = Vec::new();
            let mut body = Vec::new();
            collect_compound(node, source, &mut exprs, &mut body);
            if exprs.is_empty() && body.is_empty() {
                None
            } else {
                Some(Statement::Compound { exprs, body, line })
            }
        }
    }
}

/// Gather the expressions and nested statement blocks of a compound
/// statement, descending through elif/else/except/finally/with clauses
fn collect_compound(node: &Node, source: &[u8], exprs: &mut Vec<Expression>, body: &mut Vec<Statement>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "block" {
            body.extend(lower_block(&child, source));
        } else if child.kind().ends_with("_clause") {
            collect_compound(&child, source, exprs, body);
        } else if let Some(expr) = lower_expression(&child, source) {
            exprs.push(expr);
        }
    }
}

/// Lower an import statement: `import x` or `import x as y`
fn lower_import(node: &Node, source: &[u8]) -> Option<Statement> {
    let line = node.start_position().row + 1;
    let mut names = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "dotted_name" => {
                if let Ok(text) = child.utf8_text(source) {
                    names.push(ImportAlias::new(text));
                }
            }
            "aliased_import" => {
                if let Some(alias) = lower_aliased_import(&child, source) {
                    names.push(alias);
                }
            }
            _ => {}
        }
    }

    if names.is_empty() {
        return None;
    }
    Some(Statement::Import(Import { names, line }))
}

/// Lower an import-from statement: `from x import y, z as w`
fn lower_import_from(node: &Node, source: &[u8]) -> Option<Statement> {
    let line = node.start_position().row + 1;
    let mut module = if node.kind() == "future_import_statement" {
        "__future__".to_string()
    } else {
        String::new()
    };
    let mut names = Vec::new();
    let mut seen_import_keyword = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import" => {
                seen_import_keyword = true;
            }
            "dotted_name" => {
                if let Ok(text) = child.utf8_text(source) {
                    if !seen_import_keyword {
                        module = text.to_string();
                    } else {
                        names.push(ImportAlias::new(text));
                    }
                }
            }
            "relative_import" => {
                // module path as written, leading dots included
                if let Ok(text) = child.utf8_text(source) {
                    module = text.to_string();
                }
            }
            "aliased_import" => {
                if let Some(alias) = lower_aliased_import(&child, source) {
                    names.push(alias);
                }
            }
            "wildcard_import" => {
                names.push(ImportAlias::new("*"));
            }
            _ => {}
        }
    }

    if names.is_empty() {
        return None;
    }
    Some(Statement::ImportFrom(ImportFrom {
        module,
        names,
        line,
    }))
}

/// Lower an `x as y` clause
fn lower_aliased_import(node: &Node, source: &[u8]) -> Option<ImportAlias> {
    let mut name = String::new();
    let mut alias = None;

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "dotted_name" => {
                name = child.utf8_text(source).ok()?.to_string();
            }
            "identifier" => {
                if name.is_empty() {
                    name = child.utf8_text(source).ok()?.to_string();
                } else {
                    alias = Some(child.utf8_text(source).ok()?.to_string());
                }
            }
            _ => {}
        }
    }

    if name.is_empty() {
        return None;
    }
    Some(ImportAlias { name, alias })
}

/// Lower a class definition
fn lower_class(node: &Node, source: &[u8], decorators: Vec<Expression>) -> Option<Statement> {
    let line = node.start_position().row + 1;
    let mut name = String::new();
    let mut bases = Vec::new();
    let mut body = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                if name.is_empty() {
                    name = child.utf8_text(source).ok()?.to_string();
                }
            }
            "argument_list" => {
                bases = lower_bases(&child, source);
            }
            "block" => {
                body = lower_block(&child, source);
            }
            _ => {}
        }
    }

    if name.is_empty() {
        return None;
    }
    Some(Statement::ClassDef(ClassDef {
        name,
        bases,
        decorators,
        body,
        line,
    }))
}

/// Extract base-class expressions from the superclass argument list;
/// keyword arguments (metaclass=...) are not bases
fn lower_bases(node: &Node, source: &[u8]) -> Vec<Expression> {
    let mut bases = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "keyword_argument" {
            continue;
        }
        if let Some(expr) = lower_expression(&child, source) {
            bases.push(expr);
        }
    }
    bases
}

/// Lower a function definition
fn lower_function(node: &Node, source: &[u8], decorators: Vec<Expression>) -> Option<Statement> {
    let line = node.start_position().row + 1;
    let mut name = String::new();
    let mut params = Vec::new();
    let mut body = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                if name.is_empty() {
                    name = child.utf8_text(source).ok()?.to_string();
                }
            }
            "parameters" => {
                params = lower_parameters(&child, source);
            }
            "block" => {
                body = lower_block(&child, source);
            }
            _ => {}
        }
    }

    if name.is_empty() {
        return None;
    }
    Some(Statement::FunctionDef(FunctionDef {
        name,
        params,
        decorators,
        body,
        line,
    }))
}

/// Lower a decorated class or function definition
fn lower_decorated(node: &Node, source: &[u8]) -> Option<Statement> {
    let mut decorators = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "decorator" => {
                let mut inner_cursor = child.walk();
                let expr = child
                    .named_children(&mut inner_cursor)
                    .find_map(|inner| lower_expression(&inner, source));
                if let Some(expr) = expr {
                    decorators.push(expr);
                }
            }
            "class_definition" => return lower_class(&child, source, decorators),
            "function_definition" => return lower_function(&child, source, decorators),
            _ => {}
        }
    }
    None
}

/// Extract parameter names in declaration order; `*args`/`**kwargs` are
/// not recorded
fn lower_parameters(node: &Node, source: &[u8]) -> Vec<String> {
    let mut params = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                if let Ok(text) = child.utf8_text(source) {
                    params.push(text.to_string());
                }
            }
            "typed_parameter" | "default_parameter" | "typed_default_parameter" => {
                let mut inner_cursor = child.walk();
                let name = child
                    .named_children(&mut inner_cursor)
                    .find(|inner| inner.kind() == "identifier");
                if let Some(name) = name {
                    if let Ok(text) = name.utf8_text(source) {
                        params.push(text.to_string());
                    }
                }
            }
            _ => {}
        }
    }
    params
}

/// Lower an expression statement: a plain expression or an assignment
fn lower_expression_statement(node: &Node, source: &[u8]) -> Option<Statement> {
    let mut cursor = node.walk();
    let child = node.named_children(&mut cursor).next()?;

    match child.kind() {
        "assignment" | "augmented_assignment" => {
            let line = child.start_position().row + 1;
            let target = child
                .child_by_field_name("left")
                .and_then(|left| lower_expression(&left, source))
                .unwrap_or_else(|| Expression::opaque(vec![], line));
            let value = child
                .child_by_field_name("right")
                .and_then(|right| lower_expression(&right, source));
            Some(Statement::Assign {
                target,
                value,
                line,
            })
        }
        _ => lower_expression(&child, source).map(Statement::Expr),
    }
}

/// Lower an expression node
///
/// Names, attribute accesses, and calls keep their shape; every other
/// expression becomes an opaque node carrying its lowered sub-expressions.
fn lower_expression(node: &Node, source: &[u8]) -> Option<Expression> {
    let line = node.start_position().row + 1;

    match node.kind() {
        "identifier" => {
            let id = node.utf8_text(source).ok()?.to_string();
            Some(Expression::Name { id, line })
        }
        "attribute" => {
            let value = node
                .child_by_field_name("object")
                .and_then(|object| lower_expression(&object, source))
                .unwrap_or_else(|| Expression::opaque(vec![], line));
            let attr = node
                .child_by_field_name("attribute")?
                .utf8_text(source)
                .ok()?
                .to_string();
            Some(Expression::Attribute {
                value: Box::new(value),
                attr,
                line,
            })
        }
        "call" => {
            let func = node
                .child_by_field_name("function")
                .and_then(|function| lower_expression(&function, source))
                .unwrap_or_else(|| Expression::opaque(vec![], line));
            let args = node
                .child_by_field_name("arguments")
                .map(|arguments| lower_arguments(&arguments, source))
                .unwrap_or_default();
            Some(Expression::Call {
                func: Box::new(func),
                args,
                line,
            })
        }
        "parenthesized_expression" => {
            let mut cursor = node.walk();
            let result = node
                .named_children(&mut cursor)
                .find_map(|inner| lower_expression(&inner, source));
            result
        }
        "comment" => None,
        _ => {
            if !node.is_named() {
                return None;
            }
            let mut children = Vec::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if let Some(expr) = lower_expression(&child, source) {
                    children.push(expr);
                }
            }
            Some(Expression::Other { children, line })
        }
    }
}

/// Lower call arguments; keyword arguments contribute their value
fn lower_arguments(node: &Node, source: &[u8]) -> Vec<Expression> {
    if node.kind() != "argument_list" {
        // e.g. a bare generator expression argument
        return lower_expression(node, source).into_iter().collect();
    }

    let mut args = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "keyword_argument" {
            if let Some(expr) = child
                .child_by_field_name("value")
                .and_then(|value| lower_expression(&value, source))
            {
                args.push(expr);
            }
        } else if let Some(expr) = lower_expression(&child, source) {
            args.push(expr);
        }
    }
    args
}
