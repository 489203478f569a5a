// Relationship detection: how entities connect
//
// A second, independent walk over the same tagged tree. The current
// enclosing class name is threaded through the recursion by value; the
// extractor and this walk share no state and may run in either order.

use crate::analysis::names;
use crate::analysis::record::{CallEdge, InheritanceEdge, Relationships};
use crate::parser::{Expression, Module, Statement};

/// Caller scope recorded for calls outside any class body
pub const GLOBAL_SCOPE: &str = "global";

/// Detect inheritance and call edges in a module
pub fn detect(module: &Module) -> Relationships {
    let mut relationships = Relationships::default();
    for stmt in &module.body {
        walk_statement(stmt, None, &mut relationships);
    }
    relationships
}

fn walk_statement(stmt: &Statement, current_class: Option<&str>, out: &mut Relationships) {
    match stmt {
        Statement::ClassDef(class) => {
            for base in &class.bases {
                let parent = names::dotted_name(base);
                if !names::is_unknown(&parent) {
                    out.inheritance.push(InheritanceEdge {
                        child: class.name.clone(),
                        parent,
                        line: class.line,
                    });
                }
            }
            // Decorators and base expressions can contain calls; they are
            // attributed to the class itself, matching visit order in the
            // scope tracking: the class context is entered before its
            // children are visited.
            for decorator in &class.decorators {
                walk_expression(decorator, Some(&class.name), out);
            }
            for base in &class.bases {
                walk_expression(base, Some(&class.name), out);
            }
            for nested in &class.body {
                walk_statement(nested, Some(&class.name), out);
            }
        }
        Statement::FunctionDef(func) => {
            for decorator in &func.decorators {
                walk_expression(decorator, current_class, out);
            }
            for nested in &func.body {
                walk_statement(nested, current_class, out);
            }
        }
        Statement::Assign { target, value, .. } => {
            walk_expression(target, current_class, out);
            if let Some(value) = value {
                walk_expression(value, current_class, out);
            }
        }
        Statement::Return { value, .. } => {
            if let Some(value) = value {
                walk_expression(value, current_class, out);
            }
        }
        Statement::Expr(expr) => {
            walk_expression(expr, current_class, out);
        }
        Statement::Compound { exprs, body, .. } => {
            for expr in exprs {
                walk_expression(expr, current_class, out);
            }
            for nested in body {
                walk_statement(nested, current_class, out);
            }
        }
        Statement::Import(_) | Statement::ImportFrom(_) => {}
    }
}

fn walk_expression(expr: &Expression, current_class: Option<&str>, out: &mut Relationships) {
    match expr {
        Expression::Call { func, args, line } => {
            let callee = match func.as_ref() {
                Expression::Name { id, .. } => id.clone(),
                Expression::Attribute { .. } => names::dotted_name(func),
                _ => names::UNKNOWN.to_string(),
            };
            // Unresolvable targets are dropped, not recorded as degraded
            // edges.
            if !names::is_unknown(&callee) {
                out.calls.push(CallEdge {
                    from_scope: current_class.unwrap_or(GLOBAL_SCOPE).to_string(),
                    to: callee,
                    line: *line,
                });
            }
            // Nested calls in the target or the arguments still count.
            walk_expression(func, current_class, out);
            for arg in args {
                walk_expression(arg, current_class, out);
            }
        }
        Expression::Attribute { value, .. } => {
            walk_expression(value, current_class, out);
        }
        Expression::Other { children, .. } => {
            for child in children {
                walk_expression(child, current_class, out);
            }
        }
        Expression::Name { .. } => {}
    }
}
