// Structural extraction: what entities exist in the source
//
// One recursive walk over the tagged tree collecting class, top-level
// function, and import records. The "inside a class body" flag is passed
// down the recursion by value, so nested declarations restore the outer
// context for free and concurrent analyses share nothing.

use crate::analysis::names;
use crate::analysis::record::{ClassRecord, FunctionRecord, ImportRecord};
use crate::parser::{ClassDef, FunctionDef, Module, Statement};

/// Receiver parameter name dropped from method-style signatures
const RECEIVER_PARAM: &str = "self";

/// Everything the extractor finds in one source unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub classes: Vec<ClassRecord>,
    pub functions: Vec<FunctionRecord>,
    pub imports: Vec<ImportRecord>,
}

/// Extract class, function, and import records from a module
pub fn extract(module: &Module) -> Extraction {
    let mut extraction = Extraction::default();
    for stmt in &module.body {
        walk_statement(stmt, false, &mut extraction);
    }
    extraction
}

fn walk_statement(stmt: &Statement, in_class: bool, out: &mut Extraction) {
    match stmt {
        Statement::ClassDef(class) => {
            out.classes.push(class_record(class));
            for nested in &class.body {
                walk_statement(nested, true, out);
            }
        }
        Statement::FunctionDef(func) => {
            // A function anywhere under a class body is a method candidate,
            // even when nested inside another function, and never lands in
            // the top-level list.
            if !in_class {
                out.functions.push(function_record(func));
            }
            for nested in &func.body {
                walk_statement(nested, in_class, out);
            }
        }
        Statement::Import(import) => {
            for alias in &import.names {
                out.imports.push(ImportRecord::Direct {
                    module: alias.name.clone(),
                    alias: alias.alias.clone(),
                });
            }
        }
        Statement::ImportFrom(import) => {
            for alias in &import.names {
                out.imports.push(ImportRecord::From {
                    module: import.module.clone(),
                    name: alias.name.clone(),
                    alias: alias.alias.clone(),
                });
            }
        }
        Statement::Compound { body, .. } => {
            for nested in body {
                walk_statement(nested, in_class, out);
            }
        }
        Statement::Assign { .. } | Statement::Return { .. } | Statement::Expr(_) => {}
    }
}

fn class_record(class: &ClassDef) -> ClassRecord {
    // Methods are the function definitions directly owned by the class
    // body; functions nested deeper belong to their enclosing scope.
    let methods = class
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::FunctionDef(func) => Some(func.name.clone()),
            _ => None,
        })
        .collect();

    let bases = class.bases.iter().map(names::dotted_name).collect();

    ClassRecord {
        name: class.name.clone(),
        methods,
        bases,
        line: class.line,
    }
}

fn function_record(func: &FunctionDef) -> FunctionRecord {
    let mut args = func.params.clone();
    if args.first().map(String::as_str) == Some(RECEIVER_PARAM) {
        args.remove(0);
    }

    FunctionRecord {
        name: func.name.clone(),
        args,
        line: func.line,
    }
}
