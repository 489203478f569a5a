// Parser module: tree-sitter front-end and the tagged syntax tree

pub mod ast;
mod python;

pub use ast::*;
pub use python::PythonParser;
