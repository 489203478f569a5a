// Dotted-name resolution, shared by the extractor and the relationship
// detector.

use crate::parser::Expression;

/// Sentinel returned for expressions that are not a pure name/attribute path
pub const UNKNOWN: &str = "unknown";

/// Resolve an expression to a dotted name.
///
/// A plain identifier resolves to itself; an attribute access resolves to
/// `<resolved-base>.<attr>`, recursively. Any other shape along the chain
/// (a call, subscript, literal, ...) makes the whole chain resolve to the
/// [`UNKNOWN`] sentinel. Never fails; attribute chains are finite so the
/// recursion always terminates.
pub fn dotted_name(expr: &Expression) -> String {
    match expr {
        Expression::Name { id, .. } => id.clone(),
        Expression::Attribute { value, attr, .. } => {
            let base = dotted_name(value);
            if base == UNKNOWN {
                UNKNOWN.to_string()
            } else {
                format!("{}.{}", base, attr)
            }
        }
        Expression::Call { .. } | Expression::Other { .. } => UNKNOWN.to_string(),
    }
}

/// Check a resolved name for the unknown sentinel
pub fn is_unknown(name: &str) -> bool {
    name == UNKNOWN
}
