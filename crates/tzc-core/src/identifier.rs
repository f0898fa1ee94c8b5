//! SQL identifier validation.
//!
//! Table and column names come from `information_schema`, the schema name from
//! the command line. Either way they are interpolated into statement text, so
//! they are checked first and then emitted backtick-quoted.

use crate::errors::CoreError;

/// Check that `name` is safe to interpolate as a quoted MySQL identifier.
///
/// Rejects empty names and names containing whitespace, control characters,
/// quotes (`'`, `"`, `` ` ``), backslashes, or statement terminators.
///
/// # Errors
///
/// Returns `CoreError::InvalidIdentifier` naming the first offending rule.
pub fn validate_identifier(name: &str) -> Result<(), CoreError> {
    let reject = |reason| {
        Err(CoreError::InvalidIdentifier {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return reject("identifier is empty");
    }

    for c in name.chars() {
        match c {
            c if c.is_whitespace() => return reject("contains whitespace"),
            c if c.is_control() => return reject("contains a control character"),
            '\'' | '"' | '`' => return reject("contains a quote character"),
            '\\' => return reject("contains a backslash"),
            ';' => return reject("contains a statement terminator"),
            _ => {}
        }
    }

    Ok(())
}

/// Quote an identifier with backticks. Callers validate first.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("`{name}`")
}
