//! Human-readable rendering of collected parse errors
//!
//! Errors are grouped by kind (in [`ErrorKind`] order), each group listing its
//! count and a bounded number of example lines.

use std::collections::BTreeMap;

use crate::app::models::{ErrorKind, ParseError};
use crate::constants::{DEFAULT_MAX_ERROR_EXAMPLES, NO_ERRORS_TEXT};

/// Render errors with the default number of examples per kind
pub fn format_errors(errors: &[ParseError]) -> String {
    format_errors_with_limit(errors, DEFAULT_MAX_ERROR_EXAMPLES)
}

/// Render errors with at most `max_examples` example lines per kind
///
/// An empty list renders as exactly `No errors`.
pub fn format_errors_with_limit(errors: &[ParseError], max_examples: usize) -> String {
    if errors.is_empty() {
        return NO_ERRORS_TEXT.to_string();
    }

    let mut groups: BTreeMap<ErrorKind, Vec<&ParseError>> = BTreeMap::new();
    for error in errors {
        groups.entry(error.kind).or_default().push(error);
    }

    let mut lines = vec![format!("Total errors: {}", errors.len())];
    for (kind, group) in &groups {
        lines.push(String::new());
        lines.push(format!("{} errors ({}):", capitalize(kind.as_str()), group.len()));
        for error in group.iter().take(max_examples) {
            lines.push(format!("  {}", error));
        }
        if group.len() > max_examples {
            lines.push(format!("  ...and {} more", group.len() - max_examples));
        }
    }

    lines.join("\n")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
