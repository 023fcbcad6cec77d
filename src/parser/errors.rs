//! Diagnostic list for the parser
//!
//! The parser never aborts on bad input. Every lexical, syntactic and
//! (minimal) semantic problem is appended here as an [`Error`] and parsing
//! carries on; a non-empty [`ErrorList`] is the caller's only signal that
//! the returned AST should not be trusted.

use super::position::Position;
use std::fmt;

/// Number of diagnostics shown before the "more not shown" summary.
pub const MAX_REPORTED: usize = 10;

/// One diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub position: Position,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.position, self.message)
    }
}

impl std::error::Error for Error {}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList {
    errors: Vec<Error>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, position: Position, message: impl Into<String>) {
        self.errors.push(Error {
            position,
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter()
    }

    /// Drop every diagnostic that sits at the same position as the one
    /// directly before it.
    pub fn dedup(&mut self) {
        self.errors.dedup_by(|later, earlier| later.position == earlier.position);
    }

    /// Render the deduplicated list, one diagnostic per line, listing at
    /// most `limit` entries followed by a summary of the rest.
    pub fn render(&self, limit: usize) -> String {
        let mut list = self.clone();
        list.dedup();

        let mut out = String::new();
        for (i, err) in list.iter().enumerate() {
            if i >= limit {
                out.push_str(&format!(
                    "More than {} errors, {} more not shown\n",
                    limit,
                    list.len() - limit
                ));
                break;
            }
            out.push_str(&format!("{}\n", err));
        }
        out
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(MAX_REPORTED))
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, column: usize) -> Position {
        Position {
            filename: String::new(),
            line,
            column,
        }
    }

    #[test]
    fn test_error_format() {
        let mut list = ErrorList::new();
        list.add(at(3, 7), "expected ';', found '}'");
        assert_eq!(list.to_string(), "3:7 expected ';', found '}'\n");

        let named = Error {
            position: Position {
                filename: "a.sc".into(),
                line: 1,
                column: 2,
            },
            message: "oops".into(),
        };
        assert_eq!(named.to_string(), "a.sc:1:2 oops");
    }

    #[test]
    fn test_dedup_keeps_first_of_consecutive_duplicates() {
        let mut list = ErrorList::new();
        list.add(at(1, 1), "first");
        list.add(at(1, 1), "second");
        list.add(at(2, 1), "third");
        list.add(at(1, 1), "fourth");
        list.dedup();

        let messages: Vec<&str> = list.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "third", "fourth"]);
    }

    #[test]
    fn test_listing_is_capped() {
        let mut list = ErrorList::new();
        for line in 1..=13 {
            list.add(at(line, 1), format!("error {line}"));
        }

        let rendered = list.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), MAX_REPORTED + 1);
        assert_eq!(lines[0], "1:1 error 1");
        assert_eq!(lines[9], "10:1 error 10");
        assert_eq!(lines[10], "More than 10 errors, 3 more not shown");
        // Rendering does not mutate the list itself.
        assert_eq!(list.len(), 13);
    }

    #[test]
    fn test_render_with_custom_limit() {
        let mut list = ErrorList::new();
        for line in 1..=4 {
            list.add(at(line, 1), "e");
        }
        assert_eq!(
            list.render(2),
            "1:1 e\n2:1 e\nMore than 2 errors, 2 more not shown\n"
        );
        assert_eq!(list.render(4).lines().count(), 4);
    }
}
