//! Error types for mdhtml

use thiserror::Error;

use crate::enums::TokenKind;

/// Main error type for mdhtml operations
#[derive(Error, Debug)]
pub enum MdHtmlError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No token pattern matches at the current scan position
    #[error("Lex error at column {column}: no token matches {remaining:?}")]
    Lex {
        /// Byte offset into the line where scanning stopped
        column: usize,
        /// The unmatched rest of the line
        remaining: String,
    },

    /// A grammar rule required a token that was not there
    #[error("Grammar error: expected {expected}, found {}", describe_found(.found))]
    Grammar {
        /// What the rule was looking for
        expected: String,
        /// Kind of the lookahead token, `None` at end of line
        found: Option<TokenKind>,
    },

    /// A bracketed inline construct did not decompose into its parts
    #[error("Malformed {construct}: {text:?}")]
    MalformedInline {
        /// Name of the construct, e.g. `inline link`
        construct: &'static str,
        /// The raw matched text
        text: String,
    },
}

impl MdHtmlError {
    /// True for the three per-line parse failures.
    ///
    /// These never leave the parser in a corrupted state, so a driver may
    /// skip the offending line and keep going.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            MdHtmlError::Lex { .. } | MdHtmlError::Grammar { .. } | MdHtmlError::MalformedInline { .. }
        )
    }
}

fn describe_found(found: &Option<TokenKind>) -> String {
    match found {
        Some(kind) => kind.to_string(),
        None => "end of line".to_string(),
    }
}

/// Result type alias for mdhtml operations
pub type Result<T> = std::result::Result<T, MdHtmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_message() {
        let err = MdHtmlError::Lex {
            column: 5,
            remaining: ", world".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Lex error at column 5: no token matches \", world\""
        );
    }

    #[test]
    fn test_grammar_error_message() {
        let err = MdHtmlError::Grammar {
            expected: "end of line".to_string(),
            found: Some(TokenKind::HeaderMarker),
        };
        assert_eq!(
            err.to_string(),
            "Grammar error: expected end of line, found header_marker"
        );

        let err = MdHtmlError::Grammar {
            expected: "word".to_string(),
            found: None,
        };
        assert_eq!(err.to_string(), "Grammar error: expected word, found end of line");
    }

    #[test]
    fn test_is_parse_error() {
        assert!(MdHtmlError::MalformedInline {
            construct: "inline link",
            text: "[a]".to_string()
        }
        .is_parse_error());
        assert!(!MdHtmlError::Config("bad".to_string()).is_parse_error());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!MdHtmlError::from(io).is_parse_error());
    }
}
