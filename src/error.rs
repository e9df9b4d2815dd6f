//! Error types for the JSON document library.
//!
//! Two failure families share one enum:
//!
//! - Type-contract violations: an operation was invoked against a value
//!   whose tag does not support it. Always a programmer error.
//! - Input-malformed failures: the lexer or parser could not classify the
//!   token stream or the grammar was violated. Each carries the 1-based
//!   line number where detection occurred. The whole parse fails; no
//!   partial tree is returned.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type JsonResult<T> = Result<T, JsonError>;

/// All failures the library can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    /// An accessor or mutation was called on a value of the wrong kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind the operation requires.
        expected: &'static str,
        /// Kind the value actually holds.
        found: &'static str,
    },

    /// Checked array access past the end.
    #[error("index {index} out of bounds (array length {len})")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Array length at the time of access.
        len: usize,
    },

    /// Checked object access for an absent key.
    #[error("key {key:?} not found")]
    KeyNotFound {
        /// The key that was looked up.
        key: String,
    },

    /// A NaN or infinite float has no JSON spelling.
    #[error("non-finite float cannot be serialized")]
    NonFiniteFloat,

    /// A character that cannot start any token.
    #[error("line {line}: unexpected character {found:?}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// 1-based line of detection.
        line: u64,
    },

    /// Input ended while a token or production was incomplete.
    #[error("line {line}: unexpected end of input")]
    UnexpectedEof {
        /// 1-based line of detection.
        line: u64,
    },

    /// A `true`/`false`/`null` keyword was misspelled.
    #[error("line {line}: invalid {literal} literal")]
    InvalidLiteral {
        /// The literal that was being matched.
        literal: &'static str,
        /// 1-based line of detection.
        line: u64,
    },

    /// A number token did not convert to an integer or float.
    #[error("line {line}: malformed number {text:?}")]
    MalformedNumber {
        /// The raw accumulated token text.
        text: String,
        /// 1-based line of detection.
        line: u64,
    },

    /// An unknown escape, unpaired surrogate, or bad `\uXXXX` digits.
    #[error("line {line}: invalid escape sequence")]
    InvalidEscape {
        /// 1-based line of detection.
        line: u64,
    },

    /// The input is not valid UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidUtf8,

    /// A token that the grammar does not allow at this point.
    #[error("line {line}: unexpected {token} in {context}")]
    UnexpectedToken {
        /// Human-readable name of the offending token.
        token: &'static str,
        /// Grammar context, e.g. "object" or "array".
        context: &'static str,
        /// 1-based line of detection.
        line: u64,
    },

    /// The document root was a bare scalar rather than `{` or `[`.
    #[error("line {line}: document root must be an object or array")]
    NonContainerRoot {
        /// 1-based line of detection.
        line: u64,
    },

    /// Nesting exceeded the fixed depth guard.
    #[error("line {line}: nesting depth limit exceeded")]
    DepthLimitExceeded {
        /// 1-based line of detection.
        line: u64,
    },

    /// A file-mode source could not be read. The message is stored as a
    /// string so the enum stays `Clone + PartialEq`.
    #[error("failed to read {}: {message}", .path.display())]
    Io {
        /// Path the caller supplied.
        path: PathBuf,
        /// Underlying I/O error message.
        message: String,
    },
}

impl JsonError {
    /// True for the input-malformed family (lexical or grammatical).
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            JsonError::UnexpectedCharacter { .. }
                | JsonError::UnexpectedEof { .. }
                | JsonError::InvalidLiteral { .. }
                | JsonError::MalformedNumber { .. }
                | JsonError::InvalidEscape { .. }
                | JsonError::InvalidUtf8
                | JsonError::UnexpectedToken { .. }
                | JsonError::NonContainerRoot { .. }
                | JsonError::DepthLimitExceeded { .. }
        )
    }

    /// True for the type-contract family (caller misuse of a value).
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            JsonError::TypeMismatch { .. }
                | JsonError::IndexOutOfBounds { .. }
                | JsonError::KeyNotFound { .. }
                | JsonError::NonFiniteFloat
        )
    }

    /// Line number carried by input-malformed failures, if any.
    pub fn line(&self) -> Option<u64> {
        match self {
            JsonError::UnexpectedCharacter { line, .. }
            | JsonError::UnexpectedEof { line }
            | JsonError::InvalidLiteral { line, .. }
            | JsonError::MalformedNumber { line, .. }
            | JsonError::InvalidEscape { line }
            | JsonError::UnexpectedToken { line, .. }
            | JsonError::NonContainerRoot { line }
            | JsonError::DepthLimitExceeded { line } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families_are_disjoint() {
        let mismatch = JsonError::TypeMismatch {
            expected: "array",
            found: "null",
        };
        assert!(mismatch.is_contract_violation());
        assert!(!mismatch.is_malformed_input());

        let eof = JsonError::UnexpectedEof { line: 3 };
        assert!(eof.is_malformed_input());
        assert!(!eof.is_contract_violation());
    }

    #[test]
    fn test_line_extraction() {
        assert_eq!(JsonError::UnexpectedEof { line: 7 }.line(), Some(7));
        assert_eq!(JsonError::NonFiniteFloat.line(), None);
    }

    #[test]
    fn test_display_includes_line() {
        let err = JsonError::InvalidLiteral {
            literal: "true",
            line: 2,
        };
        assert_eq!(err.to_string(), "line 2: invalid true literal");
    }
}
