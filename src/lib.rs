//! jsontree - an in-memory JSON document library.
//!
//! Parses JSON text into a navigable [`Value`] tree, lets callers build
//! and mutate trees programmatically, and pretty-prints them back to
//! text. The whole pipeline is synchronous and single-threaded; each
//! parse call constructs its own lexer and parser, so independent
//! callers never share state.
//!
//! # Architecture
//!
//! Three layers, each depending only on the one below:
//!
//! - [`value`] - the recursive tagged document type and its operations
//! - [`lexer`] - pull tokenizer with line tracking for diagnostics
//! - [`parser`] / [`stringify`] - recursive-descent parsing and the
//!   inverse pretty-printing traversal
//!
//! # Example
//!
//! ```
//! use jsontree::{parse_str, Value};
//!
//! let doc = parse_str(r#"{"happy": true, "pi": 3.141}"#).unwrap();
//! assert_eq!(doc.len().unwrap(), 2);
//! assert_eq!(doc.at("pi").unwrap().as_f64().unwrap(), 3.141);
//! assert_eq!(doc.at("happy").unwrap().as_bool().unwrap(), true);
//!
//! let text = doc.stringify().unwrap();
//! assert_eq!(parse_str(&text).unwrap(), doc);
//! ```

// Library code propagates errors; the only permitted panics are the
// documented unchecked `Index` contracts on `Value`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

pub mod error;
pub mod lexer;
pub mod parser;
pub mod stringify;
pub mod value;

// Re-export commonly used types
pub use error::{JsonError, JsonResult};
pub use parser::{parse, parse_file, parse_str, InputMode};
pub use stringify::stringify;
pub use value::{JsonType, Value, ValueIndex};
