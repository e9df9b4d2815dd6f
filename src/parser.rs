//! Recursive-descent JSON parser.
//!
//! The parser drives the lexer with a one-token lookahead and builds a
//! [`Value`] tree bottom-up, one node per completed production. A parser
//! is constructed per parse call; nothing persists across calls and
//! nothing is shared between callers.
//!
//! The object grammar is strict: key, colon, value, comma-or-end.
//! Trailing commas, missing colons, non-string keys, and bare-scalar
//! document roots are all rejected with the detection line.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{JsonError, JsonResult};
use crate::lexer::{Lexer, Token};
use crate::value::Value;

/// Whether the argument to [`parse`] is raw JSON text or a file path.
/// Never auto-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// The argument is the JSON text itself.
    Text,
    /// The argument names a file whose contents are the JSON text.
    File,
}

/// Nesting guard. Inputs deeper than this fail rather than risk
/// exhausting the call stack.
const MAX_DEPTH: u64 = 128;

/// Recursive-descent token consumer.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: u64,
}

impl<'a> Parser<'a> {
    /// Create a parser over `input`, priming the one-token lookahead.
    pub fn new(input: &'a [u8]) -> JsonResult<Self> {
        let mut lexer = Lexer::new(input)?;
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Parse a whole document: a container root followed by end of input.
    pub fn parse_document(&mut self) -> JsonResult<Value> {
        let value = match self.current {
            Token::ObjectBegin => self.parse_object()?,
            Token::ArrayBegin => self.parse_array()?,
            Token::Eof => {
                return Err(JsonError::UnexpectedEof {
                    line: self.lexer.line(),
                })
            }
            _ => {
                return Err(JsonError::NonContainerRoot {
                    line: self.lexer.line(),
                })
            }
        };

        if self.current != Token::Eof {
            return Err(JsonError::UnexpectedToken {
                token: self.current.name(),
                context: "document",
                line: self.lexer.line(),
            });
        }

        Ok(value)
    }

    /// Advance to the next token.
    fn advance(&mut self) -> JsonResult<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn unexpected(&self, context: &'static str) -> JsonError {
        JsonError::UnexpectedToken {
            token: self.current.name(),
            context,
            line: self.lexer.line(),
        }
    }

    /// Parse a single value at the current token.
    fn parse_value(&mut self) -> JsonResult<Value> {
        match &self.current {
            Token::Null => {
                self.advance()?;
                Ok(Value::Null)
            }
            Token::True => {
                self.advance()?;
                Ok(Value::Bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(Value::Bool(false))
            }
            Token::Integer(n) => {
                let value = Value::Integer(*n);
                self.advance()?;
                Ok(value)
            }
            Token::Float(f) => {
                let value = Value::Float(*f);
                self.advance()?;
                Ok(value)
            }
            Token::String(s) => {
                let value = Value::String(s.clone());
                self.advance()?;
                Ok(value)
            }
            Token::ObjectBegin => self.parse_object(),
            Token::ArrayBegin => self.parse_array(),
            Token::Eof => Err(JsonError::UnexpectedEof {
                line: self.lexer.line(),
            }),
            _ => Err(self.unexpected("value")),
        }
    }

    /// Parse an object: `{` (string `:` value (`,` string `:` value)*)? `}`.
    fn parse_object(&mut self) -> JsonResult<Value> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(JsonError::DepthLimitExceeded {
                line: self.lexer.line(),
            });
        }

        // Consume opening brace
        self.advance()?;

        let mut map = BTreeMap::new();

        if self.current == Token::ObjectEnd {
            self.advance()?;
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            let key = match &self.current {
                Token::String(s) => s.clone(),
                Token::Eof => {
                    return Err(JsonError::UnexpectedEof {
                        line: self.lexer.line(),
                    })
                }
                _ => return Err(self.unexpected("object key position")),
            };
            self.advance()?;

            if self.current != Token::Colon {
                return Err(self.unexpected("object after key"));
            }
            self.advance()?;

            let value = self.parse_value()?;
            // A repeated key overwrites the earlier entry.
            map.insert(key, value);

            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    // No trailing comma before the closing brace.
                    if self.current == Token::ObjectEnd {
                        return Err(self.unexpected("object after comma"));
                    }
                }
                Token::ObjectEnd => {
                    self.advance()?;
                    break;
                }
                Token::Eof => {
                    return Err(JsonError::UnexpectedEof {
                        line: self.lexer.line(),
                    })
                }
                _ => return Err(self.unexpected("object after value")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    /// Parse an array: `[` (value (`,` value)*)? `]`.
    fn parse_array(&mut self) -> JsonResult<Value> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(JsonError::DepthLimitExceeded {
                line: self.lexer.line(),
            });
        }

        // Consume opening bracket
        self.advance()?;

        let mut items = Vec::new();

        if self.current == Token::ArrayEnd {
            self.advance()?;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            let value = self.parse_value()?;
            items.push(value);

            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    // No trailing comma before the closing bracket.
                    if self.current == Token::ArrayEnd {
                        return Err(self.unexpected("array after comma"));
                    }
                }
                Token::ArrayEnd => {
                    self.advance()?;
                    break;
                }
                Token::Eof => {
                    return Err(JsonError::UnexpectedEof {
                        line: self.lexer.line(),
                    })
                }
                _ => return Err(self.unexpected("array after value")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }
}

/// Parse a JSON document from text or a named file, per `mode`.
pub fn parse(source: &str, mode: InputMode) -> JsonResult<Value> {
    match mode {
        InputMode::Text => parse_str(source),
        InputMode::File => parse_file(Path::new(source)),
    }
}

/// Parse a JSON document from in-memory text.
pub fn parse_str(text: &str) -> JsonResult<Value> {
    Parser::new(text.as_bytes())?.parse_document()
}

/// Parse a JSON document from a file's contents.
///
/// The file is read whole before lexing; the handle is released on every
/// path, success or failure.
pub fn parse_file<P: AsRef<Path>>(path: P) -> JsonResult<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| JsonError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_str(&text)
}
