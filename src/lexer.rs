//! JSON lexer/tokenizer.
//!
//! A pull tokenizer: the parser drives it one token per [`Lexer::next_token`]
//! call. Tracks a 1-based line counter, incremented on every consumed
//! newline (whitespace and string bodies alike), so failures can report
//! where they were detected.
//!
//! Escape handling: standard JSON escapes are decoded into their semantic
//! characters, including `\uXXXX` with surrogate pairs. Unknown escapes,
//! unpaired surrogates, raw control characters inside strings, and
//! end-of-input mid-token are lexical failures.

use crate::error::{JsonError, JsonResult};

/// One lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `{`
    ObjectBegin,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayBegin,
    /// `]`
    ArrayEnd,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// Quoted string, escapes already decoded.
    String(String),
    /// Number without fraction or exponent.
    Integer(i64),
    /// Number with a fraction or exponent.
    Float(f64),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// End of input.
    Eof,
}

impl Token {
    /// Short name used in parse error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Token::ObjectBegin => "'{'",
            Token::ObjectEnd => "'}'",
            Token::ArrayBegin => "'['",
            Token::ArrayEnd => "']'",
            Token::Colon => "':'",
            Token::Comma => "','",
            Token::String(_) => "string",
            Token::Integer(_) => "integer",
            Token::Float(_) => "float",
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Null => "'null'",
            Token::Eof => "end of input",
        }
    }
}

/// Pull tokenizer over a single in-memory input.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: u64,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `input`. The input must be valid UTF-8.
    pub fn new(input: &'a [u8]) -> JsonResult<Self> {
        if std::str::from_utf8(input).is_err() {
            return Err(JsonError::InvalidUtf8);
        }
        Ok(Self {
            input,
            pos: 0,
            line: 1,
        })
    }

    /// The 1-based line of the most recently consumed character.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Peek at the current byte without consuming it.
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Consume and return the current byte, counting newlines.
    fn advance(&mut self) -> Option<u8> {
        let b = self.input.get(self.pos).copied();
        if let Some(b) = b {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
            }
        }
        b
    }

    /// Skip whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> JsonResult<Token> {
        self.skip_whitespace();

        match self.peek() {
            None => Ok(Token::Eof),
            Some(b'{') => {
                self.advance();
                Ok(Token::ObjectBegin)
            }
            Some(b'}') => {
                self.advance();
                Ok(Token::ObjectEnd)
            }
            Some(b'[') => {
                self.advance();
                Ok(Token::ArrayBegin)
            }
            Some(b']') => {
                self.advance();
                Ok(Token::ArrayEnd)
            }
            Some(b':') => {
                self.advance();
                Ok(Token::Colon)
            }
            Some(b',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some(b'"') => self.read_string(),
            Some(b'-') | Some(b'0'..=b'9') => self.read_number(),
            Some(b't') => self.read_literal(b"true", "true", Token::True),
            Some(b'f') => self.read_literal(b"false", "false", Token::False),
            Some(b'n') => self.read_literal(b"null", "null", Token::Null),
            Some(b) => Err(JsonError::UnexpectedCharacter {
                found: char::from(b),
                line: self.line,
            }),
        }
    }

    /// Read a string token, decoding escape sequences.
    fn read_string(&mut self) -> JsonResult<Token> {
        // Consume opening quote
        self.advance();

        let mut result = String::new();

        loop {
            match self.advance() {
                None => return Err(JsonError::UnexpectedEof { line: self.line }),
                Some(b'"') => break,
                Some(b'\\') => {
                    let decoded = self.read_escape_sequence()?;
                    result.push(decoded);
                }
                Some(b) if b < 0x20 => {
                    // Raw control characters must be escaped in JSON.
                    return Err(JsonError::UnexpectedCharacter {
                        found: char::from(b),
                        line: self.line,
                    });
                }
                Some(b) if b <= 0x7F => {
                    result.push(char::from(b));
                }
                Some(_) => {
                    // UTF-8 multi-byte sequence: back up and read it whole.
                    self.pos -= 1;
                    let ch = self.read_utf8_char()?;
                    result.push(ch);
                }
            }
        }

        Ok(Token::String(result))
    }

    /// Read a full UTF-8 character from the current position.
    ///
    /// Input was validated up front, so malformed sequences here would
    /// indicate a cursor bug; they are still reported as errors rather
    /// than trusted.
    fn read_utf8_char(&mut self) -> JsonResult<char> {
        let b0 = self
            .advance()
            .ok_or(JsonError::UnexpectedEof { line: self.line })?;

        if b0 <= 0x7F {
            return Ok(char::from(b0));
        }

        let (len, mut codepoint) = if b0 & 0xE0 == 0xC0 {
            (2, u32::from(b0 & 0x1F))
        } else if b0 & 0xF0 == 0xE0 {
            (3, u32::from(b0 & 0x0F))
        } else if b0 & 0xF8 == 0xF0 {
            (4, u32::from(b0 & 0x07))
        } else {
            return Err(JsonError::InvalidUtf8);
        };

        for _ in 1..len {
            let b = self
                .advance()
                .ok_or(JsonError::UnexpectedEof { line: self.line })?;
            if b & 0xC0 != 0x80 {
                return Err(JsonError::InvalidUtf8);
            }
            codepoint = (codepoint << 6) | u32::from(b & 0x3F);
        }

        char::from_u32(codepoint).ok_or(JsonError::InvalidUtf8)
    }

    /// Decode the escape sequence after a backslash.
    fn read_escape_sequence(&mut self) -> JsonResult<char> {
        match self.advance() {
            None => Err(JsonError::UnexpectedEof { line: self.line }),
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(),
            Some(_) => Err(JsonError::InvalidEscape { line: self.line }),
        }
    }

    /// Decode a `\uXXXX` escape, pairing surrogates.
    fn read_unicode_escape(&mut self) -> JsonResult<char> {
        let codepoint = self.read_hex4()?;

        // High surrogate must be followed by a \uXXXX low surrogate.
        if (0xD800..=0xDBFF).contains(&codepoint) {
            if self.advance() != Some(b'\\') || self.advance() != Some(b'u') {
                return Err(JsonError::InvalidEscape { line: self.line });
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(JsonError::InvalidEscape { line: self.line });
            }
            let combined =
                0x10000 + ((u32::from(codepoint) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(combined).ok_or(JsonError::InvalidEscape { line: self.line });
        }

        // Unpaired low surrogate.
        if (0xDC00..=0xDFFF).contains(&codepoint) {
            return Err(JsonError::InvalidEscape { line: self.line });
        }

        char::from_u32(u32::from(codepoint)).ok_or(JsonError::InvalidEscape { line: self.line })
    }

    /// Read 4 hex digits.
    fn read_hex4(&mut self) -> JsonResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let b = self
                .advance()
                .ok_or(JsonError::UnexpectedEof { line: self.line })?;
            let digit = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => return Err(JsonError::InvalidEscape { line: self.line }),
            };
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }

    /// Read a number token.
    ///
    /// Accumulates sign, digits, decimal point, and exponent characters,
    /// then converts once at token completion with the standard parsers.
    /// The token is a `Float` the moment a decimal point is seen — or an
    /// exponent marker, since `1e3` has no 64-bit-integer reading.
    fn read_number(&mut self) -> JsonResult<Token> {
        let start = self.pos;
        let mut is_float = false;

        if self.peek() == Some(b'-') {
            self.advance();
        }

        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => {
                    self.advance();
                }
                b'.' => {
                    is_float = true;
                    self.advance();
                }
                b'e' | b'E' => {
                    is_float = true;
                    self.advance();
                    // Exponent may carry its own sign.
                    if let Some(b'+') | Some(b'-') = self.peek() {
                        self.advance();
                    }
                }
                _ => break,
            }
        }

        // The slice is ASCII by construction.
        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| JsonError::InvalidUtf8)?;

        if is_float {
            let parsed: f64 = text.parse().map_err(|_| JsonError::MalformedNumber {
                text: text.to_string(),
                line: self.line,
            })?;
            if !parsed.is_finite() {
                return Err(JsonError::MalformedNumber {
                    text: text.to_string(),
                    line: self.line,
                });
            }
            Ok(Token::Float(parsed))
        } else {
            let parsed: i64 = text.parse().map_err(|_| JsonError::MalformedNumber {
                text: text.to_string(),
                line: self.line,
            })?;
            Ok(Token::Integer(parsed))
        }
    }

    /// Match a keyword byte-by-byte against its expected spelling.
    fn read_literal(
        &mut self,
        expected: &'static [u8],
        literal: &'static str,
        token: Token,
    ) -> JsonResult<Token> {
        for &b in expected {
            if self.advance() != Some(b) {
                return Err(JsonError::InvalidLiteral {
                    literal,
                    line: self.line,
                });
            }
        }
        Ok(token)
    }
}
