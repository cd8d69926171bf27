//! Tokenizer for the scene DSL.

/// A scene-DSL token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen,
    RParen,
    /// Quoted string literal, quotes stripped. No escape handling.
    Str(String),
    /// Any other whitespace-delimited atom: keywords, numbers, bare words.
    Atom(String),
}

impl Token {
    /// The atom or string payload, for contexts accepting either.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Str(s) | Token::Atom(s) => Some(s),
            _ => None,
        }
    }
}

/// Split the input into tokens.
///
/// Line comments introduced by `;` run to end of line. Parentheses are
/// always their own tokens, even without surrounding whitespace. An
/// unterminated string takes the rest of the input.
pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b';' => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                }
            }
            b'(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            b'"' => {
                let start = pos + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end] != b'"' {
                    end += 1;
                }
                tokens.push(Token::Str(input[start..end].to_string()));
                pos = (end + 1).min(bytes.len());
            }
            c if c.is_ascii_whitespace() => pos += 1,
            _ => {
                let start = pos;
                while pos < bytes.len() {
                    let c = bytes[pos];
                    if c.is_ascii_whitespace() || matches!(c, b'(' | b')' | b'"' | b';') {
                        break;
                    }
                    pos += 1;
                }
                tokens.push(Token::Atom(input[start..pos].to_string()));
            }
        }
    }

    tokens
}
