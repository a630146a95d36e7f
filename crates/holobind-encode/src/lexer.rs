//! A small hand-written scanner for one line of surface syntax.
//!
//! No lexer generator, no parser-combinator crate: the grammar is a
//! handful of sigil-prefixed tokens plus bracketed lists, simple enough
//! that a direct char-by-char scan is the straightforward choice.

use crate::ast::{Literal, Span};
use crate::error::EncodeError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `@a` or `@a:id`.
    At(String, Option<String>),
    /// `$a`.
    Dollar(String),
    /// `?h`.
    Question(String),
    Literal(Literal),
    LBracket,
    RBracket,
    Comma,
    /// A bare identifier — an operator or argument name.
    Ident(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == '-'
}

/// Scans one source line into tokens.
///
/// The caller is responsible for skipping blank lines and `//` comment
/// lines before calling this — a line reaching here is assumed to contain
/// a statement.
pub fn tokenize(line: &str, line_number: usize) -> Result<Vec<Token>, EncodeError> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '[' => {
                tokens.push(Token {
                    kind: TokenKind::LBracket,
                    span: Span::new(start, start + 1),
                });
                i += 1;
            }
            ']' => {
                tokens.push(Token {
                    kind: TokenKind::RBracket,
                    span: Span::new(start, start + 1),
                });
                i += 1;
            }
            ',' => {
                tokens.push(Token {
                    kind: TokenKind::Comma,
                    span: Span::new(start, start + 1),
                });
                i += 1;
            }
            '"' => {
                i += 1;
                let text_start = i;
                while i < chars.len() && chars[i] != '"' {
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(EncodeError::ParseError {
                        line: line_number,
                        span: Some(Span::new(start, i)),
                        message: "unterminated string literal".to_string(),
                    });
                }
                let text: String = chars[text_start..i].iter().collect();
                i += 1; // closing quote
                tokens.push(Token {
                    kind: TokenKind::Literal(Literal::Str(text)),
                    span: Span::new(start, i),
                });
            }
            '@' => {
                i += 1;
                let name_start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                if i == name_start {
                    return Err(EncodeError::ParseError {
                        line: line_number,
                        span: Some(Span::new(start, i)),
                        message: "expected a name after '@'".to_string(),
                    });
                }
                let name: String = chars[name_start..i].iter().collect();
                let persist = if i < chars.len() && chars[i] == ':' {
                    i += 1;
                    let id_start = i;
                    while i < chars.len() && is_ident_char(chars[i]) {
                        i += 1;
                    }
                    if i == id_start {
                        return Err(EncodeError::ParseError {
                            line: line_number,
                            span: Some(Span::new(start, i)),
                            message: "expected a name after ':'".to_string(),
                        });
                    }
                    Some(chars[id_start..i].iter().collect())
                } else {
                    None
                };
                tokens.push(Token {
                    kind: TokenKind::At(name, persist),
                    span: Span::new(start, i),
                });
            }
            '$' => {
                i += 1;
                let name_start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                if i == name_start {
                    return Err(EncodeError::ParseError {
                        line: line_number,
                        span: Some(Span::new(start, i)),
                        message: "expected a name after '$'".to_string(),
                    });
                }
                tokens.push(Token {
                    kind: TokenKind::Dollar(chars[name_start..i].iter().collect()),
                    span: Span::new(start, i),
                });
            }
            '?' => {
                i += 1;
                let name_start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                if i == name_start {
                    return Err(EncodeError::ParseError {
                        line: line_number,
                        span: Some(Span::new(start, i)),
                        message: "expected a name after '?'".to_string(),
                    });
                }
                tokens.push(Token {
                    kind: TokenKind::Question(chars[name_start..i].iter().collect()),
                    span: Span::new(start, i),
                });
            }
            c if c.is_ascii_digit() || (c == '-' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit()) => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.' || chars[i] == '-') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text.parse::<f64>().map_err(|_| EncodeError::ParseError {
                    line: line_number,
                    span: Some(Span::new(start, i)),
                    message: format!("invalid number literal '{}'", text),
                })?;
                tokens.push(Token {
                    kind: TokenKind::Literal(Literal::Number(value)),
                    span: Span::new(start, i),
                });
            }
            c if is_ident_char(c) => {
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(chars[start..i].iter().collect()),
                    span: Span::new(start, i),
                });
            }
            other => {
                return Err(EncodeError::ParseError {
                    line: line_number,
                    span: Some(Span::new(start, start + 1)),
                    message: format!("unexpected character '{}'", other),
                });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_simple_statement() {
        let tokens = tokenize("isA Rex Dog", 1).unwrap();
        assert_eq!(
            tokens.iter().map(|t| &t.kind).collect::<Vec<_>>(),
            vec![
                &TokenKind::Ident("isA".to_string()),
                &TokenKind::Ident("Rex".to_string()),
                &TokenKind::Ident("Dog".to_string()),
            ]
        );
    }

    #[test]
    fn tokenizes_binding_and_persistence() {
        let tokens = tokenize("@a:id isA Rex Dog", 1).unwrap();
        assert_eq!(
            tokens[0].kind,
            TokenKind::At("a".to_string(), Some("id".to_string()))
        );
    }

    #[test]
    fn tokenizes_hole_and_reference_and_literal() {
        let tokens = tokenize(r#"love $x ?who "str" 42"#, 1).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident("love".to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Dollar("x".to_string()));
        assert_eq!(tokens[2].kind, TokenKind::Question("who".to_string()));
        assert_eq!(
            tokens[3].kind,
            TokenKind::Literal(Literal::Str("str".to_string()))
        );
        assert_eq!(tokens[4].kind, TokenKind::Literal(Literal::Number(42.0)));
    }

    #[test]
    fn tokenizes_list() {
        let tokens = tokenize("likes John [Cat, Dog, Bird]", 1).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::LBracket);
        assert_eq!(tokens[4].kind, TokenKind::Comma);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::RBracket);
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(tokenize(r#"say "hello"#, 1).is_err());
    }
}
