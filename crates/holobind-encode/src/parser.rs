//! Turns lines of surface text into [`Statement`] ASTs.

use crate::ast::{Argument, Statement};
use crate::error::{EncodeError, EncodeResult};
use crate::lexer::{tokenize, Token, TokenKind};

/// Parses every non-blank, non-comment line of `source` into a statement.
///
/// Blank lines and lines whose first non-whitespace characters are `//`
/// are skipped; every other line must parse as a single statement.
pub fn parse_source(source: &str) -> EncodeResult<Vec<Statement>> {
    let mut statements = Vec::new();
    for (offset, raw_line) in source.lines().enumerate() {
        let line_number = offset + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        statements.push(parse_line(trimmed, line_number)?);
    }
    Ok(statements)
}

fn parse_line(line: &str, line_number: usize) -> EncodeResult<Statement> {
    let tokens = tokenize(line, line_number)?;
    let mut pos = 0;

    let (binding, persist_name) = match tokens.get(pos) {
        Some(Token {
            kind: TokenKind::At(name, persist),
            ..
        }) => {
            pos += 1;
            (Some(name.clone()), persist.clone())
        }
        _ => (None, None),
    };

    let operator = match tokens.get(pos) {
        Some(Token {
            kind: TokenKind::Ident(name),
            ..
        }) => {
            pos += 1;
            name.clone()
        }
        other => {
            return Err(EncodeError::ParseError {
                line: line_number,
                span: other.map(|t| t.span),
                message: "expected an operator name".to_string(),
            });
        }
    };

    let mut arguments = Vec::new();
    while pos < tokens.len() {
        let (argument, next) = parse_argument(&tokens, pos, line_number)?;
        arguments.push(argument);
        pos = next;
    }

    Ok(Statement {
        binding,
        persist_name,
        operator,
        arguments,
        line: line_number,
    })
}

fn parse_argument(
    tokens: &[Token],
    pos: usize,
    line_number: usize,
) -> EncodeResult<(Argument, usize)> {
    match tokens.get(pos) {
        Some(Token {
            kind: TokenKind::Ident(name),
            ..
        }) => Ok((Argument::Identifier(name.clone()), pos + 1)),
        Some(Token {
            kind: TokenKind::Dollar(name),
            ..
        }) => Ok((Argument::Reference(name.clone()), pos + 1)),
        Some(Token {
            kind: TokenKind::Question(name),
            ..
        }) => Ok((Argument::Hole(name.clone()), pos + 1)),
        Some(Token {
            kind: TokenKind::Literal(lit),
            ..
        }) => Ok((Argument::Literal(lit.clone()), pos + 1)),
        Some(Token {
            kind: TokenKind::LBracket,
            ..
        }) => parse_list(tokens, pos + 1, line_number),
        other => Err(EncodeError::ParseError {
            line: line_number,
            span: other.map(|t| t.span),
            message: "expected an argument".to_string(),
        }),
    }
}

fn parse_list(
    tokens: &[Token],
    mut pos: usize,
    line_number: usize,
) -> EncodeResult<(Argument, usize)> {
    let mut items = Vec::new();
    if matches!(tokens.get(pos).map(|t| &t.kind), Some(TokenKind::RBracket)) {
        return Ok((Argument::List(items), pos + 1));
    }
    loop {
        let (item, next) = parse_argument(tokens, pos, line_number)?;
        items.push(item);
        pos = next;
        match tokens.get(pos).map(|t| &t.kind) {
            Some(TokenKind::Comma) => {
                pos += 1;
            }
            Some(TokenKind::RBracket) => {
                pos += 1;
                break;
            }
            other => {
                return Err(EncodeError::ParseError {
                    line: line_number,
                    span: tokens.get(pos).map(|t| t.span),
                    message: format!("expected ',' or ']' in list, found {:?}", other),
                });
            }
        }
    }
    Ok((Argument::List(items), pos))
}
