// ABOUTME: Recursive-descent reader turning a token stream into values

use crate::error::SyntaxError;
use crate::lexer::{lex, Token};
use crate::value::Value;

struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        TokenCursor { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

fn read_datum(cursor: &mut TokenCursor) -> Result<Value, SyntaxError> {
    let tok = cursor.next().ok_or(SyntaxError::UnexpectedEof)?.clone();
    match tok {
        Token::Boolean(b) => Ok(Value::Boolean(b)),
        Token::Numeric(n) => Ok(Value::Number(n)),
        Token::Str(s) => Ok(Value::string(s)),
        Token::Identifier(s) => Ok(Value::symbol(s)),
        Token::LParen => read_tail(cursor),
        Token::Quote => Ok(wrap_quote("quote", cursor)?),
        Token::Quasiquote => Ok(wrap_quote("quasiquote", cursor)?),
        Token::Unquote => Ok(wrap_quote("unquote", cursor)?),
        Token::RParen => Err(SyntaxError::ExpectedCloseParen("')'".to_string())),
        Token::Dot => Err(SyntaxError::MalformedDottedPair),
    }
}

fn wrap_quote(keyword: &str, cursor: &mut TokenCursor) -> Result<Value, SyntaxError> {
    let inner = read_datum(cursor)?;
    Ok(Value::list(vec![Value::symbol(keyword), inner]))
}

/// Reads the remainder of a list after the opening `(` has been consumed.
fn read_tail(cursor: &mut TokenCursor) -> Result<Value, SyntaxError> {
    match cursor.peek() {
        None => Err(SyntaxError::UnexpectedEof),
        Some(Token::RParen) => {
            cursor.next();
            Ok(Value::Nil)
        }
        Some(Token::Dot) => Err(SyntaxError::MalformedDottedPair),
        _ => {
            let car = read_datum(cursor)?;
            match cursor.peek() {
                Some(Token::Dot) => {
                    cursor.next();
                    let cdr = read_datum(cursor)?;
                    match cursor.next() {
                        Some(Token::RParen) => Ok(Value::cons(car, cdr)),
                        Some(other) => Err(SyntaxError::ExpectedCloseParen(format!("{:?}", other))),
                        None => Err(SyntaxError::UnexpectedEof),
                    }
                }
                _ => {
                    let tail = read_tail(cursor)?;
                    Ok(Value::cons(car, tail))
                }
            }
        }
    }
}

/// Reads exactly one datum from a buffer; trailing tokens are an error.
pub fn read_one(input: &str) -> Result<Value, SyntaxError> {
    let tokens = lex(input)?;
    let mut cursor = TokenCursor::new(&tokens);
    let datum = read_datum(&mut cursor)?;
    if !cursor.at_end() {
        return Err(SyntaxError::TrailingInput);
    }
    Ok(datum)
}

/// Reads every top-level datum in a buffer, in order.
pub fn read_all(input: &str) -> Result<Vec<Value>, SyntaxError> {
    let tokens = lex(input)?;
    let mut cursor = TokenCursor::new(&tokens);
    let mut out = Vec::new();
    while !cursor.at_end() {
        out.push(read_datum(&mut cursor)?);
    }
    Ok(out)
}
