// ABOUTME: Lexer turning source text into a flat token stream

use nom::branch::alt;
use nom::bytes::complete::{escaped_transform, is_not, tag};
use nom::character::complete::{char, digit1, multispace1, none_of, one_of, satisfy};
use nom::combinator::{map, opt, peek, recognize, value};
use nom::multi::many1;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};

use crate::error::SyntaxError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Dot,
    Quote,
    Quasiquote,
    Unquote,
    Boolean(bool),
    Numeric(f64),
    Str(String),
    Identifier(String),
}

fn line_comment(input: &str) -> IResult<&str, ()> {
    value((), pair(char(';'), opt(is_not("\n\r")))).parse(input)
}

fn whitespace_or_comment(input: &str) -> IResult<&str, ()> {
    value((), many1(alt((value((), multispace1), line_comment)))).parse(input)
}

fn skip_trivia(input: &str) -> IResult<&str, ()> {
    value((), opt(whitespace_or_comment)).parse(input)
}

fn boolean_token(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Boolean(true), tag("#t")),
        value(Token::Boolean(false), tag("#f")),
    ))
    .parse(input)
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';' | '\'' | '`' | ',')
}

fn numeric_token(input: &str) -> IResult<&str, Token> {
    let (rest, text) = recognize(pair(
        opt(one_of("+-")),
        many1(alt((digit1, recognize(pair(char('.'), digit1))))),
    ))
    .parse(input)?;
    // Reject identifiers like "+" or "-" alone, or things followed by
    // non-delimiter characters (handled by caller via longest-match alt order).
    match text.parse::<f64>() {
        Ok(n) => Ok((rest, Token::Numeric(n))),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Float,
        ))),
    }
}

fn string_token(input: &str) -> IResult<&str, Token> {
    let (rest, content) = delimited(
        char('"'),
        opt(escaped_transform(
            none_of("\\\""),
            '\\',
            alt((
                value("\\", char('\\')),
                value("\"", char('"')),
                value("\n", char('n')),
                value("\t", char('t')),
            )),
        )),
        char('"'),
    )
    .parse(input)?;
    Ok((rest, Token::Str(content.unwrap_or_default())))
}

fn identifier_token(input: &str) -> IResult<&str, Token> {
    map(recognize(many1(satisfy(|c| !is_delimiter(c)))), |s: &str| {
        Token::Identifier(s.to_string())
    })
    .parse(input)
}

fn single_token(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        value(Token::Quote, char('\'')),
        value(Token::Quasiquote, char('`')),
        value(Token::Unquote, char(',')),
        string_token,
        boolean_token,
        numeric_token,
        // A lone '.' used as a dotted-pair marker must be a complete
        // token on its own, not swallowed by the identifier rule.
        map(preceded(char('.'), peek(is_dot_boundary)), |_| Token::Dot),
        identifier_token,
    ))
    .parse(input)
}

fn is_dot_boundary(input: &str) -> IResult<&str, ()> {
    match input.chars().next() {
        None => Ok((input, ())),
        Some(c) if is_delimiter(c) => Ok((input, ())),
        _ => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        ))),
    }
}

/// Lexes an entire buffer into a flat token list. There is no notion of
/// "where one top-level form ends" at this layer; the reader decides that.
pub fn lex(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut rest = input;
    let mut tokens = Vec::new();
    loop {
        let (next, _) = skip_trivia(rest).unwrap_or((rest, ()));
        rest = next;
        if rest.is_empty() {
            return Ok(tokens);
        }
        if rest.starts_with('"') {
            match string_token(rest) {
                Ok((next, tok)) => {
                    tokens.push(tok);
                    rest = next;
                    continue;
                }
                Err(_) => return Err(SyntaxError::UnterminatedString),
            }
        }
        match single_token(rest) {
            Ok((next, tok)) => {
                if next.len() == rest.len() {
                    return Err(SyntaxError::UnexpectedEof);
                }
                tokens.push(tok);
                rest = next;
            }
            Err(_) => {
                let word: String = rest.chars().take_while(|c| !is_delimiter(*c)).collect();
                return Err(SyntaxError::MalformedNumber(word));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_parens_and_atoms() {
        let toks = lex("(+ 1 2)").unwrap();
        assert_eq!(
            toks,
            vec![
                Token::LParen,
                Token::Identifier("+".into()),
                Token::Numeric(1.0),
                Token::Numeric(2.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn lexes_booleans_and_strings() {
        let toks = lex("(#t \"hi\\nthere\" #f)").unwrap();
        assert_eq!(
            toks,
            vec![
                Token::LParen,
                Token::Boolean(true),
                Token::Str("hi\nthere".into()),
                Token::Boolean(false),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn lexes_dotted_pair_marker() {
        let toks = lex("(a . b)").unwrap();
        assert_eq!(
            toks,
            vec![
                Token::LParen,
                Token::Identifier("a".into()),
                Token::Dot,
                Token::Identifier("b".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn lexes_quote_family() {
        let toks = lex("'a `(,b)").unwrap();
        assert_eq!(
            toks,
            vec![
                Token::Quote,
                Token::Identifier("a".into()),
                Token::Quasiquote,
                Token::LParen,
                Token::Unquote,
                Token::Identifier("b".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn line_comments_are_discarded() {
        let toks = lex("1 ; comment\n2").unwrap();
        assert_eq!(toks, vec![Token::Numeric(1.0), Token::Numeric(2.0)]);
    }

    #[test]
    fn unterminated_string_is_a_syntax_error() {
        assert_eq!(lex("\"abc"), Err(SyntaxError::UnterminatedString));
    }

    #[test]
    fn negative_and_fractional_numbers() {
        let toks = lex("-3.5 +2").unwrap();
        assert_eq!(toks, vec![Token::Numeric(-3.5), Token::Numeric(2.0)]);
    }

    #[test]
    fn question_mark_identifiers() {
        let toks = lex("(zero? x)").unwrap();
        assert_eq!(
            toks,
            vec![
                Token::LParen,
                Token::Identifier("zero?".into()),
                Token::Identifier("x".into()),
                Token::RParen,
            ]
        );
    }
}
