//! Tokenizer for boolean expressions.
//!
//! The lexer is deliberately permissive: characters it does not recognize are
//! dropped instead of reported. Juxtaposed operands are joined by an implicit
//! AND, so `(a+b)c` and `ab'` both read as products.

use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::Chars;

use crate::gate::{NaryType, NOT_PRECEDENCE};

/// An operator as written in the input.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    /// Postfix negation `'`.
    PostfixNot,
    /// Prefix negation `!` or `~`.
    PrefixNot(char),
    /// Single-character binary operator: `*`, `&`, `+`, `|`, `^`, `⊙`.
    Symbol(char, NaryType),
    /// Gate name, either infix (`a NAND b`) or a function call (`NAND(a, b, c)`).
    Word(NaryType),
}

impl Operator {
    /// The implicit AND inserted between juxtaposed operands.
    pub const IMPLICIT_AND: Operator = Operator::Symbol('*', NaryType::And);

    pub fn precedence(self) -> u8 {
        match self {
            Operator::PostfixNot | Operator::PrefixNot(_) => NOT_PRECEDENCE,
            Operator::Symbol(_, t) | Operator::Word(t) => t.precedence(),
        }
    }

    fn from_symbol(c: char) -> Option<Operator> {
        let t = match c {
            '\'' => return Some(Operator::PostfixNot),
            '!' | '~' => return Some(Operator::PrefixNot(c)),
            '*' | '&' => NaryType::And,
            '+' | '|' => NaryType::Or,
            '^' => NaryType::Xor,
            '⊙' => NaryType::Xnor,
            _ => return None,
        };
        Some(Operator::Symbol(c, t))
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::PostfixNot => write!(f, "'"),
            Operator::PrefixNot(c) | Operator::Symbol(c, _) => write!(f, "{}", c),
            Operator::Word(t) => write!(f, "{}", t),
        }
    }
}

/// A lexical token, alive only for the duration of one parse.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    Var(String),
    Operator(Operator),
    LParen,
    RParen,
    Comma,
}

impl Token {
    /// Tokens after which a new operand implies an AND.
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Var(_) | Token::RParen | Token::Operator(Operator::PostfixNot)
        )
    }

    /// Tokens that begin a new operand.
    fn starts_operand(&self) -> bool {
        matches!(self, Token::Var(_) | Token::LParen)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Var(name) => write!(f, "{}", name),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// Splits `input` into tokens and inserts the implicit ANDs.
pub fn tokenize(input: &str) -> Vec<Token> {
    let tokens = scan(&mut input.chars().peekable());
    insert_implicit_and(tokens)
}

fn scan(data: &mut Peekable<Chars>) -> Vec<Token> {
    let mut output = Vec::new();
    while let Some(c) = data.next() {
        match c {
            c if c.is_whitespace() => {}
            '(' => output.push(Token::LParen),
            ')' => output.push(Token::RParen),
            ',' => output.push(Token::Comma),
            '0' | '1' => output.push(Token::Var(c.to_string())),
            c if c.is_ascii_alphabetic() => {
                let mut word = String::from(c);
                while let Some(&c) = data.peek() {
                    if !c.is_ascii_alphanumeric() {
                        break;
                    }
                    word.push(c);
                    data.next();
                }
                scan_word(&word, &mut output);
            }
            c => {
                if let Some(op) = Operator::from_symbol(c) {
                    output.push(Token::Operator(op));
                }
                // Anything else is dropped.
            }
        }
    }
    output
}

/// A gate name becomes an operator; any other word is a product of
/// single-letter variables, each keeping the digits that follow it (`ab12` is `a`, `b12`).
fn scan_word(word: &str, output: &mut Vec<Token>) {
    if let Ok(t) = word.parse::<NaryType>() {
        output.push(Token::Operator(Operator::Word(t)));
        return;
    }
    let mut chars = word.chars().peekable();
    while let Some(c) = chars.next() {
        let mut name = String::from(c);
        while let Some(&d) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            name.push(d);
            chars.next();
        }
        output.push(Token::Var(name));
    }
}

fn insert_implicit_and(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(prev) = output.last() {
            if prev.ends_operand() && token.starts_operand() {
                output.push(Token::Operator(Operator::IMPLICIT_AND));
            }
        }
        output.push(token);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn var(name: &str) -> Token {
        Token::Var(name.to_string())
    }

    const AND: Token = Token::Operator(Operator::IMPLICIT_AND);

    fn render(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_simple_sum() {
        let tokens = tokenize("a + b");
        assert_eq!(
            tokens,
            vec![var("a"), Token::Operator(Operator::Symbol('+', NaryType::Or)), var("b")]
        );
    }

    #[test]
    fn test_word_splitting() {
        assert_eq!(tokenize("ab12"), vec![var("a"), AND, var("b12")]);
        assert_eq!(render(&tokenize("xyz")), "x * y * z");
        assert_eq!(tokenize("x12"), vec![var("x12")]);
    }

    #[test]
    fn test_gate_words() {
        assert_eq!(render(&tokenize("a nand b")), "a NAND b");
        assert_eq!(
            tokenize("Xnor(a,b)"),
            vec![
                Token::Operator(Operator::Word(NaryType::Xnor)),
                Token::LParen,
                var("a"),
                Token::Comma,
                var("b"),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_implicit_and() {
        assert_eq!(render(&tokenize("(a+b)c")), "( a + b ) * c");
        assert_eq!(render(&tokenize("a'b")), "a ' * b");
        assert_eq!(render(&tokenize("a(b)")), "a * ( b )");
        assert_eq!(render(&tokenize(")(")), ") * (");
        assert_eq!(render(&tokenize("a !b")), "a ! b");
    }

    #[test]
    fn test_unknown_characters_dropped() {
        assert_eq!(render(&tokenize("a # $ b ? 7")), "a * b");
        assert!(tokenize("%%").is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(tokenize("1"), vec![var("1")]);
        assert_eq!(render(&tokenize("a 0")), "a * 0");
        assert_eq!(tokenize("a0"), vec![var("a0")]);
    }

    #[test]
    fn test_symbols() {
        let tokens = tokenize("a&b|c^d⊙e~f");
        let ops: Vec<Operator> = tokens
            .into_iter()
            .filter_map(|t| match t {
                Token::Operator(op) => Some(op),
                _ => None,
            })
            .collect();
        assert_eq!(
            ops,
            vec![
                Operator::Symbol('&', NaryType::And),
                Operator::Symbol('|', NaryType::Or),
                Operator::Symbol('^', NaryType::Xor),
                Operator::Symbol('⊙', NaryType::Xnor),
                Operator::PrefixNot('~'),
            ]
        );
    }
}
