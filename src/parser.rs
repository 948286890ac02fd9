//! Operator-precedence (shunting-yard) parser.
//!
//! Supports postfix `'` and prefix `!`/`~` negation, infix binary operators
//! and n-ary function calls such as `NAND(a, b, c)`. Precedence, from high to
//! low:
//!
//! ```text
//! NOT (4) > AND family: * & AND NAND (3) > OR family: + | OR NOR XOR XNOR ^ ⊙ (2)
//! ```
//!
//! Binary operators of equal precedence associate to the left, so `a+b^c`
//! reads as `(a+b)^c`.

use std::str::FromStr;

use log::{debug, trace};

use crate::ast::Expr;
use crate::error::ParseError;
use crate::gate::NaryType;
use crate::lexer::{tokenize, Operator, Token};

/// Parses `text` into an expression tree.
///
/// No partial tree is returned on failure.
///
/// ```
/// use bool_synth::ast::Expr;
/// use bool_synth::parser::parse;
///
/// let e = parse("(a+b)c'").unwrap();
/// assert_eq!(
///     e,
///     Expr::and([
///         Expr::or([Expr::var("a"), Expr::var("b")]),
///         Expr::not(Expr::var("c")),
///     ])
/// );
/// ```
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    debug!("parse({:?})", text);
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    Parser::default().run(&tokens)
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Entries of the operator stack.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Pending {
    LParen,
    Operator(Operator),
    /// An open function call; its arguments start at `base` on the output stack.
    Call { gate: NaryType, base: usize },
}

#[derive(Debug, Default)]
struct Parser {
    operators: Vec<Pending>,
    output: Vec<Expr>,
}

impl Parser {
    fn run(mut self, tokens: &[Token]) -> Result<Expr, ParseError> {
        for (i, token) in tokens.iter().enumerate() {
            match token {
                Token::Var(name) => self.output.push(Expr::var(name.as_str())),
                Token::LParen => self.operators.push(Pending::LParen),
                Token::RParen => self.close_group()?,
                Token::Comma => {
                    self.reduce_group()?;
                }
                // After an operand a gate word is infix, even before `(`: `a AND (b+c)`.
                Token::Operator(Operator::Word(gate))
                    if tokens.get(i + 1) == Some(&Token::LParen)
                        && !i.checked_sub(1).is_some_and(|j| tokens[j].ends_operand()) =>
                {
                    self.operators.push(Pending::Call {
                        gate: *gate,
                        base: self.output.len(),
                    });
                }
                Token::Operator(op @ Operator::PostfixNot) => self.reduce(*op)?,
                Token::Operator(op @ Operator::PrefixNot(_)) => {
                    self.operators.push(Pending::Operator(*op));
                }
                Token::Operator(op) => {
                    while let Some(&Pending::Operator(top)) = self.operators.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }
                        self.operators.pop();
                        self.reduce(top)?;
                    }
                    self.operators.push(Pending::Operator(*op));
                }
            }
        }

        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::Operator(op) => self.reduce(op)?,
                Pending::LParen | Pending::Call { .. } => return Err(ParseError::UnbalancedParenthesis),
            }
        }

        match self.output.len() {
            0 => Err(ParseError::EmptyExpression),
            1 => Ok(self.output.remove(0)),
            roots => Err(ParseError::TrailingInput { roots }),
        }
    }

    /// Reduces operators down to the innermost `(`, which is left on the stack.
    /// Returns `false` if there is no open `(`.
    fn reduce_group(&mut self) -> Result<bool, ParseError> {
        while let Some(&pending) = self.operators.last() {
            match pending {
                Pending::Operator(op) => {
                    self.operators.pop();
                    self.reduce(op)?;
                }
                Pending::LParen => return Ok(true),
                Pending::Call { .. } => return Ok(false),
            }
        }
        Ok(false)
    }

    fn close_group(&mut self) -> Result<(), ParseError> {
        if !self.reduce_group()? {
            return Err(ParseError::UnbalancedParenthesis);
        }
        self.operators.pop(); // `(`
        if let Some(&Pending::Call { gate, base }) = self.operators.last() {
            self.operators.pop();
            let count = self.output.len().saturating_sub(base);
            if count == 0 {
                return Err(ParseError::EmptyArguments {
                    function: gate.to_string(),
                });
            }
            let children = self.output.split_off(self.output.len() - count);
            trace!("reduce {}(..) with {} arguments", gate, count);
            self.output.push(Expr::Nary(gate, children));
        }
        Ok(())
    }

    /// Pops the operands of `op` off the output stack and pushes the new node.
    fn reduce(&mut self, op: Operator) -> Result<(), ParseError> {
        let missing = || ParseError::MissingOperand {
            operator: op.to_string(),
        };
        let node = match op {
            Operator::PostfixNot | Operator::PrefixNot(_) => {
                let inner = self.output.pop().ok_or_else(missing)?;
                Expr::not(inner)
            }
            Operator::Symbol(_, gate) | Operator::Word(gate) => {
                let rhs = self.output.pop().ok_or_else(missing)?;
                let lhs = self.output.pop().ok_or_else(missing)?;
                Expr::Nary(gate, vec![lhs, rhs])
            }
        };
        trace!("reduce {} -> {:?}", op, node.kind());
        self.output.push(node);
        Ok(())
    }
}
