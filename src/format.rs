//! Rendering expressions back to text.
//!
//! Output re-parses to an equivalent expression as long as every variable
//! name is one the lexer produces: a single letter followed by optional
//! digits (`a`, `x12`), or a constant. Longer names, such as input labels
//! read back by [`reconstruct`](crate::reconstruct::reconstruct), are written
//! as is, so `AND(ab, c)` prints as `abc` and re-parses as `a*b*c`.
//!
//! Parentheses are inserted only where the parser would otherwise group
//! operands differently:
//!
//! - products are written by juxtaposition (`ab`, `a(b+c)`);
//! - sums use `+`, `^` and `⊙`, and a sum nested in a sum of another
//!   operator is parenthesized, since all three share one precedence level;
//! - negation is postfix, `a'` for atoms and `(ab)'` otherwise;
//! - NAND and NOR are written as a negated product or sum, or, in expanded
//!   mode, distributed over their operands by De Morgan's law.

use std::fmt::{Display, Formatter};

use crate::ast::Expr;
use crate::gate::NaryType;

/// Configuration options for rendering expressions.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FormatConfig {
    /// Write NAND as `a'+b'` and NOR as `a'b'` instead of `(ab)'` and `(a+b)'` (default: false).
    pub expanded: bool,
}

impl FormatConfig {
    pub fn expanded() -> Self {
        Self { expanded: true }
    }
}

/// Renders `expr` as text.
///
/// ```
/// use bool_synth::format::{stringify, FormatConfig};
/// use bool_synth::parser::parse;
///
/// let e = parse("NAND(a, b+c)").unwrap();
/// assert_eq!(stringify(&e, &FormatConfig::default()), "(a(b+c))'");
/// assert_eq!(stringify(&e, &FormatConfig::expanded()), "a'+(b+c)'");
/// ```
pub fn stringify(expr: &Expr, config: &FormatConfig) -> String {
    Renderer { config }.render(expr).text
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&stringify(self, &FormatConfig::default()))
    }
}

/// How tightly a rendered piece binds.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Binding {
    /// Variable or postfix negation.
    Atom,
    Product,
    Sum(NaryType),
}

struct Piece {
    text: String,
    binding: Binding,
}

impl Piece {
    fn atom(text: String) -> Self {
        Piece {
            text,
            binding: Binding::Atom,
        }
    }

    fn negate(self) -> Self {
        match self.binding {
            Binding::Atom => Piece::atom(self.text + "'"),
            _ => Piece::atom(format!("({})'", self.text)),
        }
    }
}

struct Renderer<'a> {
    config: &'a FormatConfig,
}

impl Renderer<'_> {
    fn render(&self, expr: &Expr) -> Piece {
        match expr {
            Expr::Var(name) => Piece::atom(name.clone()),
            Expr::Not(inner) => self.render(inner).negate(),
            Expr::Nary(t, children) => self.render_gate(*t, children),
        }
    }

    fn render_gate(&self, t: NaryType, children: &[Expr]) -> Piece {
        match children {
            [] => Piece::atom(Expr::constant(t.eval(std::iter::empty())).to_string()),
            [child] if t.is_inverting() => self.render(child).negate(),
            [child] => self.render(child),
            _ => match t {
                NaryType::And => self.product(children.iter().map(|c| self.render(c))),
                NaryType::Or | NaryType::Xor => self.sum(t, children.iter().map(|c| self.render(c))),
                NaryType::Xnor if children.len() == 2 => {
                    self.sum(t, children.iter().map(|c| self.render(c)))
                }
                NaryType::Xnor => self.sum(NaryType::Xor, children.iter().map(|c| self.render(c))).negate(),
                NaryType::Nand if self.config.expanded => {
                    self.sum(NaryType::Or, children.iter().map(|c| self.render_negated(c)))
                }
                NaryType::Nand => self.product(children.iter().map(|c| self.render(c))).negate(),
                NaryType::Nor if self.config.expanded => {
                    self.product(children.iter().map(|c| self.render_negated(c)))
                }
                NaryType::Nor => self.sum(NaryType::Or, children.iter().map(|c| self.render(c))).negate(),
            },
        }
    }

    /// Renders the complement of `expr`, cancelling a double negation.
    fn render_negated(&self, expr: &Expr) -> Piece {
        match expr {
            Expr::Not(inner) => self.render(inner),
            _ => self.render(expr).negate(),
        }
    }

    fn product(&self, pieces: impl Iterator<Item = Piece>) -> Piece {
        let mut text = String::new();
        for piece in pieces {
            let part = match piece.binding {
                Binding::Atom | Binding::Product => piece.text,
                Binding::Sum(_) => format!("({})", piece.text),
            };
            if needs_separator(&text, &part) {
                text.push('*');
            }
            text.push_str(&part);
        }
        Piece {
            text,
            binding: Binding::Product,
        }
    }

    fn sum(&self, t: NaryType, pieces: impl Iterator<Item = Piece>) -> Piece {
        let symbol = match t {
            NaryType::Or => "+",
            NaryType::Xor => "^",
            NaryType::Xnor => "⊙",
            _ => unreachable!("{} is not written as a sum", t),
        };
        let parts: Vec<String> = pieces
            .map(|piece| match piece.binding {
                Binding::Sum(inner) if inner != t => format!("({})", piece.text),
                _ => piece.text,
            })
            .collect();
        Piece {
            text: parts.join(symbol),
            binding: Binding::Sum(t),
        }
    }
}

/// Whether writing `next` right after `prev` would lex differently from the two
/// operands juxtaposed: a name followed by a digit merges into one name, and
/// letters can spell out a gate name (`o` `r` reads as `OR`).
fn needs_separator(prev: &str, next: &str) -> bool {
    let tail: String = {
        let mut tail: Vec<char> = prev.chars().rev().take_while(char::is_ascii_alphanumeric).collect();
        tail.reverse();
        tail.into_iter().collect()
    };
    if tail.is_empty() {
        return false;
    }
    let head: String = next.chars().take_while(char::is_ascii_alphanumeric).collect();
    match head.chars().next() {
        None => false,
        Some(c) if c.is_ascii_digit() => true,
        Some(_) => {
            let run = tail.trim_start_matches(|c: char| c.is_ascii_digit()).to_string() + &head;
            run.parse::<NaryType>().is_ok()
        }
    }
}
