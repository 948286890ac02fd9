//! Best-effort simplification.
//!
//! Two stages:
//!
//! 1. [`rewrite`] applies structural rules bottom-up: double negations cancel,
//!    and De Morgan's law folds `NOT` over a gate whose operands are all negated.
//! 2. If at most [`MAX_SIMPLIFY_VARIABLES`] variables remain, the truth table of
//!    the rewritten expression is matched against a small catalogue of shapes:
//!    a constant, a variable or its negation, and XOR/XNOR of two variables.
//!
//! This is not a minimizer: anything outside the catalogue is returned as
//! rewritten.

use log::debug;

use crate::ast::Expr;
use crate::gate::NaryType;
use crate::truth_table::TruthTable;

/// Largest number of variables for which the truth table is computed.
pub const MAX_SIMPLIFY_VARIABLES: usize = 8;

/// Simplifies `expr`. The result is equivalent to `expr` and never larger than
/// its structural rewrite.
///
/// ```
/// use bool_synth::ast::Expr;
/// use bool_synth::parser::parse;
/// use bool_synth::simplify::simplify;
///
/// assert_eq!(simplify(&parse("aa'").unwrap()), Expr::constant(false));
/// assert_eq!(simplify(&parse("ab + ab'").unwrap()), Expr::var("a"));
/// ```
pub fn simplify(expr: &Expr) -> Expr {
    debug!("simplify({})", expr);
    let rewritten = rewrite(expr);

    let variables = rewritten.collect_variables().len();
    if variables > MAX_SIMPLIFY_VARIABLES {
        debug!("{} variables, skipping truth table", variables);
        return rewritten;
    }

    let table = TruthTable::new(&rewritten);
    match canonical(&table) {
        Some(result) => {
            debug!("truth table matches {}", result);
            result
        }
        None => rewritten,
    }
}

/// Structural rewrites, applied bottom-up:
///
/// ```text
/// NOT(NOT(x))              -> x
/// NOT(AND(NOT x, NOT y..)) -> OR(x, y..)
/// NOT(OR(NOT x, NOT y..))  -> AND(x, y..)
/// NAND(NOT x, NOT y..)     -> OR(x, y..)
/// NOR(NOT x, NOT y..)      -> AND(x, y..)
/// ```
pub fn rewrite(expr: &Expr) -> Expr {
    match expr {
        Expr::Var(_) => expr.clone(),
        Expr::Not(inner) => match rewrite(inner) {
            Expr::Not(x) => {
                debug!("cancel double negation of {}", x);
                *x
            }
            Expr::Nary(t @ (NaryType::And | NaryType::Or), children) if all_negated(&children) => {
                debug!("De Morgan: NOT({}) over negated operands to {}", t, t.dual());
                Expr::Nary(t.dual(), strip_negations(children))
            }
            inner => Expr::not(inner),
        },
        Expr::Nary(t, children) => {
            let children: Vec<Expr> = children.iter().map(rewrite).collect();
            match t {
                NaryType::Nand | NaryType::Nor if all_negated(&children) => {
                    let folded = t.base().dual();
                    debug!("De Morgan: {} over negated operands to {}", t, folded);
                    Expr::Nary(folded, strip_negations(children))
                }
                _ => Expr::Nary(*t, children),
            }
        }
    }
}

fn all_negated(children: &[Expr]) -> bool {
    !children.is_empty() && children.iter().all(|c| matches!(c, Expr::Not(_)))
}

fn strip_negations(children: Vec<Expr>) -> Vec<Expr> {
    children
        .into_iter()
        .map(|c| match c {
            Expr::Not(inner) => *inner,
            other => other,
        })
        .collect()
}

/// The first catalogue entry whose truth table equals `table`.
fn canonical(table: &TruthTable) -> Option<Expr> {
    if table.is_tautology() {
        return Some(Expr::constant(true));
    }
    if table.is_contradiction() {
        return Some(Expr::constant(false));
    }

    let column = table.column();
    for (i, name) in table.variables.iter().enumerate() {
        let own = table.variable_column(i);
        if column == own {
            return Some(Expr::var(name.as_str()));
        }
        if column.iter().zip(&own).all(|(x, y)| x != y) {
            return Some(Expr::not(Expr::var(name.as_str())));
        }
    }

    if let [a, b] = table.variables.as_slice() {
        let operands = || [Expr::var(a.as_str()), Expr::var(b.as_str())];
        match column.as_slice() {
            [false, true, true, false] => return Some(Expr::xor(operands())),
            [true, false, false, true] => return Some(Expr::xnor(operands())),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::parser::parse;
    use test_log::test;

    fn simplified(text: &str) -> Expr {
        simplify(&parse(text).unwrap())
    }

    fn rewritten(text: &str) -> Expr {
        rewrite(&parse(text).unwrap())
    }

    fn a() -> Expr {
        Expr::var("a")
    }

    fn b() -> Expr {
        Expr::var("b")
    }

    #[test]
    fn test_rewrite_double_negation() {
        assert_eq!(rewritten("a''"), a());
        assert_eq!(rewritten("a'''"), Expr::not(a()));
        assert_eq!(rewritten("!!(a+b)"), Expr::or([a(), b()]));
    }

    #[test]
    fn test_rewrite_de_morgan() {
        assert_eq!(rewritten("(a'b')'"), Expr::or([a(), b()]));
        assert_eq!(rewritten("(a'+b')'"), Expr::and([a(), b()]));
        assert_eq!(rewritten("NAND(a', b')"), Expr::or([a(), b()]));
        assert_eq!(rewritten("NOR(a', b', c')"), Expr::and([a(), b(), Expr::var("c")]));
    }

    #[test]
    fn test_rewrite_requires_every_operand_negated() {
        assert_eq!(rewritten("(a'b)'"), Expr::not(Expr::and([Expr::not(a()), b()])));
        assert_eq!(rewritten("NAND(a', b)"), Expr::nand([Expr::not(a()), b()]));
        assert_eq!(rewritten("(a'^b')'"), Expr::not(Expr::xor([Expr::not(a()), Expr::not(b())])));
    }

    #[test]
    fn test_simplify_constants() {
        assert_eq!(simplified("aa'"), Expr::constant(false));
        assert_eq!(simplified("a + a'"), Expr::constant(true));
        assert_eq!(simplified("1"), Expr::constant(true));
        assert_eq!(simplified("a*0"), Expr::constant(false));
    }

    #[test]
    fn test_simplify_literals() {
        assert_eq!(simplified("ab + ab'"), a());
        assert_eq!(simplified("(a+b)(a+b')"), a());
        assert_eq!(simplified("a'b' + a'b"), Expr::not(a()));
        assert_eq!(simplified("b + bc"), b());
    }

    #[test]
    fn test_simplify_exclusive() {
        assert_eq!(simplified("a'b + ab'"), Expr::xor([a(), b()]));
        assert_eq!(simplified("ab + a'b'"), Expr::xnor([a(), b()]));
        assert_eq!(simplified("(a^b)'"), Expr::xnor([a(), b()]));
    }

    #[test]
    fn test_simplify_keeps_unmatched() {
        assert_eq!(simplified("ab"), Expr::and([a(), b()]));
        assert_eq!(simplified("(a'b')'"), Expr::or([a(), b()]));
        let e = parse("a^b^c").unwrap();
        assert_eq!(simplify(&e), e);
    }

    #[test]
    fn test_simplify_variable_limit() {
        // Nine variables: only structural rewrites apply.
        let e = parse("abcdefghi + (abcdefghi)'").unwrap();
        assert_eq!(simplify(&e), e);
        let e = parse("abcdefgh + (abcdefgh)'").unwrap();
        assert_eq!(simplify(&e), Expr::constant(true));
    }

    #[test]
    fn test_simplify_is_sound() {
        for text in ["a'b + ab'", "(a+b)'c", "NAND(a', b', c)", "ab + a'c + bc", "a''b"] {
            let e = parse(text).unwrap();
            assert!(simplify(&e).equivalent(&e), "{}", text);
        }
    }
}
