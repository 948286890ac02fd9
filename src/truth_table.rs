//! Truth tables of expressions.
//!
//! A table over n variables has 2ⁿ rows. Row i assigns the variables the bits
//! of i, with the first (lexicographically smallest) variable as the most
//! significant bit:
//!
//! ```text
//! row  a b | f
//!   0  0 0 | f(0,0)
//!   1  0 1 | f(0,1)
//!   2  1 0 | f(1,0)
//!   3  1 1 | f(1,1)
//! ```

use std::collections::{BTreeSet, HashMap};

use crate::ast::Expr;

/// Lower bound on the variable count of tables that cannot be built.
pub const MAX_VARIABLES: usize = usize::BITS as usize;

/// One row of a [`TruthTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Values of the table's variables, in the same order.
    pub assignment: Vec<bool>,
    pub result: bool,
}

/// The full input/output behavior of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    pub variables: Vec<String>,
    pub rows: Vec<Row>,
}

impl TruthTable {
    /// Tabulates `expr` over its own variables.
    ///
    /// Panics with [`MAX_VARIABLES`] or more variables, see [`TruthTable::with_variables`].
    ///
    /// ```
    /// use bool_synth::parser::parse;
    /// use bool_synth::truth_table::TruthTable;
    ///
    /// let table = TruthTable::new(&parse("a'b + ab'").unwrap());
    /// assert_eq!(table.variables, vec!["a", "b"]);
    /// assert_eq!(table.column(), vec![false, true, true, false]);
    /// ```
    pub fn new(expr: &Expr) -> Self {
        Self::with_variables(expr, expr.collect_variables().into_iter().collect())
    }

    /// Tabulates `expr` over the given variables. Variables of `expr` missing
    /// from `variables` evaluate to `false`.
    ///
    /// # Panics
    ///
    /// Panics if there are [`MAX_VARIABLES`] or more variables, since the row
    /// count would not fit in a `usize`.
    pub fn with_variables(expr: &Expr, variables: Vec<String>) -> Self {
        let n = variables.len();
        assert!(
            n < MAX_VARIABLES,
            "truth table over {} variables has more rows than fit in a usize",
            n
        );
        let rows = (0..1usize << n)
            .map(|i| {
                let assignment: Vec<bool> = (0..n).map(|j| (i >> (n - 1 - j)) & 1 == 1).collect();
                let result = expr.eval_with(&|name| {
                    variables
                        .iter()
                        .position(|v| v == name)
                        .is_some_and(|j| assignment[j])
                });
                Row { assignment, result }
            })
            .collect();
        TruthTable { variables, rows }
    }

    /// Results only, in row order.
    pub fn column(&self) -> Vec<bool> {
        self.rows.iter().map(|row| row.result).collect()
    }

    /// The column of a variable itself: its value in each row.
    pub fn variable_column(&self, index: usize) -> Vec<bool> {
        self.rows.iter().map(|row| row.assignment[index]).collect()
    }

    pub fn is_tautology(&self) -> bool {
        self.rows.iter().all(|row| row.result)
    }

    pub fn is_contradiction(&self) -> bool {
        self.rows.iter().all(|row| !row.result)
    }

    /// The assignment of row `i` as a map, as accepted by [`Expr::eval`].
    pub fn row_assignment(&self, i: usize) -> HashMap<String, bool> {
        self.variables
            .iter()
            .cloned()
            .zip(self.rows[i].assignment.iter().copied())
            .collect()
    }
}

impl Expr {
    /// Whether both expressions agree under every assignment of their variables.
    ///
    /// Runs in time exponential in the number of distinct variables, and panics
    /// with [`MAX_VARIABLES`] or more of them.
    pub fn equivalent(&self, other: &Expr) -> bool {
        let mut variables = BTreeSet::new();
        self.collect_names(false, &mut variables);
        other.collect_names(false, &mut variables);
        let variables: Vec<String> = variables.into_iter().collect();
        TruthTable::with_variables(self, variables.clone()).column()
            == TruthTable::with_variables(other, variables).column()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::parser::parse;
    use test_log::test;

    #[test]
    fn test_row_order() {
        let table = TruthTable::new(&parse("a").unwrap());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].assignment, vec![false]);
        assert_eq!(table.rows[1].assignment, vec![true]);

        let table = TruthTable::new(&parse("c + a + b").unwrap());
        assert_eq!(table.variables, vec!["a", "b", "c"]);
        assert_eq!(table.rows[1].assignment, vec![false, false, true]);
        assert_eq!(table.rows[4].assignment, vec![true, false, false]);
        assert_eq!(table.variable_column(0), vec![false, false, false, false, true, true, true, true]);
    }

    #[test]
    fn test_columns() {
        let table = TruthTable::new(&parse("ab").unwrap());
        assert_eq!(table.column(), vec![false, false, false, true]);
        let table = TruthTable::new(&parse("a XNOR b").unwrap());
        assert_eq!(table.column(), vec![true, false, false, true]);
    }

    #[test]
    fn test_constants_have_no_columns() {
        let table = TruthTable::new(&parse("a + 1").unwrap());
        assert_eq!(table.variables, vec!["a"]);
        assert!(table.is_tautology());

        let table = TruthTable::new(&parse("0").unwrap());
        assert!(table.variables.is_empty());
        assert_eq!(table.rows.len(), 1);
        assert!(table.is_contradiction());
    }

    #[test]
    fn test_row_assignment() {
        let e = parse("a + b'").unwrap();
        let table = TruthTable::new(&e);
        for (i, row) in table.rows.iter().enumerate() {
            assert_eq!(e.eval(&table.row_assignment(i)), row.result);
        }
    }

    #[test]
    #[should_panic(expected = "more rows than fit in a usize")]
    fn test_too_many_variables() {
        let e = Expr::or((0..MAX_VARIABLES).map(|i| Expr::var(format!("x{}", i))));
        TruthTable::new(&e);
    }

    #[test]
    fn test_equivalent() {
        let e = parse("(ab)'").unwrap();
        assert!(e.equivalent(&parse("a'+b'").unwrap()));
        assert!(!e.equivalent(&parse("a'b'").unwrap()));
        assert!(parse("a+a'").unwrap().equivalent(&parse("1").unwrap()));
        assert!(!parse("a").unwrap().equivalent(&parse("b").unwrap()));
    }
}
