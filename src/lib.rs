//! # bool-synth: boolean expressions and logic-gate circuits
//!
//! **`bool-synth`** converts between textual boolean-algebra expressions and
//! equivalent circuits of logic gates, in both directions, and ships a small
//! heuristic simplifier.
//!
//! ## The pipeline
//!
//! ```text
//! text --parse--> Expr --layout--> Graph --(edited externally)--> Graph --reconstruct--> Expr --stringify--> text
//! ```
//!
//! - Expressions are written with implicit AND (`ab`), `*`/`&`, `+`/`|`, `^`,
//!   `⊙`, postfix `'` or prefix `!`/`~`, the gate names used infix (`a NAND b`)
//!   and n-ary function calls (`NOR(a, b, c)`). The literals `0` and `1` are constants.
//! - A circuit is a flat list of input, gate and output nodes joined by edges.
//!   Laying out an expression assigns every node a position for display.
//!
//! All operations are pure functions over immutable values.
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use bool_synth::{evaluate, layout, parse, reconstruct, simplify, stringify};
//! use bool_synth::format::FormatConfig;
//!
//! // 1. Parse an expression
//! let e = parse("a'b + ab'").unwrap();
//!
//! // 2. Evaluate it under an assignment (unbound variables are false)
//! let assignment = HashMap::from([("a".to_string(), true)]);
//! assert!(evaluate(&e, &assignment));
//!
//! // 3. Lay it out as a circuit: the sum of products folds into one XOR gate
//! let graph = layout(&e);
//! assert_eq!(graph.gates().count(), 1);
//!
//! // 4. Rebuild an expression from the circuit
//! let back = reconstruct(&graph.nodes, &graph.edges).unwrap();
//! assert_eq!(stringify(&back, &FormatConfig::default()), "b^a");
//!
//! // 5. Simplify
//! assert_eq!(simplify(&parse("ab + ab'").unwrap()).to_string(), "a");
//! ```
//!
//! ## Core Components
//!
//! - **[`parser`]** and **[`lexer`]**: text to [`Expr`][crate::ast::Expr].
//! - **[`format`]**: [`Expr`][crate::ast::Expr] back to text.
//! - **[`layout`](mod@crate::layout)** and **[`reconstruct`](mod@crate::reconstruct)**: expressions to circuits and back.
//! - **[`simplify`](mod@crate::simplify)**: structural rewrites and truth-table pattern matching.
//! - **[`dot`]**: Graphviz export of circuits.

use std::collections::{BTreeSet, HashMap};

pub mod ast;
pub mod dot;
pub mod error;
pub mod format;
pub mod gate;
pub mod graph;
pub mod layout;
pub mod lexer;
pub mod parser;
pub mod reconstruct;
pub mod simplify;
pub mod truth_table;

pub use crate::ast::Expr;
pub use crate::error::{ParseError, ReconstructError};
pub use crate::format::stringify;
pub use crate::layout::layout;
pub use crate::parser::parse;
pub use crate::reconstruct::reconstruct;
pub use crate::simplify::simplify;

use crate::truth_table::TruthTable;

/// Evaluates `expr` under `assignment`, see [`Expr::eval`].
pub fn evaluate(expr: &Expr, assignment: &HashMap<String, bool>) -> bool {
    expr.eval(assignment)
}

/// Sorted variable names of `expr`, without the constants `0` and `1`.
pub fn collect_variables(expr: &Expr) -> BTreeSet<String> {
    expr.collect_variables()
}

/// Truth table of `expr` over its own variables.
pub fn truth_table(expr: &Expr) -> TruthTable {
    TruthTable::new(expr)
}
