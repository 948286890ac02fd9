//! Laying expressions out as positioned circuit graphs.
//!
//! Inputs sit in a single column at `x = 0`, one per distinct variable name,
//! sorted. Gates are placed right of their operands, one column per level of
//! the tree, and centered vertically over the span of their operands. The
//! output node sits one column right of the root.
//!
//! Before placement, [`fold_gates`] collapses expanded shapes back into the
//! compact gate they spell, so `(ab)'` lays out as a single NAND gate and
//! `a'b+ab'` as a single XOR gate.

use std::collections::BTreeSet;

use log::debug;

use crate::ast::Expr;
use crate::gate::{GateType, NaryType};
use crate::graph::{input_id, Edge, Graph, Node, Position};

/// Id of the output node of a laid out graph.
pub const OUTPUT_ID: &str = "output-node";

/// Configuration options for layout geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Vertical footprint of a single node (default: 80).
    pub node_height: f64,
    /// Distance between adjacent columns (default: 200).
    pub horizontal_spacing: f64,
    /// Gap between vertically stacked operands (default: 100).
    pub vertical_spacing: f64,
    /// Vertical offset the root subtree is placed at (default: 100).
    pub top: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_height: 80.0,
            horizontal_spacing: 200.0,
            vertical_spacing: 100.0,
            top: 100.0,
        }
    }
}

/// Lays `expr` out with the default geometry.
///
/// ```
/// use bool_synth::layout::layout;
/// use bool_synth::parser::parse;
///
/// let graph = layout(&parse("a'b + ab'").unwrap());
/// let labels: Vec<_> = graph.gates().map(|n| n.label.as_str()).collect();
/// assert_eq!(labels, vec!["XOR"]);
/// assert_eq!(graph.inputs().count(), 2);
/// ```
pub fn layout(expr: &Expr) -> Graph {
    layout_with_config(expr, &LayoutConfig::default())
}

pub fn layout_with_config(expr: &Expr, config: &LayoutConfig) -> Graph {
    let folded = fold_gates(expr);
    debug!("layout({}) folded to {}", expr, folded);

    let mut builder = Builder {
        config,
        graph: Graph::new(),
        next_gate: 0,
    };

    let mut names = BTreeSet::new();
    folded.collect_names(true, &mut names);
    for (i, name) in names.iter().enumerate() {
        let y = i as f64 * (config.node_height + config.vertical_spacing);
        builder.graph.nodes.push(Node::input(name, Position::new(0.0, y)));
    }

    let start_x = folded.depth() as f64 * config.horizontal_spacing;
    let root = builder.place(&folded, start_x, config.top);
    let root_y = builder
        .graph
        .node(&root.id)
        .map_or(config.top, |n| n.position.y);

    let mut graph = builder.graph;
    graph.nodes.push(Node::output(
        OUTPUT_ID,
        Position::new(start_x + config.horizontal_spacing, root_y),
    ));
    let mut edge = Edge::new(format!("edge-{}-{}", OUTPUT_ID, root.id), root.id, OUTPUT_ID);
    edge.is_output = true;
    graph.edges.push(edge);

    debug!(
        "layout: {} inputs, {} gates, {} edges",
        graph.inputs().count(),
        graph.gates().count(),
        graph.edges.len()
    );
    graph
}

/// A placed subtree: the id of its top node and its vertical footprint.
struct Placed {
    id: String,
    height: f64,
}

/// Layout state for one call: the graph so far and the next gate number.
struct Builder<'a> {
    config: &'a LayoutConfig,
    graph: Graph,
    next_gate: usize,
}

impl Builder<'_> {
    fn place(&mut self, expr: &Expr, x: f64, y: f64) -> Placed {
        let gate = match expr {
            Expr::Var(name) => {
                return Placed {
                    id: input_id(name),
                    height: self.config.node_height,
                }
            }
            Expr::Not(_) => GateType::Not,
            Expr::Nary(t, _) => GateType::Nary(*t),
        };

        // Gates are numbered before their operands.
        let id = format!("node-{}", self.next_gate);
        self.next_gate += 1;

        let mut total = 0.0;
        let mut child_y = y;
        for (i, child) in expr.children().iter().enumerate() {
            let placed = self.place(child, x - self.config.horizontal_spacing, child_y);
            self.graph
                .edges
                .push(Edge::new(format!("edge-{}-{}-{}", id, placed.id, i), &placed.id, &id));
            child_y += placed.height + self.config.vertical_spacing;
            total += placed.height;
            if i > 0 {
                total += self.config.vertical_spacing;
            }
        }

        let node_y = y + total / 2.0 - self.config.node_height / 2.0;
        self.graph.nodes.push(Node::gate(&id, gate, Position::new(x, node_y)));
        Placed {
            id,
            height: total.max(self.config.node_height),
        }
    }
}

/// Collapses expanded gate shapes, bottom-up:
///
/// - `NOT(AND(..))`, `NOT(OR(..))` and `NOT(XOR(..))` become NAND, NOR and XNOR
///   over the same operands;
/// - `a'b + ab'` (in any operand order) becomes `XOR(a, b)`;
/// - `ab + a'b'` becomes `XNOR(a, b)`.
///
/// The result is equivalent to `expr`.
pub fn fold_gates(expr: &Expr) -> Expr {
    match expr {
        Expr::Var(_) => expr.clone(),
        Expr::Not(inner) => match fold_gates(inner) {
            Expr::Nary(t @ (NaryType::And | NaryType::Or | NaryType::Xor), children) => {
                debug!("fold NOT({}) into {}", t, t.negated());
                Expr::Nary(t.negated(), children)
            }
            inner => Expr::not(inner),
        },
        Expr::Nary(t, children) => {
            let children: Vec<Expr> = children.iter().map(fold_gates).collect();
            if *t == NaryType::Or {
                if let Some(folded) = fold_exclusive(&children) {
                    return folded;
                }
            }
            Expr::Nary(*t, children)
        }
    }
}

/// Recognizes the two-product sums spelling XOR and XNOR of two variables.
fn fold_exclusive(terms: &[Expr]) -> Option<Expr> {
    let [Expr::Nary(NaryType::And, left), Expr::Nary(NaryType::And, right)] = terms else {
        return None;
    };
    if left.len() != 2 || right.len() != 2 {
        return None;
    }

    // a'b + ab': each product mixes a variable and a negated variable.
    if let (Some((v1, n1)), Some((v2, n2))) = (mixed_literals(left), mixed_literals(right)) {
        if v1 == n2 && n1 == v2 {
            debug!("fold sum of products into XOR({}, {})", v1, n1);
            return Some(Expr::xor([Expr::var(v1), Expr::var(n1)]));
        }
    }

    // ab + a'b': one product of variables, one of their negations.
    let names = |f: fn(&Expr) -> Option<&str>, operands: &[Expr]| -> Option<[String; 2]> {
        let mut names = [f(&operands[0])?.to_string(), f(&operands[1])?.to_string()];
        names.sort();
        Some(names)
    };
    let plain = names(Expr::as_var, left.as_slice()).or_else(|| names(Expr::as_var, right.as_slice()))?;
    let negated = names(Expr::as_negated_var, left.as_slice())
        .or_else(|| names(Expr::as_negated_var, right.as_slice()))?;
    if plain == negated {
        debug!("fold sum of products into XNOR({}, {})", plain[0], plain[1]);
        let [a, b] = plain;
        return Some(Expr::xnor([Expr::var(a), Expr::var(b)]));
    }
    None
}

/// The first plain and the first negated variable among `operands`.
fn mixed_literals(operands: &[Expr]) -> Option<(&str, &str)> {
    let var = operands.iter().find_map(Expr::as_var)?;
    let negated = operands.iter().find_map(Expr::as_negated_var)?;
    Some((var, negated))
}
