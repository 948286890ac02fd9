//! Rebuilding expressions from circuit graphs.
//!
//! Reconstruction starts at the output node and walks edges backwards: every
//! edge into a gate contributes one operand, in edge order, and input nodes
//! become variables named by their labels.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::ast::Expr;
use crate::error::ReconstructError;
use crate::gate::GateType;
use crate::graph::{Edge, Graph, Node, NodeKind};

/// Variable name of the expression returned for an unconnected output node.
pub const PLACEHOLDER: &str = "?";

/// Rebuilds the expression computed by the output node of a circuit.
///
/// An output node with no incoming edge yields the placeholder variable
/// [`PLACEHOLDER`] instead of an error, so graphs under construction can be
/// reconstructed at any time. If several edges enter the output, the first is
/// used.
///
/// Input labels become variable names unchanged. A label the lexer would split,
/// such as `ab`, does not survive a trip through text: see [`crate::format`].
///
/// ```
/// use bool_synth::graph::{Edge, Node, Position};
/// use bool_synth::reconstruct::reconstruct;
///
/// let nodes = vec![
///     Node::input("a", Position::default()),
///     Node::gate("g", "NOT".parse().unwrap(), Position::default()),
///     Node::output("out", Position::default()),
/// ];
/// let edges = vec![Edge::new("e0", "input-a", "g"), Edge::new("e1", "g", "out")];
/// assert_eq!(reconstruct(&nodes, &edges).unwrap().to_string(), "a'");
/// ```
pub fn reconstruct(nodes: &[Node], edges: &[Edge]) -> Result<Expr, ReconstructError> {
    debug!("reconstruct({} nodes, {} edges)", nodes.len(), edges.len());

    let output = nodes
        .iter()
        .find(|n| n.kind == NodeKind::Output)
        .ok_or(ReconstructError::NoOutputNode)?;
    let Some(root) = edges.iter().find(|e| e.target == output.id) else {
        debug!("output {} is not connected", output.id);
        return Ok(Expr::var(PLACEHOLDER));
    };

    let mut by_id = HashMap::new();
    for node in nodes {
        by_id.entry(node.id.as_str()).or_insert(node);
    }
    let mut walker = Walker {
        nodes: by_id,
        edges,
        on_path: HashSet::new(),
    };
    walker.build(&root.source)
}

impl Graph {
    /// Rebuilds the expression of this circuit, see [`reconstruct`].
    pub fn to_expr(&self) -> Result<Expr, ReconstructError> {
        reconstruct(&self.nodes, &self.edges)
    }
}

struct Walker<'a> {
    nodes: HashMap<&'a str, &'a Node>,
    edges: &'a [Edge],
    /// Gates on the path from the output to the node being built.
    on_path: HashSet<&'a str>,
}

impl<'a> Walker<'a> {
    fn build(&mut self, id: &str) -> Result<Expr, ReconstructError> {
        let node = *self
            .nodes
            .get(id)
            .ok_or_else(|| ReconstructError::NodeNotFound(id.to_string()))?;

        let gate = match node.kind {
            NodeKind::Input => return Ok(Expr::var(node.label.as_str())),
            NodeKind::Output => return Err(ReconstructError::OutputAsSource(node.id.clone())),
            NodeKind::Gate => node
                .label
                .parse::<GateType>()
                .map_err(|_| ReconstructError::UnknownGate {
                    id: node.id.clone(),
                    label: node.label.clone(),
                })?,
        };

        if !self.on_path.insert(node.id.as_str()) {
            return Err(ReconstructError::Cycle(node.id.clone()));
        }

        let sources: Vec<&'a str> = self
            .edges
            .iter()
            .filter(|e| e.target == node.id)
            .map(|e| e.source.as_str())
            .collect();
        let arity_error = || ReconstructError::Arity {
            id: node.id.clone(),
            gate,
            inputs: sources.len(),
        };
        if !gate.accepts(sources.len()) {
            return Err(arity_error());
        }

        let children = sources
            .iter()
            .map(|source| self.build(source))
            .collect::<Result<Vec<_>, _>>()?;
        self.on_path.remove(node.id.as_str());

        let expr = match gate {
            GateType::Not => {
                let [child]: [Expr; 1] = children.try_into().map_err(|_| arity_error())?;
                Expr::not(child)
            }
            GateType::Nary(t) => Expr::Nary(t, children),
        };
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::graph::Position;
    use crate::layout::layout;
    use crate::parser::parse;
    use test_log::test;

    fn at() -> Position {
        Position::default()
    }

    fn gate(id: &str, label: &str) -> Node {
        Node {
            id: id.to_string(),
            kind: NodeKind::Gate,
            label: label.to_string(),
            position: at(),
        }
    }

    #[test]
    fn test_layout_round_trip() {
        for text in ["a", "ab", "a+b'c", "(a+b)'", "NAND(a,b,c)", "a'b+ab'", "x ^ y ^ z", "a + 1"] {
            let e = parse(text).unwrap();
            let back = layout(&e).to_expr().unwrap();
            assert!(back.equivalent(&e), "{} came back as {}", text, back);
        }
    }

    #[test]
    fn test_operand_order_follows_edges() {
        let nodes = vec![
            Node::input("a", at()),
            Node::input("b", at()),
            gate("g", "OR"),
            Node::output("out", at()),
        ];
        let edges = vec![
            Edge::new("e0", "input-b", "g"),
            Edge::new("e1", "input-a", "g"),
            Edge::new("e2", "g", "out"),
        ];
        assert_eq!(reconstruct(&nodes, &edges), Ok(Expr::or([Expr::var("b"), Expr::var("a")])));
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let nodes = vec![Node::input("A", at()), gate("g", "nand"), Node::output("out", at())];
        let edges = vec![
            Edge::new("e0", "input-A", "g"),
            Edge::new("e1", "input-A", "g"),
            Edge::new("e2", "g", "out"),
        ];
        assert_eq!(
            reconstruct(&nodes, &edges),
            Ok(Expr::nand([Expr::var("A"), Expr::var("A")]))
        );
    }

    #[test]
    fn test_unconnected_output_is_placeholder() {
        let nodes = vec![Node::input("a", at()), Node::output("out", at())];
        assert_eq!(reconstruct(&nodes, &[]), Ok(Expr::var(PLACEHOLDER)));
    }

    #[test]
    fn test_no_output() {
        let nodes = vec![Node::input("a", at())];
        assert_eq!(reconstruct(&nodes, &[]), Err(ReconstructError::NoOutputNode));
        assert_eq!(Graph::new().to_expr(), Err(ReconstructError::NoOutputNode));
    }

    #[test]
    fn test_not_arity() {
        let nodes = vec![
            Node::input("a", at()),
            Node::input("b", at()),
            gate("g", "NOT"),
            Node::output("out", at()),
        ];
        let edges = vec![
            Edge::new("e0", "input-a", "g"),
            Edge::new("e1", "input-b", "g"),
            Edge::new("e2", "g", "out"),
        ];
        assert_eq!(
            reconstruct(&nodes, &edges),
            Err(ReconstructError::Arity {
                id: "g".to_string(),
                gate: GateType::Not,
                inputs: 2
            })
        );
        assert_eq!(
            reconstruct(&nodes, &edges[2..]),
            Err(ReconstructError::Arity {
                id: "g".to_string(),
                gate: GateType::Not,
                inputs: 0
            })
        );
    }

    #[test]
    fn test_nary_without_inputs() {
        let nodes = vec![gate("g", "AND"), Node::output("out", at())];
        let edges = vec![Edge::new("e0", "g", "out")];
        assert_eq!(
            reconstruct(&nodes, &edges),
            Err(ReconstructError::Arity {
                id: "g".to_string(),
                gate: GateType::and(),
                inputs: 0
            })
        );
    }

    #[test]
    fn test_single_input_nary() {
        let nodes = vec![Node::input("a", at()), gate("g", "XOR"), Node::output("out", at())];
        let edges = vec![Edge::new("e0", "input-a", "g"), Edge::new("e1", "g", "out")];
        assert_eq!(reconstruct(&nodes, &edges), Ok(Expr::xor([Expr::var("a")])));
    }

    #[test]
    fn test_malformed_graphs() {
        let nodes = vec![gate("g", "MUX"), Node::output("out", at())];
        let edges = vec![Edge::new("e0", "g", "out")];
        assert_eq!(
            reconstruct(&nodes, &edges),
            Err(ReconstructError::UnknownGate {
                id: "g".to_string(),
                label: "MUX".to_string()
            })
        );

        let nodes = vec![Node::output("out", at())];
        let edges = vec![Edge::new("e0", "ghost", "out")];
        assert_eq!(
            reconstruct(&nodes, &edges),
            Err(ReconstructError::NodeNotFound("ghost".to_string()))
        );

        let nodes = vec![gate("g", "NOT"), Node::output("out", at())];
        let edges = vec![Edge::new("e0", "out", "g"), Edge::new("e1", "g", "out")];
        assert_eq!(
            reconstruct(&nodes, &edges),
            Err(ReconstructError::OutputAsSource("out".to_string()))
        );
    }

    #[test]
    fn test_cycle() {
        let nodes = vec![gate("g", "NOT"), gate("h", "NOT"), Node::output("out", at())];
        let edges = vec![
            Edge::new("e0", "h", "g"),
            Edge::new("e1", "g", "h"),
            Edge::new("e2", "g", "out"),
        ];
        assert_eq!(reconstruct(&nodes, &edges), Err(ReconstructError::Cycle("g".to_string())));
    }

    #[test]
    fn test_shared_gate_is_not_a_cycle() {
        let nodes = vec![
            Node::input("a", at()),
            gate("n", "NOT"),
            gate("g", "AND"),
            Node::output("out", at()),
        ];
        let edges = vec![
            Edge::new("e0", "input-a", "n"),
            Edge::new("e1", "n", "g"),
            Edge::new("e2", "n", "g"),
            Edge::new("e3", "g", "out"),
        ];
        let a_ = Expr::not(Expr::var("a"));
        assert_eq!(reconstruct(&nodes, &edges), Ok(Expr::and([a_.clone(), a_])));
    }
}
