//! Circuit graphs as exchanged with a graph editor.
//!
//! A graph is a flat list of nodes and edges related only through node ids.
//! An edge `source -> target` means the output of `source` feeds an input of
//! `target`; the operands of a gate are its incoming edges, in edge order.

use crate::gate::GateType;

/// Label of the output node.
pub const OUTPUT_LABEL: &str = "OUT";

/// Id of the input node for variable `name`.
pub fn input_id(name: &str) -> String {
    format!("input-{}", name)
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeKind {
    Input,
    Gate,
    Output,
}

/// A node of a circuit graph.
///
/// For inputs the label is the variable name, for gates the gate name
/// (see [`GateType`]), and for the output [`OUTPUT_LABEL`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub position: Position,
}

impl Node {
    pub fn input(name: &str, position: Position) -> Self {
        Node {
            id: input_id(name),
            kind: NodeKind::Input,
            label: name.to_string(),
            position,
        }
    }

    pub fn gate(id: impl Into<String>, gate: GateType, position: Position) -> Self {
        Node {
            id: id.into(),
            kind: NodeKind::Gate,
            label: gate.to_string(),
            position,
        }
    }

    pub fn output(id: impl Into<String>, position: Position) -> Self {
        Node {
            id: id.into(),
            kind: NodeKind::Output,
            label: OUTPUT_LABEL.to_string(),
            position,
        }
    }

    /// The gate named by the label, for gate nodes.
    pub fn gate_type(&self) -> Option<GateType> {
        match self.kind {
            NodeKind::Gate => self.label.parse().ok(),
            _ => None,
        }
    }
}

/// A directed edge, from the node producing a value to the node consuming it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Whether this is the edge into the output node.
    pub is_output: bool,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            is_output: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The first output node.
    pub fn output(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Output)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Input)
    }

    pub fn gates(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Gate)
    }

    /// Edges into `id`, in edge order.
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }

    /// Edges out of `id`, in edge order.
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn sample() -> Graph {
        let mut edge = Edge::new("e2", "node-0", "output-node");
        edge.is_output = true;
        Graph {
            nodes: vec![
                Node::input("a", Position::new(0.0, 0.0)),
                Node::input("b", Position::new(0.0, 180.0)),
                Node::gate("node-0", GateType::or(), Position::new(200.0, 100.0)),
                Node::output("output-node", Position::new(400.0, 100.0)),
            ],
            edges: vec![
                Edge::new("e0", "input-a", "node-0"),
                Edge::new("e1", "input-b", "node-0"),
                edge,
            ],
        }
    }

    #[test]
    fn test_lookup() {
        let graph = sample();
        assert_eq!(graph.node("input-b").map(|n| n.label.as_str()), Some("b"));
        assert!(graph.node("missing").is_none());
        assert_eq!(graph.output().map(|n| n.id.as_str()), Some("output-node"));
        assert_eq!(graph.inputs().count(), 2);
        assert_eq!(graph.gates().count(), 1);
    }

    #[test]
    fn test_incoming_and_outgoing() {
        let graph = sample();
        let sources: Vec<_> = graph.incoming("node-0").map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["input-a", "input-b"]);
        assert_eq!(graph.outgoing("node-0").count(), 1);
        assert!(graph.outgoing("node-0").all(|e| e.is_output));
    }

    #[test]
    fn test_gate_type() {
        let graph = sample();
        assert_eq!(graph.node("node-0").and_then(Node::gate_type), Some(GateType::or()));
        assert_eq!(graph.node("input-a").and_then(Node::gate_type), None);
    }
}
