//! Error types for parsing expressions and reconstructing them from circuits.

use std::fmt::{Display, Formatter};

use crate::gate::GateType;

/// Error type for malformed expression text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input contains no tokens.
    EmptyExpression,
    /// An operator could not find enough operands on the output stack.
    MissingOperand { operator: String },
    /// A `(` without a matching `)`, or the other way around.
    UnbalancedParenthesis,
    /// Function-call syntax with nothing between the parentheses, e.g. `AND()`.
    EmptyArguments { function: String },
    /// Parsing finished with more than one expression left over.
    TrailingInput { roots: usize },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyExpression => write!(f, "Empty expression"),
            ParseError::MissingOperand { operator } => {
                write!(f, "Invalid expression: missing operand for operator {}", operator)
            }
            ParseError::UnbalancedParenthesis => write!(f, "Invalid expression: unbalanced parentheses"),
            ParseError::EmptyArguments { function } => {
                write!(f, "Invalid expression: {}() needs at least one argument", function)
            }
            ParseError::TrailingInput { roots } => {
                write!(f, "Invalid expression at the end: {} expressions left without an operator", roots)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Error type for circuits that do not describe an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    /// The graph has no output node.
    NoOutputNode,
    /// An edge refers to a node id that is not in the graph.
    NodeNotFound(String),
    /// A gate node carries a label that names no known gate.
    UnknownGate { id: String, label: String },
    /// A gate node has an unacceptable number of inputs.
    Arity { id: String, gate: GateType, inputs: usize },
    /// The output node feeds another node.
    OutputAsSource(String),
    /// The node is reachable from itself.
    Cycle(String),
}

impl Display for ReconstructError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconstructError::NoOutputNode => write!(f, "No output node found"),
            ReconstructError::NodeNotFound(id) => write!(f, "Node {} not found", id),
            ReconstructError::UnknownGate { id, label } => {
                write!(f, "Node {} has unknown gate label '{}'", id, label)
            }
            ReconstructError::Arity { id, gate: GateType::Not, inputs } => {
                write!(f, "NOT gate must have exactly one input (node {} has {})", id, inputs)
            }
            ReconstructError::Arity { id, gate, inputs } => {
                write!(f, "{} gate must have at least one input (node {} has {})", gate, id, inputs)
            }
            ReconstructError::OutputAsSource(id) => write!(f, "Output node {} cannot drive another node", id),
            ReconstructError::Cycle(id) => write!(f, "Circuit contains a cycle through node {}", id),
        }
    }
}

impl std::error::Error for ReconstructError {}
