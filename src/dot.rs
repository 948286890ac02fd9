//! Circuit graph to DOT (Graphviz) conversion.
//!
//! This module renders a circuit [`Graph`] in DOT format, which can be visualized
//! using Graphviz tools like `dot` or online viewers.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **Input nodes** are rendered as circles, grouped in the leftmost rank
//! - **Gate nodes** are rendered as boxes labeled with the gate name
//! - **The output node** is rendered as a double circle in the rightmost rank
//! - **Edges** point from the producing node to the consuming node, and the
//!   edge into the output node is drawn bold
//!
//! The layout positions of the nodes are not used; Graphviz arranges the graph
//! left-to-right on its own.
//!
//! # Examples
//!
//! ```
//! use bool_synth::layout::layout;
//! use bool_synth::parser::parse;
//!
//! let graph = layout(&parse("a'b + c").unwrap());
//! let dot = graph.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use crate::graph::{Graph, NodeKind};

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
///
/// # Examples
///
/// ```
/// use bool_synth::dot::DotConfig;
/// use bool_synth::layout::layout;
/// use bool_synth::parser::parse;
///
/// let graph = layout(&parse("a + b").unwrap());
/// let config = DotConfig {
///     gate_shape: "invhouse",
///     ..DotConfig::default()
/// };
///
/// let dot = graph.to_dot_with_config(&config).unwrap();
/// assert!(dot.contains("invhouse"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for input nodes (default: "circle")
    pub input_shape: &'static str,
    /// Shape for gate nodes (default: "box")
    pub gate_shape: &'static str,
    /// Shape for the output node (default: "doublecircle")
    pub output_shape: &'static str,
    /// Style for edges between nodes (default: "solid")
    pub edge_style: &'static str,
    /// Style for the edge into the output node (default: "bold")
    pub output_edge_style: &'static str,
    /// Whether to rank all inputs together on the left (default: true)
    pub rank_inputs: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            input_shape: "circle",
            gate_shape: "box",
            output_shape: "doublecircle",
            edge_style: "solid",
            output_edge_style: "bold",
            rank_inputs: true,
        }
    }
}

impl Graph {
    /// Converts the circuit to DOT (Graphviz) format.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - A DOT-formatted string representation of the circuit
    /// * `Err(std::fmt::Error)` - If string formatting fails (rare)
    ///
    /// # Examples
    ///
    /// ```
    /// use bool_synth::layout::layout;
    /// use bool_synth::parser::parse;
    ///
    /// let graph = layout(&parse("NAND(a, b, c)").unwrap());
    /// let dot = graph.to_dot().unwrap();
    /// println!("{}", dot);
    ///
    /// // To render the graph:
    /// // std::fs::write("output.dot", dot).unwrap();
    /// // Then run: dot -Tpng output.dot -o output.png
    /// ```
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the circuit to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir=LR;")?;

        if config.rank_inputs {
            writeln!(dot, "{{ rank=source")?;
        }
        for node in self.inputs() {
            writeln!(
                dot,
                "{} [shape={}, label={}];",
                quote(&node.id),
                config.input_shape,
                quote(&node.label)
            )?;
        }
        if config.rank_inputs {
            writeln!(dot, "}}")?;
        }

        for node in self.gates() {
            writeln!(
                dot,
                "{} [shape={}, label={}];",
                quote(&node.id),
                config.gate_shape,
                quote(&node.label)
            )?;
        }

        writeln!(dot, "{{ rank=sink")?;
        for node in self.nodes.iter().filter(|n| n.kind == NodeKind::Output) {
            writeln!(
                dot,
                "{} [shape={}, label={}];",
                quote(&node.id),
                config.output_shape,
                quote(&node.label)
            )?;
        }
        writeln!(dot, "}}")?;

        for edge in &self.edges {
            let style = if edge.is_output {
                config.output_edge_style
            } else {
                config.edge_style
            };
            writeln!(
                dot,
                "{} -> {} [style={}];",
                quote(&edge.source),
                quote(&edge.target),
                style
            )?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

/// Quotes `s` as a DOT string literal.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
