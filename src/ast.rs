//! Expression trees.
//!
//! An [`Expr`] is a freestanding, exclusively owned tree: variables at the
//! leaves, NOT with exactly one operand, and n-ary gates with any number of
//! operands. Trees are built by the parser or by graph reconstruction and are
//! never mutated in place afterwards; transformations return new trees.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

use crate::gate::{GateType, NaryType};

/// Variable name of the constant `true`.
pub const TRUE: &str = "1";
/// Variable name of the constant `false`.
pub const FALSE: &str = "0";

/// A boolean expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A variable, or one of the literal constants [`TRUE`] / [`FALSE`].
    Var(String),
    Not(Box<Expr>),
    Nary(NaryType, Vec<Expr>),
}

/// The tag of an [`Expr`] node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Kind {
    And,
    Or,
    Not,
    Xor,
    Xnor,
    Nand,
    Nor,
    Var,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Kind::And => "AND",
            Kind::Or => "OR",
            Kind::Not => "NOT",
            Kind::Xor => "XOR",
            Kind::Xnor => "XNOR",
            Kind::Nand => "NAND",
            Kind::Nor => "NOR",
            Kind::Var => "VAR",
        };
        f.write_str(s)
    }
}

impl From<NaryType> for Kind {
    fn from(t: NaryType) -> Self {
        match t {
            NaryType::And => Kind::And,
            NaryType::Or => Kind::Or,
            NaryType::Xor => Kind::Xor,
            NaryType::Xnor => Kind::Xnor,
            NaryType::Nand => Kind::Nand,
            NaryType::Nor => Kind::Nor,
        }
    }
}

// Constructors
impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn constant(value: bool) -> Self {
        Expr::Var(if value { TRUE } else { FALSE }.to_string())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(value: Self) -> Self {
        Expr::Not(Box::new(value))
    }

    pub fn nary(t: NaryType, children: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Nary(t, children.into_iter().collect())
    }

    pub fn and(children: impl IntoIterator<Item = Expr>) -> Self {
        Self::nary(NaryType::And, children)
    }

    pub fn or(children: impl IntoIterator<Item = Expr>) -> Self {
        Self::nary(NaryType::Or, children)
    }

    pub fn xor(children: impl IntoIterator<Item = Expr>) -> Self {
        Self::nary(NaryType::Xor, children)
    }

    pub fn xnor(children: impl IntoIterator<Item = Expr>) -> Self {
        Self::nary(NaryType::Xnor, children)
    }

    pub fn nand(children: impl IntoIterator<Item = Expr>) -> Self {
        Self::nary(NaryType::Nand, children)
    }

    pub fn nor(children: impl IntoIterator<Item = Expr>) -> Self {
        Self::nary(NaryType::Nor, children)
    }
}

// Getters
impl Expr {
    pub fn kind(&self) -> Kind {
        match self {
            Expr::Var(_) => Kind::Var,
            Expr::Not(_) => Kind::Not,
            Expr::Nary(t, _) => Kind::from(*t),
        }
    }

    /// The gate this node lays out to, or `None` for variables.
    pub fn gate_type(&self) -> Option<GateType> {
        match self {
            Expr::Var(_) => None,
            Expr::Not(_) => Some(GateType::Not),
            Expr::Nary(t, _) => Some(GateType::Nary(*t)),
        }
    }

    /// Operands in left-to-right order. Empty for variables.
    pub fn children(&self) -> &[Expr] {
        match self {
            Expr::Var(_) => &[],
            Expr::Not(inner) => std::slice::from_ref(inner.as_ref()),
            Expr::Nary(_, children) => children,
        }
    }

    /// Name of a variable node (constants included).
    pub fn as_var(&self) -> Option<&str> {
        match self {
            Expr::Var(name) => Some(name),
            _ => None,
        }
    }

    /// Value of a constant node.
    pub fn as_const(&self) -> Option<bool> {
        match self.as_var()? {
            TRUE => Some(true),
            FALSE => Some(false),
            _ => None,
        }
    }

    /// Whether this is one of the constants [`TRUE`] / [`FALSE`].
    pub fn is_const(&self) -> bool {
        self.as_const().is_some()
    }

    /// Name of the variable under a `NOT`, for negated literals such as `a'`.
    pub fn as_negated_var(&self) -> Option<&str> {
        match self {
            Expr::Not(inner) => inner.as_var(),
            _ => None,
        }
    }

    /// Number of nodes on the longest root-to-leaf path. Leaves have depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Expr::depth).max().unwrap_or(0)
    }

    /// Total number of nodes.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Expr::size).sum::<usize>()
    }
}

impl Expr {
    /// Evaluates the expression under `assignment`.
    ///
    /// Unbound variables are `false`; the constants `"1"` and `"0"` ignore the assignment.
    pub fn eval(&self, assignment: &HashMap<String, bool>) -> bool {
        self.eval_with(&|name| assignment.get(name).copied().unwrap_or(false))
    }

    /// Evaluates the expression, looking variables up through `value`.
    pub fn eval_with<F>(&self, value: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            Expr::Var(name) => match name.as_str() {
                TRUE => true,
                FALSE => false,
                _ => value(name),
            },
            Expr::Not(inner) => !inner.eval_with(value),
            Expr::Nary(t, children) => t.eval(children.iter().map(|c| c.eval_with(value))),
        }
    }

    /// Sorted set of variable names, excluding the constants.
    pub fn collect_variables(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_names(false, &mut names);
        names
    }

    pub(crate) fn collect_names(&self, with_constants: bool, names: &mut BTreeSet<String>) {
        match self {
            Expr::Var(name) => {
                if with_constants || (name != TRUE && name != FALSE) {
                    names.insert(name.clone());
                }
            }
            _ => {
                for child in self.children() {
                    child.collect_names(with_constants, names);
                }
            }
        }
    }
}
