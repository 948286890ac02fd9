//! Gate vocabulary shared by expressions and circuit graphs.
//!
//! Every operator of the expression language maps onto one of the gate types
//! below. [`NaryType`] covers the gates that accept any number of operands,
//! and [`GateType`] adds the unary NOT to name every gate node of a circuit.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Precedence of the unary NOT (postfix `'`, prefix `!`/`~`).
pub const NOT_PRECEDENCE: u8 = 4;

/// Gates that combine an arbitrary number of operands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NaryType {
    And,
    Or,
    Xor,
    Xnor,
    Nand,
    Nor,
}

impl NaryType {
    pub const ALL: [NaryType; 6] = [
        NaryType::And,
        NaryType::Or,
        NaryType::Xor,
        NaryType::Xnor,
        NaryType::Nand,
        NaryType::Nor,
    ];
}

// Getters
impl NaryType {
    /// Canonical uppercase name, as used in function-call syntax and graph labels.
    pub const fn name(self) -> &'static str {
        match self {
            NaryType::And => "AND",
            NaryType::Or => "OR",
            NaryType::Xor => "XOR",
            NaryType::Xnor => "XNOR",
            NaryType::Nand => "NAND",
            NaryType::Nor => "NOR",
        }
    }

    /// Binding strength when the gate is written infix.
    ///
    /// ```text
    /// NOT (4) > AND, NAND (3) > OR, NOR, XOR, XNOR (2)
    /// ```
    pub const fn precedence(self) -> u8 {
        match self {
            NaryType::And | NaryType::Nand => 3,
            NaryType::Or | NaryType::Nor | NaryType::Xor | NaryType::Xnor => 2,
        }
    }

    /// Whether the gate inverts the result of its base gate.
    pub const fn is_inverting(self) -> bool {
        matches!(self, NaryType::Xnor | NaryType::Nand | NaryType::Nor)
    }

    /// The gate computing the complement: AND<->NAND, OR<->NOR, XOR<->XNOR.
    pub const fn negated(self) -> NaryType {
        match self {
            NaryType::And => NaryType::Nand,
            NaryType::Nand => NaryType::And,
            NaryType::Or => NaryType::Nor,
            NaryType::Nor => NaryType::Or,
            NaryType::Xor => NaryType::Xnor,
            NaryType::Xnor => NaryType::Xor,
        }
    }

    /// The non-inverting gate this gate is built on.
    pub const fn base(self) -> NaryType {
        if self.is_inverting() {
            self.negated()
        } else {
            self
        }
    }

    /// De Morgan dual: AND<->OR, NAND<->NOR. XOR and XNOR have no dual and are returned as is.
    pub const fn dual(self) -> NaryType {
        match self {
            NaryType::And => NaryType::Or,
            NaryType::Or => NaryType::And,
            NaryType::Nand => NaryType::Nor,
            NaryType::Nor => NaryType::Nand,
            NaryType::Xor => NaryType::Xor,
            NaryType::Xnor => NaryType::Xnor,
        }
    }
}

impl NaryType {
    /// Evaluates the gate on the given operand values.
    ///
    /// XOR is the parity of its operands and XNOR its complement, so both extend
    /// to any arity. With no operands AND yields `true`, OR and XOR yield `false`.
    pub fn eval<I>(self, inputs: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let mut inputs = inputs.into_iter();
        let base = match self.base() {
            NaryType::And => inputs.all(|x| x),
            NaryType::Or => inputs.any(|x| x),
            NaryType::Xor => inputs.fold(false, |acc, x| acc ^ x),
            _ => unreachable!("base gate is never inverting"),
        };
        base ^ self.is_inverting()
    }
}

impl Display for NaryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NaryType {
    type Err = ();

    /// Case-insensitive lookup of a gate name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaryType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// The operator carried by a gate node of a circuit graph.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateType {
    Not,
    Nary(NaryType),
}

// Constructors
impl GateType {
    pub const fn not() -> GateType {
        GateType::Not
    }

    pub const fn and() -> GateType {
        GateType::Nary(NaryType::And)
    }

    pub const fn or() -> GateType {
        GateType::Nary(NaryType::Or)
    }

    pub const fn xor() -> GateType {
        GateType::Nary(NaryType::Xor)
    }

    pub const fn xnor() -> GateType {
        GateType::Nary(NaryType::Xnor)
    }

    pub const fn nand() -> GateType {
        GateType::Nary(NaryType::Nand)
    }

    pub const fn nor() -> GateType {
        GateType::Nary(NaryType::Nor)
    }
}

// Getters
impl GateType {
    pub const fn name(self) -> &'static str {
        match self {
            GateType::Not => "NOT",
            GateType::Nary(t) => t.name(),
        }
    }

    pub const fn precedence(self) -> u8 {
        match self {
            GateType::Not => NOT_PRECEDENCE,
            GateType::Nary(t) => t.precedence(),
        }
    }

    /// Accepted number of inputs as `(min, max)`.
    pub const fn arity(self) -> (usize, Option<usize>) {
        match self {
            GateType::Not => (1, Some(1)),
            GateType::Nary(_) => (1, None),
        }
    }

    pub const fn accepts(self, inputs: usize) -> bool {
        let (min, max) = self.arity();
        inputs >= min
            && match max {
                Some(max) => inputs <= max,
                None => true,
            }
    }
}

impl Display for GateType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("NOT") {
            Ok(GateType::Not)
        } else {
            s.parse().map(GateType::Nary)
        }
    }
}

impl From<NaryType> for GateType {
    fn from(t: NaryType) -> Self {
        GateType::Nary(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_eval_and_or() {
        assert!(NaryType::And.eval([true, true, true]));
        assert!(!NaryType::And.eval([true, false, true]));
        assert!(NaryType::Or.eval([false, false, true]));
        assert!(!NaryType::Or.eval([false, false]));
    }

    #[test]
    fn test_eval_parity() {
        assert!(NaryType::Xor.eval([true, false]));
        assert!(!NaryType::Xor.eval([true, true]));
        assert!(NaryType::Xor.eval([true, true, true]));
        assert!(NaryType::Xnor.eval([true, true]));
        assert!(!NaryType::Xnor.eval([true, true, true]));
    }

    #[test]
    fn test_eval_inverting() {
        assert!(!NaryType::Nand.eval([true, true]));
        assert!(NaryType::Nand.eval([true, false]));
        assert!(NaryType::Nor.eval([false, false]));
        assert!(!NaryType::Nor.eval([false, true]));
    }

    #[test]
    fn test_eval_empty() {
        let none: [bool; 0] = [];
        assert!(NaryType::And.eval(none));
        assert!(!NaryType::Or.eval(none));
        assert!(!NaryType::Xor.eval(none));
        assert!(NaryType::Xnor.eval(none));
        assert!(!NaryType::Nand.eval(none));
        assert!(NaryType::Nor.eval(none));
    }

    #[test]
    fn test_negated_and_dual() {
        for t in NaryType::ALL {
            assert_eq!(t.negated().negated(), t);
            assert_eq!(t.dual().dual(), t);
            assert!(!t.base().is_inverting());
        }
        assert_eq!(NaryType::And.dual(), NaryType::Or);
        assert_eq!(NaryType::Nor.negated(), NaryType::Or);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("NOT".parse(), Ok(GateType::Not));
        assert_eq!("nand".parse(), Ok(GateType::nand()));
        assert_eq!("Xnor".parse(), Ok(GateType::xnor()));
        assert_eq!("MUX".parse::<GateType>(), Err(()));
        for t in NaryType::ALL {
            assert_eq!(t.to_string().parse(), Ok(t));
        }
    }

    #[test]
    fn test_arity() {
        assert!(GateType::Not.accepts(1));
        assert!(!GateType::Not.accepts(2));
        assert!(!GateType::Not.accepts(0));
        assert!(GateType::and().accepts(1));
        assert!(GateType::and().accepts(5));
        assert!(!GateType::or().accepts(0));
    }
}
