//! Gate type enum for the bench operation set.

use std::fmt;
use std::str::FromStr;

use crate::errors::UnknownOperationError;

/// Boolean operation performed by a gate.
///
/// The set is closed over the eight mnemonics the bench format knows about.
/// Every operation is either unary or associative and commutative, so
/// evaluation folds over the operands left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateType {
    /// Conjunction of all operands.
    AND,
    /// Disjunction of all operands.
    OR,
    /// Negated conjunction.
    NAND,
    /// Negated disjunction.
    NOR,
    /// Complement of the single operand.
    NOT,
    /// Copy of the single operand.
    BUF,
    /// Parity of all operands.
    XOR,
    /// Negated parity.
    XNOR,
}

impl GateType {
    /// Every gate type, in mnemonic table order.
    pub const ALL: [GateType; 8] = [
        GateType::AND,
        GateType::OR,
        GateType::NAND,
        GateType::NOR,
        GateType::NOT,
        GateType::BUF,
        GateType::XOR,
        GateType::XNOR,
    ];

    /// The mnemonic used in bench files.
    pub const fn name(self) -> &'static str {
        match self {
            GateType::AND => "AND",
            GateType::OR => "OR",
            GateType::NAND => "NAND",
            GateType::NOR => "NOR",
            GateType::NOT => "NOT",
            GateType::BUF => "BUF",
            GateType::XOR => "XOR",
            GateType::XNOR => "XNOR",
        }
    }

    /// Returns true for the gates that take exactly one operand.
    #[inline]
    pub const fn is_unary(self) -> bool {
        matches!(self, GateType::NOT | GateType::BUF)
    }

    /// Evaluates the gate over its operand values.
    ///
    /// Unary gates look at the first operand only; arity is enforced when a
    /// [`Gate`](crate::Gate) is constructed.
    #[inline]
    pub fn eval(self, mut operands: impl Iterator<Item = bool>) -> bool {
        match self {
            GateType::AND => operands.all(|v| v),
            GateType::OR => operands.any(|v| v),
            GateType::NAND => !operands.all(|v| v),
            GateType::NOR => !operands.any(|v| v),
            GateType::XOR => operands.fold(false, |acc, v| acc ^ v),
            GateType::XNOR => !operands.fold(false, |acc, v| acc ^ v),
            GateType::NOT => !operands.next().unwrap_or(false),
            GateType::BUF => operands.next().unwrap_or(false),
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateType {
    type Err = UnknownOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| UnknownOperationError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval2(ty: GateType, a: bool, b: bool) -> bool {
        ty.eval([a, b].into_iter())
    }

    #[test]
    fn test_gate_type_truth_tables() {
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(eval2(GateType::AND, a, b), a & b);
                assert_eq!(eval2(GateType::OR, a, b), a | b);
                assert_eq!(eval2(GateType::NAND, a, b), !(a & b));
                assert_eq!(eval2(GateType::NOR, a, b), !(a | b));
                assert_eq!(eval2(GateType::XOR, a, b), a ^ b);
                assert_eq!(eval2(GateType::XNOR, a, b), !(a ^ b));
            }
            assert_eq!(GateType::NOT.eval([a].into_iter()), !a);
            assert_eq!(GateType::BUF.eval([a].into_iter()), a);
        }
    }

    #[test]
    fn test_gate_type_wide_operands() {
        let ones = [true, true, true, true];
        let mixed = [true, false, true, true];

        assert!(GateType::AND.eval(ones.into_iter()));
        assert!(!GateType::AND.eval(mixed.into_iter()));
        assert!(GateType::NAND.eval(mixed.into_iter()));
        assert!(GateType::OR.eval(mixed.into_iter()));
        assert!(!GateType::NOR.eval(mixed.into_iter()));

        // Parity of three set bits.
        assert!(GateType::XOR.eval(mixed.into_iter()));
        assert!(!GateType::XNOR.eval(mixed.into_iter()));
        assert!(!GateType::XOR.eval(ones.into_iter()));
    }

    #[test]
    fn test_gate_type_mnemonics() {
        for ty in GateType::ALL {
            assert_eq!(ty.to_string().parse::<GateType>(), Ok(ty));
        }

        assert_eq!(
            "DFF".parse::<GateType>(),
            Err(UnknownOperationError("DFF".to_owned()))
        );
        assert!("and".parse::<GateType>().is_err());
    }
}
