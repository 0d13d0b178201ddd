//! Error types for netlist construction, bench parsing and simulation.

#![allow(missing_docs, reason = "variant fields are self-describing")]

use crate::GateType;

/// A gate mnemonic outside the supported operation set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gate operation '{0}'")]
pub struct UnknownOperationError(pub String);

/// A gate was given the wrong number of operands for its type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{ty} gate '{output}' takes {expected} operand(s), got {got}")]
pub struct ArityError {
    /// Name of the gate's output signal.
    pub output: String,
    /// The gate type.
    pub ty: GateType,
    /// Human readable expectation ("exactly 1", "at least 1").
    pub expected: &'static str,
    /// Number of operands supplied.
    pub got: usize,
}

/// A signal name was defined twice in the same netlist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("signal '{0}' is defined more than once")]
pub struct DuplicateSignal(pub String);

/// Failure to parse a bench file.  Every variant carries the 1-based line
/// number of the offending statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The line is not a declaration, an assignment or a comment.
    #[error("line {line}: unrecognised statement '{text}'")]
    UnrecognisedStatement { line: usize, text: String },

    /// `INPUT(...)` / `OUTPUT(...)` with a broken body.
    #[error("line {line}: malformed declaration '{text}'")]
    MalformedDeclaration { line: usize, text: String },

    /// Assignment whose right-hand side is not `OP(arg, ...)`.
    #[error("line {line}: malformed gate expression '{text}'")]
    MalformedGate { line: usize, text: String },

    /// A name that is empty or contains a reserved character.
    #[error("line {line}: invalid signal name '{name}'")]
    InvalidName { line: usize, name: String },

    /// Well-formed gate expression with an unsupported mnemonic.
    #[error("line {line}: {source}")]
    UnknownOperation {
        line: usize,
        #[source]
        source: UnknownOperationError,
    },

    /// NOT/BUF with anything other than one operand.
    #[error("line {line}: {source}")]
    Arity {
        line: usize,
        #[source]
        source: ArityError,
    },

    /// A second definition of an input or gate output.
    #[error("line {line}: {source}")]
    Duplicate {
        line: usize,
        #[source]
        source: DuplicateSignal,
    },
}

impl FormatError {
    /// The 1-based line number the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            FormatError::UnrecognisedStatement { line, .. }
            | FormatError::MalformedDeclaration { line, .. }
            | FormatError::MalformedGate { line, .. }
            | FormatError::InvalidName { line, .. }
            | FormatError::UnknownOperation { line, .. }
            | FormatError::Arity { line, .. }
            | FormatError::Duplicate { line, .. } => *line,
        }
    }
}

/// Failure while evaluating a netlist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The assignment has no value for a primary input.
    #[error("missing value for primary input '{0}'")]
    MissingInput(String),

    /// A gate operand or primary output refers to a signal that has no value
    /// at that point of the evaluation order.
    #[error("'{consumer}' references undefined signal '{signal}'")]
    UnknownOperand { signal: String, consumer: String },
}
