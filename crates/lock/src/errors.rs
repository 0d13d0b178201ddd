//! Error types for locking and verification.

#![allow(missing_docs, reason = "variant fields are self-describing")]

use xorlock_netlist::{ArityError, DuplicateSignal, SimError};

/// Failure to insert key gates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    /// The plan names something that is not a gate output of the netlist.
    #[error("lock node '{0}' is not a gate output")]
    UnknownLockNode(String),

    /// The same node appears twice in the plan.
    #[error("lock node '{0}' appears more than once in the plan")]
    DuplicateLockNode(String),

    /// A generated key input or alias name is already in use.
    #[error("generated signal name '{0}' is already in use")]
    NameCollision(String),

    #[error(transparent)]
    Duplicate(#[from] DuplicateSignal),

    #[error(transparent)]
    Arity(#[from] ArityError),
}

/// Failure while comparing an original netlist with its locked version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarnessError {
    #[error("simulation failed: {0}")]
    Sim(#[from] SimError),

    /// The key does not have one bit per key input.
    #[error("key has {got} bit(s) but the locked netlist has {expected} key input(s)")]
    KeyLengthMismatch { expected: usize, got: usize },

    #[error("original has {original} output(s), locked has {locked}")]
    OutputCountMismatch { original: usize, locked: usize },

    /// An input of the locked netlist that is neither an original input nor
    /// a key input.
    #[error("locked input '{0}' is neither an original input nor a key input")]
    UnknownLockedInput(String),
}

/// A key string with a character other than `0` or `1`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyBitsError {
    #[error("invalid key character {ch:?} at position {position}")]
    InvalidChar { ch: char, position: usize },
}
