//! Gate-level combinational netlists in the bench text format.
//!
//! This crate provides the in-memory netlist model, a reader/writer for the
//! bench gate-list format and a simulator that evaluates netlists over
//! topologically ordered gate lists.
//!
//! # Example
//! ```
//! use xorlock_netlist::{bench, sim};
//!
//! let netlist = bench::parse("INPUT(a)\nINPUT(b)\nOUTPUT(y)\ny = NAND(a, b)\n").unwrap();
//! let assignment = [("a".to_owned(), true), ("b".to_owned(), true)]
//!     .into_iter()
//!     .collect();
//! assert_eq!(sim::evaluate(&netlist, &assignment).unwrap(), [false]);
//! ```

pub mod bench;
mod errors;
pub mod example_circuits;
mod gate_type;
mod netlist;
pub mod sim;

pub use errors::*;
pub use gate_type::GateType;
pub use netlist::{Gate, Netlist, NetlistBuilder};
