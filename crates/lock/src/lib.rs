//! XOR key-gate logic locking.
//!
//! The pipeline reads fault detection counts for a netlist, picks the most
//! observable internal nodes, and puts an XOR key gate behind each of them.
//! The locked netlist matches the original only under the all-zero key, which
//! [`harness`] checks by random simulation.
//!
//! ```
//! use xorlock_lock::{fault_log, harness, insert, select};
//! use xorlock_netlist::example_circuits::c17;
//! use rand::SeedableRng;
//!
//! let original = c17();
//! let counts = fault_log::parse_for(&original, "test 1\n  16 /0\n  16 /1\n  11 /0\n");
//! let plan = select(&original, &counts, 2);
//! assert_eq!(plan.names().collect::<Vec<_>>(), ["16", "11"]);
//!
//! let locked = insert(&original, &plan).unwrap();
//! assert_eq!(locked.key_names(), ["k0", "k1"]);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let same = harness::check_equivalence(
//!     &original,
//!     locked.netlist(),
//!     locked.key_names(),
//!     64,
//!     &mut rng,
//! )
//! .unwrap();
//! assert!(same);
//! ```

mod errors;
pub mod fault_log;
pub mod harness;
mod insert;
mod key;
mod select;

pub use errors::*;
pub use fault_log::FaultCounts;
pub use harness::{CorruptionReport, HarnessConfig};
pub use insert::{InsertOptions, LockedNetlist, insert, insert_with};
pub use key::{KeyBits, wrong_key_suite};
pub use select::{LockPlan, LockPoint, select};
