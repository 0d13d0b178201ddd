//! Reader for fault-simulator detection logs.
//!
//! The log is a sequence of blocks, one per test pattern:
//!
//! ```text
//! test 1: 0110...
//!   n258 /0
//!   n258->n290 /1
//! test 2: ...
//! ```
//!
//! A line starting at column 0 with `test` opens a block.  Every indented line
//! inside a block names one detected fault by its first token; bridging faults
//! `A->B` are attributed to `A`.  Anything else is skipped.

use ahash::AHashSet;
use indexmap::IndexMap;
use tracing::debug;
use xorlock_netlist::Netlist;

/// Marker that opens a block.
const BLOCK_HEADER: &str = "test";

/// Separator of the two nets in a bridging fault token.
const BRIDGE: &str = "->";

/// Per-signal detection counts.  Signals that never show up count as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaultCounts {
    /// Counts in order of first detection.
    counts: IndexMap<String, u64>,
}

impl FaultCounts {
    /// Gets the detection count of a signal.
    pub fn get(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of signals with at least one detection.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was detected.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all detections.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over the detected signals in first-detection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn increment(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(name.to_owned(), 1);
            }
        }
    }
}

impl FromIterator<(String, u64)> for FaultCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Extracts the fault token of an indented log line, reducing bridging faults
/// to their first net.
fn fault_token(line: &str) -> Option<&str> {
    let token = line.split_whitespace().next()?;
    let token = match token.split_once(BRIDGE) {
        Some((net, _)) => net,
        None => token,
    };
    (!token.is_empty()).then_some(token)
}

/// Counts detections per signal, keeping only names in `valid_names`.
///
/// Never fails: lines that don't fit the grammar are skipped.
pub fn parse(log: &str, valid_names: &AHashSet<&str>) -> FaultCounts {
    let mut counts = FaultCounts::default();
    let mut in_block = false;
    let mut skipped = 0usize;

    for line in log.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(BLOCK_HEADER) {
            in_block = true;
            continue;
        }

        let indented = line.starts_with(char::is_whitespace);
        match fault_token(line) {
            Some(token) if in_block && indented && valid_names.contains(token) => {
                counts.increment(token)
            }
            _ => skipped += 1,
        }
    }

    debug!(
        signals = counts.len(),
        detections = counts.total(),
        skipped,
        "parsed fault log"
    );
    counts
}

/// Counts detections for the signals of `netlist`: its primary inputs, gate
/// outputs and primary outputs.
pub fn parse_for(netlist: &Netlist, log: &str) -> FaultCounts {
    parse(log, &netlist.signal_names())
}
