//! Picking the internal nodes that receive key gates.

use tracing::{debug, trace};
use xorlock_netlist::Netlist;

use crate::fault_log::FaultCounts;

/// An internal node chosen for locking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockPoint {
    /// Gate output to lock.
    pub name: String,
    /// How often faults at this node were detected.
    pub detections: u64,
}

/// Ordered list of lock points.  Position `i` is driven by key input `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockPlan {
    points: Vec<LockPoint>,
}

impl LockPlan {
    /// Builds a plan from bare node names, all with zero detections.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let points = names
            .into_iter()
            .map(|name| LockPoint {
                name: name.into(),
                detections: 0,
            })
            .collect();
        Self { points }
    }

    /// Lock points in key order.
    pub fn points(&self) -> &[LockPoint] {
        &self.points
    }

    /// Node names in plan order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.name.as_str())
    }

    /// Number of lock points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether nothing gets locked.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether `name` is one of the lock points.
    pub fn contains(&self, name: &str) -> bool {
        self.points.iter().any(|p| p.name == name)
    }
}

/// Chooses up to `k` gate outputs with the highest detection counts.
///
/// Ties keep definition order.  Asking for more points than there are gates
/// returns every gate output.
pub fn select(netlist: &Netlist, counts: &FaultCounts, k: usize) -> LockPlan {
    let mut candidates: Vec<(usize, &str, u64)> = netlist
        .internal_nodes()
        .enumerate()
        .map(|(idx, name)| (idx, name, counts.get(name)))
        .collect();

    // Stable, and the index breaks ties explicitly anyway.
    candidates.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    candidates.truncate(k);

    let points: Vec<LockPoint> = candidates
        .into_iter()
        .map(|(_, name, detections)| {
            trace!(node = name, detections, "selected lock point");
            LockPoint {
                name: name.to_owned(),
                detections,
            }
        })
        .collect();

    debug!(
        requested = k,
        selected = points.len(),
        candidates = netlist.num_gates(),
        "selected lock points"
    );
    LockPlan { points }
}
