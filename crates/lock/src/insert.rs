//! XOR key-gate insertion.
//!
//! For every lock point `n` with key input `k<i>`, the locked netlist gets
//!
//! ```text
//! n_locked = XOR(n, k<i>)
//! ```
//!
//! right after the gate driving `n`, and every later gate reading `n` reads
//! `n_locked` instead.  With all keys at zero the XOR is a buffer, so the
//! locked circuit behaves like the original.

use ahash::{AHashMap, AHashSet};
use tracing::{debug, trace};
use xorlock_netlist::{Gate, GateType, Netlist};

use crate::errors::InsertError;
use crate::key::KeyBits;
use crate::select::LockPlan;

/// Naming of the signals the inserter creates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertOptions {
    /// Key input `i` is named `{key_prefix}{i}`.
    pub key_prefix: String,
    /// The XOR output for node `n` is named `{n}{alias_suffix}`.
    pub alias_suffix: String,
}

impl Default for InsertOptions {
    fn default() -> Self {
        Self {
            key_prefix: "k".to_owned(),
            alias_suffix: "_locked".to_owned(),
        }
    }
}

/// A locked netlist and the names of its key inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockedNetlist {
    netlist: Netlist,
    key_names: Vec<String>,
}

impl LockedNetlist {
    /// The locked netlist.
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// Key input names, in plan order.  They are also the trailing inputs
    /// of [`Self::netlist`].
    pub fn key_names(&self) -> &[String] {
        &self.key_names
    }

    /// Splits into the netlist and the key input names.
    pub fn into_parts(self) -> (Netlist, Vec<String>) {
        (self.netlist, self.key_names)
    }

    /// The key that makes the locked netlist match the original.
    pub fn correct_key(&self) -> KeyBits {
        KeyBits::zeros(self.key_names.len())
    }
}

/// Inserts key gates with the default naming.
pub fn insert(netlist: &Netlist, plan: &LockPlan) -> Result<LockedNetlist, InsertError> {
    insert_with(netlist, plan, &InsertOptions::default())
}

/// Inserts one XOR key gate after every node of `plan`.
///
/// Primary outputs are copied verbatim: an output naming a lock point still
/// reads the unlocked signal.
pub fn insert_with(
    netlist: &Netlist,
    plan: &LockPlan,
    options: &InsertOptions,
) -> Result<LockedNetlist, InsertError> {
    // node -> (alias, key)
    let mut lock_map: AHashMap<&str, (String, String)> = AHashMap::with_capacity(plan.len());
    let taken = netlist.signal_names();
    let mut generated: AHashSet<String> = AHashSet::with_capacity(2 * plan.len());
    let mut key_names = Vec::with_capacity(plan.len());

    let mut claim = |name: String| -> Result<String, InsertError> {
        if taken.contains(name.as_str()) || !generated.insert(name.clone()) {
            return Err(InsertError::NameCollision(name));
        }
        Ok(name)
    };

    for (i, node) in plan.names().enumerate() {
        if netlist.gate_index(node).is_none() {
            return Err(InsertError::UnknownLockNode(node.to_owned()));
        }
        if lock_map.contains_key(node) {
            return Err(InsertError::DuplicateLockNode(node.to_owned()));
        }

        let key = claim(format!("{}{i}", options.key_prefix))?;
        let alias = claim(format!("{node}{}", options.alias_suffix))?;
        key_names.push(key.clone());
        lock_map.insert(node, (alias, key));
    }

    let mut b = Netlist::builder();
    for name in netlist.inputs().iter().chain(&key_names) {
        b.add_input(name.clone())?;
    }

    let mut locked: AHashSet<&str> = AHashSet::with_capacity(plan.len());
    for gate in netlist.gates() {
        let rewired = gate.map_operands(|op| match lock_map.get(op) {
            Some((alias, _)) if locked.contains(op) => alias.clone(),
            _ => op.to_owned(),
        });
        b.add_gate(rewired)?;

        if let Some((alias, key)) = lock_map.get(gate.output()) {
            trace!(node = gate.output(), %alias, %key, "inserted key gate");
            let xor = Gate::new(
                alias.clone(),
                GateType::XOR,
                vec![gate.output().to_owned(), key.clone()],
            )?;
            b.add_gate(xor)?;
            locked.insert(gate.output());
        }
    }

    for name in netlist.outputs() {
        b.add_output(name.clone());
    }

    let locked_netlist = b.build();
    debug!(
        key_gates = key_names.len(),
        gates = locked_netlist.num_gates(),
        "locked netlist"
    );
    Ok(LockedNetlist {
        netlist: locked_netlist,
        key_names,
    })
}
