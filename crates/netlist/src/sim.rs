//! Combinational gate-level simulation.

use std::ops::Range;

use ahash::AHashMap;
use bitvec::prelude::*;

use crate::errors::SimError;
use crate::{GateType, Netlist};

/// Values for the primary inputs of a netlist, keyed by signal name.
pub type Assignment = AHashMap<String, bool>;

/// Consumer name reported when a primary output can't be resolved.
const OUTPUT_CONSUMER: &str = "OUTPUT";

/// A gate with its operands resolved to value slots.
#[derive(Clone, Debug)]
struct SlotGate {
    ty: GateType,

    /// Range into [`CompiledNetlist::operand_slots`].
    operands: Range<usize>,
}

/// A netlist with every signal reference resolved to a slot in a flat value
/// table, for repeated evaluation.
///
/// Slots `0..num_inputs` hold the primary inputs in declaration order; gate
/// `i` writes slot `num_inputs + i`.
#[derive(Clone, Debug)]
pub struct CompiledNetlist {
    num_inputs: usize,
    gates: Vec<SlotGate>,
    operand_slots: Vec<usize>,
    output_slots: Vec<usize>,
}

impl CompiledNetlist {
    /// Resolves the netlist's references.
    ///
    /// Gates are visited in order and each one can only see inputs and
    /// earlier gates, so an out-of-order or dangling reference fails here with
    /// [`SimError::UnknownOperand`].
    pub fn compile(netlist: &Netlist) -> Result<Self, SimError> {
        let num_inputs = netlist.num_inputs();
        let mut slots: AHashMap<&str, usize> =
            AHashMap::with_capacity(num_inputs + netlist.num_gates());
        for (i, name) in netlist.inputs().iter().enumerate() {
            slots.insert(name, i);
        }

        let mut gates = Vec::with_capacity(netlist.num_gates());
        let mut operand_slots = Vec::new();
        for (i, gate) in netlist.gates().iter().enumerate() {
            let start = operand_slots.len();
            for operand in gate.operands() {
                let slot = slots.get(operand.as_str()).copied().ok_or_else(|| {
                    SimError::UnknownOperand {
                        signal: operand.clone(),
                        consumer: gate.output().to_owned(),
                    }
                })?;
                operand_slots.push(slot);
            }

            gates.push(SlotGate {
                ty: gate.ty(),
                operands: start..operand_slots.len(),
            });
            slots.insert(gate.output(), num_inputs + i);
        }

        let output_slots = netlist
            .outputs()
            .iter()
            .map(|name| {
                slots
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| SimError::UnknownOperand {
                        signal: name.clone(),
                        consumer: OUTPUT_CONSUMER.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            num_inputs,
            gates,
            operand_slots,
            output_slots,
        })
    }

    /// Bits expected by [`Self::eval`].
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Bits returned by [`Self::eval`].
    pub fn num_outputs(&self) -> usize {
        self.output_slots.len()
    }

    /// Evaluates one input vector, given in input declaration order, and
    /// returns the primary output values in declaration order.
    ///
    /// # Panics
    ///
    /// If `inputs` is not exactly [`Self::num_inputs`] bits long.
    pub fn eval(&self, inputs: &BitSlice) -> BitVec {
        assert_eq!(
            inputs.len(),
            self.num_inputs,
            "sim: expected number of inputs (got {}, need {})",
            inputs.len(),
            self.num_inputs,
        );

        let mut values = BitVec::<usize, Lsb0>::repeat(false, self.num_inputs + self.gates.len());
        values[..self.num_inputs].copy_from_bitslice(inputs);

        // Every operand slot is below the gate's own slot, so one pass in
        // order is enough.
        for (i, gate) in self.gates.iter().enumerate() {
            let operands = &self.operand_slots[gate.operands.clone()];
            let v = gate.ty.eval(operands.iter().map(|&s| values[s]));
            values.set(self.num_inputs + i, v);
        }

        self.output_slots.iter().map(|&s| values[s]).collect()
    }
}

/// Evaluates a netlist over a named input assignment.
///
/// Gates are evaluated in listed order, which must be topological.  Returns
/// the values of the primary outputs in declared order.
pub fn evaluate(netlist: &Netlist, assignment: &Assignment) -> Result<Vec<bool>, SimError> {
    let mut inputs = BitVec::<usize, Lsb0>::with_capacity(netlist.num_inputs());
    for name in netlist.inputs() {
        let v = assignment
            .get(name)
            .copied()
            .ok_or_else(|| SimError::MissingInput(name.clone()))?;
        inputs.push(v);
    }

    let compiled = CompiledNetlist::compile(netlist)?;
    Ok(compiled.eval(&inputs).iter().by_vals().collect())
}
