//! In-memory netlist representation.

use ahash::AHashSet;

use crate::GateType;
use crate::errors::{ArityError, DuplicateSignal};

/// A single gate: one output signal computed from an ordered operand list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gate {
    output: String,
    ty: GateType,
    operands: Vec<String>,
}

impl Gate {
    /// Constructs a new gate, checking the operand count against the type.
    pub fn new(
        output: impl Into<String>,
        ty: GateType,
        operands: Vec<String>,
    ) -> Result<Self, ArityError> {
        let output = output.into();
        let (ok, expected) = if ty.is_unary() {
            (operands.len() == 1, "exactly 1")
        } else {
            (!operands.is_empty(), "at least 1")
        };

        if !ok {
            return Err(ArityError {
                output,
                ty,
                expected,
                got: operands.len(),
            });
        }

        Ok(Self {
            output,
            ty,
            operands,
        })
    }

    /// Name of the signal the gate drives.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The gate operation.
    pub fn ty(&self) -> GateType {
        self.ty
    }

    /// Operand signal names, in order.
    pub fn operands(&self) -> &[String] {
        &self.operands
    }

    /// Returns a copy of the gate with every operand passed through `f`.
    ///
    /// The operand count is unchanged so the arity check still holds.
    pub fn map_operands(&self, mut f: impl FnMut(&str) -> String) -> Self {
        Self {
            output: self.output.clone(),
            ty: self.ty,
            operands: self.operands.iter().map(|o| f(o)).collect(),
        }
    }
}

/// A combinational netlist.
///
/// Gates are kept in definition order, which is trusted to be topological:
/// every operand of a gate is a primary input or the output of an earlier
/// gate.  Input names and gate output names share one namespace and are
/// unique within it, which [`NetlistBuilder`] enforces.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Netlist {
    inputs: Vec<String>,
    outputs: Vec<String>,
    gates: Vec<Gate>,
}

impl Netlist {
    /// Starts building a new netlist.
    pub fn builder() -> NetlistBuilder {
        NetlistBuilder::default()
    }

    /// Primary inputs in declaration order.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Primary outputs in declaration order.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Gates in definition order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of primary inputs.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Number of primary outputs.
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Number of gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Checks if a name is declared as a primary input.
    pub fn is_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|i| i == name)
    }

    /// Gets the position of the gate driving a signal, if it's a gate output.
    pub fn gate_index(&self, name: &str) -> Option<usize> {
        self.gates.iter().position(|g| g.output() == name)
    }

    /// Returns an iterator over the internal nodes (gate outputs) in
    /// definition order.
    pub fn internal_nodes(&self) -> impl Iterator<Item = &str> + Clone {
        self.gates.iter().map(Gate::output)
    }

    /// Every name the netlist mentions at declaration level: primary inputs,
    /// gate outputs and primary outputs.
    pub fn signal_names(&self) -> AHashSet<&str> {
        self.inputs
            .iter()
            .map(String::as_str)
            .chain(self.internal_nodes())
            .chain(self.outputs.iter().map(String::as_str))
            .collect()
    }

    /// Counts gates per type, skipping types that don't occur.
    pub fn gate_type_histogram(&self) -> Vec<(GateType, usize)> {
        GateType::ALL
            .into_iter()
            .map(|ty| (ty, self.gates.iter().filter(|g| g.ty() == ty).count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

/// Builder for [`Netlist`] that keeps the signal namespace unique.
#[derive(Debug, Default)]
pub struct NetlistBuilder {
    inputs: Vec<String>,
    outputs: Vec<String>,
    gates: Vec<Gate>,

    /// Inputs and gate outputs defined so far.
    defined: AHashSet<String>,
}

impl NetlistBuilder {
    /// Checks if a signal has already been defined as an input or gate output.
    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }

    fn define(&mut self, name: &str) -> Result<(), DuplicateSignal> {
        if !self.defined.insert(name.to_owned()) {
            return Err(DuplicateSignal(name.to_owned()));
        }
        Ok(())
    }

    /// Appends a primary input.
    pub fn add_input(&mut self, name: impl Into<String>) -> Result<(), DuplicateSignal> {
        let name = name.into();
        self.define(&name)?;
        self.inputs.push(name);
        Ok(())
    }

    /// Appends a primary output.  Outputs may repeat and are only checked
    /// against the defined signals at evaluation time.
    pub fn add_output(&mut self, name: impl Into<String>) {
        self.outputs.push(name.into());
    }

    /// Appends a gate after all the gates added so far.
    pub fn add_gate(&mut self, gate: Gate) -> Result<(), DuplicateSignal> {
        self.define(gate.output())?;
        self.gates.push(gate);
        Ok(())
    }

    /// Finishes the netlist.
    pub fn build(self) -> Netlist {
        Netlist {
            inputs: self.inputs,
            outputs: self.outputs,
            gates: self.gates,
        }
    }
}
