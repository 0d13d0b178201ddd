//! Example circuits for testing and benchmarking.

use crate::{Gate, GateType, Netlist, bench};

/// The ISCAS-85 c17 benchmark in bench format.
pub const C17_BENCH: &str = "\
# c17
INPUT(1)
INPUT(2)
INPUT(3)
INPUT(6)
INPUT(7)

OUTPUT(22)
OUTPUT(23)

10 = NAND(1, 3)
11 = NAND(3, 6)
16 = NAND(2, 11)
19 = NAND(11, 7)
22 = NAND(10, 16)
23 = NAND(16, 19)
";

/// Parses [`C17_BENCH`].
pub fn c17() -> Netlist {
    bench::parse(C17_BENCH).expect("examples: c17 parses")
}

fn gate(output: String, ty: GateType, operands: &[&str]) -> Gate {
    let operands = operands.iter().map(|s| s.to_string()).collect();
    Gate::new(output, ty, operands).expect("examples: gate arity")
}

/// Generate an n-bit ripple-carry adder.
///
/// **Inputs**: `a0..a{n-1}` then `b0..b{n-1}` (LSB first).
///
/// **Outputs**: `s0..s{n-1}` then the carry-out `c{n}`.
///
/// Bit 0 is a half adder; every other bit position is a full adder:
/// ```text
/// hs_i = XOR(a_i, b_i)
/// s_i  = XOR(hs_i, c_i)
/// hc_i = AND(a_i, b_i)
/// cp_i = AND(hs_i, c_i)
/// c_i+1 = OR(hc_i, cp_i)
/// ```
///
/// # Example
///
/// ```
/// use xorlock_netlist::example_circuits::ripple_carry_adder;
///
/// let adder = ripple_carry_adder(8);
/// assert_eq!(adder.num_inputs(), 16);
/// assert_eq!(adder.num_outputs(), 9);
/// assert_eq!(adder.num_gates(), 2 + 5 * 7);
/// ```
///
/// # Panics
///
/// If `n_bits` is zero.
pub fn ripple_carry_adder(n_bits: usize) -> Netlist {
    assert!(n_bits > 0, "examples: n_bits must be at least 1");

    let mut b = Netlist::builder();
    for i in 0..n_bits {
        b.add_input(format!("a{i}")).expect("examples: fresh input");
    }
    for i in 0..n_bits {
        b.add_input(format!("b{i}")).expect("examples: fresh input");
    }

    for i in 0..n_bits {
        let (a_name, b_name) = (format!("a{i}"), format!("b{i}"));
        let (a, bb) = (a_name.as_str(), b_name.as_str());
        let carry_out = format!("c{}", i + 1);

        let gates = if i == 0 {
            vec![
                gate("s0".into(), GateType::XOR, &[a, bb]),
                gate(carry_out, GateType::AND, &[a, bb]),
            ]
        } else {
            let (hs, hc, cp) = (format!("hs{i}"), format!("hc{i}"), format!("cp{i}"));
            let carry_in = format!("c{i}");
            vec![
                gate(hs.clone(), GateType::XOR, &[a, bb]),
                gate(format!("s{i}"), GateType::XOR, &[hs.as_str(), carry_in.as_str()]),
                gate(hc.clone(), GateType::AND, &[a, bb]),
                gate(cp.clone(), GateType::AND, &[hs.as_str(), carry_in.as_str()]),
                gate(carry_out, GateType::OR, &[hc.as_str(), cp.as_str()]),
            ]
        };

        for g in gates {
            b.add_gate(g).expect("examples: fresh gate");
        }
    }

    for i in 0..n_bits {
        b.add_output(format!("s{i}"));
    }
    b.add_output(format!("c{n_bits}"));

    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CompiledNetlist;
    use bitvec::prelude::*;

    #[test]
    fn test_adder_adds() {
        let n_bits = 4;
        let adder = CompiledNetlist::compile(&ripple_carry_adder(n_bits)).unwrap();

        for x in 0u32..16 {
            for y in 0u32..16 {
                let mut inputs = BitVec::<usize, Lsb0>::new();
                inputs.extend((0..n_bits).map(|i| (x >> i) & 1 == 1));
                inputs.extend((0..n_bits).map(|i| (y >> i) & 1 == 1));

                let out = adder.eval(&inputs);
                let sum = out
                    .iter()
                    .by_vals()
                    .enumerate()
                    .fold(0u32, |acc, (i, b)| acc | ((b as u32) << i));
                assert_eq!(sum, x + y, "{x} + {y}");
            }
        }
    }

    #[test]
    fn test_c17_shape() {
        let n = c17();
        assert_eq!(n.num_inputs(), 5);
        assert_eq!(n.num_outputs(), 2);
        assert_eq!(n.gate_type_histogram(), vec![(GateType::NAND, 6)]);
    }
}
