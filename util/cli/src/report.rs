//! Human-readable summaries printed to stdout.

use xorlock_lock::{CorruptionReport, KeyBits, LockPlan, LockedNetlist};
use xorlock_netlist::Netlist;

pub(crate) fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('_');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

pub(crate) fn print_netlist_summary(netlist: &Netlist) {
    println!("\nNetlist Summary:");
    println!("  Inputs: {}", format_number(netlist.num_inputs()));
    println!("  Outputs: {}", format_number(netlist.num_outputs()));
    println!("  Total gates: {}", format_number(netlist.num_gates()));
    for (ty, count) in netlist.gate_type_histogram() {
        println!(
            "  {} gates: {} ({:.1}%)",
            ty,
            format_number(count),
            percent(count, netlist.num_gates())
        );
    }
}

pub(crate) fn print_lock_summary(plan: &LockPlan, locked: &LockedNetlist) {
    println!("\nLock Summary:");
    println!("  Key gates: {}", plan.len());
    for (point, key) in plan.points().iter().zip(locked.key_names()) {
        println!(
            "  {:<10} <- {:<6} ({} detections)",
            point.name, key, point.detections
        );
    }
    println!("  Key inputs: {}", locked.key_names().join(", "));
    println!("  Correct key: {}", locked.correct_key());
}

pub(crate) fn print_verify_header(original: &Netlist, locked: &Netlist, key_names: &[String]) {
    println!("\nVerification Setup:");
    println!("  Logic inputs: {}", format_number(original.num_inputs()));
    println!("  Key inputs: {}", format_number(key_names.len()));
    println!("  Outputs: {}", format_number(locked.num_outputs()));
    if !key_names.is_empty() {
        println!("  Keys: {}", key_names.join(", "));
    }
}

pub(crate) fn print_equivalence(equivalent: bool, samples: usize) {
    let verdict = if equivalent { "PASSED" } else { "FAILED" };
    println!(
        "\nFunctional equivalence (correct key, {} patterns): {}",
        format_number(samples),
        verdict
    );
}

pub(crate) fn print_corruption(key: &KeyBits, report: &CorruptionReport) {
    println!("\nWrong key {key}:");
    println!(
        "  Pattern mismatch rate: {:.2}% ({}/{})",
        report.pattern_mismatch_rate() * 100.0,
        format_number(report.mismatched_patterns),
        format_number(report.samples)
    );
    println!(
        "  Bit flip rate: {:.2}% ({}/{})",
        report.bit_flip_rate() * 100.0,
        format_number(report.flipped_bits),
        format_number(report.compared_bits)
    );
}
