//! End-to-end locking: parse, count faults, select, insert, write, re-read and
//! verify.

use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;
use xorlock_lock::harness::{check_equivalence, measure_corruption, split_key_inputs};
use xorlock_lock::{KeyBits, LockPlan, fault_log, insert, select, wrong_key_suite};
use xorlock_netlist::bench;
use xorlock_netlist::example_circuits::{c17, ripple_carry_adder};
use xorlock_netlist::sim::{Assignment, evaluate};

fn rng(seed: u8) -> ChaCha20Rng {
    ChaCha20Rng::from_seed([seed; 32])
}

#[test]
fn test_adder_locked_equivalent_under_correct_key() {
    let adder = ripple_carry_adder(8);

    // Synthetic log that favours the carry chain.
    let mut log = String::new();
    for i in 1..=8 {
        log.push_str(&format!("test {i}: pattern\n"));
        for j in 1..=i {
            log.push_str(&format!("  c{j} /0\n"));
        }
        log.push_str("  s0->c1 /1\n");
    }
    let counts = fault_log::parse_for(&adder, &log);
    assert_eq!(counts.get("c1"), 8);
    assert_eq!(counts.get("s0"), 8);

    let plan = select(&adder, &counts, 6);
    assert_eq!(plan.len(), 6);
    assert_eq!(plan.names().take(2).collect::<Vec<_>>(), ["s0", "c1"]);

    let locked = insert(&adder, &plan).unwrap();
    assert_eq!(locked.netlist().num_inputs(), adder.num_inputs() + 6);
    assert_eq!(locked.netlist().num_gates(), adder.num_gates() + 6);

    assert!(
        check_equivalence(
            &adder,
            locked.netlist(),
            locked.key_names(),
            500,
            &mut rng(1)
        )
        .unwrap()
    );

    for key in wrong_key_suite(6) {
        let report = measure_corruption(
            &adder,
            locked.netlist(),
            locked.key_names(),
            &key,
            200,
            &mut rng(2),
        )
        .unwrap();
        assert!(report.mismatched_patterns > 0, "key {key} never corrupts");
        assert!(report.bit_flip_rate() <= report.pattern_mismatch_rate());
    }
}

#[test]
fn test_written_locked_netlist_reads_back() {
    let original = c17();
    let locked = insert(&original, &LockPlan::from_names(["16", "11", "22"])).unwrap();
    let text = bench::serialize(locked.netlist(), "Locked c17 with 3 key-gates");
    assert!(text.starts_with("# Locked c17 with 3 key-gates\n"));

    let reread = bench::parse(&text).unwrap();
    assert_eq!(&reread, locked.netlist());
    assert_eq!(split_key_inputs(&original, &reread), locked.key_names());

    let keys = split_key_inputs(&original, &reread);
    assert!(check_equivalence(&original, &reread, &keys, 100, &mut rng(5)).unwrap());
}

#[test]
fn test_single_key_on_and_gate() {
    let original = bench::parse("INPUT(a)\nINPUT(b)\nOUTPUT(y)\nn = AND(a, b)\ny = BUF(n)\n").unwrap();
    let locked = insert(&original, &LockPlan::from_names(["n"])).unwrap();

    let run = |a, b, k| {
        let assignment: Assignment = [("a", a), ("b", b), ("k0", k)]
            .into_iter()
            .map(|(n, v)| (n.to_owned(), v))
            .collect();
        evaluate(locked.netlist(), &assignment).unwrap()
    };

    for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
        assert_eq!(run(a, b, false), [a && b]);
        assert_eq!(run(a, b, true), [!(a && b)]);
    }

    let report = measure_corruption(
        &original,
        locked.netlist(),
        locked.key_names(),
        &KeyBits::ones(1),
        50,
        &mut rng(9),
    )
    .unwrap();
    assert_eq!(report.pattern_mismatch_rate(), 1.0);
}

#[test]
fn test_same_seed_same_numbers() {
    let adder = ripple_carry_adder(4);
    let plan = select(&adder, &Default::default(), 4);
    let locked = insert(&adder, &plan).unwrap();
    let key: KeyBits = "1010".parse().unwrap();

    let run = || {
        measure_corruption(&adder, locked.netlist(), locked.key_names(), &key, 300, &mut rng(4))
            .unwrap()
    };
    assert_eq!(run(), run());
}
