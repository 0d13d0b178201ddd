//! Random-pattern comparison of an original netlist with its locked version.
//!
//! Each sample draws one random logic input vector, feeds it to both
//! netlists (the locked one also gets the key) and compares the outputs
//! position by position.

use ahash::AHashMap;
use bitvec::prelude::*;
use rand::Rng;
use tracing::debug;
use xorlock_netlist::Netlist;
use xorlock_netlist::sim::CompiledNetlist;

use crate::errors::HarnessError;
use crate::key::KeyBits;

/// Patterns drawn for the equivalence check by default.
pub const DEFAULT_EQUIVALENCE_SAMPLES: usize = 500;

/// Patterns drawn per wrong key by default.
pub const DEFAULT_CORRUPTION_SAMPLES: usize = 1000;

/// Sample counts for a verification run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Patterns for [`check_equivalence`].
    pub equivalence_samples: usize,
    /// Patterns per key for [`measure_corruption`].
    pub corruption_samples: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            equivalence_samples: DEFAULT_EQUIVALENCE_SAMPLES,
            corruption_samples: DEFAULT_CORRUPTION_SAMPLES,
        }
    }
}

/// Output corruption observed under one key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CorruptionReport {
    /// Patterns simulated.
    pub samples: usize,
    /// Patterns where at least one output differed.
    pub mismatched_patterns: usize,
    /// Output bits that differed, over all patterns.
    pub flipped_bits: usize,
    /// Output bits compared, `samples * outputs`.
    pub compared_bits: usize,
}

impl CorruptionReport {
    /// Fraction of patterns with any wrong output, `0.0` if nothing was
    /// sampled.
    pub fn pattern_mismatch_rate(&self) -> f64 {
        ratio(self.mismatched_patterns, self.samples)
    }

    /// Fraction of wrong output bits, `0.0` if nothing was compared.
    pub fn bit_flip_rate(&self) -> f64 {
        ratio(self.flipped_bits, self.compared_bits)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Where a locked-netlist input takes its value from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InputSource {
    /// Position in the original's input list.
    Logic(usize),
    /// Position in the key.
    Key(usize),
}

/// Both netlists compiled, with the locked inputs resolved once.
struct Comparison {
    original: CompiledNetlist,
    locked: CompiledNetlist,
    sources: Vec<InputSource>,
    num_keys: usize,
}

impl Comparison {
    fn new(original: &Netlist, locked: &Netlist, key_names: &[String]) -> Result<Self, HarnessError> {
        if original.num_outputs() != locked.num_outputs() {
            return Err(HarnessError::OutputCountMismatch {
                original: original.num_outputs(),
                locked: locked.num_outputs(),
            });
        }

        let logic: AHashMap<&str, usize> = original
            .inputs()
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();
        let keys: AHashMap<&str, usize> = key_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let sources = locked
            .inputs()
            .iter()
            .map(|name| {
                if let Some(&i) = logic.get(name.as_str()) {
                    Ok(InputSource::Logic(i))
                } else if let Some(&i) = keys.get(name.as_str()) {
                    Ok(InputSource::Key(i))
                } else {
                    Err(HarnessError::UnknownLockedInput(name.clone()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            original: CompiledNetlist::compile(original)?,
            locked: CompiledNetlist::compile(locked)?,
            sources,
            num_keys: key_names.len(),
        })
    }

    fn check_key(&self, key: &KeyBits) -> Result<(), HarnessError> {
        if key.len() != self.num_keys {
            return Err(HarnessError::KeyLengthMismatch {
                expected: self.num_keys,
                got: key.len(),
            });
        }
        Ok(())
    }

    /// Simulates one random pattern, returning the number of differing
    /// output bits.
    fn sample<R: Rng>(&self, key: &BitSlice, rng: &mut R, locked_in: &mut BitVec) -> usize {
        let logic: BitVec = (0..self.original.num_inputs())
            .map(|_| rng.random::<bool>())
            .collect();

        locked_in.clear();
        locked_in.extend(self.sources.iter().map(|src| match *src {
            InputSource::Logic(i) => logic[i],
            InputSource::Key(i) => key[i],
        }));

        let expected = self.original.eval(&logic);
        let got = self.locked.eval(locked_in.as_bitslice());
        expected
            .iter()
            .by_vals()
            .zip(got.iter().by_vals())
            .filter(|(e, g)| e != g)
            .count()
    }
}

/// Key inputs of a locked netlist: its inputs the original doesn't declare,
/// in declaration order.
pub fn split_key_inputs(original: &Netlist, locked: &Netlist) -> Vec<String> {
    locked
        .inputs()
        .iter()
        .filter(|name| !original.is_input(name))
        .cloned()
        .collect()
}

/// Checks on `sample_count` random patterns that the locked netlist under the
/// all-zero key computes the same outputs as the original.
///
/// Stops at the first mismatching pattern.  Zero samples pass trivially.
pub fn check_equivalence<R: Rng>(
    original: &Netlist,
    locked: &Netlist,
    key_names: &[String],
    sample_count: usize,
    rng: &mut R,
) -> Result<bool, HarnessError> {
    let cmp = Comparison::new(original, locked, key_names)?;
    let key = KeyBits::zeros(key_names.len());
    let mut buf = BitVec::with_capacity(locked.num_inputs());

    for i in 0..sample_count {
        let flipped = cmp.sample(key.bits(), rng, &mut buf);
        if flipped > 0 {
            debug!(pattern = i, flipped, "outputs differ under the correct key");
            return Ok(false);
        }
    }

    debug!(samples = sample_count, "locked netlist matches original");
    Ok(true)
}

/// Measures how much `key` corrupts the outputs over `sample_count` random
/// patterns.
pub fn measure_corruption<R: Rng>(
    original: &Netlist,
    locked: &Netlist,
    key_names: &[String],
    key: &KeyBits,
    sample_count: usize,
    rng: &mut R,
) -> Result<CorruptionReport, HarnessError> {
    let cmp = Comparison::new(original, locked, key_names)?;
    cmp.check_key(key)?;

    let mut report = CorruptionReport {
        samples: sample_count,
        compared_bits: sample_count * original.num_outputs(),
        ..Default::default()
    };
    let mut buf = BitVec::with_capacity(locked.num_inputs());

    for _ in 0..sample_count {
        let flipped = cmp.sample(key.bits(), rng, &mut buf);
        if flipped > 0 {
            report.mismatched_patterns += 1;
            report.flipped_bits += flipped;
        }
    }

    debug!(
        %key,
        mismatched = report.mismatched_patterns,
        flipped = report.flipped_bits,
        "measured corruption"
    );
    Ok(report)
}
