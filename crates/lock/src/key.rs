//! Key values for locked netlists.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::errors::KeyBitsError;

/// Values for the key inputs, in key declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyBits(BitVec);

impl KeyBits {
    /// All-zero key of length `n`: the correct key for XOR locking.
    pub fn zeros(n: usize) -> Self {
        Self(BitVec::repeat(false, n))
    }

    /// All-one key of length `n`.
    pub fn ones(n: usize) -> Self {
        Self(BitVec::repeat(true, n))
    }

    /// Number of key bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key has no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The bits in key input order.
    pub fn bits(&self) -> &BitSlice {
        &self.0
    }

    /// Whether every bit is clear.
    pub fn is_zero(&self) -> bool {
        self.0.not_any()
    }
}

impl From<BitVec> for KeyBits {
    fn from(bits: BitVec) -> Self {
        Self(bits)
    }
}

impl FromIterator<bool> for KeyBits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for KeyBits {
    type Err = KeyBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = BitVec::with_capacity(s.len());
        for (position, ch) in s.chars().enumerate() {
            match ch {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(KeyBitsError::InvalidChar { ch, position }),
            }
        }
        Ok(Self(bits))
    }
}

impl fmt::Display for KeyBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Standard wrong keys for measuring output corruption.
///
/// All ones, alternating `1010...`, and the pattern `00010000` right-aligned
/// in `n` bits, so its set bit sits at position `n - 5` for keys of 8 bits or
/// more.  Shorter keys keep the pattern's prefix: position 3, or the last
/// position for keys of 3 bits or fewer.  Every key is `n` bits long;
/// duplicates and the all-zero key are dropped, so the suite is empty for
/// `n == 0`.
pub fn wrong_key_suite(n: usize) -> Vec<KeyBits> {
    if n == 0 {
        return Vec::new();
    }

    let single = if n >= 8 { n - 5 } else { (n - 1).min(3) };
    let candidates = [
        KeyBits::ones(n),
        (0..n).map(|i| i % 2 == 0).collect(),
        (0..n).map(|i| i == single).collect(),
    ];

    let mut suite: Vec<KeyBits> = Vec::with_capacity(candidates.len());
    for key in candidates {
        if !key.is_zero() && !suite.contains(&key) {
            suite.push(key);
        }
    }
    suite
}
