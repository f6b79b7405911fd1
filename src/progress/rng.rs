//! Deterministic date-seeded pseudo-random generator
//!
//! The daily challenge must come out identical for the same date key on every
//! run (and across reimplementations), so the generator is fully specified:
//! a wrapping 32-bit hash of the key string seeds a linear-congruential
//! recurrence whose successive values are mapped to `[0, 1)`.
//!
//! The constants (9301, 49297, 233280) are part of the stored-behavior
//! contract and must not change.

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

/// Hash a key string to a 32-bit seed (`h = h*31 + byte`, wrapping).
fn hash_key(key: &str) -> u32 {
    let mut h: i32 = 0;
    for b in key.bytes() {
        h = h.wrapping_mul(31).wrapping_add(b as i32);
    }
    h.unsigned_abs()
}

/// Deterministic generator keyed by an arbitrary string (a calendar date key
/// in practice).
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
}

impl SeededRng {
    pub fn from_key(key: &str) -> Self {
        Self {
            seed: hash_key(key) as u64,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.seed = (self.seed * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.seed as f64 / LCG_MODULUS as f64
    }

    /// Uniform index into a collection of `len` elements. `len` must be > 0.
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len - 1)
    }
}
