//! Deterministic short-identifier generation.
//!
//! List-item artifacts on disk are named with six-character uppercase
//! hexadecimal identifiers drawn from a seeded pseudo-random stream. The
//! stream is reproducible: [`IdGenerator::generate_ids`] reseeds before
//! drawing, so the identifier sequence is a pure function of the seed and
//! the skip count, and a per-list skip counter (persisted in the list's
//! metadata sidecar) is enough to guarantee intra-list uniqueness.
//!
//! The generator is an explicit, injectable value rather than process
//! state; tests construct their own instances instead of resetting a
//! global.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of a generated identifier, in characters.
pub const ID_LEN: usize = 6;

/// Seed for the default identifier stream.
const DEFAULT_SEED: u64 = 0x5944_5321;

const HEX_DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// Seeded, reproducible pseudo-random identifier stream.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: u64,
    rng: StdRng,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl IdGenerator {
    /// Create a generator with its own seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reseed the stream to its initial state.
    pub fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Draw `count` integers uniformly from `[lower, upper]`, advancing
    /// the stream.
    ///
    /// Returns an empty vector when `count < 1` or `upper < lower`; no
    /// error is raised.
    pub fn uniform_ints(&mut self, lower: i64, upper: i64, count: i64) -> Vec<i64> {
        if count < 1 || upper < lower {
            return Vec::new();
        }
        (0..count).map(|_| self.rng.gen_range(lower..=upper)).collect()
    }

    /// Produce `count` six-character identifiers, skipping the first
    /// `skip` identifiers of the stream.
    ///
    /// The stream is reseeded first, so for a fixed seed the result is a
    /// pure function of `(count, skip)`:
    /// `generate_ids(6, 4) == generate_ids(10, 0)[4..]`.
    ///
    /// Returns an empty vector when `count < 1` or `skip < 0`.
    pub fn generate_ids(&mut self, count: i64, skip: i64) -> Vec<String> {
        if count < 1 || skip < 0 {
            return Vec::new();
        }
        self.reset();
        for _ in 0..skip {
            self.uniform_ints(0, 15, ID_LEN as i64);
        }
        (0..count).map(|_| self.next_id()).collect()
    }

    fn next_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| {
                // One draw per character, as a separate uniform_ints call
                // would do; kept inline to avoid a Vec per character.
                HEX_DIGITS[self.rng.gen_range(0i64..=15) as usize]
            })
            .collect()
    }
}

/// Whether a string has the shape of a generated identifier:
/// exactly six uppercase alphanumeric characters.
pub fn is_generated_id(candidate: &str) -> bool {
    candidate.len() == ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
