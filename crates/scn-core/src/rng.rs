//! Deterministic RNG handle and substream seed derivation.
//!
//! Every randomized operation in the workspace takes an explicit
//! [`RngHandle`] owned by the caller; there is no process-wide seed. When a
//! batch of independent random units runs (one null-model sample per unit,
//! possibly on different threads), each unit derives its own substream from
//! the master seed and its unit index, so results do not depend on scheduling
//! and samples stay statistically independent.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Deterministic RNG handle used throughout the scn crates.
///
/// Thin wrapper around `StdRng` documenting the seeding policy: a master
/// `seed: u64` comes from the caller, and substreams are derived by hashing
/// `(master_seed, substream_index)` with SipHash-1-3 under fixed zero keys.
/// The derivation is stable across platforms; re-running with the same master
/// seed reproduces the same sample sequence.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the handle for substream `index` of `master_seed`.
    ///
    /// This is the constructor used for each unit of a parallel sampling
    /// batch: `RngHandle::substream(seed, k)` for sample id `k`.
    pub fn substream(master_seed: u64, index: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, index))
    }

    /// Draws a uniform value in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        // 53 random mantissa bits, the conventional u64 -> f64 mapping.
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Returns a mutable reference to the underlying RNG for advanced usage.
    pub fn inner_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
