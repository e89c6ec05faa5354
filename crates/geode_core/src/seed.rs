//! # Generation Seeds
//!
//! Seed derivation for reproducible generation.
//!
//! ## Determinism Guarantee
//!
//! The same seed phrase produces the same [`GenerationSeed`] on any
//! platform, any time. Seeds need only be reproducible, not
//! cryptographically strong.

use serde::{Deserialize, Serialize};

/// Seed for one generation run.
///
/// Every random draw in a run derives from this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationSeed(u64);

impl GenerationSeed {
    /// Creates a seed from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Folds a seed phrase into a seed via FNV-1a.
    ///
    /// Admin triggers supply free-form strings; the same phrase always maps
    /// to the same seed.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;

        let mut hash = FNV_OFFSET;
        for byte in phrase.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(hash)
    }

    /// Derives a fresh seed from a unix timestamp when the caller supplied
    /// none. Mixed so that adjacent seconds land far apart.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_unix_time(now: i64) -> Self {
        Self::new(now as u64).derive(0x6EED)
    }

    /// Derives a sub-seed for a specific purpose (e.g. per-type streams).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // FNV-1a hash mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}
