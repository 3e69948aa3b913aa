//! Deterministic per-entity and per-sensor RNG streams.
//!
//! # Determinism strategy
//!
//! Each entity and each sensor gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (stream_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream IDs uniformly across the seed space.
//! This means:
//!
//! - Streams never share RNG state (no contention, no ordering dependency),
//!   so a parallel detection pass produces the same batches as a sequential
//!   one.
//! - Adding or removing entities does not disturb the streams of existing
//!   entities or sensors — a given id always draws the same sequence.
//!
//! Entity and sensor streams occupy disjoint halves of the id space so that
//! `EntityId(3)` and `SensorId(3)` never collide.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{EntityId, SensorId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Offset separating sensor streams from entity streams.
const SENSOR_STREAM_BASE: u64 = 1 << 32;

/// A deterministic RNG stream owned by one entity or one sensor.
///
/// The type is `Send` but intentionally not `Sync` — stream state must never
/// be shared between threads.  Rayon's per-item exclusive access pattern in
/// the parallel detection pass satisfies this.
pub struct StreamRng(SmallRng);

impl StreamRng {
    fn with_stream(global_seed: u64, stream: u64) -> Self {
        StreamRng(SmallRng::seed_from_u64(
            global_seed ^ stream.wrapping_mul(MIXING_CONSTANT),
        ))
    }

    /// The motion-model stream for `entity`.
    pub fn for_entity(global_seed: u64, entity: EntityId) -> Self {
        Self::with_stream(global_seed, entity.0 as u64)
    }

    /// The detection stream for `sensor`.
    pub fn for_sensor(global_seed: u64, sensor: SensorId) -> Self {
        Self::with_stream(global_seed, SENSOR_STREAM_BASE | sensor.0 as u64)
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Sample a Gaussian with the given mean and standard deviation.
    ///
    /// A degenerate sigma (negative or NaN) yields the mean — measurement
    /// noise quietly disappears rather than poisoning positions.
    #[inline]
    pub fn gauss(&mut self, mean: f64, sigma: f64) -> f64 {
        match Normal::new(mean, sigma) {
            Ok(dist) => dist.sample(&mut self.0),
            Err(_) => mean,
        }
    }
}
