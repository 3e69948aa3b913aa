//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter plus a
//! floating-point count of elapsed simulated seconds, held in `SimClock`:
//!
//!   wall_time = start_unix_secs + elapsed_secs
//!
//! The tick counter is the canonical loop index (exact, overflow-free); the
//! seconds accumulator exists because tick length is fractional — the
//! default cadence is 10 Hz (0.1 s per tick) and a speed multiplier may
//! scale individual steps, so a fixed integer seconds-per-tick mapping
//! would not hold.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at 10 ticks per second a u64 lasts ~58 billion years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and maps it to Unix wall-clock seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: f64,
    /// Simulated seconds elapsed since tick 0.
    pub elapsed_secs: f64,
    /// The current tick — advanced by `SimClock::advance()` each step.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock starting at `start_unix_secs`.
    pub fn new(start_unix_secs: f64) -> Self {
        Self {
            start_unix_secs,
            elapsed_secs: 0.0,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick of `dt_secs` simulated seconds.
    #[inline]
    pub fn advance(&mut self, dt_secs: f64) {
        self.elapsed_secs += dt_secs;
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Current Unix timestamp corresponding to the elapsed simulation time.
    #[inline]
    pub fn unix_secs(&self) -> f64 {
        self.start_unix_secs + self.elapsed_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{:.1}s)", self.current_tick, self.elapsed_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically assembled by the application (or deserialized alongside a
/// scenario) and passed to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: f64,

    /// Simulated seconds per tick at speed 1.0.  Default: 0.1 (10 Hz).
    pub tick_duration_secs: f64,

    /// Total ticks for a bounded run.  `Sim::run` stops here; incremental
    /// stepping ignores it.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// The tick at which a bounded run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:    0.0,
            tick_duration_secs: 0.1,
            total_ticks:        600,
            seed:               0,
        }
    }
}
