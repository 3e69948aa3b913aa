//! Movement patterns and their one-tick update rules.

use sw_core::{Position, StreamRng, bearing_deg, destination, distance_m, wrap_heading_deg};

use crate::{Motion, MotionResult};

/// Vertical rate used when a route leg changes altitude, metres per second.
const CLIMB_RATE_MS: f64 = 10.0;

/// What a waypoint route does after its final waypoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RouteEnd {
    /// Restart from the first waypoint.
    Wrap,
    /// Stop at the final waypoint.
    #[default]
    Hold,
}

/// How an entity moves between ticks.
///
/// Waypoint and patrol routes carry their own progress state (`next`,
/// `reverse`) so the pattern can be advanced without any per-entity side
/// table.  The random walk and evasive patterns are stateless beyond the
/// entity's own motion vector.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementPattern {
    /// Follow `route` in order at the entity's current speed.
    Waypoint {
        route: Vec<Position>,
        #[cfg_attr(feature = "serde", serde(default))]
        next:  usize,
        #[cfg_attr(feature = "serde", serde(default))]
        end:   RouteEnd,
    },

    /// Follow `route` back and forth, reversing direction at both ends.
    Patrol {
        route:   Vec<Position>,
        #[cfg_attr(feature = "serde", serde(default))]
        next:    usize,
        #[cfg_attr(feature = "serde", serde(default))]
        reverse: bool,
    },

    /// Constant speed, heading perturbed by up to ±`max_turn_deg` per tick.
    Random { max_turn_deg: f64 },

    /// Erratic motion: heading perturbed by up to ±`max_turn_deg` and speed
    /// resampled each tick within `base_speed_ms × [1−speed_band, 1+speed_band]`.
    Evasive {
        max_turn_deg:  f64,
        speed_band:    f64,
        base_speed_ms: f64,
    },
}

impl MovementPattern {
    /// A waypoint route starting at its first entry.
    pub fn waypoint(route: Vec<Position>, end: RouteEnd) -> Self {
        MovementPattern::Waypoint { route, next: 0, end }
    }

    /// A patrol route starting at its first entry, initially running forward.
    pub fn patrol(route: Vec<Position>) -> Self {
        MovementPattern::Patrol { route, next: 0, reverse: false }
    }

    /// A random walk with the default ±45° per-tick turn bound.
    pub fn random() -> Self {
        MovementPattern::Random { max_turn_deg: 45.0 }
    }

    /// Evasive maneuvering around `base_speed_ms` with the default ±90° turn
    /// bound and ±30 % speed band.
    pub fn evasive(base_speed_ms: f64) -> Self {
        MovementPattern::Evasive {
            max_turn_deg:  90.0,
            speed_band:    0.3,
            base_speed_ms: base_speed_ms.max(0.0),
        }
    }

    /// Advance one tick of `dt_secs` simulated seconds.
    ///
    /// Returns the new position; `motion` is updated in place (heading for
    /// every pattern, speed for evasive and for a route that reaches a
    /// terminal hold).  A zero speed never moves the entity, but random and
    /// evasive headings still churn so the entity resumes in a fresh
    /// direction.
    pub fn advance(
        &mut self,
        position: &Position,
        motion:   &mut Motion,
        dt_secs:  f64,
        rng:      &mut StreamRng,
    ) -> MotionResult<Position> {
        match self {
            MovementPattern::Waypoint { route, next, end } => {
                if route.is_empty() {
                    return Ok(*position);
                }
                let target = route[*next];
                let (new_pos, arrived) = step_toward(position, motion, &target, dt_secs)?;
                if arrived {
                    if *next + 1 < route.len() {
                        *next += 1;
                    } else {
                        match end {
                            RouteEnd::Wrap => *next = 0,
                            RouteEnd::Hold => motion.speed_ms = 0.0,
                        }
                    }
                }
                Ok(new_pos)
            }

            MovementPattern::Patrol { route, next, reverse } => {
                if route.is_empty() {
                    return Ok(*position);
                }
                let target = route[*next];
                let (new_pos, arrived) = step_toward(position, motion, &target, dt_secs)?;
                if arrived && route.len() > 1 {
                    // Ping-pong: reverse at either end instead of wrapping.
                    if *reverse {
                        if *next == 0 {
                            *reverse = false;
                            *next = 1;
                        } else {
                            *next -= 1;
                        }
                    } else if *next + 1 == route.len() {
                        *reverse = true;
                        *next -= 1;
                    } else {
                        *next += 1;
                    }
                }
                Ok(new_pos)
            }

            MovementPattern::Random { max_turn_deg } => {
                let turn = rng.gen_range(-*max_turn_deg..=*max_turn_deg);
                motion.heading_deg = wrap_heading_deg(motion.heading_deg + turn);
                drift(position, motion, dt_secs)
            }

            MovementPattern::Evasive { max_turn_deg, speed_band, base_speed_ms } => {
                let turn = rng.gen_range(-*max_turn_deg..=*max_turn_deg);
                motion.heading_deg = wrap_heading_deg(motion.heading_deg + turn);
                motion.speed_ms = if *base_speed_ms > 0.0 {
                    let lo = *base_speed_ms * (1.0 - *speed_band).max(0.0);
                    let hi = *base_speed_ms * (1.0 + *speed_band);
                    rng.gen_range(lo..=hi)
                } else {
                    0.0
                };
                drift(position, motion, dt_secs)
            }
        }
    }
}

/// Move straight along the current heading; no-op at zero speed.
fn drift(position: &Position, motion: &Motion, dt_secs: f64) -> MotionResult<Position> {
    if !motion.is_moving() {
        return Ok(*position);
    }
    Ok(destination(position, motion.heading_deg, motion.speed_ms * dt_secs)?)
}

/// One step toward `target`, recomputing heading and converging altitude.
///
/// Arrival means the remaining distance fits inside this tick's step, in
/// which case the entity lands exactly on the waypoint (altitude still
/// limited by the climb rate).
fn step_toward(
    position: &Position,
    motion:   &mut Motion,
    target:   &Position,
    dt_secs:  f64,
) -> MotionResult<(Position, bool)> {
    let remaining = distance_m(position, target)?;
    let step_len = motion.speed_ms * dt_secs;

    if step_len <= 0.0 {
        if remaining > 0.0 {
            motion.heading_deg = bearing_deg(position, target)?;
        }
        return Ok((*position, false));
    }

    if remaining <= step_len {
        if remaining > 0.0 {
            motion.heading_deg = bearing_deg(position, target)?;
        }
        let landed = Position {
            alt_m: approach_alt(position.alt_m, target.alt_m, dt_secs),
            ..*target
        };
        return Ok((landed, true));
    }

    let heading = bearing_deg(position, target)?;
    motion.heading_deg = heading;
    let mut new_pos = destination(position, heading, step_len)?;
    new_pos.alt_m = approach_alt(position.alt_m, target.alt_m, dt_secs);
    Ok((new_pos, false))
}

/// Converge altitude toward `target_alt` at the fixed climb/descent rate.
fn approach_alt(current_alt: f64, target_alt: f64, dt_secs: f64) -> f64 {
    let max_change = CLIMB_RATE_MS * dt_secs;
    current_alt + (target_alt - current_alt).clamp(-max_change, max_change)
}
