//! Reported-position error model shared by all sensor types.

use sw_core::{Position, StreamRng, bearing_deg, destination, distance_m};

use crate::SensorResult;

/// Metres per degree of latitude (and of longitude at the equator).
const METRES_PER_DEG: f64 = 111_000.0;

/// Perturb `true_pos` with independent Gaussian errors — `horiz_sigma_m` on
/// each horizontal axis, `alt_sigma_m` vertically — and clamp the result
/// back onto the sensor's range disc.
///
/// The clamp preserves the invariant that a reported position is never
/// further than `max_range_m` from the sensor that produced it, even when
/// the entity sits right at the range boundary and the noise draw points
/// outward.
pub(crate) fn report_position(
    sensor_pos:    &Position,
    true_pos:      &Position,
    max_range_m:   f64,
    horiz_sigma_m: f64,
    alt_sigma_m:   f64,
    rng:           &mut StreamRng,
) -> SensorResult<Position> {
    let lat_sigma_deg = horiz_sigma_m / METRES_PER_DEG;
    // Longitude degrees shrink with latitude; floor the divisor so polar
    // positions don't blow the noise up to planet scale.
    let lon_scale = (METRES_PER_DEG * true_pos.lat_deg.to_radians().cos()).max(1.0);

    let mut reported = Position {
        lat_deg: (true_pos.lat_deg + rng.gauss(0.0, lat_sigma_deg)).clamp(-90.0, 90.0),
        lon_deg: wrap_lon_deg(true_pos.lon_deg + rng.gauss(0.0, horiz_sigma_m / lon_scale)),
        alt_m:   (true_pos.alt_m + rng.gauss(0.0, alt_sigma_m)).max(0.0),
    };

    if distance_m(sensor_pos, &reported)? > max_range_m {
        let outward = bearing_deg(sensor_pos, &reported)?;
        let on_rim = destination(sensor_pos, outward, max_range_m)?;
        reported = Position { alt_m: reported.alt_m, ..on_rim };
    }

    Ok(reported)
}

/// Normalize a longitude to [-180, 180).
fn wrap_lon_deg(lon_deg: f64) -> f64 {
    (lon_deg + 540.0).rem_euclid(360.0) - 180.0
}
