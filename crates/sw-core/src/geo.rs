//! Geographic position type and great-circle math.
//!
//! All angles are degrees at the API surface (sensor configs and scenario
//! files are written in degrees); radians appear only inside the formulas.
//! Latitude/longitude are `f64`: detection reports are compared against
//! sensor accuracy classes down to ~10 m, and the round trip
//! `destination(a, bearing(a, b), distance(a, b)) ≈ b` must hold to ~1 m,
//! which single precision cannot guarantee at Earth scale.
//!
//! Distances are great-circle (haversine) on a mean-radius sphere and ignore
//! altitude; `destination` carries the origin altitude through unchanged.

use crate::error::{CoreError, CoreResult};

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate with altitude in metres above the surface.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub lat_deg: f64,
    pub lon_deg: f64,
    /// Altitude in metres.  ≥ 0 by convention; surface craft sit at 0.
    pub alt_m:   f64,
}

impl Position {
    /// Construct a validated position.
    pub fn new(lat_deg: f64, lon_deg: f64, alt_m: f64) -> CoreResult<Self> {
        let pos = Self { lat_deg, lon_deg, alt_m };
        pos.validate()?;
        Ok(pos)
    }

    /// Check that latitude/longitude are in range and all components finite.
    ///
    /// Positions can be built field-by-field (e.g. deserialized from a
    /// scenario file), so the geo functions below re-validate their inputs
    /// rather than trusting construction.
    pub fn validate(&self) -> CoreResult<()> {
        let ok = self.lat_deg.is_finite()
            && self.lon_deg.is_finite()
            && self.alt_m.is_finite()
            && (-90.0..=90.0).contains(&self.lat_deg)
            && (-180.0..=180.0).contains(&self.lon_deg);
        if ok {
            Ok(())
        } else {
            Err(CoreError::InvalidCoordinate {
                lat_deg: self.lat_deg,
                lon_deg: self.lon_deg,
                alt_m:   self.alt_m,
            })
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.0} m)", self.lat_deg, self.lon_deg, self.alt_m)
    }
}

/// Haversine great-circle distance in metres, ignoring altitude.
pub fn distance_m(a: &Position, b: &Position) -> CoreResult<f64> {
    a.validate()?;
    b.validate()?;

    let d_lat = (b.lat_deg - a.lat_deg).to_radians();
    let d_lon = (b.lon_deg - a.lon_deg).to_radians();

    let lat1 = a.lat_deg.to_radians();
    let lat2 = b.lat_deg.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    Ok(EARTH_RADIUS_M * c)
}

/// Initial bearing from `a` to `b` in degrees, normalized to [0, 360).
pub fn bearing_deg(a: &Position, b: &Position) -> CoreResult<f64> {
    a.validate()?;
    b.validate()?;

    let lat1 = a.lat_deg.to_radians();
    let lat2 = b.lat_deg.to_radians();
    let d_lon = (b.lon_deg - a.lon_deg).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    Ok(wrap_heading_deg(y.atan2(x).to_degrees()))
}

/// Forward great-circle projection: the point `distance_m` metres from
/// `origin` along `heading_deg`.  Altitude is carried through unchanged.
pub fn destination(origin: &Position, heading_deg: f64, distance_m: f64) -> CoreResult<Position> {
    origin.validate()?;

    let lat1 = origin.lat_deg.to_radians();
    let lon1 = origin.lon_deg.to_radians();
    let theta = heading_deg.to_radians();
    let delta = distance_m / EARTH_RADIUS_M;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos())
            .atan2(delta.cos() - lat1.sin() * lat2.sin());

    Ok(Position {
        lat_deg: lat2.to_degrees(),
        // Normalize to [-180, 180) after crossing the antimeridian.
        lon_deg: (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0,
        alt_m:   origin.alt_m,
    })
}

/// Normalize a heading to [0, 360).
#[inline]
pub fn wrap_heading_deg(heading_deg: f64) -> f64 {
    heading_deg.rem_euclid(360.0)
}
