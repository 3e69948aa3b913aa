//! Shared environmental conditions for a detection pass.

/// Weather and lighting for one tick, owned by the simulation driver and
/// passed into every evaluation — never ambient global state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Environment {
    /// Optical visibility multiplier in [0, 1]; 1.0 = clear air.
    pub visibility: f64,

    /// Acoustic propagation penalty, ≥ 1.0; 1.0 = no wind.  Detection
    /// probability for acoustic sensors divides by this factor.
    pub wind_factor: f64,

    /// Night reduces camera detection unless the target shows lights.
    pub night: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self { visibility: 1.0, wind_factor: 1.0, night: false }
    }
}
