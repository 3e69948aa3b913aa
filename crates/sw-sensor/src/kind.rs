//! Sensor type enumeration.

/// The sensor families the detection pass knows how to model.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorKind {
    Radar,
    Adsb,
    Camera,
    Acoustic,
}

impl SensorKind {
    /// Human-readable label, useful for CSV/SQLite column values.
    pub fn as_str(self) -> &'static str {
        match self {
            SensorKind::Radar    => "radar",
            SensorKind::Adsb     => "adsb",
            SensorKind::Camera   => "camera",
            SensorKind::Acoustic => "acoustic",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
