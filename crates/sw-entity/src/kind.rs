//! Entity classification shared across the motion and sensor models.

/// What kind of craft an entity is.
///
/// The kind drives the sensor models' type-dependent terms: default radar
/// cross-section, visual signature, and acoustic source level all key off
/// it.  Contacts whose class is not yet established use `Unknown`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntityKind {
    Aircraft,
    Vehicle,
    Vessel,
    #[default]
    Unknown,
}

impl EntityKind {
    /// Human-readable label, useful for CSV/SQLite column values.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Aircraft => "aircraft",
            EntityKind::Vehicle  => "vehicle",
            EntityKind::Vessel   => "vessel",
            EntityKind::Unknown  => "unknown",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
