//! Optional per-entity attributes read by the sensor models.
//!
//! A typed struct rather than a free-form map: every key a detection model
//! may consult is enumerated here, so a typo in a scenario file fails at
//! deserialization instead of silently changing sensor behavior.

/// Optional entity attributes.  All fields default to `None`, which each
/// consumer interprets as "use the kind-based default".
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntityMeta {
    /// Radar cross-section override in m².  `None` → default by entity kind.
    pub rcs_m2: Option<f64>,

    /// Operator-assigned callsign, echoed into ADS-B detection metadata.
    pub callsign: Option<String>,

    /// Whether the transponder works.  Read by the ADS-B model on aircraft;
    /// `None` means "installed and working" (`Some(false)` models a dark
    /// aircraft).
    pub transponder: Option<bool>,

    /// Whether the entity shows lights, lifting the camera's night penalty.
    pub emits_light: Option<bool>,
}
