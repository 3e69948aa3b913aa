//! `sw-sensor` — probabilistic detection models for the skywatch simulator.
//!
//! One contract across all sensor types:
//!
//! ```ignore
//! sensor.evaluate(&entity, &env, &mut rng)?   // -> Option<DetectionOutcome>
//! ```
//!
//! `None` is the normal "not detected this tick" outcome, not an error.
//! Every call re-rolls the detection dice against a per-type probability
//! model — the models are stateless and memoryless; all continuity lives on
//! the entity records owned by the simulation loop.
//!
//! | Module          | Contents                                             |
//! |-----------------|------------------------------------------------------|
//! | [`kind`]        | `SensorKind`                                         |
//! | [`sensor`]      | `Sensor`, `SensorParams`, per-type constructors      |
//! | [`environment`] | `Environment` (weather / wind / day-night)           |
//! | [`detection`]   | `DetectionOutcome`, `Detection`, `DetectionMeta`     |
//! | [`radar`]       | RCS/range model + the false-alarm path               |
//! | [`adsb`]        | Transponder coverage model                           |
//! | [`camera`]      | FOV cone + visual detection model                    |
//! | [`acoustic`]    | Sound-level / SNR model                              |
//! | [`error`]       | `SensorError`                                        |

pub mod acoustic;
pub mod adsb;
pub mod camera;
pub mod detection;
pub mod environment;
pub mod error;
pub mod kind;
mod noise;
pub mod radar;
pub mod sensor;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use acoustic::AcousticParams;
pub use adsb::AdsbParams;
pub use camera::{CameraParams, DayNight};
pub use detection::{Detection, DetectionMeta, DetectionOutcome};
pub use environment::Environment;
pub use error::{SensorError, SensorResult};
pub use kind::SensorKind;
pub use radar::RadarParams;
pub use sensor::{Sensor, SensorParams};
