//! Per-sensor RNG streams, kept outside `Sim`'s sensor list so the detection
//! pass can hold `&Sensor` and `&mut StreamRng` simultaneously.

use sw_core::{SensorId, StreamRng};

/// One deterministic RNG stream per sensor, aligned with `Sim`'s sensor
/// vector.  `SensorRngs` is `Send` but intentionally not shared across
/// threads — the parallel pass hands each worker exclusive references via
/// [`get_many_mut`][Self::get_many_mut].
pub struct SensorRngs {
    inner: Vec<StreamRng>,
}

impl SensorRngs {
    /// Seed one stream per sensor id from the run's global seed.
    pub fn new(global_seed: u64, sensor_ids: impl IntoIterator<Item = SensorId>) -> Self {
        let inner = sensor_ids
            .into_iter()
            .map(|id| StreamRng::for_sensor(global_seed, id))
            .collect();
        Self { inner }
    }

    /// Append a stream for a sensor added mid-run.
    pub fn push(&mut self, global_seed: u64, id: SensorId) {
        self.inner.push(StreamRng::for_sensor(global_seed, id));
    }

    /// Drop the stream at `slot` (sensor removed; slots stay aligned).
    pub fn remove(&mut self, slot: usize) {
        self.inner.remove(slot);
    }

    /// Mutable reference to one sensor's stream.
    #[inline]
    pub fn get_mut(&mut self, slot: usize) -> &mut StreamRng {
        &mut self.inner[slot]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Return mutable references to the streams for a set of sensor slots.
    ///
    /// Used by the parallel detection pass: the due-sensor list is zipped
    /// with the returned refs and processed with Rayon.
    ///
    /// # Precondition (enforced by caller)
    ///
    /// `slots` must contain no duplicates and all indices must be in-bounds.
    /// Both hold for the due list, which is built by a single ordered scan
    /// of the sensor vector.
    pub fn get_many_mut(&mut self, slots: &[usize]) -> Vec<&mut StreamRng> {
        let ptr = self.inner.as_mut_ptr();
        // SAFETY: every slot is unique (caller invariant) and within bounds
        // (slots come from enumerating the aligned sensor vector), so each
        // pointer aliases a distinct element and no two references overlap.
        slots.iter().map(|&s| unsafe { &mut *ptr.add(s) }).collect()
    }
}
