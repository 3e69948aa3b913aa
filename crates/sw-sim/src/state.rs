//! Driver-owned run state.

/// Simulation lifecycle and speed, owned by whatever drives the tick loop.
///
/// The lifecycle is a two-state machine — stopped ⇄ running — where "pause"
/// is simply stopped and resuming is re-entering running.  Keeping this in
/// an explicit value (rather than ambient flags inside the core) means the
/// driver decides when ticks happen and at what acceleration; the core only
/// refuses to step while stopped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunState {
    pub running: bool,
    /// Wall-clock acceleration: each driven tick advances
    /// `tick_duration_secs × speed` simulated seconds.
    pub speed: f64,
}

impl RunState {
    pub fn new() -> Self {
        Self { running: false, speed: 1.0 }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
