//! harbor — surveillance demo for the skywatch simulator.
//!
//! Watches the mouth of a synthetic bay with one sensor of each type and
//! four kinds of traffic: an airliner transiting overhead, a patrol vessel
//! working the channel, an erratic speedboat, and a shore vehicle.  Runs
//! 10 minutes of simulated time at 1 s ticks and writes every detection to
//! `output/harbor/`.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use sw_core::{EntityId, Position, SensorId, SimConfig, destination};
use sw_entity::{Entity, EntityKind, EntityMeta};
use sw_motion::{Motion, MovementPattern, RouteEnd};
use sw_output::{CsvSink, DetectionSink, SinkObserver};
use sw_sensor::{Environment, Sensor, SensorKind};
use sw_sim::{SimBuilder, SimObserver, TickReport};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:               u64 = 42;
const TICK_DURATION_SECS: f64 = 1.0;
const TOTAL_TICKS:        u64 = 600; // 10 simulated minutes
const START_UNIX_SECS:    f64 = 1_700_000_000.0;

/// The harbor mouth, where all four sensor sites are co-located.
const HARBOR: Position = Position { lat_deg: 37.8100, lon_deg: -122.4100, alt_m: 0.0 };

// ── Observer wrapper to count detections per sensor family ───────────────────

struct CountingObserver<S: DetectionSink> {
    inner:        SinkObserver<S>,
    by_kind:      [usize; 4],
    false_alarms: usize,
    ticks:        usize,
}

impl<S: DetectionSink> CountingObserver<S> {
    fn new(inner: SinkObserver<S>) -> Self {
        Self { inner, by_kind: [0; 4], false_alarms: 0, ticks: 0 }
    }
}

fn kind_slot(kind: SensorKind) -> usize {
    match kind {
        SensorKind::Radar    => 0,
        SensorKind::Adsb     => 1,
        SensorKind::Camera   => 2,
        SensorKind::Acoustic => 3,
    }
}

impl<S: DetectionSink> SimObserver for CountingObserver<S> {
    fn on_tick_end(&mut self, report: &TickReport) {
        self.ticks += 1;
        for detection in &report.detections {
            if detection.is_false_alarm() {
                self.false_alarms += 1;
            } else {
                self.by_kind[kind_slot(detection.meta.sensor_kind)] += 1;
            }
        }
        self.inner.on_tick_end(report);
    }

    fn on_sim_end(&mut self, final_tick: sw_core::Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

/// A point `range_m` metres out from the harbor on `bearing_deg`, at `alt_m`.
fn offshore(bearing_deg: f64, range_m: f64, alt_m: f64) -> Result<Position> {
    let mut position = destination(&HARBOR, bearing_deg, range_m)?;
    position.alt_m = alt_m;
    Ok(position)
}

fn main() -> Result<()> {
    println!("=== harbor — skywatch surveillance demo ===");
    println!("Ticks: {TOTAL_TICKS} × {TICK_DURATION_SECS} s  |  Seed: {SEED}");
    println!();

    // 1. Sensor sites: one of each family at the harbor mouth.  The camera
    //    stares west across the channel; everything else is omnidirectional.
    let sensors = [
        Sensor::radar(SensorId(0), HARBOR),
        Sensor::adsb(SensorId(1), HARBOR),
        Sensor::camera(SensorId(2), HARBOR, 270.0),
        Sensor::acoustic(SensorId(3), HARBOR),
    ];

    // 2. Traffic.
    //    An airliner runs the length of the bay at altitude and squawks
    //    ADS-B the whole way; it passes overhead around the five-minute mark.
    let airliner = Entity::new(
        EntityId(1),
        EntityKind::Aircraft,
        offshore(180.0, 60_000.0, 9_000.0)?,
        Motion::new(0.0, 220.0),
        MovementPattern::waypoint(vec![offshore(0.0, 60_000.0, 9_000.0)?], RouteEnd::Hold),
    )
    .with_meta(EntityMeta { callsign: Some("SWA1182".into()), ..EntityMeta::default() });

    //    A patrol vessel works a two-leg beat across the channel.
    let patrol_boat = Entity::new(
        EntityId(2),
        EntityKind::Vessel,
        offshore(270.0, 2_000.0, 0.0)?,
        Motion::new(250.0, 8.0),
        MovementPattern::patrol(vec![
            offshore(270.0, 2_000.0, 0.0)?,
            offshore(250.0, 4_500.0, 0.0)?,
        ]),
    );

    //    A speedboat with no discernible plan, close inshore.
    let speedboat = Entity::new(
        EntityId(3),
        EntityKind::Vessel,
        offshore(280.0, 1_500.0, 0.0)?,
        Motion::new(135.0, 15.0),
        MovementPattern::evasive(15.0),
    );

    //    A delivery van wandering the shore roads east of the site.
    let van = Entity::new(
        EntityId(4),
        EntityKind::Vehicle,
        offshore(90.0, 1_000.0, 0.0)?,
        Motion::new(180.0, 12.0),
        MovementPattern::random(),
    );

    // 3. Build the sim: light haze, a little wind, daytime.
    let config = SimConfig {
        start_unix_secs:    START_UNIX_SECS,
        tick_duration_secs: TICK_DURATION_SECS,
        total_ticks:        TOTAL_TICKS,
        seed:               SEED,
    };
    let mut sim = SimBuilder::new(config)
        .sensors(sensors)
        .entities([airliner, patrol_boat, speedboat, van])
        .environment(Environment { visibility: 0.9, wind_factor: 1.1, night: false })
        .build()?;

    // 4. Output.
    std::fs::create_dir_all("output/harbor")?;
    let sink = CsvSink::new(Path::new("output/harbor"))?;
    let mut obs = CountingObserver::new(SinkObserver::new(sink));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), obs.ticks);
    println!("  radar        : {:>5} detections", obs.by_kind[0]);
    println!("  adsb         : {:>5} detections", obs.by_kind[1]);
    println!("  camera       : {:>5} detections", obs.by_kind[2]);
    println!("  acoustic     : {:>5} detections", obs.by_kind[3]);
    println!("  false alarms : {:>5}", obs.false_alarms);
    println!();

    println!("{:<10} {:<10} {:<12} {:<12}", "Entity", "Kind", "Confidence", "Last seen");
    println!("{}", "-".repeat(46));
    for entity in sim.world.iter() {
        let last_seen = match entity.last_detected {
            Some(t) => format!("t+{:.0}s", t - START_UNIX_SECS),
            None    => "never".to_string(),
        };
        println!(
            "{:<10} {:<10} {:<12.3} {:<12}",
            entity.id.0,
            entity.kind.as_str(),
            entity.confidence,
            last_seen,
        );
    }

    Ok(())
}
