//! Integration tests for the tick loop.
//!
//! Most tests pin a detection probability to 1.0 (ADS-B with full coverage)
//! so step outcomes are exact; probabilistic paths are covered in the
//! sw-sensor unit tests.

use sw_core::{EntityId, Position, SensorId, SimConfig, Tick, destination};
use sw_entity::{Entity, EntityKind};
use sw_motion::{Motion, MovementPattern, RouteEnd};
use sw_sensor::{Sensor, SensorParams};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, TickReport};

const SITE: Position = Position { lat_deg: 37.7749, lon_deg: -122.4194, alt_m: 0.0 };

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        start_unix_secs:    1_700_000_000.0,
        tick_duration_secs: 1.0,
        total_ticks,
        seed:               42,
    }
}

/// An ADS-B receiver that hears every broadcast — detection is certain for
/// any in-range aircraft, which makes step outcomes exact.
fn certain_adsb(id: u32) -> Sensor {
    let mut sensor = Sensor::adsb(SensorId(id), SITE);
    if let SensorParams::Adsb(p) = &mut sensor.params {
        p.transponder_coverage = 1.0;
    }
    sensor
}

/// An aircraft `range_m` metres from the site, holding position.
fn parked_aircraft(id: u32, range_m: f64) -> Entity {
    let mut position = destination(&SITE, 0.0, range_m).unwrap();
    position.alt_m = 8_000.0;
    Entity::new(
        EntityId(id),
        EntityKind::Aircraft,
        position,
        Motion::new(0.0, 0.0),
        MovementPattern::random(),
    )
}

/// Observer that clones every tick report.
#[derive(Default)]
struct Collect(Vec<TickReport>);

impl SimObserver for Collect {
    fn on_tick_end(&mut self, report: &TickReport) {
        self.0.push(report.clone());
    }
}

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(test_config(10)).build().unwrap();
        assert!(sim.world.is_empty());
        assert!(sim.sensors().is_empty());
        assert!(!sim.run_state.running);
    }

    #[test]
    fn zero_tick_duration_rejected() {
        let config = SimConfig { tick_duration_secs: 0.0, ..test_config(10) };
        assert!(matches!(
            SimBuilder::new(config).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn malformed_entity_position_rejected() {
        let mut entity = parked_aircraft(1, 10_000.0);
        entity.position.lat_deg = 95.0;
        assert!(matches!(
            SimBuilder::new(test_config(10)).entity(entity).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn zero_update_rate_rejected() {
        let mut sensor = certain_adsb(0);
        sensor.update_rate_hz = 0.0;
        assert!(matches!(
            SimBuilder::new(test_config(10)).sensor(sensor).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn out_of_band_false_alarm_rate_rejected() {
        let mut sensor = Sensor::radar(SensorId(0), SITE);
        if let SensorParams::Radar(p) = &mut sensor.params {
            p.false_alarm_rate = 1.5;
        }
        assert!(matches!(
            SimBuilder::new(test_config(10)).sensor(sensor).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn duplicate_sensor_rejected() {
        let result = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(3))
            .sensor(Sensor::radar(SensorId(3), SITE))
            .build();
        assert!(matches!(result, Err(SimError::DuplicateSensor(SensorId(3)))));
    }

    #[test]
    fn duplicate_entity_rejected() {
        let result = SimBuilder::new(test_config(10))
            .entity(parked_aircraft(7, 10_000.0))
            .entity(parked_aircraft(7, 20_000.0))
            .build();
        assert!(matches!(result, Err(SimError::World(_))));
    }
}

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn step_refuses_while_stopped() {
        let mut sim = SimBuilder::new(test_config(10)).build().unwrap();
        assert!(matches!(sim.step(1.0), Err(SimError::NotRunning)));
    }

    #[test]
    fn run_advances_to_end_tick_and_stops() {
        let mut sim = SimBuilder::new(test_config(10)).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(10));
        assert!(!sim.run_state.running);
    }

    #[test]
    fn run_ticks_advances_clock_incrementally() {
        let mut sim = SimBuilder::new(test_config(100)).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(8));
        assert!((sim.clock.elapsed_secs - 8.0).abs() < 1e-9);
    }

    #[test]
    fn speed_multiplier_scales_simulated_time() {
        let mut sim = SimBuilder::new(test_config(100)).build().unwrap();
        sim.run_state.speed = 2.0;
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        // 5 ticks × 1 s × 2.0 speed.
        assert!((sim.clock.elapsed_secs - 10.0).abs() < 1e-9);
    }

    #[test]
    fn observer_called_once_per_tick() {
        struct Counter {
            starts: usize,
            ends:   usize,
            finish: Option<Tick>,
        }
        impl SimObserver for Counter {
            fn on_tick_start(&mut self, _tick: Tick) {
                self.starts += 1;
            }
            fn on_tick_end(&mut self, _report: &TickReport) {
                self.ends += 1;
            }
            fn on_sim_end(&mut self, final_tick: Tick) {
                self.finish = Some(final_tick);
            }
        }

        let mut sim = SimBuilder::new(test_config(7)).build().unwrap();
        let mut obs = Counter { starts: 0, ends: 0, finish: None };
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 7);
        assert_eq!(obs.ends, 7);
        assert_eq!(obs.finish, Some(Tick(7)));
    }
}

#[cfg(test)]
mod step {
    use super::*;

    #[test]
    fn detection_uses_post_motion_position() {
        // Aircraft 10 km north flying due north at 100 m/s: after one 1 s
        // tick it sits at 10 100 m, and the detection must measure that.
        let far_north = Position { alt_m: 8_000.0, ..destination(&SITE, 0.0, 50_000.0).unwrap() };
        let mut aircraft = parked_aircraft(1, 10_000.0);
        aircraft.motion = Motion::new(0.0, 100.0);
        aircraft.pattern = MovementPattern::waypoint(vec![far_north], RouteEnd::Hold);

        let mut sim = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(0))
            .entity(aircraft)
            .build()
            .unwrap();
        sim.run_state.start();

        let report = sim.step(1.0).unwrap();
        assert_eq!(report.detections.len(), 1);
        let range = report.detections[0].meta.range_m.unwrap();
        assert!((range - 10_100.0).abs() < 1.0, "measured range {range} m");
    }

    #[test]
    fn one_detection_per_sensor_entity_pair() {
        let mut sim = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(0))
            .entity(parked_aircraft(1, 10_000.0))
            .build()
            .unwrap();
        sim.run_state.start();

        let report = sim.step(1.0).unwrap();
        assert_eq!(report.detections.len(), 1);
        assert_eq!(report.detections[0].entity_id, EntityId(1));
        assert_eq!(report.detections[0].sensor_id, SensorId(0));
        assert_eq!(report.updated, vec![EntityId(1)]);
    }

    #[test]
    fn detection_updates_entity_state() {
        let mut sim = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(0))
            .entity(parked_aircraft(1, 10_000.0))
            .build()
            .unwrap();
        sim.run_state.start();

        let report = sim.step(1.0).unwrap();
        let entity = sim.world.get(EntityId(1)).unwrap();
        assert_eq!(entity.last_detected, Some(report.unix_time_secs));
        assert_eq!(entity.confidence, report.detections[0].confidence);
    }

    #[test]
    fn confidence_never_decreases_across_ticks() {
        // The aircraft flies away, so each fresh detection is weaker than
        // the last; the stored confidence must hold at the best seen.
        let mut aircraft = parked_aircraft(1, 10_000.0);
        aircraft.motion = Motion::new(0.0, 200.0);
        let far_north = Position { alt_m: 8_000.0, ..destination(&SITE, 0.0, 150_000.0).unwrap() };
        aircraft.pattern = MovementPattern::waypoint(vec![far_north], RouteEnd::Hold);

        let mut sim = SimBuilder::new(test_config(100))
            .sensor(certain_adsb(0))
            .entity(aircraft)
            .build()
            .unwrap();
        sim.run_state.start();

        let mut previous = 0.0;
        for _ in 0..20 {
            sim.step(1.0).unwrap();
            let confidence = sim.world.get(EntityId(1)).unwrap().confidence;
            assert!(confidence >= previous, "confidence fell {previous} → {confidence}");
            previous = confidence;
        }
    }

    #[test]
    fn best_confidence_of_the_tick_wins() {
        // Two certain sensors see the same aircraft at different ranges;
        // the entity keeps the higher of the two confidences.
        let mut far_site = certain_adsb(1);
        far_site.position = destination(&SITE, 180.0, 150_000.0).unwrap();

        let mut sim = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(0))
            .sensor(far_site)
            .entity(parked_aircraft(1, 10_000.0))
            .build()
            .unwrap();
        sim.run_state.start();

        let report = sim.step(1.0).unwrap();
        assert_eq!(report.detections.len(), 2);
        let best = report
            .detections
            .iter()
            .map(|d| d.confidence)
            .fold(0.0, f64::max);
        assert_eq!(sim.world.get(EntityId(1)).unwrap().confidence, best);
        assert_eq!(report.updated, vec![EntityId(1)]);
    }

    #[test]
    fn false_alarms_carry_the_invalid_entity_id() {
        let mut radar = Sensor::radar(SensorId(0), SITE);
        if let SensorParams::Radar(p) = &mut radar.params {
            p.false_alarm_rate = 1.0;
        }
        let mut sim = SimBuilder::new(test_config(10)).sensor(radar).build().unwrap();
        sim.run_state.start();

        let report = sim.step(1.0).unwrap();
        assert_eq!(report.detections.len(), 1);
        assert_eq!(report.detections[0].entity_id, EntityId::INVALID);
        assert!(report.detections[0].is_false_alarm());
        // Clutter updates no entity.
        assert!(report.updated.is_empty());
    }

    #[test]
    fn malformed_entity_skips_without_aborting_the_tick() {
        let mut sim = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(0))
            .entity(parked_aircraft(1, 10_000.0))
            .build()
            .unwrap();

        // Slip a corrupt entity past startup validation, as a malformed
        // dynamic insert would.
        let mut broken = parked_aircraft(2, 10_000.0);
        broken.position.lat_deg = 95.0;
        broken.motion = Motion::new(0.0, 100.0);
        sim.add_entity(broken).unwrap();

        sim.run_state.start();
        let report = sim.step(1.0).unwrap();

        // The healthy aircraft is still detected.
        assert_eq!(report.detections.len(), 1);
        assert_eq!(report.detections[0].entity_id, EntityId(1));
        // The corrupt one is skipped twice: motion, then the sensor pair.
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped.iter().all(|s| s.entity_id == Some(EntityId(2))));
        assert!(report.skipped.iter().any(|s| s.sensor_id.is_none()));
        assert!(report.skipped.iter().any(|s| s.sensor_id == Some(SensorId(0))));
    }
}

#[cfg(test)]
mod schedule {
    use super::*;

    #[test]
    fn sensor_fires_on_its_own_cadence() {
        // 0.5 Hz sensor on a 1 s tick: scans on ticks 0 and 2 only.
        let mut sensor = certain_adsb(0);
        sensor.update_rate_hz = 0.5;
        let mut sim = SimBuilder::new(test_config(10))
            .sensor(sensor)
            .entity(parked_aircraft(1, 10_000.0))
            .build()
            .unwrap();
        sim.run_state.start();

        let counts: Vec<usize> = (0..4)
            .map(|_| sim.step(1.0).unwrap().detections.len())
            .collect();
        assert_eq!(counts, vec![1, 0, 1, 0]);
    }

    #[test]
    fn faster_than_tick_sensor_fires_every_tick() {
        // 5 Hz on a 1 s tick cannot scan five times per tick; it scans once
        // per tick without ever bursting to catch up.
        let mut sensor = certain_adsb(0);
        sensor.update_rate_hz = 5.0;
        let mut sim = SimBuilder::new(test_config(10))
            .sensor(sensor)
            .entity(parked_aircraft(1, 10_000.0))
            .build()
            .unwrap();
        sim.run_state.start();

        for _ in 0..4 {
            assert_eq!(sim.step(1.0).unwrap().detections.len(), 1);
        }
    }

    #[test]
    fn inactive_sensor_never_scans() {
        let mut sim = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(0))
            .entity(parked_aircraft(1, 10_000.0))
            .build()
            .unwrap();
        sim.sensor_mut(SensorId(0)).unwrap().active = false;
        sim.run_state.start();

        for _ in 0..3 {
            assert!(sim.step(1.0).unwrap().detections.is_empty());
        }

        // Re-enabling resumes scanning on the next tick.
        sim.sensor_mut(SensorId(0)).unwrap().active = true;
        assert_eq!(sim.step(1.0).unwrap().detections.len(), 1);
    }
}

#[cfg(test)]
mod roster {
    use super::*;

    #[test]
    fn add_sensor_mid_run_is_due_next_tick() {
        let mut sim = SimBuilder::new(test_config(10))
            .entity(parked_aircraft(1, 10_000.0))
            .build()
            .unwrap();
        sim.run_state.start();
        assert!(sim.step(1.0).unwrap().detections.is_empty());

        sim.add_sensor(certain_adsb(0)).unwrap();
        assert_eq!(sim.step(1.0).unwrap().detections.len(), 1);
    }

    #[test]
    fn duplicate_sensor_insert_rejected() {
        let mut sim = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(0))
            .build()
            .unwrap();
        assert!(matches!(
            sim.add_sensor(Sensor::radar(SensorId(0), SITE)),
            Err(SimError::DuplicateSensor(SensorId(0)))
        ));
    }

    #[test]
    fn remove_sensor_keeps_the_rest_addressable() {
        let mut sim = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(0))
            .sensor(certain_adsb(1))
            .sensor(certain_adsb(2))
            .build()
            .unwrap();

        let removed = sim.remove_sensor(SensorId(1)).unwrap();
        assert_eq!(removed.id, SensorId(1));
        assert!(sim.sensor(SensorId(1)).is_none());
        assert_eq!(sim.sensor(SensorId(0)).unwrap().id, SensorId(0));
        assert_eq!(sim.sensor(SensorId(2)).unwrap().id, SensorId(2));
        assert_eq!(sim.sensors().len(), 2);
    }

    #[test]
    fn remove_entity_clears_it_from_the_world() {
        let mut sim = SimBuilder::new(test_config(10))
            .sensor(certain_adsb(0))
            .entity(parked_aircraft(1, 10_000.0))
            .build()
            .unwrap();

        assert_eq!(sim.remove_entity(EntityId(1)).unwrap().id, EntityId(1));
        sim.run_state.start();
        assert!(sim.step(1.0).unwrap().detections.is_empty());
    }
}

#[cfg(test)]
mod determinism {
    use super::*;

    fn mixed_sim() -> crate::Sim {
        let mut patrol_route = vec![
            destination(&SITE, 90.0, 2_000.0).unwrap(),
            destination(&SITE, 90.0, 6_000.0).unwrap(),
        ];
        for p in &mut patrol_route {
            p.alt_m = 0.0;
        }

        let mut vehicle = Entity::new(
            EntityId(2),
            EntityKind::Vehicle,
            destination(&SITE, 90.0, 3_000.0).unwrap(),
            Motion::new(90.0, 20.0),
            MovementPattern::patrol(patrol_route),
        );
        vehicle.position.alt_m = 0.0;

        let mut evader = parked_aircraft(3, 5_000.0);
        evader.motion = Motion::new(45.0, 150.0);
        evader.pattern = MovementPattern::evasive(150.0);

        SimBuilder::new(test_config(100))
            .sensor(Sensor::radar(SensorId(0), SITE))
            .sensor(Sensor::camera(SensorId(1), SITE, 90.0))
            .sensor(Sensor::acoustic(SensorId(2), SITE))
            .entity(parked_aircraft(1, 10_000.0))
            .entity(vehicle)
            .entity(evader)
            .build()
            .unwrap()
    }

    #[test]
    fn same_seed_reproduces_every_report() {
        let run = || {
            let mut sim = mixed_sim();
            let mut reports = Collect::default();
            sim.run_ticks(10, &mut reports).unwrap();
            reports.0
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn confidences_stay_in_unit_range() {
        let mut sim = mixed_sim();
        let mut reports = Collect::default();
        sim.run_ticks(30, &mut reports).unwrap();

        for report in &reports.0 {
            for detection in &report.detections {
                assert!(
                    (0.0..=1.0).contains(&detection.confidence),
                    "confidence {} out of range",
                    detection.confidence
                );
            }
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod scenario {
    use super::*;
    use crate::ScenarioConfig;

    const SCENARIO_JSON: &str = r#"{
        "sim": {
            "start_unix_secs": 0.0,
            "tick_duration_secs": 1.0,
            "total_ticks": 5,
            "seed": 7
        },
        "environment": { "visibility": 0.9, "wind_factor": 1.2, "night": false },
        "entities": [{
            "id": 1,
            "kind": "aircraft",
            "position": { "lat_deg": 37.8, "lon_deg": -122.4194, "alt_m": 8000.0 },
            "motion": { "heading_deg": 90.0, "speed_ms": 200.0 },
            "pattern": { "random": { "max_turn_deg": 30.0 } }
        }],
        "sensors": [{
            "id": 0,
            "position": { "lat_deg": 37.7749, "lon_deg": -122.4194, "alt_m": 0.0 },
            "max_range_m": 200000.0,
            "update_rate_hz": 1.0,
            "params": { "adsb": { "transponder_coverage": 1.0 } }
        }]
    }"#;

    #[test]
    fn full_scenario_round_trip_runs() {
        let scenario: ScenarioConfig = serde_json::from_str(SCENARIO_JSON).unwrap();
        let mut sim = scenario.into_sim().unwrap();
        let mut reports = Collect::default();
        sim.run(&mut reports).unwrap();
        assert_eq!(reports.0.len(), 5);
        assert!(reports.0.iter().all(|r| r.detections.len() == 1));
    }

    #[test]
    fn empty_document_yields_defaults() {
        let scenario: ScenarioConfig = serde_json::from_str("{}").unwrap();
        assert!(scenario.entities.is_empty());
        assert!(scenario.sensors.is_empty());
        assert_eq!(scenario.sim.total_ticks, SimConfig::default().total_ticks);
        scenario.into_sim().unwrap();
    }

    #[test]
    fn unknown_sensor_type_fails_to_parse() {
        let json = r#"{
            "sensors": [{
                "id": 0,
                "position": { "lat_deg": 0.0, "lon_deg": 0.0, "alt_m": 0.0 },
                "max_range_m": 1000.0,
                "update_rate_hz": 1.0,
                "params": { "sonar": {} }
            }]
        }"#;
        let err = serde_json::from_str::<ScenarioConfig>(json).unwrap_err();
        assert!(err.to_string().contains("unknown variant"), "{err}");
    }

    #[test]
    fn unknown_movement_pattern_fails_to_parse() {
        let json = r#"{
            "entities": [{
                "id": 1,
                "kind": "vessel",
                "position": { "lat_deg": 0.0, "lon_deg": 0.0, "alt_m": 0.0 },
                "motion": { "heading_deg": 0.0, "speed_ms": 5.0 },
                "pattern": { "orbit": { "radius_m": 500.0 } }
            }]
        }"#;
        let err = serde_json::from_str::<ScenarioConfig>(json).unwrap_err();
        assert!(err.to_string().contains("unknown variant"), "{err}");
    }

    #[test]
    fn invalid_scenario_fails_at_build_not_parse() {
        // Parseable but semantically bad: zero update rate.
        let json = r#"{
            "sensors": [{
                "id": 0,
                "position": { "lat_deg": 0.0, "lon_deg": 0.0, "alt_m": 0.0 },
                "max_range_m": 1000.0,
                "update_rate_hz": 0.0,
                "params": { "radar": {} }
            }]
        }"#;
        let scenario: ScenarioConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(scenario.into_sim(), Err(SimError::Config(_))));
    }
}
