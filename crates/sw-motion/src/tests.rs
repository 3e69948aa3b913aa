//! Unit tests for the motion model.

use sw_core::{EntityId, Position, StreamRng, distance_m};

use crate::{Motion, MovementPattern, RouteEnd};

fn rng() -> StreamRng {
    StreamRng::for_entity(42, EntityId(0))
}

fn pos(lat: f64, lon: f64, alt: f64) -> Position {
    Position { lat_deg: lat, lon_deg: lon, alt_m: alt }
}

#[cfg(test)]
mod waypoint {
    use super::*;

    #[test]
    fn closes_on_target_and_recomputes_heading() {
        // Target ~1.1 km due north.
        let start = pos(37.0, -122.0, 0.0);
        let target = pos(37.01, -122.0, 0.0);
        let mut pattern = MovementPattern::waypoint(vec![target], RouteEnd::Hold);
        let mut motion = Motion::new(90.0, 50.0);

        let mut rng = rng();
        let next = pattern.advance(&start, &mut motion, 1.0, &mut rng).unwrap();

        let before = distance_m(&start, &target).unwrap();
        let after = distance_m(&next, &target).unwrap();
        assert!((before - after - 50.0).abs() < 0.5, "moved {}", before - after);
        assert!(motion.heading_deg < 1.0 || motion.heading_deg > 359.0, "heading {}", motion.heading_deg);
    }

    #[test]
    fn arrival_lands_exactly_on_waypoint() {
        let start = pos(37.0, -122.0, 0.0);
        // ~55 m north — one 100 m/s second overshoots, so the step must clamp.
        let target = pos(37.0005, -122.0, 0.0);
        let mut pattern = MovementPattern::waypoint(vec![target], RouteEnd::Hold);
        let mut motion = Motion::new(0.0, 100.0);

        let next = pattern.advance(&start, &mut motion, 1.0, &mut rng()).unwrap();
        assert_eq!(next.lat_deg, target.lat_deg);
        assert_eq!(next.lon_deg, target.lon_deg);
    }

    #[test]
    fn hold_stops_at_final_waypoint() {
        let start = pos(37.0, -122.0, 0.0);
        let target = pos(37.0005, -122.0, 0.0);
        let mut pattern = MovementPattern::waypoint(vec![target], RouteEnd::Hold);
        let mut motion = Motion::new(0.0, 100.0);
        let mut rng = rng();

        let at_target = pattern.advance(&start, &mut motion, 1.0, &mut rng).unwrap();
        assert_eq!(motion.speed_ms, 0.0);

        let still = pattern.advance(&at_target, &mut motion, 1.0, &mut rng).unwrap();
        assert_eq!(still, at_target);
    }

    #[test]
    fn wrap_returns_to_first_waypoint() {
        let a = pos(37.0, -122.0, 0.0);
        let b = pos(37.0005, -122.0, 0.0);
        let mut pattern = MovementPattern::waypoint(vec![a, b], RouteEnd::Wrap);
        // Start on a heading to b; huge speed arrives every tick.
        let mut motion = Motion::new(0.0, 500.0);
        let mut rng = rng();

        // Sitting at a: first tick arrives at a (distance 0), index moves to b.
        let p1 = pattern.advance(&a, &mut motion, 1.0, &mut rng).unwrap();
        assert_eq!((p1.lat_deg, p1.lon_deg), (a.lat_deg, a.lon_deg));
        let p2 = pattern.advance(&p1, &mut motion, 1.0, &mut rng).unwrap();
        assert_eq!((p2.lat_deg, p2.lon_deg), (b.lat_deg, b.lon_deg));
        // Route wrapped: next target is a again.
        let p3 = pattern.advance(&p2, &mut motion, 1.0, &mut rng).unwrap();
        assert_eq!((p3.lat_deg, p3.lon_deg), (a.lat_deg, a.lon_deg));
    }

    #[test]
    fn altitude_converges_at_climb_rate() {
        let start = pos(37.0, -122.0, 0.0);
        let target = pos(37.1, -122.0, 1000.0);
        let mut pattern = MovementPattern::waypoint(vec![target], RouteEnd::Hold);
        let mut motion = Motion::new(0.0, 100.0);

        let next = pattern.advance(&start, &mut motion, 1.0, &mut rng()).unwrap();
        assert_eq!(next.alt_m, 10.0); // 10 m/s climb limit
    }

    #[test]
    fn empty_route_holds_position() {
        let start = pos(37.0, -122.0, 0.0);
        let mut pattern = MovementPattern::waypoint(vec![], RouteEnd::Wrap);
        let mut motion = Motion::new(45.0, 100.0);

        let next = pattern.advance(&start, &mut motion, 1.0, &mut rng()).unwrap();
        assert_eq!(next, start);
    }
}

#[cfg(test)]
mod patrol {
    use super::*;

    #[test]
    fn ping_pongs_between_endpoints() {
        let a = pos(37.0, -122.0, 0.0);
        let b = pos(37.0005, -122.0, 0.0);
        let mut pattern = MovementPattern::patrol(vec![a, b]);
        let mut motion = Motion::new(0.0, 500.0);
        let mut rng = rng();

        // a (arrive, → b), b (arrive, reverse → a), a (arrive, → b again)
        let mut here = a;
        let mut visited = Vec::new();
        for _ in 0..4 {
            here = pattern.advance(&here, &mut motion, 1.0, &mut rng).unwrap();
            visited.push((here.lat_deg, here.lon_deg));
        }
        assert_eq!(
            visited,
            vec![
                (a.lat_deg, a.lon_deg),
                (b.lat_deg, b.lon_deg),
                (a.lat_deg, a.lon_deg),
                (b.lat_deg, b.lon_deg),
            ]
        );
        // Never wrapped to an out-of-route index, and speed was preserved.
        assert_eq!(motion.speed_ms, 500.0);
    }
}

#[cfg(test)]
mod random_walk {
    use super::*;

    #[test]
    fn zero_speed_keeps_position_but_churns_heading() {
        let start = pos(37.0, -122.0, 500.0);
        let mut pattern = MovementPattern::random();
        let mut motion = Motion::new(10.0, 0.0);
        let mut rng = rng();

        let mut heading_changed = false;
        let mut here = start;
        for _ in 0..20 {
            let before = motion.heading_deg;
            here = pattern.advance(&here, &mut motion, 1.0, &mut rng).unwrap();
            assert_eq!(here, start);
            heading_changed |= motion.heading_deg != before;
        }
        assert!(heading_changed, "heading never updated over 20 ticks");
    }

    #[test]
    fn turn_is_bounded() {
        let start = pos(37.0, -122.0, 0.0);
        let mut pattern = MovementPattern::Random { max_turn_deg: 5.0 };
        let mut motion = Motion::new(180.0, 30.0);
        let mut rng = rng();

        for _ in 0..100 {
            let before = motion.heading_deg;
            pattern.advance(&start, &mut motion, 1.0, &mut rng).unwrap();
            let mut delta = (motion.heading_deg - before).abs();
            if delta > 180.0 {
                delta = 360.0 - delta;
            }
            assert!(delta <= 5.0 + 1e-9, "turned {delta}°");
        }
    }

    #[test]
    fn moves_at_constant_speed() {
        let start = pos(37.0, -122.0, 0.0);
        let mut pattern = MovementPattern::random();
        let mut motion = Motion::new(0.0, 30.0);

        let next = pattern.advance(&start, &mut motion, 1.0, &mut rng()).unwrap();
        let moved = distance_m(&start, &next).unwrap();
        assert!((moved - 30.0).abs() < 0.1, "moved {moved}");
        assert_eq!(motion.speed_ms, 30.0);
    }
}

#[cfg(test)]
mod evasive {
    use super::*;

    #[test]
    fn speed_stays_inside_band() {
        let start = pos(37.0, -122.0, 2000.0);
        let mut pattern = MovementPattern::Evasive {
            max_turn_deg:  90.0,
            speed_band:    0.3,
            base_speed_ms: 100.0,
        };
        let mut motion = Motion::new(0.0, 100.0);
        let mut rng = rng();

        let mut here = start;
        for _ in 0..100 {
            here = pattern.advance(&here, &mut motion, 0.1, &mut rng).unwrap();
            assert!((70.0..=130.0).contains(&motion.speed_ms), "speed {}", motion.speed_ms);
        }
    }

    #[test]
    fn zero_base_speed_never_moves() {
        let start = pos(37.0, -122.0, 2000.0);
        let mut pattern = MovementPattern::evasive(0.0);
        let mut motion = Motion::new(0.0, 0.0);
        let mut rng = rng();

        for _ in 0..10 {
            let next = pattern.advance(&start, &mut motion, 1.0, &mut rng).unwrap();
            assert_eq!(next, start);
            assert_eq!(motion.speed_ms, 0.0);
        }
    }
}

#[cfg(test)]
mod determinism {
    use super::*;

    #[test]
    fn same_seed_same_trajectory() {
        let start = pos(37.0, -122.0, 0.0);

        let run = || {
            let mut pattern = MovementPattern::evasive(80.0);
            let mut motion = Motion::new(45.0, 80.0);
            let mut rng = StreamRng::for_entity(7, EntityId(3));
            let mut here = start;
            for _ in 0..50 {
                here = pattern.advance(&here, &mut motion, 0.1, &mut rng).unwrap();
            }
            (here, motion)
        };

        assert_eq!(run(), run());
    }
}
