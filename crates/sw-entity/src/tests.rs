//! Unit tests for entity records and the world store.

use sw_core::{EntityId, Position};
use sw_motion::{Motion, MovementPattern};

use crate::{Entity, EntityKind, EntityMeta, EntityRngs, World, WorldError};

fn entity(id: u32) -> Entity {
    Entity::new(
        EntityId(id),
        EntityKind::Aircraft,
        Position { lat_deg: 37.0, lon_deg: -122.0, alt_m: 5_000.0 },
        Motion::new(90.0, 100.0),
        MovementPattern::random(),
    )
}

#[cfg(test)]
mod world {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut world = World::new();
        world.insert(entity(1)).unwrap();
        world.insert(entity(2)).unwrap();
        assert_eq!(world.len(), 2);
        assert!(world.contains(EntityId(1)));

        let removed = world.remove(EntityId(1)).unwrap();
        assert_eq!(removed.id, EntityId(1));
        assert!(!world.contains(EntityId(1)));
        assert_eq!(world.len(), 1);
        assert!(world.remove(EntityId(1)).is_none());
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut world = World::new();
        world.insert(entity(5)).unwrap();
        assert!(matches!(
            world.insert(entity(5)),
            Err(WorldError::DuplicateEntity(EntityId(5)))
        ));
    }

    #[test]
    fn invalid_sentinel_rejected() {
        let mut world = World::new();
        assert!(matches!(
            world.insert(entity(u32::MAX)),
            Err(WorldError::ReservedId)
        ));
    }

    #[test]
    fn swap_remove_keeps_index_consistent() {
        let mut world = World::new();
        for id in 0..5 {
            world.insert(entity(id)).unwrap();
        }
        world.remove(EntityId(0)).unwrap();
        // The former tail (id 4) took slot 0; every survivor must still resolve.
        for id in 1..5 {
            assert_eq!(world.get(EntityId(id)).unwrap().id, EntityId(id));
        }
    }

    #[test]
    fn get_mut_mutates_in_place() {
        let mut world = World::new();
        world.insert(entity(3)).unwrap();
        world.get_mut(EntityId(3)).unwrap().confidence = 0.4;
        assert_eq!(world.get(EntityId(3)).unwrap().confidence, 0.4);
    }
}

#[cfg(test)]
mod detection_state {
    use super::*;

    #[test]
    fn confidence_is_monotone_max() {
        let mut e = entity(1);
        e.record_detection(100.0, 0.6);
        assert_eq!(e.confidence, 0.6);
        assert_eq!(e.last_detected, Some(100.0));

        // A weaker detection later updates the timestamp, not the confidence.
        e.record_detection(101.0, 0.3);
        assert_eq!(e.confidence, 0.6);
        assert_eq!(e.last_detected, Some(101.0));

        e.record_detection(102.0, 0.9);
        assert_eq!(e.confidence, 0.9);
    }

    #[test]
    fn confidence_clamped_to_unit_interval() {
        let mut e = entity(1);
        e.record_detection(0.0, 7.5);
        assert_eq!(e.confidence, 1.0);
    }

    #[test]
    fn meta_defaults_are_all_none() {
        let meta = EntityMeta::default();
        assert!(meta.rcs_m2.is_none());
        assert!(meta.callsign.is_none());
        assert!(meta.transponder.is_none());
        assert!(meta.emits_light.is_none());
    }
}

#[cfg(test)]
mod rngs {
    use super::*;

    #[test]
    fn streams_are_lazy_and_per_entity() {
        let mut rngs = EntityRngs::new(42);
        let a: f64 = rngs.get_mut(EntityId(0)).random();
        let b: f64 = rngs.get_mut(EntityId(1)).random();
        assert_ne!(a, b);
    }

    #[test]
    fn reinserted_id_restarts_its_stream() {
        let mut rngs = EntityRngs::new(42);
        let first: u64 = rngs.get_mut(EntityId(9)).random();
        rngs.remove(EntityId(9));
        let again: u64 = rngs.get_mut(EntityId(9)).random();
        assert_eq!(first, again);
    }
}
