//! The entity store: `World` (records) and `EntityRngs` (per-entity RNG).
//!
//! # Why two structs?
//!
//! The motion phase needs `&mut Entity` (position/heading writes) and
//! `&mut StreamRng` (the entity's random stream) at the same time.  Keeping
//! the RNGs outside `World` lets the simulation loop hold both mutable
//! borrows without fighting the borrow checker:
//!
//! ```ignore
//! for entity in world.iter_mut() {
//!     let rng = rngs.get_mut(entity.id);
//!     entity.pattern.advance(&entity.position, &mut entity.motion, dt, rng)?;
//! }
//! ```

use std::collections::HashMap;

use sw_core::{EntityId, StreamRng};

use crate::{Entity, WorldError, WorldResult};

// ── World ─────────────────────────────────────────────────────────────────────

/// All live entities, indexed by id.
///
/// Backed by a `Vec` in insertion order (the iteration order the simulation
/// loop uses) plus an id → slot map for O(1) lookup.  Entities churn at
/// runtime — operators add and remove them mid-run — so this is a keyed
/// store rather than dense index-is-id storage.
#[derive(Default)]
pub struct World {
    entities: Vec<Entity>,
    slots:    HashMap<EntityId, usize>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity.  Ids must be unique for the lifetime of the store.
    pub fn insert(&mut self, entity: Entity) -> WorldResult<()> {
        if entity.id == EntityId::INVALID {
            // Reserved: false-alarm detections carry this id.
            return Err(WorldError::ReservedId);
        }
        if self.slots.contains_key(&entity.id) {
            return Err(WorldError::DuplicateEntity(entity.id));
        }
        self.slots.insert(entity.id, self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    /// Remove and return an entity.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.remove(&id)?;
        let entity = self.entities.swap_remove(slot);
        // swap_remove moved the former tail into `slot`; re-index it.
        if let Some(moved) = self.entities.get(slot) {
            self.slots.insert(moved.id, slot);
        }
        Some(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(&id).map(|&slot| &self.entities[slot])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.slots.get(&id)?;
        Some(&mut self.entities[slot])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }
}

// ── EntityRngs ────────────────────────────────────────────────────────────────

/// Per-entity deterministic RNG streams, separated from [`World`] to enable
/// simultaneous `&mut World` + `&mut EntityRngs` borrows in the motion phase.
///
/// Streams are created lazily: a given `EntityId` always seeds the same
/// stream from the global seed, so an entity removed and re-inserted with
/// the same id resumes an identical sequence from the start of that stream.
pub struct EntityRngs {
    global_seed: u64,
    streams:     HashMap<EntityId, StreamRng>,
}

impl EntityRngs {
    pub fn new(global_seed: u64) -> Self {
        Self { global_seed, streams: HashMap::new() }
    }

    /// Mutable reference to one entity's RNG, seeding it on first use.
    pub fn get_mut(&mut self, id: EntityId) -> &mut StreamRng {
        let seed = self.global_seed;
        self.streams
            .entry(id)
            .or_insert_with(|| StreamRng::for_entity(seed, id))
    }

    /// Drop the stream state for a removed entity.
    pub fn remove(&mut self, id: EntityId) {
        self.streams.remove(&id);
    }
}
