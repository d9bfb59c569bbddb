//! Shared test fixtures for the decision-engine and combat test suites.
//! This module exists to avoid repeating map, occupancy and target setup across many tests.
//! It does not own production gameplay logic.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;

use crate::entity::{CreatureTemplate, Entity};
use crate::game::{ai, combat};
use crate::state::{ItemPile, Map, OccupancyIndex, Player};
use crate::types::*;
use crate::world::TickContext;

pub(crate) struct FixtureWorld {
    pub map: Map,
    pub entities: SlotMap<EntityId, Entity>,
    pub occupancy: OccupancyIndex,
    pub player: Player,
    pub items: ItemPile,
    pub log: Vec<LogEvent>,
    pub rng: ChaCha8Rng,
}

impl FixtureWorld {
    /// Walled room with the target actor standing at `target`.
    pub fn open(width: usize, height: usize, target: Pos) -> Self {
        Self {
            map: Map::new(width, height),
            entities: SlotMap::with_key(),
            occupancy: OccupancyIndex::default(),
            player: Player::new(target, 20),
            items: ItemPile::default(),
            log: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(12345),
        }
    }

    pub fn context(&mut self) -> TickContext<'_, ChaCha8Rng> {
        TickContext {
            map: &self.map,
            occupancy: &mut self.occupancy,
            target: &mut self.player,
            spawner: &mut self.items,
            console: &mut self.log,
            rng: &mut self.rng,
        }
    }

    pub fn spawn_with(&mut self, template: &CreatureTemplate, pos: Pos) -> EntityId {
        let entity = Entity::spawn(EntityId::default(), "creature", template, pos)
            .expect("fixture templates are valid");
        let id = self.entities.insert_with_key(|id| Entity { id, ..entity });
        self.occupancy.insert(id, pos);
        id
    }

    pub fn spawn_entity(&mut self, pos: Pos) -> EntityId {
        self.spawn_with(&CreatureTemplate { stumble_chance: 0.0, ..Default::default() }, pos)
    }

    /// Parks an inert blocker on `pos`.
    pub fn occupy(&mut self, pos: Pos) -> EntityId {
        let template = CreatureTemplate {
            stumble_chance: 0.0,
            movement: Movement::Stationary,
            ..Default::default()
        };
        self.spawn_with(&template, pos)
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id]
    }

    pub fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id]
    }

    pub fn update(&mut self, id: EntityId) -> bool {
        let (entity, mut ctx) = self.split(id);
        ai::update(entity, &mut ctx)
    }

    pub fn apply_damage(&mut self, id: EntityId, amount: u32) -> bool {
        let (entity, mut ctx) = self.split(id);
        combat::apply_damage(entity, amount, &mut ctx)
    }

    pub fn apply_typed_damage(&mut self, id: EntityId, kind: DamageKind, amount: u32) -> bool {
        let (entity, mut ctx) = self.split(id);
        combat::apply_typed_damage(entity, kind, amount, &mut ctx)
    }

    pub fn resolve_death(&mut self, id: EntityId) -> Option<ItemKind> {
        let (entity, mut ctx) = self.split(id);
        combat::resolve_death(entity, &mut ctx)
    }

    fn split(&mut self, id: EntityId) -> (&mut Entity, TickContext<'_, ChaCha8Rng>) {
        let entity = &mut self.entities[id];
        let ctx = TickContext {
            map: &self.map,
            occupancy: &mut self.occupancy,
            target: &mut self.player,
            spawner: &mut self.items,
            console: &mut self.log,
            rng: &mut self.rng,
        };
        (entity, ctx)
    }
}
