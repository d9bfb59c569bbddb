use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;
use thiserror::Error;

use crate::entity::{ConfigError, CreatureTemplate, Entity};
use crate::state::{GameState, ItemPile, Map, OccupancyIndex, Player};
use crate::types::*;
use crate::world::{Occupancy, TargetActor, TickContext, TileMap};

pub mod ai;
pub mod combat;
pub mod movement;
pub mod pathfinding;

mod advance;
mod arena;
mod hash;

pub use advance::TickReport;
pub use arena::{ARENA_HEIGHT, ARENA_WIDTH};

pub const PLAYER_MAX_LIFE: u32 = 20;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no entity with id {0:?}")]
    UnknownEntity(EntityId),
    #[error("{0:?} is not a free interior floor tile")]
    InvalidDestination(Pos),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct Game {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    state: GameState,
    log: Vec<LogEvent>,
}

impl Game {
    pub fn new(seed: u64, map: Map, player_pos: Pos) -> Self {
        Self {
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: GameState {
                map,
                entities: SlotMap::with_key(),
                occupancy: OccupancyIndex::default(),
                player: Player::new(player_pos, PLAYER_MAX_LIFE),
                items: ItemPile::default(),
            },
            log: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.state.entities.get(id)
    }

    /// Mutable access for scripted setups (tests, tools). Moving an entity
    /// through this bypasses the occupancy index.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.state.entities.get_mut(id)
    }

    pub fn live_entity_ids(&self) -> Vec<EntityId> {
        self.state.entities.iter().filter(|(_, e)| e.is_alive()).map(|(id, _)| id).collect()
    }

    pub fn spawn_creature(
        &mut self,
        name: &str,
        template: &CreatureTemplate,
        pos: Pos,
    ) -> Result<EntityId, GameError> {
        let entity = Entity::spawn(EntityId::default(), name, template, pos)?;
        if !self.is_free_tile(pos) {
            return Err(GameError::InvalidDestination(pos));
        }
        let id = self.state.entities.insert_with_key(|id| Entity { id, ..entity });
        self.state.occupancy.insert(id, pos);
        tracing::debug!(entity = ?id, name, x = pos.x, y = pos.y, "spawned");
        Ok(id)
    }

    pub fn move_player(&mut self, pos: Pos) -> Result<(), GameError> {
        if !self.is_free_tile(pos) {
            return Err(GameError::InvalidDestination(pos));
        }
        self.state.player.pos = pos;
        Ok(())
    }

    /// One decision for one entity. Returns whether it acted.
    pub fn update(&mut self, id: EntityId) -> Result<bool, GameError> {
        let (entity, mut ctx) = self.split(id)?;
        Ok(ai::update(entity, &mut ctx))
    }

    pub fn apply_damage(&mut self, id: EntityId, amount: u32) -> Result<bool, GameError> {
        self.apply_typed_damage(id, DamageKind::Physical, amount)
    }

    pub fn apply_typed_damage(
        &mut self,
        id: EntityId,
        kind: DamageKind,
        amount: u32,
    ) -> Result<bool, GameError> {
        let (entity, mut ctx) = self.split(id)?;
        let died = combat::apply_typed_damage(entity, kind, amount, &mut ctx);
        if died {
            self.vacate_corpse(id);
        }
        Ok(died)
    }

    pub fn resolve_death(&mut self, id: EntityId) -> Result<Option<ItemKind>, GameError> {
        let (entity, mut ctx) = self.split(id)?;
        let item = combat::resolve_death(entity, &mut ctx);
        self.vacate_corpse(id);
        Ok(item)
    }

    fn is_free_tile(&self, pos: Pos) -> bool {
        self.state.map.is_interior(pos)
            && self.state.map.is_passable(pos)
            && self.state.occupancy.occupant(pos).is_none()
            && self.state.player.pos() != pos
    }

    fn vacate_corpse(&mut self, id: EntityId) {
        if let Some(entity) = self.state.entities.get(id) {
            self.state.occupancy.vacate(id, entity.pos);
        }
    }

    fn split(&mut self, id: EntityId) -> Result<(&mut Entity, TickContext<'_, ChaCha8Rng>), GameError> {
        let GameState { map, entities, occupancy, player, items } = &mut self.state;
        let entity = entities.get_mut(id).ok_or(GameError::UnknownEntity(id))?;
        let ctx = TickContext {
            map: &*map,
            occupancy,
            target: player,
            spawner: items,
            console: &mut self.log,
            rng: &mut self.rng,
        };
        Ok((entity, ctx))
    }
}
