//! Headless arena setup for soak runs and integration tests.
//! This module exists so drivers can stand up a populated room from a content pack in one call.
//! It does not generate dungeons; the room is a fixed pillared rectangle.

use crate::content::ContentPack;
use crate::random::shuffle;

use super::*;

pub const ARENA_WIDTH: usize = 24;
pub const ARENA_HEIGHT: usize = 16;

impl Game {
    /// Pillared arena with the player in the middle and `per_kind` creatures of
    /// every kind in `pack`, placed on shuffled free tiles in name order.
    pub fn arena(seed: u64, pack: &ContentPack, per_kind: usize) -> Result<Self, GameError> {
        pack.validate()?;
        let player_pos = Pos::new(ARENA_WIDTH as i32 / 2 + 1, ARENA_HEIGHT as i32 / 2 + 1);
        let mut game = Self::new(seed, Map::pillared(ARENA_WIDTH, ARENA_HEIGHT), player_pos);

        let mut free = game.free_tiles();
        shuffle(&mut game.rng, &mut free);
        let mut slots = free.into_iter();
        for (name, template) in &pack.creatures {
            for _ in 0..per_kind {
                let Some(pos) = slots.next() else {
                    tracing::warn!(name = %name, "arena is full");
                    return Ok(game);
                };
                game.spawn_creature(name, template, pos)?;
            }
        }
        Ok(game)
    }

    /// Interior floor tiles with nobody on them, row-major.
    pub fn free_tiles(&self) -> Vec<Pos> {
        let (width, height) = self.state.map.room_size();
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Pos::new(x, y)))
            .filter(|&pos| self.is_free_tile(pos))
            .collect()
    }

    /// The player hits the first live entity next to them, if any.
    /// Returns the struck entity and whether the blow killed it.
    pub fn player_strike(
        &mut self,
        kind: DamageKind,
        amount: u32,
    ) -> Result<Option<(EntityId, bool)>, GameError> {
        if self.state.player.dead {
            return Ok(None);
        }
        let player_pos = self.state.player.pos;
        let victim = Direction::ALL
            .iter()
            .filter_map(|&dir| self.state.occupancy.occupant(player_pos.step(dir)))
            .find(|&id| self.state.entities.get(id).is_some_and(Entity::is_alive));
        let Some(id) = victim else {
            return Ok(None);
        };
        let killed = self.apply_typed_damage(id, kind, amount)?;
        Ok(Some((id, killed)))
    }
}
