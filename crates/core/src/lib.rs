pub mod content;
pub mod entity;
pub mod game;
pub mod random;
pub mod state;
pub mod types;
pub mod world;

#[cfg(test)]
mod test_support;

pub use content::ContentPack;
pub use entity::{ConfigError, CreatureTemplate, Entity, Vitals};
pub use game::ai::update;
pub use game::combat::{apply_damage, apply_typed_damage, resolve_death};
pub use game::{Game, GameError, TickReport};
pub use state::{GameState, Map};
pub use types::*;
pub use world::{Console, ItemSpawner, NullConsole, Occupancy, TargetActor, TickContext, TileMap};
