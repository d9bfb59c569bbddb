//! Collaborator seams the decision engine talks through.
//! This module exists so AI and combat read the world via an explicit context instead of global state.
//! It does not own any storage; `state` provides the reference implementations.

use crate::types::{EntityId, ItemKind, LogEvent, Pos};

pub trait TileMap {
    fn is_passable(&self, pos: Pos) -> bool;

    /// `(width, height)` of the room including its border ring.
    fn room_size(&self) -> (i32, i32);

    /// Border tiles and anything outside the room are never destinations.
    fn is_interior(&self, pos: Pos) -> bool {
        let (width, height) = self.room_size();
        pos.x > 0 && pos.y > 0 && pos.x < width - 1 && pos.y < height - 1
    }
}

pub trait Occupancy {
    fn occupant(&self, pos: Pos) -> Option<EntityId>;

    /// Records that `id` moved from `from` to `to`.
    fn relocate(&mut self, id: EntityId, from: Pos, to: Pos);
}

/// The actor non-player entities hunt, flee and attack.
pub trait TargetActor {
    fn pos(&self) -> Pos;

    /// Same contract as entities: clamps at zero, dies once.
    fn take_damage(&mut self, amount: u32);
}

pub trait ItemSpawner {
    fn spawn(&mut self, kind: ItemKind, pos: Pos);
}

/// Best-effort notification sink.
pub trait Console {
    fn log(&mut self, event: LogEvent);
}

impl Console for Vec<LogEvent> {
    fn log(&mut self, event: LogEvent) {
        self.push(event);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullConsole;

impl Console for NullConsole {
    fn log(&mut self, _event: LogEvent) {}
}

/// Everything a single decision may read or touch, passed in explicitly per call.
pub struct TickContext<'a, R: ?Sized> {
    pub map: &'a dyn TileMap,
    pub occupancy: &'a mut dyn Occupancy,
    pub target: &'a mut dyn TargetActor,
    pub spawner: &'a mut dyn ItemSpawner,
    pub console: &'a mut dyn Console,
    pub rng: &'a mut R,
}
