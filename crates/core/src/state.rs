use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::entity::{Entity, Vitals};
use crate::types::*;
use crate::world::{ItemSpawner, Occupancy, TargetActor, TileMap};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    pub internal_width: usize,
    pub internal_height: usize,
    pub tiles: Vec<TileKind>,
}

impl Map {
    /// Open floor surrounded by a one-tile wall ring.
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be non-zero, got {width}x{height}");
        let mut tiles = vec![TileKind::Floor; width * height];
        for x in 0..width {
            tiles[x] = TileKind::Wall;
            tiles[(height - 1) * width + x] = TileKind::Wall;
        }
        for y in 0..height {
            tiles[y * width] = TileKind::Wall;
            tiles[y * width + (width - 1)] = TileKind::Wall;
        }
        Self { internal_width: width, internal_height: height, tiles }
    }

    /// Walled room with a rubble pillar on every fourth interior tile in both axes.
    /// Panics like [`Map::new`] on a zero dimension.
    pub fn pillared(width: usize, height: usize) -> Self {
        let mut map = Self::new(width, height);
        for y in (4..height.saturating_sub(1)).step_by(4) {
            for x in (4..width.saturating_sub(1)).step_by(4) {
                map.set_tile(Pos::new(x as i32, y as i32), TileKind::Rubble);
            }
        }
        map
    }

    /// `#` wall, `%` rubble, anything else floor. Rows must share a width.
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.chars().count();
        if width == 0 || rows.iter().any(|row| row.chars().count() != width) {
            return None;
        }
        let tiles = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                '#' => TileKind::Wall,
                '%' => TileKind::Rubble,
                _ => TileKind::Floor,
            })
            .collect();
        Some(Self { internal_width: width, internal_height: height, tiles })
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.internal_width
            && (pos.y as usize) < self.internal_height
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.internal_width + (pos.x as usize)
    }
}

impl TileMap for Map {
    fn is_passable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_passable()
    }

    fn room_size(&self) -> (i32, i32) {
        (self.internal_width as i32, self.internal_height as i32)
    }
}

/// Which live entity stands where.
#[derive(Clone, Debug, Default)]
pub struct OccupancyIndex {
    by_pos: BTreeMap<Pos, EntityId>,
}

impl OccupancyIndex {
    pub fn insert(&mut self, id: EntityId, pos: Pos) {
        self.by_pos.insert(pos, id);
    }

    /// Drops `pos` only while it still belongs to `id`.
    pub fn vacate(&mut self, id: EntityId, pos: Pos) {
        if self.by_pos.get(&pos) == Some(&id) {
            self.by_pos.remove(&pos);
        }
    }

    pub fn len(&self) -> usize {
        self.by_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pos.is_empty()
    }
}

impl Occupancy for OccupancyIndex {
    fn occupant(&self, pos: Pos) -> Option<EntityId> {
        self.by_pos.get(&pos).copied()
    }

    fn relocate(&mut self, id: EntityId, from: Pos, to: Pos) {
        self.vacate(id, from);
        self.by_pos.insert(to, id);
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Pos,
    pub vitals: Vitals,
    pub dead: bool,
    pub damage_taken: u32,
}

impl Player {
    pub fn new(pos: Pos, max_life: u32) -> Self {
        Self { pos, vitals: Vitals::new(max_life), dead: false, damage_taken: 0 }
    }
}

impl TargetActor for Player {
    fn pos(&self) -> Pos {
        self.pos
    }

    fn take_damage(&mut self, amount: u32) {
        if self.dead {
            return;
        }
        self.damage_taken += amount;
        if self.vitals.apply(amount) {
            self.dead = true;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, Default)]
pub struct ItemPile {
    pub items: SlotMap<ItemId, Item>,
}

impl ItemSpawner for ItemPile {
    fn spawn(&mut self, kind: ItemKind, pos: Pos) {
        let id = self.items.insert(Item { id: ItemId::default(), kind, pos });
        self.items[id].id = id;
    }
}

pub struct GameState {
    pub map: Map,
    pub entities: SlotMap<EntityId, Entity>,
    pub occupancy: OccupancyIndex,
    pub player: Player,
    pub items: ItemPile,
}
