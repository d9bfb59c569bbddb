use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
    pub struct ItemId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    /// `(dx, dy)` with y growing downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    Rubble,
}

impl TileKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TileKind::Floor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Random,
    Stationary,
    #[serde(alias = "toward")]
    Towards,
    Away,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggression {
    Always,
    /// Attacks only once it has been hurt.
    Provoked,
}

impl Aggression {
    pub fn permits_attack(self, life: u32, max_life: u32) -> bool {
        match self {
            Aggression::Always => true,
            Aggression::Provoked => life < max_life,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Gold,
    ThreeGold,
    Bomb,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Gold, ItemKind::ThreeGold, ItemKind::Bomb];

    /// Maps a drop-table outcome to a spawnable item. Outcomes such as
    /// `"nothing"` are not items and yield `None`.
    pub fn from_loot_key(key: &str) -> Option<Self> {
        match key {
            "gold" => Some(ItemKind::Gold),
            "threeGold" => Some(ItemKind::ThreeGold),
            "bomb" => Some(ItemKind::Bomb),
            _ => None,
        }
    }

    pub fn loot_key(self) -> &'static str {
        match self {
            ItemKind::Gold => "gold",
            ItemKind::ThreeGold => "threeGold",
            ItemKind::Bomb => "bomb",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageKind {
    Physical,
    Fire,
    Acid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Immunities {
    pub fire: bool,
    pub acid: bool,
}

impl Immunities {
    pub fn blocks(self, kind: DamageKind) -> bool {
        match kind {
            DamageKind::Physical => false,
            DamageKind::Fire => self.fire,
            DamageKind::Acid => self.acid,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    Stumbled { entity: EntityId, name: String },
    Attacked { entity: EntityId, name: String, damage: u32 },
    Moved { entity: EntityId, from: Pos, to: Pos },
    Died { entity: EntityId, name: String },
    Dropped { entity: EntityId, item: ItemKind, pos: Pos },
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::Stumbled { name, .. } => write!(f, "The {name} stumbles"),
            LogEvent::Attacked { name, .. } => write!(f, "The {name} attacks you!"),
            LogEvent::Moved { from, to, .. } => {
                write!(f, "moved ({}, {}) -> ({}, {})", from.x, from.y, to.x, to.y)
            }
            LogEvent::Died { name, .. } => write!(f, "The {name} dies"),
            LogEvent::Dropped { item, pos, .. } => {
                write!(f, "A {} falls to the ground at ({}, {})", item.loot_key(), pos.x, pos.y)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    PlayerDefeated,
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}
