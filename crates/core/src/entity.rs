//! Non-player entity records and the per-kind template they are spawned from.

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de;

use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vitals {
    pub life: u32,
    pub max_life: u32,
}

impl Vitals {
    pub fn new(max_life: u32) -> Self {
        Self { life: max_life, max_life }
    }

    pub fn is_damaged(&self) -> bool {
        self.life < self.max_life
    }

    /// Subtracts `amount` with a floor of zero. Returns true only on the hit
    /// that takes life from positive to zero.
    pub fn apply(&mut self, amount: u32) -> bool {
        if self.life == 0 {
            return false;
        }
        self.life = self.life.saturating_sub(amount);
        self.life == 0
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("creature `{name}`: max_life must be at least 1")]
    ZeroMaxLife { name: String },
    #[error("creature `{name}`: stumble_chance {value} is outside [0, 1]")]
    StumbleChanceOutOfRange { name: String, value: String },
    #[error("creature `{name}`: drop table is empty")]
    EmptyDropTable { name: String },
    #[error("creature `{name}`: drop table weights sum to zero")]
    ZeroDropWeight { name: String },
    #[error("unknown creature kind `{0}`")]
    UnknownCreature(String),
    #[error("failed to parse content")]
    Parse(#[from] de::Error),
    #[error("failed to read content file {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Shared stats for one creature kind. Missing fields fall back to the
/// defaults below, so a content file only lists what differs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreatureTemplate {
    pub max_life: u32,
    pub damage: u32,
    pub fov_radius: u32,
    pub stumble_chance: f64,
    pub movement: Movement,
    pub aggression: Aggression,
    pub immunities: Immunities,
    pub drops: BTreeMap<String, u32>,
}

impl Default for CreatureTemplate {
    fn default() -> Self {
        Self {
            max_life: 1,
            damage: 1,
            fov_radius: 3,
            stumble_chance: 0.25,
            movement: Movement::Towards,
            aggression: Aggression::Always,
            immunities: Immunities::default(),
            drops: default_drops(),
        }
    }
}

pub fn default_drops() -> BTreeMap<String, u32> {
    [("nothing", 50), ("gold", 30), ("threeGold", 10), ("bomb", 10)]
        .into_iter()
        .map(|(key, weight)| (key.to_string(), weight))
        .collect()
}

impl CreatureTemplate {
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.max_life == 0 {
            return Err(ConfigError::ZeroMaxLife { name: name.to_string() });
        }
        if !(0.0..=1.0).contains(&self.stumble_chance) {
            return Err(ConfigError::StumbleChanceOutOfRange {
                name: name.to_string(),
                value: self.stumble_chance.to_string(),
            });
        }
        if self.drops.is_empty() {
            return Err(ConfigError::EmptyDropTable { name: name.to_string() });
        }
        if self.drops.values().all(|&weight| weight == 0) {
            return Err(ConfigError::ZeroDropWeight { name: name.to_string() });
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub pos: Pos,
    pub vitals: Vitals,
    pub damage: u32,
    pub fov_radius: u32,
    pub stumble_chance: f64,
    pub movement: Movement,
    pub aggression: Aggression,
    pub immunities: Immunities,
    pub drops: BTreeMap<String, u32>,
    pub dead: bool,
    /// Set once, when death rolled an item.
    pub loot: Option<ItemKind>,
}

impl Entity {
    /// Builds a live entity at full life. Templates that fail [`CreatureTemplate::validate`]
    /// are rejected so every spawned entity can die.
    pub fn spawn(
        id: EntityId,
        name: &str,
        template: &CreatureTemplate,
        pos: Pos,
    ) -> Result<Self, ConfigError> {
        template.validate(name)?;
        Ok(Self {
            id,
            name: name.to_string(),
            pos,
            vitals: Vitals::new(template.max_life),
            damage: template.damage,
            fov_radius: template.fov_radius,
            stumble_chance: template.stumble_chance,
            movement: template.movement,
            aggression: template.aggression,
            immunities: template.immunities,
            drops: template.drops.clone(),
            dead: false,
            loot: None,
        })
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn may_attack(&self) -> bool {
        self.aggression.permits_attack(self.vitals.life, self.vitals.max_life)
    }
}
