//! Creature kinds and how they are loaded.
//! This module exists so stat blocks are validated once, at load time, before any tick runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::{ConfigError, CreatureTemplate};
use crate::types::{Aggression, Immunities, Movement};

pub mod keys {
    pub const RAT: &str = "rat";
    pub const GOBLIN: &str = "goblin";
    pub const KOBOLD: &str = "kobold";
    pub const TURRET: &str = "turret";
    pub const ZOMBIE: &str = "zombie";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPack {
    #[serde(default)]
    pub creatures: BTreeMap<String, CreatureTemplate>,
}

impl ContentPack {
    pub fn builtin() -> Self {
        let base = CreatureTemplate::default();
        let creatures = [
            (
                keys::RAT,
                CreatureTemplate {
                    max_life: 2,
                    stumble_chance: 0.1,
                    movement: Movement::Random,
                    aggression: Aggression::Provoked,
                    ..base.clone()
                },
            ),
            (keys::GOBLIN, CreatureTemplate { max_life: 5, damage: 2, fov_radius: 5, ..base.clone() }),
            (
                keys::KOBOLD,
                CreatureTemplate { max_life: 3, fov_radius: 4, movement: Movement::Away, ..base.clone() },
            ),
            (
                keys::TURRET,
                CreatureTemplate {
                    max_life: 8,
                    damage: 3,
                    stumble_chance: 0.0,
                    movement: Movement::Stationary,
                    immunities: Immunities { fire: true, acid: false },
                    ..base.clone()
                },
            ),
            (
                keys::ZOMBIE,
                CreatureTemplate {
                    max_life: 6,
                    damage: 2,
                    fov_radius: 6,
                    stumble_chance: 0.5,
                    aggression: Aggression::Provoked,
                    immunities: Immunities { fire: false, acid: true },
                    ..base
                },
            ),
        ]
        .into_iter()
        .map(|(name, template)| (name.to_string(), template))
        .collect();
        Self { creatures }
    }

    /// Parses `[creatures.<name>]` tables. Fields left out take the template defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let pack: ContentPack = toml::from_str(source)?;
        pack.validate()?;
        Ok(pack)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, template) in &self.creatures {
            template.validate(name)?;
        }
        Ok(())
    }

    pub fn creature(&self, name: &str) -> Result<&CreatureTemplate, ConfigError> {
        self.creatures.get(name).ok_or_else(|| ConfigError::UnknownCreature(name.to_string()))
    }
}
