//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        let player = &self.state.player;
        hasher.write_i32(player.pos.x);
        hasher.write_i32(player.pos.y);
        hasher.write_u32(player.vitals.life);
        for entity in self.state.entities.values() {
            hasher.write_i32(entity.pos.x);
            hasher.write_i32(entity.pos.y);
            hasher.write_u32(entity.vitals.life);
            hasher.write_u8(u8::from(entity.dead));
        }
        for item in self.state.items.items.values() {
            hasher.write_u8(match item.kind {
                ItemKind::Gold => 1,
                ItemKind::ThreeGold => 2,
                ItemKind::Bomb => 3,
            });
            hasher.write_i32(item.pos.x);
            hasher.write_i32(item.pos.y);
        }
        hasher.finish()
    }
}
