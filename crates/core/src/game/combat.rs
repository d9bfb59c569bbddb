//! Damage intake, death, and the loot roll that happens on death.
//! This module exists so traps, area effects and the AI turn all kill entities the same way.
//! It does not remove corpses from any registry; the owner of the entity storage does that.

use rand_chacha::rand_core::Rng;

use crate::entity::Entity;
use crate::random::weighted_choice_from_mapping;
use crate::types::{DamageKind, ItemKind, LogEvent};
use crate::world::TickContext;

/// Physical damage. Returns true if this hit killed the entity.
pub fn apply_damage<R: Rng + ?Sized>(
    entity: &mut Entity,
    amount: u32,
    ctx: &mut TickContext<'_, R>,
) -> bool {
    apply_typed_damage(entity, DamageKind::Physical, amount, ctx)
}

/// Life clamps at zero; the hit that reaches zero triggers [`resolve_death`].
/// Damage to an already dead entity, or of a kind it is immune to, is ignored.
pub fn apply_typed_damage<R: Rng + ?Sized>(
    entity: &mut Entity,
    kind: DamageKind,
    amount: u32,
    ctx: &mut TickContext<'_, R>,
) -> bool {
    if entity.dead {
        return false;
    }
    if entity.immunities.blocks(kind) {
        tracing::debug!(entity = ?entity.id, ?kind, "immune");
        return false;
    }
    if !entity.vitals.apply(amount) {
        return false;
    }
    resolve_death(entity, ctx);
    true
}

/// Marks the entity dead and rolls its drop table once. Later calls are no-ops
/// and return `None`. Outcomes that are not item kinds spawn nothing.
pub fn resolve_death<R: Rng + ?Sized>(
    entity: &mut Entity,
    ctx: &mut TickContext<'_, R>,
) -> Option<ItemKind> {
    if entity.dead {
        return None;
    }
    entity.dead = true;
    entity.vitals.life = 0;
    tracing::info!(entity = ?entity.id, name = %entity.name, "died");
    ctx.console.log(LogEvent::Died { entity: entity.id, name: entity.name.clone() });

    let outcome = weighted_choice_from_mapping(ctx.rng, &entity.drops);
    let item = ItemKind::from_loot_key(outcome)?;
    ctx.spawner.spawn(item, entity.pos);
    entity.loot = Some(item);
    ctx.console.log(LogEvent::Dropped { entity: entity.id, item, pos: entity.pos });
    Some(item)
}
