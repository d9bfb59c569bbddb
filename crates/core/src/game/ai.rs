//! Per-tick decision engine for non-player entities.
//! This module exists to keep the stumble / attack / move priority order in one place.
//! It does not own damage bookkeeping; attacks go through the target actor and deaths through `combat`.
//!
//! Branches are tried in order and the first one taken ends the turn:
//! stumble, attack an adjacent target, then the movement policy. `Towards`
//! and `Away` only engage while the target is within the field-of-view
//! radius; outside it they wander like `Random`.

use rand_chacha::rand_core::Rng;

use super::movement::{adjacent_cardinal, euclidean_distance};
use crate::entity::Entity;
use crate::random::{roll_chance, uniform_choice};
use crate::types::{LogEvent, Movement, Pos};
use crate::world::TickContext;

/// Runs one decision for `entity`. Returns whether it spent its turn.
/// Dead entities never act.
pub fn update<R: Rng + ?Sized>(entity: &mut Entity, ctx: &mut TickContext<'_, R>) -> bool {
    if !entity.is_alive() {
        return false;
    }

    if roll_chance(ctx.rng, entity.stumble_chance) {
        tracing::debug!(entity = ?entity.id, "stumbles");
        ctx.console.log(LogEvent::Stumbled { entity: entity.id, name: entity.name.clone() });
        return true;
    }

    let target = ctx.target.pos();
    if adjacent_cardinal(entity.pos, target) && entity.may_attack() {
        tracing::debug!(entity = ?entity.id, damage = entity.damage, "attacks target");
        ctx.console.log(LogEvent::Attacked {
            entity: entity.id,
            name: entity.name.clone(),
            damage: entity.damage,
        });
        ctx.target.take_damage(entity.damage);
        return true;
    }

    match entity.movement {
        Movement::Random => {
            wander(entity, ctx);
            true
        }
        Movement::Stationary => true,
        Movement::Towards | Movement::Away
            if euclidean_distance(entity.pos, target) > f64::from(entity.fov_radius) =>
        {
            wander(entity, ctx);
            true
        }
        Movement::Towards => {
            if let Some(step) = ctx.next_step_to(entity, target, true)
                && ctx.is_valid_destination(step)
            {
                move_entity(entity, ctx, step);
            } else {
                tracing::debug!(entity = ?entity.id, "no step towards target");
            }
            true
        }
        Movement::Away => {
            let candidates = ctx.retreat_tiles(entity.pos, target);
            if candidates.is_empty() {
                tracing::debug!(entity = ?entity.id, "cornered");
                return true;
            }
            let step = *uniform_choice(ctx.rng, &candidates);
            if ctx.is_valid_destination(step) {
                move_entity(entity, ctx, step);
            }
            true
        }
    }
}

fn wander<R: Rng + ?Sized>(entity: &mut Entity, ctx: &mut TickContext<'_, R>) {
    let candidates = ctx.wander_tiles(entity.pos);
    if candidates.is_empty() {
        return;
    }
    let step = *uniform_choice(ctx.rng, &candidates);
    move_entity(entity, ctx, step);
}

fn move_entity<R: ?Sized>(entity: &mut Entity, ctx: &mut TickContext<'_, R>, to: Pos) {
    let from = entity.pos;
    ctx.occupancy.relocate(entity.id, from, to);
    entity.pos = to;
    ctx.console.log(LogEvent::Moved { entity: entity.id, from, to });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CreatureTemplate;
    use crate::test_support::*;
    use crate::types::{Aggression, TileKind};
    use crate::world::Occupancy;

    fn steady(movement: Movement) -> CreatureTemplate {
        CreatureTemplate { stumble_chance: 0.0, movement, max_life: 10, damage: 3, ..Default::default() }
    }

    #[test]
    fn adjacent_always_aggressive_entity_attacks_without_moving() {
        let mut world = FixtureWorld::open(12, 12, Pos::new(5, 6));
        let id = world.spawn_with(&steady(Movement::Towards), Pos::new(5, 5));

        assert!(world.update(id));
        assert_eq!(world.player.damage_taken, 3);
        assert_eq!(world.entity(id).pos, Pos::new(5, 5));
        assert!(matches!(world.log.as_slice(), [LogEvent::Attacked { damage: 3, .. }]));
    }

    #[test]
    fn provoked_entity_only_attacks_once_hurt() {
        let template = CreatureTemplate {
            aggression: Aggression::Provoked,
            ..steady(Movement::Stationary)
        };
        let mut world = FixtureWorld::open(12, 12, Pos::new(5, 6));
        let id = world.spawn_with(&template, Pos::new(5, 5));

        assert!(world.update(id));
        assert_eq!(world.player.damage_taken, 0, "unhurt provoked entity holds back");

        world.entity_mut(id).vitals.life -= 1;
        assert!(world.update(id));
        assert_eq!(world.player.damage_taken, 3);
    }

    #[test]
    fn certain_stumble_preempts_an_available_attack() {
        let template = CreatureTemplate { stumble_chance: 1.0, ..steady(Movement::Towards) };
        let mut world = FixtureWorld::open(12, 12, Pos::new(5, 6));
        let id = world.spawn_with(&template, Pos::new(5, 5));

        assert!(world.update(id));
        assert_eq!(world.player.damage_taken, 0);
        assert_eq!(world.entity(id).pos, Pos::new(5, 5));
        assert_eq!(world.log.len(), 1);
        assert_eq!(world.log[0].to_string(), "The creature stumbles");
    }

    #[test]
    fn boxed_in_wanderer_still_spends_its_turn() {
        let mut world = FixtureWorld::open(12, 12, Pos::new(9, 9));
        let id = world.spawn_with(&steady(Movement::Random), Pos::new(5, 5));
        world.occupy(Pos::new(5, 4));
        world.occupy(Pos::new(6, 5));
        world.map.set_tile(Pos::new(5, 6), TileKind::Wall);
        world.map.set_tile(Pos::new(4, 5), TileKind::Rubble);

        assert!(world.update(id));
        assert_eq!(world.entity(id).pos, Pos::new(5, 5));
        assert!(world.log.is_empty(), "no movement notice when nothing moved");
    }

    #[test]
    fn wanderer_moves_to_a_neighbouring_open_tile() {
        let mut world = FixtureWorld::open(12, 12, Pos::new(9, 9));
        let id = world.spawn_with(&steady(Movement::Random), Pos::new(5, 5));

        assert!(world.update(id));
        let pos = world.entity(id).pos;
        assert!(adjacent_cardinal(pos, Pos::new(5, 5)));
        assert_eq!(world.occupancy.occupant(pos), Some(id));
        assert_eq!(world.occupancy.occupant(Pos::new(5, 5)), None);
    }

    #[test]
    fn stationary_entity_never_moves() {
        let mut world = FixtureWorld::open(12, 12, Pos::new(7, 5));
        let id = world.spawn_with(&steady(Movement::Stationary), Pos::new(5, 5));
        for _ in 0..20 {
            assert!(world.update(id));
        }
        assert_eq!(world.entity(id).pos, Pos::new(5, 5));
    }

    #[test]
    fn chaser_within_view_steps_onto_the_only_clear_approach() {
        let mut world = FixtureWorld::open(12, 12, Pos::new(5, 7));
        let id = world.spawn_with(&steady(Movement::Towards), Pos::new(5, 5));

        assert!(world.update(id));
        assert_eq!(world.entity(id).pos, Pos::new(5, 6));
        let moves = world.log.iter().filter(|e| matches!(e, LogEvent::Moved { .. })).count();
        assert_eq!(moves, 1);
    }

    #[test]
    fn unprovoked_chaser_next_to_the_target_does_not_step_onto_it() {
        let template = CreatureTemplate {
            aggression: Aggression::Provoked,
            ..steady(Movement::Towards)
        };
        let mut world = FixtureWorld::open(12, 12, Pos::new(5, 6));
        let id = world.spawn_with(&template, Pos::new(5, 5));

        assert!(world.update(id), "holding position still spends the turn");
        assert_eq!(world.entity(id).pos, Pos::new(5, 5));
        assert_eq!(world.occupancy.occupant(Pos::new(5, 5)), Some(id));
        assert_eq!(world.occupancy.occupant(Pos::new(5, 6)), None);
        assert_eq!(world.player.damage_taken, 0);
        assert!(!world.log.iter().any(|e| matches!(e, LogEvent::Moved { .. })));

        world.entity_mut(id).vitals.life -= 1;
        assert!(world.update(id));
        assert_eq!(world.entity(id).pos, Pos::new(5, 5));
        assert_eq!(world.player.damage_taken, 3);
    }

    #[test]
    fn chaser_out_of_view_wanders_instead() {
        let template = CreatureTemplate { fov_radius: 2, ..steady(Movement::Towards) };
        let mut world = FixtureWorld::open(20, 20, Pos::new(15, 15));
        let id = world.spawn_with(&template, Pos::new(3, 3));

        assert!(world.update(id));
        let pos = world.entity(id).pos;
        assert!(adjacent_cardinal(pos, Pos::new(3, 3)), "wandered one tile");
    }

    #[test]
    fn chaser_with_no_route_holds_position() {
        let mut world = FixtureWorld::open(12, 12, Pos::new(7, 5));
        let id = world.spawn_with(&steady(Movement::Towards), Pos::new(5, 5));
        // Column x = 6 walls the target off completely.
        for y in 1..11 {
            world.map.set_tile(Pos::new(6, y), TileKind::Wall);
        }

        assert!(world.update(id));
        assert_eq!(world.entity(id).pos, Pos::new(5, 5));
    }

    #[test]
    fn fleeing_entity_widens_the_gap() {
        let mut world = FixtureWorld::open(12, 12, Pos::new(5, 4));
        let id = world.spawn_with(&steady(Movement::Away), Pos::new(5, 6));

        assert!(world.update(id));
        let pos = world.entity(id).pos;
        assert!(
            [Pos::new(6, 6), Pos::new(4, 6), Pos::new(5, 7)].contains(&pos),
            "retreat to {pos:?} should move away from the target"
        );
    }

    #[test]
    fn cornered_fleeing_entity_stays_put() {
        let mut world = FixtureWorld::open(5, 5, Pos::new(2, 2));
        // Interior is 3x3; the corner (3,3) has only (2,3) and (3,2) as neighbours.
        let id = world.spawn_with(&steady(Movement::Away), Pos::new(3, 3));
        world.occupy(Pos::new(2, 3));
        world.occupy(Pos::new(3, 2));

        assert!(world.update(id));
        assert_eq!(world.entity(id).pos, Pos::new(3, 3));
    }

    #[test]
    fn dead_entities_do_not_act() {
        let mut world = FixtureWorld::open(12, 12, Pos::new(5, 6));
        let id = world.spawn_with(&steady(Movement::Towards), Pos::new(5, 5));
        world.entity_mut(id).dead = true;

        assert!(!world.update(id));
        assert_eq!(world.player.damage_taken, 0);
    }
}
