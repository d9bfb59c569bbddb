//! Deterministic 4-connected shortest-path helpers.
//! This module exists so navigation rules are reusable across simulation systems.
//! It does not decide whether to chase; the decision engine asks it for one step at a time.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::movement::{adjacent_cardinal, cardinal_neighbors, manhattan};
use crate::entity::Entity;
use crate::types::Pos;
use crate::world::TickContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// A* from `start` to `goal`. The result excludes `start` and ends at `goal`;
/// it is empty when the goal is unreachable or already reached.
/// `passable` is never asked about `start`.
pub fn path_to<F>(start: Pos, goal: Pos, passable: F) -> Vec<Pos>
where
    F: Fn(Pos) -> bool,
{
    if start == goal || !passable(goal) {
        return Vec::new();
    }
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0u32);
    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let cur_g = g_score[&p];
        if curr.f > cur_g + curr.h {
            // Superseded by a cheaper entry for the same tile.
            continue;
        }
        for n in cardinal_neighbors(p) {
            if !passable(n) {
                continue;
            }
            let tg = cur_g + 1;
            if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = manhattan(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    Vec::new()
}

/// First tile of [`path_to`], provided it really is one cardinal step from `start`.
pub fn next_step_to<F>(start: Pos, goal: Pos, passable: F) -> Option<Pos>
where
    F: Fn(Pos) -> bool,
{
    path_to(start, goal, passable).first().copied().filter(|step| adjacent_cardinal(start, *step))
}

/// Every tile reachable from `start` through passable tiles, `start` included.
pub fn reachable_tiles<F>(start: Pos, passable: F) -> BTreeSet<Pos>
where
    F: Fn(Pos) -> bool,
{
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in cardinal_neighbors(current) {
            if passable(neighbor) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        p = came[&p];
        result.push(p);
    }
    result.reverse();
    result.remove(0);
    result
}

impl<R: ?Sized> TickContext<'_, R> {
    /// Path for `entity` under the live occupancy rules. With `ignore_target`
    /// the target actor's tile is walkable, which is what chasing needs.
    pub fn path_to(&self, entity: &Entity, dest: Pos, ignore_target: bool) -> Vec<Pos> {
        let own = entity.pos;
        path_to(own, dest, |p| p == own || self.is_open_tile(p, ignore_target))
    }

    pub fn next_step_to(&self, entity: &Entity, dest: Pos, ignore_target: bool) -> Option<Pos> {
        let own = entity.pos;
        next_step_to(own, dest, |p| p == own || self.is_open_tile(p, ignore_target))
    }
}
