//! Tile predicates for where an entity may step next.
//! This module exists so wander, retreat and pathing all agree on what a valid destination is.
//! It does not choose between candidates; the decision engine does that.

use crate::types::{Direction, Pos};
use crate::world::TickContext;

/// True only for the four orthogonal neighbours; diagonals and the same tile are not adjacent.
pub fn adjacent_cardinal(a: Pos, b: Pos) -> bool {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    (dx == 1 && dy == 0) || (dx == 0 && dy == 1)
}

/// Straight-line distance, used for awareness checks only.
pub fn euclidean_distance(a: Pos, b: Pos) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    dx.hypot(dy)
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub fn cardinal_neighbors(p: Pos) -> [Pos; 4] {
    Direction::ALL.map(|dir| p.step(dir))
}

impl<R: ?Sized> TickContext<'_, R> {
    /// Interior, passable and free of every occupant, the target actor included.
    pub fn is_valid_destination(&self, pos: Pos) -> bool {
        self.is_open_tile(pos, false)
    }

    /// Like [`Self::is_valid_destination`], but with `ignore_target` set the target
    /// actor's own tile does not count as blocked.
    pub fn is_open_tile(&self, pos: Pos, ignore_target: bool) -> bool {
        if !self.map.is_interior(pos) || !self.map.is_passable(pos) {
            return false;
        }
        if self.occupancy.occupant(pos).is_some() {
            return false;
        }
        ignore_target || pos != self.target.pos()
    }

    pub fn wander_tiles(&self, from: Pos) -> Vec<Pos> {
        cardinal_neighbors(from).into_iter().filter(|p| self.is_valid_destination(*p)).collect()
    }

    /// Neighbours that widen the gap to `threat` along at least one axis.
    pub fn retreat_tiles(&self, from: Pos, threat: Pos) -> Vec<Pos> {
        let gap_x = from.x.abs_diff(threat.x);
        let gap_y = from.y.abs_diff(threat.y);
        cardinal_neighbors(from)
            .into_iter()
            .filter(|p| {
                self.is_valid_destination(*p)
                    && *p != threat
                    && (p.x.abs_diff(threat.x) > gap_x || p.y.abs_diff(threat.y) > gap_y)
            })
            .collect()
    }
}
