//! Uniform and weighted random selection over an injected rng.
//! This module exists so every random draw in the simulation flows through one seedable source.
//! It does not own seeding policy; callers decide which rng to pass.
//!
//! Selecting from an empty collection, or from weights that sum to zero, is a
//! caller bug and panics. Content is validated at load time so these panics
//! never fire in a configured game.

use std::collections::BTreeMap;
use std::mem;

use rand_chacha::rand_core::Rng;

/// Uniform draw in `[0, 1)` with 53 bits of precision.
pub fn unit_f64<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
    (rng.next_u64() >> 11) as f64 * SCALE
}

/// Uniform integer in `[0, bound)`.
///
/// # Panics
/// Panics if `bound` is zero.
pub fn below<R: Rng + ?Sized>(rng: &mut R, bound: u64) -> u64 {
    assert!(bound > 0, "cannot draw below an empty bound");
    ((u128::from(rng.next_u64()) * u128::from(bound)) >> 64) as u64
}

pub fn index_below<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    below(rng, len as u64) as usize
}

/// True with probability `p`. Values at or below 0 never fire, values at or above 1 always do.
pub fn roll_chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    unit_f64(rng) < p
}

/// # Panics
/// Panics if `items` is empty.
pub fn uniform_choice<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    assert!(!items.is_empty(), "uniform_choice called on an empty slice");
    &items[index_below(rng, items.len())]
}

/// Picks an item with probability `weight_of(item) / total`.
///
/// # Panics
/// Panics if a weight is negative or non-finite, or if the weights sum to zero.
pub fn weighted_choice<'a, T, R, F>(rng: &mut R, items: &'a [T], weight_of: F) -> &'a T
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f64,
{
    let mut total = 0.0;
    for item in items {
        let weight = weight_of(item);
        assert!(weight.is_finite() && weight >= 0.0, "invalid selection weight {weight}");
        total += weight;
    }
    assert!(total > 0.0, "weighted_choice needs a positive total weight");

    let draw = unit_f64(rng) * total;
    let mut cumulative = 0.0;
    let mut last_weighted = None;
    for item in items {
        let weight = weight_of(item);
        if weight > 0.0 {
            last_weighted = Some(item);
        }
        cumulative += weight;
        if draw < cumulative {
            return item;
        }
    }
    // Float rounding can leave the draw equal to the final prefix sum.
    last_weighted.expect("positive total implies a positive weight")
}

/// Picks a key with probability `weight / total`, walking keys in map order.
///
/// # Panics
/// Panics if the mapping is empty or its weights sum to zero.
pub fn weighted_choice_from_mapping<'a, K, R>(rng: &mut R, mapping: &'a BTreeMap<K, u32>) -> &'a K
where
    K: Ord,
    R: Rng + ?Sized,
{
    let total: u64 = mapping.values().map(|&w| u64::from(w)).sum();
    assert!(total > 0, "weighted_choice_from_mapping needs a positive total weight");

    let draw = below(rng, total);
    let mut cumulative = 0u64;
    for (key, &weight) in mapping {
        cumulative += u64::from(weight);
        if draw < cumulative {
            return key;
        }
    }
    unreachable!("draw {draw} is below total {total}")
}

/// Reorders `items` by repeatedly drawing a uniform element out of the remaining pool.
/// Equal values stay distinct slots.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut Vec<T>) {
    let mut pool = mem::take(items);
    items.reserve(pool.len());
    while !pool.is_empty() {
        let picked = index_below(rng, pool.len());
        items.push(pool.remove(picked));
    }
}
