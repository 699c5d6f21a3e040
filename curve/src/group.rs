//! Set-level helpers over lists of curve points. Point lists keep the
//! enumeration order, so these work on slices rather than hash sets.

use core::hash::Hash;
use std::collections::HashSet;

/// Membership test.
#[inline]
pub fn contains<T: PartialEq>(set: &[T], item: &T) -> bool {
    set.iter().any(|x| x == item)
}

/// True when both lists hold the same elements and neither repeats one.
pub fn set_equals<T: Eq + Hash>(first: &[T], second: &[T]) -> bool {
    let a: HashSet<&T> = first.iter().collect();
    let b: HashSet<&T> = second.iter().collect();
    a.len() == first.len() && b.len() == second.len() && a == b
}

/// Elements of `first` that are not in `second`, in their original order.
pub fn set_subtract<T: Copy + Eq + Hash>(first: &[T], second: &[T]) -> Vec<T> {
    let exclude: HashSet<&T> = second.iter().collect();
    first.iter().filter(|x| !exclude.contains(x)).copied().collect()
}

/// Drop every cycle whose point set equals that of an earlier cycle.
pub fn unique_cycle_filter<T: Eq + Hash>(cycles: Vec<Vec<T>>) -> Vec<Vec<T>> {
    let mut unique: Vec<Vec<T>> = Vec::new();
    for cycle in cycles {
        if !unique.iter().any(|kept| set_equals(kept, &cycle)) {
            unique.push(cycle);
        }
    }
    unique
}

/// Cycles of exactly `order` points.
pub fn filter_cycles_by_order<T>(cycles: Vec<Vec<T>>, order: usize) -> Vec<Vec<T>> {
    cycles.into_iter().filter(|c| c.len() == order).collect()
}
