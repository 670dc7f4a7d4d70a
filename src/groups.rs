//! Group and order bookkeeping over a map's bombs. All functions are pure
//! reads; the canonical active/completed groups live in the store.

use crate::entities::{Bomb, BombHighlight};

/// The map's declared sequence, or the sorted distinct bomb groups when the
/// map declares none.
pub fn effective_sequence(declared: &[u32], bombs: &[Bomb]) -> Vec<u32> {
    if !declared.is_empty() {
        return declared.to_vec();
    }
    let mut groups: Vec<u32> = bombs.iter().map(|b| b.group).collect();
    groups.sort_unstable();
    groups.dedup();
    groups
}

/// First sequence entry not yet completed.
pub fn next_pending_group(sequence: &[u32], completed: &[u32]) -> Option<u32> {
    sequence.iter().copied().find(|g| !completed.contains(g))
}

/// Order the next bomb of `group` must carry. `None` means any bomb of the
/// group is acceptable (nothing of it has been collected yet).
pub fn expected_order(bombs: &[Bomb], group: u32) -> Option<u32> {
    let mut any_collected = false;
    let mut lowest: Option<u32> = None;
    for b in bombs.iter().filter(|b| b.group == group) {
        if b.collected {
            any_collected = true;
        } else {
            lowest = Some(lowest.map_or(b.order, |o| o.min(b.order)));
        }
    }
    if any_collected { lowest } else { None }
}

pub fn group_complete(bombs: &[Bomb], group: u32) -> bool {
    bombs.iter().filter(|b| b.group == group).all(|b| b.collected)
}

pub fn all_collected(bombs: &[Bomb]) -> bool {
    bombs.iter().all(|b| b.collected)
}

fn lowest_uncollected(bombs: &[Bomb], group: u32) -> Option<u32> {
    bombs
        .iter()
        .filter(|b| b.group == group && !b.collected)
        .map(|b| b.order)
        .min()
}

/// Render flags for each bomb, index-aligned with `bombs`.
pub fn highlights(bombs: &[Bomb], active: Option<u32>, next_pending: Option<u32>) -> Vec<BombHighlight> {
    match active {
        Some(group) => {
            let lowest = lowest_uncollected(bombs, group);
            bombs
                .iter()
                .map(|b| {
                    let in_group = b.group == group && !b.collected;
                    BombHighlight {
                        is_in_active_group: in_group,
                        is_correct_next: in_group && Some(b.order) == lowest,
                    }
                })
                .collect()
        }
        None => {
            let lowest = next_pending.and_then(|g| lowest_uncollected(bombs, g));
            bombs
                .iter()
                .map(|b| {
                    let flagged = !b.collected && Some(b.group) == next_pending && Some(b.order) == lowest;
                    BombHighlight {
                        is_correct_next: flagged,
                        is_in_active_group: flagged,
                    }
                })
                .collect()
        }
    }
}
