//! Progress mutations and summary over a learning path.
//!
//! Progress flags are the only part of a path that changes after creation:
//! `completed` is monotonic (reset only by [`reset_progress`]), `priority`
//! is freely mutable.

use crate::curriculum::{LearningPath, Priority};
use serde::{Deserialize, Serialize};

/// Points awarded per completed lesson or project step.
pub const POINTS_PER_ITEM: u64 = 10;

/// Mark an item completed. Returns the points newly earned (zero when the
/// item was already complete or does not exist).
pub fn set_completed(path: &mut LearningPath, item_id: &str) -> u64 {
    for item in path.items_mut() {
        if item.id == item_id {
            if item.completed {
                return 0;
            }
            item.completed = true;
            return POINTS_PER_ITEM;
        }
    }
    0
}

/// Set an item's priority. Returns false when the item does not exist.
pub fn set_priority(path: &mut LearningPath, item_id: &str, priority: Priority) -> bool {
    for item in path.items_mut() {
        if item.id == item_id {
            item.priority = priority;
            return true;
        }
    }
    false
}

/// Clear every completed flag, the one sanctioned reset of the monotonic
/// flag. Priorities are left alone.
pub fn reset_progress(path: &mut LearningPath) {
    for item in path.items_mut() {
        item.completed = false;
    }
}

/// Totals for display and gamification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    pub percent: u8,
    pub points: u64,
}

pub fn summarize(path: &LearningPath) -> ProgressSummary {
    let total = path.items().count();
    let completed = path.items().filter(|i| i.completed).count();
    let percent = if total == 0 {
        0
    } else {
        ((completed * 100) / total) as u8
    };
    ProgressSummary {
        total,
        completed,
        percent,
        points: completed as u64 * POINTS_PER_ITEM,
    }
}
