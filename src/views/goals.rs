//! Goal progress and deadline views.

use chrono::NaiveDate;

use crate::models::Goal;

/// Deadlines within this many days (and not yet reached) count as near.
pub const NEAR_DEADLINE_DAYS: i64 = 7;

/// Progress band of a goal, computed from the clamped percentage.
///
/// Any server value at or above 100 lands in `Complete`, however far
/// above 100 it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLevel {
    /// Clamped progress is 100.
    Complete,
    /// Clamped progress is at least 75.
    High,
    /// Clamped progress is at least 50.
    Medium,
    /// Clamped progress is below 50.
    Low,
}

/// Aggregate status counters over a goal collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoalStatusCounts {
    /// All goals.
    pub total: usize,
    /// Goals with progress at or above 100.
    pub completed: usize,
    /// Goals with progress below 100.
    pub in_progress: usize,
    /// Unfinished goals whose deadline is within the next week.
    pub near_deadline: usize,
}

/// Whole days from `today` until `deadline`; negative once passed.
#[inline]
#[must_use]
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

/// Returns `true` once the deadline has passed.
#[inline]
#[must_use]
pub fn is_overdue(deadline: NaiveDate, today: NaiveDate) -> bool {
    days_until(deadline, today) < 0
}

/// Returns `true` while the deadline is today or within the next
/// [`NEAR_DEADLINE_DAYS`] days.
#[inline]
#[must_use]
pub fn is_near_deadline(deadline: NaiveDate, today: NaiveDate) -> bool {
    let days = days_until(deadline, today);
    (0..=NEAR_DEADLINE_DAYS).contains(&days)
}

/// Server progress clamped to `[0, 100]`.
///
/// The server reports raw percentages — overfunded goals exceed 100 and
/// odd data could go below 0 — so every threshold decision goes through
/// this clamp.
#[inline]
#[must_use]
pub fn clamped_progress(goal: &Goal) -> f64 {
    goal.progress_percentage.clamp(0.0, 100.0)
}

/// Maps a goal's clamped progress onto its display band.
#[inline]
#[must_use]
pub fn progress_level(goal: &Goal) -> ProgressLevel {
    let progress = clamped_progress(goal);
    if progress >= 100.0 {
        ProgressLevel::Complete
    } else if progress >= 75.0 {
        ProgressLevel::High
    } else if progress >= 50.0 {
        ProgressLevel::Medium
    } else {
        ProgressLevel::Low
    }
}

/// Counts completed, in-progress, and near-deadline goals.
///
/// A goal is near-deadline only while unfinished: completed goals never
/// count, and goals without a deadline never count.
#[must_use]
pub fn status_counts(goals: &[Goal], today: NaiveDate) -> GoalStatusCounts {
    let mut counts = GoalStatusCounts {
        total: goals.len(),
        ..GoalStatusCounts::default()
    };
    for goal in goals {
        let completed = clamped_progress(goal) >= 100.0;
        if completed {
            counts.completed += 1;
            continue;
        }
        counts.in_progress += 1;
        if goal
            .deadline
            .is_some_and(|deadline| is_near_deadline(deadline, today))
        {
            counts.near_deadline += 1;
        }
    }
    counts
}
