#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Experience thresholds, leveling, and skill point issuance.

use deadhold_core::{Command, Event, Progress};

/// Converts accumulated experience into levels.
///
/// While the experience covers the current threshold, the threshold is
/// consumed, level and skill points grow by one, and the threshold grows by
/// half, truncated. Returns the reconciled progress and whether at least one
/// level was gained.
#[must_use]
pub fn check_level_up(progress: Progress) -> (Progress, bool) {
    let mut next = progress;
    next.xp_to_next = next.xp_to_next.max(1);
    let mut leveled_up = false;

    while next.xp >= next.xp_to_next {
        next.xp -= next.xp_to_next;
        next.level = next.level.saturating_add(1);
        next.skill_points = next.skill_points.saturating_add(1);
        next.xp_to_next = (next.xp_to_next.saturating_mul(3) / 2).max(1);
        leveled_up = true;
    }

    (next, leveled_up)
}

/// Pure system reconciling level-ups after experience was credited.
#[derive(Clone, Copy, Debug, Default)]
pub struct Progression;

impl Progression {
    /// Emits [`Command::ApplyProgress`] when the events credited experience
    /// and the current progress crosses at least one threshold.
    pub fn handle(&self, events: &[Event], progress: Progress, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::ExperienceAwarded { .. }))
        {
            return;
        }

        let (progress, leveled_up) = check_level_up(progress);
        if leveled_up {
            out.push(Command::ApplyProgress { progress });
        }
    }
}
