//! Session score accounting and penalty schedules.

use airwave_core::components::Score;

/// Running session score, accumulated across flights.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    /// Points banked from completed flights.
    pub total: i32,
    pub completed: u32,
    pub crashed: u32,
    pub violations: u32,
}

/// Penalty for redirecting a flight to a different route waypoint.
pub fn route_alteration_penalty(points: i32) -> i32 {
    if points > 50 {
        2
    } else if points > 0 {
        1
    } else {
        0
    }
}

/// Penalty for entering a separation-violation episode. Charged once per
/// episode, debounced by `Proximity::warned`.
pub fn separation_penalty(points: i32) -> i32 {
    if points > 50 {
        10
    } else if points > 20 {
        5
    } else if points > 0 {
        1
    } else {
        0
    }
}

/// Apply a penalty, clamping at zero.
pub fn apply_penalty(score: &mut Score, penalty: i32) {
    score.points = (score.points - penalty).max(0);
}

/// Bank a completed flight's remaining points into the session total and
/// zero the aircraft's own score so it can only be counted once.
pub fn bank_completion(state: &mut ScoreState, score: &mut Score) {
    state.total += score.points;
    state.completed += 1;
    score.points = 0;
}
