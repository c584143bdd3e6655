//! Scoring module - score awards, combo streaks and bonus mode
//!
//! Rules:
//! - An award of `points` adds `points * 2` while bonus mode is active, `points` otherwise.
//! - Each correct answer extends the combo by one; `max_combo` tracks the high-water mark.
//! - Bonus mode is active exactly while `combo >= 3`. It is derived from the combo on
//!   every read and never stored on its own.

use crate::types::{BONUS_COMBO_THRESHOLD, BONUS_MULTIPLIER};

/// Whether a combo streak of this length runs in bonus mode
pub fn bonus_active(combo: u32) -> bool {
    combo >= BONUS_COMBO_THRESHOLD
}

/// Points actually credited for an award of `points`
pub fn effective_points(points: u32, bonus: bool) -> u32 {
    if bonus {
        points.saturating_mul(BONUS_MULTIPLIER)
    } else {
        points
    }
}

/// Running score and combo counters for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    score: u32,
    combo: u32,
    max_combo: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn bonus_mode(&self) -> bool {
        bonus_active(self.combo)
    }

    /// Credit an award and return the delta actually added.
    pub fn add_score(&mut self, points: u32) -> u32 {
        let delta = effective_points(points, self.bonus_mode());
        self.score = self.score.saturating_add(delta);
        delta
    }

    /// Extend the streak. Returns `true` when this call switched bonus mode on.
    pub fn increment_combo(&mut self) -> bool {
        let was_bonus = self.bonus_mode();
        self.combo = self.combo.saturating_add(1);
        self.max_combo = self.max_combo.max(self.combo);
        !was_bonus && self.bonus_mode()
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
    }

    /// Zero score and streak. `max_combo` survives for the whole session.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.combo = 0;
    }

    /// Restore a score from a checkpoint (streaks never carry over).
    pub fn restore(&mut self, score: u32) {
        self.score = score;
        self.combo = 0;
    }
}
