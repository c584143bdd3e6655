//! Level 3: phrasal-verb questions against a countdown.
//!
//! The countdown is the only recurring scheduled operation in the game. It is
//! driven by [`TimedChoice::tick`] and stops for good once the last question is
//! answered or the level is torn down.

use super::content::{ChoiceQuestion, PLANE_QUESTIONS};
use super::Verdict;
use crate::types::{Direction, Stage, COUNTDOWN_FULL, COUNTDOWN_STEP};

/// Countdown units remaining, from `COUNTDOWN_FULL` down to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining: COUNTDOWN_FULL,
            running: true,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining time as a percentage of a full countdown
    pub fn percent(&self) -> u32 {
        self.remaining * 100 / COUNTDOWN_FULL
    }

    pub fn reset(&mut self) {
        self.remaining = COUNTDOWN_FULL;
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    /// Advance one tick. Returns `true` when the countdown expired (and refilled).
    pub fn tick(&mut self, bonus: bool) -> bool {
        if !self.running {
            return false;
        }
        let step = if bonus {
            COUNTDOWN_STEP * 2
        } else {
            COUNTDOWN_STEP
        };
        if self.remaining == 0 {
            self.reset();
            return true;
        }
        self.remaining = self.remaining.saturating_sub(step);
        false
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedChoice {
    question: usize,
    cursor: usize,
    countdown: Countdown,
    finished: bool,
}

impl Default for TimedChoice {
    fn default() -> Self {
        Self::new()
    }
}

impl TimedChoice {
    pub fn new() -> Self {
        Self {
            question: 0,
            cursor: 0,
            countdown: Countdown::new(),
            finished: false,
        }
    }

    pub fn question_index(&self) -> usize {
        self.question
    }

    pub fn question(&self) -> &'static ChoiceQuestion {
        let last = PLANE_QUESTIONS.len() - 1;
        &PLANE_QUESTIONS[self.question.min(last)]
    }

    pub fn question_count(&self) -> usize {
        PLANE_QUESTIONS.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn move_cursor(&mut self, dir: Direction) {
        let last = self.question().options.len() - 1;
        self.cursor = match dir {
            Direction::Up => self.cursor.saturating_sub(1),
            Direction::Down => (self.cursor + 1).min(last),
        };
    }

    pub fn choose_current(&mut self) -> Verdict {
        self.choose(self.cursor)
    }

    /// Answer the current question. A wrong answer leaves the countdown running.
    pub fn choose(&mut self, index: usize) -> Verdict {
        if self.finished {
            return Verdict::Pending;
        }
        let question = self.question();
        if question.option(index).is_none() {
            return Verdict::Pending;
        }
        if !question.is_answer(index) {
            return Verdict::Incorrect;
        }

        let slot = u8::try_from(index).ok();
        if self.question + 1 < PLANE_QUESTIONS.len() {
            self.question += 1;
            self.cursor = 0;
            self.countdown.reset();
            Verdict::Correct {
                points: Stage::Level3.points(),
                slot,
                cleared: false,
            }
        } else {
            self.finished = true;
            self.countdown.cancel();
            Verdict::Correct {
                points: Stage::Level3.points(),
                slot,
                cleared: true,
            }
        }
    }

    /// One fixed-timestep tick; expiry counts as a wrong answer.
    pub fn tick(&mut self, bonus: bool) -> Verdict {
        if self.finished {
            return Verdict::Pending;
        }
        if self.countdown.tick(bonus) {
            Verdict::Incorrect
        } else {
            Verdict::Pending
        }
    }

    pub fn teardown(&mut self) {
        self.countdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_to_expire(bonus: bool) -> u32 {
        let mut level = TimedChoice::new();
        let mut n = 0;
        loop {
            n += 1;
            if level.tick(bonus) == Verdict::Incorrect {
                return n;
            }
        }
    }

    #[test]
    fn countdown_expires_and_refills() {
        let mut level = TimedChoice::new();
        let n = ticks_to_expire(false);
        for _ in 0..n - 1 {
            assert_eq!(level.tick(false), Verdict::Pending);
        }
        assert_eq!(level.countdown().remaining(), 0);
        assert_eq!(level.tick(false), Verdict::Incorrect);
        assert_eq!(level.countdown().remaining(), COUNTDOWN_FULL);
        assert_eq!(level.question_index(), 0);
    }

    #[test]
    fn bonus_mode_runs_at_double_rate() {
        let normal = ticks_to_expire(false);
        let bonus = ticks_to_expire(true);
        assert_eq!(normal, COUNTDOWN_FULL / COUNTDOWN_STEP + 1);
        assert_eq!(bonus, COUNTDOWN_FULL / (COUNTDOWN_STEP * 2) + 1);
    }

    #[test]
    fn correct_answer_advances_and_resets_timer() {
        let mut level = TimedChoice::new();
        for _ in 0..10 {
            level.tick(false);
        }
        assert!(level.countdown().remaining() < COUNTDOWN_FULL);
        assert_eq!(
            level.choose(0),
            Verdict::Correct {
                points: 200,
                slot: Some(0),
                cleared: false
            }
        );
        assert_eq!(level.question_index(), 1);
        assert_eq!(level.countdown().remaining(), COUNTDOWN_FULL);
    }

    #[test]
    fn wrong_answer_keeps_question_and_timer() {
        let mut level = TimedChoice::new();
        level.tick(false);
        let before = level.countdown().remaining();
        assert_eq!(level.choose(1), Verdict::Incorrect);
        assert_eq!(level.question_index(), 0);
        assert_eq!(level.countdown().remaining(), before);
        assert_eq!(level.choose(5), Verdict::Pending);
    }

    #[test]
    fn last_answer_clears_and_stops_countdown() {
        let mut level = TimedChoice::new();
        assert!(level.choose(0).is_correct());
        assert!(level.choose(0).is_correct());
        assert_eq!(
            level.choose(1),
            Verdict::Correct {
                points: 200,
                slot: Some(1),
                cleared: true
            }
        );
        assert!(level.is_finished());
        assert!(!level.countdown().is_running());
        for _ in 0..500 {
            assert_eq!(level.tick(true), Verdict::Pending);
        }
        assert_eq!(level.choose(1), Verdict::Pending);
    }

    #[test]
    fn teardown_cancels_countdown() {
        let mut level = TimedChoice::new();
        level.teardown();
        for _ in 0..500 {
            assert_eq!(level.tick(false), Verdict::Pending);
        }
    }
}
