//! Level 1: pick the stolen artifact from the clues.

use super::content::{Artifact, AUCTION_ARTIFACTS, AUCTION_HINT};
use super::Verdict;
use crate::types::{Direction, Stage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    cursor: usize,
    hint: Option<&'static str>,
    solved: bool,
}

impl Default for Deduction {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduction {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            hint: None,
            solved: false,
        }
    }

    pub fn artifacts(&self) -> &'static [Artifact] {
        &AUCTION_ARTIFACTS
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Revealed after the first wrong pick.
    pub fn hint(&self) -> Option<&'static str> {
        self.hint
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn move_cursor(&mut self, dir: Direction) {
        let last = AUCTION_ARTIFACTS.len() - 1;
        self.cursor = match dir {
            Direction::Up => self.cursor.saturating_sub(1),
            Direction::Down => (self.cursor + 1).min(last),
        };
    }

    pub fn choose_current(&mut self) -> Verdict {
        self.choose(self.cursor)
    }

    pub fn choose(&mut self, index: usize) -> Verdict {
        if self.solved {
            return Verdict::Pending;
        }
        let Some(artifact) = AUCTION_ARTIFACTS.get(index) else {
            return Verdict::Pending;
        };
        self.cursor = index;

        if artifact.correct {
            self.solved = true;
            Verdict::Correct {
                points: Stage::Level1.points(),
                slot: u8::try_from(index).ok(),
                cleared: true,
            }
        } else {
            self.hint = Some(AUCTION_HINT);
            Verdict::Incorrect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_pick_reveals_hint_and_stays_open() {
        let mut level = Deduction::new();
        assert_eq!(level.choose(0), Verdict::Incorrect);
        assert_eq!(level.hint(), Some(AUCTION_HINT));
        assert!(!level.is_solved());
        assert_eq!(level.choose(2), Verdict::Incorrect);
    }

    #[test]
    fn cutlass_clears_once() {
        let mut level = Deduction::new();
        level.move_cursor(Direction::Down);
        assert_eq!(
            level.choose_current(),
            Verdict::Correct {
                points: 100,
                slot: Some(1),
                cleared: true
            }
        );
        assert_eq!(level.choose(1), Verdict::Pending);
        assert_eq!(level.choose(0), Verdict::Pending);
    }

    #[test]
    fn cursor_is_clamped() {
        let mut level = Deduction::new();
        level.move_cursor(Direction::Up);
        assert_eq!(level.cursor(), 0);
        for _ in 0..5 {
            level.move_cursor(Direction::Down);
        }
        assert_eq!(level.cursor(), 2);
        assert_eq!(level.choose(7), Verdict::Pending);
    }
}
