//! Level 2: arrange the crypt stones into a passive-voice sentence.
//!
//! The order is re-checked after every change and on every explicit
//! [`Reorder::evaluate`] call. Success fires exactly once; after that the
//! stones are locked.

use arrayvec::ArrayVec;

use super::content::{CRYPT_SCRAMBLED, CRYPT_TARGET};
use super::Verdict;
use crate::types::{Direction, Stage};

const STONES: usize = CRYPT_TARGET.len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reorder {
    order: ArrayVec<&'static str, STONES>,
    selected: usize,
    fired: bool,
}

impl Default for Reorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Reorder {
    pub fn new() -> Self {
        Self {
            order: ArrayVec::from(CRYPT_SCRAMBLED),
            selected: 0,
            fired: false,
        }
    }

    pub fn order(&self) -> &[&'static str] {
        &self.order
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_solved(&self) -> bool {
        self.fired
    }

    pub fn move_selection(&mut self, dir: Direction) {
        self.selected = step(self.selected, dir);
    }

    /// Move the selected stone one slot, carrying the selection with it.
    pub fn shift_selected(&mut self, dir: Direction) -> Verdict {
        if self.fired {
            return Verdict::Pending;
        }
        let to = step(self.selected, dir);
        if to != self.selected {
            self.order.swap(self.selected, to);
            self.selected = to;
        }
        self.evaluate()
    }

    /// Replace the whole order. Anything but a permutation of the stones is rejected.
    pub fn set_order(&mut self, order: &[&str]) -> Verdict {
        if self.fired || !is_permutation(order) {
            return Verdict::Pending;
        }
        let mut next = ArrayVec::new();
        for segment in order {
            if let Some(stone) = CRYPT_TARGET.iter().find(|s| *s == segment) {
                next.push(*stone);
            }
        }
        self.order = next;
        self.evaluate()
    }

    /// Check the current order; `Correct` is returned the first time it matches.
    pub fn evaluate(&mut self) -> Verdict {
        if self.fired || self.order.as_slice() != CRYPT_TARGET.as_slice() {
            return Verdict::Pending;
        }
        self.fired = true;
        Verdict::Correct {
            points: Stage::Level2.points(),
            slot: None,
            cleared: true,
        }
    }
}

fn step(index: usize, dir: Direction) -> usize {
    match dir {
        Direction::Up => index.saturating_sub(1),
        Direction::Down => (index + 1).min(STONES - 1),
    }
}

fn is_permutation(order: &[&str]) -> bool {
    if order.len() != STONES {
        return false;
    }
    let mut a: ArrayVec<&str, STONES> = order.iter().copied().collect();
    let mut b: ArrayVec<&str, STONES> = CRYPT_TARGET.iter().copied().collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
