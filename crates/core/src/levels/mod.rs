//! Level modules - the four puzzles, one active at a time
//!
//! A level never touches the session. It evaluates submissions against its
//! embedded answer key and reports a [`Verdict`]; the engine applies the
//! verdict (score, combo, life loss, delayed transition).
//!
//! | Stage | Module | Submission |
//! |-------|--------|------------|
//! | `Level1` | [`Deduction`] | choose one artifact |
//! | `Level2` | [`Reorder`] | arrange stones, checked after every move |
//! | `Level3` | [`TimedChoice`] | three questions against a countdown |
//! | `Level4` | [`FillBlank`] | typed or spoken token |

pub mod content;
pub mod deduction;
pub mod fill_blank;
pub mod reorder;
pub mod timed_choice;

pub use deduction::Deduction;
pub use fill_blank::{FillBlank, VoiceState};
pub use reorder::Reorder;
pub use timed_choice::{Countdown, TimedChoice};

use crate::types::{Command, InputMode, Stage};

/// What a submission (or a tick) amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing to apply
    Pending,
    /// Award `points`; `cleared` means the level is done and should move on
    Correct {
        points: u32,
        slot: Option<u8>,
        cleared: bool,
    },
    /// Wrong answer or expired countdown
    Incorrect,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Verdict::Pending)
    }
}

/// The active puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelModule {
    Deduction(Deduction),
    Reorder(Reorder),
    TimedChoice(TimedChoice),
    FillBlank(FillBlank),
}

impl LevelModule {
    /// Fresh module for a level stage; `None` for menu, cinematic and end stages.
    pub fn for_stage(stage: Stage) -> Option<Self> {
        Some(match stage {
            Stage::Level1 => LevelModule::Deduction(Deduction::new()),
            Stage::Level2 => LevelModule::Reorder(Reorder::new()),
            Stage::Level3 => LevelModule::TimedChoice(TimedChoice::new()),
            Stage::Level4 => LevelModule::FillBlank(FillBlank::new()),
            _ => return None,
        })
    }

    pub fn stage(&self) -> Stage {
        match self {
            LevelModule::Deduction(_) => Stage::Level1,
            LevelModule::Reorder(_) => Stage::Level2,
            LevelModule::TimedChoice(_) => Stage::Level3,
            LevelModule::FillBlank(_) => Stage::Level4,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        match self {
            LevelModule::Deduction(_) | LevelModule::TimedChoice(_) => InputMode::Choice,
            LevelModule::Reorder(_) => InputMode::Reorder,
            LevelModule::FillBlank(_) => InputMode::Text,
        }
    }

    /// Route a player command. Commands the puzzle has no use for are `Pending`.
    pub fn handle(&mut self, cmd: Command) -> Verdict {
        match (self, cmd) {
            (LevelModule::Deduction(level), Command::Cursor(dir)) => {
                level.move_cursor(dir);
                Verdict::Pending
            }
            (LevelModule::Deduction(level), Command::Confirm) => level.choose_current(),
            (LevelModule::Deduction(level), Command::Choose(i)) => level.choose(usize::from(i)),

            (LevelModule::Reorder(level), Command::Cursor(dir)) => {
                level.move_selection(dir);
                Verdict::Pending
            }
            (LevelModule::Reorder(level), Command::Shift(dir)) => level.shift_selected(dir),
            (LevelModule::Reorder(level), Command::Confirm) => level.evaluate(),

            (LevelModule::TimedChoice(level), Command::Cursor(dir)) => {
                level.move_cursor(dir);
                Verdict::Pending
            }
            (LevelModule::TimedChoice(level), Command::Confirm) => level.choose_current(),
            (LevelModule::TimedChoice(level), Command::Choose(i)) => level.choose(usize::from(i)),

            (LevelModule::FillBlank(level), Command::Char(c)) => {
                level.push_char(c);
                Verdict::Pending
            }
            (LevelModule::FillBlank(level), Command::Backspace) => {
                level.backspace();
                Verdict::Pending
            }
            (LevelModule::FillBlank(level), Command::Confirm) => level.submit(),

            _ => Verdict::Pending,
        }
    }

    /// Fixed-timestep tick. Only the timed level has anything scheduled.
    pub fn tick(&mut self, bonus: bool) -> Verdict {
        match self {
            LevelModule::TimedChoice(level) => level.tick(bonus),
            _ => Verdict::Pending,
        }
    }

    /// Cancel anything scheduled before the module is dropped.
    pub fn teardown(&mut self) {
        if let LevelModule::TimedChoice(level) = self {
            level.teardown();
        }
    }

    pub fn fill_blank_mut(&mut self) -> Option<&mut FillBlank> {
        match self {
            LevelModule::FillBlank(level) => Some(level),
            _ => None,
        }
    }
}
