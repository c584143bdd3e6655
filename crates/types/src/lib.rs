//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the expedition.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (session logic, level modules, terminal rendering, persistence).
//!
//! # Stages
//!
//! The game is a linear run through four puzzle levels:
//!
//! | Stage | Persisted name | Puzzle | Points |
//! |-------|----------------|--------|--------|
//! | `Level1` | `LEVEL_1_AUCTION` | Deduction (pick the stolen artifact) | 100 |
//! | `Level2` | `LEVEL_2_CRYPT` | Reordering (passive voice stones) | 150 |
//! | `Level3` | `LEVEL_3_PLANE` | Timed choice (phrasal verbs) | 200 |
//! | `Level4` | `LEVEL_4_SHIPS` | Fill-in-blank (second conditional) | 500 |
//!
//! `Menu`, `Transitioning`, `Victory` and `GameOver` frame the run.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed timestep interval |
//! | `TRANSITION_MS` | 3100 | Cinematic interstitial length |
//! | `TEACHER_TAP_WINDOW_MS` | 1000 | Window for the hidden triple tap |
//!
//! # Countdown
//!
//! The timed-choice level counts down from `COUNTDOWN_FULL` by
//! `COUNTDOWN_STEP` per tick (10 seconds at the default tick). Bonus mode
//! doubles the step.
//!
//! # Examples
//!
//! ```
//! use lexicon_types::{Stage, MAX_LIVES};
//!
//! // Parse a persisted stage name
//! let stage = Stage::from_str("LEVEL_3_PLANE").unwrap();
//! assert_eq!(stage, Stage::Level3);
//! assert!(stage.is_level());
//!
//! // Walk the run
//! assert_eq!(Stage::Level3.next_after(), Some(Stage::Level4));
//! assert_eq!(Stage::Level4.next_after(), Some(Stage::Victory));
//!
//! assert_eq!(Stage::Level4.points(), 500);
//! assert_eq!(MAX_LIVES, 3);
//! ```

/// Lives at the start of a run (and the maximum)
pub const MAX_LIVES: u8 = 3;

/// Combo streak at which bonus (adrenaline) mode engages
pub const BONUS_COMBO_THRESHOLD: u32 = 3;

/// Score multiplier while bonus mode is active
pub const BONUS_MULTIPLIER: u32 = 2;

/// Fixed timestep interval in milliseconds
pub const TICK_MS: u32 = 50;

/// Cinematic interstitial length in milliseconds
pub const TRANSITION_MS: u32 = 3100;

/// Full countdown value for a timed-choice question
pub const COUNTDOWN_FULL: u32 = 1000;

/// Countdown decrement per tick outside bonus mode
pub const COUNTDOWN_STEP: u32 = 5;

/// Presses of the panel key needed to open the teacher dashboard
pub const TEACHER_TAP_COUNT: u8 = 3;

/// Window in which the teacher taps must land (milliseconds)
pub const TEACHER_TAP_WINDOW_MS: u32 = 1000;

/// Blob store key holding the checkpoint JSON
pub const CHECKPOINT_KEY: &str = "checkpoint";

/// Blob store key holding the stringified high score
pub const HIGH_SCORE_KEY: &str = "highScore";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuning_defaults() {
        assert_eq!(MAX_LIVES, 3);
        assert_eq!(BONUS_COMBO_THRESHOLD, 3);
        assert_eq!(BONUS_MULTIPLIER, 2);
        // 10 seconds per question at the default tick.
        assert_eq!(COUNTDOWN_FULL / COUNTDOWN_STEP * TICK_MS, 10_000);
    }

    #[test]
    fn stage_names_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_str(stage.as_str()), Some(stage));
        }
        assert_eq!(Stage::from_str("CINEMATIC_INTRO"), None);
    }

    #[test]
    fn level_order() {
        assert_eq!(Stage::level(1), Some(Stage::Level1));
        assert_eq!(Stage::level(4), Some(Stage::Level4));
        assert_eq!(Stage::level(5), None);
        assert_eq!(Stage::Level2.level_number(), Some(2));
        assert_eq!(Stage::Victory.level_number(), None);
        assert_eq!(Stage::Menu.next_after(), None);
    }

    #[test]
    fn destination_labels() {
        assert_eq!(Stage::Level2.destination_label(), "THE CRYPT");
        assert_eq!(Stage::Victory.destination_label(), "FINAL EXTRACTION");
        assert_eq!(Stage::Level1.destination_label(), "NEXT LOCATION");
    }
}

/// Progression stages of a session
///
/// Exactly one stage is current at any time. `Transitioning` is the cinematic
/// interstitial between leaving one stage and entering the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    #[default]
    Menu,
    Transitioning,
    Level1,
    Level2,
    Level3,
    Level4,
    Victory,
    GameOver,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Menu,
        Stage::Transitioning,
        Stage::Level1,
        Stage::Level2,
        Stage::Level3,
        Stage::Level4,
        Stage::Victory,
        Stage::GameOver,
    ];

    pub const LEVELS: [Stage; 4] = [Stage::Level1, Stage::Level2, Stage::Level3, Stage::Level4];

    /// Parse a stage from its persisted name (exact match)
    ///
    /// # Examples
    ///
    /// ```
    /// use lexicon_types::Stage;
    ///
    /// assert_eq!(Stage::from_str("LEVEL_1_AUCTION"), Some(Stage::Level1));
    /// assert_eq!(Stage::from_str("VICTORY"), Some(Stage::Victory));
    /// assert_eq!(Stage::from_str("level_1_auction"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "MENU" => Some(Stage::Menu),
            "TRANSITION" => Some(Stage::Transitioning),
            "LEVEL_1_AUCTION" => Some(Stage::Level1),
            "LEVEL_2_CRYPT" => Some(Stage::Level2),
            "LEVEL_3_PLANE" => Some(Stage::Level3),
            "LEVEL_4_SHIPS" => Some(Stage::Level4),
            "VICTORY" => Some(Stage::Victory),
            "GAME_OVER" => Some(Stage::GameOver),
            _ => None,
        }
    }

    /// Persisted name of the stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Menu => "MENU",
            Stage::Transitioning => "TRANSITION",
            Stage::Level1 => "LEVEL_1_AUCTION",
            Stage::Level2 => "LEVEL_2_CRYPT",
            Stage::Level3 => "LEVEL_3_PLANE",
            Stage::Level4 => "LEVEL_4_SHIPS",
            Stage::Victory => "VICTORY",
            Stage::GameOver => "GAME_OVER",
        }
    }

    /// Level stage by 1-based number
    pub fn level(number: u8) -> Option<Self> {
        match number {
            1 => Some(Stage::Level1),
            2 => Some(Stage::Level2),
            3 => Some(Stage::Level3),
            4 => Some(Stage::Level4),
            _ => None,
        }
    }

    pub fn level_number(&self) -> Option<u8> {
        match self {
            Stage::Level1 => Some(1),
            Stage::Level2 => Some(2),
            Stage::Level3 => Some(3),
            Stage::Level4 => Some(4),
            _ => None,
        }
    }

    pub fn is_level(&self) -> bool {
        self.level_number().is_some()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Victory | Stage::GameOver)
    }

    /// Where a cleared level leads (the next level, or `Victory` after the last one)
    pub fn next_after(&self) -> Option<Self> {
        match self {
            Stage::Level1 => Some(Stage::Level2),
            Stage::Level2 => Some(Stage::Level3),
            Stage::Level3 => Some(Stage::Level4),
            Stage::Level4 => Some(Stage::Victory),
            _ => None,
        }
    }

    /// Base points awarded for a correct answer on this level
    pub fn points(&self) -> u32 {
        match self {
            Stage::Level1 => 100,
            Stage::Level2 => 150,
            Stage::Level3 => 200,
            Stage::Level4 => 500,
            _ => 0,
        }
    }

    /// Presentation delay between a level's final correct answer and its transition request
    pub fn success_delay_ms(&self) -> u32 {
        match self {
            Stage::Level1 | Stage::Level3 => 1000,
            Stage::Level2 | Stage::Level4 => 2000,
            _ => 0,
        }
    }

    /// Level title shown in the level header and the teacher dashboard
    pub fn title(&self) -> &'static str {
        match self {
            Stage::Menu => "Main Menu",
            Stage::Transitioning => "In Transit",
            Stage::Level1 => "The Auction Heist",
            Stage::Level2 => "The Crypt Puzzle",
            Stage::Level3 => "Cargo Plane",
            Stage::Level4 => "Second Conditional Cannon",
            Stage::Victory => "Mission Accomplished!",
            Stage::GameOver => "Expedition Failed",
        }
    }

    /// "Traveling to" label shown during the cinematic
    pub fn destination_label(&self) -> &'static str {
        match self {
            Stage::Level2 => "THE CRYPT",
            Stage::Level3 => "CARGO PLANE",
            Stage::Level4 => "PIRATE FLEET",
            Stage::Victory => "FINAL EXTRACTION",
            _ => "NEXT LOCATION",
        }
    }
}

/// Vertical direction for cursors and reordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Player and operator commands
///
/// Produced by the input layer and consumed by the engine. Which commands are
/// meaningful depends on the current stage; the rest are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Menu: start a fresh run
    NewGame,
    /// Menu: continue from the saved checkpoint
    Resume,
    /// Move the selection cursor
    Cursor(Direction),
    /// Choose the option under the cursor / submit typed text
    Confirm,
    /// Choose an option by 0-based index
    Choose(u8),
    /// Reordering: move the selected segment one slot
    Shift(Direction),
    /// Text entry: append a character
    Char(char),
    /// Text entry: delete the last character
    Backspace,
    /// Text entry: start or stop voice input
    ToggleVoice,
    /// Cinematic: finish the interstitial now
    SkipCinematic,
    /// End screens: back to the menu
    PlayAgain,
    /// Hidden teacher panel key (opens after a triple tap)
    PanelTap,
    /// Teacher panel: jump straight to a level
    PanelSelectLevel(u8),
    /// Teacher panel: flip override (god) mode
    PanelToggleOverride,
    /// Teacher panel: reset class progress
    PanelReset,
    /// Teacher panel: close
    PanelClose,
}

impl Command {
    /// Short camelCase name (used in logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::NewGame => "newGame",
            Command::Resume => "resume",
            Command::Cursor(_) => "cursor",
            Command::Confirm => "confirm",
            Command::Choose(_) => "choose",
            Command::Shift(_) => "shift",
            Command::Char(_) => "char",
            Command::Backspace => "backspace",
            Command::ToggleVoice => "toggleVoice",
            Command::SkipCinematic => "skipCinematic",
            Command::PlayAgain => "playAgain",
            Command::PanelTap => "panelTap",
            Command::PanelSelectLevel(_) => "panelSelectLevel",
            Command::PanelToggleOverride => "panelToggleOverride",
            Command::PanelReset => "panelReset",
            Command::PanelClose => "panelClose",
        }
    }
}

/// Abstract effect notifications for the presentation layer
///
/// The core never renders; it reports what happened and the host decides how
/// (particles, screen shake, a flashing border).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Correct answer, optionally anchored at an option slot
    Correct { slot: Option<u8> },
    /// Wrong answer or expired countdown
    Wrong,
    /// Bonus mode just engaged
    BonusStarted,
    /// The cinematic bars closed
    TransitionBurst,
    /// The run ended in victory
    Victory,
    /// The run ended with no lives left
    GameOver,
}

/// Which kind of input the current screen accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Menu,
    Choice,
    Reorder,
    Text,
    Cinematic,
    Finished,
    Panel,
}
