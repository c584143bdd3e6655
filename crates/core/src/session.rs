//! Session module - the progression state machine
//!
//! `GameSession` owns the current stage, the in-flight transition target, lives,
//! the score board and the persistence adapter. Transitions are two-phase:
//! [`GameSession::request_transition`] records intent and enters `Transitioning`;
//! [`GameSession::complete_transition`] arrives later (any latency, including zero)
//! from the presentation layer's animation-complete notification.
//!
//! Operations called from a stage where they do not apply are ignored and
//! report `false` / `None`; none of them fail.

use crate::persist::{Checkpoint, Persistence};
use crate::scoring::ScoreBoard;
use crate::snapshot::SessionSnapshot;
use crate::types::{Stage, MAX_LIVES};

/// Result of [`GameSession::record_life_loss`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLoss {
    /// Not on a level; nothing happened
    Ignored,
    /// Override mode absorbed the loss
    Suppressed,
    /// A life was lost and the run continues
    Lost { remaining: u8 },
    /// The last life was lost
    GameOver,
}

/// The single mutable aggregate of a running game
#[derive(Debug)]
pub struct GameSession {
    stage: Stage,
    pending: Option<Stage>,
    board: ScoreBoard,
    high_score: u32,
    lives: u8,
    override_mode: bool,
    /// Whether a resumable checkpoint is believed to exist.
    has_save: bool,
    persistence: Persistence,
}

impl GameSession {
    /// Create a session in the menu, reading the high score and checkpoint once.
    pub fn new(persistence: Persistence) -> Self {
        let high_score = persistence.read_high_score();
        let has_save = persistence.read_checkpoint().is_some();
        tracing::debug!(high_score, has_save, "session created");

        Self {
            stage: Stage::Menu,
            pending: None,
            board: ScoreBoard::new(),
            high_score,
            lives: MAX_LIVES,
            override_mode: false,
            has_save,
            persistence,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn pending(&self) -> Option<Stage> {
        self.pending
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn combo(&self) -> u32 {
        self.board.combo()
    }

    pub fn max_combo(&self) -> u32 {
        self.board.max_combo()
    }

    pub fn bonus_mode(&self) -> bool {
        self.board.bonus_mode()
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn override_mode(&self) -> bool {
        self.override_mode
    }

    pub fn has_save(&self) -> bool {
        self.has_save
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.stage = self.stage;
        out.pending = self.pending;
        out.score = self.board.score();
        out.high_score = self.high_score;
        out.combo = self.board.combo();
        out.max_combo = self.board.max_combo();
        out.bonus_mode = self.board.bonus_mode();
        out.lives = self.lives;
        out.override_mode = self.override_mode;
        out.has_save = self.has_save;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a fresh run on level 1 (menu only).
    pub fn start_new_game(&mut self) -> bool {
        if self.stage != Stage::Menu {
            tracing::debug!(stage = self.stage.as_str(), "new game ignored outside menu");
            return false;
        }

        self.board.reset_run();
        self.lives = MAX_LIVES;
        self.pending = None;
        self.enter_level(Stage::Level1);
        tracing::info!("new game started");
        true
    }

    /// Continue from the stored checkpoint (menu only).
    ///
    /// Combo and bonus mode never carry across a resume.
    pub fn resume_game(&mut self) -> bool {
        if self.stage != Stage::Menu {
            return false;
        }

        let Some(checkpoint) = self.persistence.read_checkpoint() else {
            self.has_save = false;
            tracing::debug!("resume requested without a usable checkpoint");
            return false;
        };

        self.board.restore(checkpoint.score);
        self.lives = checkpoint.lives;
        self.pending = None;
        self.stage = checkpoint.stage;
        tracing::info!(
            stage = checkpoint.stage.as_str(),
            score = checkpoint.score,
            lives = checkpoint.lives,
            "resumed from checkpoint"
        );
        true
    }

    /// Leave the current level for `target` via the cinematic.
    ///
    /// Only valid on a level; a second request while transitioning is a no-op.
    pub fn request_transition(&mut self, target: Stage) -> bool {
        if !self.stage.is_level() {
            tracing::debug!(
                stage = self.stage.as_str(),
                target = target.as_str(),
                "transition request rejected"
            );
            return false;
        }

        self.pending = Some(target);
        self.stage = Stage::Transitioning;
        tracing::debug!(target = target.as_str(), "transition requested");
        true
    }

    /// Finish the cinematic and enter the pending stage (or the menu if none).
    ///
    /// Returns the stage entered, or `None` when not transitioning.
    pub fn complete_transition(&mut self) -> Option<Stage> {
        if self.stage != Stage::Transitioning {
            tracing::debug!(stage = self.stage.as_str(), "completion ignored");
            return None;
        }

        let target = self.pending.take().unwrap_or(Stage::Menu);
        match target {
            level if level.is_level() => self.enter_level(level),
            Stage::Victory => {
                self.bank_high_score();
                if let Err(err) = self.persistence.clear_checkpoint() {
                    tracing::warn!(%err, "failed to clear checkpoint");
                }
                self.has_save = false;
                self.stage = Stage::Victory;
                tracing::info!(score = self.board.score(), "expedition complete");
            }
            other => self.stage = other,
        }
        Some(self.stage)
    }

    /// Apply a wrong-answer life loss (levels only).
    ///
    /// The checkpoint is left alone on game over so the failed level can be resumed.
    /// Callers reset the combo before calling this; the game-over branch does not.
    pub fn record_life_loss(&mut self) -> LifeLoss {
        if !self.stage.is_level() {
            return LifeLoss::Ignored;
        }
        if self.override_mode {
            tracing::debug!("life loss suppressed by override mode");
            return LifeLoss::Suppressed;
        }

        let remaining = self.lives.saturating_sub(1);
        if remaining == 0 {
            self.lives = 0;
            self.bank_high_score();
            self.stage = Stage::GameOver;
            tracing::info!(score = self.board.score(), "game over");
            return LifeLoss::GameOver;
        }

        self.lives = remaining;
        self.board.reset_combo();
        tracing::debug!(remaining, "life lost");
        LifeLoss::Lost { remaining }
    }

    /// Back to the menu with default counters. Stored data is untouched.
    pub fn reset_game(&mut self) {
        self.stage = Stage::Menu;
        self.pending = None;
        self.board.reset_run();
        self.lives = MAX_LIVES;
        tracing::info!("session reset");
    }

    pub fn toggle_override_mode(&mut self) -> bool {
        self.override_mode = !self.override_mode;
        tracing::info!(enabled = self.override_mode, "override mode toggled");
        self.override_mode
    }

    /// Teacher level select: jump straight to a level from any stage.
    ///
    /// A run that already ran out of lives is refilled, so the level is playable
    /// and the checkpoint it writes stays resumable.
    pub fn select_level(&mut self, level: Stage) -> bool {
        if !level.is_level() {
            return false;
        }
        if self.lives == 0 {
            self.lives = MAX_LIVES;
        }
        self.pending = None;
        self.enter_level(level);
        tracing::info!(stage = level.as_str(), "level selected by teacher");
        true
    }

    /// Credit `points`, doubled in bonus mode. Returns the delta added.
    pub fn add_score(&mut self, points: u32) -> u32 {
        let delta = self.board.add_score(points);
        tracing::debug!(points, delta, score = self.board.score(), "score added");
        delta
    }

    /// Extend the streak. Returns `true` when bonus mode just engaged.
    pub fn increment_combo(&mut self) -> bool {
        let started = self.board.increment_combo();
        if started {
            tracing::debug!(combo = self.board.combo(), "bonus mode engaged");
        }
        started
    }

    pub fn reset_combo(&mut self) {
        self.board.reset_combo();
    }

    fn enter_level(&mut self, level: Stage) {
        let checkpoint = Checkpoint::new(level, self.board.score(), self.lives);
        match self.persistence.write_checkpoint(&checkpoint) {
            Ok(()) => self.has_save = true,
            Err(err) => tracing::warn!(%err, "failed to write checkpoint"),
        }
        self.board.reset_combo();
        self.stage = level;
        tracing::info!(stage = level.as_str(), "level entered");
    }

    fn bank_high_score(&mut self) {
        let score = self.board.score();
        self.high_score = self.high_score.max(score);
        if let Err(err) = self.persistence.write_high_score(self.high_score) {
            tracing::warn!(%err, "failed to write high score");
        }
    }
}
