//! Director - routes commands and ticks to the session and the active level
//!
//! The director is the only writer of the [`GameSession`]. Each call does one
//! thing and then re-syncs the active [`LevelModule`] with the session stage:
//!
//! - **Commands** go to the teacher panel (when open), the menu, the cinematic,
//!   the end screens, or the active level.
//! - **Ticks** advance the clock, the cinematic, a scheduled post-success
//!   transition, the level countdown and a pending speech attempt.
//! - **Verdicts** from the level are applied to the session in a fixed order
//!   (score, then combo; or combo reset, then life loss) and reported to the
//!   [`EffectsSink`].

use lexicon_core::levels::{LevelModule, VoiceState};
use lexicon_core::{
    EffectsSink, GameSession, LifeLoss, SessionSnapshot, SpeechInput, SpeechOutcome, Verdict,
};
use lexicon_types::{Command, Effect, InputMode, Stage, TRANSITION_MS};

use crate::panel::TeacherPanel;

/// A level-to-next request waiting out its success delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTransition {
    from: Stage,
    target: Stage,
    remaining_ms: u32,
}

pub struct Director<S, E> {
    session: GameSession,
    level: Option<LevelModule>,
    panel: TeacherPanel,
    speech: S,
    effects: E,
    scheduled: Option<ScheduledTransition>,
    cinematic_ms: u32,
    transition_ms: u32,
    clock_ms: u64,
}

impl<S: SpeechInput, E: EffectsSink> Director<S, E> {
    pub fn new(session: GameSession, speech: S, effects: E) -> Self {
        let mut director = Self {
            session,
            level: None,
            panel: TeacherPanel::new(),
            speech,
            effects,
            scheduled: None,
            cinematic_ms: 0,
            transition_ms: TRANSITION_MS,
            clock_ms: 0,
        };
        director.sync_level();
        director
    }

    /// Override the cinematic length (0 completes on the next tick).
    pub fn with_transition_ms(mut self, ms: u32) -> Self {
        self.transition_ms = ms;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn level(&self) -> Option<&LevelModule> {
        self.level.as_ref()
    }

    pub fn panel(&self) -> &TeacherPanel {
        &self.panel
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn transition_ms(&self) -> u32 {
        self.transition_ms
    }

    /// Cinematic progress in `0..=100`.
    pub fn cinematic_percent(&self) -> u32 {
        if self.transition_ms == 0 {
            return 100;
        }
        self.cinematic_ms.min(self.transition_ms) * 100 / self.transition_ms
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.session.snapshot_into(out);
    }

    /// Which kind of input the current screen accepts.
    pub fn input_mode(&self) -> InputMode {
        if self.panel.is_open() {
            return InputMode::Panel;
        }
        match self.session.stage() {
            Stage::Menu => InputMode::Menu,
            Stage::Transitioning => InputMode::Cinematic,
            Stage::Victory | Stage::GameOver => InputMode::Finished,
            _ => self
                .level
                .as_ref()
                .map(LevelModule::input_mode)
                .unwrap_or(InputMode::Choice),
        }
    }

    /// Apply one command. Returns `true` if anything handled it.
    pub fn handle(&mut self, cmd: Command) -> bool {
        tracing::trace!(cmd = cmd.as_str(), "command");
        let handled = if let Command::PanelTap = cmd {
            if self.panel.tap(self.clock_ms) {
                tracing::info!("teacher panel opened");
            }
            true
        } else if self.panel.is_open() {
            self.handle_panel(cmd)
        } else {
            self.handle_stage(cmd)
        };
        self.sync_level();
        handled
    }

    /// Presentation callback: the cinematic animation finished.
    pub fn on_transition_animation_complete(&mut self) {
        self.finish_cinematic();
        self.sync_level();
    }

    /// Advance by `elapsed_ms` of wall time.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.clock_ms = self.clock_ms.saturating_add(u64::from(elapsed_ms));

        if self.session.stage() == Stage::Transitioning {
            self.cinematic_ms = self.cinematic_ms.saturating_add(elapsed_ms);
            if self.cinematic_ms >= self.transition_ms {
                self.finish_cinematic();
            }
        }

        self.advance_schedule(elapsed_ms);

        let bonus = self.session.bonus_mode();
        if !self.panel.is_open() {
            if let Some(level) = self.level.as_mut() {
                let verdict = level.tick(bonus);
                self.apply_verdict(verdict);
            }
        }

        self.poll_speech();
        self.sync_level();
    }

    fn handle_panel(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::PanelSelectLevel(n) => {
                let Some(stage) = Stage::level(n) else {
                    return false;
                };
                self.session.select_level(stage);
                self.panel.close();
                // Same-stage selection still restarts the puzzle.
                self.replace_level();
                true
            }
            Command::PanelToggleOverride => {
                self.session.toggle_override_mode();
                true
            }
            Command::PanelReset => {
                self.session.reset_game();
                self.panel.close();
                true
            }
            Command::PanelClose => {
                self.panel.close();
                true
            }
            _ => false,
        }
    }

    fn handle_stage(&mut self, cmd: Command) -> bool {
        match (self.session.stage(), cmd) {
            (Stage::Menu, Command::NewGame) => self.session.start_new_game(),
            (Stage::Menu, Command::Resume) => self.session.resume_game(),
            (Stage::Transitioning, Command::SkipCinematic) => {
                self.finish_cinematic();
                true
            }
            (Stage::Victory | Stage::GameOver, Command::PlayAgain) => {
                self.session.reset_game();
                true
            }
            (stage, Command::ToggleVoice) if stage.is_level() => self.toggle_voice(),
            (stage, cmd) if stage.is_level() => {
                let Some(level) = self.level.as_mut() else {
                    return false;
                };
                let verdict = level.handle(cmd);
                self.apply_verdict(verdict);
                true
            }
            _ => false,
        }
    }

    fn apply_verdict(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Pending => {}
            Verdict::Correct {
                points,
                slot,
                cleared,
            } => {
                self.session.add_score(points);
                self.effects.emit(Effect::Correct { slot });
                if self.session.increment_combo() {
                    self.effects.emit(Effect::BonusStarted);
                }
                if cleared {
                    self.schedule_next();
                }
            }
            Verdict::Incorrect => {
                self.effects.emit(Effect::Wrong);
                self.session.reset_combo();
                if self.session.record_life_loss() == LifeLoss::GameOver {
                    self.effects.emit(Effect::GameOver);
                }
            }
        }
    }

    fn schedule_next(&mut self) {
        let from = self.session.stage();
        let Some(target) = from.next_after() else {
            return;
        };
        let delay = from.success_delay_ms();
        tracing::debug!(
            from = from.as_str(),
            target = target.as_str(),
            delay,
            "level cleared"
        );
        self.scheduled = Some(ScheduledTransition {
            from,
            target,
            remaining_ms: delay,
        });
        if delay == 0 {
            self.advance_schedule(0);
        }
    }

    fn advance_schedule(&mut self, elapsed_ms: u32) {
        let Some(mut scheduled) = self.scheduled.take() else {
            return;
        };
        if self.session.stage() != scheduled.from {
            tracing::debug!("scheduled transition dropped; stage moved on");
            return;
        }
        scheduled.remaining_ms = scheduled.remaining_ms.saturating_sub(elapsed_ms);
        if scheduled.remaining_ms > 0 {
            self.scheduled = Some(scheduled);
            return;
        }
        if self.session.request_transition(scheduled.target) {
            self.cinematic_ms = 0;
            self.effects.emit(Effect::TransitionBurst);
        }
    }

    fn finish_cinematic(&mut self) {
        self.cinematic_ms = 0;
        if self.session.complete_transition() == Some(Stage::Victory) {
            self.effects.emit(Effect::Victory);
        }
    }

    fn toggle_voice(&mut self) -> bool {
        let Some(field) = self.level.as_mut().and_then(LevelModule::fill_blank_mut) else {
            return false;
        };
        if field.voice() == &VoiceState::Listening {
            self.speech.cancel();
            field.stop_listening();
            tracing::debug!("voice input cancelled");
            return true;
        }
        match self.speech.start() {
            Ok(()) => {
                field.set_listening();
                tracing::debug!("voice input listening");
            }
            Err(err) => {
                tracing::debug!(%err, "voice input unavailable");
                field.apply_speech(SpeechOutcome::from(Err::<String, _>(err)));
            }
        }
        true
    }

    fn poll_speech(&mut self) {
        let Some(field) = self.level.as_mut().and_then(LevelModule::fill_blank_mut) else {
            return;
        };
        if field.voice() != &VoiceState::Listening {
            return;
        }
        if let Some(result) = self.speech.poll() {
            field.apply_speech(SpeechOutcome::from(result));
        }
    }

    /// Keep the active module in step with the session stage.
    fn sync_level(&mut self) {
        let stage = self.session.stage();
        let current = self.level.as_ref().map(LevelModule::stage);
        if current == Some(stage) || (current.is_none() && !stage.is_level()) {
            return;
        }
        self.replace_level();
    }

    fn replace_level(&mut self) {
        if let Some(mut old) = self.level.take() {
            if old
                .fill_blank_mut()
                .is_some_and(|f| f.voice() == &VoiceState::Listening)
            {
                self.speech.cancel();
            }
            old.teardown();
        }
        let stage = self.session.stage();
        if self.scheduled.is_some_and(|s| s.from != stage) {
            self.scheduled = None;
        }
        self.level = LevelModule::for_stage(stage);
        if self.level.is_some() {
            // A restarted puzzle never inherits a pending success.
            self.scheduled = None;
        }
    }
}
