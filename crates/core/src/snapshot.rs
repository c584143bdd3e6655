use crate::types::{Stage, MAX_LIVES};

/// Everything the presentation layer may observe about a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub stage: Stage,
    pub pending: Option<Stage>,
    pub score: u32,
    pub high_score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub bonus_mode: bool,
    pub lives: u8,
    pub override_mode: bool,
    pub has_save: bool,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.stage = Stage::Menu;
        self.pending = None;
        self.score = 0;
        self.high_score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.bonus_mode = false;
        self.lives = MAX_LIVES;
        self.override_mode = false;
        self.has_save = false;
    }

    /// "Traveling to" label for the cinematic.
    pub fn destination_label(&self) -> &'static str {
        match self.pending {
            Some(stage) => stage.destination_label(),
            None => Stage::Menu.destination_label(),
        }
    }

    /// The score/lives HUD is hidden on the menu, during the cinematic and on victory.
    pub fn shows_hud(&self) -> bool {
        !matches!(
            self.stage,
            Stage::Menu | Stage::Transitioning | Stage::Victory
        )
    }

    /// The combo badge appears from the second consecutive correct answer.
    pub fn shows_combo(&self) -> bool {
        self.combo > 1
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        let mut s = Self {
            stage: Stage::Menu,
            pending: None,
            score: 0,
            high_score: 0,
            combo: 0,
            max_combo: 0,
            bonus_mode: false,
            lives: 0,
            override_mode: false,
            has_save: false,
        };
        s.clear();
        s
    }
}
