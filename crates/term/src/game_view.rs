//! GameView: maps a session snapshot and the active level into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::borrow::Cow;

use crate::core::levels::content::{MENU_SUBTITLE, MENU_TITLE};
use crate::core::levels::{Deduction, FillBlank, LevelModule, Reorder, TimedChoice, VoiceState};
use crate::core::SessionSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Effect, Stage, MAX_LIVES};

const GOLD: Rgb = Rgb::new(212, 163, 115);
const CREAM: Rgb = Rgb::new(230, 220, 200);
const MUTED: Rgb = Rgb::new(130, 120, 105);
const RED: Rgb = Rgb::new(220, 70, 60);
const TEAL: Rgb = Rgb::new(80, 200, 190);
const SKY: Rgb = Rgb::new(140, 200, 240);
const WHITE: Rgb = Rgb::new(255, 255, 255);
const PANEL_BG: Rgb = Rgb::new(30, 41, 59);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame needs, borrowed from the engine.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub snapshot: &'a SessionSnapshot,
    pub level: Option<&'a LevelModule>,
    pub panel_open: bool,
    /// Cinematic progress in `0..=100`
    pub cinematic_percent: u32,
    pub flash: Option<Effect>,
}

impl<'a> Frame<'a> {
    pub fn new(snapshot: &'a SessionSnapshot) -> Self {
        Self {
            snapshot,
            level: None,
            panel_open: false,
            cinematic_percent: 0,
            flash: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Widest the content column grows on large terminals.
    max_content_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { max_content_w: 72 }
    }
}

impl GameView {
    pub fn new(max_content_w: u16) -> Self {
        Self { max_content_w }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, frame: &Frame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        fb.draw_box(0, 0, viewport.width, viewport.height, border_style(frame.flash));

        let snap = frame.snapshot;
        if snap.shows_hud() {
            self.draw_hud(fb, snap);
        }

        let top = 3;
        match snap.stage {
            Stage::Menu => self.draw_menu(fb, snap, top),
            Stage::Transitioning => self.draw_cinematic(fb, frame, top),
            Stage::Victory | Stage::GameOver => self.draw_ending(fb, snap, top),
            _ => match frame.level {
                Some(LevelModule::Deduction(level)) => self.draw_deduction(fb, level, top),
                Some(LevelModule::Reorder(level)) => self.draw_reorder(fb, level, top),
                Some(LevelModule::TimedChoice(level)) => self.draw_timed(fb, level, top),
                Some(LevelModule::FillBlank(level)) => self.draw_fill_blank(fb, level, top),
                None => {}
            },
        }

        if frame.panel_open {
            self.draw_panel(fb, snap);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &Frame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn content_x(&self, fb: &FrameBuffer) -> u16 {
        let w = fb.width().saturating_sub(4).min(self.max_content_w);
        fb.width().saturating_sub(w) / 2
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot) {
        let label = CellStyle::fg(MUTED);
        let value = CellStyle::fg(CREAM).bold();

        let mut x = fb.put_str(2, 1, "SCORE ", label);
        x = fb.put_u32(x, 1, snap.score, value);
        x = fb.put_str(x + 2, 1, "HI ", label);
        x = fb.put_u32(x, 1, snap.high_score, CellStyle::fg(CREAM));

        if snap.shows_combo() {
            let style = if snap.bonus_mode {
                CellStyle::fg(GOLD).bold()
            } else {
                CellStyle::fg(TEAL)
            };
            x = fb.put_str(x + 3, 1, "COMBO x", style);
            x = fb.put_u32(x, 1, snap.combo, style);
        }
        if snap.bonus_mode {
            x = fb.put_str(x + 2, 1, "ADRENALINE!", CellStyle::fg(RED).bold());
        }
        if snap.override_mode {
            fb.put_str(x + 2, 1, "GOD MODE", CellStyle::fg(TEAL).dim());
        }

        let hearts_x = fb.width().saturating_sub(2 + u16::from(MAX_LIVES) * 2);
        for i in 0..MAX_LIVES {
            let (ch, style) = if i < snap.lives {
                ('♥', CellStyle::fg(RED).bold())
            } else {
                ('♡', CellStyle::fg(MUTED).dim())
            };
            fb.put_char(hearts_x + u16::from(i) * 2, 1, ch, style);
        }
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, top: u16) {
        fb.put_str_centered(top + 1, MENU_TITLE, CellStyle::fg(GOLD).bold());
        fb.put_str_centered(top + 2, MENU_SUBTITLE, CellStyle::fg(CREAM));

        fb.put_str_centered(top + 5, "[N] Start new expedition", CellStyle::fg(WHITE).bold());
        if snap.has_save {
            fb.put_str_centered(top + 6, "[C] Continue expedition", CellStyle::fg(TEAL));
        } else {
            fb.put_str_centered(top + 6, "(no saved expedition)", CellStyle::fg(MUTED).dim());
        }

        if snap.high_score > 0 {
            let y = top + 8;
            let x = fb.width().saturating_sub(18) / 2;
            let x = fb.put_str(x, y, "High score: ", CellStyle::fg(MUTED));
            fb.put_u32(x, y, snap.high_score, CellStyle::fg(GOLD));
        }
        self.draw_keys(fb, "q quit");
    }

    fn draw_cinematic(&self, fb: &mut FrameBuffer, frame: &Frame<'_>, top: u16) {
        let mid = top.max(fb.height() / 2).saturating_sub(2);
        fb.put_str_centered(mid, "TRAVELING TO", CellStyle::fg(MUTED));
        fb.put_str_centered(
            mid + 2,
            frame.snapshot.destination_label(),
            CellStyle::fg(GOLD).bold(),
        );
        let bar_w = fb.width().saturating_sub(8).min(40);
        let x = fb.width().saturating_sub(bar_w) / 2;
        draw_bar(fb, x, mid + 4, bar_w, frame.cinematic_percent, CellStyle::fg(GOLD));
        self.draw_keys(fb, "Enter skip");
    }

    fn draw_ending(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, top: u16) {
        let won = snap.stage == Stage::Victory;
        let title_style = if won {
            CellStyle::fg(GOLD).bold()
        } else {
            CellStyle::fg(RED).bold()
        };
        fb.put_str_centered(top + 1, snap.stage.title(), title_style);

        let x = fb.width().saturating_sub(20) / 2;
        let rows: [(&str, u32); 3] = [
            ("Score", snap.score),
            ("High score", snap.high_score),
            ("Best combo", snap.max_combo),
        ];
        for (i, (label, value)) in rows.iter().enumerate() {
            let y = top + 4 + i as u16;
            fb.put_str(x, y, label, CellStyle::fg(MUTED));
            fb.put_u32(x + 13, y, *value, CellStyle::fg(CREAM).bold());
        }

        let again = if won { "[Enter] Play again" } else { "[Enter] Try again" };
        fb.put_str_centered(top + 9, again, CellStyle::fg(WHITE));
        self.draw_keys(fb, "q quit");
    }

    fn draw_deduction(&self, fb: &mut FrameBuffer, level: &Deduction, top: u16) {
        let x = self.content_x(fb);
        fb.put_str_centered(top, Stage::Level1.title(), CellStyle::fg(GOLD).bold());

        let mut y = top + 2;
        for clue in crate::core::levels::content::AUCTION_CLUES {
            fb.put_str(x, y, clue, CellStyle::fg(CREAM));
            y += 1;
        }

        y += 1;
        for (i, artifact) in level.artifacts().iter().enumerate() {
            let selected = i == level.cursor();
            let style = if level.is_solved() && artifact.correct {
                CellStyle::fg(GOLD).bold()
            } else if selected {
                CellStyle::fg(WHITE).bold()
            } else {
                CellStyle::fg(CREAM)
            };
            let cx = fb.put_str(x, y, if selected { "▶ " } else { "  " }, style);
            let cx = fb.put_u32(cx, y, i as u32 + 1, style.dim());
            fb.put_str(cx + 1, y, artifact.name, style);
            y += 1;
        }

        if let Some(hint) = level.hint() {
            fb.put_str(x, y + 1, hint, CellStyle::fg(RED));
        }
        self.draw_keys(fb, "↑/↓ select  Enter choose  1-3 pick");
    }

    fn draw_reorder(&self, fb: &mut FrameBuffer, level: &Reorder, top: u16) {
        fb.put_str_centered(top, Stage::Level2.title(), CellStyle::fg(GOLD).bold());
        fb.put_str_centered(
            top + 1,
            crate::core::levels::content::CRYPT_INSTRUCTION,
            CellStyle::fg(CREAM),
        );

        let stone_w: u16 = 28;
        let x = fb.width().saturating_sub(stone_w) / 2;
        for (i, stone) in level.order().iter().enumerate() {
            let y = top + 3 + i as u16 * 3;
            let selected = i == level.selected();
            let style = if level.is_solved() {
                CellStyle::fg(GOLD).bold()
            } else if selected {
                CellStyle::fg(WHITE).bold()
            } else {
                CellStyle::fg(MUTED)
            };
            fb.draw_box(x, y, stone_w, 3, style);
            let text_w = stone.chars().count() as u16;
            fb.put_str(x + (stone_w.saturating_sub(text_w)) / 2, y + 1, stone, style);
            if selected && !level.is_solved() {
                fb.put_char(x.saturating_sub(2), y + 1, '▶', style);
            }
        }

        if level.is_solved() {
            fb.put_str_centered(top + 13, "The stones lock into place!", CellStyle::fg(GOLD));
        }
        self.draw_keys(fb, "↑/↓ select  Shift+↑/↓ move stone");
    }

    fn draw_timed(&self, fb: &mut FrameBuffer, level: &TimedChoice, top: u16) {
        fb.put_str_centered(top, Stage::Level3.title(), CellStyle::fg(SKY).bold());

        let bar_w = fb.width().saturating_sub(8).min(48);
        let bar_x = fb.width().saturating_sub(bar_w) / 2;
        draw_bar(
            fb,
            bar_x,
            top + 2,
            bar_w,
            level.countdown().percent(),
            CellStyle::fg(RED),
        );

        let q = level.question();
        let y = top + 4;
        let x = fb.put_str(bar_x, y, "Question ", CellStyle::fg(MUTED));
        let x = fb.put_u32(x, y, level.question_index() as u32 + 1, CellStyle::fg(MUTED));
        let x = fb.put_str(x, y, "/", CellStyle::fg(MUTED));
        fb.put_u32(x, y, level.question_count() as u32, CellStyle::fg(MUTED));

        fb.put_str_centered(top + 6, q.text, CellStyle::fg(WHITE).bold());

        let slot_w: u16 = 10;
        let total = slot_w * q.options.len() as u16;
        let mut x = fb.width().saturating_sub(total) / 2;
        for (i, option) in q.options.iter().enumerate() {
            let selected = i == level.cursor() && !level.is_finished();
            let style = if selected {
                CellStyle::fg(WHITE).bold().on(Rgb::new(12, 74, 110))
            } else {
                CellStyle::fg(SKY)
            };
            let label_w = option.chars().count() as u16 + 2;
            let pad = slot_w.saturating_sub(label_w) / 2;
            fb.put_char(x + pad, top + 8, '[', style);
            fb.put_str(x + pad + 1, top + 8, option, style);
            fb.put_char(x + pad + label_w - 1, top + 8, ']', style);
            x += slot_w;
        }
        self.draw_keys(fb, "←/→ select  Enter answer  1-3 pick");
    }

    fn draw_fill_blank(&self, fb: &mut FrameBuffer, level: &FillBlank, top: u16) {
        fb.put_str_centered(top, Stage::Level4.title(), CellStyle::fg(GOLD).bold());
        fb.put_str_centered(
            top + 1,
            "Fill the breach to fire! (Type or Speak)",
            CellStyle::fg(MUTED),
        );

        let s = level.sentence();
        let field_w: u16 = 10;
        let before_w = s.before.chars().count() as u16;
        let after_w = (s.cue.chars().count() + s.after.chars().count()) as u16 + 2;
        let line_w = before_w + field_w + 2 + after_w;
        let y = top + 4;
        let mut x = fb.width().saturating_sub(line_w) / 2;

        x = fb.put_str(x, y, s.before, CellStyle::fg(WHITE));
        let field = CellStyle::fg(GOLD).bold().on(Rgb::new(40, 28, 20));
        fb.fill_rect(x + 1, y, field_w, 1, '_', field.dim());
        fb.put_str(x + 1, y, level.input(), field);
        x += field_w + 2;
        x = fb.put_str(x, y, s.cue, CellStyle::fg(MUTED));
        fb.put_str(x + 1, y, s.after, CellStyle::fg(WHITE));

        let voice_line = match level.voice() {
            VoiceState::Idle => Cow::Borrowed("Tab: speak your answer"),
            VoiceState::Listening => Cow::Borrowed("● listening..."),
            VoiceState::Unavailable => {
                Cow::Borrowed("Voice input is not supported here. Type instead.")
            }
            VoiceState::Failed(reason) => {
                Cow::Owned(format!("Voice input failed ({reason}). Type instead."))
            }
        };
        let voice_style = match level.voice() {
            VoiceState::Listening => CellStyle::fg(RED).bold(),
            VoiceState::Idle => CellStyle::fg(MUTED),
            _ => CellStyle::fg(RED),
        };
        fb.put_str_centered(top + 6, &voice_line, voice_style);

        if level.is_fired() {
            fb.put_str_centered(top + 8, "TARGET HIT!", CellStyle::fg(TEAL).bold());
        } else {
            fb.put_str_centered(top + 8, "[Enter] FIRE CANNON", CellStyle::fg(RED).bold());
        }
        self.draw_keys(fb, "type answer  Enter fire  Tab voice");
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot) {
        let w: u16 = 44;
        let h: u16 = 11;
        let x = fb.width().saturating_sub(w) / 2;
        let y = fb.height().saturating_sub(h) / 2;
        let body = CellStyle::fg(CREAM).on(PANEL_BG);

        fb.fill_rect(x, y, w, h, ' ', body);
        fb.draw_box(x, y, w, h, CellStyle::fg(GOLD).on(PANEL_BG));
        fb.put_str(x + 2, y + 1, "Teacher Dashboard", CellStyle::fg(GOLD).bold().on(PANEL_BG));

        fb.put_str(x + 2, y + 3, "[1-4] Level select", body);
        let cx = fb.put_str(x + 2, y + 4, "[O]   God mode (no life loss): ", body);
        if snap.override_mode {
            fb.put_str(cx, y + 4, "ON", CellStyle::fg(TEAL).bold().on(PANEL_BG));
        } else {
            fb.put_str(cx, y + 4, "OFF", body.dim());
        }
        fb.put_str(x + 2, y + 5, "[X]   Reset class progress", CellStyle::fg(RED).on(PANEL_BG));
        fb.put_str(x + 2, y + 7, "[Esc] Close", body);
    }

    fn draw_keys(&self, fb: &mut FrameBuffer, keys: &str) {
        let y = fb.height().saturating_sub(2);
        fb.put_str(2, y, keys, CellStyle::fg(MUTED).dim());
    }
}

fn border_style(flash: Option<Effect>) -> CellStyle {
    match flash {
        Some(Effect::Correct { .. }) | Some(Effect::Victory) => CellStyle::fg(GOLD).bold(),
        Some(Effect::Wrong) | Some(Effect::GameOver) => CellStyle::fg(RED).bold(),
        Some(Effect::BonusStarted) => CellStyle::fg(Rgb::new(255, 140, 0)).bold(),
        Some(Effect::TransitionBurst) => CellStyle::fg(WHITE).bold(),
        None => CellStyle::fg(Rgb::new(70, 60, 50)),
    }
}

/// Horizontal progress bar, `percent` clamped to 100.
fn draw_bar(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, percent: u32, style: CellStyle) {
    let filled = (u32::from(w) * percent.min(100) / 100) as u16;
    fb.fill_rect(x, y, filled, 1, '█', style);
    fb.fill_rect(x + filled, y, w - filled, 1, '░', CellStyle::fg(MUTED).dim());
}
