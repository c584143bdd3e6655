//! Lexicon Expedition terminal runner (default binary).
//!
//! Fixed-timestep loop: keys are mapped to commands for the current input
//! mode, the director advances every `TICK_MS`, and the frame is diffed onto
//! the terminal. Configuration comes from `LEXICON_*` environment variables.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use lexicon_expedition::core::{GameSession, SessionSnapshot};
use lexicon_expedition::engine::Director;
use lexicon_expedition::input::{map_key, should_quit};
use lexicon_expedition::term::{
    FlashState, Frame, FrameBuffer, GameView, TerminalRenderer, Viewport,
};
use lexicon_expedition::types::{Effect, TICK_MS};
use lexicon_expedition::{logging, AppConfig, CommandSpeech};

fn main() -> Result<()> {
    let (config, rejected) = AppConfig::from_env();
    if let Some(path) = &config.log_path {
        logging::init_file(path)?;
    }
    for err in &rejected {
        tracing::warn!(%err, "using default");
    }
    tracing::info!(?config, "starting");

    let persistence = config.open_persistence()?;
    let session = GameSession::new(persistence);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(%err, "exited with error");
    }
    result
}

fn run(term: &mut TerminalRenderer, session: GameSession, config: &AppConfig) -> Result<()> {
    let (tx, effects) = mpsc::channel::<Effect>();
    let speech = CommandSpeech::new(config.speech_cmd.clone());
    let mut director = Director::new(session, speech, tx).with_transition_ms(config.transition_ms);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();
    let mut flash = FlashState::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));

    loop {
        // Render.
        for effect in effects.try_iter() {
            tracing::debug!(?effect, "effect");
            flash.push(effect);
        }
        director.snapshot_into(&mut snap);
        let frame = Frame {
            snapshot: &snap,
            level: director.level(),
            panel_open: director.panel().is_open(),
            cinematic_percent: director.cinematic_percent(),
            flash: flash.current(),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&frame, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    let mode = director.input_mode();
                    if should_quit(mode, key) {
                        tracing::info!(score = snap.score, "quit");
                        return Ok(());
                    }
                    if let Some(cmd) = map_key(mode, key) {
                        director.handle(cmd);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            director.tick(TICK_MS);
            flash.tick(TICK_MS);
        }
    }
}
