use lexicon_expedition::core::levels::LevelModule;
use lexicon_expedition::core::{GameSession, NoSpeech, Persistence, SessionSnapshot};
use lexicon_expedition::engine::Director;
use lexicon_expedition::term::{Frame, GameView, Viewport};
use lexicon_expedition::types::{Command, Effect, Stage};

fn frame_of<'a>(
    snap: &'a SessionSnapshot,
    d: &'a Director<NoSpeech, Vec<Effect>>,
) -> Frame<'a> {
    Frame {
        snapshot: snap,
        level: d.level(),
        panel_open: d.panel().is_open(),
        cinematic_percent: d.cinematic_percent(),
        flash: None,
    }
}

fn director() -> Director<NoSpeech, Vec<Effect>> {
    Director::new(GameSession::new(Persistence::in_memory()), NoSpeech, Vec::new())
}

#[test]
fn term_view_renders_border_corners() {
    let snap = SessionSnapshot::default();
    let fb = GameView::default().render(&Frame::new(&snap), Viewport::new(40, 20));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(39, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 19).unwrap().ch, '└');
    assert_eq!(fb.get(39, 19).unwrap().ch, '┘');
}

#[test]
fn menu_hides_hud_and_offers_continue_only_with_a_save() {
    let mut snap = SessionSnapshot::default();
    let view = GameView::default();
    let fb = view.render(&Frame::new(&snap), Viewport::new(80, 24));
    assert!(fb.contains_text("The Lexicon Expedition"));
    assert!(!fb.contains_text("SCORE"));
    assert!(fb.contains_text("no saved expedition"));

    snap.has_save = true;
    let fb = view.render(&Frame::new(&snap), Viewport::new(80, 24));
    assert!(fb.contains_text("[C] Continue expedition"));
}

#[test]
fn level_screens_follow_the_director() {
    let mut d = director();
    d.handle(Command::NewGame);
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    let snap = d.snapshot();
    let fb = view.render(&frame_of(&snap, &d), vp);
    assert!(fb.contains_text("SCORE 0"));
    assert!(fb.contains_text("Rusty Cutlass"));
    assert!(fb.contains_text("♥ ♥ ♥"));

    d.handle(Command::Choose(0));
    let snap = d.snapshot();
    let fb = view.render(&frame_of(&snap, &d), vp);
    assert!(fb.contains_text("♥ ♥ ♡"));
    assert!(fb.contains_text("Think about the clues!"));

    // Panel commands mean nothing until the panel is open.
    d.handle(Command::PanelSelectLevel(4));
    assert_eq!(d.session().stage(), Stage::Level1);

    for _ in 0..3 {
        d.handle(Command::PanelTap);
    }
    d.handle(Command::PanelSelectLevel(4));
    assert!(matches!(d.level(), Some(LevelModule::FillBlank(_))));
    for c in "had".chars() {
        d.handle(Command::Char(c));
    }
    let snap = d.snapshot();
    let fb = view.render(&frame_of(&snap, &d), vp);
    assert!(fb.contains_text("If I"));
    assert!(fb.contains_text("had"));
    assert!(fb.contains_text("(have)"));
}

#[test]
fn panel_overlay_shows_override_state() {
    let mut d = director();
    for _ in 0..3 {
        d.handle(Command::PanelTap);
    }
    d.handle(Command::PanelToggleOverride);

    let snap = d.snapshot();
    let fb = GameView::default().render(&frame_of(&snap, &d), Viewport::new(80, 24));
    assert!(fb.contains_text("Teacher Dashboard"));
    assert!(fb.contains_text("God mode (no life loss): ON"));
}

#[test]
fn cinematic_shows_destination() {
    let mut snap = SessionSnapshot::default();
    snap.stage = Stage::Transitioning;
    snap.pending = Some(Stage::Level3);
    let frame = Frame {
        cinematic_percent: 50,
        ..Frame::new(&snap)
    };
    let fb = GameView::default().render(&frame, Viewport::new(80, 24));
    assert!(fb.contains_text("TRAVELING TO"));
    assert!(fb.contains_text("CARGO PLANE"));
}

#[test]
fn tiny_viewports_do_not_panic() {
    let mut d = director();
    d.handle(Command::NewGame);
    let snap = d.snapshot();
    let view = GameView::default();
    for (w, h) in [(0, 0), (1, 1), (5, 3), (12, 4), (30, 8)] {
        let fb = view.render(&frame_of(&snap, &d), Viewport::new(w, h));
        assert_eq!((fb.width(), fb.height()), (w, h));
    }
}
