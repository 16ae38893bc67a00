// Integration tests - scroll choreography through the whole app: the
// observer, the state machines and the renderer-facing params.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use termfolio::anim::AnimState;
use termfolio::app::{ids, App, Phase};
use termfolio::config::{BootConfig, Config};
use termfolio::content::Section;
use termfolio::services::mail_relay::MailRelay;
use termfolio::services::tip_flag::TipFlags;

struct NullRelay;
impl MailRelay for NullRelay {
    fn send(&self, _message: &termfolio::contact::ContactMessage) -> anyhow::Result<()> {
        Ok(())
    }
}

fn app() -> App {
    let config = Config {
        boot: BootConfig {
            hold_ticks: 0,
            skip: true,
        },
        ..Default::default()
    };
    App::new(config, Arc::new(NullRelay), TipFlags::load(None), 100, 40)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn settle(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.on_clock_tick();
    }
}

#[test]
fn test_boot_runs_then_page_appears() {
    let config = Config {
        boot: BootConfig {
            hold_ticks: 10,
            skip: false,
        },
        ..Default::default()
    };
    let mut app = App::new(config, Arc::new(NullRelay), TipFlags::load(None), 100, 40);
    assert_eq!(app.phase(), Phase::Boot);
    settle(&mut app, 5);
    assert_eq!(app.phase(), Phase::Boot);
    settle(&mut app, 10);
    assert_eq!(app.phase(), Phase::Page);
    // Nothing entered while the boot screen was up; the hero entrance plays
    // only now.
    settle(&mut app, 2);
    let state = app.stage.controller.state(ids::reveal(Section::Hero));
    assert!(
        matches!(state, Some(AnimState::Entering | AnimState::Active)),
        "hero must start entering after boot, was {:?}",
        state
    );
}

#[test]
fn test_scrolling_away_and_back_replays_entrance() {
    let mut app = app();
    settle(&mut app, 40);
    let about = ids::reveal(Section::About);

    // Scroll to the about section and let it reveal.
    press(&mut app, KeyCode::Char('a'));
    settle(&mut app, 100);
    assert_eq!(app.stage.controller.state(about), Some(AnimState::Active));

    // Back to the top: the section exits and resets to Idle.
    press(&mut app, KeyCode::Char('h'));
    settle(&mut app, 100);
    assert_eq!(app.stage.controller.state(about), Some(AnimState::Idle));

    // Scroll down again: the entrance replays instead of being one-shot.
    press(&mut app, KeyCode::Char('a'));
    let mut saw_entering = false;
    for _ in 0..100 {
        app.on_clock_tick();
        if app.stage.controller.state(about) == Some(AnimState::Entering) {
            saw_entering = true;
        }
    }
    assert!(saw_entering, "reveal must replay its entrance on re-entry");
    assert_eq!(app.stage.controller.state(about), Some(AnimState::Active));
}

#[test]
fn test_scroll_progress_tracks_position() {
    let mut app = app();
    settle(&mut app, 10);
    assert_eq!(app.stage.scroll.progress(), 0.0);

    press(&mut app, KeyCode::Char('G'));
    settle(&mut app, 300);
    assert_eq!(app.stage.scroll.progress(), 1.0);

    press(&mut app, KeyCode::Char('g'));
    settle(&mut app, 300);
    assert_eq!(app.stage.scroll.progress(), 0.0);
}

#[test]
fn test_backgrounds_are_always_live_on_page() {
    let mut app = app();
    settle(&mut app, 40);
    for id in [ids::RAIN, ids::FLOAT, ids::CIRCUIT] {
        assert_eq!(
            app.stage.controller.state(id),
            Some(AnimState::Active),
            "background {:?} must loop while the page is up",
            id
        );
    }
    // Scrolling anywhere keeps them active; their region is the whole page.
    press(&mut app, KeyCode::Char('c'));
    settle(&mut app, 200);
    for id in [ids::RAIN, ids::FLOAT, ids::CIRCUIT] {
        assert_eq!(app.stage.controller.state(id), Some(AnimState::Active));
    }
}

#[test]
fn test_console_goto_scrolls_page() {
    let mut app = app();
    settle(&mut app, 10);
    app.handle_key(KeyEvent::new(KeyCode::Char('`'), KeyModifiers::CONTROL));
    for c in "goto contact".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);
    settle(&mut app, 300);
    let max_offset = app.stage.layout.doc_height - app.stage.scroll.viewport_rows();
    let expected = app.stage.layout.top_of(Section::Contact).min(max_offset);
    assert_eq!(app.stage.scroll.offset_rows(), expected);
    assert!(app.stage.scroll.offset_rows() > 0);
}
