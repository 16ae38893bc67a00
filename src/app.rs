//! Application state and event handling: the page, its animated stage, the
//! overlays, and the boot sequence.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::anim::effects::particles::ParticleKind;
use crate::anim::effects::{
    EffectFamily, GlitchConfig, ParallaxConfig, ParticleConfig, RevealConfig, RevealKind,
    TypeConfig,
};
use crate::anim::{AnimationController, ElementId, RenderParams};
use crate::clock::{Clock, Tick};
use crate::config::Config;
use crate::console::{Console, ConsoleAction};
use crate::contact::{ContactForm, GENERIC_FAILURE};
use crate::content::{Section, PORTFOLIO};
use crate::scroll::ScrollState;
use crate::services::mail_relay::MailRelay;
use crate::services::tip_flag::TipFlags;
use crate::ui::sections::{PageLayout, SectionFx};
use crate::visibility::{Region, VisibilityObserver};

/// Well-known element ids. Decor elements from the config file are allocated
/// above `DECOR_BASE`.
pub mod ids {
    use crate::anim::ElementId;
    use crate::content::Section;

    pub const RAIN: ElementId = ElementId(1);
    pub const FLOAT: ElementId = ElementId(2);
    pub const CIRCUIT: ElementId = ElementId(3);
    pub const HERO_TYPER: ElementId = ElementId(10);
    pub const HERO_PARALLAX: ElementId = ElementId(11);
    pub const DECOR_BASE: u32 = 100;

    pub fn reveal(section: Section) -> ElementId {
        ElementId(20 + section as u32)
    }

    pub fn title(section: Section) -> ElementId {
        ElementId(30 + section as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Boot,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    None,
    Help,
    Console,
    ContactForm,
}

/// Startup loading screen state, advanced by the shared clock like any other
/// timed behavior.
#[derive(Debug, Clone)]
pub struct BootSequence {
    progress: f64,
    ticks: u64,
    hold_ticks: u64,
    done: bool,
    finished_at: Option<Tick>,
}

/// Ticks the scanner sweep takes to cross the screen after boot.
const SCANNER_TICKS: u64 = 40;

impl BootSequence {
    pub fn new(hold_ticks: u64, skip: bool) -> Self {
        Self {
            progress: if skip { 100.0 } else { 0.0 },
            ticks: 0,
            hold_ticks,
            done: skip,
            finished_at: None,
        }
    }

    /// Eased gauge: big steps at first, never stalling, capped at 99 until
    /// the hold time elapses.
    pub fn advance(&mut self, tick: Tick) {
        if self.done {
            return;
        }
        self.ticks += 1;
        let increment = ((100.0 - self.progress) * 0.1).max(0.5);
        self.progress = (self.progress + increment).min(99.0);
        if self.ticks >= self.hold_ticks {
            self.complete(tick);
        }
    }

    pub fn complete(&mut self, tick: Tick) {
        if !self.done {
            self.progress = 100.0;
            self.done = true;
            self.finished_at = Some(tick);
        }
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Row of the one-shot scanner sweep, while it is running.
    pub fn scanner_row(&self, tick: Tick, rows: u16) -> Option<u16> {
        let started = self.finished_at?;
        let elapsed = tick.saturating_sub(started);
        if elapsed >= SCANNER_TICKS || rows == 0 {
            return None;
        }
        Some(((rows as u64 * elapsed) / SCANNER_TICKS) as u16)
    }
}

/// Everything the shared clock drives. Split from [`App`] so tick handlers
/// can borrow it mutably while the clock stays outside.
pub struct Stage {
    pub scroll: ScrollState,
    pub observer: VisibilityObserver,
    pub controller: AnimationController,
    pub layout: PageLayout,
    pub boot: BootSequence,
    width: u16,
}

fn boot_handler(stage: &mut Stage, tick: Tick) -> Result<()> {
    stage.boot.advance(tick);
    Ok(())
}

fn scroll_handler(stage: &mut Stage, _tick: Tick) -> Result<()> {
    stage.scroll.tick();
    Ok(())
}

fn visibility_handler(stage: &mut Stage, _tick: Tick) -> Result<()> {
    // Elements stay Idle until the boot screen clears, so every entrance
    // plays once content is actually on screen.
    if !stage.boot.done() {
        return Ok(());
    }
    let events = stage
        .observer
        .update(stage.scroll.offset_rows(), stage.scroll.viewport_rows());
    for event in events {
        stage.controller.apply_visibility(event);
    }
    Ok(())
}

fn effects_handler(stage: &mut Stage, tick: Tick) -> Result<()> {
    let progress = stage.scroll.progress();
    stage.controller.advance(tick, progress);
    Ok(())
}

pub struct App {
    pub config: Config,
    pub stage: Stage,
    clock: Clock<Stage>,
    pub overlay: OverlayKind,
    pub console: Console,
    pub form: ContactForm,
    relay: Arc<dyn MailRelay>,
    outcome_tx: Sender<Result<(), String>>,
    outcome_rx: Receiver<Result<(), String>>,
    tips: TipFlags,
    tip_due: Option<Tick>,
    decor_ids: Vec<ElementId>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        relay: Arc<dyn MailRelay>,
        tips: TipFlags,
        width: u16,
        height: u16,
    ) -> App {
        let content_rows = content_rows(height);
        let layout = PageLayout::compute(width, content_rows);
        let mut stage = Stage {
            scroll: ScrollState::new(layout.doc_height, content_rows, config.scroll.speed),
            observer: VisibilityObserver::new(),
            controller: AnimationController::new(),
            layout,
            boot: BootSequence::new(config.boot.hold_ticks, config.boot.skip),
            width,
        };

        let decor = config.parse_decor();
        let decor_ids = mount_elements(&mut stage, &config, &decor);

        let mut clock = Clock::new();
        clock.on_tick(boot_handler);
        clock.on_tick(scroll_handler);
        clock.on_tick(visibility_handler);
        clock.on_tick(effects_handler);
        clock.start();

        let (outcome_tx, outcome_rx) = mpsc::channel();
        App {
            config,
            stage,
            clock,
            overlay: OverlayKind::None,
            console: Console::new(),
            form: ContactForm::new(),
            relay,
            outcome_tx,
            outcome_rx,
            tips,
            tip_due: None,
            decor_ids,
            should_quit: false,
        }
    }

    pub fn tick_ms(&self) -> u64 {
        self.config.tick_ms.max(1)
    }

    /// The tick the next clock advance will carry; effectively "now".
    pub fn tick(&self) -> Tick {
        self.clock.current()
    }

    pub fn phase(&self) -> Phase {
        if self.stage.boot.done() {
            Phase::Page
        } else {
            Phase::Boot
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn decor_ids(&self) -> &[ElementId] {
        &self.decor_ids
    }

    /// One shared clock tick: advances boot, scroll easing, visibility and
    /// every animation element, then app-level scheduling.
    pub fn on_clock_tick(&mut self) {
        self.clock.tick(&mut self.stage);
        let now = self.clock.current();

        // First-run shortcuts tip, ~3s after the page appears.
        if self.stage.boot.done() && !self.tips.seen_shortcuts_tip() && self.tip_due.is_none() {
            self.tip_due = Some(now + 3000 / self.tick_ms());
        }
        if let Some(due) = self.tip_due {
            if now >= due {
                self.tip_due = None;
                if self.overlay == OverlayKind::None && !self.tips.seen_shortcuts_tip() {
                    self.overlay = OverlayKind::Help;
                    self.mark_tip_seen();
                }
            }
        }
    }

    fn mark_tip_seen(&mut self) {
        if let Err(err) = self.tips.mark_shortcuts_tip_seen() {
            tracing::warn!("failed to persist shortcuts tip flag: {:#}", err);
        }
    }

    /// Drain relay outcomes posted by submission worker threads.
    pub fn process_async_messages(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.form.note_outcome(outcome);
            changed = true;
        }
        changed
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        let content_rows = content_rows(height);
        self.stage.width = width;
        self.stage.layout = PageLayout::compute(width, content_rows);
        self.stage
            .scroll
            .resize(self.stage.layout.doc_height, content_rows);
        remount_geometry(&mut self.stage, &self.config);
    }

    pub fn background_params(&self, id: ElementId) -> Option<&RenderParams> {
        self.stage.controller.params(id)
    }

    /// Resolve the animation inputs for one section's block.
    pub fn section_fx(&self, section: Section) -> SectionFx {
        let mut fx = SectionFx {
            tick: self.tick(),
            ..Default::default()
        };

        if let Some(params) = self.stage.controller.params(ids::reveal(section)) {
            fx.opacity = params.opacity;
            fx.dy = params.offset.dy;
            if let crate::anim::Content::Words { visible } = params.content {
                fx.visible_words = Some(visible);
            }
        }
        if section == Section::Hero {
            if let Some(params) = self.stage.controller.params(ids::HERO_PARALLAX) {
                fx.dy = fx.dy.saturating_add(params.offset.dy);
            }
            if let Some(params) = self.stage.controller.params(ids::HERO_TYPER) {
                if let crate::anim::Content::Text(text) = &params.content {
                    fx.typer_text = Some(text.clone());
                }
            }
        } else if let Some(params) = self.stage.controller.params(ids::title(section)) {
            if let crate::anim::Content::Text(text) = &params.content {
                fx.title_text = Some(text.clone());
            }
        }
        fx
    }

    fn goto(&mut self, section: Section) {
        self.stage.scroll.scroll_to(self.stage.layout.top_of(section));
    }

    fn submit_contact(&mut self) {
        let Some(message) = self.form.validate_for_submit() else {
            return;
        };
        let relay = Arc::clone(&self.relay);
        let outcome_tx = self.outcome_tx.clone();
        std::thread::spawn(move || {
            let outcome = relay.send(&message).map_err(|err| {
                tracing::error!("contact submission failed: {:#}", err);
                GENERIC_FAILURE.to_string()
            });
            let _ = outcome_tx.send(outcome);
        });
    }

    /// Route one key press. Returns true when the UI needs a repaint.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return true;
        }

        if self.phase() == Phase::Boot {
            return self.handle_boot_key(key);
        }
        match self.overlay {
            OverlayKind::Console => self.handle_console_key(key),
            OverlayKind::ContactForm => self.handle_form_key(key),
            OverlayKind::Help => self.handle_help_key(key),
            OverlayKind::None => self.handle_page_key(key),
        }
    }

    fn handle_boot_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.stage.boot.complete(self.tick());
                true
            }
            _ => false,
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('/') => {
                self.overlay = OverlayKind::None;
                true
            }
            _ => false,
        }
    }

    /// While the console input has focus, navigation shortcuts are plain
    /// characters.
    fn handle_console_key(&mut self, key: KeyEvent) -> bool {
        if is_console_toggle(&key) {
            self.overlay = OverlayKind::None;
            return true;
        }
        match key.code {
            KeyCode::Esc => {
                self.overlay = OverlayKind::None;
                true
            }
            KeyCode::Enter => {
                match self.console.submit() {
                    ConsoleAction::None => {}
                    ConsoleAction::Close => self.overlay = OverlayKind::None,
                    ConsoleAction::Goto(section) => self.goto(section),
                }
                true
            }
            KeyCode::Backspace => {
                self.console.backspace();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.console.insert_char(c);
                true
            }
            _ => false,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.overlay = OverlayKind::None;
                true
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_prev();
                true
            }
            KeyCode::Enter => {
                self.submit_contact();
                true
            }
            KeyCode::Backspace => {
                self.form.backspace();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.insert_char(c);
                true
            }
            _ => false,
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) -> bool {
        if is_console_toggle(&key) {
            self.overlay = OverlayKind::Console;
            return true;
        }
        let step = self.config.scroll.step;
        let page = self.stage.scroll.viewport_rows() as i32;
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('/') => {
                self.overlay = OverlayKind::Help;
                self.mark_tip_seen();
                true
            }
            KeyCode::Char('f') => {
                self.overlay = OverlayKind::ContactForm;
                true
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.stage.scroll.scroll_to(0);
                true
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.stage.scroll.scroll_to(usize::MAX / 2);
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.stage.scroll.scroll_by(-step);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.stage.scroll.scroll_by(step);
                true
            }
            KeyCode::PageUp => {
                self.stage.scroll.scroll_by(-page);
                true
            }
            KeyCode::PageDown => {
                self.stage.scroll.scroll_by(page);
                true
            }
            KeyCode::Char(c) => match Section::ALL.iter().find(|s| s.shortcut() == c) {
                Some(section) => {
                    self.goto(*section);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// Ctrl+` (or Ctrl+~) toggles the terminal overlay.
fn is_console_toggle(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('`') | KeyCode::Char('~'))
        && (key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::SUPER))
}

/// Rows left for page content after the progress bar and nav bar.
fn content_rows(height: u16) -> usize {
    height.saturating_sub(2).max(1) as usize
}

fn element_seed(base: u64, id: ElementId) -> u64 {
    base ^ (id.0 as u64).wrapping_mul(0x9e37_79b9)
}

/// Register an element and its region; a rejected registration (duplicate
/// id) is logged and skipped without touching its siblings.
fn mount(
    stage: &mut Stage,
    seed_base: u64,
    id: ElementId,
    family: EffectFamily,
    region: Region,
) {
    match stage
        .controller
        .register(id, family, element_seed(seed_base, id))
    {
        Ok(()) => stage.observer.observe(region),
        Err(err) => tracing::warn!("skipping element: {:#}", err),
    }
}

fn mount_elements(stage: &mut Stage, config: &Config, decor: &[EffectFamily]) -> Vec<ElementId> {
    let seed = config.effects.seed;
    let fx = &config.effects;
    let doc_height = stage.layout.doc_height;
    let full_page = move |id| Region::new(id, 0, doc_height, 0.0);
    let width = stage.width;
    let rows = stage.scroll.viewport_rows() as u16;

    // Fixed background layers span the whole document.
    mount(
        stage,
        seed,
        ids::RAIN,
        EffectFamily::ParticleLoop(ParticleConfig {
            kind: ParticleKind::Rain(fx.rain),
            cols: width,
            rows,
            fade_ticks: 8,
        }),
        full_page(ids::RAIN),
    );
    mount(
        stage,
        seed,
        ids::FLOAT,
        EffectFamily::ParticleLoop(ParticleConfig {
            kind: ParticleKind::Float(fx.float),
            cols: width,
            rows,
            fade_ticks: 8,
        }),
        full_page(ids::FLOAT),
    );
    mount(
        stage,
        seed,
        ids::CIRCUIT,
        EffectFamily::ParticleLoop(ParticleConfig {
            kind: ParticleKind::Circuit(fx.circuit),
            cols: width,
            rows,
            fade_ticks: 8,
        }),
        full_page(ids::CIRCUIT),
    );

    // Hero: staggered greeting, typewriter roles, parallax drift.
    let hero = stage.layout.slot(Section::Hero);
    let hero_region = |id| Region::new(id, hero.top, hero.height, 0.1);
    mount(
        stage,
        seed,
        ids::reveal(Section::Hero),
        EffectFamily::Reveal(RevealConfig {
            kind: RevealKind::FadeIn,
            enter_ticks: fx.reveal_ticks,
            exit_ticks: fx.reveal_exit_ticks,
            stagger_ticks: 1,
            tokens: PORTFOLIO.greeting.split_whitespace().count(),
            slide_rows: 0,
            policy: fx.reveal_policy,
            ..Default::default()
        }),
        hero_region(ids::reveal(Section::Hero)),
    );
    mount(
        stage,
        seed,
        ids::HERO_TYPER,
        EffectFamily::TerminalType(TypeConfig::new(
            PORTFOLIO.roles.iter().map(|r| r.to_string()).collect(),
        )),
        hero_region(ids::HERO_TYPER),
    );
    mount(
        stage,
        seed,
        ids::HERO_PARALLAX,
        EffectFamily::Parallax(ParallaxConfig {
            magnitude: fx.parallax_magnitude,
            ..Default::default()
        }),
        hero_region(ids::HERO_PARALLAX),
    );

    // Scroll sections: slide-up reveal plus a glitching title.
    for section in [
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ] {
        let slot = stage.layout.slot(section);
        mount(
            stage,
            seed,
            ids::reveal(section),
            EffectFamily::Reveal(RevealConfig {
                kind: RevealKind::SlideUp,
                enter_ticks: fx.reveal_ticks,
                exit_ticks: fx.reveal_exit_ticks,
                policy: fx.reveal_policy,
                ..Default::default()
            }),
            Region::new(ids::reveal(section), slot.top, slot.height, fx.section_threshold),
        );
        mount(
            stage,
            seed,
            ids::title(section),
            EffectFamily::Glitch(GlitchConfig::with_intensity(
                section.title(),
                fx.glitch_intensity,
            )),
            Region::new(ids::title(section), slot.top, slot.height, fx.section_threshold),
        );
    }

    // Extra decor from the config file.
    let mut decor_ids = Vec::with_capacity(decor.len());
    for (i, family) in decor.iter().enumerate() {
        let id = ElementId(ids::DECOR_BASE + i as u32);
        mount(stage, seed, id, family.clone(), full_page(id));
        decor_ids.push(id);
    }
    decor_ids
}

/// After a resize: refresh regions and the background field areas. Visibility
/// state is preserved so nothing replays just because the window changed.
fn remount_geometry(stage: &mut Stage, config: &Config) {
    let fx = &config.effects;
    let width = stage.width;
    let rows = stage.scroll.viewport_rows() as u16;

    for (id, kind) in [
        (ids::RAIN, ParticleKind::Rain(fx.rain)),
        (ids::FLOAT, ParticleKind::Float(fx.float)),
        (ids::CIRCUIT, ParticleKind::Circuit(fx.circuit)),
    ] {
        stage.controller.reconfigure(
            id,
            EffectFamily::ParticleLoop(ParticleConfig {
                kind,
                cols: width,
                rows,
                fade_ticks: 8,
            }),
        );
        stage
            .observer
            .observe(Region::new(id, 0, stage.layout.doc_height, 0.0));
    }

    let hero = stage.layout.slot(Section::Hero);
    for id in [ids::reveal(Section::Hero), ids::HERO_TYPER, ids::HERO_PARALLAX] {
        stage.observer.observe(Region::new(id, hero.top, hero.height, 0.1));
    }
    for section in [
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ] {
        let slot = stage.layout.slot(section);
        for id in [ids::reveal(section), ids::title(section)] {
            stage
                .observer
                .observe(Region::new(id, slot.top, slot.height, fx.section_threshold));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::SubmitStatus;

    struct NullRelay;
    impl MailRelay for NullRelay {
        fn send(&self, _message: &crate::contact::ContactMessage) -> Result<()> {
            Ok(())
        }
    }

    fn app() -> App {
        let config = Config {
            boot: crate::config::BootConfig {
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

    #[test]
    fn test_boot_skip_lands_on_page() {
        let app = app();
        assert_eq!(app.phase(), Phase::Page);
    }

    #[test]
    fn test_all_elements_mounted() {
        let app = app();
        // 3 backgrounds + hero (reveal, typer, parallax) + 4 sections x 2.
        assert_eq!(app.stage.controller.len(), 14);
    }

    #[test]
    fn test_hero_enters_after_boot() {
        let mut app = app();
        for _ in 0..30 {
            app.on_clock_tick();
        }
        let fx = app.section_fx(Section::Hero);
        assert!(fx.opacity > 0.99, "hero should be fully revealed");
        assert!(fx.typer_text.is_some());
    }

    #[test]
    fn test_section_shortcut_scrolls() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        for _ in 0..300 {
            app.on_clock_tick();
        }
        // A target near the end of the document clamps to the last page.
        let max_offset = app.stage.layout.doc_height - app.stage.scroll.viewport_rows();
        let expected = app.stage.layout.top_of(Section::Projects).min(max_offset);
        assert_eq!(app.stage.scroll.offset_rows(), expected);
        assert!(app.stage.scroll.offset_rows() > 0);
    }

    #[test]
    fn test_shortcuts_ignored_while_console_focused() {
        let mut app = app();
        app.overlay = OverlayKind::Console;
        press(&mut app, KeyCode::Char('p'));
        for _ in 0..300 {
            app.on_clock_tick();
        }
        assert_eq!(app.stage.scroll.offset_rows(), 0, "typing must not navigate");
        assert_eq!(app.console.input(), "p");
    }

    #[test]
    fn test_console_toggle_and_exit_command() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('`'), KeyModifiers::CONTROL));
        assert_eq!(app.overlay, OverlayKind::Console);
        for c in "exit".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, OverlayKind::None);
    }

    #[test]
    fn test_escape_closes_overlays() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.overlay, OverlayKind::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, OverlayKind::None);
    }

    #[test]
    fn test_invalid_form_never_reaches_relay() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Enter);
        // Validation failed locally: no submission in flight.
        assert_eq!(app.form.status, SubmitStatus::Editing);
        assert!(app.form.error(crate::contact::Field::Name).is_some());
    }

    #[test]
    fn test_valid_form_submits_and_reports() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        for c in "Sam".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        for c in "sam@example.com".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        for c in "Hi".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        for c in "Hello!".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.status, SubmitStatus::Submitting);

        // The NullRelay worker finishes quickly; wait for its message.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            if app.process_async_messages() {
                break;
            }
            assert!(std::time::Instant::now() < deadline, "relay never reported");
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(app.form.status, SubmitStatus::Sent);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_resize_keeps_element_count() {
        let mut app = app();
        let before = app.stage.controller.len();
        app.resize(60, 20);
        assert_eq!(app.stage.controller.len(), before);
        assert!(app.stage.layout.doc_height >= app.stage.scroll.viewport_rows());
    }
}
