//! Rendering layer: consumes each element's `RenderParams` and paints the
//! frame. All animation decisions happen upstream; this module only draws.

pub mod background;
pub mod overlays;
pub mod sections;
pub mod theme;

use rand::Rng;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Gauge, Paragraph};
use ratatui::Frame;

use crate::anim::EffectRng;
use crate::app::{ids, App, OverlayKind, Phase};
use crate::content::Section;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(
        Block::new().style(Style::new().bg(theme::BACKGROUND).fg(theme::TEXT)),
        area,
    );
    match app.phase() {
        Phase::Boot => draw_boot(frame, area, app),
        Phase::Page => draw_page(frame, area, app),
    }
}

fn draw_boot(frame: &mut Frame, area: Rect, app: &App) {
    let tick = app.tick();

    // Drifting binary strips behind the loader.
    let rng = EffectRng::new(app.config.effects.seed);
    for i in 0..5u16 {
        let mut lay = rng.layout(0x8000 + i as u64);
        let digits: String = (0..15)
            .map(|_| if lay.random_bool(0.5) { '1' } else { '0' })
            .collect();
        let speed: u64 = lay.random_range(2..5);
        let row = area.y + (area.height / 5) * i;
        let drift: u64 = lay.random_range(0..80);
        let col = ((tick / speed + drift) % area.width.max(1) as u64) as u16;
        let strip = Rect::new(
            area.x + col,
            row,
            (area.width - col).min(digits.len() as u16),
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                digits,
                Style::new().fg(theme::fade(theme::PRIMARY, 0.2)),
            )),
            strip,
        );
    }

    let rect = overlays::centered(area, 44, 7);
    let spinner = SPINNER[(tick % SPINNER.len() as u64) as usize];
    let progress = app.stage.boot.progress();

    let header = Rect::new(rect.x, rect.y, rect.width, 1);
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                format!("{} termfolio", spinner),
                Style::new().fg(theme::PRIMARY).add_modifier(Modifier::BOLD),
            ))
            .centered(),
        ),
        header,
    );

    let gauge_rect = Rect::new(rect.x, rect.y + 2, rect.width, 1);
    frame.render_widget(
        Gauge::default()
            .ratio(progress / 100.0)
            .label(format!("{}%", progress.round() as u32))
            .use_unicode(true)
            .gauge_style(
                Style::new()
                    .fg(theme::PRIMARY)
                    .bg(theme::fade(theme::PRIMARY, 0.15)),
            ),
        gauge_rect,
    );

    let caption = Rect::new(rect.x, rect.y + 4, rect.width, 1);
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                "Initializing system...",
                Style::new().fg(theme::TEXT_DIM),
            ))
            .centered(),
        ),
        caption,
    );

    // Blinking loader line, eased by the shared tick like everything else.
    let blink = ((tick % 40) as f32 / 40.0 * std::f32::consts::TAU).sin() * 0.35 + 0.65;
    let loader = Rect::new(rect.x, rect.y + 6, rect.width, 1);
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                "> Loading components...",
                Style::new().fg(theme::primary(blink)),
            ))
            .centered(),
        ),
        loader,
    );
}

fn draw_page(frame: &mut Frame, area: Rect, app: &App) {
    if area.height < 3 || area.width < 10 {
        return;
    }
    let tick = app.tick();
    let progress_row = Rect::new(area.x, area.y, area.width, 1);
    let nav_row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
    let content = Rect::new(area.x, area.y + 1, area.width, area.height - 2);

    // Background layers first, painted straight into the buffer.
    for id in [ids::RAIN, ids::CIRCUIT, ids::FLOAT] {
        if let Some(params) = app.background_params(id) {
            background::paint(frame.buffer_mut(), content, params, theme::PRIMARY);
        }
    }
    for id in app.decor_ids() {
        if let Some(params) = app.background_params(*id) {
            background::paint(frame.buffer_mut(), content, params, theme::PRIMARY);
        }
    }

    // The visible slice of the document.
    let offset = app.stage.scroll.offset_rows();
    let document = build_document(app, content.width);
    let end = (offset + content.height as usize).min(document.len());
    let slice: Vec<Line> = document
        .get(offset..end)
        .map(<[Line]>::to_vec)
        .unwrap_or_default();
    frame.render_widget(Paragraph::new(Text::from(slice)), content);

    draw_scroll_progress(frame, progress_row, app.stage.scroll.progress());
    draw_nav_bar(frame, nav_row, app, offset, content.height as usize);

    // One-shot scanner sweep right after boot.
    if let Some(row) = app.stage.boot.scanner_row(tick, content.height) {
        let line = Rect::new(content.x, content.y + row, content.width, 1);
        frame.render_widget(Block::new().style(Style::new().bg(theme::PRIMARY)), line);
    }

    match app.overlay {
        OverlayKind::None => {}
        OverlayKind::Help => overlays::draw_help(frame, area),
        OverlayKind::Console => overlays::draw_console(frame, area, &app.console, tick),
        OverlayKind::ContactForm => overlays::draw_contact_form(frame, area, &app.form, tick),
    }
}

/// Assemble the full document for this frame: every section block with its
/// current effects applied, then the footer.
fn build_document(app: &App, width: u16) -> Vec<Line<'static>> {
    let viewport = app.stage.scroll.viewport_rows();
    let mut lines = Vec::with_capacity(app.stage.layout.doc_height);
    for slot in &app.stage.layout.slots {
        let fx = app.section_fx(slot.section);
        lines.extend(sections::build_section(slot.section, width, viewport, &fx));
    }
    lines.extend(sections::footer_lines());
    lines
}

fn draw_scroll_progress(frame: &mut Frame, row: Rect, progress: f32) {
    let filled = (progress * row.width as f32).round() as usize;
    let rest = row.width as usize - filled.min(row.width as usize);
    let line = Line::from(vec![
        Span::styled("━".repeat(filled), Style::new().fg(theme::PRIMARY)),
        Span::styled(
            "─".repeat(rest),
            Style::new().fg(theme::fade(theme::PRIMARY, 0.15)),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), row);
}

fn draw_nav_bar(frame: &mut Frame, row: Rect, app: &App, offset: usize, viewport: usize) {
    let current = app.stage.layout.section_at(offset + viewport / 2);
    let mut spans = Vec::new();
    for section in Section::ALL {
        let style = if section == current {
            Style::new().fg(theme::PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme::TEXT_DIM)
        };
        spans.push(Span::styled(
            format!(" {}:{} ", section.shortcut(), section.title()),
            style,
        ));
    }
    spans.push(Span::styled(
        "  /:help  ^`:terminal",
        Style::new().fg(theme::fade(theme::TEXT_DIM, 0.7)),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), row);
}
