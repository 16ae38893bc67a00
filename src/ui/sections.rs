//! Builds the long virtual document: one block of styled lines per section.
//!
//! Line counts are a function of content and width only, never of animation
//! state, so the layout the visibility observer sees stays stable while
//! effects restyle and shift content inside each fixed-height block.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::clock::Tick;
use crate::content::{Section, PORTFOLIO};
use crate::ui::theme;

/// Resolved animation inputs for one section's block.
#[derive(Debug, Clone)]
pub struct SectionFx {
    /// Reveal opacity for the whole block.
    pub opacity: f32,
    /// Vertical displacement inside the block (reveal slide + parallax).
    pub dy: i16,
    /// Word-stagger progress for the hero greeting.
    pub visible_words: Option<usize>,
    /// Glitched replacement for the section title.
    pub title_text: Option<String>,
    /// Current typewriter output for the hero role line.
    pub typer_text: Option<String>,
    pub tick: Tick,
}

impl Default for SectionFx {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            dy: 0,
            visible_words: None,
            title_text: None,
            typer_text: None,
            tick: 0,
        }
    }
}

/// One section's place in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSlot {
    pub section: Section,
    pub top: usize,
    pub height: usize,
}

/// Row layout of the whole document.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub slots: Vec<SectionSlot>,
    pub doc_height: usize,
}

const FOOTER_ROWS: usize = 2;
const SECTION_PAD: usize = 4;

impl PageLayout {
    pub fn compute(width: u16, viewport_rows: usize) -> PageLayout {
        let mut slots = Vec::with_capacity(Section::ALL.len());
        let mut top = 0;
        for section in Section::ALL {
            let height = section_height(section, width, viewport_rows);
            slots.push(SectionSlot {
                section,
                top,
                height,
            });
            top += height;
        }
        PageLayout {
            slots,
            doc_height: top + FOOTER_ROWS,
        }
    }

    pub fn slot(&self, section: Section) -> SectionSlot {
        self.slots[section as usize]
    }

    pub fn top_of(&self, section: Section) -> usize {
        self.slot(section).top
    }

    /// The section covering a document row, for nav-bar highlighting.
    pub fn section_at(&self, row: usize) -> Section {
        self.slots
            .iter()
            .rev()
            .find(|slot| row >= slot.top)
            .map(|slot| slot.section)
            .unwrap_or(Section::Hero)
    }
}

/// Height of one section's block. The hero fills the whole viewport, like
/// the full-screen hero of the page design.
pub fn section_height(section: Section, width: u16, viewport_rows: usize) -> usize {
    let body = body_lines(section, width, &SectionFx::default()).len();
    match section {
        Section::Hero => (body + SECTION_PAD).max(viewport_rows),
        _ => body + SECTION_PAD,
    }
}

/// Build one section's block, exactly `section_height` lines tall.
pub fn build_section(
    section: Section,
    width: u16,
    viewport_rows: usize,
    fx: &SectionFx,
) -> Vec<Line<'static>> {
    let body = body_lines(section, width, fx);
    let height = section_height(section, width, viewport_rows);
    frame_into(body, height, fx.dy)
}

/// Footer below the last section.
pub fn footer_lines() -> Vec<Line<'static>> {
    vec![
        Line::default(),
        Line::from(Span::styled(
            format!("© 2026 {} · built with Rust & ratatui", PORTFOLIO.name),
            Style::new().fg(theme::TEXT_DIM),
        ))
        .centered(),
    ]
}

/// Distribute a block's spare rows so the body sits centered, displaced by
/// `dy`, inside a fixed total height.
fn frame_into(mut body: Vec<Line<'static>>, height: usize, dy: i16) -> Vec<Line<'static>> {
    body.truncate(height);
    let spare = height - body.len();
    let base_top = spare / 2;
    let top = (base_top as i32 + dy as i32).clamp(0, spare as i32) as usize;

    let mut lines = Vec::with_capacity(height);
    lines.resize_with(top, Line::default);
    lines.append(&mut body);
    lines.resize_with(height, Line::default);
    lines
}

fn body_lines(section: Section, width: u16, fx: &SectionFx) -> Vec<Line<'static>> {
    let mut lines = match section {
        Section::Hero => hero_lines(fx),
        Section::About => about_lines(width, fx),
        Section::Skills => skills_lines(width, fx),
        Section::Projects => projects_lines(width, fx),
        Section::Contact => contact_lines(width, fx),
    };
    for line in &mut lines {
        *line = std::mem::take(line).centered();
    }
    lines
}

fn title_line(section: Section, fx: &SectionFx) -> Line<'static> {
    let text = fx
        .title_text
        .clone()
        .unwrap_or_else(|| section.title().to_string());
    Line::from(Span::styled(
        text,
        Style::new()
            .fg(theme::primary(fx.opacity))
            .add_modifier(Modifier::BOLD),
    ))
}

fn underline(section: Section, width: u16, fx: &SectionFx) -> Line<'static> {
    let cells = (UnicodeWidthStr::width(section.title()) + 4).min(width.saturating_sub(2) as usize);
    Line::from(Span::styled(
        "─".repeat(cells),
        Style::new().fg(theme::primary(fx.opacity * 0.6)),
    ))
}

fn text_line(text: impl Into<String>, fx: &SectionFx) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::new().fg(theme::text(fx.opacity))))
}

fn dim_line(text: impl Into<String>, fx: &SectionFx) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::new().fg(theme::fade(theme::TEXT_DIM, fx.opacity)),
    ))
}

fn hero_lines(fx: &SectionFx) -> Vec<Line<'static>> {
    // Greeting words appear one by one as the stagger advances; hidden words
    // keep their cells so the line never reflows.
    let words: Vec<&str> = PORTFOLIO.greeting.split_whitespace().collect();
    let visible = fx.visible_words.unwrap_or(words.len());
    let mut greeting_spans = Vec::with_capacity(words.len() * 2);
    for (i, word) in words.iter().enumerate() {
        let color = if i < visible {
            theme::primary(fx.opacity)
        } else {
            theme::BACKGROUND
        };
        greeting_spans.push(Span::styled((*word).to_string(), Style::new().fg(color)));
        if i + 1 < words.len() {
            greeting_spans.push(Span::raw(" "));
        }
    }

    let typed = fx.typer_text.clone().unwrap_or_default();
    let cursor = if fx.tick / 6 % 2 == 0 { "▌" } else { " " };
    let scroll_hint = if fx.tick / 10 % 2 == 0 {
        "Scroll Down ▼"
    } else {
        "Scroll Down  "
    };

    vec![
        Line::from(greeting_spans),
        Line::default(),
        Line::from(Span::styled(
            format!("I'm {},", PORTFOLIO.name),
            Style::new()
                .fg(theme::text(fx.opacity))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("> ".to_string(), Style::new().fg(theme::primary(fx.opacity))),
            Span::styled(typed, Style::new().fg(theme::text(fx.opacity))),
            Span::styled(cursor.to_string(), Style::new().fg(theme::primary(fx.opacity))),
        ]),
        Line::default(),
        dim_line(PORTFOLIO.tagline, fx),
        Line::default(),
        dim_line("p: view my work  ·  c: contact me", fx),
        Line::default(),
        dim_line(scroll_hint, fx),
    ]
}

fn about_lines(width: u16, fx: &SectionFx) -> Vec<Line<'static>> {
    let mut lines = vec![
        title_line(Section::About, fx),
        underline(Section::About, width, fx),
        Line::default(),
    ];
    for paragraph in PORTFOLIO.about {
        if paragraph.is_empty() {
            lines.push(Line::default());
        } else {
            lines.push(text_line(*paragraph, fx));
        }
    }
    lines
}

fn skills_lines(width: u16, fx: &SectionFx) -> Vec<Line<'static>> {
    const BAR_CELLS: usize = 20;
    let mut lines = vec![
        title_line(Section::Skills, fx),
        underline(Section::Skills, width, fx),
        Line::default(),
    ];
    for group in PORTFOLIO.skills {
        lines.push(Line::from(Span::styled(
            group.title.to_string(),
            Style::new()
                .fg(theme::text(fx.opacity))
                .add_modifier(Modifier::BOLD),
        )));
        for (name, level) in group.skills {
            let filled = (*level as usize * BAR_CELLS) / 100;
            let bar = format!(
                "{:<12} {}{} {:>3}%",
                name,
                "█".repeat(filled),
                "░".repeat(BAR_CELLS - filled),
                level
            );
            lines.push(Line::from(Span::styled(
                bar,
                Style::new().fg(theme::primary(fx.opacity * 0.9)),
            )));
        }
        lines.push(Line::default());
    }
    lines
}

fn projects_lines(width: u16, fx: &SectionFx) -> Vec<Line<'static>> {
    let mut lines = vec![
        title_line(Section::Projects, fx),
        underline(Section::Projects, width, fx),
        Line::default(),
    ];
    for project in PORTFOLIO.projects {
        lines.push(Line::from(Span::styled(
            format!("▪ {}", project.name),
            Style::new()
                .fg(theme::primary(fx.opacity))
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(text_line(project.description, fx));
        lines.push(dim_line(format!("[{}]", project.stack.join(" · ")), fx));
        lines.push(Line::default());
    }
    lines
}

fn contact_lines(width: u16, fx: &SectionFx) -> Vec<Line<'static>> {
    vec![
        title_line(Section::Contact, fx),
        underline(Section::Contact, width, fx),
        Line::default(),
        text_line("Have a project in mind? Let's talk.", fx),
        Line::default(),
        dim_line(format!("✉ {}", PORTFOLIO.contact.email), fx),
        dim_line(format!("⌂ {}", PORTFOLIO.contact.github), fx),
        dim_line(format!("⚲ {}", PORTFOLIO.contact.location), fx),
        Line::default(),
        Line::from(Span::styled(
            "Press f to open the message form".to_string(),
            Style::new().fg(theme::primary(fx.opacity)),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_contiguous() {
        let layout = PageLayout::compute(100, 30);
        let mut expected_top = 0;
        for slot in &layout.slots {
            assert_eq!(slot.top, expected_top);
            expected_top += slot.height;
        }
        assert_eq!(layout.doc_height, expected_top + FOOTER_ROWS);
    }

    #[test]
    fn test_hero_fills_viewport() {
        let layout = PageLayout::compute(100, 42);
        assert!(layout.slot(Section::Hero).height >= 42);
    }

    #[test]
    fn test_block_height_is_stable_across_fx() {
        for section in Section::ALL {
            let plain = build_section(section, 100, 30, &SectionFx::default());
            let animated = build_section(
                section,
                100,
                30,
                &SectionFx {
                    opacity: 0.2,
                    dy: 7,
                    visible_words: Some(1),
                    title_text: Some("G1!TCH".to_string()),
                    typer_text: Some("A Backend".to_string()),
                    tick: 123,
                },
            );
            assert_eq!(plain.len(), animated.len(), "{:?}", section);
            assert_eq!(plain.len(), section_height(section, 100, 30));
        }
    }

    #[test]
    fn test_dy_shifts_within_block() {
        let base = build_section(Section::About, 100, 30, &SectionFx::default());
        let shifted = build_section(
            Section::About,
            100,
            30,
            &SectionFx {
                dy: 2,
                ..Default::default()
            },
        );
        assert_eq!(base.len(), shifted.len());
        // The title moves down by two rows.
        let find_title = |lines: &[Line]| {
            lines
                .iter()
                .position(|l| l.spans.iter().any(|s| s.content.contains("About Me")))
                .unwrap()
        };
        assert_eq!(find_title(&shifted), find_title(&base) + 2);
    }

    #[test]
    fn test_section_at_maps_rows() {
        let layout = PageLayout::compute(100, 30);
        assert_eq!(layout.section_at(0), Section::Hero);
        let about = layout.slot(Section::About);
        assert_eq!(layout.section_at(about.top), Section::About);
        assert_eq!(layout.section_at(layout.doc_height + 10), Section::Contact);
    }
}
