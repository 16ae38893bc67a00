//! Modal surfaces drawn on top of the page: the shortcut help, the toy
//! terminal, and the contact form.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::clock::Tick;
use crate::console::{Console, Entry};
use crate::contact::{ContactForm, Field, SubmitStatus};
use crate::content::Section;
use crate::ui::theme;

/// Centered rectangle of at most `width` x `height` cells.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn overlay_block(title: &str) -> Block<'_> {
    Block::new()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(theme::PRIMARY))
        .style(Style::new().bg(theme::BACKGROUND))
}

pub fn draw_help(frame: &mut Frame, area: Rect) {
    let mut rows: Vec<(String, &str)> = Section::ALL
        .iter()
        .map(|s| (s.shortcut().to_string(), s.title()))
        .collect();
    rows.extend([
        ("/".to_string(), "Show/Hide Keyboard Shortcuts"),
        ("Ctrl+`".to_string(), "Toggle Terminal"),
        ("f".to_string(), "Open Message Form"),
        ("↑/↓ PgUp/PgDn".to_string(), "Scroll"),
        ("g / G".to_string(), "Top / Bottom"),
        ("q".to_string(), "Quit"),
        ("Esc".to_string(), "Close Modals/Popups"),
    ]);

    let mut lines = vec![Line::default()];
    for (key, description) in rows {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:>13}  ", key),
                Style::new().fg(theme::PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::new().fg(theme::TEXT)),
        ]));
    }
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled(
            "Press Esc to close",
            Style::new().fg(theme::TEXT_DIM),
        ))
        .centered(),
    );

    let rect = centered(area, 52, lines.len() as u16 + 2);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(overlay_block("Keyboard Shortcuts")),
        rect,
    );
}

pub fn draw_console(frame: &mut Frame, area: Rect, console: &Console, tick: Tick) {
    // Bottom half, like the slide-up terminal on the page.
    let height = (area.height / 2).max(8).min(area.height);
    let rect = Rect::new(area.x, area.bottom() - height, area.width, height);
    frame.render_widget(Clear, rect);

    let inner_rows = height.saturating_sub(3) as usize;
    let mut lines: Vec<Line> = console
        .history()
        .iter()
        .rev()
        .take(inner_rows)
        .rev()
        .map(|entry| match entry {
            Entry::Input(text) => Line::from(Span::styled(
                format!("> {}", text),
                Style::new().fg(theme::PRIMARY),
            )),
            Entry::Output(text) => {
                Line::from(Span::styled(text.clone(), Style::new().fg(theme::TEXT)))
            }
        })
        .collect();

    let cursor = if tick / 6 % 2 == 0 { "█" } else { " " };
    lines.push(Line::from(vec![
        Span::styled("> ".to_string(), Style::new().fg(theme::PRIMARY)),
        Span::styled(console.input().to_string(), Style::new().fg(theme::PRIMARY)),
        Span::styled(cursor.to_string(), Style::new().fg(theme::PRIMARY)),
    ]));

    frame.render_widget(
        Paragraph::new(lines).block(overlay_block("Portfolio Terminal")),
        rect,
    );
}

pub fn draw_contact_form(frame: &mut Frame, area: Rect, form: &ContactForm, tick: Tick) {
    let mut lines = vec![Line::default()];
    for field in Field::ALL {
        let focused = form.focus() == field;
        let marker = if focused { "▸ " } else { "  " };
        let cursor = if focused && tick / 6 % 2 == 0 { "▌" } else { "" };
        let label_style = if focused {
            Style::new().fg(theme::PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme::TEXT_DIM)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<8} ", marker, field.label()), label_style),
            Span::styled(form.value(field).to_string(), Style::new().fg(theme::TEXT)),
            Span::styled(cursor.to_string(), Style::new().fg(theme::PRIMARY)),
        ]));
        match form.error(field) {
            Some(error) => lines.push(Line::from(Span::styled(
                format!("           {}", error),
                Style::new().fg(theme::ERROR),
            ))),
            None => lines.push(Line::default()),
        }
    }

    let status = match &form.status {
        SubmitStatus::Editing => Line::default(),
        SubmitStatus::Submitting => Line::from(Span::styled(
            "Sending...",
            Style::new().fg(theme::PRIMARY),
        ))
        .centered(),
        SubmitStatus::Sent => Line::from(Span::styled(
            "Message sent! I'll get back to you soon.",
            Style::new().fg(theme::SUCCESS),
        ))
        .centered(),
        SubmitStatus::Failed(message) => Line::from(Span::styled(
            message.clone(),
            Style::new().fg(theme::ERROR),
        ))
        .centered(),
    };
    lines.push(status);
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled(
            "Tab: next field · Enter: send · Esc: close",
            Style::new().fg(theme::TEXT_DIM),
        ))
        .centered(),
    );

    let rect = centered(area, 56, lines.len() as u16 + 2);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(overlay_block("Send Me a Message")),
        rect,
    );
}
