//! Paints particle fields straight into the frame buffer, underneath the
//! page content.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::anim::{Content, RenderParams};
use crate::ui::theme;

/// Draw one particle field into `area`. Glyphs that run past the right edge
/// are clipped; out-of-area particles are skipped.
pub fn paint(buf: &mut Buffer, area: Rect, params: &RenderParams, color: Color) {
    if params.is_hidden() {
        return;
    }
    let Content::Particles(particles) = &params.content else {
        return;
    };
    for particle in particles {
        let y = area.y.saturating_add(particle.row);
        if y >= area.bottom() {
            continue;
        }
        let mut x = area.x.saturating_add(particle.col);
        let fg = theme::fade(color, particle.opacity);
        for glyph in particle.glyph.chars() {
            if x >= area.right() {
                break;
            }
            let cell = &mut buf[(x, y)];
            cell.set_char(glyph);
            cell.set_fg(fg);
            x += 1;
        }
    }
}
