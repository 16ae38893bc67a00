//! The page palette and opacity-to-color mapping.
//!
//! Terminals have no alpha channel; "opacity" is expressed by blending the
//! foreground toward the page background.

use ratatui::style::Color;

pub const PRIMARY: Color = Color::Rgb(0, 255, 231);
pub const BACKGROUND: Color = Color::Rgb(15, 15, 15);
pub const TEXT: Color = Color::Rgb(209, 213, 219);
pub const TEXT_DIM: Color = Color::Rgb(120, 128, 140);
pub const ERROR: Color = Color::Rgb(239, 68, 68);
pub const SUCCESS: Color = Color::Rgb(52, 211, 153);

/// Blend `color` toward the background by `1 - opacity`.
pub fn fade(color: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    let (br, bg, bb) = (15u8, 15u8, 15u8);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            blend(br, r, opacity),
            blend(bg, g, opacity),
            blend(bb, b, opacity),
        ),
        // Non-RGB colors cannot blend; snap between dim and full.
        other => {
            if opacity <= f32::EPSILON {
                BACKGROUND
            } else if opacity < 0.5 {
                Color::DarkGray
            } else {
                other
            }
        }
    }
}

fn blend(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t).round() as u8
}

pub fn primary(opacity: f32) -> Color {
    fade(PRIMARY, opacity)
}

pub fn text(opacity: f32) -> Color {
    fade(TEXT, opacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_opacity_is_identity() {
        assert_eq!(fade(PRIMARY, 1.0), PRIMARY);
        assert_eq!(fade(TEXT, 1.0), TEXT);
    }

    #[test]
    fn test_zero_opacity_is_background() {
        assert_eq!(fade(PRIMARY, 0.0), BACKGROUND);
    }

    #[test]
    fn test_midpoint_is_between() {
        if let Color::Rgb(r, g, b) = fade(Color::Rgb(15, 255, 15), 0.5) {
            assert_eq!(r, 15);
            assert!(g > 100 && g < 200);
            assert_eq!(b, 15);
        } else {
            panic!("expected rgb");
        }
    }
}
