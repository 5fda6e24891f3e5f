//! Color math for the animation crates.

use ratatui::style::Color;

/// Scale an RGB color toward black. `t` = 1.0 leaves it unchanged,
/// 0.0 is black. Non-RGB colors pass through untouched.
pub fn fade(color: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * t) as u8,
            (g as f32 * t) as u8,
            (b as f32 * t) as u8,
        ),
        other => other,
    }
}

/// Linear blend between two RGB colors; `t` = 0.0 yields `a`, 1.0 yields `b`.
pub fn mix(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (a, b) {
        (Color::Rgb(ar, ag, ab), Color::Rgb(br, bg, bb)) => {
            Color::Rgb(lerp(ar, br, t), lerp(ag, bg, t), lerp(ab, bb, t))
        }
        _ => {
            if t < 0.5 {
                a
            } else {
                b
            }
        }
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_bounds() {
        let pink = Color::Rgb(244, 163, 187);
        assert_eq!(fade(pink, 1.0), pink);
        assert_eq!(fade(pink, 0.0), Color::Rgb(0, 0, 0));
        // Out-of-range factors clamp instead of overflowing.
        assert_eq!(fade(pink, 2.0), pink);
        assert_eq!(fade(pink, -1.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
        assert_eq!(mix(a, b, 0.5), Color::Rgb(100, 50, 25));
    }
}
