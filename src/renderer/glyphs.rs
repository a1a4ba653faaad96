//! Tiny stroke font for on-canvas labels
//!
//! Glyphs live on a 4x6 grid (y down). Lowercase letters render as capitals;
//! characters without a glyph advance like a space.

use glam::Vec2;

type Stroke = &'static [(f32, f32)];
type Glyph = &'static [Stroke];

const GRID_W: f32 = 4.0;
const GRID_H: f32 = 6.0;
/// Horizontal advance per character, in grid units
const ADVANCE: f32 = 5.5;

/// Stroke width relative to the text size
pub const STROKE_RATIO: f32 = 0.12;

fn glyph(ch: char) -> Option<Glyph> {
    let g: Glyph = match ch.to_ascii_uppercase() {
        '0' => &[&[(0., 0.), (4., 0.), (4., 6.), (0., 6.), (0., 0.)], &[(0., 6.), (4., 0.)]],
        '1' => &[&[(1., 1.), (2., 0.), (2., 6.)], &[(1., 6.), (3., 6.)]],
        '2' => &[&[(0., 0.), (4., 0.), (4., 3.), (0., 3.), (0., 6.), (4., 6.)]],
        '3' => &[&[(0., 0.), (4., 0.), (4., 6.), (0., 6.)], &[(0., 3.), (4., 3.)]],
        '4' => &[&[(0., 0.), (0., 3.), (4., 3.)], &[(4., 0.), (4., 6.)]],
        '5' | 'S' => &[&[(4., 0.), (0., 0.), (0., 3.), (4., 3.), (4., 6.), (0., 6.)]],
        '6' => &[&[(4., 0.), (0., 0.), (0., 6.), (4., 6.), (4., 3.), (0., 3.)]],
        '7' => &[&[(0., 0.), (4., 0.), (2., 6.)]],
        '8' => &[&[(0., 0.), (4., 0.), (4., 6.), (0., 6.), (0., 0.)], &[(0., 3.), (4., 3.)]],
        '9' => &[&[(4., 3.), (0., 3.), (0., 0.), (4., 0.), (4., 6.), (0., 6.)]],
        '+' => &[&[(0., 3.), (4., 3.)], &[(2., 1.), (2., 5.)]],
        '-' => &[&[(0.5, 3.), (3.5, 3.)]],
        '$' => &[
            &[(4., 1.), (0., 1.), (0., 3.), (4., 3.), (4., 5.), (0., 5.)],
            &[(2., 0.), (2., 6.)],
        ],
        ',' => &[&[(2., 5.), (1., 7.)]],
        '.' => &[&[(2., 5.5), (2., 6.)]],
        '!' => &[&[(2., 0.), (2., 4.)], &[(2., 5.5), (2., 6.)]],
        ':' => &[&[(2., 1.5), (2., 2.)], &[(2., 4.5), (2., 5.)]],
        'A' => &[&[(0., 6.), (0., 2.), (2., 0.), (4., 2.), (4., 6.)], &[(0., 3.5), (4., 3.5)]],
        'B' => &[
            &[(0., 0.), (0., 6.), (3., 6.), (4., 5.), (4., 4.), (3., 3.), (0., 3.)],
            &[(0., 0.), (3., 0.), (4., 1.), (4., 2.), (3., 3.)],
        ],
        'C' => &[&[(4., 0.), (0., 0.), (0., 6.), (4., 6.)]],
        'D' => &[&[(0., 0.), (0., 6.), (3., 6.), (4., 5.), (4., 1.), (3., 0.), (0., 0.)]],
        'E' => &[&[(4., 0.), (0., 0.), (0., 6.), (4., 6.)], &[(0., 3.), (3., 3.)]],
        'F' => &[&[(4., 0.), (0., 0.), (0., 6.)], &[(0., 3.), (3., 3.)]],
        'G' => &[&[(4., 0.), (0., 0.), (0., 6.), (4., 6.), (4., 3.), (2., 3.)]],
        'H' => &[&[(0., 0.), (0., 6.)], &[(4., 0.), (4., 6.)], &[(0., 3.), (4., 3.)]],
        'I' => &[&[(1., 0.), (3., 0.)], &[(2., 0.), (2., 6.)], &[(1., 6.), (3., 6.)]],
        'J' => &[&[(4., 0.), (4., 6.), (0., 6.), (0., 4.)]],
        'K' => &[&[(0., 0.), (0., 6.)], &[(4., 0.), (0., 3.), (4., 6.)]],
        'L' => &[&[(0., 0.), (0., 6.), (4., 6.)]],
        'M' => &[&[(0., 6.), (0., 0.), (2., 3.), (4., 0.), (4., 6.)]],
        'N' => &[&[(0., 6.), (0., 0.), (4., 6.), (4., 0.)]],
        'O' => &[&[(0., 0.), (4., 0.), (4., 6.), (0., 6.), (0., 0.)]],
        'P' => &[&[(0., 6.), (0., 0.), (4., 0.), (4., 3.), (0., 3.)]],
        'Q' => &[&[(0., 0.), (4., 0.), (4., 6.), (0., 6.), (0., 0.)], &[(2., 4.), (4., 6.)]],
        'R' => &[&[(0., 6.), (0., 0.), (4., 0.), (4., 3.), (0., 3.), (4., 6.)]],
        'T' => &[&[(0., 0.), (4., 0.)], &[(2., 0.), (2., 6.)]],
        'U' => &[&[(0., 0.), (0., 6.), (4., 6.), (4., 0.)]],
        'V' => &[&[(0., 0.), (2., 6.), (4., 0.)]],
        'W' => &[&[(0., 0.), (1., 6.), (2., 3.), (3., 6.), (4., 0.)]],
        'X' => &[&[(0., 0.), (4., 6.)], &[(4., 0.), (0., 6.)]],
        'Y' => &[&[(0., 0.), (2., 3.), (4., 0.)], &[(2., 3.), (2., 6.)]],
        'Z' => &[&[(0., 0.), (4., 0.), (0., 6.), (4., 6.)]],
        _ => return None,
    };
    Some(g)
}

/// Width of a laid-out line of text at the given size
pub fn measure(text: &str, size: f32) -> f32 {
    let n = text.chars().count();
    if n == 0 {
        return 0.0;
    }
    let unit = size / GRID_H;
    (n as f32 * ADVANCE - (ADVANCE - GRID_W)) * unit
}

/// Lay out a line of text centered on `center` as stroke polylines
pub fn layout(text: &str, center: Vec2, size: f32) -> Vec<Vec<Vec2>> {
    let unit = size / GRID_H;
    let origin = center - Vec2::new(measure(text, size) / 2.0, size / 2.0);

    let mut strokes = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        let Some(g) = glyph(ch) else { continue };
        let pen = origin + Vec2::new(i as f32 * ADVANCE * unit, 0.0);
        for stroke in g {
            strokes.push(
                stroke
                    .iter()
                    .map(|&(x, y)| pen + Vec2::new(x, y) * unit)
                    .collect(),
            );
        }
    }
    strokes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_have_glyphs() {
        for ch in "+$8,000 OOPS! -$2,000 CENTRAL BANK 999.9 x FPS:60".chars() {
            assert!(ch == ' ' || glyph(ch).is_some(), "missing glyph {:?}", ch);
        }
    }

    #[test]
    fn test_layout_is_centered() {
        let strokes = layout("88", Vec2::new(100.0, 50.0), 12.0);
        let xs: Vec<f32> = strokes.iter().flatten().map(|p| p.x).collect();
        let min = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert!(((min + max) / 2.0 - 100.0).abs() < 1e-3);

        let ys: Vec<f32> = strokes.iter().flatten().map(|p| p.y).collect();
        let top = ys.iter().cloned().fold(f32::MAX, f32::min);
        assert!((top - 44.0).abs() < 1e-3);
    }

    #[test]
    fn test_unknown_chars_advance() {
        assert!(layout("??", Vec2::ZERO, 10.0).is_empty());
        assert_eq!(layout("A A", Vec2::ZERO, 10.0).len(), 4);
        assert_eq!(measure("", 10.0), 0.0);
    }
}
