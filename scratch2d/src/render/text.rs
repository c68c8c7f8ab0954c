use ab_glyph::{point, Font, FontArc, ScaleFont};

use crate::error::{Error, Result};
use crate::math::Vec2;
use crate::render::Color;

/// Loaded font used for `write_text`.
#[derive(Clone)]
pub struct FontHandle {
    font: FontArc,
}

impl FontHandle {
    /// Parse TTF/OTF font data.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(bytes).map_err(|_| Error::InvalidFont)?;
        Ok(Self { font })
    }

    /// Load a font file from disk.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontHandle").finish_non_exhaustive()
    }
}

/// How text is drawn onto the stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Height of a line in pixels.
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self { size, color }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 24.0,
            color: Color::WHITE,
        }
    }
}

/// Lay out `text` with its top-left at `pos` and report every covered pixel
/// with its coverage in `0.0..=1.0`.
pub(crate) fn rasterize(
    font: &FontHandle,
    text: &str,
    pos: Vec2,
    style: &TextStyle,
    mut plot: impl FnMut(i32, i32, f32),
) {
    let scaled = font.font.as_scaled(style.size);
    let line_height = scaled.height() + scaled.line_gap();

    for (line_index, line) in text.lines().enumerate() {
        let baseline = pos.y + scaled.ascent() + line_height * line_index as f32;
        let mut caret = point(pos.x, baseline);
        let mut previous = None;

        for ch in line.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(style.size, caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = font.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    plot(
                        bounds.min.x as i32 + gx as i32,
                        bounds.min.y as i32 + gy as i32,
                        coverage,
                    );
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_font_is_rejected() {
        let err = FontHandle::from_bytes(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::InvalidFont));
    }

    #[test]
    fn style_builders() {
        let style = TextStyle::default().with_size(12.0).with_color(Color::BLACK);
        assert_eq!(style, TextStyle::new(12.0, Color::BLACK));
    }
}
