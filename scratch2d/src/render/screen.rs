use image::{imageops, Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::math::{round_even, Vec2};
use crate::render::text::{rasterize, FontHandle, TextStyle};
use crate::render::{Color, Surface};

/// Drawing capabilities the stage and actors need from a display surface.
///
/// `Screen` is the built-in software implementation. Hosts that render
/// elsewhere can implement this trait over their own surface.
pub trait Canvas {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Reset every pixel to black.
    fn clear(&mut self);

    /// Fill the whole canvas with a colour.
    fn fill(&mut self, color: Color);

    /// Alpha-blend `surface` with its top-left corner at `pos`.
    fn blit(&mut self, surface: &Surface, pos: Vec2);

    /// Draw `text` with its top-left corner at `pos`.
    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) -> Result<()>;
}

/// CPU framebuffer the engine draws each frame into.
#[derive(Debug)]
pub struct Screen {
    frame: RgbaImage,
    font: Option<FontHandle>,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: RgbaImage::from_pixel(width, height, Color::BLACK.to_rgba()),
            font: None,
        }
    }

    /// Font used by `draw_text`.
    pub fn set_font(&mut self, font: FontHandle) {
        self.font = Some(font);
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Resize the framebuffer. The contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.frame.dimensions() != (width, height) {
            self.frame = RgbaImage::from_pixel(width, height, Color::BLACK.to_rgba());
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.frame.width() && y < self.frame.height()).then(|| *self.frame.get_pixel(x, y))
    }

    /// The finished frame, ready for the host to present.
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.frame.width() || y as u32 >= self.frame.height() {
            return;
        }
        let alpha = coverage.clamp(0.0, 1.0);
        let dst = self.frame.get_pixel_mut(x as u32, y as u32);
        let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
        *dst = Rgba([
            mix(color.r, dst[0]),
            mix(color.g, dst[1]),
            mix(color.b, dst[2]),
            255,
        ]);
    }
}

impl Canvas for Screen {
    fn size(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    fn clear(&mut self) {
        self.fill(Color::BLACK);
    }

    fn fill(&mut self, color: Color) {
        let pixel = color.to_rgba();
        self.frame.pixels_mut().for_each(|p| *p = pixel);
    }

    fn blit(&mut self, surface: &Surface, pos: Vec2) {
        let x = round_even(pos.x) as i64;
        let y = round_even(pos.y) as i64;
        imageops::overlay(&mut self.frame, surface.as_image(), x, y);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) -> Result<()> {
        let font = self.font.clone().ok_or(Error::NoFont)?;
        rasterize(&font, text, pos, style, |x, y, coverage| {
            self.blend(x, y, style.color, coverage)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_covers_every_pixel() {
        let mut screen = Screen::new(4, 3);
        screen.fill(Color::WHITE);
        assert!(screen.frame().pixels().all(|p| *p == Color::WHITE.to_rgba()));
    }

    #[test]
    fn blit_clips_at_edges() {
        let mut screen = Screen::new(4, 4);
        screen.blit(&Surface::filled(2, 2, Color::WHITE), Vec2::new(3.0, -1.0));
        assert_eq!(screen.pixel(3, 0), Some(Color::WHITE.to_rgba()));
        assert_eq!(screen.pixel(2, 0), Some(Color::BLACK.to_rgba()));
        assert_eq!(screen.pixel(3, 1), Some(Color::BLACK.to_rgba()));
    }

    #[test]
    fn transparent_pixels_keep_background() {
        let mut screen = Screen::new(2, 1);
        screen.fill(Color::rgb(10, 20, 30));
        screen.blit(&Surface::new(2, 1), Vec2::ZERO);
        assert_eq!(screen.pixel(0, 0), Some(Color::rgb(10, 20, 30).to_rgba()));
    }

    #[test]
    fn text_without_font_fails() {
        let mut screen = Screen::new(10, 10);
        let err = screen
            .draw_text("hi", Vec2::ZERO, &TextStyle::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoFont));
    }
}
