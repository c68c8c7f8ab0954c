use std::path::Path;

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};

use crate::error::Result;
use crate::render::Color;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// An owned RGBA image that actors and the stage draw with.
///
/// All transforms return new surfaces; the receiver is never modified, so an
/// actor can always rebuild its look from the untouched source image.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Create a surface where every pixel is the given opaque colour.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color.to_rgba()),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode an image file into a surface.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path.as_ref())?.to_rgba8();
        Ok(Self { image })
    }

    /// Decode an in-memory encoded image (PNG and friends).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.image.get_pixel(x, y))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, pixel);
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Nearest-neighbour resample to an exact size.
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::new(width, height);
        }
        if (width, height) == self.size() {
            return self.clone();
        }
        Self {
            image: imageops::resize(&self.image, width, height, FilterType::Nearest),
        }
    }

    /// Mirror horizontally and/or vertically.
    pub fn flipped(&self, horizontal: bool, vertical: bool) -> Self {
        let mut image = self.image.clone();
        if horizontal {
            imageops::flip_horizontal_in_place(&mut image);
        }
        if vertical {
            imageops::flip_vertical_in_place(&mut image);
        }
        Self { image }
    }

    /// Rotate counter-clockwise by `degrees`, as seen on screen.
    ///
    /// The result grows to the bounding box of the rotated image and uncovered
    /// pixels are transparent. Quarter turns are lossless.
    pub fn rotated(&self, degrees: f32) -> Self {
        let turn = degrees.rem_euclid(360.0);
        if turn == 0.0 {
            return self.clone();
        }
        if turn == 90.0 {
            return Self::from_image(imageops::rotate270(&self.image));
        }
        if turn == 180.0 {
            return Self::from_image(imageops::rotate180(&self.image));
        }
        if turn == 270.0 {
            return Self::from_image(imageops::rotate90(&self.image));
        }
        self.rotated_free(degrees)
    }

    fn rotated_free(&self, degrees: f32) -> Self {
        let (w, h) = (self.width() as f32, self.height() as f32);
        let (sin, cos) = degrees.to_radians().sin_cos();
        let new_w = rotated_extent(w * cos, h * sin);
        let new_h = rotated_extent(w * sin, h * cos);

        let (src_cx, src_cy) = (w * 0.5, h * 0.5);
        let (dst_cx, dst_cy) = (new_w as f32 * 0.5, new_h as f32 * 0.5);

        let image = RgbaImage::from_fn(new_w, new_h, |dx, dy| {
            let vx = dx as f32 + 0.5 - dst_cx;
            let vy = dy as f32 + 0.5 - dst_cy;
            // Inverse of the on-screen counter-clockwise rotation.
            let sx = vx * cos - vy * sin + src_cx;
            let sy = vx * sin + vy * cos + src_cy;
            if sx < 0.0 || sy < 0.0 {
                return TRANSPARENT;
            }
            self.pixel(sx as u32, sy as u32).unwrap_or(TRANSPARENT)
        });
        Self { image }
    }
}

fn rotated_extent(a: f32, b: f32) -> u32 {
    // Trim float noise so that e.g. 10.000001 does not grow an extra column.
    (a.abs() + b.abs() - 1e-3).ceil().max(0.0) as u32
}

impl From<RgbaImage> for Surface {
    fn from(image: RgbaImage) -> Self {
        Self::from_image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(width: u32, height: u32) -> Surface {
        // Opaque red except a white top-left pixel.
        let mut surface = Surface::filled(width, height, Color::rgb(255, 0, 0));
        surface.set_pixel(0, 0, Color::WHITE.to_rgba());
        surface
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let rotated = marked(20, 10).rotated(90.0);
        assert_eq!(rotated.size(), (10, 20));
        // Counter-clockwise: the top-left corner ends up bottom-left.
        assert_eq!(rotated.pixel(0, 19), Some(Color::WHITE.to_rgba()));
    }

    #[test]
    fn negative_quarter_turn_is_clockwise() {
        let rotated = marked(20, 10).rotated(-90.0);
        assert_eq!(rotated.size(), (10, 20));
        assert_eq!(rotated.pixel(9, 0), Some(Color::WHITE.to_rgba()));
    }

    #[test]
    fn free_rotation_expands_canvas() {
        let rotated = marked(10, 10).rotated(45.0);
        assert_eq!(rotated.size(), (15, 15));
        // Corners of the expanded canvas are uncovered.
        assert_eq!(rotated.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(rotated.pixel(7, 7).map(|p| p[3]), Some(255));
    }

    #[test]
    fn flip_moves_marker() {
        let surface = marked(4, 3);
        assert_eq!(surface.flipped(true, false).pixel(3, 0), Some(Color::WHITE.to_rgba()));
        assert_eq!(surface.flipped(false, true).pixel(0, 2), Some(Color::WHITE.to_rgba()));
        assert_eq!(surface.flipped(true, true).pixel(3, 2), Some(Color::WHITE.to_rgba()));
    }

    #[test]
    fn scaling_is_nearest_neighbour() {
        let scaled = marked(4, 4).scaled(8, 8);
        assert_eq!(scaled.size(), (8, 8));
        assert_eq!(scaled.pixel(1, 1), Some(Color::WHITE.to_rgba()));
        assert_eq!(scaled.pixel(2, 2), Some(Color::rgb(255, 0, 0).to_rgba()));
    }

    #[test]
    fn scaling_to_zero_gives_empty_surface() {
        assert_eq!(marked(4, 4).scaled(0, 3).size(), (0, 3));
    }
}
