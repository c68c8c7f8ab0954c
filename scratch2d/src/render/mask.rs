use crate::render::Surface;

/// Pixels with an alpha above this value count as solid.
pub const ALPHA_THRESHOLD: u8 = 127;

/// One bit per pixel: set where the source surface is opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>, // Row-major: [y * width + x]
}

impl Mask {
    /// A mask with no bits set.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// A mask with every bit set.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask from the alpha channel of a surface.
    pub fn from_surface(surface: &Surface) -> Self {
        let (width, height) = surface.size();
        let bits = surface
            .as_image()
            .pixels()
            .map(|pixel| pixel[3] > ALPHA_THRESHOLD)
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bit at `(x, y)`. Anything outside the mask is unset.
    pub fn get_at(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    pub fn set_at(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = value;
        }
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// First point where `other`, placed at `offset` relative to this mask's
    /// top-left corner, shares a set bit with this mask.
    ///
    /// The returned coordinates are in this mask's space.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(u32, u32)> {
        let (ox, oy) = offset;
        let x_start = ox.max(0);
        let y_start = oy.max(0);
        let x_end = (ox + other.width as i32).min(self.width as i32);
        let y_end = (oy + other.height as i32).min(self.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let (x, y) = (x as u32, y as u32);
                let (other_x, other_y) = ((x as i32 - ox) as u32, (y as i32 - oy) as u32);
                if self.get_at(x, y) && other.get_at(other_x, other_y) {
                    return Some((x, y));
                }
            }
        }
        None
    }
}
