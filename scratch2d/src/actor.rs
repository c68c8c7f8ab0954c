//! Scratch-style game objects.
//!
//! An [`Actor`] is an image on the stage that can move, turn, grow, flip,
//! animate through a list of images and check pixel-accurate collisions.
//!
//! The actor's position is its anchor point, which is the image centre unless
//! another anchor is chosen. Turning, scaling, flipping and switching images
//! all keep that point fixed on screen.

use std::cell::OnceCell;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::assets::Assets;
use crate::error::{Error, Result};
use crate::math::{round_even, Rect, Vec2};
use crate::render::{Canvas, Mask, Surface};

/// Degrees turned by `turn_left`/`turn_right` in beginner examples.
pub const DEFAULT_TURN: f32 = 90.0;

/// Frames per second used by beginner examples of `animate`.
pub const DEFAULT_FPS: f32 = 5.0;

/// Point of the image that the actor's position refers to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Fractions of the image size; `(0.5, 0.5)` is the centre.
    Fraction(f32, f32),
    /// Pixel offset from the top-left corner of the untransformed image.
    Pixels(f32, f32),
}

impl Anchor {
    pub const CENTER: Self = Self::Fraction(0.5, 0.5);
    pub const TOP_LEFT: Self = Self::Fraction(0.0, 0.0);

    fn resolve(self, width: f32, height: f32) -> Vec2 {
        match self {
            Anchor::Fraction(fx, fy) => Vec2::new(width * fx, height * fy),
            Anchor::Pixels(x, y) => Vec2::new(x, y),
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Anything an actor can turn or move towards.
pub trait Positioned {
    fn pos(&self) -> Vec2;
}

impl Positioned for Vec2 {
    fn pos(&self) -> Vec2 {
        *self
    }
}

impl Positioned for (f32, f32) {
    fn pos(&self) -> Vec2 {
        Vec2::from(*self)
    }
}

impl Positioned for Actor {
    fn pos(&self) -> Vec2 {
        self.pos
    }
}

/// What `collide_with` tests against.
#[derive(Clone, Copy, Debug)]
pub enum Target<'a> {
    Point(Vec2),
    Actor(&'a Actor),
}

impl From<Vec2> for Target<'_> {
    fn from(point: Vec2) -> Self {
        Target::Point(point)
    }
}

impl From<(f32, f32)> for Target<'_> {
    fn from(point: (f32, f32)) -> Self {
        Target::Point(point.into())
    }
}

impl From<(i32, i32)> for Target<'_> {
    fn from(point: (i32, i32)) -> Self {
        Target::Point(point.into())
    }
}

impl<'a> From<&'a Actor> for Target<'a> {
    fn from(actor: &'a Actor) -> Self {
        Target::Actor(actor)
    }
}

#[derive(Clone)]
struct Frame {
    key: String,
    surface: Arc<Surface>,
}

/// A game object drawn from an image.
#[derive(Clone)]
pub struct Actor {
    pos: Vec2,
    angle: f32,
    scale: f32,
    flip_x: bool,
    flip_y: bool,
    anchor: Anchor,

    image: String,
    source: Arc<Surface>,
    images: Vec<Frame>,
    animate_tick: i64,

    // Derived from the fields above by `transform_surface`.
    surface: Surface,
    transformed_anchor: Vec2,
    mask: OnceCell<Mask>,
}

impl Actor {
    /// Create an actor showing `image`, with its top-left corner at (0, 0).
    pub fn new(assets: &mut Assets, image: &str) -> Result<Self> {
        Self::with_anchor(assets, image, Anchor::CENTER)
    }

    /// Create an actor with a custom anchor point.
    pub fn with_anchor(assets: &mut Assets, image: &str, anchor: Anchor) -> Result<Self> {
        let source = assets.load(image)?;
        let mut actor = Self {
            pos: Vec2::ZERO,
            angle: 0.0,
            scale: 1.0,
            flip_x: false,
            flip_y: false,
            anchor,
            image: image.to_string(),
            surface: (*source).clone(),
            source,
            images: Vec::new(),
            animate_tick: 0,
            transformed_anchor: Vec2::ZERO,
            mask: OnceCell::new(),
        };
        actor.transform_surface();
        actor.pos = actor.transformed_anchor;
        Ok(actor)
    }

    // --- position and size -------------------------------------------------

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn x_position(&self) -> f32 {
        self.pos.x
    }

    pub fn y_position(&self) -> f32 {
        self.pos.y
    }

    pub fn go_to(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }

    pub fn go_to_point(&mut self, point: impl Into<Vec2>) {
        self.pos = point.into();
    }

    /// Move the anchor to `(x, y)` pixels of the untransformed image.
    ///
    /// The actor stays where it is on screen; its position now refers to the
    /// new anchor point.
    pub fn set_anchor(&mut self, x: f32, y: f32) {
        let topleft = self.rect().topleft();
        self.anchor = Anchor::Pixels(x, y);
        self.transform_surface();
        self.pos = topleft + self.transformed_anchor;
    }

    /// Anchor offset from the top-left corner of the transformed image.
    pub fn anchor(&self) -> Vec2 {
        self.transformed_anchor
    }

    pub fn get_width(&self) -> u32 {
        self.surface.width()
    }

    pub fn get_height(&self) -> u32 {
        self.surface.height()
    }

    pub fn get_size(&self) -> (u32, u32) {
        self.surface.size()
    }

    /// Bounding box of the transformed image on screen.
    pub fn rect(&self) -> Rect {
        let topleft = self.pos - self.transformed_anchor;
        let (w, h) = self.surface.size();
        Rect::new(topleft.x, topleft.y, w as f32, h as f32)
    }

    pub fn left(&self) -> f32 {
        self.rect().left()
    }

    pub fn top(&self) -> f32 {
        self.rect().top()
    }

    pub fn right(&self) -> f32 {
        self.rect().right()
    }

    pub fn bottom(&self) -> f32 {
        self.rect().bottom()
    }

    // --- movement ----------------------------------------------------------

    /// Move `distance` pixels in the direction the actor is facing.
    pub fn move_forward(&mut self, distance: f32) {
        self.step(self.angle, distance);
    }

    pub fn move_back(&mut self, distance: f32) {
        self.step(self.angle, -distance);
    }

    pub fn move_left(&mut self, distance: f32) {
        self.pos.x -= distance;
    }

    pub fn move_right(&mut self, distance: f32) {
        self.pos.x += distance;
    }

    pub fn move_up(&mut self, distance: f32) {
        self.pos.y -= distance;
    }

    pub fn move_down(&mut self, distance: f32) {
        self.pos.y += distance;
    }

    /// Move `distance` pixels straight at `target`.
    pub fn move_towards<T: Positioned + ?Sized>(&mut self, target: &T, distance: f32) {
        let bearing = self.direction_to(target);
        self.step(bearing, distance);
    }

    fn step(&mut self, degrees: f32, distance: f32) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.pos.x += distance * cos;
        self.pos.y -= distance * sin;
    }

    // --- direction ---------------------------------------------------------

    /// Heading in degrees; 0 faces right and positive turns counter-clockwise.
    ///
    /// Never wrapped, so it keeps growing as the actor spins.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, degrees: f32) {
        self.angle = degrees;
        self.transform_surface();
    }

    pub fn point_in_direction(&mut self, degrees: f32) {
        self.set_angle(degrees);
    }

    pub fn turn_left(&mut self, degrees: f32) {
        self.set_angle(self.angle + degrees);
    }

    pub fn turn_right(&mut self, degrees: f32) {
        self.set_angle(self.angle - degrees);
    }

    /// Bearing from this actor to `target` in `[0, 360)` degrees.
    ///
    /// 0 is to the right and 90 is up the screen. A target at the same
    /// position gives 0.
    pub fn direction_to<T: Positioned + ?Sized>(&self, target: &T) -> f32 {
        let target = target.pos();
        let dx = target.x - self.pos.x;
        let dy = self.pos.y - target.y;
        let degrees = dy.atan2(dx).to_degrees();
        let bearing = if degrees > 0.0 { degrees } else { 360.0 + degrees };
        if bearing >= 360.0 {
            bearing - 360.0
        } else {
            bearing
        }
    }

    pub fn point_towards<T: Positioned + ?Sized>(&mut self, target: &T) {
        let bearing = self.direction_to(target);
        self.set_angle(bearing);
    }

    // --- images ------------------------------------------------------------

    /// Key of the image currently shown.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Keys of the animation sequence.
    pub fn images(&self) -> Vec<&str> {
        self.images.iter().map(|frame| frame.key.as_str()).collect()
    }

    pub fn switch_to_image(&mut self, assets: &mut Assets, image: &str) -> Result<()> {
        let surface = assets.load(image)?;
        self.show(image.to_string(), surface);
        Ok(())
    }

    /// Replace the animation sequence. The first image is shown straight away.
    ///
    /// Every image is resolved before anything changes, so an unknown key
    /// leaves the actor untouched.
    pub fn switch_to_images<I, S>(&mut self, assets: &mut Assets, images: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let frames = images
            .into_iter()
            .map(|key| {
                let key = key.as_ref();
                assets.load(key).map(|surface| Frame {
                    key: key.to_string(),
                    surface,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.images = frames;
        match self.images.first().cloned() {
            Some(first) => self.show(first.key, first.surface),
            None => self.transform_surface(),
        }
        Ok(())
    }

    /// Show the image after the current one, wrapping at the end.
    ///
    /// If the current image is not part of the sequence the first one is shown.
    pub fn next_image(&mut self) -> Result<()> {
        if self.images.is_empty() {
            return Err(Error::EmptyImageSequence);
        }
        let next = match self.images.iter().position(|frame| frame.key == self.image) {
            Some(current) => (current + 1) % self.images.len(),
            None => 0,
        };
        let frame = self.images[next].clone();
        self.show(frame.key, frame.surface);
        Ok(())
    }

    /// Flip through the image sequence at `fps` images per second.
    ///
    /// Call this every frame; it advances at most once per call, whenever the
    /// wall clock has moved into a new `1/fps` slot. Returns whether the image
    /// changed.
    pub fn animate(&mut self, fps: f32) -> Result<bool> {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or_default();
        self.animate_at(seconds, fps)
    }

    /// `animate` against an explicit clock reading in seconds.
    pub fn animate_at(&mut self, seconds: f64, fps: f32) -> Result<bool> {
        let tick = (seconds * fps as f64).floor() as i64;
        if tick == self.animate_tick {
            return Ok(false);
        }
        self.next_image()?;
        self.animate_tick = tick;
        Ok(true)
    }

    fn show(&mut self, key: String, surface: Arc<Surface>) {
        log::debug!("actor switched from {:?} to {key:?}", self.image);
        self.image = key;
        self.source = surface;
        self.transform_surface();
    }

    // --- look ----------------------------------------------------------------

    /// Resize to `percent` of the image's own size (100 is the original size).
    pub fn scale(&mut self, percent: f32) {
        self.scale = percent / 100.0;
        self.transform_surface();
    }

    /// Current size factor; 1.0 is the original size.
    pub fn scale_factor(&self) -> f32 {
        self.scale
    }

    /// Mirror left/right. Calling it again undoes the flip.
    pub fn flip_x(&mut self) {
        self.flip_x = !self.flip_x;
        self.transform_surface();
    }

    /// Mirror top/bottom. Calling it again undoes the flip.
    pub fn flip_y(&mut self) {
        self.flip_y = !self.flip_y;
        self.transform_surface();
    }

    pub fn is_flipped_x(&self) -> bool {
        self.flip_x
    }

    pub fn is_flipped_y(&self) -> bool {
        self.flip_y
    }

    /// The transformed image as it is drawn.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Rebuild the drawn image from the source: scale, flip, then rotate.
    ///
    /// `pos` is left alone, which keeps the anchor point fixed on screen.
    fn transform_surface(&mut self) {
        let (w, h) = self.source.size();
        let scaled = if self.scale != 1.0 {
            let width = (w as f32 * self.scale) as u32;
            let height = (h as f32 * self.scale) as u32;
            self.source.scaled(width, height)
        } else {
            (*self.source).clone()
        };
        let flipped = if self.flip_x || self.flip_y {
            scaled.flipped(self.flip_x, self.flip_y)
        } else {
            scaled
        };
        self.surface = flipped.rotated(self.angle);

        let anchor = self.anchor.resolve(w as f32, h as f32);
        self.transformed_anchor = rotate_anchor(anchor, w as f32, h as f32, self.angle) * self.scale;
        self.mask = OnceCell::new();
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.blit(&self.surface, self.rect().topleft());
    }

    // --- collisions ----------------------------------------------------------

    /// Collision mask of the transformed image, built on first use.
    pub fn mask(&self) -> &Mask {
        self.mask.get_or_init(|| Mask::from_surface(&self.surface))
    }

    /// Whether the mask has been built since the last change of look.
    pub fn is_mask_cached(&self) -> bool {
        self.mask.get().is_some()
    }

    /// Pixel-accurate test against a point or another actor.
    pub fn collide_with<'a>(&self, target: impl Into<Target<'a>>) -> bool {
        match target.into() {
            Target::Point(point) => self.collide_point_pixel(point),
            Target::Actor(other) => self.overlaps(other),
        }
    }

    /// Whether `point` lands on an opaque pixel of the actor.
    ///
    /// The topmost row and leftmost column never report a hit: the point is
    /// compared one pixel up and to the left of where it lands.
    pub fn collide_point_pixel(&self, point: impl Into<Vec2>) -> bool {
        let point = point.into();
        let rect = self.rect();
        let x_offset = round_even(point.x - rect.left());
        let y_offset = round_even(point.y - rect.top());
        if x_offset < 1 || y_offset < 1 {
            return false;
        }

        let mask = self.mask();
        let (width, height) = mask.size();
        if x_offset as u32 > width || y_offset as u32 > height {
            return false;
        }
        mask.get_at(x_offset as u32 - 1, y_offset as u32 - 1)
    }

    /// Whether the opaque pixels of two actors touch.
    ///
    /// Actors whose bounding boxes are apart are rejected without building
    /// any mask.
    pub fn overlaps(&self, other: &Actor) -> bool {
        if !self.collide_rect(other) {
            return false;
        }
        let offset = (
            round_even(self.left() - other.left()),
            round_even(self.top() - other.top()),
        );
        other.mask().overlap(self.mask(), offset).is_some()
    }

    /// Bounding-box test against a point. Cheaper than `collide_point_pixel`.
    pub fn collide_point(&self, point: impl Into<Vec2>) -> bool {
        self.rect().contains(point.into())
    }

    /// Bounding-box test against another actor. Cheaper than `overlaps`.
    pub fn collide_rect(&self, other: &Actor) -> bool {
        self.rect().intersects(&other.rect())
    }

    /// True once any edge reaches or crosses the border of a stage of `size`.
    pub fn touching_the_edge(&self, size: (u32, u32)) -> bool {
        let (width, height) = (size.0 as f32, size.1 as f32);
        let rect = self.rect();
        rect.left() <= 0.0 || rect.top() <= 0.0 || rect.right() >= width || rect.bottom() >= height
    }

    /// True only when the actor is completely outside a stage of `size`.
    pub fn left_the_stage(&self, size: (u32, u32)) -> bool {
        let (width, height) = (size.0 as f32, size.1 as f32);
        let rect = self.rect();
        rect.right() < 0.0 || rect.bottom() < 0.0 || rect.left() > width || rect.top() > height
    }
}

/// Where an anchor lands after rotating a `width`×`height` image by `degrees`,
/// measured from the top-left of the expanded, rotated bounds.
fn rotate_anchor(anchor: Vec2, width: f32, height: f32, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let rotated_w = (width * cos).abs() + (height * sin).abs();
    let rotated_h = (width * sin).abs() + (height * cos).abs();
    let from_center = anchor - Vec2::new(width * 0.5, height * 0.5);
    Vec2::new(rotated_w * 0.5, rotated_h * 0.5) + from_center.rotated_on_screen(degrees)
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("image", &self.image)
            .field("pos", &self.pos)
            .field("angle", &self.angle)
            .field("scale", &self.scale)
            .field("flip_x", &self.flip_x)
            .field("flip_y", &self.flip_y)
            .field("size", &self.surface.size())
            .finish_non_exhaustive()
    }
}
