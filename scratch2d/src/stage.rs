use std::sync::Arc;

use crate::assets::Assets;
use crate::display::Display;
use crate::error::Result;
use crate::math::Vec2;
use crate::render::{Canvas, Color, Surface, TextStyle};

/// What the stage paints behind the actors.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Color(Color),
    Image { key: String, surface: Arc<Surface> },
}

/// The backdrop of the game: a solid colour or a background image.
#[derive(Debug)]
pub struct Stage {
    background: Background,
    display: Display,
}

impl Stage {
    /// A black stage for the given display.
    pub fn new(display: Display) -> Self {
        Self {
            background: Background::Color(Color::BLACK),
            display,
        }
    }

    /// Paint the background. Call this first in `draw`.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        match &self.background {
            Background::Image { surface, .. } => {
                canvas.clear();
                canvas.blit(surface, Vec2::ZERO);
            }
            Background::Color(color) => canvas.fill(*color),
        }
    }

    /// Use the image registered as `key` as the backdrop.
    pub fn switch_to_image(&mut self, assets: &mut Assets, key: &str) -> Result<()> {
        let surface = assets.load(key)?;
        log::debug!("stage backdrop switched to image {key:?}");
        self.background = Background::Image {
            key: key.to_string(),
            surface,
        };
        Ok(())
    }

    /// Use a solid colour as the backdrop.
    pub fn switch_to_color(&mut self, color: impl Into<Color>) {
        self.background = Background::Color(color.into());
    }

    /// Use a named (`"white"`) or `#rrggbb` colour as the backdrop.
    ///
    /// An unknown name leaves the current backdrop in place.
    pub fn switch_to_color_name(&mut self, name: &str) -> Result<()> {
        let color = Color::try_from(name)?;
        self.switch_to_color(color);
        Ok(())
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn write_text(
        &self,
        canvas: &mut impl Canvas,
        text: &str,
        pos: impl Into<Vec2>,
        style: &TextStyle,
    ) -> Result<()> {
        canvas.draw_text(text, pos.into(), style)
    }

    /// Size of the surface currently drawn on.
    pub fn get_size(&self, canvas: &impl Canvas) -> (u32, u32) {
        canvas.size()
    }

    pub fn height(&self) -> u32 {
        self.display.height()
    }

    pub fn width(&self) -> u32 {
        self.display.width()
    }

    pub fn title(&self) -> &str {
        self.display.title()
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub(crate) fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::error::Error;
    use crate::render::Screen;

    fn stage() -> Stage {
        Stage::new(Display::new(&EngineConfig::default().with_size(6, 4)))
    }

    #[test]
    fn color_mode_fills_screen() {
        let mut stage = stage();
        stage.switch_to_color(Color::rgb(0, 128, 255));
        let mut screen = Screen::new(6, 4);
        stage.draw(&mut screen);
        assert!(screen
            .frame()
            .pixels()
            .all(|p| *p == Color::rgb(0, 128, 255).to_rgba()));
    }

    #[test]
    fn image_mode_blits_at_origin_over_black() {
        let mut assets = Assets::new("unused");
        assets.insert("sky", Surface::filled(2, 2, Color::WHITE));

        let mut stage = stage();
        stage.switch_to_color(Color::rgb(255, 0, 0));
        stage.switch_to_image(&mut assets, "sky").unwrap();

        let mut screen = Screen::new(6, 4);
        screen.fill(Color::rgb(0, 255, 0));
        stage.draw(&mut screen);

        assert_eq!(screen.pixel(1, 1), Some(Color::WHITE.to_rgba()));
        assert_eq!(screen.pixel(3, 3), Some(Color::BLACK.to_rgba()));
    }

    #[test]
    fn last_mode_set_wins() {
        let mut assets = Assets::new("unused");
        assets.insert("sky", Surface::filled(2, 2, Color::WHITE));

        let mut stage = stage();
        stage.switch_to_image(&mut assets, "sky").unwrap();
        stage.switch_to_color(Color::WHITE);
        assert_eq!(stage.background(), &Background::Color(Color::WHITE));
    }

    #[test]
    fn color_names_switch_the_backdrop() {
        let mut stage = stage();
        stage.switch_to_color_name("white").unwrap();
        assert_eq!(stage.background(), &Background::Color(Color::WHITE));

        assert!(matches!(
            stage.switch_to_color_name("sparkly"),
            Err(Error::InvalidColor(_))
        ));
        assert_eq!(stage.background(), &Background::Color(Color::WHITE));
    }

    #[test]
    fn unknown_image_keeps_previous_backdrop() {
        let mut assets = Assets::new("unused");
        let mut stage = stage();
        stage.switch_to_color(Color::WHITE);
        assert!(stage.switch_to_image(&mut assets, "nope").is_err());
        assert_eq!(stage.background(), &Background::Color(Color::WHITE));
    }

    #[test]
    fn size_and_title_pass_through() {
        let stage = stage();
        let screen = Screen::new(10, 20);
        assert_eq!(stage.get_size(&screen), (10, 20));
        assert_eq!((stage.width(), stage.height()), (6, 4));
        assert_eq!(stage.title(), EngineConfig::default().title);
    }
}
