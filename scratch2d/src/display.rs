use crate::engine::EngineConfig;

/// Window attributes a game script can ask for: width, height, title and
/// the live size of the drawing surface.
///
/// Resolved once from the engine configuration; only the surface size changes
/// afterwards, when the host reports a resize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Display {
    title: String,
    width: u32,
    height: u32,
    screen_size: (u32, u32),
}

impl Display {
    pub fn new(config: &EngineConfig) -> Self {
        log::info!(
            "display {:?} resolved at {}x{}",
            config.title,
            config.width,
            config.height
        );
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            screen_size: (config.width, config.height),
        }
    }

    /// Configured window width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Configured window height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current size of the drawing surface.
    pub fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.screen_size = (width, height);
    }
}
