use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::KeyCode,
};

use crate::{
    actor::Actor,
    assets::Assets,
    display::Display,
    input::InputState,
    keys::Keys,
    math::Vec2,
    mouse::Mouse,
    render::{Canvas, Screen, TextStyle},
    stage::Stage,
};

/// Window and asset settings for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Directory that image keys are resolved against.
    pub image_root: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "scratch2d".into(),
            width: 800,
            height: 600,
            image_root: PathBuf::from("images"),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file, falling back to the defaults when the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!(
                "no configuration at {}; using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Override the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the window size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Override the directory images are loaded from.
    #[must_use]
    pub fn with_image_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.image_root = root.into();
        self
    }
}

/// Drives a [`Game`] one frame at a time.
///
/// The host owns the window: it forwards winit events through
/// [`Engine::handle_window_event`], calls [`Engine::frame`] once per redraw and
/// presents [`Screen::frame`].
pub struct Engine {
    ctx: EngineContext,
    initialized: bool,
    last_frame: Instant,
}

impl Engine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            ctx: EngineContext::new(&config),
            initialized: false,
            last_frame: Instant::now(),
        }
    }

    /// Create an engine from a JSON configuration file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = EngineConfig::load(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        Ok(Self::new(config))
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    /// Call `Game::init` unless it already ran.
    pub fn init<G: Game>(&mut self, game: &mut G) -> Result<()> {
        if !self.initialized {
            self.initialized = true;
            game.init(&mut self.ctx).context("game init failed")?;
        }
        Ok(())
    }

    /// Run one update/draw cycle, timed against the previous call.
    pub fn frame<G: Game>(&mut self, game: &mut G) -> Result<()> {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.step(game, delta)
    }

    /// Run one update/draw cycle with an explicit frame duration.
    pub fn step<G: Game>(&mut self, game: &mut G, delta: Duration) -> Result<()> {
        self.init(game)?;
        self.ctx.update_time(delta);

        let result = game
            .update(&mut self.ctx)
            .context("game update failed")
            .and_then(|()| game.draw(&mut self.ctx).context("game draw failed"));

        // Pressed/released flags last one frame, failed or not.
        self.ctx.input.begin_frame();
        result
    }

    /// Run up to `frames` cycles, stopping early if the game asks to exit.
    pub fn run_frames<G: Game>(&mut self, game: &mut G, frames: usize) -> Result<()> {
        for _ in 0..frames {
            if self.ctx.exit_requested {
                break;
            }
            self.frame(game)?;
        }
        Ok(())
    }

    /// Feed a winit window event into the input state and the game's hooks.
    pub fn handle_window_event<G: Game>(&mut self, game: &mut G, event: &WindowEvent) -> Result<()> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = self.ctx.input.handle_key(event) {
                    game.on_key_down(&mut self.ctx, key)?;
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.mouse_down(game, *button)?,
                ElementState::Released => self.mouse_up(game, *button)?,
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.ctx.input.handle_cursor_moved(position.x, position.y);
            }
            WindowEvent::Resized(size) => self.ctx.resize(size.width, size.height),
            WindowEvent::CloseRequested => self.ctx.request_exit(),
            _ => {}
        }
        Ok(())
    }

    /// Press a key and call `Game::on_key_down` if it was not already held.
    pub fn key_down<G: Game>(&mut self, game: &mut G, key: KeyCode) -> Result<()> {
        if self.ctx.input.press_key(key) {
            game.on_key_down(&mut self.ctx, key)?;
        }
        Ok(())
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.ctx.input.release_key(key);
    }

    /// Press a mouse button at the current cursor position.
    pub fn mouse_down<G: Game>(&mut self, game: &mut G, button: MouseButton) -> Result<()> {
        self.ctx.input.press_mouse(button);
        let pos = self.ctx.input.mouse_position();
        game.on_mouse_down(&mut self.ctx, pos, button)
    }

    /// Release a mouse button at the current cursor position.
    pub fn mouse_up<G: Game>(&mut self, game: &mut G, button: MouseButton) -> Result<()> {
        self.ctx.input.release_mouse(button);
        let pos = self.ctx.input.mouse_position();
        game.on_mouse_up(&mut self.ctx, pos, button)
    }

    /// Move the cursor, then press and release `button` there.
    pub fn click<G: Game>(&mut self, game: &mut G, pos: Vec2, button: MouseButton) -> Result<()> {
        self.ctx.input.set_mouse_position(pos.x, pos.y);
        self.mouse_down(game, button)?;
        self.mouse_up(game, button)
    }
}

/// Shared state handed to game code every frame.
pub struct EngineContext {
    delta_time: Duration,
    elapsed_time: Duration,
    exit_requested: bool,
    input: InputState,
    screen: Screen,
    assets: Assets,
    stage: Stage,
}

impl EngineContext {
    fn new(config: &EngineConfig) -> Self {
        Self {
            delta_time: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            exit_requested: false,
            input: InputState::new(),
            screen: Screen::new(config.width, config.height),
            assets: Assets::new(config.image_root.clone()),
            stage: Stage::new(Display::new(config)),
        }
    }

    fn update_time(&mut self, delta: Duration) {
        self.delta_time = delta;
        self.elapsed_time += delta;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.screen.resize(width, height);
        self.stage.display_mut().resize(width, height);
    }

    /// Duration between the current and previous frames.
    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    /// Total time the game has been running.
    pub fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }

    /// Named keyboard queries.
    pub fn key(&self) -> Keys<'_> {
        Keys::new(&self.input)
    }

    /// Mouse getters and show/hide commands.
    pub fn mouse(&mut self) -> Mouse<'_> {
        Mouse::new(&mut self.input)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn display(&self) -> &Display {
        self.stage.display()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Size of the drawing surface, for `touching_the_edge`/`left_the_stage`.
    pub fn screen_size(&self) -> (u32, u32) {
        self.screen.size()
    }

    pub fn assets(&mut self) -> &mut Assets {
        &mut self.assets
    }

    /// Create an actor from an image key (convenience method).
    pub fn actor(&mut self, image: &str) -> Result<Actor> {
        Actor::new(&mut self.assets, image)
            .with_context(|| format!("failed to create actor from image {image:?}"))
    }

    /// Use an image as the stage backdrop (convenience method).
    pub fn switch_stage_to_image(&mut self, image: &str) -> Result<()> {
        self.stage
            .switch_to_image(&mut self.assets, image)
            .with_context(|| format!("failed to switch stage to image {image:?}"))
    }

    /// Paint the stage backdrop onto the screen.
    pub fn draw_stage(&mut self) {
        self.stage.draw(&mut self.screen);
    }

    pub fn draw_actor(&mut self, actor: &Actor) {
        actor.draw(&mut self.screen);
    }

    /// Write text onto the screen. Without a loaded font this logs a warning
    /// and draws nothing.
    pub fn write_text(&mut self, text: &str, pos: impl Into<Vec2>, style: &TextStyle) {
        if let Err(err) = self.stage.write_text(&mut self.screen, text, pos, style) {
            log::warn!("could not draw text {text:?}: {err}");
        }
    }

    /// Request that the host stop calling `frame`.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Trait implemented by user code to hook into the frame loop.
pub trait Game {
    /// Called once before the first frame.
    fn init(&mut self, _ctx: &mut EngineContext) -> Result<()> {
        Ok(())
    }

    /// Update game state. Called once per frame before drawing.
    fn update(&mut self, ctx: &mut EngineContext) -> Result<()>;

    /// Draw the current frame.
    fn draw(&mut self, ctx: &mut EngineContext) -> Result<()>;

    fn on_mouse_down(&mut self, _ctx: &mut EngineContext, _pos: Vec2, _button: MouseButton) -> Result<()> {
        Ok(())
    }

    fn on_mouse_up(&mut self, _ctx: &mut EngineContext, _pos: Vec2, _button: MouseButton) -> Result<()> {
        Ok(())
    }

    fn on_key_down(&mut self, _ctx: &mut EngineContext, _key: KeyCode) -> Result<()> {
        Ok(())
    }
}
