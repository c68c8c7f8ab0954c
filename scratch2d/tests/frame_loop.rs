use std::time::Duration;

use anyhow::Result;
use scratch2d::{
    Actor, Color, Engine, EngineConfig, EngineContext, Game, KeyCode, MouseButton, Surface, Vec2,
};

/// A walking alien: moves right every frame, wraps around past x = 500,
/// changes image on R and reacts to clicks.
struct Walker {
    alien: Option<Actor>,
    hits: usize,
    misses: usize,
    keys_seen: Vec<KeyCode>,
}

impl Walker {
    fn new() -> Self {
        Self {
            alien: None,
            hits: 0,
            misses: 0,
            keys_seen: Vec::new(),
        }
    }

    fn alien(&self) -> &Actor {
        self.alien.as_ref().expect("init ran")
    }
}

impl Game for Walker {
    fn init(&mut self, ctx: &mut EngineContext) -> Result<()> {
        ctx.assets().insert("alien", Surface::filled(10, 10, Color::WHITE));
        ctx.assets().insert("hurt", Surface::filled(10, 10, Color::rgb(255, 0, 0)));
        ctx.stage_mut().switch_to_color(Color::rgb(0, 0, 255));

        let mut alien = ctx.actor("alien")?;
        alien.go_to(50.0, 50.0);
        self.alien = Some(alien);
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext) -> Result<()> {
        let r_pressed = ctx.key().r_is_pressed();
        let alien = self.alien.as_mut().expect("init ran");
        alien.move_forward(2.0);
        if alien.x_position() > 500.0 {
            alien.go_to(-50.0, 50.0);
        }
        if r_pressed {
            alien.switch_to_image(ctx.assets(), "alien")?;
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut EngineContext) -> Result<()> {
        ctx.draw_stage();
        ctx.draw_actor(self.alien());
        Ok(())
    }

    fn on_mouse_down(&mut self, ctx: &mut EngineContext, pos: Vec2, _button: MouseButton) -> Result<()> {
        let alien = self.alien.as_mut().expect("init ran");
        if alien.collide_with(pos) {
            alien.switch_to_image(ctx.assets(), "hurt")?;
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        Ok(())
    }

    fn on_key_down(&mut self, _ctx: &mut EngineContext, key: KeyCode) -> Result<()> {
        self.keys_seen.push(key);
        Ok(())
    }
}

fn engine() -> Engine {
    Engine::new(
        EngineConfig::default()
            .with_title("Beispiel")
            .with_size(400, 100)
            .with_image_root("no-images-on-disk"),
    )
}

#[test]
fn frames_move_and_draw_the_alien() -> Result<()> {
    let mut engine = engine();
    let mut game = Walker::new();

    engine.step(&mut game, Duration::from_millis(16))?;
    assert_eq!(game.alien().position(), Vec2::new(52.0, 50.0));

    let screen = engine.context().screen();
    // Actor drawn over the blue backdrop.
    assert_eq!(screen.pixel(50, 50), Some(Color::WHITE.to_rgba()));
    assert_eq!(screen.pixel(5, 5), Some(Color::rgb(0, 0, 255).to_rgba()));

    engine.step(&mut game, Duration::from_millis(16))?;
    assert_eq!(engine.context().elapsed_time(), Duration::from_millis(32));
    Ok(())
}

#[test]
fn alien_wraps_around() -> Result<()> {
    let mut engine = engine();
    let mut game = Walker::new();
    engine.init(&mut game)?;
    game.alien.as_mut().unwrap().go_to(499.0, 50.0);

    engine.step(&mut game, Duration::ZERO)?;
    assert_eq!(game.alien().x_position(), -50.0);
    assert!(game.alien().left_the_stage(engine.context().screen_size()));
    Ok(())
}

#[test]
fn clicks_hit_with_pixel_precision() -> Result<()> {
    let mut engine = engine();
    let mut game = Walker::new();
    engine.init(&mut game)?;

    // Top-left of the alien is (45, 45); its first row and column never hit.
    engine.click(&mut game, Vec2::new(45.0, 45.0), MouseButton::Left)?;
    assert_eq!((game.hits, game.misses), (0, 1));
    assert_eq!(game.alien().image(), "alien");

    engine.click(&mut game, Vec2::new(50.0, 50.0), MouseButton::Left)?;
    assert_eq!((game.hits, game.misses), (1, 1));
    assert_eq!(game.alien().image(), "hurt");
    assert!(!engine.context().input().is_mouse_down(MouseButton::Left));
    Ok(())
}

#[test]
fn keys_reach_update_and_hooks() -> Result<()> {
    let mut engine = engine();
    let mut game = Walker::new();
    engine.init(&mut game)?;
    engine.click(&mut game, Vec2::new(50.0, 50.0), MouseButton::Left)?;
    assert_eq!(game.alien().image(), "hurt");

    engine.key_down(&mut game, KeyCode::KeyR)?;
    engine.key_down(&mut game, KeyCode::KeyR)?;
    assert_eq!(game.keys_seen, vec![KeyCode::KeyR]);

    engine.step(&mut game, Duration::ZERO)?;
    assert_eq!(game.alien().image(), "alien");

    engine.key_up(KeyCode::KeyR);
    assert!(!engine.context().key().r_is_pressed());
    Ok(())
}

#[test]
fn mouse_facade_records_visibility() {
    let mut engine = engine();
    engine.context_mut().mouse().hide();
    assert!(!engine.context().input().cursor_visible());
    engine.context_mut().mouse().show();
    assert!(engine.context().input().cursor_visible());
}

#[test]
fn exit_request_stops_run_frames() -> Result<()> {
    struct Quitter {
        frames: usize,
    }

    impl Game for Quitter {
        fn update(&mut self, ctx: &mut EngineContext) -> Result<()> {
            self.frames += 1;
            if self.frames == 3 {
                ctx.request_exit();
            }
            Ok(())
        }

        fn draw(&mut self, _ctx: &mut EngineContext) -> Result<()> {
            Ok(())
        }
    }

    let mut engine = engine();
    let mut game = Quitter { frames: 0 };
    engine.run_frames(&mut game, 10)?;
    assert_eq!(game.frames, 3);
    Ok(())
}

#[test]
fn missing_image_surfaces_as_error() {
    struct Broken;

    impl Game for Broken {
        fn init(&mut self, ctx: &mut EngineContext) -> Result<()> {
            ctx.actor("ghost")?;
            Ok(())
        }

        fn update(&mut self, _ctx: &mut EngineContext) -> Result<()> {
            Ok(())
        }

        fn draw(&mut self, _ctx: &mut EngineContext) -> Result<()> {
            Ok(())
        }
    }

    let mut engine = engine();
    let err = engine.step(&mut Broken, Duration::ZERO).unwrap_err();
    let root = err.root_cause().to_string();
    assert!(root.contains("ghost"), "{root}");
}
