//! levelcore headless demo.
//!
//! Drives one level for a fixed number of frames without a window: a
//! spawner object releases bats on a level timer, bats animate and destroy
//! themselves, and every frame is rendered into a [`LogEmitter`] that
//! traces the quads it receives.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 600 --seed 7
//! ```

mod demo;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};

use levelcore::components::timer::Timer;
use levelcore::error::{CoreError, Result};
use levelcore::game::Game;
use levelcore::resources::animationstore::AnimationStore;
use levelcore::resources::gameconfig::GameConfig;
use levelcore::systems::render::LogEmitter;

use crate::demo::{ANIMATIONS_KEY, ENEMY, ENEMY_COUNT_KEY, Spawner};

const LEVEL_KEY: &str = "cave";
const SPAWN_INTERVAL: f32 = 0.5;
const SPAWN_LIMIT: u32 = 32;

#[derive(Parser)]
#[command(version, about = "Headless level-core demo: spawns, animates and sweeps game objects.")]
struct Cli {
    /// INI configuration file. Defaults to ./config.ini when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON array of animation records replacing the built-in set.
    #[arg(long, value_name = "PATH")]
    animations: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, value_name = "N")]
    frames: Option<u32>,

    /// Raw delta per frame, in seconds.
    #[arg(long, value_name = "SECONDS")]
    dt: Option<f32>,

    /// Seed for spawn placement.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let mut config = GameConfig::with_path(path);
            config.load_from_file()?;
            Ok(config)
        }
        None => {
            let mut config = GameConfig::new();
            config.load_from_file().ok(); // ignore errors, use defaults
            Ok(config)
        }
    }
}

fn load_animations(path: Option<PathBuf>) -> Result<AnimationStore> {
    let Some(path) = path else {
        return demo::default_animations();
    };
    let json = std::fs::read_to_string(&path)
        .map_err(|e| CoreError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let store = AnimationStore::from_json_str(&json)?;
    info!("Loaded {} animations from {}", store.len(), path.display());
    Ok(store)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config)?;
    let frames = cli.frames.unwrap_or(config.demo_frames);
    let dt = cli.dt.unwrap_or(config.demo_fixed_delta);
    if let Some(seed) = cli.seed {
        fastrand::seed(seed);
    }

    let animations = Arc::new(load_animations(cli.animations)?);
    for required in ["bat_fly", "bat_die"] {
        if !animations.contains(required) {
            warn!("animation '{}' missing; bats will not behave", required);
        }
    }

    let mut shadow = config.shadow_settings();
    shadow.enabled = true;

    let mut game = Game::with_config(config);
    game.globals_mut().set(ANIMATIONS_KEY, animations);

    let mut level = game.create_level(LEVEL_KEY);
    let timer = level.add_timer(Timer::new(SPAWN_INTERVAL, true));
    level.register(Spawner::new(timer, shadow, SPAWN_LIMIT), false);
    game.register_level(level);
    game.set_level(LEVEL_KEY)?;

    info!("Running {} frames at dt={}s", frames, dt);
    let mut emitter = LogEmitter::new();
    let mut spawned = 0;
    let mut swept = 0;
    for _ in 0..frames {
        if let Some(update) = game.tick(dt) {
            spawned += update.spawned.len();
            swept += update.swept.len();
        }
        game.render(&mut emitter);
    }

    let (alive, enemies, counted, released) = match game.current_level() {
        Some(level) => (
            level.registry().len(),
            level.registry().count_by_tag(ENEMY.tag),
            level.state().get_copied::<usize>(ENEMY_COUNT_KEY).unwrap_or(0),
            level
                .registry()
                .get_all::<Spawner>()
                .iter()
                .map(|s| s.spawned())
                .sum::<u32>(),
        ),
        None => (0, 0, 0, 0),
    };
    info!(
        "Done: {} frames, {:.2}s simulated, {} spawned ({} by spawners), {} swept, {} objects alive ({} enemies, {} at last spawner check), {} quads drawn",
        game.time().frame_count,
        game.time().elapsed,
        spawned,
        released,
        swept,
        alive,
        enemies,
        counted,
        emitter.drawn()
    );
    Ok(())
}
