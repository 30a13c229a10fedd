//! Aberred Sprite headless runner.
//!
//! Loads animation defaults from an INI file and sprite sheets from JSON,
//! spawns one animated sprite in a bevy_ecs `World` and runs the update loop
//! for a fixed number of ticks, logging every draw call the render pass
//! issues. Useful for checking sheet definitions without a window.
//!
//! # Main Loop
//!
//! 1. Update [`WorldTime`] with the fixed `--dt`
//! 2. Fire any `--switch` state requests scheduled for this tick
//! 3. Run the animation system
//! 4. Run the render pass into a recording renderer and log the commands
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=info cargo run -- --sheet sheets.json --name hero --state walk --ticks 20 --dt 0.05
//! ```

use std::path::PathBuf;

use aberredsprite::components::mapposition::MapPosition;
use aberredsprite::components::zindex::ZIndex;
use aberredsprite::events::spritestate::{SetSpriteStateEvent, set_sprite_state_observer};
use aberredsprite::render::{DrawCommand, RecordedSource, RecordingRenderer};
use aberredsprite::resources::animationconfig::AnimationConfig;
use aberredsprite::resources::animationstore::AnimationStore;
use aberredsprite::resources::worldtime::WorldTime;
use aberredsprite::systems::animation::animation;
use aberredsprite::systems::render::render_pass;
use aberredsprite::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::info;

/// Aberred Sprite headless animation runner
#[derive(Parser)]
#[command(version, about = "Plays a sprite sheet definition headlessly and logs the draw calls.")]
struct Cli {
    /// INI file with animation defaults. A missing file means built-in defaults.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON file with sprite sheet definitions.
    #[arg(long, value_name = "PATH")]
    sheet: PathBuf,

    /// Key of the sheet to instantiate.
    #[arg(long, default_value = "default")]
    name: String,

    /// State to start in. Defaults to the sheet's initial state, or the first state by name.
    #[arg(long)]
    state: Option<String>,

    /// Number of update ticks to run.
    #[arg(long, default_value_t = 10)]
    ticks: u32,

    /// Unscaled seconds per tick.
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Sprite anchor x position.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    x: f32,

    /// Sprite anchor y position.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    y: f32,

    /// Switch state at a tick, as TICK=STATE. May be repeated.
    #[arg(long, value_name = "TICK=STATE", value_parser = parse_switch)]
    switch: Vec<(u32, String)>,
}

fn parse_switch(value: &str) -> Result<(u32, String), String> {
    let (tick, state) = value
        .split_once('=')
        .ok_or_else(|| format!("expected TICK=STATE, got '{}'", value))?;
    let tick = tick
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid tick '{}': {}", tick, e))?;
    Ok((tick, state.trim().to_string()))
}

fn describe(command: &DrawCommand) -> String {
    fn source_name(source: &RecordedSource) -> String {
        match source {
            RecordedSource::Image(img) => format!("image {}x{}", img.width(), img.height()),
            RecordedSource::Texture(key) => format!("texture '{}'", key),
        }
    }
    match command {
        DrawCommand::Frame {
            source,
            transform,
            flip,
            ..
        } => format!(
            "draw {} at ({:.1}, {:.1}) scale ({:.2}, {:.2}) flip {}",
            source_name(source),
            transform.position.x,
            transform.position.y,
            transform.scale.x,
            transform.scale.y,
            flip.as_str()
        ),
        DrawCommand::Region {
            source,
            region,
            transform,
            ..
        } => format!(
            "draw {} region ({}, {}, {}x{}) at ({:.1}, {:.1}) scale ({:.2}, {:.2})",
            source_name(source),
            region.x,
            region.y,
            region.width,
            region.height,
            transform.position.x,
            transform.position.y,
            transform.scale.x,
            transform.scale.y
        ),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AnimationConfig::with_path(&cli.config);
    if cli.config.exists() {
        config.load_from_file()?;
    } else {
        info!("Config {} not found, using defaults", cli.config.display());
    }

    let mut store = AnimationStore::new();
    store.load_json_file(&cli.sheet)?;
    let mut sprite = store.instantiate(&cli.name, &config)?;

    if let Some(state) = &cli.state {
        sprite.set_state(state)?;
    }
    if sprite.state().is_none() {
        let first = sprite
            .registry()
            .names()
            .first()
            .map(|name| name.to_string())
            .ok_or("sheet has no states")?;
        sprite.set_state(&first)?;
    }
    info!(
        "Playing sheet '{}' in state '{}' ({} states)",
        cli.name,
        sprite.state().unwrap_or_default(),
        sprite.registry().len()
    );

    let mut world = World::new();
    world.insert_resource(WorldTime::with_time_scale(config.time_scale));
    world.insert_resource(config);
    world.insert_resource(store);
    world.add_observer(set_sprite_state_observer);
    let entity = world
        .spawn((sprite, MapPosition::new(cli.x, cli.y), ZIndex(0)))
        .id();
    world.flush();

    let mut schedule = Schedule::default();
    schedule.add_systems(animation);
    let mut renderer = RecordingRenderer::default();

    for tick in 0..cli.ticks {
        update_world_time(&mut world, cli.dt);
        for (_, state) in cli.switch.iter().filter(|(at, _)| *at == tick) {
            world.trigger(SetSpriteStateEvent::new(entity, state.as_str()));
        }
        schedule.run(&mut world);
        render_pass(&mut world, &mut renderer);
        for command in renderer.drain() {
            info!("tick {:>4}: {}", tick, describe(&command));
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("12=walk"), Ok((12, "walk".to_string())));
        assert_eq!(parse_switch(" 3 = idle "), Ok((3, "idle".to_string())));
        assert!(parse_switch("walk").is_err());
        assert!(parse_switch("x=walk").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "aberredsprite",
            "--sheet",
            "s.json",
            "--switch",
            "2=run",
            "--x",
            "-5",
        ])
        .unwrap();
        assert_eq!(cli.sheet, PathBuf::from("s.json"));
        assert_eq!(cli.switch, vec![(2, "run".to_string())]);
        assert_eq!(cli.x, -5.0);
        assert_eq!(cli.ticks, 10);
    }
}
