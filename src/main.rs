use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{info, warn};

use skyward::engine::Engine;
use skyward::flight::{GroundContact, OpMode};
use skyward::window::{FrameLimiter, KeyboardControls, Window, WindowEvent};
use skyward::world::load_world;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
    Flight,
    Walk,
    Debug,
}

impl ModeArg {
    fn to_runtime(self) -> OpMode {
        match self {
            ModeArg::Flight => OpMode::Flight,
            ModeArg::Walk => OpMode::Walk,
            ModeArg::Debug => OpMode::Debug,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Flat-shaded light aircraft flight simulator")]
struct Args {
    /// World file to fly over
    #[arg(long, default_value = "assets/world.wld")]
    world: PathBuf,

    /// Flight, world walk-through, or flight with a telemetry dump
    #[arg(long, value_enum, default_value_t = ModeArg::Flight)]
    mode: ModeArg,

    /// Window size as a multiple of 320x200
    #[arg(long, default_value_t = 3)]
    scale: u32,

    /// Leave the sky and ground undrawn
    #[arg(long)]
    no_horizon: bool,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let world = load_world(&args.world).map_err(|e| e.to_string())?;
    let mode = args.mode.to_runtime();
    let mut engine = Engine::new(world, mode);
    engine.set_horizon(!args.no_horizon);

    let mut window = Window::new("Skyward", args.scale)?;
    let mut frame_limiter = FrameLimiter::new(&window);
    let mut controls = KeyboardControls::new();
    let mut argb = Vec::new();
    let mut screenshots = 0;

    'running: loop {
        for event in window.poll_events(&mut controls) {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Dump => println!("{}", engine.telemetry()),
                WindowEvent::ToggleHorizon => {
                    let enabled = !engine.horizon();
                    engine.set_horizon(enabled);
                }
                WindowEvent::Screenshot => {
                    screenshots += 1;
                    let path = format!("skyward-{:03}.png", screenshots);
                    if let Err(err) = engine.save_screenshot(&path) {
                        warn!("Could not save {}: {}", path, err);
                    }
                }
            }
        }

        let elapsed = frame_limiter.wait_and_get_delta(&window);
        let outcome = engine.frame(&controls.snapshot(Some(elapsed)));
        if outcome.crashed() {
            controls = KeyboardControls::new();
            window.set_title("Skyward - crashed")?;
        } else if outcome.contact == GroundContact::Landed {
            window.set_title("Skyward")?;
        }

        if mode == OpMode::Debug {
            println!("{}", engine.telemetry());
        }

        engine.expand_frame(&mut argb);
        window.present(&argb)?;
    }

    info!("{}", engine.frame_report());
    Ok(())
}
