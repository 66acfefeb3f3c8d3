//! Play command implementation (headless playback)
//!
//! Stands in for a render loop: the clock is advanced in fixed steps of
//! `1 / tick_rate` seconds and a line is printed whenever the frame changes.

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::navigator::Navigator;
use crate::persist::load;

use super::{config_failure, failure, load_settings, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the play command
pub fn run_play(
    metadata: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    seconds: f64,
    state: usize,
    sprite: usize,
) -> ExitCode {
    if !seconds.is_finite() || seconds < 0.0 {
        eprintln!("Error: --seconds must be a non-negative number, got {}", seconds);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let settings = match load_settings(config_path, overrides) {
        Ok(s) => s,
        Err(e) => return config_failure(e),
    };

    let entity = match load(metadata) {
        Ok(entity) => entity,
        Err(e) => return failure(e),
    };
    let mut navigator = match Navigator::new(entity) {
        Ok(n) => n,
        Err(e) => return failure(e),
    };
    if let Err(e) = navigator.select(state, sprite) {
        return failure(e);
    }
    navigator.set_speed(i64::from(settings.playback.speed));
    navigator.set_playing(true);

    let tick_rate = settings.playback.tick_rate;
    let dt = 1.0 / f64::from(tick_rate);
    let ticks = (seconds * f64::from(tick_rate)).round() as u64;
    log::info!(
        "Playing '{}' for {}s at speed {} ({} ticks of {:.4}s)",
        navigator.entity().name(),
        seconds,
        navigator.speed(),
        ticks,
        dt
    );

    print_frame(&navigator, 0.0);
    let mut changes = 0usize;
    for tick in 1..=ticks {
        if navigator.tick(dt) > 0 {
            changes += 1;
            print_frame(&navigator, tick as f64 * dt);
        }
    }

    match navigator.status_lines() {
        Ok(lines) => {
            println!();
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => return failure(e),
    }
    println!("Frame changes: {}", changes);
    ExitCode::from(EXIT_SUCCESS)
}

fn print_frame(navigator: &Navigator, at: f64) {
    let state_name = navigator.current_state().map(|s| s.name()).unwrap_or_default();
    println!(
        "{:>8.3}s  state {} ({})  sprite {}",
        at,
        navigator.state_index(),
        state_name,
        navigator.sprite_index()
    );
}
