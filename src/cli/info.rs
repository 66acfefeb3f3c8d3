//! Info and preview command implementations

use std::path::Path;
use std::process::ExitCode;

use crate::output::{save_png, scale_image};
use crate::overview::render_overview;
use crate::persist::{load, try_load};

use super::{failure, print_tree, EXIT_SUCCESS};

/// Execute the info command
pub fn run_info(metadata: &Path) -> ExitCode {
    match try_load(metadata) {
        Ok(Some(entity)) => {
            print_tree(&entity);
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(None) => {
            println!("Nothing to load: no saved sprite entity at {}", metadata.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => failure(e),
    }
}

/// Execute the preview command - write the overview of every state to a PNG
pub fn run_preview(metadata: &Path, output: &Path, scale: u32) -> ExitCode {
    let entity = match load(metadata) {
        Ok(entity) => entity,
        Err(e) => return failure(e),
    };

    let image = scale_image(render_overview(&entity), scale);
    if let Err(e) = save_png(&image, output) {
        return failure(e);
    }

    println!(
        "Saved: {} ({}x{}, {} state(s))",
        output.display(),
        image.width(),
        image.height(),
        entity.states().len()
    );
    ExitCode::from(EXIT_SUCCESS)
}
