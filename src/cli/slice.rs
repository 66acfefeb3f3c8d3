//! Slice command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::navigator::Navigator;
use crate::slicer::slice_file;

use super::{config_failure, failure, load_settings, print_tree, EXIT_SUCCESS};

/// Execute the slice command
pub fn run_slice(
    sheet: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    dry_run: bool,
) -> ExitCode {
    let settings = match load_settings(config_path, overrides) {
        Ok(s) => s,
        Err(e) => return config_failure(e),
    };
    let slice = &settings.slice;

    let entity = match slice_file(sheet, slice.frame_width, slice.frame_height, slice.background) {
        Ok(entity) => entity,
        Err(e) => return failure(e),
    };

    if dry_run {
        print_tree(&entity);
        println!("Dry run: nothing written");
        return ExitCode::from(EXIT_SUCCESS);
    }

    let mut navigator = match Navigator::new(entity) {
        Ok(n) => n,
        Err(e) => return failure(e),
    };
    match navigator.save(&settings.output.root) {
        Ok(metadata) => {
            print_tree(navigator.entity());
            println!("Saved {}", metadata.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => failure(e),
    }
}
