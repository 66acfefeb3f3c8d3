//! Edit command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::navigator::{EditTarget, Navigator};
use crate::persist::{load, save};

use super::{failure, print_tree, Target, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the edit command - change names/descriptions and save back in place
pub fn run_edit(
    metadata: &Path,
    target: Target,
    state: usize,
    sprite: usize,
    name: Option<&str>,
    description: Option<&str>,
) -> ExitCode {
    if name.is_none() && description.is_none() {
        eprintln!("Error: Nothing to edit; pass --name and/or --description");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let entity = match load(metadata) {
        Ok(entity) => entity,
        Err(e) => return failure(e),
    };
    let mut navigator = match Navigator::new(entity) {
        Ok(n) => n,
        Err(e) => return failure(e),
    };

    if target != Target::Entity {
        let sprite_count = navigator.entity().states().get(state).map(|s| s.len());
        // select() quietly falls back to sprite 0; an explicit bad index is an error here
        if target == Target::Sprite && sprite_count.is_some_and(|n| sprite >= n) {
            eprintln!("Error: State {} has no sprite {}", state, sprite);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        if let Err(e) = navigator.select(state, sprite) {
            return failure(e);
        }
    }

    let (name_field, description_field) = match target {
        Target::Entity => (EditTarget::EntityName, EditTarget::EntityDescription),
        Target::State => (EditTarget::StateName, EditTarget::StateDescription),
        Target::Sprite => (EditTarget::SpriteName, EditTarget::SpriteDescription),
    };
    let edits = [(name_field, name), (description_field, description)];
    for (field, value) in edits {
        if let Some(value) = value {
            if let Err(e) = navigator.set_text(field, value) {
                return failure(e);
            }
            log::debug!("{:?} set to '{}'", field, value);
        }
    }

    let folder = metadata.parent().unwrap_or(Path::new("."));
    let mut entity = navigator.into_entity();
    match save(&mut entity, folder) {
        Ok(path) => {
            print_tree(&entity);
            println!("Saved {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => failure(e),
    }
}
