//! SpriteStash - Command-line tool for slicing spritesheets into animation states

use std::process::ExitCode;

use spritestash::cli;

fn main() -> ExitCode {
    cli::run()
}
