mod assets;
mod game;
mod snake;
mod state;
mod term;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use assets::SpriteSet;
use game::SnakeGame;

/// Board positions are in pixel units and always grid-aligned.
pub type Px = i32;
pub type Cell = (Px, Px);

const ASSET_DIR: &str = "assets";
const LOG_FILE: &str = "fruitsnake.log";

fn main() -> Result<()> {
    // Stdout is the drawing surface, so logs go to a file
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)
        .context("failed to initialize logging")?;

    // All four sprites have to be in before the game is allowed to start
    let sprites = SpriteSet::load(Path::new(ASSET_DIR)).context("failed to load sprites")?;
    info!("sprites loaded from {}/", ASSET_DIR);

    let mut game = SnakeGame::new(sprites)?;
    game.run()
}
