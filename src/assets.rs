use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use crossterm::style::Color;

/// One drawable game asset: a glyph plus the color it is drawn in.
#[derive(Copy, Clone, Debug)]
pub struct Sprite {
    pub glyph: char,
    pub color: Color,
}

pub struct SpriteSet {
    pub background: Sprite,
    pub head: Sprite,
    pub body: Sprite,
    pub fruit: Sprite,
}

impl SpriteSet {
    /// Loads the four game sprites by path. All of them have to be present
    /// and well-formed, or the game refuses to start.
    pub fn load(dir: &Path) -> Result<SpriteSet> {
        Ok(SpriteSet {
            background: load_sprite(dir, "background.sprite")?,
            head: load_sprite(dir, "head.sprite")?,
            body: load_sprite(dir, "body.sprite")?,
            fruit: load_sprite(dir, "fruit.sprite")?,
        })
    }
}

fn load_sprite(dir: &Path, name: &str) -> Result<Sprite> {
    let path = dir.join(name);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading sprite {}", path.display()))?;
    parse_sprite(&raw).with_context(|| format!("parsing sprite {}", path.display()))
}

// A sprite file is two lines: the glyph, then a named color.
fn parse_sprite(raw: &str) -> Result<Sprite> {
    let mut lines = raw.lines();

    let glyph = match lines.next().and_then(|line| line.chars().next()) {
        Some(ch) => ch,
        None => bail!("missing glyph line"),
    };

    let color = match lines.next() {
        Some(name) => parse_color(name.trim())?,
        None => bail!("missing color line"),
    };

    Ok(Sprite { glyph, color })
}

fn parse_color(name: &str) -> Result<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "white" => Color::White,
        "grey" => Color::Grey,
        "darkgrey" => Color::DarkGrey,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        other => bail!("unknown color '{}'", other),
    };

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_glyph_and_color() {
        let sprite = parse_sprite("@\nyellow\n").unwrap();
        assert_eq!(sprite.glyph, '@');
        assert_eq!(sprite.color, Color::Yellow);
    }

    #[test]
    fn color_names_are_case_insensitive() {
        assert_eq!(parse_color("DarkGreen").unwrap(), Color::DarkGreen);
    }

    #[test]
    fn unknown_colors_are_rejected() {
        assert!(parse_sprite("x\nchartreuse\n").is_err());
    }

    #[test]
    fn missing_lines_are_rejected() {
        assert!(parse_sprite("").is_err());
        assert!(parse_sprite("@").is_err());
    }

    #[test]
    fn the_shipped_sprites_load() {
        assert!(SpriteSet::load(Path::new("assets")).is_ok());
    }

    #[test]
    fn a_missing_file_fails_the_whole_set() {
        assert!(SpriteSet::load(Path::new("no-such-dir")).is_err());
    }
}
