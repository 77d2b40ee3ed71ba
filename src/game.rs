use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use log::info;

use crate::assets::SpriteSet;
use crate::snake::Direction;
use crate::state::{Board, GameState, Phase};
use crate::term::TermManager;
use crate::{Cell, Px};

const TICK_INTERVAL_MS: u64 = 80;
const FRAME_INTERVAL_MS: u64 = 16;
const CELL_SIZE: Px = 1;

const HELP_TEXT: &str = " P: pause   R: resume / restart ";

pub struct SnakeGame {
    term: TermManager,
    sprites: SpriteSet,
    state: GameState,
}

impl SnakeGame {
    pub fn new(sprites: SpriteSet) -> Result<Self> {
        let term = TermManager::new()?;
        let (width, height) = term.size();
        let (play_w, play_h) = play_area(width, height);
        let state = GameState::new(Board::new(play_w, play_h, CELL_SIZE), &mut rand::thread_rng());

        Ok(SnakeGame { term, sprites, state })
    }

    /// The main loop: sleep one frame, drain input, advance the simulation
    /// if a full tick has elapsed, then redraw. The simulation rate is
    /// fixed; the render rate is whatever the frame interval gives us.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;

        let (width, height) = self.term.size();
        info!("starting on a {}x{} terminal", width, height);

        let tick = Duration::from_millis(TICK_INTERVAL_MS);
        let mut last_step = Instant::now();

        loop {
            sleep(Duration::from_millis(FRAME_INTERVAL_MS));

            let mut quit = false;
            for event in self.term.poll_events()? {
                match event {
                    Event::Key(ref ev) if is_ctrl_c(ev) => quit = true,
                    Event::Key(KeyEvent { code, modifiers: _ }) => self.handle_key(code),
                    Event::Resize(w, h) => {
                        self.term.set_size(w, h);
                        let (play_w, play_h) = play_area(w, h);
                        self.state.resize(play_w, play_h);
                    }
                    _ => {}
                }
            }

            if quit {
                break;
            }

            // The tick timer resets whether or not the step ran; pausing
            // does not bank up simulation time
            if last_step.elapsed() >= tick {
                self.state.step(&mut rand::thread_rng());
                last_step = Instant::now();
            }

            self.render()?;
        }

        self.term.restore()?;
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.state.steer(Direction::Up),
            KeyCode::Down => self.state.steer(Direction::Down),
            KeyCode::Left => self.state.steer(Direction::Left),
            KeyCode::Right => self.state.steer(Direction::Right),
            KeyCode::Char('p') => self.state.toggle_pause(),
            KeyCode::Char('r') => self.state.resume_or_restart(&mut rand::thread_rng()),
            _ => {}
        }
    }

    /// Redraws the whole frame from current state, every frame, whether or
    /// not a simulation step happened.
    fn render(&mut self) -> crossterm::Result<()> {
        let (width, height) = self.term.size();

        let bg = self.sprites.background;
        for y in 0..height {
            for x in 0..width {
                self.term.draw_glyph((x, y), bg.glyph, bg.color)?;
            }
        }

        match self.state.phase() {
            Phase::Running => {
                self.draw_play_field()?;
                let score = format!(" Score: {} ", self.state.score());
                self.term.draw_text((2, 0), &score, Color::White)?;
            }
            Phase::GameOver => {
                let score = format!("Score: {}", self.state.score());
                self.term.draw_center_lines(
                    &["Game over!", &score, "", "Press R to restart"],
                    Color::Red,
                )?;
            }
            Phase::Paused => {
                self.term
                    .draw_center_lines(&["Game paused", "Press R to resume"], Color::Yellow)?;
            }
        }

        let help_x = width.saturating_sub(HELP_TEXT.chars().count() as u16 + 2);
        self.term.draw_text((help_x, 0), HELP_TEXT, Color::White)?;

        self.term.flush()
    }

    fn draw_play_field(&mut self) -> crossterm::Result<()> {
        let cell = self.state.board().cell();

        for (i, &segment) in self.state.snake().body().iter().enumerate() {
            let sprite = if i == 0 { self.sprites.head } else { self.sprites.body };
            self.term.draw_glyph(to_screen(segment, cell), sprite.glyph, sprite.color)?;
        }

        let fruit = self.sprites.fruit;
        for &pos in self.state.fruits() {
            self.term.draw_glyph(to_screen(pos, cell), fruit.glyph, fruit.color)?;
        }

        self.term.draw_border()
    }
}

// The play field sits inside a one-character border.
fn to_screen((x, y): Cell, cell: Px) -> (u16, u16) {
    ((x / cell + 1) as u16, (y / cell + 1) as u16)
}

fn play_area(term_width: u16, term_height: u16) -> (Px, Px) {
    (
        term_width.saturating_sub(2) as Px,
        term_height.saturating_sub(2) as Px,
    )
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
