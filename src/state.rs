use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::snake::{Direction, Snake};
use crate::{Cell, Px};

pub const FRUIT_COUNT: usize = 3;
pub const INITIAL_SNAKE_LENGTH: usize = 3;

const SPAWN_ATTEMPTS: u32 = 128;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

#[derive(Copy, Clone, Debug)]
pub struct Board {
    width: Px,
    height: Px,
    cell: Px,
}

impl Board {
    pub fn new(width: Px, height: Px, cell: Px) -> Self {
        let mut board = Board { width: 0, height: 0, cell };
        board.resize(width, height);
        board
    }

    /// Quantizes the pixel bounds to whole cells, keeping at least one.
    /// Live snake and fruit positions are left untouched, so shrinking the
    /// board mid-game can strand them outside the playable area.
    pub fn resize(&mut self, width: Px, height: Px) {
        self.width = (width / self.cell).max(1) * self.cell;
        self.height = (height / self.cell).max(1) * self.cell;
    }

    pub fn contains(&self, (x, y): Cell) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    pub fn random_cell(&self, rng: &mut impl Rng) -> Cell {
        let x = rng.gen_range(0..self.width / self.cell) * self.cell;
        let y = rng.gen_range(0..self.height / self.cell) * self.cell;
        (x, y)
    }

    pub fn width(&self) -> Px {
        self.width
    }

    pub fn height(&self) -> Px {
        self.height
    }

    pub fn cell(&self) -> Px {
        self.cell
    }

    fn center(&self) -> Cell {
        let x = (self.width / 2 / self.cell) * self.cell;
        let y = (self.height / 2 / self.cell) * self.cell;
        (x, y)
    }
}

/// All mutable game data, owned by the loop driver. Key events only ever
/// touch the pending direction and the phase; the snake, fruits and score
/// are mutated by `step` alone.
pub struct GameState {
    board: Board,
    snake: Snake,
    fruits: Vec<Cell>,
    score: u32,
    phase: Phase,
    pending: Option<Direction>,
}

impl GameState {
    pub fn new(board: Board, rng: &mut impl Rng) -> Self {
        let snake = Snake::new(board.center(), INITIAL_SNAKE_LENGTH, Direction::Right, board.cell());
        let mut state = GameState {
            board,
            snake,
            fruits: Vec::with_capacity(FRUIT_COUNT),
            score: 0,
            phase: Phase::Running,
            pending: None,
        };
        state.spawn_fruits(rng);
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruits(&self) -> &[Cell] {
        &self.fruits
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn resize(&mut self, width: Px, height: Px) {
        self.board.resize(width, height);
        debug!("board resized to {}x{}", self.board.width(), self.board.height());
    }

    /// One simulation tick: advance the head one cell, end the game on a
    /// wall or body hit, grow when a fruit is reached.
    pub fn step(&mut self, rng: &mut impl Rng) {
        if self.phase != Phase::Running {
            return;
        }

        if let Some(direction) = self.pending.take() {
            self.snake.set_direction(direction);
        }

        let head = self.snake.next_head(self.board.cell());
        if !self.board.contains(head) || self.snake.occupies(head) {
            self.phase = Phase::GameOver;
            info!("game over, final score {}", self.score);
            return;
        }

        self.snake.push_head(head);

        // Only the head cell is tested, so at most one fruit per tick;
        // the first match in insertion order wins.
        if let Some(i) = self.fruits.iter().position(|&fruit| fruit == head) {
            self.score += 1;
            self.fruits.remove(i);
            let replacement = self.spawn_fruit(rng);
            self.fruits.push(replacement);
        } else {
            self.snake.pop_tail();
        }
    }

    /// Directional input only applies while running, and only when it
    /// turns the snake onto the other axis.
    pub fn steer(&mut self, direction: Direction) {
        if self.phase != Phase::Running {
            return;
        }

        if direction.is_horizontal() != self.snake.direction().is_horizontal() {
            self.pending = Some(direction);
        }
    }

    pub fn toggle_pause(&mut self) {
        // Game over takes priority over the pause toggle
        match self.phase {
            Phase::GameOver => {}
            Phase::Running => self.phase = Phase::Paused,
            Phase::Paused => self.phase = Phase::Running,
        }
    }

    pub fn resume_or_restart(&mut self, rng: &mut impl Rng) {
        match self.phase {
            Phase::Paused => self.phase = Phase::Running,
            Phase::GameOver => self.restart(rng),
            Phase::Running => {}
        }
    }

    fn restart(&mut self, rng: &mut impl Rng) {
        self.snake = Snake::new(
            self.board.center(),
            INITIAL_SNAKE_LENGTH,
            Direction::Right,
            self.board.cell(),
        );
        self.score = 0;
        self.phase = Phase::Running;
        self.pending = None;
        self.spawn_fruits(rng);
        info!("game restarted");
    }

    fn spawn_fruits(&mut self, rng: &mut impl Rng) {
        self.fruits.clear();
        for _ in 0..FRUIT_COUNT {
            let fruit = self.spawn_fruit(rng);
            self.fruits.push(fruit);
        }
    }

    /// Random placement is cheap while the board is mostly empty; once the
    /// snake is dense enough to starve the retry loop, pick uniformly among
    /// the remaining free cells instead. Fruits may land on each other,
    /// only the snake is avoided.
    fn spawn_fruit(&self, rng: &mut impl Rng) -> Cell {
        for _ in 0..SPAWN_ATTEMPTS {
            let cell = self.board.random_cell(rng);
            if !self.snake.occupies(cell) {
                return cell;
            }
        }

        debug!("board too dense for random placement, scanning free cells");
        let cell = self.board.cell();
        let free: Vec<Cell> = (0..self.board.width() / cell)
            .flat_map(|cx| (0..self.board.height() / cell).map(move |cy| (cx * cell, cy * cell)))
            .filter(|&candidate| !self.snake.occupies(candidate))
            .collect();

        // A board fully covered by the snake has no free cell left;
        // any cell will do at that point, the game is about to end anyway
        free.choose(rng)
            .copied()
            .unwrap_or_else(|| self.board.random_cell(rng))
    }
}
