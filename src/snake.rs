use crate::{Cell, Px};
use Direction::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (Px, Px) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }
}

pub struct Snake {
    body: Vec<Cell>, // element 0 is the head
    direction: Direction,
}

impl Snake {
    pub fn new(head: Cell, length: usize, direction: Direction, cell: Px) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length as Px)
            .map(|i| (head.0 - dx * cell * i, head.1 - dy * cell * i))
            .collect();
        Snake { body, direction }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// The cell the head would move into on the next step.
    pub fn next_head(&self, cell: Px) -> Cell {
        let (dx, dy) = self.direction.delta();
        (self.body[0].0 + dx * cell, self.body[0].1 + dy * cell)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.insert(0, cell);
    }

    pub fn pop_tail(&mut self) {
        self.body.pop();
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Reversals are rejected; turning back along the current axis would
    /// walk the head straight into the neck.
    pub fn set_direction(&mut self, new_direction: Direction) {
        match (new_direction, self.direction) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => {}
            _ => self.direction = new_direction,
        };
    }

    #[cfg(test)]
    pub(crate) fn from_body(body: Vec<Cell>, direction: Direction) -> Self {
        Snake { body, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_extends_away_from_the_direction_of_travel() {
        let snake = Snake::new((40, 40), 3, Right, 20);
        assert_eq!(snake.body(), &[(40, 40), (20, 40), (0, 40)]);

        let snake = Snake::new((40, 40), 3, Up, 20);
        assert_eq!(snake.body(), &[(40, 40), (40, 60), (40, 80)]);
    }

    #[test]
    fn reversals_leave_the_direction_unchanged() {
        for &(dir, reverse) in [(Up, Down), (Down, Up), (Left, Right), (Right, Left)].iter() {
            let mut snake = Snake::new((40, 40), 3, dir, 20);
            snake.set_direction(reverse);
            assert_eq!(snake.direction(), dir);
        }
    }

    #[test]
    fn perpendicular_turns_apply() {
        let mut snake = Snake::new((40, 40), 3, Right, 20);
        snake.set_direction(Up);
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn next_head_steps_exactly_one_cell() {
        let snake = Snake::new((40, 40), 3, Right, 20);
        assert_eq!(snake.next_head(20), (60, 40));
    }

    #[test]
    fn occupies_covers_the_whole_body() {
        let snake = Snake::new((40, 40), 3, Right, 20);
        assert!(snake.occupies((40, 40)));
        assert!(snake.occupies((0, 40)));
        assert!(!snake.occupies((60, 40)));
    }

    #[test]
    fn push_and_pop_move_the_body_along() {
        let mut snake = Snake::new((40, 40), 3, Right, 20);
        snake.push_head((60, 40));
        snake.pop_tail();
        assert_eq!(snake.body(), &[(60, 40), (40, 40), (20, 40)]);
    }
}
