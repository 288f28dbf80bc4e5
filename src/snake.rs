use anyhow::Result;

use crate::Coords;
use crate::grid::Grid;
use crate::render::{Drawable, Renderer, BORDER_COLOR, SNAKE_COLOR};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    next_direction: Option<Direction>,
    growing: bool,
}

impl Snake {
    /// A one-segment snake at the centre of the board, heading right.
    pub fn new(grid: &Grid) -> Self {
        Snake { body: vec![grid.center()], direction: Right, next_direction: None, growing: false }
    }

    /// Segments from head (index 0) to tail.
    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    /// Queues `new_direction` for the next tick, unless it would turn the snake
    /// straight back onto itself. Returns whether it was queued.
    pub fn queue_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.next_direction = Some(new_direction);
        true
    }

    /// Applies the queued direction, if any.
    pub fn update_direction(&mut self) {
        if let Some(dir) = self.next_direction.take() {
            self.direction = dir;
        }
    }

    /// Advances one cell, wrapping at the board edges. Returns the new head.
    pub fn move_step(&mut self, grid: &Grid) -> Coords {
        let new_head = grid.step(self.head(), self.direction.delta());
        self.body.insert(0, new_head);

        if !self.growing {
            self.body.pop();
        }
        self.growing = false;

        new_head
    }

    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Shrinks back to a single segment at the centre. The direction is kept.
    pub fn reset(&mut self, grid: &Grid) {
        self.body.clear();
        self.body.push(grid.center());
    }

    pub fn head_collides(&self) -> bool {
        self.body[1..].contains(&self.head())
    }
}

impl Drawable for Snake {
    fn draw(&self, renderer: &mut dyn Renderer) -> Result<()> {
        // Tail first so the head ends up on top
        for pos in self.body.iter().rev() {
            renderer.fill_cell(*pos, SNAKE_COLOR, Some(BORDER_COLOR))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(640, 480).unwrap()
    }

    fn snake_with(body: Vec<Coords>, direction: Direction) -> Snake {
        Snake { body, direction, next_direction: None, growing: false }
    }

    #[test]
    fn test_opposite_directions() {
        for dir in [Up, Down, Left, Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            assert_eq!(dir.opposite().delta(), (-dx, -dy));
        }
    }

    #[test]
    fn test_new_snake() {
        let snake = Snake::new(&grid());
        assert_eq!(snake.body(), &[(320, 240)]);
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.next_direction(), None);
    }

    #[test]
    fn test_move_without_input() {
        let grid = grid();
        let mut snake = Snake::new(&grid);
        snake.update_direction();

        assert_eq!(snake.move_step(&grid), (340, 240));
        assert_eq!(snake.body(), &[(340, 240)]);
    }

    #[test]
    fn test_grow_then_move() {
        let grid = grid();
        let mut snake = Snake::new(&grid);
        snake.grow();
        snake.move_step(&grid);
        assert_eq!(snake.body(), &[(340, 240), (320, 240)]);

        // Growth only applies to the very next move
        snake.move_step(&grid);
        assert_eq!(snake.body(), &[(360, 240), (340, 240)]);
    }

    #[test]
    fn test_grow_is_idempotent() {
        let grid = grid();
        let mut snake = Snake::new(&grid);
        snake.grow();
        snake.grow();
        snake.move_step(&grid);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_move_up_without_collision() {
        let grid = grid();
        let mut snake = snake_with(vec![(100, 100), (100, 120), (100, 140)], Up);
        assert_eq!(snake.move_step(&grid), (100, 80));
        assert_eq!(snake.body(), &[(100, 80), (100, 100), (100, 120)]);
        assert!(!snake.head_collides());
    }

    #[test]
    fn test_wraparound_on_every_edge() {
        let grid = grid();
        let cases = [
            ((620, 100), Right, (0, 100)),
            ((0, 100), Left, (620, 100)),
            ((100, 0), Up, (100, 460)),
            ((100, 460), Down, (100, 0)),
        ];

        for (start, dir, expected) in cases {
            let mut snake = snake_with(vec![start], dir);
            let head = snake.move_step(&grid);
            assert_eq!(head, expected);
            assert!(grid.contains(head));
        }
    }

    #[test]
    fn test_no_reversal() {
        let mut snake = Snake::new(&grid());
        assert!(!snake.queue_direction(Left));
        assert_eq!(snake.next_direction(), None);

        assert!(snake.queue_direction(Up));
        assert_eq!(snake.next_direction(), Some(Up));
        assert!(snake.queue_direction(Down));
        assert_eq!(snake.next_direction(), Some(Down));

        // Validation is against the current direction, not the queued one
        assert!(snake.queue_direction(Right));
        assert_eq!(snake.next_direction(), Some(Right));
    }

    #[test]
    fn test_update_direction_consumes_queue() {
        let mut snake = Snake::new(&grid());
        snake.queue_direction(Up);
        snake.update_direction();
        assert_eq!(snake.direction(), Up);
        assert_eq!(snake.next_direction(), None);

        snake.update_direction();
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn test_single_segment_never_collides() {
        let snake = Snake::new(&grid());
        assert!(!snake.head_collides());
    }

    #[test]
    fn test_head_collision() {
        let snake = snake_with(vec![(100, 100), (120, 100), (120, 120), (100, 120), (100, 100)], Up);
        assert!(snake.head_collides());
    }

    #[test]
    fn test_reset_keeps_direction() {
        let grid = grid();
        let mut snake = snake_with(vec![(100, 100), (100, 120), (100, 140)], Up);
        snake.reset(&grid);
        assert_eq!(snake.body(), &[(320, 240)]);
        assert_eq!(snake.direction(), Up);

        snake.move_step(&grid);
        assert_eq!(snake.body(), &[(320, 220)]);
    }

    #[derive(Default)]
    struct Recorder(Vec<Coords>);

    impl Renderer for Recorder {
        fn clear(&mut self, _: crate::render::Rgb) -> Result<()> { Ok(()) }

        fn fill_cell(&mut self, pos: Coords, fill: crate::render::Rgb, border: Option<crate::render::Rgb>) -> Result<()> {
            assert_eq!(fill, SNAKE_COLOR);
            assert_eq!(border, Some(BORDER_COLOR));
            self.0.push(pos);
            Ok(())
        }

        fn present(&mut self) -> Result<()> { Ok(()) }
    }

    #[test]
    fn test_draw_ends_with_head() {
        let snake = snake_with(vec![(100, 100), (100, 120), (100, 140)], Up);
        let mut rec = Recorder::default();
        snake.draw(&mut rec).unwrap();
        assert_eq!(rec.0, vec![(100, 140), (100, 120), (100, 100)]);
    }
}
