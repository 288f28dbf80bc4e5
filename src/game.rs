use anyhow::Result;
use log::{debug, info, trace, warn};
use rand::Rng;

use crate::clock::Clock;
use crate::food::{Food, FoodPlacement};
use crate::grid::Grid;
use crate::render::{Drawable, InputEvent, InputSource, Renderer, BACKGROUND_COLOR};
use crate::snake::Snake;

/// What a single update did to the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ate: bool,
    pub reset: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub ticks: u64,
    pub apples: u64,
    pub resets: u64,
    pub longest: usize,
}

/// Owns the board state and the collaborators that feed and show it.
pub struct SnakeGame<R, I, C, G> {
    grid: Grid,
    snake: Snake,
    food: Food,
    placement: FoodPlacement,
    renderer: R,
    input: I,
    clock: C,
    rng: G,
    summary: Summary,
}

impl<R: Renderer, I: InputSource, C: Clock, G: Rng> SnakeGame<R, I, C, G> {
    pub fn new(grid: Grid, placement: FoodPlacement, renderer: R, input: I, clock: C, mut rng: G) -> Self {
        let snake = Snake::new(&grid);
        let food = Food::new(&grid, &mut rng);
        let summary = Summary { longest: snake.len(), ..Summary::default() };

        SnakeGame { grid, snake, food, placement, renderer, input, clock, rng, summary }
    }

    /// Runs ticks until the input source asks to quit.
    pub fn run(&mut self) -> Result<Summary> {
        info!("Starting on a {}x{} board, apple at {:?}", self.grid.columns(), self.grid.rows(), self.food.position());

        loop {
            self.clock.tick();

            if !self.handle_input()? {
                info!("Quit requested after {} ticks", self.summary.ticks);
                break;
            }

            let report = self.update();
            if report.ate {
                debug!("Snake is {} long", self.snake.len());
            }
            if report.reset {
                debug!("Restarting from {:?}", self.snake.head());
            }

            self.draw()?;
        }

        Ok(self.summary)
    }

    /// Feeds every queued event to the snake. Returns false on `Quit`.
    fn handle_input(&mut self) -> Result<bool> {
        for event in self.input.poll_events()? {
            match event {
                InputEvent::Quit => return Ok(false),
                InputEvent::KeyDown(dir) => {
                    self.snake.queue_direction(dir);
                }
            }
        }

        Ok(true)
    }

    pub fn update(&mut self) -> TickReport {
        let mut report = TickReport::default();
        self.summary.ticks += 1;

        if let Some(dir) = self.snake.next_direction() {
            trace!("Turning from {:?} to {:?}", self.snake.direction(), dir);
        }
        self.snake.update_direction();
        let head = self.snake.move_step(&self.grid);
        debug_assert!(self.grid.contains(head));

        if head == self.food.position() {
            if !self.food.relocate(self.placement, &self.grid, self.snake.body(), &mut self.rng) {
                warn!("No free cell left, apple placed under the snake");
            }
            self.snake.grow();
            self.summary.apples += 1;
            report.ate = true;
            debug!("Ate apple at {:?}, next one at {:?}", head, self.food.position());
        }

        if self.snake.head_collides() {
            info!("Snake bit itself at {:?} with length {}, resetting", head, self.snake.len());
            self.snake.reset(&self.grid);
            self.summary.resets += 1;
            report.reset = true;
        }

        self.summary.longest = self.summary.longest.max(self.snake.len());
        report
    }

    pub fn draw(&mut self) -> Result<()> {
        self.renderer.clear(BACKGROUND_COLOR)?;
        self.food.draw(&mut self.renderer)?;
        self.snake.draw(&mut self.renderer)?;
        self.renderer.present()
    }
}
