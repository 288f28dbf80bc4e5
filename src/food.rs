use anyhow::Result;
use rand::{Rng, seq::SliceRandom};

use crate::Coords;
use crate::grid::{Grid, CELL_SIZE};
use crate::render::{Drawable, Renderer, APPLE_COLOR, BORDER_COLOR};

/// Where the next apple may appear.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FoodPlacement {
    /// Any cell of the board, including ones under the snake.
    Anywhere,
    /// Only cells the snake does not occupy.
    AvoidSnake,
}

pub struct Food {
    position: Coords,
}

impl Food {
    pub fn new<R: Rng>(grid: &Grid, rng: &mut R) -> Self {
        let mut food = Food { position: (0, 0) };
        food.randomize_position(grid, rng);
        food
    }

    #[cfg(test)]
    pub fn at(position: Coords) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    /// Picks a cell uniformly over the whole board.
    pub fn randomize_position<R: Rng>(&mut self, grid: &Grid, rng: &mut R) {
        self.position = (
            rng.gen_range(0..grid.columns()) * CELL_SIZE,
            rng.gen_range(0..grid.rows()) * CELL_SIZE,
        );
    }

    /// Picks a cell uniformly among those not in `occupied`. When the board is
    /// full, falls back to `randomize_position` and returns false.
    pub fn randomize_position_avoiding<R: Rng>(&mut self, grid: &Grid, occupied: &[Coords], rng: &mut R) -> bool {
        let choices: Vec<Coords> = grid.cells().filter(|pos| !occupied.contains(pos)).collect();

        match choices.choose(rng) {
            Some(pos) => {
                self.position = *pos;
                true
            },
            None => {
                self.randomize_position(grid, rng);
                false
            },
        }
    }

    pub fn relocate<R: Rng>(&mut self, placement: FoodPlacement, grid: &Grid, occupied: &[Coords], rng: &mut R) -> bool {
        match placement {
            FoodPlacement::Anywhere => {
                self.randomize_position(grid, rng);
                true
            },
            FoodPlacement::AvoidSnake => self.randomize_position_avoiding(grid, occupied, rng),
        }
    }
}

impl Drawable for Food {
    fn draw(&self, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.fill_cell(self.position, APPLE_COLOR, Some(BORDER_COLOR))
    }
}
