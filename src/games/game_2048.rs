//! 2048 sliding-tile puzzle.

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::events::Outcome;
use crate::games::score_keeper::ScoreKeeper;
use crate::keys::Key;
use crate::mediator::Mediator;
use crate::registry::GameHandle;

/// Board edge length.
pub const SIZE: usize = 4;
/// Tile value that wins the run.
pub const GOAL: u32 = 2048;

/// Row-major tile values; 0 is empty.
pub type Grid = [u32; SIZE * SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slide {
    Up,
    Down,
    Left,
    Right,
}

impl Slide {
    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            Key::ArrowLeft => Some(Self::Left),
            Key::ArrowRight => Some(Self::Right),
            _ => None,
        }
    }

    /// Cell indices of each line, ordered in the direction tiles travel to.
    fn lines(self) -> [[usize; SIZE]; SIZE] {
        let mut lines = [[0; SIZE]; SIZE];
        for (line, cells) in lines.iter_mut().enumerate() {
            for (step, cell) in cells.iter_mut().enumerate() {
                *cell = match self {
                    Self::Left => line * SIZE + step,
                    Self::Right => line * SIZE + (SIZE - 1 - step),
                    Self::Up => step * SIZE + line,
                    Self::Down => (SIZE - 1 - step) * SIZE + line,
                };
            }
        }
        lines
    }
}

/// Compacts one line towards index 0, merging equal neighbours once.
///
/// Returns the new line and the points gained.
#[instrument]
pub fn slide_line(line: [u32; SIZE]) -> ([u32; SIZE], u64) {
    let tiles: Vec<u32> = line.into_iter().filter(|&v| v != 0).collect();
    let mut out = [0; SIZE];
    let mut points = 0;
    let mut write = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let merged = tiles[i] * 2;
            out[write] = merged;
            points += u64::from(merged);
            i += 2;
        } else {
            out[write] = tiles[i];
            i += 1;
        }
        write += 1;
    }
    (out, points)
}

/// Slide tiles, merge pairs, reach 2048.
#[derive(Debug)]
pub struct Game2048 {
    keeper: ScoreKeeper,
    rng: StdRng,
    grid: Grid,
    running: bool,
}

impl Game2048 {
    /// Creates a stopped game; `seed` drives tile spawning.
    #[instrument(skip(mediator))]
    pub fn new(mediator: Rc<Mediator>, seed: u64) -> Self {
        Self {
            keeper: ScoreKeeper::new(mediator),
            rng: StdRng::seed_from_u64(seed),
            grid: [0; SIZE * SIZE],
            running: false,
        }
    }

    /// Current tiles.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replaces the tiles, e.g. to set up a position.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// True while a run is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn spawn_tile(&mut self) {
        let empty: Vec<usize> = (0..self.grid.len()).filter(|&i| self.grid[i] == 0).collect();
        if empty.is_empty() {
            return;
        }
        let cell = empty[self.rng.gen_range(0..empty.len())];
        self.grid[cell] = if self.rng.gen_range(0..10) == 0 { 4 } else { 2 };
    }

    /// Applies a slide to the grid; returns whether anything moved.
    #[instrument(skip(self))]
    fn apply(&mut self, slide: Slide) -> bool {
        let mut moved = false;
        let mut gained = 0;
        for cells in slide.lines() {
            let line = cells.map(|c| self.grid[c]);
            let (next, points) = slide_line(line);
            if next != line {
                moved = true;
                for (c, v) in cells.into_iter().zip(next) {
                    self.grid[c] = v;
                }
            }
            gained += points;
        }
        if gained > 0 {
            self.keeper.add(gained);
        }
        moved
    }

    fn can_move(&self) -> bool {
        if self.grid.contains(&0) {
            return true;
        }
        (0..SIZE).any(|r| {
            (0..SIZE).any(|c| {
                let v = self.grid[r * SIZE + c];
                (c + 1 < SIZE && self.grid[r * SIZE + c + 1] == v)
                    || (r + 1 < SIZE && self.grid[(r + 1) * SIZE + c] == v)
            })
        })
    }

    fn end(&mut self, result: Outcome) {
        self.running = false;
        self.keeper.finish(result);
    }
}

impl GameHandle for Game2048 {
    #[instrument(skip(self))]
    fn start(&mut self) {
        self.grid = [0; SIZE * SIZE];
        self.running = true;
        self.keeper.reset();
        self.spawn_tile();
        self.spawn_tile();
    }

    #[instrument(skip(self))]
    fn stop(&mut self) {
        self.running = false;
    }

    fn handle_key(&mut self, key: Key) {
        if !self.running {
            return;
        }
        let Some(slide) = Slide::from_key(key) else {
            return;
        };
        if !self.apply(slide) {
            debug!(?slide, "Slide changed nothing");
            return;
        }

        if self.grid.contains(&GOAL) {
            self.end(Outcome::Win);
            return;
        }
        self.spawn_tile();
        if !self.can_move() {
            self.end(Outcome::Lose);
        }
    }

    fn view(&self) -> Vec<String> {
        self.grid
            .chunks(SIZE)
            .map(|row| {
                row.iter()
                    .map(|&v| {
                        if v == 0 {
                            format!("{:>6}", ".")
                        } else {
                            format!("{:>6}", v)
                        }
                    })
                    .collect::<String>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_line_merges_once() {
        assert_eq!(slide_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
        assert_eq!(slide_line([0, 2, 0, 2]), ([4, 0, 0, 0], 4));
        assert_eq!(slide_line([4, 2, 2, 0]), ([4, 4, 0, 0], 4));
        assert_eq!(slide_line([2, 4, 8, 16]), ([2, 4, 8, 16], 0));
    }

    #[test]
    fn test_reaching_goal_wins() {
        let mediator = Rc::new(Mediator::new());
        let mut game = Game2048::new(mediator, 11);
        game.start();
        let mut grid = [0; SIZE * SIZE];
        grid[0] = 1024;
        grid[1] = 1024;
        game.set_grid(grid);

        game.handle_key(Key::ArrowLeft);

        assert_eq!(game.grid()[0], GOAL);
        assert!(!game.is_running());
    }

    #[test]
    fn test_slide_right_moves_tiles_to_the_edge() {
        let mediator = Rc::new(Mediator::new());
        let mut game = Game2048::new(mediator, 5);
        game.start();
        let mut grid = [0; SIZE * SIZE];
        grid[0] = 2;
        game.set_grid(grid);

        game.handle_key(Key::ArrowRight);

        assert_eq!(game.grid()[SIZE - 1], 2);
    }
}
