//! Breakout: paddle, ball and a wall of bricks.

use std::rc::Rc;

use tracing::{debug, instrument};

use crate::events::Outcome;
use crate::games::score_keeper::ScoreKeeper;
use crate::keys::Key;
use crate::mediator::Mediator;
use crate::registry::GameHandle;

/// Field width in cells.
pub const WIDTH: i32 = 24;
/// Field height in cells; the paddle sits on the last row.
pub const HEIGHT: i32 = 14;
/// Paddle width in cells.
pub const PADDLE_WIDTH: i32 = 5;
/// Points per brick.
pub const BRICK_POINTS: u64 = 10;

const PADDLE_ROW: i32 = HEIGHT - 1;
const PADDLE_STEP: i32 = 2;
const BRICK_ROWS: std::ops::RangeInclusive<i32> = 1..=3;

type Cell = (i32, i32);

/// Clear every brick without dropping the ball.
#[derive(Debug)]
pub struct Breakout {
    keeper: ScoreKeeper,
    bricks: Vec<Cell>,
    paddle: i32,
    ball: Cell,
    velocity: Cell,
    launched: bool,
    running: bool,
}

impl Breakout {
    /// Creates a stopped game.
    #[instrument(skip(mediator))]
    pub fn new(mediator: Rc<Mediator>) -> Self {
        Self {
            keeper: ScoreKeeper::new(mediator),
            bricks: Vec::new(),
            paddle: (WIDTH - PADDLE_WIDTH) / 2,
            ball: (WIDTH / 2, PADDLE_ROW - 1),
            velocity: (1, -1),
            launched: false,
            running: false,
        }
    }

    /// Remaining bricks.
    pub fn bricks(&self) -> &[Cell] {
        &self.bricks
    }

    /// Replaces the brick wall, e.g. to set up a position.
    pub fn set_bricks(&mut self, bricks: Vec<Cell>) {
        self.bricks = bricks;
    }

    /// Ball position.
    pub fn ball(&self) -> Cell {
        self.ball
    }

    /// Left edge of the paddle.
    pub fn paddle(&self) -> i32 {
        self.paddle
    }

    /// True while a run is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn paddle_covers(&self, x: i32) -> bool {
        (self.paddle..self.paddle + PADDLE_WIDTH).contains(&x)
    }

    fn rest_ball_on_paddle(&mut self) {
        self.ball = (self.paddle + PADDLE_WIDTH / 2, PADDLE_ROW - 1);
    }

    fn end(&mut self, result: Outcome) {
        self.running = false;
        self.keeper.finish(result);
    }

    fn step_ball(&mut self) {
        let (x, y) = self.ball;
        let (mut dx, mut dy) = self.velocity;
        if x + dx < 0 || x + dx >= WIDTH {
            dx = -dx;
        }
        if y + dy < 0 {
            dy = -dy;
        }
        let next = (x + dx, y + dy);

        if let Some(hit) = self.bricks.iter().position(|&b| b == next) {
            self.bricks.swap_remove(hit);
            self.velocity = (dx, -dy);
            self.keeper.add(BRICK_POINTS);
            if self.bricks.is_empty() {
                self.end(Outcome::Win);
            }
            return;
        }

        if next.1 >= PADDLE_ROW {
            if self.paddle_covers(next.0) {
                self.velocity = (dx, -dy.abs());
            } else {
                debug!(ball = ?next, paddle = self.paddle, "Ball lost");
                self.end(Outcome::Lose);
            }
            return;
        }

        self.velocity = (dx, dy);
        self.ball = next;
    }
}

impl GameHandle for Breakout {
    #[instrument(skip(self))]
    fn start(&mut self) {
        self.bricks = BRICK_ROWS
            .flat_map(|y| (1..WIDTH - 1).map(move |x| (x, y)))
            .collect();
        self.paddle = (WIDTH - PADDLE_WIDTH) / 2;
        self.rest_ball_on_paddle();
        self.velocity = (1, -1);
        self.launched = false;
        self.running = true;
        self.keeper.reset();
    }

    #[instrument(skip(self))]
    fn stop(&mut self) {
        self.running = false;
    }

    fn handle_key(&mut self, key: Key) {
        if !self.running {
            return;
        }
        match key {
            Key::ArrowLeft => self.paddle = (self.paddle - PADDLE_STEP).max(0),
            Key::ArrowRight => {
                self.paddle = (self.paddle + PADDLE_STEP).min(WIDTH - PADDLE_WIDTH)
            }
            Key::Space => self.launched = true,
            _ => {}
        }
        if !self.launched {
            self.rest_ball_on_paddle();
        }
    }

    fn tick(&mut self) {
        if self.running && self.launched {
            self.step_ball();
        }
    }

    fn view(&self) -> Vec<String> {
        (0..HEIGHT)
            .map(|y| {
                (0..WIDTH)
                    .map(|x| {
                        if self.ball == (x, y) {
                            'o'
                        } else if y == PADDLE_ROW && self.paddle_covers(x) {
                            '='
                        } else if self.bricks.contains(&(x, y)) {
                            '#'
                        } else {
                            ' '
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
    fn test_ball_waits_for_launch() {
        let mut game = Breakout::new(Rc::new(Mediator::new()));
        game.start();
        let ball = game.ball();
        game.tick();
        assert_eq!(game.ball(), ball);

        game.handle_key(Key::ArrowLeft);
        assert_eq!(game.ball().0, ball.0 - PADDLE_STEP);
    }

    #[test]
    fn test_last_brick_wins() {
        let mut game = Breakout::new(Rc::new(Mediator::new()));
        game.start();
        let (x, y) = game.ball();
        game.set_bricks(vec![(x + 1, y - 1)]);
        game.handle_key(Key::Space);

        game.tick();

        assert!(game.bricks().is_empty());
        assert!(!game.is_running());
    }

    #[test]
    fn test_missing_the_ball_loses() {
        let mut game = Breakout::new(Rc::new(Mediator::new()));
        game.start();
        game.set_bricks(vec![(0, 0)]);
        game.handle_key(Key::Space);
        // Ball falling next to the paddle's right edge.
        game.ball = (WIDTH - 2, PADDLE_ROW - 1);
        game.velocity = (1, 1);

        game.tick();

        assert!(!game.is_running());
    }
}
