//! Snake on a walled grid.

use std::collections::VecDeque;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::events::Outcome;
use crate::games::score_keeper::ScoreKeeper;
use crate::keys::Key;
use crate::mediator::Mediator;
use crate::registry::GameHandle;

/// Grid width in cells.
pub const WIDTH: i32 = 20;
/// Grid height in cells.
pub const HEIGHT: i32 = 12;
/// Snake length that wins the run.
pub const WIN_LENGTH: usize = 25;

type Cell = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    fn delta(self) -> Cell {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            Key::ArrowLeft => Some(Self::Left),
            Key::ArrowRight => Some(Self::Right),
            _ => None,
        }
    }
}

/// Eat food, grow, avoid walls and yourself.
#[derive(Debug)]
pub struct Snake {
    keeper: ScoreKeeper,
    rng: StdRng,
    body: VecDeque<Cell>,
    heading: Heading,
    queued: Heading,
    food: Option<Cell>,
    running: bool,
}

impl Snake {
    /// Creates a stopped game; `seed` drives food placement.
    #[instrument(skip(mediator))]
    pub fn new(mediator: Rc<Mediator>, seed: u64) -> Self {
        Self {
            keeper: ScoreKeeper::new(mediator),
            rng: StdRng::seed_from_u64(seed),
            body: VecDeque::new(),
            heading: Heading::Right,
            queued: Heading::Right,
            food: None,
            running: false,
        }
    }

    /// Head position, if a run was started.
    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    /// Current food position.
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Snake length.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// True before the first run.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// True while a run is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn place_food(&mut self) {
        let free: Vec<Cell> = (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        self.food = if free.is_empty() {
            None
        } else {
            Some(free[self.rng.gen_range(0..free.len())])
        };
    }

    fn end(&mut self, result: Outcome) {
        self.running = false;
        self.keeper.finish(result);
    }
}

impl GameHandle for Snake {
    #[instrument(skip(self))]
    fn start(&mut self) {
        let (x, y) = (WIDTH / 2, HEIGHT / 2);
        self.body = VecDeque::from([(x, y), (x - 1, y), (x - 2, y)]);
        self.heading = Heading::Right;
        self.queued = Heading::Right;
        self.running = true;
        self.keeper.reset();
        self.place_food();
    }

    #[instrument(skip(self))]
    fn stop(&mut self) {
        self.running = false;
    }

    fn handle_key(&mut self, key: Key) {
        if let Some(heading) = Heading::from_key(key)
            && heading != self.heading.opposite()
        {
            self.queued = heading;
        }
    }

    fn tick(&mut self) {
        if !self.running {
            return;
        }
        let Some((hx, hy)) = self.head() else {
            return;
        };

        self.heading = self.queued;
        let (dx, dy) = self.heading.delta();
        let next = (hx + dx, hy + dy);
        let eats = self.food == Some(next);

        let out_of_bounds = next.0 < 0 || next.0 >= WIDTH || next.1 < 0 || next.1 >= HEIGHT;
        let last = self.body.len() - 1;
        let hits_self = self
            .body
            .iter()
            .enumerate()
            .any(|(i, &cell)| cell == next && (eats || i != last));

        if out_of_bounds || hits_self {
            debug!(?next, out_of_bounds, hits_self, "Snake crashed");
            self.end(Outcome::Lose);
            return;
        }

        self.body.push_front(next);
        if !eats {
            self.body.pop_back();
            return;
        }

        self.keeper.add(1);
        if self.body.len() >= WIN_LENGTH {
            self.end(Outcome::Win);
        } else {
            self.place_food();
        }
    }

    fn view(&self) -> Vec<String> {
        (0..HEIGHT)
            .map(|y| {
                (0..WIDTH)
                    .map(|x| {
                        if self.head() == Some((x, y)) {
                            '@'
                        } else if self.body.contains(&(x, y)) {
                            'o'
                        } else if self.food == Some((x, y)) {
                            '*'
                        } else {
                            '.'
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
    use crate::events::{Event, EventKind};
    use std::cell::RefCell;

    fn outcomes(mediator: &Mediator) -> Rc<RefCell<Vec<Outcome>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        mediator.subscribe(EventKind::GameOutcome, move |event| {
            if let Event::GameOutcome { result, .. } = event {
                sink.borrow_mut().push(*result);
            }
            Ok(())
        });
        seen
    }

    #[test]
    fn test_running_into_the_wall_loses() {
        let mediator = Rc::new(Mediator::new());
        let seen = outcomes(&mediator);
        let mut snake = Snake::new(Rc::clone(&mediator), 7);
        snake.start();
        snake.food = None;

        for _ in 0..WIDTH {
            snake.tick();
        }

        assert!(!snake.is_running());
        assert_eq!(*seen.borrow(), vec![Outcome::Lose]);
    }

    #[test]
    fn test_reversing_is_ignored() {
        let mediator = Rc::new(Mediator::new());
        let mut snake = Snake::new(mediator, 1);
        snake.start();
        snake.food = None;
        let (x, y) = snake.head().expect("started");

        snake.handle_key(Key::ArrowLeft);
        snake.tick();

        assert_eq!(snake.head(), Some((x + 1, y)));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mediator = Rc::new(Mediator::new());
        let mut snake = Snake::new(mediator, 3);
        snake.start();
        let (x, y) = snake.head().expect("started");
        snake.food = Some((x + 1, y));

        snake.tick();

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.keeper.current(), 1);
    }
}
