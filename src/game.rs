//! The tick loop and the collaborators it drives.
//!
//! The loop owns the snake and the food. Input, rendering and pacing are
//! handed in as trait objects so the whole thing runs without a terminal.

use anyhow::Result;
use rand::{rngs::ThreadRng, Rng};
use tracing::{debug, info, trace};

use crate::board::{Board, Cell};
use crate::config::GameConfig;
use crate::food::{Food, Placement};
use crate::snake::{Direction, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyPress(Direction),
}

/// Non-blocking event source, drained once per tick.
pub trait InputSource {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

/// Everything a renderer needs for one tick.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub board: &'a Board,
    pub snake: &'a Snake,
    /// Cell the tail just left, to be erased.
    pub vacated: Option<Cell>,
    pub food: Cell,
    /// The snake was reset this tick; stale cells anywhere on the board must go.
    pub cleared: bool,
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> Result<()>;
}

pub trait Clock {
    /// Blocks until the current tick's time budget is spent.
    fn wait_next_tick(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub ate_food: bool,
    pub reset: bool,
    pub placement: Option<Placement>,
}

pub struct Game<R: Rng = ThreadRng> {
    board: Board,
    snake: Snake,
    food: Food,
    rng: R,
    ticks: u64,
}

impl Game<ThreadRng> {
    pub fn new(config: &GameConfig) -> Self {
        Game::with_rng(Board::from_config(config), rand::thread_rng())
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(board: Board, mut rng: R) -> Self {
        let snake = Snake::new(board);
        let food = Food::spawn(&board, &mut rng, snake.positions());
        Game { board, snake, food, rng, ticks: 0 }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feeds drained input to the snake. Returns false on a quit request.
    pub fn handle_input(&mut self, events: &[InputEvent]) -> bool {
        for ev in events {
            match ev {
                InputEvent::Quit => return false,
                InputEvent::KeyPress(dir) => self.snake.set_pending_direction(*dir),
            }
        }
        true
    }

    /// One game step after input: turn, move, eat, collide.
    ///
    /// The food and collision checks are independent. A tick that eats can
    /// still reset when the grown snake has run into itself.
    pub fn step(&mut self) -> TickReport {
        let mut report = TickReport::default();

        self.snake.apply_pending_direction();
        self.snake.advance();
        self.ticks += 1;

        if self.snake.occupies(self.food.position()) {
            self.snake.grow();
            report.ate_food = true;
            let placement = self.food.relocate(&self.board, &mut self.rng, self.snake.positions());
            report.placement = Some(placement);
            debug!(length = self.snake.length(), food = ?self.food.position(), "Snake ate food");
        }

        if self.snake.self_collision() {
            info!(
                length = self.snake.length(),
                tick = self.ticks,
                "Snake ran into itself, resetting"
            );
            self.snake.reset();
            report.reset = true;
            let placement = self.food.relocate(&self.board, &mut self.rng, self.snake.positions());
            report.placement = Some(placement);
        }

        trace!(tick = self.ticks, head = ?self.snake.head(), "Tick");
        report
    }

    pub fn frame(&self, cleared: bool) -> Frame<'_> {
        Frame {
            board: &self.board,
            snake: &self.snake,
            vacated: self.snake.vacated(),
            food: self.food.position(),
            cleared,
        }
    }

    /// Runs until the input source asks to quit.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
        clock: &mut dyn Clock,
    ) -> Result<()> {
        info!(
            columns = self.board.columns(),
            rows = self.board.rows(),
            cell_size = self.board.cell_size(),
            "Starting game loop"
        );
        renderer.render(&self.frame(true))?;

        loop {
            let events = input.poll_events()?;
            if !self.handle_input(&events) {
                info!(ticks = self.ticks, "Quit requested");
                return Ok(());
            }

            let report = self.step();
            renderer.render(&self.frame(report.reset))?;
            clock.wait_next_tick();
        }
    }
}
