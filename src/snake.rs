use std::collections::VecDeque;

use crate::board::{Board, Cell};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit vector in grid cells. Screen rows grow downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub new_head: Cell,
    /// Old tail cell that left the body on this move, `None` while growing.
    pub vacated: Option<Cell>,
}

/// Head-first body plus heading. `length` is the target size; the body only
/// catches up with it one `advance` at a time.
#[derive(Debug, Clone)]
pub struct Snake {
    board: Board,
    positions: VecDeque<Cell>,
    length: usize,
    direction: Direction,
    pending_direction: Option<Direction>,
    vacated: Option<Cell>,
}

impl Snake {
    pub fn new(board: Board) -> Self {
        let mut snake = Snake {
            board,
            positions: VecDeque::new(),
            length: 1,
            direction: Right,
            pending_direction: None,
            vacated: None,
        };
        snake.reset();
        snake
    }

    /// Builds a snake from an explicit head-first body. `length` is taken from the body.
    pub fn with_body(board: Board, body: &[Cell], direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one cell");

        Snake {
            board,
            positions: body.iter().copied().collect(),
            length: body.len(),
            direction,
            pending_direction: None,
            vacated: None,
        }
    }

    /// Back to a single cell at the board center, heading right.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.positions.push_back(self.board.center());
        self.length = 1;
        self.direction = Right;
        self.pending_direction = None;
        self.vacated = None;
    }

    /// Latches the next heading. Reversals are accepted as-is: a snake of three or
    /// more cells that reverses runs into its own neck on the next move.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    pub fn apply_pending_direction(&mut self) {
        if let Some(dir) = self.pending_direction.take() {
            self.direction = dir;
        }
    }

    pub fn advance(&mut self) -> MoveResult {
        let (dx, dy) = self.direction.delta();
        let new_head = self.board.offset(self.head(), dx, dy);

        self.positions.push_front(new_head);

        self.vacated = if self.positions.len() > self.length {
            self.positions.pop_back()
        } else {
            None
        };

        MoveResult { new_head, vacated: self.vacated }
    }

    /// Takes effect on the next `advance`, which then keeps its tail.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn head(&self) -> Cell {
        self.positions[0]
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.positions.contains(&cell)
    }

    pub fn self_collision(&self) -> bool {
        let head = self.head();
        self.positions.iter().skip(1).any(|&c| c == head)
    }

    pub fn positions(&self) -> &VecDeque<Cell> {
        &self.positions
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn vacated(&self) -> Option<Cell> {
        self.vacated
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::default()
    }

    #[test]
    fn test_initial_state() {
        let snake = Snake::new(board());
        assert_eq!(snake.head(), Cell::new(320, 240));
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.positions().len(), 1);
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.vacated(), None);
    }

    #[test]
    fn test_advance_from_center_then_wrap() {
        let mut snake = Snake::new(board());

        let res = snake.advance();
        assert_eq!(res.new_head, Cell::new(340, 240));
        assert_eq!(res.vacated, Some(Cell::new(320, 240)));

        for _ in 0..14 {
            snake.advance();
        }
        assert_eq!(snake.head(), Cell::new(620, 240));

        snake.advance();
        assert_eq!(snake.head(), Cell::new(0, 240));
        assert_eq!(snake.positions().len(), 1);
    }

    #[test]
    fn test_wraparound_all_edges() {
        let cases = [
            (Cell::new(620, 100), Right, Cell::new(0, 100)),
            (Cell::new(0, 100), Left, Cell::new(620, 100)),
            (Cell::new(100, 0), Up, Cell::new(100, 460)),
            (Cell::new(100, 460), Down, Cell::new(100, 0)),
        ];

        for (start, dir, expected) in cases.iter() {
            let mut snake = Snake::with_body(board(), &[*start], *dir);
            assert_eq!(snake.advance().new_head, *expected);
        }
    }

    #[test]
    fn test_pending_direction_applied_once() {
        let mut snake = Snake::new(board());

        snake.set_pending_direction(Up);
        assert_eq!(snake.direction(), Right);

        snake.apply_pending_direction();
        assert_eq!(snake.direction(), Up);
        assert_eq!(snake.pending_direction(), None);

        snake.apply_pending_direction();
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn test_reverse_direction_is_accepted() {
        let mut snake = Snake::new(board());
        snake.set_pending_direction(Left);
        snake.apply_pending_direction();
        assert_eq!(snake.direction(), Left);
    }

    #[test]
    fn test_grow_keeps_tail_on_next_advance() {
        let mut snake = Snake::new(board());
        snake.grow();

        let res = snake.advance();
        assert_eq!(res.vacated, None);
        assert_eq!(snake.length(), 2);
        assert_eq!(snake.positions().len(), 2);

        let res = snake.advance();
        assert_eq!(res.vacated, Some(Cell::new(320, 240)));
        assert_eq!(snake.positions().len(), 2);
    }

    #[test]
    fn test_self_collision() {
        // Head at (40, 20) sits on the body cell that the tail has not left yet.
        let body = [
            Cell::new(40, 20),
            Cell::new(40, 40),
            Cell::new(20, 40),
            Cell::new(20, 20),
            Cell::new(40, 20),
        ];
        let snake = Snake::with_body(board(), &body, Up);
        assert!(snake.self_collision());

        let body = [Cell::new(60, 20), Cell::new(40, 20), Cell::new(20, 20)];
        let snake = Snake::with_body(board(), &body, Right);
        assert!(!snake.self_collision());
    }

    #[test]
    fn test_turning_into_own_body() {
        let body = [
            Cell::new(40, 20),
            Cell::new(40, 40),
            Cell::new(20, 40),
            Cell::new(20, 20),
            Cell::new(20, 0),
        ];
        let mut snake = Snake::with_body(board(), &body, Left);
        snake.grow();

        snake.advance();
        assert_eq!(snake.head(), Cell::new(20, 20));
        assert!(snake.self_collision());
    }

    #[test]
    fn test_reversal_collides_with_neck() {
        let body = [Cell::new(60, 20), Cell::new(40, 20), Cell::new(20, 20)];
        let mut snake = Snake::with_body(board(), &body, Right);

        snake.set_pending_direction(Left);
        snake.apply_pending_direction();
        snake.advance();

        assert!(snake.self_collision());
    }

    #[test]
    fn test_single_cell_never_collides() {
        let mut snake = Snake::new(board());
        for dir in [Up, Left, Down, Right].iter() {
            snake.set_pending_direction(*dir);
            snake.apply_pending_direction();
            snake.advance();
            assert!(!snake.self_collision());
        }
    }

    #[test]
    fn test_reset_is_canonical() {
        let mut snake = Snake::with_body(board(), &[Cell::new(0, 0), Cell::new(20, 0)], Left);
        snake.grow();
        snake.set_pending_direction(Down);
        snake.advance();

        snake.reset();
        let first = (snake.positions().clone(), snake.length(), snake.direction());

        snake.grow();
        snake.advance();
        snake.reset();
        snake.reset();

        assert_eq!((snake.positions().clone(), snake.length(), snake.direction()), first);
        assert_eq!(snake.head(), Cell::new(320, 240));
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.vacated(), None);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Down.delta(), (0, 1));
        assert_eq!(Left.delta(), (-1, 0));
        assert_eq!(Right.delta(), (1, 0));
        assert_eq!(Up.delta(), (0, -1));
    }
}
