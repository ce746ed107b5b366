use rand::Rng;
use tracing::warn;

use crate::board::{Board, Cell};

/// How a relocation found its cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Placement {
    Sampled,
    /// Random draws kept hitting excluded cells; first free cell in row-major order.
    Scanned,
    /// Every cell is excluded. The food did not move.
    BoardFull,
}

#[derive(Debug, Clone)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub fn at(position: Cell) -> Self {
        Food { position }
    }

    /// Food placed off every cell in `excluded`.
    pub fn spawn<'a, R, I>(board: &Board, rng: &mut R, excluded: I) -> Self
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell> + Clone,
    {
        let mut food = Food::at(board.center());
        food.relocate(board, rng, excluded);
        food
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Rejection sampling, bounded to one draw per board cell before falling back
    /// to a deterministic scan.
    pub fn relocate<'a, R, I>(&mut self, board: &Board, rng: &mut R, excluded: I) -> Placement
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell> + Clone,
    {
        let is_free = |cell: Cell| !excluded.clone().into_iter().any(|&c| c == cell);

        for _ in 0..board.cell_count() {
            let cell = board.random_cell(rng);
            if is_free(cell) {
                self.position = cell;
                return Placement::Sampled;
            }
        }

        match board.cells().find(|&c| is_free(c)) {
            Some(cell) => {
                self.position = cell;
                Placement::Scanned
            }
            None => {
                warn!("No free cell left for food, leaving it at {:?}", self.position);
                Placement::BoardFull
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_relocate_never_hits_excluded() {
        let board = Board::default();
        let mut rng = StdRng::seed_from_u64(42);
        let excluded: Vec<Cell> = (0..20).map(|i| board.cell_at(i, i % 24)).collect();
        let mut food = Food::at(Cell::new(0, 0));

        for _ in 0..1000 {
            food.relocate(&board, &mut rng, &excluded);
            assert!(!excluded.contains(&food.position()));
        }
    }

    #[test]
    fn test_spawn_avoids_excluded() {
        let board = Board::new(2, 1, 20);
        let mut rng = StdRng::seed_from_u64(1);
        let food = Food::spawn(&board, &mut rng, &[Cell::new(0, 0)]);
        assert_eq!(food.position(), Cell::new(20, 0));
    }

    #[test]
    fn test_scan_fallback_finds_last_free_cell() {
        let board = Board::new(32, 24, 20);
        let last = board.cell_at(31, 23);
        let excluded: Vec<Cell> = board.cells().filter(|&c| c != last).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let mut food = Food::at(Cell::new(0, 0));

        let placement = food.relocate(&board, &mut rng, &excluded);

        assert!(placement == Placement::Sampled || placement == Placement::Scanned);
        assert_eq!(food.position(), last);
    }

    #[test]
    fn test_full_board_leaves_food_in_place() {
        let board = Board::new(4, 3, 10);
        let excluded: Vec<Cell> = board.cells().collect();
        let mut rng = StdRng::seed_from_u64(9);
        let mut food = Food::at(Cell::new(10, 10));

        assert_eq!(food.relocate(&board, &mut rng, &excluded), Placement::BoardFull);
        assert_eq!(food.position(), Cell::new(10, 10));
    }

    #[test]
    fn test_empty_exclusion_samples() {
        let board = Board::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut food = Food::at(Cell::new(0, 0));
        assert_eq!(food.relocate(&board, &mut rng, &[]), Placement::Sampled);
    }
}
