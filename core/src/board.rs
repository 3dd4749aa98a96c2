use alloc::collections::VecDeque;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::{FORWARD_DISPLACEMENTS, apply_delta};
use crate::*;

/// Rectangular arena of [`Cell`]s addressed by `(row, col)`.
///
/// Cells only refer to each other through coordinates, so the board is the sole owner of every cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Allocates `rows * cols` fresh cells and links every cell to its 8-neighborhood.
    pub fn build(size: Coord2) -> Self {
        let mut board = Self {
            cells: Array2::default(size.to_nd_index()),
        };

        let (rows, cols) = size;
        for row in 0..rows {
            for col in 0..cols {
                for delta in FORWARD_DISPLACEMENTS {
                    if let Some(other) = apply_delta((row, col), delta, size) {
                        board.link_neighbors((row, col), other);
                    }
                }
            }
        }

        board
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())
    }

    /// Adds a symmetric adjacency edge. Self links, repeated pairs and out-of-bounds coordinates are ignored.
    pub fn link_neighbors(&mut self, a: Coord2, b: Coord2) {
        if a == b || !self.contains(a) || !self.contains(b) {
            return;
        }
        let linked = self.cells[a.to_nd_index()].push_neighbor(b);
        if linked {
            self.cells[b.to_nd_index()].push_neighbor(a);
        }
    }

    /// Marks every in-bounds coordinate as a mine, skipping the rest.
    pub fn place_mines(&mut self, coords: impl IntoIterator<Item = Coord2>) {
        for coords in coords {
            match self.get_mut(coords) {
                Some(cell) => cell.set_mine(),
                None => log::debug!("Ignoring out-of-bounds mine at {:?}", coords),
            }
        }
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self[coords]
            .neighbors()
            .iter()
            .filter(|&&pos| self[pos].is_mine())
            .count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    pub fn has_adjacent_mine(&self, coords: Coord2) -> bool {
        self[coords]
            .neighbors()
            .iter()
            .any(|&pos| self[pos].is_mine())
    }

    /// Reveals a cell, flood-filling through safe cells with no adjacent mines.
    ///
    /// Revealed and flagged cells are left alone. A mine is revealed like any other cell but never opens its
    /// neighbors. Returns how many cells changed from hidden to revealed.
    pub fn reveal(&mut self, coords: Coord2) -> CellCount {
        if !self.reveal_single_cell(coords) {
            return 0;
        }

        let mut revealed = 1;
        let mut to_visit = VecDeque::new();
        self.queue_hidden_neighbors(coords, &mut to_visit);

        while let Some(visit_coords) = to_visit.pop_front() {
            // the same cell can be queued by several zero neighbors
            if !self.reveal_single_cell(visit_coords) {
                continue;
            }
            revealed += 1;
            self.queue_hidden_neighbors(visit_coords, &mut to_visit);
        }

        revealed
    }

    /// Reveals every cell, ignoring flags and without any propagation.
    pub fn reveal_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_revealed();
        }
    }

    /// Number of safe cells that are revealed.
    pub fn count_satisfied(&self) -> CellCount {
        self.count_cells(|cell| !cell.is_mine() && cell.is_revealed())
    }

    /// Whether every safe cell is revealed, given the number of mines on the board. Flags are irrelevant.
    pub fn is_won(&self, mines: CellCount) -> bool {
        self.count_satisfied() == self.total_cells().saturating_sub(mines)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_cells(Cell::is_mine)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_cells(Cell::is_flagged)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells.indexed_iter().map(|((row, col), cell)| {
            // dimensions were built from `Coord` values, so indices always fit
            ((row as Coord, col as Coord), cell)
        })
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        let count = self.cells.iter().filter(|&cell| predicate(cell)).count();
        count.try_into().unwrap()
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> bool {
        match self.get_mut(coords) {
            Some(cell) if cell.is_hidden() => {
                cell.set_revealed();
                true
            }
            _ => false,
        }
    }

    fn queue_hidden_neighbors(&self, coords: Coord2, to_visit: &mut VecDeque<Coord2>) {
        let cell = &self[coords];
        if cell.is_mine() || self.has_adjacent_mine(coords) {
            return;
        }
        to_visit.extend(
            cell.neighbors()
                .iter()
                .copied()
                .filter(|&pos| self[pos].is_hidden()),
        );
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
