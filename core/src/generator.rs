use alloc::vec;
use alloc::vec::Vec;
use rand::prelude::*;

use crate::*;

/// Source of mine positions for a new board.
pub trait MineSampler {
    /// Picks up to `mines` distinct in-bounds coordinates on a board of `size`.
    fn sample(&mut self, size: Coord2, mines: CellCount) -> Vec<Coord2>;
}

/// Uniform sampling without replacement from a seeded generator.
///
/// The generator advances with every call, so consecutive boards from the same sampler get different layouts while
/// staying reproducible from the seed.
#[derive(Clone, Debug)]
pub struct RandomMineSampler {
    rng: SmallRng,
}

impl RandomMineSampler {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineSampler for RandomMineSampler {
    fn sample(&mut self, (rows, cols): Coord2, mines: CellCount) -> Vec<Coord2> {
        let total_cells = mult(rows, cols);
        if mines > total_cells {
            log::warn!(
                "Minefield already full, requested {} but only fits {}",
                mines,
                total_cells
            );
        }
        let mines = mines.min(total_cells);

        let mut taken = vec![false; total_cells as usize];
        let mut picked = Vec::with_capacity(mines as usize);
        let mut free_cells = total_cells;

        while (picked.len() as CellCount) < mines {
            // take the `place`-th cell that is still free
            let mut place = self.rng.random_range(0..free_cells);
            for (i, cell) in taken.iter_mut().enumerate() {
                if *cell {
                    continue;
                }
                if place == 0 {
                    *cell = true;
                    picked.push((i / usize::from(cols), i % usize::from(cols)));
                    break;
                }
                place -= 1;
            }
            free_cells -= 1;
        }

        picked
            .into_iter()
            .map(|(row, col)| (row as Coord, col as Coord))
            .collect()
    }
}

/// Always hands out the same layout, for prepared boards and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedMineSampler {
    mines: Vec<Coord2>,
}

impl FixedMineSampler {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MineSampler for FixedMineSampler {
    fn sample(&mut self, size: Coord2, mines: CellCount) -> Vec<Coord2> {
        let layout: Vec<_> = self
            .mines
            .iter()
            .copied()
            .filter(|&(row, col)| row < size.0 && col < size.1)
            .collect();
        if layout.len() as CellCount != mines {
            log::warn!(
                "Fixed layout has {} mines in bounds, requested {}",
                layout.len(),
                mines
            );
        }
        layout
    }
}
