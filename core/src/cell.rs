use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::Coord2;

/// One square of the board.
///
/// Neighbors are stored as indices into the owning [`Board`](crate::Board), in the order they were linked.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    revealed: bool,
    flagged: bool,
    neighbors: SmallVec<[Coord2; 8]>,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Neither revealed nor flagged, so a reveal would open it.
    pub const fn is_hidden(&self) -> bool {
        !self.revealed && !self.flagged
    }

    pub fn neighbors(&self) -> &[Coord2] {
        &self.neighbors
    }

    pub fn set_mine(&mut self) {
        self.mine = true;
    }

    pub fn set_flag(&mut self, flagged: bool) {
        self.flagged = flagged;
    }

    pub(crate) fn set_revealed(&mut self) {
        self.revealed = true;
    }

    /// Returns `false` when `other` was already listed.
    pub(crate) fn push_neighbor(&mut self, other: Coord2) -> bool {
        if self.neighbors.contains(&other) {
            false
        } else {
            self.neighbors.push(other);
            true
        }
    }
}
