use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{BoardInt, Coords};

/// The single piece of food on the board.
///
/// Placement ignores the snake, so a pickup may land on top of its body.
pub struct Pickup {
    pos: Coords,
    board_size: BoardInt,
    rng: StdRng,
}

impl Pickup {
    pub fn new(board_size: BoardInt, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut pickup = Pickup { pos: (0, 0), board_size, rng };
        pickup.relocate();
        pickup
    }

    /// Places a pickup at a fixed position. Later relocations draw from `seed`.
    #[cfg(test)]
    pub fn at(pos: Coords, board_size: BoardInt, seed: u64) -> Self {
        Pickup { pos, board_size, rng: StdRng::seed_from_u64(seed) }
    }

    pub fn pos(&self) -> Coords {
        self.pos
    }

    pub fn relocate(&mut self) {
        let x = self.rng.gen_range(0..self.board_size);
        let y = self.rng.gen_range(0..self.board_size);
        self.pos = (x, y);
        debug!(x, y, "pickup relocated");
    }
}
