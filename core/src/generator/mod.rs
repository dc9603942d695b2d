use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<LightGrid>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutPolicy {
    /// Every cell is lit independently, the board may have no solution.
    Random,
    /// Random presses on a dark board, always solvable.
    Solvable,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::Random
    }
}
