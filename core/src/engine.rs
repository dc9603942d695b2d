use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// At least one cell is lit.
    Playing,
    /// Every cell is unlit, terminal for this engine.
    Won,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }

    fn of(grid: &LightGrid) -> Self {
        if grid.is_dark() {
            Self::Won
        } else {
            Self::Playing
        }
    }
}

/// One game: the board plus its cached state.
///
/// The state is derived when the engine is created and after every flip, never on read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    grid: LightGrid,
    state: EngineState,
    move_count: u32,
}

impl PlayEngine {
    pub fn new(grid: LightGrid) -> Self {
        let state = EngineState::of(&grid);
        Self {
            grid,
            state,
            move_count: 0,
        }
    }

    /// Builds the board with `generator`, failing on an invalid `config`.
    pub fn generate<G: LayoutGenerator>(generator: G, config: GameConfig) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    pub fn grid(&self) -> &LightGrid {
        &self.grid
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn is_lit(&self, coords: Coord2) -> bool {
        self.grid.is_lit(coords)
    }

    pub fn lit_count(&self) -> CellCount {
        self.grid.lit_count()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn can_interact_at(&self, coords: Coord2) -> bool {
        !self.state.is_finished() && self.grid.validate_coords(coords).is_ok()
    }

    /// Applies the flip rule at `coords` and commits the resulting board.
    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        let next = self.grid.flip(coords)?;
        self.grid = next;
        self.move_count = self.move_count.saturating_add(1);

        self.state = EngineState::of(&self.grid);
        if self.state.is_finished() {
            log::debug!("Board cleared at {:?} after {} moves", coords, self.move_count);
            Ok(FlipOutcome::Won)
        } else {
            Ok(FlipOutcome::Toggled)
        }
    }

    /// Suggested next press, `None` once won or when the board cannot be cleared.
    pub fn hint(&self) -> Option<Coord2> {
        if self.state.is_finished() {
            return None;
        }
        crate::hint(&self.grid)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
