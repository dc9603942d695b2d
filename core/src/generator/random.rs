use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Seeded generator, the same seed and config always produce the same board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    policy: LayoutPolicy,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, policy: LayoutPolicy) -> Self {
        Self { seed, policy }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<LightGrid> {
        use rand::Rng;
        use LayoutPolicy::*;

        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let grid = match self.policy {
            Random => LightGrid::random(config, &mut rng)?,
            Solvable => {
                let mut grid = LightGrid::dark(config.size)?;
                let (rows, cols) = config.size;
                for row in 0..rows {
                    for col in 0..cols {
                        if rng.random_bool(config.chance_lit) {
                            grid.toggle_area((row, col));
                        }
                    }
                }
                grid
            }
        };

        if grid.is_dark() && config.chance_lit > 0.0 {
            log::warn!("Generated board is already dark, game starts won");
        }
        log::debug!(
            "Generated {:?} board {:?} with {} lit cells",
            self.policy,
            config.size,
            grid.lit_count()
        );
        Ok(grid)
    }
}
