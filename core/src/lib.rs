#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use core::str::FromStr;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use solver::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod solver;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size as `(rows, cols)`.
    pub size: Coord2,
    /// Chance that any single cell starts lit, only used when creating a board.
    pub chance_lit: f64,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, chance_lit: f64) -> Self {
        Self { size, chance_lit }
    }

    pub fn new(size: Coord2, chance_lit: f64) -> Result<Self> {
        let config = Self::new_unchecked(size, chance_lit);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_size(self.size)?;
        // also rejects NaN
        if !(0.0..=1.0).contains(&self.chance_lit) {
            return Err(ConfigIssue::ChanceOutOfRange.into());
        }
        Ok(())
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((3, 3), 0.5)
    }
}

fn check_size((rows, cols): Coord2) -> Result<()> {
    if rows < 1 {
        return Err(ConfigIssue::NoRows.into());
    }
    if cols < 1 {
        return Err(ConfigIssue::NoColumns.into());
    }
    Ok(())
}

/// Lit/unlit state of every cell on the board, `true` meaning lit.
///
/// The shape is fixed at construction. Transitions produce a new grid instead of mutating
/// the current one, see [`LightGrid::flip`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLightGrid")]
pub struct LightGrid {
    lights: Array2<bool>,
}

/// Deserialized form of [`LightGrid`] before its shape is checked.
#[derive(Deserialize)]
struct RawLightGrid {
    lights: Array2<bool>,
}

impl TryFrom<RawLightGrid> for LightGrid {
    type Error = GameError;

    fn try_from(raw: RawLightGrid) -> Result<Self> {
        Self::from_mask(raw.lights)
    }
}

impl LightGrid {
    /// Grid of the given size with every cell unlit, fails on an empty axis.
    pub fn dark(size: Coord2) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            lights: Array2::default(size.to_nd_index()),
        })
    }

    pub fn from_mask(lights: Array2<bool>) -> Result<Self> {
        match types::array_size(&lights) {
            Some((rows, cols)) if rows > 0 && cols > 0 => Ok(Self { lights }),
            _ => Err(GameError::InvalidBoardShape),
        }
    }

    pub fn from_lit_coords(size: Coord2, lit_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::dark(size)?;

        for &coords in lit_coords {
            let coords = grid.validate_coords(coords)?;
            grid.lights[coords.to_nd_index()] = true;
        }

        Ok(grid)
    }

    /// Lights each cell independently with `config.chance_lit`, drawing from `rng`.
    pub fn random<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let lights = Array2::from_shape_fn(config.size.to_nd_index(), |_| {
            rng.random_bool(config.chance_lit)
        });
        Ok(Self { lights })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.lights.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.lights.len() as CellCount
    }

    pub fn lit_count(&self) -> CellCount {
        self.lights.iter().filter(|&&lit| lit).count() as CellCount
    }

    pub fn is_lit(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Win check, true when every cell is unlit.
    pub fn is_dark(&self) -> bool {
        self.lights.iter().all(|&lit| !lit)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn iter_lit(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.lights
            .indexed_iter()
            .filter(|&(_, &lit)| lit)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn as_mask(&self) -> &Array2<bool> {
        &self.lights
    }

    /// Returns a copy of this grid with the cell at `coords` and its orthogonal neighbors
    /// inverted. Neighbors that fall off the board are skipped.
    pub fn flip(&self, coords: Coord2) -> Result<Self> {
        let coords = self.validate_coords(coords)?;
        let mut next = self.clone();
        next.toggle_area(coords);
        Ok(next)
    }

    /// In-place flip, `coords` must already be validated.
    pub(crate) fn toggle_area(&mut self, coords: Coord2) {
        for pos in self.lights.iter_flip_area(coords) {
            let cell = &mut self.lights[pos.to_nd_index()];
            *cell = !*cell;
        }
    }
}

/// Dark board of the default [`GameConfig`] size.
impl Default for LightGrid {
    fn default() -> Self {
        Self {
            lights: Array2::default(GameConfig::default().size.to_nd_index()),
        }
    }
}

impl Index<Coord2> for LightGrid {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.lights[(row as usize, col as usize)]
    }
}

impl fmt::Display for LightGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        for (i, row) in self.lights.outer_iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for &lit in row {
                f.write_char(if lit { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) form: one line per row, `#` lit and `.` unlit.
impl FromStr for LightGrid {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut rows = 0;
        let mut cols = None;

        for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let start = cells.len();
            for ch in line.chars() {
                cells.push(match ch {
                    '#' => true,
                    '.' => false,
                    _ => return Err(GameError::InvalidBoardShape),
                });
            }
            let width = cells.len() - start;
            if *cols.get_or_insert(width) != width {
                return Err(GameError::InvalidBoardShape);
            }
            rows += 1;
        }

        let lights = Array2::from_shape_vec((rows, cols.unwrap_or(0)), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_mask(lights)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    Toggled,
    Won,
}

impl FlipOutcome {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn grid(s: &str) -> LightGrid {
        s.parse().unwrap()
    }

    #[test]
    fn config_rejects_empty_axes() {
        assert_eq!(
            GameConfig::new((0, 3), 0.5),
            Err(GameError::InvalidConfiguration(ConfigIssue::NoRows))
        );
        assert_eq!(
            GameConfig::new((3, 0), 0.5),
            Err(GameError::InvalidConfiguration(ConfigIssue::NoColumns))
        );
    }

    #[test]
    fn config_rejects_chance_outside_unit_interval() {
        for chance in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            assert_eq!(
                GameConfig::new((3, 3), chance),
                Err(GameError::InvalidConfiguration(ConfigIssue::ChanceOutOfRange))
            );
        }
        assert!(GameConfig::new((1, 1), 0.0).is_ok());
        assert!(GameConfig::new((1, 1), 1.0).is_ok());
    }

    #[test]
    fn config_survives_json() {
        let config = GameConfig::new((4, 7), 0.25).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn random_grid_has_configured_shape() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(7);
        for (rows, cols) in [(1, 1), (1, 5), (3, 3), (8, 2)] {
            let config = GameConfig::new((rows, cols), 0.5).unwrap();
            let grid = LightGrid::random(config, &mut rng).unwrap();
            assert_eq!(grid.size(), (rows, cols));
            assert_eq!(grid.as_mask().dim(), (rows as usize, cols as usize));
        }
    }

    #[test]
    fn random_grid_boundary_chances_are_deterministic() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(0);
        let none = LightGrid::random(GameConfig::new((4, 5), 0.0).unwrap(), &mut rng).unwrap();
        let all = LightGrid::random(GameConfig::new((4, 5), 1.0).unwrap(), &mut rng).unwrap();

        assert!(none.is_dark());
        assert_eq!(all.lit_count(), 20);
    }

    #[test]
    fn random_grid_refuses_unchecked_bad_config() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(0);
        let config = GameConfig::new_unchecked((2, 2), 2.0);
        assert_eq!(
            LightGrid::random(config, &mut rng),
            Err(GameError::InvalidConfiguration(ConfigIssue::ChanceOutOfRange))
        );
    }

    #[test]
    fn win_check_only_for_all_unlit() {
        assert!(LightGrid::dark((3, 3)).unwrap().is_dark());
        assert!(!grid("...\n..#\n...").is_dark());
        assert!(!grid("#").is_dark());
    }

    #[test]
    fn flip_corner_touches_three_cells() {
        let dark = LightGrid::dark((3, 3)).unwrap();
        let next = dark.flip((0, 0)).unwrap();

        assert_eq!(next.lit_count(), 3);
        assert_eq!(next, grid("##.\n#..\n..."));
    }

    #[test]
    fn flip_edge_touches_four_cells() {
        let next = LightGrid::dark((3, 3)).unwrap().flip((0, 1)).unwrap();

        assert_eq!(next.lit_count(), 4);
        assert_eq!(next, grid("###\n.#.\n..."));
    }

    #[test]
    fn flip_interior_touches_five_cells() {
        let next = LightGrid::dark((3, 3)).unwrap().flip((1, 1)).unwrap();

        assert_eq!(next.lit_count(), 5);
        assert_eq!(next, grid(".#.\n###\n.#."));
    }

    #[test]
    fn flip_leaves_input_untouched() {
        let before = grid("#.#\n...\n#.#");
        let after = before.flip((1, 1)).unwrap();

        assert_eq!(before, grid("#.#\n...\n#.#"));
        assert_eq!(after, grid("###\n###\n###"));
    }

    #[test]
    fn flip_twice_is_identity_everywhere() {
        let start = grid("#..#\n.##.\n#.#.");
        let (rows, cols) = start.size();
        for row in 0..rows {
            for col in 0..cols {
                let twice = start.flip((row, col)).unwrap().flip((row, col)).unwrap();
                assert_eq!(twice, start, "at {:?}", (row, col));
            }
        }
    }

    #[test]
    fn flip_out_of_bounds_is_rejected() {
        let start = LightGrid::dark((3, 3)).unwrap();
        assert_eq!(start.flip((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(start.flip((0, 3)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn center_press_round_trip_on_dark_board() {
        let dark = LightGrid::dark((3, 3)).unwrap();

        let pressed = dark.flip((1, 1)).unwrap();
        assert_eq!(
            pressed.iter_lit().collect::<Vec<_>>(),
            vec![(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]
        );
        assert!(!pressed.is_dark());

        let restored = pressed.flip((1, 1)).unwrap();
        assert_eq!(restored, dark);
        assert!(restored.is_dark());
    }

    #[test]
    fn flip_on_single_cell_board() {
        assert_eq!(LightGrid::dark((1, 1)).unwrap().flip((0, 0)).unwrap(), grid("#"));
    }

    #[test]
    fn lit_coords_constructor_validates() {
        let grid = LightGrid::from_lit_coords((2, 3), &[(0, 2), (1, 0)]).unwrap();
        assert_eq!(grid.iter_lit().collect::<Vec<_>>(), vec![(0, 2), (1, 0)]);
        assert_eq!(
            LightGrid::from_lit_coords((2, 3), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn mask_constructor_rejects_empty_shape() {
        assert_eq!(
            LightGrid::from_mask(Array2::default([0, 3])),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            LightGrid::from_mask(Array2::default([256, 1])),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn dark_constructor_rejects_empty_axes() {
        assert_eq!(
            LightGrid::dark((0, 3)),
            Err(GameError::InvalidConfiguration(ConfigIssue::NoRows))
        );
        assert_eq!(
            LightGrid::dark((3, 0)),
            Err(GameError::InvalidConfiguration(ConfigIssue::NoColumns))
        );
        assert_eq!(LightGrid::default(), LightGrid::dark((3, 3)).unwrap());
    }

    #[test]
    fn lit_coords_constructor_rejects_empty_axes() {
        assert_eq!(
            LightGrid::from_lit_coords((0, 2), &[]),
            Err(GameError::InvalidConfiguration(ConfigIssue::NoRows))
        );
        assert_eq!(
            LightGrid::from_lit_coords((2, 0), &[]),
            Err(GameError::InvalidConfiguration(ConfigIssue::NoColumns))
        );
    }

    #[test]
    fn json_grid_must_have_a_valid_shape() {
        let empty = r#"{"lights":{"v":1,"dim":[0,3],"data":[]}}"#;
        assert!(serde_json::from_str::<LightGrid>(empty).is_err());

        let data = vec!["false"; 256].join(",");
        let tall = alloc::format!(r#"{{"lights":{{"v":1,"dim":[256,1],"data":[{}]}}}}"#, data);
        assert!(serde_json::from_str::<LightGrid>(&tall).is_err());

        let start = grid("#..\n.#.");
        let json = serde_json::to_string(&start).unwrap();
        assert_eq!(serde_json::from_str::<LightGrid>(&json).unwrap(), start);
    }

    #[test]
    fn text_form_matches_display() {
        let text = "#.#\n.#.";
        assert_eq!(grid(text).to_string(), text);
        assert_eq!("#.\n#".parse::<LightGrid>(), Err(GameError::InvalidBoardShape));
        assert_eq!("#x".parse::<LightGrid>(), Err(GameError::InvalidBoardShape));
        assert_eq!("".parse::<LightGrid>(), Err(GameError::InvalidBoardShape));
    }
}
