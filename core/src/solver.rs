//! Finds a set of presses that turns a board dark.
//!
//! Light chasing: after choosing presses for the first row, pressing the cell below every
//! lit cell clears each row in turn, leaving only the last row possibly lit. That leftover
//! is an affine function of the first-row presses over GF(2), so one small `cols × cols`
//! system decides solvability and picks the first row.

use alloc::vec;
use alloc::vec::Vec;

use ndarray::Array2;
use serde::Serialize;

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    presses: Array2<bool>,
}

impl Solution {
    pub fn presses(&self) -> &Array2<bool> {
        &self.presses
    }

    pub fn press_count(&self) -> CellCount {
        self.presses.iter().filter(|&&pressed| pressed).count() as CellCount
    }

    /// Presses in row-major order.
    pub fn iter_presses(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.presses
            .indexed_iter()
            .filter(|&(_, &pressed)| pressed)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// Flips every press on a copy of `grid`, presses outside its bounds are ignored.
    pub fn apply_to(&self, grid: &LightGrid) -> LightGrid {
        let mut next = grid.clone();
        for pos in self.iter_presses() {
            if next.validate_coords(pos).is_ok() {
                next.toggle_area(pos);
            }
        }
        next
    }
}

/// Returns `None` when no combination of presses can turn `grid` dark.
///
/// When several press sets work, the one with the fewest presses is returned as long as the
/// number of alternatives stays small, see [`MAX_SEARCH_NULLITY`].
pub fn solve(grid: &LightGrid) -> Option<Solution> {
    let size = grid.size();
    let width = usize::from(size.1);

    let (_, target) = chase(grid.clone(), &vec![false; width]);

    let dark = LightGrid::dark(size).ok()?;
    let effects: Vec<Vec<bool>> = (0..width)
        .map(|col| {
            let mut first_row = vec![false; width];
            first_row[col] = true;
            chase(dark.clone(), &first_row).1
        })
        .collect();

    let system = solve_gf2(&effects, &target)?;
    let nullity = system.null_basis.len();
    if nullity > MAX_SEARCH_NULLITY {
        log::debug!(
            "Board {:?} has {} free presses, skipping shortest-solution search",
            size,
            nullity
        );
    }

    let mut best: Option<Solution> = None;
    for first_row in system.candidates() {
        let (presses, leftover) = chase(grid.clone(), &first_row);
        if leftover.iter().any(|&lit| lit) {
            log::error!("Light chasing left cells lit after a consistent first row");
            return None;
        }

        let candidate = Solution { presses };
        if best
            .as_ref()
            .is_none_or(|best| candidate.press_count() < best.press_count())
        {
            best = Some(candidate);
        }
    }

    best
}

/// Next press towards a dark board, `None` when already dark or unsolvable.
pub fn hint(grid: &LightGrid) -> Option<Coord2> {
    solve(grid)?.iter_presses().next()
}

/// Presses `first_row`, then chases lights down. Returns all presses made and the last row.
fn chase(mut board: LightGrid, first_row: &[bool]) -> (Array2<bool>, Vec<bool>) {
    let (rows, cols) = board.size();
    let mut presses: Array2<bool> = Array2::default(board.size().to_nd_index());

    for col in 0..cols {
        if first_row[usize::from(col)] {
            let coords: Coord2 = (0, col);
            board.toggle_area(coords);
            presses[coords.to_nd_index()] = true;
        }
    }

    for row in 1..rows {
        for col in 0..cols {
            if board[(row - 1, col)] {
                board.toggle_area((row, col));
                presses[(row, col).to_nd_index()] = true;
            }
        }
    }

    let last_row = match usize::from(rows).checked_sub(1) {
        Some(last) => board.as_mask().row(last).to_vec(),
        None => Vec::new(),
    };
    (presses, last_row)
}

/// Above this many free variables only the particular solution is tried.
pub const MAX_SEARCH_NULLITY: usize = 10;

/// Solution space of a consistent GF(2) system.
#[derive(Clone, Debug, PartialEq)]
struct Gf2Solutions {
    /// Solution with every free variable set to zero.
    particular: Vec<bool>,
    /// One vector per free variable, any sum of them added to `particular` also solves.
    null_basis: Vec<Vec<bool>>,
}

impl Gf2Solutions {
    fn candidates(&self) -> impl Iterator<Item = Vec<bool>> + '_ {
        let searched = if self.null_basis.len() > MAX_SEARCH_NULLITY {
            0
        } else {
            self.null_basis.len()
        };

        (0u32..(1 << searched)).map(move |mask| {
            let mut candidate = self.particular.clone();
            for (i, basis) in self.null_basis.iter().take(searched).enumerate() {
                if mask & (1 << i) != 0 {
                    for (a, &b) in candidate.iter_mut().zip(basis) {
                        *a ^= b;
                    }
                }
            }
            candidate
        })
    }
}

/// Solves `sum(x[j] * effects[j]) = target` over GF(2) by reducing to row echelon form.
fn solve_gf2(effects: &[Vec<bool>], target: &[bool]) -> Option<Gf2Solutions> {
    let n = target.len();
    let unknowns = effects.len();

    // augmented matrix, one row per equation
    let mut matrix: Vec<Vec<bool>> = (0..n)
        .map(|i| {
            let mut row: Vec<bool> = effects.iter().map(|effect| effect[i]).collect();
            row.push(target[i]);
            row
        })
        .collect();

    let mut pivots = Vec::new();
    let mut free = Vec::new();
    let mut rank = 0;
    for col in 0..unknowns {
        let Some(pivot_row) = (rank..n).find(|&row| matrix[row][col]) else {
            free.push(col);
            continue;
        };
        matrix.swap(rank, pivot_row);

        let pivot = matrix[rank].clone();
        for (row, equation) in matrix.iter_mut().enumerate() {
            if row != rank && equation[col] {
                for (a, &b) in equation.iter_mut().zip(&pivot) {
                    *a ^= b;
                }
            }
        }

        pivots.push(col);
        rank += 1;
    }

    if matrix[rank..].iter().any(|equation| equation[unknowns]) {
        return None;
    }

    let mut particular = vec![false; unknowns];
    for (row, &col) in pivots.iter().enumerate() {
        particular[col] = matrix[row][unknowns];
    }

    let null_basis = free
        .iter()
        .map(|&free_col| {
            let mut basis = vec![false; unknowns];
            basis[free_col] = true;
            for (row, &col) in pivots.iter().enumerate() {
                basis[col] = matrix[row][free_col];
            }
            basis
        })
        .collect();

    Some(Gf2Solutions {
        particular,
        null_basis,
    })
}
