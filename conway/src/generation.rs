// generation.rs - Next-state computation on a toroidal board

use crate::grid::{ALIVE, DEAD, Grid};
use crate::partition::Band;

/// Alive neighbours of `(x, y)`, wrapping around every edge.
pub fn alive_neighbours(grid: &Grid, x: usize, y: usize) -> usize {
    let (width, height) = (grid.width(), grid.height());
    let (up, down) = ((y + height - 1) % height, (y + 1) % height);
    let (left, right) = ((x + width - 1) % width, (x + 1) % width);

    let neighbours = [
        (left, up),   (x, up),   (right, up),
        (left, y),               (right, y),
        (left, down), (x, down), (right, down),
    ];

    neighbours.iter().filter(|&&(nx, ny)| grid.is_alive(nx, ny)).count()
}

pub fn next_cell_state(grid: &Grid, x: usize, y: usize) -> u8 {
    let current = grid.get(x, y);
    match (current, alive_neighbours(grid, x, y)) {
        (ALIVE, n) if n < 2 => DEAD, // Underpopulation
        (ALIVE, n) if n > 3 => DEAD, // Overpopulation
        (DEAD, 3)           => ALIVE, // Birth
        _                   => current,
    }
}

/// Next state of row `y`, appended to `out`.
pub fn next_row_state(grid: &Grid, y: usize, out: &mut Vec<u8>) {
    out.extend((0..grid.width()).map(|x| next_cell_state(grid, x, y)));
}

/// Next state of the rows in `band` as a fresh `band.height() × width` buffer.
///
/// Neighbours are read from the whole of `grid`, so rows just outside the band
/// (and across the wrap) are taken into account.
pub fn next_band_state(grid: &Grid, band: Band) -> Vec<u8> {
    let mut out = Vec::with_capacity(band.height() * grid.width());
    for y in band.rows() {
        next_row_state(grid, y, &mut out);
    }
    out
}

/// Single-pass next generation of the whole board.
pub fn next_state(grid: &Grid) -> Grid {
    let band = Band { start_y: 0, end_y: grid.height() };
    Grid::from_band_cells(grid.width(), grid.height(), next_band_state(grid, band))
}
