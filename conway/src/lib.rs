//! Conway's Game of Life on a torus, one generation at a time, split across
//! row bands computed by parallel tokio tasks.
//!
//! [`run`] drives a whole simulation: it loads the initial board through a
//! [`GridIo`], streams [`Event`]s to an observer, reports alive-cell counts
//! every [`REPORT_INTERVAL`] and reacts to [`KeyPress`] control signals.

mod control;
mod distributor;
mod error;
mod event;
mod generation;
mod grid;
mod io;
mod params;
mod partition;
mod stats;
mod worker;


pub use control::KeyPress;
pub use distributor::run;
pub use error::{GolError, IoError};
pub use event::{Event, State};
pub use generation::{alive_neighbours, next_band_state, next_state};
pub use grid::{ALIVE, Cell, DEAD, Grid, SharedWorld};
pub use io::{GridIo, Image, ImageStore};
pub use params::Params;
pub use partition::{Band, band_heights, bands};
pub use stats::REPORT_INTERVAL;
