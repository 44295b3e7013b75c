// grid.rs - Compile-time board configuration for the viewer

pub const GRID_SIZE: usize = 64;       // Board is GRID_SIZE x GRID_SIZE, wrapping at the edges
pub const THREADS: usize = 8;          // Row bands computed in parallel each turn
pub const TURNS: usize = 100_000;      // Turns before the run finishes on its own
pub const EVENT_BUFFER: usize = 4096;  // Notifications buffered between engine and window
pub const MAX_EVENTS_PER_FRAME: usize = 50_000;
