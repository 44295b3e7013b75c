// error.rs - Error types for runs and the image collaborator

use thiserror::Error;

/// Failures reported by a grid source or snapshot sink.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("no image named `{0}`")]
    NotFound(String),

    #[error("image is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    DimensionMismatch { expected: (usize, usize), actual: (usize, usize) },

    #[error("short read: expected {expected} cells, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("cell ({x}, {y}) has value {value}, expected 0 or 255")]
    InvalidCell { x: usize, y: usize, value: u8 },

    #[error("image store is no longer running")]
    Disconnected,
}

/// Everything that can end a run early.
#[derive(Debug, Error)]
pub enum GolError {
    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("worker for rows {start_y}..{end_y} exited without a result")]
    WorkerLost { start_y: usize, end_y: usize },

    #[error("event stream closed by its consumer")]
    EventsClosed,

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
