// params.rs - Run configuration and its validation

use tracing::warn;

use crate::error::GolError;

/// Run configuration. Fixed for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    pub turns: usize,
    pub threads: usize,
    pub image_width: usize,
    pub image_height: usize,
}

impl Params {
    pub fn validate(&self) -> Result<(), GolError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(GolError::InvalidParams("image dimensions must be non-zero"));
        }
        if self.threads == 0 {
            return Err(GolError::InvalidParams("thread count must be at least 1"));
        }
        Ok(())
    }

    /// Worker count actually used: never more workers than rows.
    pub fn worker_count(&self) -> usize {
        if self.threads > self.image_height {
            warn!(
                threads = self.threads,
                rows = self.image_height,
                "more threads than rows, clamping worker count"
            );
        }
        self.threads.min(self.image_height)
    }

    /// Name of the initial image requested from the grid source.
    pub fn input_name(&self) -> String {
        format!("{}x{}", self.image_width, self.image_height)
    }

    /// Name of a snapshot taken after `completed_turns` turns.
    pub fn output_name(&self, completed_turns: usize) -> String {
        format!("{}x{}x{}", self.image_width, self.image_height, completed_turns)
    }
}
