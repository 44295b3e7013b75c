// worker.rs - One band, one task, one result

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::error::GolError;
use crate::generation::next_row_state;
use crate::grid::Grid;
use crate::partition::Band;

/// Result channel of a single worker for a single turn.
pub struct WorkerHandle {
    band: Band,
    result: oneshot::Receiver<Vec<u8>>,
}

impl WorkerHandle {
    /// Waits for the band's next state.
    pub async fn join(self) -> Result<Vec<u8>, GolError> {
        let Band { start_y, end_y } = self.band;
        self.result.await.map_err(|_| GolError::WorkerLost { start_y, end_y })
    }
}

/// Spawns a task computing the next state of `band` against `grid`.
pub fn spawn_worker(grid: Arc<Grid>, band: Band) -> WorkerHandle {
    let (tx, result) = oneshot::channel();
    tokio::spawn(async move {
        let mut out = Vec::with_capacity(band.height() * grid.width());
        for y in band.rows() {
            next_row_state(&grid, y, &mut out);
            tokio::task::yield_now().await; // Cooperative yielding between rows
        }
        let _ = tx.send(out);
    });
    WorkerHandle { band, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::next_band_state;
    use crate::grid::Cell;

    #[tokio::test]
    async fn worker_delivers_band_state() {
        let grid = Arc::new(Grid::with_alive(6, 6, &[Cell::new(1, 3), Cell::new(2, 3), Cell::new(3, 3)]));
        let band = Band { start_y: 2, end_y: 5 };

        let rows = spawn_worker(Arc::clone(&grid), band).join().await.unwrap();
        assert_eq!(rows, next_band_state(&grid, band));
    }

    #[tokio::test]
    async fn dropped_worker_is_reported() {
        let (tx, result) = oneshot::channel::<Vec<u8>>();
        drop(tx);
        let handle = WorkerHandle { band: Band { start_y: 4, end_y: 8 }, result };
        let err = handle.join().await.unwrap_err();
        assert!(matches!(err, GolError::WorkerLost { start_y: 4, end_y: 8 }));
    }
}
