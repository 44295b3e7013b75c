// distributor.rs - Drives the turn loop and talks to every collaborator

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::control::{KeyPress, spawn_listener};
use crate::error::{GolError, IoError};
use crate::event::{Event, State};
use crate::grid::{Grid, SharedWorld};
use crate::io::GridIo;
use crate::params::Params;
use crate::partition::{Band, bands};
use crate::stats::{REPORT_INTERVAL, spawn_reporter};
use crate::worker::spawn_worker;

/// Everything a run shares with its background tasks.
pub(crate) struct Context<I> {
    pub params: Params,
    pub world: Arc<SharedWorld>,
    pub io: I,
}

impl<I: GridIo> Context<I> {
    /// Writes the current board to the sink, named after its completed turn count.
    pub async fn snapshot(&self) -> Result<(), IoError> {
        let (turns, cells) = self.world.read(|grid, turns| (turns, grid.cells().to_vec()));
        let name = self.params.output_name(turns);
        let Params { image_width, image_height, .. } = self.params;
        self.io.write_image(&name, image_width, image_height, cells).await?;
        info!(%name, "snapshot written");
        Ok(())
    }
}

async fn emit(events: &mpsc::Sender<Event>, event: Event) -> Result<(), GolError> {
    events.send(event).await.map_err(|_| GolError::EventsClosed)
}

/// Runs the whole simulation.
///
/// The initial board is read from `io` under `"{width}x{height}"`. Progress goes
/// to `events`; once this returns `Ok` the last event sent is a
/// [`State::Quitting`] state change and the run holds no more senders. Keys
/// arriving on `keys` can request snapshots or an early quit.
///
/// Any worker or collaborator failure aborts the run without a final report.
pub async fn run<I: GridIo>(
    params: Params,
    io: I,
    events: mpsc::Sender<Event>,
    keys: mpsc::Receiver<KeyPress>,
) -> Result<(), GolError> {
    params.validate()?;
    let threads = params.worker_count();
    let Params { image_width: width, image_height: height, .. } = params;
    info!(turns = params.turns, threads, width, height, "starting run");

    let cells = io.read_image(&params.input_name(), width, height).await?;
    let grid = Grid::from_cells(width, height, cells)?;
    for cell in grid.alive_cells() {
        emit(&events, Event::CellFlipped { completed_turns: 0, cell }).await?;
    }

    let ctx = Arc::new(Context { params, world: Arc::new(SharedWorld::new(grid)), io });

    let (stop_tx, stop) = watch::channel(false);
    let (quit_tx, quit) = watch::channel(false);
    let reporter = spawn_reporter(Arc::clone(&ctx.world), events.clone(), REPORT_INTERVAL, stop.clone());
    let listener = spawn_listener(Arc::clone(&ctx), keys, quit_tx, stop);

    let outcome = execute_turns(&ctx, &events, &bands(height, threads), &quit, &listener).await;

    // Neither background task may outlive the running phase.
    stop_tx.send_replace(true);
    let reporter_result = reporter.await;
    let listener_result = listener.await;
    let turn = outcome?;
    reporter_result?;
    listener_result??;

    let alive = ctx.world.read(|grid, _| grid.alive_cells());
    emit(&events, Event::FinalTurnComplete { completed_turns: turn, alive }).await?;

    ctx.snapshot().await?;
    ctx.io.check_idle().await?;

    emit(&events, Event::StateChange { completed_turns: turn, new_state: State::Quitting }).await?;
    info!(turn, "run finished");
    Ok(())
}

/// The running phase. Returns the number of completed turns.
async fn execute_turns<I: GridIo>(
    ctx: &Context<I>,
    events: &mpsc::Sender<Event>,
    bands: &[Band],
    quit: &watch::Receiver<bool>,
    listener: &JoinHandle<Result<(), GolError>>,
) -> Result<usize, GolError> {
    let Params { turns, image_width: width, image_height: height, .. } = ctx.params;
    let mut turn = 0;

    // Quit and listener failures are only looked at between turns.
    while turn < turns && !quit_requested(quit) && !listener.is_finished() {
        let current = ctx.world.snapshot();

        let workers: Vec<_> = bands.iter().map(|&band| spawn_worker(Arc::clone(&current), band)).collect();
        let mut cells = Vec::with_capacity(width * height);
        for worker in workers {
            cells.extend(worker.join().await?);
        }
        let next = Grid::from_band_cells(width, height, cells);

        for cell in current.flipped_cells(&next) {
            emit(events, Event::CellFlipped { completed_turns: turn + 1, cell }).await?;
        }
        ctx.world.swap(next, turn + 1);
        turn += 1;
        emit(events, Event::TurnComplete { completed_turns: turn }).await?;
        debug!(turn, "turn complete");
    }
    Ok(turn)
}

fn quit_requested(quit: &watch::Receiver<bool>) -> bool {
    *quit.borrow()
}
