// stats.rs - Periodic alive-cell reports, independent of turn boundaries

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::event::Event;
use crate::grid::SharedWorld;

pub const REPORT_INTERVAL: Duration = Duration::from_secs(2);

/// Emits an [`Event::AliveCellsCount`] every `period` until `stop` fires or the
/// event stream goes away.
pub fn spawn_reporter(
    world: Arc<SharedWorld>,
    events: mpsc::Sender<Event>,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await; // first tick is immediate

        loop {
            tokio::select! {
                _ = stop.changed() => break,
                _ = ticker.tick() => {
                    let (completed_turns, cells_count) =
                        world.read(|grid, turns| (turns, grid.alive_count()));
                    let event = Event::AliveCellsCount { completed_turns, cells_count };
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
            }
        }
        debug!("reporter stopped");
    })
}
