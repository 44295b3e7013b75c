// control.rs - Reacting to save / quit / pause requests while the run is live

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::distributor::Context;
use crate::error::GolError;
use crate::io::GridIo;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    /// Dump the current board without touching the run.
    Save,
    /// Dump the current board, then stop after the turn in flight.
    Quit,
    /// Reserved; currently ignored.
    Pause,
}

impl TryFrom<char> for KeyPress {
    type Error = char;

    fn try_from(key: char) -> Result<Self, Self::Error> {
        match key {
            's' => Ok(KeyPress::Save),
            'q' => Ok(KeyPress::Quit),
            'p' => Ok(KeyPress::Pause),
            other => Err(other),
        }
    }
}

/// Listens for key presses until `stop` fires. A quit request is passed to the
/// turn loop through `quit`; snapshot failures end the task with an error.
pub(crate) fn spawn_listener<I: GridIo>(
    ctx: Arc<Context<I>>,
    mut keys: mpsc::Receiver<KeyPress>,
    quit: watch::Sender<bool>,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<Result<(), GolError>> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = stop.changed() => break,
                key = keys.recv() => match key {
                    Some(KeyPress::Save) => {
                        ctx.snapshot().await?;
                    }
                    Some(KeyPress::Quit) => {
                        ctx.snapshot().await?;
                        info!("quit requested");
                        quit.send_replace(true);
                    }
                    Some(KeyPress::Pause) => debug!("pause is not supported, ignoring"),
                    None => {
                        // No more keys will come; wait to be told to stop.
                        let _ = stop.changed().await;
                        break;
                    }
                },
            }
        }
        debug!("listener stopped");
        Ok::<(), GolError>(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_from_chars() {
        assert_eq!(KeyPress::try_from('s'), Ok(KeyPress::Save));
        assert_eq!(KeyPress::try_from('q'), Ok(KeyPress::Quit));
        assert_eq!(KeyPress::try_from('p'), Ok(KeyPress::Pause));
        assert_eq!(KeyPress::try_from('x'), Err('x'));
    }
}
