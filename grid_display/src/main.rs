// main.rs - Window onto a running simulation
// The engine runs on a tokio runtime; the window mirrors it from the event stream.

use eframe::egui;
use egui::Color32;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use conway::{Event, Grid, Image, ImageStore, KeyPress, Params, State};

mod grid;      // Board configuration
mod patterns;  // Starting patterns
mod ui;        // egui rendering

use grid::{EVENT_BUFFER, GRID_SIZE, MAX_EVENTS_PER_FRAME, THREADS, TURNS};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Parallel Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GameOfLife::new(runtime))),
    )?;
    Ok(())
}

/// Handles on one simulation run.
struct Session {
    events: mpsc::Receiver<Event>,
    keys: mpsc::Sender<KeyPress>,
    store: ImageStore,
    finished: bool,
}

pub struct GameOfLife {
    pub board: Vec<bool>,  // Mirror of the engine's board, rebuilt from CellFlipped events
    pub completed_turns: usize,
    pub alive_count: Option<usize>,
    pub final_alive: Option<usize>,
    pub state: Option<State>,
    pub snapshots: Vec<String>,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub random_seed: u64,

    runtime: tokio::runtime::Runtime,
    session: Option<Session>,
}

impl GameOfLife {
    fn new(runtime: tokio::runtime::Runtime) -> Self {
        Self {
            board: vec![false; GRID_SIZE * GRID_SIZE],
            completed_turns: 0,
            alive_count: None,
            final_alive: None,
            state: None,
            snapshots: Vec::new(),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            random_seed: 0,
            runtime,
            session: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.finished)
    }

    pub fn start_pattern(&mut self) {
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            info!(pattern = pattern.name, "starting run");
            self.start(patterns::pattern_grid(pattern));
        }
    }

    pub fn start_random(&mut self) {
        self.random_seed += 1;
        info!(seed = self.random_seed, "starting random run");
        self.start(patterns::random_grid(self.random_seed));
    }

    fn start(&mut self, initial: Grid) {
        if self.is_running() {
            warn!("a run is already in progress");
            return;
        }

        let params = Params { turns: TURNS, threads: THREADS, image_width: GRID_SIZE, image_height: GRID_SIZE };
        let _guard = self.runtime.enter();
        let store = ImageStore::spawn();
        store.insert(params.input_name(), Image {
            width: initial.width(),
            height: initial.height(),
            cells: initial.cells().to_vec(),
        });

        let (events_tx, events) = mpsc::channel(EVENT_BUFFER);
        let (keys, keys_rx) = mpsc::channel(16);
        let engine_store = store.clone();
        self.runtime.spawn(async move {
            if let Err(err) = conway::run(params, engine_store, events_tx, keys_rx).await {
                error!(%err, "simulation failed");
            }
        });

        self.board.iter_mut().for_each(|cell| *cell = false);
        self.completed_turns = 0;
        self.alive_count = None;
        self.final_alive = None;
        self.state = None;
        self.snapshots.clear();
        self.session = Some(Session { events, keys, store, finished: false });
    }

    /// Forwards a control key to the running simulation.
    pub fn press(&mut self, key: KeyPress) {
        if let Some(session) = self.session.as_ref().filter(|s| !s.finished) {
            if session.keys.try_send(key).is_err() {
                warn!(?key, "control channel full, key dropped");
            }
        }
    }

    /// Applies every pending event to the mirrored board.
    pub fn poll_events(&mut self) {
        let Some(session) = self.session.as_mut() else { return };

        for _ in 0..MAX_EVENTS_PER_FRAME {
            match session.events.try_recv() {
                Ok(event) => match event {
                    Event::CellFlipped { cell, .. } => {
                        let i = cell.y * GRID_SIZE + cell.x;
                        self.board[i] = !self.board[i];
                    }
                    Event::TurnComplete { completed_turns } => self.completed_turns = completed_turns,
                    Event::AliveCellsCount { cells_count, .. } => self.alive_count = Some(cells_count),
                    Event::FinalTurnComplete { completed_turns, alive } => {
                        self.completed_turns = completed_turns;
                        self.final_alive = Some(alive.len());
                    }
                    Event::StateChange { completed_turns, new_state } => {
                        info!(completed_turns, %new_state, "engine state changed");
                        self.state = Some(new_state);
                    }
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    session.finished = true;
                    break;
                }
            }
        }
        self.snapshots = session.store.names();
    }
}
