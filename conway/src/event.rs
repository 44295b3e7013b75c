// event.rs - Notifications sent to whoever is watching the run

use std::fmt;

use crate::grid::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Quitting,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Quitting => write!(f, "Quitting"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A cell changed state. Turn 0 is used for the initially alive cells.
    CellFlipped { completed_turns: usize, cell: Cell },
    TurnComplete { completed_turns: usize },
    /// Periodic sample from the statistics reporter.
    AliveCellsCount { completed_turns: usize, cells_count: usize },
    FinalTurnComplete { completed_turns: usize, alive: Vec<Cell> },
    StateChange { completed_turns: usize, new_state: State },
}

impl Event {
    pub fn completed_turns(&self) -> usize {
        match self {
            Event::CellFlipped { completed_turns, .. }
            | Event::TurnComplete { completed_turns }
            | Event::AliveCellsCount { completed_turns, .. }
            | Event::FinalTurnComplete { completed_turns, .. }
            | Event::StateChange { completed_turns, .. } => *completed_turns,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::CellFlipped { cell, .. } => write!(f, "Cell ({}, {}) flipped", cell.x, cell.y),
            Event::TurnComplete { completed_turns } => write!(f, "Turn {completed_turns} complete"),
            Event::AliveCellsCount { cells_count, .. } => write!(f, "Alive Cells {cells_count}"),
            Event::FinalTurnComplete { completed_turns, alive } => {
                write!(f, "Final turn {completed_turns}: {} alive", alive.len())
            }
            Event::StateChange { new_state, .. } => write!(f, "{new_state}"),
        }
    }
}
