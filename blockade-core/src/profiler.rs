//! Move execution profiling
//!
//! Passed by reference into `Board::make_move` / `Board::undo_move` so the
//! caller owns the counters (one per search, thread, or game).

use std::time::{Duration, Instant};

use tracing::trace;

use crate::moves::Move;

#[derive(Clone, Debug, Default)]
pub struct MoveProfiler {
    moves_made: u64,
    moves_undone: u64,
    make_time: Duration,
    undo_time: Duration,
}

impl MoveProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_make(&self) -> Instant {
        Instant::now()
    }

    pub fn stop_make(&mut self, timer: Instant, mv: &Move) {
        self.moves_made += 1;
        self.make_time += timer.elapsed();
        trace!("made {}", mv);
    }

    pub fn start_undo(&self) -> Instant {
        Instant::now()
    }

    pub fn stop_undo(&mut self, timer: Instant, mv: &Move) {
        self.moves_undone += 1;
        self.undo_time += timer.elapsed();
        trace!("undid {}", mv);
    }

    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    pub fn moves_undone(&self) -> u64 {
        self.moves_undone
    }

    pub fn make_time(&self) -> Duration {
        self.make_time
    }

    pub fn undo_time(&self) -> Duration {
        self.undo_time
    }

    /// Fold another profiler's counters into this one
    pub fn merge(&mut self, other: &MoveProfiler) {
        self.moves_made += other.moves_made;
        self.moves_undone += other.moves_undone;
        self.make_time += other.make_time;
        self.undo_time += other.undo_time;
    }
}
