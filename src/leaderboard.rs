//! In-memory ranking of finished sessions.
//!
//! Scores are kept best first and trimmed to [`LEADERBOARD_SIZE`] entries.
//! A score that ties an existing entry ranks below it. Nothing is written to
//! disk; the board lives as long as the process.

use arrayvec::ArrayVec;

/// Number of ranked sessions kept.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedScore {
    pub score: u32,
    pub session_id: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: ArrayVec<RankedScore, LEADERBOARD_SIZE>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished session. Returns its 0-based rank, or `None` when the
    /// board is full and the score does not beat the last entry.
    pub fn record(&mut self, entry: RankedScore) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.entries.len());
        if rank == LEADERBOARD_SIZE {
            return None;
        }
        if self.entries.is_full() {
            self.entries.pop();
        }
        self.entries.insert(rank, entry);
        Some(rank)
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Rank of a recorded session, if it is still on the board.
    pub fn rank_of(&self, session_id: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.session_id == session_id)
    }

    pub fn entries(&self) -> &[RankedScore] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
