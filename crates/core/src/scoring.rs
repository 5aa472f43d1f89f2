//! Scoring module - score, level and speed progression
//!
//! Score grows on every lock by `level * SCORE_SCALE[rows_cleared]`.
//! Level is driven by ticks, not by cleared rows: every tick advances a
//! counter and reaching the threshold moves to the next level, which shortens
//! the tick delay. The threshold is then rescaled by `DELAY_TABLE[1] / delay`
//! so each level lasts about as long on the wall clock as level 1 did, even
//! though it takes more ticks.

use crate::types::{DELAY_TABLE, MIN_DELAY_MS, SCORE_SCALE};

/// Points for a lock that cleared `rows` rows at `level`
///
/// Rows beyond four are scored as four.
pub fn line_score(rows: usize, level: u32) -> u32 {
    SCORE_SCALE[rows.min(4)].saturating_mul(level)
}

/// Tick delay in milliseconds for a level (floor at level 9 and above)
pub fn delay_for_level(level: u32) -> u32 {
    DELAY_TABLE
        .get(level as usize)
        .copied()
        .unwrap_or(MIN_DELAY_MS)
        .max(MIN_DELAY_MS)
}

/// Level-up threshold for a given delay, scaled from the level 1 threshold
pub fn threshold_for_delay(base_ticks: u32, delay_ms: u32) -> u32 {
    let scaled = base_ticks as u64 * DELAY_TABLE[1] as u64 / delay_ms.max(1) as u64;
    scaled.clamp(1, u32::MAX as u64) as u32
}

/// Score, level and speed state for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: u32,
    level: u32,
    lines: u32,
    tick_counter: u32,
    base_threshold: u32,
    level_threshold: u32,
    delay_ms: u32,
}

impl ScoreKeeper {
    /// Fresh keeper at level 1; `level_up_ticks` is the level 1 threshold
    pub fn new(level_up_ticks: u32) -> Self {
        Self::with_level(level_up_ticks, 1)
    }

    /// Keeper starting at an arbitrary level, with the matching delay and
    /// threshold
    pub fn with_level(level_up_ticks: u32, level: u32) -> Self {
        let level = level.max(1);
        let base_threshold = level_up_ticks.max(1);
        let delay_ms = delay_for_level(level);
        Self {
            score: 0,
            level,
            lines: 0,
            tick_counter: 0,
            base_threshold,
            level_threshold: threshold_for_delay(base_threshold, delay_ms),
            delay_ms,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total rows cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    pub fn level_threshold(&self) -> u32 {
        self.level_threshold
    }

    /// Current tick delay in milliseconds
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Account for a locked piece; returns the points awarded
    pub fn on_lock(&mut self, rows_cleared: usize) -> u32 {
        let points = line_score(rows_cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows_cleared as u32);
        points
    }

    /// Advance the tick counter; returns true when this tick raised the level
    pub fn on_tick(&mut self) -> bool {
        self.tick_counter += 1;
        if self.tick_counter < self.level_threshold {
            return false;
        }

        self.level = self.level.saturating_add(1);
        self.delay_ms = delay_for_level(self.level);
        self.tick_counter = 0;
        self.level_threshold = threshold_for_delay(self.base_threshold, self.delay_ms);
        true
    }
}

impl Default for ScoreKeeper {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_LEVEL_UP_TICKS)
    }
}
