//! Scoring module - flat line scores, bonuses, levels, and drop speeds
//!
//! Rules:
//! - Row clears pay 100/300/600/1000 for 1/2/3/4 rows with no level multiplier.
//! - A board left empty pays 10000; a single-color row pays 2500. Both stack.
//! - Freefall and hard-drop rows pay 1 point each, committed at lock.
//! - The level goes up by one when the line total reaches the current level's
//!   threshold, up to level 10.

use arrayvec::ArrayVec;

use crate::types::{
    SoundEvent, BOARD_CLEAR_BONUS, LEVEL_SPEED, LEVEL_THRESHOLD, LINE_SCORES, MAX_LEVEL,
    MIN_LEVEL, MONOCHROME_BONUS,
};

/// Points for clearing `rows` rows at once
pub fn line_clear_score(rows: usize) -> u32 {
    LINE_SCORES.get(rows).copied().unwrap_or(0)
}

/// Points for rows descended by freefall or hard drop
pub fn drop_score(rows: u32) -> u32 {
    rows
}

fn level_index(level: u8) -> usize {
    (level.clamp(MIN_LEVEL, MAX_LEVEL) - 1) as usize
}

/// Ticks between gravity descents.
///
/// Level 10 alternates 3 and 4 ticks by piece height parity, which averages
/// 3.5 ticks per row.
pub fn gravity_interval(level: u8, height: i32) -> u64 {
    let base = LEVEL_SPEED[level_index(level)];
    if level >= MAX_LEVEL && height % 2 == 0 {
        base - 1
    } else {
        base
    }
}

/// Lines needed to leave `level`
pub fn level_threshold(level: u8) -> u32 {
    LEVEL_THRESHOLD[level_index(level)]
}

/// Level after a resolution that brought the total to `lines`.
/// Rises by at most one per resolution.
pub fn next_level(level: u8, lines: u32) -> u8 {
    if level < MAX_LEVEL && lines >= level_threshold(level) {
        level + 1
    } else {
        level
    }
}

/// Everything a completed row-clear resolution pays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearAward {
    pub line_points: u32,
    pub board_clear_bonus: u32,
    pub monochrome_bonus: u32,
    pub total: u32,
    /// Set when the resolution raised the level
    pub new_level: Option<u8>,
}

impl ClearAward {
    /// Sound cues for this award.
    ///
    /// Only one bonus cue plays: the board-clear cue wins over the monochrome
    /// cue, and any bonus cue silences the level-up cue.
    pub fn events(&self) -> ArrayVec<SoundEvent, 1> {
        let mut events = ArrayVec::new();
        if self.board_clear_bonus > 0 {
            events.push(SoundEvent::BigBonus);
        } else if self.monochrome_bonus > 0 {
            events.push(SoundEvent::SmallBonus);
        } else if self.new_level.is_some() {
            events.push(SoundEvent::NewLevel);
        }
        events
    }
}

/// Compute the payout of a resolution.
///
/// `lines_after` is the line total including the rows just cleared.
pub fn clear_award(
    rows: usize,
    monochrome: bool,
    board_empty: bool,
    level: u8,
    lines_after: u32,
) -> ClearAward {
    let line_points = line_clear_score(rows);
    let board_clear_bonus = if board_empty { BOARD_CLEAR_BONUS } else { 0 };
    let monochrome_bonus = if monochrome { MONOCHROME_BONUS } else { 0 };
    let raised = next_level(level, lines_after);

    ClearAward {
        line_points,
        board_clear_bonus,
        monochrome_bonus,
        total: line_points + board_clear_bonus + monochrome_bonus,
        new_level: (raised != level).then_some(raised),
    }
}
