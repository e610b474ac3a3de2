//! This module computes scores for play sessions. All functions are pure
//! over the [Puzzle](crate::Puzzle), the feedback grid, and the
//! [GameStats](crate::game::GameStats); they are usually reached through
//! [Game::score](crate::game::Game::score) and
//! [Game::running_score](crate::game::Game::running_score).
//!
//! The final score is the sum of the base score (per-cell tile scores), the
//! time bonus, the first-time-correct line bonuses, and the completion
//! bonuses for perfect accuracy and efficiency, multiplied by the time and
//! difficulty multipliers and rounded to the nearest integer.

use crate::{GRID_SIZE, Puzzle, index};
use crate::game::{Feedback, GameStats};

use serde::{Deserialize, Serialize};

use std::collections::HashSet;

/// The tile score for a cell guessed in its correct position.
pub const CORRECT_TILE_SCORE: usize = 100;

/// The tile score for a cell whose digit is present but misplaced.
pub const MISPLACED_TILE_SCORE: usize = 50;

/// The bonus for each line that transitioned to fully correct for the first
/// time.
pub const FIRST_TIME_LINE_BONUS: usize = 100;

/// The completion bonus awarded if no wrong guess was made.
pub const PERFECT_ACCURACY_BONUS: usize = 300;

/// The completion bonus awarded if the total number of guesses stayed below
/// [EFFICIENCY_THRESHOLD].
pub const EFFICIENCY_BONUS: usize = 200;

/// The number of guesses at which the [EFFICIENCY_BONUS] is forfeited. A
/// guess count strictly below this earns the bonus.
pub const EFFICIENCY_THRESHOLD: usize = 8;

/// The time bonus awarded for finishing within [FREE_TIME_SECONDS].
pub const MAX_TIME_BONUS: usize = 500;

/// The amount deducted from the time bonus for each started
/// [TIME_BONUS_INTERVAL_SECONDS] beyond the free window.
pub const TIME_BONUS_DECREMENT: usize = 100;

/// The duration in seconds for which the full [MAX_TIME_BONUS] is awarded.
pub const FREE_TIME_SECONDS: u64 = 60;

/// The length in seconds of one decrement interval beyond the free window.
pub const TIME_BONUS_INTERVAL_SECONDS: u64 = 30;

/// The increase of the correctness multiplier per first-time-correct cell.
pub const CORRECTNESS_PER_CELL: f64 = 0.1;

/// The itemized result of scoring a play session. All bonus fields hold the
/// values before the multipliers are applied; [total_score] is the final,
/// multiplied and rounded result.
///
/// [total_score]: ScoreBreakdown::total_score
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScoreBreakdown {

    /// The sum of the tile scores of all guessed, non-given cells.
    pub base_score: usize,

    /// The time bonus, decaying from [MAX_TIME_BONUS] in steps of
    /// [TIME_BONUS_DECREMENT].
    pub time_bonus: usize,

    /// The sum of the [FIRST_TIME_LINE_BONUS]es of all first-time-correct
    /// rows and columns.
    pub first_time_correct_bonus: usize,

    /// [PERFECT_ACCURACY_BONUS] if the puzzle was completed without a wrong
    /// guess, otherwise 0.
    pub perfect_accuracy_bonus: usize,

    /// [EFFICIENCY_BONUS] if the puzzle was completed in fewer than
    /// [EFFICIENCY_THRESHOLD] guesses, otherwise 0.
    pub efficiency_bonus: usize,

    /// The multiplier applied for elapsed time. Currently fixed at 1.0,
    /// since time is already rewarded through [ScoreBreakdown::time_bonus].
    pub time_multiplier: f64,

    /// The product of the correctness multiplier and the pre-fill
    /// multiplier; see [difficulty_multiplier].
    pub difficulty_multiplier: f64,

    /// The final score: the sum of all bonuses, multiplied by both
    /// multipliers and rounded to the nearest integer.
    pub total_score: usize
}

/// Computes the time bonus for the given elapsed session time in seconds.
/// Finishing within [FREE_TIME_SECONDS] earns the full [MAX_TIME_BONUS];
/// every started [TIME_BONUS_INTERVAL_SECONDS] beyond that deducts
/// [TIME_BONUS_DECREMENT], to a minimum of 0.
pub fn time_bonus(seconds: u64) -> usize {
    if seconds <= FREE_TIME_SECONDS {
        return MAX_TIME_BONUS;
    }

    let beyond = seconds - FREE_TIME_SECONDS;
    let interval = TIME_BONUS_INTERVAL_SECONDS;
    let started_intervals = ((beyond + interval - 1) / interval) as usize;

    MAX_TIME_BONUS.saturating_sub(TIME_BONUS_DECREMENT * started_intervals)
}

/// Computes the difficulty multiplier for a session. It is the product of
/// the correctness multiplier, which grows by [CORRECTNESS_PER_CELL] for
/// each first-time-correct cell, and the pre-fill multiplier, which shrinks
/// from 2.0 towards 1.0 as the puzzle offers more givens.
pub fn difficulty_multiplier(puzzle: &Puzzle, first_time_correct_cells: usize)
        -> f64 {
    let correctness =
        1.0 + CORRECTNESS_PER_CELL * first_time_correct_cells as f64;
    let pre_fill =
        2.0 - puzzle.pre_filled_count() as f64 / GRID_SIZE as f64;

    correctness * pre_fill
}

/// Computes the base score: the sum of the tile scores of all cells that
/// are not givens and whose row or column has been guessed. Correct cells
/// earn [CORRECT_TILE_SCORE], misplaced cells [MISPLACED_TILE_SCORE].
pub fn base_score(puzzle: &Puzzle, feedback: &[Option<Feedback>],
        guessed_rows: &HashSet<usize>, guessed_cols: &HashSet<usize>)
        -> usize {
    let mut score = 0;

    for row in 0..GRID_SIZE {
        for column in 0..GRID_SIZE {
            if puzzle.starting_board().get_cell(column, row).unwrap()
                    .is_some() {
                continue;
            }

            if !guessed_rows.contains(&row) &&
                    !guessed_cols.contains(&column) {
                continue;
            }

            match feedback[index(column, row)] {
                Some(Feedback::Correct) => score += CORRECT_TILE_SCORE,
                Some(Feedback::Misplaced) => score += MISPLACED_TILE_SCORE,
                _ => { }
            }
        }
    }

    score
}

fn first_time_correct_bonus(stats: &GameStats) -> usize {
    FIRST_TIME_LINE_BONUS *
        (stats.first_time_correct_rows + stats.first_time_correct_cols)
}

fn is_complete(feedback: &[Option<Feedback>]) -> bool {
    feedback.iter().all(|f| f == &Some(Feedback::Correct))
}

/// Computes the running score displayed while a session is in progress. It
/// consists of the base score and the first-time-correct line bonuses only;
/// time and completion bonuses and the multipliers are withheld until the
/// final score.
pub fn running_score(puzzle: &Puzzle, feedback: &[Option<Feedback>],
        stats: &GameStats, guessed_rows: &HashSet<usize>,
        guessed_cols: &HashSet<usize>) -> usize {
    base_score(puzzle, feedback, guessed_rows, guessed_cols) +
        first_time_correct_bonus(stats)
}

/// Computes the full, itemized score of a session. The perfect accuracy and
/// efficiency bonuses are only awarded if the puzzle is completely solved.
pub fn compute_score(puzzle: &Puzzle, feedback: &[Option<Feedback>],
        stats: &GameStats, guessed_rows: &HashSet<usize>,
        guessed_cols: &HashSet<usize>) -> ScoreBreakdown {
    let complete = is_complete(feedback);
    let base_score = base_score(puzzle, feedback, guessed_rows, guessed_cols);
    let time_bonus = time_bonus(stats.time_in_seconds);
    let first_time_correct_bonus = first_time_correct_bonus(stats);
    let perfect_accuracy_bonus =
        if complete && stats.wrong_guesses == 0 {
            PERFECT_ACCURACY_BONUS
        }
        else {
            0
        };
    let efficiency_bonus =
        if complete && stats.total_guesses < EFFICIENCY_THRESHOLD {
            EFFICIENCY_BONUS
        }
        else {
            0
        };
    let time_multiplier = 1.0;
    let difficulty_multiplier =
        difficulty_multiplier(puzzle, stats.first_time_correct_cells);
    let subtotal = base_score + time_bonus + first_time_correct_bonus +
        perfect_accuracy_bonus + efficiency_bonus;
    let total_score =
        (subtotal as f64 * time_multiplier * difficulty_multiplier).round()
            as usize;

    ScoreBreakdown {
        base_score,
        time_bonus,
        first_time_correct_bonus,
        perfect_accuracy_bonus,
        efficiency_bonus,
        time_multiplier,
        difficulty_multiplier,
        total_score
    }
}

/// Formats a score with comma thousands separators, such as `4,500`.
pub fn format_score(score: usize) -> String {
    let digits = score.to_string();
    let mut result = String::new();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }

        result.push(c);
    }

    result
}

/// Formats an elapsed time in seconds as `m:ss`, such as `1:05`.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
