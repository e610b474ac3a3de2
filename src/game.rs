//! This module contains the state and logic of one play session: the
//! player's board, the feedback accumulated from guesses, and the statistics
//! that feed the [score](crate::score) module.
//!
//! The centerpiece is [Game::submit_guess], which evaluates every eligible
//! line (a completed row or column that has not been guessed yet) against the
//! hidden solution. Each cell of an evaluated line is classified as
//! [correct](Feedback::Correct), [misplaced](Feedback::Misplaced), or
//! [wrong](Feedback::Wrong). Misplaced cells additionally carry an
//! [ArrowDirection] hinting whether the digit belongs elsewhere in the same
//! row or the same column of the solution.
//!
//! Lines with incomplete or duplicate digits are never scored. The evaluator
//! silently refuses them rather than raising an error, since they are
//! expected player states, not bugs.

use crate::{GRID_SIZE, NumblGrid, Puzzle, index};
use crate::error::NumblResult;
use crate::score::{self, ScoreBreakdown};
use crate::util::DigitSet;

use serde::{Deserialize, Serialize};

use std::collections::HashSet;

/// The feedback assigned to one board cell by guess evaluation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Feedback {

    /// The guessed digit equals the solution digit at this position.
    Correct,

    /// The guessed digit is wrong here, but occurs elsewhere in the same row
    /// or column of the solution. The accompanying [ArrowDirection] tells
    /// which.
    Misplaced,

    /// The guessed digit cannot be reached from this position by moving it
    /// within its row or column, or does not occur in the solution at all.
    Wrong
}

/// The directional hint accompanying a [misplaced](Feedback::Misplaced) cell.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ArrowDirection {

    /// The digit occurs elsewhere in the same column of the solution.
    Down,

    /// The digit occurs elsewhere in the same row of the solution.
    Right
}

/// Identifies one line of the grid, that is, a row or a column. Generation
/// and evaluation treat both uniformly.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Line {

    /// The row with the contained index, in the range `[0, 4[`.
    Row(usize),

    /// The column with the contained index, in the range `[0, 4[`.
    Column(usize)
}

impl Line {

    /// Returns an iterator over the `(column, row)` coordinates of the four
    /// cells of this line, in left-to-right respectively top-to-bottom order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let line = *self;

        (0..GRID_SIZE).map(move |i| {
            match line {
                Line::Row(row) => (i, row),
                Line::Column(column) => (column, i)
            }
        })
    }
}

/// The counters accumulated over one play session. All counters grow
/// monotonically until the game is [reset](Game::reset). The elapsed time is
/// measured by the embedding shell, which owns the timer, and recorded via
/// [Game::set_time].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameStats {

    /// The number of lines submitted for evaluation, including lines that
    /// were skipped for containing duplicates.
    pub total_guesses: usize,

    /// The number of evaluated cells that were correct or misplaced. Cells
    /// shared by a simultaneously evaluated row and column count once per
    /// line.
    pub correct_guesses: usize,

    /// The number of evaluated cells that were wrong.
    pub wrong_guesses: usize,

    /// The number of rows that transitioned to fully correct for the first
    /// time.
    pub first_time_correct_rows: usize,

    /// The number of columns that transitioned to fully correct for the
    /// first time.
    pub first_time_correct_cols: usize,

    /// The number of cells that flipped to correct inside a line that did
    /// not itself transition to fully correct, so that line and cell bonuses
    /// never double-credit.
    pub first_time_correct_cells: usize,

    /// The elapsed session time in seconds, as recorded by the caller.
    pub time_in_seconds: u64
}

/// Evaluates one line of the given board against the solution. Returns the
/// feedback and optional arrow hint for each of the line's four cells, in
/// line order.
///
/// The line must be completely filled and must not contain a digit twice.
/// If either condition is violated, `None` is returned and nothing is
/// scored. This is the expected behavior for ordinary player states, not an
/// error.
///
/// Cells are classified in priority order. An exact match is
/// [correct](Feedback::Correct). Otherwise, if the digit occurs anywhere in
/// the solution, the line's own axis is checked first: for a row guess, a
/// digit found elsewhere in the same solution row is
/// [misplaced](Feedback::Misplaced) with a [right](ArrowDirection::Right)
/// arrow, then the same solution column yields a
/// [down](ArrowDirection::Down) arrow; column guesses mirror this order. A
/// digit in the solution but in neither line, or absent from the solution
/// altogether, is [wrong](Feedback::Wrong).
pub fn evaluate_line(solution: &NumblGrid, board: &NumblGrid, line: Line)
        -> Option<Vec<(Feedback, Option<ArrowDirection>)>> {
    let mut values = Vec::with_capacity(GRID_SIZE);
    let mut seen = DigitSet::new();

    for (column, row) in line.cells() {
        let value = board.get_cell(column, row).ok()??;

        if !seen.insert(value).ok()? {
            return None;
        }

        values.push(value);
    }

    let mut result = Vec::with_capacity(GRID_SIZE);

    for ((column, row), value) in line.cells().zip(values) {
        let entry = if solution.has_number(column, row, value).unwrap() {
            (Feedback::Correct, None)
        }
        else if solution.contains_number(value) {
            let in_row = solution.row_contains(row, value).unwrap();
            let in_column = solution.column_contains(column, value).unwrap();

            match line {
                Line::Row(_) if in_row =>
                    (Feedback::Misplaced, Some(ArrowDirection::Right)),
                Line::Column(_) if in_column =>
                    (Feedback::Misplaced, Some(ArrowDirection::Down)),
                Line::Row(_) if in_column =>
                    (Feedback::Misplaced, Some(ArrowDirection::Down)),
                Line::Column(_) if in_row =>
                    (Feedback::Misplaced, Some(ArrowDirection::Right)),
                _ => (Feedback::Wrong, None)
            }
        }
        else {
            (Feedback::Wrong, None)
        };

        result.push(entry);
    }

    Some(result)
}

fn line_all_correct(feedback: &[Option<Feedback>], line: Line) -> bool {
    line.cells()
        .all(|(column, row)|
            feedback[index(column, row)] == Some(Feedback::Correct))
}

/// The mutable state of one play session over a fixed [Puzzle]: the player's
/// board, the feedback and arrow grids, the session statistics, and the sets
/// of already guessed lines.
///
/// The board starts as a copy of the puzzle's starting board. Givens and
/// cells that were already guessed correctly cannot be edited; editing any
/// other cell resets its feedback and makes its row and column eligible for
/// guessing again.
///
/// A game is a plain value with no interior mutability. It is driven
/// exclusively by the caller from a single thread.
#[derive(Clone, Debug)]
pub struct Game {
    puzzle: Puzzle,
    board: NumblGrid,
    feedback: Vec<Option<Feedback>>,
    arrows: Vec<Option<ArrowDirection>>,
    stats: GameStats,
    guessed_rows: HashSet<usize>,
    guessed_cols: HashSet<usize>
}

impl Game {

    /// Creates a new game over the given puzzle. The board starts as a copy
    /// of the puzzle's starting board and all counters at zero.
    pub fn new(puzzle: Puzzle) -> Game {
        let board = puzzle.starting_board().clone();

        Game {
            puzzle,
            board,
            feedback: vec![None; GRID_SIZE * GRID_SIZE],
            arrows: vec![None; GRID_SIZE * GRID_SIZE],
            stats: GameStats::default(),
            guessed_rows: HashSet::new(),
            guessed_cols: HashSet::new()
        }
    }

    /// Gets a reference to the puzzle this game is played over.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Gets a reference to the player's current board.
    pub fn board(&self) -> &NumblGrid {
        &self.board
    }

    /// Gets the statistics accumulated in this session so far.
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Gets the indices of the rows that have been submitted for evaluation
    /// at least once and not been edited since.
    pub fn guessed_rows(&self) -> &HashSet<usize> {
        &self.guessed_rows
    }

    /// Gets the indices of the columns that have been submitted for
    /// evaluation at least once and not been edited since.
    pub fn guessed_cols(&self) -> &HashSet<usize> {
        &self.guessed_cols
    }

    /// Gets the feedback currently assigned to the cell at the specified
    /// position, or `None` if it has not been evaluated since its last edit.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` is 4 or greater. In that case,
    /// `NumblError::OutOfBounds` is returned.
    pub fn feedback(&self, column: usize, row: usize)
            -> NumblResult<Option<Feedback>> {
        // get_cell performs the bounds check
        self.board.get_cell(column, row)?;
        Ok(self.feedback[index(column, row)])
    }

    /// Gets the arrow hint currently assigned to the cell at the specified
    /// position, if any. Only [misplaced](Feedback::Misplaced) cells carry
    /// arrows.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` is 4 or greater. In that case,
    /// `NumblError::OutOfBounds` is returned.
    pub fn arrow(&self, column: usize, row: usize)
            -> NumblResult<Option<ArrowDirection>> {
        self.board.get_cell(column, row)?;
        Ok(self.arrows[index(column, row)])
    }

    /// Indicates whether the cell at the specified position is a given, that
    /// is, was pre-filled on the starting board and cannot be edited.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` is 4 or greater. In that case,
    /// `NumblError::OutOfBounds` is returned.
    pub fn is_given(&self, column: usize, row: usize) -> NumblResult<bool> {
        Ok(self.puzzle.starting_board().get_cell(column, row)?.is_some())
    }

    fn reset_cell_state(&mut self, column: usize, row: usize) {
        let index = index(column, row);
        self.feedback[index] = None;
        self.arrows[index] = None;
        self.guessed_rows.remove(&row);
        self.guessed_cols.remove(&column);
    }

    /// Sets the content of the cell at the specified position to the given
    /// number. Givens and cells whose current feedback is
    /// [correct](Feedback::Correct) are locked; editing them is silently
    /// refused. Editing any other cell resets its feedback and arrow and
    /// removes its row and column from the guessed sets, making them
    /// eligible for evaluation again.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be
    /// in the range `[0, 4[`.
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 4[`.
    /// * `number`: The number to assign to the specified cell. Must be in
    /// the range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `NumblError::OutOfBounds` If either `column` or `row` are not in
    /// the specified range.
    /// * `NumblError::InvalidNumber` If `number` is not in the specified
    /// range and the cell is editable.
    pub fn set_cell(&mut self, column: usize, row: usize, number: usize)
            -> NumblResult<()> {
        if self.is_given(column, row)? ||
                self.feedback(column, row)? == Some(Feedback::Correct) {
            return Ok(());
        }

        self.board.set_cell(column, row, number)?;
        self.reset_cell_state(column, row);
        Ok(())
    }

    /// Clears the content of the cell at the specified position. Like
    /// [Game::set_cell], this is silently refused for givens and correctly
    /// guessed cells, and otherwise resets the cell's feedback and its
    /// line's guessed status.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` is 4 or greater. In that case,
    /// `NumblError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, column: usize, row: usize)
            -> NumblResult<()> {
        if self.is_given(column, row)? ||
                self.feedback(column, row)? == Some(Feedback::Correct) {
            return Ok(());
        }

        self.board.clear_cell(column, row)?;
        self.reset_cell_state(column, row);
        Ok(())
    }

    /// Records the elapsed session time in seconds. The timer itself is
    /// owned by the embedding shell; the engine only consumes the value for
    /// the time bonus.
    pub fn set_time(&mut self, seconds: u64) {
        self.stats.time_in_seconds = seconds;
    }

    /// Computes the `(column, row)` coordinates of all cells that share
    /// their digit with another cell of the same row or column, in row-major
    /// order. The result is recomputed from the current board on every call,
    /// never cached.
    pub fn duplicate_cells(&self) -> Vec<(usize, usize)> {
        let mut result = Vec::new();

        for row in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                let value =
                    match self.board.get_cell(column, row).unwrap() {
                        Some(value) => value,
                        None => continue
                    };
                let row_duplicate = (0..GRID_SIZE)
                    .any(|c| c != column &&
                        self.board.get_cell(c, row).unwrap() == Some(value));
                let col_duplicate = (0..GRID_SIZE)
                    .any(|r| r != row &&
                        self.board.get_cell(column, r).unwrap() ==
                            Some(value));

                if row_duplicate || col_duplicate {
                    result.push((column, row));
                }
            }
        }

        result
    }

    fn line_complete(&self, line: Line) -> bool {
        line.cells()
            .all(|(column, row)|
                self.board.get_cell(column, row).unwrap().is_some())
    }

    /// Computes the lines currently eligible for evaluation: lines whose
    /// four cells are all filled, which are not fully correct already, and
    /// which have not been guessed since their last edit. Rows are listed
    /// before columns, each in index order.
    ///
    /// Note that a complete line containing duplicates is still offered
    /// here, since the duplicate state is presented to the player for
    /// fixing; [Game::submit_guess] skips it without scoring.
    pub fn eligible_lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();

        for row in 0..GRID_SIZE {
            let line = Line::Row(row);

            if self.line_complete(line) &&
                    !line_all_correct(&self.feedback, line) &&
                    !self.guessed_rows.contains(&row) {
                lines.push(line);
            }
        }

        for column in 0..GRID_SIZE {
            let line = Line::Column(column);

            if self.line_complete(line) &&
                    !line_all_correct(&self.feedback, line) &&
                    !self.guessed_cols.contains(&column) {
                lines.push(line);
            }
        }

        lines
    }

    /// Submits all currently [eligible](Game::eligible_lines) lines for
    /// evaluation and merges the results into the feedback and arrow grids.
    /// Returns the submitted lines.
    ///
    /// Every submitted line counts towards the total guesses and joins the
    /// guessed sets, even if it was skipped for containing duplicates.
    /// Correct and misplaced cells count as correct guesses, wrong cells as
    /// wrong guesses, once per evaluated line. A line transitioning to fully
    /// correct increments the first-time-correct row or column counter;
    /// cells flipping to correct inside lines that did not so transition
    /// increment the first-time-correct cell counter instead.
    pub fn submit_guess(&mut self) -> Vec<Line> {
        let pending = self.eligible_lines();

        if pending.is_empty() {
            return pending;
        }

        let previous_feedback = self.feedback.clone();
        let mut correct_guesses = 0;
        let mut wrong_guesses = 0;

        for &line in &pending {
            let result =
                match evaluate_line(self.puzzle.solution(), &self.board,
                        line) {
                    Some(result) => result,
                    None => continue
                };

            for ((column, row), (feedback, arrow)) in
                    line.cells().zip(result) {
                let index = index(column, row);
                self.feedback[index] = Some(feedback);
                self.arrows[index] = arrow;

                match feedback {
                    Feedback::Wrong => wrong_guesses += 1,
                    _ => correct_guesses += 1
                }
            }
        }

        for &line in &pending {
            let transitioned = line_all_correct(&self.feedback, line) &&
                !line_all_correct(&previous_feedback, line);

            if transitioned {
                match line {
                    Line::Row(_) => self.stats.first_time_correct_rows += 1,
                    Line::Column(_) =>
                        self.stats.first_time_correct_cols += 1
                }
                continue;
            }

            for (column, row) in line.cells() {
                let index = index(column, row);

                if self.feedback[index] == Some(Feedback::Correct) &&
                        previous_feedback[index] != Some(Feedback::Correct) {
                    self.stats.first_time_correct_cells += 1;
                }
            }
        }

        self.stats.total_guesses += pending.len();
        self.stats.correct_guesses += correct_guesses;
        self.stats.wrong_guesses += wrong_guesses;

        for &line in &pending {
            match line {
                Line::Row(row) => self.guessed_rows.insert(row),
                Line::Column(column) => self.guessed_cols.insert(column)
            };
        }

        pending
    }

    /// Indicates whether the puzzle is completely solved, that is, every
    /// cell's feedback is [correct](Feedback::Correct).
    pub fn is_complete(&self) -> bool {
        self.feedback.iter().all(|f| f == &Some(Feedback::Correct))
    }

    /// Resets this game to its initial state: the board back to the starting
    /// board, all feedback, arrows, statistics, and guessed sets cleared.
    pub fn reset(&mut self) {
        self.board = self.puzzle.starting_board().clone();
        self.feedback = vec![None; GRID_SIZE * GRID_SIZE];
        self.arrows = vec![None; GRID_SIZE * GRID_SIZE];
        self.stats = GameStats::default();
        self.guessed_rows.clear();
        self.guessed_cols.clear();
    }

    /// Computes the running score of this session, which consists of the
    /// base score and the first-time-correct line bonuses only. Used to
    /// drive a live score display while the game is still in progress.
    pub fn running_score(&self) -> usize {
        score::running_score(&self.puzzle, &self.feedback, &self.stats,
            &self.guessed_rows, &self.guessed_cols)
    }

    /// Computes the full score breakdown of this session. Bonuses that are
    /// only meaningful at completion (time, perfect accuracy, efficiency)
    /// are gated on the puzzle being solved where applicable; see the
    /// [score](crate::score) module.
    pub fn score(&self) -> ScoreBreakdown {
        score::compute_score(&self.puzzle, &self.feedback, &self.stats,
            &self.guessed_rows, &self.guessed_cols)
    }

    pub(crate) fn feedback_grid(&self) -> &[Option<Feedback>] {
        &self.feedback
    }
}
