// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]

//! This crate implements the engine behind numbl, a daily number-placement
//! puzzle. A 4x4 grid has to be filled with the digits 1 to 9 such that every
//! row and every column satisfies its assigned constraint. It supports the
//! following key features:
//!
//! * Parsing and printing numbl grids
//! * Deterministic, date-seeded puzzle generation, so that all players
//! receive the same puzzle on the same day without any server involvement
//! * Evaluation of row and column guesses against the hidden solution with
//! correct/misplaced/wrong feedback and directional hints
//! * Multi-component scoring with time decay, first-time-correctness bonuses,
//! and a difficulty multiplier
//!
//! The visual shell (grid rendering, keyboard, modals, persistence of
//! settings) is not part of this crate. It consumes the puzzle, feedback, and
//! score values produced here through ordinary function calls.
//!
//! # Parsing and printing grids
//!
//! See [NumblGrid::parse] for the exact format of a grid code.
//!
//! Codes can be used to exchange grids, while pretty prints can be used to
//! display a grid in a clearer manner. An example of how to parse and display
//! a grid is provided below.
//!
//! ```
//! use numbl::NumblGrid;
//!
//! let grid = NumblGrid::parse("2, ,3, , ,1, , ,1, , ,4, ,2, ,3").unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Generating the daily puzzle
//!
//! [generate_daily](generator::generate_daily) derives every random decision
//! from the requested date, so equal dates always yield equal puzzles.
//!
//! ```
//! use numbl::generator::generate_daily;
//!
//! let first = generate_daily("2025-03-14").unwrap();
//! let second = generate_daily("2025-03-14").unwrap();
//!
//! assert_eq!(first, second);
//! ```
//!
//! # Playing a game
//!
//! A [Game](game::Game) owns one [Puzzle] together with the player's board,
//! the feedback grid, and the session statistics. Cells are edited one at a
//! time and completed rows or columns are scored by
//! [Game::submit_guess](game::Game::submit_guess).
//!
//! ```
//! use numbl::game::Game;
//! use numbl::generator::generate_daily;
//!
//! let puzzle = generate_daily("2025-03-14").unwrap();
//! let mut game = Game::new(puzzle);
//!
//! // Copy the solution into the board, then submit all completed lines.
//! for row in 0..4 {
//!     for column in 0..4 {
//!         let number = game.puzzle().solution()
//!             .get_cell(column, row).unwrap().unwrap();
//!         game.set_cell(column, row, number).unwrap();
//!     }
//! }
//!
//! game.submit_guess();
//!
//! assert!(game.is_complete());
//! assert!(game.score().total_score > 0);
//! ```

pub mod constraint;
pub mod error;
pub mod game;
pub mod generator;
pub mod rng;
pub mod score;
pub mod util;

#[cfg(test)]
mod fix_tests;

use constraint::Constraint;
use error::{NumblError, NumblParseError, NumblParseResult, NumblResult};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// The number of rows and columns of a numbl grid.
pub const GRID_SIZE: usize = 4;

/// The greatest digit that may be placed in a numbl grid. The least one is 1.
pub const MAX_DIGIT: usize = 9;

/// A numbl grid is a square of 4x4 cells, each of which may or may not be
/// occupied by a digit from 1 to 9. Unlike in Sudoku, the same digit may occur
/// multiple times in the grid, since only 9 digits are available for 16 cells.
///
/// `NumblGrid` is used both for the completely filled solution of a puzzle
/// and for partially filled boards, such as the givens revealed at the start
/// of a game or the player's current input.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NumblGrid {
    cells: Vec<Option<usize>>
}

fn to_char(cell: Option<usize>) -> char {
    if let Some(n) = cell {
        (b'0' + n as u8) as char
    }
    else {
        ' '
    }
}

fn line(start: char, sep: char, segment: impl Fn(usize) -> char, pad: char,
        end: char, newline: bool) -> String {
    let mut result = String::new();

    for x in 0..GRID_SIZE {
        if x == 0 {
            result.push(start);
        }
        else {
            result.push(sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╤', |_| '═', '═', '╗', true)
}

fn separator_line() -> String {
    line('╟', '┼', |_| '─', '─', '╢', true)
}

fn bottom_row() -> String {
    line('╚', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &NumblGrid, y: usize) -> String {
    line('║', '│', |x| to_char(grid.get_cell(x, y).unwrap()), ' ', '║', true)
}

impl Display for NumblGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let separator_line = separator_line();

        for y in 0..GRID_SIZE {
            if y == 0 {
                f.write_str(top_row().as_str())?;
            }
            else {
                f.write_str(separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row().as_str())?;
        Ok(())
    }
}

fn to_string(cell: &Option<usize>) -> String {
    if let Some(number) = cell {
        number.to_string()
    }
    else {
        String::from("")
    }
}

pub(crate) fn index(column: usize, row: usize) -> usize {
    row * GRID_SIZE + column
}

impl NumblGrid {

    /// Creates a new, empty numbl grid, where every cell is unoccupied.
    pub fn new() -> NumblGrid {
        NumblGrid {
            cells: vec![None; GRID_SIZE * GRID_SIZE]
        }
    }

    /// Parses a code encoding a numbl grid. The code is a comma-separated
    /// list of 16 entries, which are either empty or a digit from 1 to 9. The
    /// entries are assigned left-to-right, top-to-bottom, where each row is
    /// completed before the next one is started. Whitespace in the entries is
    /// ignored to allow for more intuitive formatting.
    ///
    /// As an example, the code `1, ,2, , ,3, ,4, , , ,3, ,1, ,2` will parse
    /// to the following grid:
    ///
    /// ```text
    /// ╔═══╤═══╤═══╤═══╗
    /// ║ 1 │   │ 2 │   ║
    /// ╟───┼───┼───┼───╢
    /// ║   │ 3 │   │ 4 ║
    /// ╟───┼───┼───┼───╢
    /// ║   │   │   │ 3 ║
    /// ╟───┼───┼───┼───╢
    /// ║   │ 1 │   │ 2 ║
    /// ╚═══╧═══╧═══╧═══╝
    /// ```
    ///
    /// # Errors
    ///
    /// Any specialization of `NumblParseError` (see that documentation).
    pub fn parse(code: &str) -> NumblParseResult<NumblGrid> {
        let entries: Vec<&str> = code.split(',').collect();

        if entries.len() != GRID_SIZE * GRID_SIZE {
            return Err(NumblParseError::WrongNumberOfCells);
        }

        let mut grid = NumblGrid::new();

        for (i, entry) in entries.iter().enumerate() {
            let entry = entry.trim();

            if entry.is_empty() {
                continue;
            }

            let number = entry.parse::<usize>()?;

            if number == 0 || number > MAX_DIGIT {
                return Err(NumblParseError::InvalidNumber);
            }

            grid.cells[i] = Some(number);
        }

        Ok(grid)
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [NumblGrid::parse]. That is, a grid that is converted to a string and
    /// parsed again will not change, as is illustrated below.
    ///
    /// ```
    /// use numbl::NumblGrid;
    ///
    /// let mut grid = NumblGrid::new();
    ///
    /// // Just some arbitrary changes to create some content.
    /// grid.set_cell(1, 1, 4).unwrap();
    /// grid.set_cell(1, 2, 5).unwrap();
    ///
    /// let grid_str = grid.to_parseable_string();
    /// let grid_parsed = NumblGrid::parse(grid_str.as_str()).unwrap();
    /// assert_eq!(grid, grid_parsed);
    /// ```
    pub fn to_parseable_string(&self) -> String {
        self.cells.iter()
            .map(to_string)
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Gets the content of the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, 4[`.
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, 4[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `NumblError::OutOfBounds` is returned.
    pub fn get_cell(&self, column: usize, row: usize)
            -> NumblResult<Option<usize>> {
        if column >= GRID_SIZE || row >= GRID_SIZE {
            Err(NumblError::OutOfBounds)
        }
        else {
            Ok(self.cells[index(column, row)])
        }
    }

    /// Indicates whether the cell at the specified position has the given
    /// number. This will return `false` if there is a different number in
    /// that cell or it is empty.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the checked cell. Must be in
    /// the range `[0, 4[`.
    /// * `row`: The row (y-coordinate) of the checked cell. Must be in the
    /// range `[0, 4[`.
    /// * `number`: The number to check whether it is in the specified cell.
    /// If it is *not* in the range `[1, 9]`, `false` will always be returned.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `NumblError::OutOfBounds` is returned.
    pub fn has_number(&self, column: usize, row: usize, number: usize)
            -> NumblResult<bool> {
        if let Some(content) = self.get_cell(column, row)? {
            Ok(number == content)
        }
        else {
            Ok(false)
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// number. If the cell was not empty, the old number will be overwritten.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be in
    /// the range `[0, 4[`.
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 4[`.
    /// * `number`: The number to assign to the specified cell. Must be in the
    /// range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `NumblError::OutOfBounds` If either `column` or `row` are not in the
    /// specified range.
    /// * `NumblError::InvalidNumber` If `number` is not in the specified
    /// range.
    pub fn set_cell(&mut self, column: usize, row: usize, number: usize)
            -> NumblResult<()> {
        if column >= GRID_SIZE || row >= GRID_SIZE {
            return Err(NumblError::OutOfBounds);
        }

        if number == 0 || number > MAX_DIGIT {
            return Err(NumblError::InvalidNumber);
        }

        self.cells[index(column, row)] = Some(number);
        Ok(())
    }

    /// Clears the content of the cell at the specified position, that is, if
    /// it contains a number, that number is removed. If the cell is already
    /// empty, it will be left that way.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the cleared cell. Must be in
    /// the range `[0, 4[`.
    /// * `row`: The row (y-coordinate) of the cleared cell. Must be in the
    /// range `[0, 4[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `NumblError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, column: usize, row: usize)
            -> NumblResult<()> {
        if column >= GRID_SIZE || row >= GRID_SIZE {
            return Err(NumblError::OutOfBounds);
        }

        self.cells[index(column, row)] = None;
        Ok(())
    }

    /// Indicates whether the given number occurs anywhere in this grid.
    pub fn contains_number(&self, number: usize) -> bool {
        self.cells.iter().any(|c| c == &Some(number))
    }

    /// Indicates whether the given number occurs anywhere in the row with the
    /// given index.
    ///
    /// # Errors
    ///
    /// If `row` is 4 or greater. In that case, `NumblError::OutOfBounds` is
    /// returned.
    pub fn row_contains(&self, row: usize, number: usize)
            -> NumblResult<bool> {
        if row >= GRID_SIZE {
            return Err(NumblError::OutOfBounds);
        }

        Ok((0..GRID_SIZE)
            .any(|column| self.cells[index(column, row)] == Some(number)))
    }

    /// Indicates whether the given number occurs anywhere in the column with
    /// the given index.
    ///
    /// # Errors
    ///
    /// If `column` is 4 or greater. In that case, `NumblError::OutOfBounds`
    /// is returned.
    pub fn column_contains(&self, column: usize, number: usize)
            -> NumblResult<bool> {
        if column >= GRID_SIZE {
            return Err(NumblError::OutOfBounds);
        }

        Ok((0..GRID_SIZE)
            .any(|row| self.cells[index(column, row)] == Some(number)))
    }

    /// Counts the number of non-empty cells in this grid.
    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// number. In this case, [NumblGrid::count_filled] returns 16.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|c| c == &None)
    }

    /// Indicates whether this grid is empty, i.e. no cell is filled with a
    /// number. In this case, [NumblGrid::count_filled] returns 0.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c == &None)
    }

    /// Indicates whether this grid configuration is a subset of another one.
    /// That is, all cells filled in this grid with some number must be filled
    /// in `other` with the same number. If this condition is met, `true` is
    /// returned, and `false` otherwise.
    pub fn is_subset(&self, other: &NumblGrid) -> bool {
        self.cells.iter()
            .zip(other.cells.iter())
            .all(|(self_cell, other_cell)| {
                match self_cell {
                    Some(self_number) =>
                        match other_cell {
                            Some(other_number) => self_number == other_number,
                            None => false
                        },
                    None => true
                }
            })
    }

    /// Gets a reference to the vector which holds the cells. They are in
    /// left-to-right, top-to-bottom order, where rows are together.
    pub fn cells(&self) -> &Vec<Option<usize>> {
        &self.cells
    }
}

impl Default for NumblGrid {
    fn default() -> NumblGrid {
        NumblGrid::new()
    }
}

fn to_base_36(mut value: u32) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    if value == 0 {
        return String::from("0");
    }

    let mut result = Vec::new();

    while value > 0 {
        result.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }

    result.reverse();
    String::from_utf8(result).unwrap()
}

/// A complete numbl puzzle as produced by the
/// [Generator](crate::generator::Generator). It consists of the hidden
/// solution, the starting board containing the revealed givens, one
/// [Constraint] per row and per column, and the date it was generated for.
///
/// A puzzle is immutable after construction. All mutable state of a play
/// session lives in a [Game](crate::game::Game) instead.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Puzzle {
    solution: NumblGrid,
    starting_board: NumblGrid,
    row_constraints: Vec<Constraint>,
    col_constraints: Vec<Constraint>,
    date: String
}

impl Puzzle {

    /// Creates a new puzzle from its parts. The parts are validated, since a
    /// puzzle that violates the invariants below would silently produce wrong
    /// feedback and scores downstream.
    ///
    /// # Arguments
    ///
    /// * `solution`: The hidden solution. Must be completely filled.
    /// * `starting_board`: The pre-filled givens. Every filled cell must
    /// agree with the solution at the same position.
    /// * `row_constraints`: One constraint per row, top to bottom. Must have
    /// exactly 4 entries.
    /// * `col_constraints`: One constraint per column, left to right. Must
    /// have exactly 4 entries.
    /// * `date`: The date this puzzle was generated for, in `YYYY-MM-DD`
    /// format.
    ///
    /// # Errors
    ///
    /// If any of the conditions above is violated. In that case,
    /// `NumblError::InconsistentPuzzle` is returned.
    pub fn new(solution: NumblGrid, starting_board: NumblGrid,
            row_constraints: Vec<Constraint>, col_constraints: Vec<Constraint>,
            date: String) -> NumblResult<Puzzle> {
        if !solution.is_full() ||
                !starting_board.is_subset(&solution) ||
                row_constraints.len() != GRID_SIZE ||
                col_constraints.len() != GRID_SIZE {
            return Err(NumblError::InconsistentPuzzle);
        }

        Ok(Puzzle {
            solution,
            starting_board,
            row_constraints,
            col_constraints,
            date
        })
    }

    /// Gets a reference to the completely filled solution grid.
    pub fn solution(&self) -> &NumblGrid {
        &self.solution
    }

    /// Gets a reference to the starting board, which contains exactly the
    /// givens revealed at the beginning of a game.
    pub fn starting_board(&self) -> &NumblGrid {
        &self.starting_board
    }

    /// Gets the constraints assigned to the rows, top to bottom.
    pub fn row_constraints(&self) -> &[Constraint] {
        &self.row_constraints
    }

    /// Gets the constraints assigned to the columns, left to right.
    pub fn col_constraints(&self) -> &[Constraint] {
        &self.col_constraints
    }

    /// Gets the date this puzzle was generated for, in `YYYY-MM-DD` format.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Counts the givens of this puzzle, that is, the number of pre-filled
    /// cells on the starting board.
    pub fn pre_filled_count(&self) -> usize {
        self.starting_board.count_filled()
    }

    /// Computes a short code identifying this puzzle, suitable for sharing
    /// results. The solution digits and the constraint codes (see
    /// [Constraint::code]) are concatenated and folded into a 32-bit hash,
    /// which is rendered in upper-case base 36.
    ///
    /// The code does not depend on the date, so the same puzzle content
    /// always yields the same code.
    pub fn share_code(&self) -> String {
        let mut text = String::new();

        for cell in self.solution.cells() {
            text.push_str(to_string(cell).as_str());
        }

        text.push('|');

        for constraint in &self.row_constraints {
            text.push_str(constraint.code().as_str());
        }

        text.push('|');

        for constraint in &self.col_constraints {
            text.push_str(constraint.code().as_str());
        }

        let hash = rng::fold_string(&text);
        to_base_36(hash.unsigned_abs())
    }
}
