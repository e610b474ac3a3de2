//! This module contains some error and result definitions used in this crate.

use std::num::ParseIntError;

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html). This does not exclude errors that occur when
/// parsing grids or dates, see [NumblParseError](enum.NumblParseError.html)
/// for that.
#[derive(Debug, Eq, PartialEq)]
pub enum NumblError {

    /// Indicates that some digit is invalid for a grid cell. This is the case
    /// if it is less than 1 or greater than 9.
    InvalidNumber,

    /// Indicates that the specified coordinates (column and row) lie outside
    /// the 4x4 grid, that is, at least one of them is greater than or equal
    /// to 4.
    OutOfBounds,

    /// Indicates that the parts handed to [Puzzle::new](crate::Puzzle::new)
    /// do not form a consistent puzzle. This is the case if the solution is
    /// not completely filled, a given disagrees with the solution at its
    /// position, or the number of row or column constraints is not 4.
    InconsistentPuzzle
}

/// Syntactic sugar for `Result<V, NumblError>`.
pub type NumblResult<V> = Result<V, NumblError>;

/// An enumeration of the errors that may occur when parsing a grid code or a
/// puzzle date.
#[derive(Debug, Eq, PartialEq)]
pub enum NumblParseError {

    /// Indicates that the number of cells in a grid code (which are separated
    /// by commas) is not 16.
    WrongNumberOfCells,

    /// Indicates that one of the cell entries could not be parsed as a
    /// number.
    NumberFormatError,

    /// Indicates that a cell is filled with an invalid digit (0 or more
    /// than 9).
    InvalidNumber,

    /// Indicates that a date string does not conform to the `YYYY-MM-DD`
    /// format or does not name a real calendar date.
    InvalidDate
}

/// Syntactic sugar for `Result<V, NumblParseError>`.
pub type NumblParseResult<V> = Result<V, NumblParseError>;

impl From<ParseIntError> for NumblParseError {
    fn from(_: ParseIntError) -> Self {
        NumblParseError::NumberFormatError
    }
}

impl From<chrono::ParseError> for NumblParseError {
    fn from(_: chrono::ParseError) -> Self {
        NumblParseError::InvalidDate
    }
}
