//! This module contains logic for generating numbl puzzles.
//!
//! Generation is fully deterministic in the puzzle date: a [Generator]
//! derives a [SeededRng] from its date and uses it for every random decision,
//! so two generators for the same date produce identical puzzles. This is how
//! the daily puzzle is shared between all players without a server.
//!
//! A puzzle is produced in three steps. First the solution grid is
//! synthesized by shuffling the digits 1 to 9 and cycling them through the 16
//! cells. Then every row and column receives a constraint via
//! [select_constraint], carrying the set of already used constraint kinds
//! across all eight lines to keep them diverse. Finally a strategic subset of
//! cells is revealed as givens, preferring positions that anchor the harder
//! constraint types.

use crate::{GRID_SIZE, MAX_DIGIT, NumblGrid, Puzzle};
use crate::constraint::{Constraint, ConstraintKind, select_constraint};
use crate::error::NumblParseResult;
use crate::rng::{SeededRng, epoch};

use chrono::{Duration, Local, NaiveDate};

use rand::Rng;

use std::collections::HashSet;

/// The number of cells revealed as givens on the starting board. Fewer are
/// revealed only when too few positions survive the exclusion of
/// contains-constrained lines.
pub const GIVENS_TARGET: usize = 4;

/// The number of days around the [epoch](crate::rng::SeededRng) within which
/// [Generator::new_random] picks its date.
const RANDOM_DATE_SPREAD_DAYS: i64 = 3650;

/// A generator deterministically produces the [Puzzle] for one calendar date.
/// All randomness is drawn from a [SeededRng] derived from that date, which
/// is re-seeded on every call to [Generator::generate], so repeated calls
/// yield identical puzzles.
///
/// ```
/// use chrono::NaiveDate;
/// use numbl::generator::Generator;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let mut generator = Generator::new(date);
///
/// assert_eq!(generator.generate(), generator.generate());
/// ```
pub struct Generator {
    date: NaiveDate,
    rng: SeededRng
}

fn synthesize_grid(rng: &mut SeededRng) -> NumblGrid {
    let digits = rng.shuffle(1..=MAX_DIGIT);
    let mut grid = NumblGrid::new();

    for row in 0..GRID_SIZE {
        for column in 0..GRID_SIZE {
            let digit = digits[(row * GRID_SIZE + column) % MAX_DIGIT];
            grid.set_cell(column, row, digit).unwrap();
        }
    }

    grid
}

fn row_values(grid: &NumblGrid, row: usize) -> Vec<usize> {
    (0..GRID_SIZE)
        .map(|column| grid.get_cell(column, row).unwrap().unwrap())
        .collect()
}

fn column_values(grid: &NumblGrid, column: usize) -> Vec<usize> {
    (0..GRID_SIZE)
        .map(|row| grid.get_cell(column, row).unwrap().unwrap())
        .collect()
}

fn is_corner(column: usize, row: usize) -> bool {
    (row == 0 || row == GRID_SIZE - 1) &&
        (column == 0 || column == GRID_SIZE - 1)
}

fn givens_priority(row_constraint: &Constraint, col_constraint: &Constraint,
        column: usize, row: usize) -> usize {
    let mut priority = 0;

    // Range and parity constraints leave the most options open, so revealing
    // a digit in their lines helps the most.
    if row_constraint.kind() == ConstraintKind::Range ||
            col_constraint.kind() == ConstraintKind::Range {
        priority += 2;
    }

    let parity_kinds = [ConstraintKind::Even, ConstraintKind::Odd];

    if parity_kinds.contains(&row_constraint.kind()) ||
            parity_kinds.contains(&col_constraint.kind()) {
        priority += 1;
    }

    // Corners anchor a row and a column simultaneously.
    if is_corner(column, row) {
        priority += 2;
    }

    priority
}

fn choose_givens(solution: &NumblGrid, row_constraints: &[Constraint],
        col_constraints: &[Constraint]) -> NumblGrid {
    let mut positions = Vec::new();

    for row in 0..GRID_SIZE {
        for column in 0..GRID_SIZE {
            let row_constraint = &row_constraints[row];
            let col_constraint = &col_constraints[column];

            // Revealing a cell of a contains-constrained line would leak part
            // of the required membership.
            if row_constraint.kind() == ConstraintKind::Contains ||
                    col_constraint.kind() == ConstraintKind::Contains {
                continue;
            }

            let priority =
                givens_priority(row_constraint, col_constraint, column, row);
            positions.push((column, row, priority));
        }
    }

    // The sort is stable, so ties keep their row-major enumeration order.
    positions.sort_by(|a, b| b.2.cmp(&a.2));

    let mut starting_board = NumblGrid::new();

    for &(column, row, _) in positions.iter().take(GIVENS_TARGET) {
        let digit = solution.get_cell(column, row).unwrap().unwrap();
        starting_board.set_cell(column, row, digit).unwrap();
    }

    starting_board
}

impl Generator {

    /// Creates a new generator for the given date.
    pub fn new(date: NaiveDate) -> Generator {
        Generator {
            date,
            rng: SeededRng::from_date(date)
        }
    }

    /// Creates a new generator for the current local date, that is, for
    /// today's puzzle.
    pub fn today() -> Generator {
        Generator::new(Local::now().date_naive())
    }

    /// Creates a new generator for a random date within ten years around the
    /// epoch, drawn from the given random number generator. This yields an
    /// ad-hoc practice puzzle that is unrelated to the daily one. Generation
    /// itself remains deterministic in the picked date.
    ///
    /// # Arguments
    ///
    /// * `rng`: The random number generator used to pick the date. Unlike the
    /// date-seeded generation, this may be a genuinely nondeterministic
    /// source such as [rand::thread_rng].
    pub fn new_random(rng: &mut impl Rng) -> Generator {
        let offset =
            rng.gen_range(-RANDOM_DATE_SPREAD_DAYS..=RANDOM_DATE_SPREAD_DAYS);
        Generator::new(epoch() + Duration::days(offset))
    }

    /// Gets the date this generator produces the puzzle for.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Generates the puzzle for this generator's date. The internal random
    /// number generator is re-seeded from the date first, so every call
    /// returns an identical puzzle.
    pub fn generate(&mut self) -> Puzzle {
        self.rng = SeededRng::from_date(self.date);

        let solution = synthesize_grid(&mut self.rng);
        let mut row_constraints = Vec::with_capacity(GRID_SIZE);
        let mut col_constraints = Vec::with_capacity(GRID_SIZE);
        let mut used_kinds = HashSet::new();

        // Rows and columns are processed interleaved, so the diversity
        // preference spreads the kinds over both axes.
        for i in 0..GRID_SIZE {
            let row_constraint = select_constraint(&row_values(&solution, i),
                &used_kinds, &mut self.rng);
            used_kinds.insert(row_constraint.kind());
            row_constraints.push(row_constraint);

            let col_constraint =
                select_constraint(&column_values(&solution, i), &used_kinds,
                    &mut self.rng);
            used_kinds.insert(col_constraint.kind());
            col_constraints.push(col_constraint);
        }

        let starting_board =
            choose_givens(&solution, &row_constraints, &col_constraints);
        let date = self.date.format("%Y-%m-%d").to_string();

        // Generation upholds all puzzle invariants, so this cannot fail.
        Puzzle::new(solution, starting_board, row_constraints,
            col_constraints, date).unwrap()
    }
}

/// Generates the daily puzzle for the given date string in `YYYY-MM-DD`
/// format. Equal date strings always yield equal puzzles.
///
/// # Errors
///
/// If the date string does not conform to the format or does not name a real
/// calendar date. In that case, `NumblParseError::InvalidDate` is returned.
pub fn generate_daily(date: &str) -> NumblParseResult<Puzzle> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
    Ok(Generator::new(date).generate())
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::error::NumblParseError;

    use rand::SeedableRng;

    use rand_chacha::ChaCha8Rng;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn generation_is_deterministic() {
        let mut a = Generator::new(date(2025, 3, 14));
        let mut b = Generator::new(date(2025, 3, 14));

        assert_eq!(a.generate(), b.generate());
    }

    #[test]
    fn repeated_generation_yields_identical_puzzles() {
        let mut generator = Generator::new(date(2025, 3, 14));

        assert_eq!(generator.generate(), generator.generate());
    }

    #[test]
    fn different_dates_yield_different_puzzles() {
        let mut a = Generator::new(date(2025, 3, 14));
        let mut b = Generator::new(date(2025, 3, 15));

        assert_ne!(a.generate(), b.generate());
    }

    #[test]
    fn generate_daily_matches_generator() {
        let daily = generate_daily("2025-03-14").unwrap();
        let generated = Generator::new(date(2025, 3, 14)).generate();

        assert_eq!(generated, daily);
        assert_eq!("2025-03-14", daily.date());
    }

    #[test]
    fn generate_daily_rejects_malformed_dates() {
        assert_eq!(Err(NumblParseError::InvalidDate),
            generate_daily("14.03.2025"));
        assert_eq!(Err(NumblParseError::InvalidDate),
            generate_daily("2025-02-30"));
        assert_eq!(Err(NumblParseError::InvalidDate),
            generate_daily("whenever"));
    }

    #[test]
    fn solution_lines_have_no_duplicates() {
        // Cycling 9 shuffled digits through 16 cells never repeats a digit
        // within a row or column, which guess evaluation relies on.
        let puzzle = Generator::new(date(2025, 3, 14)).generate();

        for i in 0..GRID_SIZE {
            let mut row = row_values(puzzle.solution(), i);
            let mut column = column_values(puzzle.solution(), i);
            row.sort_unstable();
            row.dedup();
            column.sort_unstable();
            column.dedup();

            assert_eq!(GRID_SIZE, row.len());
            assert_eq!(GRID_SIZE, column.len());
        }
    }

    fn eligible_positions(puzzle: &Puzzle) -> usize {
        let mut eligible = 0;

        for row in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                let row_kind = puzzle.row_constraints()[row].kind();
                let col_kind = puzzle.col_constraints()[column].kind();

                if row_kind != ConstraintKind::Contains &&
                        col_kind != ConstraintKind::Contains {
                    eligible += 1;
                }
            }
        }

        eligible
    }

    #[test]
    fn givens_respect_target_and_eligibility() {
        for day in 1..=28 {
            let puzzle = Generator::new(date(2025, 6, day)).generate();
            let expected =
                GIVENS_TARGET.min(eligible_positions(&puzzle));

            assert_eq!(expected, puzzle.pre_filled_count(),
                "wrong number of givens for 2025-06-{:02}", day);
        }
    }

    #[test]
    fn givens_avoid_contains_lines() {
        for day in 1..=28 {
            let puzzle = Generator::new(date(2025, 7, day)).generate();

            for row in 0..GRID_SIZE {
                for column in 0..GRID_SIZE {
                    let given = puzzle.starting_board()
                        .get_cell(column, row).unwrap();

                    if given.is_none() {
                        continue;
                    }

                    let row_kind = puzzle.row_constraints()[row].kind();
                    let col_kind = puzzle.col_constraints()[column].kind();

                    assert_ne!(ConstraintKind::Contains, row_kind);
                    assert_ne!(ConstraintKind::Contains, col_kind);
                }
            }
        }
    }

    #[test]
    fn new_random_is_seed_deterministic() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        let puzzle_a = Generator::new_random(&mut rng_a).generate();
        let puzzle_b = Generator::new_random(&mut rng_b).generate();

        assert_eq!(puzzle_a, puzzle_b);
    }

    #[test]
    fn new_random_produces_valid_puzzles() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..10 {
            let puzzle = Generator::new_random(&mut rng).generate();

            assert!(puzzle.solution().is_full());
            assert!(puzzle.starting_board().is_subset(puzzle.solution()));
        }
    }

    #[test]
    fn today_uses_the_local_date() {
        let generator = Generator::today();

        assert_eq!(Local::now().date_naive(), generator.date());
    }
}
