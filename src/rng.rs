//! This module contains the deterministic random number generator that drives
//! puzzle generation.
//!
//! Daily puzzles must be reproducible without a server: every player who
//! requests the puzzle for a given date has to obtain exactly the same grid,
//! constraints, and givens. [SeededRng] therefore derives its state from the
//! puzzle date alone and advances it with a fixed linear congruential step,
//! so that equal dates always produce equal draw sequences.
//!
//! ```
//! use chrono::NaiveDate;
//! use numbl::rng::SeededRng;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let mut a = SeededRng::from_date(date);
//! let mut b = SeededRng::from_date(date);
//!
//! assert_eq!(a.next_f64(), b.next_f64());
//! ```

use chrono::NaiveDate;

const LCG_MULTIPLIER: i64 = 9301;
const LCG_INCREMENT: i64 = 49297;
const LCG_MODULUS: i64 = 233280;

/// All puzzle dates are measured relative to this date, so that nearby dates
/// receive clearly distinct seeds even where their textual folds are close.
const EPOCH_YEAR: i32 = 2024;

pub(crate) fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(EPOCH_YEAR, 1, 1).unwrap()
}

/// A deterministic random number generator based on a linear congruential
/// step. The state is seeded from a calendar date, folding the character
/// codes of its `YYYY-MM-DD` form with 32-bit wrapping arithmetic and adding
/// the whole-day offset from a fixed epoch. Both ingredients contribute, so
/// neighboring dates diverge even though their strings differ in one
/// character.
///
/// Every draw returns a value in `[0, 1)` and advances the internal state,
/// which is owned by the caller through this value. There is no global or
/// thread-local state involved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeededRng {
    seed: i64
}

/// Folds the character codes of the given text into a 32-bit signed hash via
/// `hash = hash * 31 + code` with wrapping arithmetic. Used both for deriving
/// date seeds and for puzzle share codes.
pub(crate) fn fold_string(text: &str) -> i32 {
    let mut hash = 0i32;

    for code in text.chars() {
        hash = hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(code as i32);
    }

    hash
}

impl SeededRng {

    /// Creates a new generator seeded from the given date as described in
    /// the [struct documentation](SeededRng).
    pub fn from_date(date: NaiveDate) -> SeededRng {
        let formatted = date.format("%Y-%m-%d").to_string();
        let folded = fold_string(&formatted) as i64;
        let day_offset = date.signed_duration_since(epoch()).num_days();

        SeededRng::from_seed(folded + day_offset)
    }

    /// Creates a new generator with the given raw seed. Mostly useful for
    /// tests; puzzle generation derives its seed from a date via
    /// [SeededRng::from_date].
    pub fn from_seed(seed: i64) -> SeededRng {
        SeededRng {
            seed
        }
    }

    /// Draws the next value in `[0, 1)` and advances the internal state.
    /// The Euclidean remainder keeps the state in `[0, 233280)` even for
    /// negative seeds, so the result range holds for every date.
    pub fn next_f64(&mut self) -> f64 {
        self.seed = (self.seed * LCG_MULTIPLIER + LCG_INCREMENT)
            .rem_euclid(LCG_MODULUS);
        self.seed as f64 / LCG_MODULUS as f64
    }

    /// Collects the given values into a vector and shuffles it with a
    /// Fisher-Yates pass driven by this generator. Equal states produce
    /// equal permutations. Empty and single-element inputs are returned
    /// unchanged without consuming any randomness.
    pub fn shuffle<T>(&mut self, values: impl Iterator<Item = T>) -> Vec<T> {
        let mut vec: Vec<T> = values.collect();

        for i in (1..vec.len()).rev() {
            let j = (self.next_f64() * (i + 1) as f64) as usize;
            vec.swap(i, j);
        }

        vec
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn equal_dates_yield_equal_sequences() {
        let mut a = SeededRng::from_date(date(2024, 6, 15));
        let mut b = SeededRng::from_date(date(2024, 6, 15));

        for _ in 0..32 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn different_dates_yield_different_sequences() {
        let mut a = SeededRng::from_date(date(2024, 6, 15));
        let mut b = SeededRng::from_date(date(2024, 6, 16));
        let draws_a: Vec<f64> = (0..8).map(|_| a.next_f64()).collect();
        let draws_b: Vec<f64> = (0..8).map(|_| b.next_f64()).collect();

        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        let seeds = [0i64, 1, -1, 42, i64::from(i32::MIN), i64::from(i32::MAX)];

        for &seed in seeds.iter() {
            let mut rng = SeededRng::from_seed(seed);

            for _ in 0..256 {
                let value = rng.next_f64();
                assert!(value >= 0.0 && value < 1.0,
                    "draw {} out of range for seed {}", value, seed);
            }
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SeededRng::from_date(date(2024, 1, 1));
        let mut shuffled = rng.shuffle(1..=9usize);
        shuffled.sort_unstable();

        assert_eq!((1..=9usize).collect::<Vec<usize>>(), shuffled);
    }

    #[test]
    fn shuffle_is_deterministic() {
        let mut a = SeededRng::from_date(date(2024, 2, 29));
        let mut b = SeededRng::from_date(date(2024, 2, 29));

        assert_eq!(a.shuffle(1..=9usize), b.shuffle(1..=9usize));
    }

    #[test]
    fn shuffle_of_empty_input_consumes_no_randomness() {
        let mut shuffling = SeededRng::from_seed(123);
        let mut fresh = SeededRng::from_seed(123);

        let empty: Vec<usize> = shuffling.shuffle(std::iter::empty());

        assert!(empty.is_empty());
        assert_eq!(fresh.next_f64(), shuffling.next_f64());
    }

    #[test]
    fn shuffle_of_singleton_consumes_no_randomness() {
        let mut shuffling = SeededRng::from_seed(123);
        let mut fresh = SeededRng::from_seed(123);

        assert_eq!(vec![5], shuffling.shuffle(std::iter::once(5)));
        assert_eq!(fresh.next_f64(), shuffling.next_f64());
    }
}
