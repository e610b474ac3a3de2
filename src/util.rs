//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [DigitSet] used for
//! tracking which digits occur in a line or grid.

use crate::MAX_DIGIT;
use crate::error::{NumblError, NumblResult};

/// A set of the digits 1 to 9 that is implemented as a bit mask. Each digit
/// is represented by one bit, which generally has better performance than a
/// `HashSet` for this fixed domain.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DigitSet {
    mask: u16,
    len: usize
}

impl DigitSet {

    /// Creates a new, empty `DigitSet`.
    pub fn new() -> DigitSet {
        DigitSet {
            mask: 0,
            len: 0
        }
    }

    fn bit(digit: usize) -> NumblResult<u16> {
        if digit == 0 || digit > MAX_DIGIT {
            Err(NumblError::InvalidNumber)
        }
        else {
            Ok(1u16 << (digit - 1))
        }
    }

    /// Indicates whether this set contains the given digit. Digits outside
    /// the range `[1, 9]` are never contained.
    pub fn contains(&self, digit: usize) -> bool {
        match DigitSet::bit(digit) {
            Ok(bit) => self.mask & bit != 0,
            Err(_) => false
        }
    }

    /// Inserts the given digit into this set, such that
    /// [DigitSet::contains] returns `true` for it afterwards. Returns `true`
    /// if the set changed, that is, the digit was not present before, and
    /// `false` otherwise.
    ///
    /// # Arguments
    ///
    /// * `digit`: The digit to insert. Must be in the range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// If `digit` is 0 or greater than 9. In that case,
    /// `NumblError::InvalidNumber` is returned.
    pub fn insert(&mut self, digit: usize) -> NumblResult<bool> {
        let bit = DigitSet::bit(digit)?;

        if self.mask & bit == 0 {
            self.mask |= bit;
            self.len += 1;
            Ok(true)
        }
        else {
            Ok(false)
        }
    }

    /// Removes the given digit from this set, such that
    /// [DigitSet::contains] returns `false` for it afterwards. Returns `true`
    /// if the set changed, that is, the digit was present before, and `false`
    /// otherwise.
    ///
    /// # Arguments
    ///
    /// * `digit`: The digit to remove. Must be in the range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// If `digit` is 0 or greater than 9. In that case,
    /// `NumblError::InvalidNumber` is returned.
    pub fn remove(&mut self, digit: usize) -> NumblResult<bool> {
        let bit = DigitSet::bit(digit)?;

        if self.mask & bit != 0 {
            self.mask &= !bit;
            self.len -= 1;
            Ok(true)
        }
        else {
            Ok(false)
        }
    }

    /// Removes all digits from this set, such that it is empty afterwards.
    pub fn clear(&mut self) {
        self.mask = 0;
        self.len = 0;
    }

    /// Returns the number of digits contained in this set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Indicates whether this set is empty, i.e. contains no digits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the digits contained in this set in
    /// ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let mask = self.mask;
        (1..=MAX_DIGIT).filter(move |digit| mask & (1u16 << (digit - 1)) != 0)
    }
}
