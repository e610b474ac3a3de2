//! This module defines the constraints which can be assigned to the rows and
//! columns of a numbl puzzle, thus specifying the rules the player has to
//! deduce the solution from.
//!
//! Every line (row or column) of a puzzle carries exactly one [Constraint]
//! from a fixed catalog: the sum of the line, the parity of all its digits,
//! two digits the line must contain, or an inclusive range all its digits
//! fall into. The catalog is a plain tagged enum, so new variants can be
//! added without touching the evaluation logic outside the match arms here.
//!
//! Constraints are picked by [select_constraint] during generation. Selection
//! is careful to stay non-degenerate: a parity constraint is only offered if
//! all four digits share their parity, a range constraint only if the range
//! is tight enough to be informative, and a sum constraint is always
//! constructible, so selection can never fail.
//!
//! ```
//! use numbl::constraint::Constraint;
//!
//! let constraint = Constraint::Range { min: 2, max: 5 };
//!
//! assert!(constraint.check(&[2, 4, 3, 5]));
//! assert!(!constraint.check(&[2, 4, 3, 6]));
//! assert_eq!("Range", constraint.name());
//! assert_eq!("2-5", constraint.value_label());
//! ```

use crate::rng::SeededRng;

use serde::{Deserialize, Serialize};

use std::collections::HashSet;

/// Identifies the catalog entry a [Constraint] belongs to, without its
/// parameters. Used to steer selection towards constraint types that have not
/// been assigned to another line yet. Note that even and odd parity count as
/// separate kinds, matching how players perceive them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ConstraintKind {

    /// The kind of [Constraint::Sum] constraints.
    Sum,

    /// The kind of [Constraint::Parity] constraints requiring even digits.
    Even,

    /// The kind of [Constraint::Parity] constraints requiring odd digits.
    Odd,

    /// The kind of [Constraint::Contains] constraints.
    Contains,

    /// The kind of [Constraint::Range] constraints.
    Range
}

/// A constraint on one line (row or column) of a numbl grid. The hidden
/// solution always satisfies the constraints assigned to its lines; the
/// player has to find digits that do the same.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Constraint {

    /// The digits of the line must add up to exactly the contained target.
    Sum(usize),

    /// All digits of the line must be even (`true`) or all odd (`false`).
    Parity(bool),

    /// The line must contain both of the two (distinct) digits.
    Contains(usize, usize),

    /// All digits of the line must lie in the inclusive range
    /// `[min, max]`.
    Range {

        /// The least digit permitted in the line.
        min: usize,

        /// The greatest digit permitted in the line.
        max: usize
    }
}

impl Constraint {

    /// Gets the [ConstraintKind] this constraint belongs to.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Sum(_) => ConstraintKind::Sum,
            Constraint::Parity(true) => ConstraintKind::Even,
            Constraint::Parity(false) => ConstraintKind::Odd,
            Constraint::Contains(_, _) => ConstraintKind::Contains,
            Constraint::Range { .. } => ConstraintKind::Range
        }
    }

    /// Indicates whether the given line of digits satisfies this constraint.
    /// The slice is expected to hold the four digits of a row or column in
    /// order, but any length is checked consistently.
    pub fn check(&self, line: &[usize]) -> bool {
        match self {
            Constraint::Sum(target) =>
                line.iter().sum::<usize>() == *target,
            Constraint::Parity(even) =>
                line.iter().all(|&n| (n % 2 == 0) == *even),
            Constraint::Contains(first, second) =>
                line.contains(first) && line.contains(second),
            Constraint::Range { min, max } =>
                line.iter().all(|&n| n >= *min && n <= *max)
        }
    }

    /// Gets the human-readable name of this constraint, displayed as the
    /// label of the line it governs.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Sum(_) => "Sum",
            Constraint::Parity(true) => "Even",
            Constraint::Parity(false) => "Odd",
            Constraint::Contains(_, _) => "Contains",
            Constraint::Range { .. } => "Range"
        }
    }

    /// Gets the human-readable rendering of this constraint's parameters,
    /// displayed next to its [name](Constraint::name). The digits of a
    /// contains constraint are listed in ascending order, independently of
    /// the order in which they were selected.
    pub fn value_label(&self) -> String {
        match self {
            Constraint::Sum(target) => target.to_string(),
            Constraint::Parity(true) => String::from("All Even"),
            Constraint::Parity(false) => String::from("All Odd"),
            Constraint::Contains(first, second) => {
                let mut values = [*first, *second];
                values.sort_unstable();
                format!("{}, {}", values[0], values[1])
            },
            Constraint::Range { min, max } => format!("{}-{}", min, max)
        }
    }

    /// Gets the compact code of this constraint used in puzzle share codes
    /// (see [Puzzle::share_code](crate::Puzzle::share_code)): `s<sum>`, `e`,
    /// `o`, `c<first><second>` in selection order, or `r<min><max>`.
    pub fn code(&self) -> String {
        match self {
            Constraint::Sum(target) => format!("s{}", target),
            Constraint::Parity(true) => String::from("e"),
            Constraint::Parity(false) => String::from("o"),
            Constraint::Contains(first, second) =>
                format!("c{}{}", first, second),
            Constraint::Range { min, max } => format!("r{}{}", min, max)
        }
    }
}

fn distinct_values(line: &[usize]) -> Vec<usize> {
    let mut distinct = Vec::new();

    for &value in line {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }

    distinct
}

/// The greatest width (`max - min + 1`) a [Constraint::Range] candidate may
/// have. Wider ranges span most of the digit domain and constrain nothing.
const MAX_RANGE_SIZE: usize = 5;

fn pick<T: Copy>(rng: &mut SeededRng, values: &[T]) -> T {
    values[(rng.next_f64() * values.len() as f64) as usize]
}

/// Selects the constraint for one line of a puzzle under generation.
///
/// A candidate list is built from the line's digits: the sum is always a
/// candidate; a parity candidate is added only if all four digits are even or
/// all are odd; a contains candidate with two distinct digits picked by the
/// RNG is added if the line has at least two distinct digits; a range
/// candidate is added only if `max - min + 1 <= 5`. Among the candidates,
/// those whose [ConstraintKind] does not occur in `used_kinds` are preferred,
/// which keeps the eight constraints of a puzzle diverse. Only if every
/// candidate's kind was already used, the choice falls back to all
/// candidates.
///
/// Since the sum candidate is always constructible, this function cannot
/// fail. The caller is responsible for adding the returned constraint's kind
/// to `used_kinds` before processing the next line.
///
/// # Arguments
///
/// * `line`: The four digits of the row or column to constrain.
/// * `used_kinds`: The kinds already assigned to previously processed lines.
/// * `rng`: The seeded generator driving all random decisions, so that equal
/// seeds produce equal constraint assignments.
pub fn select_constraint(line: &[usize],
        used_kinds: &HashSet<ConstraintKind>, rng: &mut SeededRng)
        -> Constraint {
    let sum = line.iter().sum::<usize>();
    let evens = line.iter().filter(|&&n| n % 2 == 0).count();
    let distinct = distinct_values(line);
    let min = line.iter().copied().min().unwrap();
    let max = line.iter().copied().max().unwrap();

    let mut candidates = vec![Constraint::Sum(sum)];

    if evens == line.len() {
        candidates.push(Constraint::Parity(true));
    }
    else if evens == 0 {
        candidates.push(Constraint::Parity(false));
    }

    if distinct.len() >= 2 {
        // The shuffle consumes draws even if the candidate remains unchosen,
        // which keeps the draw sequence aligned across lines.
        let shuffled = rng.shuffle(distinct.into_iter());
        candidates.push(Constraint::Contains(shuffled[0], shuffled[1]));
    }

    if max - min + 1 <= MAX_RANGE_SIZE {
        candidates.push(Constraint::Range { min, max });
    }

    let unused: Vec<Constraint> = candidates.iter()
        .copied()
        .filter(|c| !used_kinds.contains(&c.kind()))
        .collect();

    if unused.is_empty() {
        pick(rng, &candidates)
    }
    else {
        pick(rng, &unused)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn sum_constraint_check() {
        let constraint = Constraint::Sum(20);

        assert!(constraint.check(&[2, 4, 6, 8]));
        assert!(!constraint.check(&[2, 4, 6, 9]));
    }

    #[test]
    fn parity_constraint_check() {
        let even = Constraint::Parity(true);
        let odd = Constraint::Parity(false);

        assert!(even.check(&[2, 4, 6, 8]));
        assert!(!even.check(&[2, 4, 6, 9]));
        assert!(odd.check(&[1, 3, 5, 7]));
        assert!(!odd.check(&[1, 3, 5, 8]));
    }

    #[test]
    fn contains_constraint_check() {
        let constraint = Constraint::Contains(3, 7);

        assert!(constraint.check(&[7, 1, 3, 2]));
        assert!(!constraint.check(&[7, 1, 4, 2]));
        assert!(!constraint.check(&[1, 1, 3, 2]));
    }

    #[test]
    fn range_constraint_check() {
        let constraint = Constraint::Range { min: 2, max: 6 };

        assert!(constraint.check(&[2, 6, 4, 3]));
        assert!(!constraint.check(&[2, 6, 4, 1]));
        assert!(!constraint.check(&[2, 6, 4, 7]));
    }

    #[test]
    fn kinds_distinguish_parities() {
        assert_eq!(ConstraintKind::Even, Constraint::Parity(true).kind());
        assert_eq!(ConstraintKind::Odd, Constraint::Parity(false).kind());
        assert_ne!(Constraint::Parity(true).kind(),
            Constraint::Parity(false).kind());
    }

    #[test]
    fn names_and_labels() {
        assert_eq!("Sum", Constraint::Sum(17).name());
        assert_eq!("17", Constraint::Sum(17).value_label());
        assert_eq!("Even", Constraint::Parity(true).name());
        assert_eq!("All Even", Constraint::Parity(true).value_label());
        assert_eq!("Odd", Constraint::Parity(false).name());
        assert_eq!("All Odd", Constraint::Parity(false).value_label());
        assert_eq!("Contains", Constraint::Contains(7, 3).name());
        assert_eq!("3, 7", Constraint::Contains(7, 3).value_label());
        assert_eq!("Range", Constraint::Range { min: 1, max: 5 }.name());
        assert_eq!("1-5", Constraint::Range { min: 1, max: 5 }.value_label());
    }

    #[test]
    fn codes() {
        assert_eq!("s17", Constraint::Sum(17).code());
        assert_eq!("e", Constraint::Parity(true).code());
        assert_eq!("o", Constraint::Parity(false).code());

        // The contains code preserves selection order, unlike the label.
        assert_eq!("c73", Constraint::Contains(7, 3).code());
        assert_eq!("r15", Constraint::Range { min: 1, max: 5 }.code());
    }

    #[test]
    fn selection_is_deterministic() {
        let mut rng_a = SeededRng::from_seed(77);
        let mut rng_b = SeededRng::from_seed(77);
        let used = HashSet::new();

        let a = select_constraint(&[1, 3, 5, 7], &used, &mut rng_a);
        let b = select_constraint(&[1, 3, 5, 7], &used, &mut rng_b);

        assert_eq!(a, b);
    }

    #[test]
    fn selected_constraint_is_satisfied_by_its_line() {
        let lines =
            [[1, 3, 5, 7], [2, 4, 6, 8], [1, 2, 3, 4], [9, 9, 9, 9],
                [2, 2, 4, 6], [1, 9, 4, 6]];

        for seed in 0..20 {
            let mut rng = SeededRng::from_seed(seed);
            let mut used = HashSet::new();

            for line in lines.iter() {
                let constraint = select_constraint(line, &used, &mut rng);
                used.insert(constraint.kind());

                assert!(constraint.check(line),
                    "constraint {:?} not satisfied by line {:?}", constraint,
                    line);
            }
        }
    }

    #[test]
    fn parity_candidate_requires_uniform_parity() {
        // Mixed parity lines can only yield sum, contains, or range
        // constraints, so none of 100 seeds may select a parity constraint.
        for seed in 0..100 {
            let mut rng = SeededRng::from_seed(seed);
            let used = HashSet::new();
            let constraint = select_constraint(&[1, 2, 3, 4], &used, &mut rng);

            assert_ne!(ConstraintKind::Even, constraint.kind());
            assert_ne!(ConstraintKind::Odd, constraint.kind());
        }
    }

    #[test]
    fn wide_range_is_not_offered() {
        // 9 - 1 + 1 = 9 > 5, so a range constraint must never be selected.
        for seed in 0..100 {
            let mut rng = SeededRng::from_seed(seed);
            let used = HashSet::new();
            let constraint = select_constraint(&[1, 9, 4, 6], &used, &mut rng);

            assert_ne!(ConstraintKind::Range, constraint.kind());
        }
    }

    #[test]
    fn constant_line_has_no_contains_candidate() {
        // A line of equal digits has one distinct value, so contains cannot
        // be offered.
        for seed in 0..100 {
            let mut rng = SeededRng::from_seed(seed);
            let used = HashSet::new();
            let constraint = select_constraint(&[9, 9, 9, 9], &used, &mut rng);

            assert_ne!(ConstraintKind::Contains, constraint.kind());
        }
    }

    #[test]
    fn used_kinds_are_avoided_when_possible() {
        // For an all-odd, tight line, the candidates are sum, odd, contains,
        // and range. With sum marked used, it must not be selected again.
        let mut used = HashSet::new();
        used.insert(ConstraintKind::Sum);

        for seed in 0..100 {
            let mut rng = SeededRng::from_seed(seed);
            let constraint = select_constraint(&[1, 3, 5, 5], &used, &mut rng);

            assert_ne!(ConstraintKind::Sum, constraint.kind());
        }
    }

    #[test]
    fn exhausted_kinds_fall_back_to_all_candidates() {
        let mut used = HashSet::new();
        used.insert(ConstraintKind::Sum);
        used.insert(ConstraintKind::Even);
        used.insert(ConstraintKind::Odd);
        used.insert(ConstraintKind::Contains);
        used.insert(ConstraintKind::Range);

        let mut rng = SeededRng::from_seed(123);
        let constraint = select_constraint(&[1, 3, 5, 5], &used, &mut rng);

        assert!(constraint.check(&[1, 3, 5, 5]));
    }

    #[test]
    fn contains_digits_are_distinct() {
        for seed in 0..100 {
            let mut rng = SeededRng::from_seed(seed);
            let mut used = HashSet::new();
            used.insert(ConstraintKind::Sum);
            used.insert(ConstraintKind::Odd);
            used.insert(ConstraintKind::Range);

            let constraint = select_constraint(&[1, 3, 5, 5], &used, &mut rng);

            if let Constraint::Contains(first, second) = constraint {
                assert_ne!(first, second);
            }
            else {
                panic!("contains was the only unused candidate");
            }
        }
    }

    #[test]
    fn constraint_serde_round_trip() {
        let constraints =
            [Constraint::Sum(17), Constraint::Parity(true),
                Constraint::Parity(false), Constraint::Contains(7, 3),
                Constraint::Range { min: 1, max: 5 }];

        for constraint in constraints.iter() {
            let json = serde_json::to_string(constraint).unwrap();
            let deserialized: Constraint =
                serde_json::from_str(&json).unwrap();

            assert_eq!(constraint, &deserialized);
        }
    }
}
