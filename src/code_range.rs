//! Rectangular spans over line and column coordinates.
//!
//! A [CodeRange] covers every [Point] from its `from` point up to, but not including, its `to`
//! point. Sets of ranges can be merged into a canonical form with [consolidate_code_ranges] and
//! complemented with [inverse_code_range].

use std::cmp;
use std::fmt;

use itertools::Itertools;

use crate::position::{Coord, Point};

/// A half-open span `[from, to)` of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodeRange {
    /// The first point inside the range.
    pub from: Point,
    /// The first point after the range.
    pub to: Point,
}

impl CodeRange {
    /// The range covering every possible point.
    pub const FULL: CodeRange = CodeRange {
        from: Point::ZERO,
        to: Point::END,
    };

    /// Creates a range without checking that `from` comes before `to`.
    pub fn new(from: Point, to: Point) -> CodeRange {
        CodeRange { from, to }
    }

    /// Returns `true` if the range contains no points.
    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// Returns the range with its endpoints swapped if `from` comes after `to`.
    pub fn normalized(self) -> CodeRange {
        if self.from > self.to {
            CodeRange {
                from: self.to,
                to: self.from,
            }
        } else {
            self
        }
    }

    /// See [is_point_in_code_range].
    pub fn contains(&self, point: Point) -> bool {
        is_point_in_code_range(point, self)
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

/// Creates a [CodeRange] from the line and column of both of its endpoints.
///
/// No validation is performed: callers are responsible for `from` not being after `to`.
///
/// ```
/// use coderange::{code_range::point_to_point, position::Coord};
///
/// let whole_lines = point_to_point(2, 0, 4, Coord::Infinity);
/// assert_eq!(whole_lines.to_string(), "2:0..4:inf");
/// ```
pub fn point_to_point<A, B, C, D>(from_line: A, from_column: B, to_line: C, to_column: D) -> CodeRange
where
    A: Into<Coord>,
    B: Into<Coord>,
    C: Into<Coord>,
    D: Into<Coord>,
{
    CodeRange {
        from: Point::new(from_line, from_column),
        to: Point::new(to_line, to_column),
    }
}

/// Returns `true` if `point` lies within `range`.
///
/// Any column is accepted on the lines strictly between the endpoints. On the first line the
/// column must be at least `range.from.column`, and on the last line it must be less than
/// `range.to.column`, so a point equal to `range.to` is never contained.
pub fn is_point_in_code_range(point: Point, range: &CodeRange) -> bool {
    range.from <= point && point < range.to
}

/// Merges overlapping, nested and touching ranges.
///
/// The result is sorted by `from`, no two ranges in it overlap or touch, and it covers exactly
/// the points covered by the input. The order of the input does not matter. Ranges whose
/// endpoints are reversed are normalized first.
pub fn consolidate_code_ranges<I>(ranges: I) -> Vec<CodeRange>
where
    I: IntoIterator<Item = CodeRange>,
{
    let mut sorted = ranges.into_iter()
        .map(CodeRange::normalized)
        .sorted();

    let mut current = match sorted.next() {
        Some(range) => range,
        None => return Vec::new(),
    };

    let mut consolidated = Vec::new();

    for range in sorted {
        // Sorting guarantees `range.from >= current.from`.
        if range.from <= current.to {
            current.to = cmp::max(current.to, range.to);
        } else {
            consolidated.push(current);
            current = range;
        }
    }

    consolidated.push(current);
    consolidated
}

/// Returns the gaps left by `ranges` within [CodeRange::FULL].
///
/// The input is consolidated first, so it may be given in any order and may overlap. An empty
/// input yields the full range. Zero-width ranges do not split a gap.
///
/// ```
/// use coderange::code_range::{inverse_code_range, CodeRange};
///
/// assert_eq!(inverse_code_range(Vec::<CodeRange>::new()), vec![CodeRange::FULL]);
/// ```
pub fn inverse_code_range<I>(ranges: I) -> Vec<CodeRange>
where
    I: IntoIterator<Item = CodeRange>,
{
    let mut cursor = Point::ZERO;
    let mut gaps = Vec::new();

    for range in consolidate_code_ranges(ranges) {
        if range.is_empty() {
            continue;
        }

        if cursor < range.from {
            gaps.push(CodeRange::new(cursor, range.from));
        }

        cursor = cmp::max(cursor, range.to);
    }

    if cursor < Point::END {
        gaps.push(CodeRange::new(cursor, Point::END));
    }

    gaps
}
