//! Line and column coordinates.

use std::fmt;

/// A single line or column coordinate.
///
/// A coordinate is either a concrete zero-based number or [Coord::Infinity], which compares
/// greater than every finite value. An infinite column means "until the end of the line,
/// regardless of its length".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coord {
    /// A zero-based line or column number.
    Finite(usize),

    /// Unbounded. Equal only to itself.
    Infinity,
}

impl Coord {
    /// Returns the numeric value, or `None` for [Coord::Infinity].
    pub fn finite(self) -> Option<usize> {
        match self {
            Coord::Finite(value) => Some(value),
            Coord::Infinity => None,
        }
    }
}

impl Default for Coord {
    fn default() -> Coord {
        Coord::Finite(0)
    }
}

impl From<usize> for Coord {
    fn from(value: usize) -> Coord {
        Coord::Finite(value)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Coord::Finite(value) => write!(f, "{}", value),
            Coord::Infinity => write!(f, "inf"),
        }
    }
}

/// A location in text, as a line and a column.
///
/// Points are ordered line-major: a point on an earlier line is always smaller, and points on
/// the same line are ordered by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    /// The zero-based line number.
    pub line: Coord,
    /// The zero-based column number, counted in characters from the start of the line.
    pub column: Coord,
}

impl Point {
    /// The first column of the first line.
    pub const ZERO: Point = Point {
        line: Coord::Finite(0),
        column: Coord::Finite(0),
    };

    /// The point past every other point.
    pub const END: Point = Point {
        line: Coord::Infinity,
        column: Coord::Infinity,
    };

    pub fn new<L, C>(line: L, column: C) -> Point
    where
        L: Into<Coord>,
        C: Into<Coord>,
    {
        Point {
            line: line.into(),
            column: column.into(),
        }
    }
}

impl<L, C> From<(L, C)> for Point
where
    L: Into<Coord>,
    C: Into<Coord>,
{
    fn from((line, column): (L, C)) -> Point {
        Point::new(line, column)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Converts byte offsets of a source text into [Points](Point).
///
/// The cursor only moves forward, so offsets passed to [LineCursor::advance_to] must be
/// non-decreasing. Lines are separated by `\n` and columns count characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(source: &'a str) -> LineCursor<'a> {
        LineCursor {
            source,
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    /// Moves the cursor to byte offset `offset` and returns its line and column.
    ///
    /// # Panics
    /// If `offset` is behind the cursor, past the end of the source or not on a character
    /// boundary.
    pub fn advance_to(&mut self, offset: usize) -> Point {
        assert!(offset >= self.offset, "line cursor cannot move backwards");

        for ch in self.source[self.offset..offset].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }

        self.offset = offset;

        Point::new(self.line, self.column)
    }
}
