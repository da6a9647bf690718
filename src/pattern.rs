//! Searching text for patterns and turning the matches into [CodeRanges](CodeRange).

use std::ops::Range;

pub use regex_automata::meta::{BuildError, Regex};

use crate::code_range::CodeRange;
use crate::position::LineCursor;

/// What to search for with [find_all_code_ranges].
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Text matched exactly. Regular expression syntax has no special meaning here, so
    /// `Literal("()")` finds an empty pair of parentheses.
    Literal(String),

    /// A compiled regular expression, matched according to its own semantics.
    Regex(Regex),
}

impl Pattern {
    pub fn literal<S: Into<String>>(text: S) -> Pattern {
        Pattern::Literal(text.into())
    }

    /// Compiles `source` as a regular expression.
    ///
    /// Build errors are returned as-is from the regex engine.
    pub fn regex(source: &str) -> Result<Pattern, BuildError> {
        Regex::new(source).map(Pattern::Regex)
    }

    /// Returns the byte spans of every non-overlapping match in `haystack`, in order.
    fn matches<'a>(&'a self, haystack: &'a str) -> Box<dyn Iterator<Item = Range<usize>> + 'a> {
        match self {
            Pattern::Literal(text) => Box::new(
                haystack.match_indices(text.as_str())
                    .map(|(start, found)| start..start + found.len()),
            ),
            Pattern::Regex(regex) => Box::new(regex.find_iter(haystack).map(|m| m.range())),
        }
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Pattern {
        Pattern::literal(text)
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Pattern {
        Pattern::Literal(text)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Pattern {
        Pattern::Regex(regex)
    }
}

/// Finds every occurrence of `pattern` in `code`.
///
/// Each match becomes a [CodeRange] starting at the first matched character and ending right
/// after the last one. Lines and columns are zero-based, lines are separated by `\n` and
/// columns count characters. Matches are returned from top to bottom.
///
/// ```
/// use coderange::{
///     code_range::point_to_point,
///     pattern::{find_all_code_ranges, Pattern},
/// };
///
/// let code = "let a = f();\nlet b = g();";
///
/// assert_eq!(find_all_code_ranges(code, &Pattern::literal("()")), vec![
///     point_to_point(0, 9, 0, 11),
///     point_to_point(1, 9, 1, 11),
/// ]);
/// ```
pub fn find_all_code_ranges(code: &str, pattern: &Pattern) -> Vec<CodeRange> {
    let mut cursor = LineCursor::new(code);

    pattern.matches(code)
        .map(|span| {
            let from = cursor.advance_to(span.start);
            let to = cursor.advance_to(span.end);
            CodeRange::new(from, to)
        })
        .collect()
}
