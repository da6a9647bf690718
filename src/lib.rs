//! A crate for working with code ranges: rectangular line and column spans used to highlight
//! parts of source code during animated code walkthroughs.
//!
//! Currently this crate provides the functionality to:
//! - Describe spans of text with [CodeRange](code_range::CodeRange) and test whether a
//!   [Point](position::Point) is inside one.
//! - Merge overlapping, nested and touching ranges into a sorted, disjoint set.
//! - Compute the parts of the text *not* covered by a set of ranges.
//! - Find every occurrence of a literal string or a regular expression and get the matches back
//!   as ranges.
//! - Bootstrap a project from its settings and a list of plugins.
//!
//! # Example
//! ```
//! use coderange::{
//!     code_range::{consolidate_code_ranges, inverse_code_range, point_to_point},
//!     pattern::{find_all_code_ranges, Pattern},
//!     position::Coord,
//! };
//!
//! let code = [
//!     "const fn = () => {",
//!     "  return 10;",
//!     "};",
//! ].join("\n");
//!
//! // Highlight every empty argument list and every number.
//! let mut ranges = find_all_code_ranges(&code, &Pattern::literal("()"));
//! ranges.extend(find_all_code_ranges(&code, &Pattern::regex(r"\d+").unwrap()));
//!
//! let highlighted = consolidate_code_ranges(ranges);
//! assert_eq!(highlighted, vec![
//!     point_to_point(0, 11, 0, 13),
//!     point_to_point(1, 9, 1, 11),
//! ]);
//!
//! // Everything else gets dimmed.
//! let dimmed = inverse_code_range(highlighted);
//! assert_eq!(dimmed, vec![
//!     point_to_point(0, 0, 0, 11),
//!     point_to_point(0, 13, 1, 9),
//!     point_to_point(1, 11, Coord::Infinity, Coord::Infinity),
//! ]);
//! ```
//!
//! # Executables
//!
//! ## `coderange-find`
//!
//! Prints the ranges of every match of a pattern in a file. Built with the `coderange-find`
//! (or `tools`) feature.
//!
//! ```text
//! $ coderange-find --invert src/main.rs 'fn main'
//! 0:0..4:0
//! 4:7..inf:inf
//! ```
pub mod position;
pub mod code_range;
pub mod pattern;
pub mod plugin;
pub mod bootstrap;
pub mod error;
