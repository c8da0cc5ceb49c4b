//! Dual-channel recommendation scoring for imported marketplace listings.
//!
//! A loosely-typed spreadsheet row goes through three stages:
//!
//! 1. [`field`] — pull each semantic attribute out of the row by trying an
//!    ordered list of candidate headers (English and localized spreadsheets
//!    name the same column differently);
//! 2. [`curves`] — map each raw attribute to a 0–100 sub-score through a
//!    fixed piecewise curve;
//! 3. [`compose`] — fold the sixteen sub-scores into one composite per
//!    sales channel using the configured weight vectors, clamped to
//!    `[0, 100]` and rounded to two decimals.
//!
//! Everything in this crate is pure and synchronous: no I/O, no shared
//! state, total over any input map.

pub mod aliases;
pub mod compose;
pub mod curves;
pub mod field;
pub mod tier;

pub use compose::{compute_scores, compute_scores_default, RawAttributes, ScoreResult, SubScores};
pub use field::{extract_number, extract_string};
pub use tier::ScoreTier;
