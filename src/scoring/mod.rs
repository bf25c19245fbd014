//! The scoring engine: piecewise-linear interpolation of raw metric
//! values into 1-10 sub-scores, and weighted aggregation into category
//! scores, a composite score, and a tier.

pub mod aggregate;
pub mod interpolate;

pub use aggregate::{score, CategoryScore, ScoredResult, SubScore};
