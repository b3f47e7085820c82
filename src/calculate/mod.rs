//! Statistics calculation engine.
//!
//! Computes derived tables from the normalized match log:
//! - Player rankings (points, win rate, game differential)
//! - Partnership effectiveness over doubles matches
//! - Head-to-head records, trends, streaks, adjusted points

pub mod insights;
pub mod partners;
pub mod ranking;

pub use insights::*;
pub use partners::*;
pub use ranking::*;
