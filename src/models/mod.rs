//! Core data models for the match tracker.

mod ids;
mod partner;
mod player;
mod ranking;
mod record;

pub use ids::*;
pub use partner::*;
pub use player::*;
pub use ranking::*;
pub use record::*;
