pub mod insights;
pub mod matches;
pub mod partners;
pub mod players;
pub mod rankings;
