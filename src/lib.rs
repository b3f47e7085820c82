//! # Rally Ledger
//!
//! A local tennis group match tracker. Records match results and derives
//! standings, partnership effectiveness, and trend statistics.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, roster, ranking rows)
//! - **normalize**: Raw row validation and cleaning
//! - **calculate**: Ranking, partnership, and insight computation
//! - **storage**: JSONL persistence for the match log and roster
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation
//!
//! Rankings are a pure view: every query recomputes them in full from the
//! persisted match log snapshot.

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod normalize;
pub mod storage;

pub use models::*;
