//! Pairwise Skill - multi-team Bradley-Terry skill rating
//!
//! This crate rates players from match outcomes between any number of teams
//! of any size. Every team is compared against every other team, and the
//! resulting team-level adjustment is split back onto each player by their
//! share of the team variance.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{BradleyTerryFull, RatingCalculator, Team};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
