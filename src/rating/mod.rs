//! Bradley-Terry full-pairing rating engine
//!
//! This module provides team aggregation, the pairwise comparison model, the
//! rank update engine and a value-in / value-out calculator front-end.

pub mod bradley_terry;
pub mod calculator;
pub mod team;

// Re-export commonly used types
pub use bradley_terry::BradleyTerryFull;
pub use calculator::RatingCalculator;
pub use team::Team;
