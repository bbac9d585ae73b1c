//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Typed variants can be recovered with `downcast_ref`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Team {team} has no players")]
    EmptyTeam { team: usize },

    #[error("Invalid skill for player {player} of team {team}: mean {mean}, variance {variance}")]
    InvalidSkill {
        team: usize,
        player: usize,
        mean: f64,
        variance: f64,
    },

    #[error("Rank count mismatch: {teams} teams but {ranks} ranks")]
    RankCountMismatch { teams: usize, ranks: usize },

    #[error("Player listed more than once in a match: {player_id}")]
    DuplicatePlayer { player_id: String },

    #[error("Invalid match input: {reason}")]
    InvalidMatchInput { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
