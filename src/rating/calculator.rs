//! Rating calculator trait and implementations
//!
//! The calculator is a value-in / value-out front-end over the in-place
//! update engine: callers hand over labelled skills and receive one
//! `RatingChange` per player, leaving their own records untouched.

use crate::error::{RatingError, Result};
use crate::rating::bradley_terry::BradleyTerryFull;
use crate::types::{PlayerId, RatedPlayer, RatingChange, Skill};
use std::collections::HashSet;
use tracing::debug;

/// Trait for calculating rating changes after games
pub trait RatingCalculator: Send + Sync {
    /// Calculate rating changes for players based on game results
    ///
    /// # Arguments
    /// * `teams` - Players grouped by team
    /// * `ranks` - One rank per team, lower finishes ahead, equal ranks draw
    ///
    /// # Returns
    /// One change per player, in input order
    fn calculate_rating_changes(
        &self,
        teams: &[Vec<RatedPlayer>],
        ranks: &[i64],
    ) -> Result<Vec<RatingChange>>;

    /// Same as `calculate_rating_changes` with teams given in finishing order
    fn calculate_in_order(&self, teams: &[Vec<RatedPlayer>]) -> Result<Vec<RatingChange>> {
        let ranks: Vec<i64> = (0..teams.len() as i64).collect();
        self.calculate_rating_changes(teams, &ranks)
    }

    /// Get the initial skill for new players
    fn initial_skill(&self) -> Skill;

    /// Probability that side `a` beats side `b`
    fn predict_win(&self, a: &[Skill], b: &[Skill]) -> Result<f64>;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> Result<()>;
}

impl RatingCalculator for BradleyTerryFull {
    fn calculate_rating_changes(
        &self,
        teams: &[Vec<RatedPlayer>],
        ranks: &[i64],
    ) -> Result<Vec<RatingChange>> {
        let mut seen: HashSet<&PlayerId> = HashSet::new();
        for player in teams.iter().flatten() {
            if !seen.insert(&player.id) {
                return Err(RatingError::DuplicatePlayer {
                    player_id: player.id.clone(),
                }
                .into());
            }
        }

        let mut updated: Vec<Vec<RatedPlayer>> = teams.to_vec();
        self.rank_with(updated.iter_mut().map(|team| team.iter_mut()), ranks)?;

        let rating_changes: Vec<RatingChange> = teams
            .iter()
            .zip(&updated)
            .zip(ranks)
            .flat_map(|((before, after), &rank)| {
                before.iter().zip(after).map(move |(old, new)| RatingChange {
                    player_id: old.id.clone(),
                    old_skill: old.skill,
                    new_skill: new.skill,
                    rank,
                })
            })
            .collect();

        debug!(players = rating_changes.len(), "Calculated rating changes");
        Ok(rating_changes)
    }

    fn initial_skill(&self) -> Skill {
        self.skill()
    }

    fn predict_win(&self, a: &[Skill], b: &[Skill]) -> Result<f64> {
        self.win_probability(a, b)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> Result<()> {
        let new_config: BradleyTerryFull =
            serde_json::from_value(config).map_err(|e| RatingError::ConfigurationError {
                message: format!("Invalid Bradley-Terry configuration: {}", e),
            })?;

        new_config.validate()?;
        *self = new_config;
        Ok(())
    }
}
