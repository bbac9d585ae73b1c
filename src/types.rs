//! Common types used throughout the rating engine

use crate::rating::bradley_terry::{DEFAULT_MU, DEFAULT_SIGMA};
use serde::{Deserialize, Serialize};
use skillratings::weng_lin::WengLinRating;

/// Unique identifier for players
pub type PlayerId = String;

/// Belief state of a player (or of a synthesized team): mean and variance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub mean: f64,
    pub variance: f64,
}

impl Skill {
    pub fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    /// Standard deviation of the belief
    pub fn sigma(&self) -> f64 {
        self.variance.sqrt()
    }

    /// A skill can take part in a comparison only with a finite mean and a
    /// finite, strictly positive variance.
    pub fn is_valid(&self) -> bool {
        self.mean.is_finite() && self.variance.is_finite() && self.variance > 0.0
    }
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            mean: DEFAULT_MU,
            variance: DEFAULT_SIGMA * DEFAULT_SIGMA,
        }
    }
}

impl From<WengLinRating> for Skill {
    fn from(rating: WengLinRating) -> Self {
        Self {
            mean: rating.rating,
            variance: rating.uncertainty * rating.uncertainty,
        }
    }
}

impl From<Skill> for WengLinRating {
    fn from(skill: Skill) -> Self {
        Self {
            rating: skill.mean,
            uncertainty: skill.sigma(),
        }
    }
}

/// Anything that carries a skill the engine can read and update in place
pub trait SkillSource {
    fn skill(&self) -> &Skill;
    fn skill_mut(&mut self) -> &mut Skill;
}

impl SkillSource for Skill {
    fn skill(&self) -> &Skill {
        self
    }

    fn skill_mut(&mut self) -> &mut Skill {
        self
    }
}

/// A skill labelled with the player it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedPlayer {
    pub id: PlayerId,
    #[serde(flatten)]
    pub skill: Skill,
}

impl RatedPlayer {
    pub fn new(id: impl Into<PlayerId>, skill: Skill) -> Self {
        Self {
            id: id.into(),
            skill,
        }
    }
}

impl SkillSource for RatedPlayer {
    fn skill(&self) -> &Skill {
        &self.skill
    }

    fn skill_mut(&mut self) -> &mut Skill {
        &mut self.skill
    }
}

/// Rating change information for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub old_skill: Skill,
    pub new_skill: Skill,
    pub rank: i64,
}

impl RatingChange {
    /// How much the mean moved (+/-)
    pub fn mean_delta(&self) -> f64 {
        self.new_skill.mean - self.old_skill.mean
    }
}
