//! Team aggregation
//!
//! A team is built fresh for every match from mutable borrows of the players'
//! skills. The aggregate is the plain sum of member means and variances; no
//! normalisation by team size is applied, so larger teams carry more combined
//! variance and receive larger updates.

use crate::error::{RatingError, Result};
use crate::types::{Skill, SkillSource};
use tracing::warn;

/// Sum a sequence of skills into one team-level skill, in input order
pub fn combine<'a>(skills: impl IntoIterator<Item = &'a Skill>) -> Skill {
    skills
        .into_iter()
        .fold(Skill::new(0.0, 0.0), |acc, skill| Skill {
            mean: acc.mean + skill.mean,
            variance: acc.variance + skill.variance,
        })
}

/// One side of a match, holding back-references into caller-owned skills
#[derive(Debug)]
pub struct Team<'a> {
    members: Vec<&'a mut Skill>,
    aggregate: Skill,
}

impl<'a> Team<'a> {
    /// Build a team from the players of one match-side
    pub fn aggregate<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = &'a mut S>,
        S: SkillSource + 'a,
    {
        let members: Vec<&'a mut Skill> = players.into_iter().map(|p| p.skill_mut()).collect();
        let aggregate = combine(members.iter().map(|s| &**s));

        Self { members, aggregate }
    }

    /// Combined skill of the team, as it was when the team was built
    pub fn skill(&self) -> Skill {
        self.aggregate
    }

    pub fn members(&self) -> impl Iterator<Item = &Skill> {
        self.members.iter().map(|s| &**s)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check that the team can take part in a comparison
    pub fn validate(&self, team: usize) -> Result<()> {
        if self.members.is_empty() {
            return Err(RatingError::EmptyTeam { team }.into());
        }

        for (player, skill) in self.members().enumerate() {
            if !skill.is_valid() {
                return Err(RatingError::InvalidSkill {
                    team,
                    player,
                    mean: skill.mean,
                    variance: skill.variance,
                }
                .into());
            }
        }

        if !self.aggregate.is_valid() {
            return Err(RatingError::InvalidMatchInput {
                reason: format!("team {} aggregates to a non-finite skill", team),
            }
            .into());
        }

        Ok(())
    }

    /// Redistribute a team-level adjustment onto each member in proportion to
    /// its share of the team variance. The variance shrink factor never drops
    /// below `kappa`.
    pub(crate) fn apply(&mut self, omega: f64, delta: f64, kappa: f64) {
        let team_variance = self.aggregate.variance;

        for (player, skill) in self.members.iter_mut().enumerate() {
            let share = skill.variance / team_variance;
            let shrink = 1.0 - share * delta;

            skill.mean += share * omega;
            if shrink < kappa {
                warn!(
                    player,
                    shrink, kappa, "Variance shrink below floor, clamping to kappa"
                );
            }
            skill.variance *= shrink.max(kappa);
        }
    }
}
