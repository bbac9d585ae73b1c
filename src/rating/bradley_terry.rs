//! Bradley-Terry rating with full pairwise team comparisons
//!
//! Every team is compared against every other team in the match, not only
//! its neighbours in the finishing order. Each comparison contributes to a
//! team-level mean adjustment (`omega`) and variance reduction (`delta`),
//! which are then split across the team's players by their share of the
//! team variance.

use crate::error::{RatingError, Result};
use crate::rating::team::{combine, Team};
use crate::types::{Skill, SkillSource};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace, warn};

/// Prior mean for a player with no history
pub const DEFAULT_MU: f64 = 25.0;
/// Prior standard deviation for a player with no history
pub const DEFAULT_SIGMA: f64 = DEFAULT_MU / 3.0;
/// Performance noise added to every comparison
pub const DEFAULT_BETA: f64 = DEFAULT_SIGMA / 2.0;
/// Lower bound of the multiplicative variance update
pub const DEFAULT_KAPPA: f64 = 0.0001;

/// Parameters of the Bradley-Terry full-pairing model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BradleyTerryFull {
    /// Mean of the prior skill
    pub mu: f64,
    /// Standard deviation of the prior skill
    pub sigma: f64,
    /// Assumed performance variance per comparison
    pub beta: f64,
    /// Floor for the variance shrink factor
    pub kappa: f64,
}

impl Default for BradleyTerryFull {
    fn default() -> Self {
        Self {
            mu: DEFAULT_MU,
            sigma: DEFAULT_SIGMA,
            beta: DEFAULT_BETA,
            kappa: DEFAULT_KAPPA,
        }
    }
}

impl BradleyTerryFull {
    /// Canonical parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Wider performance noise, smaller rating movements
    pub fn conservative() -> Self {
        Self {
            beta: DEFAULT_SIGMA,
            ..Self::default()
        }
    }

    /// Narrower performance noise, larger rating movements
    pub fn aggressive() -> Self {
        Self {
            beta: DEFAULT_SIGMA / 4.0,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("mu", self.mu),
            ("sigma", self.sigma),
            ("beta", self.beta),
            ("kappa", self.kappa),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(RatingError::ConfigurationError {
                    message: format!("{} must be finite, got {}", name, value),
                }
                .into());
            }
        }

        if self.sigma <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "Sigma must be positive".to_string(),
            }
            .into());
        }

        if self.beta <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "Beta must be positive".to_string(),
            }
            .into());
        }

        if self.kappa <= 0.0 || self.kappa > 1.0 {
            return Err(RatingError::ConfigurationError {
                message: "Kappa must be in (0, 1]".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Prior skill for a player with no rating history
    pub fn skill(&self) -> Skill {
        Skill {
            mean: self.mu,
            variance: self.sigma * self.sigma,
        }
    }

    /// Combined uncertainty scale of one comparison between `i` and `q`
    pub fn comparison_scale(&self, i: &Skill, q: &Skill) -> f64 {
        (i.variance + q.variance + 2.0 * self.beta * self.beta).sqrt()
    }

    /// Probability that `i` beats `q` under scale `c`
    pub fn comparison_probability(&self, i: &Skill, q: &Skill, c: f64) -> f64 {
        1.0 / (1.0 + ((q.mean - i.mean) / c).exp())
    }

    /// Update every player, taking teams in finishing order (first = best)
    pub fn rank<'a, T, P, S>(&self, teams: T) -> Result<()>
    where
        T: IntoIterator<Item = P>,
        P: IntoIterator<Item = &'a mut S>,
        S: SkillSource + 'a,
    {
        let mut teams: Vec<Team<'a>> = teams.into_iter().map(Team::aggregate).collect();
        let ranks: Vec<i64> = (0..teams.len() as i64).collect();

        self.update(&mut teams, &ranks)
    }

    /// Update every player using explicit ranks, one per team. Lower ranks
    /// finish ahead; equal ranks are draws. Only relative order matters.
    pub fn rank_with<'a, T, P, S>(&self, teams: T, ranks: &[i64]) -> Result<()>
    where
        T: IntoIterator<Item = P>,
        P: IntoIterator<Item = &'a mut S>,
        S: SkillSource + 'a,
    {
        let mut teams: Vec<Team<'a>> = teams.into_iter().map(Team::aggregate).collect();

        self.update(&mut teams, ranks)
    }

    /// Probability that side `a` beats side `b`. Nothing is mutated.
    pub fn win_probability<'b, A, B, S>(&self, a: A, b: B) -> Result<f64>
    where
        A: IntoIterator<Item = &'b S>,
        B: IntoIterator<Item = &'b S>,
        S: SkillSource + 'b,
    {
        let team_a = side_skill(a, 0)?;
        let team_b = side_skill(b, 1)?;

        let c = self.comparison_scale(&team_a, &team_b);
        Ok(self.comparison_probability(&team_a, &team_b, c))
    }

    /// Whole match is validated before any skill is touched
    fn update(&self, teams: &mut [Team<'_>], ranks: &[i64]) -> Result<()> {
        if teams.len() != ranks.len() {
            warn!(
                teams = teams.len(),
                ranks = ranks.len(),
                "Rejecting match with mismatched ranks"
            );
            return Err(RatingError::RankCountMismatch {
                teams: teams.len(),
                ranks: ranks.len(),
            }
            .into());
        }

        for (index, team) in teams.iter().enumerate() {
            if let Err(e) = team.validate(index) {
                warn!("Rejecting match: {}", e);
                return Err(e);
            }
        }

        debug!(teams = teams.len(), "Rating match");

        let adjustments: Vec<(f64, f64)> = (0..teams.len())
            .map(|i| self.adjustment(&*teams, ranks, i))
            .collect();

        for (index, (team, (omega, delta))) in teams.iter_mut().zip(adjustments).enumerate() {
            trace!(team = index, omega, delta, "Applying team adjustment");
            team.apply(omega, delta, self.kappa);
        }

        Ok(())
    }

    /// Accumulate `omega` and `delta` for team `i` against every other team
    fn adjustment(&self, teams: &[Team<'_>], ranks: &[i64], i: usize) -> (f64, f64) {
        let ti = teams[i].skill();
        let mut omega = 0.0;
        let mut delta = 0.0;

        for (q, team) in teams.iter().enumerate() {
            if q == i {
                continue;
            }

            let tq = team.skill();
            let c = self.comparison_scale(&ti, &tq);
            let p = self.comparison_probability(&ti, &tq, c);
            let s = observed_score(ranks[i], ranks[q]);

            omega += ti.variance / c * (s - p);
            // gamma is fixed to the team's standard deviation over c
            let gamma = ti.variance.sqrt() / c;
            delta += gamma * ti.variance / c / c * p * (1.0 - p);
        }

        (omega, delta)
    }
}

/// Score of a team with rank `own` against a team with rank `other`
fn observed_score(own: i64, other: i64) -> f64 {
    match other.cmp(&own) {
        Ordering::Greater => 1.0,
        Ordering::Equal => 0.5,
        Ordering::Less => 0.0,
    }
}

fn side_skill<'b, I, S>(side: I, team: usize) -> Result<Skill>
where
    I: IntoIterator<Item = &'b S>,
    S: SkillSource + 'b,
{
    let skills: Vec<&Skill> = side.into_iter().map(|s| s.skill()).collect();
    if skills.is_empty() {
        return Err(RatingError::EmptyTeam { team }.into());
    }

    for (player, skill) in skills.iter().enumerate() {
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

    Ok(combine(skills))
}
