//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use pairwise_skill::{RatedPlayer, Skill};

/// Absolute tolerance for comparing against recorded reference values
pub const REFERENCE_TOLERANCE: f64 = 1e-12;

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} (±{}), got {}",
        expected,
        tolerance,
        actual
    );
}

pub fn assert_skill(actual: &Skill, expected: &Skill) {
    assert_close(actual.mean, expected.mean, REFERENCE_TOLERANCE);
    assert_close(actual.variance, expected.variance, REFERENCE_TOLERANCE);
}

/// Borrow disjoint players out of a caller-owned pool, one lineup per team.
/// Panics if a player index appears twice.
pub fn lineup<'a>(pool: &'a mut [Skill], teams: &[Vec<usize>]) -> Vec<Vec<&'a mut Skill>> {
    let mut slots: Vec<Option<&'a mut Skill>> = pool.iter_mut().map(Some).collect();

    teams
        .iter()
        .map(|team| {
            team.iter()
                .map(|&index| {
                    slots[index]
                        .take()
                        .expect("player listed on more than one team")
                })
                .collect()
        })
        .collect()
}

/// Labelled players, one team per inner slice
pub fn rated_teams(teams: &[&[(&str, f64, f64)]]) -> Vec<Vec<RatedPlayer>> {
    teams
        .iter()
        .map(|team| {
            team.iter()
                .map(|&(id, mean, variance)| RatedPlayer::new(id, Skill::new(mean, variance)))
                .collect()
        })
        .collect()
}
