//! Integration tests for the pairwise-skill rating engine
//!
//! These tests exercise the public API end to end, including:
//! - Recorded reference values for both update front-ends
//! - Caller-owned player pools rated over a sequence of matches
//! - Calculator front-end agreement with in-place updates
//! - Interop with skillratings Weng-Lin ratings
//! - Configuration loading

mod fixtures;

use pairwise_skill::config::AppConfig;
use pairwise_skill::{BradleyTerryFull, RatingCalculator, RatingError, Skill};
use skillratings::weng_lin::{weng_lin_multi_team, WengLinConfig, WengLinRating};
use skillratings::MultiTeamOutcome;

use fixtures::{assert_close, assert_skill, lineup, rated_teams};

#[test]
fn test_reference_values_in_finishing_order() {
    let model = BradleyTerryFull::new();
    let mut pool = vec![
        Skill::new(15.0, 4.1233),
        Skill::new(10.2, 9.220903),
        Skill::new(50.0, 2.1232),
    ];

    model.rank(lineup(&mut pool, &[vec![0, 1], vec![2]])).unwrap();

    assert_skill(&pool[0], &Skill::new(15.56496998825091, 4.118333035231164));
    assert_skill(&pool[1], &Skill::new(11.463437891876112, 9.19606319864965));
    assert_skill(&pool[2], &Skill::new(49.709081493208274, 2.122674670057498));
}

#[test]
fn test_reference_values_with_explicit_ranks() {
    let model = BradleyTerryFull::new();
    let prior = model.skill();
    let mut pool = vec![prior, prior];

    model
        .rank_with(lineup(&mut pool, &[vec![0], vec![1]]), &[2, 1])
        .unwrap();

    assert_skill(&pool[0], &Skill::new(22.36476861652635, 65.05239213865504));
    assert_skill(&pool[1], &Skill::new(27.63523138347365, 65.05239213865504));
}

#[test]
fn test_pool_rated_over_many_matches() {
    let model = BradleyTerryFull::new();
    let prior = model.skill();
    let mut pool = vec![prior; 6];

    // Hidden strength of player i is i; the stronger team always wins
    let rotations = [
        vec![vec![0, 1], vec![2, 3], vec![4, 5]],
        vec![vec![0, 5], vec![1, 4], vec![2, 3]],
        vec![vec![0, 3], vec![1, 5], vec![2, 4]],
        vec![vec![0, 2], vec![1, 3], vec![4, 5]],
        vec![vec![3, 5], vec![0, 4], vec![1, 2]],
    ];

    for round in 0..20 {
        let teams = &rotations[round % rotations.len()];
        let ranks: Vec<i64> = teams
            .iter()
            .map(|team| -(team.iter().sum::<usize>() as i64))
            .collect();

        model.rank_with(lineup(&mut pool, teams), &ranks).unwrap();
    }

    assert!(pool[5].mean > pool[0].mean);
    assert!(pool[4].mean > pool[1].mean);
    for skill in &pool {
        assert!(skill.variance > 0.0);
        assert!(skill.variance < prior.variance);
        assert!(skill.mean.is_finite());
    }
}

#[test]
fn test_uncertain_teammate_absorbs_more() {
    let model = BradleyTerryFull::new();
    let mut pool = vec![
        Skill::new(25.0, 4.0),
        Skill::new(25.0, 16.0),
        Skill::new(50.0, 20.0),
    ];

    model.rank(lineup(&mut pool, &[vec![0, 1], vec![2]])).unwrap();

    let certain_gain = pool[0].mean - 25.0;
    let uncertain_gain = pool[1].mean - 25.0;
    assert!(certain_gain > 0.0);
    assert_close(uncertain_gain, 4.0 * certain_gain, 1e-9);
}

#[test]
fn test_singleton_match_is_unchanged() {
    let model = BradleyTerryFull::new();
    let mut pool = vec![Skill::new(31.0, 7.5), Skill::new(12.0, 40.0)];

    model.rank(lineup(&mut pool, &[vec![0, 1]])).unwrap();

    assert_eq!(pool, vec![Skill::new(31.0, 7.5), Skill::new(12.0, 40.0)]);
}

#[test]
fn test_rejected_match_leaves_pool_untouched() {
    let model = BradleyTerryFull::new();
    let mut pool = vec![model.skill(), Skill::new(25.0, -2.0), model.skill()];

    let err = model
        .rank(lineup(&mut pool, &[vec![0], vec![1], vec![2]]))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RatingError>(),
        Some(RatingError::InvalidSkill { team: 1, .. })
    ));
    assert_eq!(pool[0], model.skill());
    assert_eq!(pool[2], model.skill());
}

#[test]
fn test_calculator_matches_in_place_update() {
    let model = BradleyTerryFull::new();
    let teams = rated_teams(&[
        &[("a", 28.0, 30.0), ("b", 22.0, 45.0)],
        &[("c", 25.0, 69.0)],
        &[("d", 19.0, 12.0), ("e", 33.0, 8.0), ("f", 24.0, 50.0)],
    ]);
    let ranks = [2, 1, 2];

    let changes = model.calculate_rating_changes(&teams, &ranks).unwrap();

    let mut pool: Vec<Skill> = teams.iter().flatten().map(|p| p.skill).collect();
    model
        .rank_with(
            lineup(&mut pool, &[vec![0, 1], vec![2], vec![3, 4, 5]]),
            &ranks,
        )
        .unwrap();

    assert_eq!(changes.len(), pool.len());
    for (change, skill) in changes.iter().zip(&pool) {
        assert_eq!(&change.new_skill, skill);
    }
}

#[test]
fn test_agrees_with_weng_lin_on_even_match() {
    let model = BradleyTerryFull::new();
    let prior: WengLinRating = model.skill().into();
    let config = WengLinConfig {
        beta: model.beta,
        uncertainty_tolerance: model.kappa,
    };

    let first = [prior];
    let second = [prior];
    let teams = [
        (&first[..], MultiTeamOutcome::new(1)),
        (&second[..], MultiTeamOutcome::new(2)),
    ];
    let expected = weng_lin_multi_team(&teams, &config);

    let mut pool = vec![model.skill(), model.skill()];
    model.rank(lineup(&mut pool, &[vec![0], vec![1]])).unwrap();

    for (skill, team) in pool.iter().zip(&expected) {
        let expected: Skill = team[0].into();
        assert_close(skill.mean, expected.mean, 1e-9);
        assert_close(skill.variance, expected.variance, 1e-9);
    }
}

#[test]
fn test_win_probability_complement() {
    let model = BradleyTerryFull::new();
    let a = vec![Skill::new(28.0, 30.0), Skill::new(24.0, 45.0)];
    let b = vec![Skill::new(26.0, 20.0)];

    let p = model.win_probability(&a, &b).unwrap();
    let q = model.win_probability(&b, &a).unwrap();

    assert!(p > 0.5);
    assert_close(p + q, 1.0, 1e-9);
}

#[test]
fn test_config_file_drives_model() {
    let path = std::env::temp_dir().join(format!(
        "pairwise-skill-config-{}.toml",
        std::process::id()
    ));
    std::fs::write(
        &path,
        "[model]\nmu = 1500.0\nsigma = 350.0\nbeta = 175.0\nkappa = 0.0001\n",
    )
    .unwrap();

    let config = AppConfig::from_file(&path);
    std::fs::remove_file(&path).unwrap();

    let model = config.unwrap().model;
    assert_eq!(model.initial_skill(), Skill::new(1500.0, 122500.0));
}
