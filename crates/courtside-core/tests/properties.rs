// Property tests for the aggregation engine over randomly generated corpora.

use courtside_core::career::career_for;
use courtside_core::stat_line::lines_for_match;
use courtside_core::{
    build_leaderboard, compute_match_pi, sort_leaderboard, Average, LeaderboardEntry, MatchId,
    Player, PlayerId, SortCategory, StatLine, Team,
};
use proptest::prelude::*;

const PLAYERS: usize = 6;
const MATCHES: usize = 4;

fn pid(i: usize) -> PlayerId {
    PlayerId::new(format!("p{i}")).unwrap()
}

fn roster() -> Vec<Player> {
    (0..PLAYERS)
        .map(|i| Player {
            id: pid(i),
            name: format!("Player {i}"),
            avatar_url: None,
        })
        .collect()
}

fn optional_stat() -> impl Strategy<Value = Option<u32>> {
    proptest::option::of(0u32..15)
}

fn arb_stat_line() -> impl Strategy<Value = StatLine> {
    (
        0..PLAYERS,
        0..MATCHES,
        any::<bool>(),
        0u32..40,
        optional_stat(),
        optional_stat(),
        optional_stat(),
        optional_stat(),
        optional_stat(),
    )
        .prop_map(
            |(p, m, team_a, points, rebounds, assists, steals, blocks, turnovers)| StatLine {
                player_id: pid(p),
                match_id: MatchId::new(format!("m{m}")).unwrap(),
                team: if team_a { Team::A } else { Team::B },
                points,
                rebounds,
                assists,
                steals,
                blocks,
                turnovers,
            },
        )
}

fn arb_corpus() -> impl Strategy<Value = Vec<StatLine>> {
    proptest::collection::vec(arb_stat_line(), 0..30)
}

fn points_keys(entries: &[LeaderboardEntry]) -> Vec<Option<f64>> {
    entries
        .iter()
        .map(|e| SortCategory::Points.key(&e.record).value())
        .collect()
}

fn sorted_ids(entries: &[LeaderboardEntry]) -> Vec<String> {
    let mut ids: Vec<String> = entries.iter().map(|e| e.player.id.to_string()).collect();
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn career_is_deterministic(corpus in arb_corpus(), p in 0..PLAYERS) {
        let first = career_for(&pid(p), &corpus);
        let second = career_for(&pid(p), &corpus);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn outcomes_partition_games(corpus in arb_corpus(), p in 0..PLAYERS) {
        let record = career_for(&pid(p), &corpus);
        prop_assert_eq!(record.wins + record.losses + record.ties, record.games_played);
    }

    #[test]
    fn points_average_present_iff_games_played(corpus in arb_corpus(), p in 0..PLAYERS) {
        let record = career_for(&pid(p), &corpus);
        prop_assert_eq!(record.averages.points.is_no_data(), record.games_played == 0);
    }

    #[test]
    fn match_pi_is_finite_and_local_to_its_match(corpus in arb_corpus()) {
        for line in &corpus {
            let pi = compute_match_pi(line, &corpus);
            prop_assert!(pi.is_finite());

            let match_only: Vec<StatLine> =
                lines_for_match(&line.match_id, &corpus).cloned().collect();
            let local = compute_match_pi(line, &match_only);
            prop_assert!((pi - local).abs() < 1e-9);
        }
    }

    #[test]
    fn scoreless_matches_score_zero(corpus in arb_corpus()) {
        let zeroed: Vec<StatLine> = corpus
            .into_iter()
            .map(|mut line| {
                line.points = 0;
                line.rebounds = None;
                line.assists = None;
                line.steals = None;
                line.blocks = None;
                line.turnovers = None;
                line
            })
            .collect();
        for line in &zeroed {
            prop_assert_eq!(compute_match_pi(line, &zeroed), 0.0);
        }
    }

    #[test]
    fn leaderboard_ignores_roster_order(
        corpus in arb_corpus(),
        shuffled in Just(roster()).prop_shuffle(),
    ) {
        let base = build_leaderboard(&roster(), &corpus);
        let other = build_leaderboard(&shuffled, &corpus);

        prop_assert_eq!(sorted_ids(&base), sorted_ids(&other));
        for entry in &other {
            let same = base.iter().find(|e| e.player.id == entry.player.id);
            prop_assert_eq!(Some(entry), same);
        }

        let mut base_ranked = base;
        let mut other_ranked = other;
        sort_leaderboard(&mut base_ranked, SortCategory::Points);
        sort_leaderboard(&mut other_ranked, SortCategory::Points);
        prop_assert_eq!(points_keys(&base_ranked), points_keys(&other_ranked));
    }

    #[test]
    fn sorted_leaderboard_is_descending_with_no_data_last(corpus in arb_corpus()) {
        let mut board = build_leaderboard(&roster(), &corpus);
        sort_leaderboard(&mut board, SortCategory::Rebounds);
        let keys: Vec<Average> = board
            .iter()
            .map(|e| SortCategory::Rebounds.key(&e.record))
            .collect();
        for pair in keys.windows(2) {
            match (pair[0], pair[1]) {
                (Average::Value(a), Average::Value(b)) => prop_assert!(a >= b),
                (Average::NoData, Average::Value(_)) => prop_assert!(false, "no data ranked above a value"),
                _ => {}
            }
        }
    }
}

#[test]
fn reference_scenario() {
    let m1 = MatchId::new("m1").unwrap();
    let corpus = vec![
        StatLine {
            rebounds: Some(5),
            assists: Some(3),
            ..StatLine::new(pid(1), m1.clone(), Team::A, 20)
        },
        StatLine::new(pid(2), m1, Team::B, 15),
    ];
    let p1 = career_for(&pid(1), &corpus);
    let p2 = career_for(&pid(2), &corpus);
    assert!((p1.average_pi - 63.5).abs() < 1e-9);
    assert!((p2.average_pi - 37.5).abs() < 1e-9);
    assert_eq!((p1.wins, p1.losses), (1, 0));
    assert_eq!((p2.wins, p2.losses), (0, 1));
}

#[test]
fn mixed_tracking_averages() {
    let corpus = vec![
        StatLine::new(pid(1), MatchId::new("m1").unwrap(), Team::A, 10),
        StatLine {
            rebounds: Some(4),
            ..StatLine::new(pid(1), MatchId::new("m2").unwrap(), Team::A, 20)
        },
    ];
    let record = career_for(&pid(1), &corpus);
    assert_eq!(record.averages.rebounds, Average::Value(4.0));
    assert_eq!(record.averages.points, Average::Value(15.0));
}
