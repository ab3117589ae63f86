// The three presentation surfaces, joined with player and match identity.

use crate::data::{Corpus, MatchInfo};
use chrono::NaiveDate;
use courtside_core::box_score::BoxScore;
use courtside_core::career::{career_for, game_log};
use courtside_core::{
    build_leaderboard, sort_leaderboard, LeaderboardEntry, MatchId, Outcome, Player,
    PlayerCareerRecord, PlayerId, SortCategory, StatLine,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no player with id '{0}'")]
    UnknownPlayer(PlayerId),

    #[error("no match with id '{0}'")]
    UnknownMatch(MatchId),
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardView {
    pub category: SortCategory,
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardView {
    pub fn build(corpus: &Corpus, category: SortCategory) -> Self {
        let mut entries = build_leaderboard(&corpus.players, &corpus.stat_lines);
        sort_leaderboard(&mut entries, category);
        LeaderboardView { category, entries }
    }
}

// ---------------------------------------------------------------------------
// Player profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GameLogEntry {
    pub match_id: MatchId,
    pub match_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub outcome: Outcome,
    pub pi: f64,
    pub line: StatLine,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    pub player: Player,
    pub record: PlayerCareerRecord,
    /// Newest match first; matches without metadata go last.
    pub games: Vec<GameLogEntry>,
}

impl PlayerProfile {
    pub fn build(corpus: &Corpus, player_id: &PlayerId) -> Result<Self, LookupError> {
        let player = corpus
            .player(player_id)
            .ok_or_else(|| LookupError::UnknownPlayer(player_id.clone()))?;

        let mut games: Vec<GameLogEntry> = game_log(player_id, &corpus.stat_lines)
            .into_iter()
            .map(|row| {
                let info = corpus.match_info(&row.line.match_id);
                GameLogEntry {
                    match_id: row.line.match_id.clone(),
                    match_date: info.map(|m| m.match_date),
                    location: info.and_then(|m| m.location.clone()),
                    outcome: row.outcome,
                    pi: row.pi,
                    line: row.line,
                }
            })
            .collect();
        // Descending; undated games (None) end up last.
        games.sort_by(|a, b| b.match_date.cmp(&a.match_date));

        Ok(PlayerProfile {
            player: player.clone(),
            record: career_for(player_id, &corpus.stat_lines),
            games,
        })
    }
}

// ---------------------------------------------------------------------------
// Box score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct BoxScoreView {
    pub info: Option<MatchInfo>,
    pub player_names: BTreeMap<PlayerId, String>,
    pub box_score: BoxScore,
}

impl BoxScoreView {
    pub fn build(corpus: &Corpus, match_id: &MatchId) -> Result<Self, LookupError> {
        let info = corpus.match_info(match_id).cloned();
        let box_score = BoxScore::build(match_id, &corpus.stat_lines);
        if info.is_none() && box_score.team_a.rows.is_empty() && box_score.team_b.rows.is_empty() {
            return Err(LookupError::UnknownMatch(match_id.clone()));
        }

        let names = corpus.player_names();
        let player_names = box_score
            .team_a
            .rows
            .iter()
            .chain(&box_score.team_b.rows)
            .map(|row| {
                let id = &row.line.player_id;
                let name = names.get(id).copied().unwrap_or(id.as_str());
                (id.clone(), name.to_string())
            })
            .collect();

        Ok(BoxScoreView {
            info,
            player_names,
            box_score,
        })
    }

    pub fn name_of<'a>(&'a self, id: &'a PlayerId) -> &'a str {
        self.player_names
            .get(id)
            .map(String::as_str)
            .unwrap_or(id.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::{StatCategory, Team};

    fn pid(s: &str) -> PlayerId {
        PlayerId::new(s).unwrap()
    }

    fn mid(s: &str) -> MatchId {
        MatchId::new(s).unwrap()
    }

    fn corpus() -> Corpus {
        let player = |id: &str, name: &str| Player {
            id: pid(id),
            name: name.into(),
            avatar_url: None,
        };
        let info = |id: &str, day: u32| MatchInfo {
            id: mid(id),
            match_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            location: Some("Rec Center".into()),
        };
        let line = |p: &str, m: &str, team: Team, points: u32| {
            StatLine::new(pid(p), mid(m), team, points)
        };
        Corpus {
            players: vec![player("p1", "Ana"), player("p2", "Ben"), player("p3", "Cy")],
            matches: vec![info("m1", 1), info("m2", 8)],
            stat_lines: vec![
                line("p1", "m1", Team::A, 20).with(StatCategory::Rebounds, 5),
                line("p2", "m1", Team::B, 15),
                line("p1", "m2", Team::B, 6),
                line("p2", "m2", Team::A, 9),
                line("p1", "m9", Team::A, 4),
                line("ghost", "m2", Team::A, 1),
            ],
        }
    }

    #[test]
    fn leaderboard_view_is_sorted() {
        let view = LeaderboardView::build(&corpus(), SortCategory::Points);
        let ids: Vec<&str> = view.entries.iter().map(|e| e.player.id.as_str()).collect();
        // p1: 10.0, p2: 12.0, p3: no data
        assert_eq!(ids, vec!["p2", "p1", "p3"]);
    }

    #[test]
    fn profile_orders_games_newest_first_and_undated_last() {
        let profile = PlayerProfile::build(&corpus(), &pid("p1")).unwrap();
        let matches: Vec<&str> = profile.games.iter().map(|g| g.match_id.as_str()).collect();
        assert_eq!(matches, vec!["m2", "m1", "m9"]);
        assert_eq!(profile.games[0].outcome, Outcome::Lose);
        assert_eq!(profile.games[1].outcome, Outcome::Win);
        assert_eq!(profile.record.games_played, 3);
        assert_eq!(profile.games[1].location.as_deref(), Some("Rec Center"));
    }

    #[test]
    fn unknown_player_is_an_error() {
        assert!(matches!(
            PlayerProfile::build(&corpus(), &pid("nobody")),
            Err(LookupError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn box_score_view_names_players() {
        let view = BoxScoreView::build(&corpus(), &mid("m2")).unwrap();
        assert_eq!(view.name_of(&pid("p2")), "Ben");
        // Unrostered players fall back to their id.
        assert_eq!(view.name_of(&pid("ghost")), "ghost");
        assert_eq!(view.box_score.team_a.score, 10);
    }

    #[test]
    fn box_score_for_unknown_match_is_an_error() {
        assert!(matches!(
            BoxScoreView::build(&corpus(), &mid("m404")),
            Err(LookupError::UnknownMatch(_))
        ));
    }

    #[test]
    fn box_score_for_orphan_match_without_metadata() {
        let view = BoxScoreView::build(&corpus(), &mid("m9")).unwrap();
        assert!(view.info.is_none());
        assert_eq!(view.box_score.team_a.rows.len(), 1);
    }
}
