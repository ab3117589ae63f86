// Box score for a single match: per-team rows ranked by PI, team totals and
// category leaders.

use crate::career::CategoryTotals;
use crate::outcome::{Outcome, TeamTotals};
use crate::pi::PiWeights;
use crate::stat_line::{lines_for_match, MatchId, StatCategory, StatLine, Team};
use serde::{Deserialize, Serialize};

/// A stat line with its match PI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxScoreRow {
    pub line: StatLine,
    pub pi: f64,
}

/// Per-team maximum of every category and of PI. Untracked values count as 0.
/// `pi` is the best PI actually scored, `None` for a team without rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamLeaders {
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub pi: Option<f64>,
}

impl TeamLeaders {
    fn from_rows(rows: &[BoxScoreRow]) -> Self {
        rows.iter().fold(TeamLeaders::default(), |acc, row| {
            let v = |x: Option<u32>| x.unwrap_or(0);
            TeamLeaders {
                points: acc.points.max(row.line.points),
                rebounds: acc.rebounds.max(v(row.line.rebounds)),
                assists: acc.assists.max(v(row.line.assists)),
                steals: acc.steals.max(v(row.line.steals)),
                blocks: acc.blocks.max(v(row.line.blocks)),
                turnovers: acc.turnovers.max(v(row.line.turnovers)),
                pi: Some(acc.pi.map_or(row.pi, |best| best.max(row.pi))),
            }
        })
    }

    pub fn get(&self, category: StatCategory) -> u32 {
        match category {
            StatCategory::Points => self.points,
            StatCategory::Rebounds => self.rebounds,
            StatCategory::Assists => self.assists,
            StatCategory::Steals => self.steals,
            StatCategory::Blocks => self.blocks,
            StatCategory::Turnovers => self.turnovers,
        }
    }
}

/// One side of the box score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBox {
    pub team: Team,
    pub score: u64,
    pub outcome: Outcome,
    /// Sorted by PI, highest first.
    pub rows: Vec<BoxScoreRow>,
    pub totals: CategoryTotals,
    pub leaders: TeamLeaders,
}

impl TeamBox {
    /// Whether `row` has the team's best PI. A team whose best PI is not
    /// positive has no top performer.
    pub fn is_top_performer(&self, row: &BoxScoreRow) -> bool {
        self.leaders
            .pi
            .is_some_and(|best| best > 0.0 && row.pi == best)
    }

    /// Whether `row` leads the team in `category`. Zero never leads, and
    /// turnovers are a penalty so nobody leads them.
    pub fn leads_category(&self, row: &BoxScoreRow, category: StatCategory) -> bool {
        if category == StatCategory::Turnovers {
            return false;
        }
        let best = self.leaders.get(category);
        best > 0 && row.line.get(category) == Some(best)
    }
}

/// Both sides of one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxScore {
    pub match_id: MatchId,
    pub weights: PiWeights,
    pub team_a: TeamBox,
    pub team_b: TeamBox,
}

impl BoxScore {
    /// Build the box score for `match_id` from the lines of `corpus`.
    ///
    /// A match with no lines produces two empty, tied teams.
    pub fn build(match_id: &MatchId, corpus: &[StatLine]) -> BoxScore {
        let lines: Vec<&StatLine> = lines_for_match(match_id, corpus).collect();
        let totals = TeamTotals::from_lines(lines.iter().copied());
        let weights = PiWeights::for_match(lines.iter().copied());
        let winning_score = totals.winning_score();

        let team_box = |team: Team| {
            let mut rows: Vec<BoxScoreRow> = lines
                .iter()
                .filter(|line| line.team == team)
                .map(|line| BoxScoreRow {
                    line: (*line).clone(),
                    pi: weights.score(line, winning_score),
                })
                .collect();
            rows.sort_by(|a, b| b.pi.total_cmp(&a.pi));
            let leaders = TeamLeaders::from_rows(&rows);
            TeamBox {
                team,
                score: totals.score(team),
                outcome: totals.outcome_for(team),
                totals: CategoryTotals::from_lines(rows.iter().map(|r| &r.line)),
                leaders,
                rows,
            }
        };

        BoxScore {
            match_id: match_id.clone(),
            weights,
            team_a: team_box(Team::A),
            team_b: team_box(Team::B),
        }
    }

    pub fn team(&self, team: Team) -> &TeamBox {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
