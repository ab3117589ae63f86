// Outcome resolution: team point totals and win/lose/tie per stat line.

use crate::stat_line::{sibling_lines, StatLine, Team};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Team totals
// ---------------------------------------------------------------------------

/// Summed points for both sides of one match. An empty side scores 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub team_a: u64,
    pub team_b: u64,
}

impl TeamTotals {
    /// Sum points per team. The caller is responsible for passing lines of a
    /// single match.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a StatLine>) -> Self {
        lines.into_iter().fold(TeamTotals::default(), |mut acc, line| {
            match line.team {
                Team::A => acc.team_a += u64::from(line.points),
                Team::B => acc.team_b += u64::from(line.points),
            }
            acc
        })
    }

    pub fn score(&self, team: Team) -> u64 {
        match team {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }

    /// The higher of the two scores.
    pub fn winning_score(&self) -> u64 {
        self.team_a.max(self.team_b)
    }

    /// How `team` fared against the other side.
    pub fn outcome_for(&self, team: Team) -> Outcome {
        Outcome::from_scores(self.score(team), self.score(team.opponent()))
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a match from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    pub fn from_scores(own: u64, opponent: u64) -> Outcome {
        match own.cmp(&opponent) {
            Ordering::Greater => Outcome::Win,
            Ordering::Less => Outcome::Lose,
            Ordering::Equal => Outcome::Tie,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Win => "W",
            Outcome::Lose => "L",
            Outcome::Tie => "T",
        })
    }
}

/// Resolve win/lose/tie for `line` by comparing its team's total against the
/// opponent's within the same match.
///
/// `match_lines` may be the match's lines or the whole corpus; only lines
/// sharing `line.match_id` are counted. An orphan line is scored as a match
/// where the opponent has 0.
pub fn resolve_outcome(line: &StatLine, match_lines: &[StatLine]) -> Outcome {
    let totals = TeamTotals::from_lines(sibling_lines(line, match_lines));
    totals.outcome_for(line.team)
}

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Win/loss/tie counts. Ties are kept so the three always add up to the
/// number of outcomes recorded, even though records display only W-L.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
}

impl OutcomeTally {
    pub fn record(mut self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Lose => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }
        self
    }

    pub fn total(&self) -> usize {
        self.wins + self.losses + self.ties
    }
}

impl FromIterator<Outcome> for OutcomeTally {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        iter.into_iter().fold(OutcomeTally::default(), OutcomeTally::record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
