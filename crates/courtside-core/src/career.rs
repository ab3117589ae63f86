// Career aggregation: per-category averages, totals, W-L record and average PI.

use crate::outcome::{resolve_outcome, Outcome, OutcomeTally};
use crate::pi::compute_match_pi;
use crate::stat_line::{lines_for_player, PlayerId, StatCategory, StatLine};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Average
// ---------------------------------------------------------------------------

/// A per-category average, or the marker that the category was never tracked.
///
/// Serializes as a number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Average {
    Value(f64),
    NoData,
}

impl Average {
    /// `sum / count`, or `NoData` when nothing was counted.
    pub fn of(sum: u64, count: usize) -> Average {
        if count == 0 {
            Average::NoData
        } else {
            Average::Value(sum as f64 / count as f64)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Average::Value(v) => Some(v),
            Average::NoData => None,
        }
    }

    pub fn is_no_data(self) -> bool {
        matches!(self, Average::NoData)
    }
}

impl From<Option<f64>> for Average {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Average::NoData, Average::Value)
    }
}

impl From<Average> for Option<f64> {
    fn from(avg: Average) -> Self {
        avg.value()
    }
}

// ---------------------------------------------------------------------------
// Per-category accumulation
// ---------------------------------------------------------------------------

/// Running sum and tracked-line count for one category.
#[derive(Debug, Clone, Copy, Default)]
struct Tracked {
    sum: u64,
    count: usize,
}

impl Tracked {
    fn add(self, value: Option<u32>) -> Self {
        match value {
            Some(v) => Tracked {
                sum: self.sum + v as u64,
                count: self.count + 1,
            },
            None => self,
        }
    }

    fn average(self) -> Average {
        Average::of(self.sum, self.count)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    points: Tracked,
    rebounds: Tracked,
    assists: Tracked,
    steals: Tracked,
    blocks: Tracked,
    turnovers: Tracked,
    pi_sum: f64,
    games: usize,
    outcomes: OutcomeTally,
}

impl Accumulator {
    fn add(self, line: &StatLine, pi: f64, outcome: Outcome) -> Self {
        Accumulator {
            points: self.points.add(Some(line.points)),
            rebounds: self.rebounds.add(line.rebounds),
            assists: self.assists.add(line.assists),
            steals: self.steals.add(line.steals),
            blocks: self.blocks.add(line.blocks),
            turnovers: self.turnovers.add(line.turnovers),
            pi_sum: self.pi_sum + pi,
            games: self.games + 1,
            outcomes: self.outcomes.record(outcome),
        }
    }
}

// ---------------------------------------------------------------------------
// Public output types
// ---------------------------------------------------------------------------

/// Averages for the six categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverages {
    pub points: Average,
    pub rebounds: Average,
    pub assists: Average,
    pub steals: Average,
    pub blocks: Average,
    pub turnovers: Average,
}

impl CategoryAverages {
    pub fn get(&self, category: StatCategory) -> Average {
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

/// Summed values per category. Untracked values count as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub points: u64,
    pub rebounds: u64,
    pub assists: u64,
    pub steals: u64,
    pub blocks: u64,
    pub turnovers: u64,
}

impl CategoryTotals {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a StatLine>) -> Self {
        lines.into_iter().fold(CategoryTotals::default(), |acc, line| {
            let v = |x: Option<u32>| x.unwrap_or(0) as u64;
            CategoryTotals {
                points: acc.points + line.points as u64,
                rebounds: acc.rebounds + v(line.rebounds),
                assists: acc.assists + v(line.assists),
                steals: acc.steals + v(line.steals),
                blocks: acc.blocks + v(line.blocks),
                turnovers: acc.turnovers + v(line.turnovers),
            }
        })
    }

    pub fn get(&self, category: StatCategory) -> u64 {
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

/// Everything the player profile and leaderboard show for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCareerRecord {
    pub player_id: PlayerId,
    pub games_played: usize,
    pub wins: usize,
    pub losses: usize,
    /// Not part of the displayed record, kept so that
    /// `wins + losses + ties == games_played`.
    pub ties: usize,
    pub averages: CategoryAverages,
    pub totals: CategoryTotals,
    pub average_pi: f64,
}

impl PlayerCareerRecord {
    /// The record of a player with no stat lines.
    pub fn empty(player_id: PlayerId) -> Self {
        Self::from_accumulator(player_id, Accumulator::default(), CategoryTotals::default())
    }

    fn from_accumulator(player_id: PlayerId, acc: Accumulator, totals: CategoryTotals) -> Self {
        let average_pi = if acc.games == 0 {
            0.0
        } else {
            acc.pi_sum / acc.games as f64
        };
        PlayerCareerRecord {
            player_id,
            games_played: acc.games,
            wins: acc.outcomes.wins,
            losses: acc.outcomes.losses,
            ties: acc.outcomes.ties,
            averages: CategoryAverages {
                points: acc.points.average(),
                rebounds: acc.rebounds.average(),
                assists: acc.assists.average(),
                steals: acc.steals.average(),
                blocks: acc.blocks.average(),
                turnovers: acc.turnovers.average(),
            },
            totals,
            average_pi,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fold a player's stat lines into a career record.
///
/// Each line's PI and outcome are evaluated against the lines of its own
/// match in `corpus`. Lines in `player_lines` that belong to someone else are
/// ignored.
pub fn aggregate_career<'a>(
    player_id: &PlayerId,
    player_lines: impl IntoIterator<Item = &'a StatLine>,
    corpus: &[StatLine],
) -> PlayerCareerRecord {
    let lines: Vec<&StatLine> = player_lines
        .into_iter()
        .filter(|line| &line.player_id == player_id)
        .collect();

    let acc = lines.iter().fold(Accumulator::default(), |acc, line| {
        acc.add(
            line,
            compute_match_pi(line, corpus),
            resolve_outcome(line, corpus),
        )
    });
    let totals = CategoryTotals::from_lines(lines.iter().copied());

    PlayerCareerRecord::from_accumulator(player_id.clone(), acc, totals)
}

/// Career record for `player_id`, selecting their lines from `corpus`.
pub fn career_for(player_id: &PlayerId, corpus: &[StatLine]) -> PlayerCareerRecord {
    aggregate_career(player_id, lines_for_player(player_id, corpus), corpus)
}

// ---------------------------------------------------------------------------
// Game log
// ---------------------------------------------------------------------------

/// One row of a player's game log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogRow {
    pub line: StatLine,
    pub outcome: Outcome,
    pub pi: f64,
}

/// The player's lines, in corpus order, tagged with outcome and match PI.
pub fn game_log(player_id: &PlayerId, corpus: &[StatLine]) -> Vec<GameLogRow> {
    lines_for_player(player_id, corpus)
        .map(|line| GameLogRow {
            line: line.clone(),
            outcome: resolve_outcome(line, corpus),
            pi: compute_match_pi(line, corpus),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
