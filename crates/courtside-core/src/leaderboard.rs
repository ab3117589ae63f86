// Leaderboard: career records for a whole roster, re-sortable by category.

use crate::career::{aggregate_career, Average, PlayerCareerRecord};
use crate::stat_line::{Player, PlayerId, StatLine};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// One roster player joined with their career record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: Player,
    pub record: PlayerCareerRecord,
}

/// Build one entry per roster player, in roster order.
///
/// Players without stat lines are included with an empty record. The output
/// carries every sortable value so [`sort_leaderboard`] never recomputes.
pub fn build_leaderboard(roster: &[Player], corpus: &[StatLine]) -> Vec<LeaderboardEntry> {
    let mut by_player: HashMap<&PlayerId, Vec<&StatLine>> = HashMap::new();
    for line in corpus {
        by_player.entry(&line.player_id).or_default().push(line);
    }

    let entries: Vec<LeaderboardEntry> = roster
        .iter()
        .map(|player| {
            let record = match by_player.get(&player.id) {
                Some(lines) => aggregate_career(&player.id, lines.iter().copied(), corpus),
                None => PlayerCareerRecord::empty(player.id.clone()),
            };
            LeaderboardEntry {
                player: player.clone(),
                record,
            }
        })
        .collect();

    debug!(
        players = entries.len(),
        stat_lines = corpus.len(),
        "built leaderboard"
    );
    entries
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown leaderboard category '{0}', expected one of points, rebounds, assists, steals, blocks, pi")]
pub struct UnknownCategory(pub String);

/// Categories the leaderboard can be ranked by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCategory {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    #[default]
    Pi,
}

impl SortCategory {
    pub const ALL: [SortCategory; 6] = [
        SortCategory::Points,
        SortCategory::Rebounds,
        SortCategory::Assists,
        SortCategory::Steals,
        SortCategory::Blocks,
        SortCategory::Pi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortCategory::Points => "Points",
            SortCategory::Rebounds => "Rebounds",
            SortCategory::Assists => "Assists",
            SortCategory::Steals => "Steals",
            SortCategory::Blocks => "Blocks",
            SortCategory::Pi => "PI",
        }
    }

    /// The value an entry is ranked by. PI is always present.
    pub fn key(self, record: &PlayerCareerRecord) -> Average {
        match self {
            SortCategory::Points => record.averages.points,
            SortCategory::Rebounds => record.averages.rebounds,
            SortCategory::Assists => record.averages.assists,
            SortCategory::Steals => record.averages.steals,
            SortCategory::Blocks => record.averages.blocks,
            SortCategory::Pi => Average::Value(record.average_pi),
        }
    }
}

impl FromStr for SortCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "points" | "pts" => Ok(SortCategory::Points),
            "rebounds" | "reb" => Ok(SortCategory::Rebounds),
            "assists" | "ast" => Ok(SortCategory::Assists),
            "steals" | "stl" => Ok(SortCategory::Steals),
            "blocks" | "blk" => Ok(SortCategory::Blocks),
            "pi" => Ok(SortCategory::Pi),
            _ => Err(UnknownCategory(s.trim().to_string())),
        }
    }
}

impl fmt::Display for SortCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortCategory::Points => "points",
            SortCategory::Rebounds => "rebounds",
            SortCategory::Assists => "assists",
            SortCategory::Steals => "steals",
            SortCategory::Blocks => "blocks",
            SortCategory::Pi => "pi",
        })
    }
}

/// Descending order with `NoData` below every value.
fn compare_desc(a: Average, b: Average) -> Ordering {
    match (a, b) {
        (Average::Value(x), Average::Value(y)) => y.total_cmp(&x),
        (Average::Value(_), Average::NoData) => Ordering::Less,
        (Average::NoData, Average::Value(_)) => Ordering::Greater,
        (Average::NoData, Average::NoData) => Ordering::Equal,
    }
}

/// Rank entries by `category`, highest first. Equal keys keep their
/// relative order.
pub fn sort_leaderboard(entries: &mut [LeaderboardEntry], category: SortCategory) {
    entries.sort_by(|a, b| compare_desc(category.key(&a.record), category.key(&b.record)));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
