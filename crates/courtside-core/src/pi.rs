// Match-level Performance Index (PI).
//
// Points are normalized against the match's winning score. The remaining
// categories add (or, for turnovers, subtract) a per-unit amount whose size
// depends on which categories were tracked in that match, so a match that only
// recorded points still produces scores on the same 0-100 scale.

use crate::outcome::TeamTotals;
use crate::stat_line::{sibling_lines, StatLine};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Weight pool constants
// ---------------------------------------------------------------------------

const POINTS_WEIGHT: f64 = 50.0;
const REBOUNDS_WEIGHT: f64 = 25.0;
const ASSISTS_WEIGHT: f64 = 25.0;
const STEALS_WEIGHT: f64 = 15.0;
const BLOCKS_WEIGHT: f64 = 15.0;

const REBOUNDS_SCALE: f64 = 6.0;
const ASSISTS_SCALE: f64 = 8.0;
const STEALS_SCALE: f64 = 7.0;
const BLOCKS_SCALE: f64 = 7.0;
/// Turnovers share the rebounds/assists pool share but never enlarge the pool.
const TURNOVERS_SCALE: f64 = 6.0;

// ---------------------------------------------------------------------------
// Tracked categories
// ---------------------------------------------------------------------------

/// Which optional categories were recorded for at least one line of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedCategories {
    pub rebounds: bool,
    pub assists: bool,
    pub steals: bool,
    pub blocks: bool,
    pub turnovers: bool,
}

impl TrackedCategories {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a StatLine>) -> Self {
        lines
            .into_iter()
            .fold(TrackedCategories::default(), |acc, line| TrackedCategories {
                rebounds: acc.rebounds || line.rebounds.is_some(),
                assists: acc.assists || line.assists.is_some(),
                steals: acc.steals || line.steals.is_some(),
                blocks: acc.blocks || line.blocks.is_some(),
                turnovers: acc.turnovers || line.turnovers.is_some(),
            })
    }
}

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Per-match PI weights.
///
/// `points_weight` is the score a player earns for matching the winning
/// score on their own. The multipliers are per unit of each category and are
/// 0 for categories the match did not track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PiWeights {
    pub total_weight: f64,
    pub points_weight: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
}

impl PiWeights {
    pub fn from_tracked(tracked: TrackedCategories) -> Self {
        let mut total_weight = POINTS_WEIGHT;
        if tracked.rebounds {
            total_weight += REBOUNDS_WEIGHT;
        }
        if tracked.assists {
            total_weight += ASSISTS_WEIGHT;
        }
        if tracked.steals {
            total_weight += STEALS_WEIGHT;
        }
        if tracked.blocks {
            total_weight += BLOCKS_WEIGHT;
        }

        let share = |on: bool, weight: f64, scale: f64| {
            if on {
                weight / total_weight * scale
            } else {
                0.0
            }
        };

        PiWeights {
            total_weight,
            points_weight: POINTS_WEIGHT / total_weight * 100.0,
            rebounds: share(tracked.rebounds, REBOUNDS_WEIGHT, REBOUNDS_SCALE),
            assists: share(tracked.assists, ASSISTS_WEIGHT, ASSISTS_SCALE),
            steals: share(tracked.steals, STEALS_WEIGHT, STEALS_SCALE),
            blocks: share(tracked.blocks, BLOCKS_WEIGHT, BLOCKS_SCALE),
            turnovers: share(tracked.turnovers, REBOUNDS_WEIGHT, TURNOVERS_SCALE),
        }
    }

    /// Weights for the match described by `lines`.
    pub fn for_match<'a>(lines: impl IntoIterator<Item = &'a StatLine>) -> Self {
        Self::from_tracked(TrackedCategories::from_lines(lines))
    }

    /// Score one line given its match's winning score.
    pub fn score(&self, line: &StatLine, winning_score: u64) -> f64 {
        let points = if winning_score > 0 {
            line.points as f64 / winning_score as f64 * self.points_weight
        } else {
            0.0
        };
        let per_unit = |value: Option<u32>, multiplier: f64| value.unwrap_or(0) as f64 * multiplier;

        points
            + per_unit(line.rebounds, self.rebounds)
            + per_unit(line.assists, self.assists)
            + per_unit(line.steals, self.steals)
            + per_unit(line.blocks, self.blocks)
            - per_unit(line.turnovers, self.turnovers)
    }
}

/// Compute the Performance Index for `line` within its match.
///
/// `match_lines` may be the match's lines or the whole corpus; only lines
/// sharing `line.match_id` are considered. A 0-0 match scores 0 for points
/// rather than dividing by zero.
pub fn compute_match_pi(line: &StatLine, match_lines: &[StatLine]) -> f64 {
    let siblings = sibling_lines(line, match_lines);
    let winning_score = TeamTotals::from_lines(siblings.iter().copied()).winning_score();
    PiWeights::for_match(siblings).score(line, winning_score)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
