// Library root: the stats aggregation engine for pickup-basketball box scores.
//
// Everything here is a pure function of an in-memory corpus of stat lines.
// Loading, persistence and rendering belong to the caller.

pub mod box_score;
pub mod career;
pub mod format;
pub mod leaderboard;
pub mod outcome;
pub mod pi;
pub mod stat_line;

pub use career::{aggregate_career, game_log, Average, PlayerCareerRecord};
pub use leaderboard::{build_leaderboard, sort_leaderboard, LeaderboardEntry, SortCategory};
pub use outcome::{resolve_outcome, Outcome};
pub use pi::{compute_match_pi, PiWeights};
pub use stat_line::{MatchId, Player, PlayerId, StatCategory, StatLine, Team};
