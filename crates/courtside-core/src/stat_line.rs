// Shared data model: identifiers, teams, stat categories and the stat line itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Contract violations rejected while constructing model values.
///
/// The engine itself never fails; anything that would corrupt downstream
/// averages is refused here, at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatLineError {
    #[error("{field} must not be empty")]
    EmptyId { field: &'static str },

    #[error("unknown team '{0}', expected team_a or team_b")]
    UnknownTeam(String),
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier, trimming whitespace. Blank input is rejected.
            pub fn new(raw: impl Into<String>) -> Result<Self, StatLineError> {
                let raw = raw.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(StatLineError::EmptyId { field: $field });
                }
                if trimmed.len() == raw.len() {
                    Ok(Self(raw))
                } else {
                    Ok(Self(trimmed.to_string()))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = StatLineError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a rostered player.
    PlayerId,
    "player_id"
);

opaque_id!(
    /// Identifier of a recorded match.
    MatchId,
    "match_id"
);

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// The side a stat line was recorded for. Every match has exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "team_a", alias = "A")]
    A,
    #[serde(rename = "team_b", alias = "B")]
    B,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::A, Team::B];

    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::A => "Team A",
            Team::B => "Team B",
        }
    }
}

impl FromStr for Team {
    type Err = StatLineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "team_a" | "a" => Ok(Team::A),
            "team_b" | "b" => Ok(Team::B),
            _ => Err(StatLineError::UnknownTeam(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Team::A => "team_a",
            Team::B => "team_b",
        })
    }
}

// ---------------------------------------------------------------------------
// Stat categories
// ---------------------------------------------------------------------------

/// The six box-score categories the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatCategory {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
}

impl StatCategory {
    pub const ALL: [StatCategory; 6] = [
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
        StatCategory::Steals,
        StatCategory::Blocks,
        StatCategory::Turnovers,
    ];

    /// Box-score column abbreviation.
    pub fn abbrev(self) -> &'static str {
        match self {
            StatCategory::Points => "PTS",
            StatCategory::Rebounds => "REB",
            StatCategory::Assists => "AST",
            StatCategory::Steals => "STL",
            StatCategory::Blocks => "BLK",
            StatCategory::Turnovers => "TO",
        }
    }
}

// ---------------------------------------------------------------------------
// Stat line
// ---------------------------------------------------------------------------

/// One player's recorded performance in one match.
///
/// `points` is mandatory. The other categories are `None` when they were not
/// tracked for this line, which is different from a recorded zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub team: Team,
    pub points: u32,
    #[serde(default)]
    pub rebounds: Option<u32>,
    #[serde(default)]
    pub assists: Option<u32>,
    #[serde(default)]
    pub steals: Option<u32>,
    #[serde(default)]
    pub blocks: Option<u32>,
    #[serde(default)]
    pub turnovers: Option<u32>,
}

impl StatLine {
    /// A points-only line; chain [`StatLine::with`] to record other categories.
    pub fn new(player_id: PlayerId, match_id: MatchId, team: Team, points: u32) -> Self {
        StatLine {
            player_id,
            match_id,
            team,
            points,
            rebounds: None,
            assists: None,
            steals: None,
            blocks: None,
            turnovers: None,
        }
    }

    /// Record `value` for `category`.
    pub fn with(mut self, category: StatCategory, value: u32) -> Self {
        match category {
            StatCategory::Points => self.points = value,
            StatCategory::Rebounds => self.rebounds = Some(value),
            StatCategory::Assists => self.assists = Some(value),
            StatCategory::Steals => self.steals = Some(value),
            StatCategory::Blocks => self.blocks = Some(value),
            StatCategory::Turnovers => self.turnovers = Some(value),
        }
        self
    }

    /// The recorded value for a category, `None` when it was not tracked.
    /// Points are always tracked.
    pub fn get(&self, category: StatCategory) -> Option<u32> {
        match category {
            StatCategory::Points => Some(self.points),
            StatCategory::Rebounds => self.rebounds,
            StatCategory::Assists => self.assists,
            StatCategory::Steals => self.steals,
            StatCategory::Blocks => self.blocks,
            StatCategory::Turnovers => self.turnovers,
        }
    }
}

// ---------------------------------------------------------------------------
// Player identity
// ---------------------------------------------------------------------------

/// A rostered player, as supplied by the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// All lines in `corpus` recorded for `line`'s match.
///
/// `line` is always part of the result: if the corpus does not contain it
/// (an orphan, or a caller passing only the siblings) it is appended, so the
/// match is evaluated as if it held at least this one line.
pub fn sibling_lines<'a>(line: &'a StatLine, corpus: &'a [StatLine]) -> Vec<&'a StatLine> {
    let mut siblings: Vec<&StatLine> = corpus
        .iter()
        .filter(|s| s.match_id == line.match_id)
        .collect();
    if !siblings.iter().any(|s| *s == line) {
        trace!(
            match_id = %line.match_id,
            player_id = %line.player_id,
            siblings = siblings.len(),
            "stat line missing from its match corpus; including it"
        );
        siblings.push(line);
    }
    siblings
}

/// Iterate the lines of `corpus` belonging to `player_id`.
pub fn lines_for_player<'a>(
    player_id: &'a PlayerId,
    corpus: &'a [StatLine],
) -> impl Iterator<Item = &'a StatLine> + 'a {
    corpus.iter().filter(move |s| &s.player_id == player_id)
}

/// Iterate the lines of `corpus` belonging to `match_id`.
pub fn lines_for_match<'a>(
    match_id: &'a MatchId,
    corpus: &'a [StatLine],
) -> impl Iterator<Item = &'a StatLine> + 'a {
    corpus.iter().filter(move |s| &s.match_id == match_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
