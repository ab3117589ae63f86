// Corpus loading from CSV exports of the league database.
//
// Three files: players.csv (id,name,avatar_url), matches.csv
// (id,match_date,location) and stat_lines.csv (player_id,match_id,team,points,
// rebounds,assists,steals,blocks,turnovers). An empty optional stat cell means
// the category was not tracked for that line.

use crate::config::DataPaths;
use chrono::NaiveDate;
use courtside_core::{MatchId, Player, PlayerId, StatLine, Team};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Match metadata used to order and label game logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub id: MatchId,
    pub match_date: NaiveDate,
    pub location: Option<String>,
}

/// One consistent snapshot of everything the engine needs.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub players: Vec<Player>,
    pub matches: Vec<MatchInfo>,
    pub stat_lines: Vec<StatLine>,
}

impl Corpus {
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn match_info(&self, id: &MatchId) -> Option<&MatchInfo> {
        self.matches.iter().find(|m| &m.id == id)
    }

    /// Player id to display name, for rendering stat lines.
    pub fn player_names(&self) -> HashMap<&PlayerId, &str> {
        self.players
            .iter()
            .map(|p| (&p.id, p.name.as_str()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required column `{column}`")]
    MissingColumn { path: String, column: &'static str },

    #[error("invalid stat line at row {row}: {message}")]
    InvalidStatLine { row: usize, message: String },
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPlayer {
    id: String,
    name: String,
    #[serde(default)]
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    id: String,
    match_date: NaiveDate,
    #[serde(default)]
    location: Option<String>,
}

/// Every column is optional at the serde level so a missing mandatory value
/// surfaces as a contract violation with its row number rather than a
/// generic deserialization error.
#[derive(Debug, Deserialize)]
struct RawStatLine {
    #[serde(default)]
    player_id: String,
    #[serde(default)]
    match_id: String,
    #[serde(default)]
    team: String,
    points: Option<u32>,
    rebounds: Option<u32>,
    assists: Option<u32>,
    steals: Option<u32>,
    blocks: Option<u32>,
    turnovers: Option<u32>,
}

impl RawStatLine {
    fn into_stat_line(self, row: usize) -> Result<StatLine, CorpusError> {
        let invalid = |message: String| CorpusError::InvalidStatLine { row, message };

        let player_id = PlayerId::new(self.player_id).map_err(|e| invalid(e.to_string()))?;
        let match_id = MatchId::new(self.match_id).map_err(|e| invalid(e.to_string()))?;
        let team = self
            .team
            .parse::<Team>()
            .map_err(|e| invalid(e.to_string()))?;
        let points = self
            .points
            .ok_or_else(|| invalid("points is required".into()))?;

        Ok(StatLine {
            player_id,
            match_id,
            team,
            points,
            rebounds: self.rebounds,
            assists: self.assists,
            steals: self.steals,
            blocks: self.blocks,
            turnovers: self.turnovers,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

/// Fail when the header row lacks any of `columns`, so a mislabelled export
/// is reported instead of loading as nothing.
fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    columns: &[&'static str],
    path: &str,
) -> Result<(), CorpusError> {
    let headers = reader.headers().map_err(|e| CorpusError::Csv {
        path: path.to_string(),
        source: e,
    })?;
    for &column in columns {
        if !headers.iter().any(|h| h.trim() == column) {
            return Err(CorpusError::MissingColumn {
                path: path.to_string(),
                column,
            });
        }
    }
    Ok(())
}

/// Roster rows that cannot be parsed are skipped: they only affect identity.
fn load_players_from_reader<R: Read>(rdr: R, path: &str) -> Result<Vec<Player>, CorpusError> {
    let mut reader = csv::Reader::from_reader(rdr);
    require_columns(&mut reader, &["id", "name"], path)?;
    let mut players = Vec::new();
    let mut seen = HashSet::new();
    for result in reader.deserialize::<RawPlayer>() {
        match result {
            Ok(raw) => {
                let id = match PlayerId::new(raw.id) {
                    Ok(id) => id,
                    Err(e) => {
                        warn!("skipping player '{}': {}", raw.name.trim(), e);
                        continue;
                    }
                };
                if !seen.insert(id.clone()) {
                    warn!("duplicate player id '{}', keeping the first row", id);
                    continue;
                }
                players.push(Player {
                    id,
                    name: raw.name.trim().to_string(),
                    avatar_url: non_blank(raw.avatar_url),
                });
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

fn load_matches_from_reader<R: Read>(rdr: R, path: &str) -> Result<Vec<MatchInfo>, CorpusError> {
    let mut reader = csv::Reader::from_reader(rdr);
    require_columns(&mut reader, &["id", "match_date"], path)?;
    let mut matches = Vec::new();
    for result in reader.deserialize::<RawMatch>() {
        match result {
            Ok(raw) => match MatchId::new(raw.id) {
                Ok(id) => matches.push(MatchInfo {
                    id,
                    match_date: raw.match_date,
                    location: non_blank(raw.location),
                }),
                Err(e) => warn!("skipping match row: {}", e),
            },
            Err(e) => {
                warn!("skipping malformed match row: {}", e);
            }
        }
    }
    Ok(matches)
}

/// Stat rows are never skipped; any bad row fails the whole load.
fn load_stat_lines_from_reader<R: Read>(rdr: R, path: &str) -> Result<Vec<StatLine>, CorpusError> {
    let mut reader = csv::Reader::from_reader(rdr);
    require_columns(&mut reader, &["player_id", "match_id", "team", "points"], path)?;
    let mut lines = Vec::new();
    for (idx, result) in reader.deserialize::<RawStatLine>().enumerate() {
        let raw = result.map_err(|e| CorpusError::Csv {
            path: path.to_string(),
            source: e,
        })?;
        // Data rows count from 1; the header is not a row.
        lines.push(raw.into_stat_line(idx + 1)?);
    }
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, CorpusError> {
    std::fs::File::open(path).map_err(|e| CorpusError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

pub fn load_players(path: &Path) -> Result<Vec<Player>, CorpusError> {
    load_players_from_reader(open(path)?, &path.display().to_string())
}

pub fn load_matches(path: &Path) -> Result<Vec<MatchInfo>, CorpusError> {
    load_matches_from_reader(open(path)?, &path.display().to_string())
}

pub fn load_stat_lines(path: &Path) -> Result<Vec<StatLine>, CorpusError> {
    load_stat_lines_from_reader(open(path)?, &path.display().to_string())
}

/// Load all three files and report dangling references.
pub fn load_all(paths: &DataPaths) -> Result<Corpus, CorpusError> {
    let corpus = Corpus {
        players: load_players(&paths.players)?,
        matches: load_matches(&paths.matches)?,
        stat_lines: load_stat_lines(&paths.stat_lines)?,
    };
    check_references(&corpus);
    debug!(
        players = corpus.players.len(),
        matches = corpus.matches.len(),
        stat_lines = corpus.stat_lines.len(),
        "corpus loaded"
    );
    Ok(corpus)
}

/// Stat lines for unknown players or matches still take part in match totals;
/// they are only reported.
fn check_references(corpus: &Corpus) {
    let players: HashSet<&PlayerId> = corpus.players.iter().map(|p| &p.id).collect();
    let matches: HashSet<&MatchId> = corpus.matches.iter().map(|m| &m.id).collect();
    for line in &corpus.stat_lines {
        if !players.contains(&line.player_id) {
            warn!(
                "stat line for match '{}' references unknown player '{}'",
                line.match_id, line.player_id
            );
        }
        if !matches.contains(&line.match_id) {
            warn!(
                "stat line for player '{}' references unknown match '{}'",
                line.player_id, line.match_id
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
