// Configuration loading and parsing (courtside.toml).

use courtside_core::SortCategory;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data_paths: DataPaths,
    pub leaderboard: LeaderboardConfig,
    pub output: OutputConfig,
}

/// Raw deserialization target for the whole file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    data: DataPaths,
    #[serde(default)]
    leaderboard: LeaderboardConfig,
    #[serde(default)]
    output: OutputConfig,
}

/// Locations of the CSV exports. Relative paths are resolved against the
/// directory holding the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: PathBuf,
    pub matches: PathBuf,
    pub stat_lines: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardConfig {
    #[serde(default)]
    pub default_sort: SortCategory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How command output is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text columns
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate the config file at `path`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    parse_config(&text, path, base_dir)
}

/// Parse config text. `path` is only used for error messages; data paths are
/// resolved against `base_dir`.
pub fn parse_config(text: &str, path: &Path, base_dir: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate(&file)?;

    let resolve = |p: &Path| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            base_dir.join(p)
        }
    };

    Ok(Config {
        data_paths: DataPaths {
            players: resolve(&file.data.players),
            matches: resolve(&file.data.matches),
            stat_lines: resolve(&file.data.stat_lines),
        },
        leaderboard: file.leaderboard,
        output: file.output,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(file: &ConfigFile) -> Result<(), ConfigError> {
    let paths: &[(&str, &Path)] = &[
        ("data.players", file.data.players.as_path()),
        ("data.matches", file.data.matches.as_path()),
        ("data.stat_lines", file.data.stat_lines.as_path()),
    ];
    for (field, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[data]
players = "data/players.csv"
matches = "data/matches.csv"
stat_lines = "/srv/exports/stat_lines.csv"

[leaderboard]
default_sort = "rebounds"

[output]
format = "json"
"#;

    fn parse(text: &str) -> Result<Config, ConfigError> {
        parse_config(text, Path::new("courtside.toml"), Path::new("/home/league"))
    }

    #[test]
    fn full_config_parses() {
        let config = parse(FULL).unwrap();
        assert_eq!(config.leaderboard.default_sort, SortCategory::Rebounds);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let config = parse(FULL).unwrap();
        assert_eq!(
            config.data_paths.players,
            PathBuf::from("/home/league/data/players.csv")
        );
        assert_eq!(
            config.data_paths.stat_lines,
            PathBuf::from("/srv/exports/stat_lines.csv")
        );
    }

    #[test]
    fn optional_sections_default() {
        let config = parse(
            r#"
[data]
players = "p.csv"
matches = "m.csv"
stat_lines = "s.csv"
"#,
        )
        .unwrap();
        assert_eq!(config.leaderboard.default_sort, SortCategory::Pi);
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn missing_data_section_is_parse_error() {
        let err = parse("[output]\nformat = \"table\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn unknown_sort_category_is_parse_error() {
        let text = FULL.replace("\"rebounds\"", "\"turnovers\"");
        assert!(matches!(parse(&text), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn empty_path_fails_validation() {
        let text = FULL.replace("\"data/matches.csv\"", "\"\"");
        match parse(&text) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "data.matches"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reported_with_path() {
        let err = load_config(Path::new("/definitely/not/here/courtside.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
