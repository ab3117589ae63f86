// Text and JSON rendering for the three surfaces.

use crate::config::OutputFormat;
use crate::views::{BoxScoreView, LeaderboardView, PlayerProfile};
use courtside_core::box_score::TeamBox;
use courtside_core::format::{format_average, format_count, format_pi, format_record, NO_DATA};
use courtside_core::{Outcome, StatCategory, Team};
use serde::Serialize;

const NAME_WIDTH: usize = 20;
const STAT_WIDTH: usize = 6;

/// Stat categories shown as box-score columns, in display order.
const BOX_COLUMNS: [StatCategory; 6] = StatCategory::ALL;

fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    table: impl FnOnce(&T) -> String,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value),
        OutputFormat::Table => Ok(table(value)),
    }
}

pub fn render_leaderboard(
    view: &LeaderboardView,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    render(view, format, leaderboard_table)
}

pub fn render_profile(
    profile: &PlayerProfile,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    render(profile, format, profile_table)
}

pub fn render_box_score(
    view: &BoxScoreView,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    render(view, format, box_score_table)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(width - 1).collect();
        short.push('~');
        short
    }
}

fn stat_header(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|l| format!("{l:>STAT_WIDTH$}"))
        .collect::<String>()
}

fn stat_cells(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("{v:>STAT_WIDTH$}"))
        .collect::<String>()
}

fn outcome_word(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "win",
        Outcome::Lose => "lose",
        Outcome::Tie => "tie",
    }
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

fn leaderboard_table(view: &LeaderboardView) -> String {
    let mut out = format!("Leaderboard (by {})\n", view.category.label());
    out.push_str(&format!(
        "{:>4}  {:<NAME_WIDTH$}{}\n",
        "#",
        "Player",
        stat_header(&["GP", "W-L", "PTS", "REB", "AST", "STL", "BLK", "PI"])
    ));

    if view.entries.is_empty() {
        out.push_str("  no players\n");
        return out;
    }

    for (idx, entry) in view.entries.iter().enumerate() {
        let r = &entry.record;
        let a = &r.averages;
        out.push_str(&format!(
            "{:>4}  {:<NAME_WIDTH$}{}\n",
            idx + 1,
            truncate(&entry.player.name, NAME_WIDTH),
            stat_cells(&[
                r.games_played.to_string(),
                format_record(r.wins, r.losses),
                format_average(a.points),
                format_average(a.rebounds),
                format_average(a.assists),
                format_average(a.steals),
                format_average(a.blocks),
                format_pi(r.average_pi),
            ])
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Player profile
// ---------------------------------------------------------------------------

fn profile_table(profile: &PlayerProfile) -> String {
    let r = &profile.record;
    let a = &r.averages;
    let mut out = format!("{}\n", profile.player.name);
    out.push_str(&format!(
        "Games {} | Record {} | PI {}\n\n",
        r.games_played,
        format_record(r.wins, r.losses),
        format_pi(r.average_pi)
    ));

    out.push_str(&format!("{:<10}{}\n", "", stat_header(&["PTS", "REB", "AST", "STL", "BLK", "TO"])));
    out.push_str(&format!(
        "{:<10}{}\n",
        "Average",
        stat_cells(&StatCategory::ALL.map(|c| format_average(a.get(c))))
    ));
    out.push_str(&format!(
        "{:<10}{}\n\n",
        "Total",
        stat_cells(&StatCategory::ALL.map(|c| r.totals.get(c).to_string()))
    ));

    out.push_str("Game log\n");
    if profile.games.is_empty() {
        out.push_str("  no games played\n");
        return out;
    }
    out.push_str(&format!(
        "{:<12}{:<16}{:<6}{}\n",
        "Date",
        "Location",
        "",
        stat_header(&["PTS", "REB", "AST", "STL", "BLK", "TO", "PI"])
    ));
    for game in &profile.games {
        let date = game
            .match_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| NO_DATA.to_string());
        let location = game.location.as_deref().unwrap_or(NO_DATA);
        let mut cells: Vec<String> = StatCategory::ALL
            .iter()
            .map(|c| format_count(game.line.get(*c)))
            .collect();
        cells.push(format_pi(game.pi));
        out.push_str(&format!(
            "{:<12}{:<16}{:<6}{}\n",
            date,
            truncate(location, 15),
            outcome_word(game.outcome),
            stat_cells(&cells)
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Box score
// ---------------------------------------------------------------------------

fn team_section(view: &BoxScoreView, team_box: &TeamBox, out: &mut String) {
    out.push_str(&format!(
        "{} {} ({})\n",
        team_box.team.label(),
        team_box.score,
        outcome_word(team_box.outcome)
    ));
    let mut labels: Vec<&str> = BOX_COLUMNS.iter().map(|c| c.abbrev()).collect();
    labels.insert(0, "PI");
    out.push_str(&format!("  {:<NAME_WIDTH$}{}\n", "Player", stat_header(&labels)));

    for row in &team_box.rows {
        let marker = if team_box.is_top_performer(row) { '*' } else { ' ' };
        let mut cells = vec![format_pi(row.pi)];
        cells.extend(BOX_COLUMNS.iter().map(|c| {
            let cell = format_count(row.line.get(*c));
            if team_box.leads_category(row, *c) {
                format!("{cell}*")
            } else {
                cell
            }
        }));
        out.push_str(&format!(
            "{marker} {:<NAME_WIDTH$}{}\n",
            truncate(view.name_of(&row.line.player_id), NAME_WIDTH),
            stat_cells(&cells)
        ));
    }

    let mut totals = vec![String::new()];
    totals.extend(BOX_COLUMNS.iter().map(|c| team_box.totals.get(*c).to_string()));
    out.push_str(&format!("  {:<NAME_WIDTH$}{}\n", "Totals", stat_cells(&totals)));
}

fn box_score_table(view: &BoxScoreView) -> String {
    let bs = &view.box_score;
    let mut out = format!("Match {}", bs.match_id);
    if let Some(info) = &view.info {
        out.push_str(&format!(" | {}", info.match_date.format("%Y-%m-%d")));
        if let Some(location) = &info.location {
            out.push_str(&format!(" | {location}"));
        }
    }
    out.push('\n');
    out.push_str(&format!(
        "{} {} - {} {}\n\n",
        Team::A.label(),
        bs.team_a.score,
        bs.team_b.score,
        Team::B.label()
    ));

    for team in Team::BOTH {
        team_section(view, bs.team(team), &mut out);
        out.push('\n');
    }

    out.push_str(&format!(
        "PI weights: points {:.1}, reb {:.2}, ast {:.2}, stl {:.2}, blk {:.2}, to -{:.2}\n",
        bs.weights.points_weight,
        bs.weights.rebounds,
        bs.weights.assists,
        bs.weights.steals,
        bs.weights.blocks,
        bs.weights.turnovers
    ));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Corpus, MatchInfo};
    use chrono::NaiveDate;
    use courtside_core::{MatchId, Player, PlayerId, SortCategory, StatLine};

    fn corpus() -> Corpus {
        let pid = |s: &str| PlayerId::new(s).unwrap();
        let m1 = MatchId::new("m1").unwrap();
        Corpus {
            players: vec![
                Player {
                    id: pid("p1"),
                    name: "Ana Diaz".into(),
                    avatar_url: None,
                },
                Player {
                    id: pid("p2"),
                    name: "Ben Cole".into(),
                    avatar_url: None,
                },
                Player {
                    id: pid("p3"),
                    name: "Cy Young-Marquez the Third".into(),
                    avatar_url: None,
                },
            ],
            matches: vec![MatchInfo {
                id: m1.clone(),
                match_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                location: Some("Rec Center".into()),
            }],
            stat_lines: vec![
                StatLine::new(pid("p1"), m1.clone(), Team::A, 20)
                    .with(StatCategory::Rebounds, 5)
                    .with(StatCategory::Assists, 3),
                StatLine::new(pid("p2"), m1, Team::B, 15),
            ],
        }
    }

    #[test]
    fn leaderboard_table_shows_dash_for_no_data() {
        let view = LeaderboardView::build(&corpus(), SortCategory::Pi);
        let text = render_leaderboard(&view, OutputFormat::Table).unwrap();
        assert!(text.starts_with("Leaderboard (by PI)"));
        let ana = text.lines().find(|l| l.contains("Ana Diaz")).unwrap();
        assert!(ana.contains("63.5"));
        assert!(ana.contains("1-0"));
        let ben = text.lines().find(|l| l.contains("Ben Cole")).unwrap();
        assert!(ben.contains(" -"));
        assert!(text.contains("Cy Young-Marquez th~"));
    }

    #[test]
    fn leaderboard_json_uses_null_for_no_data() {
        let view = LeaderboardView::build(&corpus(), SortCategory::Points);
        let json = render_leaderboard(&view, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["category"], "points");
        let ben = &value["entries"][1];
        assert_eq!(ben["player"]["name"], "Ben Cole");
        assert!(ben["record"]["averages"]["rebounds"].is_null());
        assert_eq!(ben["record"]["averages"]["points"], 15.0);
    }

    #[test]
    fn profile_table_lists_games() {
        let corpus = corpus();
        let profile = PlayerProfile::build(&corpus, &PlayerId::new("p1").unwrap()).unwrap();
        let text = render_profile(&profile, OutputFormat::Table).unwrap();
        assert!(text.contains("Record 1-0"));
        assert!(text.contains("2024-06-01"));
        assert!(text.contains("win"));
    }

    #[test]
    fn profile_table_without_games() {
        let corpus = corpus();
        let profile = PlayerProfile::build(&corpus, &PlayerId::new("p3").unwrap()).unwrap();
        let text = render_profile(&profile, OutputFormat::Table).unwrap();
        assert!(text.contains("no games played"));
    }

    #[test]
    fn box_score_table_marks_top_performer() {
        let corpus = corpus();
        let view = BoxScoreView::build(&corpus, &MatchId::new("m1").unwrap()).unwrap();
        let text = render_box_score(&view, OutputFormat::Table).unwrap();
        assert!(text.contains("Team A 20 - 15 Team B"));
        assert!(text.lines().any(|l| l.starts_with("* Ana Diaz")));
        assert!(text.contains("PI weights: points 50.0"));
    }
}
