use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::http_client::http_client;
use crate::retry::RetryPolicy;

const STATS_BASE_URL: &str = "https://stats.nba.com/stats";

/// Rank assigned to teams missing from the defensive ratings table.
pub const NEUTRAL_DEF_RANK: u32 = 15;

/// One side of one scheduled game, as reported by leaguegamefinder.
/// The matchup string encodes the opponent and home/away
/// ("GSW vs. LAL" at home, "GSW @ LAL" on the road).
#[derive(Debug, Clone)]
pub struct Game {
    pub team_id: u32,
    pub team_abbr: String,
    pub date: NaiveDate,
    pub matchup: String,
}

/// Per-game averages for one player over one time window. Stats the
/// provider did not return stay `None` rather than failing the row.
#[derive(Debug, Clone, Default)]
pub struct PlayerStatLine {
    pub player_id: u64,
    pub player_name: String,
    pub team_id: u32,
    pub team_abbr: String,
    pub games_played: u32,
    pub minutes: Option<f64>,
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
    pub steals: Option<f64>,
    pub blocks: Option<f64>,
    pub threes_made: Option<f64>,
    pub fg_pct: Option<f64>,
    pub ft_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct DefRating {
    /// 1 = best defense = hardest matchup, 30 = easiest.
    pub rank: u32,
    pub rating: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DefenseRatings {
    by_abbr: HashMap<String, DefRating>,
}

impl DefenseRatings {
    pub fn rank_for(&self, abbr: &str) -> u32 {
        self.by_abbr
            .get(abbr)
            .map(|d| d.rank)
            .unwrap_or(NEUTRAL_DEF_RANK)
    }

    pub fn get(&self, abbr: &str) -> Option<DefRating> {
        self.by_abbr.get(abbr).copied()
    }

    pub fn len(&self) -> usize {
        self.by_abbr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_abbr.is_empty()
    }
}

// stats.nba.com wraps every endpoint in the same tabular envelope.
#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default, rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    headers: Vec<String>,
    #[serde(default, rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

/// First result set of a response, with lookups by column name. Columns
/// the provider dropped simply resolve to `None`.
struct ResultTable {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl ResultTable {
    fn from_body(raw: &str) -> Result<Option<ResultTable>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }
        let parsed: StatsResponse =
            serde_json::from_str(trimmed).context("invalid stats json")?;
        let Some(set) = parsed.result_sets.into_iter().next() else {
            return Ok(None);
        };
        let columns = set
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        Ok(Some(ResultTable {
            columns,
            rows: set.row_set,
        }))
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    fn value<'a>(&self, row: &'a [Value], name: &str) -> Option<&'a Value> {
        self.columns.get(name).and_then(|idx| row.get(*idx))
    }

    fn number(&self, row: &[Value], name: &str) -> Option<f64> {
        self.value(row, name).and_then(Value::as_f64)
    }

    fn integer(&self, row: &[Value], name: &str) -> Option<u64> {
        // Ids occasionally arrive as floats.
        self.value(row, name)
            .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f as u64)))
    }

    fn string<'a>(&self, row: &'a [Value], name: &str) -> Option<&'a str> {
        self.value(row, name).and_then(Value::as_str)
    }
}

pub fn fetch_schedule(start: NaiveDate, end: NaiveDate, season: &str) -> Result<Vec<Game>> {
    let url = format!(
        "{STATS_BASE_URL}/leaguegamefinder?LeagueID=00&PlayerOrTeam=T\
         &SeasonType=Regular%20Season&Season={season}&DateFrom={}&DateTo={}",
        date_param(start),
        date_param(end),
    );
    let body = fetch_stats_body("schedule", &url)?;
    parse_schedule_json(&body)
}

pub fn fetch_player_stats(
    season: &str,
    since: Option<NaiveDate>,
) -> Result<Vec<PlayerStatLine>> {
    let mut url = format!(
        "{STATS_BASE_URL}/leaguedashplayerstats?LeagueID=00&PerMode=PerGame\
         &SeasonType=Regular%20Season&Season={season}"
    );
    if let Some(since) = since {
        url.push_str(&format!("&DateFrom={}", date_param(since)));
    }
    let label = if since.is_some() {
        "trailing player stats"
    } else {
        "season player stats"
    };
    let body = fetch_stats_body(label, &url)?;
    parse_player_stats_json(&body)
}

pub fn fetch_team_defensive_ratings(season: &str) -> Result<DefenseRatings> {
    let url = format!(
        "{STATS_BASE_URL}/leaguedashteamstats?LeagueID=00&MeasureType=Advanced\
         &PerMode=PerGame&SeasonType=Regular%20Season&Season={season}"
    );
    let body = fetch_stats_body("team defensive ratings", &url)?;
    parse_team_ratings_json(&body)
}

fn fetch_stats_body(label: &str, url: &str) -> Result<String> {
    let client = http_client()?;
    RetryPolicy::default().run(label, || {
        let resp = client
            .get(url)
            .send()
            .with_context(|| format!("request {url}"))?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow!("http {status} for {label}"));
        }
        Ok(body)
    })
}

fn date_param(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

pub fn parse_schedule_json(raw: &str) -> Result<Vec<Game>> {
    let Some(table) = ResultTable::from_body(raw)? else {
        return Ok(Vec::new());
    };
    let mut games = Vec::new();
    for row in &table.rows {
        let Some(team_id) = table.integer(row, "TEAM_ID") else {
            continue;
        };
        let team_id = team_id as u32;
        let Some(date) = table.string(row, "GAME_DATE").and_then(parse_game_date) else {
            continue;
        };
        let team_abbr = table
            .string(row, "TEAM_ABBREVIATION")
            .map(str::to_string)
            .unwrap_or_else(|| team_abbreviation(team_id).to_string());
        games.push(Game {
            team_id,
            team_abbr,
            date,
            matchup: table.string(row, "MATCHUP").unwrap_or_default().to_string(),
        });
    }
    Ok(games)
}

fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    // Observed as ISO; older seasons report "NOV 15, 2025".
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%b %d, %Y"))
        .ok()
}

pub fn parse_player_stats_json(raw: &str) -> Result<Vec<PlayerStatLine>> {
    let Some(table) = ResultTable::from_body(raw)? else {
        return Ok(Vec::new());
    };
    let mut lines = Vec::new();
    for row in &table.rows {
        let Some(player_id) = table.integer(row, "PLAYER_ID") else {
            continue;
        };
        let team_id = table.integer(row, "TEAM_ID").unwrap_or(0) as u32;
        let team_abbr = table
            .string(row, "TEAM_ABBREVIATION")
            .map(str::to_string)
            .unwrap_or_else(|| team_abbreviation(team_id).to_string());
        lines.push(PlayerStatLine {
            player_id,
            player_name: table
                .string(row, "PLAYER_NAME")
                .unwrap_or_default()
                .to_string(),
            team_id,
            team_abbr,
            games_played: table.integer(row, "GP").unwrap_or(0) as u32,
            minutes: table.number(row, "MIN"),
            points: table.number(row, "PTS"),
            rebounds: table.number(row, "REB"),
            assists: table.number(row, "AST"),
            steals: table.number(row, "STL"),
            blocks: table.number(row, "BLK"),
            threes_made: table.number(row, "FG3M"),
            fg_pct: table.number(row, "FG_PCT"),
            ft_pct: table.number(row, "FT_PCT"),
        });
    }
    Ok(lines)
}

pub fn parse_team_ratings_json(raw: &str) -> Result<DefenseRatings> {
    let Some(table) = ResultTable::from_body(raw)? else {
        return Ok(DefenseRatings::default());
    };
    let has_def_rating = table.has_column("DEF_RATING");

    let mut teams: Vec<(String, f64, f64)> = Vec::new();
    for row in &table.rows {
        let Some(team_id) = table.integer(row, "TEAM_ID") else {
            continue;
        };
        let abbr = table
            .string(row, "TEAM_ABBREVIATION")
            .map(str::to_string)
            .unwrap_or_else(|| team_abbreviation(team_id as u32).to_string());
        let rating = table.number(row, "DEF_RATING").unwrap_or(0.0);
        let w_pct = table.number(row, "W_PCT").unwrap_or(0.0);
        teams.push((abbr, rating, w_pct));
    }

    if has_def_rating {
        // Lower rating = better defense = rank 1.
        teams.sort_by(|a, b| a.1.total_cmp(&b.1));
    } else {
        // No DEF_RATING column; win percentage as a proxy, best first.
        teams.sort_by(|a, b| b.2.total_cmp(&a.2));
    }

    let mut by_abbr = HashMap::new();
    for (idx, (abbr, rating, _)) in teams.into_iter().enumerate() {
        by_abbr.insert(
            abbr,
            DefRating {
                rank: (idx + 1) as u32,
                rating,
            },
        );
    }
    Ok(DefenseRatings { by_abbr })
}

const TEAM_ABBREVIATIONS: [(u32, &str); 30] = [
    (1610612737, "ATL"),
    (1610612738, "BOS"),
    (1610612739, "CLE"),
    (1610612740, "NOP"),
    (1610612741, "CHI"),
    (1610612742, "DAL"),
    (1610612743, "DEN"),
    (1610612744, "GSW"),
    (1610612745, "HOU"),
    (1610612746, "LAC"),
    (1610612747, "LAL"),
    (1610612748, "MIA"),
    (1610612749, "MIL"),
    (1610612750, "MIN"),
    (1610612751, "BKN"),
    (1610612752, "NYK"),
    (1610612753, "ORL"),
    (1610612754, "IND"),
    (1610612755, "PHI"),
    (1610612756, "PHX"),
    (1610612757, "POR"),
    (1610612758, "SAC"),
    (1610612759, "SAS"),
    (1610612760, "OKC"),
    (1610612761, "TOR"),
    (1610612762, "UTA"),
    (1610612763, "MEM"),
    (1610612764, "WAS"),
    (1610612765, "DET"),
    (1610612766, "CHA"),
];

pub fn team_abbreviation(team_id: u32) -> &'static str {
    TEAM_ABBREVIATIONS
        .iter()
        .find(|(id, _)| *id == team_id)
        .map(|(_, abbr)| *abbr)
        .unwrap_or("UNK")
}
