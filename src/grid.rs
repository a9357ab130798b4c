use std::collections::HashMap;

use chrono::NaiveDate;

use crate::season::WeekWindow;
use crate::stats_api::{DefenseRatings, Game, PlayerStatLine};

/// Display value for a stat or schedule cell with nothing behind it.
pub const MISSING_CELL: &str = "-";

/// Stat column order shared by the season, L7 and L14 groups.
pub const STAT_COLUMNS: [&str; 9] = [
    "MIN", "PTS", "REB", "AST", "3PM", "STL", "BLK", "FG%", "FT%",
];

/// Matchup difficulty color for an opponent's defensive rank, bucketed
/// in fives of six: 1-6 hardest (red) through 25-30 easiest (green).
pub fn color_for_rank(rank: u32) -> &'static str {
    match rank {
        0..=6 => "#ffcccc",
        7..=12 => "#ffe5cc",
        13..=18 => "#ffffcc",
        19..=24 => "#e5ffcc",
        _ => "#ccffcc",
    }
}

/// Pull (opponent, is_home) out of a matchup string. The opponent is
/// the third whitespace token ("GSW vs. LAL" / "GSW @ LAL"), home iff
/// the text contains "vs.". Inherited from the upstream row format.
pub fn parse_matchup(matchup: &str) -> Option<(&str, bool)> {
    let opponent = matchup.split_whitespace().nth(2)?;
    Some((opponent, matchup.contains("vs.")))
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpponentBadge {
    pub opponent: String,
    pub home: bool,
    pub def_rank: u32,
    pub color: &'static str,
}

impl OpponentBadge {
    pub fn prefix(&self) -> &'static str {
        if self.home { "vs" } else { "@" }
    }
}

/// One rendered stat value: the raw number the client sorts on and the
/// rounded/suffixed text the reader sees.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCell {
    pub sort: f64,
    pub display: String,
}

impl StatCell {
    pub fn missing() -> Self {
        Self {
            sort: 0.0,
            display: MISSING_CELL.to_string(),
        }
    }

    pub fn counting(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self {
                sort: v,
                display: format_number(v),
            },
            None => Self::missing(),
        }
    }

    /// Ratio in 0..=1 shown as a one-decimal percentage; the sort value
    /// is the same number without the "%" suffix.
    pub fn percentage(ratio: Option<f64>) -> Self {
        match ratio {
            Some(r) => {
                let pct = r * 100.0;
                Self {
                    sort: (pct * 10.0).round() / 10.0,
                    display: format!("{pct:.1}%"),
                }
            }
            None => Self::missing(),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Stat cells for one time window, ordered per `STAT_COLUMNS`.
#[derive(Debug, Clone)]
pub struct StatSet {
    pub cells: Vec<StatCell>,
}

impl StatSet {
    pub fn from_line(line: Option<&PlayerStatLine>) -> Self {
        let Some(line) = line else {
            return Self {
                cells: vec![StatCell::missing(); STAT_COLUMNS.len()],
            };
        };
        Self {
            cells: vec![
                StatCell::counting(line.minutes),
                StatCell::counting(line.points),
                StatCell::counting(line.rebounds),
                StatCell::counting(line.assists),
                StatCell::counting(line.threes_made),
                StatCell::counting(line.steals),
                StatCell::counting(line.blocks),
                StatCell::percentage(line.fg_pct),
                StatCell::percentage(line.ft_pct),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamWeekRow {
    pub team_id: u32,
    pub team_abbr: String,
    pub games: u32,
    pub days: Vec<Option<OpponentBadge>>,
}

#[derive(Debug, Clone)]
pub struct PlayerWeekRow {
    pub player_id: u64,
    pub player_name: String,
    pub team_abbr: String,
    pub games: u32,
    pub days: Vec<Option<OpponentBadge>>,
    pub season: StatSet,
    pub last7: StatSet,
    pub last14: StatSet,
}

/// The three stat tables of one report run. L7/L14 may be empty; the
/// season table anchors the player list.
#[derive(Debug, Clone, Default)]
pub struct PlayerStats {
    pub season: Vec<PlayerStatLine>,
    pub last7: Vec<PlayerStatLine>,
    pub last14: Vec<PlayerStatLine>,
}

#[derive(Debug, Clone)]
pub struct WeekGrid {
    pub window: WeekWindow,
    pub day_labels: Vec<String>,
    pub teams: Vec<TeamWeekRow>,
    pub players: Vec<PlayerWeekRow>,
}

pub fn build_week_grid(
    window: WeekWindow,
    schedule: &[Game],
    stats: &PlayerStats,
    ratings: &DefenseRatings,
) -> WeekGrid {
    let days = window.days();
    let day_labels: Vec<String> = days
        .iter()
        .map(|d| d.format("%a (%m/%d)").to_string())
        .collect();

    let mut team_order: Vec<(u32, String)> = Vec::new();
    let mut games_by_team: HashMap<u32, HashMap<NaiveDate, &Game>> = HashMap::new();
    for game in schedule
        .iter()
        .filter(|g| g.date >= window.start && g.date <= window.end)
    {
        if !games_by_team.contains_key(&game.team_id) {
            team_order.push((game.team_id, game.team_abbr.clone()));
        }
        games_by_team
            .entry(game.team_id)
            .or_default()
            .insert(game.date, game);
    }

    let mut teams: Vec<TeamWeekRow> = team_order
        .into_iter()
        .map(|(team_id, team_abbr)| {
            let team_games = &games_by_team[&team_id];
            let cells: Vec<Option<OpponentBadge>> = days
                .iter()
                .map(|day| {
                    team_games
                        .get(day)
                        .copied()
                        .and_then(|game| badge_for_game(game, ratings))
                })
                .collect();
            TeamWeekRow {
                team_id,
                team_abbr,
                games: team_games.len() as u32,
                days: cells,
            }
        })
        .collect();
    // More games first: volume is what streaming is about.
    teams.sort_by(|a, b| b.games.cmp(&a.games));

    let schedule_by_abbr: HashMap<&str, &TeamWeekRow> = teams
        .iter()
        .map(|row| (row.team_abbr.as_str(), row))
        .collect();
    let l7_by_id: HashMap<u64, &PlayerStatLine> = stats
        .last7
        .iter()
        .map(|line| (line.player_id, line))
        .collect();
    let l14_by_id: HashMap<u64, &PlayerStatLine> = stats
        .last14
        .iter()
        .map(|line| (line.player_id, line))
        .collect();

    let players: Vec<PlayerWeekRow> = stats
        .season
        .iter()
        .filter(|line| line.games_played > 0)
        .map(|line| {
            // A team without games this week keeps its players listed,
            // with blank day cells and a zero game count.
            let (games, day_cells) = match schedule_by_abbr.get(line.team_abbr.as_str()) {
                Some(row) => (row.games, row.days.clone()),
                None => (0, vec![None; days.len()]),
            };
            PlayerWeekRow {
                player_id: line.player_id,
                player_name: line.player_name.clone(),
                team_abbr: line.team_abbr.clone(),
                games,
                days: day_cells,
                season: StatSet::from_line(Some(line)),
                last7: StatSet::from_line(l7_by_id.get(&line.player_id).copied()),
                last14: StatSet::from_line(l14_by_id.get(&line.player_id).copied()),
            }
        })
        .collect();

    WeekGrid {
        window,
        day_labels,
        teams,
        players,
    }
}

fn badge_for_game(game: &Game, ratings: &DefenseRatings) -> Option<OpponentBadge> {
    let (opponent, home) = parse_matchup(&game.matchup)?;
    let def_rank = ratings.rank_for(opponent);
    Some(OpponentBadge {
        opponent: opponent.to_string(),
        home,
        def_rank,
        color: color_for_rank(def_rank),
    })
}
