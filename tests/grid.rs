use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use nba_streamer::grid::{
    MISSING_CELL, PlayerStats, STAT_COLUMNS, StatCell, build_week_grid, color_for_rank,
    parse_matchup,
};
use nba_streamer::season::week_windows;
use nba_streamer::stats_api::{
    DefenseRatings, Game, PlayerStatLine, parse_team_ratings_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn game(team_id: u32, abbr: &str, on: NaiveDate, matchup: &str) -> Game {
    Game {
        team_id,
        team_abbr: abbr.to_string(),
        date: on,
        matchup: matchup.to_string(),
    }
}

fn player(id: u64, name: &str, abbr: &str, gp: u32, pts: f64) -> PlayerStatLine {
    PlayerStatLine {
        player_id: id,
        player_name: name.to_string(),
        team_abbr: abbr.to_string(),
        games_played: gp,
        points: Some(pts),
        fg_pct: Some(0.457),
        ..Default::default()
    }
}

#[test]
fn rank_colors_use_five_buckets() {
    let colors: Vec<&str> = (1..=30).map(color_for_rank).collect();
    let mut distinct = colors.clone();
    distinct.dedup();
    assert_eq!(
        distinct,
        vec!["#ffcccc", "#ffe5cc", "#ffffcc", "#e5ffcc", "#ccffcc"]
    );

    // Boundaries sit at 6/12/18/24.
    assert_eq!(color_for_rank(6), "#ffcccc");
    assert_eq!(color_for_rank(7), "#ffe5cc");
    assert_eq!(color_for_rank(12), "#ffe5cc");
    assert_eq!(color_for_rank(13), "#ffffcc");
    assert_eq!(color_for_rank(18), "#ffffcc");
    assert_eq!(color_for_rank(19), "#e5ffcc");
    assert_eq!(color_for_rank(24), "#e5ffcc");
    assert_eq!(color_for_rank(25), "#ccffcc");
    assert_eq!(color_for_rank(30), "#ccffcc");
}

#[test]
fn matchup_token_parsing() {
    assert_eq!(parse_matchup("GSW vs. LAL"), Some(("LAL", true)));
    assert_eq!(parse_matchup("GSW @ BOS"), Some(("BOS", false)));
    assert_eq!(parse_matchup("GSW"), None);
    assert_eq!(parse_matchup(""), None);
}

#[test]
fn percentage_cells_keep_raw_sort_value() {
    let cell = StatCell::percentage(Some(0.457));
    assert_eq!(cell.display, "45.7%");
    assert_eq!(cell.sort, 45.7);

    let missing = StatCell::percentage(None);
    assert_eq!(missing.display, MISSING_CELL);
    assert_eq!(missing.sort, 0.0);
}

#[test]
fn counting_cells_round_display_only() {
    let cell = StatCell::counting(Some(27.25));
    assert_eq!(cell.display, "27.2");
    assert_eq!(cell.sort, 27.25);

    let whole = StatCell::counting(Some(11.0));
    assert_eq!(whole.display, "11");
}

#[test]
fn empty_schedule_yields_placeholder_grid() {
    let windows = week_windows(date(2025, 11, 12));
    let stats = PlayerStats {
        season: vec![player(1, "Stephen Curry", "GSW", 11, 27.2)],
        ..Default::default()
    };
    let ratings = DefenseRatings::default();

    let grid = build_week_grid(windows[0], &[], &stats, &ratings);

    assert!(grid.teams.is_empty());
    assert_eq!(grid.players.len(), 1);
    let row = &grid.players[0];
    assert_eq!(row.games, 0);
    assert_eq!(row.days.len(), grid.day_labels.len());
    assert!(row.days.iter().all(Option::is_none));
}

#[test]
fn player_without_trailing_stats_is_kept() {
    let windows = week_windows(date(2025, 11, 12));
    let stats = PlayerStats {
        season: vec![player(1, "Stephen Curry", "GSW", 11, 27.2)],
        last7: Vec::new(),
        last14: Vec::new(),
    };
    let grid = build_week_grid(windows[0], &[], &stats, &DefenseRatings::default());

    let row = &grid.players[0];
    assert_eq!(row.season.cells.len(), STAT_COLUMNS.len());
    assert_eq!(row.season.cells[1].sort, 27.2); // PTS
    assert!(row.last7.cells.iter().all(|c| c.display == MISSING_CELL));
    assert!(row.last14.cells.iter().all(|c| c.sort == 0.0));
}

#[test]
fn zero_gp_players_are_dropped() {
    let windows = week_windows(date(2025, 11, 12));
    let stats = PlayerStats {
        season: vec![
            player(1, "Stephen Curry", "GSW", 11, 27.2),
            player(2, "Deep Bench", "GSW", 0, 0.0),
        ],
        ..Default::default()
    };
    let grid = build_week_grid(windows[0], &[], &stats, &DefenseRatings::default());
    assert_eq!(grid.players.len(), 1);
    assert_eq!(grid.players[0].player_name, "Stephen Curry");
}

#[test]
fn teams_ordered_by_game_count() {
    let windows = week_windows(date(2025, 11, 12));
    let schedule = vec![
        game(1610612747, "LAL", date(2025, 11, 13), "LAL @ BOS"),
        game(1610612744, "GSW", date(2025, 11, 12), "GSW vs. LAL"),
        game(1610612744, "GSW", date(2025, 11, 14), "GSW @ DEN"),
        game(1610612744, "GSW", date(2025, 11, 16), "GSW vs. BOS"),
    ];
    let grid = build_week_grid(
        windows[0],
        &schedule,
        &PlayerStats::default(),
        &DefenseRatings::default(),
    );

    assert_eq!(grid.teams.len(), 2);
    assert_eq!(grid.teams[0].team_abbr, "GSW");
    assert_eq!(grid.teams[0].games, 3);
    assert_eq!(grid.teams[1].team_abbr, "LAL");
    assert_eq!(grid.teams[1].games, 1);
}

#[test]
fn badges_carry_opponent_rank_and_color() {
    let windows = week_windows(date(2025, 11, 12));
    let ratings =
        parse_team_ratings_json(&read_fixture("team_stats_advanced.json")).expect("parse");
    let schedule = vec![game(1610612747, "LAL", date(2025, 11, 12), "LAL @ OKC")];

    let grid = build_week_grid(windows[0], &schedule, &PlayerStats::default(), &ratings);

    let badge = grid.teams[0].days[0].as_ref().expect("badge on game day");
    assert_eq!(badge.opponent, "OKC");
    assert!(!badge.home);
    assert_eq!(badge.prefix(), "@");
    assert_eq!(badge.def_rank, 1);
    assert_eq!(badge.color, "#ffcccc");
    assert!(grid.teams[0].days[1].is_none());
}

#[test]
fn unknown_opponent_gets_neutral_badge() {
    let windows = week_windows(date(2025, 11, 12));
    let schedule = vec![game(1610612744, "GSW", date(2025, 11, 12), "GSW vs. SEA")];
    let grid = build_week_grid(
        windows[0],
        &schedule,
        &PlayerStats::default(),
        &DefenseRatings::default(),
    );

    let badge = grid.teams[0].days[0].as_ref().expect("badge on game day");
    assert_eq!(badge.def_rank, 15);
    assert_eq!(badge.color, "#ffffcc");
    assert_eq!(badge.prefix(), "vs");
}

#[test]
fn players_inherit_their_team_week() {
    let windows = week_windows(date(2025, 11, 12));
    let schedule = vec![
        game(1610612744, "GSW", date(2025, 11, 12), "GSW vs. LAL"),
        game(1610612744, "GSW", date(2025, 11, 14), "GSW @ DEN"),
    ];
    let stats = PlayerStats {
        season: vec![
            player(1, "Stephen Curry", "GSW", 11, 27.2),
            player(2, "Luka Doncic", "LAL", 9, 31.0),
        ],
        last7: vec![player(1, "Stephen Curry", "GSW", 3, 30.5)],
        ..Default::default()
    };
    let grid = build_week_grid(windows[0], &schedule, &stats, &DefenseRatings::default());

    let curry = grid
        .players
        .iter()
        .find(|p| p.player_id == 1)
        .expect("curry row");
    assert_eq!(curry.games, 2);
    assert!(curry.days[0].is_some());
    assert!(curry.days[1].is_none());
    assert_eq!(curry.last7.cells[1].sort, 30.5);

    // LAL has no games this window; its players stay listed with blanks.
    let luka = grid
        .players
        .iter()
        .find(|p| p.player_id == 2)
        .expect("luka row");
    assert_eq!(luka.games, 0);
    assert!(luka.days.iter().all(Option::is_none));
    assert!(luka.last7.cells.iter().all(|c| c.display == MISSING_CELL));
}
