use chrono::NaiveDate;
use nba_streamer::grid::{PlayerStats, build_week_grid};
use nba_streamer::report::render_report;
use nba_streamer::season::week_windows;
use nba_streamer::stats_api::{DefenseRatings, Game, PlayerStatLine};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn sample_report() -> String {
    let windows = week_windows(date(2025, 11, 12));
    let schedule = vec![
        Game {
            team_id: 1610612744,
            team_abbr: "GSW".to_string(),
            date: date(2025, 11, 12),
            matchup: "GSW vs. LAL".to_string(),
        },
        Game {
            team_id: 1610612747,
            team_abbr: "LAL".to_string(),
            date: date(2025, 11, 12),
            matchup: "LAL @ GSW".to_string(),
        },
    ];
    let stats = PlayerStats {
        season: vec![PlayerStatLine {
            player_id: 201939,
            player_name: "Stephen Curry".to_string(),
            team_abbr: "GSW".to_string(),
            games_played: 11,
            points: Some(27.2),
            fg_pct: Some(0.457),
            ..Default::default()
        }],
        ..Default::default()
    };
    let ratings = DefenseRatings::default();
    let grids: Vec<_> = windows
        .iter()
        .map(|w| build_week_grid(*w, &schedule, &stats, &ratings))
        .collect();
    render_report(&grids)
}

#[test]
fn report_is_self_contained() {
    let html = sample_report();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<style>"));
    assert!(html.contains("<script>"));
    // No external assets.
    assert!(!html.contains("https://cdn."));
    assert!(!html.contains("src=\"http"));
}

#[test]
fn report_has_four_week_tabs() {
    let html = sample_report();
    for n in 1..=4 {
        assert!(html.contains(&format!("data-week=\"week{n}\"")));
        assert!(html.contains(&format!("id=\"week{n}\"")));
    }
    // Only week 1 starts visible.
    assert_eq!(html.matches("class=\"tabcontent\" style=\"display:block\"").count(), 1);
    assert_eq!(html.matches("class=\"tabcontent\" style=\"display:none\"").count(), 3);
}

#[test]
fn stat_cells_expose_numeric_sort_values() {
    let html = sample_report();
    // FG% renders rounded text but sorts on the raw number.
    assert!(html.contains("data-sort=\"45.7\">45.7%</td>"));
    // PTS cell.
    assert!(html.contains("data-sort=\"27.2\">27.2</td>"));
}

#[test]
fn stat_groups_stack_with_only_season_visible() {
    let html = sample_report();
    assert!(html.contains("class=\"stat-season\" data-sort="));
    assert!(html.contains("class=\"stat-l7\" style=\"display:none\""));
    assert!(html.contains("class=\"stat-l14\" style=\"display:none\""));
    assert!(html.contains("data-period=\"season\""));
    assert!(html.contains("data-period=\"l7\""));
    assert!(html.contains("data-period=\"l14\""));
}

#[test]
fn team_rows_are_filter_targets() {
    let html = sample_report();
    assert!(html.contains("class=\"team-row\" data-team=\"GSW\""));
    assert!(html.contains("class=\"btn-reset\""));
}

#[test]
fn weeks_without_games_render_placeholders() {
    let html = sample_report();
    // Weeks 2-4 have no scheduled games in the sample.
    assert!(html.contains("No games scheduled this week."));
    // The lone player still renders in those weeks with a zero count.
    assert!(html.contains("data-sort=\"0\">0</td>"));
}

#[test]
fn empty_report_renders_no_data_placeholder() {
    let windows = week_windows(date(2025, 11, 12));
    let grids: Vec<_> = windows
        .iter()
        .map(|w| {
            build_week_grid(
                *w,
                &[],
                &PlayerStats::default(),
                &DefenseRatings::default(),
            )
        })
        .collect();
    let html = render_report(&grids);
    assert!(html.contains("No games scheduled and no player data for this week."));
}
