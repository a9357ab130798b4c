use anyhow::{Context, Result};
use chrono::Duration;

use nba_streamer::grid::{PlayerStats, WeekGrid, build_week_grid};
use nba_streamer::report::render_report;
use nba_streamer::season::{report_today, resolve_season, week_windows};
use nba_streamer::stats_api::{self, DefenseRatings};

const OUTPUT_FILE: &str = "fantasy_nba_report.html";

fn main() {
    dotenvy::dotenv().ok();
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    println!("Fantasy NBA streaming report generator");

    let today = report_today();
    let season = resolve_season(today);
    let windows = week_windows(today);
    let report_end = windows.last().map(|w| w.end).unwrap_or(today);
    println!("Report range: {today} to {report_end}");
    println!("Season: {season}");

    println!("Fetching schedule...");
    let schedule = stats_api::fetch_schedule(today, report_end, &season).unwrap_or_else(|err| {
        eprintln!("warning: schedule fetch failed, continuing without games: {err:#}");
        Vec::new()
    });
    if schedule.is_empty() {
        println!("warning: no games found for {season} in this date range");
    }

    println!("Fetching season player stats...");
    let season_stats = stats_api::fetch_player_stats(&season, None).unwrap_or_else(|err| {
        eprintln!("warning: season stats fetch failed: {err:#}");
        Vec::new()
    });
    println!("Fetching last-7 player stats...");
    let last7 = stats_api::fetch_player_stats(&season, Some(today - Duration::days(7)))
        .unwrap_or_else(|err| {
            eprintln!("warning: last-7 stats fetch failed: {err:#}");
            Vec::new()
        });
    println!("Fetching last-14 player stats...");
    let last14 = stats_api::fetch_player_stats(&season, Some(today - Duration::days(14)))
        .unwrap_or_else(|err| {
            eprintln!("warning: last-14 stats fetch failed: {err:#}");
            Vec::new()
        });

    println!("Fetching team defensive ratings...");
    let ratings = stats_api::fetch_team_defensive_ratings(&season).unwrap_or_else(|err| {
        eprintln!("warning: defensive ratings fetch failed, using neutral ranks: {err:#}");
        DefenseRatings::default()
    });

    let stats = PlayerStats {
        season: season_stats,
        last7,
        last14,
    };

    let grids: Vec<WeekGrid> = windows
        .iter()
        .map(|window| {
            println!(
                "Building week {} ({} - {})...",
                window.index, window.start, window.end
            );
            build_week_grid(*window, &schedule, &stats, &ratings)
        })
        .collect();

    let html = render_report(&grids);
    std::fs::write(OUTPUT_FILE, &html).with_context(|| format!("write {OUTPUT_FILE}"))?;
    println!("Report written: {OUTPUT_FILE}");

    let path = std::fs::canonicalize(OUTPUT_FILE).unwrap_or_else(|_| OUTPUT_FILE.into());
    if let Err(err) = webbrowser::open(&format!("file://{}", path.display())) {
        eprintln!("warning: could not open browser: {err}");
    }

    Ok(())
}
