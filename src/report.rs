use crate::grid::{OpponentBadge, STAT_COLUMNS, StatSet, WeekGrid};

/// Render the whole report as one self-contained HTML document: embedded
/// styles, embedded script, no external assets.
pub fn render_report(weeks: &[WeekGrid]) -> String {
    let tabs: String = weeks
        .iter()
        .map(|week| {
            let active = if week.window.index == 1 { " active" } else { "" };
            format!(
                r#"<button class="tablinks{active}" data-week="week{n}">{label}</button>"#,
                n = week.window.index,
                label = html_escape(&week.window.label()),
            )
        })
        .collect();

    let contents: String = weeks
        .iter()
        .map(|week| {
            let display = if week.window.index == 1 { "block" } else { "none" };
            format!(
                r#"<div id="week{n}" class="tabcontent" style="display:{display}">
{body}
</div>"#,
                n = week.window.index,
                body = render_week(week),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Fantasy NBA Streaming Assistant</title>
<style>{css}</style>
</head>
<body>
<div class="container">
<h1>Fantasy NBA Streaming Assistant</h1>
{legend}
<div class="tab">{tabs}</div>
{contents}
</div>
<script>{js}</script>
</body>
</html>
"#,
        css = inline_css(),
        js = inline_js(),
        legend = render_legend(),
    )
}

fn render_legend() -> String {
    use crate::grid::color_for_rank;
    format!(
        r#"<div class="legend"><b>Matchup difficulty (opponent defensive rank):</b>
<span class="dot" style="background-color:{hard}"></span>1-6 hard
<span class="dot" style="background-color:{c2}"></span>7-12
<span class="dot" style="background-color:{c3}"></span>13-18
<span class="dot" style="background-color:{c4}"></span>19-24
<span class="dot" style="background-color:{easy}"></span>25-30 easy</div>"#,
        hard = color_for_rank(1),
        c2 = color_for_rank(7),
        c3 = color_for_rank(13),
        c4 = color_for_rank(19),
        easy = color_for_rank(25),
    )
}

fn render_week(week: &WeekGrid) -> String {
    if week.teams.is_empty() && week.players.is_empty() {
        return r#"<p class="no-data">No games scheduled and no player data for this week.</p>"#
            .to_string();
    }

    let team_section = if week.teams.is_empty() {
        r#"<p class="no-data">No games scheduled this week.</p>"#.to_string()
    } else {
        render_team_table(week)
    };
    let player_section = if week.players.is_empty() {
        r#"<p class="no-data">No player stats available.</p>"#.to_string()
    } else {
        render_player_table(week)
    };

    format!("{team_section}\n<hr>\n{player_section}")
}

fn render_team_table(week: &WeekGrid) -> String {
    let headers: String = week
        .day_labels
        .iter()
        .map(|d| format!("<th>{}</th>", html_escape(d)))
        .collect();

    let mut rows = String::new();
    for team in &week.teams {
        rows.push_str(&format!(
            r#"<tr class="team-row" data-team="{abbr}"><td><b>{abbr}</b></td><td>{games}</td>"#,
            abbr = html_escape(&team.team_abbr),
            games = team.games,
        ));
        for day in &team.days {
            rows.push_str(&day_cell(day.as_ref()));
        }
        rows.push_str("</tr>\n");
    }

    format!(
        r#"<div class="team-section">
<h3>Team Schedule (click a row to filter players)</h3>
<table class="team-table">
<thead><tr><th>Team</th><th>Games</th>{headers}</tr></thead>
<tbody>
{rows}</tbody>
</table>
</div>"#
    )
}

fn render_player_table(week: &WeekGrid) -> String {
    let day_headers: String = week
        .day_labels
        .iter()
        .map(|d| format!("<th>{}</th>", html_escape(d)))
        .collect();
    let season_headers = stat_headers("stat-season", false);
    let l7_headers = stat_headers("stat-l7", true);
    let l14_headers = stat_headers("stat-l14", true);

    let mut rows = String::new();
    for player in &week.players {
        let abbr = html_escape(&player.team_abbr);
        rows.push_str(&format!(
            r#"<tr data-team="{abbr}"><td data-sort="{name}"><b>{name}</b><br><span class="muted">{abbr}</span></td><td data-sort="{games}">{games}</td>"#,
            name = html_escape(&player.player_name),
            games = player.games,
        ));
        for day in &player.days {
            rows.push_str(&day_cell(day.as_ref()));
        }
        rows.push_str(&stat_cells(&player.season, "stat-season", false));
        rows.push_str(&stat_cells(&player.last7, "stat-l7", true));
        rows.push_str(&stat_cells(&player.last14, "stat-l14", true));
        rows.push_str("</tr>\n");
    }

    format!(
        r#"<div class="player-section">
<div class="controls">
<button class="btn-stat active" data-period="season">Season Avg</button>
<button class="btn-stat" data-period="l7">Last 7 Days</button>
<button class="btn-stat" data-period="l14">Last 14 Days</button>
<button class="btn-reset">Show All Teams</button>
</div>
<table class="player-table">
<thead><tr><th class="sortable">Player</th><th class="sortable">Games</th>{day_headers}{season_headers}{l7_headers}{l14_headers}</tr></thead>
<tbody>
{rows}</tbody>
</table>
<div class="pager"><button class="pg-prev">Prev</button> <span class="pg-info"></span> <button class="pg-next">Next</button></div>
</div>"#
    )
}

fn stat_headers(class: &str, hidden: bool) -> String {
    let style = if hidden { r#" style="display:none""# } else { "" };
    STAT_COLUMNS
        .iter()
        .map(|metric| format!(r#"<th class="sortable {class}"{style}>{metric}</th>"#))
        .collect()
}

fn stat_cells(set: &StatSet, class: &str, hidden: bool) -> String {
    let style = if hidden { r#" style="display:none""# } else { "" };
    set.cells
        .iter()
        .map(|cell| {
            format!(
                r#"<td class="{class}"{style} data-sort="{sort}">{display}</td>"#,
                sort = cell.sort,
                display = html_escape(&cell.display),
            )
        })
        .collect()
}

fn day_cell(badge: Option<&OpponentBadge>) -> String {
    match badge {
        Some(badge) => format!(
            r#"<td data-sort="{opp}">{body}</td>"#,
            opp = html_escape(&badge.opponent),
            body = badge_html(badge),
        ),
        None => r#"<td data-sort=""></td>"#.to_string(),
    }
}

fn badge_html(badge: &OpponentBadge) -> String {
    format!(
        r#"<div class="badge" style="background-color:{color}" title="Def Rank: {rank}">{prefix} {opp}</div>"#,
        color = badge.color,
        rank = badge.def_rank,
        prefix = badge.prefix(),
        opp = html_escape(&badge.opponent),
    )
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn inline_css() -> &'static str {
    r##"
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f4f7f6; color: #333; padding: 20px; }
h1 { color: #2c3e50; }
.container { max-width: 1600px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }

.tab { overflow: hidden; border: 1px solid #ccc; background-color: #f1f1f1; border-radius: 8px 8px 0 0; }
.tab button { background-color: inherit; float: left; border: none; outline: none; cursor: pointer; padding: 14px 16px; transition: 0.3s; font-size: 17px; font-weight: bold; }
.tab button:hover { background-color: #ddd; }
.tab button.active { background-color: #3498db; color: white; }
.tabcontent { display: none; padding: 20px; border: 1px solid #ccc; border-top: none; border-radius: 0 0 8px 8px; }

table { width: 100%; border-collapse: collapse; font-size: 0.95em; }
th { background-color: #3498db; color: white; padding: 10px; text-align: left; }
th.sortable { cursor: pointer; }
td { padding: 8px; border-bottom: 1px solid #eee; vertical-align: middle; }
.badge { padding: 4px; border-radius: 4px; text-align: center; font-weight: bold; }
.muted { color: #888; }

.team-row { cursor: pointer; transition: background 0.2s; }
.team-row:hover { background-color: #eef9ff; }
.team-row.selected { background-color: #d6eaf8; border-left: 4px solid #3498db; }

.controls { margin-bottom: 15px; }
.btn-stat { padding: 8px 15px; border: 1px solid #ddd; background: white; cursor: pointer; border-radius: 4px; margin-right: 5px; }
.btn-stat.active { background-color: #2ecc71; color: white; border-color: #27ae60; }
.btn-reset { padding: 8px 15px; border: 1px solid #e74c3c; background: white; color: #e74c3c; cursor: pointer; border-radius: 4px; float: right; }
.btn-reset:hover { background: #e74c3c; color: white; }

.pager { margin-top: 10px; }
.pager button { padding: 6px 12px; border: 1px solid #ddd; background: white; cursor: pointer; border-radius: 4px; }
.pg-info { margin: 0 8px; color: #555; }

.legend { margin-bottom: 15px; padding: 10px; background: #eee; border-radius: 4px; font-size: 0.9em; }
.dot { height: 10px; width: 10px; border-radius: 50%; display: inline-block; margin-right: 5px; margin-left: 10px; }
.no-data { color: #777; font-style: italic; }
"##
}

fn inline_js() -> &'static str {
    r##"
(function() {
    var PAGE_SIZE = 25;
    var state = {};

    function cellValue(row, idx) {
        var cell = row.cells[idx];
        if (!cell) return '';
        if (cell.dataset.sort !== undefined) return cell.dataset.sort;
        return cell.textContent.trim();
    }

    function refresh(content) {
        var st = state[content.id];
        var body = content.querySelector('.player-table tbody');
        if (!body) return;
        var rows = Array.prototype.slice.call(body.querySelectorAll('tr'));

        rows.sort(function(a, b) {
            var av = cellValue(a, st.sortCol);
            var bv = cellValue(b, st.sortCol);
            var an = parseFloat(av);
            var bn = parseFloat(bv);
            var cmp;
            if (!isNaN(an) && !isNaN(bn)) {
                cmp = an - bn;
            } else {
                cmp = av.localeCompare(bv);
            }
            return st.sortDir === 'asc' ? cmp : -cmp;
        });
        rows.forEach(function(r) { body.appendChild(r); });

        var visible = rows.filter(function(r) {
            return !st.filterTeam || r.dataset.team === st.filterTeam;
        });
        rows.forEach(function(r) { r.style.display = 'none'; });
        var pages = Math.max(1, Math.ceil(visible.length / PAGE_SIZE));
        if (st.page >= pages) st.page = pages - 1;
        visible.slice(st.page * PAGE_SIZE, (st.page + 1) * PAGE_SIZE)
            .forEach(function(r) { r.style.display = ''; });

        var info = content.querySelector('.pg-info');
        if (info) {
            info.textContent = 'Page ' + (st.page + 1) + ' of ' + pages +
                ' (' + visible.length + ' players)';
        }
    }

    function switchStats(content, period) {
        ['season', 'l7', 'l14'].forEach(function(p) {
            var show = p === period;
            var cells = content.querySelectorAll('.stat-' + p);
            Array.prototype.forEach.call(cells, function(cell) {
                cell.style.display = show ? '' : 'none';
            });
        });
    }

    function initWeek(content) {
        var id = content.id;
        state[id] = { sortCol: 1, sortDir: 'desc', filterTeam: '', page: 0 };

        var table = content.querySelector('.player-table');
        if (table) {
            Array.prototype.forEach.call(table.querySelectorAll('th'), function(th, idx) {
                th.addEventListener('click', function() {
                    var st = state[id];
                    if (st.sortCol === idx) {
                        st.sortDir = st.sortDir === 'asc' ? 'desc' : 'asc';
                    } else {
                        st.sortCol = idx;
                        st.sortDir = 'desc';
                    }
                    st.page = 0;
                    refresh(content);
                });
            });
        }

        Array.prototype.forEach.call(content.querySelectorAll('.team-row'), function(row) {
            row.addEventListener('click', function() {
                Array.prototype.forEach.call(content.querySelectorAll('.team-row'), function(r) {
                    r.classList.remove('selected');
                });
                row.classList.add('selected');
                state[id].filterTeam = row.dataset.team;
                state[id].page = 0;
                refresh(content);
            });
        });

        var reset = content.querySelector('.btn-reset');
        if (reset) {
            reset.addEventListener('click', function() {
                Array.prototype.forEach.call(content.querySelectorAll('.team-row'), function(r) {
                    r.classList.remove('selected');
                });
                state[id].filterTeam = '';
                state[id].page = 0;
                refresh(content);
            });
        }

        Array.prototype.forEach.call(content.querySelectorAll('.btn-stat'), function(btn) {
            btn.addEventListener('click', function() {
                Array.prototype.forEach.call(content.querySelectorAll('.btn-stat'), function(b) {
                    b.classList.remove('active');
                });
                btn.classList.add('active');
                switchStats(content, btn.dataset.period);
            });
        });

        var prev = content.querySelector('.pg-prev');
        var next = content.querySelector('.pg-next');
        if (prev) {
            prev.addEventListener('click', function() {
                if (state[id].page > 0) {
                    state[id].page -= 1;
                    refresh(content);
                }
            });
        }
        if (next) {
            next.addEventListener('click', function() {
                state[id].page += 1;
                refresh(content);
            });
        }

        refresh(content);
    }

    document.addEventListener('DOMContentLoaded', function() {
        Array.prototype.forEach.call(document.querySelectorAll('.tablinks'), function(btn) {
            btn.addEventListener('click', function() {
                Array.prototype.forEach.call(document.querySelectorAll('.tabcontent'), function(c) {
                    c.style.display = 'none';
                });
                Array.prototype.forEach.call(document.querySelectorAll('.tablinks'), function(b) {
                    b.classList.remove('active');
                });
                document.getElementById(btn.dataset.week).style.display = 'block';
                btn.classList.add('active');
            });
        });
        Array.prototype.forEach.call(document.querySelectorAll('.tabcontent'), initWeek);
    });
})();
"##
}
