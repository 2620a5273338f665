//! Page Rendering
//!
//! Server-side HTML for the operator page. Charts are drawn as inline SVG
//! at the size their layout dictates. Every element the operator reads
//! carries a fixed id.

use std::f64::consts::PI;
use std::fmt::Write as _;

use super::state::ConsoleSettings;
use crate::dashboard::{
    Chart, ChartKind, ChartType, DashboardState, Layout, MetricDisplays, View, Viewport,
    ANOMALY_ALERT_THRESHOLD,
};

const PALETTE: [&str; 5] = ["#0d6efd", "#20c997", "#fd7e14", "#6f42c1", "#d63384"];
const ALERT_COLOR: &str = "#dc3545";
const NORMAL_COLOR: &str = "#198754";
const CHART_PADDING: f64 = 32.0;

/// Operator commands offered on the robot control panel
pub const COMMANDS: [(&str, &str); 5] = [
    ("forward", "Forward"),
    ("backward", "Backward"),
    ("left", "Turn left"),
    ("right", "Turn right"),
    ("stop", "Stop"),
];

const CSS: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f5f6f8; color: #212529; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 240px; background: #212529; padding: 16px 0; flex-shrink: 0; }
.sidebar h1 { color: #fff; font-size: 18px; margin: 0 16px 16px; }
.nav-link { display: block; padding: 10px 16px; color: #adb5bd; text-decoration: none; }
.nav-link.active { background: #0d6efd; color: #fff; }
.content { flex: 1; padding: 24px; }
.cards { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; margin-bottom: 24px; }
.card { background: #fff; border-radius: 6px; padding: 16px; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.card .value { font-size: 26px; font-weight: 600; }
.charts { display: flex; flex-wrap: wrap; gap: 24px; margin-bottom: 24px; }
.chart { background: #fff; border-radius: 6px; }
.alert { padding: 10px 16px; border-radius: 6px; margin-bottom: 16px; }
.alert-info { background: #cff4fc; }
.alert-warning { background: #fff3cd; }
table { width: 100%; background: #fff; border-collapse: collapse; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid #dee2e6; }
.badge { padding: 2px 8px; border-radius: 4px; color: #fff; font-size: 12px; }
.bg-success { background: #198754; }
.list-group-item { display: block; padding: 10px 16px; background: #fff; border: 1px solid #dee2e6; color: inherit; text-decoration: none; }
.list-group-item.active { background: #0d6efd; color: #fff; }
.status-indicator { display: inline-block; width: 10px; height: 10px; border-radius: 50%; }
.status-online { background: #198754; }
.status-offline { background: #6c757d; }
.btn { padding: 8px 14px; margin: 4px; border: none; border-radius: 4px; background: #0d6efd; color: #fff; cursor: pointer; }
.btn-danger { background: #dc3545; }
dl { display: grid; grid-template-columns: max-content 1fr; gap: 8px 24px; }
"#;

const SCRIPT: &str = r#"
const jsonPost = (url, body) => fetch(url, {
  method: 'POST',
  headers: { 'Content-Type': 'application/json' },
  body: body === undefined ? undefined : JSON.stringify(body),
});

document.addEventListener('click', async (event) => {
  const target = event.target.closest('[data-post],[data-command]');
  if (!target) return;
  event.preventDefault();
  if (target.dataset.command) {
    await jsonPost('/api/commands', { command: target.dataset.command });
  } else {
    await jsonPost(target.dataset.post);
  }
  window.location.reload();
});

const sizedLocation = () => {
  const url = new URL(window.location.href);
  url.searchParams.set('w', window.innerWidth);
  url.searchParams.set('h', window.innerHeight);
  return url.toString();
};

if (document.body.dataset.viewport !== `${window.innerWidth}x${window.innerHeight}`) {
  window.location.replace(sizedLocation());
}

let resizeTimer;
window.addEventListener('resize', () => {
  clearTimeout(resizeTimer);
  resizeTimer = setTimeout(() => window.location.replace(sizedLocation()), 250);
});
"#;

/// Render the full operator page with charts sized for `viewport`
pub fn page(state: &DashboardState, settings: &ConsoleSettings, viewport: Viewport) -> String {
    let refresh = if settings.page_refresh_secs > 0 {
        format!(
            r#"<meta http-equiv="refresh" content="{}">"#,
            settings.page_refresh_secs
        )
    } else {
        String::new()
    };

    let alert = state
        .alert
        .as_deref()
        .map(|message| {
            format!(
                r#"<div id="alertBox" class="alert alert-warning" role="alert">{} <button class="btn" data-post="/api/alert/dismiss">OK</button></div>"#,
                html_escape(message)
            )
        })
        .unwrap_or_default();

    let panels: String = View::ALL
        .iter()
        .map(|view| {
            let body = match view {
                View::Dashboard => dashboard_panel(state, viewport),
                View::DataAnalysis => data_analysis_panel(state, viewport),
                View::RobotControl => robot_control_panel(state),
                View::SystemStatus => system_status_panel(state, viewport),
                View::Settings => settings_panel(settings),
            };
            let display = if state.router.is_visible(*view) {
                "block"
            } else {
                "none"
            };
            format!(
                r#"<section id="{id}" style="display: {display}">{body}</section>"#,
                id = view.panel_id(),
                display = display,
                body = body,
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    {refresh}
    <title>{title} - robodash</title>
    <style>{css}</style>
</head>
<body data-viewport="{vw}x{vh}">
    <div class="layout">
        <nav class="sidebar">
            <h1>robodash</h1>
            {nav}
        </nav>
        <main class="content">
            <h2 id="pageTitle">{title}</h2>
            {alert}
            <div id="robotStatus" class="{status_class}">{status}</div>
            {panels}
        </main>
    </div>
    <script>{script}</script>
</body>
</html>"#,
        refresh = refresh,
        title = state.router.page_title(),
        css = CSS,
        vw = viewport.width,
        vh = viewport.height,
        nav = nav(state.router.active()),
        alert = alert,
        status_class = state.status.class,
        status = html_escape(&state.status.text),
        panels = panels,
        script = SCRIPT,
    )
}

fn nav(active: View) -> String {
    View::ALL
        .iter()
        .map(|view| {
            let class = if *view == active { " active" } else { "" };
            format!(
                r##"<a href="#" class="nav-link{class}" data-post="/api/views/{slug}">{label}</a>"##,
                class = class,
                slug = view.slug(),
                label = view.nav_label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn metric_cards(metrics: &MetricDisplays) -> String {
    let cards = [
        ("totalDataPoints", "Total data points", metrics.total_data_points_text()),
        ("activeRobots", "Active robots", metrics.active_robots_text()),
        ("avgResponseTime", "Avg response time", metrics.avg_response_text()),
        ("systemHealth", "System health", metrics.system_health_text()),
    ];

    let body: String = cards
        .iter()
        .map(|(id, label, value)| {
            format!(
                r#"<div class="card"><div>{label}</div><div class="value" id="{id}">{value}</div></div>"#,
                label = label,
                id = id,
                value = value,
            )
        })
        .collect();

    format!(r#"<div class="cards">{}</div>"#, body)
}

fn chart_block(state: &DashboardState, kinds: &[ChartKind], viewport: Viewport) -> String {
    let body: String = kinds
        .iter()
        .map(|kind| chart_svg(state.charts.get(*kind), Layout::for_viewport(*kind, viewport)))
        .collect();
    format!(r#"<div class="charts">{}</div>"#, body)
}

fn dashboard_panel(state: &DashboardState, viewport: Viewport) -> String {
    let rows: String = state
        .table
        .rows()
        .map(|row| {
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><span class="{}">{}</span></td></tr>"#,
                html_escape(&row.time),
                html_escape(&row.robot_id),
                html_escape(&row.sensor_type),
                html_escape(&row.reading),
                row.badge.class,
                row.badge.label,
            )
        })
        .collect();

    format!(
        r#"{cards}
{charts}
<table>
    <thead><tr><th>Time</th><th>Robot</th><th>Sensor</th><th>Reading</th><th>Status</th></tr></thead>
    <tbody id="sensorDataTable">{rows}</tbody>
</table>"#,
        cards = metric_cards(&state.metrics),
        charts = chart_block(state, &[ChartKind::Realtime, ChartKind::SensorType], viewport),
        rows = rows,
    )
}

fn data_analysis_panel(state: &DashboardState, viewport: Viewport) -> String {
    chart_block(state, &[ChartKind::History, ChartKind::Anomaly], viewport)
}

fn robot_control_panel(state: &DashboardState) -> String {
    let items: String = state
        .directory
        .robots()
        .iter()
        .map(|robot| {
            let active = if state.directory.is_active(&robot.id) {
                " active"
            } else {
                ""
            };
            let indicator = if robot.online {
                "status-online"
            } else {
                "status-offline"
            };
            format!(
                r##"<a href="#" class="list-group-item list-group-item-action{active}" data-post="/api/robots/{path}/select"><strong>{name}</strong> <span class="status-indicator {indicator}"></span><div>ID: {id}</div></a>"##,
                active = active,
                path = html_escape(&urlencoding::encode(&robot.id)),
                name = html_escape(&robot.name),
                indicator = indicator,
                id = html_escape(&robot.id),
            )
        })
        .collect();

    let selected = state
        .directory
        .selected()
        .map(|s| html_escape(&s.name))
        .unwrap_or_else(|| "None".to_string());

    let buttons: String = COMMANDS
        .iter()
        .map(|(command, label)| {
            let class = if *command == "stop" {
                "btn btn-danger"
            } else {
                "btn"
            };
            format!(
                r#"<button class="{}" data-command="{}">{}</button>"#,
                class, command, label
            )
        })
        .collect();

    format!(
        r#"<button class="btn" data-post="/api/robots/refresh">Refresh robots</button>
<div id="robotList">{items}</div>
<p>Selected robot: <span id="selectedRobot">{selected}</span></p>
<div>{buttons}</div>"#,
        items = items,
        selected = selected,
        buttons = buttons,
    )
}

fn system_status_panel(state: &DashboardState, viewport: Viewport) -> String {
    format!(
        r#"{charts}
<dl>
    <dt>Feed</dt><dd>{feed}</dd>
    <dt>Connections</dt><dd>{connections}</dd>
    <dt>Reconnect attempt</dt><dd>{attempt}</dd>
    <dt>Dropped frames</dt><dd>{dropped}</dd>
    <dt>Last error</dt><dd>{last_error}</dd>
</dl>"#,
        charts = chart_block(state, &[ChartKind::Resource], viewport),
        feed = state.feed.state.as_str(),
        connections = state.feed.connections,
        attempt = state.feed.reconnect_attempt,
        dropped = state.feed.frames_dropped,
        last_error = state
            .feed
            .last_error
            .as_deref()
            .map(html_escape)
            .unwrap_or_else(|| "none".to_string()),
    )
}

fn settings_panel(settings: &ConsoleSettings) -> String {
    format!(
        r#"<dl>
    <dt>Backend API</dt><dd>{api}</dd>
    <dt>Feed URL</dt><dd>{feed}</dd>
    <dt>Page refresh</dt><dd>{refresh}s</dd>
</dl>"#,
        api = html_escape(&settings.api_base),
        feed = html_escape(&settings.feed_url),
        refresh = settings.page_refresh_secs,
    )
}

/// Render one chart as an inline SVG mounted on its element id
pub fn chart_svg(chart: &Chart, layout: Layout) -> String {
    let width = layout.width as f64;
    let height = layout.height as f64;

    let body = match chart.chart_type {
        ChartType::Line => line_body(chart, width, height),
        ChartType::Bar => bar_body(chart, width, height),
        ChartType::Pie => pie_body(chart, width, height),
    };

    format!(
        r#"<div class="chart" id="{id}"><svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg"><text x="12" y="20" font-size="14" font-weight="600">{title}</text>{body}</svg></div>"#,
        id = chart.kind.element_id(),
        w = layout.width,
        h = layout.height,
        title = html_escape(&chart.title),
        body = body,
    )
}

/// Top of the y axis: the fixed maximum or the largest sample
fn y_ceiling(chart: &Chart) -> f64 {
    chart.y_max.unwrap_or_else(|| {
        chart
            .series
            .iter()
            .flat_map(|s| s.data.iter().copied())
            .fold(0.0_f64, f64::max)
    })
    .max(1.0)
}

fn axis_labels(chart: &Chart, width: f64, height: f64) -> String {
    let mut out = String::new();
    let baseline = height - CHART_PADDING;
    let _ = write!(
        out,
        r##"<line x1="{p}" y1="{b}" x2="{r}" y2="{b}" stroke="#adb5bd"/>"##,
        p = CHART_PADDING,
        b = baseline,
        r = width - CHART_PADDING,
    );
    if let Some(first) = chart.x_axis.oldest() {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="11">{}</text>"#,
            CHART_PADDING,
            baseline + 16.0,
            html_escape(first)
        );
    }
    if let Some(last) = chart.x_axis.newest() {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="11" text-anchor="end">{}</text>"#,
            width - CHART_PADDING,
            baseline + 16.0,
            html_escape(last)
        );
    }
    let _ = write!(
        out,
        r#"<text x="4" y="{}" font-size="11">{:.0}{}</text>"#,
        CHART_PADDING + 14.0,
        y_ceiling(chart),
        chart.y_unit
    );
    out
}

fn line_body(chart: &Chart, width: f64, height: f64) -> String {
    let ceiling = y_ceiling(chart);
    let plot_w = (width - 2.0 * CHART_PADDING).max(1.0);
    let plot_h = (height - 2.0 * CHART_PADDING).max(1.0);

    let mut out = axis_labels(chart, width, height);
    for (i, series) in chart.series.iter().enumerate() {
        let n = series.data.len();
        let step = if n > 1 { plot_w / (n - 1) as f64 } else { 0.0 };
        let points: Vec<String> = series
            .data
            .iter()
            .enumerate()
            .map(|(j, v)| {
                let x = CHART_PADDING + j as f64 * step;
                let y = height - CHART_PADDING - (v / ceiling).min(1.0) * plot_h;
                format!("{:.1},{:.1}", x, y)
            })
            .collect();
        let color = PALETTE[i % PALETTE.len()];
        let _ = write!(
            out,
            r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{points}"><title>{name}</title></polyline>"#,
            color = color,
            points = points.join(" "),
            name = html_escape(&series.name),
        );
    }
    out
}

fn bar_body(chart: &Chart, width: f64, height: f64) -> String {
    let ceiling = y_ceiling(chart);
    let plot_w = (width - 2.0 * CHART_PADDING).max(1.0);
    let plot_h = (height - 2.0 * CHART_PADDING).max(1.0);

    let mut out = axis_labels(chart, width, height);
    let Some(series) = chart.series.first() else {
        return out;
    };
    let n = series.data.len().max(1);
    let slot = plot_w / n as f64;
    for (j, v) in series.data.iter().enumerate() {
        let bar_h = (v / ceiling).min(1.0) * plot_h;
        let color = if *v > ANOMALY_ALERT_THRESHOLD {
            ALERT_COLOR
        } else {
            NORMAL_COLOR
        };
        let _ = write!(
            out,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            CHART_PADDING + j as f64 * slot + slot * 0.15,
            height - CHART_PADDING - bar_h,
            slot * 0.7,
            bar_h,
            color
        );
    }
    out
}

fn pie_body(chart: &Chart, width: f64, height: f64) -> String {
    let total: f64 = chart.slices.iter().map(|s| s.value).sum();
    let cx = width / 2.0;
    let cy = height / 2.0 + 10.0;
    let radius = ((width.min(height) / 2.0) - 40.0).max(10.0);
    let circumference = 2.0 * PI * radius;

    let mut out = String::new();
    let mut offset = 0.0;
    for (i, slice) in chart.slices.iter().enumerate() {
        let share = if total > 0.0 { slice.value / total } else { 0.0 };
        let arc = share * circumference;
        let color = PALETTE[i % PALETTE.len()];
        let _ = write!(
            out,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="none" stroke="{color}" stroke-width="30" stroke-dasharray="{arc:.2} {rest:.2}" stroke-dashoffset="{off:.2}" transform="rotate(-90 {cx:.1} {cy:.1})"><title>{name}: {value}</title></circle>"#,
            cx = cx,
            cy = cy,
            r = radius,
            color = color,
            arc = arc,
            rest = circumference - arc,
            off = -offset,
            name = html_escape(&slice.name),
            value = slice.value,
        );
        let _ = write!(
            out,
            r#"<text x="{x}" y="{y}" font-size="11" fill="{color}">{name}</text>"#,
            x = 12,
            y = 40 + i * 14,
            color = color,
            name = html_escape(&slice.name),
        );
        offset += arc;
    }
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SensorReading;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state() -> DashboardState {
        DashboardState::new(StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_page_has_fixed_element_ids() {
        let html = page(&state(), &ConsoleSettings::default(), Viewport::default());
        for id in [
            "sensorDataTable",
            "totalDataPoints",
            "activeRobots",
            "avgResponseTime",
            "systemHealth",
            "robotStatus",
            "selectedRobot",
            "robotList",
            "pageTitle",
        ] {
            assert!(html.contains(&format!(r#"id="{}""#, id)), "missing {}", id);
        }
        for kind in ChartKind::ALL {
            assert!(html.contains(&format!(r#"id="{}""#, kind.element_id())));
        }
        for view in View::ALL {
            assert!(html.contains(&format!(r#"id="{}""#, view.panel_id())));
        }
    }

    #[test]
    fn test_only_active_panel_is_visible() {
        let mut state = state();
        state.navigate(View::RobotControl);
        let html = page(&state, &ConsoleSettings::default(), state.viewport);

        assert!(html.contains(r#"id="robotControlContent" style="display: block""#));
        assert!(html.contains(r#"id="dashboardContent" style="display: none""#));
        assert_eq!(html.matches(r#"style="display: block""#).count(), 1);
        assert!(html.contains(r#"<h2 id="pageTitle">Robot control</h2>"#));
        assert!(html.contains(r#"class="nav-link active" data-post="/api/views/robotControl""#));
    }

    #[test]
    fn test_table_rows_are_escaped() {
        let mut state = state();
        state.record_reading(&SensorReading::new(0, "<r1>", "temp", 1.0, "C"));
        let html = page(&state, &ConsoleSettings::default(), state.viewport);

        assert!(html.contains("&lt;r1&gt;"));
        assert!(!html.contains("<r1>"));
        assert!(html.contains(r#"<span class="badge bg-success">Normal</span>"#));
    }

    #[test]
    fn test_alert_rendered_until_dismissed() {
        let mut state = state();
        state.raise_alert("Please select a robot first");
        let html = page(&state, &ConsoleSettings::default(), state.viewport);
        assert!(html.contains(r#"id="alertBox""#));

        state.alert = None;
        let html = page(&state, &ConsoleSettings::default(), state.viewport);
        assert!(!html.contains(r#"id="alertBox""#));
    }

    #[test]
    fn test_anomaly_bars_colored_by_threshold() {
        let mut state = state();
        let anomaly = state.charts.get_mut(ChartKind::Anomaly);
        let series = &mut anomaly.series[0];
        series.data.push(4.0);
        series.data.push(2.0);
        let chart = state.charts.get(ChartKind::Anomaly);
        let svg = chart_svg(chart, chart.layout);

        assert!(svg.contains(ALERT_COLOR));
        assert!(svg.contains(NORMAL_COLOR));
        assert!(svg.starts_with(r#"<div class="chart" id="anomalyChart">"#));
    }

    #[test]
    fn test_svg_uses_layout_size() {
        let state = state();
        let chart = state.charts.get(ChartKind::History);
        let svg = chart_svg(chart, chart.layout);
        assert!(svg.contains(&format!(r#"width="{}""#, chart.layout.width)));
        assert!(svg.contains(r#"height="300""#));
    }

    #[test]
    fn test_page_sized_per_request() {
        let state = state();
        let narrow = page(&state, &ConsoleSettings::default(), Viewport { width: 1280, height: 800 });
        let wide = page(&state, &ConsoleSettings::default(), Viewport { width: 1920, height: 1080 });

        assert!(narrow.contains(r#"data-viewport="1280x800""#));
        assert!(wide.contains(r#"data-viewport="1920x1080""#));
        assert!(narrow.contains(r#"<svg width="992""#));
        assert!(wide.contains(r#"<svg width="1632""#));
        assert_eq!(state.viewport, Viewport::default());
    }

    #[test]
    fn test_script_never_posts_viewport() {
        assert!(!SCRIPT.contains("/api/viewport"));
    }

    #[test]
    fn test_value_axis_ceiling_is_rounded() {
        let mut state = state();
        let realtime = state.charts.get_mut(ChartKind::Realtime);
        realtime.series[0].data.push(1499.8372);
        let svg = chart_svg(realtime, realtime.layout);

        assert!(svg.contains(r#"font-size="11">1500</text>"#));
        assert!(!svg.contains("1499.8372"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
