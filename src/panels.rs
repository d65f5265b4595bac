//! Panel rendering for sertop.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;
use crate::theme::{self, borders, graph};

/// Number of readings shown in the recent table.
const RECENT_ROWS: usize = 10;

/// Rounded block with a colored border, shared by every panel.
fn panel_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(borders::STYLE)
        .border_style(Style::default().fg(color))
}

/// Status header: connection state, port, baud, counters, last message.
pub fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let connected = app.connection.is_connected();
    let state = app.connection.state();

    let mut spans = vec![
        Span::styled(
            format!(" {} ", state.label()),
            Style::default()
                .fg(Color::Black)
                .bg(theme::state_color(connected))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {} @ {} │ readings {} │ dropped {}",
            app.config.port, app.config.baud, app.readings_total, app.lines_dropped
        )),
    ];
    if let Some(msg) = &app.status {
        spans.push(Span::styled(
            format!(" │ {msg}"),
            Style::default().fg(Color::Yellow),
        ));
    }

    let para = Paragraph::new(Line::from(spans))
        .block(panel_block(" sertop │ ? help ", borders::STATUS));
    f.render_widget(para, area);
}

/// Alert banner: red with one line per breach, green when all readings
/// are within bounds, dim while no data exists.
pub fn draw_alerts(f: &mut Frame, app: &App, area: Rect) {
    if app.series.is_empty() {
        let para = Paragraph::new("no data")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel_block(" Alerts ", Color::DarkGray));
        f.render_widget(para, area);
        return;
    }

    if app.alerts.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "All readings within limits",
            Style::default().fg(borders::OK),
        )))
        .block(panel_block(" Alerts ", borders::OK));
        f.render_widget(para, area);
        return;
    }

    let lines: Vec<Line> = app
        .alerts
        .iter()
        .map(|alert| {
            Line::from(Span::styled(
                format!("ALERT: {}", alert.message()),
                Style::default()
                    .fg(borders::ALERTS)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    let para = Paragraph::new(lines).block(panel_block(" Alerts ", borders::ALERTS));
    f.render_widget(para, area);
}

/// Metrics row: current temperature and humidity with deltas, plus the
/// receipt time of the newest reading.
pub fn draw_metrics(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let latest = app.series.latest();

    let (temp_str, temp_delta, temp_col) = match latest {
        Some(s) => (
            format!("{:.1}°C", s.temperature),
            theme::format_delta(app.series.temperature_delta(), "°C"),
            theme::temp_color(s.temperature),
        ),
        None => ("-- °C".to_string(), "--".to_string(), Color::DarkGray),
    };
    let (hum_str, hum_delta) = match latest {
        Some(s) => (
            format!("{:.1}%", s.humidity),
            theme::format_delta(app.series.humidity_delta(), "%"),
        ),
        None => ("-- %".to_string(), "--".to_string()),
    };
    let clock = latest
        .map(|s| theme::format_clock(&s.at))
        .unwrap_or_else(|| "--".to_string());

    let temp_breached = app.alerts.iter().any(|a| {
        matches!(
            a.kind,
            crate::thresholds::AlertKind::TempHigh | crate::thresholds::AlertKind::TempLow
        )
    });
    let hum_breached = app.alerts.iter().any(|a| {
        matches!(
            a.kind,
            crate::thresholds::AlertKind::HumHigh | crate::thresholds::AlertKind::HumLow
        )
    });

    draw_metric(
        f,
        chunks[0],
        if temp_breached { " Temperature ! " } else { " Temperature " },
        &temp_str,
        &temp_delta,
        temp_col,
    );
    draw_metric(
        f,
        chunks[1],
        if hum_breached { " Humidity ! " } else { " Humidity " },
        &hum_str,
        &hum_delta,
        graph::HUMIDITY,
    );
    draw_metric(f, chunks[2], " Last Update ", &clock, "", Color::White);
}

fn draw_metric(f: &mut Frame, area: Rect, title: &str, value: &str, delta: &str, color: Color) {
    let mut lines = vec![Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if !delta.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Δ {delta}"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let para = Paragraph::new(lines).block(panel_block(title, borders::METRICS));
    f.render_widget(para, area);
}

/// Temperature chart: full buffer plus dashed reference lines at the
/// configured min and max bounds.
pub fn draw_temperature_chart(f: &mut Frame, app: &App, area: Rect) {
    let points = app.series.temperature_points();
    let range = app.series.temperature_range();
    draw_series_chart(
        f,
        area,
        " Temperature (°C) ",
        borders::TEMPERATURE,
        graph::TEMPERATURE,
        &points,
        range,
        app.config.thresholds.temp_min,
        app.config.thresholds.temp_max,
    );
}

/// Humidity chart with its own pair of reference lines.
pub fn draw_humidity_chart(f: &mut Frame, app: &App, area: Rect) {
    let points = app.series.humidity_points();
    let range = app.series.humidity_range();
    draw_series_chart(
        f,
        area,
        " Humidity (%) ",
        borders::HUMIDITY,
        graph::HUMIDITY,
        &points,
        range,
        app.config.thresholds.hum_min,
        app.config.thresholds.hum_max,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_series_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    border: Color,
    color: Color,
    points: &[(f64, f64)],
    range: Option<(f64, f64)>,
    bound_min: f64,
    bound_max: f64,
) {
    if points.is_empty() {
        let para = Paragraph::new("waiting for data...")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel_block(title, border));
        f.render_widget(para, area);
        return;
    }

    let span = points.last().map(|p| p.0).unwrap_or(0.0).max(1.0);
    let min_line = [(0.0, bound_min), (span, bound_min)];
    let max_line = [(0.0, bound_max), (span, bound_max)];

    // Y bounds cover both the data and the reference lines, padded so
    // the extremes don't sit on the frame.
    let (data_min, data_max) = range.unwrap_or((bound_min, bound_max));
    let y_min = data_min.min(bound_min);
    let y_max = data_max.max(bound_max);
    let pad = ((y_max - y_min) * 0.1).max(1.0);
    let y_bounds = [y_min - pad, y_max + pad];

    let datasets = vec![
        Dataset::default()
            .name(format!("max {bound_max:.1}"))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(graph::BOUND_MAX))
            .data(&max_line),
        Dataset::default()
            .name(format!("min {bound_min:.1}"))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(graph::BOUND_MIN))
            .data(&min_line),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(points),
    ];

    let chart = Chart::new(datasets)
        .block(panel_block(title, border))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, span])
                .labels(vec!["0s".to_string(), format!("{span:.0}s")]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", (y_bounds[0] + y_bounds[1]) / 2.0),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );
    f.render_widget(chart, area);
}

/// Recent-data table: the last 10 readings, newest last.
pub fn draw_recent_table(f: &mut Frame, app: &App, area: Rect) {
    let samples = app.series.last(RECENT_ROWS);

    let header = Row::new(vec!["Time", "Temperature (°C)", "Humidity (%)"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = samples
        .iter()
        .map(|s| {
            Row::new(vec![
                theme::format_clock(&s.at),
                format!("{:.1}", s.temperature),
                format!("{:.1}", s.humidity),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(panel_block(" Recent Data ", borders::TABLE));
    f.render_widget(table, area);
}

/// Disconnected landing view with the expected wire format.
pub fn draw_idle(f: &mut Frame, _app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Not connected. Press 'c' to connect to the serial port.",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from("  Expected data format, one line per reading:"),
        Line::from(Span::styled(
            "    <device-timestamp-ms> <temperature> <humidity>",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            "    e.g. 114538 21.6 74.2",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from("  p: set port   b: cycle baud   t: edit thresholds   q: quit"),
    ];
    let para = Paragraph::new(lines).block(panel_block(" Serial Data Monitor ", borders::STATUS));
    f.render_widget(para, area);
}
