//! Top-level layout for sertop.
//!
//! One frame: status header, alert banner, metrics row, the two charts
//! side by side, and the recent-data table. Overlays (help, port and
//! threshold input) render last, on top of everything else.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::panels;
use crate::state::{InputMode, ThresholdField};
use crate::theme::borders;

/// Draws the complete frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if !app.connection.is_connected() && app.series.is_empty() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(10)])
            .split(area);
        panels::draw_status(f, app, chunks[0]);
        panels::draw_idle(f, app, chunks[1]);
    } else {
        let alert_height = (app.alerts.len().max(1) + 2) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Status
                Constraint::Length(alert_height), // Alerts
                Constraint::Length(5),            // Metrics
                Constraint::Min(10),              // Charts
                Constraint::Length(13),           // Recent table
            ])
            .split(area);

        panels::draw_status(f, app, chunks[0]);
        panels::draw_alerts(f, app, chunks[1]);
        panels::draw_metrics(f, app, chunks[2]);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);
        panels::draw_temperature_chart(f, app, charts[0]);
        panels::draw_humidity_chart(f, app, charts[1]);

        panels::draw_recent_table(f, app, chunks[4]);
    }

    match app.input_mode {
        InputMode::Port => draw_port_input(f, app, area),
        InputMode::Thresholds => draw_threshold_input(f, app, area),
        InputMode::None => {}
    }

    if app.show_help {
        draw_help_overlay(f, area);
    }
}

/// Centered overlay rect of fixed size, clamped to the frame.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_port_input(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(50, 3, area);
    f.render_widget(Clear, popup);
    let para = Paragraph::new(Line::from(vec![
        Span::raw(app.input.as_str()),
        Span::styled("█", Style::default().fg(Color::White)),
    ]))
    .block(
        Block::default()
            .title(" Serial port (Enter to apply, Esc to cancel) ")
            .borders(Borders::ALL)
            .border_type(borders::STYLE)
            .border_style(Style::default().fg(borders::STATUS)),
    );
    f.render_widget(para, popup);
}

fn draw_threshold_input(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(54, 8, area);
    f.render_widget(Clear, popup);

    let t = &app.config.thresholds;
    let fields = [
        (ThresholdField::TempMax, t.temp_max),
        (ThresholdField::TempMin, t.temp_min),
        (ThresholdField::HumMax, t.hum_max),
        (ThresholdField::HumMin, t.hum_min),
    ];

    let mut lines = Vec::with_capacity(fields.len() + 1);
    for (field, value) in fields {
        if field == app.threshold_field {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("> {:<14}", field.name()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(app.input.as_str()),
                Span::styled("█", Style::default().fg(Color::White)),
            ]));
        } else {
            lines.push(Line::from(Span::raw(format!(
                "  {:<14}{value}",
                field.name()
            ))));
        }
    }
    lines.push(Line::from(Span::styled(
        "  Tab: next field   Enter: apply   Esc: cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let para = Paragraph::new(lines).block(
        Block::default()
            .title(" Thresholds ")
            .borders(Borders::ALL)
            .border_type(borders::STYLE)
            .border_style(Style::default().fg(borders::METRICS)),
    );
    f.render_widget(para, popup);
}

fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let popup = centered_rect(46, 14, area);
    f.render_widget(Clear, popup);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(
                format!("  {k:<8}"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(""),
        key("c", "connect to the serial port"),
        key("d", "disconnect"),
        key("p", "set serial port"),
        key("b", "cycle baud rate"),
        key("t", "edit alert thresholds"),
        key("x", "clear retained data"),
        key("?", "toggle this help"),
        key("q / Esc", "quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Esc or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let para = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_type(borders::STYLE)
            .border_style(Style::default().fg(borders::STATUS)),
    );
    f.render_widget(para, popup);
}
