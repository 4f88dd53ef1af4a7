//! Inline chart rendering for chart-bearing assistant messages: a single
//! price line for historical data, four series (open/high/low/close) for
//! candlestick history.

use chrono::DateTime;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use novex_core::{ChartPayload, ChatMessage};

use crate::theme::Theme;

pub struct ChartMessageView;

impl ChartMessageView {
    /// Fixed height of a chart entry in the thread.
    pub const HEIGHT: u16 = 14;

    pub fn render(frame: &mut Frame, area: Rect, theme: &dyn Theme, message: &ChatMessage) {
        let Some(payload) = message.chart.as_ref() else {
            return;
        };

        let title = message.chart_title.as_deref().unwrap_or("Chart");
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(Style::default().fg(theme.accent()))
            .style(Style::default().bg(theme.surface()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 3 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(2)])
            .split(inner);

        render_price_header(frame, chunks[0], theme, payload);
        render_series(frame, chunks[1], theme, payload);
    }
}

/// Latest price plus the delta against the previous point, colored by sign.
fn render_price_header(frame: &mut Frame, area: Rect, theme: &dyn Theme, payload: &ChartPayload) {
    let mut spans = Vec::new();

    if let Some(latest) = payload.latest_price() {
        spans.push(Span::styled(
            format!("${}", format_price(latest)),
            Style::default()
                .fg(theme.foreground())
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(change) = payload.price_change() {
        let positive = change >= 0.0;
        let (arrow, color) = if positive {
            ("▲", theme.success())
        } else {
            ("▼", theme.error())
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(
                "{} {}{}",
                arrow,
                if positive { "+" } else { "" },
                format_price(change)
            ),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(
        ratatui::widgets::Paragraph::new(Line::from(spans)),
        area,
    );
}

fn render_series(frame: &mut Frame, area: Rect, theme: &dyn Theme, payload: &ChartPayload) {
    match payload {
        ChartPayload::PriceSeries(points) => {
            let data: Vec<(f64, f64)> = points
                .iter()
                .map(|p| (p.timestamp_ms as f64, p.price))
                .collect();

            let datasets = vec![Dataset::default()
                .name("price")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.accent()))
                .data(&data)];

            render_chart(frame, area, theme, datasets, &[&data]);
        }
        ChartPayload::CandleSeries(bars) => {
            let opens: Vec<(f64, f64)> = bars
                .iter()
                .map(|b| (b.timestamp_ms as f64, b.open))
                .collect();
            let highs: Vec<(f64, f64)> = bars
                .iter()
                .map(|b| (b.timestamp_ms as f64, b.high))
                .collect();
            let lows: Vec<(f64, f64)> = bars
                .iter()
                .map(|b| (b.timestamp_ms as f64, b.low))
                .collect();
            let closes: Vec<(f64, f64)> = bars
                .iter()
                .map(|b| (b.timestamp_ms as f64, b.close))
                .collect();

            let datasets = vec![
                Dataset::default()
                    .name("high")
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme.success()))
                    .data(&highs),
                Dataset::default()
                    .name("low")
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme.error()))
                    .data(&lows),
                Dataset::default()
                    .name("open")
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme.info()))
                    .data(&opens),
                Dataset::default()
                    .name("close")
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme.accent()))
                    .data(&closes),
            ];

            render_chart(
                frame,
                area,
                theme,
                datasets,
                &[&opens, &highs, &lows, &closes],
            );
        }
    }
}

fn render_chart(
    frame: &mut Frame,
    area: Rect,
    theme: &dyn Theme,
    datasets: Vec<Dataset>,
    series: &[&Vec<(f64, f64)>],
) {
    let (x_bounds, y_bounds) = bounds(series);

    let axis_style = Style::default().fg(theme.foreground_dim());

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds(x_bounds)
                .labels(x_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds(y_bounds)
                .labels(y_labels(y_bounds)),
        );

    frame.render_widget(chart, area);
}

/// Axis bounds over every series, padded so flat lines stay visible.
fn bounds(series: &[&Vec<(f64, f64)>]) -> ([f64; 2], [f64; 2]) {
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;

    for points in series {
        for (x, y) in points.iter() {
            x_min = x_min.min(*x);
            x_max = x_max.max(*x);
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }
    }

    if x_min > x_max {
        return ([0.0, 1.0], [0.0, 1.0]);
    }

    if x_min == x_max {
        x_min -= 1.0;
        x_max += 1.0;
    }

    ([x_min, x_max], [y_min - 0.01, y_max + 0.01])
}

fn x_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|ts| format_timestamp(*ts as i64))
        .collect()
}

fn y_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|price| format_price(*price))
        .collect()
}

fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%m/%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn format_price(price: f64) -> String {
    format!("{:.6}", price)
}
