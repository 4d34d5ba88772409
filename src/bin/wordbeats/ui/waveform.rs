//! Idle wave widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use wordbeats::visual::{Palette, Rgb};

/// Render the still sine shown while nothing plays
pub fn render_idle(frame: &mut Frame, area: Rect, points: &[(f64, f64)], palette: Palette) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);
    let Rgb(r, g, b) = palette.primary;
    let width = points.last().map(|&(x, _)| x).unwrap_or(1.0).max(1.0);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Rgb(r, g, b)))
        .data(points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, width])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-0.5, 0.5])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
