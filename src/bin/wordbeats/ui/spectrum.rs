//! Spectrum bars widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

use wordbeats::visual::{Palette, Rgb};

/// Bars never reach the top of the panel.
const BAR_SCALE: f32 = 0.8;
const RESOLUTION: f32 = 1000.0;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Render one bar per column pair, coloured along the palette gradient
pub fn render_spectrum(frame: &mut Frame, area: Rect, heights: &[f32], palette: Palette) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let bars: Vec<Bar> = heights
        .iter()
        .map(|&h| {
            let h = h * BAR_SCALE;
            Bar::default()
                .value((h * RESOLUTION) as u64)
                .text_value(String::new())
                .style(Style::default().fg(color(palette.blend(h))))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1)
        .max(RESOLUTION as u64);

    frame.render_widget(chart, area);
}
