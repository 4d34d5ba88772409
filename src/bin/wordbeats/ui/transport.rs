//! Transport bar widget - shows tempo, play state, step, scale and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use wordbeats::controller::AppState;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub struct TransportView<'a> {
    pub state: &'a AppState,
    pub playing: bool,
    pub step: Option<usize>,
    pub steps: usize,
    pub sample_rate: u32,
    pub stats: AudioStats,
}

/// Render the transport bar
pub fn render_transport(frame: &mut Frame, area: Rect, view: &TransportView<'_>) {
    let block = Block::default().title(" words to beats ").borders(Borders::ALL);

    let (play_symbol, play_state) = if view.playing {
        ("▶", "Playing")
    } else {
        ("■", "Stopped")
    };
    let position = match view.step {
        Some(step) => format!("Step {}/{}  ", step + 1, view.steps),
        None => format!("Step -/{}  ", view.steps),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {}  ", view.state.tempo),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{play_symbol} {play_state}  "),
            Style::default().fg(if view.playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(position, Style::default().fg(Color::White)),
        Span::styled(
            format!("{}  ", view.state.scale),
            Style::default().fg(Color::White),
        ),
    ];

    if view.state.recording_armed {
        spans.push(Span::styled(
            "● REC  ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    spans.extend([
        Span::styled(
            format!("{:.1}kHz  ", view.sample_rate as f32 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", view.stats.peak, view.stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
