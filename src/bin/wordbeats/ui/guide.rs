//! How-it-works overlay, toggled with `?`

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use wordbeats::{compose::compose, sequencing::Scale, settings::Tempo, voices::Instrument};

const EXAMPLE: &str = "hello";

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn item(text: String) -> Line<'static> {
    Line::from(format!("  • {text}"))
}

fn example(text: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("    {text}"),
        Style::default().fg(Color::Yellow),
    ))
}

/// Guide text, with examples worked out in the current scale.
pub fn guide_lines(scale: Scale) -> Vec<Line<'static>> {
    let song = compose(EXAMPLE, scale);
    let notes: Vec<String> = song.notes().iter().map(|p| p.to_string()).collect();
    let voices: Vec<&str> = Instrument::ALL.iter().map(|i| i.name()).collect();
    let scales: Vec<&str> = Scale::ALL.iter().map(|s| s.name()).collect();

    vec![
        heading("Text to rhythm"),
        item("Only letters and digits count; text is lowercased first".into()),
        item("Vowels (a e i o u) are always a beat (x)".into()),
        item("Any other character is a beat when its code is even, a rest (-) when odd".into()),
        item("The pattern is shown in groups of 4; each step is a sixteenth".into()),
        example(format!("\"{EXAMPLE}\" → {}", song.pattern().grouped())),
        Line::default(),
        heading("Text to notes"),
        item(format!(
            "Each character picks note (code mod {}) of the {} scale",
            scale.pitches().len(),
            scale
        )),
        item("Every beat plays its note on each selected beat type".into()),
        example(format!("\"{EXAMPLE}\" → {}", notes.join(" "))),
        Line::default(),
        heading("Beat types"),
        item(voices.join(", ")),
        item("Bass plays an octave down; percussion keeps its own pitch".into()),
        Line::default(),
        heading("Advanced"),
        item(format!("Scales: {}", scales.join(", "))),
        item(format!("Tempo: {} to {} BPM", Tempo::MIN, Tempo::MAX)),
        Line::default(),
        heading("Tips"),
        item("Short phrases give tighter rhythms".into()),
        item("Try the same text with different beat types and scales".into()),
        item("[R] picks a random phrase; [C] records to a WAV file".into()),
        Line::default(),
        Line::from(Span::styled(
            "  Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Render the guide centred over `area`
pub fn render_guide(frame: &mut Frame, area: Rect, scale: Scale) {
    let [area] = Layout::horizontal([Constraint::Percentage(80)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Percentage(90)])
        .flex(Flex::Center)
        .areas(area);

    let guide = Paragraph::new(guide_lines(scale))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" How it works ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(guide, area);
}
