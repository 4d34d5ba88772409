//! Tabbed picker: instruments on one tab, tempo and scale on the other

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use wordbeats::{
    controller::{AppState, Tab},
    sequencing::Scale,
    voices::Instrument,
};

/// Entries on the active tab.
pub fn entry_count(tab: Tab) -> usize {
    match tab {
        Tab::BeatType => Instrument::ALL.len(),
        Tab::Advanced => Scale::ALL.len(),
    }
}

pub fn render_panel(frame: &mut Frame, area: Rect, state: &AppState, cursor: usize, focused: bool) {
    let titles = [Tab::BeatType, Tab::Advanced].map(Tab::title);
    let selected = match state.tab {
        Tab::BeatType => 0,
        Tab::Advanced => 1,
    };
    let border = if focused { Color::Cyan } else { Color::DarkGray };

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );

    let [tab_area, body_area] = split(area);
    frame.render_widget(tabs, tab_area);

    let entry = |idx: usize, label: String, on: bool| {
        let marker = if on { "[x] " } else { "[ ] " };
        let mut style = Style::default().fg(if on { Color::White } else { Color::Gray });
        if focused && idx == cursor {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }
        Span::styled(format!("{marker}{label:<12}"), style)
    };

    let spans: Vec<Span> = match state.tab {
        Tab::BeatType => Instrument::ALL
            .iter()
            .enumerate()
            .map(|(idx, &i)| entry(idx, i.to_string(), state.voices.contains(i)))
            .collect(),
        Tab::Advanced => Scale::ALL
            .iter()
            .enumerate()
            .map(|(idx, &s)| entry(idx, s.to_string(), state.scale == s))
            .collect(),
    };

    let mut lines = vec![Line::from(spans)];
    if state.tab == Tab::Advanced {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Tempo {}   [-]/[+] to change", state.tempo),
            Style::default().fg(Color::Cyan),
        )));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(body, body_area);
}

fn split(area: Rect) -> [Rect; 2] {
    let tab_height = area.height.min(3);
    [
        Rect { height: tab_height, ..area },
        Rect {
            y: area.y + tab_height,
            height: area.height - tab_height,
            ..area
        },
    ]
}
