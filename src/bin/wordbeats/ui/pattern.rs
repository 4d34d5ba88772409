//! Pattern widget - the normalized text, its steps and notes, with playhead

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use wordbeats::compose::{Composition, Step};

/// Steps per displayed group, matching the grouped pattern notation.
const GROUP: usize = 4;
/// Each step is drawn as a cell this wide.
const CELL: usize = 4;

/// Render the pattern with the current step highlighted
pub fn render_pattern(frame: &mut Frame, area: Rect, composition: &Composition, step: Option<usize>) {
    let block = Block::default()
        .title(format!(" Pattern  {} ", composition.pattern().grouped()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width < CELL as u16 || composition.is_empty() {
        return;
    }

    let per_row = ((inner.width as usize / (CELL + 1)) / GROUP).max(1) * GROUP;
    let text = composition.text().as_str().as_bytes();
    let mut lines = Vec::new();

    for row_start in (0..composition.len()).step_by(per_row) {
        let row_end = (row_start + per_row).min(composition.len());
        let mut chars = Vec::new();
        let mut steps = Vec::new();
        let mut notes = Vec::new();

        for idx in row_start..row_end {
            let style = if Some(idx) == step {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let gap = if idx > row_start && (idx - row_start) % GROUP == 0 {
                " "
            } else {
                ""
            };
            let beat = composition.pattern()[idx];

            chars.push(Span::raw(gap));
            chars.push(Span::styled(
                format!("{:<CELL$}", text[idx] as char),
                style.fg(if Some(idx) == step { Color::Black } else { Color::DarkGray }),
            ));

            steps.push(Span::raw(gap));
            steps.push(Span::styled(
                format!("{:<CELL$}", beat.symbol()),
                style.fg(match (Some(idx) == step, beat) {
                    (true, _) => Color::Black,
                    (false, Step::Beat) => Color::Cyan,
                    (false, Step::Rest) => Color::DarkGray,
                }),
            ));

            notes.push(Span::raw(gap));
            notes.push(Span::styled(
                format!("{:<CELL$}", composition.notes()[idx].to_string()),
                style.fg(if Some(idx) == step { Color::Black } else { Color::Gray }),
            ));
        }

        lines.push(Line::from(chars));
        lines.push(Line::from(steps));
        lines.push(Line::from(notes));
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}
