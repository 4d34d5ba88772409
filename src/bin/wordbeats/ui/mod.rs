//! Terminal interface
//!
//! Text entry, instrument and scale pickers, the pattern with its playhead
//! and the spectrum view. Every change goes through the controller as an
//! `Action`; this module only owns cursor and focus.

mod guide;
mod panel;
mod pattern;
mod spectrum;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    DefaultTerminal, Frame,
};
use std::time::Duration;

use wordbeats::{
    controller::{Action, Controller, NoticeKind},
    engine::AudioEngine,
    sequencing::Scale,
    settings::Tempo,
    visual::{Palette, Scene, Visualizer},
    voices::Instrument,
};

use guide::render_guide;
use panel::{entry_count, render_panel};
use pattern::render_pattern;
use spectrum::render_spectrum;
use transport::{render_transport, AudioStats, TransportView};
use waveform::render_idle;

const TEMPO_STEP: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Text,
    Panel,
}

/// UI application state
pub struct UiApp<E> {
    controller: Controller<E>,
    visualizer: Visualizer,
    focus: Focus,
    cursor: usize,
    /// Spectrum width in bars, updated on each draw
    bars: usize,
    scene: Scene,
    show_guide: bool,
    should_quit: bool,
}

impl<E: AudioEngine> UiApp<E> {
    pub fn new(controller: Controller<E>, visualizer: Visualizer) -> Self {
        Self {
            controller,
            visualizer,
            focus: Focus::Panel,
            cursor: 0,
            bars: 32,
            scene: Scene::Idle(Vec::new()),
            show_guide: false,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.visualizer.poll();
            self.controller.tick();
            self.scene = self
                .visualizer
                .scene(self.controller.is_playing(), self.bars);

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }
        }

        if self.controller.is_playing() {
            self.controller.dispatch(Action::TogglePlay);
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Any key closes the guide
        if self.show_guide {
            self.show_guide = false;
            return;
        }

        match self.focus {
            Focus::Text => self.handle_text_key(key),
            Focus::Panel => self.handle_panel_key(key),
        }
    }

    fn handle_text_key(&mut self, key: KeyCode) {
        let mut text = self.controller.state().text.clone();
        match key {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
                self.focus = Focus::Panel;
                return;
            }
            _ => return,
        }
        self.controller.dispatch(Action::EditText(text));
    }

    fn handle_panel_key(&mut self, key: KeyCode) {
        let state = self.controller.state();
        let action = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::Char('e') => {
                self.focus = Focus::Text;
                None
            }
            KeyCode::Char('?') => {
                self.show_guide = true;
                None
            }
            KeyCode::Char(' ') => Some(Action::TogglePlay),
            KeyCode::Char('r') => Some(Action::Randomize),
            KeyCode::Char('c') => Some(Action::ToggleRecording),
            KeyCode::Char('d') => Some(Action::Dismiss),
            KeyCode::Char('t') => {
                self.cursor = 0;
                Some(Action::SwitchTab(state.tab.other()))
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                Some(Action::SetTempo(state.tempo.offset(TEMPO_STEP).bpm()))
            }
            KeyCode::Char('-') => Some(Action::SetTempo(state.tempo.offset(-TEMPO_STEP).bpm())),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(entry_count(state.tab) - 1);
                None
            }
            KeyCode::Enter => Some(self.pick()),
            _ => None,
        };

        if let Some(action) = action {
            self.controller.dispatch(action);
        }
    }

    fn pick(&self) -> Action {
        match self.controller.state().tab {
            wordbeats::controller::Tab::BeatType => {
                let idx = self.cursor.min(Instrument::ALL.len() - 1);
                Action::ToggleInstrument(Instrument::ALL[idx])
            }
            wordbeats::controller::Tab::Advanced => {
                let idx = self.cursor.min(Scale::ALL.len() - 1);
                Action::SelectScale(Scale::ALL[idx])
            }
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let state = self.controller.state();
        let composition = self.controller.composition();
        let step = self.controller.player().current_step();
        let palette = Palette::for_selection(&state.voices);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Length(3), // Text input
                Constraint::Length(10), // Pickers
                Constraint::Min(6),    // Pattern
                Constraint::Length(10), // Spectrum
                Constraint::Length(1), // Notice / help
            ])
            .split(area);

        let view = TransportView {
            state,
            playing: self.controller.is_playing(),
            step,
            steps: composition.len(),
            sample_rate: self.controller.player().engine().sample_rate(),
            stats: AudioStats::from_buffer(self.visualizer.window()),
        };
        render_transport(frame, chunks[0], &view);

        let editing = self.focus == Focus::Text;
        let input = Paragraph::new(if state.text.is_empty() && !editing {
            Span::styled(
                wordbeats::compose::PLACEHOLDER_PHRASE,
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(format!("{}{}", state.text, if editing { "▏" } else { "" }))
        })
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Text ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if editing {
                    Color::Cyan
                } else {
                    Color::DarkGray
                })),
        );
        frame.render_widget(input, chunks[1]);

        render_panel(frame, chunks[2], state, self.cursor, !editing);
        render_pattern(frame, chunks[3], &composition, step);

        // Each bar takes two columns inside the border
        self.bars = (chunks[4].width.saturating_sub(2) / 2).max(1) as usize;
        match &self.scene {
            Scene::Bars(heights) => render_spectrum(frame, chunks[4], heights, palette),
            Scene::Idle(points) => render_idle(frame, chunks[4], points, palette),
        }

        let footer = match &state.notice {
            Some(notice) => Line::from(Span::styled(
                format!(" {}  [D] Dismiss", notice.message),
                Style::default().fg(match notice.kind {
                    NoticeKind::Info => Color::Green,
                    NoticeKind::Error => Color::Red,
                }),
            )),
            None => Line::from(Span::styled(
                format!(
                    " [Space] Play/Stop  [E] Edit  [R] Random  [T] Tab  [←/→/Enter] Pick  [-/+] Tempo ({}-{})  [C] Rec  [?] Guide  [Q] Quit",
                    Tempo::MIN,
                    Tempo::MAX
                ),
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(footer), chunks[5]);

        if self.show_guide {
            render_guide(frame, area, state.scale);
        }
    }
}
