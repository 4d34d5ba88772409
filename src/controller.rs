//! Application state and the actions that change it.
//!
//! The terminal UI never mutates [`AppState`] directly: every key press
//! becomes an [`Action`] handed to [`Controller::dispatch`]. Changing any
//! input that shapes the music stops playback, so what is heard always
//! matches what is on screen.

use std::path::PathBuf;

use log::{debug, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    compose::{compose, random_phrase, resolve_text, Composition},
    engine::AudioEngine,
    playback::{PlayRequest, Player},
    record::Recording,
    sequencing::Scale,
    settings::{Settings, Tempo, VoiceSelection},
    voices::Instrument,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    BeatType,
    Advanced,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::BeatType => "Beat Type",
            Tab::Advanced => "Advanced",
        }
    }

    pub fn other(self) -> Tab {
        match self {
            Tab::BeatType => Tab::Advanced,
            Tab::Advanced => Tab::BeatType,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub text: String,
    pub tempo: Tempo,
    pub scale: Scale,
    pub voices: VoiceSelection,
    pub tab: Tab,
    pub recording_armed: bool,
    pub last_recording: Option<PathBuf>,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(text: impl Into<String>, settings: &Settings) -> Self {
        Self {
            text: text.into(),
            tempo: settings.tempo,
            scale: settings.scale,
            voices: settings.voices.clone(),
            tab: Tab::default(),
            recording_armed: false,
            last_recording: None,
            notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    EditText(String),
    Randomize,
    SetTempo(u16),
    ToggleInstrument(Instrument),
    SelectScale(Scale),
    SwitchTab(Tab),
    ToggleRecording,
    TogglePlay,
    Dismiss,
}

pub struct Controller<E> {
    state: AppState,
    player: Player<E>,
    record_dir: PathBuf,
    rng: StdRng,
}

impl<E: AudioEngine> Controller<E> {
    pub fn new(engine: E, state: AppState, record_dir: impl Into<PathBuf>) -> Self {
        Self::with_rng(engine, state, record_dir, StdRng::from_entropy())
    }

    pub fn with_rng(
        engine: E,
        state: AppState,
        record_dir: impl Into<PathBuf>,
        rng: StdRng,
    ) -> Self {
        Self {
            state,
            player: Player::new(engine),
            record_dir: record_dir.into(),
            rng,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn player(&self) -> &Player<E> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player<E> {
        &mut self.player
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// What will play: the running session, or a preview of the current text.
    pub fn composition(&self) -> Composition {
        match self.player.session() {
            Some(session) => session.composition().clone(),
            None => compose(resolve_text(&self.state.text), self.state.scale),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {action:?}");
        match action {
            Action::EditText(text) => {
                self.stop_playback();
                self.state.text = text;
            }
            Action::Randomize => {
                self.stop_playback();
                self.state.text = random_phrase(&mut self.rng);
            }
            Action::SetTempo(bpm) => match Tempo::new(bpm) {
                Ok(tempo) if tempo == self.state.tempo => {}
                Ok(tempo) => {
                    self.stop_playback();
                    self.state.tempo = tempo;
                }
                Err(err) => {
                    warn!("{err}");
                    self.state.notice = Some(Notice::error(err.to_string()));
                }
            },
            Action::ToggleInstrument(instrument) => {
                self.stop_playback();
                if let Err(err) = self.state.voices.toggle(instrument) {
                    warn!("refused to deselect {instrument}: {err}");
                    self.state.notice = Some(Notice::error(err.to_string()));
                }
            }
            Action::SelectScale(scale) => {
                self.stop_playback();
                self.state.scale = scale;
            }
            Action::SwitchTab(tab) => {
                self.stop_playback();
                self.state.tab = tab;
            }
            Action::ToggleRecording => self.toggle_recording(),
            Action::TogglePlay => {
                if self.player.is_playing() {
                    self.stop_playback();
                } else {
                    self.play();
                }
            }
            Action::Dismiss => self.state.notice = None,
        }
    }

    /// Surface any step failure the engine reported since the last tick.
    pub fn tick(&mut self) {
        if let Some(fault) = self.player.poll_fault() {
            self.state.notice = Some(Notice::error(fault.to_string()));
        }
    }

    fn play(&mut self) {
        let resolved = resolve_text(&self.state.text);
        if resolved != self.state.text {
            self.state.text = resolved.to_string();
        }

        let request = PlayRequest {
            text: &self.state.text,
            scale: self.state.scale,
            tempo: self.state.tempo,
            voices: &self.state.voices,
            record: self.state.recording_armed,
        };
        if let Err(err) = self.player.play(request) {
            self.state.notice = Some(Notice::error(err.to_string()));
        }
    }

    /// Arming while idle records the next play. While playing the change
    /// applies at once: arming starts a capture, disarming saves it.
    fn toggle_recording(&mut self) {
        self.state.recording_armed = !self.state.recording_armed;
        if !self.player.is_playing() {
            return;
        }

        if self.state.recording_armed {
            self.player.start_recording();
        } else if let Some(recording) = self.player.finish_recording() {
            if recording.is_empty() {
                debug!("disarmed before any audio was captured");
            } else {
                self.store_recording(recording);
            }
        }
    }

    fn stop_playback(&mut self) {
        if !self.player.is_playing() {
            return;
        }
        if let Some(recording) = self.player.stop() {
            self.store_recording(recording);
        }
    }

    fn store_recording(&mut self, recording: Recording) {
        match recording.save(&self.record_dir) {
            Ok(path) => {
                self.state.notice = Some(Notice::info(format!(
                    "Saved {:.1}s recording to {}",
                    recording.duration().as_secs_f32(),
                    path.display()
                )));
                self.state.last_recording = Some(path);
            }
            Err(err) => {
                warn!("recording not saved: {err}");
                self.state.notice = Some(Notice::error(err.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compose::PLACEHOLDER_PHRASE, engine::OfflineEngine};

    fn controller(text: &str) -> Controller<OfflineEngine> {
        let state = AppState::new(text, &Settings::default());
        Controller::with_rng(
            OfflineEngine::new(48_000),
            state,
            std::env::temp_dir(),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn blank_text_becomes_placeholder_on_play() {
        let mut ctl = controller("   ");
        ctl.dispatch(Action::TogglePlay);
        assert!(ctl.is_playing());
        assert_eq!(ctl.state().text, PLACEHOLDER_PHRASE);
    }

    #[test]
    fn input_changes_stop_playback() {
        let actions = [
            Action::EditText("new words".into()),
            Action::Randomize,
            Action::SetTempo(90),
            Action::ToggleInstrument(Instrument::Piano),
            Action::SelectScale(Scale::Dorian),
            Action::SwitchTab(Tab::Advanced),
        ];
        for action in actions {
            let mut ctl = controller("hello");
            ctl.dispatch(Action::TogglePlay);
            assert!(ctl.is_playing());
            ctl.dispatch(action.clone());
            assert!(!ctl.is_playing(), "{action:?} kept playing");
        }
    }

    #[test]
    fn same_tempo_keeps_playing() {
        let mut ctl = controller("hello");
        ctl.dispatch(Action::TogglePlay);
        ctl.dispatch(Action::SetTempo(120));
        assert!(ctl.is_playing());
    }

    #[test]
    fn bad_tempo_is_a_notice() {
        let mut ctl = controller("hello");
        ctl.dispatch(Action::SetTempo(400));
        assert_eq!(ctl.state().tempo, Tempo::DEFAULT);
        assert_eq!(
            ctl.state().notice.as_ref().map(|n| n.kind),
            Some(NoticeKind::Error)
        );

        ctl.dispatch(Action::Dismiss);
        assert_eq!(ctl.state().notice, None);
    }

    #[test]
    fn last_instrument_cannot_be_removed() {
        let mut ctl = controller("hello");
        ctl.dispatch(Action::ToggleInstrument(Instrument::Drums));
        assert_eq!(ctl.state().voices.as_slice(), &[Instrument::Drums]);
        assert!(ctl.state().notice.is_some());
    }

    #[test]
    fn refused_engine_start_is_reported() {
        let state = AppState::new("hello", &Settings::default());
        let mut ctl = Controller::with_rng(
            OfflineEngine::refusing(48_000, "no device"),
            state,
            std::env::temp_dir(),
            StdRng::seed_from_u64(1),
        );
        ctl.dispatch(Action::TogglePlay);

        assert!(!ctl.is_playing());
        let notice = ctl.state().notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("no device"));
    }

    #[test]
    fn armed_recording_is_saved_on_stop() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new("hello", &Settings::default());
        let mut ctl = Controller::with_rng(
            OfflineEngine::new(48_000),
            state,
            dir.path(),
            StdRng::seed_from_u64(3),
        );

        ctl.dispatch(Action::ToggleRecording);
        ctl.dispatch(Action::TogglePlay);
        ctl.player_mut().engine_mut().render(12_000);
        ctl.dispatch(Action::TogglePlay);

        let path = ctl.state().last_recording.clone().unwrap();
        assert!(path.starts_with(dir.path()));
        assert!(path.exists());
    }

    fn recording_controller(dir: &std::path::Path) -> Controller<OfflineEngine> {
        let state = AppState::new("hello", &Settings::default());
        Controller::with_rng(
            OfflineEngine::new(48_000),
            state,
            dir,
            StdRng::seed_from_u64(5),
        )
    }

    fn saved_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn disarming_while_playing_saves_at_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = recording_controller(dir.path());

        ctl.dispatch(Action::ToggleRecording);
        ctl.dispatch(Action::TogglePlay);
        ctl.player_mut().engine_mut().render(4_800);
        ctl.dispatch(Action::ToggleRecording);

        assert!(ctl.is_playing());
        assert!(!ctl.state().recording_armed);
        let path = ctl.state().last_recording.clone().unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 4_800);

        ctl.player_mut().engine_mut().render(4_800);
        ctl.dispatch(Action::TogglePlay);
        assert_eq!(saved_files(dir.path()), 1);
        assert_eq!(ctl.state().last_recording, Some(path));
    }

    #[test]
    fn arming_while_playing_captures_from_then_on() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = recording_controller(dir.path());

        ctl.dispatch(Action::TogglePlay);
        ctl.player_mut().engine_mut().render(3_000);
        ctl.dispatch(Action::ToggleRecording);
        assert!(ctl.is_playing());
        let captured = ctl.player_mut().engine_mut().render(6_000);
        ctl.dispatch(Action::TogglePlay);

        let path = ctl.state().last_recording.clone().unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<f32> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples, captured);
        assert_eq!(saved_files(dir.path()), 1);
    }

    #[test]
    fn disarming_before_any_audio_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = recording_controller(dir.path());

        ctl.dispatch(Action::TogglePlay);
        ctl.dispatch(Action::ToggleRecording);
        ctl.dispatch(Action::ToggleRecording);

        assert!(ctl.is_playing());
        assert_eq!(ctl.state().last_recording, None);
        assert_eq!(ctl.state().notice, None);
        assert_eq!(saved_files(dir.path()), 0);
    }

    #[test]
    fn preview_follows_text_and_scale() {
        let mut ctl = controller("hello");
        assert_eq!(ctl.composition().pattern().to_string(), "xxxxx");
        ctl.dispatch(Action::SelectScale(Scale::Minor));
        assert_eq!(ctl.composition().scale(), Scale::Minor);
    }
}
