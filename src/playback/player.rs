use std::sync::Arc;

use log::{debug, error, warn};

use crate::{
    compose::{compose, resolve_text},
    engine::{AudioEngine, StepCallback},
    error::{EngineError, PlaybackError},
    playback::session::PlaybackSession,
    record::{Recorder, Recording},
    sequencing::Scale,
    settings::{Tempo, VoiceSelection},
    synth::NoteSink,
};

/*
Playback State Machine
======================

            play()                engine started,
  Idle ───────────────→ Preparing ─────────────────→ Playing
   ↑                       │       callback scheduled    │
   │   engine start failed │                             │ stop()
   └───────────────────────┴─────────────────────────────┘

Preparing only exists while `play` runs. A failed start goes straight back
to Idle; it is reported once and not retried.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Preparing,
    Playing,
}

/// The inputs of one play request.
#[derive(Debug, Clone, Copy)]
pub struct PlayRequest<'a> {
    pub text: &'a str,
    pub scale: Scale,
    pub tempo: Tempo,
    pub voices: &'a VoiceSelection,
    /// Capture the master bus from the first step.
    pub record: bool,
}

pub struct Player<E> {
    engine: E,
    state: PlayerState,
    session: Option<Arc<PlaybackSession>>,
}

impl<E: AudioEngine> Player<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: PlayerState::Idle,
            session: None,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_deref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Pattern index of the step that fired most recently.
    pub fn current_step(&self) -> Option<usize> {
        let session = self.session.as_ref()?;
        let fired = self.engine.steps_fired();
        if fired == 0 {
            return None;
        }
        session.position(fired - 1)
    }

    /// Start a fresh session. Anything already playing is stopped first and
    /// its recording discarded.
    pub fn play(&mut self, request: PlayRequest<'_>) -> Result<Arc<PlaybackSession>, EngineError> {
        if self.state != PlayerState::Idle {
            warn!("play requested while playing; restarting");
            if self.stop().is_some() {
                warn!("discarded the recording of the interrupted session");
            }
        }

        self.state = PlayerState::Preparing;
        if let Err(err) = self.engine.start() {
            error!("could not start audio: {err}");
            self.state = PlayerState::Idle;
            return Err(err);
        }

        let text = resolve_text(request.text);
        let session = Arc::new(PlaybackSession::new(
            compose(text, request.scale),
            request.tempo,
            request.voices.clone(),
        ));

        // Attach before scheduling so step 0 is captured.
        if request.record {
            let recorder = Recorder::new(self.engine.sample_rate());
            self.engine.attach_recorder(recorder);
        }

        let step_session = Arc::clone(&session);
        let callback: StepCallback = Box::new(move |step, sink: &mut dyn NoteSink| {
            step_session.fire(step, sink)
        });
        if let Err(err) = self.engine.schedule(request.tempo, callback) {
            error!("could not schedule playback: {err}");
            self.engine.detach_recorder();
            self.state = PlayerState::Idle;
            return Err(err);
        }

        debug!(
            "playing {:?} ({} steps) at {} on {}",
            session.composition().text().as_str(),
            session.composition().len(),
            request.tempo,
            request.voices
        );
        self.session = Some(Arc::clone(&session));
        self.state = PlayerState::Playing;
        Ok(session)
    }

    /// Cancel the step callback, silence the voices and return what was
    /// recorded, if recording was armed. No note starts after this returns.
    pub fn stop(&mut self) -> Option<Recording> {
        self.engine.cancel();
        let recording = self.engine.detach_recorder().map(Recorder::finish);

        if self.session.take().is_some() {
            debug!("playback stopped");
        }
        self.state = PlayerState::Idle;
        recording
    }

    /// Begin capturing the master bus mid-session, from the next block on.
    /// Returns `false` when idle or when a recorder is already attached.
    pub fn start_recording(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        if let Some(existing) = self.engine.detach_recorder() {
            self.engine.attach_recorder(existing);
            return false;
        }
        self.engine
            .attach_recorder(Recorder::new(self.engine.sample_rate()));
        debug!("recording started");
        true
    }

    /// Detach the recorder and finish it while playback continues.
    pub fn finish_recording(&mut self) -> Option<Recording> {
        let recording = self.engine.detach_recorder().map(Recorder::finish)?;
        debug!("recording finished mid-session");
        Some(recording)
    }

    /// A step failure reported by the engine since the last poll.
    pub fn poll_fault(&mut self) -> Option<PlaybackError> {
        self.engine.take_fault()
    }
}
