use std::sync::{Arc, Mutex};

use log::{debug, error};

use crate::{
    engine::{lock, AudioEngine, SharedTransport, StepCallback, Transport},
    error::{EngineError, PlaybackError},
    record::Recorder,
    settings::Tempo,
};

/// An engine with no device: audio is produced only when [`render`] is
/// called. Drives the `render` command and the tests.
///
/// [`render`]: OfflineEngine::render
pub struct OfflineEngine {
    transport: SharedTransport,
    started: bool,
    refuse_start: Option<String>,
}

impl OfflineEngine {
    pub fn new(sample_rate: u32) -> Self {
        Self::with_transport(Transport::new(sample_rate))
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self {
            transport: Arc::new(Mutex::new(transport)),
            started: false,
            refuse_start: None,
        }
    }

    /// An engine whose `start` always fails, as when the platform denies
    /// audio output.
    pub fn refusing(sample_rate: u32, reason: impl Into<String>) -> Self {
        Self {
            refuse_start: Some(reason.into()),
            ..Self::new(sample_rate)
        }
    }

    pub fn transport(&self) -> SharedTransport {
        Arc::clone(&self.transport)
    }

    /// Render `frames` samples of mono output.
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        lock(&self.transport).process(&mut out);
        out
    }
}

impl AudioEngine for OfflineEngine {
    fn start(&mut self) -> Result<(), EngineError> {
        if self.started {
            return Ok(());
        }
        if let Some(reason) = &self.refuse_start {
            error!("offline engine refused to start: {reason}");
            return Err(EngineError::Initialization(reason.clone()));
        }
        self.started = true;
        debug!("offline engine started");
        Ok(())
    }

    fn is_started(&self) -> bool {
        self.started
    }

    fn sample_rate(&self) -> u32 {
        lock(&self.transport).sample_rate()
    }

    fn schedule(&mut self, tempo: Tempo, callback: StepCallback) -> Result<(), EngineError> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        lock(&self.transport).schedule(tempo, callback);
        Ok(())
    }

    fn cancel(&mut self) {
        lock(&self.transport).cancel();
    }

    fn steps_fired(&self) -> u64 {
        lock(&self.transport).steps_fired()
    }

    fn attach_recorder(&mut self, recorder: Recorder) {
        lock(&self.transport).attach_recorder(recorder);
    }

    fn detach_recorder(&mut self) -> Option<Recorder> {
        lock(&self.transport).detach_recorder()
    }

    fn take_fault(&mut self) -> Option<PlaybackError> {
        lock(&self.transport).take_fault()
    }
}
