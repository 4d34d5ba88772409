//! The seam between playback and whatever produces sound.
//!
//! [`AudioEngine`] is what the player talks to. Implementations share one
//! render-side [`transport::Transport`] behind a mutex: the offline engine
//! renders it on demand, the device engine in the binary renders it from
//! the audio callback.

pub mod clock;
pub mod offline;
pub mod tap;
pub mod transport;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use clock::StepClock;
pub use offline::OfflineEngine;
pub use tap::{analyser_channel, AnalyserTap};
pub use transport::Transport;

use crate::{
    error::{EngineError, PlaybackError},
    record::Recorder,
    settings::Tempo,
    synth::NoteSink,
};

/// Called once per sixteenth-note step with the step index since scheduling.
pub type StepCallback =
    Box<dyn FnMut(u64, &mut dyn NoteSink) -> Result<(), PlaybackError> + Send>;

pub type SharedTransport = Arc<Mutex<Transport>>;

/// Lock the transport, recovering the guard if a render panicked while
/// holding it.
pub fn lock(transport: &SharedTransport) -> MutexGuard<'_, Transport> {
    transport.lock().unwrap_or_else(PoisonError::into_inner)
}

pub trait AudioEngine {
    /// Bring the engine up. Idempotent; calling it again once started is a no-op.
    fn start(&mut self) -> Result<(), EngineError>;

    fn is_started(&self) -> bool;

    fn sample_rate(&self) -> u32;

    /// Register the recurring step callback. Replaces any previous one.
    fn schedule(&mut self, tempo: Tempo, callback: StepCallback) -> Result<(), EngineError>;

    /// Release the callback and silence every voice. Once this returns the
    /// callback is never invoked again.
    fn cancel(&mut self);

    /// Steps fired since the last `schedule`.
    fn steps_fired(&self) -> u64;

    fn attach_recorder(&mut self, recorder: Recorder);

    fn detach_recorder(&mut self) -> Option<Recorder>;

    /// The first step failure since the last call, if any.
    fn take_fault(&mut self) -> Option<PlaybackError>;
}
