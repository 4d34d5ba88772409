//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::voices::Instrument;

/// The audio engine could not be brought up or driven.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The platform refused audio output. The user has to ask again.
    #[error("audio engine failed to start: {0}")]
    Initialization(String),

    #[error("audio engine is not running")]
    NotStarted,

    #[error("audio stream error: {0}")]
    Stream(String),
}

/// Failure while constructing or triggering voices during a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("no free voice to play {instrument} (pool of {pool})")]
    VoicePoolExhausted { instrument: Instrument, pool: usize },

    #[error("engine failed while playing: {0}")]
    Engine(String),
}

impl From<EngineError> for PlaybackError {
    fn from(err: EngineError) -> Self {
        PlaybackError::Engine(err.to_string())
    }
}

/// Invalid user-facing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("tempo {bpm} BPM is outside {min}..={max}")]
    TempoOutOfRange { bpm: u16, min: u16, max: u16 },

    #[error("unknown scale {0:?}")]
    UnknownScale(String),

    #[error("unknown instrument {0:?}")]
    UnknownInstrument(String),

    #[error("at least one instrument must stay selected")]
    EmptySelection,

    #[error("sample rate must be positive")]
    InvalidSampleRate,
}

/// Failure while encoding or saving a recording.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("nothing was recorded")]
    Empty,

    #[error("wav encoding failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
