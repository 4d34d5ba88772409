use crate::{error::PlaybackError, sequencing::pitch::Pitch, voices::Instrument};

/// One note-on requested by the step callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub instrument: Instrument,
    pub note: Pitch,
}

/// Anything the step callback can trigger notes on.
///
/// The instrument decides what `note` means: bass drops an octave, fixed
/// voices ignore it, noise voices only use the timing.
pub trait NoteSink {
    fn note_on(&mut self, instrument: Instrument, note: Pitch) -> Result<(), PlaybackError>;
}

/// Collects events instead of sounding them.
impl NoteSink for Vec<NoteEvent> {
    fn note_on(&mut self, instrument: Instrument, note: Pitch) -> Result<(), PlaybackError> {
        self.push(NoteEvent { instrument, note });
        Ok(())
    }
}
