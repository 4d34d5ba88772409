use crate::{
    compose::Composition,
    error::PlaybackError,
    sequencing::Pitch,
    settings::{Tempo, VoiceSelection},
    synth::NoteSink,
    voices::Instrument,
};

/// Everything one run of playback needs, captured when play is pressed.
///
/// Sessions are immutable and never resumed: stopping drops the session and
/// the next play builds a fresh one from the current inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSession {
    composition: Composition,
    tempo: Tempo,
    voices: VoiceSelection,
}

impl PlaybackSession {
    pub fn new(composition: Composition, tempo: Tempo, voices: VoiceSelection) -> Self {
        Self {
            composition,
            tempo,
            voices,
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn voices(&self) -> &VoiceSelection {
        &self.voices
    }

    /// Index into the pattern for a step count, wrapping around.
    pub fn position(&self, step: u64) -> Option<usize> {
        let len = self.composition.len();
        (len > 0).then(|| (step % len as u64) as usize)
    }

    /// The notes step `step` triggers: nothing on a rest, otherwise the
    /// step's note on every selected instrument.
    pub fn triggers(&self, step: u64) -> impl Iterator<Item = (Instrument, Pitch)> + '_ {
        let note = self.composition.beat_at(step);
        self.voices
            .iter()
            .filter_map(move |instrument| note.map(|note| (instrument, note)))
    }

    /// Send the step's notes to `sink`. Every instrument is tried; the first
    /// failure is returned.
    pub fn fire(&self, step: u64, sink: &mut dyn NoteSink) -> Result<(), PlaybackError> {
        let mut result = Ok(());
        for (instrument, note) in self.triggers(step) {
            if let Err(err) = sink.note_on(instrument, note) {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }
}
