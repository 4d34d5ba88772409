use log::warn;

use crate::{
    error::PlaybackError,
    sequencing::pitch::Pitch,
    synth::{
        message::NoteSink,
        voice::{Voice, VoiceState},
    },
    voices::Instrument,
    MAX_BLOCK_SIZE,
};

/// Large enough that twenty instruments at the fastest tempo never hold more
/// gates open than there are voices.
pub const DEFAULT_POLYPHONY: usize = 128;

/// Fixed pool of voices shared by every instrument.
pub struct PolySynth {
    voices: Vec<Voice>,
    temp_buffer: Vec<f32>,
    frame_counter: u64,
    samples_per_step: u32,
}

impl PolySynth {
    pub fn new(sample_rate: f32, max_voices: usize) -> Self {
        let voices = (0..max_voices.max(1))
            .map(|_| Voice::new(sample_rate))
            .collect();

        Self {
            voices,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
            samples_per_step: 1,
        }
    }

    /// Gate lengths are counted in steps; this sets how long a step is.
    pub fn set_samples_per_step(&mut self, samples: u32) {
        self.samples_per_step = samples.max(1);
    }

    pub fn capacity(&self) -> usize {
        self.voices.len()
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Start `instrument` on `note`, stealing the oldest releasing voice if
    /// nothing is free.
    pub fn trigger(&mut self, instrument: Instrument, note: Pitch) -> Result<(), PlaybackError> {
        let spec = instrument.spec();
        let frequency = spec.frequency_for(note);
        let gate = spec.length.steps() * self.samples_per_step;
        let age = self.frame_counter;
        let pool = self.voices.len();

        match self.allocate_voice() {
            Some(voice) => {
                voice.start(instrument, &spec, frequency, gate, age);
                Ok(())
            }
            None => {
                warn!("voice pool exhausted, dropping {instrument}");
                Err(PlaybackError::VoicePoolExhausted { instrument, pool })
            }
        }
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        for voice in &mut self.voices {
            if voice.is_active() {
                let frames = &mut self.temp_buffer[..out.len()];
                voice.render(frames);

                for (o, v) in out.iter_mut().zip(frames.iter()) {
                    *o += v;
                }
            }
        }

        self.frame_counter += out.len() as u64;
    }

    /// Stop every voice immediately.
    pub fn silence(&mut self) {
        for voice in &mut self.voices {
            voice.free();
        }
    }

    fn allocate_voice(&mut self) -> Option<&mut Voice> {
        // First pass: find free voice index
        let free_idx = self.voices.iter().position(|v| v.is_free());
        if let Some(idx) = free_idx {
            return Some(&mut self.voices[idx]);
        }

        // Second pass: steal oldest releasing voice
        let steal_idx = self
            .voices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.state() == VoiceState::Releasing)
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx);

        steal_idx.map(|idx| &mut self.voices[idx])
    }
}

impl NoteSink for PolySynth {
    fn note_on(&mut self, instrument: Instrument, note: Pitch) -> Result<(), PlaybackError> {
        self.trigger(instrument, note)
    }
}
