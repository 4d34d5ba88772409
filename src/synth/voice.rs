use crate::{
    graph::node::{GraphNode, RenderCtx},
    voices::{Instrument, InstrumentSpec, Patch},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Gate open, envelope in attack/decay/sustain
    Releasing, // Gate closed, envelope in release phase
}

/// A pooled voice. Plays whichever instrument it was last started with and
/// closes its own gate after a fixed number of samples.
pub struct Voice {
    instrument: Instrument,
    frequency: f32,
    state: VoiceState,
    age: u64,
    gate_remaining: u32,
    sample_rate: f32,
    patch: Patch,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            instrument: Instrument::default(),
            frequency: 0.0,
            state: VoiceState::Free,
            age: 0,
            gate_remaining: 0,
            sample_rate,
            patch: Patch::new(),
        }
    }

    fn ctx(&self) -> RenderCtx {
        RenderCtx::from_freq(self.sample_rate, self.frequency, 1.0)
    }

    pub fn start(
        &mut self,
        instrument: Instrument,
        spec: &InstrumentSpec,
        frequency: f32,
        gate_samples: u32,
        age: u64,
    ) {
        self.instrument = instrument;
        self.frequency = frequency;
        self.state = VoiceState::Active;
        self.age = age;
        self.gate_remaining = gate_samples.max(1);

        self.patch.configure(spec);
        let ctx = self.ctx();
        self.patch.note_on(&ctx);
    }

    pub fn release(&mut self) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            self.gate_remaining = 0;

            let ctx = self.ctx();
            self.patch.note_off(&ctx);
        }
    }

    /// Render into `out` (overwrites). Closes the gate mid-block when due.
    pub fn render(&mut self, out: &mut [f32]) {
        let ctx = self.ctx();

        if self.state == VoiceState::Active && (self.gate_remaining as usize) < out.len() {
            let (held, released) = out.split_at_mut(self.gate_remaining as usize);
            self.patch.render_block(held, &ctx);
            self.release();
            self.patch.render_block(released, &ctx);
        } else {
            self.patch.render_block(out, &ctx);
            if self.state == VoiceState::Active {
                self.gate_remaining -= out.len() as u32;
            }
        }

        // If voice is releasing and envelope has finished, mark as free
        if self.state == VoiceState::Releasing && !self.patch.is_active() {
            self.free();
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    pub fn get_envelope_level(&self) -> Option<f32> {
        self.patch.get_envelope_level()
    }

    pub fn free(&mut self) {
        self.state = VoiceState::Free;
        self.gate_remaining = 0;
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }
}
