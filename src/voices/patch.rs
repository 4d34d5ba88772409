//! One graph layout for every instrument.
//!
//! ```text
//!   OscNode ──→ FilterNode ──→ (× EnvNode) ──→ (× gain)
//! ```
//!
//! The oscillator shape, fixed pitch, pitch drop, filter mode and envelope
//! shape all come from an [`InstrumentSpec`] row. Reconfiguring only writes
//! fields, so a pooled voice can switch instrument from inside the audio
//! callback without allocating.

use crate::{
    dsp::envelope::Adsr,
    graph::{
        amplify::Amplify,
        envelope::EnvNode,
        extensions::NodeExt,
        filter::FilterNode,
        node::{GraphNode, RenderCtx},
        oscillator::OscNode,
        through::Through,
    },
    voices::{InstrumentSpec, PitchMode},
};

pub struct Patch {
    graph: Amplify<Through<OscNode, FilterNode>, EnvNode>,
    gain: f32,
}

impl Patch {
    pub fn new() -> Self {
        let graph = OscNode::sine()
            .through(FilterNode::bypass())
            .amplify(EnvNode::new(Adsr::default()));
        Self { graph, gain: 1.0 }
    }

    pub fn from_spec(spec: &InstrumentSpec) -> Self {
        let mut patch = Self::new();
        patch.configure(spec);
        patch
    }

    /// Rewire the patch for another instrument. Call before `note_on`.
    pub fn configure(&mut self, spec: &InstrumentSpec) {
        let osc = &mut self.graph.signal.source;
        osc.set_waveform(spec.waveform);
        osc.set_frequency(match spec.pitch {
            PitchMode::Fixed(pitch) => Some(pitch.frequency()),
            _ => None,
        });
        let (octaves, seconds) = spec.pitch_drop.unwrap_or((0.0, 0.0));
        osc.set_pitch_drop(octaves, seconds);

        self.graph.signal.filter.set_mode(spec.filter);

        self.graph.modulator.reset();
        self.graph.modulator.set_shape(spec.envelope);

        self.gain = spec.gain;
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphNode for Patch {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.graph.render_block(out, ctx);
        let gain = self.gain * ctx.velocity;
        for sample in out.iter_mut() {
            *sample *= gain;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.graph.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.graph.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.graph.get_envelope_level()
    }

    fn is_active(&self) -> bool {
        self.graph.is_active()
    }
}
