use crate::dsp::oscillator::{OscillatorBlock, Waveform};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Oscillator Node
===============

Wraps an oscillator block with the two pitch behaviours the voice table
needs on top of plain note tracking:

  fixed frequency   ignore the note and always sound at one pitch
                    (kick at C1, percussion at C4)

  pitch drop        start N octaves above the target and glide down over
                    a short time, the "membrane" sweep of a synth kick

  let kick = OscNode::sine().with_frequency(32.7).with_pitch_drop(3.32, 0.05);
*/

pub struct OscNode {
    osc: OscillatorBlock,
    /// If Some, ignores ctx.frequency and uses this instead.
    base_frequency: Option<f32>,
    drop_octaves: f32,
    drop_time: f32,
    /// Samples rendered since the last note-on, drives the pitch drop.
    elapsed: u32,
}

impl OscNode {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            base_frequency: None,
            drop_octaves: 0.0,
            drop_time: 0.0,
            elapsed: 0,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Sawtooth)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn noise() -> Self {
        Self::new(Waveform::WhiteNoise)
    }

    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.base_frequency = Some(freq);
        self
    }

    pub fn with_pitch_drop(mut self, octaves: f32, seconds: f32) -> Self {
        self.set_pitch_drop(octaves, seconds);
        self
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.osc.set_waveform(waveform);
    }

    pub fn set_frequency(&mut self, freq: Option<f32>) {
        self.base_frequency = freq;
    }

    pub fn set_pitch_drop(&mut self, octaves: f32, seconds: f32) {
        self.drop_octaves = octaves.max(0.0);
        self.drop_time = seconds.max(0.0);
    }

    fn sweep_ratio(&self, sample_rate: f32) -> f32 {
        if self.drop_octaves <= 0.0 || self.drop_time <= 0.0 {
            return 1.0;
        }
        let t = self.elapsed as f32 / sample_rate;
        let remaining = (1.0 - t / self.drop_time).max(0.0);
        2.0_f32.powf(self.drop_octaves * remaining)
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let base = self.base_frequency.unwrap_or(ctx.frequency);
        let nyquist = ctx.sample_rate * 0.5;

        for sample in out.iter_mut() {
            let freq = (base * self.sweep_ratio(ctx.sample_rate)).min(nyquist);
            *sample = self.osc.next_sample(freq, ctx.sample_rate);
            self.elapsed = self.elapsed.saturating_add(1);
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
        self.elapsed = 0;
    }
}
