#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
Naive (non band-limited) oscillators. At sixteenth-note lengths the aliasing
of the sharp waveforms is part of the toy-synth character.

Phase runs 0.0..1.0 and advances by frequency / sample_rate per sample.

  sine      sin(2π·phase)
  triangle  1 - 4·|phase - 0.5|        (starts at -1, peaks at phase 0.5)
  sawtooth  2·phase - 1
  square    +1 below phase 0.5, -1 above
  white     xorshift32 mapped to -1..1
  pink      white noise through Paul Kellet's economy filter
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
    Square,
    WhiteNoise,
    PinkNoise,
}

impl Waveform {
    pub fn is_noise(self) -> bool {
        matches!(self, Waveform::WhiteNoise | Waveform::PinkNoise)
    }
}

pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
    rng_state: u32,
    pink: [f32; 3],
}

const NOISE_SEED: u32 = 0x9E37_79B9;

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            rng_state: NOISE_SEED,
            pink: [0.0; 3],
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

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Switch shape and restart the cycle.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.pink = [0.0; 3];
    }

    fn white(&mut self) -> f32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = match self.waveform {
            Waveform::Sine => (std::f32::consts::TAU * self.phase).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::WhiteNoise => self.white(),
            Waveform::PinkNoise => {
                let white = self.white();
                let [b0, b1, b2] = &mut self.pink;
                *b0 = 0.99765 * *b0 + white * 0.099_046;
                *b1 = 0.963 * *b1 + white * 0.296_516_4;
                *b2 = 0.57 * *b2 + white * 1.052_691_3;
                ((*b0 + *b1 + *b2 + white * 0.1848) * 0.2).clamp(-1.0, 1.0)
            }
        };

        if !self.waveform.is_noise() {
            self.phase += frequency / sample_rate;
            self.phase -= self.phase.floor();
        }

        value
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(ctx.frequency, ctx.sample_rate);
        }
    }
}
