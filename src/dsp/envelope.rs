use crate::{graph::node::RenderCtx, MIN_TIME};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Linear ADSR Envelope
====================

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

Per-sample increment = target_change / (time_seconds * sample_rate).

Gate high (note_on) restarts Attack from zero. Gate low (note_off) enters
Release from whatever the current level is, so releasing mid-attack does
not click. Percussive shapes use sustain 0: the level decays to silence
while the gate is still high and the envelope parks in Sustain at 0.0
until note_off ends it.
*/

/// Envelope shape in seconds, sustain as a level 0.0-1.0.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Adsr {
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    fn sanitized(self) -> Self {
        Self {
            attack: self.attack.max(MIN_TIME),
            decay: self.decay.max(MIN_TIME),
            sustain: self.sustain.clamp(0.0, 1.0),
            release: self.release.max(MIN_TIME),
        }
    }
}

impl Default for Adsr {
    fn default() -> Self {
        Self::new(0.01, 0.1, 0.7, 0.3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    shape: Adsr,
    stage: EnvelopeState,
    level: f32,
    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn new(shape: Adsr) -> Self {
        Self {
            shape: shape.sanitized(),
            stage: EnvelopeState::Idle,
            level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self::new(Adsr::new(attack, decay, sustain, release))
    }

    /// Replace the shape. Takes effect from the next stage transition.
    pub fn set_shape(&mut self, shape: Adsr) {
        self.shape = shape.sanitized();
    }

    pub fn shape(&self) -> Adsr {
        self.shape
    }

    pub fn note_on(&mut self, _ctx: &RenderCtx) {
        self.level = 0.0;
        self.stage = EnvelopeState::Attack;
        self.release_elapsed_samples = 0;
    }

    pub fn note_off(&mut self, ctx: &RenderCtx) {
        if self.stage == EnvelopeState::Idle {
            return;
        }
        self.release_start_level = self.level;
        self.release_total_samples = (self.shape.release * ctx.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Release;
    }

    pub fn next_sample(&mut self, ctx: &RenderCtx) -> f32 {
        match self.stage {
            EnvelopeState::Idle => self.level = 0.0,

            EnvelopeState::Attack => {
                self.level += 1.0 / (self.shape.attack * ctx.sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                let target = self.shape.sustain;
                self.level -= (1.0 - target) / (self.shape.decay * ctx.sample_rate);
                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => self.level = self.shape.sustain,

            EnvelopeState::Release => {
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);
                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(ctx);
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.release_start_level = 0.0;
        self.release_elapsed_samples = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}
