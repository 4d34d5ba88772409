//! Topology-preserving state-variable filter (Simper/Zavalishin form).
//!
//! Only the two responses the voice table uses are exposed.

use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterMode {
    LowPass(f32),
    HighPass(f32),
}

impl FilterMode {
    pub fn cutoff(self) -> f32 {
        match self {
            FilterMode::LowPass(hz) | FilterMode::HighPass(hz) => hz,
        }
    }
}

pub struct SVFilter {
    mode: FilterMode,
    ic1eq: f32,
    ic2eq: f32,
}

/// Damping for a Butterworth-like response (k = 1/Q, Q = 0.707).
const DAMPING: f32 = std::f32::consts::SQRT_2;

impl SVFilter {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            ic1eq: 0.0,
            ic2eq: 0.0,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterMode::LowPass(cutoff_hz))
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterMode::HighPass(cutoff_hz))
    }

    pub fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let nyquist = ctx.sample_rate * 0.5;
        let cutoff = self.mode.cutoff().clamp(10.0, nyquist * 0.99);
        let g = (PI * cutoff / ctx.sample_rate).tan();
        let h = 1.0 / (1.0 + g * (g + DAMPING));

        for sample in buffer.iter_mut() {
            let input = *sample;
            let v3 = input - self.ic2eq;
            let v1 = h * (self.ic1eq + g * v3);
            let v2 = self.ic2eq + g * v1;
            self.ic1eq = 2.0 * v1 - self.ic1eq;
            self.ic2eq = 2.0 * v2 - self.ic2eq;

            *sample = match self.mode {
                FilterMode::LowPass(_) => v2,
                FilterMode::HighPass(_) => input - DAMPING * v1 - v2,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(mut filter: SVFilter) -> f32 {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut buffer = vec![1.0; 512];
        filter.render(&mut buffer, &ctx);
        buffer[511]
    }

    #[test]
    fn lowpass_passes_dc() {
        assert!(settle(SVFilter::lowpass(500.0)) > 0.99);
    }

    #[test]
    fn highpass_blocks_dc() {
        assert!(settle(SVFilter::highpass(500.0)).abs() < 0.01);
    }
}
