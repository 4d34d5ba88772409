//! FFT spectrum analysis for the bar visualiser.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Analysis window length.
pub const FFT_SIZE: usize = 1024;

/// Floor of the displayed range. A bin at this level draws a zero-height bar.
pub const MIN_DB: f32 = -140.0;

/// Bars cover the lowest part of the spectrum only (0 to ~9.6 kHz at 48 kHz).
const DISPLAY_FRACTION: f32 = 0.4;

/// Spectrum analyzer with FFT processing
pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// FFT processor
    fft: Arc<dyn Fft<f32>>,
    /// Scratch buffer for FFT computation
    scratch: Vec<Complex<f32>>,
    /// Magnitude of each bin below Nyquist, in dB
    magnitudes_db: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_size: usize) -> Self {
        let fft_size = fft_size.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        // Hann window - reduces spectral leakage
        let denom = (fft_size - 1) as f32;
        let window = (0..fft_size)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            magnitudes_db: vec![MIN_DB; fft_size / 2],
        }
    }

    pub fn fft_size(&self) -> usize {
        self.window.len()
    }

    /// Analyse one window of samples. Buffers of the wrong length are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        let n = self.window.len() as f32;
        for (db, bin) in self.magnitudes_db.iter_mut().zip(&self.scratch) {
            let magnitude = bin.norm() / n;
            *db = 20.0 * magnitude.max(1e-10).log10();
        }
    }

    pub fn magnitudes_db(&self) -> &[f32] {
        &self.magnitudes_db
    }

    /// `count` bar heights in `0.0..=1.0`, each the average of a run of bins.
    pub fn bars(&self, count: usize) -> Vec<f32> {
        let shown = ((self.magnitudes_db.len() as f32 * DISPLAY_FRACTION) as usize).max(1);
        let count = count.clamp(1, shown);
        let per_bar = shown as f32 / count as f32;

        (0..count)
            .map(|bar| {
                let start = (bar as f32 * per_bar) as usize;
                let end = (((bar + 1) as f32 * per_bar) as usize).clamp(start + 1, shown);
                let bins = &self.magnitudes_db[start..end];
                bins.iter().map(|&db| bar_height(db)).sum::<f32>() / bins.len() as f32
            })
            .collect()
    }
}

/// Map a level in dB onto a bar height: `(db + 140) / 140`, clamped.
pub fn bar_height(db: f32) -> f32 {
    ((db - MIN_DB) / -MIN_DB).clamp(0.0, 1.0)
}
