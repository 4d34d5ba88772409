//! What the visualiser draws: spectrum bars while playing, a still sine
//! while idle.
//!
//! The audio side feeds master-bus samples through the
//! [`AnalyserTap`](crate::engine::AnalyserTap) ring; [`Visualizer`] drains the
//! other end on the UI thread and keeps the latest window for analysis.

mod palette;
mod spectrum;

use rtrb::Consumer;

pub use palette::{Palette, Rgb};
pub use spectrum::{bar_height, SpectrumAnalyzer, FFT_SIZE, MIN_DB};

/// Horizontal stretch of the idle wave, in columns per radian.
const IDLE_PERIOD: f64 = 15.0;
/// Idle wave amplitude as a fraction of the drawing height.
const IDLE_AMPLITUDE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    /// Bar heights in `0.0..=1.0`, lowest frequency first.
    Bars(Vec<f32>),
    /// `(x, y)` points of the idle wave, y as a fraction of the height
    /// centred on zero.
    Idle(Vec<(f64, f64)>),
}

pub struct Visualizer {
    audio_rx: Consumer<f32>,
    window: Vec<f32>,
    analyzer: SpectrumAnalyzer,
}

impl Visualizer {
    pub fn new(audio_rx: Consumer<f32>) -> Self {
        Self {
            audio_rx,
            window: vec![0.0; FFT_SIZE],
            analyzer: SpectrumAnalyzer::new(FFT_SIZE),
        }
    }

    /// Drain the ring, keeping only the newest `FFT_SIZE` samples.
    pub fn poll(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }

        let Ok(chunk) = self.audio_rx.read_chunk(available) else {
            return;
        };
        let (first, second) = chunk.as_slices();
        let incoming = first.iter().chain(second);
        let skip = available.saturating_sub(FFT_SIZE);
        let keep = available - skip;

        self.window.drain(..keep);
        self.window.extend(incoming.skip(skip).copied());
        chunk.commit_all();
    }

    pub fn window(&self) -> &[f32] {
        &self.window
    }

    pub fn scene(&mut self, playing: bool, width: usize) -> Scene {
        if playing {
            self.analyzer.update(&self.window);
            Scene::Bars(self.analyzer.bars(width.max(1)))
        } else {
            Scene::Idle(idle_wave(width))
        }
    }
}

/// `sin(x / 15)` at a tenth of the height, one point per column.
pub fn idle_wave(width: usize) -> Vec<(f64, f64)> {
    (0..width)
        .map(|x| {
            let x = x as f64;
            (x, (x / IDLE_PERIOD).sin() * IDLE_AMPLITUDE)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::analyser_channel;

    #[test]
    fn keeps_latest_window() {
        let (mut tap, rx) = analyser_channel(4 * FFT_SIZE);
        let mut vis = Visualizer::new(rx);

        let samples: Vec<f32> = (0..1500).map(|i| i as f32).collect();
        tap.push_block(&samples);
        vis.poll();

        assert_eq!(vis.window().len(), FFT_SIZE);
        assert_eq!(vis.window()[FFT_SIZE - 1], 1499.0);
        assert_eq!(vis.window()[0], (1500 - FFT_SIZE) as f32);
    }

    #[test]
    fn short_bursts_shift_the_window() {
        let (mut tap, rx) = analyser_channel(FFT_SIZE);
        let mut vis = Visualizer::new(rx);
        tap.push_block(&[1.0, 2.0]);
        vis.poll();

        assert_eq!(vis.window().len(), FFT_SIZE);
        assert_eq!(&vis.window()[FFT_SIZE - 2..], &[1.0, 2.0]);
        assert_eq!(vis.window()[0], 0.0);
    }

    #[test]
    fn idle_scene_is_a_small_sine() {
        let (_tap, rx) = analyser_channel(16);
        let mut vis = Visualizer::new(rx);
        let Scene::Idle(points) = vis.scene(false, 100) else {
            panic!("expected idle scene");
        };

        assert_eq!(points.len(), 100);
        assert_eq!(points[0], (0.0, 0.0));
        assert!(points.iter().all(|&(_, y)| y.abs() <= 0.1));
    }

    #[test]
    fn playing_scene_has_bars() {
        let (_tap, rx) = analyser_channel(16);
        let mut vis = Visualizer::new(rx);
        assert!(matches!(vis.scene(true, 24), Scene::Bars(bars) if bars.len() == 24));
    }
}
