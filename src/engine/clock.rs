/*
Step Clock
==========

One step is a sixteenth note. At tempo `bpm` there are `bpm / 60` beats per
second and four steps per beat:

  samples_per_step = sample_rate / ((bpm / 60) * 4)

  120 BPM @ 48 kHz  →  6000 samples per step

Step `n` starts at round(n * samples_per_step) so rounding never
accumulates drift over a long session.
*/

#[derive(Debug, Clone)]
pub struct StepClock {
    samples_per_step: f64,
    /// Samples elapsed since step 0.
    position: u64,
    /// Index of the next step that has not fired yet.
    next_step: u64,
}

pub const STEPS_PER_BEAT: f64 = 4.0;

impl StepClock {
    pub fn new(bpm: f64, sample_rate: f64) -> Self {
        Self {
            samples_per_step: Self::compute_samples_per_step(bpm, sample_rate),
            position: 0,
            next_step: 0,
        }
    }

    pub fn compute_samples_per_step(bpm: f64, sample_rate: f64) -> f64 {
        let steps_per_second = (bpm / 60.0) * STEPS_PER_BEAT;
        sample_rate / steps_per_second
    }

    pub fn samples_per_step(&self) -> f64 {
        self.samples_per_step
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Steps fired so far.
    pub fn steps_fired(&self) -> u64 {
        self.next_step
    }

    fn step_start(&self, step: u64) -> u64 {
        (step as f64 * self.samples_per_step).round() as u64
    }

    /// The next step boundary inside the block `[position, position + frames)`,
    /// as `(offset into block, step index)`. Each boundary is reported once.
    pub fn take_due(&mut self, frames: usize) -> Option<(usize, u64)> {
        let start = self.step_start(self.next_step);
        let end = self.position + frames as u64;
        if start >= end {
            return None;
        }

        let step = self.next_step;
        self.next_step += 1;
        Some((start.saturating_sub(self.position) as usize, step))
    }

    pub fn advance(&mut self, frames: usize) {
        self.position += frames as u64;
    }

    pub fn reset(&mut self) {
        self.position = 0;
        self.next_step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_per_step_at_default_tempo() {
        assert_eq!(StepClock::compute_samples_per_step(120.0, 48_000.0), 6_000.0);
        assert_eq!(StepClock::compute_samples_per_step(60.0, 44_100.0), 11_025.0);
    }

    #[test]
    fn first_step_fires_at_offset_zero() {
        let mut clock = StepClock::new(120.0, 48_000.0);
        assert_eq!(clock.take_due(512), Some((0, 0)));
        assert_eq!(clock.take_due(512), None);
    }

    #[test]
    fn reports_boundaries_inside_blocks() {
        // 1 kHz at 150 BPM: 100 samples per step
        let mut clock = StepClock::new(150.0, 1_000.0);
        let mut fired = Vec::new();
        for block in 0..5 {
            while let Some((offset, step)) = clock.take_due(64) {
                fired.push((block, offset, step));
            }
            clock.advance(64);
        }

        // blocks cover samples 0..320, boundaries at 0, 100, 200, 300
        assert_eq!(
            fired,
            vec![(0, 0, 0), (1, 36, 1), (3, 8, 2), (4, 44, 3)]
        );
    }

    #[test]
    fn no_drift_over_many_steps() {
        let mut clock = StepClock::new(133.0, 44_100.0);
        let block = 441;
        let blocks = 10_000;
        for _ in 0..blocks {
            while clock.take_due(block).is_some() {}
            clock.advance(block);
        }
        let expected = (block * blocks) as f64 / clock.samples_per_step();
        assert!((clock.steps_fired() as f64 - expected).abs() <= 1.0);
    }
}
