use log::{debug, error};

use crate::{
    engine::{clock::StepClock, tap::AnalyserTap, StepCallback},
    error::PlaybackError,
    record::Recorder,
    settings::Tempo,
    synth::{PolySynth, DEFAULT_POLYPHONY},
    MAX_BLOCK_SIZE,
};

/// Headroom for many voices summing on one bus.
const MASTER_GAIN: f32 = 0.8;

/// Render-side state shared with the audio callback.
///
/// Owns the step clock, the registered step callback, the synth, and the
/// optional recorder and analyser tap. Every method runs under the same
/// lock as rendering, so clearing the callback in [`Transport::cancel`]
/// takes effect before the next block.
pub struct Transport {
    sample_rate: u32,
    clock: StepClock,
    callback: Option<StepCallback>,
    synth: PolySynth,
    recorder: Option<Recorder>,
    tap: Option<AnalyserTap>,
    fault: Option<PlaybackError>,
}

impl Transport {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            clock: StepClock::new(Tempo::DEFAULT.bpm() as f64, sample_rate as f64),
            callback: None,
            synth: PolySynth::new(sample_rate as f32, DEFAULT_POLYPHONY),
            recorder: None,
            tap: None,
            fault: None,
        }
    }

    pub fn with_tap(mut self, tap: AnalyserTap) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Register the step callback and restart the clock at step 0.
    pub fn schedule(&mut self, tempo: Tempo, callback: StepCallback) {
        self.clock = StepClock::new(tempo.bpm() as f64, self.sample_rate as f64);
        self.synth
            .set_samples_per_step(self.clock.samples_per_step().round() as u32);
        self.callback = Some(callback);
        self.fault = None;
        debug!("step callback scheduled at {tempo}");
    }

    /// Drop the callback and silence every voice.
    pub fn cancel(&mut self) {
        if self.callback.take().is_some() {
            debug!("step callback cancelled after {} steps", self.clock.steps_fired());
        }
        self.clock.reset();
        self.synth.silence();
    }

    pub fn is_scheduled(&self) -> bool {
        self.callback.is_some()
    }

    /// Steps fired since the last `schedule`.
    pub fn steps_fired(&self) -> u64 {
        self.clock.steps_fired()
    }

    pub fn attach_recorder(&mut self, recorder: Recorder) {
        self.recorder = Some(recorder);
    }

    pub fn detach_recorder(&mut self) -> Option<Recorder> {
        self.recorder.take()
    }

    pub fn take_fault(&mut self) -> Option<PlaybackError> {
        self.fault.take()
    }

    /// Record a failure from outside the render path, such as a device
    /// stream error. The first pending fault wins.
    pub fn report_fault(&mut self, err: PlaybackError) {
        if self.fault.is_none() {
            self.fault = Some(err);
        }
    }

    pub fn active_voices(&self) -> usize {
        self.synth.active_voices()
    }

    /// Render any number of frames, in chunks no larger than `MAX_BLOCK_SIZE`.
    pub fn process(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.process_block(block);
        }
    }

    fn process_block(&mut self, out: &mut [f32]) {
        let frames = out.len();
        let mut rendered = 0;

        if self.callback.is_some() {
            while let Some((offset, step)) = self.clock.take_due(frames) {
                if offset > rendered {
                    self.synth.render_block(&mut out[rendered..offset]);
                    rendered = offset;
                }
                self.fire(step);
            }
            self.clock.advance(frames);
        }

        if rendered < frames {
            self.synth.render_block(&mut out[rendered..]);
        }

        for sample in out.iter_mut() {
            *sample = (*sample * MASTER_GAIN).clamp(-1.0, 1.0);
        }

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.push(out);
        }
        if let Some(tap) = self.tap.as_mut() {
            tap.push_block(out);
        }
    }

    fn fire(&mut self, step: u64) {
        let Some(callback) = self.callback.as_mut() else {
            return;
        };

        if let Err(err) = callback(step, &mut self.synth) {
            error!("step {step} failed: {err}");
            self.report_fault(err);
        }
    }
}
