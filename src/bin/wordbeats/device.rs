//! Live output through the default cpal device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, error};
use std::sync::{Arc, Mutex};

use wordbeats::{
    engine::{lock, AnalyserTap, AudioEngine, SharedTransport, StepCallback, Transport},
    error::{EngineError, PlaybackError},
    record::Recorder,
    settings::Tempo,
    MAX_BLOCK_SIZE,
};

/// An [`AudioEngine`] over the default output device. The stream is only
/// built on `start`, so merely opening the engine never makes a sound.
pub struct CpalEngine {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
    transport: SharedTransport,
    stream: Option<cpal::Stream>,
}

impl CpalEngine {
    pub fn open(tap: AnalyserTap) -> Result<Self, EngineError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| EngineError::Initialization("no default output device available".into()))?;
        let config = device
            .default_output_config()
            .map_err(|err| EngineError::Initialization(format!("failed to fetch default output config: {err}")))?;

        let sample_rate = config.sample_rate().0;
        let transport = Transport::new(sample_rate).with_tap(tap);

        Ok(Self {
            device,
            config,
            transport: Arc::new(Mutex::new(transport)),
            stream: None,
        })
    }

    pub fn device_name(&self) -> String {
        self.device.name().unwrap_or_else(|_| "unknown device".into())
    }

    pub fn channels(&self) -> u16 {
        self.config.channels()
    }

    fn build_stream(&self) -> Result<cpal::Stream, EngineError> {
        let channels = self.config.channels() as usize;
        let transport = Arc::clone(&self.transport);
        let fault_transport = Arc::clone(&self.transport);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        self.device
            .build_output_stream(
                &self.config.clone().into(),
                move |data: &mut [f32], _| {
                    let mut transport = lock(&transport);
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames_to_render];
                        transport.process(block);

                        // Copy to output (mono to all channels)
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }

                        frames_written += frames_to_render;
                    }
                },
                move |err| {
                    error!("audio stream error: {err}");
                    lock(&fault_transport).report_fault(EngineError::Stream(err.to_string()).into());
                },
                None,
            )
            .map_err(|err| EngineError::Initialization(err.to_string()))
    }
}

impl AudioEngine for CpalEngine {
    fn start(&mut self) -> Result<(), EngineError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let stream = self.build_stream()?;
        stream
            .play()
            .map_err(|err| EngineError::Stream(err.to_string()))?;
        debug!(
            "audio started on {} ({} Hz, {} channels)",
            self.device_name(),
            self.sample_rate(),
            self.channels()
        );
        self.stream = Some(stream);
        Ok(())
    }

    fn is_started(&self) -> bool {
        self.stream.is_some()
    }

    fn sample_rate(&self) -> u32 {
        self.config.sample_rate().0
    }

    fn schedule(&mut self, tempo: Tempo, callback: StepCallback) -> Result<(), EngineError> {
        if self.stream.is_none() {
            return Err(EngineError::NotStarted);
        }
        lock(&self.transport).schedule(tempo, callback);
        Ok(())
    }

    fn cancel(&mut self) {
        lock(&self.transport).cancel();
    }

    fn steps_fired(&self) -> u64 {
        lock(&self.transport).steps_fired()
    }

    fn attach_recorder(&mut self, recorder: Recorder) {
        lock(&self.transport).attach_recorder(recorder);
    }

    fn detach_recorder(&mut self) -> Option<Recorder> {
        lock(&self.transport).detach_recorder()
    }

    fn take_fault(&mut self) -> Option<PlaybackError> {
        lock(&self.transport).take_fault()
    }
}
