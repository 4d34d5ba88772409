//! Master-bus capture and WAV export.
//!
//! A [`Recorder`] is attached to the engine before the first step fires and
//! collects samples in fixed-size chunks drawn from a pool allocated when
//! the recorder is built. Finishing it yields a [`Recording`], which encodes
//! to 32-bit float mono WAV with `hound`.

use std::{
    io::Cursor,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use hound::{SampleFormat, WavSpec, WavWriter};
use log::debug;

use crate::error::RecordError;

/// Samples per chunk. About 85 ms at 48 kHz.
pub const CHUNK_FRAMES: usize = 4096;

const FILE_PREFIX: &str = "words-to-beats-";

/// Buffers reserved up front so the audio thread can fill half a minute
/// without allocating.
pub const RESERVE_SECONDS: u64 = 30;

pub struct Recorder {
    sample_rate: u32,
    chunks: Vec<Vec<f32>>,
    current: Vec<f32>,
    /// Empty buffers of `CHUNK_FRAMES` capacity, taken as chunks fill.
    spare: Vec<Vec<f32>>,
}

impl Recorder {
    pub fn new(sample_rate: u32) -> Self {
        Self::with_reserve(sample_rate, Duration::from_secs(RESERVE_SECONDS))
    }

    /// Allocate every buffer needed for `reserve` of audio now. Call this off
    /// the audio thread; `push` only allocates once the reserve runs out.
    pub fn with_reserve(sample_rate: u32, reserve: Duration) -> Self {
        let frames = (reserve.as_secs_f64() * sample_rate as f64).ceil() as usize;
        let count = frames.div_ceil(CHUNK_FRAMES);
        Self {
            sample_rate,
            chunks: Vec::with_capacity(count),
            current: Vec::with_capacity(CHUNK_FRAMES),
            spare: (0..count).map(|_| Vec::with_capacity(CHUNK_FRAMES)).collect(),
        }
    }

    pub fn push(&mut self, mut samples: &[f32]) {
        while !samples.is_empty() {
            let room = CHUNK_FRAMES - self.current.len();
            let (now, rest) = samples.split_at(room.min(samples.len()));
            self.current.extend_from_slice(now);
            samples = rest;

            if self.current.len() == CHUNK_FRAMES {
                let next = self
                    .spare
                    .pop()
                    .unwrap_or_else(|| Vec::with_capacity(CHUNK_FRAMES));
                let full = std::mem::replace(&mut self.current, next);
                self.chunks.push(full);
            }
        }
    }

    /// Preallocated chunks not yet used.
    pub fn spare_chunks(&self) -> usize {
        self.spare.len()
    }

    pub fn frames(&self) -> usize {
        self.chunks.len() * CHUNK_FRAMES + self.current.len()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len() + usize::from(!self.current.is_empty())
    }

    pub fn finish(self) -> Recording {
        let mut samples = Vec::with_capacity(self.frames());
        for chunk in &self.chunks {
            samples.extend_from_slice(chunk);
        }
        samples.extend_from_slice(&self.current);
        debug!("recording finished: {} frames", samples.len());

        Recording {
            sample_rate: self.sample_rate,
            samples,
        }
    }
}

/// A finished mono recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    sample_rate: u32,
    samples: Vec<f32>,
}

impl Recording {
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    fn wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        }
    }

    /// Encode as a complete WAV file in memory.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, RecordError> {
        if self.is_empty() {
            return Err(RecordError::Empty);
        }

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, self.wav_spec())?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;

        Ok(cursor.into_inner())
    }

    pub fn write_wav(&self, path: &Path) -> Result<(), RecordError> {
        if self.is_empty() {
            return Err(RecordError::Empty);
        }

        let mut writer = WavWriter::create(path, self.wav_spec())?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Write into `dir` under a timestamped name and return the full path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, RecordError> {
        std::fs::create_dir_all(dir).map_err(|source| RecordError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(file_name_at(SystemTime::now()));
        self.write_wav(&path)?;
        debug!("recording saved to {}", path.display());
        Ok(path)
    }
}

/// `words-to-beats-<unix millis>.wav`
pub fn file_name_at(time: SystemTime) -> String {
    let millis = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{FILE_PREFIX}{millis}.wav")
}
