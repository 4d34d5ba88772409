//! Words to beats: type some text, hear it as a rhythm and a melody.
//!
//! Each letter or digit of the text becomes one sixteenth-note step. Vowels
//! and even character codes are beats, everything else rests, and the
//! character code picks the note from the chosen scale. A small synthesizer
//! plays the beats on one or more instruments while a spectrum view shows
//! the output.

pub mod compose; // Text → rhythm + melody
pub mod controller; // UI state and actions
pub mod dsp;
pub mod engine; // Step clock, transport, engine seam
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod playback; // Session lifecycle
pub mod record;
pub mod sequencing; // Pitches and scales
pub mod settings;
pub mod synth; // Voice management and polyphony
pub mod visual;
pub mod voices; // Instrument table and patch

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
