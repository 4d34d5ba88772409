//! Low-level DSP primitives used by the graph nodes.
//!
//! These components are allocation-free and safe to embed directly inside
//! voice structs.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// State-variable filter used for voice tone shaping.
pub mod filter;
/// Oscillator waveforms and noise sources.
pub mod oscillator;

pub use envelope::{Adsr, EnvelopeState};
pub use filter::FilterMode;
pub use oscillator::Waveform;
