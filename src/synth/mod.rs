//! Voice management and polyphony.
//!
//! This layer sits above the voice patches: a fixed pool of [`voice::Voice`]
//! slots, allocation and stealing in [`poly::PolySynth`], and the
//! [`message::NoteSink`] seam the step callback triggers notes through.

pub mod message;
pub mod poly;
pub mod voice;

pub use message::{NoteEvent, NoteSink};
pub use poly::{PolySynth, DEFAULT_POLYPHONY};
pub use voice::{Voice, VoiceState};
