pub mod pitch;
pub mod scale;

pub use pitch::{Accidental, Letter, ParsePitchError, Pitch};
pub use scale::Scale;
