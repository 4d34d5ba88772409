//! Text to music: the deterministic mapping from typed text to a rhythm and
//! a melody.
//!
//! The two halves can be generated separately with [`generate_pattern`] and
//! [`generate_notes`], but playback always goes through [`compose`], which
//! derives both from one normalized snapshot so they stay index-aligned.
//!
//! # Example
//!
//! ```
//! use wordbeats::compose::compose;
//! use wordbeats::sequencing::Scale;
//!
//! let song = compose("hello", Scale::Major);
//! assert_eq!(song.pattern().grouped().to_string(), "xxxx x");
//! assert_eq!(song.notes()[0].to_string(), "C4");
//! ```

mod melody;
mod normalize;
mod phrase;
mod rhythm;

pub use melody::{generate_notes, melody_for};
pub use normalize::{normalize, NormalizedText};
pub use phrase::{random_phrase, resolve_text, PLACEHOLDER_PHRASE};
pub use rhythm::{generate_pattern, Grouped, RhythmPattern, Step};

use crate::sequencing::{Pitch, Scale};

/// Rhythm and melody generated together from one text and scale.
///
/// `pattern().len() == notes().len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    text: NormalizedText,
    scale: Scale,
    pattern: RhythmPattern,
    notes: Vec<Pitch>,
}

impl Composition {
    pub fn text(&self) -> &NormalizedText {
        &self.text
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn pattern(&self) -> &RhythmPattern {
        &self.pattern
    }

    pub fn notes(&self) -> &[Pitch] {
        &self.notes
    }

    /// Number of steps in one cycle.
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// The note at `step` if that step is a beat. Steps wrap around.
    pub fn beat_at(&self, step: u64) -> Option<Pitch> {
        if self.is_empty() {
            return None;
        }
        let idx = (step % self.len() as u64) as usize;
        self.pattern[idx].is_beat().then(|| self.notes[idx])
    }

    /// `(step, pitch)` for each beat of one cycle.
    pub fn beats(&self) -> impl Iterator<Item = (usize, Pitch)> + '_ {
        self.pattern
            .steps()
            .iter()
            .zip(&self.notes)
            .enumerate()
            .filter(|(_, (step, _))| step.is_beat())
            .map(|(i, (_, pitch))| (i, *pitch))
    }
}

/// Generate pattern and notes for `input` in `scale` from one snapshot.
pub fn compose(input: &str, scale: Scale) -> Composition {
    let text = if input.trim().is_empty() {
        NormalizedText::default()
    } else {
        NormalizedText::new(input)
    };
    let pattern = RhythmPattern::from_text(&text);
    let notes = melody_for(&text, scale);
    debug_assert_eq!(pattern.len(), notes.len());

    Composition {
        text,
        scale,
        pattern,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_and_notes_are_aligned() {
        let song = compose("Words -> Beats, 2 go!", Scale::Blues);
        assert_eq!(song.pattern().len(), song.notes().len());
        assert_eq!(song.len(), song.text().len());
    }

    #[test]
    fn beat_at_wraps_and_skips_rests() {
        // c=99 rest, a vowel beat
        let song = compose("ca", Scale::Major);
        assert_eq!(song.beat_at(0), None);
        assert_eq!(song.beat_at(1), Some(song.notes()[1]));
        assert_eq!(song.beat_at(3), Some(song.notes()[1]));
    }

    #[test]
    fn empty_composition_never_beats() {
        let song = compose("  ", Scale::Major);
        assert!(song.is_empty());
        assert_eq!(song.beat_at(0), None);
        assert_eq!(song.beats().count(), 0);
    }

    #[test]
    fn agrees_with_standalone_generators() {
        let text = "Agreement 123";
        let song = compose(text, Scale::Lydian);
        assert_eq!(song.pattern(), &generate_pattern(text));
        assert_eq!(song.notes(), generate_notes(text, "lydian").as_slice());
    }
}
