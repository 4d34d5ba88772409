/*
Pitch Symbols
=============

A pitch is written the way musicians and most synth libraries spell it: a
letter, an optional accidental, and an octave digit.

    C4    middle C (MIDI 60)
    F#4   F sharp above middle C (MIDI 66)
    Eb4   E flat above middle C (MIDI 63)

Spelling is preserved: Eb4 and D#4 sound the same but print differently, so
a scale table keeps the spelling it was written with.

The MIDI formula: note_number = 12 * (octave + 1) + semitone
Where semitone: C=0, D=2, E=4, F=5, G=7, A=9, B=11, sharp +1, flat -1
*/

#![allow(non_upper_case_globals)]

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Note letter, C through B.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    fn semitone(self) -> i16 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn symbol(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

/// A spelled pitch with an octave digit (0-9).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    letter: Letter,
    accidental: Accidental,
    octave: u8,
}

impl Pitch {
    pub const fn new(letter: Letter, accidental: Accidental, octave: u8) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    pub const fn natural(letter: Letter, octave: u8) -> Self {
        Self::new(letter, Accidental::Natural, octave)
    }

    pub const fn sharp(letter: Letter, octave: u8) -> Self {
        Self::new(letter, Accidental::Sharp, octave)
    }

    pub const fn flat(letter: Letter, octave: u8) -> Self {
        Self::new(letter, Accidental::Flat, octave)
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn octave(&self) -> u8 {
        self.octave
    }

    /// MIDI note number. Cb0 would fall below zero and is clamped.
    pub fn midi(&self) -> u8 {
        let shift = match self.accidental {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        };
        let note = 12 * (self.octave as i16 + 1) + self.letter.semitone() + shift;
        note.clamp(0, 127) as u8
    }

    /// Frequency in Hz, A4 = 440 Hz.
    pub fn frequency(&self) -> f32 {
        440.0 * 2.0_f32.powf((self.midi() as f32 - 69.0) / 12.0)
    }

    /// Same spelling, octave digit decremented by one. Octave 0 stays put.
    pub fn octave_down(self) -> Self {
        Self {
            octave: self.octave.saturating_sub(1),
            ..self
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidental = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        };
        write!(f, "{}{}{}", self.letter.symbol(), accidental, self.octave)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pitch symbol {0:?}")]
pub struct ParsePitchError(pub String);

impl FromStr for Pitch {
    type Err = ParsePitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePitchError(s.to_string());
        let mut chars = s.chars();

        let letter = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => Letter::C,
            Some('D') => Letter::D,
            Some('E') => Letter::E,
            Some('F') => Letter::F,
            Some('G') => Letter::G,
            Some('A') => Letter::A,
            Some('B') => Letter::B,
            _ => return Err(err()),
        };

        let rest = chars.as_str();
        let (accidental, digits) = match rest.chars().next() {
            Some('#') => (Accidental::Sharp, &rest[1..]),
            Some('b') => (Accidental::Flat, &rest[1..]),
            _ => (Accidental::Natural, rest),
        };

        if digits.len() != 1 {
            return Err(err());
        }
        let octave = digits
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(err)?;

        Ok(Pitch::new(letter, accidental, octave as u8))
    }
}

// Pitches used by the scale tables and fixed-pitch voices.
pub const C1: Pitch = Pitch::natural(Letter::C, 1);
pub const C4: Pitch = Pitch::natural(Letter::C, 4);
pub const Cs4: Pitch = Pitch::sharp(Letter::C, 4);
pub const Db4: Pitch = Pitch::flat(Letter::D, 4);
pub const D4: Pitch = Pitch::natural(Letter::D, 4);
pub const Ds4: Pitch = Pitch::sharp(Letter::D, 4);
pub const Eb4: Pitch = Pitch::flat(Letter::E, 4);
pub const E4: Pitch = Pitch::natural(Letter::E, 4);
pub const F4: Pitch = Pitch::natural(Letter::F, 4);
pub const Fs4: Pitch = Pitch::sharp(Letter::F, 4);
pub const Gb4: Pitch = Pitch::flat(Letter::G, 4);
pub const G4: Pitch = Pitch::natural(Letter::G, 4);
pub const Gs4: Pitch = Pitch::sharp(Letter::G, 4);
pub const Ab4: Pitch = Pitch::flat(Letter::A, 4);
pub const A4: Pitch = Pitch::natural(Letter::A, 4); // A440 tuning reference
pub const As4: Pitch = Pitch::sharp(Letter::A, 4);
pub const Bb4: Pitch = Pitch::flat(Letter::B, 4);
pub const B4: Pitch = Pitch::natural(Letter::B, 4);
pub const C5: Pitch = Pitch::natural(Letter::C, 5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_c_is_60() {
        assert_eq!(C4.midi(), 60);
    }

    #[test]
    fn a440_is_69() {
        assert_eq!(A4.midi(), 69);
        assert!((A4.frequency() - 440.0).abs() < 1e-3);
    }

    #[test]
    fn enharmonics_share_midi_but_not_spelling() {
        assert_eq!(Cs4.midi(), Db4.midi());
        assert_eq!(Fs4.midi(), Gb4.midi());
        assert_eq!(As4.midi(), Bb4.midi());
        assert_ne!(Cs4.to_string(), Db4.to_string());
    }

    #[test]
    fn parses_and_prints_symbols() {
        for symbol in ["C4", "F#4", "Eb4", "Bb4", "C5", "C1"] {
            let pitch: Pitch = symbol.parse().unwrap();
            assert_eq!(pitch.to_string(), symbol);
        }
    }

    #[test]
    fn rejects_malformed_symbols() {
        assert!("H4".parse::<Pitch>().is_err());
        assert!("C".parse::<Pitch>().is_err());
        assert!("C#".parse::<Pitch>().is_err());
        assert!("C44".parse::<Pitch>().is_err());
        assert!("".parse::<Pitch>().is_err());
    }

    #[test]
    fn octave_down_decrements_trailing_digit() {
        assert_eq!(C5.octave_down().to_string(), "C4");
        assert_eq!(Eb4.octave_down().to_string(), "Eb3");
        assert_eq!(Fs4.octave_down().midi(), Fs4.midi() - 12);
        assert_eq!(Pitch::natural(Letter::C, 0).octave_down().octave(), 0);
    }
}
