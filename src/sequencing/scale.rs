//! Named scales and their pitch tables.
//!
//! Every table starts on C4 and (except pentatonic and blues) ends on C5, so
//! the character-code mapping in [`crate::compose`] stays inside one octave.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pitch::*;
use crate::error::SettingsError;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scale {
    #[default]
    Major,
    Minor,
    Pentatonic,
    Blues,
    Chromatic,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
}

const MAJOR: &[Pitch] = &[C4, D4, E4, F4, G4, A4, B4, C5];
const MINOR: &[Pitch] = &[C4, D4, Eb4, F4, G4, Ab4, Bb4, C5];
const PENTATONIC: &[Pitch] = &[C4, D4, E4, G4, A4, C5];
const BLUES: &[Pitch] = &[C4, Eb4, F4, Fs4, G4, Bb4, C5];
const CHROMATIC: &[Pitch] = &[C4, Cs4, D4, Ds4, E4, F4, Fs4, G4, Gs4, A4, As4, B4, C5];
const DORIAN: &[Pitch] = &[C4, D4, Eb4, F4, G4, A4, Bb4, C5];
const PHRYGIAN: &[Pitch] = &[C4, Db4, Eb4, F4, G4, Ab4, Bb4, C5];
const LYDIAN: &[Pitch] = &[C4, D4, E4, Fs4, G4, A4, B4, C5];
const MIXOLYDIAN: &[Pitch] = &[C4, D4, E4, F4, G4, A4, Bb4, C5];
const LOCRIAN: &[Pitch] = &[C4, Db4, Eb4, F4, Gb4, Ab4, Bb4, C5];

impl Scale {
    pub const ALL: [Scale; 10] = [
        Scale::Major,
        Scale::Minor,
        Scale::Pentatonic,
        Scale::Blues,
        Scale::Chromatic,
        Scale::Dorian,
        Scale::Phrygian,
        Scale::Lydian,
        Scale::Mixolydian,
        Scale::Locrian,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::Minor => "minor",
            Scale::Pentatonic => "pentatonic",
            Scale::Blues => "blues",
            Scale::Chromatic => "chromatic",
            Scale::Dorian => "dorian",
            Scale::Phrygian => "phrygian",
            Scale::Lydian => "lydian",
            Scale::Mixolydian => "mixolydian",
            Scale::Locrian => "locrian",
        }
    }

    /// The ordered pitch table for this scale. Never empty.
    pub fn pitches(self) -> &'static [Pitch] {
        match self {
            Scale::Major => MAJOR,
            Scale::Minor => MINOR,
            Scale::Pentatonic => PENTATONIC,
            Scale::Blues => BLUES,
            Scale::Chromatic => CHROMATIC,
            Scale::Dorian => DORIAN,
            Scale::Phrygian => PHRYGIAN,
            Scale::Lydian => LYDIAN,
            Scale::Mixolydian => MIXOLYDIAN,
            Scale::Locrian => LOCRIAN,
        }
    }

    /// Exact-name lookup: anything that is not a scale name as written by
    /// [`Scale::name`] falls back to major, including other casings.
    pub fn lookup(name: &str) -> Scale {
        Self::ALL
            .into_iter()
            .find(|scale| scale.name() == name)
            .unwrap_or_default()
    }

    /// Next scale in [`Scale::ALL`] order, wrapping around.
    pub fn next(self) -> Scale {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scale {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|scale| scale.name() == wanted)
            .ok_or_else(|| SettingsError::UnknownScale(s.to_string()))
    }
}
