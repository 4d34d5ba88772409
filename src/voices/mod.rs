//! The playable instruments and the table describing how each one sounds.
//!
//! Every instrument is a row of [`InstrumentSpec`]: an oscillator shape, an
//! amplitude envelope, how long the gate stays open and how the step's note
//! maps to a frequency. A [`Patch`] is the one graph layout all rows share;
//! it is reconfigured from the row on every note-on.
//!
//! # Example
//!
//! ```
//! use wordbeats::voices::{Instrument, PitchMode};
//! use wordbeats::sequencing::pitch::C1;
//!
//! let kick = Instrument::Kick.spec();
//! assert_eq!(kick.pitch, PitchMode::Fixed(C1));
//! assert_eq!("hihat".parse::<Instrument>().unwrap(), Instrument::Hihat);
//! ```

mod patch;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use patch::Patch;

use crate::{
    dsp::{envelope::Adsr, filter::FilterMode, oscillator::Waveform},
    error::SettingsError,
    sequencing::pitch::{Pitch, C1, C4},
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Instrument {
    #[default]
    Drums,
    Synth,
    Piano,
    Bass,
    Guitar,
    Strings,
    Flute,
    Trumpet,
    Violin,
    Choir,
    Harp,
    Organ,
    Clarinet,
    Cello,
    Saxophone,
    Kick,
    Snare,
    Hihat,
    Percussion,
    Clap,
}

/// How long a triggered note holds its gate, in sixteenth-note steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLength {
    Eighth,
    Sixteenth,
}

impl NoteLength {
    pub fn steps(self) -> u32 {
        match self {
            NoteLength::Eighth => 2,
            NoteLength::Sixteenth => 1,
        }
    }
}

/// How the step's note becomes the instrument's frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchMode {
    Note,
    OctaveDown,
    Fixed(Pitch),
    Unpitched,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentSpec {
    pub waveform: Waveform,
    pub envelope: Adsr,
    pub length: NoteLength,
    pub pitch: PitchMode,
    /// Octaves above the target the membrane sweep starts, and how long it takes.
    pub pitch_drop: Option<(f32, f32)>,
    pub filter: Option<FilterMode>,
    pub gain: f32,
}

impl InstrumentSpec {
    const fn tonal(waveform: Waveform, envelope: Adsr) -> Self {
        Self {
            waveform,
            envelope,
            length: NoteLength::Eighth,
            pitch: PitchMode::Note,
            pitch_drop: None,
            filter: None,
            gain: 0.25,
        }
    }

    const fn noise(waveform: Waveform, envelope: Adsr) -> Self {
        Self {
            waveform,
            envelope,
            length: NoteLength::Sixteenth,
            pitch: PitchMode::Unpitched,
            pitch_drop: None,
            filter: None,
            gain: 0.3,
        }
    }

    /// The pitch actually sounded for a step note, `None` for unpitched voices.
    pub fn sounding_pitch(&self, note: Pitch) -> Option<Pitch> {
        match self.pitch {
            PitchMode::Note => Some(note),
            PitchMode::OctaveDown => Some(note.octave_down()),
            PitchMode::Fixed(pitch) => Some(pitch),
            PitchMode::Unpitched => None,
        }
    }

    /// Frequency handed to the oscillator. Noise ignores it, so unpitched
    /// voices just pass the note through.
    pub fn frequency_for(&self, note: Pitch) -> f32 {
        self.sounding_pitch(note).unwrap_or(note).frequency()
    }
}

use Waveform::*;

const DRUMS: InstrumentSpec = InstrumentSpec::noise(WhiteNoise, Adsr::new(0.005, 0.1, 0.0, 0.1));
const SYNTH: InstrumentSpec = InstrumentSpec::tonal(Triangle, Adsr::new(0.005, 0.1, 0.3, 1.0));
const PIANO: InstrumentSpec = InstrumentSpec::tonal(Triangle, Adsr::new(0.01, 0.1, 0.3, 0.6));
const BASS: InstrumentSpec = InstrumentSpec {
    pitch: PitchMode::OctaveDown,
    gain: 0.35,
    ..InstrumentSpec::tonal(Sine, Adsr::new(0.05, 0.2, 0.4, 0.8))
};
const GUITAR: InstrumentSpec = InstrumentSpec::tonal(Sawtooth, Adsr::new(0.02, 0.2, 0.5, 0.8));
const STRINGS: InstrumentSpec = InstrumentSpec::tonal(Square, Adsr::new(0.05, 0.3, 0.6, 1.0));
const FLUTE: InstrumentSpec = InstrumentSpec::tonal(Sine, Adsr::new(0.05, 0.2, 0.5, 0.8));
const TRUMPET: InstrumentSpec = InstrumentSpec::tonal(Square, Adsr::new(0.03, 0.15, 0.4, 0.6));
const VIOLIN: InstrumentSpec = InstrumentSpec::tonal(Triangle, Adsr::new(0.1, 0.3, 0.7, 1.2));
const CHOIR: InstrumentSpec = InstrumentSpec::tonal(Sawtooth, Adsr::new(0.2, 0.4, 0.8, 1.5));
const HARP: InstrumentSpec = InstrumentSpec::tonal(Triangle, Adsr::new(0.02, 0.15, 0.5, 0.7));
const ORGAN: InstrumentSpec = InstrumentSpec::tonal(Square, Adsr::new(0.05, 0.2, 0.6, 1.0));
const CLARINET: InstrumentSpec = InstrumentSpec::tonal(Sine, Adsr::new(0.03, 0.1, 0.4, 0.6));
const CELLO: InstrumentSpec = InstrumentSpec::tonal(Triangle, Adsr::new(0.1, 0.3, 0.7, 1.2));
const SAXOPHONE: InstrumentSpec = InstrumentSpec::tonal(Sawtooth, Adsr::new(0.05, 0.2, 0.5, 0.9));
/// The membrane kick starts at ten times its pitch and falls exponentially
/// to it over 50 ms. A sweep of `log2(10)` octaves gives that ratio.
const KICK_DROP_OCTAVES: f32 = 3.321_928;
const KICK_DROP_SECONDS: f32 = 0.05;

const KICK: InstrumentSpec = InstrumentSpec {
    pitch: PitchMode::Fixed(C1),
    pitch_drop: Some((KICK_DROP_OCTAVES, KICK_DROP_SECONDS)),
    gain: 0.8,
    ..InstrumentSpec::tonal(Sine, Adsr::new(0.001, 0.4, 0.01, 1.4))
};
const SNARE: InstrumentSpec = InstrumentSpec::noise(WhiteNoise, Adsr::new(0.005, 0.2, 0.0, 0.1));
const HIHAT: InstrumentSpec = InstrumentSpec {
    filter: Some(FilterMode::HighPass(4_000.0)),
    gain: 0.2,
    ..InstrumentSpec::noise(WhiteNoise, Adsr::new(0.001, 0.1, 0.0, 0.1))
};
const PERCUSSION: InstrumentSpec = InstrumentSpec {
    pitch: PitchMode::Fixed(C4),
    ..InstrumentSpec::tonal(Square, Adsr::new(0.01, 0.1, 0.2, 0.3))
};
const CLAP: InstrumentSpec = InstrumentSpec::noise(PinkNoise, Adsr::new(0.005, 0.1, 0.0, 0.1));

impl Instrument {
    pub const ALL: [Instrument; 20] = [
        Instrument::Drums,
        Instrument::Synth,
        Instrument::Piano,
        Instrument::Bass,
        Instrument::Guitar,
        Instrument::Strings,
        Instrument::Flute,
        Instrument::Trumpet,
        Instrument::Violin,
        Instrument::Choir,
        Instrument::Harp,
        Instrument::Organ,
        Instrument::Clarinet,
        Instrument::Cello,
        Instrument::Saxophone,
        Instrument::Kick,
        Instrument::Snare,
        Instrument::Hihat,
        Instrument::Percussion,
        Instrument::Clap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Drums => "drums",
            Instrument::Synth => "synth",
            Instrument::Piano => "piano",
            Instrument::Bass => "bass",
            Instrument::Guitar => "guitar",
            Instrument::Strings => "strings",
            Instrument::Flute => "flute",
            Instrument::Trumpet => "trumpet",
            Instrument::Violin => "violin",
            Instrument::Choir => "choir",
            Instrument::Harp => "harp",
            Instrument::Organ => "organ",
            Instrument::Clarinet => "clarinet",
            Instrument::Cello => "cello",
            Instrument::Saxophone => "saxophone",
            Instrument::Kick => "kick",
            Instrument::Snare => "snare",
            Instrument::Hihat => "hihat",
            Instrument::Percussion => "percussion",
            Instrument::Clap => "clap",
        }
    }

    pub fn spec(self) -> InstrumentSpec {
        match self {
            Instrument::Drums => DRUMS,
            Instrument::Synth => SYNTH,
            Instrument::Piano => PIANO,
            Instrument::Bass => BASS,
            Instrument::Guitar => GUITAR,
            Instrument::Strings => STRINGS,
            Instrument::Flute => FLUTE,
            Instrument::Trumpet => TRUMPET,
            Instrument::Violin => VIOLIN,
            Instrument::Choir => CHOIR,
            Instrument::Harp => HARP,
            Instrument::Organ => ORGAN,
            Instrument::Clarinet => CLARINET,
            Instrument::Cello => CELLO,
            Instrument::Saxophone => SAXOPHONE,
            Instrument::Kick => KICK,
            Instrument::Snare => SNARE,
            Instrument::Hihat => HIHAT,
            Instrument::Percussion => PERCUSSION,
            Instrument::Clap => CLAP,
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instrument {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|instrument| instrument.name() == wanted)
            .ok_or_else(|| SettingsError::UnknownInstrument(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::pitch::{A4, C5, G4};

    #[test]
    fn names_round_trip() {
        for instrument in Instrument::ALL {
            assert_eq!(instrument.name().parse::<Instrument>(), Ok(instrument));
        }
        assert_eq!(" Kick ".parse::<Instrument>(), Ok(Instrument::Kick));
        assert_eq!(
            "kazoo".parse::<Instrument>(),
            Err(SettingsError::UnknownInstrument("kazoo".into()))
        );
    }

    #[test]
    fn bass_plays_an_octave_down() {
        let spec = Instrument::Bass.spec();
        assert_eq!(spec.sounding_pitch(C5).map(|p| p.to_string()), Some("C4".into()));
        assert!((spec.frequency_for(A4) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn fixed_voices_ignore_the_note() {
        assert_eq!(Instrument::Kick.spec().sounding_pitch(G4), Some(C1));
        assert_eq!(Instrument::Percussion.spec().sounding_pitch(G4), Some(C4));
    }

    #[test]
    fn kick_sweeps_down_from_ten_times_its_pitch() {
        let (octaves, seconds) = Instrument::Kick.spec().pitch_drop.unwrap();
        assert!((2.0_f32.powf(octaves) - 10.0).abs() < 1e-3);
        assert_eq!(seconds, 0.05);

        let start = C1.frequency() * 2.0_f32.powf(octaves);
        assert!(start < 24_000.0, "kick sweep must stay below Nyquist at 48 kHz");
    }

    #[test]
    fn noise_voices_are_unpitched_sixteenths() {
        for instrument in [
            Instrument::Drums,
            Instrument::Snare,
            Instrument::Hihat,
            Instrument::Clap,
        ] {
            let spec = instrument.spec();
            assert!(spec.waveform.is_noise(), "{instrument}");
            assert_eq!(spec.pitch, PitchMode::Unpitched);
            assert_eq!(spec.length, NoteLength::Sixteenth);
            assert_eq!(spec.sounding_pitch(G4), None);
        }
    }

    #[test]
    fn tonal_voices_hold_for_an_eighth() {
        let tonal = Instrument::ALL
            .into_iter()
            .filter(|i| !i.spec().waveform.is_noise());
        for instrument in tonal {
            assert_eq!(instrument.spec().length.steps(), 2, "{instrument}");
        }
    }

    #[test]
    fn synth_uses_default_polysynth_shape() {
        let spec = Instrument::Synth.spec();
        assert_eq!(spec.waveform, Waveform::Triangle);
        assert_eq!(spec.envelope, Adsr::new(0.005, 0.1, 0.3, 1.0));
    }
}
