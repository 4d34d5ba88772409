//! Validated user settings: tempo, scale, instrument selection, sample rate.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::SettingsError, sequencing::Scale, voices::Instrument, DEFAULT_SAMPLE_RATE};

/// Beats per minute, always within `Tempo::MIN..=Tempo::MAX`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tempo(u16);

impl Tempo {
    pub const MIN: u16 = 60;
    pub const MAX: u16 = 200;
    pub const DEFAULT: Tempo = Tempo(120);

    pub fn new(bpm: u16) -> Result<Self, SettingsError> {
        if (Self::MIN..=Self::MAX).contains(&bpm) {
            Ok(Self(bpm))
        } else {
            Err(SettingsError::TempoOutOfRange {
                bpm,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// Nearest valid tempo, for slider-style nudging.
    pub fn clamped(bpm: i32) -> Self {
        Self(bpm.clamp(Self::MIN as i32, Self::MAX as i32) as u16)
    }

    pub fn bpm(self) -> u16 {
        self.0
    }

    pub fn offset(self, delta: i32) -> Self {
        Self::clamped(self.0 as i32 + delta)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u16> for Tempo {
    type Error = SettingsError;

    fn try_from(bpm: u16) -> Result<Self, Self::Error> {
        Self::new(bpm)
    }
}

impl From<Tempo> for u16 {
    fn from(tempo: Tempo) -> Self {
        tempo.0
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.0)
    }
}

/// Ordered, duplicate-free, never-empty set of instruments.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Instrument>", into = "Vec<Instrument>")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection(Vec<Instrument>);

impl VoiceSelection {
    pub fn new(instruments: impl IntoIterator<Item = Instrument>) -> Result<Self, SettingsError> {
        let mut selected = Vec::new();
        for instrument in instruments {
            if !selected.contains(&instrument) {
                selected.push(instrument);
            }
        }
        if selected.is_empty() {
            return Err(SettingsError::EmptySelection);
        }
        Ok(Self(selected))
    }

    pub fn single(instrument: Instrument) -> Self {
        Self(vec![instrument])
    }

    /// Add `instrument` if absent, remove it if present. Returns whether it
    /// is selected afterwards. Removing the last instrument is refused.
    pub fn toggle(&mut self, instrument: Instrument) -> Result<bool, SettingsError> {
        match self.0.iter().position(|&i| i == instrument) {
            Some(_) if self.0.len() == 1 => Err(SettingsError::EmptySelection),
            Some(idx) => {
                self.0.remove(idx);
                Ok(false)
            }
            None => {
                self.0.push(instrument);
                Ok(true)
            }
        }
    }

    pub fn contains(&self, instrument: Instrument) -> bool {
        self.0.contains(&instrument)
    }

    pub fn as_slice(&self) -> &[Instrument] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Instrument> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for VoiceSelection {
    fn default() -> Self {
        Self::single(Instrument::default())
    }
}

impl TryFrom<Vec<Instrument>> for VoiceSelection {
    type Error = SettingsError;

    fn try_from(instruments: Vec<Instrument>) -> Result<Self, Self::Error> {
        Self::new(instruments)
    }
}

impl From<VoiceSelection> for Vec<Instrument> {
    fn from(selection: VoiceSelection) -> Self {
        selection.0
    }
}

impl fmt::Display for VoiceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, instrument) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{instrument}")?;
        }
        Ok(())
    }
}

/// Everything needed to start a session besides the text.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tempo: Tempo,
    pub scale: Scale,
    pub voices: VoiceSelection,
    pub sample_rate: u32,
}

impl Settings {
    pub fn new(
        bpm: u16,
        scale: Scale,
        voices: impl IntoIterator<Item = Instrument>,
        sample_rate: u32,
    ) -> Result<Self, SettingsError> {
        if sample_rate == 0 {
            return Err(SettingsError::InvalidSampleRate);
        }
        Ok(Self {
            tempo: Tempo::new(bpm)?,
            scale,
            voices: VoiceSelection::new(voices)?,
            sample_rate,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tempo: Tempo::default(),
            scale: Scale::default(),
            voices: VoiceSelection::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tempo_bounds() {
        assert_eq!(Tempo::new(60).map(Tempo::bpm), Ok(60));
        assert_eq!(Tempo::new(200).map(Tempo::bpm), Ok(200));
        assert_eq!(
            Tempo::new(59),
            Err(SettingsError::TempoOutOfRange {
                bpm: 59,
                min: 60,
                max: 200
            })
        );
        assert!(Tempo::new(201).is_err());
        assert_eq!(Tempo::default().bpm(), 120);
    }

    #[test]
    fn tempo_offset_clamps() {
        assert_eq!(Tempo::DEFAULT.offset(5).bpm(), 125);
        assert_eq!(Tempo::DEFAULT.offset(-500).bpm(), Tempo::MIN);
        assert_eq!(Tempo::DEFAULT.offset(500).bpm(), Tempo::MAX);
    }

    #[test]
    fn selection_refuses_to_empty() {
        let mut voices = VoiceSelection::default();
        assert_eq!(voices.as_slice(), &[Instrument::Drums]);
        assert_eq!(
            voices.toggle(Instrument::Drums),
            Err(SettingsError::EmptySelection)
        );

        assert_eq!(voices.toggle(Instrument::Bass), Ok(true));
        assert_eq!(voices.toggle(Instrument::Drums), Ok(false));
        assert_eq!(voices.as_slice(), &[Instrument::Bass]);
    }

    #[test]
    fn selection_dedups_in_order() {
        let voices =
            VoiceSelection::new([Instrument::Kick, Instrument::Synth, Instrument::Kick]).unwrap();
        assert_eq!(voices.to_string(), "kick, synth");
        assert_eq!(VoiceSelection::new([]), Err(SettingsError::EmptySelection));
    }

    #[test]
    fn settings_validate() {
        assert!(Settings::new(120, Scale::Blues, [Instrument::Piano], 44_100).is_ok());
        assert_eq!(
            Settings::new(120, Scale::Blues, [Instrument::Piano], 0),
            Err(SettingsError::InvalidSampleRate)
        );
        assert_eq!(
            Settings::new(120, Scale::Blues, [], 44_100),
            Err(SettingsError::EmptySelection)
        );
    }
}
