use crate::settings::VoiceSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Bar gradient: `primary` at the base, `secondary` at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
}

const DRUMS: Palette = Palette {
    primary: Rgb(0xf4, 0x3f, 0x5e),
    secondary: Rgb(0xfb, 0x71, 0x85),
};
const SYNTH: Palette = Palette {
    primary: Rgb(0x8b, 0x5c, 0xf6),
    secondary: Rgb(0xa7, 0x8b, 0xfa),
};
const PIANO: Palette = Palette {
    primary: Rgb(0x10, 0xb9, 0x81),
    secondary: Rgb(0x34, 0xd3, 0x99),
};
const BASS: Palette = Palette {
    primary: Rgb(0xf9, 0x73, 0x16),
    secondary: Rgb(0xfb, 0x92, 0x3c),
};

impl Palette {
    /// Colours for a selection label such as `"drums"` or `"drums, bass"`.
    /// Only the four single-instrument labels have their own colours.
    pub fn for_label(label: &str) -> Palette {
        match label {
            "drums" => DRUMS,
            "piano" => PIANO,
            "bass" => BASS,
            _ => SYNTH,
        }
    }

    pub fn for_selection(voices: &VoiceSelection) -> Palette {
        Self::for_label(&voices.to_string())
    }

    /// Colour `t` of the way from base (0.0) to top (1.0).
    pub fn blend(&self, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(
            mix(self.primary.0, self.secondary.0),
            mix(self.primary.1, self.secondary.1),
            mix(self.primary.2, self.secondary.2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::Instrument;

    #[test]
    fn known_labels() {
        assert_eq!(Palette::for_label("drums").primary, Rgb(0xf4, 0x3f, 0x5e));
        assert_eq!(Palette::for_label("bass").secondary, Rgb(0xfb, 0x92, 0x3c));
        assert_eq!(Palette::for_label("piano"), PIANO);
    }

    #[test]
    fn everything_else_is_synth() {
        assert_eq!(Palette::for_label("choir"), SYNTH);
        let mixed = VoiceSelection::new([Instrument::Drums, Instrument::Bass]).unwrap();
        assert_eq!(Palette::for_selection(&mixed), SYNTH);
    }

    #[test]
    fn blend_ends() {
        assert_eq!(DRUMS.blend(0.0), DRUMS.primary);
        assert_eq!(DRUMS.blend(1.0), DRUMS.secondary);
    }
}
