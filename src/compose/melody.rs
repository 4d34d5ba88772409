use super::normalize::NormalizedText;
use crate::sequencing::{Pitch, Scale};

/// Map each normalized character to `table[code % table.len()]`.
pub fn melody_for(text: &NormalizedText, scale: Scale) -> Vec<Pitch> {
    let table = scale.pitches();
    text.codes()
        .map(|code| table[code as usize % table.len()])
        .collect()
}

/// Melody for `input` in the scale called `scale`.
///
/// Unknown scale names fall back to major. Blank input gives no notes.
pub fn generate_notes(input: &str, scale: &str) -> Vec<Pitch> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    melody_for(&NormalizedText::new(input), Scale::lookup(scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(notes: &[Pitch]) -> Vec<String> {
        notes.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn hello_in_major() {
        // h=104%8=0, e=101%8=5, l=108%8=4, o=111%8=7
        let notes = generate_notes("hello", "major");
        assert_eq!(symbols(&notes), ["C4", "A4", "G4", "G4", "C5"]);
    }

    #[test]
    fn index_is_code_modulo_table_length() {
        for scale in Scale::ALL {
            let table = scale.pitches();
            let notes = generate_notes("wordbeats 2024", scale.name());
            let codes: Vec<u32> = NormalizedText::new("wordbeats 2024").codes().collect();
            for (note, code) in notes.iter().zip(codes) {
                assert_eq!(*note, table[code as usize % table.len()]);
            }
        }
    }

    #[test]
    fn unknown_scale_uses_major() {
        assert_eq!(
            generate_notes("fallback", "no-such-scale"),
            generate_notes("fallback", "major")
        );
    }

    #[test]
    fn scale_names_are_case_sensitive() {
        assert_eq!(
            generate_notes("hello", "Minor"),
            generate_notes("hello", "major")
        );
        assert_ne!(
            generate_notes("hello", "minor"),
            generate_notes("hello", "major")
        );
    }

    #[test]
    fn blank_input_has_no_notes() {
        assert!(generate_notes(" \n", "minor").is_empty());
    }
}
