use wordbeats::{
    compose::{compose, generate_notes, generate_pattern, normalize, resolve_text, PLACEHOLDER_PHRASE},
    sequencing::Scale,
};

const INPUTS: &[&str] = &[
    "hello",
    "Hello, World!",
    "  The quick brown fox jumps over 13 lazy dogs.  ",
    "ÀÉÎõü ñ 2024",
    "tab\tand\nnewline",
    "UPPER lower MiXeD 0987654321",
    "!!! ??? ...",
    "aeiou bcdfg",
    "",
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[test]
fn pattern_length_matches_normalized_text() {
    for input in INPUTS {
        let pattern = generate_pattern(input);
        assert_eq!(pattern.len(), normalize(input).len(), "{input:?}");
    }
}

#[test]
fn vowels_and_even_codes_are_beats() {
    for input in INPUTS {
        let text = normalize(input);
        let pattern = generate_pattern(input);
        for (i, c) in text.chars().enumerate() {
            let step = pattern[i];
            if is_vowel(c) {
                assert!(step.is_beat(), "vowel {c:?} in {input:?} is a rest");
            } else {
                assert_eq!(step.is_beat(), c as u32 % 2 == 0, "{c:?} in {input:?}");
            }
        }
    }
}

#[test]
fn notes_are_deterministic() {
    for input in INPUTS {
        for scale in Scale::ALL {
            assert_eq!(
                generate_notes(input, scale.name()),
                generate_notes(input, scale.name())
            );
        }
    }
}

#[test]
fn unknown_scale_falls_back_to_major() {
    for input in INPUTS {
        assert_eq!(
            generate_notes(input, "hypophrygian"),
            generate_notes(input, "major")
        );
    }
}

#[test]
fn normalizing_twice_changes_nothing() {
    for input in INPUTS {
        let once = normalize(input);
        let twice = normalize(once.as_str());
        assert_eq!(once, twice);
    }
}

#[test]
fn hello_pattern() {
    // h=104 even, e vowel, l=108 even, l=108 even, o vowel
    let pattern = generate_pattern("hello");
    assert_eq!(pattern.to_string(), "xxxxx");
    assert_eq!(pattern.grouped().to_string(), "xxxx x");
}

#[test]
fn hello_notes_in_major() {
    // 104%8=0, 101%8=5, 108%8=4, 108%8=4, 111%8=7
    let notes: Vec<String> = generate_notes("hello", "major")
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(notes, ["C4", "A4", "G4", "G4", "C5"]);
}

#[test]
fn blank_input_generates_nothing() {
    for blank in ["", "   ", "\t\n"] {
        assert!(generate_pattern(blank).is_empty());
        assert!(generate_notes(blank, "major").is_empty());
        assert!(compose(blank, Scale::Major).is_empty());
    }
}

#[test]
fn play_substitutes_placeholder_for_blank_text() {
    assert_eq!(resolve_text("  "), PLACEHOLDER_PHRASE);
    assert_eq!(resolve_text("hi"), "hi");

    let song = compose(resolve_text(""), Scale::Major);
    assert_eq!(song.text().as_str(), "loremipsumdolorsitamet");
    assert_eq!(song.len(), song.notes().len());
}

#[test]
fn composition_matches_separate_generators() {
    for input in INPUTS {
        for scale in Scale::ALL {
            let song = compose(input, scale);
            assert_eq!(song.pattern(), &generate_pattern(input));
            assert_eq!(song.notes(), generate_notes(input, scale.name()).as_slice());
        }
    }
}
