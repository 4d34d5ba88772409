use rand::seq::SliceRandom;
use rand::Rng;

use super::normalize::normalize;

/// Text played when the user asks for playback with nothing typed.
pub const PLACEHOLDER_PHRASE: &str = "lorem ipsum dolor sit amet";

const WORDS: &[&str] = &[
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
];

const MIN_WORDS: usize = 5;
const MAX_WORDS: usize = 14;

/// `input` unless it is blank or has no letters or digits to play, in which
/// case the placeholder phrase.
pub fn resolve_text(input: &str) -> &str {
    if normalize(input).is_empty() {
        PLACEHOLDER_PHRASE
    } else {
        input
    }
}

/// A few lorem-ipsum words picked at random, separated by single spaces.
pub fn random_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(MIN_WORDS..=MAX_WORDS);
    (0..count)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn blank_resolves_to_placeholder() {
        assert_eq!(resolve_text(""), PLACEHOLDER_PHRASE);
        assert_eq!(resolve_text("   \t"), PLACEHOLDER_PHRASE);
        assert_eq!(resolve_text("hi"), "hi");
        assert_eq!(resolve_text("?! ..."), PLACEHOLDER_PHRASE);
    }

    #[test]
    fn random_phrase_uses_word_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let phrase = random_phrase(&mut rng);
            let words: Vec<&str> = phrase.split(' ').collect();
            assert!((MIN_WORDS..=MAX_WORDS).contains(&words.len()));
            assert!(words.iter().all(|w| WORDS.contains(w)));
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = random_phrase(&mut StdRng::seed_from_u64(42));
        let b = random_phrase(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
