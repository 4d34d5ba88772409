use std::fmt;
use std::ops::Deref;

/// Text reduced to the characters that drive generation: lowercase ASCII
/// letters and digits, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Lowercase `raw`, then drop everything outside `[a-z0-9]`.
    ///
    /// Lowercasing is Unicode-aware before filtering, so characters such as
    /// the Kelvin sign lowercase to an ASCII `k` and survive.
    pub fn new(raw: &str) -> Self {
        let text = raw
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect();
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Character codes, one per normalized character.
    pub fn codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.bytes().map(u32::from)
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorthand for [`NormalizedText::new`].
pub fn normalize(raw: &str) -> NormalizedText {
    NormalizedText::new(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_case_punctuation_and_space() {
        assert_eq!(normalize("Hello, World! 42").as_str(), "helloworld42");
    }

    #[test]
    fn non_ascii_is_dropped() {
        assert_eq!(normalize("café ñ 日本").as_str(), "caf");
    }

    #[test]
    fn kelvin_sign_lowercases_to_k() {
        assert_eq!(normalize("\u{212A}").as_str(), "k");
    }

    #[test]
    fn idempotent() {
        let once = normalize("The Quick-Brown fox, 1999!");
        let twice = normalize(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(normalize("  \t\n").is_empty());
        assert!(normalize("?!.,").is_empty());
    }
}
