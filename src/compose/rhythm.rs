/*
Text to Rhythm
==============

Each normalized character becomes one sixteenth-note step:

  vowel (a e i o u)      -> beat
  even character code    -> beat
  odd character code     -> rest

Digits are never vowels, so they follow the parity rule only.

    "hello"  ->  h(104) e l(108) l(108) o  ->  x x x x x

The pattern is flat. Grouping in runs of four exists only as a display
format (`RhythmPattern::grouped`) and is never parsed back.
*/

use std::fmt;
use std::ops::Index;

use super::normalize::NormalizedText;

const VOWELS: &[u8] = b"aeiou";
const GROUP: usize = 4;

/// One rhythmic step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Beat,
    Rest,
}

impl Step {
    /// Classify a normalized character.
    pub fn for_char(byte: u8) -> Step {
        if VOWELS.contains(&byte) || byte % 2 == 0 {
            Step::Beat
        } else {
            Step::Rest
        }
    }

    pub fn is_beat(self) -> bool {
        self == Step::Beat
    }

    pub fn symbol(self) -> char {
        match self {
            Step::Beat => 'x',
            Step::Rest => '-',
        }
    }
}

/// A flat beat/rest sequence, one step per normalized character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RhythmPattern {
    steps: Vec<Step>,
}

impl RhythmPattern {
    pub fn from_text(text: &NormalizedText) -> Self {
        Self {
            steps: text.bytes().map(Step::for_char).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, idx: usize) -> Option<Step> {
        self.steps.get(idx).copied()
    }

    pub fn beat_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_beat()).count()
    }

    /// Display adapter that separates runs of four steps with a space.
    pub fn grouped(&self) -> Grouped<'_> {
        Grouped(self)
    }
}

impl Index<usize> for RhythmPattern {
    type Output = Step;

    fn index(&self, idx: usize) -> &Step {
        &self.steps[idx]
    }
}

impl fmt::Display for RhythmPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step.symbol())?;
        }
        Ok(())
    }
}

/// Grouped rendering of a pattern, e.g. `xx-x x-`.
pub struct Grouped<'a>(&'a RhythmPattern);

impl fmt::Display for Grouped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.0.steps.chunks(GROUP).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            for step in chunk {
                write!(f, "{}", step.symbol())?;
            }
        }
        Ok(())
    }
}

/// Rhythm for `input`. Blank input gives an empty pattern.
pub fn generate_pattern(input: &str) -> RhythmPattern {
    if input.trim().is_empty() {
        return RhythmPattern::default();
    }
    RhythmPattern::from_text(&NormalizedText::new(input))
}
