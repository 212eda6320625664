//! Passphrase generation and strength scoring.
//!
//! Neither function is part of the container format: the generator is a
//! convenience for picking a memorable password, and the score is a
//! rough hint shown at prompt time, not a gate.

use rand::Rng;

/// Smallest passphrase we will generate.
pub const MIN_WORDS: usize = 3;

/// Largest passphrase we will generate.
pub const MAX_WORDS: usize = 10;

/// Word list for generated passphrases.  Short, common, unambiguous
/// words; 64 entries gives 6 bits per word.
const WORDS: &[&str] = &[
    "acorn", "amber", "anchor", "aspen", "badge", "basil", "beacon", "birch", "bloom", "breeze",
    "brook", "candle", "canyon", "cedar", "clover", "comet", "coral", "crane", "dawn", "delta",
    "ember", "falcon", "fern", "flint", "forest", "gale", "garnet", "glade", "grove", "harbor",
    "hazel", "heron", "ivory", "jasper", "juniper", "kestrel", "lagoon", "lantern", "linden",
    "lotus", "maple", "meadow", "mesa", "mist", "nectar", "north", "oasis", "ocean", "opal",
    "otter", "pebble", "pine", "plume", "prairie", "quartz", "raven", "reef", "sage", "summit",
    "thistle", "tundra", "willow", "wren", "zephyr",
];

/// Rough strength buckets for password feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Fair,
    Good,
    Strong,
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Fair => "fair",
            Strength::Good => "good",
            Strength::Strong => "strong",
        }
    }
}

/// Generate a hyphen-joined random passphrase.
///
/// `word_count` is clamped to [`MIN_WORDS`]..=[`MAX_WORDS`].  Words are
/// drawn with an OS-backed RNG; repeats are allowed (each draw is
/// independent).
pub fn generate(word_count: usize) -> String {
    let count = word_count.clamp(MIN_WORDS, MAX_WORDS);
    let mut rng = rand::rngs::OsRng;

    let words: Vec<&str> = (0..count)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect();
    words.join("-")
}

/// Score a password with a trivial length + character-class heuristic.
pub fn score(password: &str) -> Strength {
    let length = password.chars().count();

    let mut classes = 0;
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        classes += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        classes += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        classes += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        classes += 1;
    }

    let points = match length {
        0..=7 => 0,
        8..=11 => 1,
        12..=15 => 2,
        16..=23 => 3,
        _ => 4,
    } + classes;

    match points {
        0..=2 => Strength::Weak,
        3..=4 => Strength::Fair,
        5..=6 => Strength::Good,
        _ => Strength::Strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_word_count() {
        let phrase = generate(4);
        assert_eq!(phrase.split('-').count(), 4);
    }

    #[test]
    fn word_count_is_clamped() {
        assert_eq!(generate(0).split('-').count(), MIN_WORDS);
        assert_eq!(generate(99).split('-').count(), MAX_WORDS);
    }

    #[test]
    fn generated_words_come_from_the_list() {
        let phrase = generate(6);
        for word in phrase.split('-') {
            assert!(WORDS.contains(&word), "unexpected word '{word}'");
        }
    }

    #[test]
    fn short_passwords_score_weak() {
        assert_eq!(score(""), Strength::Weak);
        assert_eq!(score("abc"), Strength::Weak);
        assert_eq!(score("password"), Strength::Weak);
    }

    #[test]
    fn long_mixed_passwords_score_strong() {
        assert_eq!(score("correct-Horse-battery-9-staple"), Strength::Strong);
    }

    #[test]
    fn generated_passphrases_score_at_least_good() {
        // 5 lowercase words + hyphens: 2 classes, length well over 16.
        let phrase = generate(5);
        assert!(score(&phrase) >= Strength::Good);
    }
}
