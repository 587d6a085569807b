//! Answer checking and word scrambling.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::definition::{QuizDefinition, QuizType};

/// Fold text for accent- and case-insensitive comparison.
///
/// Decomposes to NFD, drops combining marks, lower-cases and trims.
pub fn normalize(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.to_lowercase().trim().to_string()
}

/// TYPE rule: exact text after trimming, ignoring case only.
///
/// Characters are compared one by one on their folded case, so the two
/// strings must have the same number of characters.
pub fn matches_exact(message: &str, answer: &str) -> bool {
    message
        .trim()
        .chars()
        .map(fold_case)
        .eq(answer.trim().chars().map(fold_case))
}

/// Map a character to the lower case of its upper case.
///
/// Only single-character mappings are used. The one multi-character
/// lowercase mapping (U+0130) starts with its single-character form.
fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    let upper = match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    };
    upper.to_lowercase().next().unwrap_or(upper)
}

/// QUIZ and SCRAMBLE rule: equal after [`normalize`].
pub fn matches_normalized(message: &str, answer: &str) -> bool {
    normalize(message) == normalize(answer)
}

/// Check a chat message against every accepted answer of `definition`.
pub fn is_correct(definition: &QuizDefinition, message: &str) -> bool {
    let rule: fn(&str, &str) -> bool = match definition.quiz_type {
        QuizType::Type => matches_exact,
        QuizType::Quiz | QuizType::Scramble => matches_normalized,
    };

    let correct = definition.answers.iter().any(|answer| rule(message, answer));
    debug!(quiz_type = %definition.quiz_type, correct, "Checked answer");
    correct
}

/// Shuffle the characters of `word` uniformly.
pub fn scramble(word: &str) -> String {
    scramble_with(word, &mut rand::rng())
}

/// [`scramble`] with a caller-supplied random source.
pub fn scramble_with<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.shuffle(rng);
    chars.into_iter().collect()
}
