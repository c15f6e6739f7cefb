//! Passphrase strength advisory and suggestion
//!
//! Scoring is purely informational. It never blocks encode or decode.

use rand::{rngs::OsRng, Rng};
use serde::Serialize;

/// Minimum length that earns the length points
pub const MIN_LENGTH: usize = 12;

/// Score at which a passphrase counts as valid
pub const VALID_SCORE: u8 = 70;

/// Length of a suggested passphrase
pub const SUGGESTED_LENGTH: usize = 24;

const LENGTH_POINTS: u8 = 25;
const LOWERCASE_POINTS: u8 = 15;
const UPPERCASE_POINTS: u8 = 15;
const DIGIT_POINTS: u8 = 15;
const SYMBOL_POINTS: u8 = 30;

/// Characters that count as symbols when scoring
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Alphabet suggestions are drawn from
const SUGGESTION_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Feedback when every criterion is met
pub const STRONG_FEEDBACK: &str = "Very strong passphrase!";

/// Result of scoring a passphrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassphraseStrength {
    /// Whether the score reaches [`VALID_SCORE`]
    pub is_valid: bool,
    /// Score from 0 to 100
    pub score: u8,
    /// Unmet criteria, or a single positive note when none are unmet
    pub feedback: Vec<String>,
}

/// Score a candidate passphrase on a 0-100 scale
pub fn score_passphrase(passphrase: &str) -> PassphraseStrength {
    let mut score = 0u8;
    let mut feedback = Vec::new();

    let criteria: [(bool, u8, &str); 5] = [
        (
            // Length in UTF-16 code units, so astral characters count twice
            passphrase.encode_utf16().count() >= MIN_LENGTH,
            LENGTH_POINTS,
            "Use at least 12 characters",
        ),
        (
            passphrase.chars().any(|c| c.is_ascii_lowercase()),
            LOWERCASE_POINTS,
            "Include lowercase letters",
        ),
        (
            passphrase.chars().any(|c| c.is_ascii_uppercase()),
            UPPERCASE_POINTS,
            "Include uppercase letters",
        ),
        (
            passphrase.chars().any(|c| c.is_ascii_digit()),
            DIGIT_POINTS,
            "Include digits",
        ),
        (
            passphrase.chars().any(|c| SYMBOLS.contains(c)),
            SYMBOL_POINTS,
            "Include special characters",
        ),
    ];

    for (met, points, hint) in criteria {
        if met {
            score += points;
        } else {
            feedback.push(hint.to_string());
        }
    }

    if feedback.is_empty() {
        feedback.push(STRONG_FEEDBACK.to_string());
    }

    PassphraseStrength {
        is_valid: score >= VALID_SCORE,
        score,
        feedback,
    }
}

/// Suggest a random passphrase drawn from the OS random source
pub fn suggest_passphrase() -> String {
    let mut rng = OsRng;
    (0..SUGGESTED_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..SUGGESTION_CHARSET.len());
            SUGGESTION_CHARSET[idx] as char
        })
        .collect()
}
