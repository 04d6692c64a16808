use crate::LanguageCode;

const BASE_SCORE: f64 = 0.85;
const NOOP_PENALTY: f64 = 0.3;
const TRUNCATION_PENALTY: f64 = 0.2;
const PAIR_BOOST: f64 = 0.05;
const MIN_SCORE: f64 = 0.5;
const MAX_SCORE: f64 = 1.0;

/// Pairs the primary model is known to handle well.
const WELL_SUPPORTED_PAIRS: &[(LanguageCode, LanguageCode)] = &[
    (LanguageCode::En, LanguageCode::Hi),
    (LanguageCode::Hi, LanguageCode::En),
    (LanguageCode::En, LanguageCode::Ta),
    (LanguageCode::Ta, LanguageCode::En),
    (LanguageCode::En, LanguageCode::Bn),
    (LanguageCode::Bn, LanguageCode::En),
];

/// Deterministic plausibility score for a candidate translation.
///
/// A cheap stand-in for real quality estimation: it only has to be good
/// enough to decide whether the fallback tier should run. Pure, no I/O.
pub fn score(
    original: &str,
    translated: &str,
    source: LanguageCode,
    target: LanguageCode,
) -> f64 {
    let mut score = BASE_SCORE;

    // Identical output across different languages is a failed translation
    if source != target && translated == original {
        score -= NOOP_PENALTY;
    }

    let original_chars = original.chars().count();
    let translated_chars = translated.chars().count();
    if original_chars > 100 && (translated_chars as f64) < 0.3 * original_chars as f64 {
        score -= TRUNCATION_PENALTY;
    }

    if WELL_SUPPORTED_PAIRS.contains(&(source, target)) {
        score += PAIR_BOOST;
    }

    score.clamp(MIN_SCORE, MAX_SCORE)
}
