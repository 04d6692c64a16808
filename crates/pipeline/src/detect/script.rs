use std::time::Instant;

use crate::LanguageCode;

use super::{DetectionResult, DetectionSource};

/// Unicode block ranges for the supported non-Latin scripts, in detection
/// priority order. Devanagari is shared by Hindi and Marathi; the
/// heuristic resolves it to Hindi and leaves the distinction to the
/// model-backed detector.
const SCRIPT_RANGES: &[(u32, u32, LanguageCode)] = &[
    (0x0900, 0x097F, LanguageCode::Hi), // Devanagari
    (0x0980, 0x09FF, LanguageCode::Bn), // Bengali
    (0x0A00, 0x0A7F, LanguageCode::Pa), // Gurmukhi
    (0x0A80, 0x0AFF, LanguageCode::Gu), // Gujarati
    (0x0B80, 0x0BFF, LanguageCode::Ta), // Tamil
    (0x0C00, 0x0C7F, LanguageCode::Te), // Telugu
    (0x0C80, 0x0CFF, LanguageCode::Kn), // Kannada
    (0x0D00, 0x0D7F, LanguageCode::Ml), // Malayalam
];

const HEURISTIC_CONFIDENCE: f64 = 0.95;

/// Zero-latency language guess from Unicode code points.
///
/// Pure and synchronous, so clearly-scripted input never pays for a model
/// round trip. Latin-script text yields no opinion.
#[derive(Debug, Clone)]
pub struct ScriptHeuristicDetector {
    scan_chars: usize,
}

impl ScriptHeuristicDetector {
    pub fn new(scan_chars: usize) -> Self {
        Self { scan_chars }
    }

    /// Returns a detection for the first scripted char in the scanned
    /// prefix, `None` when the prefix is Latin or unmatched.
    pub fn detect(&self, text: &str) -> Option<DetectionResult> {
        let start = Instant::now();

        for c in text.chars().take(self.scan_chars) {
            let code = c as u32;
            for &(lo, hi, language) in SCRIPT_RANGES {
                if (lo..=hi).contains(&code) {
                    return Some(DetectionResult {
                        language,
                        confidence: HEURISTIC_CONFIDENCE,
                        latency_ms: start.elapsed().as_millis() as u64,
                        source: DetectionSource::Heuristic,
                    });
                }
            }
        }

        None
    }
}
