use strsim::levenshtein;

use crate::config::Lexicon;
use crate::core::types::{ScanResult, ScannedUrl, Typosquatting};
use crate::detectors::LexicalCheck;

const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Normalized edit distance: `1 - levenshtein(a, b) / max(len(a), len(b))`.
///
/// Lengths are counted in chars. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// First legitimate domain the host closely resembles without being it.
pub fn closest_lookalike<'a>(host: &str, legitimate: &'a [String]) -> Option<(&'a str, f64)> {
    legitimate
        .iter()
        .filter(|legit| legit.as_str() != host)
        .map(|legit| (legit.as_str(), similarity(host, legit)))
        .find(|(_, score)| *score > SIMILARITY_THRESHOLD)
}

pub struct TyposquatCheck;

impl LexicalCheck for TyposquatCheck {
    fn name(&self) -> &'static str {
        "typosquat"
    }

    fn run(&self, url: &ScannedUrl, lexicon: &Lexicon, result: &mut ScanResult) {
        let host = url.bare_host();
        match closest_lookalike(host, &lexicon.legitimate_domains) {
            Some((legit, score)) => {
                result.add_risk(
                    30,
                    format!("Possible typosquatting: looks similar to {}", legit),
                );
                result.details.typosquatting = Some(Typosquatting {
                    detected: true,
                    similar_to: Some(legit.to_string()),
                    similarity: Some((score * 100.0).round() / 100.0),
                });
            }
            None => result.details.typosquatting = Some(Typosquatting::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalizer::normalize;
    use chrono::Utc;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("paypal.com", "paypal.com"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        for (a, b) in [
            ("paypa1.com", "paypal.com"),
            ("gooogle.com", "google.com"),
            ("kitten", "sitting"),
            ("", "abc"),
        ] {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn uses_plain_edit_distance() {
        // kitten -> sitting is the textbook distance of 3 over 7 chars.
        assert!((similarity("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
        assert_eq!(similarity("", "abc"), 0.0);
    }

    #[test]
    fn lookalike_host_is_typosquatting() {
        let url = normalize("https://paypa1.com").unwrap();
        let mut result = ScanResult::new("https://paypa1.com", None, Utc::now());
        TyposquatCheck.run(&url, &Lexicon::default(), &mut result);

        assert_eq!(result.risk_score(), 30);
        let detail = result.details.typosquatting.unwrap();
        assert!(detail.detected);
        assert_eq!(detail.similar_to.as_deref(), Some("paypal.com"));
        assert_eq!(detail.similarity, Some(0.9));
    }

    #[test]
    fn exact_match_is_skipped() {
        let legit = Lexicon::default().legitimate_domains;
        assert_eq!(closest_lookalike("github.com", &legit), None);
        assert_eq!(closest_lookalike("example.org", &legit), None);
    }

    #[test]
    fn capital_i_lookalike_is_lowercased_before_comparison() {
        let url = normalize("https://paypaI-verification.com").unwrap();
        assert_eq!(url.hostname, "paypai-verification.com");
        assert!(similarity(url.bare_host(), "paypal.com") < SIMILARITY_THRESHOLD);
    }
}
