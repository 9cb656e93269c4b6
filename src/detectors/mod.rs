use crate::config::Lexicon;
use crate::core::types::{ScanResult, ScannedUrl};

pub mod lexical;
pub mod typosquat;

use lexical::{
    BrandSpoofingCheck, HomographCheck, HttpsCheck, IpLiteralCheck, KeywordCheck, LengthCheck,
    PortCheck, ShortenerCheck, SpecialCharsCheck, SubdomainCheck,
};
use typosquat::TyposquatCheck;

/// A synchronous check over the normalized URL. Writes its detail key and emits at
/// most one signal.
pub trait LexicalCheck {
    fn name(&self) -> &'static str;
    fn run(&self, url: &ScannedUrl, lexicon: &Lexicon, result: &mut ScanResult);
}

/// Every lexical check in execution order. The order fixes the order of `flags`.
pub fn lexical_checks() -> Vec<Box<dyn LexicalCheck + Send + Sync>> {
    vec![
        Box::new(HttpsCheck),
        Box::new(IpLiteralCheck),
        Box::new(HomographCheck),
        Box::new(BrandSpoofingCheck),
        Box::new(ShortenerCheck),
        Box::new(KeywordCheck),
        Box::new(SpecialCharsCheck),
        Box::new(TyposquatCheck),
        Box::new(LengthCheck),
        Box::new(SubdomainCheck),
        Box::new(PortCheck),
    ]
}

pub fn run_lexical(url: &ScannedUrl, lexicon: &Lexicon, result: &mut ScanResult) {
    for check in lexical_checks() {
        let before = result.risk_score();
        check.run(url, lexicon, result);
        tracing::trace!(
            check = check.name(),
            added = result.risk_score() - before,
            "lexical check done"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RiskLevel;
    use crate::pipeline::normalizer::normalize;
    use chrono::Utc;

    fn lexical(raw: &str) -> ScanResult {
        let url = normalize(raw).unwrap();
        let mut result = ScanResult::new(raw, Some(url.href.clone()), Utc::now());
        run_lexical(&url, &Lexicon::default(), &mut result);
        result.classify();
        result
    }

    #[test]
    fn ip_login_url_is_dangerous() {
        let result = lexical("http://192.168.1.1/login");
        assert_eq!(result.risk_score(), 53);
        assert_eq!(result.risk_level(), RiskLevel::Dangerous);
        assert!(result.is_phishing());
        assert_eq!(
            result.flags(),
            [
                "No HTTPS encryption - data can be intercepted",
                "Uses IP address instead of domain name - highly suspicious",
                "Suspicious keywords found: login",
            ]
        );
    }

    #[test]
    fn exact_legitimate_domain_is_not_typosquatting() {
        let result = lexical("http://google.com");
        assert_eq!(result.risk_breakdown()[0].points, 20);
        assert_eq!(result.details.https, Some(false));
        let typo = result.details.typosquatting.clone().unwrap();
        assert!(!typo.detected);
        assert!(!result.flags().iter().any(|f| f.contains("typosquatting")));
        assert!(!result.flags().iter().any(|f| f.contains("Brand spoofing")));
    }

    #[test]
    fn every_check_writes_its_detail() {
        let result = lexical("https://example.org");
        let d = &result.details;
        assert_eq!(d.https, Some(true));
        assert_eq!(d.uses_ip, Some(false));
        assert_eq!(d.punycode, Some(false));
        assert_eq!(d.brand_spoofing.as_ref().map(|b| b.detected), Some(false));
        assert_eq!(d.is_shortener, Some(false));
        assert_eq!(d.suspicious_keywords.as_deref(), Some(&[][..]));
        assert_eq!(d.excessive_special_chars, Some(false));
        assert_eq!(d.excessive_length, Some(false));
        assert_eq!(d.url_length, Some("https://example.org/".len()));
        assert_eq!(d.excessive_subdomains, Some(false));
        assert_eq!(d.subdomain_count, Some(0));
        assert_eq!(d.non_standard_port, Some(false));
        assert!(d.tls.is_none());
        assert_eq!(result.risk_score(), 0);
    }

    #[test]
    fn breakdown_sum_matches_score() {
        for raw in [
            "http://paypal.com.secure-login.xn--80ak6aa92e.com:8080/verify/account",
            "bit.ly/abc",
            "https://www.github.com",
            "http://a-b_c.d-e.example.com",
        ] {
            let result = lexical(raw);
            let sum: u32 = result.risk_breakdown().iter().map(|s| s.points).sum();
            assert_eq!(result.risk_score(), sum, "{raw}");
            assert_eq!(result.flags().len(), result.risk_breakdown().len());
        }
    }
}
