use crate::config::Lexicon;
use crate::core::types::{BrandSpoofing, ScanResult, ScannedUrl};
use crate::detectors::LexicalCheck;

const KEYWORD_POINTS: u32 = 8;
const KEYWORD_CAP: u32 = 25;
const SPECIAL_CHAR_LIMIT: usize = 4;
const MAX_HREF_LENGTH: usize = 150;
const SUBDOMAIN_LIMIT: usize = 3;

pub struct HttpsCheck;

impl LexicalCheck for HttpsCheck {
    fn name(&self) -> &'static str {
        "https"
    }

    fn run(&self, url: &ScannedUrl, _lexicon: &Lexicon, result: &mut ScanResult) {
        let plain = url.scheme == "http";
        if plain {
            result.add_risk(20, "No HTTPS encryption - data can be intercepted");
        }
        result.details.https = Some(!plain);
    }
}

pub struct IpLiteralCheck;

impl LexicalCheck for IpLiteralCheck {
    fn name(&self) -> &'static str {
        "ip-literal"
    }

    fn run(&self, url: &ScannedUrl, _lexicon: &Lexicon, result: &mut ScanResult) {
        if url.is_ip {
            result.add_risk(25, "Uses IP address instead of domain name - highly suspicious");
        }
        result.details.uses_ip = Some(url.is_ip);
    }
}

pub struct HomographCheck;

impl LexicalCheck for HomographCheck {
    fn name(&self) -> &'static str {
        "homograph"
    }

    fn run(&self, url: &ScannedUrl, _lexicon: &Lexicon, result: &mut ScanResult) {
        let punycode = url.hostname.contains("xn--");
        if punycode {
            result.add_risk(15, "Punycode detected (potential homograph attack)");
        }
        result.details.punycode = Some(punycode);
    }
}

/// Legitimate brand embedded in an unrelated host, e.g. `paypal.com.evil.net`.
pub struct BrandSpoofingCheck;

impl LexicalCheck for BrandSpoofingCheck {
    fn name(&self) -> &'static str {
        "brand-spoofing"
    }

    fn run(&self, url: &ScannedUrl, lexicon: &Lexicon, result: &mut ScanResult) {
        let host = url.bare_host();
        let brand = lexicon.legitimate_domains.iter().find(|legit| {
            host.contains(legit.as_str())
                && host != legit.as_str()
                && !host.ends_with(&format!(".{}", legit))
        });

        match brand {
            Some(brand) => {
                result.add_risk(
                    20,
                    format!(
                        "Brand spoofing detected: {} appears inside another domain",
                        brand
                    ),
                );
                result.details.brand_spoofing = Some(BrandSpoofing {
                    detected: true,
                    brand: Some(brand.clone()),
                });
            }
            None => result.details.brand_spoofing = Some(BrandSpoofing::default()),
        }
    }
}

pub struct ShortenerCheck;

impl LexicalCheck for ShortenerCheck {
    fn name(&self) -> &'static str {
        "shortener"
    }

    fn run(&self, url: &ScannedUrl, lexicon: &Lexicon, result: &mut ScanResult) {
        let host = url.bare_host();
        let shortener = lexicon.shorteners.iter().any(|s| s == host);
        if shortener {
            result.add_risk(15, "URL shortener detected - destination is hidden");
        }
        result.details.is_shortener = Some(shortener);
    }
}

pub struct KeywordCheck;

impl LexicalCheck for KeywordCheck {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn run(&self, url: &ScannedUrl, lexicon: &Lexicon, result: &mut ScanResult) {
        let href = url.href.to_lowercase();
        let found: Vec<String> = lexicon
            .suspicious_keywords
            .iter()
            .filter(|kw| href.contains(&kw.to_lowercase()))
            .cloned()
            .collect();

        if !found.is_empty() {
            let points = (KEYWORD_POINTS * found.len() as u32).min(KEYWORD_CAP);
            result.add_risk(
                points,
                format!("Suspicious keywords found: {}", found.join(", ")),
            );
        }
        result.details.suspicious_keywords = Some(found);
    }
}

pub struct SpecialCharsCheck;

impl LexicalCheck for SpecialCharsCheck {
    fn name(&self) -> &'static str {
        "special-chars"
    }

    fn run(&self, url: &ScannedUrl, _lexicon: &Lexicon, result: &mut ScanResult) {
        let count = url
            .hostname
            .chars()
            .filter(|c| matches!(c, '-' | '_' | '.' | '@'))
            .count();
        let excessive = count >= SPECIAL_CHAR_LIMIT;
        if excessive {
            result.add_risk(
                15,
                "Excessive special characters in domain - possible obfuscation",
            );
        }
        result.details.excessive_special_chars = Some(excessive);
    }
}

pub struct LengthCheck;

impl LexicalCheck for LengthCheck {
    fn name(&self) -> &'static str {
        "length"
    }

    fn run(&self, url: &ScannedUrl, _lexicon: &Lexicon, result: &mut ScanResult) {
        let length = url.href.chars().count();
        let excessive = length > MAX_HREF_LENGTH;
        if excessive {
            result.add_risk(
                15,
                "Unusually long URL - often used to hide malicious content",
            );
        }
        result.details.excessive_length = Some(excessive);
        result.details.url_length = Some(length);
    }
}

pub struct SubdomainCheck;

impl LexicalCheck for SubdomainCheck {
    fn name(&self) -> &'static str {
        "subdomains"
    }

    fn run(&self, url: &ScannedUrl, _lexicon: &Lexicon, result: &mut ScanResult) {
        // Everything left of the domain and its TLD.
        let subdomains = url.hostname.split('.').count().saturating_sub(2);
        let excessive = subdomains >= SUBDOMAIN_LIMIT;
        if excessive {
            result.add_risk(
                12,
                "Multiple subdomains detected - potential phishing technique",
            );
        }
        result.details.excessive_subdomains = Some(excessive);
        result.details.subdomain_count = Some(subdomains);
    }
}

pub struct PortCheck;

impl LexicalCheck for PortCheck {
    fn name(&self) -> &'static str {
        "port"
    }

    fn run(&self, url: &ScannedUrl, _lexicon: &Lexicon, result: &mut ScanResult) {
        let odd_port = url.port.filter(|p| !matches!(p, 80 | 443));
        if let Some(port) = odd_port {
            result.add_risk(10, format!("Non-standard port detected: {}", port));
        }
        result.details.non_standard_port = Some(odd_port.is_some());
    }
}
