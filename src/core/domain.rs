/// Reduce a hostname to its registrable domain.
///
/// Hosts under one of `suffixes` (multi-label public suffixes such as `co.uk`) keep
/// three labels, everything else keeps two. The suffix table is small and static, so
/// hosts under unlisted multi-label suffixes are split one label too short.
pub fn registrable_domain(hostname: &str, suffixes: &[String]) -> String {
    let lowered = hostname.to_lowercase();
    let host = lowered
        .trim_start_matches('[')
        .trim_end_matches(']');
    let host = host.strip_prefix("www.").unwrap_or(host);

    let labels: Vec<&str> = host.split('.').collect();
    let multi_label = suffixes
        .iter()
        .any(|sfx| host.ends_with(&format!(".{}", sfx.to_lowercase())));
    if multi_label && labels.len() >= 3 {
        return labels[labels.len() - 3..].join(".");
    }
    if labels.len() >= 2 {
        return labels[labels.len() - 2..].join(".");
    }
    host.to_string()
}
