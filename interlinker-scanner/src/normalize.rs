//! URL canonicalization used for host comparison and de-duplication.

use url::Url;

/// Lowercased host of `url` without a leading `www.`.
///
/// Returns an empty string when the URL cannot be parsed or has no host.
pub fn normalize_host(url: &str) -> String {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };

    let host = host.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// True when both URLs resolve to the same normalized host.
///
/// Two URLs without a usable host are never the same host.
pub fn same_host(a: &str, b: &str) -> bool {
    let host_a = normalize_host(a);
    !host_a.is_empty() && host_a == normalize_host(b)
}

/// Whether an `href` value is worth resolving and following.
pub fn is_fetchable_link(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("mailto:") || lower.starts_with("tel:") || lower.starts_with("javascript:")
    {
        return false;
    }

    lower.starts_with("http://") || lower.starts_with("https://") || href.starts_with('/')
}

/// Resolves `href` against `base` and drops the fragment.
pub fn resolve_and_strip(base: &str, href: &str) -> Option<String> {
    let base_url = Url::parse(base.trim()).ok()?;
    let mut resolved = base_url.join(href.trim()).ok()?;
    resolved.set_fragment(None);
    Some(resolved.to_string())
}

/// Comparison form of a URL: trimmed, with every trailing `/` removed.
pub fn strip_trailing_slash(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

/// Key under which two spellings of the same URL compare equal.
///
/// Parseable URLs take the serialized `Url` form (lowercase host, default port
/// dropped, path percent-encoded) without fragment; anything else is kept as
/// typed. Trailing slashes are removed in both cases.
pub fn canonical_url(url: &str) -> String {
    match Url::parse(url.trim()) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            strip_trailing_slash(parsed.as_str()).to_string()
        }
        Err(_) => strip_trailing_slash(url).to_string(),
    }
}
