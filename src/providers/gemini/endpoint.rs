//! Request-target resolution for user-supplied base URLs.
//!
//! Operators paste endpoints in several shapes: a full generation endpoint, a
//! versioned API root, or a bare proxy host. The three-case heuristic below
//! is a best-effort default; it lives in this one function so a deployment
//! with an exotic proxy can swap it without touching the client.

use regex::Regex;
use std::sync::OnceLock;

fn versioned_root() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)/v\d+(?:alpha|beta)?\d*$").expect("valid regex"))
}

/// Build a fully qualified `generateContent` target. Pure and total: any
/// non-empty base URL resolves to a syntactically valid URL.
pub fn resolve(base_url: &str, model: &str, api_key: &str) -> String {
    let mut url = base_url.trim().trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        url = format!("https://{}", url);
    }

    let key_separator = if url.contains('?') { '&' } else { '?' };
    if url.contains(":generateContent") {
        // Already a generation endpoint; only the credential is missing.
        return format!("{}{}key={}", url, key_separator, api_key);
    }
    if versioned_root().is_match(&url) {
        return format!("{}/models/{}:generateContent?key={}", url, model, api_key);
    }
    format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        url, model, api_key
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_default_root_model_path_and_key() {
        let url = resolve("https://generativelanguage.googleapis.com", "m1", "k");
        assert!(url.contains("/models/m1:generateContent"));
        assert!(url.ends_with("key=k"));
        assert!(url.contains("/v1beta/"));
    }

    #[test]
    fn versioned_root_gets_model_path_without_extra_version() {
        let url = resolve("https://proxy.example.com/v1beta", "m1", "k");
        assert_eq!(
            url,
            "https://proxy.example.com/v1beta/models/m1:generateContent?key=k"
        );
    }

    #[test]
    fn generation_endpoint_only_receives_the_key() {
        let url = resolve(
            "https://proxy.example.com/v1beta/models/custom:generateContent",
            "m1",
            "k",
        );
        assert_eq!(
            url,
            "https://proxy.example.com/v1beta/models/custom:generateContent?key=k"
        );
        assert_eq!(url.matches(":generateContent").count(), 1);
    }

    #[test]
    fn scheme_and_trailing_slash_are_normalized() {
        let url = resolve("proxy.example.com/", "m1", "k");
        assert!(url.starts_with("https://proxy.example.com/"));
        assert!(!url.contains(".com//"));
    }

    #[test]
    fn existing_query_string_appends_with_ampersand() {
        let url = resolve(
            "https://proxy.example.com/v1/models/m:generateContent?alt=json",
            "m1",
            "k",
        );
        assert!(url.ends_with("alt=json&key=k"));
    }
}
