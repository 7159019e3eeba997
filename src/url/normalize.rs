use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// Scheme assumed when the input carries none
const DEFAULT_SCHEME: &str = "https";

/// Normalizes a URL to its canonical crawl form
///
/// # Normalization Steps
///
/// 1. Assume `https://` if the input has no scheme
/// 2. Parse the URL (lower-cases scheme and host)
/// 3. Remove fragment (everything after #)
/// 4. Remove trailing slashes from the path
/// 5. Serialize a bare origin without its trailing `/`
///
/// The result is a fixed point: normalizing it again returns it unchanged.
///
/// # Examples
///
/// ```
/// use site2kb::url::normalize_url;
///
/// assert_eq!(normalize_url("example.com/a/").unwrap(), "https://example.com/a");
/// assert_eq!(normalize_url("https://example.com/a#top").unwrap(), "https://example.com/a");
/// assert_eq!(normalize_url("https://example.com/").unwrap(), "https://example.com");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<String> {
    let input = url_str.trim();
    if input.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut url = parse_with_default_scheme(input)?;

    url.set_fragment(None);

    if !url.cannot_be_a_base() {
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
    }

    // Special schemes always serialize an empty path as "/"
    let bare_origin = url.path() == "/" && url.query().is_none();

    let mut normalized: String = url.into();
    if bare_origin && normalized.ends_with('/') {
        normalized.pop();
    }

    Ok(normalized)
}

/// Parses `input`, prefixing the default scheme when none is present
fn parse_with_default_scheme(input: &str) -> UrlResult<Url> {
    match Url::parse(input) {
        Ok(url) if !is_host_and_port(&url) => Ok(url),
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {
            let with_scheme = format!("{}://{}", DEFAULT_SCHEME, input.trim_start_matches('/'));
            Url::parse(&with_scheme).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))
        }
        Err(e) => Err(UrlError::Parse(format!("{}: {}", input, e))),
    }
}

/// `example.com:8080/docs` parses with `example.com` as its scheme
///
/// Only dotted names and `localhost` count as hosts; `tel:8080` stays `tel:`.
fn is_host_and_port(url: &Url) -> bool {
    let scheme = url.scheme();
    url.cannot_be_a_base()
        && url.path().starts_with(|c: char| c.is_ascii_digit())
        && (scheme.contains('.') || scheme == "localhost")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_missing_scheme() {
        assert_eq!(normalize_url("example.com/a/").unwrap(), "https://example.com/a");
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
    }

    #[test]
    fn test_keeps_existing_scheme() {
        assert_eq!(
            normalize_url("http://example.com/page").unwrap(),
            "http://example.com/page"
        );
    }

    #[test]
    fn test_host_and_port_without_scheme() {
        assert_eq!(
            normalize_url("localhost:8080/docs").unwrap(),
            "https://localhost:8080/docs"
        );
    }

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(
            normalize_url("https://example.com/page/").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_bare_origin_is_not_emptied() {
        assert_eq!(
            normalize_url("https://example.com/").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            normalize_url("https://example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_remove_fragment() {
        assert_eq!(
            normalize_url("https://example.com/page#section").unwrap(),
            "https://example.com/page"
        );
        assert_eq!(
            normalize_url("https://example.com/#top").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_query_is_preserved() {
        assert_eq!(
            normalize_url("https://example.com/search/?q=rust#results").unwrap(),
            "https://example.com/search?q=rust"
        );
        assert_eq!(
            normalize_url("https://example.com/?next=/").unwrap(),
            "https://example.com/?next=/"
        );
    }

    #[test]
    fn test_lowercase_host() {
        assert_eq!(
            normalize_url("HTTPS://EXAMPLE.COM/Page").unwrap(),
            "https://example.com/Page"
        );
    }

    #[test]
    fn test_equivalent_forms_converge() {
        let a = normalize_url("example.com/a/").unwrap();
        let b = normalize_url("https://example.com/a").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "example.com/a/",
            "https://example.com/",
            "https://example.com/a//",
            "http://Example.com/docs/?page=2#x",
            "https://example.com/?next=/",
            "localhost:3000",
        ];

        for input in inputs {
            let once = normalize_url(input).unwrap();
            let twice = normalize_url(&once).unwrap();
            assert_eq!(once, twice, "normalization not idempotent for {}", input);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(normalize_url("").unwrap_err(), UrlError::Empty));
        assert!(matches!(normalize_url("   ").unwrap_err(), UrlError::Empty));
    }

    #[test]
    fn test_malformed_url() {
        assert!(normalize_url("http://exa mple.com").is_err());
    }

    #[test]
    fn test_non_http_scheme_passes_through() {
        // Scope filtering rejects these later
        assert_eq!(
            normalize_url("mailto:team@example.com").unwrap(),
            "mailto:team@example.com"
        );
    }

    #[test]
    fn test_numeric_opaque_scheme_is_not_a_host() {
        assert_eq!(normalize_url("tel:8080").unwrap(), "tel:8080");
        assert_eq!(
            normalize_url("docs.example.com:8443/guide").unwrap(),
            "https://docs.example.com:8443/guide"
        );
    }
}
