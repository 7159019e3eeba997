use url::Url;

/// Extracts the lower-cased host from a URL string
///
/// Returns `None` for relative references and for URLs without a host.
///
/// # Examples
///
/// ```
/// use site2kb::url::extract_host;
///
/// assert_eq!(extract_host("https://Docs.Example.com/a"), Some("docs.example.com".to_string()));
/// assert_eq!(extract_host("/relative/path"), None);
/// ```
pub fn extract_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Derives the registrable root domain of a hostname
///
/// This is the last two dot-separated labels, lower-cased. A hostname with a
/// single label is returned as is; an absent hostname yields an empty string.
///
/// # Examples
///
/// ```
/// use site2kb::url::root_domain;
///
/// assert_eq!(root_domain(Some("api.v2.Example.com")), "example.com");
/// assert_eq!(root_domain(Some("localhost")), "localhost");
/// assert_eq!(root_domain(None), "");
/// ```
pub fn root_domain(hostname: Option<&str>) -> String {
    let hostname = match hostname {
        Some(h) if !h.is_empty() => h.to_lowercase(),
        _ => return String::new(),
    };

    let labels: Vec<&str> = hostname.split('.').collect();
    if labels.len() >= 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        hostname
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_host() {
        assert_eq!(
            extract_host("https://example.com/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_host_ignores_port() {
        assert_eq!(
            extract_host("https://example.com:8080/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_host_lowercases() {
        assert_eq!(
            extract_host("https://Example.COM/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_host_of_hostless_url() {
        assert_eq!(extract_host("mailto:someone@example.com"), None);
        assert_eq!(extract_host("page.html"), None);
    }

    #[test]
    fn test_root_domain_of_simple_host() {
        assert_eq!(root_domain(Some("example.com")), "example.com");
    }

    #[test]
    fn test_root_domain_of_subdomain() {
        assert_eq!(root_domain(Some("blog.example.com")), "example.com");
        assert_eq!(root_domain(Some("deep.nested.sub.example.com")), "example.com");
    }

    #[test]
    fn test_root_domain_lowercases() {
        assert_eq!(root_domain(Some("WWW.Example.COM")), "example.com");
    }

    #[test]
    fn test_root_domain_single_label() {
        assert_eq!(root_domain(Some("localhost")), "localhost");
    }

    #[test]
    fn test_root_domain_absent() {
        assert_eq!(root_domain(None), "");
        assert_eq!(root_domain(Some("")), "");
    }

    #[test]
    fn test_root_domain_multi_part_suffix_is_not_special() {
        // Only the last two labels count, public suffixes included
        assert_eq!(root_domain(Some("shop.example.co.uk")), "co.uk");
    }
}
