/// Checks whether `candidate` is `base` or one of its subdomains
///
/// Matching happens on a dot boundary, so `myexample.com` is not a subdomain
/// of `example.com`. Both inputs are expected to be lower-cased already.
///
/// # Examples
///
/// ```
/// use site2kb::url::host_matches;
///
/// assert!(host_matches("example.com", "example.com"));
/// assert!(host_matches("example.com", "api.v2.example.com"));
/// assert!(!host_matches("example.com", "myexample.com"));
/// ```
pub fn host_matches(base: &str, candidate: &str) -> bool {
    if base.is_empty() {
        return false;
    }

    candidate == base
        || candidate
            .strip_suffix(base)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(host_matches("example.com", "example.com"));
        assert!(host_matches("blog.example.com", "blog.example.com"));
    }

    #[test]
    fn test_exact_no_match() {
        assert!(!host_matches("example.com", "other.com"));
        assert!(!host_matches("blog.example.com", "example.com"));
    }

    #[test]
    fn test_subdomain_match() {
        assert!(host_matches("example.com", "blog.example.com"));
        assert!(host_matches("example.com", "deep.nested.sub.example.com"));
    }

    #[test]
    fn test_no_match_without_dot_boundary() {
        assert!(!host_matches("example.com", "myexample.com"));
        assert!(!host_matches("example.com", "example.com.org"));
    }

    #[test]
    fn test_case_sensitivity() {
        assert!(!host_matches("example.com", "EXAMPLE.COM"));
    }

    #[test]
    fn test_empty_strings() {
        assert!(!host_matches("example.com", ""));
        assert!(!host_matches("", "example.com"));
        assert!(!host_matches("", ""));
    }
}
