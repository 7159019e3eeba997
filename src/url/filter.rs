use crate::config::ScopeConfig;
use crate::url::matcher::host_matches;
use url::{ParseError, Url};

/// Path suffixes that are never fetched (binary, media, style and script assets)
pub const IGNORED_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".webp", ".bmp", ".css", ".js", ".pdf",
    ".zip", ".tar", ".gz", ".rar", ".7z", ".mp4", ".webm", ".avi", ".mov", ".mp3", ".wav",
    ".ogg",
];

/// A URL string split into the parts the gates look at
enum Target {
    /// Absolute URL with a scheme
    Absolute(Url),
    /// Host-less reference; holds its path and query
    Relative(String),
}

fn parse_target(url: &str) -> Option<Target> {
    match Url::parse(url) {
        Ok(parsed) => Some(Target::Absolute(parsed)),
        Err(ParseError::RelativeUrlWithoutBase) => {
            if url.starts_with("//") {
                // Scheme-relative reference still names a host
                Url::parse(&format!("https:{}", url))
                    .ok()
                    .map(Target::Absolute)
            } else {
                let without_fragment = url.split('#').next().unwrap_or_default();
                Some(Target::Relative(without_fragment.to_string()))
            }
        }
        Err(_) => None,
    }
}

impl Target {
    fn path(&self) -> &str {
        match self {
            Target::Absolute(url) => url.path(),
            Target::Relative(rest) => rest.split('?').next().unwrap_or_default(),
        }
    }

    fn path_and_query(&self) -> String {
        match self {
            Target::Absolute(url) => match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            },
            Target::Relative(rest) => rest.clone(),
        }
    }
}

/// Decides host-scope membership
///
/// Only `http`/`https` (or scheme-less) URLs qualify. Host-less references are
/// always in scope. A non-empty `allowed_hosts` list is authoritative: the host
/// must be one of those hosts or a subdomain of one. Otherwise the host must be
/// `root_domain`, or a subdomain of it when subdomains are included.
pub fn is_in_scope(url: &str, scope: &ScopeConfig, root_domain: &str) -> bool {
    let parsed = match parse_target(url) {
        Some(Target::Absolute(parsed)) => parsed,
        Some(Target::Relative(_)) => return true,
        None => return false,
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    let host = match parsed.host_str() {
        Some(h) if !h.is_empty() => h.to_lowercase(),
        _ => return true,
    };

    if !scope.allowed_hosts.is_empty() {
        return scope
            .allowed_hosts
            .iter()
            .any(|allowed| host_matches(&allowed.to_lowercase(), &host));
    }

    host == root_domain || (scope.include_subdomains && host_matches(root_domain, &host))
}

/// Decides path-prefix membership
///
/// True when `prefixes` is empty; otherwise the URL's path, plus `?query` when
/// present, must start with one of the prefixes (case-sensitive).
pub fn matches_path_prefix(url: &str, prefixes: &[String]) -> bool {
    if prefixes.is_empty() {
        return true;
    }

    let Some(target) = parse_target(url) else {
        return false;
    };

    let path_and_query = target.path_and_query();
    prefixes
        .iter()
        .any(|prefix| path_and_query.starts_with(prefix.as_str()))
}

/// True when the lower-cased path ends with a denylisted extension
pub fn has_ignored_extension(url: &str) -> bool {
    let Some(target) = parse_target(url) else {
        return false;
    };

    let path = target.path().to_lowercase();
    IGNORED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// The single gate for seeding the frontier and filtering discovered links
///
/// # Examples
///
/// ```
/// use site2kb::config::ScopeConfig;
/// use site2kb::url::is_allowed;
///
/// let scope = ScopeConfig::default();
/// assert!(is_allowed("https://x.test/a", &scope, "x.test"));
/// assert!(!is_allowed("https://x.test/b.png", &scope, "x.test"));
/// assert!(!is_allowed("https://other.test/", &scope, "x.test"));
/// ```
pub fn is_allowed(url: &str, scope: &ScopeConfig, root_domain: &str) -> bool {
    !has_ignored_extension(url)
        && is_in_scope(url, scope, root_domain)
        && matches_path_prefix(url, &scope.path_prefixes)
}
