//! URL handling module for site2kb
//!
//! Pure functions only: canonicalization, root-domain derivation, host-scope and
//! path-prefix membership, and the extension denylist. `is_allowed` combines the
//! gates and is the only check the crawl engine applies to a URL.

mod domain;
mod filter;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, root_domain};
pub use filter::{
    has_ignored_extension, is_allowed, is_in_scope, matches_path_prefix, IGNORED_EXTENSIONS,
};
pub use matcher::host_matches;
pub use normalize::normalize_url;
