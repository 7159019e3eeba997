use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// The page budget is clamped into range before validation runs.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site2kb::config::load_config;
///
/// let config = load_config(Path::new("site2kb.toml")).unwrap();
/// println!("Max pages: {}", config.crawler.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config = parse_unvalidated(content)?;
    validate(&config)?;
    Ok(config)
}

/// Parses TOML text and clamps the page budget, leaving validation to the caller
///
/// Used when further overrides are applied before the config is checked.
pub fn parse_unvalidated(content: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(content)?;
    config.crawler.clamp_page_budget();
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be told apart.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let (config, hash) = load_unvalidated_config_with_hash(path)?;
    validate(&config)?;
    Ok((config, hash))
}

/// Like `load_config_with_hash`, without running `validate`
pub fn load_unvalidated_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_unvalidated(&content)?;
    Ok((config, hash_content(&content)))
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
start-url = "https://docs.example.com/guide/"
max-pages = 25
max-depth = 2
max-concurrent-fetches = 4
request-timeout-ms = 5000
crawl-deadline-ms = 60000

[scope]
include-subdomains = false
allowed-hosts = ["docs.example.com"]
path-prefixes = ["/guide"]

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"

[output]
path = "./guide.md"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.start_url, "https://docs.example.com/guide/");
        assert_eq!(config.crawler.max_pages, 25);
        assert_eq!(config.crawler.max_depth, 2);
        assert_eq!(config.crawler.max_concurrent_fetches, 4);
        assert!(!config.scope.include_subdomains);
        assert_eq!(config.scope.allowed_hosts, vec!["docs.example.com"]);
        assert_eq!(config.scope.path_prefixes, vec!["/guide"]);
        assert_eq!(config.user_agent.crawler_name, "TestCrawler");
        assert_eq!(config.output.path, "./guide.md");
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config(
            r#"
[crawler]
start-url = "https://example.com/"
"#,
        )
        .unwrap();

        assert_eq!(config.crawler.max_pages, 50);
        assert_eq!(config.crawler.max_depth, 3);
        assert_eq!(config.crawler.max_concurrent_fetches, 5);
        assert!(!config.crawler.respect_robots);
        assert!(config.scope.include_subdomains);
        assert!(config.scope.allowed_hosts.is_empty());
        assert_eq!(config.output.path, "knowledgebase.md");
    }

    #[test]
    fn test_page_budget_is_clamped_on_load() {
        let config = parse_config(
            r#"
[crawler]
start-url = "https://example.com/"
max-pages = 9000
"#,
        )
        .unwrap();
        assert_eq!(config.crawler.max_pages, 500);

        let config = parse_config(
            r#"
[crawler]
start-url = "https://example.com/"
max-pages = 0
"#,
        )
        .unwrap();
        assert_eq!(config.crawler.max_pages, 1);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/site2kb.toml"));
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config(
            r#"
[crawler]
start-url = "https://example.com/"
max-concurrent-fetches = 0
"#,
        );
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_unvalidated_load_defers_checks() {
        let file = create_temp_config(
            r#"
[crawler]
start-url = "https://example.com/"
max-concurrent-fetches = 0
max-pages = 9000
"#,
        );

        assert!(load_config_with_hash(file.path()).is_err());

        let (mut config, hash) = load_unvalidated_config_with_hash(file.path()).unwrap();
        assert_eq!(config.crawler.max_concurrent_fetches, 0);
        assert_eq!(config.crawler.max_pages, 500);
        assert_eq!(hash, compute_config_hash(file.path()).unwrap());

        config.crawler.max_concurrent_fetches = 4;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
