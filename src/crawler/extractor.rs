//! Content extraction: raw HTML to a titled Markdown section
//!
//! This module handles:
//! - Reading the page title
//! - Collecting every outbound link from the original document
//! - Stripping non-content elements and converting the primary region to Markdown

use crate::url::normalize_url;
use scraper::{Html, Selector};
use url::Url;

/// Structural elements removed before conversion
const STRIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "footer", "header", "aside",
];

/// Content landmarks, most specific first
const CONTENT_REGIONS: &[&str] = &["main", "article", "body"];

/// What extraction yields for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Declared `<title>`, trimmed, or the source URL when there is none
    pub title: String,

    /// Markdown of the primary content region, trimmed
    pub markdown: String,

    /// Canonical absolute URLs of every `href` in the original document
    pub links: Vec<String>,
}

/// Extracts title, Markdown body and outbound links from an HTML page
///
/// Links are resolved against `source_url` and normalized but not filtered;
/// scope checks and dedup belong to the crawl engine.
///
/// # Example
///
/// ```
/// use site2kb::crawler::extract;
///
/// let html = r#"<html><head><title> Guide </title></head>
///     <body><nav><a href="/home">Home</a></nav><main><p>Read <a href="/next">on</a>.</p></main></body></html>"#;
/// let page = extract(html, "https://example.com/guide");
///
/// assert_eq!(page.title, "Guide");
/// assert!(page.markdown.contains("[on](/next)"));
/// assert!(!page.markdown.contains("Home"));
/// assert_eq!(page.links, vec!["https://example.com/home", "https://example.com/next"]);
/// ```
pub fn extract(html: &str, source_url: &str) -> ExtractedPage {
    let mut document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_else(|| source_url.to_string());
    let links = extract_links(&document, source_url);

    strip_non_content(&mut document);
    let markdown = html_to_markdown(&content_region_html(&document));

    ExtractedPage {
        title,
        markdown: markdown.trim().to_string(),
        links,
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| {
            let text = element.text().collect::<String>();
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|s| !s.is_empty())
}

/// Collects every `href` in document order, resolved and normalized
fn extract_links(document: &Html, source_url: &str) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let base_url = Url::parse(source_url).ok();

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href.trim(), base_url.as_ref()))
        .collect()
}

/// Resolves `href` against the page URL and normalizes the result
fn resolve_link(href: &str, base_url: Option<&Url>) -> Option<String> {
    let absolute = match base_url {
        Some(base) => base.join(href).ok()?.to_string(),
        None => href.to_string(),
    };

    match normalize_url(&absolute) {
        Ok(normalized) => Some(normalized),
        Err(e) => {
            tracing::trace!("Dropping link {}: {}", href, e);
            None
        }
    }
}

/// Detaches script, style, navigation, header, footer and sidebar subtrees
fn strip_non_content(document: &mut Html) {
    let Ok(selector) = Selector::parse(&STRIPPED_ELEMENTS.join(", ")) else {
        return;
    };

    let node_ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in node_ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Outer HTML of the primary content region, or of the whole document
fn content_region_html(document: &Html) -> String {
    for region in CONTENT_REGIONS {
        if let Ok(selector) = Selector::parse(region) {
            if let Some(element) = document.select(&selector).next() {
                return element.html();
            }
        }
    }

    document.root_element().html()
}

/// Converts HTML to Markdown, keeping links and never hard-wrapping
fn html_to_markdown(html: &str) -> String {
    htmd::convert(html).unwrap_or_else(|e| {
        tracing::debug!("Markdown conversion failed, using plain text: {}", e);
        let fragment = Html::parse_fragment(html);
        fragment.root_element().text().collect::<String>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "https://example.com/docs/page";

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        assert_eq!(extract(html, SOURCE).title, "Test Page");
    }

    #[test]
    fn test_extract_title_with_whitespace() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        assert_eq!(extract(html, SOURCE).title, "Test Page");
    }

    #[test]
    fn test_multiline_title_is_collapsed() {
        let html = "<html><head><title>\n  Release\n\t Notes  </title></head><body></body></html>";
        assert_eq!(extract(html, SOURCE).title, "Release Notes");
    }

    #[test]
    fn test_missing_title_falls_back_to_url() {
        let html = r#"<html><head></head><body><p>x</p></body></html>"#;
        assert_eq!(extract(html, SOURCE).title, SOURCE);
    }

    #[test]
    fn test_blank_title_falls_back_to_url() {
        let html = r#"<html><head><title>   </title></head><body></body></html>"#;
        assert_eq!(extract(html, SOURCE).title, SOURCE);
    }

    #[test]
    fn test_prefers_main_region() {
        let html = r#"<html><body>
            <div>Outside text</div>
            <main><h1>Inside</h1><p>Main body</p></main>
        </body></html>"#;
        let page = extract(html, SOURCE);
        assert!(page.markdown.contains("Main body"));
        assert!(!page.markdown.contains("Outside text"));
    }

    #[test]
    fn test_falls_back_to_article_then_body() {
        let html = r#"<html><body><div>Around</div><article><p>Article text</p></article></body></html>"#;
        let page = extract(html, SOURCE);
        assert!(page.markdown.contains("Article text"));
        assert!(!page.markdown.contains("Around"));

        let html = r#"<html><body><p>Body text</p></body></html>"#;
        assert!(extract(html, SOURCE).markdown.contains("Body text"));
    }

    #[test]
    fn test_strips_non_content_elements() {
        let html = r#"<html><head><style>.x { color: red; }</style></head><body>
            <header>Site header</header>
            <nav>Menu</nav>
            <aside>Sidebar</aside>
            <script>var tracking = 1;</script>
            <p>Real content</p>
            <footer>Copyright</footer>
        </body></html>"#;
        let markdown = extract(html, SOURCE).markdown;

        assert!(markdown.contains("Real content"));
        for noise in ["Site header", "Menu", "Sidebar", "tracking", "color", "Copyright"] {
            assert!(!markdown.contains(noise), "{} was not stripped", noise);
        }
    }

    #[test]
    fn test_markdown_keeps_links() {
        let html = r#"<html><body><p>See <a href="https://example.com/other">the other page</a>.</p></body></html>"#;
        let markdown = extract(html, SOURCE).markdown;
        assert!(markdown.contains("[the other page](https://example.com/other)"));
    }

    #[test]
    fn test_markdown_does_not_hard_wrap() {
        let sentence = "word ".repeat(60);
        let html = format!("<html><body><p>{}</p></body></html>", sentence);
        let markdown = extract(&html, SOURCE).markdown;
        assert_eq!(markdown.lines().count(), 1);
    }

    #[test]
    fn test_links_come_from_original_document() {
        let html = r#"<html><body>
            <nav><a href="/nav-link">Nav</a></nav>
            <main><a href="/main-link">Main</a></main>
            <footer><a href="/footer-link">Footer</a></footer>
        </body></html>"#;
        let links = extract(html, SOURCE).links;
        assert_eq!(
            links,
            vec![
                "https://example.com/nav-link",
                "https://example.com/main-link",
                "https://example.com/footer-link",
            ]
        );
    }

    #[test]
    fn test_links_are_resolved_and_normalized() {
        let html = r#"<html><body>
            <a href="sibling/">Relative</a>
            <a href="../up#section">Parent</a>
            <a href="https://Other.com/x/">Absolute</a>
        </body></html>"#;
        let links = extract(html, SOURCE).links;
        assert_eq!(
            links,
            vec![
                "https://example.com/docs/sibling",
                "https://example.com/up",
                "https://other.com/x",
            ]
        );
    }

    #[test]
    fn test_links_are_not_filtered() {
        let html = r#"<html><body>
            <a href="/a">A</a>
            <a href="/a">A again</a>
            <a href="/logo.png">Logo</a>
            <a href="mailto:team@example.com">Mail</a>
        </body></html>"#;
        let links = extract(html, SOURCE).links;
        assert_eq!(
            links,
            vec![
                "https://example.com/a",
                "https://example.com/a",
                "https://example.com/logo.png",
                "mailto:team@example.com",
            ]
        );
    }
}
