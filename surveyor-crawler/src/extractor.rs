use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use url::Url;

const BLOG_PATHS: [&str; 4] = ["/blog/", "/news/", "/posts/", "/articles/"];
const PRODUCT_PATHS: [&str; 5] = ["/product/", "/shop/", "/item/", "/store/", "/collections/"];
const LANDING_PATHS: [&str; 6] = [
    "/about",
    "/contact",
    "/service",
    "/services",
    "/pricing",
    "/features",
];

/// On-page fields pulled out of one fetched HTML document.
#[derive(Debug, Clone, Default)]
pub struct PageFields {
    pub title: String,
    pub description: String,
    pub h1: String,
    pub headings: BTreeMap<String, Vec<String>>,
    pub word_count: usize,
    /// Same-host links, absolute, fragment-stripped, first-seen order, deduplicated.
    pub internal_links: Vec<String>,
    pub external_count: usize,
    pub link_to_word_ratio: f64,
    pub schema: String,
    pub content_type: String,
}

pub struct PageExtractor;

impl PageExtractor {
    /// Parse one page. `seed_host` decides internal vs external links.
    pub fn extract(url: &Url, html: &str, seed_host: &str) -> PageFields {
        let document = Html::parse_document(html);

        let title_selector = Selector::parse("title").unwrap();
        let title = document
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let description_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
        let description = document
            .select(&description_selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let mut headings = BTreeMap::new();
        let mut h1 = String::new();
        for level in 1..=6 {
            let selector = Selector::parse(&format!("h{}", level)).unwrap();
            let texts: Vec<String> = document
                .select(&selector)
                .map(|el| Self::element_text(el))
                .collect();
            if level == 1 {
                h1 = texts.first().cloned().unwrap_or_default();
            }
            headings.insert(format!("h{}", level), texts);
        }

        let link_selector = Selector::parse("a[href]").unwrap();
        let mut internal_raw: Vec<String> = Vec::new();
        let mut external_raw: Vec<String> = Vec::new();

        for element in document.select(&link_selector) {
            if let Some(href) = element.value().attr("href")
                && let Some(resolved) = Self::resolve_url(url, href)
            {
                let same_host = resolved.host_str() == Some(seed_host);
                if same_host {
                    internal_raw.push(resolved.to_string());
                } else {
                    external_raw.push(resolved.to_string());
                }
            }
        }

        let total_links = internal_raw.len() + external_raw.len();

        let mut seen = HashSet::new();
        let mut internal_links = Vec::new();
        for link in internal_raw {
            if seen.insert(link.clone()) {
                internal_links.push(link);
            }
        }
        let external_count = external_raw.iter().collect::<HashSet<_>>().len();

        let word_count = Self::visible_text(&document).split_whitespace().count();
        let link_to_word_ratio = if word_count > 0 {
            round3(total_links as f64 / word_count as f64)
        } else {
            0.0
        };

        let schema = Self::extract_schema_types(&document);
        let content_type = Self::classify_content_type(url, &document);

        PageFields {
            title,
            description,
            h1,
            headings,
            word_count,
            internal_links,
            external_count,
            link_to_word_ratio,
            schema,
            content_type,
        }
    }

    /// Concatenated text of the whole document with script/style/noscript
    /// subtrees skipped and whitespace collapsed.
    pub fn visible_text(document: &Html) -> String {
        let mut pieces: Vec<&str> = Vec::new();
        Self::collect_text(document.root_element(), &mut pieces);
        pieces
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn collect_text<'a>(element: ElementRef<'a>, pieces: &mut Vec<&'a str>) {
        for child in element.children() {
            if let Some(el) = ElementRef::wrap(child) {
                if matches!(el.value().name(), "script" | "style" | "noscript") {
                    continue;
                }
                Self::collect_text(el, pieces);
            } else if let Some(text) = child.value().as_text() {
                pieces.push(text);
            }
        }
    }

    /// Element text the way a user reads it: pieces trimmed, joined with
    /// single spaces.
    pub fn element_text(element: ElementRef) -> String {
        element
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `@type` (or `type`) values of every parseable JSON-LD block,
    /// joined with ", ". Malformed blocks are skipped.
    fn extract_schema_types(document: &Html) -> String {
        let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
        let mut types: Vec<String> = Vec::new();

        for element in document.select(&selector) {
            let raw = element.text().collect::<String>();
            if raw.trim().is_empty() {
                continue;
            }
            let Ok(data) = serde_json::from_str::<Value>(&raw) else {
                continue;
            };
            match data {
                Value::Object(_) => Self::push_schema_type(&data, &mut types),
                Value::Array(items) => {
                    for item in items.iter().filter(|v| v.is_object()) {
                        Self::push_schema_type(item, &mut types);
                    }
                }
                _ => {}
            }
        }

        types.join(", ")
    }

    fn push_schema_type(payload: &Value, types: &mut Vec<String>) {
        let value = payload.get("@type").or_else(|| payload.get("type"));
        match value {
            Some(Value::String(s)) => types.push(s.clone()),
            Some(Value::Array(items)) => {
                types.extend(items.iter().filter_map(|v| v.as_str().map(str::to_string)));
            }
            _ => {}
        }
    }

    /// First matching rule wins.
    fn classify_content_type(url: &Url, document: &Html) -> String {
        let lowered = url.as_str().to_lowercase();

        let article_selector = Selector::parse("article").unwrap();
        if BLOG_PATHS.iter().any(|p| lowered.contains(p))
            || document.select(&article_selector).next().is_some()
        {
            return "Blog / Article".to_string();
        }

        if PRODUCT_PATHS.iter().any(|p| lowered.contains(p)) {
            return "Product".to_string();
        }

        if LANDING_PATHS.iter().any(|p| lowered.contains(p)) {
            return "Landing Page".to_string();
        }

        let og_type_selector = Selector::parse(r#"meta[property="og:type"]"#).unwrap();
        let og_product = document
            .select(&og_type_selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|content| content == "product")
            .unwrap_or(false);
        if og_product {
            return "Product".to_string();
        }

        "Other".to_string()
    }

    /// Resolve an anchor href against the page URL. Non-navigational
    /// schemes and bare fragments yield None; fragments are stripped.
    fn resolve_url(base: &Url, href: &str) -> Option<Url> {
        if href.is_empty()
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with('#')
        {
            return None;
        }

        let mut resolved = base.join(href).ok()?;
        resolved.set_fragment(None);
        Some(resolved)
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> PageFields {
        let url = Url::parse("https://example.com/page").unwrap();
        PageExtractor::extract(&url, html, "example.com")
    }

    #[test]
    fn test_extracts_title_description_and_headings() {
        let html = r#"<html><head>
            <title> Home </title>
            <meta name="description" content="A fine page">
        </head><body>
            <h1>Welcome</h1>
            <h2>First</h2>
            <h2>Second</h2>
        </body></html>"#;

        let fields = extract(html);
        assert_eq!(fields.title, "Home");
        assert_eq!(fields.description, "A fine page");
        assert_eq!(fields.h1, "Welcome");
        assert_eq!(fields.headings["h1"], vec!["Welcome"]);
        assert_eq!(fields.headings["h2"], vec!["First", "Second"]);
        assert!(fields.headings["h3"].is_empty());
    }

    #[test]
    fn test_missing_title_and_description_are_empty() {
        let fields = extract("<html><body><p>text</p></body></html>");
        assert_eq!(fields.title, "");
        assert_eq!(fields.description, "");
        assert_eq!(fields.h1, "");
    }

    #[test]
    fn test_classifies_links_by_host_and_deduplicates() {
        let html = r##"<html><body>
            <a href="/a">A</a>
            <a href="/a">A again</a>
            <a href="https://example.com/b#section">B</a>
            <a href="https://other.org/x">X</a>
            <a href="https://other.org/x">X again</a>
            <a href="mailto:sales@example.com">mail</a>
            <a href="tel:+15551234">call</a>
            <a href="javascript:void(0)">js</a>
            <a href="#top">top</a>
        </body></html>"##;

        let fields = extract(html);
        assert_eq!(
            fields.internal_links,
            vec![
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
            ]
        );
        assert_eq!(fields.external_count, 1);
    }

    #[test]
    fn test_single_page_scenario_field_values() {
        // title (1 word) + h1 (1 word) + 5 anchor texts + 93 body words = 100
        let body_words = vec!["lorem"; 93].join(" ");
        let html = format!(
            r#"<html><head><title>Home</title></head><body>
            <h1>Welcome</h1>
            <a href="/one">one</a>
            <a href="/two">two</a>
            <a href="/three">three</a>
            <a href="https://elsewhere.net/a">four</a>
            <a href="https://elsewhere.net/b">five</a>
            <p>{}</p>
            </body></html>"#,
            body_words
        );

        let fields = extract(&html);
        assert_eq!(fields.title.chars().count(), 4);
        assert_eq!(fields.h1, "Welcome");
        assert_eq!(fields.word_count, 100);
        assert_eq!(fields.internal_links.len(), 3);
        assert_eq!(fields.external_count, 2);
        assert!((fields.link_to_word_ratio - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_word_count_skips_script_and_style() {
        let html = r#"<html><body>
            <p>one two three</p>
            <script>var hidden = "four five";</script>
            <style>.x { color: red; }</style>
            <noscript>six</noscript>
        </body></html>"#;

        let fields = extract(html);
        assert_eq!(fields.word_count, 3);
    }

    #[test]
    fn test_zero_words_means_zero_ratio() {
        // A page with links but no text at all must not divide by zero
        let fields = extract(r#"<html><body><a href="/a"></a><a href="/b"></a></body></html>"#);
        assert_eq!(fields.word_count, 0);
        assert_eq!(fields.link_to_word_ratio, 0.0);
    }

    #[test]
    fn test_collects_schema_types_from_objects_and_lists() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type": "Product", "name": "Widget"}</script>
            <script type="application/ld+json">[{"@type": "Organization"}, {"type": "WebSite"}]</script>
            <script type="application/ld+json">{"@type": ["Article", "NewsArticle"]}</script>
            <script type="application/ld+json">{not json at all</script>
        </head><body></body></html>"#;

        let fields = extract(html);
        assert_eq!(
            fields.schema,
            "Product, Organization, WebSite, Article, NewsArticle"
        );
    }

    #[test]
    fn test_classifies_content_types_in_rule_order() {
        let doc = "<html><body></body></html>";
        let article_doc = "<html><body><article>post</article></body></html>";
        let og_doc = r#"<html><head><meta property="og:type" content="product"></head><body></body></html>"#;

        let classify = |url: &str, html: &str| {
            let url = Url::parse(url).unwrap();
            PageExtractor::extract(&url, html, "example.com").content_type
        };

        assert_eq!(classify("https://example.com/blog/post-1", doc), "Blog / Article");
        assert_eq!(classify("https://example.com/x", article_doc), "Blog / Article");
        assert_eq!(classify("https://example.com/shop/widget", doc), "Product");
        assert_eq!(classify("https://example.com/about", doc), "Landing Page");
        assert_eq!(classify("https://example.com/x", og_doc), "Product");
        assert_eq!(classify("https://example.com/x", doc), "Other");

        // URL rules outrank the og:type fallback
        assert_eq!(classify("https://example.com/pricing", og_doc), "Landing Page");
    }
}
