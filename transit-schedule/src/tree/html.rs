//! HTML document trees, backed by `scraper`.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::{Pattern, TreeQuery};

/// Tags that pull in external resources. Schedule pages are read offline,
/// so these are stripped before parsing.
const EXTERNAL_RESOURCE_PATTERNS: &[&str] = &[
    r"(?i)<\s*link[^>]+>",
    r"(?i)<\s*script[^>]+src\s*=[^>]*>\s*<\s*/\s*script\s*>",
    r"(?i)<\s*object[^>]+>",
    r"(?i)<\s*img[^>]+>",
    r"(?i)<\s*embed[^>]+>",
];

static EXTERNAL_RESOURCES: OnceLock<Vec<Regex>> = OnceLock::new();

/// Remove tags that reference external resources (`link`, `script src`,
/// `object`, `img`, `embed`).
///
/// # Examples
///
/// ```
/// use transit_schedule::tree::sanitize_html;
///
/// let html = r#"<p>Hi<img src="x.png"></p><script src="a.js"></script>"#;
/// assert_eq!(sanitize_html(html), "<p>Hi</p>");
/// ```
pub fn sanitize_html(html: &str) -> String {
    let patterns = EXTERNAL_RESOURCES.get_or_init(|| {
        EXTERNAL_RESOURCE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("invalid embedded sanitize pattern"))
            .collect()
    });

    let mut out = html.to_string();
    for re in patterns {
        if let std::borrow::Cow::Owned(replaced) = re.replace_all(&out, "") {
            out = replaced;
        }
    }
    out
}

/// A parsed HTML document.
pub struct HtmlTree {
    document: Html,
}

impl HtmlTree {
    /// Sanitize and parse an HTML document.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(&sanitize_html(html));
        Self { document }
    }
}

impl TreeQuery for HtmlTree {
    type Node<'a> = ElementRef<'a>;

    fn select<'a>(&'a self, pattern: &Pattern) -> Vec<ElementRef<'a>> {
        self.document.select(pattern.selector()).collect()
    }

    fn select_in<'a>(&'a self, context: ElementRef<'a>, pattern: &Pattern) -> Vec<ElementRef<'a>> {
        context.select(pattern.selector()).collect()
    }

    fn text(&self, node: ElementRef<'_>) -> String {
        let raw: String = node.text().collect();
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
