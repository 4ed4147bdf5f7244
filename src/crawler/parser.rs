//! HTML parser for extracting visible text and references
//!
//! This module handles parsing HTML content to extract:
//! - Visible text for spell checking
//! - Anchor targets to follow (`<a href>`)
//! - Every checkable reference (`<a href>` and `<img src>`) in document order

use scraper::{ElementRef, Html, Selector};

/// Elements whose content is never rendered as text
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
///
/// References are kept exactly as written in the markup; resolution against
/// the page URL happens later.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Visible text with whitespace collapsed
    pub text: String,

    /// Raw `href` values of anchors, in document order
    pub anchors: Vec<String>,

    /// Raw `href`/`src` values of anchors and images, in document order
    pub references: Vec<String>,
}

/// Parses HTML content and extracts text, links and images
///
/// # Arguments
///
/// * `html` - The HTML content to parse
///
/// # Example
///
/// ```
/// use site_inspector::crawler::parse_html;
///
/// let html = r#"<html><body><p>Hi</p><a href="/page">Link</a><img src="/i.png"></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.text, "Hi Link");
/// assert_eq!(parsed.anchors, vec!["/page"]);
/// assert_eq!(parsed.references, vec!["/page", "/i.png"]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        text: extract_visible_text(&document),
        anchors: extract_attr(&document, "a[href]", &[("a", "href")]),
        references: extract_attr(
            &document,
            "a[href], img[src]",
            &[("a", "href"), ("img", "src")],
        ),
    }
}

/// Collects attribute values for the selected elements in document order
fn extract_attr(document: &Html, selector: &str, attrs: &[(&str, &str)]) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let name = element.value().name();
            attrs
                .iter()
                .find(|(tag, _)| *tag == name)
                .and_then(|(_, attr)| element.value().attr(attr))
                .map(str::to_string)
        })
        .collect()
}

/// Extracts the text a reader would see, whitespace collapsed
fn extract_visible_text(document: &Html) -> String {
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    if HIDDEN_ELEMENTS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        }
    }
}
