use lazy_static::lazy_static;
use scraper::{Html, Selector};

lazy_static! {
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("static selector");
}

/// Elements whose text is never shown on the page.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts the article text from a page.
///
/// Returns the text of every `<p>` joined with newlines, in document order.
/// When that is empty or blank, falls back to all visible text of the page.
pub fn extract_text(raw_html: &[u8]) -> String {
    let html = String::from_utf8_lossy(raw_html);
    let document = Html::parse_document(&html);

    let paragraphs = paragraph_text(&document);
    if !paragraphs.trim().is_empty() {
        return paragraphs;
    }
    visible_text(&document)
}

fn paragraph_text(document: &Html) -> String {
    document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_text(document: &Html) -> String {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            (!hidden).then(|| &**text)
        })
        .collect()
}
