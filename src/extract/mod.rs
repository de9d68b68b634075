//! Content extraction from fetched HTML
//!
//! Turns a raw page into an ordered sequence of [`ContentBlock`]s:
//! - The walk is restricted to the main content region when one exists
//! - Boilerplate subtrees are pruned before any block is emitted
//! - Headings (levels 1-4), paragraphs, table cells and list items become blocks
//! - Short paragraph and list blocks are dropped as noise; headings never are

mod block;
mod classify;

pub use block::{BlockKind, ContentBlock, PageContent};
pub use classify::{classify, is_boilerplate, NodeClass};

use crate::config::ExtractorConfig;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Selectors tried in order to find the main content region
const MAIN_REGION_SELECTORS: &[&str] = &["main", "article", "[role=main]", "body"];

/// Extracts the ordered content blocks of a page with default thresholds
///
/// # Example
///
/// ```
/// use pulse::extract::{extract, BlockKind};
/// use url::Url;
///
/// let html = "<html><body><nav><h1>Menu</h1></nav><h1>Install</h1></body></html>";
/// let url = Url::parse("https://docs.example.com/install").unwrap();
/// let blocks = extract(html, &url);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].kind, BlockKind::Heading(1));
/// assert_eq!(blocks[0].text, "Install");
/// ```
pub fn extract(html: &str, page_url: &Url) -> Vec<ContentBlock> {
    ContentExtractor::default().extract(html, page_url).blocks
}

/// Configurable content extractor
#[derive(Debug, Clone, Default)]
pub struct ContentExtractor {
    config: ExtractorConfig,
}

impl ContentExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extracts the title and content blocks of a page
    ///
    /// Malformed HTML is parsed best-effort; a page with no usable content
    /// yields an empty block list.
    pub fn extract(&self, html: &str, page_url: &Url) -> PageContent {
        let document = Html::parse_document(html);
        let mut blocks = Vec::new();

        if let Some(region) = main_region(&document) {
            self.walk(region, &mut blocks);
        }

        let title = page_title(&document).or_else(|| {
            blocks
                .iter()
                .find(|block| block.kind == BlockKind::Heading(1))
                .map(|block| block.text.clone())
        });

        tracing::trace!("Extracted {} block(s) from {}", blocks.len(), page_url);

        PageContent {
            url: page_url.clone(),
            title,
            blocks,
        }
    }

    /// Walks the region in document order, emitting blocks
    fn walk(&self, region: ElementRef<'_>, blocks: &mut Vec<ContentBlock>) {
        let mut stack = vec![region];

        while let Some(element) = stack.pop() {
            match classify(element.value()) {
                NodeClass::Boilerplate => {}
                NodeClass::Heading(level) => {
                    let text = block_text(element, false);
                    if !text.is_empty() {
                        let position = blocks.len();
                        blocks.push(ContentBlock::heading(level, text, position));
                    }
                }
                NodeClass::Paragraph => {
                    self.push_text_block(BlockKind::Paragraph, block_text(element, false), blocks);
                }
                NodeClass::ListItem => {
                    self.push_text_block(BlockKind::ListItem, block_text(element, true), blocks);
                    push_children(element, &mut stack, is_list);
                }
                NodeClass::Container => {
                    push_children(element, &mut stack, |_| true);
                }
            }
        }
    }

    fn push_text_block(&self, kind: BlockKind, text: String, blocks: &mut Vec<ContentBlock>) {
        if text.chars().count() < self.config.min_block_length.max(1) {
            return;
        }

        let position = blocks.len();
        blocks.push(ContentBlock {
            kind,
            text,
            position,
        });
    }
}

/// Pushes child elements onto the walk stack so they pop in document order
fn push_children<'a>(
    element: ElementRef<'a>,
    stack: &mut Vec<ElementRef<'a>>,
    keep: impl Fn(&ElementRef<'a>) -> bool,
) {
    let children: Vec<_> = element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| keep(child))
        .collect();
    stack.extend(children.into_iter().rev());
}

fn is_list(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "ul" | "ol")
}

/// Returns the first matching main content region
fn main_region(document: &Html) -> Option<ElementRef<'_>> {
    MAIN_REGION_SELECTORS
        .iter()
        .filter_map(|selector| Selector::parse(selector).ok())
        .find_map(|selector| document.select(&selector).next())
}

fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title = document.select(&selector).next()?;
    let text = normalize_whitespace(&title.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

/// Collects the whitespace-normalized text of a block element
///
/// Boilerplate descendants are skipped. With `skip_lists`, nested `ul`/`ol`
/// subtrees are skipped too; the walk emits their items separately.
fn block_text(element: ElementRef<'_>, skip_lists: bool) -> String {
    let mut raw = String::new();
    collect_text(element, skip_lists, &mut raw);
    normalize_whitespace(&raw)
}

fn collect_text(element: ElementRef<'_>, skip_lists: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(child_element) => {
                if is_boilerplate(child_element) {
                    continue;
                }
                if skip_lists && matches!(child_element.name(), "ul" | "ol") {
                    continue;
                }
                if child_element.name() == "br" {
                    out.push(' ');
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, skip_lists, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapses runs of whitespace to a single space and trims
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
