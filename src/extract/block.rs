//! Content block types produced by the extractor

use url::Url;

/// Kind of a content block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Heading at level 1 through 4
    Heading(u8),
    /// Paragraph or table cell
    Paragraph,
    /// List item
    ListItem,
}

impl BlockKind {
    /// Returns the heading level, or None for text blocks
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockKind::Heading(level) => Some(*level),
            BlockKind::Paragraph | BlockKind::ListItem => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading(_))
    }
}

/// One unit of page content, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub kind: BlockKind,

    /// Whitespace-normalized text; never empty
    pub text: String,

    /// Zero-based order within the page
    pub position: usize,
}

impl ContentBlock {
    pub fn heading(level: u8, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind: BlockKind::Heading(level),
            text: text.into(),
            position,
        }
    }

    pub fn paragraph(text: impl Into<String>, position: usize) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.into(),
            position,
        }
    }

    pub fn list_item(text: impl Into<String>, position: usize) -> Self {
        Self {
            kind: BlockKind::ListItem,
            text: text.into(),
            position,
        }
    }
}

/// Extracted content of one page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Final URL of the page
    pub url: Url,

    /// Text of the `<title>` element, falling back to the first H1
    pub title: Option<String>,

    pub blocks: Vec<ContentBlock>,
}

impl PageContent {
    pub fn has_headings(&self) -> bool {
        self.blocks.iter().any(|block| block.kind.is_heading())
    }
}
