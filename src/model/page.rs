//! Page-level layout types.

use serde::{Deserialize, Serialize};

use super::BBox;

/// A merged paragraph of text carrying the dominant style of its lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// Union bounding box of the merged lines
    pub bbox: BBox,
    /// Concatenated text content
    pub text: String,
    /// Dominant font name
    #[serde(default)]
    pub font: String,
    /// Dominant font size in points
    pub size: f32,
    /// Canonical `#rrggbb` color
    pub color: String,
    /// Style-flag bitmask of the dominant span
    #[serde(default)]
    pub flags: u32,
}

/// A placed embedded image, referenced by saved filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Placement bounding box
    pub bbox: BBox,
    /// Saved image filename (see [`crate::assets::image_filename`])
    pub src: String,
}

/// A hyperlink hot-zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkBlock {
    /// Hot-zone rectangle
    pub bbox: BBox,
    /// Target URL
    pub url: String,
}

/// A content block on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A merged text paragraph
    Text(TextBlock),
    /// An embedded image
    Image(ImageBlock),
    /// A hyperlink hot-zone
    Link(LinkBlock),
}

impl Block {
    /// Bounding box of the block, whatever its kind.
    pub fn bbox(&self) -> &BBox {
        match self {
            Block::Text(t) => &t.bbox,
            Block::Image(i) => &i.bbox,
            Block::Link(l) => &l.bbox,
        }
    }

    /// Top edge, used for reading-order sorts.
    pub fn top(&self) -> f32 {
        self.bbox().y0
    }

    /// Check if this block is a text paragraph.
    pub fn is_text(&self) -> bool {
        matches!(self, Block::Text(_))
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image(_))
    }

    /// Check if this block is a link.
    pub fn is_link(&self) -> bool {
        matches!(self, Block::Link(_))
    }
}

/// A single reconstructed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    #[serde(rename = "page")]
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Page rotation in degrees (0, 90, 180, 270)
    #[serde(default)]
    pub rotation: u16,

    /// Content blocks in reading order (sorted by top edge)
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            rotation: 0,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Sort blocks into reading order (top to bottom), keeping the original
    /// order of blocks sharing a top edge.
    pub fn sort_blocks(&mut self) {
        self.blocks.sort_by(|a, b| {
            a.top()
                .partial_cmp(&b.top())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Plain text content of the page's text blocks.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A reconstructed document layout: ordered pages plus the flat list of
/// saved image filenames.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    /// Pages in ascending page order
    pub pages: Vec<Page>,
    /// Saved image filenames across all pages, in page order
    pub image_files: Vec<String>,
}

impl Layout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Plain text of all pages.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
