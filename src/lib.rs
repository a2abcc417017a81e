//! # relayout
//!
//! PDF document layout reconstruction for Rust.
//!
//! This library takes per-page geometric primitives (text spans, images,
//! links, vector rectangles) already extracted from a PDF and rebuilds an
//! editable document model from them: merged paragraphs, vertical sections,
//! column grids, and a paint-ordered element stream. The model renders to
//! semantic HTML, pixel-exact HTML, and JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use relayout::{primitives_from_json, render, LayoutEngine};
//!
//! fn main() -> relayout::Result<()> {
//!     let raw = std::fs::read_to_string("primitives.json")?;
//!     let pages = primitives_from_json(&raw)?;
//!
//!     let layout = LayoutEngine::new().build_layout(&pages);
//!     let options = render::RenderOptions::default();
//!     let html = render::to_semantic_html(&layout, &options);
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Paragraph reconstruction**: span/line merging with tunable gap and
//!   indentation thresholds
//! - **Section and column detection**: vertical whitespace sectioning plus
//!   two-column splits in the central page zone
//! - **Three output surfaces**: editable semantic HTML, pixel-exact HTML,
//!   and layout/structured JSON
//! - **Structured extraction**: paint-ordered text/image/rect elements for
//!   slot-based template pipelines
//! - **Parallel processing**: uses Rayon across independent pages

pub mod assemble;
pub mod assets;
pub mod engine;
pub mod error;
pub mod links;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod primitives;
pub mod render;
pub mod section;

// Re-export commonly used types
pub use assets::AssetContext;
pub use engine::{LayoutEngine, StructuredOptions};
pub use error::{Error, Result};
pub use merge::MergeOptions;
pub use model::{
    BBox, Block, ImageBlock, Layout, LinkBlock, Page, StructuredDocument, StructuredElement,
    StructuredPage, TextBlock,
};
pub use primitives::{ImageInspector, NullInspector, PagePrimitives};
pub use render::{JsonFormat, RenderOptions};
pub use section::SectionOptions;

/// Deserialize per-page primitives from a JSON array.
///
/// # Example
///
/// ```
/// use relayout::primitives_from_json;
///
/// let pages = primitives_from_json(
///     r#"[{"number":1,"width":595.0,"height":842.0}]"#,
/// ).unwrap();
/// assert_eq!(pages.len(), 1);
/// ```
pub fn primitives_from_json(json: &str) -> Result<Vec<PagePrimitives>> {
    serde_json::from_str(json).map_err(|e| Error::InvalidPrimitives(e.to_string()))
}

/// Deserialize per-page primitives from a reader.
pub fn primitives_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PagePrimitives>> {
    serde_json::from_reader(reader).map_err(|e| Error::InvalidPrimitives(e.to_string()))
}

/// Build the layout model from per-page primitives with default options.
///
/// # Example
///
/// ```
/// use relayout::{build_layout, PagePrimitives};
///
/// let layout = build_layout(&[PagePrimitives::new(1, 595.0, 842.0)]);
/// assert_eq!(layout.page_count(), 1);
/// ```
pub fn build_layout(pages: &[PagePrimitives]) -> Layout {
    LayoutEngine::new().build_layout(pages)
}

/// Reconstruct primitives straight to semantic, editable HTML.
pub fn semantic_html(pages: &[PagePrimitives]) -> String {
    render::to_semantic_html(&build_layout(pages), &RenderOptions::default())
}

/// Reconstruct primitives straight to pixel-exact HTML.
pub fn exact_html(pages: &[PagePrimitives]) -> String {
    render::to_exact_html(&build_layout(pages), &RenderOptions::default())
}

/// Reconstruct primitives straight to layout JSON.
pub fn layout_json(pages: &[PagePrimitives], format: JsonFormat) -> Result<String> {
    render::to_layout_json(&build_layout(pages), format)
}

/// Builder for reconstructing and rendering document layouts.
///
/// # Example
///
/// ```
/// use relayout::{PagePrimitives, Relayout};
///
/// let html = Relayout::new()
///     .with_assets_base_url("/assets/")
///     .sequential()
///     .process(&[PagePrimitives::new(1, 595.0, 842.0)])
///     .to_semantic_html();
/// assert!(html.contains("data-page=\"1\""));
/// ```
pub struct Relayout {
    engine: LayoutEngine,
    render_options: RenderOptions,
}

impl Relayout {
    /// Create a new Relayout builder.
    pub fn new() -> Self {
        Self {
            engine: LayoutEngine::new(),
            render_options: RenderOptions::default(),
        }
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.engine = self.engine.sequential();
        self
    }

    /// Set paragraph merge options.
    pub fn with_merge_options(mut self, options: MergeOptions) -> Self {
        self.engine = self.engine.with_merge_options(options);
        self
    }

    /// Set the asset URL prefix for image `src` attributes.
    pub fn with_assets_base_url(mut self, url: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_assets_base_url(url);
        self
    }

    /// Set sectioning and column-detection options.
    pub fn with_section_options(mut self, options: SectionOptions) -> Self {
        self.render_options = self.render_options.with_section_options(options);
        self
    }

    /// Set the full render options at once.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Reconstruct the layout and return a result wrapper.
    pub fn process(self, pages: &[PagePrimitives]) -> RelayoutResult {
        RelayoutResult {
            layout: self.engine.build_layout(pages),
            render_options: self.render_options,
        }
    }
}

impl Default for Relayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of reconstructing a document layout.
pub struct RelayoutResult {
    /// The reconstructed layout model
    pub layout: Layout,
    render_options: RenderOptions,
}

impl RelayoutResult {
    /// Render to semantic, editable HTML.
    pub fn to_semantic_html(&self) -> String {
        render::to_semantic_html(&self.layout, &self.render_options)
    }

    /// Render to pixel-exact HTML.
    pub fn to_exact_html(&self) -> String {
        render::to_exact_html(&self.layout, &self.render_options)
    }

    /// Serialize the layout model to JSON.
    pub fn to_layout_json(&self, format: JsonFormat) -> Result<String> {
        render::to_layout_json(&self.layout, format)
    }

    /// Plain text of the reconstructed pages.
    pub fn plain_text(&self) -> String {
        self.layout.plain_text()
    }

    /// Get the layout model.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}
