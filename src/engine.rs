//! Per-page reconstruction pipeline.
//!
//! Each page is a pure function of its own primitives, so independent
//! pages fan out across Rayon workers and are collected back in input
//! order; output page order is always ascending page number regardless of
//! which worker finished first.

use rayon::prelude::*;

use crate::assemble::{assemble_page, block_entries, line_entries};
use crate::assets::{image_filename, render_filename, AssetContext};
use crate::merge::{merge_text_blocks, MergeOptions};
use crate::model::{round2, Block, ImageBlock, Layout, LinkBlock, Page, StructuredDocument, StructuredPage};
use crate::primitives::{ImageInspector, PagePrimitives};

/// Options for the structured extraction output.
#[derive(Debug, Clone, Default)]
pub struct StructuredOptions {
    /// URL context for saved assets
    pub context: AssetContext,
    /// Original filename of the source document
    pub source_filename: String,
}

impl StructuredOptions {
    /// Create structured options.
    pub fn new(context: AssetContext, source_filename: impl Into<String>) -> Self {
        Self {
            context,
            source_filename: source_filename.into(),
        }
    }
}

/// The layout reconstruction engine.
///
/// Holds the merge thresholds and the processing mode; construction is
/// cheap and the engine is immutable once built.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    merge: MergeOptions,
    parallel: bool,
}

impl LayoutEngine {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self {
            merge: MergeOptions::default(),
            parallel: true,
        }
    }

    /// Set merge options.
    pub fn with_merge_options(mut self, options: MergeOptions) -> Self {
        self.merge = options;
        self
    }

    /// Process pages sequentially instead of fanning out across workers.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Build the block-based layout model from per-page primitives.
    pub fn build_layout(&self, pages: &[PagePrimitives]) -> Layout {
        let mut built: Vec<Page> = if self.parallel {
            pages.par_iter().map(|p| self.layout_page(p)).collect()
        } else {
            pages.iter().map(|p| self.layout_page(p)).collect()
        };
        built.sort_by_key(|p| p.number);

        let mut layout = Layout::new();
        for page in built {
            for block in &page.blocks {
                if let Block::Image(img) = block {
                    layout.image_files.push(img.src.clone());
                }
            }
            layout.add_page(page);
        }
        layout
    }

    /// Build the structured slot-extraction document from per-page primitives.
    pub fn build_structured(
        &self,
        pages: &[PagePrimitives],
        options: &StructuredOptions,
        inspector: &dyn ImageInspector,
    ) -> StructuredDocument {
        let mut built: Vec<StructuredPage> = if self.parallel {
            pages
                .par_iter()
                .map(|p| self.structured_page(p, &options.context, inspector))
                .collect()
        } else {
            pages
                .iter()
                .map(|p| self.structured_page(p, &options.context, inspector))
                .collect()
        };
        built.sort_by_key(|p| p.page_index);

        let mut doc = StructuredDocument::new(options.context.doc_id(), &options.source_filename);
        doc.pages = built.drain(..).collect();
        doc
    }

    fn layout_page(&self, primitives: &PagePrimitives) -> Page {
        let mut page = Page::new(primitives.number, primitives.width, primitives.height);
        page.rotation = primitives.rotation;

        for paragraph in merge_text_blocks(&primitives.text_blocks, &self.merge) {
            page.add_block(Block::Text(paragraph));
        }

        let mut seen_xrefs = Vec::new();
        for (detect_idx, image) in primitives.images.iter().enumerate() {
            if let Some(xref) = image.xref {
                if seen_xrefs.contains(&xref) {
                    continue;
                }
                seen_xrefs.push(xref);
            }
            // An unreadable image is dropped; the rest of the page proceeds.
            if image.bytes.is_none() {
                continue;
            }
            let bbox = image
                .rects
                .first()
                .map(|r| r.normalized())
                .unwrap_or_else(|| {
                    crate::model::BBox::new(0.0, 0.0, primitives.width, primitives.height)
                });
            let image_id = image.xref.unwrap_or(detect_idx as u32 + 1);
            page.add_block(Block::Image(ImageBlock {
                bbox,
                src: image_filename(primitives.number, image_id, &image.ext),
            }));
        }

        for link in &primitives.links {
            page.add_block(Block::Link(LinkBlock {
                bbox: link.bbox.normalized(),
                url: link.uri.clone(),
            }));
        }

        page.sort_blocks();
        page
    }

    fn structured_page(
        &self,
        primitives: &PagePrimitives,
        context: &AssetContext,
        inspector: &dyn ImageInspector,
    ) -> StructuredPage {
        StructuredPage {
            page_index: primitives.index(),
            width_pt: round2(primitives.width),
            height_pt: round2(primitives.height),
            rotation: primitives.rotation,
            elements: assemble_page(primitives, context, inspector),
            lines: line_entries(primitives),
            blocks: block_entries(primitives),
            render_png: context.image_url(&render_filename(primitives.number)),
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}
