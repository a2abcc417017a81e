//! Layout model types.
//!
//! This module defines the normalized representation that bridges raw page
//! primitives and the output renderers: the block-based [`Layout`] consumed
//! by both HTML renderers, and the flattened order-indexed
//! [`StructuredDocument`] used by the slot-extraction contract.

mod document;
mod element;
pub mod geometry;
mod page;

pub use document::{BlockEntry, LineEntry, StructuredDocument, StructuredPage};
pub use element::{
    ImageElement, Layer, PaintKey, RectElement, StructuredElement, TextElement, TextStyle,
};
pub use geometry::{round2, BBox};
pub use page::{Block, ImageBlock, Layout, LinkBlock, Page, TextBlock};
