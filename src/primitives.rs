//! Input contract from the PDF extraction collaborator.
//!
//! The library does not read PDF bytes itself. An external extractor hands
//! over per-page geometric primitives: text blocks (lines of styled spans),
//! embedded raster images with placement rectangles, hyperlink hot-zones,
//! and vector drawings. Everything downstream is a pure function of these
//! structs.

use serde::{Deserialize, Serialize};

use crate::model::BBox;
use crate::normalize::Color;

/// A run of text sharing one font, size, and color within a line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSpan {
    /// Text content of the run
    pub text: String,
    /// Bounding box in page points
    pub bbox: BBox,
    /// Font name (e.g. "Helvetica-Bold")
    #[serde(default)]
    pub font: String,
    /// Font size in points
    #[serde(default = "default_font_size")]
    pub size: f32,
    /// Raw color value; unrecognized encodings normalize to black
    #[serde(default, deserialize_with = "crate::normalize::color_or_black")]
    pub color: Color,
    /// Style-flag bitmask (bold/italic bits)
    #[serde(default)]
    pub flags: u32,
}

fn default_font_size() -> f32 {
    12.0
}

/// One visual text line as reported by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLine {
    /// Bounding box of the line
    pub bbox: BBox,
    /// Constituent spans in reading order
    pub spans: Vec<RawSpan>,
}

/// A raw text block: lines of spans, as grouped by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTextBlock {
    /// Bounding box of the block
    pub bbox: BBox,
    /// Lines in the block
    pub lines: Vec<RawLine>,
}

/// An embedded raster image and its placement on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawImage {
    /// Source object xref, when the extractor knows it
    #[serde(default)]
    pub xref: Option<u32>,
    /// Decoded image bytes; `None` when the extractor failed to read them
    #[serde(default)]
    pub bytes: Option<Vec<u8>>,
    /// File extension of the embedded data ("png", "jpg", ...)
    #[serde(default = "default_ext")]
    pub ext: String,
    /// Placement rectangles on the page (usually one)
    pub rects: Vec<BBox>,
}

fn default_ext() -> String {
    "png".to_string()
}

/// A hyperlink hot-zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLink {
    /// Target URI
    pub uri: String,
    /// Hot-zone rectangle
    pub bbox: BBox,
}

/// A filled and/or stroked vector rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDrawing {
    /// Drawn rectangle
    pub rect: BBox,
    /// Fill color, if filled; unrecognized encodings normalize to black
    #[serde(default, deserialize_with = "crate::normalize::opt_color_or_black")]
    pub fill: Option<Color>,
    /// Stroke color, if stroked; unrecognized encodings normalize to black
    #[serde(default, deserialize_with = "crate::normalize::opt_color_or_black")]
    pub stroke: Option<Color>,
    /// Stroke width in points
    #[serde(default)]
    pub width: f32,
}

/// Everything the extractor reports for a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagePrimitives {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Page rotation in degrees (0, 90, 180, 270)
    #[serde(default)]
    pub rotation: u16,
    /// Raw text blocks
    #[serde(default)]
    pub text_blocks: Vec<RawTextBlock>,
    /// Embedded images
    #[serde(default)]
    pub images: Vec<RawImage>,
    /// Hyperlinks
    #[serde(default)]
    pub links: Vec<RawLink>,
    /// Vector drawings
    #[serde(default)]
    pub drawings: Vec<RawDrawing>,
}

impl PagePrimitives {
    /// Create empty primitives for a page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            rotation: 0,
            text_blocks: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
            drawings: Vec::new(),
        }
    }

    /// Zero-based page index.
    pub fn index(&self) -> u32 {
        self.number.saturating_sub(1)
    }
}

/// Black-box image inspection supplied by an external collaborator.
///
/// Perceptual hashing and raster decoding live outside this crate; the
/// assembler only consumes their results. Implementations must be `Sync`
/// because pages fan out across worker threads.
pub trait ImageInspector: Sync {
    /// Perceptual hash of the image content, or `None` if unavailable.
    fn phash(&self, bytes: &[u8]) -> Option<String>;

    /// Pixel dimensions of the decoded image, or `None` if undecodable.
    fn dimensions(&self, bytes: &[u8]) -> Option<(u32, u32)>;
}

/// Inspector that reports nothing; elements fall back to geometry-derived
/// dimensions and a null hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInspector;

impl ImageInspector for NullInspector {
    fn phash(&self, _bytes: &[u8]) -> Option<String> {
        None
    }

    fn dimensions(&self, _bytes: &[u8]) -> Option<(u32, u32)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_from_json_defaults() {
        let json = r#"{
            "number": 1,
            "width": 595.0,
            "height": 842.0,
            "text_blocks": [{
                "bbox": [10.0, 10.0, 200.0, 24.0],
                "lines": [{
                    "bbox": [10.0, 10.0, 200.0, 24.0],
                    "spans": [{"text": "Hello", "bbox": [10.0, 10.0, 60.0, 24.0]}]
                }]
            }]
        }"#;
        let page: PagePrimitives = serde_json::from_str(json).unwrap();
        assert_eq!(page.number, 1);
        assert_eq!(page.index(), 0);
        assert_eq!(page.rotation, 0);
        assert!(page.images.is_empty());
        let span = &page.text_blocks[0].lines[0].spans[0];
        assert_eq!(span.size, 12.0);
        assert_eq!(span.flags, 0);
    }

    #[test]
    fn test_unrecognized_color_falls_back_to_black() {
        let json = r#"{"text": "x", "bbox": [0.0, 0.0, 5.0, 12.0], "color": "red"}"#;
        let span: RawSpan = serde_json::from_str(json).unwrap();
        assert_eq!(span.color, Color::Packed(0));

        let json = r#"{"rect": [0.0, 0.0, 10.0, 10.0], "fill": {"weird": true}}"#;
        let drawing: RawDrawing = serde_json::from_str(json).unwrap();
        assert_eq!(drawing.fill, Some(Color::Packed(0)));
        assert_eq!(drawing.stroke, None);
    }

    #[test]
    fn test_null_inspector() {
        let inspector = NullInspector;
        assert!(inspector.phash(&[1, 2, 3]).is_none());
        assert!(inspector.dimensions(&[1, 2, 3]).is_none());
    }
}
