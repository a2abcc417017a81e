//! Structured document types for the slot-extraction output contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geometry::{self, BBox};
use super::StructuredElement;

/// A line-level text grouping: text plus rounded bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineEntry {
    /// Line text
    pub text: String,
    /// Line bounding box, rounded to 2 decimals
    #[serde(with = "geometry::as_object")]
    pub bbox: BBox,
}

/// A block-level text grouping: concatenated lines plus block bbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEntry {
    /// Concatenated text of the block's lines
    pub text: String,
    /// Block bounding box, rounded to 2 decimals
    #[serde(with = "geometry::as_object")]
    pub bbox: BBox,
    /// Constituent lines
    pub lines: Vec<LineEntry>,
}

/// One page of the structured extraction output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredPage {
    /// Zero-based page index
    pub page_index: u32,
    /// Page width in points, rounded to 2 decimals
    pub width_pt: f32,
    /// Page height in points, rounded to 2 decimals
    pub height_pt: f32,
    /// Page rotation in degrees
    pub rotation: u16,
    /// All elements in paint order
    pub elements: Vec<StructuredElement>,
    /// Line-level text groupings
    pub lines: Vec<LineEntry>,
    /// Block-level text groupings
    pub blocks: Vec<BlockEntry>,
    /// Public URL of the full-page render PNG
    pub render_png: String,
}

impl StructuredPage {
    /// Check whether the page carries no elements of any kind.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// The full structured extraction output for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Short document identifier (first 8 chars of the session id)
    pub doc_id: String,
    /// Original filename of the source PDF
    pub source_filename: String,
    /// Extraction timestamp (UTC, RFC 3339)
    pub extracted_at: DateTime<Utc>,
    /// Pages in ascending index order
    pub pages: Vec<StructuredPage>,
}

impl StructuredDocument {
    /// Create a document shell with the current timestamp.
    pub fn new(doc_id: impl Into<String>, source_filename: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            source_filename: source_filename.into(),
            extracted_at: Utc::now(),
            pages: Vec::new(),
        }
    }

    /// Total element count across all pages.
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(|p| p.elements.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serialization() {
        let mut doc = StructuredDocument::new("abcd1234", "brochure.pdf");
        doc.pages.push(StructuredPage {
            page_index: 0,
            width_pt: 595.28,
            height_pt: 841.89,
            rotation: 0,
            elements: vec![],
            lines: vec![],
            blocks: vec![],
            render_png: "https://host/api/v1/images/s/page001_render.png".to_string(),
        });

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["doc_id"], "abcd1234");
        assert_eq!(json["pages"][0]["page_index"], 0);
        assert_eq!(json["pages"][0]["width_pt"], 595.28);
        // chrono serializes DateTime<Utc> as RFC 3339
        assert!(json["extracted_at"].as_str().unwrap().contains('T'));
    }
}
