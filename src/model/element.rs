//! Flattened, order-indexed elements for the slot-extraction contract.

use serde::{Deserialize, Serialize};

use super::geometry::{self, BBox};

/// Paint layer of an element, back to front.
///
/// Shapes are painted first (backgrounds, separators), then images, then
/// text on top. The derived `Ord` makes every shape sort before every
/// image and every image before every text element, with no way for a
/// page heavy in background elements to bleed into the text band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Vector shapes (painted first)
    Shape,
    /// Embedded raster images
    Image,
    /// Text lines (painted last)
    Text,
}

/// Total paint-order key: layer first, then detection sequence.
///
/// Ties cannot occur within a page because `seq` is the per-layer
/// detection index; sorting is stable regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaintKey {
    /// Paint layer
    pub layer: Layer,
    /// Detection sequence index within the layer
    pub seq: u32,
}

impl PaintKey {
    /// Create a paint key.
    pub fn new(layer: Layer, seq: u32) -> Self {
        Self { layer, seq }
    }
}

/// Text style attributes for a structured text element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family name
    pub font_family: String,
    /// Font size in points (rounded to 0.1)
    pub font_size: f32,
    /// "bold" or "normal"
    pub font_weight: String,
    /// "italic" or "normal"
    pub font_style: String,
    /// Canonical `#rrggbb` color
    pub color: String,
}

/// A single text line with full style information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextElement {
    /// Element id (`t_{page}_{seq:04}`)
    pub id: String,
    /// Line text
    pub text: String,
    /// Unprocessed line text (same as `text` in this pipeline)
    pub raw_text: String,
    /// Line bounding box, rounded to 2 decimals
    #[serde(with = "geometry::as_object")]
    pub bbox: BBox,
    /// Style of the dominant span
    pub style: TextStyle,
    /// Serialized paint-order key
    pub order: u32,
}

/// An embedded image with geometry and identification data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageElement {
    /// Element id (`i_{page}_{seq:04}`)
    pub id: String,
    /// Public URL of the saved image file
    pub src: String,
    /// Placement bounding box, rounded to 2 decimals
    #[serde(with = "geometry::as_object")]
    pub bbox: BBox,
    /// Pixel width (falls back to rounded bbox width)
    pub width_px: u32,
    /// Pixel height (falls back to rounded bbox height)
    pub height_px: u32,
    /// Perceptual hash, when the inspector could compute one
    pub phash: Option<String>,
    /// Serialized paint-order key
    pub order: u32,
}

/// A filled or stroked rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectElement {
    /// Element id (`r_{page}_{seq:04}`)
    pub id: String,
    /// Rectangle bounds, rounded to 2 decimals
    #[serde(with = "geometry::as_object")]
    pub bbox: BBox,
    /// Fill color, if filled
    pub fill_color: Option<String>,
    /// Stroke color, if stroked
    pub stroke_color: Option<String>,
    /// Stroke width in points (rounded to 0.1)
    pub stroke_width: f32,
    /// Serialized paint-order key
    pub order: u32,
}

/// A flattened, type-tagged, order-indexed element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuredElement {
    /// A text line
    Text(TextElement),
    /// An embedded image
    Image(ImageElement),
    /// A vector rectangle
    Rect(RectElement),
}

impl StructuredElement {
    /// Element id.
    pub fn id(&self) -> &str {
        match self {
            StructuredElement::Text(t) => &t.id,
            StructuredElement::Image(i) => &i.id,
            StructuredElement::Rect(r) => &r.id,
        }
    }

    /// Serialized paint order.
    pub fn order(&self) -> u32 {
        match self {
            StructuredElement::Text(t) => t.order,
            StructuredElement::Image(i) => i.order,
            StructuredElement::Rect(r) => r.order,
        }
    }

    /// Bounding box.
    pub fn bbox(&self) -> &BBox {
        match self {
            StructuredElement::Text(t) => &t.bbox,
            StructuredElement::Image(i) => &i.bbox,
            StructuredElement::Rect(r) => &r.bbox,
        }
    }

    fn order_mut(&mut self) -> &mut u32 {
        match self {
            StructuredElement::Text(t) => &mut t.order,
            StructuredElement::Image(i) => &mut i.order,
            StructuredElement::Rect(r) => &mut r.order,
        }
    }

    /// Set the serialized paint order.
    pub fn set_order(&mut self, order: u32) {
        *self.order_mut() = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_key_ordering() {
        // Layers order back to front regardless of sequence.
        assert!(PaintKey::new(Layer::Shape, 999) < PaintKey::new(Layer::Image, 0));
        assert!(PaintKey::new(Layer::Image, 999) < PaintKey::new(Layer::Text, 0));
        // Within a layer, detection order decides.
        assert!(PaintKey::new(Layer::Text, 0) < PaintKey::new(Layer::Text, 1));
    }

    #[test]
    fn test_paint_key_no_band_collision() {
        // A page with 150 shapes still paints all of them below the first
        // text element (the old numeric banding scheme broke here).
        let last_shape = PaintKey::new(Layer::Shape, 150);
        let first_text = PaintKey::new(Layer::Text, 0);
        assert!(last_shape < first_text);
    }

    #[test]
    fn test_element_tagging() {
        let el = StructuredElement::Rect(RectElement {
            id: "r_0_0000".to_string(),
            bbox: BBox::new(0.0, 0.0, 10.0, 10.0),
            fill_color: Some("#ff0000".to_string()),
            stroke_color: None,
            stroke_width: 0.5,
            order: 0,
        });
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["bbox"]["x1"], 10.0);
        assert!(json["stroke_color"].is_null());
    }
}
