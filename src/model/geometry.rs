//! Axis-aligned bounding boxes in page point units.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde::Deserialize;
use std::fmt;

/// A bounding box with origin at the top-left of the page.
///
/// Coordinates are in PDF points (1 point = 1/72 inch). A normalized box
/// satisfies `x0 <= x1` and `y0 <= y1`.
///
/// Serializes as a positional `[x0, y0, x1, y1]` array (the form used by
/// the primitives input and the layout JSON contract). The structured
/// element contract uses keyed objects instead; see [`as_object`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Return a copy with edges swapped where needed so x0 <= x1 and y0 <= y1.
    pub fn normalized(self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    /// Width of the box (never negative).
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    /// Height of the box (never negative).
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }

    /// Area of the box (never negative).
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Check whether the box has zero area.
    pub fn is_degenerate(&self) -> bool {
        self.area() <= 0.0
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Check whether this box overlaps `other` after expanding `other` by
    /// `expand` points on each side.
    pub fn overlaps(&self, other: &BBox, expand: f32) -> bool {
        !(self.x1 <= other.x0 - expand
            || other.x1 + expand <= self.x0
            || self.y1 <= other.y0 - expand
            || other.y1 + expand <= self.y0)
    }

    /// Round all coordinates to two decimal places.
    pub fn rounded(self) -> Self {
        Self {
            x0: round2(self.x0),
            y0: round2(self.y0),
            x1: round2(self.x1),
            y1: round2(self.y1),
        }
    }
}

/// Round a coordinate to two decimal places.
pub fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

impl Serialize for BBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(4))?;
        seq.serialize_element(&self.x0)?;
        seq.serialize_element(&self.y0)?;
        seq.serialize_element(&self.x1)?;
        seq.serialize_element(&self.y1)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for BBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BBoxVisitor;

        impl<'de> Visitor<'de> for BBoxVisitor {
            type Value = BBox;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a [x0, y0, x1, y1] array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<BBox, A::Error> {
                let x0 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let y0 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let x1 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let y1 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                Ok(BBox { x0, y0, x1, y1 })
            }
        }

        deserializer.deserialize_seq(BBoxVisitor)
    }
}

/// Serialize a `BBox` as a `{x0, y0, x1, y1}` object.
///
/// Used with `#[serde(with = ...)]` on structured-element fields, which
/// follow the keyed-object contract instead of the positional array one.
pub mod as_object {
    use super::BBox;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Keyed {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
    }

    pub fn serialize<S: Serializer>(bbox: &BBox, serializer: S) -> Result<S::Ok, S::Error> {
        Keyed {
            x0: bbox.x0,
            y0: bbox.y0,
            x1: bbox.x1,
            y1: bbox.y1,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BBox, D::Error> {
        let k = Keyed::deserialize(deserializer)?;
        Ok(BBox {
            x0: k.x0,
            y0: k.y0,
            x1: k.x1,
            y1: k.y1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, -2.0, 20.0, 8.0);
        let u = a.union(&b);
        assert_eq!(u, BBox::new(0.0, -2.0, 20.0, 10.0));
    }

    #[test]
    fn test_overlap_with_expansion() {
        // Link at [100,100,150,120], text starting at x=146: overlaps once
        // the link is expanded by 4. At x=155 the gap is 5 > 4, no overlap.
        let link = BBox::new(100.0, 100.0, 150.0, 120.0);
        let near = BBox::new(146.0, 100.0, 200.0, 120.0);
        let far = BBox::new(155.0, 100.0, 200.0, 120.0);
        assert!(near.overlaps(&link, 4.0));
        assert!(!far.overlaps(&link, 4.0));
        // 154 is exactly at the expanded edge; strict comparison excludes it.
        let edge = BBox::new(154.0, 100.0, 200.0, 120.0);
        assert!(!edge.overlaps(&link, 4.0));
    }

    #[test]
    fn test_normalized_and_degenerate() {
        let flipped = BBox::new(10.0, 20.0, 5.0, 8.0).normalized();
        assert_eq!(flipped, BBox::new(5.0, 8.0, 10.0, 20.0));

        assert!(BBox::new(3.0, 3.0, 3.0, 9.0).is_degenerate());
        assert!(!BBox::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_rounded() {
        let b = BBox::new(1.004, 2.005, 3.126, 4.0).rounded();
        assert_eq!(b.x0, 1.0);
        assert_eq!(b.x1, 3.13);
    }

    #[test]
    fn test_array_form_roundtrip() {
        let json = serde_json::to_string(&BBox::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        let back: BBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BBox::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_object_form() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Holder {
            #[serde(with = "super::as_object")]
            bbox: BBox,
        }
        let json = serde_json::to_string(&Holder {
            bbox: BBox::new(1.0, 2.0, 3.0, 4.0),
        })
        .unwrap();
        assert_eq!(json, r#"{"bbox":{"x0":1.0,"y0":2.0,"x1":3.0,"y1":4.0}}"#);
    }
}
