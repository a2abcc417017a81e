//! Element assembly for the structured/slot-extraction path.
//!
//! Flattens one page's shapes, images, and text lines into a single list
//! sorted by paint order: shapes first (backgrounds), then images, then
//! text. Ordering uses the lexicographic [`PaintKey`] so a page heavy in
//! background elements can never overtake the text layer; the serialized
//! numeric `order` field keeps the conventional 100 offset for text on
//! ordinary pages.

use crate::assets::{image_filename, AssetContext};
use crate::merge::merge_spans_to_lines;
use crate::model::{
    BlockEntry, ImageElement, Layer, LineEntry, PaintKey, RectElement, StructuredElement,
    TextElement, TextStyle,
};
use crate::normalize::{font_style, font_weight, normalize_hex, opt_color_to_hex};
use crate::primitives::{ImageInspector, PagePrimitives};

/// Minimum shape edge length in points; thinner rectangles are noise.
const MIN_SHAPE_EDGE: f32 = 2.0;

/// Assemble one page's primitives into paint-ordered structured elements.
pub fn assemble_page(
    page: &PagePrimitives,
    context: &AssetContext,
    inspector: &dyn ImageInspector,
) -> Vec<StructuredElement> {
    let page_idx = page.index();
    let mut keyed: Vec<(PaintKey, StructuredElement)> = Vec::new();

    let shape_count = collect_shapes(page, page_idx, &mut keyed);
    let image_count = collect_images(page, page_idx, context, inspector, &mut keyed);
    collect_text(page, page_idx, &mut keyed);

    keyed.sort_by_key(|(key, _)| *key);

    // Text keeps its conventional 100 offset unless backgrounds overflow it.
    let text_base = (shape_count + image_count).max(100);
    let mut elements = Vec::with_capacity(keyed.len());
    for (key, mut element) in keyed {
        let order = match key.layer {
            Layer::Shape => key.seq,
            Layer::Image => shape_count + key.seq,
            Layer::Text => text_base + key.seq,
        };
        element.set_order(order);
        elements.push(element);
    }
    elements
}

fn collect_shapes(
    page: &PagePrimitives,
    page_idx: u32,
    out: &mut Vec<(PaintKey, StructuredElement)>,
) -> u32 {
    let mut seq = 0u32;
    for drawing in &page.drawings {
        let rect = drawing.rect.normalized();
        if rect.width() < MIN_SHAPE_EDGE || rect.height() < MIN_SHAPE_EDGE {
            continue;
        }

        let fill_color = opt_color_to_hex(drawing.fill);
        let stroke_color = opt_color_to_hex(drawing.stroke);
        if fill_color.is_none() && stroke_color.is_none() {
            // Invisible construction rectangle
            continue;
        }

        out.push((
            PaintKey::new(Layer::Shape, seq),
            StructuredElement::Rect(RectElement {
                id: format!("r_{}_{:04}", page_idx, seq),
                bbox: rect.rounded(),
                fill_color,
                stroke_color,
                stroke_width: round1(drawing.width),
                order: 0,
            }),
        ));
        seq += 1;
    }
    seq
}

fn collect_images(
    page: &PagePrimitives,
    page_idx: u32,
    context: &AssetContext,
    inspector: &dyn ImageInspector,
    out: &mut Vec<(PaintKey, StructuredElement)>,
) -> u32 {
    let mut seq = 0u32;
    for (detect_idx, image) in page.images.iter().enumerate() {
        let Some(rect) = image.rects.first() else {
            continue;
        };
        // A missing byte payload means the extractor failed on this xref;
        // drop the single image and keep the page going.
        let Some(bytes) = image.bytes.as_deref() else {
            log::debug!("page {}: skipping unreadable image {}", page.number, detect_idx);
            continue;
        };

        let bbox = rect.normalized().rounded();
        let (width_px, height_px) = inspector
            .dimensions(bytes)
            .unwrap_or((bbox.width() as u32, bbox.height() as u32));
        let phash = inspector.phash(bytes);

        let image_id = image.xref.unwrap_or(detect_idx as u32 + 1);
        let filename = image_filename(page.number, image_id, &image.ext);

        out.push((
            PaintKey::new(Layer::Image, seq),
            StructuredElement::Image(ImageElement {
                id: format!("i_{}_{:04}", page_idx, seq),
                src: context.image_url(&filename),
                bbox,
                width_px,
                height_px,
                phash,
                order: 0,
            }),
        ));
        seq += 1;
    }
    seq
}

fn collect_text(page: &PagePrimitives, page_idx: u32, out: &mut Vec<(PaintKey, StructuredElement)>) {
    let lines = merge_spans_to_lines(&page.text_blocks);
    for (seq, line) in lines.into_iter().enumerate() {
        let seq = seq as u32;
        out.push((
            PaintKey::new(Layer::Text, seq),
            StructuredElement::Text(TextElement {
                id: format!("t_{}_{:04}", page_idx, seq),
                raw_text: line.text.clone(),
                text: line.text,
                bbox: line.bbox.rounded(),
                style: TextStyle {
                    font_weight: font_weight(&line.font, line.flags).to_string(),
                    font_style: font_style(&line.font, line.flags).to_string(),
                    font_family: line.font,
                    font_size: round1(line.size),
                    color: normalize_hex(&line.color),
                },
                order: 0,
            }),
        ));
    }
}

/// Line-level text groupings for the structured page.
pub fn line_entries(page: &PagePrimitives) -> Vec<LineEntry> {
    merge_spans_to_lines(&page.text_blocks)
        .into_iter()
        .map(|line| LineEntry {
            text: line.text,
            bbox: line.bbox.rounded(),
        })
        .collect()
}

/// Block-level text groupings: each raw block's lines joined together.
pub fn block_entries(page: &PagePrimitives) -> Vec<BlockEntry> {
    page.text_blocks
        .iter()
        .filter_map(|block| {
            let lines = merge_spans_to_lines(std::slice::from_ref(block));
            if lines.is_empty() {
                return None;
            }
            let text = lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            Some(BlockEntry {
                text,
                bbox: block.bbox.normalized().rounded(),
                lines: lines
                    .into_iter()
                    .map(|l| LineEntry {
                        text: l.text,
                        bbox: l.bbox.rounded(),
                    })
                    .collect(),
            })
        })
        .collect()
}

fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}
