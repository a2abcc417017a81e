//! Span, line, and paragraph merging.
//!
//! Raw text arrives as blocks of lines of styled spans. This module first
//! collapses each line's spans into one [`TextBlock`]-shaped merged line
//! (union bbox, dominant style), then merges vertically adjacent,
//! style-compatible lines into paragraphs.

use crate::model::{BBox, TextBlock};
use crate::normalize::color_to_hex;
use crate::primitives::{RawSpan, RawTextBlock};

/// Thresholds controlling paragraph merging.
///
/// The gap threshold is relative to font size so 8 pt legal text and
/// 12 pt body text both merge correctly without bridging unrelated
/// blocks; the x0 tolerance accommodates justified-text indentation
/// jitter without merging separate columns.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Maximum inter-line gap as a fraction of the average font size
    pub gap_ratio: f32,

    /// Maximum font-size difference between mergeable lines, in points
    pub size_tolerance: f32,

    /// Maximum difference in left edge (x0) between mergeable lines, in points
    pub x0_tolerance: f32,
}

impl MergeOptions {
    /// Create merge options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap ratio.
    pub fn with_gap_ratio(mut self, ratio: f32) -> Self {
        self.gap_ratio = ratio;
        self
    }

    /// Set the font-size tolerance in points.
    pub fn with_size_tolerance(mut self, tolerance: f32) -> Self {
        self.size_tolerance = tolerance;
        self
    }

    /// Set the left-edge tolerance in points.
    pub fn with_x0_tolerance(mut self, tolerance: f32) -> Self {
        self.x0_tolerance = tolerance;
        self
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            gap_ratio: 0.6,
            size_tolerance: 3.0,
            x0_tolerance: 50.0,
        }
    }
}

/// Collapse each raw line's spans into one merged line.
///
/// Spans whose trimmed text is empty are discarded. Texts join with a
/// single space, the bbox is the union of span bboxes, and style comes
/// from the dominant (largest-size) span, first occurrence winning ties.
pub fn merge_spans_to_lines(blocks: &[RawTextBlock]) -> Vec<TextBlock> {
    let mut lines = Vec::new();

    for block in blocks {
        for line in &block.lines {
            let spans: Vec<&RawSpan> = line
                .spans
                .iter()
                .filter(|s| !s.text.trim().is_empty())
                .collect();
            if spans.is_empty() {
                continue;
            }

            let text = spans
                .iter()
                .map(|s| s.text.trim())
                .collect::<Vec<_>>()
                .join(" ");

            let mut bbox = spans[0].bbox.normalized();
            for span in &spans[1..] {
                bbox = bbox.union(&span.bbox.normalized());
            }

            // Strict > keeps the first occurrence on size ties.
            let dominant = spans
                .iter()
                .fold(spans[0], |best, s| if s.size > best.size { s } else { best });

            lines.push(TextBlock {
                bbox,
                text,
                font: dominant.font.clone(),
                size: dominant.size,
                color: color_to_hex(dominant.color),
                flags: dominant.flags,
            });
        }
    }

    lines
}

/// Merge consecutive lines into paragraphs.
///
/// Lines are sorted by top edge first. A line joins the running paragraph
/// when the vertical gap stays within `gap_ratio` of the average font
/// size, the sizes differ by less than `size_tolerance`, and the left
/// edges differ by less than `x0_tolerance`; otherwise it starts a new
/// paragraph. An empty input yields an empty output.
pub fn merge_lines_to_paragraphs(mut lines: Vec<TextBlock>, options: &MergeOptions) -> Vec<TextBlock> {
    lines.sort_by(|a, b| {
        a.bbox
            .y0
            .partial_cmp(&b.bbox.y0)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut paragraphs: Vec<TextBlock> = Vec::new();
    let mut iter = lines.into_iter();
    let Some(mut current) = iter.next() else {
        return paragraphs;
    };

    for line in iter {
        let gap = line.bbox.y0 - current.bbox.y1;
        let avg_size = (current.size + line.size) / 2.0;
        let same_size = (line.size - current.size).abs() < options.size_tolerance;
        let similar_x = (line.bbox.x0 - current.bbox.x0).abs() < options.x0_tolerance;

        if gap <= avg_size * options.gap_ratio && same_size && similar_x {
            current.text.push(' ');
            current.text.push_str(&line.text);
            current.bbox.x1 = current.bbox.x1.max(line.bbox.x1);
            current.bbox.y1 = line.bbox.y1;
        } else {
            paragraphs.push(std::mem::replace(&mut current, line));
        }
    }

    paragraphs.push(current);
    paragraphs
}

/// Full span → line → paragraph pipeline for one page's raw blocks.
pub fn merge_text_blocks(blocks: &[RawTextBlock], options: &MergeOptions) -> Vec<TextBlock> {
    merge_lines_to_paragraphs(merge_spans_to_lines(blocks), options)
}
