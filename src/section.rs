//! Vertical sectioning and two-column detection.
//!
//! The semantic renderer groups a page's blocks into sections separated by
//! blank vertical gaps, then checks each section's text blocks for a
//! two-column arrangement using left-edge gap analysis.

use crate::model::{Block, TextBlock};

/// Thresholds controlling sectioning and column detection.
#[derive(Debug, Clone)]
pub struct SectionOptions {
    /// Vertical gap (points) that separates two sections
    pub section_gap: f32,

    /// Fraction of page width a split point must stay inside (low, high)
    pub column_zone: (f32, f32),

    /// Minimum winning gap as a fraction of page width
    pub min_gap_ratio: f32,

    /// Minimum text blocks a section needs before a split is considered
    pub min_blocks: usize,

    /// Minimum text blocks required on each side of a split
    pub min_side_blocks: usize,
}

impl SectionOptions {
    /// Create section options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the section gap in points.
    pub fn with_section_gap(mut self, gap: f32) -> Self {
        self.section_gap = gap;
        self
    }

    /// Set the eligible split zone as fractions of page width.
    pub fn with_column_zone(mut self, low: f32, high: f32) -> Self {
        self.column_zone = (low, high);
        self
    }

    /// Set the minimum gap ratio.
    pub fn with_min_gap_ratio(mut self, ratio: f32) -> Self {
        self.min_gap_ratio = ratio;
        self
    }
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            section_gap: 25.0,
            column_zone: (0.25, 0.80),
            min_gap_ratio: 0.10,
            min_blocks: 4,
            min_side_blocks: 2,
        }
    }
}

/// Split a page's blocks into vertically contiguous sections.
///
/// Blocks are sorted by top edge; a new section starts wherever the gap
/// between a block's top and the running maximum bottom exceeds
/// `section_gap`. Every block lands in exactly one section.
pub fn split_sections<'a>(blocks: &'a [Block], options: &SectionOptions) -> Vec<Vec<&'a Block>> {
    if blocks.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Block> = blocks.iter().collect();
    sorted.sort_by(|a, b| {
        a.top()
            .partial_cmp(&b.top())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut sections = Vec::new();
    let mut current = vec![sorted[0]];
    let mut last_bottom = sorted[0].bbox().y1;

    for block in &sorted[1..] {
        if block.bbox().y0 - last_bottom > options.section_gap && !current.is_empty() {
            sections.push(std::mem::take(&mut current));
        }
        current.push(block);
        last_bottom = last_bottom.max(block.bbox().y1);
    }
    if !current.is_empty() {
        sections.push(current);
    }

    log::debug!("split {} blocks into {} sections", blocks.len(), sections.len());
    sections
}

/// Detect a single vertical split point for a two-column layout.
///
/// Scans consecutive pairs of sorted left edges for the largest gap whose
/// midpoint lies inside the eligible zone and leaves at least
/// `min_side_blocks` blocks strictly left and at-or-right of it. The
/// winning gap must exceed `min_gap_ratio` of the page width; otherwise
/// the section renders single-column.
pub fn detect_column_split(
    text_blocks: &[&TextBlock],
    page_width: f32,
    options: &SectionOptions,
) -> Option<f32> {
    if text_blocks.len() < options.min_blocks {
        return None;
    }

    let mut x0_vals: Vec<f32> = text_blocks.iter().map(|b| b.bbox.x0).collect();
    x0_vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let (zone_low, zone_high) = options.column_zone;
    let mut best_gap = 0.0f32;
    let mut best_split: Option<f32> = None;

    for pair in x0_vals.windows(2) {
        let gap = pair[1] - pair[0];
        let split = (pair[0] + pair[1]) / 2.0;

        if gap <= best_gap || split <= page_width * zone_low || split >= page_width * zone_high {
            continue;
        }

        let left = text_blocks.iter().filter(|b| b.bbox.x0 < split).count();
        let right = text_blocks.iter().filter(|b| b.bbox.x0 >= split).count();
        if left >= options.min_side_blocks && right >= options.min_side_blocks {
            best_gap = gap;
            best_split = Some(split);
        }
    }

    if best_gap > page_width * options.min_gap_ratio {
        log::debug!(
            "column split at x={:.1} (gap {:.1}pt, page width {:.1})",
            best_split.unwrap_or_default(),
            best_gap,
            page_width
        );
        best_split
    } else {
        log::debug!("no valid column split (best gap {:.1}pt)", best_gap);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, ImageBlock};

    fn text(y0: f32, y1: f32, x0: f32) -> Block {
        Block::Text(TextBlock {
            bbox: BBox::new(x0, y0, x0 + 100.0, y1),
            text: "t".to_string(),
            font: String::new(),
            size: 12.0,
            color: "#000000".to_string(),
            flags: 0,
        })
    }

    fn text_ref(x0: f32) -> TextBlock {
        TextBlock {
            bbox: BBox::new(x0, 0.0, x0 + 100.0, 12.0),
            text: "t".to_string(),
            font: String::new(),
            size: 12.0,
            color: "#000000".to_string(),
            flags: 0,
        }
    }

    #[test]
    fn test_split_sections_on_gap() {
        let blocks = vec![
            text(0.0, 12.0, 10.0),
            text(20.0, 32.0, 10.0),
            // 40pt gap after 32 -> new section
            text(72.0, 84.0, 10.0),
        ];
        let sections = split_sections(&blocks, &SectionOptions::default());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].len(), 2);
        assert_eq!(sections[1].len(), 1);
    }

    #[test]
    fn test_split_sections_partitions_all_blocks() {
        let blocks = vec![
            text(50.0, 60.0, 10.0),
            text(0.0, 12.0, 10.0),
            Block::Image(ImageBlock {
                bbox: BBox::new(0.0, 100.0, 200.0, 300.0),
                src: "page001_img1.png".to_string(),
            }),
        ];
        let sections = split_sections(&blocks, &SectionOptions::default());
        let total: usize = sections.iter().map(|s| s.len()).sum();
        assert_eq!(total, blocks.len());
    }

    #[test]
    fn test_split_sections_empty() {
        assert!(split_sections(&[], &SectionOptions::default()).is_empty());
    }

    #[test]
    fn test_tall_block_extends_running_bottom() {
        // A tall image keeps the section open across later small blocks.
        let blocks = vec![
            Block::Image(ImageBlock {
                bbox: BBox::new(0.0, 0.0, 200.0, 200.0),
                src: "page001_img1.png".to_string(),
            }),
            text(50.0, 62.0, 10.0),
            text(210.0, 222.0, 10.0), // only 10pt below the image bottom
        ];
        let sections = split_sections(&blocks, &SectionOptions::default());
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_column_split_accepted() {
        // x0 in {50, 52, 300, 305} on a 600pt page: gap 248 between 52 and
        // 300, midpoint 176 inside (150, 480), 2 blocks per side,
        // 248 > 60 -> split at 176.
        let blocks = [text_ref(50.0), text_ref(52.0), text_ref(300.0), text_ref(305.0)];
        let refs: Vec<&TextBlock> = blocks.iter().collect();
        let split = detect_column_split(&refs, 600.0, &SectionOptions::default());
        assert_eq!(split, Some(176.0));
    }

    #[test]
    fn test_column_split_needs_four_blocks() {
        let blocks = [text_ref(50.0), text_ref(300.0), text_ref(305.0)];
        let refs: Vec<&TextBlock> = blocks.iter().collect();
        assert_eq!(detect_column_split(&refs, 600.0, &SectionOptions::default()), None);
    }

    #[test]
    fn test_column_split_rejects_edge_zone() {
        // Largest gap midpoint at 100 on a 600pt page falls below the 25%
        // bound, and the remaining gaps are tiny.
        let blocks = [text_ref(40.0), text_ref(160.0), text_ref(165.0), text_ref(170.0)];
        let refs: Vec<&TextBlock> = blocks.iter().collect();
        assert_eq!(detect_column_split(&refs, 600.0, &SectionOptions::default()), None);
    }

    #[test]
    fn test_column_split_rejects_single_indented_block() {
        // One blockquote-like block on the right: right side has < 2 blocks.
        let blocks = [text_ref(50.0), text_ref(52.0), text_ref(54.0), text_ref(300.0)];
        let refs: Vec<&TextBlock> = blocks.iter().collect();
        assert_eq!(detect_column_split(&refs, 600.0, &SectionOptions::default()), None);
    }

    #[test]
    fn test_column_split_rejects_small_gap() {
        // Gap of 40pt on a 600pt page is under the 10% minimum.
        let blocks = [text_ref(200.0), text_ref(205.0), text_ref(245.0), text_ref(250.0)];
        let refs: Vec<&TextBlock> = blocks.iter().collect();
        assert_eq!(detect_column_split(&refs, 600.0, &SectionOptions::default()), None);
    }
}
