//! Link attachment by bounding-box overlap.

use crate::model::{BBox, LinkBlock};

/// Default expansion of a link hot-zone, in points.
///
/// Tolerates sub-pixel geometry mismatches between a link rectangle and
/// the text run it decorates.
pub const LINK_EXPAND_PT: f32 = 4.0;

/// Find the URL of the first link whose expanded hot-zone overlaps `bbox`.
///
/// First match in page order wins; a block carries at most one link.
pub fn find_link<'a>(bbox: &BBox, links: &'a [LinkBlock], expand: f32) -> Option<&'a str> {
    links
        .iter()
        .find(|l| bbox.overlaps(&l.bbox, expand))
        .map(|l| l.url.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(x0: f32, url: &str) -> LinkBlock {
        LinkBlock {
            bbox: BBox::new(x0, 100.0, x0 + 50.0, 120.0),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_link_attaches_within_expansion() {
        let links = vec![link(100.0, "https://a.example")];
        // Text starts 4pt inside the expanded zone (146 < 150 + 4)
        let text = BBox::new(146.0, 100.0, 200.0, 120.0);
        assert_eq!(
            find_link(&text, &links, LINK_EXPAND_PT),
            Some("https://a.example")
        );
    }

    #[test]
    fn test_link_does_not_attach_beyond_expansion() {
        let links = vec![link(100.0, "https://a.example")];
        // Gap of 5 > 4
        let text = BBox::new(155.0, 100.0, 200.0, 120.0);
        assert_eq!(find_link(&text, &links, LINK_EXPAND_PT), None);
    }

    #[test]
    fn test_first_matching_link_wins() {
        let links = vec![link(100.0, "https://first"), link(110.0, "https://second")];
        let text = BBox::new(105.0, 100.0, 200.0, 120.0);
        assert_eq!(find_link(&text, &links, LINK_EXPAND_PT), Some("https://first"));
    }
}
