//! Semantic, editable HTML rendering.
//!
//! Produces section/heading/paragraph markup that is easy to edit in a
//! browser but not pixel-accurate. Each page splits into vertical
//! sections; a section may get a full-width hero image and a two-column
//! text grid when column detection accepts a split.

use crate::links::find_link;
use crate::model::{Block, ImageBlock, Layout, LinkBlock, Page, TextBlock};
use crate::normalize::BOLD_FLAG;
use crate::section::{detect_column_split, split_sections};

use super::escape::escape_html;
use super::RenderOptions;

const EDITABLE_CSS: &str = r#"
  *, *::before, *::after { box-sizing: border-box; }
  body { margin: 0; background: #e5e7eb; font-family: system-ui, Segoe UI, Roboto, Arial, sans-serif; }
  .wrap { max-width: 940px; margin: 0 auto; padding: 20px; }
  .page { background: #fff; padding: 28px 36px; margin-bottom: 24px; box-shadow: 0 2px 24px rgba(0,0,0,.10); border-radius: 4px; }
  .sec { padding: 8px 0; border-bottom: 1px solid #f3f4f6; }
  .sec:last-child { border-bottom: none; }
  .hero img { width: 100%; height: auto; display: block; border-radius: 6px; margin-bottom: 14px; }
  .img-block img { max-width: 100%; height: auto; display: block; margin: 8px 0; }
  .cols { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
  h1 { font-size: 28px; line-height: 1.15; margin: 12px 0 8px; }
  h2 { font-size: 20px; line-height: 1.25; margin: 10px 0 6px; }
  h3 { font-size: 16px; line-height: 1.3; margin: 8px 0 4px; font-weight: 600; }
  p { font-size: 14px; line-height: 1.65; margin: 5px 0; }
  .legal { font-size: 10px; opacity: .72; line-height: 1.4; }
  a { color: inherit; text-decoration: underline; }
  [contenteditable="true"] { outline: none; border-radius: 3px; padding: 1px 2px; }
  [contenteditable="true"]:focus { box-shadow: 0 0 0 2px rgba(59,130,246,.45); background: rgba(59,130,246,.04); }
"#;

/// Semantic tag a text block maps to, by font size and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTag {
    H1,
    H2,
    H3,
    Legal,
    Paragraph,
}

fn classify(block: &TextBlock) -> TextTag {
    let bold = block.flags & BOLD_FLAG != 0;
    if block.size >= 22.0 {
        TextTag::H1
    } else if block.size >= 17.0 || (block.size >= 14.0 && bold) {
        TextTag::H2
    } else if block.size >= 13.0 {
        TextTag::H3
    } else if block.size <= 9.0 {
        TextTag::Legal
    } else {
        TextTag::Paragraph
    }
}

/// Render a layout as a semantic, editable HTML document.
pub fn to_semantic_html(layout: &Layout, options: &RenderOptions) -> String {
    let mut body = String::new();
    for page in &layout.pages {
        render_page(&mut body, page, options);
    }

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\" />\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
         <title>PDF \u{2192} HTML (editable)</title>\n\
         <style>\n{}</style>\n\
         </head>\n<body>\n  <div class=\"wrap\">\n{}  </div>\n</body>\n</html>\n",
        EDITABLE_CSS, body
    )
}

fn render_page(out: &mut String, page: &Page, options: &RenderOptions) {
    out.push_str(&format!("<div class=\"page\" data-page=\"{}\">\n", page.number));
    for section in split_sections(&page.blocks, &options.section) {
        render_section(out, &section, page.width, options);
    }
    out.push_str("</div>\n");
}

fn render_section(out: &mut String, blocks: &[&Block], page_width: f32, options: &RenderOptions) {
    let images: Vec<&ImageBlock> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Image(i) => Some(i),
            _ => None,
        })
        .collect();
    let mut texts: Vec<&TextBlock> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Text(t) => Some(t),
            _ => None,
        })
        .collect();
    texts.sort_by(|a, b| {
        a.bbox
            .y0
            .partial_cmp(&b.bbox.y0)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let links: Vec<LinkBlock> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Link(l) => Some((*l).clone()),
            _ => None,
        })
        .collect();

    out.push_str("<section class=\"sec\">\n");

    // Hero: the single largest image, if it clears the area threshold.
    let hero: Option<&ImageBlock> = images
        .iter()
        .copied()
        .max_by(|a, b| {
            a.bbox
                .area()
                .partial_cmp(&b.bbox.area())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .filter(|img| img.bbox.area() > options.hero_min_area);
    if let Some(hero) = hero {
        out.push_str(&format!(
            "<div class=\"hero\"><img src=\"{}\" alt=\"\" /></div>\n",
            escape_html(&image_src(hero, options))
        ));
    }

    match detect_column_split(&texts, page_width, &options.section) {
        Some(split_x) => {
            let (left, right): (Vec<&TextBlock>, Vec<&TextBlock>) =
                texts.iter().partition(|t| t.bbox.x0 < split_x);
            out.push_str("<div class=\"cols\">\n<div class=\"col\">\n");
            for t in &left {
                render_text(out, t, &links, options);
            }
            out.push_str("</div>\n<div class=\"col\">\n");
            for t in &right {
                render_text(out, t, &links, options);
            }
            out.push_str("</div>\n</div>\n");
        }
        None => {
            for t in &texts {
                render_text(out, t, &links, options);
            }
        }
    }

    // Non-hero images flow inline after the text.
    for img in &images {
        if hero.is_some_and(|h| std::ptr::eq(*img, h)) {
            continue;
        }
        out.push_str(&format!(
            "<div class=\"img-block\"><img src=\"{}\" alt=\"\" /></div>\n",
            escape_html(&image_src(img, options))
        ));
    }

    out.push_str("</section>\n");
}

fn render_text(out: &mut String, block: &TextBlock, links: &[LinkBlock], options: &RenderOptions) {
    let text = escape_html(&block.text);
    let style = if block.color.is_empty() || block.color == "#000000" || block.color == "#000" {
        String::new()
    } else {
        format!(" style=\"color:{}\"", block.color)
    };

    let inner = match find_link(&block.bbox, links, options.link_expand) {
        Some(url) => format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            escape_html(url),
            text
        ),
        None => text,
    };

    let line = match classify(block) {
        TextTag::H1 => format!("<h1 contenteditable=\"true\"{}>{}</h1>\n", style, inner),
        TextTag::H2 => format!("<h2 contenteditable=\"true\"{}>{}</h2>\n", style, inner),
        TextTag::H3 => format!("<h3 contenteditable=\"true\"{}>{}</h3>\n", style, inner),
        TextTag::Legal => format!(
            "<p class=\"legal\" contenteditable=\"true\"{}>{}</p>\n",
            style, inner
        ),
        TextTag::Paragraph => format!("<p contenteditable=\"true\"{}>{}</p>\n", style, inner),
    };
    out.push_str(&line);
}

fn image_src(img: &ImageBlock, options: &RenderOptions) -> String {
    format!("{}{}", options.assets_base_url, img.src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn text(t: &str, size: f32, flags: u32, y0: f32) -> Block {
        Block::Text(TextBlock {
            bbox: BBox::new(10.0, y0, 200.0, y0 + size),
            text: t.to_string(),
            font: "Helvetica".to_string(),
            size,
            color: "#000000".to_string(),
            flags,
        })
    }

    fn layout_of(blocks: Vec<Block>) -> Layout {
        let mut page = Page::new(1, 595.0, 842.0);
        for b in blocks {
            page.add_block(b);
        }
        page.sort_blocks();
        let mut layout = Layout::new();
        layout.add_page(page);
        layout
    }

    #[test]
    fn test_heading_classification() {
        let cases: &[(f32, u32, TextTag)] = &[
            (24.0, 0, TextTag::H1),
            (22.0, 0, TextTag::H1),
            (18.0, 0, TextTag::H2),
            (15.0, BOLD_FLAG, TextTag::H2),
            (15.0, 0, TextTag::H3),
            (13.0, 0, TextTag::H3),
            (12.0, 0, TextTag::Paragraph),
            (8.0, 0, TextTag::Legal),
            (9.0, 0, TextTag::Legal),
        ];
        for &(size, flags, expected) in cases {
            let block = TextBlock {
                bbox: BBox::new(0.0, 0.0, 10.0, 10.0),
                text: String::new(),
                font: String::new(),
                size,
                color: String::new(),
                flags,
            };
            assert_eq!(classify(&block), expected, "size {} flags {}", size, flags);
        }
    }

    #[test]
    fn test_paragraph_rendering() {
        let layout = layout_of(vec![text("Hello World", 12.0, 0, 10.0)]);
        let html = to_semantic_html(&layout, &RenderOptions::default());
        assert!(html.contains(r#"<p contenteditable="true">Hello World</p>"#));
        assert!(html.contains(r#"data-page="1""#));
    }

    #[test]
    fn test_non_black_color_styled() {
        let mut layout = layout_of(vec![]);
        layout.pages[0].add_block(Block::Text(TextBlock {
            bbox: BBox::new(10.0, 10.0, 100.0, 22.0),
            text: "Red".to_string(),
            font: String::new(),
            size: 12.0,
            color: "#ff0000".to_string(),
            flags: 0,
        }));
        let html = to_semantic_html(&layout, &RenderOptions::default());
        assert!(html.contains(r#"style="color:#ff0000""#));
    }

    #[test]
    fn test_linked_text_wrapped_in_anchor() {
        let layout = layout_of(vec![
            text("Click me", 12.0, 0, 100.0),
            Block::Link(LinkBlock {
                bbox: BBox::new(10.0, 100.0, 200.0, 112.0),
                url: "https://example.com?a=1&b=2".to_string(),
            }),
        ]);
        let html = to_semantic_html(&layout, &RenderOptions::default());
        assert!(html.contains(r#"<a href="https://example.com?a=1&amp;b=2" target="_blank">Click me</a>"#));
    }

    #[test]
    fn test_hero_image_over_threshold() {
        let layout = layout_of(vec![Block::Image(ImageBlock {
            bbox: BBox::new(0.0, 0.0, 200.0, 100.0), // 20000 pt²
            src: "page001_img1.png".to_string(),
        })]);
        let options = RenderOptions::new().with_assets_base_url("https://cdn/x/");
        let html = to_semantic_html(&layout, &options);
        assert!(html.contains(r#"<div class="hero"><img src="https://cdn/x/page001_img1.png""#));
    }

    #[test]
    fn test_small_image_stays_inline() {
        let layout = layout_of(vec![Block::Image(ImageBlock {
            bbox: BBox::new(0.0, 0.0, 50.0, 50.0), // 2500 pt² < 8000
            src: "page001_img1.png".to_string(),
        })]);
        let html = to_semantic_html(&layout, &RenderOptions::default());
        assert!(!html.contains("class=\"hero\""));
        assert!(html.contains("class=\"img-block\""));
    }

    #[test]
    fn test_two_column_grid() {
        // Two columns of two blocks each, all within one section.
        let layout = layout_of(vec![
            text("L1", 12.0, 0, 10.0),
            text("L2", 12.0, 0, 40.0),
            Block::Text(TextBlock {
                bbox: BBox::new(320.0, 10.0, 500.0, 22.0),
                text: "R1".to_string(),
                font: String::new(),
                size: 12.0,
                color: "#000000".to_string(),
                flags: 0,
            }),
            Block::Text(TextBlock {
                bbox: BBox::new(320.0, 40.0, 500.0, 52.0),
                text: "R2".to_string(),
                font: String::new(),
                size: 12.0,
                color: "#000000".to_string(),
                flags: 0,
            }),
        ]);
        let html = to_semantic_html(&layout, &RenderOptions::default());
        assert!(html.contains("class=\"cols\""));
        // Left column renders before right column
        let l1 = html.find("L1").unwrap();
        let r1 = html.find("R1").unwrap();
        assert!(l1 < r1);
    }

    #[test]
    fn test_escapes_text_content() {
        let layout = layout_of(vec![text("a < b & c", 12.0, 0, 10.0)]);
        let html = to_semantic_html(&layout, &RenderOptions::default());
        assert!(html.contains("a &lt; b &amp; c"));
    }
}
