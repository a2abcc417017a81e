//! Pixel-exact HTML rendering.
//!
//! Every block is absolutely positioned from its PDF bounding box at
//! 1pt = 1px, layered images first, then editable text, then transparent
//! link overlays on top.

use crate::links::find_link;
use crate::model::{Block, Layout, LinkBlock, Page};
use crate::normalize::{BOLD_FLAG, ITALIC_FLAG};

use super::escape::escape_html;
use super::RenderOptions;

const EXACT_CSS: &str = r#"
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: #e5e7eb; }
  .wrap { display: flex; flex-direction: column; align-items: center; padding: 20px; gap: 20px; }
  .page { position: relative; background: #fff; box-shadow: 0 2px 24px rgba(0,0,0,.10); overflow: hidden; }
  .t { position: absolute; white-space: pre-wrap; word-break: break-word; line-height: 1.2; outline: none; cursor: text; }
  .t:focus { box-shadow: 0 0 0 2px rgba(59,130,246,.5); background: rgba(59,130,246,.04); border-radius: 2px; }
  .i { position: absolute; object-fit: contain; }
  .hot { position: absolute; display: block; }
"#;

/// Render a layout as a pixel-exact HTML document.
///
/// Text stays editable in place; each link becomes a hot-zone anchor
/// stacked above the content it covers.
pub fn to_exact_html(layout: &Layout, options: &RenderOptions) -> String {
    let mut pages = String::new();
    for page in &layout.pages {
        render_page(&mut pages, page, options);
    }

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\" />\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
         <title>PDF \u{2192} HTML (pixel-exact)</title>\n\
         <style>\n{}</style>\n\
         </head>\n<body>\n  <div class=\"wrap\">\n{}  </div>\n</body>\n</html>\n",
        EXACT_CSS, pages
    )
}

fn render_page(out: &mut String, page: &Page, options: &RenderOptions) {
    out.push_str(&format!(
        "<div class=\"page\" data-page=\"{}\" style=\"width:{:.1}px;height:{:.1}px;\">\n",
        page.number, page.width, page.height
    ));

    let links: Vec<LinkBlock> = page
        .blocks
        .iter()
        .filter_map(|b| match b {
            Block::Link(l) => Some(l.clone()),
            _ => None,
        })
        .collect();

    // Stacking order: images under text, link overlays on top.
    for block in &page.blocks {
        if let Block::Image(img) = block {
            let (pos, bh) = position(block);
            out.push_str(&format!(
                "<img class=\"i\" src=\"{}\" style=\"{}height:{:.1}px;\" alt=\"\" />\n",
                escape_html(&format!("{}{}", options.assets_base_url, img.src)),
                pos,
                bh
            ));
        }
    }
    for block in &page.blocks {
        if let Block::Text(text) = block {
            let (pos, bh) = position(block);
            let bold = if text.flags & BOLD_FLAG != 0 { "bold" } else { "normal" };
            let italic = if text.flags & ITALIC_FLAG != 0 { "italic" } else { "normal" };
            let style = format!(
                "{}min-height:{:.1}px;font-size:{:.1}px;color:{};font-weight:{};font-style:{};",
                pos, bh, text.size, text.color, bold, italic
            );
            let escaped = escape_html(&text.text);
            let inner = match find_link(&text.bbox, &links, options.link_expand) {
                Some(url) => format!(
                    "<a href=\"{}\" target=\"_blank\">{}</a>",
                    escape_html(url),
                    escaped
                ),
                None => escaped,
            };
            out.push_str(&format!(
                "<div class=\"t\" contenteditable=\"true\" style=\"{}\">{}</div>\n",
                style, inner
            ));
        }
    }
    for link in &links {
        let (pos, bh) = position_of(&link.bbox);
        out.push_str(&format!(
            "<a class=\"hot\" href=\"{url}\" target=\"_blank\" style=\"{}height:{:.1}px;z-index:10;\" title=\"{url}\"></a>\n",
            pos,
            bh,
            url = escape_html(&link.url)
        ));
    }

    out.push_str("</div>\n");
}

fn position(block: &Block) -> (String, f32) {
    position_of(block.bbox())
}

/// Absolute-position prefix plus height, clamped to a 1px minimum so
/// degenerate boxes stay visible and clickable.
fn position_of(bbox: &crate::model::BBox) -> (String, f32) {
    let bw = (bbox.x1 - bbox.x0).max(1.0);
    let bh = (bbox.y1 - bbox.y0).max(1.0);
    (
        format!(
            "left:{:.1}px;top:{:.1}px;width:{:.1}px;",
            bbox.x0, bbox.y0, bw
        ),
        bh,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, ImageBlock, TextBlock};

    fn page_with(blocks: Vec<Block>) -> Layout {
        let mut page = Page::new(1, 595.0, 842.0);
        for b in blocks {
            page.add_block(b);
        }
        page.sort_blocks();
        let mut layout = Layout::new();
        layout.add_page(page);
        layout
    }

    fn plain_text(t: &str) -> Block {
        Block::Text(TextBlock {
            bbox: BBox::new(10.0, 10.0, 300.0, 22.0),
            text: t.to_string(),
            font: "Helvetica".to_string(),
            size: 12.0,
            color: "#000000".to_string(),
            flags: 0,
        })
    }

    #[test]
    fn test_page_sized_from_dimensions() {
        let html = to_exact_html(&page_with(vec![]), &RenderOptions::default());
        assert!(html.contains(r#"style="width:595.0px;height:842.0px;""#));
    }

    #[test]
    fn test_text_block_positioned_and_styled() {
        let html = to_exact_html(&page_with(vec![plain_text("Hello World")]), &RenderOptions::default());
        assert!(html.contains(
            "<div class=\"t\" contenteditable=\"true\" style=\"left:10.0px;top:10.0px;width:290.0px;min-height:12.0px;font-size:12.0px;color:#000000;font-weight:normal;font-style:normal;\">Hello World</div>"
        ));
    }

    #[test]
    fn test_bold_italic_flags_reflected() {
        let mut block = plain_text("x");
        if let Block::Text(ref mut t) = block {
            t.flags = BOLD_FLAG | ITALIC_FLAG;
        }
        let html = to_exact_html(&page_with(vec![block]), &RenderOptions::default());
        assert!(html.contains("font-weight:bold;font-style:italic;"));
    }

    #[test]
    fn test_degenerate_box_clamped_to_one_pixel() {
        let block = Block::Text(TextBlock {
            bbox: BBox::new(50.0, 50.0, 50.0, 50.0),
            text: "dot".to_string(),
            font: String::new(),
            size: 12.0,
            color: "#000000".to_string(),
            flags: 0,
        });
        let html = to_exact_html(&page_with(vec![block]), &RenderOptions::default());
        assert!(html.contains("width:1.0px;min-height:1.0px;"));
    }

    #[test]
    fn test_image_before_text_before_overlay() {
        let layout = page_with(vec![
            plain_text("caption"),
            Block::Image(ImageBlock {
                bbox: BBox::new(0.0, 0.0, 100.0, 100.0),
                src: "page001_img1.png".to_string(),
            }),
            Block::Link(LinkBlock {
                bbox: BBox::new(400.0, 400.0, 500.0, 420.0),
                url: "https://example.com".to_string(),
            }),
        ]);
        let html = to_exact_html(&layout, &RenderOptions::default());
        let img = html.find("<img class=\"i\"").unwrap();
        let text = html.find("<div class=\"t\"").unwrap();
        let hot = html.find("<a class=\"hot\"").unwrap();
        assert!(img < text && text < hot);
        assert!(html.contains("z-index:10;"));
        assert!(html.contains(r#"title="https://example.com""#));
    }

    #[test]
    fn test_overlapping_link_wraps_text() {
        let layout = page_with(vec![
            plain_text("Visit us"),
            Block::Link(LinkBlock {
                bbox: BBox::new(10.0, 10.0, 300.0, 22.0),
                url: "https://example.com".to_string(),
            }),
        ]);
        let html = to_exact_html(&layout, &RenderOptions::default());
        assert!(html.contains(r#"<a href="https://example.com" target="_blank">Visit us</a>"#));
    }

    #[test]
    fn test_image_src_prefixed() {
        let layout = page_with(vec![Block::Image(ImageBlock {
            bbox: BBox::new(0.0, 0.0, 100.0, 100.0),
            src: "page001_img1.png".to_string(),
        })]);
        let options = RenderOptions::new().with_assets_base_url("https://cdn/x/");
        let html = to_exact_html(&layout, &options);
        assert!(html.contains(r#"src="https://cdn/x/page001_img1.png""#));
    }
}
