//! Asset filename conventions and public URL construction.
//!
//! The image-serving collaborator locates files purely by name, so both
//! sides must agree on the convention: `page{page:03}_img{id}.{ext}` for
//! embedded images and `page{page:03}_render.png` for full-page renders.

use serde::{Deserialize, Serialize};

/// Build the conventional filename for an embedded image.
///
/// `image_id` is the source xref when known, otherwise the 1-based
/// detection index. The "jpeg" extension normalizes to "jpg".
pub fn image_filename(page_number: u32, image_id: u32, ext: &str) -> String {
    let ext = ext.to_ascii_lowercase();
    let ext = if ext == "jpeg" { "jpg" } else { ext.as_str() };
    format!("page{:03}_img{}.{}", page_number, image_id, ext)
}

/// Build the conventional filename for a full-page render.
pub fn render_filename(page_number: u32) -> String {
    format!("page{:03}_render.png", page_number)
}

/// Explicitly passed context for building public asset URLs.
///
/// Carries the service base URL and the session identifier that scopes
/// saved files. Session lifetime and TTL cleanup live in the surrounding
/// service; the core only formats URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetContext {
    /// Service base URL (e.g. "https://host.example"); may be empty
    pub base_url: String,
    /// Session identifier scoping saved files
    pub session_id: String,
}

impl AssetContext {
    /// Create a new asset context.
    pub fn new(base_url: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session_id: session_id.into(),
        }
    }

    /// Public URL for a saved file in this session.
    pub fn image_url(&self, filename: &str) -> String {
        format!(
            "{}/api/v1/images/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.session_id,
            filename
        )
    }

    /// Short document identifier derived from the session id.
    pub fn doc_id(&self) -> String {
        self.session_id.chars().take(8).collect()
    }
}
