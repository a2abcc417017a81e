//! Rendering options.

use crate::links::LINK_EXPAND_PT;
use crate::section::SectionOptions;

/// Options shared by both HTML renderers.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix prepended to saved image filenames in `src` attributes
    /// (e.g. a session URL from [`crate::assets::AssetContext::image_url`]
    /// stripped of the filename, or a relative directory)
    pub assets_base_url: String,

    /// Hot-zone expansion for link attachment, in points
    pub link_expand: f32,

    /// Minimum area (pt²) for a section's largest image to become a hero
    pub hero_min_area: f32,

    /// Sectioning and column-detection thresholds
    pub section: SectionOptions,
}

impl RenderOptions {
    /// Create render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset URL prefix.
    pub fn with_assets_base_url(mut self, url: impl Into<String>) -> Self {
        self.assets_base_url = url.into();
        self
    }

    /// Set the link hot-zone expansion in points.
    pub fn with_link_expand(mut self, expand: f32) -> Self {
        self.link_expand = expand;
        self
    }

    /// Set the hero image area threshold in pt².
    pub fn with_hero_min_area(mut self, area: f32) -> Self {
        self.hero_min_area = area;
        self
    }

    /// Set sectioning options.
    pub fn with_section_options(mut self, section: SectionOptions) -> Self {
        self.section = section;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            assets_base_url: String::new(),
            link_expand: LINK_EXPAND_PT,
            hero_min_area: 8000.0,
            section: SectionOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_assets_base_url("https://host/api/v1/images/s1/")
            .with_hero_min_area(5000.0)
            .with_link_expand(2.0);

        assert_eq!(options.assets_base_url, "https://host/api/v1/images/s1/");
        assert_eq!(options.hero_min_area, 5000.0);
        assert_eq!(options.link_expand, 2.0);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert!(options.assets_base_url.is_empty());
        assert_eq!(options.link_expand, 4.0);
        assert_eq!(options.hero_min_area, 8000.0);
        assert_eq!(options.section.section_gap, 25.0);
    }
}
