//! Output renderers: semantic HTML, pixel-exact HTML, and JSON.

mod escape;
mod exact;
mod json;
mod options;
mod semantic;

pub use escape::escape_html;
pub use exact::to_exact_html;
pub use json::{to_layout_json, to_structured_json, JsonFormat};
pub use options::RenderOptions;
pub use semantic::to_semantic_html;
