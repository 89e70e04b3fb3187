pub mod json;
pub mod markdown;

pub use json::to_json;
pub use markdown::{MarkdownConfig, render_markdown};
