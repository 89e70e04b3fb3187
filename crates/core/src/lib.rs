pub mod clipboard;
pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod parse;
pub mod selection;
pub mod tidy;
pub mod visibility;

pub use clipboard::{Clipboard, CommandClipboard, Osc52Clipboard};
pub use config::{ConvertConfig, ConvertConfigBuilder};
pub use convert::{ConversionResult, Converter, convert_html, resolve_scope, resolve_title};
pub use error::{ChapterError, Result};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin};
pub use formatters::{MarkdownConfig, render_markdown, to_json};
pub use parse::Document;
pub use selection::{NoSelection, SelectionSource, SelectorAnchor};
pub use tidy::{normalize, tidy};
pub use visibility::{StyleVisibility, Visibility};
