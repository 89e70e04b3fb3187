use crate::convert::ConversionResult;

/// Options for the final Markdown document
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Prefix the document with TOML frontmatter
    pub include_frontmatter: bool,
    /// Source URL or path recorded in the frontmatter
    pub source: Option<String>,
}

/// Render a conversion result as a Markdown document.
pub fn render_markdown(result: &ConversionResult, config: &MarkdownConfig) -> String {
    if !config.include_frontmatter {
        return result.markdown.clone();
    }

    let mut output = generate_frontmatter(&result.title, config.source.as_deref());
    output.push('\n');
    output.push_str(&result.markdown);
    output
}

/// Generate TOML frontmatter for the chapter
fn generate_frontmatter(title: &str, source: Option<&str>) -> String {
    let mut frontmatter = String::from("+++");

    frontmatter.push_str(&format!("\ntitle = {}", toml_escape_string(title)));

    if let Some(source) = source {
        frontmatter.push_str(&format!("\nsource = {}", toml_escape_string(source)));
    }

    frontmatter.push_str("\n+++\n");
    frontmatter
}

/// Escape a string for TOML format
fn toml_escape_string(s: &str) -> String {
    let needs_escape = s.contains('"') || s.contains('\\') || s.contains('\n');
    if needs_escape {
        format!(
            "\"{}\"",
            s.replace('\\', "\\\\").replace('\"', "\\\"").replace('\n', "\\n")
        )
    } else {
        format!("\"{}\"", s)
    }
}
