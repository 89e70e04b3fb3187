//! Whitespace and blank-line normalisation for rendered Markdown.
//!
//! [`tidy`] runs on every inline fragment at a block boundary. Merged
//! nested blocks and the final joined document go through [`normalize`],
//! which applies the same rules line by line but leaves list indentation
//! and fenced code untouched.

use std::sync::LazyLock;

use regex::Regex;

static TRAILING_BLANKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+\n").unwrap());
static EXTRA_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static QUOTE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:> ?)*").unwrap());
static BACKTICK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`+").unwrap());

const FENCE_MIN: usize = 3;

/// Normalise whitespace in a Markdown string.
///
/// 1. Strip spaces and tabs before each newline.
/// 2. Collapse three or more newlines into one blank line.
/// 3. Collapse runs of spaces and tabs into one space.
/// 4. Trim the whole string.
///
/// The transform is idempotent.
///
/// ```rust
/// use chapterdown_core::tidy;
///
/// assert_eq!(tidy("  a  b \n\n\n\nc  "), "a b\n\nc");
/// ```
pub fn tidy(text: &str) -> String {
    let text = TRAILING_BLANKS.replace_all(text, "\n");
    let text = EXTRA_NEWLINES.replace_all(&text, "\n\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}

/// Normalise a multi-block Markdown document.
///
/// Outside fenced code this matches [`tidy`], except that indentation at
/// the start of a line (after any `> ` quote markers) is kept. Inside a
/// backtick fence only blank-line runs are collapsed; other lines pass
/// through verbatim. A fence closes on a bare backtick run at least as
/// long as the one that opened it. Idempotent.
///
/// ```rust
/// use chapterdown_core::normalize;
///
/// assert_eq!(normalize("- a\n\n\n\n  - b  c"), "- a\n\n  - b c");
/// assert_eq!(normalize("```\nlet  x = 1;\n```"), "```\nlet  x = 1;\n```");
/// ```
pub fn normalize(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut fence: Option<usize> = None;
    let mut blank_run = 0;

    for line in text.split('\n') {
        let prefix_len = QUOTE_PREFIX.find(line).map_or(0, |m| m.end());
        let (prefix, rest) = line.split_at(prefix_len);

        if let Some(open) = fence {
            if rest.trim().is_empty() {
                blank_run += 1;
                if blank_run == 1 {
                    lines.push(prefix.trim_end().to_string());
                }
                continue;
            }
            blank_run = 0;
            if is_closing_fence(rest, open) {
                fence = None;
                lines.push(line.trim_end_matches([' ', '\t']).to_string());
            } else {
                lines.push(line.to_string());
            }
            continue;
        }

        let ticks = backtick_run(rest);
        if ticks >= FENCE_MIN {
            fence = Some(ticks);
            blank_run = 0;
            lines.push(line.trim_end_matches([' ', '\t']).to_string());
            continue;
        }

        let body = rest.trim_start_matches([' ', '\t']);
        let indent = &rest[..rest.len() - body.len()];
        let body = SPACE_RUNS.replace_all(body, " ");
        let tidied = format!("{}{}{}", prefix, indent, body);
        let tidied = tidied.trim_end_matches([' ', '\t']);

        if tidied.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(tidied.to_string());
    }

    lines.join("\n").trim().to_string()
}

/// Backtick fence wide enough that no run inside `code` can close it.
pub(crate) fn code_fence_marker(code: &str) -> String {
    let longest = BACKTICK_RUN.find_iter(code).map(|m| m.len()).max().unwrap_or(0);
    "`".repeat(FENCE_MIN.max(longest + 1))
}

/// Length of the backtick run a line starts with.
fn backtick_run(line: &str) -> usize {
    line.len() - line.trim_start_matches('`').len()
}

fn is_closing_fence(line: &str, open: usize) -> bool {
    let line = line.trim_end();
    backtick_run(line) == line.len() && line.len() >= open
}

/// Collapse every whitespace run, newlines included, to a single space.
///
/// Unlike [`tidy`] this does not trim: inline text keeps the boundary
/// spaces that separate it from neighbouring markup.
pub fn collapse(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("plain", "plain")]
    #[case("a   \nb", "a\nb")]
    #[case("a\t\t\nb", "a\nb")]
    #[case("a\n\n\n\n\nb", "a\n\nb")]
    #[case("a  b\t\tc", "a b c")]
    #[case("\n\n  a  \n\n", "a")]
    #[case("line  \nbreak", "line\nbreak")]
    fn test_tidy(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(tidy(input), expected);
    }

    #[rstest]
    #[case("a \n \n \n b")]
    #[case("  x  \t\n\n\n\n\ty  ")]
    #[case("> quote\n> \n> more")]
    #[case("\u{a0}a\u{a0}\n\n\n")]
    #[case("| a | b |\n| --- | --- |\n\n\n\n| 1 | 2 |  ")]
    fn test_tidy_is_idempotent(#[case] input: &str) {
        let once = tidy(input);
        assert_eq!(tidy(&once), once);
    }

    #[rstest]
    #[case("a\n\n\n\nb", "a\n\nb")]
    #[case("a  b \n c", "a b\n c")]
    #[case("- item\n\n  - nested", "- item\n\n  - nested")]
    #[case("> quote\n> \n>   - nested", "> quote\n>\n>   - nested")]
    #[case("```\nfn  main() {\n\n\n\n    x  \n}\n```", "```\nfn  main() {\n\n    x  \n}\n```")]
    #[case("````\nUse\n```\nto fence\n````\n\n\n\nafter  x", "````\nUse\n```\nto fence\n````\n\nafter x")]
    #[case("```\na\n````\n\n\n\nb  c", "```\na\n````\n\nb c")]
    #[case("  \n\n# T  \n", "# T")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case("# T\n\n\n\n- a  b\n\n  - c   d")]
    #[case("> ```\n>   keep  this\n> ```\n\n\n\ntext  ")]
    #[case("```\nunterminated  \n\n\n")]
    #[case("````\n```\n\n\n\n  x  \n````\n\n\n\ny")]
    fn test_normalize_is_idempotent(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[rstest]
    #[case("plain", "```")]
    #[case("a `tick` here", "```")]
    #[case("Use\n```\nto fence", "````")]
    #[case("x ````` y", "``````")]
    fn test_code_fence_marker(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(code_fence_marker(code), expected);
    }

    #[test]
    fn test_collapse_keeps_edges() {
        assert_eq!(collapse("  hello\n\n  world "), " hello world ");
    }
}
