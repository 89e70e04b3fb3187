//! Clipboard sinks for the converted chapter.
//!
//! Two strategies are provided. [`CommandClipboard`] pipes the text into a
//! platform clipboard utility. [`Osc52Clipboard`] emits the OSC 52 terminal
//! escape sequence, which most modern terminals (and tmux/ssh sessions)
//! turn into a clipboard write.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{ChapterError, Result};

/// Something that can receive text for the system clipboard.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Clipboard utilities tried in order: program and arguments.
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

/// Copies by piping into the first clipboard utility that can be started.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandClipboard;

impl Clipboard for CommandClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        for (program, args) in CLIPBOARD_COMMANDS {
            let mut child = match Command::new(program)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => child,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(ChapterError::ClipboardError(format!("{}: {}", program, e))),
            };

            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes())?;
            }

            let status = child.wait()?;
            if status.success() {
                tracing::debug!(program, bytes = text.len(), "copied to clipboard");
                return Ok(());
            }
            return Err(ChapterError::ClipboardError(format!("{} exited with {}", program, status)));
        }

        Err(ChapterError::ClipboardError(
            "no clipboard utility found (tried wl-copy, xclip, xsel, pbcopy, clip.exe)".to_string(),
        ))
    }
}

/// Copies through the terminal with an OSC 52 escape sequence.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<io::Stderr> {
    /// Writes the escape sequence to stderr, leaving stdout for output.
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{}", osc52_sequence(text))?;
        self.out.flush()?;
        Ok(())
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`
fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
