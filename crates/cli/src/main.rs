mod echo;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Context;
use chapterdown_core::{
    ChapterError, Clipboard, CommandClipboard, ConversionResult, ConvertConfig, ConvertConfigBuilder, Converter,
    Document, FetchConfig, MarkdownConfig, NoSelection, Osc52Clipboard, SelectionSource, SelectorAnchor, fetch_file,
    fetch_stdin, fetch_url, render_markdown, to_json,
};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;

use echo::{format_size, print_banner, print_detail, print_error, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the converted chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: markdown, json", s)),
        }
    }
}

/// How `--copy` reaches the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardMethod {
    Command,
    Osc52,
}

impl FromStr for ClipboardMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "command" => Ok(Self::Command),
            "osc52" => Ok(Self::Osc52),
            _ => Err(format!("Invalid clipboard method: {}. Valid options: command, osc52", s)),
        }
    }
}

/// Convert the chapter shown in an online reader into clean Markdown
#[derive(Parser, Debug)]
#[command(name = "chapterdown")]
#[command(version)]
#[command(about = "Convert an online reader's chapter into clean Markdown", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(short, long, default_value = "markdown", value_name = "FORMAT")]
    format: OutputFormat,

    /// Copy the output to the clipboard instead of printing it
    #[arg(short, long)]
    copy: bool,

    /// Clipboard method (command, osc52)
    #[arg(long, default_value = "command", value_name = "METHOD")]
    clipboard: ClipboardMethod,

    /// Id of the content container
    #[arg(long, value_name = "ID")]
    container_id: Option<String>,

    /// CSS selector for the selection anchor
    #[arg(long, value_name = "CSS")]
    selection: Option<String>,

    /// Class marking index-term elements (repeatable)
    #[arg(long = "index-term-class", value_name = "CLASS")]
    index_term_classes: Vec<String>,

    /// Title used when the content has no heading and the page no title
    #[arg(long, value_name = "TEXT")]
    fallback_title: Option<String>,

    /// Base URL for relative links and images (default: the input URL)
    #[arg(long, value_name = "URL")]
    base_url: Option<Url>,

    /// Include TOML frontmatter (Markdown only)
    #[arg(long)]
    frontmatter: bool,

    /// Config file (default: <config dir>/chapterdown/config.json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn input_url(&self) -> Option<Url> {
        if self.input.starts_with("http://") || self.input.starts_with("https://") {
            Url::parse(&self.input).ok()
        } else {
            None
        }
    }
}

/// `RUST_LOG` wins; otherwise `debug` with `--verbose` and `warn` without.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "chapterdown_core=debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn read_input(args: &Args) -> anyhow::Result<String> {
    if args.input == "-" {
        if args.verbose {
            print_step(1, 4, "Reading from stdin");
        }
        return fetch_stdin().context("Failed to read from stdin");
    }

    if args.input_url().is_some() {
        if args.verbose {
            print_step(1, 4, &format!("Fetching from {}", args.input.bright_white().underline()));
        }

        let mut config = FetchConfig { timeout: args.timeout, ..Default::default() };
        if let Some(user_agent) = &args.user_agent {
            config.user_agent = user_agent.clone();
        }

        return fetch_url(&args.input, &config).await.context("Failed to fetch URL");
    }

    if args.verbose {
        print_step(1, 4, &format!("Reading from file {}", args.input.bright_white()));
    }
    fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))
}

/// Config file first, then command-line overrides on top.
fn build_config(args: &Args) -> anyhow::Result<ConvertConfig> {
    let base = match &args.config {
        Some(path) => ConvertConfig::load(path).with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ConvertConfig::load_default().context("Failed to load config")?,
    };

    let input_url = if base.base_url.is_none() { args.input_url() } else { None };
    let mut builder = ConvertConfigBuilder::from_config(base);

    if let Some(id) = &args.container_id {
        builder = builder.container_id(id.as_str());
    }
    if !args.index_term_classes.is_empty() {
        builder = builder.index_term_classes(args.index_term_classes.clone());
    }
    if let Some(title) = &args.fallback_title {
        builder = builder.fallback_title(title.as_str());
    }
    if let Some(url) = args.base_url.clone().or(input_url) {
        builder = builder.base_url(url);
    }

    Ok(builder.build())
}

fn render_output(args: &Args, result: &ConversionResult) -> anyhow::Result<String> {
    match args.format {
        OutputFormat::Markdown => {
            let source = if args.input == "-" { None } else { Some(args.input.clone()) };
            let config = MarkdownConfig { include_frontmatter: args.frontmatter, source };
            Ok(render_markdown(result, &config))
        }
        OutputFormat::Json => {
            if args.frontmatter {
                print_warning("--frontmatter only applies to Markdown output");
            }
            let mut json = to_json(result, true).context("Failed to serialize JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn copy_to_clipboard(method: ClipboardMethod, text: &str) -> chapterdown_core::Result<()> {
    match method {
        ClipboardMethod::Command => CommandClipboard.copy(text),
        ClipboardMethod::Osc52 => Osc52Clipboard::stderr().copy(text),
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let config = build_config(&args)?;
    let html = read_input(&args).await?;

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        eprintln!();
        print_step(2, 4, "Parsing HTML document");
    }

    let doc = Document::parse(&html);

    if args.verbose {
        if let Some(title) = doc.title() {
            print_detail("Page title", &title);
        }
        eprintln!();
        print_step(3, 4, &format!("Converting #{}", config.container_id));
    }

    let selection: Box<dyn SelectionSource> = match &args.selection {
        Some(css) => Box::new(SelectorAnchor::new(css.as_str())),
        None => Box::new(NoSelection),
    };

    let result = Converter::with_config(config).run(&doc, selection.as_ref());
    if result.is_empty() {
        return Err(ChapterError::NoContent.into());
    }

    if args.verbose {
        print_detail("Title", &result.title);
        print_detail("Markdown", &format_size(result.markdown.len()));
        eprintln!();
        print_step(4, 4, "Writing output");
        print_detail("Format", &format!("{:?}", args.format));
        eprintln!();
    }

    let output = render_output(&args, &result)?;

    if let Some(path) = &args.output {
        fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
        print_success(&format!("Output written to {}", path.display().bright_white()));
    }

    if args.copy {
        copy_to_clipboard(args.clipboard, &output).context("Failed to copy to clipboard")?;
        print_success(&format!("Copied: {}", result.title));
    } else if args.output.is_none() {
        print!("{}", output);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
