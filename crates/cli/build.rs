use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("chapterdown")
        .version("1.0.0")
        .about("Convert an online reader's chapter into clean Markdown")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (markdown, json)")
                .value_name("FORMAT")
                .default_value("markdown")
                .value_parser(["markdown", "json"]),
        )
        .arg(clap::arg!(-c --copy "Copy the Markdown to the clipboard"))
        .arg(
            clap::arg!(--clipboard <METHOD> "Clipboard method (command, osc52)")
                .default_value("command")
                .value_parser(["command", "osc52"]),
        )
        .arg(clap::arg!(--container_id <ID> "Id of the content container").value_name("ID"))
        .arg(clap::arg!(--selection <CSS> "CSS selector for the selection anchor").value_name("CSS"))
        .arg(
            clap::arg!(--index_term_class <CLASS> "Class marking index-term elements (repeatable)")
                .value_name("CLASS")
                .action(clap::ArgAction::Append),
        )
        .arg(clap::arg!(--fallback_title <TEXT> "Title used when none can be found").value_name("TEXT"))
        .arg(clap::arg!(--base_url <URL> "Base URL for relative links and images").value_name("URL"))
        .arg(clap::arg!(--frontmatter "Include TOML frontmatter (Markdown only)"))
        .arg(
            clap::arg!(--config <FILE> "Config file (default: <config dir>/chapterdown/config.json)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "chapterdown", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "chapterdown", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "chapterdown", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "chapterdown", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
