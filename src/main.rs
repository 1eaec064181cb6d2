//! Scrawl - render embedded diagram payloads from text to PNG.
//!
//! # Usage
//!
//! ```bash
//! scrawl notes.md
//! scrawl notes.md -o diagram.png --width 800 --height 600
//! scrawl notes.md --emit-text
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use scrawl::canvas::{Canvas, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use scrawl::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags, ConfigFlags,
};
use scrawl::element::ElementInput;
use scrawl::extract::split_text_and_diagram;

/// Render embedded diagram payloads from text to PNG
#[derive(Parser, Debug)]
#[command(name = "scrawl", version, about, long_about = None)]
struct Cli {
    /// Text file containing an embedded diagram payload (or a bare
    /// JSON element list)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "diagram.png")]
    output: PathBuf,

    /// Surface width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Print the prose with the payload stripped to stdout
    #[arg(long)]
    emit_text: bool,

    /// Write the stripped prose to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    text_out: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Save current command-line flags as defaults in .scrawlrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .scrawlrc
    #[arg(long)]
    clear: bool,
}

/// Pull the element list out of the file contents: an embedded payload in
/// prose, or the whole file as a bare JSON element list.
fn resolve_input(content: &str) -> (Option<ElementInput>, String) {
    let split = split_text_and_diagram(content);
    if let Some(diagram) = split.diagram {
        return (Some(ElementInput::Flat(diagram)), split.text);
    }
    if let Ok(input) = serde_json::from_str::<ElementInput>(content.trim()) {
        return (Some(input), String::new());
    }
    (None, split.text)
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Initialize logging
    let default_level = if effective.verbose || cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }
    let content = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let (input, text) = resolve_input(&content);
    let Some(input) = input else {
        anyhow::bail!("No diagram payload found in {}", cli.file.display());
    };

    let width = effective.width.unwrap_or(DEFAULT_WIDTH);
    let height = effective.height.unwrap_or(DEFAULT_HEIGHT);
    let mut canvas = Canvas::new(width, height)
        .with_context(|| format!("Failed to create {width}x{height} canvas"))?;
    canvas.render(&input);
    canvas
        .save_png(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!("Wrote {}", cli.output.display());

    if let Some(path) = &cli.text_out {
        std::fs::write(path, &text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else if effective.emit_text {
        println!("{text}");
    }

    Ok(())
}
