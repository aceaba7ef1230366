//! linecursor - walk a text with a line-aware cursor.
//!
//! # Usage
//!
//! ```bash
//! linecursor
//! linecursor src/lib.rs
//! linecursor --mode strict --quiet notes.txt
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use linecursor::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags, ConfigFlags,
};
use linecursor::cursor::Mode;
use linecursor::demo::{self, SAMPLE};

/// Run the cursor walkthrough over a text file or the built-in sample
#[derive(Parser, Debug)]
#[command(name = "linecursor", version, about, long_about = None)]
struct Cli {
    /// Text file to walk (defaults to a built-in sample)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Failure policy for cursor motions
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Log cursor activity to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Do not echo the input text
    #[arg(short, long)]
    quiet: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        mode: cli.mode,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

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

    init_logging(effective.verbose);

    let text = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => SAMPLE.to_string(),
    };
    let mode = effective.mode.unwrap_or_default();
    tracing::debug!(
        mode = mode.as_str(),
        chars = text.chars().count(),
        "starting walkthrough"
    );

    let steps = demo::walkthrough(&text, mode).context("Walkthrough failed")?;

    if !effective.quiet {
        println!("Input string: `{text}`");
        println!();
        println!("---");
    }
    for (i, step) in steps.iter().enumerate() {
        println!();
        println!("{}) {}:", i + 1, step.title);
        println!("{}", step.output);
    }
    Ok(())
}
