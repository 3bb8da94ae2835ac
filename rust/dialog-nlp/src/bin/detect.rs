//! Run command detection on one sentence from the command line.
//!
//! ```text
//! detect turn on the wifi and the bluetooth
//! detect --carry "wifi|turn on the|" turn it off
//! detect --grammar commands.txt --strict reboot the phone
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dialog_grammar::assistant::assistant_registry;
use dialog_grammar::{CommandRegistry, LoadMode};
use dialog_nlp::Detector;

#[derive(Parser, Debug)]
#[command(name = "detect")]
#[command(about = "Detect device commands in a spoken sentence")]
struct Args {
    /// Grammar file in the `\`-joined spec format; defaults to the built-in
    /// assistant grammar
    #[arg(long, short = 'g')]
    grammar: Option<PathBuf>,

    /// Carry-over from the previous turn, as printed before `\\//`
    #[arg(long, short = 'c', default_value = "")]
    carry: String,

    /// Keep only the last of consecutive codes for the same command
    #[arg(long)]
    collapse: bool,

    /// Let matched words be matched again by later triggers
    #[arg(long)]
    keep_consumed: bool,

    /// Fail on the first invalid command spec instead of skipping it
    #[arg(long)]
    strict: bool,

    /// The sentence to analyze
    #[arg(required = true)]
    sentence: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let registry = match &args.grammar {
        Some(path) => {
            let grammar = std::fs::read_to_string(path)
                .with_context(|| format!("reading grammar {}", path.display()))?;
            let mode = if args.strict {
                LoadMode::Strict
            } else {
                LoadMode::Lenient
            };
            CommandRegistry::from_text(&grammar, mode)
                .with_context(|| format!("loading grammar {}", path.display()))?
        }
        None => assistant_registry().context("loading the assistant grammar")?,
    };
    tracing::debug!(commands = registry.len(), "grammar loaded");

    let detector = Detector::new(registry);
    let sentence = args.sentence.join(" ");
    println!(
        "{}",
        detector.detect_to_string(&sentence, args.collapse, !args.keep_consumed, &args.carry)
    );
    Ok(())
}
