use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use headsync::{build, filter_elements, Child, Head, HeadDescriptor, MemoryHead};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "headsync",
    version,
    about = "Build head descriptors from element trees"
)]
struct Cli {
    /// Log lifecycle events (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the descriptor for one render document
    Build(Io),
    /// Drive a component through a list of render documents, then unmount it
    Replay(Io),
}

#[derive(Debug, Args)]
struct Io {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

/// One render pass: the component's children and its title template
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RenderDocument {
    #[serde(default)]
    title_template: Option<String>,
    #[serde(default)]
    children: Vec<Child>,
}

/// Head manager contents after one replay step
#[derive(Debug, Serialize)]
struct Snapshot {
    after: String,
    entries: Vec<EntrySnapshot>,
}

#[derive(Debug, Serialize)]
struct EntrySnapshot {
    id: u64,
    descriptor: HeadDescriptor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build(io) => {
            let input = read_input(&io.input)?;
            let output = build_command(&input)?;
            write_output(&io.output, output.as_bytes())
        }
        Command::Replay(io) => {
            let input = read_input(&io.input)?;
            let output = replay_command(&input)?;
            write_output(&io.output, output.as_bytes())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn build_command(input: &str) -> Result<String> {
    let document: RenderDocument =
        serde_json::from_str(input).context("input is not a render document")?;
    let elements = filter_elements(&document.children);
    debug!(
        children = document.children.len(),
        elements = elements.len(),
        "building descriptor"
    );

    let descriptor = build(&elements, document.title_template.as_deref());
    let mut output =
        serde_json::to_string_pretty(&descriptor).context("failed to serialize descriptor")?;
    output.push('\n');
    Ok(output)
}

fn replay_command(input: &str) -> Result<String> {
    let frames: Vec<RenderDocument> =
        serde_json::from_str(input).context("input is not a list of render documents")?;
    if frames.is_empty() {
        bail!("replay needs at least one render document");
    }

    let manager = MemoryHead::new();
    let mut head = Head::new(manager.clone());
    let mut snapshots = Vec::with_capacity(frames.len() + 1);

    for (index, frame) in frames.into_iter().enumerate() {
        let children: Arc<[Child]> = Arc::from(frame.children);
        head.render(&children, frame.title_template.as_deref())
            .with_context(|| format!("render {index} failed"))?;
        head.commit()
            .with_context(|| format!("commit {index} failed"))?;
        info!(frame = index, entries = manager.len(), "frame committed");
        snapshots.push(snapshot(&manager, format!("render {index}")));
    }

    head.unmount().context("unmount failed")?;
    snapshots.push(snapshot(&manager, "unmount".to_owned()));

    let mut output =
        serde_json::to_string_pretty(&snapshots).context("failed to serialize snapshots")?;
    output.push('\n');
    Ok(output)
}

fn snapshot(manager: &MemoryHead, after: String) -> Snapshot {
    let entries = manager
        .entries()
        .into_iter()
        .map(|(id, descriptor)| EntrySnapshot {
            id: id.0,
            descriptor: HeadDescriptor::clone(&descriptor),
        })
        .collect();
    Snapshot { after, entries }
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
