//! `sbjson` CLI — compact, query and inspect sandbox JSON messages.
//!
//! Uses the same permissive, non-escaping parser as the sandbox wrappers, so it
//! shows exactly what a child process would see for a given call message.
//!
//! ## Usage
//!
//! ```sh
//! # Compact a call message (stdin → stdout)
//! echo '{ "id": "c1", "params": [1, 2] }' | sbjson compact
//!
//! # Compact from file to file, writing numbers the way C printf("%g") does
//! sbjson compact -i call.json -o call.min.json --numbers printf
//!
//! # Pull one value out by dotted path
//! sbjson get params.items.0 -i call.json
//!
//! # Node counts, depth and size
//! sbjson stats -i call.json
//!
//! # Debug logging
//! RUST_LOG=sandbox_json=trace sbjson compact -i call.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sandbox_json::options::DEFAULT_MAX_DEPTH;
use sandbox_json::{Kind, NumberFormat, ParseOptions, SerializeOptions, Value};
use std::io::{self, Read, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sbjson",
    version,
    about = "Sandbox JSON message CLI (compact, get, stats)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Deepest array/object nesting accepted by the parser
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Number style for output: "shortest" (exact) or "printf" (C %g)
    #[arg(long, global = true, default_value_t = NumberFormat::Shortest)]
    numbers: NumberFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a message and re-serialize it without whitespace
    Compact {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the value at a dotted path such as `params.items.0`
    Get {
        /// Dotted path; numeric segments index arrays
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show node counts, nesting depth and sizes
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let parse_options = ParseOptions::default().with_max_depth(cli.max_depth);
    let serialize_options = SerializeOptions::default().with_number_format(cli.numbers);

    match cli.command {
        Commands::Compact { input, output } => {
            let bytes = read_input(input.as_deref())?;
            let value = sandbox_json::parse_with_options(&bytes, &parse_options)
                .context("Failed to parse JSON input")?;
            let compact = sandbox_json::serialize_with_options(&value, &serialize_options);
            debug!(input = bytes.len(), output = compact.len(), "compacted message");
            write_output(output.as_deref(), &compact)?;
        }
        Commands::Get { path, input } => {
            let bytes = read_input(input.as_deref())?;
            let value = sandbox_json::parse_with_options(&bytes, &parse_options)
                .context("Failed to parse JSON input")?;
            let Some(found) = value.lookup(&path) else {
                anyhow::bail!("No value at path '{}'", path);
            };
            println!(
                "{}",
                sandbox_json::serialize_with_options(found, &serialize_options)
            );
        }
        Commands::Stats { input } => {
            let bytes = read_input(input.as_deref())?;
            let value = sandbox_json::parse_with_options(&bytes, &parse_options)
                .context("Failed to parse JSON input")?;
            let compact = sandbox_json::serialize_with_options(&value, &serialize_options);

            let mut stats = TreeStats::default();
            stats.visit(&value, 0);
            println!("Nodes:      {}", stats.nodes);
            for (kind, count) in stats.by_kind() {
                println!("  {:<9} {}", format!("{kind}:"), count);
            }
            println!("Max depth:  {}", stats.max_depth);
            println!("Input size:   {} bytes", bytes.len());
            println!("Compact size: {} bytes", compact.len());
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for piping. Defaults to warnings only.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Per-kind node counts and maximum container nesting.
#[derive(Default)]
struct TreeStats {
    nodes: usize,
    counts: [usize; 7],
    max_depth: usize,
}

const KINDS: [Kind; 7] = [
    Kind::Null,
    Kind::True,
    Kind::False,
    Kind::Number,
    Kind::String,
    Kind::Array,
    Kind::Object,
];

impl TreeStats {
    fn visit(&mut self, value: &Value<'_>, depth: usize) {
        self.nodes += 1;
        if let Some(slot) = KINDS.iter().position(|k| *k == value.kind()) {
            self.counts[slot] += 1;
        }
        if value.is_container() {
            self.max_depth = self.max_depth.max(depth + 1);
        }
        for child in value.children() {
            self.visit(child, depth + 1);
        }
    }

    /// Kinds that occur at least once, in declaration order.
    fn by_kind(&self) -> impl Iterator<Item = (Kind, usize)> + '_ {
        KINDS
            .iter()
            .zip(self.counts)
            .filter(|(_, count)| *count > 0)
            .map(|(kind, count)| (*kind, count))
    }
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Write the compacted message to `path`, or to stdout without a trailing
/// newline so the bytes match what the library produced.
fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    if let Some(path) = path {
        return std::fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path));
    }
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    stdout.flush().context("Failed to write to stdout")
}
