//! A thin CLI harness over the `ion-hash` library: reads an already
//! decoded event stream (or a small text-literal value) and prints the
//! resulting digest in hex, in the spirit of `ion-cli`'s `inspect`
//! subcommand.

mod decode;

use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use ion_hash::provider::DigestHashFunctionProvider;
use ion_hash::{hash_value, Event, EventKind, HashDriver, HashFunctionProvider};
use sha2::{Sha256, Sha384, Sha512};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Algorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    /// One line per driver event; see `decode::parse_event_lines`.
    Events,
    /// A small literal-value grammar; see `decode::parse_text_value`.
    Text,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Events => "events",
            Format::Text => "text",
        };
        f.write_str(name)
    }
}

/// Computes the Ion Hash digest of an Ion value.
#[derive(Parser, Debug)]
#[command(name = "ion-hash", about, version)]
struct Args {
    /// Hash function to use.
    #[arg(long, value_enum, default_value_t = Algorithm::Sha256)]
    algorithm: Algorithm,

    /// Input file [default: STDIN]
    #[arg(long, short)]
    input: Option<String>,

    /// How the input is encoded.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = read_input(args.input.as_deref())?;
    let digest = compute_digest(&args, &input)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "{}", hex_string(&digest).green())?;
    Ok(())
}

/// Reads the input file, or -- if none was given -- copies STDIN into a
/// temp file first, exactly as `ion-cli`'s `inspect` command does, since
/// the underlying parsers here want a str slice rather than a stream.
fn read_input(path: Option<&str>) -> Result<String> {
    let mut contents = String::new();
    if let Some(path) = path {
        contents = fs::read_to_string(path).with_context(|| format!("could not open '{}'", path))?;
    } else {
        let mut temp = tempfile::tempfile()
            .context("failed to create a temporary file to buffer STDIN")?;
        io::copy(&mut io::stdin(), &mut temp).context("failed to copy STDIN to a temp file")?;
        use std::io::Seek;
        temp.seek(io::SeekFrom::Start(0))
            .context("failed to rewind the STDIN temp file")?;
        temp.read_to_string(&mut contents)
            .context("STDIN did not contain valid UTF-8")?;
    }
    Ok(contents)
}

fn compute_digest(args: &Args, input: &str) -> Result<Vec<u8>> {
    match args.algorithm {
        Algorithm::Sha256 => hash_with(args.format, input, DigestHashFunctionProvider::<Sha256>::new()),
        Algorithm::Sha384 => hash_with(args.format, input, DigestHashFunctionProvider::<Sha384>::new()),
        Algorithm::Sha512 => hash_with(args.format, input, DigestHashFunctionProvider::<Sha512>::new()),
    }
}

/// Parses `input` according to `format` and drives it through `provider`,
/// monomorphized per algorithm by `compute_digest`'s match arms -- a trait
/// object isn't an option here since `hash_value`/`drive_events` are
/// generic over `HashFunctionProvider`, not dyn-compatible.
fn hash_with<P: HashFunctionProvider>(format: Format, input: &str, provider: P) -> Result<Vec<u8>> {
    match format {
        Format::Text => {
            let value = decode::parse_text_value(input).context("failed to parse --format text input")?;
            log::debug!("parsed a {:?} value tree", value.value);
            Ok(hash_value(&value, provider)?)
        }
        Format::Events => {
            let events = decode::parse_event_lines(input).context("failed to parse --format events input")?;
            log::debug!("parsed {} events", events.len());
            Ok(drive_events(provider, &events)?)
        }
    }
}

fn drive_events<P: HashFunctionProvider>(
    provider: P,
    events: &[Event],
) -> ion_hash::IonHashResult<Vec<u8>> {
    let mut driver = HashDriver::new(provider);
    for event in events {
        log::trace!("{:?}", event);
        match event.kind {
            EventKind::ContainerStart => driver.step_in(event)?,
            EventKind::ContainerEnd => driver.step_out()?,
            EventKind::StreamEnd => {}
            EventKind::Scalar => driver.scalar(event)?,
        }
    }
    driver.digest()
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
