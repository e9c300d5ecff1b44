//! `jsson` CLI: check, re-dump, inspect and binary-pack JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a document (prints "ok", exits non-zero with the error otherwise)
//! jsson check -i data.json
//!
//! # Re-emit as canonical compact JSON (stdin → stdout)
//! echo '{ "name": "Alice", "age": 30 }' | jsson dump
//!
//! # Reject repeated keys and \u0000 escapes, cap nesting at 32 levels
//! jsson --reject-duplicates --no-nul --max-depth 32 check -i data.json
//!
//! # Node counts, nesting depth and sizes
//! jsson stats -i data.json
//!
//! # Pack a scalar into its binary unit (hex) and back
//! echo '"example"' | jsson pack            # 73000000076578616d706c65
//! echo '73000000076578616d706c65' | jsson unpack
//!
//! # Validate raw bytes as UTF-8
//! jsson utf8 -i notes.txt
//! ```
//!
//! Set `RUST_LOG` (or pass `-v`) to see parser diagnostics on stderr.

use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jsson_core::pack::{pack, unpack, BinaryType};
use jsson_core::{
    dump, dump_file, parse_bytes_with_options, parse_file_with_options, utf8, ErrorCode, Object,
    ParseOptions, Value, ValueType,
};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jsson", version, about = "Strict JSON checker, dumper and binary packer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log parser diagnostics at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Maximum nesting depth of arrays and objects
    #[arg(long, global = true, default_value_t = jsson_core::options::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Fail on objects that repeat a key instead of keeping the last value
    #[arg(long, global = true)]
    reject_duplicates: bool,

    /// Fail on \u0000 escapes in strings and keys
    #[arg(long, global = true)]
    no_nul: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the input and report whether it is valid JSON
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Parse the input and write it back as canonical compact JSON
    Dump {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show node counts, nesting depth and sizes
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Pack a scalar JSON value into a binary unit, printed as hex
    Pack {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Tag to pack under (defaults to the value's own type)
        #[arg(short = 't', long = "type", value_enum)]
        tag: Option<PackType>,
    },
    /// Decode hex-encoded binary units, one JSON value per line
    Unpack {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check that the raw input bytes are well-formed UTF-8
    Utf8 {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

/// Tags selectable with `pack --type`.
#[derive(Clone, Copy, ValueEnum)]
enum PackType {
    Integer,
    Real,
    Boolean,
    String,
    Null,
}

impl From<PackType> for BinaryType {
    fn from(tag: PackType) -> Self {
        match tag {
            PackType::Integer => BinaryType::Integer,
            PackType::Real => BinaryType::Real,
            PackType::Boolean => BinaryType::Boolean,
            PackType::String => BinaryType::String,
            PackType::Null => BinaryType::Null,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ParseOptions::new()
        .max_depth(cli.max_depth)
        .reject_duplicate_keys(cli.reject_duplicates)
        .allow_nul(!cli.no_nul);
    debug!(?options, "parser configured");

    match cli.command {
        Commands::Check { input } => {
            load_value(input.as_deref(), &options)?;
            println!("ok");
        }
        Commands::Dump { input, output } => {
            let value = load_value(input.as_deref(), &options)?;
            match output {
                Some(path) => dump_file(&value, &path)
                    .with_context(|| format!("Failed to write file: {}", path))?,
                None => println!("{}", dump(&value)),
            }
        }
        Commands::Stats { input } => {
            let bytes = read_input(input.as_deref())?;
            let value = parse_bytes_with_options(&bytes, &options)
                .with_context(|| format!("Invalid JSON in {}", source_name(input.as_deref())))?;
            let stats = TreeStats::collect(&value);
            let compact = dump(&value).len();

            println!("Input size:    {} bytes", bytes.len());
            println!("Compact size:  {} bytes", compact);
            println!("Max depth:     {}", stats.max_depth);
            println!("Nodes:         {}", stats.total());
            for (ty, count) in stats.counts() {
                println!("  {:<12}{}", format!("{ty}:"), count);
            }
        }
        Commands::Pack { input, output, tag } => {
            let value = load_value(input.as_deref(), &options)?;
            let ty = match tag {
                Some(tag) => BinaryType::from(tag),
                None => match BinaryType::of(&value) {
                    Some(ty) => ty,
                    None => bail!("Only scalar values can be packed, found {}", value.value_type()),
                },
            };
            let unit = pack(ty, &value).with_context(|| format!("Failed to pack value as {ty}"))?;
            write_output(output.as_deref(), &format!("{}\n", hex::encode(unit)))?;
        }
        Commands::Unpack { input, output } => {
            let raw = read_input(input.as_deref())?;
            let text = String::from_utf8(raw).context("Hex input is not valid UTF-8")?;
            let digits: String = text.split_whitespace().collect();
            let bytes = hex::decode(&digits).context("Input is not valid hex")?;

            let mut lines = String::new();
            let mut position = 0;
            while position < bytes.len() {
                let value = unpack_unit(&bytes, &mut position)?;
                lines.push_str(&dump(&value));
                lines.push('\n');
            }
            write_output(output.as_deref(), &lines)?;
        }
        Commands::Utf8 { input } => {
            let bytes = read_input(input.as_deref())?;
            let mut index = 0;
            let mut chars = 0usize;
            while utf8::decode(&bytes, &mut index).is_some() {
                chars += 1;
            }
            if index < bytes.len() {
                bail!("Invalid UTF-8 at byte {}", index);
            }
            println!("valid UTF-8: {} bytes, {} code points", bytes.len(), chars);
        }
    }

    Ok(())
}

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Decode the unit at `position`. Error units become `{"error":n,"message":...}`.
fn unpack_unit(bytes: &[u8], position: &mut usize) -> Result<Value> {
    let start = *position;
    match unpack::<ErrorCode>(bytes, position) {
        Ok(code) => {
            let mut obj = Object::new();
            obj.insert("error", code.as_u32());
            obj.insert("message", code.message());
            Ok(Value::Object(obj))
        }
        Err(e) if e.code() == ErrorCode::WrongType => unpack::<Value>(bytes, position)
            .with_context(|| format!("Failed to unpack unit at byte {}", start)),
        Err(e) => Err(e).with_context(|| format!("Failed to unpack unit at byte {}", start)),
    }
}

/// Per-type node counts and container nesting depth of a tree.
#[derive(Default)]
struct TreeStats {
    nulls: usize,
    booleans: usize,
    integers: usize,
    reals: usize,
    strings: usize,
    arrays: usize,
    objects: usize,
    max_depth: usize,
}

impl TreeStats {
    fn collect(value: &Value) -> Self {
        let mut stats = Self::default();
        stats.visit(value, 0);
        stats
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        match value {
            Value::Null => self.nulls += 1,
            Value::Boolean(_) => self.booleans += 1,
            Value::Integer(_) => self.integers += 1,
            Value::Real(_) => self.reals += 1,
            Value::String(_) => self.strings += 1,
            Value::Array(arr) => {
                self.arrays += 1;
                self.max_depth = self.max_depth.max(depth + 1);
                for item in arr {
                    self.visit(item, depth + 1);
                }
            }
            Value::Object(obj) => {
                self.objects += 1;
                self.max_depth = self.max_depth.max(depth + 1);
                for item in obj.values() {
                    self.visit(item, depth + 1);
                }
            }
        }
    }

    fn counts(&self) -> [(ValueType, usize); 7] {
        [
            (ValueType::Null, self.nulls),
            (ValueType::Boolean, self.booleans),
            (ValueType::Integer, self.integers),
            (ValueType::Real, self.reals),
            (ValueType::String, self.strings),
            (ValueType::Array, self.arrays),
            (ValueType::Object, self.objects),
        ]
    }

    fn total(&self) -> usize {
        self.counts().iter().map(|(_, n)| n).sum()
    }
}

fn source_name(path: Option<&str>) -> &str {
    path.unwrap_or("<stdin>")
}

/// Parse the input file (or stdin) with `options`.
fn load_value(path: Option<&str>, options: &ParseOptions) -> Result<Value> {
    match path {
        Some(path) => parse_file_with_options(path, options)
            .with_context(|| format!("Invalid JSON in {}", path)),
        None => {
            let bytes = read_input(None)?;
            parse_bytes_with_options(&bytes, options)
                .with_context(|| format!("Invalid JSON in {}", source_name(None)))
        }
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            io::stdout()
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
