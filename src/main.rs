//! byte-huffman CLI
//!
//! ```bash
//! byte-huffman compress photo.jpg                  # writes photo.jpg.bin
//! byte-huffman decompress photo.jpg.bin --source photo.jpg
//! byte-huffman inspect notes.txt --tree
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::{error, Level};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::FmtSubscriber;

use byte_huffman::{compress_file, decompress_file, CodecConfig, HuffmanCodec};

#[derive(Parser, Debug)]
#[command(name = "byte-huffman")]
#[command(version)]
#[command(about = "Huffman compressor for arbitrary files", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Also append logs to this file, creating its directory if needed
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress {
        input: PathBuf,

        /// Output path (default: <INPUT>.<compressed_extension>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Decode the artifact before writing it and fail on mismatch
        #[arg(long)]
        verify: bool,
    },

    /// Decompress an artifact; the original file is needed to rebuild the code book
    Decompress {
        input: PathBuf,

        /// The original uncompressed file the artifact was made from
        #[arg(short, long)]
        source: PathBuf,

        /// Output path (default: <decompressed_prefix><SOURCE name> next to INPUT)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the frequency and code tables for a file
    Inspect {
        input: PathBuf,

        /// Also print the tree structure
        #[arg(long)]
        tree: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let log_file = match config.open_log_file() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: failed to open log file: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let ansi = log_file.is_none();
    let writer = match log_file {
        Some(file) => BoxMakeWriter::new(std::io::stderr.and(Mutex::new(file))),
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    match run(args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Config file, then environment, then command-line flags; validated once.
fn load_config(args: &Args) -> byte_huffman::Result<CodecConfig> {
    CodecConfig::resolve(args.config.as_deref(), |config| {
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }
        if let Some(path) = &args.log_file {
            config.log_file = Some(path.clone());
        }
    })
}

fn run(command: Command, config: &CodecConfig) -> byte_huffman::Result<()> {
    match command {
        Command::Compress {
            input,
            output,
            verify,
        } => {
            let output = output.unwrap_or_else(|| config.compressed_path(&input));
            let config = CodecConfig {
                verify: config.verify || verify,
                ..config.clone()
            };
            compress_file(&input, &output, &config)?;
            println!("{}", output.display());
        }
        Command::Decompress {
            input,
            source,
            output,
        } => {
            let output = output.unwrap_or_else(|| config.decompressed_path(&input, &source));
            decompress_file(&input, &source, &output)?;
            println!("{}", output.display());
        }
        Command::Inspect { input, tree } => {
            let codec = HuffmanCodec::from_file(&input)?;
            print_tables(&codec)?;
            if tree {
                match codec.tree() {
                    Some(t) => print!("{}", t.render()),
                    None => println!("(empty input, no tree)"),
                }
            }
        }
    }
    Ok(())
}

fn print_tables(codec: &HuffmanCodec) -> byte_huffman::Result<()> {
    let frequencies = codec.frequencies();
    let book = codec.codebook();

    println!("{:>6}  {:>10}  code", "byte", "count");
    for (byte, code) in book.iter() {
        println!("{:>6}  {:>10}  {}", byte, frequencies.get(byte), code);
    }

    let payload_bits = book.encoded_bits(frequencies)?;
    let artifact_bytes = 1 + payload_bits.div_ceil(8);
    println!(
        "{} bytes, {} distinct, {} payload bits, {} artifact bytes",
        frequencies.total(),
        frequencies.len(),
        payload_bits,
        artifact_bytes
    );
    Ok(())
}
