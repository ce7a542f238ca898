//! regkit - command line front end for regkit-core.
//!
//! Passes raw argument lists through to `reg.exe` and exposes the value codec
//! for inspecting how values travel over the wire.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use regkit_core::{
    codec, normalize_path, CommandExecutor, DecodeOptions, RegData, RegError, RegType,
};
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Exit code when the key or value does not exist.
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "regkit")]
#[command(about = "Typed registry access through reg.exe")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run reg.exe with a raw argument list and print its output
    Exec {
        /// Learn the localized "not found" message before running
        #[arg(long)]
        detect: bool,

        /// Arguments passed to reg.exe; key paths (not file names) may use '/'
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the localized "not found" message reg.exe uses
    Detect,

    /// Show the wire text and type a value would be written with
    Encode {
        /// Declared type (e.g. sz, REG_DWORD); inferred when omitted
        #[arg(short = 't', long = "type")]
        value_type: Option<String>,

        /// Shape of the input value
        kind: ValueKind,

        /// Value; several for multi, hex for binary
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Decode wire text of the given type and print it as JSON
    Decode {
        #[arg(short = 't', long = "type")]
        value_type: String,

        /// Convert REG_QWORD text to a number
        #[arg(long)]
        convert_qword: bool,

        wire: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ValueKind {
    String,
    Number,
    Binary,
    Multi,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Commands::Exec { detect, args } => run_exec(detect, args).await,
        Commands::Detect => {
            let marker = CommandExecutor::global().detect_error_messages().await;
            println!("{marker}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Encode {
            value_type,
            kind,
            values,
        } => {
            let declared = RegType::parse_optional(value_type.as_deref())?;
            let value = build_value(kind, values)?;
            let encoded = value.encode(declared);
            println!("{}\t{}", encoded.value_type, encoded.data);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Decode {
            value_type,
            convert_qword,
            wire,
        } => {
            let value_type: RegType = value_type.parse()?;
            let decoded =
                codec::decode_with(&wire, value_type, DecodeOptions { convert_qword })?;
            println!("{}", serde_json::to_string(&decoded)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_exec(detect: bool, args: Vec<String>) -> Result<ExitCode> {
    let executor = CommandExecutor::global();
    if detect {
        let marker = executor.detect_error_messages().await;
        debug!(marker, "not-found message ready");
    }

    let args = normalize_key_args(args);

    match executor.execute(&args).await {
        Ok(Some(stdout)) => {
            print!("{stdout}");
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => {
            info!("key or value not found");
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
        Err(RegError::Tool(err)) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("failed to run reg.exe"),
    }
}

/// Positions of key-path arguments for each reg.exe operation.
///
/// File names (EXPORT, SAVE, IMPORT, ...) are never rewritten.
fn key_arg_positions(operation: &str) -> &'static [usize] {
    match operation.to_uppercase().as_str() {
        "QUERY" | "ADD" | "DELETE" | "UNLOAD" | "FLAGS" | "EXPORT" | "SAVE" | "RESTORE"
        | "LOAD" => &[1],
        "COPY" | "COMPARE" => &[1, 2],
        _ => &[],
    }
}

/// Convert `/` separators in key-path arguments to `\`.
fn normalize_key_args(args: Vec<String>) -> Vec<String> {
    let positions = args
        .first()
        .map(|op| key_arg_positions(op))
        .unwrap_or_default();
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if positions.contains(&i) {
                normalize_path(&arg)
            } else {
                arg
            }
        })
        .collect()
}

fn build_value(kind: ValueKind, values: Vec<String>) -> Result<RegData> {
    if !matches!(kind, ValueKind::Multi) && values.len() != 1 {
        bail!("expected exactly one value, got {}", values.len());
    }
    let first = values.first().cloned().unwrap_or_default();
    let value = match kind {
        ValueKind::String => RegData::from(first),
        ValueKind::Number => RegData::from(
            first
                .parse::<u64>()
                .with_context(|| format!("not a number: {first}"))?,
        ),
        ValueKind::Binary => RegData::from(
            hex::decode(&first).with_context(|| format!("not hex: {first}"))?,
        ),
        ValueKind::Multi => RegData::from(values),
    };
    Ok(value)
}
