// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Command-line interface for the snmpgen binary.
//!
//! The CLI compiles a generator file and a MIB tree into exporter
//! configuration and can dump the normalized tree for inspection.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use clap::{ArgAction, Args, Parser, Subcommand};
use snmpgen::{
    Error, ExporterConfig, generate, io_error, load_generator_config, load_tree, prepare_tree,
    render_exporter_config,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const STDOUT: &str = "<stdout>";

/// Compile MIB trees into SNMP exporter configuration.
#[derive(Debug, Parser,)]
#[command(name = "snmpgen", version, about = "Generate SNMP exporter configuration from MIB trees")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Generate exporter modules from a generator file and a MIB tree.
    Generate(GenerateArgs,),
    /// Print the normalized MIB tree as JSON.
    Dump(DumpArgs,),
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `generate` subcommand.
struct GenerateArgs
{
    /// Path to the YAML generator file describing the modules.
    #[arg(long = "config", value_name = "PATH", env = "SNMPGEN_CONFIG")]
    config: PathBuf,

    /// Path to the JSON MIB tree produced by the MIB compiler.
    #[arg(long = "tree", value_name = "PATH", env = "SNMPGEN_TREE")]
    tree: PathBuf,

    /// Destination file for the exporter configuration; stdout when omitted.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf,>,
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `dump` subcommand.
struct DumpArgs
{
    /// Path to the JSON MIB tree produced by the MIB compiler.
    #[arg(long = "tree", value_name = "PATH", env = "SNMPGEN_TREE")]
    tree: PathBuf,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    init_tracing();
    if let Err(error,) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),),)
        .with_writer(io::stderr,)
        .init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from input loading, generation and output.
fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args,) => run_generate(&args,),
        Command::Dump(args,) => run_dump(&args,),
    }
}

fn run_generate(args: &GenerateArgs,) -> Result<(), Error,>
{
    let output = generate_from_paths(&args.config, &args.tree,)?;
    let rendered = render_exporter_config(&output,)?;

    match &args.output {
        Some(path,) => {
            fs::write(path, rendered,).map_err(|source| io_error(path, source,),)?;
            info!("Wrote {} modules to {}", output.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.as_bytes(),)
                .map_err(|source| io_error(Path::new(STDOUT,), source,),)?;
        }
    }

    Ok((),)
}

fn generate_from_paths(config: &Path, tree: &Path,) -> Result<ExporterConfig, Error,>
{
    let config = load_generator_config(config,)?;
    let tree = load_tree(tree,)?;
    generate(&config, &tree,)
}

fn run_dump(args: &DumpArgs,) -> Result<(), Error,>
{
    let tree = load_tree(&args.tree,)?;
    let normalized = prepare_tree(&tree,)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_tree(&mut handle, &normalized, args.pretty,)
}

fn write_tree<W: io::Write,>(writer: &mut W, tree: &snmpgen::Node, pretty: bool,) -> Result<(), Error,>
{
    let written = if pretty {
        serde_json::to_writer_pretty(writer, tree,)
    } else {
        serde_json::to_writer(writer, tree,)
    };

    written.map_err(|source| io_error(Path::new(STDOUT,), source.into(),),)
}
