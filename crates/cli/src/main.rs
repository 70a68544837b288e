mod args;
mod commands;
pub mod defaults;
mod filetype;
mod printing;
mod record;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use args::{AuditArgs, DecodeArgs, EncodeArgs};
use commands::{audit, decode, encode};

/// dnavault: store files in synthesis-friendly DNA sequences
///
/// Files are protected with Reed-Solomon parity, packed into 2-bit symbols
/// and mapped onto nucleotides while avoiding long homopolymers, unstable
/// motifs and extreme GC content.
#[derive(Parser, Debug)]
#[command(name = "dnavault")]
#[command(author, version, about = "Encode files into DNA sequences and back", long_about = None)]
struct Cli {
    /// Number of threads to use when encoding several files
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode one or more files into DNA record files.
    ///
    /// Each input becomes `<out-dir>/<stem>.fasta` holding the sequence, its
    /// offset metadata and the original filename.
    Encode(EncodeArgs),

    /// Decode a record file back into the original bytes.
    Decode(DecodeArgs),

    /// Report constraint compliance of a stored record.
    Audit(AuditArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Encode(args) => encode::encode_files(&args)?,
        Commands::Decode(args) => decode::decode_file(&args)?,
        Commands::Audit(args) => audit::audit_record(&args)?,
    }

    Ok(())
}
