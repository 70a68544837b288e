use clap::Args;
use dnavault_core::constraints::Motif;
use std::path::PathBuf;

use crate::defaults;

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Files to encode
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the generated record files
    #[arg(short, long, default_value = defaults::OUT_DIR)]
    pub out_dir: PathBuf,

    /// Reed-Solomon parity bytes per block
    ///
    /// Defaults to 10, or the value in --config. Up to nsym/2 corrupted bytes
    /// per block are corrected on decode.
    #[arg(short, long)]
    pub nsym: Option<u8>,

    /// Run the repair pass when the mapper leaves constraint violations
    ///
    /// Offsets are recomputed so the output stays decodable.
    #[arg(long)]
    pub repair: bool,

    /// Random seed for the repair pass
    #[arg(long)]
    pub seed: Option<u64>,

    /// Motifs to report on (defaults to the profile's forbidden motifs)
    ///
    /// Only affects the compliance report, never the mapping itself.
    #[arg(long, num_args = 1..)]
    pub motifs: Vec<Motif>,

    /// JSON pipeline configuration; command-line flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Record file produced by `encode`
    pub input: PathBuf,

    /// Output path
    ///
    /// Defaults to the stored filename inside the output directory. A path
    /// without an extension gets one guessed from the decoded bytes.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Reed-Solomon parity bytes per block (default: read from the record)
    #[arg(short, long)]
    pub nsym: Option<u8>,
}

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Record file to audit
    pub input: PathBuf,

    /// Motifs to report on (defaults to the profile's forbidden motifs)
    #[arg(long, num_args = 1..)]
    pub motifs: Vec<Motif>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// JSON pipeline configuration whose constraint profile is audited
    ///
    /// Without it the default profile is used (runs of at most 2, GC 40-60%).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
