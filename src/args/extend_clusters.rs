//! Command line arguments and validation for `extend-clusters`, following
//! the `AlignerArgs`/`ParsedAlignerArgs` split `aligner` uses: a plain
//! `clap::Args` struct for parsing, and a separate parsed/validated form
//! the process function actually runs on.

use std::path::PathBuf;

use clap::{Args, builder::RangedI64ValueParser, error::ErrorKind};

use crate::args::abort_clap;
use crate::extend::model::SequenceRecord;
use crate::extend::scoring::ScoringContext;
use crate::io::clusters::{ClusterFileEntry, read_cluster_file};
use crate::io::fasta::read_records;

/// The command line arguments for `extend-clusters`.
#[derive(Args, Debug)]
pub struct ExtendClustersArgs {
    /// Path to the FASTA file containing the reference sequence(s)
    pub ref_file: PathBuf,

    /// Path to the FASTA file containing the query sequence(s)
    pub query_file: PathBuf,

    /// Path to the `mgaps`-style synteny/cluster file to extend
    pub clusters_file: PathBuf,

    #[arg(long)]
    /// Output filepath for the delta file. Printed to STDOUT if not provided
    pub delta_out: Option<PathBuf>,

    #[arg(long)]
    /// Output filepath for the (possibly fused) cluster file. Not written if
    /// omitted
    pub cluster_out: Option<PathBuf>,

    #[arg(long, default_value_t = 10_000)]
    /// Maximum number of positions a single backward or forward extension
    /// may span on either strand before being clamped
    pub max_alignment_length: i64,

    #[arg(long, default_value_t = 200)]
    /// Gap length below which a neighbouring cluster or alignment is always
    /// accepted as an extension target
    pub break_len: i64,

    #[arg(long)]
    /// Favor extending all the way to a sequence end over stopping at the
    /// nearest neighbour
    pub to_seqend: bool,

    #[arg(long)]
    /// Re-check every cluster match and alignment boundary after the merge
    /// driver runs, aborting on the first violated invariant
    pub validate: bool,

    #[arg(long, conflicts_with_all = ["matching", "mismatch"])]
    /// Path to a 26x26 whitespace-separated substitution matrix file,
    /// ordered A..Z on both axes. Defaults to a simple DNA match/mismatch
    /// table when omitted
    pub matrix: Option<PathBuf>,

    #[arg(short = 'm', long, value_parser = RangedI64ValueParser::<u8>::new().range(0..=127))]
    /// The score for a match, in [0, 127]. Only used without `--matrix`
    pub matching: Option<u8>,

    #[arg(short = 'x', long, value_parser = RangedI64ValueParser::<u8>::new().range(0..=127))]
    /// The penalty for a mismatch, expressed as a nonnegative value in [0,
    /// 127]. Only used without `--matrix`
    pub mismatch: Option<u8>,

    #[arg(short = 'o', long, default_value_t = 5, value_parser = RangedI64ValueParser::<u8>::new().range(0..=127))]
    /// The penalty for opening a gap in the default extension kernel,
    /// expressed as a nonnegative value in [0, 127]
    pub gap_open: u8,

    #[arg(short = 'e', long, default_value_t = 2, value_parser = RangedI64ValueParser::<u8>::new().range(0..=127))]
    /// The penalty for extending a gap in the default extension kernel,
    /// expressed as a nonnegative value in [0, 127]
    pub gap_extend: u8,
}

/// The parsed and validated configuration options for `extend-clusters`.
pub struct ExtendClustersConfig {
    pub delta_out:    Option<PathBuf>,
    pub cluster_out:  Option<PathBuf>,
    pub validate:     bool,
    pub gap_open:     i32,
    pub gap_extend:   i32,
}

/// The parsed and validated command line arguments for `extend-clusters`.
pub struct ParsedExtendClustersArgs {
    /// Every reference record slurped from `ref_file`
    pub references: Vec<SequenceRecord>,
    /// Every query record slurped from `query_file`
    pub queries:    Vec<SequenceRecord>,
    /// One block per `(A, B)` pair named in the cluster file
    pub entries:    Vec<ClusterFileEntry>,
    /// The process-wide, read-only scoring configuration
    pub scoring:    ScoringContext,
    /// Any additional configuration
    pub config:     ExtendClustersConfig,
}

/// Parses and validates the arguments for `extend-clusters` from the clap
/// struct.
///
/// [`abort_clap`] will be called if `gap_open` is smaller than `gap_extend`
/// (an affine-gap kernel where opening is cheaper than extending produces
/// degenerate, ever-splitting gaps).
///
/// ## Errors
///
/// Any IO errors from opening the reference, query, cluster, or matrix files
/// are propagated, with context containing the offending file path.
pub fn parse_extend_clusters_args(args: ExtendClustersArgs) -> std::io::Result<ParsedExtendClustersArgs> {
    if (args.gap_open as i64) < args.gap_extend as i64 {
        abort_clap(
            ErrorKind::InvalidValue,
            "--gap-open must be greater than or equal to --gap-extend",
            Some("extend-clusters"),
        );
    }

    let references = read_records(&args.ref_file)?;
    let queries = read_records(&args.query_file)?;
    let entries = read_cluster_file(&args.clusters_file)?;

    let scoring = match args.matrix {
        Some(ref path) => ScoringContext::from_matrix_file(path)?,
        None => ScoringContext::from_dna_scores(args.matching.unwrap_or(2) as i32, -(args.mismatch.unwrap_or(5) as i32), false),
    }
    .with_break_len(args.break_len)
    .with_to_seqend(args.to_seqend)
    .with_max_alignment_length(args.max_alignment_length);

    let config = ExtendClustersConfig {
        delta_out: args.delta_out,
        cluster_out: args.cluster_out,
        validate: args.validate,
        gap_open: -(args.gap_open as i32),
        gap_extend: -(args.gap_extend as i32),
    };

    Ok(ParsedExtendClustersArgs { references, queries, entries, scoring, config })
}
