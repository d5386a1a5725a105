#![feature(let_chains)]

use clap::{Parser, Subcommand};

pub mod args;
pub mod extend;
pub mod io;
mod processes;

pub use crate::processes::*;

/// Top-level CLI: one subcommand per sub-program this crate exposes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extend synteny clusters into gapped alignments, emitting delta and
    /// (optionally) fused cluster files.
    ExtendClusters(args::extend_clusters::ExtendClustersArgs),
}
