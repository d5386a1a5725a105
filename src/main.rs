use clap::Parser;
use synten_core::{Cli, Commands, extend_clusters_process};

fn main() {
    let args = Cli::parse();

    let result = match args.command {
        Commands::ExtendClusters(cmd_args) => extend_clusters_process(cmd_args),
    };

    if let Err(e) = result {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
