use anyhow::Result;
use clap::Parser;
use fraclus::cli::{Cli, Commands};
use fraclus::commands::{init_config, run_clustering, ClusterOptions};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Cluster {
            input,
            format,
            output,
            supporters,
            metric,
            config,
            quiet,
        } => run_clustering(ClusterOptions {
            input,
            format,
            output,
            supporters,
            metric,
            config,
            quiet,
        }),
        Commands::Init { force } => init_config(force),
    }
}
