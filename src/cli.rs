use crate::io::output::OutputFormat;
use crate::metric::MetricKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fraclus")]
#[command(about = "Fractal-dimension based hierarchical agglomerative clustering", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cluster a point file into a full merge hierarchy
    Cluster {
        /// Point file (one vector per line)
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of supporters for the fractal dimension estimate (>= 2)
        #[arg(short = 'k', long)]
        supporters: Option<usize>,

        /// Linkage metric
        #[arg(long, value_enum)]
        metric: Option<MetricKind>,

        /// Configuration file (defaults to .fraclus.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long, env = "FRACLUS_QUIET")]
        quiet: bool,
    },

    /// Create a default .fraclus.toml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
