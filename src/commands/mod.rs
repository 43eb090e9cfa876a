//! CLI command implementations.

pub mod cluster;
pub mod init;

pub use cluster::{run_clustering, ClusterOptions};
pub use init::init_config;
