//! Core data model: cluster nodes and the shared error taxonomy.

pub mod cluster;
pub mod errors;

pub use cluster::{Cluster, ClusterId};
pub use errors::{FraclusError, Result};
