//! Fractal-dimension based hierarchical agglomerative clustering.
//!
//! Starting from one singleton cluster per input point, the engine
//! repeatedly merges the pair of live clusters with the minimal linkage
//! cost until a single root remains, recording the full merge history as
//! a dendrogram. The linkage metric is pluggable; the default estimates a
//! fractal dimension from a configurable number of nearest-neighbor
//! supporters.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod database;
pub mod engine;
pub mod hierarchy;
pub mod io;
pub mod metric;
pub mod progress;

// Re-export commonly used types
pub use crate::core::{Cluster, ClusterId, FraclusError};
pub use crate::database::{InMemoryDatabase, PointId, VectorDatabase};
pub use crate::engine::AgglomerationEngine;
pub use crate::hierarchy::Hierarchy;
pub use crate::io::output::{create_writer, HierarchyReport, OutputFormat, OutputWriter};
pub use crate::metric::{CentroidDistance, FractalDimension, LinkageMetric, MetricKind};
