//! Input and output: point files in, rendered hierarchies out.

pub mod input;
pub mod output;

pub use input::{load_points, parse_points};
pub use output::{create_writer, HierarchyReport, OutputFormat, OutputWriter};
