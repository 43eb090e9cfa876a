//! The `cluster` command: load points, agglomerate, render the hierarchy.

use crate::config::FraclusConfig;
use crate::database::{InMemoryDatabase, VectorDatabase};
use crate::engine::AgglomerationEngine;
use crate::io::input::load_points;
use crate::io::output::{create_writer, HierarchyReport, OutputFormat};
use crate::metric::{CentroidDistance, FractalDimension, LinkageMetric, MetricKind};
use crate::progress::{ProgressConfig, TEMPLATE_AGGLOMERATION};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::info;
use std::path::PathBuf;

/// Options assembled from the CLI, completed from the configuration file.
pub struct ClusterOptions {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub supporters: Option<usize>,
    pub metric: Option<MetricKind>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

pub fn run_clustering(options: ClusterOptions) -> Result<()> {
    let config = FraclusConfig::load(options.config.as_deref())?;
    let supporters = options.supporters.unwrap_or(config.supporters);
    let metric = options.metric.unwrap_or(config.metric);

    let database = load_points(&options.input)
        .with_context(|| format!("failed to load points from {}", options.input.display()))?;
    info!(
        "loaded {} points of dimension {}",
        database.len(),
        database.dimensions()
    );

    let progress = ProgressConfig::from_env(options.quiet);
    let bar = progress.create_bar(
        database.len().saturating_sub(1) as u64,
        TEMPLATE_AGGLOMERATION,
    );
    bar.set_message("agglomerating");

    let report = match metric {
        MetricKind::FractalDimension => {
            let engine = AgglomerationEngine::new(FractalDimension::new(supporters), supporters)?;
            run_engine(&engine, &database, &bar, metric)?
        }
        MetricKind::Centroid => {
            let engine = AgglomerationEngine::new(CentroidDistance, supporters)?;
            run_engine(&engine, &database, &bar, metric)?
        }
    };
    bar.finish_and_clear();
    info!(
        "built {} clusters over {} merges",
        report.clusters.len(),
        report.merge_count
    );

    let mut writer = create_writer(options.format, options.output.as_deref())?;
    writer.write_report(&report)?;
    Ok(())
}

fn run_engine<M: LinkageMetric + Sync>(
    engine: &AgglomerationEngine<M>,
    database: &InMemoryDatabase,
    bar: &ProgressBar,
    metric: MetricKind,
) -> Result<HierarchyReport> {
    let hierarchy =
        engine.run_with_progress(database, |completed, _| bar.set_position(completed as u64))?;
    Ok(HierarchyReport::from_hierarchy(
        &hierarchy,
        metric,
        engine.supporters(),
    ))
}
