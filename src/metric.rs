//! Linkage metrics: the pluggable cost functions driving merge selection.

use crate::core::Cluster;
use crate::database::{PointId, VectorDatabase};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Cost function over two clusters.
///
/// Implementations must be pure: identical inputs always produce the same
/// cost, and clusters are never mutated. The engine treats the returned
/// scalar as an opaque, total-ordered cost and never selects a non-finite
/// value.
pub trait LinkageMetric {
    fn cost<D: VectorDatabase>(&self, first: &Cluster, second: &Cluster, database: &D) -> f64;
}

/// Metric selectable from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Supporter-based fractal dimension estimate of the combined cluster
    #[default]
    FractalDimension,
    /// Euclidean distance between cluster centroids
    Centroid,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::FractalDimension => "fractal-dimension",
            MetricKind::Centroid => "centroid",
        }
    }
}

/// Fractal dimension estimate from `k` nearest supporters.
///
/// The cost of merging two clusters is a correlation-dimension estimate of
/// the neighborhood of the combined centroid: take the `k` database points
/// nearest the centroid (the supporters) and fit the slope of `ln(rank)`
/// against `ln(distance)` by least squares. Clusters lying on a common
/// low-dimensional manifold keep the estimate small, so the engine prefers
/// merges that do not inflate the local dimension.
///
/// Degenerate geometry (all supporters coincident with the centroid, or
/// all at the same radius) yields a non-finite cost, which the engine
/// never selects.
#[derive(Debug, Clone)]
pub struct FractalDimension {
    supporters: usize,
}

impl FractalDimension {
    pub fn new(supporters: usize) -> Self {
        Self { supporters }
    }
}

impl LinkageMetric for FractalDimension {
    fn cost<D: VectorDatabase>(&self, first: &Cluster, second: &Cluster, database: &D) -> f64 {
        let combined: Vec<PointId> = first
            .members()
            .iter()
            .chain(second.members())
            .copied()
            .collect();
        let Some(center) = centroid(&combined, database) else {
            return f64::NAN;
        };
        // Coincident points carry no slope information and are skipped.
        let mut distances: Vec<f64> = database
            .ids()
            .into_iter()
            .filter_map(|id| database.point(id))
            .map(|point| euclidean(point, &center))
            .filter(|d| *d > 0.0)
            .collect();
        distances.sort_by(f64::total_cmp);
        distances.truncate(self.supporters);
        if distances.len() < 2 {
            return f64::NAN;
        }
        log_log_slope(&distances)
    }
}

/// Euclidean distance between the two clusters' centroids.
#[derive(Debug, Clone, Copy, Default)]
pub struct CentroidDistance;

impl LinkageMetric for CentroidDistance {
    fn cost<D: VectorDatabase>(&self, first: &Cluster, second: &Cluster, database: &D) -> f64 {
        match (
            centroid(first.members(), database),
            centroid(second.members(), database),
        ) {
            (Some(a), Some(b)) => euclidean(&a, &b),
            _ => f64::NAN,
        }
    }
}

/// Least-squares slope of `ln(rank)` over `ln(distance)` for ascending
/// distances; the standard correlation-dimension regression.
fn log_log_slope(distances: &[f64]) -> f64 {
    let n = distances.len() as f64;
    let xs = distances.iter().map(|d| d.ln());
    let ys = (1..=distances.len()).map(|rank| (rank as f64).ln());
    let mean_x = xs.clone().sum::<f64>() / n;
    let mean_y = ys.clone().sum::<f64>() / n;
    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, y) in xs.zip(ys) {
        covariance += (x - mean_x) * (y - mean_y);
        variance += (x - mean_x) * (x - mean_x);
    }
    covariance / variance
}

/// Mean of the member vectors; `None` when a member has no point.
fn centroid<D: VectorDatabase>(members: &[PointId], database: &D) -> Option<Vec<f64>> {
    let mut sum: Option<Vec<f64>> = None;
    let mut count = 0usize;
    for &id in members {
        let point = database.point(id)?;
        match &mut sum {
            None => sum = Some(point.to_vec()),
            Some(acc) => {
                for (a, x) in acc.iter_mut().zip(point) {
                    *a += x;
                }
            }
        }
        count += 1;
    }
    let mut acc = sum?;
    for a in &mut acc {
        *a /= count as f64;
    }
    Some(acc)
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
