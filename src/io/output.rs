//! Result writers for the cluster hierarchy.

use crate::core::Cluster;
use crate::database::VectorDatabase;
use crate::hierarchy::Hierarchy;
use crate::metric::MetricKind;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::*;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Flat, serializable view of one cluster.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterRecord {
    pub id: usize,
    pub level: usize,
    pub label: String,
    pub members: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<(usize, usize)>,
    pub parents: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl ClusterRecord {
    fn from_cluster(cluster: &Cluster) -> Self {
        Self {
            id: cluster.id().0,
            level: cluster.level(),
            label: cluster.label().to_string(),
            members: cluster.members().iter().map(|m| m.0).collect(),
            children: cluster.children().map(|(a, b)| (a.0, b.0)),
            parents: cluster.parents().iter().map(|p| p.0).collect(),
            cost: cluster.cost(),
        }
    }
}

/// Serializable snapshot of a full clustering run.
#[derive(Debug, Clone, Serialize)]
pub struct HierarchyReport {
    pub generated: DateTime<Utc>,
    pub metric: String,
    pub supporters: usize,
    pub point_count: usize,
    pub merge_count: usize,
    pub root: usize,
    pub clusters: Vec<ClusterRecord>,
}

impl HierarchyReport {
    pub fn from_hierarchy<D: VectorDatabase>(
        hierarchy: &Hierarchy<'_, D>,
        metric: MetricKind,
        supporters: usize,
    ) -> Self {
        Self {
            generated: Utc::now(),
            metric: metric.as_str().to_string(),
            supporters,
            point_count: hierarchy.point_count(),
            merge_count: hierarchy.merge_count(),
            root: hierarchy.root().id().0,
            clusters: hierarchy
                .clusters()
                .iter()
                .map(ClusterRecord::from_cluster)
                .collect(),
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &HierarchyReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &HierarchyReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Renders the dendrogram as an indented tree, root first.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_node(
        &mut self,
        report: &HierarchyReport,
        id: usize,
        prefix: &str,
        connector: &str,
    ) -> anyhow::Result<()> {
        let record = &report.clusters[id];
        let name = match record.children {
            None => format!("point {}", record.members[0]).green(),
            Some(_) => {
                let cost = record
                    .cost
                    .map(|c| format!(", cost {c:.4}"))
                    .unwrap_or_default();
                format!(
                    "level {} ({} points{cost})",
                    record.level,
                    record.members.len()
                )
                .cyan()
            }
        };
        writeln!(self.writer, "{prefix}{connector}{name}")?;
        if let Some((a, b)) = record.children {
            let extension = match connector {
                "" => "",
                "└─ " => "   ",
                _ => "│  ",
            };
            let child_prefix = format!("{prefix}{extension}");
            self.write_node(report, a, &child_prefix, "├─ ")?;
            self.write_node(report, b, &child_prefix, "└─ ")?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &HierarchyReport) -> anyhow::Result<()> {
        let header = format!(
            "fraclus: {} points, {} merges, metric={}, k={}",
            report.point_count, report.merge_count, report.metric, report.supporters
        );
        writeln!(self.writer, "{}", header.bold())?;
        self.write_node(report, report.root, "", "")?;
        Ok(())
    }
}

/// Build a boxed writer for the requested format, targeting a file when an
/// output path is given and stdout otherwise.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}
