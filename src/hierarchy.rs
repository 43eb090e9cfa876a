//! The hierarchy result: the permanent cluster collection and its
//! traversal.

use crate::core::{Cluster, ClusterId};
use crate::database::{PointId, VectorDatabase};

/// Complete merge history of a clustering run: every cluster ever created,
/// in creation order, plus the root and a reference to the source
/// database.
///
/// Read-only after construction; the engine is the sole writer.
#[derive(Debug)]
pub struct Hierarchy<'db, D> {
    clusters: Vec<Cluster>,
    root: ClusterId,
    database: &'db D,
}

impl<'db, D: VectorDatabase> Hierarchy<'db, D> {
    pub(crate) fn new(clusters: Vec<Cluster>, root: ClusterId, database: &'db D) -> Self {
        Self {
            clusters,
            root,
            database,
        }
    }

    /// All clusters in creation order: N singletons followed by N-1
    /// merges.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.0)
    }

    /// The last cluster created; covers the full input id set.
    pub fn root(&self) -> &Cluster {
        &self.clusters[self.root.0]
    }

    pub fn database(&self) -> &'db D {
        self.database
    }

    /// Number of input points (N, for 2N-1 clusters total).
    pub fn point_count(&self) -> usize {
        self.clusters.len() / 2 + 1
    }

    /// Number of merge rounds performed.
    pub fn merge_count(&self) -> usize {
        self.clusters.len() / 2
    }

    /// Members covered by a cluster.
    pub fn members(&self, id: ClusterId) -> Option<&[PointId]> {
        self.get(id).map(|cluster| cluster.members())
    }

    /// The two children of a merged cluster.
    pub fn children(&self, id: ClusterId) -> Option<(&Cluster, &Cluster)> {
        let (a, b) = self.get(id)?.children()?;
        Some((&self.clusters[a.0], &self.clusters[b.0]))
    }

    /// Clusters this cluster was merged into; at most one for this engine.
    pub fn parents(&self, id: ClusterId) -> Vec<&Cluster> {
        self.get(id)
            .map(|cluster| {
                cluster
                    .parents()
                    .iter()
                    .map(|parent| &self.clusters[parent.0])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Level-0 clusters only.
    pub fn singletons(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(|cluster| cluster.is_singleton())
    }
}
