//! Cluster nodes of the merge hierarchy.

use crate::database::PointId;
use serde::{Deserialize, Serialize};

/// Handle of a cluster in the hierarchy arena; doubles as its creation
/// index, so ids are unique and strictly increasing across a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClusterId(pub usize);

/// A node in the merge hierarchy: either a singleton wrapping one input
/// point or the merge of two earlier clusters.
///
/// Immutable after construction except for `parents`, which gains exactly
/// one entry when the cluster is consumed by a later merge. The field is a
/// collection rather than a single slot to keep the relation general; this
/// engine never appends more than one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: ClusterId,
    members: Vec<PointId>,
    level: usize,
    label: String,
    children: Option<(ClusterId, ClusterId)>,
    parents: Vec<ClusterId>,
    cost: Option<f64>,
}

impl Cluster {
    /// Create a level-0 cluster covering a single input point.
    pub(crate) fn singleton(id: ClusterId, point: PointId) -> Self {
        Self {
            id,
            members: vec![point],
            level: 0,
            label: format!("Level=0_ID={point}"),
            children: None,
            parents: Vec::new(),
            cost: None,
        }
    }

    /// Create the merge of two clusters at the given round.
    ///
    /// The children's member sets are disjoint by the live-set invariant;
    /// the union is kept sorted for stable output.
    pub(crate) fn merge(
        id: ClusterId,
        level: usize,
        first: &Cluster,
        second: &Cluster,
        cost: f64,
    ) -> Self {
        let mut members = Vec::with_capacity(first.members.len() + second.members.len());
        members.extend_from_slice(&first.members);
        members.extend_from_slice(&second.members);
        members.sort_unstable();
        debug_assert!(members.windows(2).all(|w| w[0] < w[1]));
        Self {
            id,
            members,
            level,
            label: format!("Level={level}_[{}+{}]", first.label, second.label),
            children: Some((first.id, second.id)),
            parents: Vec::new(),
            cost: Some(cost),
        }
    }

    pub(crate) fn add_parent(&mut self, parent: ClusterId) {
        self.parents.push(parent);
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Original point identifiers covered by this cluster, sorted.
    pub fn members(&self) -> &[PointId] {
        &self.members
    }

    /// Agglomeration round at which this cluster was created; singletons
    /// are level 0.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Provenance string built from the level and the children's labels.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The two merged children, in selection order; `None` for singletons.
    pub fn children(&self) -> Option<(ClusterId, ClusterId)> {
        self.children
    }

    /// Clusters this one was merged into; at most one for this engine.
    pub fn parents(&self) -> &[ClusterId] {
        &self.parents
    }

    /// Linkage cost that produced this cluster; `None` for singletons.
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn is_singleton(&self) -> bool {
        self.children.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_covers_one_point_at_level_zero() {
        let cluster = Cluster::singleton(ClusterId(3), PointId(7));
        assert_eq!(cluster.id(), ClusterId(3));
        assert_eq!(cluster.members(), &[PointId(7)]);
        assert_eq!(cluster.level(), 0);
        assert_eq!(cluster.label(), "Level=0_ID=7");
        assert!(cluster.is_singleton());
        assert!(cluster.children().is_none());
        assert!(cluster.parents().is_empty());
        assert!(cluster.cost().is_none());
    }

    #[test]
    fn merge_unions_members_sorted() {
        let a = Cluster::singleton(ClusterId(0), PointId(2));
        let b = Cluster::singleton(ClusterId(1), PointId(0));
        let merged = Cluster::merge(ClusterId(2), 1, &a, &b, 0.5);

        assert_eq!(merged.members(), &[PointId(0), PointId(2)]);
        assert_eq!(merged.level(), 1);
        assert_eq!(merged.children(), Some((ClusterId(0), ClusterId(1))));
        assert_eq!(merged.cost(), Some(0.5));
        assert!(!merged.is_singleton());
    }

    #[test]
    fn merge_label_concatenates_children() {
        let a = Cluster::singleton(ClusterId(0), PointId(0));
        let b = Cluster::singleton(ClusterId(1), PointId(1));
        let merged = Cluster::merge(ClusterId(2), 1, &a, &b, 1.0);
        assert_eq!(merged.label(), "Level=1_[Level=0_ID=0+Level=0_ID=1]");
    }

    #[test]
    fn add_parent_appends() {
        let mut cluster = Cluster::singleton(ClusterId(0), PointId(0));
        cluster.add_parent(ClusterId(5));
        assert_eq!(cluster.parents(), &[ClusterId(5)]);
    }
}
