use crate::datastructures::BitSet;
use crate::error::BoolwError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    First,
    Second,
}

/// Structural variant of a [`BitGraph`](crate::graph::BitGraph).
///
/// The bipartite variants carry their vertex partition; every edge has to
/// cross it. For `ConvexBipartite` the neighbors of each vertex of `group2`
/// additionally form a run of consecutive vertex ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphKind {
    Plain,
    Bipartite { group1: BitSet, group2: BitSet },
    ConvexBipartite { group1: BitSet, group2: BitSet },
}

impl Default for GraphKind {
    fn default() -> Self {
        Self::Plain
    }
}

/// True iff `run` is empty or holds every id between its lowest and highest
/// member.
pub(crate) fn is_convex_run(run: BitSet) -> bool {
    match run.index() {
        Some(lo) => run == BitSet::range(lo, run.span()),
        None => true,
    }
}

impl GraphKind {
    pub fn groups(&self) -> Option<(BitSet, BitSet)> {
        match *self {
            GraphKind::Plain => None,
            GraphKind::Bipartite { group1, group2 }
            | GraphKind::ConvexBipartite { group1, group2 } => Some((group1, group2)),
        }
    }

    pub fn is_bipartite(&self) -> bool {
        self.groups().is_some()
    }

    fn with_groups(&self, group1: BitSet, group2: BitSet) -> Self {
        match self {
            GraphKind::Plain => GraphKind::Plain,
            GraphKind::Bipartite { .. } => GraphKind::Bipartite { group1, group2 },
            GraphKind::ConvexBipartite { .. } => GraphKind::ConvexBipartite { group1, group2 },
        }
    }

    /// Records newly added vertices in their group.
    pub(crate) fn assign(&mut self, vertices: BitSet, group: Option<Group>) -> Result<(), BoolwError> {
        match (self.groups(), group) {
            (None, None) => Ok(()),
            (None, Some(_)) => Err(BoolwError::invalid(
                "plain graphs do not partition their vertices into groups",
            )),
            (Some(_), None) => Err(BoolwError::invalid(format!(
                "no group given for {} in a bipartite graph",
                vertices
            ))),
            (Some((group1, group2)), Some(Group::First)) => {
                *self = self.with_groups(group1.union(vertices), group2);
                Ok(())
            }
            (Some((group1, group2)), Some(Group::Second)) => {
                *self = self.with_groups(group1, group2.union(vertices));
                Ok(())
            }
        }
    }

    /// Restriction of the partition to `vertices`.
    pub(crate) fn restrict(&self, vertices: BitSet) -> Self {
        match self.groups() {
            None => GraphKind::Plain,
            Some((group1, group2)) => {
                self.with_groups(group1.intersect(vertices), group2.intersect(vertices))
            }
        }
    }

    /// Validation hook consulted by `connect`. `neighborhood` yields the
    /// current neighborhood of a vertex.
    pub(crate) fn validate_edge<F: Fn(usize) -> BitSet>(
        &self,
        v: usize,
        w: usize,
        neighborhood: F,
    ) -> Result<(), BoolwError> {
        match *self {
            GraphKind::Plain => Ok(()),
            GraphKind::Bipartite { group1, group2 } => {
                crossing(group1, group2, v, w).map(|_| ())
            }
            GraphKind::ConvexBipartite { group1, group2 } => {
                let (a, b) = crossing(group1, group2, v, w)?;
                let run = neighborhood(b)
                    .intersect(group1)
                    .union(BitSet::singleton(a));
                if is_convex_run(run) {
                    Ok(())
                } else {
                    Err(BoolwError::invalid(format!(
                        "edge ({}, {}) breaks the convex neighborhood of {}",
                        v, w, b
                    )))
                }
            }
        }
    }
}

/// Orders an edge as `(group1 end, group2 end)`.
fn crossing(group1: BitSet, group2: BitSet, v: usize, w: usize) -> Result<(usize, usize), BoolwError> {
    if group1.contains(v) && group2.contains(w) {
        Ok((v, w))
    } else if group2.contains(v) && group1.contains(w) {
        Ok((w, v))
    } else {
        Err(BoolwError::invalid(format!(
            "edge ({}, {}) does not cross the bipartition",
            v, w
        )))
    }
}
