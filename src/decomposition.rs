use crate::booldim::boolean_dimension;
use crate::datastructures::BitSet;
use crate::error::BoolwError;
use crate::graph::BaseGraph;
use crate::objective::Shape;
use std::cmp::max;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecompositionValidationError {
    MissingVertex(usize),
    DuplicateVertex(usize),
    ForeignVertex(usize),
    NotSingleton(usize),
    NotUnion(usize),
    DanglingChild(usize),
    NotConnected,
}

impl Display for DecompositionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            DecompositionValidationError::MissingVertex(v) => write!(f, "Missing Vertex: {}", v),
            DecompositionValidationError::DuplicateVertex(v) => {
                write!(f, "Duplicate Vertex: {}", v)
            }
            DecompositionValidationError::ForeignVertex(v) => write!(f, "Foreign Vertex: {}", v),
            DecompositionValidationError::NotSingleton(id) => {
                write!(f, "Not Singleton: entry {}", id)
            }
            DecompositionValidationError::NotUnion(id) => {
                write!(f, "Not Union Of Children: node {}", id)
            }
            DecompositionValidationError::DanglingChild(id) => {
                write!(f, "Dangling Child: node {}", id)
            }
            DecompositionValidationError::NotConnected => write!(f, "Not Connected"),
        }
    }
}

impl From<DecompositionValidationError> for BoolwError {
    fn from(e: DecompositionValidationError) -> Self {
        BoolwError::InvalidInput(e.to_string())
    }
}

/// Checks that `parts` are pairwise disjoint singletons covering `universe`.
fn check_partition(
    parts: impl Iterator<Item = BitSet>,
    universe: BitSet,
) -> Result<(), DecompositionValidationError> {
    let mut seen = BitSet::empty();
    for (i, part) in parts.enumerate() {
        if !part.is_singleton() {
            return Err(DecompositionValidationError::NotSingleton(i));
        }
        let v = part.index().unwrap_or_default();
        if !universe.contains(v) {
            return Err(DecompositionValidationError::ForeignVertex(v));
        }
        if seen.contains(v) {
            return Err(DecompositionValidationError::DuplicateVertex(v));
        }
        seen = seen.union(part);
    }
    match universe.difference(seen).index() {
        Some(v) => Err(DecompositionValidationError::MissingVertex(v)),
        None => Ok(()),
    }
}

/// Total order of the vertices. The cuts are the proper non-empty prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearDecomposition {
    order: Vec<BitSet>,
}

impl From<Vec<BitSet>> for LinearDecomposition {
    fn from(order: Vec<BitSet>) -> Self {
        Self { order }
    }
}

impl LinearDecomposition {
    pub fn from_vertices(ids: &[usize]) -> Result<Self, BoolwError> {
        let order = ids
            .iter()
            .map(|v| BitSet::from_vertex(*v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { order })
    }

    pub fn order(&self) -> &[BitSet] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn vertex_set(&self) -> BitSet {
        self.order.iter().copied().collect()
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
    }

    /// The fronts `F_1, .., F_{n-1}`.
    pub fn fronts(&self) -> impl Iterator<Item = BitSet> + '_ {
        let n = self.order.len().saturating_sub(1);
        self.order[..n].iter().scan(BitSet::empty(), |front, v| {
            *front = front.union(*v);
            Some(*front)
        })
    }

    pub fn validate(&self, universe: BitSet) -> Result<(), DecompositionValidationError> {
        check_partition(self.order.iter().copied(), universe)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: usize,
    pub vertex_set: BitSet,
    pub children: Option<(usize, usize)>,
    pub parent: Option<usize>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    fn degree(&self) -> usize {
        self.parent.iter().count() + self.children.map_or(0, |_| 2)
    }
}

/// Rooted full binary tree over the vertex set. Leaves hold single vertices,
/// inner nodes the union of their children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecompositionTree {
    pub nodes: Vec<Node>,
    pub root: Option<usize>,
}

impl DecompositionTree {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    pub fn add_leaf(&mut self, vertex: BitSet) -> usize {
        let id = self.nodes.len();
        if id == 0 {
            self.root = Some(id);
        }
        self.nodes.push(Node {
            id,
            vertex_set: vertex,
            children: None,
            parent: None,
        });
        id
    }

    /// Joins two parentless nodes below a new node, which becomes the root.
    pub fn add_internal(&mut self, left: usize, right: usize) -> Result<usize, BoolwError> {
        if left == right || left >= self.nodes.len() || right >= self.nodes.len() {
            return Err(BoolwError::invalid(format!(
                "cannot join nodes {} and {}",
                left, right
            )));
        }
        if self.nodes[left].parent.is_some() || self.nodes[right].parent.is_some() {
            return Err(BoolwError::invalid(format!(
                "node {} or {} already has a parent",
                left, right
            )));
        }
        let id = self.nodes.len();
        let vertex_set = self.nodes[left].vertex_set.union(self.nodes[right].vertex_set);
        self.nodes[left].parent = Some(id);
        self.nodes[right].parent = Some(id);
        self.nodes.push(Node {
            id,
            vertex_set,
            children: Some((left, right)),
            parent: None,
        });
        self.root = Some(id);
        Ok(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.and_then(|r| self.node(r))
    }

    pub fn vertex_set(&self) -> BitSet {
        self.root().map_or(BitSet::empty(), |r| r.vertex_set)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Pre-order traversal from the root, left child first.
    pub fn dfs(&self) -> DecompositionTreeIterator {
        DecompositionTreeIterator {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Vertex sets of all nodes but the root, in pre-order.
    pub fn cuts(&self) -> Vec<BitSet> {
        self.dfs()
            .filter(|n| Some(n.id) != self.root)
            .map(|n| n.vertex_set)
            .collect()
    }

    /// Number of nodes on a longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack: Vec<(usize, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();
        while let Some((id, d)) = stack.pop() {
            let node = match self.node(id) {
                Some(node) if d <= self.nodes.len() => node,
                _ => continue,
            };
            depth = max(depth, d);
            if let Some((l, r)) = node.children {
                stack.push((l, d + 1));
                stack.push((r, d + 1));
            }
        }
        depth
    }

    /// Sum over all nodes of the degree exceeding 2.
    pub fn count_branches(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.degree() > 2)
            .map(|n| n.degree() - 2)
            .sum()
    }

    /// Number of nodes with degree exceeding 2.
    pub fn count_branching_nodes(&self) -> usize {
        self.nodes.iter().filter(|n| n.degree() > 2).count()
    }

    /// Exchanges the vertices of two leaves and repairs the unions above them.
    pub fn swap_leaves(&mut self, a: usize, b: usize) -> Result<(), BoolwError> {
        if a >= self.nodes.len() || b >= self.nodes.len() {
            return Err(BoolwError::invalid(format!("no leaves {} and {}", a, b)));
        }
        if !self.nodes[a].is_leaf() || !self.nodes[b].is_leaf() {
            return Err(BoolwError::invalid(format!(
                "nodes {} and {} are not both leaves",
                a, b
            )));
        }
        let tmp = self.nodes[a].vertex_set;
        self.nodes[a].vertex_set = self.nodes[b].vertex_set;
        self.nodes[b].vertex_set = tmp;
        self.repair_ancestors(a);
        self.repair_ancestors(b);
        Ok(())
    }

    fn repair_ancestors(&mut self, mut id: usize) {
        let mut steps = 0;
        while let Some(p) = self.node(id).and_then(|n| n.parent) {
            steps += 1;
            if steps > self.nodes.len() {
                break;
            }
            let union = self.node(p).and_then(|n| n.children).and_then(|(l, r)| {
                Some(self.node(l)?.vertex_set.union(self.node(r)?.vertex_set))
            });
            if let Some(union) = union {
                self.nodes[p].vertex_set = union;
            }
            id = p;
        }
    }

    pub fn validate(&self, universe: BitSet) -> Result<(), DecompositionValidationError> {
        if self.nodes.is_empty() {
            return match universe.index() {
                Some(v) => Err(DecompositionValidationError::MissingVertex(v)),
                None => Ok(()),
            };
        }
        let mut reached = 0;
        for node in self.dfs() {
            reached += 1;
            if reached > self.nodes.len() {
                return Err(DecompositionValidationError::NotConnected);
            }
            if let Some((l, r)) = node.children {
                if l >= self.nodes.len()
                    || r >= self.nodes.len()
                    || self.nodes[l].parent != Some(node.id)
                    || self.nodes[r].parent != Some(node.id)
                {
                    return Err(DecompositionValidationError::DanglingChild(node.id));
                }
                if self.nodes[l].vertex_set.union(self.nodes[r].vertex_set) != node.vertex_set
                    || !self.nodes[l]
                        .vertex_set
                        .is_disjoint(&self.nodes[r].vertex_set)
                {
                    return Err(DecompositionValidationError::NotUnion(node.id));
                }
            }
        }
        if reached != self.nodes.len() {
            return Err(DecompositionValidationError::NotConnected);
        }
        check_partition(self.leaves().map(|n| n.vertex_set), universe)
    }
}

pub struct DecompositionTreeIterator<'a> {
    tree: &'a DecompositionTree,
    stack: Vec<usize>,
}

impl<'a> Iterator for DecompositionTreeIterator<'a> {
    type Item = &'a Node;

    /// Ids without a node are skipped.
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                if let Some((l, r)) = node.children {
                    self.stack.push(r);
                    self.stack.push(l);
                }
                return Some(node);
            }
        }
        None
    }
}

/// One split of a decomposition: `left ∪ right` is the parent subset, whose
/// boolean dimension is `dimension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cut {
    pub left: BitSet,
    pub right: BitSet,
    pub dimension: usize,
}

impl Display for Cut {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}): {}", self.left, self.right, self.dimension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decomposition {
    Linear(LinearDecomposition),
    Tree(DecompositionTree),
}

impl From<LinearDecomposition> for Decomposition {
    fn from(d: LinearDecomposition) -> Self {
        Decomposition::Linear(d)
    }
}

impl From<DecompositionTree> for Decomposition {
    fn from(d: DecompositionTree) -> Self {
        Decomposition::Tree(d)
    }
}

impl Decomposition {
    pub fn shape(&self) -> Shape {
        match self {
            Decomposition::Linear(_) => Shape::Linear,
            Decomposition::Tree(_) => Shape::Tree,
        }
    }

    /// Subsets whose boolean dimensions make up the objective.
    pub fn cuts(&self) -> Vec<BitSet> {
        match self {
            Decomposition::Linear(d) => d.fronts().collect(),
            Decomposition::Tree(d) => d.cuts(),
        }
    }

    pub fn validate(&self, universe: BitSet) -> Result<(), DecompositionValidationError> {
        match self {
            Decomposition::Linear(d) => d.validate(universe),
            Decomposition::Tree(d) => d.validate(universe),
        }
    }

    /// Every split in traversal order, with freshly computed dimensions.
    pub fn trace<G: BaseGraph>(&self, graph: &G) -> Vec<Cut> {
        match self {
            Decomposition::Linear(d) => {
                let mut front = BitSet::empty();
                let mut trace = Vec::with_capacity(d.len());
                for (i, v) in d.order().iter().enumerate() {
                    if i > 0 {
                        trace.push(Cut {
                            left: front,
                            right: *v,
                            dimension: boolean_dimension(graph, front.union(*v)),
                        });
                    }
                    front = front.union(*v);
                }
                trace
            }
            Decomposition::Tree(d) => d
                .dfs()
                .filter_map(|n| {
                    let (l, r) = n.children?;
                    Some(Cut {
                        left: d.node(l)?.vertex_set,
                        right: d.node(r)?.vertex_set,
                        dimension: boolean_dimension(graph, n.vertex_set),
                    })
                })
                .collect(),
        }
    }
}

impl Display for Decomposition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Decomposition::Linear(d) => {
                let values: Vec<_> = d
                    .order()
                    .iter()
                    .map(|v| v.index().map_or_else(String::new, |i| i.to_string()))
                    .collect();
                write!(f, "[{}]", values.join(", "))
            }
            Decomposition::Tree(d) => {
                let mut out = String::new();
                let mut stack: Vec<(usize, usize)> = d.root.into_iter().map(|r| (r, 0)).collect();
                while let Some((id, indent)) = stack.pop() {
                    let node = match d.node(id) {
                        Some(node) if indent <= 2 * d.nodes.len() => node,
                        _ => continue,
                    };
                    out.push_str(&format!("{:indent$}{}\n", "", node.vertex_set, indent = indent));
                    if let Some((l, r)) = node.children {
                        stack.push((r, indent + 2));
                        stack.push((l, indent + 2));
                    }
                }
                write!(f, "{}", out.trim_end())
            }
        }
    }
}
