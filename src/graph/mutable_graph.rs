use crate::datastructures::BitSet;
use crate::error::BoolwError;
use crate::graph::base_graph::BaseGraph;
use crate::graph::kind::Group;

pub trait MutableGraph: BaseGraph {
    fn add(&mut self, vertices: BitSet, group: Option<Group>) -> Result<(), BoolwError>;
    fn remove(&mut self, vertices: BitSet) -> Result<(), BoolwError>;
    fn connect(&mut self, v: BitSet, w: BitSet) -> Result<(), BoolwError>;
    fn disconnect(&mut self, v: BitSet, w: BitSet) -> Result<(), BoolwError>;
    fn new() -> Self;
    fn make_clique(&mut self, vertices: BitSet) -> Result<(), BoolwError> {
        for v in vertices.vertices() {
            for u in vertices.vertices().filter(|u| *u > v) {
                if !self.has_edge(v, u) {
                    self.connect(BitSet::singleton(v), BitSet::singleton(u))?;
                }
            }
        }
        Ok(())
    }
}
