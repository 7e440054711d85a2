use crate::datastructures::BitSet;
use crate::decomposition::{Decomposition, DecompositionTree, LinearDecomposition};
use crate::error::BoolwError;
use crate::exact::table::SubsetTable;
use crate::objective::Shape;

/// Follows the stored choices from the full vertex set back to the leaves.
pub fn construct_decomposition(table: &SubsetTable) -> Result<Decomposition, BoolwError> {
    match table.shape() {
        Shape::Linear => construct_linear(table).map(Decomposition::from),
        Shape::Tree => construct_tree(table).map(Decomposition::from),
    }
}

fn broken(mask: usize, table: &SubsetTable) -> BoolwError {
    BoolwError::InconsistentState(format!(
        "no valid choice stored for {}",
        table.to_bitset(mask)
    ))
}

fn construct_linear(table: &SubsetTable) -> Result<LinearDecomposition, BoolwError> {
    let mut order: Vec<BitSet> = Vec::with_capacity(table.order());
    let mut mask = table.full_mask();
    while mask != 0 {
        let last = table.finalized_choice(mask)? as usize;
        if last >= table.order() || mask & (1 << last) == 0 {
            return Err(broken(mask, table));
        }
        order.push(BitSet::singleton(table.vertex(last)));
        mask ^= 1 << last;
    }
    order.reverse();
    Ok(order.into())
}

fn construct_tree(table: &SubsetTable) -> Result<DecompositionTree, BoolwError> {
    let full = table.full_mask();
    let mut td = DecompositionTree::with_capacity((2 * table.order()).saturating_sub(1));
    if full == 0 {
        return Ok(td);
    }
    // post-order: both parts of a subset are built before the subset itself
    let mut stack = vec![(full, false)];
    let mut built: Vec<usize> = Vec::with_capacity(table.order());
    while let Some((mask, expanded)) = stack.pop() {
        if mask.count_ones() == 1 {
            table.finalized_value(mask)?;
            built.push(td.add_leaf(table.to_bitset(mask)));
        } else if expanded {
            let right = built.pop().ok_or_else(|| broken(mask, table))?;
            let left = built.pop().ok_or_else(|| broken(mask, table))?;
            built.push(td.add_internal(left, right)?);
        } else {
            let left = table.finalized_choice(mask)? as usize;
            if left == 0 || left == mask || left & !mask != 0 {
                return Err(broken(mask, table));
            }
            stack.push((mask, true));
            stack.push((mask ^ left, false));
            stack.push((left, false));
        }
    }
    Ok(td)
}
