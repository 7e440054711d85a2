use crate::error::BoolwError;
use num::{NumCast, ToPrimitive};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{BitAnd, BitOr, Sub};

/// Set of vertex identifiers backed by a single `u128`.
///
/// Bit `i` is set iff vertex `i` is a member. Elements handed out by
/// [`BitSet::iter`] are themselves one-bit sets, so an element and a set can be
/// passed to the same operations.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitSet(u128);

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.vertices().map(|i| i.to_string()).collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bits: [{}]}}",
            self.cardinality(),
            values.join(", "),
        )
    }
}

impl Display for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.vertices().map(|i| i.to_string()).collect();
        write!(f, "{{{}}}", values.join(", "))
    }
}

#[inline]
const fn low_mask(size: usize) -> u128 {
    if size >= BitSet::CAPACITY {
        u128::MAX
    } else {
        (1u128 << size) - 1
    }
}

impl BitSet {
    /// Largest number of distinct vertex ids a set can hold.
    pub const CAPACITY: usize = 128;

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Caller guarantees `v < CAPACITY`, e.g. because `v` came out of another set.
    #[inline]
    pub(crate) const fn singleton(v: usize) -> Self {
        Self(1u128 << v)
    }

    #[inline]
    pub const fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    pub fn from_vertex(v: usize) -> Result<Self, BoolwError> {
        if v >= Self::CAPACITY {
            return Err(BoolwError::CapacityExceeded {
                requested: v + 1,
                capacity: Self::CAPACITY,
            });
        }
        Ok(Self(1u128 << v))
    }

    pub fn from_vertices<T: ToPrimitive + Copy + Display>(slice: &[T]) -> Result<Self, BoolwError> {
        let mut bits = 0u128;
        for i in slice {
            let v: usize = NumCast::from(*i).ok_or_else(|| {
                BoolwError::InvalidInput(format!("{} is not a vertex identifier", i))
            })?;
            bits |= Self::from_vertex(v)?.0;
        }
        Ok(Self(bits))
    }

    /// The set `{0, .., size - 1}`.
    pub fn full(size: usize) -> Result<Self, BoolwError> {
        if size > Self::CAPACITY {
            return Err(BoolwError::CapacityExceeded {
                requested: size,
                capacity: Self::CAPACITY,
            });
        }
        Ok(Self(low_mask(size)))
    }

    /// The set `{start, .., end - 1}`, clamped to the capacity.
    #[inline]
    pub const fn range(start: usize, end: usize) -> Self {
        Self(low_mask(end) & !low_mask(start))
    }

    #[inline]
    pub const fn bits(&self) -> u128 {
        self.0
    }

    #[inline]
    pub const fn union(self, other: BitSet) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn intersect(self, other: BitSet) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn difference(self, other: BitSet) -> Self {
        Self(self.0 & !other.0)
    }

    /// Complement with respect to `{0, .., universe_size - 1}`. Sizes above
    /// [`BitSet::CAPACITY`] are treated as the full capacity.
    #[inline]
    pub const fn complement(self, universe_size: usize) -> Self {
        let mask = low_mask(universe_size);
        Self(!self.0 & mask)
    }

    #[inline]
    pub const fn complement_in(self, universe: BitSet) -> Self {
        universe.difference(self)
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        v < Self::CAPACITY && self.0 & (1u128 << v) != 0
    }

    #[inline]
    pub const fn cardinality(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_singleton(&self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    #[inline]
    pub const fn is_disjoint(&self, other: &BitSet) -> bool {
        self.0 & other.0 == 0
    }

    #[inline]
    pub const fn intersects_with(&self, other: &BitSet) -> bool {
        !self.is_disjoint(other)
    }

    #[inline]
    pub const fn is_subset_of(&self, other: &BitSet) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub const fn is_superset_of(&self, other: &BitSet) -> bool {
        other.is_subset_of(self)
    }

    /// Lowest member as a one-bit set.
    #[inline]
    pub const fn first(&self) -> Option<BitSet> {
        if self.0 == 0 {
            None
        } else {
            Some(Self(self.0 & self.0.wrapping_neg()))
        }
    }

    /// Id of the lowest member.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// One past the highest member, 0 for the empty set.
    #[inline]
    pub const fn span(&self) -> usize {
        Self::CAPACITY - self.0.leading_zeros() as usize
    }

    #[inline]
    pub fn iter(&self) -> BitSetIterator {
        BitSetIterator { block: self.0 }
    }

    #[inline]
    pub fn vertices(&self) -> VertexIterator {
        VertexIterator { block: self.0 }
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.vertices().collect()
    }
}

/// Yields the members of a set as one-bit sets in ascending order.
#[derive(Clone, Debug)]
pub struct BitSetIterator {
    block: u128,
}

impl Iterator for BitSetIterator {
    type Item = BitSet;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.block == 0 {
            return None;
        }
        let lowest = self.block & self.block.wrapping_neg();
        self.block ^= lowest;
        Some(BitSet(lowest))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.block.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitSetIterator {}

/// Yields the member ids of a set in ascending order.
#[derive(Clone, Debug)]
pub struct VertexIterator {
    block: u128,
}

impl Iterator for VertexIterator {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.block == 0 {
            return None;
        }
        let offset = self.block.trailing_zeros() as usize;
        self.block &= self.block - 1;
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.block.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for VertexIterator {}

impl IntoIterator for BitSet {
    type Item = BitSet;
    type IntoIter = BitSetIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitOr for BitSet {
    type Output = BitSet;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitAnd for BitSet {
    type Output = BitSet;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersect(rhs)
    }
}

impl Sub for BitSet {
    type Output = BitSet;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl std::iter::FromIterator<BitSet> for BitSet {
    fn from_iter<I: IntoIterator<Item = BitSet>>(iter: I) -> Self {
        iter.into_iter().fold(BitSet::empty(), BitSet::union)
    }
}

#[cfg(test)]
mod tests {
    use crate::datastructures::BitSet;
    use crate::error::BoolwError;
    use rand::prelude::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_subset(rng: &mut StdRng, size: usize) -> BitSet {
        let bits: u128 = rng.gen();
        BitSet::from_bits(bits).intersect(BitSet::full(size).unwrap())
    }

    #[test]
    fn iter() {
        let a: Vec<usize> = (0..128).filter(|i| i % 2 == 0).collect();
        let bs = BitSet::from_vertices(&a).unwrap();

        let b: Vec<usize> = bs.vertices().collect();
        assert_eq!(a, b);

        let singletons: Vec<BitSet> = bs.iter().collect();
        assert_eq!(singletons.len(), bs.cardinality());
        for (s, v) in singletons.iter().zip(a.iter()) {
            assert!(s.is_singleton());
            assert_eq!(s.index(), Some(*v));
        }
        assert!(singletons.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn construction() {
        assert!(BitSet::empty().is_empty());
        assert_eq!(BitSet::from_vertex(127).unwrap().index(), Some(127));
        assert_eq!(
            BitSet::from_vertex(128),
            Err(BoolwError::CapacityExceeded {
                requested: 129,
                capacity: 128
            })
        );
        assert!(BitSet::from_vertices(&[-1i32]).is_err());
        assert_eq!(BitSet::full(128).unwrap().cardinality(), 128);
        assert!(BitSet::full(129).is_err());
        let s = BitSet::from_vertices(&[3u8, 1, 3]).unwrap();
        assert_eq!(s.to_vec(), vec![1, 3]);
        assert_eq!(s.span(), 4);
        assert_eq!(BitSet::range(2, 5).to_vec(), vec![2, 3, 4]);
        assert!(BitSet::range(4, 4).is_empty());
        assert_eq!(BitSet::range(0, 200), BitSet::full(128).unwrap());
    }

    #[test]
    fn set_algebra() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in &[0usize, 1, 5, 64, 100, 128] {
            for _ in 0..50 {
                let x = random_subset(&mut rng, *size);
                let y = random_subset(&mut rng, *size);
                let z = random_subset(&mut rng, *size);

                assert_eq!(x.union(y), y.union(x));
                assert_eq!(x.intersect(y), y.intersect(x));
                assert_eq!(x.union(y).union(z), x.union(y.union(z)));
                assert_eq!(x.intersect(y).intersect(z), x.intersect(y.intersect(z)));
                assert_eq!(x.complement(*size).complement(*size), x);
                assert!(x.is_disjoint(&x.complement(*size)));
                assert_eq!(x.union(x.complement(*size)), BitSet::full(*size).unwrap());
                assert_eq!(x.difference(y), x.intersect(y.complement(*size)));
                assert_eq!(x - y, x.difference(y));
                assert!(x.intersect(y).is_subset_of(&x));
                assert!(x.union(y).is_superset_of(&y));

                let members: Vec<BitSet> = x.iter().collect();
                assert_eq!(members.len(), x.cardinality());
                assert_eq!(members.iter().copied().collect::<BitSet>(), x);
                for m in &members {
                    assert!(x.contains(m.index().unwrap()));
                }
            }
        }
    }

    #[test]
    fn first_and_singleton() {
        let s = BitSet::from_vertices(&[5, 9]).unwrap();
        assert_eq!(s.first(), Some(BitSet::from_vertex(5).unwrap()));
        assert!(!s.is_singleton());
        assert!(!BitSet::empty().is_singleton());
        assert_eq!(BitSet::empty().first(), None);
        assert_eq!(BitSet::empty().index(), None);
    }
}
