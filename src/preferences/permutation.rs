use crate::error::PermutationError;

/// A strict ranking over the ids `1..=n` with its inverse index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
    // ranks[id - 1] is the position of `id` in `order`.
    ranks: Vec<usize>,
}

impl Permutation {
    pub fn new(n: usize, order: Vec<usize>) -> Result<Self, PermutationError> {
        if order.len() != n {
            return Err(PermutationError::WrongLength {
                expected: n,
                found: order.len(),
            });
        }

        let mut ranks = vec![usize::MAX; n];
        for (position, &id) in order.iter().enumerate() {
            if id == 0 {
                return Err(PermutationError::ZeroId);
            }
            if id > n {
                return Err(PermutationError::OutOfRange { id, n });
            }
            let slot = &mut ranks[id - 1];
            if *slot != usize::MAX {
                return Err(PermutationError::Duplicate { id });
            }
            *slot = position;
        }

        Ok(Self { order, ranks })
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn at(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }

    /// Lower is better. `id` must be in `1..=n`.
    #[inline]
    pub fn rank_of(&self, id: usize) -> usize {
        self.ranks[id - 1]
    }

    #[inline]
    pub fn prefers(&self, candidate: usize, incumbent: usize) -> bool {
        self.rank_of(candidate) < self.rank_of(incumbent)
    }
}
