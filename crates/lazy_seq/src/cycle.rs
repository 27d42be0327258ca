use std::collections::HashMap;

use crate::index::IntoIndex;
use crate::{Lookup, SequenceError};

/// Sequence with `get(i) == block[i % block.len()]`.
///
/// Looked-up values are memoized per index; the memo is only ever filled
/// from the block, so it cannot drift from the law.
#[derive(Clone, Debug)]
pub struct CycleSequence<T> {
    block: Vec<T>,
    cache: HashMap<usize, T>,
}

impl<T: Clone> CycleSequence<T> {
    pub fn new<I>(block: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = T>,
    {
        let block: Vec<T> = block.into_iter().collect();
        if block.is_empty() {
            return Err(SequenceError::InvalidArgument("a cycle block must not be empty"));
        }
        Ok(Self {
            block,
            cache: HashMap::new(),
        })
    }

    pub fn get<I: IntoIndex>(&mut self, index: I) -> Result<T, SequenceError> {
        let index = index.into_index()?;
        Ok(self.lookup(index))
    }

    pub fn block(&self) -> &[T] {
        &self.block
    }

    pub fn period(&self) -> usize {
        self.block.len()
    }

    pub fn is_cached(&self, index: usize) -> bool {
        self.cache.contains_key(&index)
    }
}

impl<T: Clone> Lookup for CycleSequence<T> {
    type Value = T;

    fn lookup(&mut self, index: usize) -> T {
        if let Some(value) = self.cache.get(&index) {
            return value.clone();
        }
        let value = self.block[index % self.block.len()].clone();
        self.cache.insert(index, value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::CycleSequence;
    use crate::{Lookup, SequenceError};

    #[test]
    fn empty_block_is_rejected() {
        assert_eq!(
            CycleSequence::<i32>::new([]).unwrap_err(),
            SequenceError::InvalidArgument("a cycle block must not be empty")
        );
    }

    #[test]
    fn single_element_block_is_constant() {
        let mut seq = CycleSequence::new([9]).unwrap();
        for i in [0, 1, 2, 1_000, usize::MAX] {
            assert_eq!(seq.lookup(i), 9);
        }
    }

    #[test]
    fn lookups_are_memoized_without_gap_filling() {
        let mut seq = CycleSequence::new(["a", "b"]).unwrap();
        assert_eq!(seq.get(7).unwrap(), "b");
        assert!(seq.is_cached(7));
        assert!(!seq.is_cached(6));
        assert_eq!(seq.get(7).unwrap(), "b");
        assert_eq!(seq.block(), &["a", "b"]);
        assert_eq!(seq.period(), 2);
    }
}
