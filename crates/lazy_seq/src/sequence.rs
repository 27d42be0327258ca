use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::cycle::CycleSequence;
use crate::index::IntoIndex;
use crate::registry;
use crate::step::Step;
use crate::{Lookup, SequenceError};

/// Recurrence `(previous, next_index) -> next`.
pub type Formula<T> = Box<dyn Fn(&T, usize) -> T + Send + Sync>;

/// Unbounded memoized sequence driven by a recurrence.
///
/// Values live in two places:
/// - `prefix` holds the contiguous run `0..prefix.len()`, which always starts
///   with the seeds.
/// - `sparse` holds values at indices beyond the prefix, either set by the
///   caller or computed forward from such a value. Every key is strictly
///   greater than `prefix.len()`; once the prefix reaches a key, that key and
///   the run following it move into the prefix.
///
/// A cached value is never recomputed, and the formula is only ever applied
/// to fill indices that have no value yet.
pub struct Sequence<T> {
    prefix: Vec<T>,
    sparse: BTreeMap<usize, T>,
    highest: usize,
    formula: Formula<T>,
}

impl<T: Step> Sequence<T> {
    /// Builds a sequence whose formula is derived from the seeds.
    pub fn new<I>(seeds: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = T>,
    {
        let seeds: Vec<T> = seeds.into_iter().collect();
        let formula: Formula<T> = match seeds.as_slice() {
            [] => return Err(SequenceError::InvalidArgument("at least one seed is required")),
            [_] => {
                let one = T::one();
                Box::new(move |prev: &T, _: usize| prev.advance(&one))
            }
            [.., before, last] => {
                let step = last
                    .checked_difference(before)
                    .ok_or(SequenceError::InvalidArgument("step between the last two seeds overflows"))?;
                Box::new(move |prev: &T, _: usize| prev.advance(&step))
            }
        };
        Self::from_parts(seeds, formula)
    }
}

impl<T: Clone> Sequence<T> {
    pub fn with_formula<I, F>(seeds: I, formula: F) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T, usize) -> T + Send + Sync + 'static,
    {
        Self::from_parts(seeds.into_iter().collect(), Box::new(formula))
    }

    fn from_parts(seeds: Vec<T>, formula: Formula<T>) -> Result<Self, SequenceError> {
        if seeds.is_empty() {
            return Err(SequenceError::InvalidArgument("at least one seed is required"));
        }
        Ok(Self {
            highest: seeds.len() - 1,
            prefix: seeds,
            sparse: BTreeMap::new(),
            formula,
        })
    }

    /// Builds a sequence that repeats `block` forever.
    pub fn cycle<I>(block: I) -> Result<CycleSequence<T>, SequenceError>
    where
        I: IntoIterator<Item = T>,
    {
        CycleSequence::new(block)
    }

    pub fn get<I: IntoIndex>(&mut self, index: I) -> Result<T, SequenceError> {
        let index = index.into_index()?;
        Ok(self.lookup(index))
    }

    /// Overrides the value at `index` without running the formula.
    ///
    /// Values already cached above `index` are kept; indices that are still
    /// missing will be filled forward from `value`.
    pub fn set<I: IntoIndex>(&mut self, index: I, value: T) -> Result<(), SequenceError> {
        let index = index.into_index()?;
        if let Some(slot) = self.prefix.get_mut(index) {
            *slot = value;
        } else {
            self.sparse.insert(index, value);
            self.absorb_sparse();
        }
        self.highest = self.highest.max(index);
        debug!(index, highest = self.highest, "value overridden");
        Ok(())
    }

    pub fn highest_known_index(&self) -> usize {
        self.highest
    }

    pub fn is_cached(&self, index: usize) -> bool {
        self.cached(index).is_some()
    }

    /// Registers `op` under `name` for every sequence of value type `T`.
    pub fn register_extension<A, R, F>(name: impl Into<String>, op: F) -> u64
    where
        T: 'static,
        A: 'static,
        R: 'static,
        F: Fn(&mut dyn Lookup<Value = T>, A) -> Result<R, SequenceError> + Send + Sync + 'static,
    {
        registry::register_extension(name, op)
    }

    fn cached(&self, index: usize) -> Option<&T> {
        self.prefix.get(index).or_else(|| self.sparse.get(&index))
    }

    fn backfill(&mut self, index: usize) -> T {
        let anchor = self
            .sparse
            .range(..index)
            .next_back()
            .map(|(&at, value)| (at, value.clone()));
        let value = match anchor {
            Some((at, value)) => self.fill_sparse(at, value, index),
            None => self.fill_prefix(index),
        };
        self.highest = self.highest.max(index);
        value
    }

    fn fill_prefix(&mut self, index: usize) -> T {
        let from = self.prefix.len();
        trace!(from, to = index, "extending prefix");
        self.prefix.reserve(fill_len(from, index));
        for next in from..=index {
            let value = (self.formula)(&self.prefix[next - 1], next);
            self.prefix.push(value);
        }
        let value = self.prefix[index].clone();
        self.absorb_sparse();
        value
    }

    fn fill_sparse(&mut self, at: usize, mut prev: T, index: usize) -> T {
        trace!(from = at + 1, to = index, "filling past override");
        for next in (at + 1)..=index {
            let value = (self.formula)(&prev, next);
            self.sparse.insert(next, value.clone());
            prev = value;
        }
        prev
    }

    fn absorb_sparse(&mut self) {
        loop {
            let next = self.prefix.len();
            match self.sparse.remove(&next) {
                Some(value) => self.prefix.push(value),
                None => break,
            }
        }
    }
}

/// Number of slots `from..=index` covers, saturating at `usize::MAX` so an
/// oversized request fails in the allocator rather than in arithmetic.
fn fill_len(from: usize, index: usize) -> usize {
    (index - from).saturating_add(1)
}

impl<T: Clone> Lookup for Sequence<T> {
    type Value = T;

    fn lookup(&mut self, index: usize) -> T {
        match self.cached(index) {
            Some(value) => value.clone(),
            None => self.backfill(index),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("prefix", &self.prefix)
            .field("sparse", &self.sparse)
            .field("highest", &self.highest)
            .finish_non_exhaustive()
    }
}
