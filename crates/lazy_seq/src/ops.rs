use tracing::debug;

use crate::index::IntoIndex;
use crate::registry;
use crate::stream::{ValueStream, Values};
use crate::{Lookup, SequenceError};

/// Operations built solely on [`Lookup::lookup`].
///
/// Implemented for every `Lookup`, including `dyn Lookup`. The unbounded scans
/// (`some`, `every`, `index_of`) run forever if their stop condition never
/// occurs.
pub trait SequenceOps: Lookup {
    /// Values from `start` to `end` inclusive, in the requested direction.
    ///
    /// A bound that is not a valid index is treated as 0.
    fn get_range<A: IntoIndex, B: IntoIndex>(&mut self, start: A, end: B) -> Vec<Self::Value> {
        let start = index_or_zero(start);
        let end = index_or_zero(end);
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };

        let mut range: Vec<_> = (lo..=hi).map(|i| self.lookup(i)).collect();
        if start > end {
            range.reverse();
        }
        range
    }

    fn get_range_to<B: IntoIndex>(&mut self, end: B) -> Vec<Self::Value> {
        self.get_range(0_usize, end)
    }

    /// Pairs the value at index `i` with `values[i]`.
    fn zip<U: Clone>(&mut self, values: &[U]) -> Vec<(Self::Value, U)> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| (self.lookup(i), value.clone()))
            .collect()
    }

    /// Scans upward from 0 until `predicate` holds; returns that index.
    fn some<P>(&mut self, predicate: P) -> usize
    where
        P: FnMut(&Self::Value) -> bool,
    {
        self.some_from(predicate, 0)
    }

    fn some_from<P>(&mut self, mut predicate: P, start: usize) -> usize
    where
        P: FnMut(&Self::Value) -> bool,
    {
        let mut index = start;
        while !predicate(&self.lookup(index)) {
            index += 1;
        }
        index
    }

    /// Scans upward from 0 while `predicate` holds; returns the first index
    /// where it does not.
    fn every<P>(&mut self, predicate: P) -> usize
    where
        P: FnMut(&Self::Value) -> bool,
    {
        self.every_from(predicate, 0)
    }

    fn every_from<P>(&mut self, mut predicate: P, start: usize) -> usize
    where
        P: FnMut(&Self::Value) -> bool,
    {
        let mut index = start;
        while predicate(&self.lookup(index)) {
            index += 1;
        }
        index
    }

    fn index_of(&mut self, target: &Self::Value) -> usize
    where
        Self::Value: PartialEq,
    {
        self.some(|value| value == target)
    }

    /// Like `index_of`, but gives up after `limit` indices.
    fn index_of_within(&mut self, target: &Self::Value, limit: usize) -> Option<usize>
    where
        Self::Value: PartialEq,
    {
        (0..limit).find(|&i| self.lookup(i) == *target)
    }

    fn values(&mut self) -> Values<'_, Self> {
        self.values_from(0)
    }

    fn values_from(&mut self, start: usize) -> Values<'_, Self> {
        Values::new(self, start)
    }

    fn to_stream(&mut self) -> ValueStream<'_, Self> {
        self.to_stream_from(0)
    }

    fn to_stream_from(&mut self, start: usize) -> ValueStream<'_, Self> {
        ValueStream::new(self, start)
    }

    /// Runs the extension registered as `name` for this value type.
    ///
    /// Needs a sized receiver; for `dyn Lookup` use [`crate::call_extension`].
    fn call_extension<A, R>(&mut self, name: &str, args: A) -> Result<R, SequenceError>
    where
        Self: Sized,
        Self::Value: 'static,
        A: 'static,
        R: 'static,
    {
        registry::call_extension::<Self::Value, A, R>(self, name, args)
    }
}

impl<S: Lookup + ?Sized> SequenceOps for S {}

fn index_or_zero<I: IntoIndex>(bound: I) -> usize {
    bound.into_index().unwrap_or_else(|err| {
        debug!(%err, "range bound defaulted to 0");
        0
    })
}
