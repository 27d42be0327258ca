use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

use crate::Lookup;

/// Endless iterator over a sequence's values, starting at some index.
pub struct Values<'a, S: ?Sized> {
    source: &'a mut S,
    start: usize,
    next: usize,
}

impl<'a, S: Lookup + ?Sized> Values<'a, S> {
    pub(crate) fn new(source: &'a mut S, start: usize) -> Self {
        Self {
            source,
            start,
            next: start,
        }
    }

    /// Rewinds to the starting index.
    pub fn reset(&mut self) {
        self.next = self.start;
    }

    /// Index of the value the next call to `next` will yield.
    pub fn position(&self) -> usize {
        self.next
    }
}

impl<S: Lookup + ?Sized> Iterator for Values<'_, S> {
    type Item = S::Value;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.source.lookup(self.next);
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Pull-based stream of stringified values.
///
/// A value is computed only when pulled, through either `Iterator::next` or
/// `Stream::poll_next`. The stream never ends; drop it to stop.
pub struct ValueStream<'a, S: ?Sized> {
    values: Values<'a, S>,
}

impl<'a, S: Lookup + ?Sized> ValueStream<'a, S> {
    pub(crate) fn new(source: &'a mut S, start: usize) -> Self {
        Self {
            values: Values::new(source, start),
        }
    }

    pub fn position(&self) -> usize {
        self.values.position()
    }
}

impl<S> Iterator for ValueStream<'_, S>
where
    S: Lookup + ?Sized,
    S::Value: ToString,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.values.next().map(|value| value.to_string())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<S> Stream for ValueStream<'_, S>
where
    S: Lookup + ?Sized,
    S::Value: ToString,
{
    type Item = String;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<String>> {
        Poll::Ready(Iterator::next(self.get_mut()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
