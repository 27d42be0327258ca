mod cycle;
mod error;
mod index;
mod ops;
mod registry;
mod sequence;
mod step;
mod stream;

pub use cycle::CycleSequence;
pub use error::SequenceError;
pub use index::IntoIndex;
pub use ops::SequenceOps;
pub use registry::{Extension, call_extension, register_extension, registry_version};
pub use sequence::{Formula, Sequence};
pub use step::Step;
pub use stream::{ValueStream, Values};

/// Random access into an unbounded sequence.
///
/// - Every index is valid; there is no last element.
/// - `lookup` may fill internal caches, so it takes `&mut self`.
/// - Repeated lookups of an index return equal values unless the sequence was
///   explicitly modified in between.
pub trait Lookup {
    type Value;

    fn lookup(&mut self, index: usize) -> Self::Value;

    fn length(&self) -> Length {
        Length::Unbounded
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Length {
    Unbounded,
}

impl Length {
    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Always `None`: sequences have no finite length.
    pub fn finite(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
        }
    }
}
