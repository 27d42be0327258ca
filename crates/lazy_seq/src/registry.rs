//! Process-wide extension registry.
//!
//! Operations are keyed by name and value type. The registry starts empty
//! and lives until process exit. Registering a name again replaces the
//! previous operation for every sequence, including ones built earlier,
//! since sequences resolve extensions by name at call time.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::{Lookup, SequenceError};

/// Operation over any sequence of `T`, taking `A` and producing `R`.
pub type Extension<T, A, R> =
    Arc<dyn Fn(&mut dyn Lookup<Value = T>, A) -> Result<R, SequenceError> + Send + Sync>;

#[derive(Default)]
struct Registry {
    version: u64,
    entries: HashMap<(TypeId, String), Box<dyn Any + Send + Sync>>,
}

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::default()));

/// Registers `op` and returns the registry version after the change.
pub fn register_extension<T, A, R, F>(name: impl Into<String>, op: F) -> u64
where
    T: 'static,
    A: 'static,
    R: 'static,
    F: Fn(&mut dyn Lookup<Value = T>, A) -> Result<R, SequenceError> + Send + Sync + 'static,
{
    let name = name.into();
    let op: Extension<T, A, R> = Arc::new(op);
    let mut registry = REGISTRY.write();
    let replaced = registry
        .entries
        .insert((TypeId::of::<T>(), name.clone()), Box::new(op))
        .is_some();
    registry.version += 1;
    debug!(extension = %name, replaced, version = registry.version, "extension registered");
    registry.version
}

/// Number of registrations performed so far in this process.
pub fn registry_version() -> u64 {
    REGISTRY.read().version
}

/// Runs the extension registered as `name` against `seq`.
///
/// The registry lock is released before the operation runs.
pub fn call_extension<T, A, R>(
    seq: &mut dyn Lookup<Value = T>,
    name: &str,
    args: A,
) -> Result<R, SequenceError>
where
    T: 'static,
    A: 'static,
    R: 'static,
{
    let op = resolve::<T, A, R>(name)?;
    op(seq, args)
}

pub(crate) fn resolve<T, A, R>(name: &str) -> Result<Extension<T, A, R>, SequenceError>
where
    T: 'static,
    A: 'static,
    R: 'static,
{
    let registry = REGISTRY.read();
    let entry = registry
        .entries
        .get(&(TypeId::of::<T>(), name.to_string()))
        .ok_or_else(|| SequenceError::UnknownExtension(name.to_string()))?;
    entry
        .downcast_ref::<Extension<T, A, R>>()
        .cloned()
        .ok_or_else(|| SequenceError::ExtensionSignature(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{call_extension, register_extension, registry_version, resolve};
    use crate::{Lookup, Sequence, SequenceError};

    #[test]
    fn versions_increase_monotonically() {
        let before = registry_version();
        let v1 = register_extension("registry_test_noop", |_: &mut dyn Lookup<Value = u8>, (): ()| Ok(()));
        let v2 = register_extension("registry_test_noop", |_: &mut dyn Lookup<Value = u8>, (): ()| Ok(()));
        assert!(v1 > before);
        assert!(v2 > v1);
    }

    #[test]
    fn lookups_are_scoped_by_value_type() {
        register_extension("registry_test_first", |seq: &mut dyn Lookup<Value = i64>, (): ()| {
            Ok(seq.lookup(0))
        });
        assert!(resolve::<i64, (), i64>("registry_test_first").is_ok());
        assert!(matches!(
            resolve::<f64, (), f64>("registry_test_first"),
            Err(SequenceError::UnknownExtension(_))
        ));
        assert!(matches!(
            resolve::<i64, usize, i64>("registry_test_first"),
            Err(SequenceError::ExtensionSignature(_))
        ));
    }

    #[test]
    fn resolved_extension_runs_against_a_sequence() {
        register_extension("registry_test_sum_to", |seq: &mut dyn Lookup<Value = i64>, end: usize| {
            Ok((0..=end).map(|i| seq.lookup(i)).sum::<i64>())
        });
        let op = resolve::<i64, usize, i64>("registry_test_sum_to").unwrap();
        let mut seq = Sequence::new([1_i64, 2]).unwrap();
        assert_eq!(op(&mut seq, 3).unwrap(), 10);
    }

    #[test]
    fn extensions_run_through_trait_objects() {
        register_extension("registry_test_pair", |seq: &mut dyn Lookup<Value = i64>, at: usize| {
            Ok((seq.lookup(at), seq.lookup(at + 1)))
        });
        let mut seq = Sequence::new([0_i64, 4]).unwrap();
        let dynamic: &mut dyn Lookup<Value = i64> = &mut seq;
        assert_eq!(
            call_extension::<i64, usize, (i64, i64)>(dynamic, "registry_test_pair", 2),
            Ok((8, 12))
        );
        assert_eq!(
            call_extension::<i64, (), ()>(dynamic, "registry_test_absent", ()),
            Err(SequenceError::UnknownExtension("registry_test_absent".to_string()))
        );
    }
}
