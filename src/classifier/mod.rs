mod introspect;
mod meta;

pub use introspect::{Introspect, IntrospectError, PathIntrospector};
pub use meta::{ConstructorMeta, MethodMeta, SuiteMeta, Visibility, TEST_MARKER};

use tracing::{trace, warn};

use crate::name::ArtifactName;

/// Decides which discovered artifacts are usable as automatic test
/// suites, using only the structural facts the build step recorded.
pub struct TestClassifier<I> {
    introspector: I,
}

impl<I: Introspect> TestClassifier<I> {
    pub fn new(introspector: I) -> Self {
        Self { introspector }
    }

    /// Per-name predicate: true iff the artifact qualifies as a runnable
    /// test suite. Independent across names and stable across calls.
    ///
    /// A metadata load failure excludes only the affected artifact; the
    /// failure is reported on the diagnostic stream and never aborts the
    /// run.
    pub fn is_test_unit(&self, name: &ArtifactName) -> bool {
        let meta = match self.introspector.introspect(name) {
            Ok(meta) => meta,
            Err(err) => {
                warn!(artifact = %name, "failed to load artifact: {err}");
                return false;
            }
        };
        if meta.is_abstract {
            trace!(artifact = %name, "excluded: abstract");
            return false;
        }
        if let Some(runner) = &meta.runner {
            // A custom strategy knows how to run itself; the constructor
            // and marker checks do not apply.
            trace!(artifact = %name, runner = %runner, "included: custom runner");
            return true;
        }
        if !meta.has_no_arg_constructor() {
            trace!(artifact = %name, "excluded: no zero-argument constructor");
            return false;
        }
        meta.has_test_method()
    }
}
