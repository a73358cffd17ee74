use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use sm_utils::TypeIdMap;

use crate::Error;
use crate::plan::PlanNode;

/// Compiled plans of one engine, keyed by the root type.
///
/// Plans are immutable once inserted, so a poisoned lock is recovered rather
/// than propagated.
pub(crate) struct PlanCache {
    plans: RwLock<TypeIdMap<Arc<PlanNode>>>,
}

impl PlanCache {
    #[inline]
    pub const fn new() -> Self {
        Self {
            plans: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the plan stored for `type_id`, compiling it on a miss.
    ///
    /// Compilation runs under the exclusive lock, so concurrent first uses of a
    /// type compile it once. A failed compilation is not stored.
    pub fn get_or_compile(
        &self,
        type_id: TypeId,
        compile: impl FnOnce() -> Result<PlanNode, Error>,
    ) -> Result<Arc<PlanNode>, Error> {
        if let Some(plan) = self.get(type_id) {
            log::trace!("plan cache hit for {type_id:?}");
            return Ok(plan);
        }

        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);

        // Another thread may have compiled it while we waited for the lock.
        if let Some(plan) = plans.get(&type_id) {
            return Ok(Arc::clone(plan));
        }

        let plan = Arc::new(compile()?);
        plans.insert(type_id, Arc::clone(&plan));
        Ok(plan)
    }

    #[inline]
    fn get(&self, type_id: TypeId) -> Option<Arc<PlanNode>> {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.plans.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn clear(&self) {
        self.plans.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::PlanCache;
    use crate::Error;
    use crate::plan::PlanNode;

    #[test]
    fn compiles_once() {
        let cache = PlanCache::new();
        let mut calls = 0;

        for _ in 0..3 {
            let plan = cache
                .get_or_compile(TypeId::of::<u8>(), || {
                    calls += 1;
                    Ok(PlanNode::String)
                })
                .unwrap();
            assert!(matches!(*plan, PlanNode::String));
        }

        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = PlanCache::new();

        let err = cache
            .get_or_compile(TypeId::of::<u8>(), || Err(Error::ConflictingOptions))
            .unwrap_err();
        assert!(matches!(err, Error::ConflictingOptions));
        assert_eq!(cache.len(), 0);

        cache
            .get_or_compile(TypeId::of::<u8>(), || Ok(PlanNode::StringSlice))
            .unwrap();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
