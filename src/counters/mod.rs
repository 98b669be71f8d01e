//! Operation counters for sorting runs
//!
//! [`CounterRegistry`] tracks one anonymous ("global") tally of comparisons and
//! swaps, plus any number of independently named tallies ("instances"). Every
//! increment and read resolves its target in the same order:
//!
//! 1. the instance name passed explicitly, if any
//! 2. the ambient *current instance*, if one is selected
//! 3. the global tally
//!
//! Algorithm code only ever calls the unqualified forms, so the same producer
//! counts into the global tally when run solo and into a named tally when it is
//! one of two arena competitors.
//!
//! The registry is an ordinary value owned by whoever drives the run (a
//! [`Player`](crate::playback::Player) or an [`Arena`](crate::arena::Arena)),
//! never a process-wide global. The ambient selector should be set through
//! [`CounterRegistry::scope`], whose guard restores the previous selector when
//! dropped.

use rustc_hash::FxHashMap;
use std::ops::{Deref, DerefMut};

/// A pair of operation tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Counts {
    pub comparisons: u64,
    pub swaps: u64,
}

impl Counts {
    pub fn new(comparisons: u64, swaps: u64) -> Self {
        Counts { comparisons, swaps }
    }
}

/// Global and named comparison/swap tallies with an ambient selector
#[derive(Debug, Clone, Default)]
pub struct CounterRegistry {
    global: Counts,
    instances: FxHashMap<String, Counts>,
    current: Option<String>,
}

impl CounterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the addressed tally, creating a named instance on first reference
    pub fn reset(&mut self, instance: Option<&str>) {
        match instance {
            None => self.global = Counts::default(),
            Some(name) => {
                self.instances.insert(name.to_string(), Counts::default());
            }
        }
    }

    /// Select the ambient instance; `None` restores global targeting
    pub fn set_current(&mut self, instance: Option<&str>) {
        self.current = instance.map(str::to_string);
    }

    /// The currently selected ambient instance
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn increment_comparisons(&mut self, instance: Option<&str>) {
        self.target_mut(instance).comparisons += 1;
    }

    pub fn increment_swaps(&mut self, instance: Option<&str>) {
        self.target_mut(instance).swaps += 1;
    }

    /// Read a tally. Instances that were never created read as zero.
    pub fn read(&self, instance: Option<&str>) -> Counts {
        match instance.or(self.current.as_deref()) {
            None => self.global,
            Some(name) => self.instances.get(name).copied().unwrap_or_default(),
        }
    }

    /// Overwrite a tally with absolute totals.
    ///
    /// Used when restoring a snapshot: the tally is reset and the stored totals
    /// reinstated, rather than rolled back arithmetically.
    pub fn set_absolute(&mut self, instance: Option<&str>, counts: Counts) {
        let name = instance
            .map(str::to_string)
            .or_else(|| self.current.clone());
        self.reset(name.as_deref());
        *self.target_mut(name.as_deref()) = counts;
    }

    /// Zero the global tally and discard every named instance.
    ///
    /// Also clears the ambient selector. Only meant for use between sessions.
    pub fn reset_all(&mut self) {
        self.global = Counts::default();
        self.instances.clear();
        self.current = None;
    }

    /// Whether a named instance has been created
    pub fn has_instance(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    /// Select `instance` as the ambient target until the returned guard drops.
    ///
    /// The previous selector is restored on drop, so nested scopes unwind.
    pub fn scope(&mut self, instance: &str) -> InstanceScope<'_> {
        let previous = self.current.replace(instance.to_string());
        tracing::trace!(instance, "counter scope entered");
        InstanceScope {
            registry: self,
            previous,
        }
    }

    fn target_mut(&mut self, instance: Option<&str>) -> &mut Counts {
        let name = match instance {
            Some(name) => Some(name),
            None => self.current.as_deref(),
        };
        match name {
            None => &mut self.global,
            Some(name) => self.instances.entry(name.to_string()).or_default(),
        }
    }
}

/// Guard holding an ambient instance selection
///
/// Dereferences to the registry so producers can be driven through it.
pub struct InstanceScope<'a> {
    registry: &'a mut CounterRegistry,
    previous: Option<String>,
}

impl Deref for InstanceScope<'_> {
    type Target = CounterRegistry;

    fn deref(&self) -> &CounterRegistry {
        &*self.registry
    }
}

impl DerefMut for InstanceScope<'_> {
    fn deref_mut(&mut self) -> &mut CounterRegistry {
        &mut *self.registry
    }
}

impl Drop for InstanceScope<'_> {
    fn drop(&mut self) {
        self.registry.current = self.previous.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_counting() {
        let mut registry = CounterRegistry::new();
        registry.increment_comparisons(None);
        registry.increment_comparisons(None);
        registry.increment_swaps(None);

        assert_eq!(registry.read(None), Counts::new(2, 1));
    }

    #[test]
    fn test_ambient_instance_isolated_from_global() {
        let mut registry = CounterRegistry::new();
        registry.set_current(Some("algo1"));
        registry.increment_comparisons(None);
        registry.increment_swaps(None);
        registry.increment_swaps(None);
        registry.set_current(None);

        assert_eq!(registry.read(None), Counts::default());
        assert_eq!(registry.read(Some("algo1")), Counts::new(1, 2));

        registry.reset_all();
        assert_eq!(registry.read(None), Counts::default());
        assert_eq!(registry.read(Some("algo1")), Counts::default());
        assert!(!registry.has_instance("algo1"));
    }

    #[test]
    fn test_explicit_instance_beats_ambient() {
        let mut registry = CounterRegistry::new();
        registry.set_current(Some("algo1"));
        registry.increment_comparisons(Some("algo2"));

        assert_eq!(registry.read(None), Counts::default());
        assert_eq!(registry.read(Some("algo2")).comparisons, 1);
    }

    #[test]
    fn test_unknown_instance_reads_zero() {
        let registry = CounterRegistry::new();
        assert_eq!(registry.read(Some("nobody")), Counts::default());
        assert!(!registry.has_instance("nobody"));
    }

    #[test]
    fn test_increment_autocreates_instance() {
        let mut registry = CounterRegistry::new();
        registry.increment_swaps(Some("late"));
        assert!(registry.has_instance("late"));
        assert_eq!(registry.read(Some("late")), Counts::new(0, 1));
    }

    #[test]
    fn test_reset_named_leaves_global() {
        let mut registry = CounterRegistry::new();
        registry.increment_comparisons(None);
        registry.increment_comparisons(Some("a"));
        registry.reset(Some("a"));

        assert_eq!(registry.read(Some("a")), Counts::default());
        assert_eq!(registry.read(None).comparisons, 1);
    }

    #[test]
    fn test_set_absolute() {
        let mut registry = CounterRegistry::new();
        for _ in 0..10 {
            registry.increment_comparisons(None);
        }
        registry.set_absolute(None, Counts::new(3, 4));
        assert_eq!(registry.read(None), Counts::new(3, 4));

        registry.set_absolute(Some("b"), Counts::new(7, 0));
        assert_eq!(registry.read(Some("b")), Counts::new(7, 0));
        assert_eq!(registry.read(None), Counts::new(3, 4));
    }

    #[test]
    fn test_scope_restores_selector() {
        let mut registry = CounterRegistry::new();
        {
            let mut scope = registry.scope("algo1");
            scope.increment_comparisons(None);
            {
                let mut inner = scope.scope("algo2");
                inner.increment_swaps(None);
                assert_eq!(inner.current(), Some("algo2"));
            }
            assert_eq!(scope.current(), Some("algo1"));
        }
        assert_eq!(registry.current(), None);
        assert_eq!(registry.read(Some("algo1")), Counts::new(1, 0));
        assert_eq!(registry.read(Some("algo2")), Counts::new(0, 1));
        assert_eq!(registry.read(None), Counts::default());
    }
}
