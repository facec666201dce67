//! Simulated accelerator namespace.
//!
//! Behaves like the OS listener without touching the OS: accelerators are
//! claimed first-come, other processes can be simulated with
//! [`InMemoryListener::claim_external`], and key events are injected with
//! [`InMemoryListener::press`]. Used by `--dry-run` and by tests.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{deliver, HookOwner, ListenerAdapter, ListenerError, OwnerId};
use crate::accelerator::AcceleratorKey;

#[derive(Default)]
struct MemoryState {
    hooks: HashMap<AcceleratorKey, HookOwner>,
    /// Accelerators held by "another process".
    external: HashSet<AcceleratorKey>,
    /// Hooks whose removal failed; still claimed, no longer routed.
    leaked: HashSet<AcceleratorKey>,
    fail_removals: bool,
}

#[derive(Default)]
pub struct InMemoryListener {
    state: Mutex<MemoryState>,
}

impl InMemoryListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as held by another process.
    pub fn claim_external(&self, key: AcceleratorKey) {
        self.state.lock().external.insert(key);
    }

    pub fn release_external(&self, key: &AcceleratorKey) {
        self.state.lock().external.remove(key);
    }

    /// Make subsequent removals report an OS error.
    pub fn fail_removals(&self, fail: bool) {
        self.state.lock().fail_removals = fail;
    }

    /// Simulate an OS key event. Returns `false` if nothing is hooked for `key`.
    pub fn press(&self, key: &AcceleratorKey) -> bool {
        // Clone the owner and drop the lock before calling into the sink
        let owner = self.state.lock().hooks.get(key).cloned();
        match owner {
            Some(owner) => {
                debug!(accelerator = %key, owner = %owner.id(), "Simulated key press");
                deliver(&owner, key)
            }
            None => {
                debug!(accelerator = %key, "Simulated key press with no hook");
                false
            }
        }
    }

    pub fn is_hooked(&self, key: &AcceleratorKey) -> bool {
        self.state.lock().hooks.contains_key(key)
    }

    /// Accelerators hooked for `owner`, sorted by canonical string.
    pub fn hooks_for(&self, owner: OwnerId) -> Vec<AcceleratorKey> {
        let state = self.state.lock();
        let mut keys: Vec<AcceleratorKey> = state
            .hooks
            .iter()
            .filter(|(_, o)| o.id() == owner)
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort_by_key(|k| k.to_canonical_string());
        keys
    }

    pub fn hook_count(&self) -> usize {
        self.state.lock().hooks.len()
    }
}

impl ListenerAdapter for InMemoryListener {
    fn install_hook(&self, key: &AcceleratorKey, owner: &HookOwner) -> Result<(), ListenerError> {
        let mut state = self.state.lock();
        if state.hooks.contains_key(key) || state.external.contains(key) || state.leaked.contains(key)
        {
            return Err(ListenerError::AlreadyClaimed(key.clone()));
        }
        state.hooks.insert(key.clone(), owner.clone());
        debug!(accelerator = %key, owner = %owner.id(), "Installed simulated hook");
        Ok(())
    }

    fn remove_hook(&self, key: &AcceleratorKey, owner: OwnerId) -> Result<(), ListenerError> {
        let mut state = self.state.lock();
        match state.hooks.get(key) {
            Some(existing) if existing.id() == owner => {}
            _ => return Err(ListenerError::NotInstalled(key.clone())),
        }
        state.hooks.remove(key);
        if state.fail_removals {
            state.leaked.insert(key.clone());
            warn!(accelerator = %key, "Simulated hook removal failure");
            return Err(ListenerError::Os("simulated removal failure".to_string()));
        }
        debug!(accelerator = %key, owner = %owner, "Removed simulated hook");
        Ok(())
    }

    fn remove_all_hooks_for_owner(&self, owner: OwnerId) {
        let mut state = self.state.lock();
        let before = state.hooks.len();
        state.hooks.retain(|_, o| o.id() != owner);
        debug!(
            owner = %owner,
            removed = before - state.hooks.len(),
            "Removed all simulated hooks for owner"
        );
    }

    fn is_routed(&self, key: &AcceleratorKey, owner: OwnerId) -> bool {
        self.state
            .lock()
            .hooks
            .get(key)
            .is_some_and(|o| o.id() == owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::KeyEventSink;
    use std::sync::Arc;

    struct Recorder(Mutex<Vec<AcceleratorKey>>);

    impl KeyEventSink for Recorder {
        fn notify_key_pressed(&self, key: &AcceleratorKey) {
            self.0.lock().push(key.clone());
        }
    }

    fn key(s: &str) -> AcceleratorKey {
        AcceleratorKey::parse(s).unwrap()
    }

    fn owner(sink: &Arc<Recorder>) -> HookOwner {
        let sink: Arc<dyn KeyEventSink> = sink.clone();
        HookOwner::new(OwnerId::next(), Arc::downgrade(&sink))
    }

    #[test]
    fn test_first_owner_wins() {
        let listener = InMemoryListener::new();
        let a = Arc::new(Recorder(Mutex::new(Vec::new())));
        let b = Arc::new(Recorder(Mutex::new(Vec::new())));
        let (oa, ob) = (owner(&a), owner(&b));

        listener.install_hook(&key("ctrl+k"), &oa).unwrap();
        assert_eq!(
            listener.install_hook(&key("ctrl+k"), &ob),
            Err(ListenerError::AlreadyClaimed(key("ctrl+k")))
        );

        assert!(listener.press(&key("ctrl+k")));
        assert_eq!(a.0.lock().len(), 1);
        assert!(b.0.lock().is_empty());
    }

    #[test]
    fn test_external_claim_blocks_install() {
        let listener = InMemoryListener::new();
        let a = Arc::new(Recorder(Mutex::new(Vec::new())));
        listener.claim_external(key("alt+space"));
        assert!(listener.install_hook(&key("alt+space"), &owner(&a)).is_err());

        listener.release_external(&key("alt+space"));
        assert!(listener.install_hook(&key("alt+space"), &owner(&a)).is_ok());
    }

    #[test]
    fn test_remove_only_own_hooks() {
        let listener = InMemoryListener::new();
        let a = Arc::new(Recorder(Mutex::new(Vec::new())));
        let b = Arc::new(Recorder(Mutex::new(Vec::new())));
        let (oa, ob) = (owner(&a), owner(&b));

        listener.install_hook(&key("f1"), &oa).unwrap();
        listener.install_hook(&key("f2"), &oa).unwrap();
        listener.install_hook(&key("f3"), &ob).unwrap();

        assert_eq!(
            listener.remove_hook(&key("f3"), oa.id()),
            Err(ListenerError::NotInstalled(key("f3")))
        );

        listener.remove_all_hooks_for_owner(oa.id());
        assert!(listener.hooks_for(oa.id()).is_empty());
        assert_eq!(listener.hooks_for(ob.id()), vec![key("f3")]);
    }

    #[test]
    fn test_failed_removal_leaks_claim_but_stops_routing() {
        let listener = InMemoryListener::new();
        let a = Arc::new(Recorder(Mutex::new(Vec::new())));
        let oa = owner(&a);

        listener.install_hook(&key("f5"), &oa).unwrap();
        listener.fail_removals(true);
        assert!(listener.remove_hook(&key("f5"), oa.id()).is_err());

        assert!(!listener.press(&key("f5")));
        assert!(!listener.is_routed(&key("f5"), oa.id()));
        assert!(listener.install_hook(&key("f5"), &oa).is_err());
    }

    #[test]
    fn test_is_routed_checks_owner() {
        let listener = InMemoryListener::new();
        let a = Arc::new(Recorder(Mutex::new(Vec::new())));
        let b = Arc::new(Recorder(Mutex::new(Vec::new())));
        let (oa, ob) = (owner(&a), owner(&b));

        listener.install_hook(&key("ctrl+r"), &oa).unwrap();
        assert!(listener.is_routed(&key("ctrl+r"), oa.id()));
        assert!(!listener.is_routed(&key("ctrl+r"), ob.id()));

        listener.remove_hook(&key("ctrl+r"), oa.id()).unwrap();
        assert!(!listener.is_routed(&key("ctrl+r"), oa.id()));
    }
}
