//! Global hotkey registry.
//!
//! Owns the accelerator -> callback map for one owner and keeps it in lockstep
//! with the hooks installed through a [`ListenerAdapter`]: every registered
//! accelerator has a live hook owned by this registry, and every hook owned by
//! this registry has an entry.
//!
//! Registration is all-or-nothing. A batch either ends with every accelerator
//! registered and hooked, or with none of the newly requested ones hooked.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::ReentrantMutex;
use tracing::{debug, info, warn};

use crate::accelerator::{AcceleratorKey, KeyClass};
use crate::binding::CallbackBinding;
use crate::debug_panic;
use crate::error::{HotkeyError, Result, ResultExt};
use crate::listener::{HookOwner, KeyEventSink, ListenerAdapter, ListenerError, OwnerId};
use crate::trust::TrustGate;

/// One registered accelerator and the callback bound to it.
#[derive(Clone, Debug)]
pub struct RegistrationEntry {
    pub key: AcceleratorKey,
    pub binding: CallbackBinding,
}

#[derive(Default)]
struct RegistryState {
    entries: HashMap<AcceleratorKey, RegistrationEntry>,
}

/// Tracks which accelerators this owner holds and dispatches key events to
/// their callbacks.
///
/// Always handled through an `Arc` so the listener can route events back via
/// a weak reference. Dropping the last `Arc` unregisters every hook.
pub struct HotkeyRegistry {
    owner: OwnerId,
    this: Weak<HotkeyRegistry>,
    adapter: Arc<dyn ListenerAdapter>,
    trust: Arc<dyn TrustGate>,
    /// Held for the whole of each operation, including callback invocation.
    /// Re-entrant so a callback may call back into the registry.
    state: ReentrantMutex<RefCell<RegistryState>>,
}

impl HotkeyRegistry {
    pub fn new(adapter: Arc<dyn ListenerAdapter>, trust: Arc<dyn TrustGate>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            owner: OwnerId::next(),
            this: this.clone(),
            adapter,
            trust,
            state: ReentrantMutex::new(RefCell::new(RegistryState::default())),
        })
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    fn hook_owner(&self) -> HookOwner {
        let sink: Weak<dyn KeyEventSink> = self.this.clone();
        HookOwner::new(self.owner, sink)
    }

    /// Fail closed for gated classes; never prompts.
    fn check_trust(&self, key: &AcceleratorKey) -> Result<()> {
        let class = key.key_class();
        if class == KeyClass::Standard {
            return Ok(());
        }
        if self.trust.is_permitted_class(class) {
            Ok(())
        } else {
            Err(HotkeyError::TrustDenied {
                accelerator: key.clone(),
            })
        }
    }

    fn install(&self, key: &AcceleratorKey, owner: &HookOwner) -> Result<()> {
        self.adapter
            .install_hook(key, owner)
            .map_err(|e| match e {
                ListenerError::AlreadyClaimed(_) => HotkeyError::AlreadyClaimed {
                    accelerator: key.clone(),
                },
                other => HotkeyError::Rejected {
                    accelerator: key.clone(),
                    reason: other.to_string(),
                },
            })
    }

    /// Undo the hooks installed by a failed batch, newest first.
    fn roll_back(&self, installed: &[AcceleratorKey]) {
        for key in installed.iter().rev() {
            self.adapter.remove_hook(key, self.owner).warn_on_err();
        }
        if !installed.is_empty() {
            debug!(
                category = "HOTKEY",
                owner = %self.owner,
                count = installed.len(),
                "Rolled back partially installed batch"
            );
        }
    }

    /// Register every accelerator in `keys` to `binding`, or none of them.
    ///
    /// Accelerators this registry already holds (or that repeat within the
    /// batch) are rebound without reinstalling their hook; if the batch fails
    /// they keep their previous binding.
    pub fn try_register_all(&self, keys: &[AcceleratorKey], binding: CallbackBinding) -> Result<()> {
        let entries: Vec<RegistrationEntry> = keys
            .iter()
            .map(|key| RegistrationEntry {
                key: key.clone(),
                binding: binding.clone(),
            })
            .collect();
        self.try_register_entries(&entries)
    }

    /// Register each entry with its own binding, all-or-nothing.
    ///
    /// Same rules as [`try_register_all`](Self::try_register_all). Where a key
    /// repeats, the last entry's binding wins.
    pub fn try_register_entries(&self, entries: &[RegistrationEntry]) -> Result<()> {
        let guard = self.state.lock();
        let owner = self.hook_owner();
        let mut installed: Vec<AcceleratorKey> = Vec::new();

        for RegistrationEntry { key, .. } in entries {
            if let Err(e) = self.check_trust(key) {
                self.roll_back(&installed);
                return Err(e);
            }

            let already_held = guard.borrow().entries.contains_key(key) || installed.contains(key);
            if already_held {
                debug!(category = "HOTKEY", accelerator = %key, "Rebinding held accelerator");
                continue;
            }

            if let Err(e) = self.install(key, &owner) {
                self.roll_back(&installed);
                return Err(e);
            }
            installed.push(key.clone());
        }

        let mut state = guard.borrow_mut();
        for entry in entries {
            state.entries.insert(entry.key.clone(), entry.clone());
        }

        info!(
            category = "HOTKEY",
            owner = %self.owner,
            requested = entries.len(),
            installed = installed.len(),
            "Registered accelerator batch"
        );
        Ok(())
    }

    /// Boolean form of [`try_register_all`](Self::try_register_all).
    pub fn register_all(&self, keys: &[AcceleratorKey], binding: CallbackBinding) -> bool {
        match self.try_register_all(keys, binding) {
            Ok(()) => true,
            Err(e) => {
                warn!(category = "HOTKEY", error = %e, "Accelerator batch not registered");
                false
            }
        }
    }

    /// Register a single accelerator.
    ///
    /// Registering an accelerator this registry already holds replaces its
    /// binding; the OS hook stays in place.
    pub fn try_register(&self, key: &AcceleratorKey, binding: CallbackBinding) -> Result<()> {
        let guard = self.state.lock();
        self.check_trust(key)?;

        let already_held = guard.borrow().entries.contains_key(key);
        if already_held {
            debug!(category = "HOTKEY", accelerator = %key, "Rebinding held accelerator");
        } else {
            self.install(key, &self.hook_owner())?;
        }

        guard.borrow_mut().entries.insert(
            key.clone(),
            RegistrationEntry {
                key: key.clone(),
                binding,
            },
        );
        info!(category = "HOTKEY", accelerator = %key, owner = %self.owner, "Registered accelerator");
        Ok(())
    }

    /// Boolean form of [`try_register`](Self::try_register).
    pub fn register(&self, key: &AcceleratorKey, binding: CallbackBinding) -> bool {
        match self.try_register(key, binding) {
            Ok(()) => true,
            Err(e) => {
                warn!(category = "HOTKEY", error = %e, "Accelerator not registered");
                false
            }
        }
    }

    /// Unregister `key`. A no-op if it isn't registered.
    ///
    /// Never fails: if the OS refuses to remove the hook the entry is still
    /// dropped and the failure is logged.
    pub fn unregister(&self, key: &AcceleratorKey) {
        let guard = self.state.lock();
        let removed = guard.borrow_mut().entries.remove(key);
        if removed.is_none() {
            return;
        }

        if let Err(e) = self.adapter.remove_hook(key, self.owner) {
            warn!(
                category = "HOTKEY",
                accelerator = %key,
                error = %e,
                "Failed to remove hook, continuing"
            );
        }
        info!(category = "HOTKEY", accelerator = %key, owner = %self.owner, "Unregistered accelerator");
    }

    pub fn unregister_some(&self, keys: &[AcceleratorKey]) {
        let _guard = self.state.lock();
        for key in keys {
            self.unregister(key);
        }
    }

    pub fn is_registered(&self, key: &AcceleratorKey) -> bool {
        self.state.lock().borrow().entries.contains_key(key)
    }

    /// Drop every entry and every hook owned by this registry.
    pub fn unregister_all(&self) {
        let guard = self.state.lock();
        let count = {
            let mut state = guard.borrow_mut();
            let count = state.entries.len();
            state.entries.clear();
            count
        };
        self.adapter.remove_all_hooks_for_owner(self.owner);
        if count > 0 {
            info!(category = "HOTKEY", owner = %self.owner, count, "Unregistered all accelerators");
        }
    }

    /// Registered accelerators, sorted by canonical string.
    pub fn registered_keys(&self) -> Vec<AcceleratorKey> {
        let guard = self.state.lock();
        let mut keys: Vec<AcceleratorKey> = guard.borrow().entries.keys().cloned().collect();
        keys.sort_by_key(|k| k.to_canonical_string());
        keys
    }

    pub fn len(&self) -> usize {
        self.state.lock().borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch a key event to the bound callback, synchronously, exactly once.
    ///
    /// An event that was in flight when its accelerator was unregistered is
    /// dropped. An event for an accelerator the listener still routes here
    /// but this registry doesn't hold means the two have drifted apart.
    pub fn on_key_pressed(&self, key: &AcceleratorKey) {
        let guard = self.state.lock();
        // Release the borrow before invoking so the callback can re-enter
        let binding = guard.borrow().entries.get(key).map(|e| e.binding.clone());

        match binding {
            Some(binding) => {
                debug!(
                    category = "HOTKEY",
                    accelerator = %key,
                    binding = binding.label().unwrap_or("<unnamed>"),
                    "Dispatching hotkey"
                );
                binding.invoke();
            }
            None if !self.adapter.is_routed(key, self.owner) => {
                debug!(
                    category = "HOTKEY",
                    accelerator = %key,
                    owner = %self.owner,
                    "Dropping key event for accelerator unregistered in flight"
                );
            }
            None => {
                debug_panic!(
                    "Key event for unregistered accelerator '{}' (owner {})",
                    key,
                    self.owner
                );
            }
        }
    }
}

impl KeyEventSink for HotkeyRegistry {
    fn notify_key_pressed(&self, key: &AcceleratorKey) {
        self.on_key_pressed(key);
    }
}

impl Drop for HotkeyRegistry {
    fn drop(&mut self) {
        self.unregister_all();
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
