//! OS listener backed by the `global-hotkey` crate.
//!
//! One `GlobalHotkeyListener` wraps one `GlobalHotKeyManager` and can be
//! shared by several registries. It keeps a routing table from hotkey id to
//! the owning registry so that an OS event reaches only the registry that
//! installed the hook.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;

use global_hotkey::{
    hotkey::HotKey, Error as HotkeyError, GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::{deliver, HookOwner, ListenerAdapter, ListenerError, OwnerId};
use crate::accelerator::{to_hotkey, AcceleratorKey};

struct Route {
    key: AcceleratorKey,
    hotkey: HotKey,
    owner: HookOwner,
}

pub struct GlobalHotkeyListener {
    /// The underlying global hotkey manager
    manager: Mutex<GlobalHotKeyManager>,
    /// Maps hotkey ID -> installed hook
    routes: Mutex<HashMap<u32, Route>>,
}

/// Translate a registration error into the adapter's taxonomy.
fn map_register_error(key: &AcceleratorKey, e: HotkeyError) -> ListenerError {
    match e {
        HotkeyError::AlreadyRegistered(_) => ListenerError::AlreadyClaimed(key.clone()),
        HotkeyError::FailedToRegister(msg) => ListenerError::Os(format!(
            "system rejected '{}': {}. It may be reserved by the OS or another app",
            key, msg
        )),
        HotkeyError::OsError(os_err) => {
            ListenerError::Os(format!("OS error registering '{}': {}", key, os_err))
        }
        other => ListenerError::Os(format!("failed to register '{}': {}", key, other)),
    }
}

impl GlobalHotkeyListener {
    /// Create the listener.
    /// NOTE: On macOS this must be called on the main thread; on Windows key
    /// events are only delivered while the creating thread pumps messages.
    pub fn new() -> Result<Self, ListenerError> {
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| ListenerError::Os(format!("failed to create hotkey manager: {}", e)))?;
        Ok(Self {
            manager: Mutex::new(manager),
            routes: Mutex::new(HashMap::new()),
        })
    }

    /// Route one OS event to its owner. Returns `true` if a sink received it.
    ///
    /// Only key presses are delivered; releases are ignored.
    pub fn dispatch(&self, event: &GlobalHotKeyEvent) -> bool {
        if event.state != HotKeyState::Pressed {
            return false;
        }

        let route = self
            .routes
            .lock()
            .get(&event.id)
            .map(|r| (r.key.clone(), r.owner.clone()));

        match route {
            Some((key, owner)) => {
                debug!(id = event.id, accelerator = %key, owner = %owner.id(), "Hotkey pressed");
                if !deliver(&owner, &key) {
                    warn!(accelerator = %key, "Hotkey owner is gone, dropping event");
                    return false;
                }
                true
            }
            None => {
                debug!(id = event.id, "Event for a hotkey not installed by this listener");
                false
            }
        }
    }

    /// Start a thread that drains `GlobalHotKeyEvent::receiver()` and
    /// dispatches each event. The thread exits once the listener is dropped
    /// and the next event arrives, or when the channel closes.
    pub fn spawn_event_pump(self: &Arc<Self>) -> JoinHandle<()> {
        let listener = Arc::downgrade(self);
        std::thread::spawn(move || {
            let receiver = GlobalHotKeyEvent::receiver();
            info!("Hotkey listener thread started");
            while let Ok(event) = receiver.recv() {
                match listener.upgrade() {
                    Some(listener) => {
                        listener.dispatch(&event);
                    }
                    None => break,
                }
            }
            info!("Hotkey listener thread stopped");
        })
    }

    /// Number of hooks currently installed through this listener.
    pub fn hook_count(&self) -> usize {
        self.routes.lock().len()
    }
}

impl ListenerAdapter for GlobalHotkeyListener {
    fn install_hook(&self, key: &AcceleratorKey, owner: &HookOwner) -> Result<(), ListenerError> {
        let hotkey = to_hotkey(key)
            .ok_or_else(|| ListenerError::Os(format!("no key code for '{}'", key)))?;
        let id = hotkey.id();

        // Hold the routing table across the OS call so two installers can't race
        let mut routes = self.routes.lock();
        if routes.contains_key(&id) {
            return Err(ListenerError::AlreadyClaimed(key.clone()));
        }

        self.manager
            .lock()
            .register(hotkey)
            .map_err(|e| map_register_error(key, e))?;

        routes.insert(
            id,
            Route {
                key: key.clone(),
                hotkey,
                owner: owner.clone(),
            },
        );
        info!(accelerator = %key, id, owner = %owner.id(), "Registered global hotkey");
        Ok(())
    }

    fn remove_hook(&self, key: &AcceleratorKey, owner: OwnerId) -> Result<(), ListenerError> {
        let hotkey = to_hotkey(key).ok_or_else(|| ListenerError::NotInstalled(key.clone()))?;
        let id = hotkey.id();

        let mut routes = self.routes.lock();
        if !routes.get(&id).is_some_and(|r| r.owner.id() == owner) {
            return Err(ListenerError::NotInstalled(key.clone()));
        }
        let route = routes
            .remove(&id)
            .ok_or_else(|| ListenerError::NotInstalled(key.clone()))?;

        self.manager
            .lock()
            .unregister(route.hotkey)
            .map_err(|e| ListenerError::Os(format!("failed to unregister '{}': {}", key, e)))?;

        info!(accelerator = %key, id, owner = %owner, "Unregistered global hotkey");
        Ok(())
    }

    fn remove_all_hooks_for_owner(&self, owner: OwnerId) {
        let mut routes = self.routes.lock();
        let ids: Vec<u32> = routes
            .iter()
            .filter(|(_, r)| r.owner.id() == owner)
            .map(|(id, _)| *id)
            .collect();

        let manager = self.manager.lock();
        for id in ids {
            if let Some(route) = routes.remove(&id) {
                if let Err(e) = manager.unregister(route.hotkey) {
                    // Continue anyway - the routing table is already updated
                    warn!(accelerator = %route.key, error = %e, "Failed to unregister hotkey");
                }
            }
        }
        info!(owner = %owner, "Unregistered all global hotkeys for owner");
    }

    fn is_routed(&self, key: &AcceleratorKey, owner: OwnerId) -> bool {
        let Some(hotkey) = to_hotkey(key) else {
            return false;
        };
        self.routes
            .lock()
            .get(&hotkey.id())
            .is_some_and(|r| r.owner.id() == owner)
    }
}

impl Drop for GlobalHotkeyListener {
    fn drop(&mut self) {
        let routes = std::mem::take(self.routes.get_mut());
        let manager = self.manager.lock();
        for route in routes.into_values() {
            if let Err(e) = manager.unregister(route.hotkey) {
                warn!(accelerator = %route.key, error = %e, "Failed to unregister hotkey on shutdown");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // GlobalHotKeyManager needs a display server / event loop, so creation may
    // fail in CI. Tests that need a manager skip themselves when it does.

    fn key(s: &str) -> AcceleratorKey {
        AcceleratorKey::parse(s).unwrap()
    }

    #[test]
    fn test_already_registered_maps_to_claimed() {
        let k = key("ctrl+shift+a");
        let hotkey = to_hotkey(&k).unwrap();
        let mapped = map_register_error(&k, HotkeyError::AlreadyRegistered(hotkey));
        assert_eq!(mapped, ListenerError::AlreadyClaimed(k));
    }

    #[test]
    fn test_failed_to_register_maps_to_os() {
        let k = key("cmd+space");
        let mapped = map_register_error(&k, HotkeyError::FailedToRegister("reserved".into()));
        assert!(matches!(mapped, ListenerError::Os(msg) if msg.contains("reserved")));
    }

    #[test]
    fn test_listener_starts_empty() {
        if let Ok(listener) = GlobalHotkeyListener::new() {
            assert_eq!(listener.hook_count(), 0);
        }
    }

    #[test]
    fn test_release_events_are_ignored() {
        if let Ok(listener) = GlobalHotkeyListener::new() {
            let event = GlobalHotKeyEvent {
                id: to_hotkey(&key("f13")).unwrap().id(),
                state: HotKeyState::Released,
            };
            assert!(!listener.dispatch(&event));
        }
    }

    #[cfg(feature = "system-tests")]
    #[test]
    fn test_registry_receives_dispatched_press() {
        use crate::binding::CallbackBinding;
        use crate::registry::HotkeyRegistry;
        use crate::trust::AllowAll;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let Ok(listener) = GlobalHotkeyListener::new() else {
            return;
        };
        let listener = Arc::new(listener);
        let registry = HotkeyRegistry::new(listener.clone(), Arc::new(AllowAll));
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let k = key("ctrl+alt+shift+f19");

        if !registry.register(&k, CallbackBinding::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })) {
            return;
        }
        assert_eq!(listener.hook_count(), 1);

        let event = GlobalHotKeyEvent {
            id: to_hotkey(&k).unwrap().id(),
            state: HotKeyState::Pressed,
        };
        assert!(listener.dispatch(&event));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(listener.is_routed(&k, registry.owner()));

        drop(registry);
        assert_eq!(listener.hook_count(), 0);
    }

    #[test]
    fn test_unknown_hook_is_not_routed() {
        if let Ok(listener) = GlobalHotkeyListener::new() {
            assert!(!listener.is_routed(&key("ctrl+alt+f15"), OwnerId::next()));
        }
    }

    #[test]
    fn test_remove_unknown_hook_is_not_installed() {
        if let Ok(listener) = GlobalHotkeyListener::new() {
            let k = key("ctrl+alt+f14");
            assert_eq!(
                listener.remove_hook(&k, OwnerId::next()),
                Err(ListenerError::NotInstalled(k))
            );
        }
    }
}
