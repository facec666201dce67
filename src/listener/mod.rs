//! OS listener boundary.
//!
//! A [`ListenerAdapter`] installs and removes OS-level hooks on behalf of a
//! registry. Several registries may share one adapter; each passes a
//! [`HookOwner`] so that key events are routed back to the right registry
//! through its [`KeyEventSink`].
//!
//! Implementations:
//! - [`GlobalHotkeyListener`] - the real OS listener via the `global-hotkey` crate
//! - [`InMemoryListener`] - a process-local simulated namespace (dry runs, tests)

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use thiserror::Error;

use crate::accelerator::AcceleratorKey;

mod global;
mod memory;

pub use global::GlobalHotkeyListener;
pub use memory::InMemoryListener;

/// Errors reported by a listener adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// Another owner (in this process or another one) holds the accelerator.
    #[error("accelerator '{0}' is already claimed")]
    AlreadyClaimed(AcceleratorKey),
    /// The hook is not installed for this owner.
    #[error("no hook installed for '{0}'")]
    NotInstalled(AcceleratorKey),
    #[error("OS error: {0}")]
    Os(String),
}

/// Process-unique identity of a registry instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

static NEXT_OWNER_ID: AtomicU64 = AtomicU64::new(1);

impl OwnerId {
    pub fn next() -> Self {
        Self(NEXT_OWNER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}

/// Inbound key events from an adapter.
pub trait KeyEventSink: Send + Sync {
    fn notify_key_pressed(&self, key: &AcceleratorKey);
}

/// Owner token handed to the adapter on install and echoed back on dispatch.
///
/// Holds the sink weakly: a dropped registry is never kept alive by the
/// adapter's routing table.
#[derive(Clone)]
pub struct HookOwner {
    id: OwnerId,
    sink: Weak<dyn KeyEventSink>,
}

impl HookOwner {
    pub fn new(id: OwnerId, sink: Weak<dyn KeyEventSink>) -> Self {
        Self { id, sink }
    }

    pub fn id(&self) -> OwnerId {
        self.id
    }

    /// The owner's sink, if it is still alive.
    pub fn sink(&self) -> Option<Arc<dyn KeyEventSink>> {
        self.sink.upgrade()
    }
}

impl fmt::Debug for HookOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookOwner")
            .field("id", &self.id)
            .field("alive", &(self.sink.strong_count() > 0))
            .finish()
    }
}

/// Thin interface to the OS hook installer/remover.
pub trait ListenerAdapter: Send + Sync {
    /// Install an OS hook for `key` on behalf of `owner`.
    ///
    /// Fails with [`ListenerError::AlreadyClaimed`] when any owner already
    /// holds the accelerator.
    fn install_hook(&self, key: &AcceleratorKey, owner: &HookOwner) -> Result<(), ListenerError>;

    /// Remove the hook for `key` owned by `owner`.
    fn remove_hook(&self, key: &AcceleratorKey, owner: OwnerId) -> Result<(), ListenerError>;

    /// Remove every hook owned by `owner`, leaving other owners untouched.
    fn remove_all_hooks_for_owner(&self, owner: OwnerId);

    /// Whether events for `key` are currently routed to `owner`.
    fn is_routed(&self, key: &AcceleratorKey, owner: OwnerId) -> bool;
}

/// Route a key event to an owner's sink. Returns `false` if the owner is gone.
pub(crate) fn deliver(owner: &HookOwner, key: &AcceleratorKey) -> bool {
    match owner.sink() {
        Some(sink) => {
            sink.notify_key_pressed(key);
            true
        }
        None => false,
    }
}
