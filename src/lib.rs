//! Hotkey Registry - process-wide global keyboard shortcuts
//!
//! Maps accelerators ("CommandOrControl+Shift+K", "MediaPlayPause") to
//! callbacks, installs the matching OS hooks through a pluggable listener,
//! and dispatches key events back to the owning registry.
//!
//! ```rust
//! use std::sync::Arc;
//! use hotkey_registry::{AcceleratorKey, AllowAll, CallbackBinding, HotkeyRegistry, InMemoryListener};
//!
//! let listener = Arc::new(InMemoryListener::new());
//! let registry = HotkeyRegistry::new(listener.clone(), Arc::new(AllowAll));
//!
//! let key = AcceleratorKey::parse("Ctrl+Shift+K").unwrap();
//! assert!(registry.register(&key, CallbackBinding::new(|| println!("pressed"))));
//! assert!(listener.press(&key));
//! ```

pub mod accelerator;
pub mod binding;
pub mod config;
pub mod error;
pub mod listener;
pub mod logging;
pub mod registry;
pub mod trust;

pub use accelerator::{AcceleratorKey, AcceleratorParseError, KeyClass, Modifiers};
pub use binding::{CallbackBinding, HotkeyHandler};
pub use error::{ErrorSeverity, HotkeyError, Result, ResultExt};
pub use listener::{
    GlobalHotkeyListener, HookOwner, InMemoryListener, KeyEventSink, ListenerAdapter,
    ListenerError, OwnerId,
};
pub use registry::{HotkeyRegistry, RegistrationEntry};
pub use trust::{AllowAll, DenyClasses, PlatformTrustGate, TrustGate, TrustGateMode};
