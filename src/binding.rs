//! Invocation targets bound to registered accelerators.

use std::fmt;
use std::sync::Arc;

/// Callback type for hotkey actions - uses Arc<dyn Fn()> for repeated invocation
pub type HotkeyHandler = Arc<dyn Fn() + Send + Sync>;

/// An opaque, cheaply clonable handle to a hotkey callback.
///
/// Clones share the same target. The registry entry holding a binding is its
/// only long-lived owner.
#[derive(Clone)]
pub struct CallbackBinding {
    handler: HotkeyHandler,
    label: Option<String>,
}

impl CallbackBinding {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            label: None,
        }
    }

    pub fn from_handler(handler: HotkeyHandler) -> Self {
        Self {
            handler,
            label: None,
        }
    }

    /// Attach a name used in log output.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Run the callback on the current thread.
    pub fn invoke(&self) {
        (self.handler)();
    }

    /// Whether both bindings point at the same callback.
    pub fn same_target(&self, other: &CallbackBinding) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl fmt::Debug for CallbackBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackBinding")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_invoke_runs_handler_each_time() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let binding = CallbackBinding::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        binding.invoke();
        binding.invoke();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clones_share_target() {
        let a = CallbackBinding::new(|| {}).with_label("toggle");
        let b = a.clone();
        let c = CallbackBinding::new(|| {});
        assert!(a.same_target(&b));
        assert!(!a.same_target(&c));
        assert_eq!(b.label(), Some("toggle"));
    }
}
