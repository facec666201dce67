//! Platform trust checks for restricted accelerator classes.
//!
//! On macOS a process only receives media transport keys through a global
//! listener once it is a trusted accessibility client. Registration consults
//! a [`TrustGate`] before installing a hook for such keys; it never prompts.
//!
//! ## Permissions
//!
//! Requires Accessibility permission in System Settings > Privacy & Security > Accessibility
//! for media keys on macOS. Other platforms have no trust concept.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::accelerator::KeyClass;

/// Read-only capability query against the platform's trust state.
pub trait TrustGate: Send + Sync {
    /// Whether accelerators of `class` may currently be hooked.
    ///
    /// Must not change platform state (no permission prompts).
    fn is_permitted_class(&self, class: KeyClass) -> bool;
}

/// Trust gate backed by the real platform permission state.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformTrustGate;

impl TrustGate for PlatformTrustGate {
    fn is_permitted_class(&self, class: KeyClass) -> bool {
        match class {
            KeyClass::Standard => true,
            KeyClass::MediaControl => has_accessibility_trust(),
        }
    }
}

/// Trust gate that permits every class.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl TrustGate for AllowAll {
    fn is_permitted_class(&self, _class: KeyClass) -> bool {
        true
    }
}

/// Trust gate that denies a fixed set of classes.
#[derive(Debug, Default, Clone)]
pub struct DenyClasses {
    denied: HashSet<KeyClass>,
}

impl DenyClasses {
    pub fn new(classes: impl IntoIterator<Item = KeyClass>) -> Self {
        Self {
            denied: classes.into_iter().collect(),
        }
    }
}

impl TrustGate for DenyClasses {
    fn is_permitted_class(&self, class: KeyClass) -> bool {
        !self.denied.contains(&class)
    }
}

/// Which trust gate to use, selected from configuration at startup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrustGateMode {
    #[default]
    Platform,
    AllowAll,
    DenyMedia,
}

pub fn trust_gate_for(mode: TrustGateMode) -> Arc<dyn TrustGate> {
    match mode {
        TrustGateMode::Platform => Arc::new(PlatformTrustGate),
        TrustGateMode::AllowAll => Arc::new(AllowAll),
        TrustGateMode::DenyMedia => Arc::new(DenyClasses::new([KeyClass::MediaControl])),
    }
}

/// Check if accessibility permissions are granted.
///
/// # Returns
/// `true` if permission is granted (always `true` off macOS), `false` otherwise.
#[cfg(target_os = "macos")]
#[instrument]
pub fn has_accessibility_trust() -> bool {
    let result = macos_accessibility_client::accessibility::application_is_trusted();
    debug!(granted = result, "Checked accessibility permission");
    result
}

#[cfg(not(target_os = "macos"))]
#[instrument]
pub fn has_accessibility_trust() -> bool {
    debug!("No accessibility trust concept on this platform");
    true
}

/// Request accessibility permissions (shows the system prompt on macOS).
///
/// Not used on the registration path, which only checks.
///
/// # Returns
/// `true` if permission is granted after the request, `false` otherwise.
#[instrument]
pub fn request_accessibility_trust() -> bool {
    info!("Requesting accessibility permission");
    #[cfg(target_os = "macos")]
    let result = macos_accessibility_client::accessibility::application_is_trusted_with_prompt();
    #[cfg(not(target_os = "macos"))]
    let result = true;

    if result {
        info!("Accessibility permission granted");
    } else {
        warn!("Accessibility permission denied or pending");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all_permits_everything() {
        assert!(AllowAll.is_permitted_class(KeyClass::Standard));
        assert!(AllowAll.is_permitted_class(KeyClass::MediaControl));
    }

    #[test]
    fn test_deny_classes() {
        let gate = DenyClasses::new([KeyClass::MediaControl]);
        assert!(gate.is_permitted_class(KeyClass::Standard));
        assert!(!gate.is_permitted_class(KeyClass::MediaControl));
    }

    #[test]
    fn test_platform_gate_always_permits_standard() {
        assert!(PlatformTrustGate.is_permitted_class(KeyClass::Standard));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_platform_gate_permits_media_off_macos() {
        assert!(PlatformTrustGate.is_permitted_class(KeyClass::MediaControl));
    }

    #[test]
    fn test_mode_selection() {
        assert!(!trust_gate_for(TrustGateMode::DenyMedia).is_permitted_class(KeyClass::MediaControl));
        assert!(trust_gate_for(TrustGateMode::AllowAll).is_permitted_class(KeyClass::MediaControl));
    }

    #[test]
    fn test_mode_deserializes_kebab_case() {
        let mode: TrustGateMode = serde_json::from_str("\"deny-media\"").unwrap();
        assert_eq!(mode, TrustGateMode::DenyMedia);
        assert_eq!(TrustGateMode::default(), TrustGateMode::Platform);
    }
}
