//! Accelerator (global hotkey chord) types.
//!
//! This module provides:
//! - Parsing of accelerator strings (`"CommandOrControl+Shift+K"`, `"cmd+shift+k"`)
//! - Canonical, hashable `AcceleratorKey` values used as registry keys
//! - Trust class classification (media keys vs. everything else)
//! - Conversion to the `global-hotkey` crate's `HotKey`
//!
//! # Example
//!
//! ```
//! use hotkey_registry::accelerator::{AcceleratorKey, KeyClass};
//!
//! let key = AcceleratorKey::parse("ctrl+shift+k").unwrap();
//! assert_eq!(key.to_canonical_string(), "ctrl+shift+k");
//! assert_eq!(key.key_class(), KeyClass::Standard);
//! ```

mod hotkey_compat;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

pub use types::{
    canonicalize_key, is_known_key, is_media_key, is_trust_gated_key, AcceleratorKey, AcceleratorParseError, KeyClass,
    Modifiers, Platform,
};

pub use hotkey_compat::{key_to_code, to_hotkey, to_hotkey_modifiers};
