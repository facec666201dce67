//! Core accelerator types with proper error handling and platform-aware display.
//!
//! This module provides:
//! - `AcceleratorKey` - A global hotkey chord (modifiers + key)
//! - `Modifiers` - Modifier key flags (cmd, ctrl, alt, shift)
//! - `KeyClass` - Which trust class an accelerator belongs to
//! - `AcceleratorParseError` - Detailed parse errors for user feedback
//! - Platform-aware display (⌘⇧K on macOS, Ctrl+Shift+K on Windows/Linux)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing an accelerator string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcceleratorParseError {
    #[error("accelerator string is empty")]
    Empty,
    #[error("accelerator has no key, only modifiers")]
    MissingKey,
    #[error("unknown token '{0}' in accelerator")]
    UnknownToken(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// Modifier keys for an accelerator.
///
/// `cmd` is the Command key on macOS and the Super/Windows key elsewhere.
/// Use [`Modifiers::command_or_control`] for the platform's primary accelerator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub cmd: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    pub fn cmd() -> Self {
        Self {
            cmd: true,
            ..Default::default()
        }
    }
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    /// Command on macOS, Control everywhere else.
    pub fn command_or_control() -> Self {
        match Platform::current() {
            Platform::MacOS => Self::cmd(),
            Platform::Windows | Platform::Linux => Self::ctrl(),
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn any(&self) -> bool {
        self.cmd || self.ctrl || self.alt || self.shift
    }
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Platform enum for display formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        {
            Platform::MacOS
        }
        #[cfg(target_os = "windows")]
        {
            Platform::Windows
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            Platform::Linux
        }
    }
}

/// Trust class of an accelerator.
///
/// Some platforms only deliver certain keys to a global listener once the
/// process has been granted an extra permission (macOS gates media keys
/// behind accessibility trust).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyClass {
    Standard,
    MediaControl,
}

/// A global hotkey chord consisting of modifier keys and a main key.
///
/// Equality and hashing use the canonical key name and modifier set, so two
/// accelerators parsed from `"Ctrl+Shift+A"` and `"shift+control+a"` are the
/// same map key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AcceleratorKey {
    key: String,
    modifiers: Modifiers,
}

impl AcceleratorKey {
    pub fn new(key: &str, modifiers: Modifiers) -> Result<Self, AcceleratorParseError> {
        let canonical = canonicalize_key(key);
        if !is_known_key(&canonical) {
            return Err(AcceleratorParseError::UnknownKey(key.to_string()));
        }
        Ok(Self {
            key: canonical,
            modifiers,
        })
    }

    pub fn parse(s: &str) -> Result<Self, AcceleratorParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AcceleratorParseError::Empty);
        }

        let normalized = s.replace('+', " ");
        let parts: Vec<&str> = normalized.split_whitespace().collect();
        if parts.is_empty() {
            return Err(AcceleratorParseError::Empty);
        }

        let mut modifiers = Modifiers::default();
        let mut key_part: Option<&str> = None;

        for part in &parts {
            let part_lower = part.to_lowercase();
            match part_lower.as_str() {
                "commandorcontrol" | "cmdorctrl" | "cmdorcontrol" | "commandorctrl" => {
                    match Platform::current() {
                        Platform::MacOS => modifiers.cmd = true,
                        Platform::Windows | Platform::Linux => modifiers.ctrl = true,
                    }
                }
                "cmd" | "command" | "meta" | "super" | "win" | "⌘" => modifiers.cmd = true,
                "ctrl" | "control" | "ctl" | "^" | "⌃" => modifiers.ctrl = true,
                "alt" | "opt" | "option" | "altgr" | "⌥" => modifiers.alt = true,
                "shift" | "shft" | "⇧" => modifiers.shift = true,
                _ => {
                    if key_part.is_some() {
                        return Err(AcceleratorParseError::UnknownToken(part.to_string()));
                    }
                    key_part = Some(part);
                }
            }
        }

        let key = key_part.ok_or(AcceleratorParseError::MissingKey)?;
        Self::new(key, modifiers)
    }

    /// Canonical key name (`"a"`, `"f5"`, `"mediaplaypause"`).
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key_class(&self) -> KeyClass {
        if is_trust_gated_key(&self.key) {
            KeyClass::MediaControl
        } else {
            KeyClass::Standard
        }
    }

    /// Human readable text for this accelerator on the current platform.
    pub fn display_text(&self) -> String {
        self.display_for_platform(Platform::current())
    }

    pub fn display_for_platform(&self, platform: Platform) -> String {
        match platform {
            Platform::MacOS => self.display_macos(),
            Platform::Windows | Platform::Linux => self.display_other(),
        }
    }

    fn display_macos(&self) -> String {
        let mut s = String::new();
        if self.modifiers.ctrl {
            s.push('⌃');
        }
        if self.modifiers.alt {
            s.push('⌥');
        }
        if self.modifiers.shift {
            s.push('⇧');
        }
        if self.modifiers.cmd {
            s.push('⌘');
        }
        s.push_str(&self.key_display());
        s
    }

    fn display_other(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if self.modifiers.cmd {
            parts.push("Super".to_string());
        }
        parts.push(self.key_display_text());
        parts.join("+")
    }

    fn key_display(&self) -> String {
        match self.key.as_str() {
            "enter" => "↵",
            "escape" => "⎋",
            "tab" => "⇥",
            "space" => "␣",
            "backspace" => "⌫",
            "delete" => "⌦",
            "up" => "↑",
            "down" => "↓",
            "left" => "←",
            "right" => "→",
            "home" => "↖",
            "end" => "↘",
            "pageup" => "⇞",
            "pagedown" => "⇟",
            _ => return self.key_display_text(),
        }
        .to_string()
    }

    fn key_display_text(&self) -> String {
        match self.key.as_str() {
            "enter" => "Enter",
            "escape" => "Esc",
            "tab" => "Tab",
            "space" => "Space",
            "backspace" => "Backspace",
            "delete" => "Delete",
            "insert" => "Insert",
            "printscreen" => "PrintScreen",
            "up" => "Up",
            "down" => "Down",
            "left" => "Left",
            "right" => "Right",
            "home" => "Home",
            "end" => "End",
            "pageup" => "PageUp",
            "pagedown" => "PageDown",
            "mediaplaypause" => "Media Play/Pause",
            "medianexttrack" => "Media Next Track",
            "mediaprevioustrack" => "Media Previous Track",
            "mediastop" => "Media Stop",
            "volumeup" => "Volume Up",
            "volumedown" => "Volume Down",
            "volumemute" => "Volume Mute",
            k => return k.to_uppercase(),
        }
        .to_string()
    }

    /// Stable, platform-independent form (`"ctrl+shift+a"`).
    ///
    /// Modifiers are always emitted in `alt, cmd, ctrl, shift` order so the
    /// string round-trips through [`AcceleratorKey::parse`].
    pub fn to_canonical_string(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.modifiers.alt {
            parts.push("alt");
        }
        if self.modifiers.cmd {
            parts.push("cmd");
        }
        if self.modifiers.ctrl {
            parts.push("ctrl");
        }
        if self.modifiers.shift {
            parts.push("shift");
        }
        parts.push(&self.key);
        parts.join("+")
    }
}

impl fmt::Display for AcceleratorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

impl FromStr for AcceleratorKey {
    type Err = AcceleratorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AcceleratorKey {
    type Error = AcceleratorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AcceleratorKey> for String {
    fn from(key: AcceleratorKey) -> Self {
        key.to_canonical_string()
    }
}

/// Canonicalize a key name to the internal standard form.
pub fn canonicalize_key(key: &str) -> String {
    let key_lower = key.to_lowercase();
    match key_lower.as_str() {
        "arrowup" | "uparrow" => "up",
        "arrowdown" | "downarrow" => "down",
        "arrowleft" | "leftarrow" => "left",
        "arrowright" | "rightarrow" => "right",
        "return" => "enter",
        "esc" => "escape",
        "back" => "backspace",
        "del" => "delete",
        "ins" => "insert",
        "printscr" | "prtsc" | "print" => "printscreen",
        "/" | "forwardslash" => "slash",
        "\\" => "backslash",
        ";" => "semicolon",
        "'" | "apostrophe" => "quote",
        "," => "comma",
        "." | "dot" => "period",
        "[" | "leftbracket" => "bracketleft",
        "]" | "rightbracket" => "bracketright",
        "-" | "dash" | "hyphen" => "minus",
        "=" | "equals" => "equal",
        "`" | "backtick" | "grave" => "backquote",
        "pgup" => "pageup",
        "pgdn" | "pgdown" => "pagedown",
        "playpause" | "mediaplay" | "mediapause" => "mediaplaypause",
        "nexttrack" | "mediatracknext" => "medianexttrack",
        "prevtrack" | "previoustrack" | "mediatrackprevious" | "mediaprevtrack" => {
            "mediaprevioustrack"
        }
        "audiovolumeup" => "volumeup",
        "audiovolumedown" => "volumedown",
        "audiovolumemute" | "mute" => "volumemute",
        _ => return key_lower,
    }
    .to_string()
}

/// Media transport keys.
pub fn is_media_key(key: &str) -> bool {
    is_trust_gated_key(key) || key == "mediastop"
}

/// Media keys that need accessibility trust on macOS. Media Stop is not one.
pub fn is_trust_gated_key(key: &str) -> bool {
    matches!(
        key,
        "mediaplaypause" | "medianexttrack" | "mediaprevioustrack"
    )
}

/// Check if a canonical key name is known/valid.
pub fn is_known_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii_alphanumeric() {
        return true;
    }
    if let Some(rest) = key.strip_prefix('f') {
        if let Ok(n) = rest.parse::<u8>() {
            return (1..=24).contains(&n) && rest == n.to_string();
        }
    }
    is_media_key(key)
        || matches!(
            key,
            "space"
                | "enter"
                | "tab"
                | "escape"
                | "backspace"
                | "delete"
                | "insert"
                | "printscreen"
                | "up"
                | "down"
                | "left"
                | "right"
                | "home"
                | "end"
                | "pageup"
                | "pagedown"
                | "semicolon"
                | "quote"
                | "comma"
                | "period"
                | "slash"
                | "backslash"
                | "bracketleft"
                | "bracketright"
                | "minus"
                | "equal"
                | "backquote"
                | "volumeup"
                | "volumedown"
                | "volumemute"
        )
}
