//! Conversion from `AcceleratorKey` to the `global-hotkey` crate's types.

use global_hotkey::hotkey::{Code, HotKey, Modifiers as HotkeyModifiers};

use super::types::{AcceleratorKey, Modifiers};

/// Build the `global_hotkey` modifier flags for an accelerator.
pub fn to_hotkey_modifiers(modifiers: Modifiers) -> HotkeyModifiers {
    let mut mods = HotkeyModifiers::empty();
    if modifiers.cmd {
        mods |= HotkeyModifiers::META;
    }
    if modifiers.ctrl {
        mods |= HotkeyModifiers::CONTROL;
    }
    if modifiers.alt {
        mods |= HotkeyModifiers::ALT;
    }
    if modifiers.shift {
        mods |= HotkeyModifiers::SHIFT;
    }
    mods
}

/// Map a canonical key name to a physical key code.
pub fn key_to_code(key: &str) -> Option<Code> {
    let code = match key {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "f13" => Code::F13,
        "f14" => Code::F14,
        "f15" => Code::F15,
        "f16" => Code::F16,
        "f17" => Code::F17,
        "f18" => Code::F18,
        "f19" => Code::F19,
        "f20" => Code::F20,
        "f21" => Code::F21,
        "f22" => Code::F22,
        "f23" => Code::F23,
        "f24" => Code::F24,
        "space" => Code::Space,
        "enter" => Code::Enter,
        "tab" => Code::Tab,
        "escape" => Code::Escape,
        "backspace" => Code::Backspace,
        "delete" => Code::Delete,
        "insert" => Code::Insert,
        "printscreen" => Code::PrintScreen,
        "up" => Code::ArrowUp,
        "down" => Code::ArrowDown,
        "left" => Code::ArrowLeft,
        "right" => Code::ArrowRight,
        "home" => Code::Home,
        "end" => Code::End,
        "pageup" => Code::PageUp,
        "pagedown" => Code::PageDown,
        "semicolon" => Code::Semicolon,
        "quote" => Code::Quote,
        "comma" => Code::Comma,
        "period" => Code::Period,
        "slash" => Code::Slash,
        "backslash" => Code::Backslash,
        "bracketleft" => Code::BracketLeft,
        "bracketright" => Code::BracketRight,
        "minus" => Code::Minus,
        "equal" => Code::Equal,
        "backquote" => Code::Backquote,
        "mediaplaypause" => Code::MediaPlayPause,
        "medianexttrack" => Code::MediaTrackNext,
        "mediaprevioustrack" => Code::MediaTrackPrevious,
        "mediastop" => Code::MediaStop,
        "volumeup" => Code::AudioVolumeUp,
        "volumedown" => Code::AudioVolumeDown,
        "volumemute" => Code::AudioVolumeMute,
        _ => return None,
    };
    Some(code)
}

/// Build the OS-level hotkey for an accelerator.
///
/// Returns `None` only if the key has no physical key code, which cannot
/// happen for a validated `AcceleratorKey`.
pub fn to_hotkey(accelerator: &AcceleratorKey) -> Option<HotKey> {
    let code = key_to_code(accelerator.key())?;
    let mods = to_hotkey_modifiers(accelerator.modifiers());
    Some(HotKey::new(Some(mods), code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_media_key_has_a_code() {
        for key in [
            "mediaplaypause",
            "medianexttrack",
            "mediaprevioustrack",
            "mediastop",
        ] {
            assert!(key_to_code(key).is_some(), "missing code for {}", key);
        }
    }

    #[test]
    fn test_modifier_flags() {
        let mods = to_hotkey_modifiers(Modifiers::ctrl().with_shift());
        assert!(mods.contains(HotkeyModifiers::CONTROL));
        assert!(mods.contains(HotkeyModifiers::SHIFT));
        assert!(!mods.contains(HotkeyModifiers::META));
        assert!(!mods.contains(HotkeyModifiers::ALT));
    }

    #[test]
    fn test_equal_accelerators_share_hotkey_id() {
        let a = AcceleratorKey::parse("Ctrl+Shift+A").unwrap();
        let b = AcceleratorKey::parse("shift+control+a").unwrap();
        assert_eq!(to_hotkey(&a).unwrap().id(), to_hotkey(&b).unwrap().id());
    }

    #[test]
    fn test_unknown_key_has_no_code() {
        assert!(key_to_code("hyper").is_none());
    }
}
