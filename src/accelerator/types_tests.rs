use super::*;

#[test]
fn test_parse_basic_chord() {
    let key = AcceleratorKey::parse("Ctrl+Shift+A").unwrap();
    assert_eq!(key.key(), "a");
    assert!(key.modifiers().ctrl);
    assert!(key.modifiers().shift);
    assert!(!key.modifiers().alt);
    assert!(!key.modifiers().cmd);
}

#[test]
fn test_parse_is_order_and_case_insensitive() {
    let a = AcceleratorKey::parse("Ctrl+Shift+A").unwrap();
    let b = AcceleratorKey::parse("shift+control+a").unwrap();
    let c = AcceleratorKey::parse("SHIFT ctrl A").unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn test_parse_command_or_control_follows_platform() {
    let key = AcceleratorKey::parse("CommandOrControl+K").unwrap();
    assert_eq!(key.modifiers(), Modifiers::command_or_control());
    match Platform::current() {
        Platform::MacOS => assert!(key.modifiers().cmd),
        Platform::Windows | Platform::Linux => assert!(key.modifiers().ctrl),
    }
}

#[test]
fn test_parse_key_aliases() {
    assert_eq!(AcceleratorKey::parse("alt+esc").unwrap().key(), "escape");
    assert_eq!(AcceleratorKey::parse("ctrl+Return").unwrap().key(), "enter");
    assert_eq!(AcceleratorKey::parse("cmd+ArrowUp").unwrap().key(), "up");
    assert_eq!(AcceleratorKey::parse("cmd+/").unwrap().key(), "slash");
    assert_eq!(AcceleratorKey::parse("F13").unwrap().key(), "f13");
}

#[test]
fn test_parse_errors() {
    assert_eq!(AcceleratorKey::parse(""), Err(AcceleratorParseError::Empty));
    assert_eq!(AcceleratorKey::parse("  + "), Err(AcceleratorParseError::Empty));
    assert_eq!(
        AcceleratorKey::parse("ctrl+shift"),
        Err(AcceleratorParseError::MissingKey)
    );
    assert_eq!(
        AcceleratorKey::parse("ctrl+a+b"),
        Err(AcceleratorParseError::UnknownToken("b".to_string()))
    );
    assert_eq!(
        AcceleratorKey::parse("ctrl+hyper"),
        Err(AcceleratorParseError::UnknownKey("hyper".to_string()))
    );
    assert!(AcceleratorKey::parse("f25").is_err());
    assert!(AcceleratorKey::parse("f05").is_err());
}

#[test]
fn test_media_keys_are_media_class() {
    for s in ["MediaPlayPause", "MediaNextTrack", "MediaPreviousTrack"] {
        let key = AcceleratorKey::parse(s).unwrap();
        assert_eq!(key.key_class(), KeyClass::MediaControl, "{}", s);
    }
    assert_eq!(
        AcceleratorKey::parse("MediaStop").unwrap().key_class(),
        KeyClass::Standard
    );
    assert_eq!(
        AcceleratorKey::parse("VolumeUp").unwrap().key_class(),
        KeyClass::Standard
    );
    assert_eq!(
        AcceleratorKey::parse("ctrl+p").unwrap().key_class(),
        KeyClass::Standard
    );
}

#[test]
fn test_media_key_display_text() {
    let play = AcceleratorKey::parse("MediaPlayPause").unwrap();
    assert_eq!(play.display_for_platform(Platform::Linux), "Media Play/Pause");
    assert_eq!(play.display_for_platform(Platform::MacOS), "Media Play/Pause");

    let next = AcceleratorKey::parse("MediaNextTrack").unwrap();
    assert_eq!(next.display_for_platform(Platform::Windows), "Media Next Track");

    let prev = AcceleratorKey::parse("prevtrack").unwrap();
    assert_eq!(
        prev.display_for_platform(Platform::Windows),
        "Media Previous Track"
    );
}

#[test]
fn test_display_other_platforms() {
    let key = AcceleratorKey::parse("cmd+shift+k").unwrap();
    assert_eq!(key.display_for_platform(Platform::Linux), "Shift+Super+K");

    let key = AcceleratorKey::parse("ctrl+alt+delete").unwrap();
    assert_eq!(key.display_for_platform(Platform::Windows), "Ctrl+Alt+Delete");
}

#[test]
fn test_display_macos_glyphs() {
    let key = AcceleratorKey::parse("cmd+shift+k").unwrap();
    assert_eq!(key.display_for_platform(Platform::MacOS), "⇧⌘K");

    let key = AcceleratorKey::parse("ctrl+enter").unwrap();
    assert_eq!(key.display_for_platform(Platform::MacOS), "⌃↵");
}

#[test]
fn test_canonical_string_round_trips() {
    let key = AcceleratorKey::parse("Shift+Ctrl+Alt+Cmd+Space").unwrap();
    let canonical = key.to_canonical_string();
    assert_eq!(canonical, "alt+cmd+ctrl+shift+space");
    assert_eq!(AcceleratorKey::parse(&canonical).unwrap(), key);
}

#[test]
fn test_serde_uses_canonical_string() {
    let key = AcceleratorKey::parse("Ctrl+Shift+A").unwrap();
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"ctrl+shift+a\"");

    let back: AcceleratorKey = serde_json::from_str(&json).unwrap();
    assert_eq!(back, key);

    let bad: Result<AcceleratorKey, _> = serde_json::from_str("\"ctrl+\"");
    assert!(bad.is_err());
}

#[test]
fn test_new_validates_key() {
    assert!(AcceleratorKey::new("k", Modifiers::cmd()).is_ok());
    assert!(AcceleratorKey::new("Esc", Modifiers::default()).is_ok());
    assert!(AcceleratorKey::new("nope", Modifiers::default()).is_err());
}

#[test]
fn test_is_known_key() {
    assert!(is_known_key("a"));
    assert!(is_known_key("9"));
    assert!(is_known_key("f24"));
    assert!(is_known_key("mediaplaypause"));
    assert!(!is_known_key("f0"));
    assert!(!is_known_key("é"));
    assert!(!is_known_key("ctrl"));
}
