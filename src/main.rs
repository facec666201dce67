//! hotkey-registry - register global shortcuts from config and report presses.
//!
//! # Usage
//!
//! ```bash
//! hotkey-registry                                  # real OS listener, runs until killed
//! hotkey-registry --dry-run --press ctrl+shift+k   # simulated listener, one press
//! hotkey-registry --request-trust                  # prompt for accessibility permission
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, info, warn};

use hotkey_registry::config::{self, Config, ShortcutConfig};
use hotkey_registry::listener::{GlobalHotkeyListener, InMemoryListener, ListenerAdapter};
use hotkey_registry::trust::{request_accessibility_trust, trust_gate_for};
use hotkey_registry::{
    AcceleratorKey, CallbackBinding, HotkeyError, HotkeyRegistry, RegistrationEntry,
};

#[derive(Parser, Debug)]
#[command(name = "hotkey-registry", version, about = "Process-wide global hotkey registry")]
struct Cli {
    /// Config file (default: ~/.hotkey-registry/config.json)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use the in-memory listener instead of hooking the OS
    #[arg(long)]
    dry_run: bool,

    /// Simulate a key press (dry run only); may be repeated
    #[arg(long = "press", value_name = "ACCEL", requires = "dry_run")]
    presses: Vec<String>,

    /// Prompt for accessibility permission before registering
    #[arg(long)]
    request_trust: bool,

    /// Print the registered accelerators and exit
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref());
    let _log_guard = hotkey_registry::logging::init(&config.log);

    if cli.request_trust && !request_accessibility_trust() {
        warn!("Accessibility permission not granted; media keys will be refused");
    }

    let shortcuts = config.get_shortcuts();
    let keys = parse_shortcuts(&shortcuts)?;

    if cli.dry_run {
        let listener = Arc::new(InMemoryListener::new());
        let registry = build_registry(&config, listener.clone(), &shortcuts, &keys)?;
        if cli.list {
            print_registered(&registry);
            return Ok(());
        }
        for press in &cli.presses {
            let key = AcceleratorKey::parse(press)
                .with_context(|| format!("invalid --press accelerator '{}'", press))?;
            if !listener.press(&key) {
                println!("{}: not registered", key.display_text());
            }
        }
        return Ok(());
    }

    let listener = Arc::new(GlobalHotkeyListener::new().context("failed to start OS listener")?);
    let registry = build_registry(&config, listener.clone(), &shortcuts, &keys)?;
    print_registered(&registry);
    if cli.list {
        return Ok(());
    }

    let pump = listener.spawn_event_pump();
    info!(count = registry.len(), "Listening for global hotkeys");
    if pump.join().is_err() {
        error!("Hotkey listener thread panicked");
    }
    Ok(())
}

fn parse_shortcuts(shortcuts: &[ShortcutConfig]) -> anyhow::Result<Vec<AcceleratorKey>> {
    shortcuts
        .iter()
        .map(|s| {
            AcceleratorKey::parse(&s.accelerator)
                .map_err(HotkeyError::from)
                .with_context(|| format!("invalid shortcut '{}'", s.display_label()))
        })
        .collect()
}

fn labeled_binding(shortcut: &ShortcutConfig, key: &AcceleratorKey) -> CallbackBinding {
    let label = shortcut.display_label().to_string();
    let text = key.display_text();
    CallbackBinding::new(move || {
        info!(category = "HOTKEY", shortcut = %label, "Shortcut triggered");
        println!("{} pressed ({})", text, label);
    })
    .with_label(shortcut.display_label())
}

/// Register the configured shortcuts as one all-or-nothing batch, each with
/// its own labeled binding.
fn build_registry(
    config: &Config,
    adapter: Arc<dyn ListenerAdapter>,
    shortcuts: &[ShortcutConfig],
    keys: &[AcceleratorKey],
) -> anyhow::Result<Arc<HotkeyRegistry>> {
    let registry = HotkeyRegistry::new(adapter, trust_gate_for(config.trust_gate));

    let entries: Vec<RegistrationEntry> = shortcuts
        .iter()
        .zip(keys)
        .map(|(shortcut, key)| RegistrationEntry {
            key: key.clone(),
            binding: labeled_binding(shortcut, key),
        })
        .collect();

    if let Err(e) = registry.try_register_entries(&entries) {
        eprintln!("{}", e.user_message());
        bail!(e);
    }
    Ok(registry)
}

fn print_registered(registry: &HotkeyRegistry) {
    for key in registry.registered_keys() {
        println!("{}", key.display_text());
    }
}
