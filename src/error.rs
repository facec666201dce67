use thiserror::Error;
use tracing::{error, warn};

use crate::accelerator::{AcceleratorKey, AcceleratorParseError};

/// Error severity for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational
    Warning,  // recoverable
    Error,    // operation failed
    Critical, // requires user action
}

/// Domain-specific errors for the hotkey registry
#[derive(Error, Debug)]
pub enum HotkeyError {
    #[error("Accelerator '{accelerator}' requires a platform permission that is not granted")]
    TrustDenied { accelerator: AcceleratorKey },

    #[error("Accelerator '{accelerator}' is already claimed by another owner")]
    AlreadyClaimed { accelerator: AcceleratorKey },

    #[error("System rejected accelerator '{accelerator}': {reason}")]
    Rejected {
        accelerator: AcceleratorKey,
        reason: String,
    },

    #[error("Failed to parse accelerator: {0}")]
    Parse(#[from] AcceleratorParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HotkeyError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TrustDenied { .. } => ErrorSeverity::Critical,
            Self::AlreadyClaimed { .. } => ErrorSeverity::Warning,
            Self::Rejected { .. } => ErrorSeverity::Error,
            Self::Parse(_) => ErrorSeverity::Warning,
            Self::Config(_) => ErrorSeverity::Warning,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::TrustDenied { accelerator } => format!(
                "'{}' needs accessibility permission. Grant it in system settings and try again.",
                accelerator
            ),
            Self::AlreadyClaimed { accelerator } => format!(
                "'{}' is already in use by another application or shortcut.",
                accelerator
            ),
            Self::Rejected { accelerator, .. } => {
                format!("'{}' could not be registered with the system.", accelerator)
            }
            Self::Parse(e) => format!("Invalid shortcut: {}", e),
            Self::Config(msg) => format!("Configuration issue: {}", msg),
        }
    }

    /// The accelerator this error is about, if any.
    pub fn accelerator(&self) -> Option<&AcceleratorKey> {
        match self {
            Self::TrustDenied { accelerator }
            | Self::AlreadyClaimed { accelerator }
            | Self::Rejected { accelerator, .. } => Some(accelerator),
            Self::Parse(_) | Self::Config(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HotkeyError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the caller doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use hotkey_registry::error::ResultExt;
///
/// // Log and continue if the hook could not be removed
/// adapter.remove_hook(&key, owner).warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

/// Panic in debug mode, log error in release mode.
///
/// Use for "impossible" states that should crash during development
/// but gracefully degrade in production, such as a key event routed to a
/// registry that never registered the accelerator.
///
/// # Examples
///
/// ```ignore
/// use hotkey_registry::debug_panic;
///
/// debug_panic!("Key event for unregistered accelerator {}", key);
/// ```
#[macro_export]
macro_rules! debug_panic {
    ( $($fmt_arg:tt)* ) => {
        if cfg!(debug_assertions) {
            panic!( $($fmt_arg)* );
        } else {
            tracing::error!("IMPOSSIBLE STATE: {}", format_args!($($fmt_arg)*));
        }
    };
}
