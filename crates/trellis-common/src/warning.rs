//! Layout warnings with coloured terminal output.
//!
//! Provides deduplication so a condition that repeats on every pass (a
//! pathological tree, a host that went away) is reported once.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock cannot leave the set half-updated.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about a layout anomaly (prints once per unique message).
///
/// Returns `true` when the message was printed, `false` when it had
/// already been reported.
///
/// # Example
/// ```ignore
/// warn_once("Measure", "conflict scan stopped at depth 256");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = warned().get_or_insert_with(HashSet::new).insert(key);

    if should_print {
        eprintln!("{}", format!("[Trellis {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call when loading a new tree).
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_warning_is_printed_once() {
        clear_warnings();
        assert!(warn_once("Test", "repeated warning"));
        assert!(!warn_once("Test", "repeated warning"));
        assert!(warn_once("Other", "repeated warning"));
    }
}
