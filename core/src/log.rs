//! Logging utilities
//!
//! Thin wrappers over the `log` facade so call sites stay short. The client
//! decides where records go (browser console behind `browser_log`).

#![allow(unused)]

/// Log an info message
#[inline(always)]
pub fn info(msg: &str) {
    ::log::info!("{msg}");
}

/// Log a warning message
#[inline(always)]
pub fn warn(msg: &str) {
    ::log::warn!("{msg}");
}

/// Log an error message
#[inline(always)]
pub fn error(msg: &str) {
    ::log::error!("{msg}");
}

/// Log a debug message with a label
#[inline(always)]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!("[{label}] {msg}");
}

/// Log spawn timer state
#[inline(always)]
pub fn timer_summary(phase: &str, remaining_secs: u64, offer: Option<&str>, cards: usize) {
    ::log::debug!(
        "[TIMER] phase={phase} remaining={remaining_secs}s offer={} catalog={cards}",
        offer.unwrap_or("-")
    );
}

/// Log an action being performed
#[inline(always)]
pub fn action(name: &str, details: &str) {
    ::log::info!(">> {name}: {details}");
}

/// Log action result
#[inline(always)]
pub fn result(success: bool, msg: &str) {
    if success {
        ::log::info!("<< ok: {msg}");
    } else {
        ::log::warn!("<< failed: {msg}");
    }
}
