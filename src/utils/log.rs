//! Process-wide verbosity switches for stderr diagnostics.

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub(crate) fn verbose_enabled() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub(crate) fn set_quiet(enabled: bool) {
    QUIET.store(enabled, Ordering::Relaxed);
}

pub(crate) fn quiet_enabled() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Detail line, printed only with --verbose
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::utils::log::verbose_enabled() {
            eprintln!($($arg)*);
        }
    };
}

/// Progress line, suppressed by --quiet
macro_rules! progress {
    ($($arg:tt)*) => {
        if !$crate::utils::log::quiet_enabled() {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use {progress, verbose};
