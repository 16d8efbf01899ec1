//! Logging module.
//!
//! Structured logging with per-validation context.

pub mod structured;

pub use structured::LogContext;

/// Initialize the module-level logger.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}
