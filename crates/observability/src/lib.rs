//! Tracing and logging setup shared by every binary.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogFormat, ENV_LOG_FORMAT};

/// Initialize process-wide tracing with the format named by
/// `LIQUORLEDGER_LOG_FORMAT` (JSON when unset).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    crate::tracing::init(LogFormat::from_env());
}

/// Like [`init`], with an explicit format.
pub fn init_with(format: LogFormat) {
    crate::tracing::init(format);
}
