// src/common/timing.rs

use core::time::Duration;

/// Default wall-clock budget for one action (write, every poll, decode).
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Pause after a read that produced no packet, so a transport that fails
/// immediately does not spin the CPU. Small against any sensible budget.
pub const POLL_RETRY_DELAY: Duration = Duration::from_millis(1);
