//! Weekly check-in notifications.

use log::info;
use serde::{Deserialize, Serialize};

/// Emitted when a week rolls up to completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckIn {
    /// Plan the week belongs to
    pub plan_id: u64,
    /// Number of the week that completed
    pub week_number: u32,
}

/// Receives "weekly check-in available" notifications.
///
/// Delivery is fire-and-forget: the planner calls the sink after the
/// cascade has been committed and only logs a returned error.
pub trait CheckInSink: Send + Sync {
    fn weekly_check_in_available(&self, check_in: &CheckIn) -> anyhow::Result<()>;
}

/// Default sink that writes check-ins to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCheckInSink;

impl CheckInSink for LogCheckInSink {
    fn weekly_check_in_available(&self, check_in: &CheckIn) -> anyhow::Result<()> {
        info!(
            "Weekly check-in available for plan {} week {}",
            check_in.plan_id, check_in.week_number
        );
        Ok(())
    }
}
