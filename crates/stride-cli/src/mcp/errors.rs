//! Error handling utilities for MCP server

use rmcp::ErrorData;
use stride_core::PlanError;

/// Converts a planner error into an MCP error.
///
/// Input the client can fix is reported as invalid params; everything else
/// is an internal error.
pub fn to_mcp_error(message: &str, error: &PlanError) -> ErrorData {
    match error {
        PlanError::InvalidInput { .. } | PlanError::PlanNotFound { .. } => {
            ErrorData::invalid_params(format!("{message}: {error}"), None)
        }
        _ => ErrorData::internal_error(format!("{message}: {error}"), None),
    }
}

/// Error for a tool whose target does not exist.
pub fn not_found(kind: &str, id: u64) -> ErrorData {
    ErrorData::invalid_params(format!("{kind} with ID {id} not found"), None)
}
