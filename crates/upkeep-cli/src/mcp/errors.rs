//! Error handling utilities for the MCP server

use rmcp::ErrorData;
use upkeep_core::UpkeepError;

/// Converts a core error into an MCP error.
///
/// Caller mistakes (unknown ids, bad input, rejected transitions) become
/// `invalid_params`; everything else is reported as an internal error.
pub fn to_mcp_error(message: &str, error: &UpkeepError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        UpkeepError::PlanNotFound { .. }
        | UpkeepError::WorkOrderNotFound { .. }
        | UpkeepError::ChecklistNotFound { .. }
        | UpkeepError::NoEquipment { .. }
        | UpkeepError::InvalidTransition { .. }
        | UpkeepError::InvalidInput { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_caller_errors_are_invalid_params() {
        let error = UpkeepError::PlanNotFound {
            id: "plan-1".to_string(),
        };
        let mcp = to_mcp_error("Failed to get plan", &error);
        assert_eq!(mcp.code, ErrorCode::INVALID_PARAMS);
        assert!(mcp.message.contains("plan-1"));
    }

    #[test]
    fn test_other_errors_are_internal() {
        let error = UpkeepError::Configuration {
            message: "broken".to_string(),
        };
        let mcp = to_mcp_error("Failed", &error);
        assert_eq!(mcp.code, ErrorCode::INTERNAL_ERROR);
    }
}
