//! Nuts Balance MCP Server Implementation
//!
//! Exposes the daily log, calendar and report tools over MCP.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::tools::status::{StatusTracker, INSTRUCTIONS};
use crate::tools::{days, nuts, reports};

/// Nuts Balance MCP Service
#[derive(Clone)]
pub struct NutsBalanceService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<NutsBalanceService>,
}

impl NutsBalanceService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveDailyLogParams {
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// IDs of every nut eaten that day (from list_nuts)
    pub nut_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateParams {
    /// Date in YYYY-MM-DD format
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MonthParams {
    /// Month in YYYY-MM format
    pub year_month: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MonthlyReportParams {
    /// Month in YYYY-MM format (default: current month)
    pub year_month: Option<String>,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl NutsBalanceService {
    // --- Status ---

    #[tool(description = "Get the current status of the Nuts Balance service including build info, schema version, catalog size, record counts, and process information")]
    async fn nuts_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker
            .get_status(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&status)
    }

    #[tool(description = "Get instructions for logging nuts and reading scores. Call this when starting a session or when unsure how to use the tools.")]
    fn nuts_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(INSTRUCTIONS)]))
    }

    // --- Catalog ---

    #[tool(description = "List the nut catalog with antioxidant, mineral, fiber and vitamin scores (1-3)")]
    fn list_nuts(&self) -> Result<CallToolResult, McpError> {
        let result = nuts::list_nuts(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Days ---

    #[tool(description = "Save the nuts eaten on a date, replacing any earlier selection. Returns the day's scores, comment and month streak.")]
    fn save_daily_log(&self, Parameters(p): Parameters<SaveDailyLogParams>) -> Result<CallToolResult, McpError> {
        let result = days::save_daily_log(&self.database, &p.date, &p.nut_ids)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Mark a date as intentionally nut-free. Removes any record saved for that date.")]
    fn skip_day(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = days::skip_day(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Remove both the record and the skip marker for a date")]
    fn clear_day(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = days::clear_day(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a date's status, selected nuts, scores, comment, month streak and neighbouring dates")]
    fn get_day(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = days::get_day(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get recorded / skipped / none status for every day of a month")]
    fn get_month_calendar(&self, Parameters(p): Parameters<MonthParams>) -> Result<CallToolResult, McpError> {
        let result = days::get_month_calendar(&self.database, &p.year_month)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Reports ---

    #[tool(description = "Get a monthly report: average scores, per-nut consumption days, longest streak, comment and growth character")]
    fn get_monthly_report(&self, Parameters(p): Parameters<MonthlyReportParams>) -> Result<CallToolResult, McpError> {
        let result = reports::get_monthly_report(&self.database, p.year_month.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the growth stage reached from every record day ever logged")]
    fn get_growth(&self) -> Result<CallToolResult, McpError> {
        let result = reports::get_growth(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

#[tool_handler]
impl ServerHandler for NutsBalanceService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nuts-balance".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nuts Balance".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nuts Balance - daily nut intake scoring. \
                 IMPORTANT: Call nuts_instructions before logging. \
                 Catalog: list_nuts. \
                 Days: save_daily_log, skip_day, clear_day, get_day, get_month_calendar. \
                 Reports: get_monthly_report, get_growth. \
                 Dates are YYYY-MM-DD, months YYYY-MM."
                    .into(),
            ),
        }
    }
}
