//! MCP server for Nuts Balance

mod server;

pub use server::NutsBalanceService;
