//! Nuts Balance Library
//!
//! Daily nut logging with nutrient balance scores, monthly reports and growth tracking.

pub mod build_info;
pub mod config;
pub mod db;
pub mod domain;
pub mod mcp;
pub mod models;
pub mod tools;
