//! Nut catalog MCP Tools

use serde::Serialize;

use crate::db::Database;
use crate::models::{Nut, NutScores};

/// Catalog entry as returned by list_nuts
#[derive(Debug, Serialize)]
pub struct NutSummary {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub image_path: String,
    pub scores: NutScores,
}

impl From<Nut> for NutSummary {
    fn from(nut: Nut) -> Self {
        Self {
            id: nut.id,
            slug: nut.slug,
            name: nut.name,
            description: nut.description,
            image_path: nut.image_path,
            scores: nut.scores,
        }
    }
}

/// Response for list_nuts
#[derive(Debug, Serialize)]
pub struct ListNutsResponse {
    pub nuts: Vec<NutSummary>,
    pub total: usize,
}

/// List the whole nut catalog
pub fn list_nuts(db: &Database) -> Result<ListNutsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let nuts: Vec<NutSummary> = Nut::list(&conn)
        .map_err(|e| format!("Failed to list nuts: {}", e))?
        .into_iter()
        .map(NutSummary::from)
        .collect();

    Ok(ListNutsResponse {
        total: nuts.len(),
        nuts,
    })
}
