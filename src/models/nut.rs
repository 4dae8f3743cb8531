//! Nut model
//!
//! Catalog entry with its four nutrient scores.

use std::collections::HashSet;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// Raw nutrient scores, each 1-3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutScores {
    pub antioxidant: i64,
    pub mineral: i64,
    pub fiber: i64,
    pub vitamin: i64,
}

/// A nut in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nut {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub image_path: String,
    pub scores: NutScores,
}

impl Nut {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            slug: row.get("slug")?,
            name: row.get("name")?,
            description: row.get("description")?,
            image_path: row.get("image_path")?,
            scores: NutScores {
                antioxidant: row.get("score_antioxidant")?,
                mineral: row.get("score_mineral")?,
                fiber: row.get("score_fiber")?,
                vitamin: row.get("score_vitamin")?,
            },
        })
    }

    /// The whole catalog, ordered by ID
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM nuts ORDER BY id")?;
        let nuts = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(nuts)
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM nuts WHERE id = ?1")?;

        match stmt.query_row([id], Self::from_row) {
            Ok(nut) => Ok(Some(nut)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM nuts", [], |row| row.get(0))?;
        Ok(count)
    }

    /// IDs of every catalog nut
    pub fn all_ids(conn: &Connection) -> DbResult<HashSet<i64>> {
        let mut stmt = conn.prepare("SELECT id FROM nuts")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<HashSet<i64>, _>>()?;
        Ok(ids)
    }
}
