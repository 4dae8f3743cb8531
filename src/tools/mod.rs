//! Nuts Balance Tools module
//!
//! MCP tool implementations over the record store and scoring domain.

pub mod days;
pub mod nuts;
pub mod reports;
pub mod status;

#[cfg(test)]
pub(crate) fn test_database() -> crate::db::Database {
    let db = crate::db::Database::open_in_memory().unwrap();
    db.with_conn(crate::db::migrations::run_migrations).unwrap();
    db
}
