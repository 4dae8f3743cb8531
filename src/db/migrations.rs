//! Database migrations
//!
//! Schema creation and the seeded nut catalog.

use rusqlite::Connection;
use tracing::info;

use super::connection::DbResult;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        info!("applying schema migration v1");
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Whether the schema is at the latest version
pub fn is_current(conn: &Connection) -> DbResult<bool> {
    Ok(get_schema_version(conn)? >= SCHEMA_VERSION)
}

/// Migration v1: catalog, daily logs, skip markers
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- NUTS
        -- Catalog; nutrient scores are 1-3
        -- ============================================
        CREATE TABLE nuts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT,
            image_path TEXT NOT NULL,
            score_antioxidant INTEGER NOT NULL CHECK(score_antioxidant BETWEEN 1 AND 3),
            score_mineral INTEGER NOT NULL CHECK(score_mineral BETWEEN 1 AND 3),
            score_fiber INTEGER NOT NULL CHECK(score_fiber BETWEEN 1 AND 3),
            score_vitamin INTEGER NOT NULL CHECK(score_vitamin BETWEEN 1 AND 3),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- DAILY LOGS
        -- One row per recorded date
        -- ============================================
        CREATE TABLE daily_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            log_date TEXT NOT NULL UNIQUE,        -- ISO date: "2025-01-09"
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- DAILY LOG ITEMS
        -- Nuts selected on a recorded date
        -- ============================================
        CREATE TABLE daily_log_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            daily_log_id INTEGER NOT NULL REFERENCES daily_logs(id) ON DELETE CASCADE,
            nut_id INTEGER NOT NULL REFERENCES nuts(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(daily_log_id, nut_id)
        );

        CREATE INDEX idx_daily_log_items_log ON daily_log_items(daily_log_id);

        -- ============================================
        -- SKIP DAYS
        -- Dates marked as intentionally nut-free
        -- ============================================
        CREATE TABLE skip_days (
            log_date TEXT PRIMARY KEY,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        INSERT INTO nuts (slug, name, description, image_path,
                          score_antioxidant, score_mineral, score_fiber, score_vitamin)
        VALUES
            ('almond', 'Almond', 'Rich in vitamin E.', '/nuts/almond.png', 3, 2, 2, 3),
            ('walnut', 'Walnut', 'Omega-3 fatty acids and polyphenols.', '/nuts/walnut.png', 3, 2, 2, 1),
            ('cashew', 'Cashew', 'Iron and zinc.', '/nuts/cashew.png', 1, 3, 1, 2),
            ('macadamia', 'Macadamia', 'Mostly monounsaturated fat.', '/nuts/macadamia.png', 1, 1, 2, 1),
            ('hazelnut', 'Hazelnut', 'Fiber and vitamin E.', '/nuts/hazelnut.png', 2, 2, 3, 3),
            ('pistachio', 'Pistachio', 'Potassium and fiber.', '/nuts/pistachio.png', 2, 3, 3, 2);
        "#,
    )?;

    Ok(())
}
