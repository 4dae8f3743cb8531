//! Utility to print a monthly report as JSON
//!
//! Usage: `month_report [YYYY-MM]` (defaults to the current month)

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let year_month = std::env::args().nth(1);

    let db_path = nuts_balance::config::database_path();
    eprintln!("Database path: {}", db_path.display());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = nuts_balance::db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        nuts_balance::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    let report = nuts_balance::tools::reports::get_monthly_report(&database, year_month.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
