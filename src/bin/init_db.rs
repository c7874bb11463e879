// ==========================================
// Banking Data Loader - schema reset entry point
// ==========================================
// Drops and recreates every table. Destroys all existing data
// with no confirmation step - callers must guard invocation.
// ==========================================

use banking_data_loader::{db, logging, schema};

fn main() {
    logging::init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "schema reset failed");
        eprintln!("schema reset failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let database_url = db::database_url_from_env()?;
    tracing::info!(database = %database_url, "resetting schema");

    let conn = db::open_connection(&database_url)?;
    schema::reset(&conn)?;

    tracing::info!("schema reset done");
    Ok(())
}
