// ==========================================
// Banking Data Loader - import entry point
// ==========================================
// Usage: banking-data-loader <workbook.xlsx>
// The connection string comes from DATABASE_URL.
// ==========================================

use anyhow::{anyhow, Context};
use banking_data_loader::{db, importer, logging};

fn main() {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", banking_data_loader::APP_NAME, banking_data_loader::VERSION);
    tracing::info!("==================================================");

    if let Err(e) = run() {
        tracing::error!(error = %e, "import failed");
        eprintln!("import failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let workbook_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: banking-data-loader <workbook.xlsx>"))?;

    let database_url = db::database_url_from_env()?;
    tracing::info!(database = %database_url, "using database");

    // the connection lives for the whole import and is released
    // when it goes out of scope, on success or failure
    let mut conn = db::open_connection(&database_url)?;

    let summary = importer::import_workbook(&mut conn, &workbook_path)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("rendering import summary")?
    );
    Ok(())
}
