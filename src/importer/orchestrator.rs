// ==========================================
// Banking Data Loader - import orchestrator
// ==========================================
// Drives the end-to-end load: open workbook -> stage recognized
// sheets in referential-dependency order -> commit everything in
// one transaction. The only component that opens a persistence
// transaction. No partial commits ever: any staging or insert
// failure discards the whole batch.
// ==========================================

use crate::domain::{Account, BankTransaction, Customer, Interaction};
use crate::error::ImportResult;
use crate::importer::row_mapper;
use crate::importer::workbook::{RawRow, Workbook};
use crate::repository::import_repo;
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// sheet dispatch
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Customer,
    Account,
    Interaction,
    Transaction,
}

/// Recognized sheets in staging order. Customers before accounts,
/// accounts before transactions: referential dependency, not
/// workbook order, decides.
pub const SHEET_ORDER: [(&str, SheetKind); 4] = [
    ("2. Customer Data", SheetKind::Customer),
    ("3. Account Data", SheetKind::Account),
    ("5. Interaction Data", SheetKind::Interaction),
    ("4. Transaction Data", SheetKind::Transaction),
];

// ==========================================
// staging
// ==========================================

/// Records staged in memory, awaiting the single commit.
#[derive(Debug, Default)]
pub struct StagedRecords {
    pub customers: Vec<Customer>,
    pub accounts: Vec<Account>,
    pub interactions: Vec<Interaction>,
    pub transactions: Vec<BankTransaction>,
}

/// Map every row of one sheet into the staging area. The first
/// failing row aborts the sheet; the caller discards the batch.
pub fn stage_sheet(
    staged: &mut StagedRecords,
    kind: SheetKind,
    sheet: &str,
    rows: &[RawRow],
) -> ImportResult<()> {
    for (idx, row) in rows.iter().enumerate() {
        let row_number = idx + 1;
        match kind {
            SheetKind::Customer => staged
                .customers
                .push(row_mapper::map_customer(row, sheet, row_number)?),
            SheetKind::Account => staged
                .accounts
                .push(row_mapper::map_account(row, sheet, row_number)?),
            SheetKind::Interaction => staged
                .interactions
                .push(row_mapper::map_interaction(row, sheet, row_number)?),
            SheetKind::Transaction => staged
                .transactions
                .push(row_mapper::map_transaction(row, sheet, row_number)?),
        }
    }
    Ok(())
}

// ==========================================
// result summary
// ==========================================

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub sheets_processed: Vec<String>,
    pub customers: usize,
    pub accounts: usize,
    pub interactions: usize,
    pub transactions: usize,
    pub elapsed_ms: u128,
}

// ==========================================
// orchestration
// ==========================================

/// Import one workbook into the store.
///
/// A missing sheet is skipped (partial workbooks are allowed); a
/// missing or unreadable file aborts before any transaction is
/// opened. All staged records become durable together, or none do.
#[instrument(skip(conn, workbook_path), fields(batch_id))]
pub fn import_workbook<P: AsRef<Path>>(
    conn: &mut Connection,
    workbook_path: P,
) -> ImportResult<ImportSummary> {
    let start = Instant::now();
    let batch_id = Uuid::new_v4().to_string();
    tracing::Span::current().record("batch_id", batch_id.as_str());

    let path_display = workbook_path.as_ref().display().to_string();
    info!(batch_id = %batch_id, workbook = %path_display, "starting import");

    let mut workbook = Workbook::open(workbook_path)?;

    let mut staged = StagedRecords::default();
    let mut sheets_processed = Vec::new();

    for (sheet, kind) in SHEET_ORDER {
        if !workbook.has_sheet(sheet) {
            info!(sheet = %sheet, "sheet not present, skipped");
            continue;
        }

        let rows = workbook.read_sheet(sheet)?;
        let row_count = rows.len();
        debug!(sheet = %sheet, rows = row_count, "sheet read");

        stage_sheet(&mut staged, kind, sheet, &rows)?;
        info!(sheet = %sheet, rows = row_count, "sheet staged");
        sheets_processed.push(sheet.to_string());
    }

    commit_staged(conn, &staged)?;

    let summary = ImportSummary {
        batch_id: batch_id.clone(),
        sheets_processed,
        customers: staged.customers.len(),
        accounts: staged.accounts.len(),
        interactions: staged.interactions.len(),
        transactions: staged.transactions.len(),
        elapsed_ms: start.elapsed().as_millis(),
    };

    info!(
        batch_id = %batch_id,
        customers = summary.customers,
        accounts = summary.accounts,
        interactions = summary.interactions,
        transactions = summary.transactions,
        elapsed_ms = summary.elapsed_ms,
        "import committed"
    );

    Ok(summary)
}

/// Commit every staged record as a single all-or-nothing
/// transaction. On any insert failure the transaction is dropped,
/// which rolls everything back, and the error is re-raised.
pub fn commit_staged(conn: &mut Connection, staged: &StagedRecords) -> ImportResult<()> {
    let tx = conn.transaction()?;

    import_repo::insert_customers_tx(&tx, &staged.customers)?;
    import_repo::insert_accounts_tx(&tx, &staged.accounts)?;
    import_repo::insert_interactions_tx(&tx, &staged.interactions)?;
    import_repo::insert_transactions_tx(&tx, &staged.transactions)?;

    tx.commit()?;
    Ok(())
}
