// ==========================================
// Banking Data Loader - import pipeline
// ==========================================
// Flow: open workbook -> read recognized sheets in referential
// order -> map rows to entity records -> stage -> commit all
// staged records in one transaction.
// ==========================================

pub mod orchestrator;
pub mod row_mapper;
pub mod workbook;

pub use orchestrator::{
    commit_staged, import_workbook, ImportSummary, SheetKind, StagedRecords, SHEET_ORDER,
};
pub use workbook::{RawRow, Workbook};
