// ==========================================
// Banking Data Loader - core library
// ==========================================
// Loads tabular retail-banking records (customers, accounts,
// products, interactions, transactions) from an Excel workbook
// into a relational SQLite schema.
// Stack: rusqlite + calamine + chrono
// ==========================================

// ==========================================
// module declarations
// ==========================================

// domain layer - entities and the product hierarchy
pub mod domain;

// repository layer - schema DDL and inserts
pub mod repository;

// import layer - workbook reading, row mapping, orchestration
pub mod importer;

// database infrastructure (connection setup / uniform PRAGMAs)
pub mod db;

// error taxonomy
pub mod error;

// logging setup
pub mod logging;

// ==========================================
// re-exports
// ==========================================

pub use domain::{Account, BankTransaction, Customer, Interaction, Product, ProductDetails, ProductType};
pub use error::{ImportError, ImportResult};
pub use importer::{import_workbook, ImportSummary, StagedRecords};
pub use repository::schema;

// ==========================================
// constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Banking Data Loader";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
