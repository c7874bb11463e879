// ==========================================
// Banking Data Loader - repository layer
// ==========================================

pub mod import_repo;
pub mod schema;
