// ==========================================
// Banking Data Loader - error types
// ==========================================
// Tool: thiserror derive macro
// Policy: no partial commits ever; any failure during
//         staging or commit discards the whole batch
// ==========================================

use thiserror::Error;

/// Unified error type for the import pipeline.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== input errors =====
    #[error("workbook not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (only .xlsx is supported)")]
    UnsupportedFormat(String),

    #[error("workbook could not be read: {0}")]
    WorkbookError(String),

    #[error("sheet '{sheet}' could not be read: {message}")]
    SheetReadError { sheet: String, message: String },

    // ===== mapping errors =====
    #[error("required field missing (sheet '{sheet}', row {row}): {field}")]
    RequiredFieldMissing {
        sheet: String,
        row: usize,
        field: String,
    },

    #[error("type conversion failed (sheet '{sheet}', row {row}, field {field}): {message}")]
    TypeConversionError {
        sheet: String,
        row: usize,
        field: String,
        message: String,
    },

    #[error("date format error (sheet '{sheet}', row {row}, field {field}): expected day-first date, got {value}")]
    DateFormatError {
        sheet: String,
        row: usize,
        field: String,
        value: String,
    },

    #[error("time format error (sheet '{sheet}', row {row}, field {field}): expected HH:MM:SS or HH:MM, got {value}")]
    TimeFormatError {
        sheet: String,
        row: usize,
        field: String,
        value: String,
    },

    // ===== data integrity errors =====
    #[error("product {product_id} declares type {product_type} but has no matching detail record")]
    ProductDetailMissing {
        product_id: String,
        product_type: String,
    },

    #[error("unknown product type: {0}")]
    UnknownProductType(String),

    // ===== database errors =====
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    // ===== configuration errors =====
    #[error("configuration error (key: {key}): {message}")]
    ConfigError { key: String, message: String },

    // ===== generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("FOREIGN KEY") => {
                ImportError::ForeignKeyViolation(msg)
            }
            _ => ImportError::DatabaseError(err.to_string()),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::WorkbookError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::WorkbookError(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type ImportResult<T> = Result<T, ImportError>;
