// ==========================================
// test helpers
// ==========================================
// Scratch databases and a small product catalog shared by the
// integration suites.
// ==========================================

#![allow(dead_code)]

use banking_data_loader::domain::{Product, ProductDetails};
use banking_data_loader::{db, schema};
use rusqlite::Connection;
use tempfile::NamedTempFile;

/// Create a temporary database with a freshly initialized schema.
///
/// The NamedTempFile must stay alive for the connection to remain
/// valid on disk.
pub fn create_test_db() -> (NamedTempFile, Connection) {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = db::open_connection(&db_path).unwrap();
    schema::reset(&conn).unwrap();

    (temp_file, conn)
}

/// One product per catalog type.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            product_id: "PCA-01".to_string(),
            product_name: "Everyday Current Account".to_string(),
            product_benefits: Some("no monthly fee".to_string()),
            details: ProductDetails::PersonalCurrentAccount {
                interest_rate: Some(0.1),
                monthly_fee: Some(0.0),
                min_monthly_deposit: Some(500.0),
                interest_free_overdraft_limit: Some(50.0),
            },
        },
        Product {
            product_id: "SAV-01".to_string(),
            product_name: "Rainy Day Saver".to_string(),
            product_benefits: None,
            details: ProductDetails::Savings {
                interest_rate: Some(2.5),
                max_monthly_deposit: Some(250.0),
                max_yearly_withdrawal: Some(3000.0),
                max_withdrawal_limit: Some(500.0),
            },
        },
        Product {
            product_id: "CC-01".to_string(),
            product_name: "Cashback Credit Card".to_string(),
            product_benefits: Some("1% cashback".to_string()),
            details: ProductDetails::CreditCard {
                credit_limit: Some(5000.0),
                daily_interest_rate: Some(0.049),
                monthly_fee: None,
            },
        },
        Product {
            product_id: "OD-01".to_string(),
            product_name: "Arranged Overdraft".to_string(),
            product_benefits: None,
            details: ProductDetails::Overdraft {
                daily_interest_rate: Some(0.078),
                interest_free_buffer: Some(25.0),
            },
        },
    ]
}

pub fn count_table(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}
