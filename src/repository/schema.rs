// ==========================================
// Banking Data Loader - relational schema
// ==========================================
// The product hierarchy is persisted as a base `product` table
// plus one detail table per type, sharing the primary key
// (one-to-one join). The type column on the base row determines
// which detail row must exist.
// ==========================================

use crate::error::ImportResult;
use rusqlite::Connection;
use tracing::info;

/// Every table, parents first. Drop order is the reverse.
pub const TABLES: [&str; 9] = [
    "customer",
    "product",
    "product_personal_current_account",
    "product_savings",
    "product_credit_card",
    "product_overdraft",
    "account",
    "interaction",
    "bank_transaction",
];

const CREATE_ALL_SQL: &str = r#"
CREATE TABLE customer (
    customer_id     TEXT PRIMARY KEY,
    title           TEXT,
    name            TEXT NOT NULL,
    surname         TEXT NOT NULL,
    nationality     TEXT,
    dob             TEXT,
    address         TEXT,
    city            TEXT,
    postcode        TEXT,
    monthly_income  REAL,
    marital_status  TEXT
);

CREATE TABLE product (
    product_id       TEXT PRIMARY KEY,
    product_name     TEXT NOT NULL,
    product_type     TEXT NOT NULL,
    product_benefits TEXT
);

CREATE TABLE product_personal_current_account (
    product_id                    TEXT PRIMARY KEY REFERENCES product(product_id),
    interest_rate                 REAL,
    monthly_fee                   REAL,
    min_monthly_deposit           REAL,
    interest_free_overdraft_limit REAL
);

CREATE TABLE product_savings (
    product_id            TEXT PRIMARY KEY REFERENCES product(product_id),
    interest_rate         REAL,
    max_monthly_deposit   REAL,
    max_yearly_withdrawal REAL,
    max_withdrawal_limit  REAL
);

CREATE TABLE product_credit_card (
    product_id          TEXT PRIMARY KEY REFERENCES product(product_id),
    credit_limit        REAL,
    daily_interest_rate REAL,
    monthly_fee         REAL
);

CREATE TABLE product_overdraft (
    product_id           TEXT PRIMARY KEY REFERENCES product(product_id),
    daily_interest_rate  REAL,
    interest_free_buffer REAL
);

CREATE TABLE account (
    account_id       TEXT PRIMARY KEY,
    customer_id      TEXT NOT NULL REFERENCES customer(customer_id),
    product_id       TEXT NOT NULL REFERENCES product(product_id),
    starting_balance REAL,
    since            TEXT
);

CREATE TABLE interaction (
    visit_id             TEXT PRIMARY KEY,
    customer_id          TEXT NOT NULL REFERENCES customer(customer_id),
    visit_type           TEXT,
    visit_date           TEXT,
    area_id              TEXT,
    area_view_open_time  TEXT,
    area_view_close_time TEXT
);

CREATE TABLE bank_transaction (
    transaction_id   TEXT PRIMARY KEY,
    account_id       TEXT NOT NULL REFERENCES account(account_id),
    transaction_date TEXT,
    transaction_at   TEXT,
    amount           REAL NOT NULL,
    payment_type     TEXT,
    category         TEXT,
    reference        TEXT
);
"#;

/// Create every table. Fails if any already exists; callers that
/// want a clean slate use [`reset`].
pub fn create_all(conn: &Connection) -> ImportResult<()> {
    conn.execute_batch(CREATE_ALL_SQL)?;
    Ok(())
}

/// Drop every table, children first. Safe on an empty store.
pub fn drop_all(conn: &Connection) -> ImportResult<()> {
    let mut sql = String::new();
    for table in TABLES.iter().rev() {
        sql.push_str(&format!("DROP TABLE IF EXISTS {};\n", table));
    }
    conn.execute_batch(&sql)?;
    Ok(())
}

/// Destructively reset the schema: drop every table, then recreate
/// them empty. Idempotent; destroys all existing data with no
/// confirmation step.
pub fn reset(conn: &Connection) -> ImportResult<()> {
    drop_all(conn)?;
    create_all(conn)?;
    info!(tables = TABLES.len(), "schema reset complete");
    Ok(())
}
