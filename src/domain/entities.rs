// ==========================================
// Banking Data Loader - entity records
// ==========================================
// Written by the import pipeline only; the schema
// initializer recreates the tables as a disjoint operation.
// Identifiers are always String, even when the source cell
// was numeric, so foreign-key joins never fail on type.
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// Customer - identity and demographics
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    // ===== primary key =====
    pub customer_id: String,

    // ===== identity =====
    pub title: Option<String>,
    pub name: String,    // required by schema
    pub surname: String, // required by schema
    pub nationality: Option<String>,
    pub dob: Option<NaiveDate>,

    // ===== address =====
    pub address: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,

    // ===== financial profile =====
    pub monthly_income: Option<f64>,
    pub marital_status: Option<String>,
}

// ==========================================
// Account - links one Customer to one Product
// ==========================================
// Both foreign keys are required: an account cannot exist
// without its owner and its product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,

    // ===== foreign keys =====
    pub customer_id: String, // FK -> customer
    pub product_id: String,  // FK -> product

    // ===== opening terms =====
    pub starting_balance: Option<f64>,
    pub since: Option<NaiveDate>, // opening date
}

// ==========================================
// Interaction - a customer touchpoint/visit
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub visit_id: String,

    pub customer_id: String, // FK -> customer
    pub visit_type: Option<String>,
    pub visit_date: Option<NaiveDate>,

    // ===== area view window =====
    pub area_id: Option<String>,
    pub area_view_open_time: Option<NaiveDateTime>,
    pub area_view_close_time: Option<NaiveDateTime>,
}

// ==========================================
// BankTransaction - a ledger entry against an Account
// ==========================================
// `transaction_at` is the reconciled instant: date + time when
// both are present, midnight of the date when the time is
// absent, None when the date is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankTransaction {
    pub transaction_id: String,

    pub account_id: String, // FK -> account

    // ===== when =====
    pub transaction_date: Option<NaiveDate>,
    pub transaction_at: Option<NaiveDateTime>,

    // ===== what =====
    pub amount: f64, // required; a missing amount fails the row
    pub payment_type: Option<String>,
    pub category: Option<String>,
    pub reference: Option<String>,
}
