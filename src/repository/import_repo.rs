// ==========================================
// Banking Data Loader - insert/read repository
// ==========================================
// The `*_tx` functions operate inside the caller's transaction;
// only the import orchestrator opens one. `insert_products` is
// the catalog seeding entry point (products arrive outside the
// workbook) and manages its own transaction.
// ==========================================

use crate::domain::{Account, BankTransaction, Customer, Interaction, Product, ProductDetails, ProductType};
use crate::error::{ImportError, ImportResult};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

/// Insert customers inside an open transaction.
pub fn insert_customers_tx(tx: &Transaction, customers: &[Customer]) -> ImportResult<usize> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO customer (
            customer_id, title, name, surname, nationality, dob,
            address, city, postcode, monthly_income, marital_status
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
    )?;

    for customer in customers {
        stmt.execute(params![
            customer.customer_id,
            customer.title,
            customer.name,
            customer.surname,
            customer.nationality,
            customer.dob,
            customer.address,
            customer.city,
            customer.postcode,
            customer.monthly_income,
            customer.marital_status,
        ])?;
    }
    Ok(customers.len())
}

/// Insert accounts inside an open transaction.
pub fn insert_accounts_tx(tx: &Transaction, accounts: &[Account]) -> ImportResult<usize> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO account (
            account_id, customer_id, product_id, starting_balance, since
        ) VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )?;

    for account in accounts {
        stmt.execute(params![
            account.account_id,
            account.customer_id,
            account.product_id,
            account.starting_balance,
            account.since,
        ])?;
    }
    Ok(accounts.len())
}

/// Insert interactions inside an open transaction.
pub fn insert_interactions_tx(
    tx: &Transaction,
    interactions: &[Interaction],
) -> ImportResult<usize> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO interaction (
            visit_id, customer_id, visit_type, visit_date,
            area_id, area_view_open_time, area_view_close_time
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )?;

    for interaction in interactions {
        stmt.execute(params![
            interaction.visit_id,
            interaction.customer_id,
            interaction.visit_type,
            interaction.visit_date,
            interaction.area_id,
            interaction.area_view_open_time,
            interaction.area_view_close_time,
        ])?;
    }
    Ok(interactions.len())
}

/// Insert transactions inside an open transaction.
pub fn insert_transactions_tx(
    tx: &Transaction,
    transactions: &[BankTransaction],
) -> ImportResult<usize> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO bank_transaction (
            transaction_id, account_id, transaction_date, transaction_at,
            amount, payment_type, category, reference
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )?;

    for transaction in transactions {
        stmt.execute(params![
            transaction.transaction_id,
            transaction.account_id,
            transaction.transaction_date,
            transaction.transaction_at,
            transaction.amount,
            transaction.payment_type,
            transaction.category,
            transaction.reference,
        ])?;
    }
    Ok(transactions.len())
}

/// Insert products inside an open transaction: the base row plus
/// the detail row selected by the payload variant.
pub fn insert_products_tx(tx: &Transaction, products: &[Product]) -> ImportResult<usize> {
    for product in products {
        tx.execute(
            r#"
            INSERT INTO product (product_id, product_name, product_type, product_benefits)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                product.product_id,
                product.product_name,
                product.product_type().as_str(),
                product.product_benefits,
            ],
        )?;

        match &product.details {
            ProductDetails::PersonalCurrentAccount {
                interest_rate,
                monthly_fee,
                min_monthly_deposit,
                interest_free_overdraft_limit,
            } => {
                tx.execute(
                    r#"
                    INSERT INTO product_personal_current_account (
                        product_id, interest_rate, monthly_fee,
                        min_monthly_deposit, interest_free_overdraft_limit
                    ) VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        product.product_id,
                        interest_rate,
                        monthly_fee,
                        min_monthly_deposit,
                        interest_free_overdraft_limit,
                    ],
                )?;
            }
            ProductDetails::Savings {
                interest_rate,
                max_monthly_deposit,
                max_yearly_withdrawal,
                max_withdrawal_limit,
            } => {
                tx.execute(
                    r#"
                    INSERT INTO product_savings (
                        product_id, interest_rate, max_monthly_deposit,
                        max_yearly_withdrawal, max_withdrawal_limit
                    ) VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        product.product_id,
                        interest_rate,
                        max_monthly_deposit,
                        max_yearly_withdrawal,
                        max_withdrawal_limit,
                    ],
                )?;
            }
            ProductDetails::CreditCard {
                credit_limit,
                daily_interest_rate,
                monthly_fee,
            } => {
                tx.execute(
                    r#"
                    INSERT INTO product_credit_card (
                        product_id, credit_limit, daily_interest_rate, monthly_fee
                    ) VALUES (?1, ?2, ?3, ?4)
                    "#,
                    params![
                        product.product_id,
                        credit_limit,
                        daily_interest_rate,
                        monthly_fee,
                    ],
                )?;
            }
            ProductDetails::Overdraft {
                daily_interest_rate,
                interest_free_buffer,
            } => {
                tx.execute(
                    r#"
                    INSERT INTO product_overdraft (
                        product_id, daily_interest_rate, interest_free_buffer
                    ) VALUES (?1, ?2, ?3)
                    "#,
                    params![product.product_id, daily_interest_rate, interest_free_buffer],
                )?;
            }
        }
    }
    Ok(products.len())
}

/// Seed the product catalog in its own transaction.
pub fn insert_products(conn: &mut Connection, products: &[Product]) -> ImportResult<usize> {
    let tx = conn.transaction()?;
    let count = insert_products_tx(&tx, products)?;
    tx.commit()?;
    Ok(count)
}

/// Load one product, joining the detail row selected by the
/// declared type. A base row whose detail row is missing is a
/// data-integrity defect and surfaces as an error, never as a
/// silent null.
pub fn load_product(conn: &Connection, product_id: &str) -> ImportResult<Option<Product>> {
    let base = conn
        .query_row(
            "SELECT product_id, product_name, product_type, product_benefits
             FROM product WHERE product_id = ?1",
            [product_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            },
        )
        .optional()?;

    let (product_id, product_name, type_str, product_benefits) = match base {
        Some(b) => b,
        None => return Ok(None),
    };

    let product_type = ProductType::parse(&type_str)?;
    let details = load_product_details(conn, &product_id, product_type)?.ok_or_else(|| {
        ImportError::ProductDetailMissing {
            product_id: product_id.clone(),
            product_type: type_str,
        }
    })?;

    Ok(Some(Product {
        product_id,
        product_name,
        product_benefits,
        details,
    }))
}

fn load_product_details(
    conn: &Connection,
    product_id: &str,
    product_type: ProductType,
) -> ImportResult<Option<ProductDetails>> {
    let details = match product_type {
        ProductType::PersonalCurrentAccount => conn
            .query_row(
                "SELECT interest_rate, monthly_fee, min_monthly_deposit,
                        interest_free_overdraft_limit
                 FROM product_personal_current_account WHERE product_id = ?1",
                [product_id],
                |row| {
                    Ok(ProductDetails::PersonalCurrentAccount {
                        interest_rate: row.get(0)?,
                        monthly_fee: row.get(1)?,
                        min_monthly_deposit: row.get(2)?,
                        interest_free_overdraft_limit: row.get(3)?,
                    })
                },
            )
            .optional()?,
        ProductType::Savings => conn
            .query_row(
                "SELECT interest_rate, max_monthly_deposit, max_yearly_withdrawal,
                        max_withdrawal_limit
                 FROM product_savings WHERE product_id = ?1",
                [product_id],
                |row| {
                    Ok(ProductDetails::Savings {
                        interest_rate: row.get(0)?,
                        max_monthly_deposit: row.get(1)?,
                        max_yearly_withdrawal: row.get(2)?,
                        max_withdrawal_limit: row.get(3)?,
                    })
                },
            )
            .optional()?,
        ProductType::CreditCard => conn
            .query_row(
                "SELECT credit_limit, daily_interest_rate, monthly_fee
                 FROM product_credit_card WHERE product_id = ?1",
                [product_id],
                |row| {
                    Ok(ProductDetails::CreditCard {
                        credit_limit: row.get(0)?,
                        daily_interest_rate: row.get(1)?,
                        monthly_fee: row.get(2)?,
                    })
                },
            )
            .optional()?,
        ProductType::Overdraft => conn
            .query_row(
                "SELECT daily_interest_rate, interest_free_buffer
                 FROM product_overdraft WHERE product_id = ?1",
                [product_id],
                |row| {
                    Ok(ProductDetails::Overdraft {
                        daily_interest_rate: row.get(0)?,
                        interest_free_buffer: row.get(1)?,
                    })
                },
            )
            .optional()?,
    };
    Ok(details)
}
