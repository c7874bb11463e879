// ==========================================
// Banking Data Loader - row mapper
// ==========================================
// Converts one raw spreadsheet row into one typed entity record.
// Rules:
// - empty cell -> None, never the text "None" or ""
// - identifiers normalized to String even when the cell is numeric
// - dates parsed day-first (31/12/2020 is 31 December)
// - transaction date+time merged into a single instant
// - a missing required amount fails the row, never defaults to zero
// ==========================================

use crate::domain::{Account, BankTransaction, Customer, Interaction};
use crate::error::{ImportError, ImportResult};
use crate::importer::workbook::RawRow;
use calamine::{Data, DataType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// ==========================================
// per-entity mapping
// ==========================================

/// Map one row of the customer sheet.
pub fn map_customer(row: &RawRow, sheet: &str, row_number: usize) -> ImportResult<Customer> {
    Ok(Customer {
        customer_id: required_id(row, sheet, row_number, "customer-id")?,
        title: get_string(row, "title"),
        name: required_string(row, sheet, row_number, "name")?,
        surname: required_string(row, sheet, row_number, "surname")?,
        nationality: get_string(row, "nationality"),
        dob: parse_date(row, sheet, row_number, "dob")?,
        address: get_string(row, "address"),
        city: get_string(row, "city"),
        postcode: get_string(row, "postcode"),
        monthly_income: parse_f64(row, sheet, row_number, "monthly-income")?,
        marital_status: get_string(row, "marital-status"),
    })
}

/// Map one row of the account sheet.
pub fn map_account(row: &RawRow, sheet: &str, row_number: usize) -> ImportResult<Account> {
    Ok(Account {
        account_id: required_id(row, sheet, row_number, "account-id")?,
        customer_id: required_id(row, sheet, row_number, "customer-id")?,
        product_id: required_id(row, sheet, row_number, "product-id")?,
        starting_balance: parse_f64(row, sheet, row_number, "starting-balance")?,
        since: parse_date(row, sheet, row_number, "since")?,
    })
}

/// Map one row of the interaction sheet.
pub fn map_interaction(row: &RawRow, sheet: &str, row_number: usize) -> ImportResult<Interaction> {
    Ok(Interaction {
        visit_id: required_id(row, sheet, row_number, "visit-id")?,
        customer_id: required_id(row, sheet, row_number, "customer-id")?,
        visit_type: get_string(row, "visit-type"),
        visit_date: parse_date(row, sheet, row_number, "visit-date")?,
        area_id: get_string(row, "area-id"),
        area_view_open_time: parse_datetime(row, sheet, row_number, "area-view-open-time")?,
        area_view_close_time: parse_datetime(row, sheet, row_number, "area-view-close-time")?,
    })
}

/// Map one row of the transaction sheet.
///
/// Date and time arrive in separate cells. Both present -> one
/// combined instant; date only -> midnight of that date; no date
/// -> no instant, regardless of time.
pub fn map_transaction(
    row: &RawRow,
    sheet: &str,
    row_number: usize,
) -> ImportResult<BankTransaction> {
    let transaction_date = parse_date(row, sheet, row_number, "transaction.date")?;
    let transaction_time = parse_time(row, sheet, row_number, "transaction.time")?;

    Ok(BankTransaction {
        transaction_id: required_id(row, sheet, row_number, "transaction.id")?,
        account_id: required_id(row, sheet, row_number, "account.id")?,
        transaction_date,
        transaction_at: combine_date_time(transaction_date, transaction_time),
        amount: required_f64(row, sheet, row_number, "transaction.amount")?,
        payment_type: get_string(row, "payment.type"),
        category: get_string(row, "transaction.category"),
        reference: get_string(row, "transaction.reference"),
    })
}

// ==========================================
// cell access helpers
// ==========================================

/// Extract a string field. Empty cell -> None. Numeric cells are
/// rendered without a trailing `.0`, so an id cell holding 1023
/// becomes the joinable string "1023".
pub fn get_string(row: &RawRow, field: &str) -> Option<String> {
    match row.get(field) {
        None | Some(Data::Empty) => None,
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(Data::Int(i)) => Some(i.to_string()),
        Some(Data::Float(f)) => Some(f.to_string()),
        Some(other) => {
            let rendered = other.to_string().trim().to_string();
            if rendered.is_empty() {
                None
            } else {
                Some(rendered)
            }
        }
    }
}

fn required_string(
    row: &RawRow,
    sheet: &str,
    row_number: usize,
    field: &str,
) -> ImportResult<String> {
    get_string(row, field).ok_or_else(|| ImportError::RequiredFieldMissing {
        sheet: sheet.to_string(),
        row: row_number,
        field: field.to_string(),
    })
}

/// Identifiers and strings share the same normalization; the
/// separate name marks the call sites where join keys are made.
fn required_id(row: &RawRow, sheet: &str, row_number: usize, field: &str) -> ImportResult<String> {
    required_string(row, sheet, row_number, field)
}

/// Parse an optional floating-point field.
pub fn parse_f64(
    row: &RawRow,
    sheet: &str,
    row_number: usize,
    field: &str,
) -> ImportResult<Option<f64>> {
    match row.get(field) {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::Float(f)) => Ok(Some(*f)),
        Some(Data::Int(i)) => Ok(Some(*i as f64)),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    sheet: sheet.to_string(),
                    row: row_number,
                    field: field.to_string(),
                    message: format!("not a number: {}", trimmed),
                })
        }
        Some(other) => Err(ImportError::TypeConversionError {
            sheet: sheet.to_string(),
            row: row_number,
            field: field.to_string(),
            message: format!("not a number: {}", other),
        }),
    }
}

/// Parse a required floating-point field. Missing or malformed is
/// a fatal row error, never a silent zero.
pub fn required_f64(
    row: &RawRow,
    sheet: &str,
    row_number: usize,
    field: &str,
) -> ImportResult<f64> {
    parse_f64(row, sheet, row_number, field)?.ok_or_else(|| ImportError::RequiredFieldMissing {
        sheet: sheet.to_string(),
        row: row_number,
        field: field.to_string(),
    })
}

/// Parse a date-only field. Native date cells are taken as-is;
/// strings use the day-first convention.
pub fn parse_date(
    row: &RawRow,
    sheet: &str,
    row_number: usize,
    field: &str,
) -> ImportResult<Option<NaiveDate>> {
    match row.get(field) {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            parse_date_dayfirst(trimmed)
                .map(Some)
                .ok_or_else(|| date_format_error(sheet, row_number, field, trimmed))
        }
        Some(cell) => cell
            .as_datetime()
            .map(|dt| Some(dt.date()))
            .ok_or_else(|| date_format_error(sheet, row_number, field, &cell.to_string())),
    }
}

/// Parse a time-of-day field. The cell may already be a time value
/// or a string; strings try HH:MM:SS first and fall back to HH:MM.
pub fn parse_time(
    row: &RawRow,
    sheet: &str,
    row_number: usize,
    field: &str,
) -> ImportResult<Option<NaiveTime>> {
    match row.get(field) {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
                .map(Some)
                .map_err(|_| ImportError::TimeFormatError {
                    sheet: sheet.to_string(),
                    row: row_number,
                    field: field.to_string(),
                    value: trimmed.to_string(),
                })
        }
        Some(cell) => cell
            .as_time()
            .map(Some)
            .ok_or_else(|| ImportError::TimeFormatError {
                sheet: sheet.to_string(),
                row: row_number,
                field: field.to_string(),
                value: cell.to_string(),
            }),
    }
}

/// Parse a full timestamp field (interaction open/close times).
pub fn parse_datetime(
    row: &RawRow,
    sheet: &str,
    row_number: usize,
    field: &str,
) -> ImportResult<Option<NaiveDateTime>> {
    match row.get(field) {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            parse_datetime_dayfirst(trimmed)
                .map(Some)
                .ok_or_else(|| date_format_error(sheet, row_number, field, trimmed))
        }
        Some(cell) => cell
            .as_datetime()
            .map(Some)
            .ok_or_else(|| date_format_error(sheet, row_number, field, &cell.to_string())),
    }
}

/// Merge a date and a time into one instant. A date without a time
/// means midnight; a time without a date means no instant at all.
pub fn combine_date_time(
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
) -> Option<NaiveDateTime> {
    date.map(|d| d.and_time(time.unwrap_or(NaiveTime::MIN)))
}

// day-first: ambiguous DD/MM wins over MM/DD
fn parse_date_dayfirst(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%y"))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

fn parse_datetime_dayfirst(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%d/%m/%Y %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%d/%m/%Y %H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| parse_date_dayfirst(value).map(|d| d.and_time(NaiveTime::MIN)))
}

fn date_format_error(sheet: &str, row_number: usize, field: &str, value: &str) -> ImportError {
    ImportError::DateFormatError {
        sheet: sheet.to_string(),
        row: row_number,
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "test sheet";

    fn row(cells: &[(&str, Data)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_date_parses_day_first() {
        let r = row(&[("dob", Data::String("31/12/2020".to_string()))]);
        let date = parse_date(&r, SHEET, 1, "dob").unwrap();
        assert_eq!(date, Some(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap()));
    }

    #[test]
    fn test_ambiguous_date_prefers_day_first() {
        // 03/04 is 3 April, not 4 March
        let r = row(&[("dob", Data::String("03/04/2021".to_string()))]);
        let date = parse_date(&r, SHEET, 1, "dob").unwrap();
        assert_eq!(date, Some(NaiveDate::from_ymd_opt(2021, 4, 3).unwrap()));
    }

    #[test]
    fn test_garbage_date_is_error() {
        let r = row(&[("dob", Data::String("not-a-date".to_string()))]);
        let result = parse_date(&r, SHEET, 3, "dob");
        match result {
            Err(ImportError::DateFormatError { sheet, row, field, .. }) => {
                assert_eq!(sheet, SHEET);
                assert_eq!(row, 3);
                assert_eq!(field, "dob");
            }
            other => panic!("expected DateFormatError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_date_is_none_not_now() {
        let r = row(&[("dob", Data::Empty)]);
        assert_eq!(parse_date(&r, SHEET, 1, "dob").unwrap(), None);
    }

    #[test]
    fn test_time_both_formats_agree() {
        let short = row(&[("transaction.time", Data::String("09:05".to_string()))]);
        let long = row(&[("transaction.time", Data::String("09:05:00".to_string()))]);

        let a = parse_time(&short, SHEET, 1, "transaction.time").unwrap();
        let b = parse_time(&long, SHEET, 1, "transaction.time").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Some(NaiveTime::from_hms_opt(9, 5, 0).unwrap()));
    }

    #[test]
    fn test_numeric_id_normalized_to_string() {
        let r = row(&[("customer-id", Data::Float(1023.0))]);
        assert_eq!(get_string(&r, "customer-id"), Some("1023".to_string()));
    }

    #[test]
    fn test_empty_string_cell_is_none() {
        let r = row(&[("title", Data::String("   ".to_string()))]);
        assert_eq!(get_string(&r, "title"), None);
    }

    #[test]
    fn test_combine_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2020, 12, 31);
        let time = NaiveTime::from_hms_opt(9, 5, 0);

        assert_eq!(
            combine_date_time(date, time),
            Some(
                NaiveDate::from_ymd_opt(2020, 12, 31)
                    .unwrap()
                    .and_hms_opt(9, 5, 0)
                    .unwrap()
            )
        );
        // date only -> midnight
        assert_eq!(
            combine_date_time(date, None),
            Some(
                NaiveDate::from_ymd_opt(2020, 12, 31)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            )
        );
        // no date -> no instant, regardless of time
        assert_eq!(combine_date_time(None, time), None);
    }

    #[test]
    fn test_transaction_missing_amount_is_fatal() {
        let r = row(&[
            ("transaction.id", Data::String("T1".to_string())),
            ("account.id", Data::String("A1".to_string())),
            ("transaction.date", Data::String("01/02/2021".to_string())),
        ]);
        let result = map_transaction(&r, SHEET, 7);
        match result {
            Err(ImportError::RequiredFieldMissing { row, field, .. }) => {
                assert_eq!(row, 7);
                assert_eq!(field, "transaction.amount");
            }
            other => panic!("expected RequiredFieldMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_transaction_non_numeric_amount_is_fatal() {
        let r = row(&[
            ("transaction.id", Data::String("T1".to_string())),
            ("account.id", Data::String("A1".to_string())),
            ("transaction.amount", Data::String("twelve".to_string())),
        ]);
        assert!(matches!(
            map_transaction(&r, SHEET, 1),
            Err(ImportError::TypeConversionError { .. })
        ));
    }

    #[test]
    fn test_transaction_time_without_date() {
        let r = row(&[
            ("transaction.id", Data::String("T1".to_string())),
            ("account.id", Data::Float(55.0)),
            ("transaction.time", Data::String("09:05".to_string())),
            ("transaction.amount", Data::Float(-12.5)),
        ]);
        let tx = map_transaction(&r, SHEET, 1).unwrap();
        assert_eq!(tx.account_id, "55");
        assert_eq!(tx.transaction_date, None);
        assert_eq!(tx.transaction_at, None);
        assert_eq!(tx.amount, -12.5);
    }

    #[test]
    fn test_map_customer_full_row() {
        let r = row(&[
            ("customer-id", Data::Float(1023.0)),
            ("title", Data::String("Ms".to_string())),
            ("name", Data::String("Ada".to_string())),
            ("surname", Data::String("Lovelace".to_string())),
            ("nationality", Data::String("GB".to_string())),
            ("dob", Data::String("10/12/1985".to_string())),
            ("address", Data::String("1 Analytical Way".to_string())),
            ("city", Data::String("London".to_string())),
            ("postcode", Data::String("EC1A 1AA".to_string())),
            ("monthly-income", Data::Float(4200.50)),
            ("marital-status", Data::Empty),
        ]);
        let customer = map_customer(&r, SHEET, 1).unwrap();
        assert_eq!(customer.customer_id, "1023");
        assert_eq!(customer.name, "Ada");
        assert_eq!(customer.dob, NaiveDate::from_ymd_opt(1985, 12, 10));
        assert_eq!(customer.monthly_income, Some(4200.50));
        assert_eq!(customer.marital_status, None);
    }

    #[test]
    fn test_map_customer_missing_id() {
        let r = row(&[
            ("name", Data::String("Ada".to_string())),
            ("surname", Data::String("Lovelace".to_string())),
        ]);
        assert!(matches!(
            map_customer(&r, SHEET, 2),
            Err(ImportError::RequiredFieldMissing { .. })
        ));
    }

    #[test]
    fn test_map_account_requires_both_foreign_keys() {
        let r = row(&[
            ("account-id", Data::String("A1".to_string())),
            ("customer-id", Data::String("C1".to_string())),
        ]);
        match map_account(&r, SHEET, 4) {
            Err(ImportError::RequiredFieldMissing { field, .. }) => {
                assert_eq!(field, "product-id");
            }
            other => panic!("expected RequiredFieldMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_map_interaction_datetime_fields() {
        let r = row(&[
            ("visit-id", Data::String("V1".to_string())),
            ("customer-id", Data::Float(1023.0)),
            ("visit-type", Data::String("branch".to_string())),
            ("visit-date", Data::String("05/06/2021".to_string())),
            ("area-id", Data::String("savings-overview".to_string())),
            (
                "area-view-open-time",
                Data::String("05/06/2021 10:15:00".to_string()),
            ),
            (
                "area-view-close-time",
                Data::String("05/06/2021 10:20".to_string()),
            ),
        ]);
        let interaction = map_interaction(&r, SHEET, 1).unwrap();
        assert_eq!(interaction.customer_id, "1023");
        assert_eq!(
            interaction.area_view_open_time,
            Some(
                NaiveDate::from_ymd_opt(2021, 6, 5)
                    .unwrap()
                    .and_hms_opt(10, 15, 0)
                    .unwrap()
            )
        );
        assert_eq!(
            interaction.area_view_close_time,
            Some(
                NaiveDate::from_ymd_opt(2021, 6, 5)
                    .unwrap()
                    .and_hms_opt(10, 20, 0)
                    .unwrap()
            )
        );
    }
}
