//! Expense ledger models

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use super::Category;

/// Fields written to the ledger when an expense is recorded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    #[serde(rename = "Category", serialize_with = "serialize_category")]
    pub category: Category,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

fn serialize_category<S: serde::Serializer>(category: &Category, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(category.as_str())
}

/// A row read back from the ledger.
///
/// Rows are owned by the external store and may be incomplete, so every field
/// is optional. Readers skip rows that lack what they need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseRecord {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub recorded_at: Option<RecordedAt>,
}

/// When a ledger row was recorded.
///
/// Date-only cells carry no time of day, so they stay a calendar date instead
/// of being pinned to an instant that some timezones would push into the
/// neighbouring day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordedAt {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

impl RecordedAt {
    /// Calendar date of the record as seen from `timezone`
    pub fn local_date<Z: TimeZone>(&self, timezone: &Z) -> NaiveDate {
        match self {
            RecordedAt::Instant(ts) => ts.with_timezone(timezone).date_naive(),
            RecordedAt::Day(day) => *day,
        }
    }
}

impl From<DateTime<Utc>> for RecordedAt {
    fn from(ts: DateTime<Utc>) -> Self {
        RecordedAt::Instant(ts)
    }
}

/// Result of recording an expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseResult {
    pub category: Category,
    pub amount: f64,
    pub daily_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_of_instant_and_day() {
        let late_utc = Utc.with_ymd_and_hms(2024, 4, 30, 20, 0, 0).unwrap();
        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert_eq!(RecordedAt::from(late_utc).local_date(&chrono_tz::Asia::Bangkok), may_first);
        assert_eq!(RecordedAt::from(late_utc).local_date(&Utc), may_first.pred_opt().unwrap());
        assert_eq!(RecordedAt::Day(may_first).local_date(&chrono_tz::Pacific::Kiritimati), may_first);
        assert_eq!(RecordedAt::Day(may_first).local_date(&chrono_tz::Pacific::Pago_Pago), may_first);
    }

    #[test]
    fn test_new_expense_uses_ledger_column_names() {
        let expense = NewExpense {
            category: Category::Transportation,
            amount: 120.5,
        };
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json, serde_json::json!({ "Category": "transportation", "Amount": 120.5 }));
    }
}
