use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{ExpenseRecord, NewExpense, RecordedAt};

/// Request body for creating a single record
#[derive(Debug, Serialize)]
pub struct CreateRecordRequest<'a> {
    pub fields: &'a NewExpense,
}

/// One page of GET /v0/{base}/{table}
#[derive(Debug, Deserialize)]
pub struct ListRecordsResponse {
    #[serde(default)]
    pub records: Vec<AirtableRecord>,
    /// Present while more pages remain
    pub offset: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirtableRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl AirtableRecord {
    /// Decode the row leniently. Bad cells become `None` rather than errors.
    pub fn into_expense(self) -> ExpenseRecord {
        let amount = self.fields.get("Amount").and_then(parse_amount);
        let recorded_at = self.fields.get("Date").and_then(parse_date);
        if amount.is_none() || recorded_at.is_none() {
            debug!("Record {} has an unusable Amount or Date", self.id);
        }

        ExpenseRecord {
            category: self
                .fields
                .get("Category")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            amount,
            recorded_at,
        }
    }
}

fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_date(value: &Value) -> Option<RecordedAt> {
    let s = value.as_str()?.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(RecordedAt::Instant(ts.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(RecordedAt::Day)
}
