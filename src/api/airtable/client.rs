use chrono::NaiveDate;
use chrono_tz::Tz;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::{CreateRecordRequest, ListRecordsResponse};
use crate::api::{ApiError, Ledger};
use crate::models::{ExpenseRecord, NewExpense};
use crate::utils::RateLimiter;

/// Airtable limits each base to 5 requests per second
const REQUESTS_PER_SECOND: usize = 5;

/// Airtable table used as the expense ledger
pub struct AirtableClient {
    http_client: HttpClient,
    api_token: String,
    base_url: String,
    base_id: String,
    table_name: String,
    rate_limiter: RateLimiter,
}

impl AirtableClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.airtable.com/v0";

    pub fn new(api_token: String, base_id: String, table_name: String) -> Self {
        Self::with_base_url(api_token, base_id, table_name, Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom API root (for testing)
    pub fn with_base_url(api_token: String, base_id: String, table_name: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            base_url,
            base_id,
            table_name,
            rate_limiter: RateLimiter::per_second(REQUESTS_PER_SECOND),
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.base_id,
            urlencoding::encode(&self.table_name)
        )
    }

    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_token))
            .map_err(|e| ApiError::RequestError(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// GET every page of the table, optionally filtered by a formula
    async fn list_records(&self, formula: Option<&str>) -> Result<Vec<ExpenseRecord>, ApiError> {
        let url = self.table_url();
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut query: Vec<(&str, &str)> = Vec::new();
            if let Some(formula) = formula {
                query.push(("filterByFormula", formula));
            }
            if let Some(ref offset) = offset {
                query.push(("offset", offset.as_str()));
            }

            self.rate_limiter.acquire().await;
            let response = self
                .http_client
                .get(&url)
                .headers(self.create_headers()?)
                .query(&query)
                .send()
                .await
                .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

            if !response.status().is_success() {
                return Err(ApiError::from_response(response).await);
            }

            let page: ListRecordsResponse = response
                .json()
                .await
                .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

            records.extend(page.records.into_iter().map(|r| r.into_expense()));

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!("Fetched {} ledger records", records.len());
        Ok(records)
    }
}

/// Formula matching rows whose `Date` falls on `day` in `tz`
pub fn day_formula(day: NaiveDate, tz: Tz) -> String {
    format!(
        "DATETIME_FORMAT(SET_TIMEZONE({{Date}}, '{}'), 'YYYY-MM-DD') = '{}'",
        tz.name(),
        day.format("%Y-%m-%d")
    )
}

#[async_trait::async_trait]
impl Ledger for AirtableClient {
    /// POST /v0/{base}/{table}
    async fn append(&self, expense: &NewExpense) -> Result<(), ApiError> {
        self.rate_limiter.acquire().await;
        let response = self
            .http_client
            .post(self.table_url())
            .headers(self.create_headers()?)
            .json(&CreateRecordRequest { fields: expense })
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ExpenseRecord>, ApiError> {
        self.list_records(None).await
    }

    async fn list_for_day(&self, day: NaiveDate, tz: Tz) -> Result<Vec<ExpenseRecord>, ApiError> {
        self.list_records(Some(&day_formula(day, tz))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_encodes_name() {
        let client = AirtableClient::new("key".into(), "appBase".into(), "Table 1".into());
        assert_eq!(client.table_url(), "https://api.airtable.com/v0/appBase/Table%201");
    }

    #[test]
    fn test_day_formula() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            day_formula(day, chrono_tz::Asia::Bangkok),
            "DATETIME_FORMAT(SET_TIMEZONE({Date}, 'Asia/Bangkok'), 'YYYY-MM-DD') = '2024-05-01'"
        );
    }

    #[test]
    fn test_create_request_body() {
        let expense = NewExpense {
            category: crate::models::Category::Food,
            amount: 45.0,
        };
        let json = serde_json::to_value(CreateRecordRequest { fields: &expense }).unwrap();
        assert_eq!(json, serde_json::json!({ "fields": { "Category": "food", "Amount": 45.0 } }));
    }
}
