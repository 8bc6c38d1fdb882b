//! Struct and methods to call FinWise's APIs

use super::{Transaction, filter_by_date};
use crate::error::{FinabError, Result, json_type_name};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, error};

#[derive(Clone)]
pub struct FinWiseApi {
    token: String,
    domain: String,
}

impl FinWiseApi {
    pub fn new(domain: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let domain = domain.into();
        let token = token.into();
        if domain.trim().is_empty() {
            return Err(FinabError::Configuration(
                "FinWise domain is empty".to_string(),
            ));
        }
        if token.trim().is_empty() {
            return Err(FinabError::Configuration(
                "FinWise token is empty".to_string(),
            ));
        }
        Ok(Self { token, domain })
    }

    /// Fetches all transactions from FinWise and optionally filters by date.
    ///
    /// The endpoint does not support query parameters, so filtering is done
    /// client-side, both bounds inclusive on the calendar date.
    pub async fn get_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>> {
        let api = format!("{}/transactions", self.domain);

        debug!("Calling FinWise API: {}", api);

        let client = reqwest::Client::new();
        let text = client
            .get(&api)
            .bearer_auth(&self.token)
            .send()
            .await?
            .text()
            .await?;

        let transactions = parse_transactions(&text)?;
        Ok(filter_by_date(transactions, start_date, end_date))
    }
}

/// Decodes a raw FinWise response body into validated transactions.
///
/// The body must be a bare JSON array; anything else is a contract violation.
/// A single element that fails coercion fails the whole batch, carrying the
/// element's id (or index) as context.
pub fn parse_transactions(body: &str) -> Result<Vec<Transaction>> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        error!("Failed to decode FinWise API response: {:?}", body);
        FinabError::Format {
            expected: "an array",
            found: format!("unparseable JSON ({e})"),
        }
    })?;

    let Value::Array(items) = value else {
        return Err(FinabError::Format {
            expected: "an array",
            found: json_type_name(&value).to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let context = match item.get("id").and_then(Value::as_str) {
                Some(id) => format!("transaction id {id}"),
                None => format!("transaction at index {index}"),
            };
            serde_json::from_value(item).map_err(|e| FinabError::Validation {
                context,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_transaction(id: &str, date: &str) -> Value {
        json!({
            "id": id,
            "createdAt": format!("{date}T08:00:00Z"),
            "updatedAt": format!("{date}T08:00:00Z"),
            "description": "Groceries",
            "originalDescription": "GROCERY STORE 123",
            "accountId": "acc-1",
            "amount": { "amount": -56.03, "currencyCode": "USD" },
            "date": format!("{date}T13:45:00Z"),
            "userId": "user-1",
            "needsReview": true,
            "transactionTags": [],
            "fileRecords": []
        })
    }

    #[test]
    fn parses_one_record_per_element_in_order() {
        let body = json!([
            raw_transaction("t1", "2026-01-05"),
            raw_transaction("t2", "2026-01-06"),
            raw_transaction("t3", "2026-01-07"),
        ])
        .to_string();

        let transactions = parse_transactions(&body).unwrap();
        let ids: Vec<&str> = transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2", "t3"]);
    }

    #[test]
    fn non_array_top_level_is_a_format_error() {
        for (body, found) in [
            ("{}", "an object"),
            ("\"oops\"", "a string"),
            ("42", "a number"),
            ("null", "null"),
            ("true", "a boolean"),
        ] {
            match parse_transactions(body) {
                Err(FinabError::Format { found: f, .. }) => assert_eq!(f, found),
                other => panic!("expected Format error for {body}, got {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_record_fails_the_whole_batch_with_context() {
        let mut bad = raw_transaction("t-bad", "2026-01-06");
        bad.as_object_mut().unwrap().remove("userId");
        let body = json!([raw_transaction("t1", "2026-01-05"), bad]).to_string();

        match parse_transactions(&body) {
            Err(FinabError::Validation { context, .. }) => {
                assert_eq!(context, "transaction id t-bad");
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_record_without_id_reports_its_index() {
        let body = json!([raw_transaction("t1", "2026-01-05"), { "description": "?" }])
            .to_string();

        match parse_transactions(&body) {
            Err(FinabError::Validation { context, .. }) => {
                assert_eq!(context, "transaction at index 1");
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn parse_then_filter_keeps_the_in_range_records() {
        let body = json!([
            raw_transaction("t1", "2025-12-31"),
            raw_transaction("t2", "2026-06-15"),
            raw_transaction("t3", "2026-11-01"),
        ])
        .to_string();

        let transactions = parse_transactions(&body).unwrap();
        let kept = filter_by_date(
            transactions,
            Some("2026-01-01".parse().unwrap()),
            Some("2026-12-31".parse().unwrap()),
        );
        let ids: Vec<&str> = kept.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t2", "t3"]);
    }
}
