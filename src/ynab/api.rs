//! Struct and methods to call YNAB's APIs

use super::Budget;
use crate::error::{FinabError, Result, json_type_name};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, error};

const YNAB_API_BASE: &str = "https://api.ynab.com/v1";

#[derive(Clone)]
pub struct YnabApi {
    token: String,
    base_url: String,
}

impl YnabApi {
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(access_token, YNAB_API_BASE)
    }

    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let token = normalize_token(&access_token.into())?;
        Ok(Self {
            token,
            base_url: base_url.into(),
        })
    }

    /// Fetches all budgets from YNAB.
    ///
    /// Only the `data.budgets` array is decoded from the body; the sibling
    /// `default_budget` field is known to ship malformed data upstream and
    /// must not abort the listing.
    pub async fn get_budgets(&self) -> Result<Vec<Budget>> {
        let text = self.get_text("/budgets").await?;
        parse_budgets(&text)
    }

    /// Fetches transactions from a specific budget.
    ///
    /// `start_date`, if given, is passed upstream as an inclusive `since_date`
    /// lower bound and is not re-checked client-side. `end_date` is applied
    /// client-side (inclusive), since upstream has no upper-bound parameter.
    pub async fn get_transactions(
        &self,
        budget_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Value>> {
        let path = transactions_path(budget_id, start_date);
        let text = self.get_text(&path).await?;
        let transactions = parse_transactions(&text)?;
        filter_until(transactions, end_date)
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let api = format!("{}{}", self.base_url, path);

        debug!("Calling YNAB API: {}", api);

        let client = reqwest::Client::new();
        let text = client
            .get(&api)
            .bearer_auth(&self.token)
            .send()
            .await?
            .text()
            .await?;
        Ok(text)
    }
}

/// Strips one leading case-insensitive `"Bearer "` prefix if present; the
/// outbound authorization header re-adds exactly one.
fn normalize_token(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FinabError::Configuration(
            "YNAB access token is empty".to_string(),
        ));
    }
    let token = match raw.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => raw[7..].trim(),
        _ => raw,
    };
    if token.is_empty() {
        return Err(FinabError::Configuration(
            "YNAB access token is empty after stripping the Bearer prefix".to_string(),
        ));
    }
    Ok(token.to_string())
}

/// Request path for a budget's transactions, with the optional server-side
/// `since_date` lower bound.
fn transactions_path(budget_id: &str, since_date: Option<NaiveDate>) -> String {
    match since_date {
        Some(since) => format!(
            "/budgets/{budget_id}/transactions?since_date={}",
            since.format("%Y-%m-%d")
        ),
        None => format!("/budgets/{budget_id}/transactions"),
    }
}

/// Decodes only the `data.budgets` substructure of a budgets response,
/// tolerating malformed sibling fields elsewhere in the document.
pub fn parse_budgets(body: &str) -> Result<Vec<Budget>> {
    let items = extract_data_array(body, "budgets")?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let context = match item.get("id").and_then(Value::as_str) {
                Some(id) => format!("budget id {id}"),
                None => format!("budget at index {index}"),
            };
            serde_json::from_value(item).map_err(|e| FinabError::Validation {
                context,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Decodes only the `data.transactions` substructure of a transactions
/// response, keeping each record opaque.
pub fn parse_transactions(body: &str) -> Result<Vec<Value>> {
    extract_data_array(body, "transactions")
}

fn extract_data_array(body: &str, field: &'static str) -> Result<Vec<Value>> {
    let mut value: Value = serde_json::from_str(body).map_err(|e| {
        error!("Failed to decode YNAB API response: {:?}", body);
        FinabError::Format {
            expected: "an object",
            found: format!("unparseable JSON ({e})"),
        }
    })?;

    let Some(inner) = value.pointer_mut(&format!("/data/{field}")) else {
        return Err(FinabError::Format {
            expected: "an object with a data array field",
            found: format!("a document without data.{field}"),
        });
    };

    match inner.take() {
        Value::Array(items) => Ok(items),
        other => Err(FinabError::Format {
            expected: "an array",
            found: json_type_name(&other).to_string(),
        }),
    }
}

/// Keeps transactions whose `date` attribute is on or before `end_date`
/// (inclusive); a no-op when `end_date` is absent. A record with a missing or
/// unparseable date fails the batch once the filter makes it load-bearing.
pub fn filter_until(transactions: Vec<Value>, end_date: Option<NaiveDate>) -> Result<Vec<Value>> {
    let Some(end) = end_date else {
        return Ok(transactions);
    };

    let mut kept = Vec::with_capacity(transactions.len());
    for (index, transaction) in transactions.into_iter().enumerate() {
        let context = match transaction.get("id").and_then(Value::as_str) {
            Some(id) => format!("transaction id {id}"),
            None => format!("transaction at index {index}"),
        };
        let Some(date_str) = transaction.get("date").and_then(Value::as_str) else {
            return Err(FinabError::Validation {
                context,
                reason: "missing date attribute".to_string(),
            });
        };
        let date: NaiveDate = date_str.parse().map_err(|e| FinabError::Validation {
            context,
            reason: format!("invalid date {date_str:?}: {e}"),
        })?;
        if date <= end {
            kept.push(transaction);
        }
    }
    Ok(kept)
}
