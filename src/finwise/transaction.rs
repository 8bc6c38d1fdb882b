/*!
Structs related to FinWise transactions API responses.
*/

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/**
A monetary value: decimal magnitude plus ISO 4217 currency code.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub amount: Decimal,
    pub currency_code: String,
}

/**
Structure representing a FinWise transaction.

Wire field names are camelCase. Required fields must be present and
type-coercible; a failure on any of them rejects the whole record.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// ID of the transaction.
    pub id: String,

    /// When the transaction was created upstream.
    pub created_at: DateTime<Utc>,

    /// Last update of the transaction.
    pub updated_at: DateTime<Utc>,

    /// Label of the transaction, can be edited upstream.
    pub description: String,

    /// Full label of the transaction, as seen on the bank.
    pub original_description: Option<String>,

    /// ID of the related account.
    pub account_id: String,

    /// Value of the transaction.
    pub amount: Amount,

    /// Date when the transaction is posted to the account.
    pub date: DateTime<Utc>,

    /// ID of the assigned category.
    pub transaction_category_id: Option<String>,

    /// ID of the category as originally detected upstream.
    pub original_transaction_category_id: Option<String>,

    /// ID of the assigned merchant.
    pub merchant_id: Option<String>,

    /// ID of the merchant as originally detected upstream.
    pub original_merchant_id: Option<String>,

    /// ID of the owning user.
    pub user_id: String,

    /// Whether the transaction still needs a manual review.
    pub needs_review: bool,

    /// Tags attached to the transaction. Shape is not documented upstream.
    #[serde(default)]
    pub transaction_tags: Vec<Value>,

    /// File records attached to the transaction.
    #[serde(default)]
    pub file_records: Vec<Value>,

    // Other optional fields.
    /// ID of the parent transaction, for split children.
    pub parent_transaction_id: Option<String>,

    /// Split details. Shape is not documented upstream.
    pub splits: Option<Value>,

    /// Whether the transaction was entered manually.
    pub is_manual: Option<bool>,

    /// Whether the transaction is a transfer between accounts.
    pub is_transfer: Option<bool>,

    /// User-visible notes.
    pub notes: Option<String>,

    /// If set, when the transaction was archived.
    pub archived_at: Option<DateTime<Utc>>,

    /// Date considered by reporting, when it differs from `date`.
    pub effective_date: Option<DateTime<Utc>>,

    /// ID of the import batch that produced this transaction.
    pub data_import_id: Option<String>,

    /// If true, this transaction has not yet been posted to the account.
    pub is_pending: Option<bool>,

    /// ID of the pending transaction this one settled.
    pub pending_transaction_id: Option<String>,

    /// Internal notes, not user-visible.
    pub internal_notes: Option<String>,

    /// ID of the account the transaction was originally imported into.
    pub original_account_id: Option<String>,
}

/// Keeps transactions whose calendar date (date portion only) lies within
/// `[start_date, end_date]`, both bounds inclusive and open-ended when absent.
/// Order is preserved; filtering is idempotent.
pub fn filter_by_date(
    transactions: Vec<Transaction>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|t| {
            let date = t.date.date_naive();
            start_date.is_none_or(|start| date >= start)
                && end_date.is_none_or(|end| date <= end)
        })
        .collect()
}
