/*!
Structs related to YNAB budgets API responses.
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/**
Structure representing a YNAB budget summary.

The upstream schema is not stable (a sibling `default_budget` field is known to
ship malformed data), so only `id` and `name` are required; every other field
is carried opaquely in `extra` and round-trips unchanged.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// ID of the budget.
    pub id: String,
    /// Display name of the budget.
    pub name: String,
    /// Any other upstream fields, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_round_trip_through_extra() {
        let raw = json!({
            "id": "b1",
            "name": "Household",
            "last_modified_on": "2026-02-01T12:00:00Z",
            "currency_format": { "iso_code": "USD" }
        });

        let budget: Budget = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(budget.id, "b1");
        assert_eq!(budget.name, "Household");
        assert_eq!(
            budget.extra["last_modified_on"],
            json!("2026-02-01T12:00:00Z")
        );

        assert_eq!(serde_json::to_value(&budget).unwrap(), raw);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let raw = json!({ "id": "b1" });
        assert!(serde_json::from_value::<Budget>(raw).is_err());
    }
}
