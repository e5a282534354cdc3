//! # Record Normalizer
//!
//! Turns a loosely structured receipt object into a typed [`Receipt`], or
//! into the [`RecordDefect`] that stops evaluation early.
//!
//! ## Accepted Envelopes
//!
//! Upstream extractors emit MongoDB extended JSON. Integers:
//!
//! ```json
//! {"$numberInt": "150000"}   {"$numberLong": "150000"}   150000
//! ```
//!
//! Dates:
//!
//! ```json
//! {"$date": {"$numberLong": "1735689600000"}}
//! {"$date": 1735689600000}
//! {"$date": "2025-01-01T00:00:00Z"}
//! ```
//!
//! An unparsable or negative `totalAmount` becomes `0` and is logged; it does
//! not stop evaluation. An unparsable date becomes `None`, which the
//! aggregator reports as a malformed-date violation.
//!
//! This is the only module that knows about envelopes. The checks see
//! plain integers and [`Timestamp`]s.

use serde_json::{Map, Value};

use spendpol_core::{PolicyCatalog, Tier, Timestamp};

use crate::receipt::{LineItem, Receipt};
use crate::result::Violation;

/// A defect that ends evaluation before any tier-scoped check runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDefect {
    /// The record has no `bill` object.
    MissingBill,
    /// The bill has no `totalAmount` key.
    MissingTotalAmount,
    /// `employeeLevel` did not name a known tier, or named one the catalog
    /// does not define.
    UnknownTier(String),
}

impl RecordDefect {
    /// The violation reported for this defect.
    pub fn violation(&self) -> Violation {
        Violation::new(self.to_string())
    }
}

impl std::fmt::Display for RecordDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBill => f.write_str("Violation: Missing 'bill' key in receipt data."),
            Self::MissingTotalAmount => {
                f.write_str("Violation: Missing 'totalAmount' in bill data.")
            }
            Self::UnknownTier(raw) => write!(
                f,
                "Violation: Employee level '{raw}' not found in expense policies."
            ),
        }
    }
}

/// Normalize a raw receipt object.
///
/// Defects are checked in order: bill, total amount, tier.
pub fn normalize(record: &Map<String, Value>) -> Result<Receipt, RecordDefect> {
    let bill = record
        .get("bill")
        .and_then(Value::as_object)
        .ok_or(RecordDefect::MissingBill)?;

    let raw_amount = bill
        .get("totalAmount")
        .ok_or(RecordDefect::MissingTotalAmount)?;
    let total_amount = unwrap_amount(raw_amount);

    let tier = resolve_tier(record.get("employeeLevel"))?;
    let bill_date = bill.get("date").and_then(unwrap_date);

    let vendor_category = record
        .get("vendor")
        .and_then(Value::as_object)
        .and_then(|vendor| vendor.get("category"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    let items = record
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(line_item).collect())
        .unwrap_or_default();

    Ok(Receipt::new(tier, total_amount, bill_date, vendor_category, items))
}

/// Normalize a raw receipt object and require its tier in `catalog`.
///
/// A tier missing from the catalog is reported with the record's own
/// spelling, or the tier label when the level was defaulted.
pub fn normalize_against(
    record: &Map<String, Value>,
    catalog: &PolicyCatalog,
) -> Result<Receipt, RecordDefect> {
    let receipt = normalize(record)?;
    if catalog.contains_tier(receipt.tier()) {
        return Ok(receipt);
    }
    let raw = record
        .get("employeeLevel")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(receipt.tier().label());
    Err(RecordDefect::UnknownTier(raw.to_string()))
}

/// Resolve `employeeLevel`. Absent, `null`, or empty means [`Tier::Staff`].
pub fn resolve_tier(raw: Option<&Value>) -> Result<Tier, RecordDefect> {
    match raw {
        None | Some(Value::Null) => Ok(Tier::default()),
        Some(Value::String(s)) if s.is_empty() => Ok(Tier::default()),
        Some(Value::String(s)) => s
            .parse()
            .map_err(|_| RecordDefect::UnknownTier(s.clone())),
        Some(other) => Err(RecordDefect::UnknownTier(other.to_string())),
    }
}

/// Unwrap an integer envelope. `None` when the value is not a non-negative
/// integer in any accepted form.
pub fn unwrap_int(value: &Value) -> Option<u64> {
    match value {
        Value::Object(envelope) => envelope
            .get("$numberInt")
            .or_else(|| envelope.get("$numberLong"))
            .and_then(scalar_u64),
        other => scalar_u64(other),
    }
}

/// Unwrap `totalAmount`, defaulting to `0` when unparsable.
pub fn unwrap_amount(value: &Value) -> u64 {
    unwrap_int(value).unwrap_or_else(|| {
        tracing::warn!(total_amount = %value, "unparsable totalAmount, defaulting to 0");
        0
    })
}

/// Unwrap a `$date` envelope into a timestamp.
pub fn unwrap_date(value: &Value) -> Option<Timestamp> {
    let inner = value.as_object()?.get("$date")?;
    let parsed = match inner {
        Value::Object(envelope) => envelope
            .get("$numberLong")
            .and_then(scalar_i64)
            .and_then(|millis| Timestamp::from_epoch_millis(millis).ok()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Timestamp::from_epoch_millis(millis).ok()),
        Value::String(s) => Timestamp::parse_lenient(s).ok(),
        _ => None,
    };
    if parsed.is_none() {
        tracing::debug!(date = %value, "unparsable bill date");
    }
    parsed
}

fn line_item(value: &Value) -> LineItem {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let total = value.get("total").and_then(scalar_f64);
    LineItem { name, total }
}

fn scalar_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(envelope) => envelope
            .get("$numberDouble")
            .or_else(|| envelope.get("$numberInt"))
            .or_else(|| envelope.get("$numberLong"))
            .and_then(scalar_f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_bill_is_defect() {
        let record = obj(json!({"employeeLevel": "Executive Level"}));
        assert_eq!(normalize(&record), Err(RecordDefect::MissingBill));
    }

    #[test]
    fn non_object_bill_is_missing() {
        let record = obj(json!({"bill": null}));
        assert_eq!(normalize(&record), Err(RecordDefect::MissingBill));
    }

    #[test]
    fn missing_total_amount_is_defect() {
        let record = obj(json!({"bill": {"date": {"$date": 0}}}));
        assert_eq!(normalize(&record), Err(RecordDefect::MissingTotalAmount));
    }

    #[test]
    fn missing_amount_checked_before_tier() {
        let record = obj(json!({"bill": {}, "employeeLevel": "Intern"}));
        assert_eq!(normalize(&record), Err(RecordDefect::MissingTotalAmount));
    }

    #[test]
    fn unknown_tier_is_defect() {
        let record = obj(json!({"bill": {"totalAmount": 1}, "employeeLevel": "Intern"}));
        assert_eq!(
            normalize(&record),
            Err(RecordDefect::UnknownTier("Intern".into()))
        );
    }

    #[test]
    fn tier_absent_from_catalog_is_defect() {
        let catalog = PolicyCatalog::new().with_limit(
            Tier::Staff,
            spendpol_core::Subcategory::BusinessTrips,
            spendpol_core::LimitDescriptor::Unlimited,
        );
        let exec = obj(json!({"bill": {"totalAmount": 1}, "employeeLevel": "executive"}));
        assert_eq!(
            normalize_against(&exec, &catalog),
            Err(RecordDefect::UnknownTier("executive".into()))
        );

        let staff = obj(json!({"bill": {"totalAmount": 1}}));
        assert!(normalize_against(&staff, &catalog).is_ok());
        assert_eq!(
            normalize_against(&staff, &PolicyCatalog::new()),
            Err(RecordDefect::UnknownTier("Staff & Employees".into()))
        );
    }

    #[test]
    fn defect_messages() {
        assert_eq!(
            RecordDefect::MissingBill.violation().message,
            "Violation: Missing 'bill' key in receipt data."
        );
        assert_eq!(
            RecordDefect::UnknownTier("Intern".into()).to_string(),
            "Violation: Employee level 'Intern' not found in expense policies."
        );
    }

    #[test]
    fn tier_defaults_to_staff() {
        assert_eq!(resolve_tier(None), Ok(Tier::Staff));
        assert_eq!(resolve_tier(Some(&Value::Null)), Ok(Tier::Staff));
        assert_eq!(resolve_tier(Some(&json!(""))), Ok(Tier::Staff));
    }

    #[test]
    fn tier_accepts_label_and_identifier() {
        assert_eq!(
            resolve_tier(Some(&json!("Senior Management"))),
            Ok(Tier::SeniorManagement)
        );
        assert_eq!(resolve_tier(Some(&json!("team_lead"))), Ok(Tier::TeamLead));
    }

    #[test]
    fn non_string_tier_is_unknown() {
        assert_eq!(
            resolve_tier(Some(&json!(3))),
            Err(RecordDefect::UnknownTier("3".into()))
        );
    }

    #[test]
    fn int_envelopes() {
        assert_eq!(unwrap_int(&json!({"$numberInt": "150000"})), Some(150_000));
        assert_eq!(unwrap_int(&json!({"$numberLong": "42"})), Some(42));
        assert_eq!(unwrap_int(&json!(7)), Some(7));
        assert_eq!(unwrap_int(&json!("9")), Some(9));
    }

    #[test]
    fn unparsable_amount_defaults_to_zero() {
        assert_eq!(unwrap_amount(&json!({"$numberInt": "12a"})), 0);
        assert_eq!(unwrap_amount(&json!({"$numberInt": "-5"})), 0);
        assert_eq!(unwrap_amount(&json!({})), 0);
        assert_eq!(unwrap_amount(&Value::Null), 0);
        assert_eq!(unwrap_amount(&json!(12.5)), 0);
    }

    #[test]
    fn date_envelopes() {
        let expected = Timestamp::from_epoch_millis(1_735_689_600_000).unwrap();
        assert_eq!(
            unwrap_date(&json!({"$date": {"$numberLong": "1735689600000"}})),
            Some(expected)
        );
        assert_eq!(unwrap_date(&json!({"$date": 1_735_689_600_000_i64})), Some(expected));
        assert_eq!(
            unwrap_date(&json!({"$date": "2025-01-01T00:00:00Z"})),
            Some(expected)
        );
    }

    #[test]
    fn malformed_dates_are_none() {
        assert_eq!(unwrap_date(&json!("2025-01-01")), None);
        assert_eq!(unwrap_date(&json!({"$date": {"$numberLong": "soon"}})), None);
        assert_eq!(unwrap_date(&json!({"$date": {}})), None);
        assert_eq!(unwrap_date(&json!({"$date": true})), None);
    }

    #[test]
    fn full_record_normalizes() {
        let record = obj(json!({
            "bill": {
                "totalAmount": {"$numberInt": "4500"},
                "date": {"$date": {"$numberLong": "1735689600000"}}
            },
            "employeeLevel": "Team Leads & Supervisors",
            "vendor": {"category": "Parking"},
            "items": [
                {"name": "Hotel night", "total": {"$numberDouble": "4500.0"}},
                {"name": "Tolls"},
                {"price": 3}
            ]
        }));
        let receipt = normalize(&record).unwrap();
        assert_eq!(receipt.tier(), Tier::TeamLead);
        assert_eq!(receipt.total_amount(), 4500);
        assert!(receipt.bill_date().is_some());
        assert_eq!(receipt.vendor_category(), "Parking");
        assert_eq!(receipt.items().len(), 3);
        assert_eq!(receipt.items()[0].total, Some(4500.0));
        assert_eq!(receipt.items()[2].name, "");
        assert!(receipt.tags().contains(crate::classifier::Tag::Hotel));
        assert!(receipt.tags().contains(crate::classifier::Tag::ParkingTolls));
    }

    #[test]
    fn optional_fields_default() {
        let record = obj(json!({"bill": {"totalAmount": {"$numberInt": "1"}}}));
        let receipt = normalize(&record).unwrap();
        assert_eq!(receipt.tier(), Tier::Staff);
        assert_eq!(receipt.bill_date(), None);
        assert_eq!(receipt.vendor_category(), "");
        assert!(receipt.items().is_empty());
    }
}
