//! # Receipt Evaluation Scenarios
//!
//! End-to-end runs through the public engine surface against the standard
//! catalog:
//! - Accepted and rejected receipts
//! - Short-circuit defects (no status written)
//! - Staleness alongside amount violations
//! - Independent checks that fire together
//! - Re-evaluation of annotated output

use serde_json::{json, Map, Value};
use spendpol_core::{LimitDescriptor, PolicyCatalog, Subcategory, Tier, Timestamp};
use spendpol_engine::{evaluate, PolicyEngine, Status};

fn now() -> Timestamp {
    Timestamp::parse_lenient("2026-03-01T00:00:00Z").expect("valid timestamp")
}

fn millis_days_ago(days: i64) -> String {
    now()
        .minus(chrono::Duration::days(days))
        .epoch_millis()
        .to_string()
}

fn receipt(level: &str, amount: u64, days_ago: i64, items: &[&str]) -> Map<String, Value> {
    let items: Vec<Value> = items.iter().map(|name| json!({ "name": name })).collect();
    json!({
        "bill": {
            "totalAmount": {"$numberInt": amount.to_string()},
            "date": {"$date": {"$numberLong": millis_days_ago(days_ago)}}
        },
        "employeeLevel": level,
        "vendor": {"category": "General"},
        "items": items
    })
    .as_object()
    .cloned()
    .expect("object literal")
}

fn violations(record: &Map<String, Value>) -> Vec<String> {
    record["violations"]
        .as_array()
        .expect("violations array")
        .iter()
        .map(|v| v.as_str().expect("string violation").to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Verdicts
// ---------------------------------------------------------------------------

#[test]
fn executive_within_business_trip_range_is_accepted() {
    let engine = PolicyEngine::standard();
    let mut record = receipt("Executive Level", 500_000, 0, &[]);
    let status = engine.annotate_at(&mut record, now());

    assert_eq!(status, Status::Accepted);
    assert!(violations(&record).is_empty());
    assert_eq!(record["status"], json!("Accepted"));
}

#[test]
fn staff_over_business_trip_max_is_rejected() {
    let engine = PolicyEngine::standard();
    let mut record = receipt("Staff & Employees", 200_000, 0, &[]);
    engine.annotate_at(&mut record, now());

    assert_eq!(
        violations(&record),
        vec!["Violation: Total amount 200000 exceeds Business Trips policy limits (0 - 160000)."]
    );
    assert_eq!(record["status"], json!("Rejected"));
}

// ---------------------------------------------------------------------------
// 2. Short circuits
// ---------------------------------------------------------------------------

#[test]
fn missing_bill_has_single_violation_and_no_status() {
    let engine = PolicyEngine::standard();
    let mut record = json!({"employeeLevel": "Staff & Employees", "items": []})
        .as_object()
        .cloned()
        .expect("object literal");
    let status = engine.annotate_at(&mut record, now());

    assert_eq!(status, Status::Indeterminate);
    assert_eq!(
        violations(&record),
        vec!["Violation: Missing 'bill' key in receipt data."]
    );
    assert!(record.get("status").is_none());
}

#[test]
fn unknown_tier_skips_date_and_amount_checks() {
    let engine = PolicyEngine::standard();
    // Stale, over every limit, and tagged: none of it is reported.
    let mut record = receipt("Intern", 9_999_999, 400, &["Hotel", "transport"]);
    engine.annotate_at(&mut record, now());

    assert_eq!(
        violations(&record),
        vec!["Violation: Employee level 'Intern' not found in expense policies."]
    );
    assert!(record.get("status").is_none());
}

#[test]
fn tier_missing_from_loaded_catalog_is_unknown() {
    let catalog = PolicyCatalog::from_yaml_str("staff:\n  Travel.BusinessTrips: { max: 160000 }\n")
        .expect("valid catalog");
    let engine = PolicyEngine::new(catalog.into(), Default::default());
    let mut record = receipt("Executive Level", 100, 0, &[]);
    engine.annotate_at(&mut record, now());

    assert_eq!(
        violations(&record),
        vec!["Violation: Employee level 'Executive Level' not found in expense policies."]
    );
    assert!(record.get("status").is_none());

    let mut staff = receipt("Staff & Employees", 100, 0, &[]);
    assert_eq!(engine.annotate_at(&mut staff, now()), Status::Accepted);
}

#[test]
fn missing_total_amount_reported_before_tier() {
    let engine = PolicyEngine::standard();
    let mut record = json!({"bill": {"date": {"$date": 0}}, "employeeLevel": "Intern"})
        .as_object()
        .cloned()
        .expect("object literal");
    engine.annotate_at(&mut record, now());

    assert_eq!(
        violations(&record),
        vec!["Violation: Missing 'totalAmount' in bill data."]
    );
}

// ---------------------------------------------------------------------------
// 3. Staleness and independent checks
// ---------------------------------------------------------------------------

#[test]
fn stale_bill_reported_with_amount_violations() {
    let engine = PolicyEngine::standard();
    let mut record = receipt("Staff & Employees", 200_000, 45, &[]);
    engine.annotate_at(&mut record, now());

    assert_eq!(
        violations(&record),
        vec![
            "Violation: Bill date 2026-01-15 is older than one month.",
            "Violation: Total amount 200000 exceeds Business Trips policy limits (0 - 160000).",
        ]
    );
    assert_eq!(record["status"], json!("Rejected"));
}

#[test]
fn business_trip_and_transport_both_fire() {
    let engine = PolicyEngine::standard();
    let mut record = receipt("Staff & Employees", 200_000, 1, &["Airport transport"]);
    engine.annotate_at(&mut record, now());

    assert_eq!(
        violations(&record),
        vec![
            "Violation: Total amount 200000 exceeds Business Trips policy limits (0 - 160000).",
            "Violation: Local transportation expense 200000 exceeds policy limits (0 - 5000).",
        ]
    );
}

#[test]
fn malformed_date_is_a_violation_not_a_short_circuit() {
    let engine = PolicyEngine::standard();
    let mut record = json!({
        "bill": {"totalAmount": {"$numberInt": "10"}, "date": {"$date": "yesterday"}},
        "employeeLevel": "Staff & Employees"
    })
    .as_object()
    .cloned()
    .expect("object literal");
    engine.annotate_at(&mut record, now());

    assert_eq!(
        violations(&record),
        vec!["Violation: Missing or malformed 'date' in bill data."]
    );
    assert_eq!(record["status"], json!("Rejected"));
}

#[test]
fn parking_vendor_triggers_coverage_check() {
    let engine = PolicyEngine::standard();
    let mut record = receipt("Senior Management", 100, 0, &[]);
    record.insert("vendor".into(), json!({"category": "Parking"}));
    engine.annotate_at(&mut record, now());

    assert_eq!(
        violations(&record),
        vec!["Violation: Parking fees or tolls are not fully covered under policy."]
    );
}

#[test]
fn explicit_exemption_overrides_deny_by_default() {
    let catalog = PolicyCatalog::standard()
        .with_limit(Tier::Staff, Subcategory::HotelStays, LimitDescriptor::Unlimited);
    let engine = PolicyEngine::new(catalog.into(), Default::default());
    let mut record = receipt("Staff & Employees", 1_000, 0, &["Hotel"]);

    assert_eq!(engine.annotate_at(&mut record, now()), Status::Accepted);
}

// ---------------------------------------------------------------------------
// 4. Result invariants
// ---------------------------------------------------------------------------

#[test]
fn status_agrees_with_violations() {
    let engine = PolicyEngine::standard();
    let cases = [
        receipt("Executive Level", 1, 0, &[]),
        receipt("Staff & Employees", 200_000, 0, &["Team meals"]),
        receipt("Team Leads & Supervisors", 9_000, 60, &["Mobile"]),
    ];
    for record in cases {
        let result = engine.evaluate_at(&record, now());
        assert_eq!(
            result.violations.is_empty(),
            result.status == Status::Accepted,
            "{result:?}"
        );
    }
}

#[test]
fn reevaluating_annotated_output_is_idempotent() {
    let engine = PolicyEngine::standard();
    let mut record = receipt("Staff & Employees", 200_000, 45, &["transport", "hotel"]);
    engine.annotate_at(&mut record, now());
    let first = violations(&record);

    engine.annotate_at(&mut record, now());
    assert_eq!(violations(&record), first);
}

#[test]
fn batch_round_trip_through_evaluate_all() {
    let engine = PolicyEngine::standard();
    let input = Value::Array(vec![
        Value::Object(receipt("Executive Level", 1, 0, &[])),
        json!({}),
    ]);
    let output = engine.evaluate_all(input).expect("array of objects");
    let out = output.as_array().expect("array output");
    assert_eq!(out.len(), 2);
    assert!(out[1].get("status").is_none());
}

#[test]
fn free_function_is_total_over_json() {
    let catalog = PolicyCatalog::standard();
    for value in [json!(null), json!(3), json!("x"), json!([]), json!({"bill": 7})] {
        let result = evaluate(&value, &catalog);
        assert_eq!(result.status, Status::Indeterminate);
    }
}
