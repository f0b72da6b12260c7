use chrono::{Duration, TimeZone, Utc};

use printshop_ledger_api::audit::{
    append_entries, creation_entry, next_order_id, reconcile, AUDIT_TIME_FORMAT,
};
use printshop_ledger_api::models::{Order, PaymentState, Stage};

fn order(id: &str, stage: Stage, payment_state: PaymentState) -> Order {
    let created = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
    Order {
        order_id: id.to_string(),
        name: "Abebe".to_string(),
        contact: "0911".to_string(),
        quantity: 2,
        total: 2400.0,
        payment_state,
        stage,
        created_at: Some(created),
        status_updated_at: Some(created),
        audit_log: creation_entry(created),
        exported: false,
        called: false,
        design_front: None,
        design_back: None,
    }
}

#[test]
fn stage_change_appends_an_entry_and_refreshes_the_timestamp() {
    let previous = vec![order("ORD-1", Stage::Pending, PaymentState::Unpaid)];
    let mut edited = previous.clone();
    edited[0].stage = Stage::Printing;

    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let (merged, changes) = reconcile(&previous, edited, now);

    let expected = format!(
        "Status: 'Pending' → 'Printing' at {}",
        now.format(AUDIT_TIME_FORMAT)
    );
    assert!(merged[0].audit_log.ends_with(&expected));
    assert_eq!(merged[0].status_updated_at, Some(now));
    assert_eq!(merged[0].created_at, previous[0].created_at);

    assert_eq!(changes.len(), 1);
    assert!(!changes[0].created);
    assert_eq!(changes[0].entries, vec![expected]);
}

#[test]
fn payment_change_is_tracked_too() {
    let previous = vec![order("ORD-1", Stage::Printing, PaymentState::Unpaid)];
    let mut edited = previous.clone();
    edited[0].payment_state = PaymentState::Paid;

    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let (merged, _) = reconcile(&previous, edited, now);

    assert!(merged[0].audit_log.contains("Payment: 'Unpaid' → 'Paid'"));
    assert_eq!(merged[0].status_updated_at, Some(now));
}

#[test]
fn both_fields_changing_log_two_entries_in_one_batch() {
    let previous = vec![order("ORD-1", Stage::Pending, PaymentState::Unpaid)];
    let mut edited = previous.clone();
    edited[0].stage = Stage::Printing;
    edited[0].payment_state = PaymentState::Partial;

    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let (merged, changes) = reconcile(&previous, edited, now);

    assert_eq!(changes[0].entries.len(), 2);
    assert!(merged[0].audit_log.contains("Status: 'Pending' → 'Printing'"));
    assert!(merged[0].audit_log.contains("Payment: 'Unpaid' → 'Partial'"));
}

#[test]
fn noop_save_is_idempotent() {
    let previous = vec![
        order("ORD-1", Stage::Printing, PaymentState::Paid),
        order("ORD-2", Stage::Pending, PaymentState::Unpaid),
    ];

    let now = Utc.with_ymd_and_hms(2026, 8, 5, 10, 0, 0).unwrap();
    let (merged, changes) = reconcile(&previous, previous.clone(), now);

    assert_eq!(merged, previous);
    assert!(changes.is_empty());

    // A second pass over the merged snapshot still changes nothing.
    let later = now + Duration::days(1);
    let (again, changes) = reconcile(&merged, merged.clone(), later);
    assert_eq!(again, merged);
    assert!(changes.is_empty());
}

#[test]
fn audit_log_only_grows_and_keeps_its_prefix() {
    let previous = vec![order("ORD-1", Stage::Pending, PaymentState::Unpaid)];
    let mut edited = previous.clone();
    edited[0].stage = Stage::Printing;

    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let (merged, _) = reconcile(&previous, edited, now);

    assert!(merged[0].audit_log.len() >= previous[0].audit_log.len());
    assert!(merged[0].audit_log.starts_with(&previous[0].audit_log));
}

#[test]
fn client_supplied_history_is_ignored() {
    let previous = vec![order("ORD-1", Stage::Pending, PaymentState::Unpaid)];
    let mut edited = previous.clone();
    edited[0].audit_log = "rewritten by a buggy client".to_string();

    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let (merged, changes) = reconcile(&previous, edited, now);

    assert_eq!(merged[0].audit_log, previous[0].audit_log);
    assert!(changes.is_empty());
}

#[test]
fn unknown_id_becomes_a_creation() {
    let previous = vec![order("ORD-1", Stage::Pending, PaymentState::Unpaid)];
    let incoming = order("ORD-99", Stage::Pending, PaymentState::Unpaid);

    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let (merged, changes) = reconcile(&previous, vec![previous[0].clone(), incoming], now);

    let created = &merged[1];
    assert_eq!(created.created_at, Some(now));
    assert_eq!(created.status_updated_at, Some(now));
    assert_eq!(created.audit_log, creation_entry(now));

    assert_eq!(changes.len(), 1);
    assert!(changes[0].created);
    assert_eq!(changes[0].order_id, "ORD-99");
}

#[test]
fn empty_id_gets_a_generated_one() {
    let mut incoming = order("", Stage::Pending, PaymentState::Unpaid);
    incoming.created_at = None;

    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let (merged, changes) = reconcile(&[], vec![incoming], now);

    assert!(merged[0].order_id.starts_with("ORD-20260803-"));
    assert!(changes[0].created);
}

#[test]
fn generated_ids_do_not_collide_under_rapid_entry() {
    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let a = next_order_id(now);
    let b = next_order_id(now);
    assert_ne!(a, b);
}

#[test]
fn prior_row_without_a_creation_timestamp_is_treated_as_a_creation() {
    let mut damaged = order("ORD-1", Stage::Pending, PaymentState::Unpaid);
    damaged.created_at = None;
    damaged.audit_log = String::new();
    let previous = vec![damaged];

    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let (merged, changes) = reconcile(&previous, previous.clone(), now);

    assert_eq!(merged[0].created_at, Some(now));
    assert_eq!(merged[0].audit_log, creation_entry(now));
    assert!(changes[0].created);
}

#[test]
fn rows_missing_from_the_edit_are_dropped() {
    let previous = vec![
        order("ORD-1", Stage::Pending, PaymentState::Unpaid),
        order("ORD-2", Stage::Printing, PaymentState::Paid),
    ];

    let now = Utc.with_ymd_and_hms(2026, 8, 3, 14, 30, 0).unwrap();
    let (merged, changes) = reconcile(&previous, vec![previous[1].clone()], now);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].order_id, "ORD-2");
    // The delete itself leaves no trail.
    assert!(changes.is_empty());
}

#[test]
fn append_entries_uses_the_fixed_delimiter() {
    let log = append_entries("first", &["second".to_string(), "third".to_string()]);
    assert_eq!(log, "first; second; third");

    let fresh = append_entries("", &["only".to_string()]);
    assert_eq!(fresh, "only");

    let untouched = append_entries("kept", &[]);
    assert_eq!(untouched, "kept");
}
