use chrono::{Duration, TimeZone, Utc};

use printshop_ledger_api::metrics::{
    cash_on_hand, customer_order_counts, loyalty_tier, net_profit, produced_quantity, receivables,
    summarize, supplier_debt, urgency, LoyaltyTier, Urgency,
};
use printshop_ledger_api::models::{Expense, Order, PaymentState, Stage};
use printshop_ledger_api::pricing::PriceTable;

fn order(name: &str, quantity: i64, total: f64, payment_state: PaymentState, stage: Stage) -> Order {
    Order {
        order_id: format!("ORD-{name}"),
        name: name.to_string(),
        contact: String::new(),
        quantity,
        total,
        payment_state,
        stage,
        created_at: Some(Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap()),
        status_updated_at: Some(Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap()),
        audit_log: String::new(),
        exported: false,
        called: false,
        design_front: None,
        design_back: None,
    }
}

fn expense(amount: f64, category: &str) -> Expense {
    Expense {
        date: None,
        amount,
        recipient: "supplier".to_string(),
        note: String::new(),
        category: category.to_string(),
    }
}

#[test]
fn cash_and_receivables_partition_the_ledger() {
    let orders = vec![
        order("a", 2, 2400.0, PaymentState::Paid, Stage::Pending),
        order("b", 12, 14400.0, PaymentState::Unpaid, Stage::Printing),
    ];

    assert_eq!(cash_on_hand(&orders), 2400.0);
    assert_eq!(receivables(&orders), 14400.0);

    let all: f64 = orders.iter().map(|o| o.total).sum();
    assert_eq!(cash_on_hand(&orders) + receivables(&orders), all);
}

#[test]
fn partial_payments_count_as_receivables() {
    let orders = vec![order("a", 1, 1200.0, PaymentState::Partial, Stage::Pending)];
    assert_eq!(cash_on_hand(&orders), 0.0);
    assert_eq!(receivables(&orders), 1200.0);
}

#[test]
fn empty_snapshots_yield_zero_everywhere() {
    let totals = summarize(&[], &[]);
    assert_eq!(totals.gross_revenue, 0.0);
    assert_eq!(totals.cash_on_hand, 0.0);
    assert_eq!(totals.receivables, 0.0);
    assert_eq!(totals.total_quantity, 0);
    assert_eq!(totals.produced_quantity, 0);
    assert_eq!(totals.supplier_debt, 0.0);
    assert_eq!(totals.net_profit, 0.0);
    assert_eq!(totals.order_count, 0);
    assert_eq!(totals.open_count, 0);
}

#[test]
fn produced_quantity_starts_at_printing() {
    let orders = vec![
        order("a", 1, 0.0, PaymentState::Unpaid, Stage::Pending),
        order("b", 2, 0.0, PaymentState::Unpaid, Stage::Printing),
        order("c", 4, 0.0, PaymentState::Unpaid, Stage::QualityCheck),
        order("d", 8, 0.0, PaymentState::Unpaid, Stage::Ready),
        order("e", 16, 0.0, PaymentState::Unpaid, Stage::Delivered),
        order("f", 32, 0.0, PaymentState::Unpaid, Stage::Hold),
    ];
    assert_eq!(produced_quantity(&orders), 2 + 4 + 8 + 16);
}

#[test]
fn supplier_debt_reconciles_production_against_payouts() {
    let orders = vec![order("a", 10, 12000.0, PaymentState::Paid, Stage::Printing)];
    let expenses = vec![expense(1500.0, "Supplier"), expense(500.0, "Rent")];

    // 10 produced cards at 400 each, minus the supplier payout only.
    assert_eq!(supplier_debt(&orders, &expenses), 10.0 * 400.0 - 1500.0);
}

#[test]
fn supplier_debt_is_monotonic() {
    let few = vec![order("a", 5, 0.0, PaymentState::Unpaid, Stage::Printing)];
    let many = vec![order("a", 9, 0.0, PaymentState::Unpaid, Stage::Printing)];
    let payouts = vec![expense(100.0, "Supplier")];
    let more_payouts = vec![expense(100.0, "Supplier"), expense(300.0, "Supplier")];

    assert!(supplier_debt(&many, &payouts) >= supplier_debt(&few, &payouts));
    assert!(supplier_debt(&few, &more_payouts) <= supplier_debt(&few, &payouts));
}

#[test]
fn supplier_debt_can_go_negative_in_the_raw_value() {
    let orders = vec![order("a", 1, 0.0, PaymentState::Unpaid, Stage::Printing)];
    let expenses = vec![expense(10_000.0, "Supplier")];
    assert!(supplier_debt(&orders, &expenses) < 0.0);
}

#[test]
fn net_profit_is_a_flat_per_unit_estimate() {
    let orders = vec![
        order("a", 2, 2400.0, PaymentState::Paid, Stage::Pending),
        order("b", 12, 14400.0, PaymentState::Unpaid, Stage::Printing),
    ];
    assert_eq!(net_profit(&orders), 14.0 * 800.0);
}

#[test]
fn urgency_five_days_in_is_late_for_production_on_track_for_delivery() {
    let created = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
    let now = created + Duration::days(5);

    let mut o = order("a", 1, 0.0, PaymentState::Unpaid, Stage::Printing);
    o.created_at = Some(created);

    let u = urgency(&o, now);
    assert_eq!(u.production, Urgency::Late { days_overdue: 1 });
    assert_eq!(u.delivery, Urgency::OnTrack { days_remaining: 2 });
}

#[test]
fn urgency_deadline_day_is_urgent_not_late() {
    let created = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
    let mut o = order("a", 1, 0.0, PaymentState::Unpaid, Stage::Pending);
    o.created_at = Some(created);

    // Exactly at the 4-day production SLA: zero days remaining.
    let u = urgency(&o, created + Duration::days(4));
    assert_eq!(u.production, Urgency::Urgent);

    // Exactly at the 7-day delivery SLA.
    let u = urgency(&o, created + Duration::days(7));
    assert_eq!(u.delivery, Urgency::Urgent);
    assert_eq!(u.production, Urgency::Late { days_overdue: 3 });
}

#[test]
fn urgency_one_day_remaining_is_urgent() {
    let created = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
    let mut o = order("a", 1, 0.0, PaymentState::Unpaid, Stage::Pending);
    o.created_at = Some(created);

    let u = urgency(&o, created + Duration::days(3));
    assert_eq!(u.production, Urgency::Urgent);
}

#[test]
fn delivered_orders_are_complete_regardless_of_elapsed_time() {
    let created = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
    let mut o = order("a", 1, 0.0, PaymentState::Paid, Stage::Delivered);
    o.created_at = Some(created);

    let u = urgency(&o, created + Duration::days(200));
    assert_eq!(u.production, Urgency::Complete);
    assert_eq!(u.delivery, Urgency::Complete);
}

#[test]
fn unparseable_creation_date_is_excluded_from_deadline_math() {
    let mut o = order("a", 1, 0.0, PaymentState::Unpaid, Stage::Pending);
    o.created_at = None;

    let u = urgency(&o, Utc::now());
    assert_eq!(u.production, Urgency::NoDate);
    assert_eq!(u.delivery, Urgency::NoDate);
}

#[test]
fn loyalty_tiers_follow_the_order_count_thresholds() {
    assert_eq!(loyalty_tier(0), None);
    assert_eq!(loyalty_tier(2), None);
    assert_eq!(loyalty_tier(3), Some(LoyaltyTier::Returning));
    assert_eq!(loyalty_tier(4), Some(LoyaltyTier::Returning));
    assert_eq!(loyalty_tier(5), Some(LoyaltyTier::Loyal));
    assert_eq!(loyalty_tier(11), Some(LoyaltyTier::Loyal));
}

#[test]
fn customer_counts_group_by_contact_then_name() {
    let mut a = order("Abebe", 1, 0.0, PaymentState::Unpaid, Stage::Pending);
    a.contact = "0911".to_string();
    let mut b = order("Abebe B.", 1, 0.0, PaymentState::Unpaid, Stage::Pending);
    b.contact = "0911".to_string();
    let c = order("Sara", 1, 0.0, PaymentState::Unpaid, Stage::Pending);

    let counts = customer_order_counts(&[a, b, c]);
    assert_eq!(counts.get("0911"), Some(&2));
    assert_eq!(counts.get("Sara"), Some(&1));
}

#[test]
fn price_table_applies_the_bulk_tier_at_the_threshold() {
    let flat = PriceTable::default();
    assert_eq!(flat.unit_price(12), 1200.0);
    assert_eq!(flat.total(12), 14400.0);

    let tiered = PriceTable::with_bulk_tier(1200.0, 10, 1000.0);
    assert_eq!(tiered.unit_price(9), 1200.0);
    assert_eq!(tiered.unit_price(10), 1000.0);
    assert_eq!(tiered.total(12), 12000.0);
}
