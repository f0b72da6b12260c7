use printshop_ledger_api::coerce::{
    normalize_rows, parse_flag, parse_int, parse_link, parse_money, parse_timestamp,
};
use printshop_ledger_api::models::{col, Order, PaymentState, Stage, ORDER_COLUMNS};
use printshop_ledger_api::sheet::Row;

#[test]
fn malformed_numeric_text_coerces_to_zero() {
    for raw in ["", "abc", "-", "1.2.3", "  ?  "] {
        assert_eq!(parse_int(raw), 0, "raw: {raw:?}");
        assert_eq!(parse_money(raw), 0.0, "raw: {raw:?}");
    }
    // Trailing junk defeats the integer parser but not the money
    // parser, which strips non-numeric characters first.
    assert_eq!(parse_int("12abc"), 0);
    assert_eq!(parse_money("12abc"), 12.0);
}

#[test]
fn numeric_text_tolerates_separators_and_decimals() {
    assert_eq!(parse_int("1,200"), 1200);
    assert_eq!(parse_int(" 12 "), 12);
    assert_eq!(parse_int("12.0"), 12);
    assert_eq!(parse_money("1,200.50"), 1200.50);
    assert_eq!(parse_money("1200 ETB"), 1200.0);
}

#[test]
fn malformed_timestamps_coerce_to_none() {
    for raw in ["", "not a date", "2026-13-45", "None", "tomorrow"] {
        assert_eq!(parse_timestamp(raw), None, "raw: {raw:?}");
    }
}

#[test]
fn timestamps_accept_the_sheet_formats() {
    assert!(parse_timestamp("2026-08-07 10:30:00").is_some());
    assert!(parse_timestamp("2026-08-07 10:30").is_some());
    assert!(parse_timestamp("2026-08-07").is_some());
    assert!(parse_timestamp("07/08/2026").is_some());
    assert!(parse_timestamp("2026-08-07T10:30:00Z").is_some());
}

#[test]
fn flags_default_to_false() {
    assert!(parse_flag("Yes"));
    assert!(parse_flag("yes"));
    assert!(parse_flag("true"));
    assert!(!parse_flag("No"));
    assert!(!parse_flag(""));
    assert!(!parse_flag("maybe"));
}

#[test]
fn link_cells_treat_none_as_absent() {
    assert_eq!(parse_link("None"), None);
    assert_eq!(parse_link(""), None);
    assert_eq!(
        parse_link("https://example.com/front.png"),
        Some("https://example.com/front.png".to_string())
    );
}

#[test]
fn missing_columns_are_synthesized_with_typed_defaults() {
    let mut rows = vec![Row::from([(col::NAME.to_string(), "Abebe".to_string())])];
    normalize_rows(&mut rows, ORDER_COLUMNS);

    let row = &rows[0];
    assert_eq!(row[col::NAME], "Abebe");
    assert_eq!(row[col::QTY], "0");
    assert_eq!(row[col::TOTAL], "0");
    assert_eq!(row[col::EXPORTED], "No");
    assert_eq!(row[col::CALLED], "No");
    assert_eq!(row[col::DESIGN_FRONT], "None");
    assert_eq!(row[col::CONTACT], "");
}

#[test]
fn empty_row_decodes_to_safe_defaults() {
    let order = Order::from_row(&Row::new());
    assert_eq!(order.quantity, 0);
    assert_eq!(order.total, 0.0);
    assert_eq!(order.stage, Stage::Pending);
    assert_eq!(order.payment_state, PaymentState::Unpaid);
    assert_eq!(order.created_at, None);
    assert!(!order.exported);
    assert_eq!(order.design_front, None);
}

#[test]
fn legacy_labels_map_onto_the_closed_enums() {
    assert_eq!(Stage::from_label("Processing"), Some(Stage::Printing));
    assert_eq!(Stage::from_label("Verified"), Some(Stage::Pending));
    assert_eq!(Stage::from_label("Design Proof"), Some(Stage::QualityCheck));
    assert_eq!(Stage::from_label("Out for Delivery"), Some(Stage::Ready));
    assert_eq!(PaymentState::from_label("Yes"), Some(PaymentState::Paid));
    assert_eq!(PaymentState::from_label("No"), Some(PaymentState::Unpaid));
}

#[test]
fn unknown_stage_text_is_quarantined_to_hold() {
    let row = Row::from([(col::STATUS.to_string(), "Lost in transit".to_string())]);
    let order = Order::from_row(&row);
    assert_eq!(order.stage, Stage::Hold);
}

#[test]
fn encoded_rows_carry_the_full_canonical_column_set() {
    let row = Order::from_row(&Row::new()).to_row();
    for column in ORDER_COLUMNS {
        assert!(row.contains_key(column.name), "missing {}", column.name);
    }
    assert_eq!(row[col::EXPORTED], "No");
    assert_eq!(row[col::DESIGN_BACK], "None");
}
