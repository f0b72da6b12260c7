use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::coerce;
use crate::sheet::{cell, CellKind, ColumnSpec, Row};

pub const ORDER_SHEET: &str = "Orders";
pub const EXPENSE_SHEET: &str = "Expenses";

pub const DEFAULT_EXPENSE_CATEGORY: &str = "Supplier";

/// Cell format for full timestamps; dates alone use `CELL_DATE_FORMAT`.
pub const CELL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const CELL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical column headers. Every write carries all of them; reads
/// synthesize the missing ones.
pub mod col {
    pub const ORDER_ID: &str = "Order ID";
    pub const NAME: &str = "Name";
    pub const CONTACT: &str = "Contact";
    pub const QTY: &str = "Qty";
    pub const TOTAL: &str = "Total";
    pub const PAYMENT: &str = "Payment";
    pub const STATUS: &str = "Status";
    pub const CREATED_AT: &str = "Created At";
    pub const STATUS_UPDATED_AT: &str = "Status Updated At";
    pub const AUDIT_LOG: &str = "Audit Log";
    pub const EXPORTED: &str = "Exported";
    pub const CALLED: &str = "Called";
    pub const DESIGN_FRONT: &str = "Design Front";
    pub const DESIGN_BACK: &str = "Design Back";

    pub const DATE: &str = "Date";
    pub const AMOUNT: &str = "Amount";
    pub const RECIPIENT: &str = "Recipient";
    pub const NOTE: &str = "Note";
    pub const CATEGORY: &str = "Category";
}

pub const ORDER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(col::ORDER_ID, CellKind::Text),
    ColumnSpec::new(col::NAME, CellKind::Text),
    ColumnSpec::new(col::CONTACT, CellKind::Text),
    ColumnSpec::new(col::QTY, CellKind::Numeric),
    ColumnSpec::new(col::TOTAL, CellKind::Numeric),
    ColumnSpec::new(col::PAYMENT, CellKind::Text),
    ColumnSpec::new(col::STATUS, CellKind::Text),
    ColumnSpec::new(col::CREATED_AT, CellKind::Text),
    ColumnSpec::new(col::STATUS_UPDATED_AT, CellKind::Text),
    ColumnSpec::new(col::AUDIT_LOG, CellKind::Text),
    ColumnSpec::new(col::EXPORTED, CellKind::Flag),
    ColumnSpec::new(col::CALLED, CellKind::Flag),
    ColumnSpec::new(col::DESIGN_FRONT, CellKind::Link),
    ColumnSpec::new(col::DESIGN_BACK, CellKind::Link),
];

pub const EXPENSE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(col::DATE, CellKind::Text),
    ColumnSpec::new(col::AMOUNT, CellKind::Numeric),
    ColumnSpec::new(col::RECIPIENT, CellKind::Text),
    ColumnSpec::new(col::NOTE, CellKind::Text),
    ColumnSpec::new(col::CATEGORY, CellKind::Text),
];

/// Pipeline position of a production order. The pipeline only moves
/// forward; Hold parks an order outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Pending,
    Printing,
    QualityCheck,
    Ready,
    Delivered,
    Hold,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Pending => "Pending",
            Stage::Printing => "Printing",
            Stage::QualityCheck => "Quality Check",
            Stage::Ready => "Ready",
            Stage::Delivered => "Delivered",
            Stage::Hold => "Hold",
        }
    }

    /// Maps a cell label onto the closed enum. Older revisions of the
    /// sheet used different labels for the same pipeline positions.
    pub fn from_label(raw: &str) -> Option<Stage> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "verified" => Some(Stage::Pending),
            "printing" | "processing" => Some(Stage::Printing),
            "quality check" | "quality-check" | "design proof" | "design-proof" => {
                Some(Stage::QualityCheck)
            }
            "ready" | "out for delivery" | "out-for-delivery" => Some(Stage::Ready),
            "delivered" => Some(Stage::Delivered),
            "hold" | "on hold" | "on-hold" => Some(Stage::Hold),
            _ => None,
        }
    }

    /// Production work has started (or finished): the supplier is owed
    /// for these cards.
    pub fn is_produced(self) -> bool {
        matches!(
            self,
            Stage::Printing | Stage::QualityCheck | Stage::Ready | Stage::Delivered
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Unpaid,
    Paid,
    Partial,
}

impl PaymentState {
    pub fn label(self) -> &'static str {
        match self {
            PaymentState::Unpaid => "Unpaid",
            PaymentState::Paid => "Paid",
            PaymentState::Partial => "Partial",
        }
    }

    /// Older revisions stored payment as a Yes/No checkbox.
    pub fn from_label(raw: &str) -> Option<PaymentState> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "unpaid" | "no" => Some(PaymentState::Unpaid),
            "paid" | "yes" => Some(PaymentState::Paid),
            "partial" | "partially paid" => Some(PaymentState::Partial),
            _ => None,
        }
    }
}

/// One row of the order ledger, typed.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Order {
    pub order_id: String,
    pub name: String,
    pub contact: String,
    pub quantity: i64,
    pub total: f64,
    pub payment_state: PaymentState,
    pub stage: Stage,
    pub created_at: Option<DateTime<Utc>>,
    pub status_updated_at: Option<DateTime<Utc>>,
    pub audit_log: String,
    pub exported: bool,
    pub called: bool,
    pub design_front: Option<String>,
    pub design_back: Option<String>,
}

impl Order {
    /// Decode a normalized sheet row. Never fails: numbers and timestamps
    /// coerce, an empty stage cell means the initial pipeline state, and
    /// an unknown stage label is quarantined to Hold instead of being
    /// accepted as free text.
    pub fn from_row(row: &Row) -> Order {
        let stage_cell = cell(row, col::STATUS);
        let stage = if stage_cell.trim().is_empty() {
            Stage::Pending
        } else {
            Stage::from_label(stage_cell).unwrap_or_else(|| {
                tracing::warn!(stage = %stage_cell, "unknown stage label, quarantined to Hold");
                Stage::Hold
            })
        };
        let payment_state =
            PaymentState::from_label(cell(row, col::PAYMENT)).unwrap_or(PaymentState::Unpaid);

        Order {
            order_id: cell(row, col::ORDER_ID).trim().to_string(),
            name: cell(row, col::NAME).trim().to_string(),
            contact: cell(row, col::CONTACT).trim().to_string(),
            quantity: coerce::parse_int(cell(row, col::QTY)),
            total: coerce::parse_money(cell(row, col::TOTAL)),
            payment_state,
            stage,
            created_at: coerce::parse_timestamp(cell(row, col::CREATED_AT)),
            status_updated_at: coerce::parse_timestamp(cell(row, col::STATUS_UPDATED_AT)),
            audit_log: cell(row, col::AUDIT_LOG).trim().to_string(),
            exported: coerce::parse_flag(cell(row, col::EXPORTED)),
            called: coerce::parse_flag(cell(row, col::CALLED)),
            design_front: coerce::parse_link(cell(row, col::DESIGN_FRONT)),
            design_back: coerce::parse_link(cell(row, col::DESIGN_BACK)),
        }
    }

    /// Encode back to a sheet row with the complete canonical column set.
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert(col::ORDER_ID.into(), self.order_id.clone());
        row.insert(col::NAME.into(), self.name.clone());
        row.insert(col::CONTACT.into(), self.contact.clone());
        row.insert(col::QTY.into(), self.quantity.to_string());
        row.insert(col::TOTAL.into(), format_money(self.total));
        row.insert(col::PAYMENT.into(), self.payment_state.label().into());
        row.insert(col::STATUS.into(), self.stage.label().into());
        row.insert(col::CREATED_AT.into(), format_timestamp(self.created_at));
        row.insert(
            col::STATUS_UPDATED_AT.into(),
            format_timestamp(self.status_updated_at),
        );
        row.insert(col::AUDIT_LOG.into(), self.audit_log.clone());
        row.insert(col::EXPORTED.into(), flag_cell(self.exported).into());
        row.insert(col::CALLED.into(), flag_cell(self.called).into());
        row.insert(col::DESIGN_FRONT.into(), link_cell(&self.design_front));
        row.insert(col::DESIGN_BACK.into(), link_cell(&self.design_back));
        row
    }

    /// Key for loyalty grouping: contact when present, name otherwise.
    pub fn customer_key(&self) -> Option<&str> {
        if !self.contact.is_empty() {
            Some(self.contact.as_str())
        } else if !self.name.is_empty() {
            Some(self.name.as_str())
        } else {
            None
        }
    }
}

/// One row of the expense ledger. Append-only, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Expense {
    pub date: Option<DateTime<Utc>>,
    pub amount: f64,
    pub recipient: String,
    pub note: String,
    pub category: String,
}

impl Expense {
    pub fn from_row(row: &Row) -> Expense {
        let category = cell(row, col::CATEGORY).trim().to_string();
        Expense {
            date: coerce::parse_timestamp(cell(row, col::DATE)),
            amount: coerce::parse_money(cell(row, col::AMOUNT)),
            recipient: cell(row, col::RECIPIENT).trim().to_string(),
            note: cell(row, col::NOTE).trim().to_string(),
            category: if category.is_empty() {
                DEFAULT_EXPENSE_CATEGORY.to_string()
            } else {
                category
            },
        }
    }

    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert(
            col::DATE.into(),
            self.date
                .map(|d| d.format(CELL_DATE_FORMAT).to_string())
                .unwrap_or_default(),
        );
        row.insert(col::AMOUNT.into(), format_money(self.amount));
        row.insert(col::RECIPIENT.into(), self.recipient.clone());
        row.insert(col::NOTE.into(), self.note.clone());
        row.insert(col::CATEGORY.into(), self.category.clone());
        row
    }
}

fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|v| v.format(CELL_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn format_money(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

fn flag_cell(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn link_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "None".to_string())
}
