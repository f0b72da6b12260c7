//! Change detection and the per-row audit trail.
//!
//! Every save of the ledger goes through [`reconcile`]: the edited rows
//! are compared against the last-known snapshot, field transitions on the
//! tracked fields are appended to the row's audit log, and timestamps are
//! refreshed. History always comes from the previous snapshot, so the log
//! can only grow regardless of what the client sends back.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{col, Order};

pub const AUDIT_DELIMITER: &str = "; ";
pub const AUDIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

struct TrackedField {
    label: &'static str,
    value: fn(&Order) -> &'static str,
}

fn stage_value(order: &Order) -> &'static str {
    order.stage.label()
}

fn payment_value(order: &Order) -> &'static str {
    order.payment_state.label()
}

/// Fields whose transitions are written to the audit log. Extend this
/// table to track more of the row.
const TRACKED_FIELDS: &[TrackedField] = &[
    TrackedField {
        label: col::STATUS,
        value: stage_value,
    },
    TrackedField {
        label: col::PAYMENT,
        value: payment_value,
    },
];

/// What happened to one row during a reconcile pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RowChange {
    pub order_id: String,
    pub created: bool,
    pub entries: Vec<String>,
}

/// Merge an edited snapshot onto the previous one.
///
/// Rows are matched by order id. Matched rows keep their original
/// `created_at` and audit history; tracked-field transitions append log
/// entries and refresh `status_updated_at`. Rows without a usable prior
/// snapshot (unknown id, empty id, or a prior row whose creation
/// timestamp never parsed) become creations. Rows present previously but
/// absent from the edit are dropped, which is the permitted unaudited
/// delete. Saving an unchanged snapshot emits nothing and touches no
/// timestamp.
pub fn reconcile(
    previous: &[Order],
    edited: Vec<Order>,
    now: DateTime<Utc>,
) -> (Vec<Order>, Vec<RowChange>) {
    let prev_by_id: HashMap<&str, &Order> = previous
        .iter()
        .filter(|o| !o.order_id.is_empty())
        .map(|o| (o.order_id.as_str(), o))
        .collect();

    let mut merged = Vec::with_capacity(edited.len());
    let mut changes = Vec::new();

    for mut order in edited {
        let prior = if order.order_id.is_empty() {
            None
        } else {
            prev_by_id
                .get(order.order_id.as_str())
                .copied()
                .filter(|p| p.created_at.is_some())
        };

        match prior {
            Some(prev) => {
                let mut entries = Vec::new();
                for field in TRACKED_FIELDS {
                    let old = (field.value)(prev);
                    let new = (field.value)(&order);
                    if old != new {
                        entries.push(transition_entry(field.label, old, new, now));
                    }
                }
                order.created_at = prev.created_at;
                order.status_updated_at = if entries.is_empty() {
                    prev.status_updated_at
                } else {
                    Some(now)
                };
                order.audit_log = append_entries(&prev.audit_log, &entries);
                if !entries.is_empty() {
                    changes.push(RowChange {
                        order_id: order.order_id.clone(),
                        created: false,
                        entries,
                    });
                }
            }
            None => {
                if order.order_id.is_empty() {
                    order.order_id = next_order_id(now);
                }
                order.created_at = Some(now);
                order.status_updated_at = Some(now);
                let entry = creation_entry(now);
                order.audit_log = entry.clone();
                changes.push(RowChange {
                    order_id: order.order_id.clone(),
                    created: true,
                    entries: vec![entry],
                });
            }
        }
        merged.push(order);
    }

    (merged, changes)
}

pub fn transition_entry(
    field: &str,
    old: &str,
    new: &str,
    now: DateTime<Utc>,
) -> String {
    format!(
        "{field}: '{old}' → '{new}' at {}",
        now.format(AUDIT_TIME_FORMAT)
    )
}

pub fn creation_entry(now: DateTime<Utc>) -> String {
    format!("created at {}", now.format(AUDIT_TIME_FORMAT))
}

/// Append entries to an existing log. The existing value is always a
/// prefix of the result.
pub fn append_entries(existing: &str, entries: &[String]) -> String {
    if entries.is_empty() {
        return existing.to_string();
    }
    let joined = entries.join(AUDIT_DELIMITER);
    if existing.trim().is_empty() {
        joined
    } else {
        format!("{existing}{AUDIT_DELIMITER}{joined}")
    }
}

/// Generated order ids use a uuid fragment rather than a clock fragment,
/// which kept colliding under rapid entry in the old sheets.
pub fn next_order_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().to_string();
    format!("ORD-{}-{}", now.format("%Y%m%d"), &suffix[..8])
}
