use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Expense;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateExpenseRequest {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub amount: f64,
    pub recipient: String,
    pub note: Option<String>,
    /// Defaults to "Supplier".
    pub category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseList {
    pub version: i64,
    pub items: Vec<Expense>,
}
