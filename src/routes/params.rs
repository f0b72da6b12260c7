use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{PaymentState, Stage};

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(50).clamp(1, 500);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub stage: Option<Stage>,
    pub payment_state: Option<PaymentState>,
    /// Substring match over name, contact and order id.
    pub q: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExpenseListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportQuery {
    /// Restrict to orders created on or after this date.
    pub from: Option<NaiveDate>,
    /// Restrict to orders created on or before this date.
    pub to: Option<NaiveDate>,
}
