use chrono::Utc;

use crate::{
    dto::expenses::{CreateExpenseRequest, ExpenseList},
    error::{AppError, AppResult},
    models::{Expense, DEFAULT_EXPENSE_CATEGORY, EXPENSE_COLUMNS, EXPENSE_SHEET},
    response::{ApiResponse, Meta},
    routes::params::ExpenseListQuery,
    sheet::Row,
    state::AppState,
};

pub async fn list_expenses(
    state: &AppState,
    query: ExpenseListQuery,
) -> AppResult<ApiResponse<ExpenseList>> {
    let (version, mut expenses) = read_expenses(state).await?;

    if let Some(category) = query.category.as_ref().filter(|c| !c.is_empty()) {
        expenses.retain(|e| e.category.eq_ignore_ascii_case(category));
    }

    let total = expenses.len() as i64;
    let (page, per_page, offset) = query.pagination.normalize();
    let items: Vec<Expense> = expenses
        .into_iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .collect();

    let meta = Meta::new(page, per_page, total);
    Ok(ApiResponse::success(
        "Ok",
        ExpenseList { version, items },
        Some(meta),
    ))
}

/// Record a payout. The expense ledger is append-only: rows are never
/// edited or removed once written.
pub async fn create_expense(
    state: &AppState,
    payload: CreateExpenseRequest,
) -> AppResult<ApiResponse<Expense>> {
    let recipient = payload.recipient.trim().to_string();
    if recipient.is_empty() {
        return Err(AppError::BadRequest("Recipient is required".into()));
    }
    if payload.amount <= 0.0 {
        return Err(AppError::BadRequest("Amount must be positive".into()));
    }

    let now = Utc::now();
    let date = payload
        .date
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(now);

    let category = payload
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_EXPENSE_CATEGORY.to_string());

    let expense = Expense {
        date: Some(date),
        amount: payload.amount,
        recipient,
        note: payload.note.unwrap_or_default().trim().to_string(),
        category,
    };

    let (version, mut expenses) = read_expenses(state).await?;
    expenses.push(expense.clone());

    let rows: Vec<Row> = expenses.iter().map(Expense::to_row).collect();
    state.store.replace(EXPENSE_SHEET, &rows, version).await?;

    tracing::info!(amount = expense.amount, category = %expense.category, "expense recorded");
    Ok(ApiResponse::success(
        "Expense recorded",
        expense,
        Some(Meta::empty()),
    ))
}

pub async fn read_expenses(state: &AppState) -> AppResult<(i64, Vec<Expense>)> {
    let sheet = state.store.read(EXPENSE_SHEET, EXPENSE_COLUMNS).await?;
    let expenses = sheet.rows.iter().map(Expense::from_row).collect();
    Ok((sheet.version, expenses))
}
