use chrono::{Duration, Utc};

use printshop_ledger_api::{
    audit,
    config::AppConfig,
    db::create_pool,
    models::{Expense, Order, PaymentState, Stage, EXPENSE_COLUMNS, EXPENSE_SHEET, ORDER_COLUMNS, ORDER_SHEET},
    pricing::PriceTable,
    sheet::Row,
    store::SheetStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = SheetStore::new(pool);
    let pricing = config.price_table();

    let orders = seed_orders(&store, &pricing).await?;
    let expenses = seed_expenses(&store).await?;

    println!("Seed completed. Orders: {orders}, Expenses: {expenses}");
    Ok(())
}

async fn seed_orders(store: &SheetStore, pricing: &PriceTable) -> anyhow::Result<usize> {
    let now = Utc::now();
    let samples = [
        ("Abebe Bekele", "0911-203040", 2, Stage::Pending, PaymentState::Unpaid, 1),
        ("Sara Tesfaye", "0912-556677", 12, Stage::Printing, PaymentState::Paid, 3),
        ("Dawit Haile", "0913-889900", 5, Stage::Ready, PaymentState::Partial, 6),
        ("Marta Alemu", "0914-112233", 3, Stage::Delivered, PaymentState::Paid, 9),
    ];

    let mut rows: Vec<Row> = Vec::new();
    for (name, contact, quantity, stage, payment_state, age_days) in samples {
        let created = now - Duration::days(age_days);
        let order = Order {
            order_id: audit::next_order_id(created),
            name: name.to_string(),
            contact: contact.to_string(),
            quantity,
            total: pricing.total(quantity),
            payment_state,
            stage,
            created_at: Some(created),
            status_updated_at: Some(created),
            audit_log: audit::creation_entry(created),
            exported: false,
            called: false,
            design_front: None,
            design_back: None,
        };
        rows.push(order.to_row());
    }

    let sheet = store.read(ORDER_SHEET, ORDER_COLUMNS).await?;
    store.replace(ORDER_SHEET, &rows, sheet.version).await?;
    Ok(rows.len())
}

async fn seed_expenses(store: &SheetStore) -> anyhow::Result<usize> {
    let now = Utc::now();
    let samples = [
        (2000.0, "Card supplier", "first print run"),
        (1500.0, "Card supplier", "second print run"),
    ];

    let mut rows: Vec<Row> = Vec::new();
    for (amount, recipient, note) in samples {
        let expense = Expense {
            date: Some(now),
            amount,
            recipient: recipient.to_string(),
            note: note.to_string(),
            category: "Supplier".to_string(),
        };
        rows.push(expense.to_row());
    }

    let sheet = store.read(EXPENSE_SHEET, EXPENSE_COLUMNS).await?;
    store.replace(EXPENSE_SHEET, &rows, sheet.version).await?;
    Ok(rows.len())
}
