pub mod auth_service;
pub mod expense_service;
pub mod ledger_service;
pub mod metrics_service;
