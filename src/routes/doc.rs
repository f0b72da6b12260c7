use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, LogoutResponse},
        dashboard::{BacklogEntry, DashboardResponse, DashboardTotals, LoyaltyEntry},
        expenses::{CreateExpenseRequest, ExpenseList},
        orders::{
            CreateOrderRequest, DeleteOrderResponse, OrderDetail, OrderList, SaveSnapshotRequest,
            SaveSnapshotResponse, SnapshotRow, UpdateOrderRequest,
        },
    },
    metrics::{LoyaltyTier, OrderUrgency, Urgency},
    models::{Expense, Order, PaymentState, Stage},
    response::{ApiResponse, Meta},
    routes::{auth, dashboard, expenses, health, orders, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        orders::list_orders,
        orders::create_order,
        orders::save_snapshot,
        orders::export_supplier_batch,
        orders::get_order,
        orders::update_order,
        orders::delete_order,
        expenses::list_expenses,
        expenses::create_expense,
        dashboard::dashboard
    ),
    components(
        schemas(
            Order,
            Expense,
            Stage,
            PaymentState,
            Urgency,
            OrderUrgency,
            LoyaltyTier,
            LoginRequest,
            LoginResponse,
            LogoutResponse,
            CreateOrderRequest,
            UpdateOrderRequest,
            SnapshotRow,
            SaveSnapshotRequest,
            SaveSnapshotResponse,
            OrderList,
            OrderDetail,
            DeleteOrderResponse,
            CreateExpenseRequest,
            ExpenseList,
            DashboardTotals,
            BacklogEntry,
            LoyaltyEntry,
            DashboardResponse,
            params::Pagination,
            params::OrderListQuery,
            params::ExpenseListQuery,
            params::ExportQuery,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderDetail>,
            ApiResponse<ExpenseList>,
            ApiResponse<DashboardResponse>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Operator session endpoints"),
        (name = "Orders", description = "Order ledger endpoints"),
        (name = "Expenses", description = "Expense ledger endpoints"),
        (name = "Dashboard", description = "Derived metrics endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
