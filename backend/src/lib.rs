//! # Finance Tracker Backend
//!
//! Application server for the personal finance tracker.
//!
//! The crate follows a layered architecture:
//! ```text
//! Web frontend
//!     ↓
//! IO Layer (REST API, standalone endpoints)
//!     ↓
//! Domain Layer (services, business rules)
//!     ↓
//! Storage Layer (repository traits, SQLite)
//! ```
//!
//! Authentication and row-level isolation live in the external auth backend;
//! every layer here scopes data by the user id the IO layer resolves from
//! the session header.

pub mod config;
pub mod context;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::http::{header, HeaderName, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    AccountService, AnalyticsSink, BudgetService, EmailService, ExpenseService, GoalService,
    IncomeService, LogAnalyticsSink, NotificationService, ProfileService, SavingsService,
    SubscriptionService,
};
use crate::io::rest::{
    account_apis, analytics_apis, budget_apis, currency_apis, expense_apis, goal_apis,
    income_apis, invite_apis, notification_apis, profile_apis, savings_apis, subscription_apis,
};
use crate::storage::sqlite::{
    BudgetRepository, ExpenseRepository, GoalRepository, IncomeRepository,
    NotificationRepository, ProfileRepository, SavingsRepository, SqliteConnection,
    SubscriptionRepository, UserRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub db: SqliteConnection,
    pub expense_service: ExpenseService,
    pub income_service: IncomeService,
    pub budget_service: BudgetService,
    pub goal_service: GoalService,
    pub savings_service: SavingsService,
    pub subscription_service: SubscriptionService,
    pub notification_service: NotificationService,
    pub profile_service: ProfileService,
    pub account_service: AccountService,
    pub email_service: EmailService,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub invite_base_url: String,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = SqliteConnection::new(&config.database.url).await?;

    info!("Setting up domain services");
    let user_repository = Arc::new(UserRepository::new(db.clone()));
    let notification_repository = Arc::new(NotificationRepository::new(db.clone()));
    let subscription_repository = Arc::new(SubscriptionRepository::new(db.clone()));
    let expense_repository = Arc::new(ExpenseRepository::new(db.clone()));
    let income_repository = Arc::new(IncomeRepository::new(db.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(db.clone()));
    let goal_repository = Arc::new(GoalRepository::new(db.clone()));
    let savings_repository = Arc::new(SavingsRepository::new(db.clone()));
    let profile_repository = Arc::new(ProfileRepository::new(db.clone()));

    let notification_service = NotificationService::new(notification_repository.clone());
    let subscription_service = SubscriptionService::new(
        subscription_repository.clone(),
        notification_service.clone(),
    );
    let account_service = AccountService::new(
        user_repository,
        notification_repository,
        subscription_repository,
        expense_repository.clone(),
        income_repository.clone(),
        budget_repository.clone(),
        goal_repository.clone(),
        savings_repository.clone(),
        profile_repository.clone(),
    );

    let mut email_service = EmailService::new(config.email.clone());
    if config.email.is_complete() {
        email_service.initialize()?;
    } else {
        info!("Email transport not configured; invitations will fail until it is");
    }

    Ok(AppState {
        expense_service: ExpenseService::new(expense_repository.clone()),
        income_service: IncomeService::new(income_repository),
        budget_service: BudgetService::new(budget_repository, expense_repository),
        goal_service: GoalService::new(goal_repository),
        savings_service: SavingsService::new(savings_repository),
        subscription_service,
        notification_service,
        profile_service: ProfileService::new(profile_repository),
        account_service,
        email_service,
        analytics: Arc::new(LogAnalyticsSink),
        invite_base_url: config.invite.base_url.clone(),
        db,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS: any origin with a fixed method and header allow-list; the layer
    // also answers OPTIONS preflights
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-user-id"),
        ]);

    let api_routes = Router::new()
        .nest("/expenses", expense_apis::router())
        .nest("/incomes", income_apis::router())
        .nest("/budgets", budget_apis::router())
        .nest("/goals", goal_apis::router())
        .nest("/savings", savings_apis::router())
        .nest("/subscription", subscription_apis::router())
        .nest("/notifications", notification_apis::router())
        .nest("/profile", profile_apis::router())
        .nest("/currencies", currency_apis::router())
        .nest("/analytics", analytics_apis::router());

    Router::new()
        .nest("/api", api_routes)
        // Standalone function-style endpoints live at the root
        .merge(account_apis::router())
        .merge(invite_apis::router())
        .layer(cors)
        .with_state(app_state)
}
