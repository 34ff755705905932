use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use pocketledger_core::analytics::{AnalyticsService, AnalyticsServiceTrait};
use pocketledger_core::budgets::{BudgetService, BudgetServiceTrait};
use pocketledger_core::events::DomainEventSink;
use pocketledger_core::goals::{GoalService, GoalServiceTrait};
use pocketledger_core::transactions::{TransactionService, TransactionServiceTrait};
use pocketledger_core::users::{UserService, UserServiceTrait};
use pocketledger_storage_sqlite::budgets::BudgetRepository;
use pocketledger_storage_sqlite::db::{self, write_actor};
use pocketledger_storage_sqlite::goals::GoalRepository;
use pocketledger_storage_sqlite::transactions::TransactionRepository;
use pocketledger_storage_sqlite::users::UserRepository;

use crate::auth::AuthManager;
use crate::config::Config;
use crate::events::{BusEventSink, EventBus};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub analytics_service: Arc<dyn AnalyticsServiceTrait>,
    pub auth: Arc<AuthManager>,
    pub event_bus: EventBus,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("PL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let event_bus = EventBus::new(256);
    let event_sink: Arc<dyn DomainEventSink> = Arc::new(BusEventSink::new(event_bus.clone()));

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service = Arc::new(UserService::new(user_repository));

    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let transaction_service = Arc::new(
        TransactionService::new(transaction_repository.clone())
            .with_event_sink(event_sink.clone()),
    );

    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let budget_service = Arc::new(
        BudgetService::new(budget_repository, transaction_repository.clone())
            .with_event_sink(event_sink.clone()),
    );

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let goal_service =
        Arc::new(GoalService::new(goal_repository).with_event_sink(event_sink.clone()));

    let analytics_service = Arc::new(AnalyticsService::new(transaction_repository));

    let auth = Arc::new(AuthManager::new(&config.jwt_secret, config.token_ttl));

    Ok(Arc::new(AppState {
        user_service,
        transaction_service,
        budget_service,
        goal_service,
        analytics_service,
        auth,
        event_bus,
        db_path,
    }))
}
