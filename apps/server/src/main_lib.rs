use std::sync::Arc;

use crate::config::Config;
use budget_core::budgets::{BudgetService, BudgetServiceTrait};
use budget_storage_sqlite::{
    budgets::BudgetRepository,
    db::{self, write_actor},
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("BUDGET_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
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

    let budget_repository = Arc::new(BudgetRepository::new(pool, writer));
    let budget_service: Arc<dyn BudgetServiceTrait + Send + Sync> =
        Arc::new(BudgetService::new(budget_repository));

    Ok(Arc::new(AppState { budget_service }))
}
