use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use budget_core::budgets::{BudgetDto, BudgetInput};
use uuid::Uuid;

fn parse_budget_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid budget id '{}': {}", raw, e)))
}

async fn list_budgets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<BudgetDto>>> {
    let budgets = state.budget_service.get_budgets()?;
    Ok(Json(budgets.into_iter().map(BudgetDto::from).collect()))
}

async fn get_budget(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetDto>> {
    let budget_id = parse_budget_id(&budget_id)?;
    let budget = state.budget_service.get_budget(&budget_id)?;
    Ok(Json(budget.into()))
}

async fn get_budget_by_year(
    Path(year): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetDto>> {
    let budget = state.budget_service.get_budget_by_year(year)?;
    Ok(Json(budget.into()))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(input): Json<BudgetInput>,
) -> ApiResult<Json<BudgetDto>> {
    let budget = state.budget_service.create_budget(input).await?;
    Ok(Json(budget.into()))
}

async fn update_budget(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(input): Json<BudgetInput>,
) -> ApiResult<Json<BudgetDto>> {
    let budget_id = parse_budget_id(&budget_id)?;
    let budget = state.budget_service.update_budget(&budget_id, input).await?;
    Ok(Json(budget.into()))
}

async fn delete_budget(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let budget_id = parse_budget_id(&budget_id)?;
    state.budget_service.delete_budget(&budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budget", get(list_budgets).post(create_budget))
        .route("/budget/year/{year}", get(get_budget_by_year))
        .route(
            "/budget/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}
