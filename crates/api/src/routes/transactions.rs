//! Transaction routes: recording, listing, summary, month groups and categories.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tally_core::ledger::{
    MonthGroup, MonthKey, NewTransaction, Summary, Transaction, TransactionType, group_by_month,
};
use tally_db::{TransactionFilter, TransactionRepository};
use tally_shared::AppError;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/summary", get(summary))
        .route("/transactions/grouped", get(grouped))
        .route("/transactions/categories", get(categories))
        .route("/transactions/{id}", get(get_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions. Empty values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsQuery {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Calendar month, `YYYY-MM`.
    pub month: Option<String>,
    /// Case-insensitive text searched in category and note.
    pub search: Option<String>,
}

impl TryFrom<ListTransactionsQuery> for TransactionFilter {
    type Error = ApiError;

    fn try_from(query: ListTransactionsQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_type: non_empty(query.transaction_type)
                .map(|t| t.parse::<TransactionType>())
                .transpose()?,
            category: non_empty(query.category),
            month: parse_month(query.month)?,
            search: non_empty(query.search),
        })
    }
}

/// Query parameters for the summary.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Restrict to one calendar month, `YYYY-MM`.
    pub month: Option<String>,
}

/// One month of the grouped view.
#[derive(Debug, Serialize)]
pub struct MonthGroupResponse {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// `YYYY-MM`.
    pub label: String,
    /// Whether the group starts expanded.
    pub expanded: bool,
    /// Transactions in the month, newest first.
    pub transactions: Vec<Transaction>,
}

impl From<MonthGroup> for MonthGroupResponse {
    fn from(group: MonthGroup) -> Self {
        Self {
            year: group.key.year,
            month: group.key.month,
            label: group.key.to_string(),
            expanded: group.expanded,
            transactions: group.transactions,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_month(value: Option<String>) -> Result<Option<MonthKey>, ApiError> {
    non_empty(value)
        .map(|m| m.parse::<MonthKey>())
        .transpose()
        .map_err(ApiError::from)
}

fn not_found() -> ApiError {
    ApiError(AppError::NotFound("Transaction not found".to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /transactions
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Value>, ApiError> {
    let filter = TransactionFilter::try_from(query)?;

    let transactions: Vec<Transaction> = TransactionRepository::new((*state.db).clone())
        .list_by_user(auth.user_id(), &filter)
        .await?
        .into_iter()
        .map(Transaction::from)
        .collect();

    Ok(Json(json!({
        "status": "success",
        "transactions": transactions
    })))
}

/// POST /transactions
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<NewTransaction>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = payload.validated()?;

    let transaction = Transaction::from(
        TransactionRepository::new((*state.db).clone())
            .create(auth.user_id(), input)
            .await?,
    );

    info!(
        user_id = %auth.user_id(),
        transaction_id = %transaction.id,
        "Transaction recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Transaction created successfully",
            "transaction": transaction
        })),
    ))
}

/// GET /transactions/{id}
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;

    let transaction = TransactionRepository::new((*state.db).clone())
        .find_for_user(auth.user_id(), id)
        .await?
        .map(Transaction::from)
        .ok_or_else(not_found)?;

    Ok(Json(json!({
        "status": "success",
        "transaction": transaction
    })))
}

/// GET /transactions/summary
async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Summary>, ApiError> {
    let month = parse_month(query.month)?;
    let repo = TransactionRepository::new((*state.db).clone());

    let income = repo
        .sum_by_user_and_type(auth.user_id(), TransactionType::Income, month)
        .await?;
    let expense = repo
        .sum_by_user_and_type(auth.user_id(), TransactionType::Expense, month)
        .await?;

    Ok(Json(Summary::from_totals(income, expense)))
}

/// GET /transactions/grouped
async fn grouped(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Value>, ApiError> {
    let transactions: Vec<Transaction> = TransactionRepository::new((*state.db).clone())
        .list_by_user(auth.user_id(), &TransactionFilter::default())
        .await?
        .into_iter()
        .map(Transaction::from)
        .collect();

    let groups: Vec<MonthGroupResponse> = group_by_month(transactions, Utc::now().date_naive())
        .into_inner()
        .into_iter()
        .map(MonthGroupResponse::from)
        .collect();

    Ok(Json(json!({
        "status": "success",
        "groups": groups
    })))
}

/// GET /transactions/categories
async fn categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let categories = TransactionRepository::new((*state.db).clone())
        .categories(auth.user_id())
        .await?;

    Ok(Json(json!({
        "status": "success",
        "categories": categories
    })))
}
