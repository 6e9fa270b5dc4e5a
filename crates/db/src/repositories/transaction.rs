//! Transaction repository for ledger database operations.
//!
//! Transactions are append-only: there is no update or delete here. Rows go
//! away only when their owner is deleted.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
    sea_query::{Expr, Func, LikeExpr},
};
use tally_core::ledger::{MonthKey, NewTransaction, Transaction, TransactionType};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums, transactions};

/// Optional filters for listing a user's transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only this direction.
    pub transaction_type: Option<TransactionType>,
    /// Exact category match.
    pub category: Option<String>,
    /// Only dates within this calendar month.
    pub month: Option<MonthKey>,
    /// Case-insensitive substring of category or note.
    pub search: Option<String>,
}

impl From<transactions::Model> for Transaction {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id.into(),
            user_id: model.user_id.into(),
            transaction_type: model.transaction_type.into(),
            category: model.category,
            amount: model.amount,
            note: model.note,
            date: model.date,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a transaction for `user_id`.
    ///
    /// The input is expected to be validated already.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: NewTransaction,
    ) -> Result<transactions::Model, DbErr> {
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            transaction_type: Set(input.transaction_type.into()),
            category: Set(input.category),
            amount: Set(input.amount),
            note: Set(input.note),
            date: Set(input.date),
            created_at: Set(Utc::now().into()),
        };

        transaction.insert(&self.db).await
    }

    /// Lists a user's transactions, newest first.
    ///
    /// Ordered by `date` descending, then `created_at` descending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        filter: &TransactionFilter,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));

        if let Some(ty) = filter.transaction_type {
            query = query.filter(
                transactions::Column::TransactionType
                    .eq(sea_orm_active_enums::TransactionType::from(ty)),
            );
        }

        if let Some(category) = &filter.category {
            query = query.filter(transactions::Column::Category.eq(category.as_str()));
        }

        if let Some(month) = filter.month {
            let Some(query_in_month) = within_month(query, month) else {
                return Ok(Vec::new());
            };
            query = query_in_month;
        }

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = like_pattern(search);
            query = query.filter(
                Condition::any()
                    .add(lower(transactions::Column::Category).like(pattern.clone()))
                    .add(lower(transactions::Column::Note).like(pattern)),
            );
        }

        query
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Sums the amounts of one direction for a user.
    ///
    /// With `month`, only that calendar month counts; otherwise all time.
    /// Returns `0` when nothing matches. The total saturates at `i64::MAX`
    /// instead of failing, so it is folded here rather than with SQL `SUM`,
    /// which raises an overflow error on both backends.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn sum_by_user_and_type(
        &self,
        user_id: Uuid,
        transaction_type: TransactionType,
        month: Option<MonthKey>,
    ) -> Result<i64, DbErr> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(
                transactions::Column::TransactionType
                    .eq(sea_orm_active_enums::TransactionType::from(transaction_type)),
            );

        if let Some(month) = month {
            let Some(query_in_month) = within_month(query, month) else {
                return Ok(0);
            };
            query = query_in_month;
        }

        let amounts: Vec<i64> = query
            .select_only()
            .column(transactions::Column::Amount)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(saturating_total(amounts))
    }

    /// Finds one of the user's transactions. Another user's row is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Distinct categories the user has used, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn categories(&self, user_id: Uuid) -> Result<Vec<String>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .select_only()
            .column(transactions::Column::Category)
            .distinct()
            .order_by_asc(transactions::Column::Category)
            .into_tuple()
            .all(&self.db)
            .await
    }
}

/// Restricts `query` to dates inside `month`. `None` if the month has no
/// representable end date.
fn within_month(
    query: Select<transactions::Entity>,
    month: MonthKey,
) -> Option<Select<transactions::Entity>> {
    let (start, end) = month.date_range()?;
    Some(
        query
            .filter(transactions::Column::Date.gte(start))
            .filter(transactions::Column::Date.lt(end)),
    )
}

fn saturating_total(amounts: impl IntoIterator<Item = i64>) -> i64 {
    amounts.into_iter().fold(0, i64::saturating_add)
}

fn lower(column: transactions::Column) -> Expr {
    Expr::expr(Func::lower(Expr::col(column)))
}

/// Builds a `%needle%` pattern with LIKE wildcards escaped.
fn like_pattern(needle: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}
