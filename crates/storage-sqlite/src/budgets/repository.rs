use budget_core::budgets::{Budget, BudgetRepositoryTrait};
use budget_core::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::budgets;
use crate::schema::budgets::dsl::*;
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }

    fn to_domain(row: Option<BudgetDB>) -> Result<Option<Budget>> {
        Ok(row.map(Budget::try_from).transpose()?)
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget(&self, budget_id: &Uuid) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets
            .find(budget_id.to_string())
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?;
        Self::to_domain(row)
    }

    fn get_budget_by_year(&self, target_year: i32) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets
            .filter(year.eq(target_year))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?;
        Self::to_domain(row)
    }

    fn exists_by_year(&self, target_year: i32) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(exists(budgets.filter(year.eq(target_year))))
            .get_result::<bool>(&mut conn)
            .into_core()
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets
            .order(year.asc())
            .select(BudgetDB::as_select())
            .load::<BudgetDB>(&mut conn)
            .into_core()?;
        Ok(rows
            .into_iter()
            .map(Budget::try_from)
            .collect::<std::result::Result<Vec<_>, StorageError>>()?)
    }

    async fn save_budget(&self, budget: Budget) -> Result<Budget> {
        let budget_db = BudgetDB::from(&budget);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let saved = diesel::insert_into(budgets::table)
                    .values(&budget_db)
                    .on_conflict(budgets::id)
                    .do_update()
                    .set(&budget_db)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Budget::try_from(saved)?)
            })
            .await
    }

    async fn delete_budget(&self, budget_id: Uuid) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(budgets.find(budget_id.to_string()))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
