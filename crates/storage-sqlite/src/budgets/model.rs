//! Database models for budgets.

use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use budget_core::budgets::Budget;

use crate::errors::StorageError;

/// Database model for budgets.
///
/// `expected_total` is stored as decimal text to keep full precision.
#[derive(
    Queryable, Insertable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub year: i32,
    pub expected_total: String,
}

impl From<&Budget> for BudgetDB {
    fn from(domain: &Budget) -> Self {
        Self {
            id: domain.id().to_string(),
            year: domain.year,
            expected_total: domain.expected_total.to_string(),
        }
    }
}

impl TryFrom<BudgetDB> for Budget {
    type Error = StorageError;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&db.id)
            .map_err(|e| StorageError::Decode(format!("budget id '{}': {}", db.id, e)))?;
        let expected_total = Decimal::from_str(&db.expected_total).map_err(|e| {
            StorageError::Decode(format!(
                "expected total '{}' of budget {}: {}",
                db.expected_total, db.id, e
            ))
        })?;
        Ok(Budget::with_id(id, db.year, expected_total))
    }
}
