//! Budget domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model representing a yearly budget.
///
/// The identifier is assigned when the value is constructed and cannot be
/// changed afterwards; only `year` and `expected_total` are mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    id: Uuid,
    pub year: i32,
    pub expected_total: Decimal,
}

impl Budget {
    /// Creates a budget with a freshly generated identifier.
    pub fn new(year: i32, expected_total: Decimal) -> Self {
        Self::with_id(Uuid::new_v4(), year, expected_total)
    }

    /// Rebuilds a budget that already has an identifier, e.g. one loaded from storage.
    pub fn with_id(id: Uuid, year: i32, expected_total: Decimal) -> Self {
        Self {
            id,
            year,
            expected_total,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Input model for creating or updating a budget.
///
/// `expectedTotal` may be a JSON string or number; numbers are read from their
/// literal text, never through `f64`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    pub year: i32,
    pub expected_total: Decimal,
}

/// Read model returned to API callers.
///
/// `expected_total` serializes as a decimal string so no precision is lost
/// to binary floating point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDto {
    pub id: Uuid,
    pub year: i32,
    pub expected_total: Decimal,
}
