use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use uuid::Uuid;

use super::budgets_model::{Budget, BudgetInput};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};

pub struct BudgetService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(budget_repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService { budget_repository }
    }

    /// Fails with `ConstraintViolation` when `year` belongs to a budget other
    /// than `excluding_id`.
    ///
    /// This is a check-then-act: two concurrent callers can both pass before
    /// either one writes.
    fn assert_year_available(&self, excluding_id: Option<&Uuid>, year: i32) -> Result<()> {
        if !self.budget_repository.exists_by_year(year)? {
            return Ok(());
        }

        if let Some(id) = excluding_id {
            let holder = self.budget_repository.get_budget_by_year(year)?;
            if holder.is_some_and(|b| b.id() == *id) {
                return Ok(());
            }
        }

        Err(Error::ConstraintViolation(format!(
            "A budget already exists for the year {}",
            year
        )))
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budget(&self, budget_id: &Uuid) -> Result<Budget> {
        self.budget_repository
            .get_budget(budget_id)?
            .ok_or_else(|| Error::NotFound(format!("No budget found for id: {}", budget_id)))
    }

    fn get_budget_by_year(&self, year: i32) -> Result<Budget> {
        self.budget_repository
            .get_budget_by_year(year)?
            .ok_or_else(|| Error::NotFound(format!("No budget found for year: {}", year)))
    }

    fn get_budgets(&self) -> Result<Vec<Budget>> {
        self.budget_repository.list_budgets()
    }

    async fn create_budget(&self, input: BudgetInput) -> Result<Budget> {
        self.assert_year_available(None, input.year)?;

        let budget = Budget::from(input);
        info!("Creating budget {} for year {}", budget.id(), budget.year);
        self.budget_repository.save_budget(budget).await
    }

    async fn update_budget(&self, budget_id: &Uuid, input: BudgetInput) -> Result<Budget> {
        let existing = self.get_budget(budget_id)?;

        if existing.year != input.year {
            self.assert_year_available(Some(budget_id), input.year)?;
        }

        debug!(
            "Updating budget {}: year {} -> {}",
            budget_id, existing.year, input.year
        );
        self.budget_repository
            .save_budget(existing.apply(input))
            .await
    }

    async fn delete_budget(&self, budget_id: &Uuid) -> Result<()> {
        if let Some(budget) = self.budget_repository.get_budget(budget_id)? {
            let deleted = self.budget_repository.delete_budget(budget.id()).await?;
            info!("Deleted budget {} ({} row(s))", budget_id, deleted);
        } else {
            debug!("Delete requested for unknown budget {}", budget_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    const TEST_YEAR: i32 = 2020;
    const NEW_TEST_YEAR: i32 = 2021;
    const INVALID_ID: &str = "b543fd8f-8171-4a52-8399-f38a1a2af145";

    // ============== Mock Repository ==============

    #[derive(Default)]
    struct MockBudgetRepository {
        budgets: RwLock<Vec<Budget>>,
        saves: AtomicUsize,
    }

    impl MockBudgetRepository {
        fn with_budgets(budgets: Vec<Budget>) -> Self {
            Self {
                budgets: RwLock::new(budgets),
                saves: AtomicUsize::new(0),
            }
        }

        fn snapshot(&self) -> Vec<Budget> {
            self.budgets.read().unwrap().clone()
        }
    }

    #[async_trait]
    impl BudgetRepositoryTrait for MockBudgetRepository {
        fn get_budget(&self, budget_id: &Uuid) -> Result<Option<Budget>> {
            Ok(self
                .budgets
                .read()
                .unwrap()
                .iter()
                .find(|b| b.id() == *budget_id)
                .cloned())
        }

        fn get_budget_by_year(&self, year: i32) -> Result<Option<Budget>> {
            Ok(self
                .budgets
                .read()
                .unwrap()
                .iter()
                .find(|b| b.year == year)
                .cloned())
        }

        fn exists_by_year(&self, year: i32) -> Result<bool> {
            Ok(self.budgets.read().unwrap().iter().any(|b| b.year == year))
        }

        fn list_budgets(&self) -> Result<Vec<Budget>> {
            Ok(self.snapshot())
        }

        async fn save_budget(&self, budget: Budget) -> Result<Budget> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            let mut budgets = self.budgets.write().unwrap();
            match budgets.iter_mut().find(|b| b.id() == budget.id()) {
                Some(existing) => *existing = budget.clone(),
                None => budgets.push(budget.clone()),
            }
            Ok(budget)
        }

        async fn delete_budget(&self, budget_id: Uuid) -> Result<usize> {
            let mut budgets = self.budgets.write().unwrap();
            let before = budgets.len();
            budgets.retain(|b| b.id() != budget_id);
            Ok(before - budgets.len())
        }
    }

    fn invalid_id() -> Uuid {
        Uuid::parse_str(INVALID_ID).unwrap()
    }

    fn input(year: i32, expected_total: Decimal) -> BudgetInput {
        BudgetInput {
            year,
            expected_total,
        }
    }

    fn setup(budgets: Vec<Budget>) -> (Arc<MockBudgetRepository>, BudgetService) {
        let repository = Arc::new(MockBudgetRepository::with_budgets(budgets));
        let service = BudgetService::new(repository.clone());
        (repository, service)
    }

    #[test]
    fn get_budget_returns_matching_budget() {
        let budget = Budget::new(TEST_YEAR, dec!(40000));
        let (_, service) = setup(vec![budget.clone()]);

        let result = service.get_budget(&budget.id()).unwrap();

        assert_eq!(result, budget);
    }

    #[test]
    fn get_budget_with_unknown_id_is_not_found() {
        let (_, service) = setup(vec![Budget::new(TEST_YEAR, dec!(40000))]);

        let result = service.get_budget(&invalid_id());

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn get_budget_by_year_finds_the_year_holder() {
        let budget = Budget::new(NEW_TEST_YEAR, dec!(40000));
        let (_, service) = setup(vec![Budget::new(TEST_YEAR, dec!(1)), budget.clone()]);

        assert_eq!(service.get_budget_by_year(NEW_TEST_YEAR).unwrap(), budget);
        assert!(matches!(
            service.get_budget_by_year(1999),
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn create_budget_with_new_year_saves_fresh_record() {
        let (repository, service) = setup(vec![Budget::new(TEST_YEAR, dec!(40000))]);

        let created = service
            .create_budget(input(NEW_TEST_YEAR, dec!(60000)))
            .await
            .unwrap();

        let stored = repository.get_budget(&created.id()).unwrap().unwrap();
        assert_eq!(stored, created);
        assert_eq!(stored.year, NEW_TEST_YEAR);
        assert_eq!(stored.expected_total, dec!(60000));
        assert_eq!(repository.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn create_budget_with_existing_year_is_conflict_and_writes_nothing() {
        let (repository, service) = setup(vec![Budget::new(TEST_YEAR, dec!(40000))]);
        let before = repository.snapshot();

        let result = service.create_budget(input(TEST_YEAR, dec!(60000))).await;

        match result {
            Err(Error::ConstraintViolation(message)) => {
                assert_eq!(message, "A budget already exists for the year 2020")
            }
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(repository.snapshot(), before);
        assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_budget_with_unknown_id_is_not_found() {
        let (repository, service) = setup(vec![Budget::new(TEST_YEAR, dec!(40000))]);

        let result = service
            .update_budget(&invalid_id(), input(TEST_YEAR, dec!(60000)))
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_budget_keeping_its_own_year_succeeds() {
        let budget = Budget::new(TEST_YEAR, dec!(40000));
        let (repository, service) = setup(vec![
            budget.clone(),
            Budget::new(NEW_TEST_YEAR, dec!(40000)),
        ]);

        let updated = service
            .update_budget(&budget.id(), input(TEST_YEAR, dec!(60000)))
            .await
            .unwrap();

        assert_eq!(updated.id(), budget.id());
        assert_eq!(updated.expected_total, dec!(60000));
        assert_eq!(repository.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn update_budget_to_free_year_calls_save_once() {
        let budget = Budget::new(TEST_YEAR, dec!(40000));
        let (repository, service) = setup(vec![budget.clone()]);

        let updated = service
            .update_budget(&budget.id(), input(NEW_TEST_YEAR, dec!(60000)))
            .await
            .unwrap();

        assert_eq!(updated.id(), budget.id());
        assert_eq!(updated.year, NEW_TEST_YEAR);
        assert_eq!(repository.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_budget_to_year_of_another_budget_is_conflict() {
        let budget = Budget::new(TEST_YEAR, dec!(40000));
        let (repository, service) = setup(vec![
            budget.clone(),
            Budget::new(NEW_TEST_YEAR, dec!(40000)),
        ]);
        let before = repository.snapshot();

        let result = service
            .update_budget(&budget.id(), input(NEW_TEST_YEAR, dec!(60000)))
            .await;

        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
        assert_eq!(repository.snapshot(), before);
        assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_budget_removes_only_the_target() {
        let first = Budget::new(2020, dec!(40000));
        let second = Budget::new(2021, dec!(40000));
        let third = Budget::new(2022, dec!(40000));
        let (_, service) = setup(vec![first.clone(), second.clone(), third.clone()]);

        service.delete_budget(&second.id()).await.unwrap();

        assert!(service.get_budget(&first.id()).is_ok());
        assert!(matches!(
            service.get_budget(&second.id()),
            Err(Error::NotFound(_))
        ));
        assert!(service.get_budget(&third.id()).is_ok());
    }

    #[tokio::test]
    async fn delete_budget_with_unknown_id_is_a_no_op() {
        let budget = Budget::new(TEST_YEAR, dec!(40000));
        let (repository, service) = setup(vec![budget.clone()]);

        service.delete_budget(&invalid_id()).await.unwrap();
        service.delete_budget(&invalid_id()).await.unwrap();

        assert_eq!(repository.snapshot(), vec![budget]);
    }
}
