//! In-memory repository.
//!
//! `MemoryRepository<T>` implements `Repository<T>` for any `Record` type and
//! is what tests and demos inject in place of a hosted database. Rows live in
//! insertion order behind an async `RwLock`; clones share the same rows.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use survey_engine_types::{Record, Repository, StoreError};

/// A repository operation, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    Update,
    Delete,
    Get,
    List,
}

#[derive(Debug, Clone)]
struct InjectedFailure {
    operation: Operation,
    successes_left: usize,
    message: String,
}

/// Thread-safe in-memory table.
#[derive(Debug)]
pub struct MemoryRepository<T: Record> {
    rows: Arc<RwLock<Vec<T>>>,
    failures: Arc<Mutex<Vec<InjectedFailure>>>,
}

impl<T: Record> Clone for MemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            failures: Arc::clone(&self.failures),
        }
    }
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryRepository<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a table holding `rows` as-is, without assigning identities.
    pub fn seeded(rows: Vec<T>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            failures: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Remove all rows.
    pub async fn clear(&self) {
        self.rows.write().await.clear();
    }

    /// Make every future `operation` fail with a backend error.
    pub fn fail_on(&self, operation: Operation, message: impl Into<String>) {
        self.fail_after(operation, 0, message);
    }

    /// Let `successes` more `operation` calls through, then fail the rest.
    pub fn fail_after(&self, operation: Operation, successes: usize, message: impl Into<String>) {
        self.lock_failures().push(InjectedFailure {
            operation,
            successes_left: successes,
            message: message.into(),
        });
    }

    /// Remove all injected failures.
    pub fn clear_failures(&self) {
        self.lock_failures().clear();
    }

    fn lock_failures(&self) -> std::sync::MutexGuard<'_, Vec<InjectedFailure>> {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self, operation: Operation) -> Result<(), StoreError> {
        let mut failures = self.lock_failures();
        let Some(failure) = failures.iter_mut().find(|f| f.operation == operation) else {
            return Ok(());
        };

        if failure.successes_left > 0 {
            failure.successes_left -= 1;
            return Ok(());
        }

        tracing::warn!(
            table = T::TABLE,
            ?operation,
            message = %failure.message,
            "injected storage failure"
        );
        Err(StoreError::backend(anyhow::anyhow!(failure.message.clone())))
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    async fn insert(&self, mut record: T) -> Result<T, StoreError> {
        self.check(Operation::Insert)?;

        record.assign_identity(Utc::now());
        self.rows.write().await.push(record.clone());
        tracing::debug!(table = T::TABLE, id = %record.id(), "inserted row");

        Ok(record)
    }

    async fn update(&self, mut record: T) -> Result<T, StoreError> {
        self.check(Operation::Update)?;

        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == record.id())
            .ok_or_else(|| StoreError::not_found(T::TABLE, record.id()))?;

        record.touch(Utc::now());
        *slot = record.clone();
        tracing::debug!(table = T::TABLE, id = %record.id(), "updated row");

        Ok(record)
    }

    async fn delete(&self, id: &T::Id) -> Result<(), StoreError> {
        self.check(Operation::Delete)?;

        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or_else(|| StoreError::not_found(T::TABLE, id))?;
        rows.remove(index);
        tracing::debug!(table = T::TABLE, %id, "deleted row");

        Ok(())
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        self.check(Operation::Get)?;

        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.check(Operation::List)?;

        Ok(self.rows.read().await.clone())
    }

    async fn list_by_parent(&self, parent: &T::ParentId) -> Result<Vec<T>, StoreError> {
        self.check(Operation::List)?;

        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.parent_id() == Some(parent))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use survey_engine_types::{
        Answer, ElementId, RespondentType, Response, Survey, SurveyId, SurveyStatus,
    };

    use super::*;

    #[tokio::test]
    async fn insert_assigns_identity() {
        let repo = MemoryRepository::<Survey>::new();
        let draft = Survey::new("Intake", "general");
        assert!(draft.id.is_nil());

        let stored = repo.insert(draft).await.unwrap();
        assert!(!stored.id.is_nil());
        assert_eq!(stored.created_at, stored.updated_at);
        assert_eq!(repo.get(&stored.id).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn update_replaces_and_touches() {
        let repo = MemoryRepository::<Survey>::new();
        let stored = repo.insert(Survey::new("Intake", "general")).await.unwrap();

        let changed = stored.clone().with_status(SurveyStatus::Active);
        let updated = repo.update(changed).await.unwrap();

        assert_eq!(updated.status, SurveyStatus::Active);
        assert!(updated.updated_at >= stored.updated_at);
        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows_are_not_found() {
        let repo = MemoryRepository::<Survey>::new();
        let ghost = Survey::new("Ghost", "general");

        assert!(repo.update(ghost.clone()).await.unwrap_err().is_not_found());
        assert!(repo.delete(&ghost.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let repo = MemoryRepository::<Survey>::new();
        let stored = repo.insert(Survey::new("Intake", "general")).await.unwrap();

        repo.delete(&stored.id).await.unwrap();
        assert_eq!(repo.get(&stored.id).await.unwrap(), None);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn list_by_parent_filters_and_keeps_order() {
        let repo = MemoryRepository::<Response>::new();
        let survey_a = SurveyId::generate();
        let survey_b = SurveyId::generate();

        let first = repo
            .insert(Response::new(survey_a, RespondentType::External))
            .await
            .unwrap();
        repo.insert(Response::new(survey_b, RespondentType::Internal))
            .await
            .unwrap();
        let third = repo
            .insert(Response::new(survey_a, RespondentType::Internal))
            .await
            .unwrap();

        let ids: Vec<_> = repo
            .list_by_parent(&survey_a)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![first.id, third.id]);
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn injected_failure_after_successes() {
        let repo = MemoryRepository::<Answer>::new();
        let response = Response::new(SurveyId::generate(), RespondentType::External);
        repo.fail_after(Operation::Insert, 1, "disk full");

        let answer = Answer::new(response.id, ElementId::new("q1"), "yes".into());
        assert!(repo.insert(answer.clone()).await.is_ok());

        let err = repo.insert(answer.clone()).await.unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert_eq!(repo.len().await, 1);

        repo.clear_failures();
        assert!(repo.insert(answer).await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_rows() {
        let repo = MemoryRepository::<Survey>::new();
        let other = repo.clone();
        repo.insert(Survey::new("Shared", "general")).await.unwrap();
        assert_eq!(other.len().await, 1);
    }
}
