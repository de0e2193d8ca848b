//! Optimistic client-side collections.
//!
//! Local state changes first and the repository call follows. When the call
//! fails the whole collection is reloaded from the repository, which is the
//! source of truth; there is no finer-grained reconciliation.

use survey_engine_types::{Record, Repository, StoreError};

/// A locally cached table kept in step with a repository.
#[derive(Debug)]
pub struct OptimisticCollection<T: Record, R> {
    repo: R,
    items: Vec<T>,
}

impl<T, R> OptimisticCollection<T, R>
where
    T: Record,
    R: Repository<T>,
{
    /// Wrap a repository without loading anything yet.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            items: Vec::new(),
        }
    }

    /// Wrap a repository and load its rows.
    pub async fn load(repo: R) -> Result<Self, StoreError> {
        let mut collection = Self::new(repo);
        collection.reload().await?;
        Ok(collection)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Replace local state with the repository's rows.
    pub async fn reload(&mut self) -> Result<(), StoreError> {
        self.items = self.repo.list().await?;
        tracing::debug!(table = T::TABLE, rows = self.items.len(), "collection reloaded");
        Ok(())
    }

    /// Append locally, then insert. The local row is replaced by the stored one.
    pub async fn create(&mut self, record: T) -> Result<T, StoreError> {
        let index = self.items.len();
        self.items.push(record.clone());

        match self.repo.insert(record).await {
            Ok(stored) => {
                if let Some(slot) = self.items.get_mut(index) {
                    *slot = stored.clone();
                }
                Ok(stored)
            }
            Err(err) => Err(self.resync(err).await),
        }
    }

    /// Replace locally, then update.
    pub async fn update(&mut self, record: T) -> Result<T, StoreError> {
        if let Some(slot) = self.items.iter_mut().find(|item| item.id() == record.id()) {
            *slot = record.clone();
        }

        match self.repo.update(record).await {
            Ok(stored) => {
                if let Some(slot) = self.items.iter_mut().find(|item| item.id() == stored.id()) {
                    *slot = stored.clone();
                }
                Ok(stored)
            }
            Err(err) => Err(self.resync(err).await),
        }
    }

    /// Remove locally, then delete.
    pub async fn delete(&mut self, id: &T::Id) -> Result<(), StoreError> {
        self.items.retain(|item| item.id() != id);

        match self.repo.delete(id).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.resync(err).await),
        }
    }

    async fn resync(&mut self, err: StoreError) -> StoreError {
        tracing::warn!(table = T::TABLE, error = %err, "write failed, reloading collection");
        if let Err(reload_err) = self.reload().await {
            tracing::warn!(
                table = T::TABLE,
                error = %reload_err,
                "reload after failed write also failed"
            );
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use survey_engine_types::{Survey, SurveyStatus};

    use super::*;
    use crate::store::{MemoryRepository, Operation};

    async fn seeded() -> (MemoryRepository<Survey>, Survey) {
        let repo = MemoryRepository::new();
        let stored = repo.insert(Survey::new("Intake", "general")).await.unwrap();
        (repo, stored)
    }

    #[tokio::test]
    async fn load_lists_rows() {
        let (repo, stored) = seeded().await;
        let collection = OptimisticCollection::load(repo).await.unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(&stored.id), Some(&stored));
    }

    #[tokio::test]
    async fn create_replaces_local_row_with_stored_one() {
        let (repo, _) = seeded().await;
        let mut collection = OptimisticCollection::load(repo).await.unwrap();

        let created = collection.create(Survey::new("Exit", "general")).await.unwrap();
        assert!(!created.id.is_nil());
        assert_eq!(collection.items()[1], created);
    }

    #[tokio::test]
    async fn failed_create_reloads() {
        let (repo, _) = seeded().await;
        repo.fail_on(Operation::Insert, "offline");
        let mut collection = OptimisticCollection::load(repo).await.unwrap();

        assert!(collection.create(Survey::new("Exit", "general")).await.is_err());
        assert_eq!(collection.len(), 1);
    }

    #[tokio::test]
    async fn failed_update_restores_server_state() {
        let (repo, stored) = seeded().await;
        repo.fail_on(Operation::Update, "offline");
        let mut collection = OptimisticCollection::load(repo).await.unwrap();

        let changed = stored.clone().with_status(SurveyStatus::Active);
        assert!(collection.update(changed).await.is_err());
        assert_eq!(collection.get(&stored.id).unwrap().status, SurveyStatus::Draft);
    }

    #[tokio::test]
    async fn successful_update_keeps_local_change() {
        let (repo, stored) = seeded().await;
        let mut collection = OptimisticCollection::load(repo).await.unwrap();

        let changed = stored.clone().with_status(SurveyStatus::Active);
        collection.update(changed).await.unwrap();
        assert_eq!(collection.get(&stored.id).unwrap().status, SurveyStatus::Active);
    }

    #[tokio::test]
    async fn failed_delete_brings_row_back() {
        let (repo, stored) = seeded().await;
        repo.fail_on(Operation::Delete, "offline");
        let mut collection = OptimisticCollection::load(repo).await.unwrap();

        assert!(collection.delete(&stored.id).await.is_err());
        assert!(collection.get(&stored.id).is_some());
    }

    #[tokio::test]
    async fn delete_removes_locally_and_remotely() {
        let (repo, stored) = seeded().await;
        let mut collection = OptimisticCollection::load(repo.clone()).await.unwrap();

        collection.delete(&stored.id).await.unwrap();
        assert!(collection.is_empty());
        assert!(repo.is_empty().await);
    }
}
