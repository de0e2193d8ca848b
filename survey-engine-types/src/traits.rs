use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    Answer, AnswerId, Response, ResponseId, StoreError, Submission, Survey, SurveyError, SurveyId,
};

/// A row type persisted through a `Repository`.
///
/// Ids and timestamps are generated by the store, never by callers: a record
/// handed to `insert` is stamped via `assign_identity` before it is stored.
pub trait Record: Clone + Send + Sync + 'static {
    /// Primary key.
    type Id: Clone + Eq + Hash + fmt::Display + Send + Sync;

    /// Key of the owning record (`()` for top-level tables).
    type ParentId: Clone + PartialEq + Send + Sync;

    /// Table name, used in logs and errors.
    const TABLE: &'static str;

    fn id(&self) -> &Self::Id;

    fn parent_id(&self) -> Option<&Self::ParentId>;

    /// Give the record a fresh id and creation timestamp.
    fn assign_identity(&mut self, now: DateTime<Utc>);

    /// Refresh the modification timestamp, if the table has one.
    fn touch(&mut self, _now: DateTime<Utc>) {}
}

/// Create/update/delete/list access to one table.
///
/// Implemented once per storage backend and injected where needed; writes are
/// last-write-wins per record.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Store a new record and return it with its generated id and timestamps.
    async fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Replace an existing record.
    async fn update(&self, record: T) -> Result<T, StoreError>;

    /// Delete a record by id.
    async fn delete(&self, id: &T::Id) -> Result<(), StoreError>;

    /// Fetch a record by id.
    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError>;

    /// List all records in insertion order.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// List the records owned by `parent`, in insertion order.
    async fn list_by_parent(&self, parent: &T::ParentId) -> Result<Vec<T>, StoreError>;
}

#[async_trait]
impl<T: Record, R: Repository<T> + ?Sized> Repository<T> for Arc<R> {
    async fn insert(&self, record: T) -> Result<T, StoreError> {
        (**self).insert(record).await
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        (**self).update(record).await
    }

    async fn delete(&self, id: &T::Id) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        (**self).get(id).await
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        (**self).list().await
    }

    async fn list_by_parent(&self, parent: &T::ParentId) -> Result<Vec<T>, StoreError> {
        (**self).list_by_parent(parent).await
    }
}

/// The server call that writes a respondent's submission.
///
/// Implementations are all-or-nothing: either the response and all of its
/// answers are stored, or nothing is.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Store the submission and return the id of the created response.
    async fn submit(&self, submission: Submission) -> Result<ResponseId, SurveyError>;
}

#[async_trait]
impl<G: SubmissionGateway + ?Sized> SubmissionGateway for Arc<G> {
    async fn submit(&self, submission: Submission) -> Result<ResponseId, SurveyError> {
        (**self).submit(submission).await
    }
}

impl Record for Survey {
    type Id = SurveyId;
    type ParentId = ();

    const TABLE: &'static str = "surveys";

    fn id(&self) -> &SurveyId {
        &self.id
    }

    fn parent_id(&self) -> Option<&()> {
        None
    }

    fn assign_identity(&mut self, now: DateTime<Utc>) {
        self.id = SurveyId::generate();
        self.created_at = now;
        self.updated_at = now;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Record for Response {
    type Id = ResponseId;
    type ParentId = SurveyId;

    const TABLE: &'static str = "survey_responses";

    fn id(&self) -> &ResponseId {
        &self.id
    }

    fn parent_id(&self) -> Option<&SurveyId> {
        Some(&self.survey_id)
    }

    fn assign_identity(&mut self, now: DateTime<Utc>) {
        self.id = ResponseId::generate();
        self.submitted_at = now;
    }
}

impl Record for Answer {
    type Id = AnswerId;
    type ParentId = ResponseId;

    const TABLE: &'static str = "survey_answers";

    fn id(&self) -> &AnswerId {
        &self.id
    }

    fn parent_id(&self) -> Option<&ResponseId> {
        Some(&self.response_id)
    }

    fn assign_identity(&mut self, _now: DateTime<Utc>) {
        self.id = AnswerId::generate();
    }
}
