//! Base repository contract and the mapping seam it relies on.
//!
//! `CrudRepository` states the capability set every repository offers for one
//! record type `T` keyed by `K`. `Persistable` ties a domain record to the
//! SeaORM entity that stores it, so a single generic provider
//! (`SeaRepository`) can serve any record type without per-type code.

use std::fmt::Debug;

use async_trait::async_trait;
use futures::stream::BoxStream;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, EntityTrait, FromQueryResult, IntoActiveModel,
    ModelTrait, PrimaryKeyTrait, Value,
};

use common::AppResult;
use domain::{Page, PageRequest, Sort};

/// Primary key value type of a SeaORM entity.
pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Maps a domain record to its SeaORM representation and back.
///
/// The record's key is `None` until the store has assigned one.
pub trait Persistable: Sized + Send + Sync + 'static {
    /// SeaORM entity backing this record
    type Entity: EntityTrait<Model = Self::Model>;

    /// Row type read back from the store
    type Model: IntoActiveModel<Self::ActiveModel>
        + FromQueryResult
        + ModelTrait<Entity = Self::Entity>
        + Send
        + Sync
        + 'static;

    /// Change set written to the store
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;

    /// Single-column surrogate key
    type Key: Into<PrimaryKeyOf<Self::Entity>>
        + Into<Value>
        + Clone
        + Debug
        + Send
        + Sync
        + 'static;

    /// Stored key, if any
    fn key(&self) -> Option<Self::Key>;

    /// Build the change set. An absent key must be left `NotSet`.
    fn into_active_model(self) -> Self::ActiveModel;

    /// Rebuild the record from a stored row.
    fn from_model(model: Self::Model) -> Self;
}

/// Create/read/update/delete, paging and counting over one record type.
///
/// Absence is a value, not an error: lookups return `Option`/`bool` and
/// `delete_by_id` on a missing key is a no-op. Provider failures surface
/// unchanged apart from their classification into `AppError`; nothing here
/// retries.
#[async_trait]
pub trait CrudRepository<T, K>: Send + Sync
where
    T: Send + 'static,
    K: Send + 'static,
{
    /// Insert when the key is absent or unknown to the store, update otherwise.
    /// Returns the stored record with its key populated.
    async fn save(&self, entity: T) -> AppResult<T>;

    /// Save every record, preserving input order in the result.
    ///
    /// All-or-nothing: the first failure rolls back the whole batch.
    async fn save_all(&self, entities: Vec<T>) -> AppResult<Vec<T>>;

    /// Find a record by key
    async fn find_by_id(&self, id: K) -> AppResult<Option<T>>;

    /// Check whether a record with the key is stored
    async fn exists_by_id(&self, id: K) -> AppResult<bool>;

    /// All stored records, ascending by key
    async fn find_all(&self) -> AppResult<Vec<T>>;

    /// All stored records as a lazily fetched stream, ascending by key.
    ///
    /// Batches resume after the last key seen, so records removed while the
    /// stream is open never cause later ones to be skipped.
    fn stream_all(&self) -> BoxStream<'static, AppResult<T>>;

    /// All stored records in the requested order
    async fn find_all_sorted(&self, sort: &Sort) -> AppResult<Vec<T>>;

    /// Records whose key is listed; unknown keys are skipped
    async fn find_all_by_id(&self, ids: Vec<K>) -> AppResult<Vec<T>>;

    /// One page of records plus the total count
    async fn find_page(&self, request: &PageRequest) -> AppResult<Page<T>>;

    /// Count all stored records
    async fn count(&self) -> AppResult<u64>;

    /// Remove the record with the key if present
    async fn delete_by_id(&self, id: K) -> AppResult<()>;

    /// Remove a stored record.
    ///
    /// Fails with `NotFound` when the record has no key or the key is not stored.
    async fn delete(&self, entity: T) -> AppResult<()>;

    /// Remove the records with the listed keys; unknown keys are ignored
    async fn delete_all_by_id(&self, ids: Vec<K>) -> AppResult<()>;

    /// Remove each record with the `delete` policy, all-or-nothing
    async fn delete_all_of(&self, entities: Vec<T>) -> AppResult<()>;

    /// Remove every stored record
    async fn delete_all(&self) -> AppResult<()>;
}
