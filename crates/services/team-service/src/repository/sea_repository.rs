//! SeaORM-backed implementation of `CrudRepository`.
//!
//! One generic type serves every `Persistable` record. The connection is
//! injected at construction; the repository keeps no other state, so clones
//! share the same pool and may be used from any number of tasks.

use std::marker::PhantomData;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityName, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, TransactionTrait,
};
use tracing::{debug, error};

use common::{AppError, AppResult};
use domain::{Page, PageRequest, Sort};

use super::base::{CrudRepository, Persistable};
use super::query::{apply_sort, key_column, key_sequence_resync, STREAM_BATCH_SIZE};

/// Generic repository over a SeaORM connection.
pub struct SeaRepository<T: Persistable> {
    db: DatabaseConnection,
    entity: T::Entity,
    _record: PhantomData<fn() -> T>,
}

impl<T: Persistable> Clone for SeaRepository<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            entity: T::Entity::default(),
            _record: PhantomData,
        }
    }
}

impl<T: Persistable> SeaRepository<T> {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            entity: T::Entity::default(),
            _record: PhantomData,
        }
    }

    fn table(&self) -> &str {
        self.entity.table_name()
    }

    // =========================================================================
    // Typed queries
    // =========================================================================

    /// Records matching `condition`, ascending by key
    pub async fn find_all_matching(&self, condition: Condition) -> AppResult<Vec<T>> {
        let select = apply_sort(T::Entity::find().filter(condition), &Sort::unsorted())?;
        self.fetch(select).await
    }

    /// Records matching `condition` in the requested order
    pub async fn find_all_matching_sorted(
        &self,
        condition: Condition,
        sort: &Sort,
    ) -> AppResult<Vec<T>> {
        let select = apply_sort(T::Entity::find().filter(condition), sort)?;
        self.fetch(select).await
    }

    /// First record matching `condition` by key order
    pub async fn find_one_matching(&self, condition: Condition) -> AppResult<Option<T>> {
        let model = apply_sort(T::Entity::find().filter(condition), &Sort::unsorted())?
            .one(&self.db)
            .await?;
        Ok(model.map(T::from_model))
    }

    /// Count records matching `condition`
    pub async fn count_matching(&self, condition: Condition) -> AppResult<u64> {
        Ok(T::Entity::find().filter(condition).count(&self.db).await?)
    }

    /// One page of the records matching `condition`
    pub async fn find_page_matching(
        &self,
        condition: Condition,
        request: &PageRequest,
    ) -> AppResult<Page<T>> {
        self.page_of(T::Entity::find().filter(condition), request).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn fetch(&self, select: Select<T::Entity>) -> AppResult<Vec<T>> {
        let models = select.all(&self.db).await?;
        Ok(models.into_iter().map(T::from_model).collect())
    }

    async fn page_of(&self, select: Select<T::Entity>, request: &PageRequest) -> AppResult<Page<T>> {
        // Validate the sort before issuing any query
        let ordered = apply_sort(select.clone(), request.sort())?;

        let total = select.count(&self.db).await?;
        let models = ordered
            .offset(request.offset())
            .limit(request.size())
            .all(&self.db)
            .await?;

        debug!(
            table = self.table(),
            offset = request.offset(),
            size = request.size(),
            total,
            "fetched page"
        );

        let content = models.into_iter().map(T::from_model).collect();
        Ok(Page::new(content, request, total))
    }

    /// Upsert by key inside an open transaction.
    async fn save_in(txn: &DatabaseTransaction, entity: T) -> AppResult<T> {
        let stored = match entity.key() {
            None => entity.into_active_model().insert(txn).await?,
            Some(key) => {
                let exists = T::Entity::find_by_id(key).one(txn).await?.is_some();
                let active = entity.into_active_model();
                if exists {
                    active.update(txn).await?
                } else {
                    let inserted = active.insert(txn).await?;
                    let backend = txn.get_database_backend();
                    if let Some(resync) = key_sequence_resync::<T::Entity>(backend)? {
                        txn.query_one(resync).await?;
                    }
                    inserted
                }
            }
        };
        Ok(T::from_model(stored))
    }

    async fn save_each(txn: &DatabaseTransaction, entities: Vec<T>) -> AppResult<Vec<T>> {
        let mut saved = Vec::with_capacity(entities.len());
        for entity in entities {
            saved.push(Self::save_in(txn, entity).await?);
        }
        Ok(saved)
    }

    async fn delete_in(txn: &DatabaseTransaction, table: &str, entity: T) -> AppResult<()> {
        let key = entity
            .key()
            .ok_or_else(|| AppError::not_found(format!("{} record has no key", table)))?;

        let result = T::Entity::delete_by_id(key.clone()).exec(txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("{} {:?}", table, key)));
        }
        Ok(())
    }

    /// Commit on success, roll back on error.
    async fn finish<R>(txn: DatabaseTransaction, outcome: AppResult<R>) -> AppResult<R> {
        match outcome {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}

/// Next batch for `stream_all`, resuming after `after`, or `None` once the
/// table is exhausted.
async fn fetch_batch<T: Persistable>(
    db: DatabaseConnection,
    after: Option<T::Key>,
) -> AppResult<Option<(Vec<T>, Option<T::Key>)>> {
    let column = key_column::<T::Entity>()?;
    let mut select = T::Entity::find();
    if let Some(last) = after {
        select = select.filter(column.gt(last));
    }

    let models = select
        .order_by_asc(column)
        .limit(STREAM_BATCH_SIZE)
        .all(&db)
        .await?;

    if models.is_empty() {
        return Ok(None);
    }

    let batch: Vec<T> = models.into_iter().map(T::from_model).collect();
    let last = batch
        .last()
        .and_then(|record| record.key())
        .ok_or_else(|| AppError::internal("stored record without a key"))?;
    Ok(Some((batch, Some(last))))
}

#[async_trait]
impl<T: Persistable> CrudRepository<T, T::Key> for SeaRepository<T> {
    async fn save(&self, entity: T) -> AppResult<T> {
        debug!(table = self.table(), key = ?entity.key(), "saving record");

        let txn = self.db.begin().await?;
        let outcome = Self::save_in(&txn, entity).await;
        Self::finish(txn, outcome).await
    }

    async fn save_all(&self, entities: Vec<T>) -> AppResult<Vec<T>> {
        debug!(table = self.table(), count = entities.len(), "saving records");

        let txn = self.db.begin().await?;
        let outcome = Self::save_each(&txn, entities).await;
        Self::finish(txn, outcome).await
    }

    async fn find_by_id(&self, id: T::Key) -> AppResult<Option<T>> {
        let model = T::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(T::from_model))
    }

    async fn exists_by_id(&self, id: T::Key) -> AppResult<bool> {
        let matches = T::Entity::find_by_id(id).count(&self.db).await?;
        Ok(matches > 0)
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        self.fetch(apply_sort(T::Entity::find(), &Sort::unsorted())?).await
    }

    fn stream_all(&self) -> BoxStream<'static, AppResult<T>> {
        let db = self.db.clone();

        stream::try_unfold(None, move |after| fetch_batch::<T>(db.clone(), after))
            .map_ok(|batch| stream::iter(batch.into_iter().map(Ok::<T, AppError>)))
            .try_flatten()
            .boxed()
    }

    async fn find_all_sorted(&self, sort: &Sort) -> AppResult<Vec<T>> {
        self.fetch(apply_sort(T::Entity::find(), sort)?).await
    }

    async fn find_all_by_id(&self, ids: Vec<T::Key>) -> AppResult<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let column = key_column::<T::Entity>()?;
        self.find_all_matching(Condition::all().add(column.is_in(ids)))
            .await
    }

    async fn find_page(&self, request: &PageRequest) -> AppResult<Page<T>> {
        self.page_of(T::Entity::find(), request).await
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(T::Entity::find().count(&self.db).await?)
    }

    async fn delete_by_id(&self, id: T::Key) -> AppResult<()> {
        let result = T::Entity::delete_by_id(id.clone()).exec(&self.db).await?;
        debug!(
            table = self.table(),
            key = ?id,
            removed = result.rows_affected,
            "deleted by key"
        );
        Ok(())
    }

    async fn delete(&self, entity: T) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let outcome = Self::delete_in(&txn, self.table(), entity).await;
        Self::finish(txn, outcome).await
    }

    async fn delete_all_by_id(&self, ids: Vec<T::Key>) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let column = key_column::<T::Entity>()?;
        let result = T::Entity::delete_many()
            .filter(column.is_in(ids))
            .exec(&self.db)
            .await?;

        debug!(table = self.table(), removed = result.rows_affected, "deleted by keys");
        Ok(())
    }

    async fn delete_all_of(&self, entities: Vec<T>) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let mut outcome = Ok(());
        for entity in entities {
            outcome = Self::delete_in(&txn, self.table(), entity).await;
            if outcome.is_err() {
                break;
            }
        }
        Self::finish(txn, outcome).await
    }

    async fn delete_all(&self) -> AppResult<()> {
        let result = T::Entity::delete_many().exec(&self.db).await?;
        debug!(table = self.table(), removed = result.rows_affected, "deleted all");
        Ok(())
    }
}
