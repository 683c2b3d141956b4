//! Composite-entity aggregation.
//!
//! A local record is loaded from the service's own store, mapped to its DTO
//! shell, and completed by fetching each related entity from the peer that
//! owns it. Relations are fetched one at a time in a fixed order and every
//! relation is required: the first failed fetch fails the whole read.
//!
//! A kind may also nest records the same service stores itself (an order's
//! cart, a product's category). Those are read through the kind's
//! [`CompositeEntity::Context`] rather than from a peer.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::KindPolicy;
use crate::error::{AppError, AppResult};
use crate::external::{fetch, PeerEntity, RemoteEnrichment};
use crate::repositories::{LocalStore, StoredRecord};

/// Whether `update` requires the record to already exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Fail with not-found, without writing, when the key is absent
    Checked,
    /// Upsert, same as `save`
    Unchecked,
}

/// Whether `delete_by_id` requires the record to already exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Fail with not-found, without deleting, when the key is absent
    Checked,
    /// Delete unconditionally and ignore absence
    Unchecked,
}

pub type KeyOf<E> = <<E as CompositeEntity>::Record as StoredRecord>::Key;

/// Describes one entity kind: its record, its DTO and how the DTO is completed.
#[async_trait]
pub trait CompositeEntity: Send + Sync + 'static {
    /// Name used in not-found messages, e.g. `Favourite`
    const KIND: &'static str;
    const UPDATE_POLICY: UpdatePolicy;
    const DELETE_POLICY: DeletePolicy;

    type Record: StoredRecord;
    type Dto: Send + 'static;

    /// Local stores nested slots are read from; `()` when there are none.
    type Context: Clone + Send + Sync + 'static;

    fn key_of(dto: &Self::Dto) -> KeyOf<Self>;

    /// Copies stored fields and foreign ids; related slots start empty.
    fn shell(record: Self::Record) -> Self::Dto;

    /// Drops nested slots, keeping only what the store persists.
    fn to_record(dto: Self::Dto) -> Self::Record;

    /// Fills every nested slot, in relation order.
    async fn enrich(
        dto: &mut Self::Dto,
        peers: &dyn RemoteEnrichment,
        context: &Self::Context,
    ) -> AppResult<()>;
}

/// Fetches one related entity, logging the call and any failure.
pub async fn related<T: PeerEntity>(peers: &dyn RemoteEnrichment, id: i32) -> AppResult<T> {
    tracing::debug!(peer = %T::PEER, id, "Fetching related entity");

    fetch::<T>(peers, id).await.inspect_err(|e| {
        tracing::warn!(peer = %T::PEER, id, error = %e, "Enrichment failed");
    })
}

/// Loads a nested record from one of the service's own stores.
///
/// Absence is reported as not-found for `kind`, like a missing top-level record.
pub async fn nested<R: StoredRecord>(
    store: &dyn LocalStore<R>,
    kind: &'static str,
    key: &R::Key,
) -> AppResult<R> {
    store.get(key).await?.ok_or_else(|| {
        tracing::warn!(kind, id = %key, "Nested record missing");
        AppError::not_found(kind, key)
    })
}

/// Read and write operations over one entity kind.
///
/// Cloning is cheap; stores and the peer client are shared.
pub struct AggregationService<E: CompositeEntity> {
    store: Arc<dyn LocalStore<E::Record>>,
    peers: Arc<dyn RemoteEnrichment>,
    context: E::Context,
    update_policy: UpdatePolicy,
    delete_policy: DeletePolicy,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CompositeEntity> Clone for AggregationService<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            peers: self.peers.clone(),
            context: self.context.clone(),
            update_policy: self.update_policy,
            delete_policy: self.delete_policy,
            _entity: PhantomData,
        }
    }
}

impl<E: CompositeEntity<Context = ()>> AggregationService<E> {
    /// Creates a service using the entity kind's default policies.
    pub fn new(store: Arc<dyn LocalStore<E::Record>>, peers: Arc<dyn RemoteEnrichment>) -> Self {
        Self::with_context(store, peers, ())
    }
}

impl<E: CompositeEntity> AggregationService<E> {
    /// Like [`AggregationService::new`], for kinds that nest local records.
    pub fn with_context(
        store: Arc<dyn LocalStore<E::Record>>,
        peers: Arc<dyn RemoteEnrichment>,
        context: E::Context,
    ) -> Self {
        Self {
            store,
            peers,
            context,
            update_policy: E::UPDATE_POLICY,
            delete_policy: E::DELETE_POLICY,
            _entity: PhantomData,
        }
    }

    /// Applies configured overrides; unset fields keep the kind's default.
    pub fn with_policy(mut self, policy: KindPolicy) -> Self {
        if let Some(update) = policy.update {
            self.update_policy = update;
        }
        if let Some(delete) = policy.delete {
            self.delete_policy = delete;
        }
        self
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        self.update_policy
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Every record in store order, each fully enriched.
    pub async fn find_all(&self) -> AppResult<Vec<E::Dto>> {
        let records = self.store.get_all().await?;
        tracing::debug!(kind = E::KIND, count = records.len(), "Enriching records");

        let mut dtos = Vec::with_capacity(records.len());
        for record in records {
            dtos.push(self.assemble(record).await?);
        }
        Ok(dtos)
    }

    pub async fn find_by_id(&self, key: &KeyOf<E>) -> AppResult<E::Dto> {
        let record = self.load(key).await?;
        self.assemble(record).await
    }

    /// Upserts the record and answers with its stored state, freshly enriched.
    ///
    /// Nested objects in `dto` are ignored.
    pub async fn save(&self, dto: E::Dto) -> AppResult<E::Dto> {
        let stored = self.store.put(E::to_record(dto)).await?;
        let key = stored.key();
        tracing::info!(kind = E::KIND, id = %key, "Record saved");

        self.find_by_id(&key).await
    }

    /// Body update: upsert, or replace-existing under the checked policy.
    pub async fn update(&self, dto: E::Dto) -> AppResult<E::Dto> {
        match self.update_policy {
            UpdatePolicy::Checked => self.update_existing(dto).await,
            UpdatePolicy::Unchecked => self.save(dto).await,
        }
    }

    /// Replaces a record that must already exist, whatever the update policy.
    ///
    /// Absence fails with not-found before anything is written.
    pub async fn update_existing(&self, dto: E::Dto) -> AppResult<E::Dto> {
        self.load(&E::key_of(&dto)).await?;
        self.save(dto).await
    }

    pub async fn delete_by_id(&self, key: &KeyOf<E>) -> AppResult<()> {
        if self.delete_policy == DeletePolicy::Checked {
            self.load(key).await?;
        }

        let existed = self.store.delete(key).await?;
        tracing::info!(kind = E::KIND, id = %key, existed, "Record deleted");
        Ok(())
    }

    async fn load(&self, key: &KeyOf<E>) -> AppResult<E::Record> {
        self.store
            .get(key)
            .await?
            .ok_or_else(|| AppError::not_found(E::KIND, key))
    }

    async fn assemble(&self, record: E::Record) -> AppResult<E::Dto> {
        let mut dto = E::shell(record);
        E::enrich(&mut dto, self.peers.as_ref(), &self.context).await?;
        Ok(dto)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::external::testing::RecordingPeers;
    use crate::external::Peer;
    use crate::models::{Favourite, FavouriteId};
    use crate::repositories::MemoryStore;
    use crate::services::favourite::{FavouriteDto, FavouriteEntity};
    use jiff::civil::{date, DateTime};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps a store and counts the calls that reach it.
    pub(crate) struct CountingStore<R: StoredRecord> {
        inner: MemoryStore<R>,
        pub puts: AtomicUsize,
        pub deletes: AtomicUsize,
    }

    impl<R: StoredRecord> CountingStore<R> {
        pub(crate) fn new(records: Vec<R>) -> Self {
            Self {
                inner: MemoryStore::with_records(records),
                puts: AtomicUsize::new(0),
                deletes: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl<R: StoredRecord> LocalStore<R> for CountingStore<R> {
        async fn get(&self, key: &R::Key) -> AppResult<Option<R>> {
            self.inner.get(key).await
        }

        async fn get_all(&self) -> AppResult<Vec<R>> {
            self.inner.get_all().await
        }

        async fn put(&self, record: R) -> AppResult<R> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.inner.put(record).await
        }

        async fn delete(&self, key: &R::Key) -> AppResult<bool> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(key).await
        }
    }

    fn t1() -> DateTime {
        date(2024, 1, 15).at(10, 30, 0, 0)
    }

    fn stored_favourite() -> Favourite {
        Favourite {
            user_id: 1,
            product_id: 1,
            like_date: t1(),
        }
    }

    fn known_peers() -> RecordingPeers {
        RecordingPeers::new()
            .with(Peer::UserService, 1, json!({"userId": 1, "firstName": "Ada"}))
            .with(Peer::ProductService, 1, json!({"productId": 1, "productTitle": "Lamp"}))
            .with(Peer::UserService, 2, json!({"userId": 2}))
            .with(Peer::ProductService, 2, json!({"productId": 2}))
    }

    fn service_with(
        records: Vec<Favourite>,
        peers: Arc<RecordingPeers>,
    ) -> (
        AggregationService<FavouriteEntity>,
        Arc<CountingStore<Favourite>>,
    ) {
        let store = Arc::new(CountingStore::new(records));
        let service = AggregationService::<FavouriteEntity>::new(store.clone(), peers);
        (service, store)
    }

    #[tokio::test]
    async fn test_find_by_id_enriches_user_then_product() {
        let peers = Arc::new(known_peers());
        let (service, _) = service_with(vec![stored_favourite()], peers.clone());

        let dto = service
            .find_by_id(&FavouriteId::new(1, 1, t1()))
            .await
            .unwrap();

        assert_eq!((dto.user_id, dto.product_id, dto.like_date), (1, 1, t1()));
        assert_eq!(dto.user.as_ref().map(|u| u.user_id), Some(1));
        assert_eq!(dto.product.as_ref().map(|p| p.product_id), Some(1));
        assert_eq!(
            peers.calls(),
            vec![(Peer::UserService, 1), (Peer::ProductService, 1)]
        );
    }

    #[tokio::test]
    async fn test_absent_key_is_not_found_without_peer_calls() {
        let peers = Arc::new(known_peers());
        let (service, _) = service_with(vec![stored_favourite()], peers.clone());
        let t2 = date(2024, 2, 1).at(8, 0, 0, 0);

        let err = service
            .find_by_id(&FavouriteId::new(2, 2, t2))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Favourite with id: {2,2,2024-02-01T08:00:00} not found"
        );
        assert!(peers.calls().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_over_one_record_matches_single_read() {
        let peers = Arc::new(known_peers());
        let (service, _) = service_with(vec![stored_favourite()], peers.clone());

        let all = service.find_all().await.unwrap();
        let single = service
            .find_by_id(&stored_favourite().id())
            .await
            .unwrap();

        assert_eq!(all, vec![single]);
    }

    #[tokio::test]
    async fn test_find_all_keeps_store_order_and_aborts_on_first_failure() {
        let second = Favourite {
            user_id: 2,
            product_id: 2,
            like_date: t1(),
        };
        let third = Favourite {
            user_id: 3,
            product_id: 1,
            like_date: t1(),
        };

        let peers = Arc::new(known_peers());
        let (service, _) = service_with(vec![second, stored_favourite()], peers.clone());
        let ids: Vec<i32> = service
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|d| d.user_id)
            .collect();
        assert_eq!(ids, vec![2, 1]);

        let peers = Arc::new(known_peers());
        let (service, _) = service_with(vec![third, stored_favourite()], peers.clone());
        let err = service.find_all().await.unwrap_err();
        assert!(matches!(err, AppError::PeerNotFound { .. }));
        // User 3 is unknown; nothing after it is fetched
        assert_eq!(peers.calls(), vec![(Peer::UserService, 3)]);
    }

    #[tokio::test]
    async fn test_unavailable_peer_fails_the_read() {
        let peers = Arc::new(known_peers().with_down(Peer::ProductService));
        let (service, _) = service_with(vec![stored_favourite()], peers.clone());

        let err = service
            .find_by_id(&stored_favourite().id())
            .await
            .unwrap_err();
        assert!(err.is_peer_failure());
        assert!(matches!(err, AppError::PeerUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_save_answers_with_live_enrichment() {
        let peers = Arc::new(known_peers());
        let (service, store) = service_with(vec![], peers.clone());

        let input = FavouriteDto {
            user_id: 2,
            product_id: 2,
            like_date: t1(),
            user: Some(serde_json::from_value(json!({"userId": 2, "firstName": "Stale"})).unwrap()),
            product: None,
        };

        let saved = service.save(input).await.unwrap();
        assert_eq!(saved.user.as_ref().and_then(|u| u.first_name.clone()), None);
        assert_eq!(saved.product.as_ref().map(|p| p.product_id), Some(2));
        assert_eq!(store.puts.load(Ordering::SeqCst), 1);

        let found = service
            .find_by_id(&FavouriteId::new(2, 2, t1()))
            .await
            .unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_unchecked_delete_of_absent_key_still_deletes() {
        let peers = Arc::new(known_peers());
        let (service, store) = service_with(vec![], peers.clone());
        assert_eq!(service.delete_policy(), DeletePolicy::Unchecked);

        service
            .delete_by_id(&FavouriteId::new(9, 9, t1()))
            .await
            .unwrap();
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_checked_delete_of_absent_key_is_not_found() {
        let peers = Arc::new(known_peers());
        let (service, store) = service_with(vec![], peers.clone());
        let service = service.with_policy(KindPolicy {
            update: None,
            delete: Some(DeletePolicy::Checked),
        });

        let err = service
            .delete_by_id(&FavouriteId::new(9, 9, t1()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
        assert!(peers.calls().is_empty());
    }

    #[tokio::test]
    async fn test_checked_update_of_absent_key_writes_nothing() {
        let peers = Arc::new(known_peers());
        let (service, store) = service_with(vec![], peers.clone());
        let service = service.with_policy(KindPolicy {
            update: Some(UpdatePolicy::Checked),
            delete: None,
        });
        assert_eq!(service.delete_policy(), DeletePolicy::Unchecked);

        let dto = FavouriteEntity::shell(stored_favourite());
        let err = service.update(dto).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(store.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unchecked_update_behaves_as_save() {
        let peers = Arc::new(known_peers());
        let (service, store) = service_with(vec![], peers.clone());

        let dto = FavouriteEntity::shell(stored_favourite());
        let updated = service.update(dto).await.unwrap();

        assert_eq!(updated.user_id, 1);
        assert_eq!(store.puts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_update_existing_checks_even_under_unchecked_policy() {
        let peers = Arc::new(known_peers());
        let (service, store) = service_with(vec![], peers.clone());
        assert_eq!(service.update_policy(), UpdatePolicy::Unchecked);

        let dto = FavouriteEntity::shell(stored_favourite());
        let err = service.update_existing(dto.clone()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(store.puts.load(Ordering::SeqCst), 0);

        service.save(dto.clone()).await.unwrap();
        let replaced = service.update_existing(dto).await.unwrap();
        assert_eq!(replaced.user_id, 1);
        assert_eq!(store.puts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_nested_absence_names_the_nested_kind() {
        let store = MemoryStore::with_records([stored_favourite()]);

        let found = nested::<Favourite>(&store, "Favourite", &stored_favourite().id())
            .await
            .unwrap();
        assert_eq!(found, stored_favourite());

        let err = nested::<Favourite>(&store, "Favourite", &FavouriteId::new(4, 4, t1()))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Favourite with id: {4,4,2024-01-15T10:30:00} not found"
        );
    }
}
