use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::models::{
    NewSeed, Seed, SeedChanges, StatusSummary, STATUS_AVAILABLE, STATUS_EXPIRED, STATUS_LOW_STOCK,
};

pub mod seed_repository;

pub use seed_repository::SeaOrmSeedRepository;

/// Storage capabilities the web layer relies on. Handlers only see this
/// trait, never the connection behind it.
#[async_trait]
pub trait SeedRepository: Send + Sync {
    /// Validates and inserts a seed, assigning the next display id.
    async fn create(&self, new_seed: NewSeed) -> Result<Seed, ServiceError>;

    async fn get(&self, internal_id: i32) -> Result<Seed, ServiceError>;

    /// Applies the provided mutable fields. Name, identifiers and creation
    /// time are never touched.
    async fn update(&self, internal_id: i32, changes: SeedChanges) -> Result<Seed, ServiceError>;

    /// Hard delete. Fails with `NotFound` when nothing was removed, including
    /// on a repeated delete of the same id.
    async fn delete(&self, internal_id: i32) -> Result<(), ServiceError>;

    /// All seeds in internal id order.
    async fn list_all(&self) -> Result<Vec<Seed>, ServiceError>;

    /// Exact, case-sensitive status match.
    async fn count_by_status(&self, status: &str) -> Result<u64, ServiceError>;

    async fn count_all(&self) -> Result<u64, ServiceError>;

    /// Cheap liveness probe of the backing store.
    async fn ping(&self) -> Result<(), ServiceError>;

    async fn status_summary(&self) -> Result<StatusSummary, ServiceError> {
        Ok(StatusSummary {
            available: self.count_by_status(STATUS_AVAILABLE).await?,
            low_stock: self.count_by_status(STATUS_LOW_STOCK).await?,
            expired: self.count_by_status(STATUS_EXPIRED).await?,
            total: self.count_all().await?,
        })
    }
}
