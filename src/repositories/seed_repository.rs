use async_trait::async_trait;
use chrono::Utc;
use metrics::counter;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::entities::seed::{self, ActiveModel as SeedActiveModel, Column, Entity as SeedEntity};
use crate::errors::ServiceError;
use crate::models::{next_display_id, NewSeed, Seed, SeedChanges};
use crate::repositories::SeedRepository;

/// How many times `create` re-reads the latest display id after losing an
/// insert race on the unique `seed_id` index. Creates in this process are
/// serialized, so only writers in other processes can cause a retry.
pub const DISPLAY_ID_MAX_ATTEMPTS: u32 = 8;

/// Seed repository backed by a SeaORM connection
#[derive(Debug, Clone)]
pub struct SeaOrmSeedRepository {
    db: Arc<DatabaseConnection>,
    // Held from reading the latest display id until the insert commits.
    allocation: Arc<Mutex<()>>,
}

impl SeaOrmSeedRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            allocation: Arc::new(Mutex::new(())),
        }
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Next display id, derived from the row with the highest internal id.
    async fn next_display_id(&self) -> Result<String, ServiceError> {
        let latest = SeedEntity::find()
            .order_by_desc(Column::Id)
            .one(self.get_db())
            .await?;

        next_display_id(latest.as_ref().map(|model| model.seed_id.as_str()))
    }

    async fn find_model(&self, internal_id: i32) -> Result<seed::Model, ServiceError> {
        SeedEntity::find_by_id(internal_id)
            .one(self.get_db())
            .await?
            .ok_or_else(|| ServiceError::not_found("Seed", internal_id))
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl SeedRepository for SeaOrmSeedRepository {
    #[instrument(skip(self, new_seed), fields(name = %new_seed.name))]
    async fn create(&self, new_seed: NewSeed) -> Result<Seed, ServiceError> {
        new_seed.validate()?;

        let _allocation = self.allocation.lock().await;
        for attempt in 1..=DISPLAY_ID_MAX_ATTEMPTS {
            let display_id = self.next_display_id().await?;

            let active = SeedActiveModel {
                id: NotSet,
                seed_id: Set(display_id.clone()),
                seed_name: Set(new_seed.name.clone()),
                seed_type: Set(new_seed.seed_type.clone()),
                quantity: Set(new_seed.quantity),
                supplier: Set(new_seed.supplier.clone()),
                status: Set(new_seed.status.clone()),
                date_added: Set(Utc::now()),
            };

            match active.insert(self.get_db()).await {
                Ok(model) => {
                    counter!("seed_inventory.seeds.created", 1);
                    info!(internal_id = model.id, display_id = %model.seed_id, "Seed created");
                    return Ok(model.into());
                }
                Err(err) if is_unique_violation(&err) => {
                    counter!("seed_inventory.display_id.retries", 1);
                    warn!(attempt, display_id = %display_id, "Display id already taken, retrying");
                }
                Err(err) => return Err(ServiceError::DatabaseError(err)),
            }
        }

        Err(ServiceError::Conflict(format!(
            "could not allocate a unique display id after {} attempts",
            DISPLAY_ID_MAX_ATTEMPTS
        )))
    }

    #[instrument(skip(self))]
    async fn get(&self, internal_id: i32) -> Result<Seed, ServiceError> {
        self.find_model(internal_id).await.map(Seed::from)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, internal_id: i32, changes: SeedChanges) -> Result<Seed, ServiceError> {
        changes.validate()?;

        let existing = self.find_model(internal_id).await?;
        if changes.is_empty() {
            return Ok(existing.into());
        }

        let mut active: SeedActiveModel = existing.into();
        if let Some(seed_type) = changes.seed_type {
            active.seed_type = Set(seed_type);
        }
        if let Some(quantity) = changes.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(supplier) = changes.supplier {
            active.supplier = Set(supplier);
        }
        if let Some(status) = changes.status {
            active.status = Set(status);
        }

        // The row can vanish between the read and the write.
        let updated = active.update(self.get_db()).await.map_err(|err| match err {
            DbErr::RecordNotUpdated => ServiceError::not_found("Seed", internal_id),
            other => ServiceError::DatabaseError(other),
        })?;
        counter!("seed_inventory.seeds.updated", 1);
        info!(internal_id, display_id = %updated.seed_id, "Seed updated");

        Ok(updated.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, internal_id: i32) -> Result<(), ServiceError> {
        let result = SeedEntity::delete_by_id(internal_id)
            .exec(self.get_db())
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Seed", internal_id));
        }

        counter!("seed_inventory.seeds.deleted", 1);
        info!(internal_id, "Seed deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Seed>, ServiceError> {
        let models = SeedEntity::find()
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?;

        Ok(models.into_iter().map(Seed::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self, status: &str) -> Result<u64, ServiceError> {
        let count = SeedEntity::find()
            .filter(Column::Status.eq(status))
            .count(self.get_db())
            .await?;
        Ok(count)
    }

    async fn count_all(&self) -> Result<u64, ServiceError> {
        Ok(SeedEntity::find().count(self.get_db()).await?)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        crate::db::check_connection(self.get_db()).await
    }
}
