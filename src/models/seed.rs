use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entities::seed;

pub const STATUS_AVAILABLE: &str = "Available";
pub const STATUS_LOW_STOCK: &str = "Low Stock";
pub const STATUS_EXPIRED: &str = "Expired";

/// Statuses counted by the summary view. Anything else is stored and listed
/// but not counted.
pub const TRACKED_STATUSES: [&str; 3] = [STATUS_AVAILABLE, STATUS_LOW_STOCK, STATUS_EXPIRED];

/// A stored seed stock record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    pub internal_id: i32,
    pub display_id: String,
    pub name: String,
    pub seed_type: String,
    pub quantity: i32,
    pub supplier: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<seed::Model> for Seed {
    fn from(model: seed::Model) -> Self {
        Self {
            internal_id: model.id,
            display_id: model.seed_id,
            name: model.seed_name,
            seed_type: model.seed_type,
            quantity: model.quantity,
            supplier: model.supplier,
            status: model.status,
            created_at: model.date_added,
        }
    }
}

/// Input for creating a seed. Identifiers and timestamp are assigned on insert.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Validate)]
pub struct NewSeed {
    #[validate(custom = "not_blank")]
    pub name: String,
    #[validate(custom = "not_blank")]
    pub seed_type: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity: i32,
    #[validate(custom = "not_blank")]
    pub supplier: String,
    #[validate(custom = "not_blank")]
    pub status: String,
}

impl NewSeed {
    pub fn new(
        name: impl Into<String>,
        seed_type: impl Into<String>,
        quantity: i32,
        supplier: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            seed_type: seed_type.into(),
            quantity,
            supplier: supplier.into(),
            status: status.into(),
        }
    }
}

/// Replacement values for the mutable fields. `None` leaves a field as is;
/// the name is deliberately not part of this set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct SeedChanges {
    #[validate(custom = "not_blank")]
    pub seed_type: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity: Option<i32>,
    #[validate(custom = "not_blank")]
    pub supplier: Option<String>,
    #[validate(custom = "not_blank")]
    pub status: Option<String>,
}

impl SeedChanges {
    pub fn is_empty(&self) -> bool {
        self.seed_type.is_none()
            && self.quantity.is_none()
            && self.supplier.is_none()
            && self.status.is_none()
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Counts shown on the status page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub available: u64,
    pub low_stock: u64,
    pub expired: u64,
    pub total: u64,
}

impl StatusSummary {
    pub fn tracked(&self) -> u64 {
        self.available + self.low_stock + self.expired
    }

    /// Rows whose status is none of the tracked ones.
    pub fn other(&self) -> u64 {
        self.total.saturating_sub(self.tracked())
    }
}
