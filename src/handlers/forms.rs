use serde::Deserialize;

use crate::errors::ServiceError;
use crate::models::{NewSeed, Seed, SeedChanges};

/// Raw form body for the add and update pages. Every field is kept as text
/// so a bad submission can be echoed back into the form unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedForm {
    #[serde(default)]
    pub seed_name: String,
    #[serde(default)]
    pub seed_type: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub status: String,
}

impl SeedForm {
    pub fn to_new_seed(&self) -> Result<NewSeed, ServiceError> {
        Ok(NewSeed::new(
            self.seed_name.trim(),
            self.seed_type.trim(),
            parse_quantity(&self.quantity)?,
            self.supplier.trim(),
            self.status.trim(),
        ))
    }

    /// The update page always submits all four mutable fields.
    pub fn to_changes(&self) -> Result<SeedChanges, ServiceError> {
        Ok(SeedChanges {
            seed_type: Some(self.seed_type.trim().to_string()),
            quantity: Some(parse_quantity(&self.quantity)?),
            supplier: Some(self.supplier.trim().to_string()),
            status: Some(self.status.trim().to_string()),
        })
    }
}

impl From<&Seed> for SeedForm {
    fn from(seed: &Seed) -> Self {
        Self {
            seed_name: seed.name.clone(),
            seed_type: seed.seed_type.clone(),
            quantity: seed.quantity.to_string(),
            supplier: seed.supplier.clone(),
            status: seed.status.clone(),
        }
    }
}

/// Coerces the quantity field to a non-negative whole number.
pub fn parse_quantity(raw: &str) -> Result<i32, ServiceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ServiceError::ValidationError(
            "quantity is required".to_string(),
        ));
    }

    let value: i64 = raw.parse().map_err(|_| {
        ServiceError::ValidationError(format!("quantity must be a whole number, got {:?}", raw))
    })?;

    if value < 0 {
        return Err(ServiceError::ValidationError(
            "quantity must not be negative".to_string(),
        ));
    }

    i32::try_from(value)
        .map_err(|_| ServiceError::ValidationError("quantity is too large".to_string()))
}
