use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// First rule a command breaks, as `(field, message)`.
pub type ValidationFailure = (&'static str, &'static str);

const MAX_NAME_LEN: usize = 127;
const MAX_VALUE_LEN: usize = 63;

fn check_name(name: &str) -> Result<(), ValidationFailure> {
    if name.trim().is_empty() {
        return Err(("name", "must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(("name", "must be at most 127 characters"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSpecificationCommand {
    pub name: String,
    pub category_id: i64,
}

impl CreateSpecificationCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        check_name(&self.name)
    }
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSpecificationCommand {
    #[serde(skip)]
    pub specification_id: i64,
    pub name: Option<String>,
    pub category_id: Option<i64>,
}

impl UpdateSpecificationCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        match &self.name {
            Some(name) => check_name(name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteSpecificationCommand {
    pub specification_id: i64,
}

/// Body of both creating and replacing a product specification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSpecificationCommand {
    pub product_id: i64,
    pub specification_id: i64,
    pub value: String,
}

impl ProductSpecificationCommand {
    /// Values are free text; numeric ones must not be negative.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let value = self.value.trim();
        if value.is_empty() {
            return Err(("value", "must not be empty"));
        }
        if value.chars().count() > MAX_VALUE_LEN {
            return Err(("value", "must be at most 63 characters"));
        }
        if value.parse::<i64>().is_ok_and(|n| n < 0) {
            return Err(("value", "cannot be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteProductSpecificationCommand {
    pub product_specification_id: i64,
}
