use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named attribute that products of one category carry, such as "Volume".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Specification {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
}

/// The value one product has for one specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSpecification {
    pub id: i64,
    pub product_id: i64,
    pub specification_id: i64,
    pub value: String,
    pub date_created: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product's specification value joined with the specification name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSpecificationValue {
    /// Id of the product specification row.
    pub id: i64,
    pub name: String,
    pub value: String,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategorySpecification {
    pub id: i64,
    pub name: String,
}

impl From<Specification> for CategorySpecification {
    fn from(spec: Specification) -> Self {
        Self {
            id: spec.id,
            name: spec.name,
        }
    }
}
