use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub num_category: i32,
    pub is_active: bool,
    pub icon_image_link: String,
    /// `None` for top-level categories.
    pub parent_category_id: Option<i64>,
    pub date_created: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn is_parent(&self) -> bool { self.parent_category_id.is_none() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub num_brand: i32,
    pub is_active: bool,
    pub image_link: String,
    pub date_created: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub num_category: i32,
    pub is_active: bool,
    pub icon_image_link: String,
    pub parent_category_id: Option<i64>,
}
