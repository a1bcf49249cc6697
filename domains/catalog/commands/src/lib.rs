use catalog_models::NewCategory;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// First rule a command breaks, as `(field, message)`.
pub type ValidationFailure = (&'static str, &'static str);

fn check_partial(
    name: Option<&str>, count: Option<i32>, count_field: &'static str,
) -> Result<(), ValidationFailure> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(("name", "must not be empty"));
    }
    if count.is_some_and(|c| c < 0) {
        return Err((count_field, "must not be negative"));
    }
    Ok(())
}

fn check(
    name: &str, count: i32, count_field: &'static str,
) -> Result<(), ValidationFailure> {
    check_partial(Some(name), Some(count), count_field)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryCommand {
    pub name: String,
    #[serde(default)]
    pub num_category: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub icon_image_link: String,
}

impl CreateCategoryCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        check(&self.name, self.num_category, "num_category")
    }
}

impl From<CreateCategoryCommand> for NewCategory {
    fn from(cmd: CreateCategoryCommand) -> Self {
        Self {
            name: cmd.name,
            num_category: cmd.num_category,
            is_active: cmd.is_active,
            icon_image_link: cmd.icon_image_link,
            parent_category_id: None,
        }
    }
}

/// A category nested under an existing one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateChildCategoryCommand {
    #[serde(flatten)]
    pub category: CreateCategoryCommand,
    pub parent_category_id: i64,
}

impl CreateChildCategoryCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        self.category.validate()
    }
}

impl From<CreateChildCategoryCommand> for NewCategory {
    fn from(cmd: CreateChildCategoryCommand) -> Self {
        Self {
            parent_category_id: Some(cmd.parent_category_id),
            ..cmd.category.into()
        }
    }
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCategoryCommand {
    #[serde(skip)]
    pub category_id: i64,
    pub name: Option<String>,
    pub num_category: Option<i32>,
    pub is_active: Option<bool>,
    pub icon_image_link: Option<String>,
}

impl UpdateCategoryCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        check_partial(
            self.name.as_deref(),
            self.num_category,
            "num_category",
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteCategoryCommand {
    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBrandCommand {
    pub name: String,
    #[serde(default)]
    pub num_brand: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub image_link: String,
}

impl CreateBrandCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        check(&self.name, self.num_brand, "num_brand")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBrandCommand {
    #[serde(skip)]
    pub brand_id: i64,
    pub name: Option<String>,
    pub num_brand: Option<i32>,
    pub is_active: Option<bool>,
    pub image_link: Option<String>,
}

impl UpdateBrandCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        check_partial(self.name.as_deref(), self.num_brand, "num_brand")
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteBrandCommand {
    pub brand_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_counts_are_rejected() {
        let cmd = CreateCategoryCommand {
            name: "Kitchen".into(),
            num_category: -1,
            is_active: true,
            icon_image_link: String::new(),
        };
        assert_eq!(cmd.validate(), Err(("num_category", "must not be negative")));

        let cmd = CreateBrandCommand {
            name: "Acme".into(),
            num_brand: -3,
            is_active: false,
            image_link: String::new(),
        };
        assert_eq!(cmd.validate(), Err(("num_brand", "must not be negative")));
    }

    #[test]
    fn partial_updates_check_only_given_fields() {
        assert!(UpdateBrandCommand::default().validate().is_ok());

        let cmd = UpdateCategoryCommand {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(cmd.validate(), Err(("name", "must not be empty")));
    }

    #[test]
    fn child_body_carries_parent() {
        let cmd: CreateChildCategoryCommand = serde_json::from_str(
            r#"{"name":"Kettles","parent_category_id":4}"#,
        )
        .unwrap();

        assert_eq!(cmd.parent_category_id, 4);
        assert_eq!(cmd.category.num_category, 0);
        assert!(cmd.validate().is_ok());
    }
}
