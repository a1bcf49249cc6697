use product_models::{NewProduct, ProductChanges};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductCommand {
    pub category_id: i64,
    pub brand_id: i64,
    pub author_id: i64,
    pub name: String,
    pub model_name: String,
    pub search_string: String,
    pub price: i64,
    #[serde(default)]
    pub num_product: i32,
    pub discount: i32,
    pub image_link: String,
    #[serde(default)]
    pub is_super: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default = "active_default")]
    pub is_active: bool,
}

fn active_default() -> bool { true }

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductCommand {
    #[serde(skip)]
    pub product_id: i64,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub author_id: Option<i64>,
    pub name: Option<String>,
    pub model_name: Option<String>,
    pub search_string: Option<String>,
    pub price: Option<i64>,
    pub num_product: Option<i32>,
    pub discount: Option<i32>,
    pub image_link: Option<String>,
    pub is_super: Option<bool>,
    pub is_new: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteProductCommand {
    pub product_id: i64,
}

/// First rule a command breaks, as `(field, message)`.
pub type ValidationFailure = (&'static str, &'static str);

fn check_non_negative(
    field: &'static str, value: Option<i64>,
) -> Result<(), ValidationFailure> {
    match value {
        Some(v) if v < 0 => Err((field, "must not be negative")),
        _ => Ok(()),
    }
}

fn check_name(name: Option<&str>) -> Result<(), ValidationFailure> {
    match name {
        Some(n) if n.trim().is_empty() => Err(("name", "must not be empty")),
        _ => Ok(()),
    }
}

impl CreateProductCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        check_name(Some(&self.name))?;
        check_non_negative("price", Some(self.price))?;
        check_non_negative("num_product", Some(self.num_product.into()))?;
        check_non_negative("discount", Some(self.discount.into()))
    }
}

impl From<CreateProductCommand> for NewProduct {
    fn from(cmd: CreateProductCommand) -> Self {
        Self {
            category_id: cmd.category_id,
            brand_id: cmd.brand_id,
            author_id: cmd.author_id,
            name: cmd.name,
            model_name: cmd.model_name,
            search_string: cmd.search_string,
            price: cmd.price,
            num_product: cmd.num_product,
            discount: cmd.discount,
            image_link: cmd.image_link,
            is_super: cmd.is_super,
            is_new: cmd.is_new,
            is_active: cmd.is_active,
        }
    }
}

impl UpdateProductCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        check_name(self.name.as_deref())?;
        check_non_negative("price", self.price)?;
        check_non_negative("num_product", self.num_product.map(i64::from))?;
        check_non_negative("discount", self.discount.map(i64::from))
    }
}

impl From<UpdateProductCommand> for ProductChanges {
    fn from(cmd: UpdateProductCommand) -> Self {
        Self {
            category_id: cmd.category_id,
            brand_id: cmd.brand_id,
            author_id: cmd.author_id,
            name: cmd.name,
            model_name: cmd.model_name,
            search_string: cmd.search_string,
            price: cmd.price,
            num_product: cmd.num_product,
            discount: cmd.discount,
            image_link: cmd.image_link,
            is_super: cmd.is_super,
            is_new: cmd.is_new,
            is_active: cmd.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateProductCommand {
        CreateProductCommand {
            category_id: 10,
            brand_id: 1,
            author_id: 1,
            name: "Kettle".into(),
            model_name: "K-2".into(),
            search_string: "kettle steel".into(),
            price: 40,
            num_product: 3,
            discount: 0,
            image_link: "kettle.png".into(),
            is_super: false,
            is_new: false,
            is_active: true,
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(create().validate().is_ok());
    }

    #[test]
    fn negative_counts_are_rejected() {
        let cmd = CreateProductCommand {
            num_product: -1,
            ..create()
        };
        assert_eq!(cmd.validate(), Err(("num_product", "must not be negative")));

        let cmd = UpdateProductCommand {
            price: Some(-5),
            ..Default::default()
        };
        assert_eq!(cmd.validate(), Err(("price", "must not be negative")));
    }

    #[test]
    fn blank_name_is_rejected() {
        let cmd = UpdateProductCommand {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(cmd.validate(), Err(("name", "must not be empty")));
        assert!(UpdateProductCommand::default().validate().is_ok());
    }

    #[test]
    fn create_body_defaults() {
        let cmd: CreateProductCommand = serde_json::from_str(
            r#"{"category_id":1,"brand_id":1,"author_id":1,"name":"n",
                "model_name":"m","search_string":"s","price":1,"discount":0,
                "image_link":"i"}"#,
        )
        .unwrap();

        assert!(cmd.is_active);
        assert!(!cmd.is_super);
        assert_eq!(cmd.num_product, 0);
    }
}
