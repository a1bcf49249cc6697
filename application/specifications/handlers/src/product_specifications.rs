use database_traits::dao::GenericDao;
use specification_commands::{
    DeleteProductSpecificationCommand, ProductSpecificationCommand,
};
use specification_dao::ProductSpecificationDao;
use specification_errors::SpecificationError;
use specification_models::{ProductSpecification, ProductSpecificationValue};
use sql_connection::SqlConnect;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct ListProductSpecificationsHandler {
    dao: ProductSpecificationDao,
}

impl ListProductSpecificationsHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            dao: ProductSpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
    ) -> Result<Vec<ProductSpecification>, SpecificationError> {
        self.dao.all().await
    }
}

#[derive(Clone)]
pub struct GetProductSpecificationHandler {
    dao: ProductSpecificationDao,
}

impl GetProductSpecificationHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            dao: ProductSpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, product_specification_id: i64,
    ) -> Result<ProductSpecification, SpecificationError> {
        self.dao.find_by_id(product_specification_id).await
    }
}

#[derive(Clone)]
pub struct ProductSpecificationValuesHandler {
    dao: ProductSpecificationDao,
}

impl ProductSpecificationValuesHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            dao: ProductSpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, product_id: i64,
    ) -> Result<Vec<ProductSpecificationValue>, SpecificationError> {
        self.dao.values_for_product(product_id).await
    }
}

#[derive(Clone)]
pub struct CreateProductSpecificationHandler {
    dao: ProductSpecificationDao,
}

impl CreateProductSpecificationHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            dao: ProductSpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: ProductSpecificationCommand,
    ) -> Result<ProductSpecification, SpecificationError> {
        command.validate().map_err(SpecificationError::validation)?;

        let created = self.dao.create(command).await?;
        info!(
            product_specification_id = created.id,
            product_id = created.product_id,
            "Product specification created"
        );
        Ok(created)
    }
}

#[derive(Clone)]
pub struct UpdateProductSpecificationHandler {
    dao: ProductSpecificationDao,
}

impl UpdateProductSpecificationHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            dao: ProductSpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, product_specification_id: i64,
        command: ProductSpecificationCommand,
    ) -> Result<ProductSpecification, SpecificationError> {
        command.validate().map_err(SpecificationError::validation)?;

        self.dao.update(product_specification_id, command).await
    }
}

#[derive(Clone)]
pub struct DeleteProductSpecificationHandler {
    dao: ProductSpecificationDao,
}

impl DeleteProductSpecificationHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            dao: ProductSpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteProductSpecificationCommand,
    ) -> Result<(), SpecificationError> {
        self.dao.delete(command.product_specification_id).await?;
        info!(
            product_specification_id = command.product_specification_id,
            "Product specification deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::unreachable_db;

    #[tokio::test]
    async fn negative_value_is_rejected_on_update() {
        let handler = UpdateProductSpecificationHandler::new(unreachable_db());

        let err = handler
            .execute(3, ProductSpecificationCommand {
                product_id: 1,
                specification_id: 2,
                value: "-4".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SpecificationError::Validation {
            field: "value",
            ..
        }));
    }

    #[tokio::test]
    async fn valid_value_reaches_the_store() {
        let handler = CreateProductSpecificationHandler::new(unreachable_db());

        let err = handler
            .execute(ProductSpecificationCommand {
                product_id: 1,
                specification_id: 2,
                value: "1.7 L".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SpecificationError::DatabasePool(_)));
    }
}
