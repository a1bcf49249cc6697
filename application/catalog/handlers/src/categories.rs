use catalog_commands::{
    CreateCategoryCommand, CreateChildCategoryCommand, DeleteCategoryCommand,
    UpdateCategoryCommand,
};
use catalog_dao::CategoryDao;
use catalog_errors::CatalogError;
use catalog_models::Category;
use database_traits::dao::GenericDao;
use product_cache::ProductCache;
use sql_connection::SqlConnect;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct ListCategoriesHandler {
    category_dao: CategoryDao,
}

impl ListCategoriesHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            category_dao: CategoryDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<Category>, CatalogError> {
        self.category_dao.all().await
    }
}

#[derive(Clone)]
pub struct ListParentCategoriesHandler {
    category_dao: CategoryDao,
}

impl ListParentCategoriesHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            category_dao: CategoryDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<Category>, CatalogError> {
        self.category_dao.parents().await
    }
}

#[derive(Clone)]
pub struct GetCategoryHandler {
    category_dao: CategoryDao,
}

impl GetCategoryHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            category_dao: CategoryDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, category_id: i64,
    ) -> Result<Category, CatalogError> {
        self.category_dao.find_by_id(category_id).await
    }
}

#[derive(Clone)]
pub struct CreateCategoryHandler {
    category_dao: CategoryDao,
}

impl CreateCategoryHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            category_dao: CategoryDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateCategoryCommand,
    ) -> Result<Category, CatalogError> {
        command.validate().map_err(CatalogError::validation)?;

        let category = self.category_dao.create(command.into()).await?;
        info!(category_id = category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(self))]
    pub async fn execute_child(
        &self, command: CreateChildCategoryCommand,
    ) -> Result<Category, CatalogError> {
        command.validate().map_err(CatalogError::validation)?;

        let category = self.category_dao.create(command.into()).await?;
        info!(
            category_id = category.id,
            parent_category_id = ?category.parent_category_id,
            "Child category created"
        );
        Ok(category)
    }
}

#[derive(Clone)]
pub struct UpdateCategoryHandler {
    category_dao: CategoryDao,
}

impl UpdateCategoryHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            category_dao: CategoryDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: UpdateCategoryCommand,
    ) -> Result<Category, CatalogError> {
        command.validate().map_err(CatalogError::validation)?;

        self.category_dao.update(command.category_id, command).await
    }
}

/// Deleting a category removes its products, so the product cache is
/// flushed afterwards.
#[derive(Clone)]
pub struct DeleteCategoryHandler {
    category_dao: CategoryDao,
    cache: ProductCache,
}

impl DeleteCategoryHandler {
    pub fn new(db: SqlConnect, cache: ProductCache) -> Self {
        Self {
            category_dao: CategoryDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteCategoryCommand,
    ) -> Result<(), CatalogError> {
        self.category_dao.delete(command.category_id).await?;
        info!(category_id = command.category_id, "Category deleted");

        self.cache.invalidate_all().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use redis_connection::Memory;
    use sql_connection::build_pool;

    use super::*;

    // The pool connects lazily; these tests fail before any checkout.
    fn unreachable_db() -> SqlConnect {
        SqlConnect::new(
            build_pool("postgresql://nobody@127.0.0.1:1/none", Some(1))
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn invalid_category_is_rejected_before_the_store() {
        let handler = CreateCategoryHandler::new(unreachable_db());

        let err = handler
            .execute(CreateCategoryCommand {
                name: "Kitchen".into(),
                num_category: -2,
                is_active: true,
                icon_image_link: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation {
            field: "num_category",
            ..
        }));
    }

    #[tokio::test]
    async fn blank_update_name_is_rejected() {
        let handler = UpdateCategoryHandler::new(unreachable_db());

        let err = handler
            .execute(UpdateCategoryCommand {
                category_id: 1,
                name: Some(" ".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation { field: "name", .. }));
    }

    #[tokio::test]
    async fn unreachable_store_is_an_infrastructure_error() {
        let cache = ProductCache::new(Arc::new(Memory::default()));
        let handler = DeleteCategoryHandler::new(unreachable_db(), cache);

        let err = handler
            .execute(DeleteCategoryCommand { category_id: 1 })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::DatabasePool(_)));
    }
}
