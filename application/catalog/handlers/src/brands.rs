use catalog_commands::{
    CreateBrandCommand, DeleteBrandCommand, UpdateBrandCommand,
};
use catalog_dao::BrandDao;
use catalog_errors::CatalogError;
use catalog_models::Brand;
use database_traits::dao::GenericDao;
use sql_connection::SqlConnect;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct ListBrandsHandler {
    brand_dao: BrandDao,
}

impl ListBrandsHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            brand_dao: BrandDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<Brand>, CatalogError> {
        self.brand_dao.all().await
    }
}

#[derive(Clone)]
pub struct GetBrandHandler {
    brand_dao: BrandDao,
}

impl GetBrandHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            brand_dao: BrandDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, brand_id: i64) -> Result<Brand, CatalogError> {
        self.brand_dao.find_by_id(brand_id).await
    }
}

#[derive(Clone)]
pub struct CreateBrandHandler {
    brand_dao: BrandDao,
}

impl CreateBrandHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            brand_dao: BrandDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateBrandCommand,
    ) -> Result<Brand, CatalogError> {
        command.validate().map_err(CatalogError::validation)?;

        let brand = self.brand_dao.create(command).await?;
        info!(brand_id = brand.id, "Brand created");
        Ok(brand)
    }
}

#[derive(Clone)]
pub struct UpdateBrandHandler {
    brand_dao: BrandDao,
}

impl UpdateBrandHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            brand_dao: BrandDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: UpdateBrandCommand,
    ) -> Result<Brand, CatalogError> {
        command.validate().map_err(CatalogError::validation)?;

        self.brand_dao.update(command.brand_id, command).await
    }
}

#[derive(Clone)]
pub struct DeleteBrandHandler {
    brand_dao: BrandDao,
}

impl DeleteBrandHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            brand_dao: BrandDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteBrandCommand,
    ) -> Result<(), CatalogError> {
        self.brand_dao.delete(command.brand_id).await?;
        info!(brand_id = command.brand_id, "Brand deleted");
        Ok(())
    }
}
