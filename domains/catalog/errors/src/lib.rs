use common_errors::AppError;
use product_errors::ProductError;
use sql_connection::{PgError, PoolError as DbPoolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {category_id}")]
    CategoryNotFound { category_id: i64 },
    #[error("Parent category not found: {category_id}")]
    ParentNotFound { category_id: i64 },
    #[error("Brand not found: {brand_id}")]
    BrandNotFound { brand_id: i64 },
    #[error("Category with name {0} exists.")]
    CategoryNameExists(String),
    #[error("Brand with name {0} exists.")]
    BrandNameExists(String),
    #[error("Brand {brand_id} still has products")]
    BrandInUse { brand_id: i64 },
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
    #[error("Database error: {0}")]
    Database(#[from] PgError),
    #[error("Database Pool error: {0}")]
    DatabasePool(#[from] DbPoolError),
    /// Product cache invalidation after a cascading delete failed.
    #[error(transparent)]
    Products(#[from] ProductError),
}

impl CatalogError {
    pub fn validation((field, message): (&'static str, &'static str)) -> Self {
        Self::Validation { field, message }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound { category_id } => {
                AppError::not_found(
                    "CATEGORY_NOT_FOUND",
                    &format!("Category with ID {category_id} not found"),
                )
            }
            CatalogError::ParentNotFound { category_id } => {
                AppError::bad_request(
                    "CATEGORY_NOT_FOUND",
                    &format!("Category with id {category_id} does not exist."),
                )
            }
            CatalogError::BrandNotFound { brand_id } => {
                AppError::not_found(
                    "BRAND_NOT_FOUND",
                    &format!("Brand with ID {brand_id} not found"),
                )
            }
            CatalogError::CategoryNameExists(name) => {
                AppError::bad_request(
                    "CATEGORY_NAME_EXISTS",
                    &format!("Category with name {name} exists."),
                )
            }
            CatalogError::BrandNameExists(name) => {
                AppError::bad_request(
                    "BRAND_NAME_EXISTS",
                    &format!("Brand with name {name} exists."),
                )
            }
            CatalogError::BrandInUse { brand_id } => {
                AppError::bad_request(
                    "BRAND_IN_USE",
                    &format!(
                        "Brand with id {brand_id} is referenced by products"
                    ),
                )
            }
            CatalogError::Validation { field, message } => {
                AppError::bad_request_with_details(
                    "VALIDATION_ERROR",
                    &format!("Invalid value for '{field}'"),
                    message,
                )
            }
            CatalogError::Database(db_err) => {
                AppError::internal_server_error(&format!(
                    "Database error: {db_err}"
                ))
            }
            CatalogError::DatabasePool(pool_err) => {
                AppError::internal_server_error(&format!(
                    "Database connection error: {pool_err}"
                ))
            }
            CatalogError::Products(product_err) => product_err.into(),
        }
    }
}
