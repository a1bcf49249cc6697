use common_errors::AppError;
use product_models::PaginationError;
use redis_connection::CacheError;
use sql_connection::{PgError, PoolError as DbPoolError};
use thiserror::Error;

/// A cached product hash that could not be turned back into a product.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("cached product is missing field `{0}`")]
    MissingField(&'static str),
    #[error("cached field `{field}` has unparsable value `{value}`")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {product_id}")]
    NotFound { product_id: i64 },
    #[error("Category with id {category_id} does not exist.")]
    CategoryNotFound { category_id: i64 },
    #[error("Brand with id {brand_id} does not exist.")]
    BrandNotFound { brand_id: i64 },
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
    #[error("Invalid pagination: {0}")]
    InvalidPagination(#[from] PaginationError),
    #[error("Database error: {0}")]
    Database(#[from] PgError),
    #[error("Database Pool error: {0}")]
    DatabasePool(#[from] DbPoolError),
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    #[error("Cache codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ProductError {
    pub fn validation((field, message): (&'static str, &'static str)) -> Self {
        Self::Validation { field, message }
    }

    /// Store, pool, cache and codec failures, as opposed to client errors.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::DatabasePool(_)
                | Self::Cache(_)
                | Self::Codec(_)
        )
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound { product_id } => {
                AppError::not_found(
                    "PRODUCT_NOT_FOUND",
                    &format!("Product with ID {product_id} not found"),
                )
            }
            ProductError::CategoryNotFound { category_id } => {
                AppError::bad_request(
                    "CATEGORY_NOT_FOUND",
                    &format!("Category with id {category_id} does not exist."),
                )
            }
            ProductError::BrandNotFound { brand_id } => {
                AppError::bad_request(
                    "BRAND_NOT_FOUND",
                    &format!("Brand with id {brand_id} does not exist."),
                )
            }
            ProductError::Validation { field, message } => {
                AppError::bad_request_with_details(
                    "VALIDATION_ERROR",
                    &format!("Invalid value for '{field}'"),
                    message,
                )
            }
            ProductError::InvalidPagination(pagination_err) => {
                AppError::bad_request(
                    "INVALID_PAGINATION",
                    &pagination_err.to_string(),
                )
            }
            ProductError::Database(db_err) => {
                AppError::internal_server_error(&format!(
                    "Database error: {db_err}"
                ))
            }
            ProductError::DatabasePool(pool_err) => {
                AppError::internal_server_error(&format!(
                    "Database connection error: {pool_err}"
                ))
            }
            ProductError::Cache(cache_err) => {
                AppError::internal_server_error(&format!(
                    "Cache error: {cache_err}"
                ))
            }
            ProductError::Codec(codec_err) => {
                AppError::internal_server_error(&format!(
                    "Cache error: {codec_err}"
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        let err: AppError = ProductError::NotFound { product_id: 9 }.into();
        assert_eq!(err.status_code().as_u16(), 404);
        assert_eq!(err.code(), "PRODUCT_NOT_FOUND");

        let err: AppError =
            ProductError::CategoryNotFound { category_id: 4 }.into();
        assert_eq!(err.status_code().as_u16(), 400);

        let err: AppError =
            ProductError::validation(("price", "must not be negative")).into();
        assert_eq!(err.status_code().as_u16(), 400);
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err: AppError =
            ProductError::from(PaginationError::PageSize(0)).into();
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[test]
    fn infrastructure_errors_map_to_500() {
        let err = ProductError::from(CacheError::Unavailable("down".into()));
        assert!(err.is_infrastructure());

        let app: AppError = err.into();
        assert_eq!(app.status_code().as_u16(), 500);
        assert_eq!(app.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn missing_reference_message() {
        let err = ProductError::CategoryNotFound { category_id: 12 };
        assert_eq!(err.to_string(), "Category with id 12 does not exist.");
    }
}
