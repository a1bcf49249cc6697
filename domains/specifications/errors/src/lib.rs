use common_errors::AppError;
use sql_connection::{PgError, PoolError as DbPoolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecificationError {
    #[error("Specification not found: {specification_id}")]
    SpecificationNotFound { specification_id: i64 },
    #[error("Product specification not found: {product_specification_id}")]
    ProductSpecificationNotFound { product_specification_id: i64 },
    #[error("Category with id {category_id} does not exist")]
    UnknownCategory { category_id: i64 },
    #[error("Product with id {product_id} does not exist")]
    UnknownProduct { product_id: i64 },
    #[error("Specification with id {specification_id} does not exist")]
    UnknownSpecification { specification_id: i64 },
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
    #[error("Database error: {0}")]
    Database(#[from] PgError),
    #[error("Database Pool error: {0}")]
    DatabasePool(#[from] DbPoolError),
}

impl SpecificationError {
    pub fn validation((field, message): (&'static str, &'static str)) -> Self {
        Self::Validation { field, message }
    }
}

impl From<SpecificationError> for AppError {
    fn from(err: SpecificationError) -> Self {
        match err {
            SpecificationError::SpecificationNotFound { specification_id } => {
                AppError::not_found(
                    "SPECIFICATION_NOT_FOUND",
                    &format!("Specification with ID {specification_id} not found"),
                )
            }
            SpecificationError::ProductSpecificationNotFound {
                product_specification_id,
            } => AppError::not_found(
                "PRODUCT_SPECIFICATION_NOT_FOUND",
                &format!(
                    "Product specification with ID {product_specification_id} \
                     not found"
                ),
            ),
            SpecificationError::UnknownCategory { category_id } => {
                AppError::bad_request(
                    "CATEGORY_NOT_FOUND",
                    &format!("Category with id {category_id} does not exist."),
                )
            }
            SpecificationError::UnknownProduct { product_id } => {
                AppError::bad_request(
                    "PRODUCT_NOT_FOUND",
                    &format!("Product with id {product_id} does not exist."),
                )
            }
            SpecificationError::UnknownSpecification { specification_id } => {
                AppError::bad_request(
                    "SPECIFICATION_NOT_FOUND",
                    &format!(
                        "Specification with id {specification_id} does not \
                         exist."
                    ),
                )
            }
            SpecificationError::Validation { field, message } => {
                AppError::bad_request_with_details(
                    "VALIDATION_ERROR",
                    &format!("Invalid value for '{field}'"),
                    message,
                )
            }
            SpecificationError::Database(db_err) => {
                AppError::internal_server_error(&format!(
                    "Database error: {db_err}"
                ))
            }
            SpecificationError::DatabasePool(pool_err) => {
                AppError::internal_server_error(&format!(
                    "Database connection error: {pool_err}"
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_references_are_client_errors() {
        let err: AppError =
            SpecificationError::UnknownProduct { product_id: 7 }.into();
        assert_eq!(err.status_code().as_u16(), 400);
        assert_eq!(err.code(), "PRODUCT_NOT_FOUND");
    }

    #[test]
    fn missing_rows_are_not_found() {
        let err: AppError = SpecificationError::ProductSpecificationNotFound {
            product_specification_id: 4,
        }
        .into();
        assert_eq!(err.status_code().as_u16(), 404);
    }
}
