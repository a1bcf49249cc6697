use common_errors::AppError;
use order_models::UnknownStatus;
use sql_connection::{PgError, PoolError as DbPoolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: i64 },
    #[error("Order with id {order_id} does not exist")]
    UnknownOrder { order_id: i64 },
    #[error("Product with id {product_id} does not exist")]
    UnknownProduct { product_id: i64 },
    #[error(transparent)]
    InvalidStatus(#[from] UnknownStatus),
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

impl OrderError {
    pub fn validation((field, message): (&'static str, &'static str)) -> Self {
        Self::Validation { field, message }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::OrderNotFound { order_id } => AppError::not_found(
                "ORDER_NOT_FOUND",
                &format!("Order with ID {order_id} not found"),
            ),
            OrderError::UnknownOrder { order_id } => AppError::bad_request(
                "ORDER_NOT_FOUND",
                &format!("Order with id {order_id} does not exist."),
            ),
            OrderError::UnknownProduct { product_id } => {
                AppError::bad_request(
                    "PRODUCT_NOT_FOUND",
                    &format!("Product with id {product_id} does not exist."),
                )
            }
            OrderError::InvalidStatus(unknown) => {
                AppError::bad_request("INVALID_STATUS", &unknown.to_string())
            }
            OrderError::Validation { field, message } => {
                AppError::bad_request_with_details(
                    "VALIDATION_ERROR",
                    &format!("Invalid value for '{field}'"),
                    message,
                )
            }
            OrderError::Database(db_err) => {
                AppError::internal_server_error(&format!(
                    "Database error: {db_err}"
                ))
            }
            OrderError::DatabasePool(pool_err) => {
                AppError::internal_server_error(&format!(
                    "Database connection error: {pool_err}"
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use order_models::OrderStatus;

    use super::*;

    #[test]
    fn unknown_status_is_a_bad_request() {
        let unknown = "lost".parse::<OrderStatus>().unwrap_err();
        let err: AppError = OrderError::from(unknown).into();

        assert_eq!(err.status_code().as_u16(), 400);
        assert_eq!(err.code(), "INVALID_STATUS");
    }

    #[test]
    fn missing_order_is_not_found() {
        let err: AppError = OrderError::OrderNotFound { order_id: 8 }.into();
        assert_eq!(err.status_code().as_u16(), 404);

        let err: AppError = OrderError::UnknownOrder { order_id: 8 }.into();
        assert_eq!(err.status_code().as_u16(), 400);
    }
}
