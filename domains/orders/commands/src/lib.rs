use order_models::{OrderChanges, OrderStatus, PaymentStatus, UnknownStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// First rule a command breaks, as `(field, message)`.
pub type ValidationFailure = (&'static str, &'static str);

const MAX_NAME_LEN: usize = 63;
const MAX_PHONE_LEN: usize = 15;
const MAX_PAYMENT_METHOD_LEN: usize = 50;

fn check_name(
    field: &'static str, value: &str,
) -> Result<(), ValidationFailure> {
    if value.trim().is_empty() {
        return Err((field, "must not be empty"));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err((field, "must be at most 63 characters"));
    }
    Ok(())
}

/// Digits with an optional leading `+`, at most 15 characters.
fn check_phone(phone: &str) -> Result<(), ValidationFailure> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(("phone_number", "must contain only digits"));
    }
    if phone.len() > MAX_PHONE_LEN {
        return Err(("phone_number", "must be at most 15 characters"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderCommand {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    pub total_price: i64,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl CreateOrderCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        check_name("name", &self.name)?;
        check_name("surname", &self.surname)?;
        check_phone(&self.phone_number)?;
        if self.total_price < 0 {
            return Err(("total_price", "must not be negative"));
        }
        if self
            .payment_method
            .as_deref()
            .is_some_and(|m| m.chars().count() > MAX_PAYMENT_METHOD_LEN)
        {
            return Err(("payment_method", "must be at most 50 characters"));
        }
        Ok(())
    }
}

/// `{"status": "shipped"}`. Kept as text so an unknown value is a 400 with
/// the accepted list rather than a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusCommand {
    pub status: String,
}

impl UpdateOrderStatusCommand {
    pub fn changes(&self) -> Result<OrderChanges, UnknownStatus> {
        Ok(OrderChanges {
            status: Some(self.status.trim().parse::<OrderStatus>()?),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderPaymentCommand {
    pub payment_status: String,
}

impl UpdateOrderPaymentCommand {
    pub fn changes(&self) -> Result<OrderChanges, UnknownStatus> {
        Ok(OrderChanges {
            payment_status: Some(
                self.payment_status.trim().parse::<PaymentStatus>()?,
            ),
            ..Default::default()
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteOrderCommand {
    pub order_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderItemCommand {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price_at_purchase: i64,
}

impl CreateOrderItemCommand {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        if self.quantity <= 0 {
            return Err(("quantity", "must be positive"));
        }
        if self.price_at_purchase < 0 {
            return Err(("price_at_purchase", "must not be negative"));
        }
        Ok(())
    }
}
