use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
    Failed,
    Refunded,
}

/// A status string outside the accepted set, with the accepted values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid status '{value}'. Must be one of {allowed:?}")]
pub struct UnknownStatus {
    pub value: String,
    pub allowed: &'static [&'static str],
}

impl OrderStatus {
    pub const ALL: &'static [&'static str] =
        &["pending", "processing", "shipped", "delivered", "canceled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "canceled" => Ok(Self::Canceled),
            other => Err(UnknownStatus {
                value: other.to_owned(),
                allowed: Self::ALL,
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PaymentStatus {
    pub const ALL: &'static [&'static str] =
        &["paid", "unpaid", "failed", "refunded"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(Self::Paid),
            "unpaid" => Ok(Self::Unpaid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(UnknownStatus {
                value: other.to_owned(),
                allowed: Self::ALL,
            }),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prices are integer minor units, like product prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    /// Set by the authentication layer when one is in front of the API.
    pub user_id: Option<i64>,
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    pub total_price: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// `None` once the product has been deleted.
    pub product_id: Option<i64>,
    pub quantity: i32,
    pub price_at_purchase: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub order_items: Vec<OrderItem>,
}

/// Status changes applied by [`Order`] patches; `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderChanges {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_parse_their_wire_names() {
        for name in OrderStatus::ALL {
            assert_eq!(name.parse::<OrderStatus>().unwrap().as_str(), *name);
        }
        for name in PaymentStatus::ALL {
            assert_eq!(name.parse::<PaymentStatus>().unwrap().as_str(), *name);
        }
    }

    #[test]
    fn unknown_status_lists_the_accepted_values() {
        let err = "lost".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.value, "lost");
        assert!(err.to_string().contains("delivered"));
        assert!("Paid".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn defaults_are_pending_and_unpaid() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
        assert_eq!(
            serde_json::to_value(OrderStatus::Canceled).unwrap(),
            "canceled"
        );
    }
}
