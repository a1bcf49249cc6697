pub const PRODUCT_KEY_PREFIX: &str = "product:";
pub const PRODUCT_KEY_PATTERN: &str = "product:*";

pub fn product_key(id: i64) -> String { format!("{PRODUCT_KEY_PREFIX}{id}") }
