use crate::query_helpers::PgParamVec;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PaginationParams {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self { limit, offset }
    }

    /// Appends `ORDER BY`, `LIMIT` and `OFFSET` to `base_query`, numbering
    /// placeholders after the `existing` ones and pushing their values.
    pub fn build_query_with_existing_params(
        &self, base_query: &str, order_by: &str, params: &mut PgParamVec,
    ) -> String {
        let mut query = format!("{base_query} {order_by}");

        if let Some(limit) = self.limit {
            params.push(Box::new(limit as i64));
            query.push_str(&format!(" LIMIT ${}", params.len()));
        }

        if let Some(offset) = self.offset {
            params.push(Box::new(offset as i64));
            query.push_str(&format!(" OFFSET ${}", params.len()));
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pagination_only_orders() {
        let mut params = PgParamVec::new();
        let sql = PaginationParams::default().build_query_with_existing_params(
            "SELECT * FROM products",
            "ORDER BY date_created DESC",
            &mut params,
        );
        assert_eq!(sql, "SELECT * FROM products ORDER BY date_created DESC");
        assert!(params.is_empty());
    }

    #[test]
    fn test_limit_and_offset_follow_existing_params() {
        let mut params = PgParamVec::new();
        params.push(Box::new(10_i64));
        let sql = PaginationParams::new(Some(20), Some(40))
            .build_query_with_existing_params(
                "SELECT * FROM products WHERE brand_id = $1",
                "ORDER BY date_created DESC",
                &mut params,
            );
        assert_eq!(
            sql,
            "SELECT * FROM products WHERE brand_id = $1 ORDER BY \
             date_created DESC LIMIT $2 OFFSET $3"
        );
        assert_eq!(params.len(), 3);
    }
}
