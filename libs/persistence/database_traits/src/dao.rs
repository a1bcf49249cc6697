use std::fmt::Debug;

use async_trait::async_trait;
use tokio_postgres::Row;

/// CRUD over one table with integer-like ids.
///
/// Lookups and deletes of a missing row fail with the DAO's own not-found
/// error rather than returning `Option`; `update` applies a partial change
/// and returns the stored row.
#[async_trait]
pub trait GenericDao {
    type Model: Send + Sync + 'static;
    type Response: From<Self::Model> + Send + Sync + 'static;
    type CreateRequest: Send + Sync + 'static;
    type UpdateRequest: Send + Sync + 'static;
    type Error: Send + 'static;
    type ID: Copy + Debug + Send + Sync + 'static;

    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error>;

    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error>;

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error>;

    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error>;

    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error>;

    /// Maps a row selected with the DAO's column list, by position.
    fn map_row(&self, row: &Row) -> Self::Model;
}
