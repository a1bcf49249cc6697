use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;
use database_traits::dao::GenericDao;

#[derive(Debug, Clone, PartialEq)]
struct Brand {
    id: i64,
    name: String,
}

#[derive(Debug, thiserror::Error)]
enum MockError {
    #[error("Not found")]
    NotFound,
}

#[derive(Default)]
struct MockBrandDao {
    rows: Mutex<BTreeMap<i64, Brand>>,
}

#[async_trait]
impl GenericDao for MockBrandDao {
    type CreateRequest = String;
    type Error = MockError;
    type ID = i64;
    type Model = Brand;
    type Response = Brand;
    type UpdateRequest = String;

    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(MockError::NotFound)
    }

    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
        let brand = Brand { id, name: req };
        rows.insert(id, brand.clone());
        Ok(brand)
    }

    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut rows = self.rows.lock().unwrap();
        let brand = rows.get_mut(&id).ok_or(MockError::NotFound)?;
        brand.name = req;
        Ok(brand.clone())
    }

    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(MockError::NotFound)
    }

    fn map_row(&self, row: &tokio_postgres::Row) -> Self::Model {
        Brand {
            id: row.get(0),
            name: row.get(1),
        }
    }
}

#[tokio::test]
async fn test_generic_dao_lifecycle() {
    let dao = MockBrandDao::default();

    let created = dao.create("Acme".to_string()).await.unwrap();
    assert_eq!(created.id, 1);

    let updated = dao.update(1, "Acme Corp".to_string()).await.unwrap();
    assert_eq!(updated.name, "Acme Corp");
    assert_eq!(dao.find_by_id(1).await.unwrap(), updated);

    dao.delete(1).await.unwrap();
    assert!(matches!(dao.find_by_id(1).await, Err(MockError::NotFound)));
    assert!(dao.all().await.unwrap().is_empty());
}
