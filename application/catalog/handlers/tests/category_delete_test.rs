use std::sync::Arc;

use catalog_commands::DeleteCategoryCommand;
use catalog_handlers::DeleteCategoryHandler;
use database_traits::dao::GenericDao;
use product_cache::ProductCache;
use product_dao::ProductDao;
use product_queries::ListProductsQuery;
use product_query_handlers::ListProductsQueryHandler;
use redis_connection::{HashCache, Memory};
use test_utils::{TestPostgresContainer, fixtures::new_product};

#[tokio::test]
#[ignore = "requires docker"]
async fn deleting_a_category_flushes_cascaded_products_from_the_cache()
-> anyhow::Result<()> {
    let container = TestPostgresContainer::new().await?;
    let kitchen = container.insert_category("Kitchen", None).await?;
    let pans = container.insert_category("Pans", Some(kitchen)).await?;
    let garden = container.insert_category("Garden", None).await?;
    let brand = container.insert_brand("Ferro").await?;

    let dao = ProductDao::new(container.sql_connect());
    let pan = dao.create(new_product(pans, brand)).await?;
    let pot = dao.create(new_product(kitchen, brand)).await?;
    let hose = dao.create(new_product(garden, brand)).await?;

    let memory = Arc::new(Memory::default());
    let cache = ProductCache::new(memory.clone());
    let listing = ListProductsQueryHandler::new(Arc::new(dao), cache.clone());

    let before = listing.execute(ListProductsQuery::unfiltered()).await?;
    assert_eq!(before.len(), 3);
    assert_eq!(memory.scan_keys("product:*").await?.len(), 3);

    DeleteCategoryHandler::new(container.sql_connect(), cache)
        .execute(DeleteCategoryCommand {
            category_id: kitchen,
        })
        .await?;

    assert!(memory.scan_keys("product:*").await?.is_empty());

    let after = listing.execute(ListProductsQuery::unfiltered()).await?;
    let ids: Vec<i64> = after.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![hose.id]);
    assert!(!ids.contains(&pan.id) && !ids.contains(&pot.id));
    Ok(())
}
