use product_dao::{ProductDao, ProductStore};
use product_errors::ProductError;
use product_models::{
    NewProduct, ProductChanges, ProductPredicate, ProductSelection,
};
use test_utils::{TestPostgresContainer, fixtures::new_product};

struct Catalog {
    parent: i64,
    child: i64,
    grandchild: i64,
    brand: i64,
}

async fn seed_catalog(
    container: &TestPostgresContainer,
) -> anyhow::Result<Catalog> {
    let parent = container.insert_category("Kitchen", None).await?;
    let child = container.insert_category("Pans", Some(parent)).await?;
    let grandchild = container.insert_category("Woks", Some(child)).await?;
    let brand = container.insert_brand("Ferro").await?;

    Ok(Catalog {
        parent,
        child,
        grandchild,
        brand,
    })
}

fn named(
    category_id: i64, brand_id: i64, name: &str, price: i64, stock: i32,
) -> NewProduct {
    NewProduct {
        name: name.into(),
        search_string: name.to_lowercase(),
        price,
        num_product: stock,
        ..new_product(category_id, brand_id)
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn listing_filters_and_orders_products() -> anyhow::Result<()> {
    let container = TestPostgresContainer::new().await?;
    let catalog = seed_catalog(&container).await?;
    let dao = ProductDao::new(container.sql_connect());

    let in_parent = dao
        .create_product(named(catalog.parent, catalog.brand, "Pot", 100, 0))
        .await?;
    let in_child = dao
        .create_product(named(catalog.child, catalog.brand, "Pan", 50, 5))
        .await?;
    let in_grandchild = dao
        .create_product(named(catalog.grandchild, catalog.brand, "Wok", 80, 2))
        .await?;

    let all = dao.find_products(&ProductSelection::all()).await?;
    let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![in_grandchild.id, in_child.id, in_parent.id]);

    let mut categories = dao.child_category_ids(catalog.parent).await?;
    categories.push(catalog.parent);
    let selection = ProductSelection {
        predicates: vec![ProductPredicate::CategoryIn(categories)],
        ..ProductSelection::all()
    };
    let ids: Vec<i64> = dao
        .find_products(&selection)
        .await?
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![in_child.id, in_parent.id]);

    let selection = ProductSelection {
        predicates: vec![
            ProductPredicate::InStock,
            ProductPredicate::PriceAtMost(60),
        ],
        ..ProductSelection::all()
    };
    let found = dao.find_products(&selection).await?;
    assert_eq!(found, vec![in_child.clone()]);

    let window = ProductSelection {
        offset: 1,
        limit: Some(1),
        ..ProductSelection::all()
    };
    assert_eq!(dao.find_products(&window).await?, vec![in_child]);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn search_matches_literal_substrings() -> anyhow::Result<()> {
    let container = TestPostgresContainer::new().await?;
    let catalog = seed_catalog(&container).await?;
    let dao = ProductDao::new(container.sql_connect());

    let discounted = dao
        .create_product(named(catalog.parent, catalog.brand, "50% Off Pan", 10, 1))
        .await?;
    dao.create_product(named(catalog.parent, catalog.brand, "500 Pan", 10, 1))
        .await?;

    let selection = ProductSelection {
        search: Some("50%".into()),
        ..ProductSelection::all()
    };
    assert_eq!(dao.find_products(&selection).await?, vec![discounted]);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn writes_check_references() -> anyhow::Result<()> {
    let container = TestPostgresContainer::new().await?;
    let catalog = seed_catalog(&container).await?;
    let dao = ProductDao::new(container.sql_connect());

    let err = dao
        .create_product(new_product(9_999, catalog.brand))
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::CategoryNotFound {
        category_id: 9_999
    }));

    let product = dao
        .create_product(new_product(catalog.parent, catalog.brand))
        .await?;

    let err = dao
        .update_product(product.id, ProductChanges {
            brand_id: Some(9_999),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::BrandNotFound { brand_id: 9_999 }));

    let updated = dao
        .update_product(product.id, ProductChanges {
            price: Some(3_900),
            ..Default::default()
        })
        .await?;
    assert_eq!(updated.price, 3_900);
    assert_eq!(updated.name, product.name);
    assert!(updated.updated_at >= product.updated_at);

    dao.delete_product(product.id).await?;
    let err = dao.find_product(product.id).await.unwrap_err();
    assert!(matches!(err, ProductError::NotFound { .. }));
    let err = dao.delete_product(product.id).await.unwrap_err();
    assert!(matches!(err, ProductError::NotFound { .. }));

    Ok(())
}
