use catalog_commands::{
    CreateBrandCommand, UpdateBrandCommand, UpdateCategoryCommand,
};
use catalog_dao::{BrandDao, CategoryDao};
use catalog_errors::CatalogError;
use catalog_models::NewCategory;
use database_traits::dao::GenericDao;
use test_utils::TestPostgresContainer;

fn category(name: &str, parent_category_id: Option<i64>) -> NewCategory {
    NewCategory {
        name: name.into(),
        num_category: 1,
        is_active: true,
        icon_image_link: String::new(),
        parent_category_id,
    }
}

fn brand(name: &str) -> CreateBrandCommand {
    CreateBrandCommand {
        name: name.into(),
        num_brand: 0,
        is_active: true,
        image_link: String::new(),
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn categories_nest_and_cascade() -> anyhow::Result<()> {
    let container = TestPostgresContainer::new().await?;
    let dao = CategoryDao::new(container.sql_connect());

    let kitchen = dao.create(category("Kitchen", None)).await?;
    let pans = dao.create(category("Pans", Some(kitchen.id))).await?;
    assert_eq!(pans.parent_category_id, Some(kitchen.id));

    let err = dao.create(category("Orphan", Some(9_999))).await.unwrap_err();
    assert!(matches!(err, CatalogError::ParentNotFound {
        category_id: 9_999
    }));

    let err = dao.create(category("Kitchen", None)).await.unwrap_err();
    assert!(matches!(err, CatalogError::CategoryNameExists(_)));

    let parents = dao.parents().await?;
    assert_eq!(parents, vec![kitchen.clone()]);
    assert_eq!(dao.all().await?.len(), 2);

    let renamed = dao
        .update(kitchen.id, UpdateCategoryCommand {
            category_id: kitchen.id,
            name: Some("Cookware".into()),
            ..Default::default()
        })
        .await?;
    assert_eq!(renamed.name, "Cookware");
    assert_eq!(renamed.num_category, kitchen.num_category);

    dao.delete(kitchen.id).await?;
    let err = dao.find_by_id(pans.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::CategoryNotFound { .. }));

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn brands_in_use_cannot_be_deleted() -> anyhow::Result<()> {
    let container = TestPostgresContainer::new().await?;
    let dao = BrandDao::new(container.sql_connect());

    let ferro = dao.create(brand("Ferro")).await?;
    let acme = dao.create(brand("Acme")).await?;

    let names: Vec<String> =
        dao.all().await?.into_iter().map(|b| b.name).collect();
    assert_eq!(names, vec!["Acme", "Ferro"]);

    let err = dao
        .update(acme.id, UpdateBrandCommand {
            brand_id: acme.id,
            name: Some("Ferro".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::BrandNameExists(_)));

    let category_id = container.insert_category("Kitchen", None).await?;
    container
        .execute_sql(&format!(
            "INSERT INTO products (category_id, brand_id, author_id, name, \
             model_name, search_string, price, image_link) VALUES \
             ({category_id}, {}, 1, 'Pan', 'P1', 'pan', 10, '')",
            ferro.id
        ))
        .await?;

    let err = dao.delete(ferro.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::BrandInUse { .. }));

    dao.delete(acme.id).await?;
    let err = dao.delete(acme.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::BrandNotFound { .. }));

    Ok(())
}
