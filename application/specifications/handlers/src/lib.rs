mod product_specifications;
mod specifications;

pub use product_specifications::{
    CreateProductSpecificationHandler, DeleteProductSpecificationHandler,
    GetProductSpecificationHandler, ListProductSpecificationsHandler,
    ProductSpecificationValuesHandler, UpdateProductSpecificationHandler,
};
pub use specifications::{
    CategorySpecificationsHandler, CreateSpecificationHandler,
    DeleteSpecificationHandler, GetSpecificationHandler,
    ListSpecificationsHandler, UpdateSpecificationHandler,
};
