mod brands;
mod categories;

pub use brands::{
    CreateBrandHandler, DeleteBrandHandler, GetBrandHandler, ListBrandsHandler,
    UpdateBrandHandler,
};
pub use categories::{
    CreateCategoryHandler, DeleteCategoryHandler, GetCategoryHandler,
    ListCategoriesHandler, ListParentCategoriesHandler, UpdateCategoryHandler,
};
