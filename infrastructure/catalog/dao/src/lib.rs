mod brands;
mod categories;

pub use brands::BrandDao;
pub use categories::CategoryDao;
