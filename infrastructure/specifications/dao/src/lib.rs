mod product_specifications;
mod specifications;

pub use product_specifications::ProductSpecificationDao;
pub use specifications::SpecificationDao;
