mod catalog_filesystem;
pub mod yaml_catalog;

pub use catalog_filesystem::FilesystemCatalogStore;
